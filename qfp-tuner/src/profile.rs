//! Perfil de arquitetura do host

use serde::{Deserialize, Serialize};
use std::fmt;

/// Defaults conservadores usados quando a detecção falha
const FALLBACK_L1D: usize = 32 * 1024;
const FALLBACK_L2: usize = 256 * 1024;
const FALLBACK_L3: usize = 8 * 1024 * 1024;
const FALLBACK_LINE: usize = 64;

/// Tier de SIMD detectado
///
/// Enum fechado derivado de detecção portável de features — substitui a
/// dispatch por nome/vendor de modelo de CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SimdTier {
    /// Vetores largos (AVX2: 4× f64)
    Wide,
    /// Vetores estreitos (NEON/SSE2: 2× f64)
    Narrow,
    /// Sem vetorização
    #[default]
    Scalar,
}

impl SimdTier {
    /// Nome descritivo
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wide => "wide-simd",
            Self::Narrow => "narrow-simd",
            Self::Scalar => "scalar",
        }
    }

    /// Largura de vetor em f64
    pub fn lanes_f64(&self) -> usize {
        match self {
            Self::Wide => 4,
            Self::Narrow => 2,
            Self::Scalar => 1,
        }
    }
}

impl fmt::Display for SimdTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Perfil de arquitetura — derivado, somente leitura, vida do processo
///
/// Computado uma vez na criação do engine e nunca mutado; re-detecção
/// exige uma instância nova.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchProfile {
    /// Cache de dados L1 em bytes
    pub l1d: usize,
    /// Cache L2 em bytes
    pub l2: usize,
    /// Cache L3 em bytes
    pub l3: usize,
    /// Tamanho da linha de cache em bytes
    pub cache_line: usize,
    /// Cores físicos estimados
    pub physical_cores: usize,
    /// Threads lógicas (SMT incluído)
    pub logical_threads: usize,
    /// Tier de SIMD
    pub simd_tier: SimdTier,
}

impl ArchProfile {
    /// Detecta o perfil do host
    ///
    /// Lê a topologia exposta pelo SO quando disponível; qualquer falha
    /// degrada para os defaults conservadores — nunca retorna erro.
    pub fn detect() -> Self {
        let logical_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let physical_cores = detect_physical_cores(logical_threads);
        let (l1d, l2, l3, cache_line) = detect_caches()
            .unwrap_or((FALLBACK_L1D, FALLBACK_L2, FALLBACK_L3, FALLBACK_LINE));

        Self {
            l1d,
            l2,
            l3,
            cache_line,
            physical_cores,
            logical_threads,
            simd_tier: detect_simd_tier(),
        }
    }

    /// Perfil de fallback puro (sem tocar o host) — útil em testes
    pub fn fallback() -> Self {
        Self {
            l1d: FALLBACK_L1D,
            l2: FALLBACK_L2,
            l3: FALLBACK_L3,
            cache_line: FALLBACK_LINE,
            physical_cores: 1,
            logical_threads: 1,
            simd_tier: SimdTier::Scalar,
        }
    }
}

/// Detecta o tier de SIMD via features portáveis
fn detect_simd_tier() -> SimdTier {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            SimdTier::Wide
        } else if is_x86_feature_detected!("sse2") {
            SimdTier::Narrow
        } else {
            SimdTier::Scalar
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        // NEON sempre disponível em aarch64
        SimdTier::Narrow
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        SimdTier::Scalar
    }
}

/// Estima cores físicos a partir das threads lógicas
fn detect_physical_cores(logical: usize) -> usize {
    #[cfg(target_os = "linux")]
    {
        if let Ok(active) = std::fs::read_to_string("/sys/devices/system/cpu/smt/active") {
            if active.trim() == "1" {
                return (logical / 2).max(1);
            }
        }
        logical.max(1)
    }
    #[cfg(not(target_os = "linux"))]
    {
        logical.max(1)
    }
}

/// Lê a hierarquia de cache do sysfs (Linux)
#[cfg(target_os = "linux")]
fn detect_caches() -> Option<(usize, usize, usize, usize)> {
    use std::fs;

    let base = "/sys/devices/system/cpu/cpu0/cache";
    let mut l1d = None;
    let mut l2 = None;
    let mut l3 = None;
    let mut line = None;

    for idx in 0..8 {
        let dir = format!("{base}/index{idx}");

        let Ok(kind) = fs::read_to_string(format!("{dir}/type")) else { continue };
        if kind.trim() == "Instruction" {
            continue;
        }

        let Ok(level) = fs::read_to_string(format!("{dir}/level")) else { continue };
        let Ok(size) = fs::read_to_string(format!("{dir}/size")) else { continue };
        let Some(bytes) = parse_cache_size(size.trim()) else { continue };

        match level.trim() {
            "1" => l1d = Some(bytes),
            "2" => l2 = Some(bytes),
            "3" => l3 = Some(bytes),
            _ => {}
        }

        if line.is_none() {
            line = fs::read_to_string(format!("{dir}/coherency_line_size"))
                .ok()
                .and_then(|s| s.trim().parse::<usize>().ok());
        }
    }

    // L1 e L2 são obrigatórios para confiar na leitura; L3 pode faltar
    match (l1d, l2) {
        (Some(a), Some(b)) => Some((a, b, l3.unwrap_or(FALLBACK_L3), line.unwrap_or(FALLBACK_LINE))),
        _ => None,
    }
}

#[cfg(not(target_os = "linux"))]
fn detect_caches() -> Option<(usize, usize, usize, usize)> {
    None
}

/// Converte "32K" / "8M" / "1024" em bytes
fn parse_cache_size(text: &str) -> Option<usize> {
    if text.is_empty() {
        return None;
    }

    let (digits, multiplier) = match text.as_bytes()[text.len() - 1] {
        b'K' | b'k' => (&text[..text.len() - 1], 1024),
        b'M' | b'm' => (&text[..text.len() - 1], 1024 * 1024),
        _ => (text, 1),
    };

    digits.trim().parse::<usize>().ok().map(|n| n * multiplier)
}
