//! Planos de tuning por tamanho de problema

use serde::{Deserialize, Serialize};

use crate::error::{TunerError, TunerResult};
use crate::profile::{ArchProfile, SimdTier};

/// Knobs configuráveis do tuner
///
/// Os limites de tamanho de problema são medidos em elementos (para o
/// engine, posições do vetor de amplitudes × itens do lote). O default de
/// `trivial_limit` corresponde a registradores de até 4 qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunerConfig {
    /// Fração do cache efetivamente usada por bloco (0,1]
    pub cache_aggression: f64,
    /// Menor bloco permitido, em elementos (potência de dois)
    pub min_block: usize,
    /// Maior bloco permitido, em elementos (potência de dois)
    pub max_block: usize,
    /// Problemas até este tamanho rodam em 1 thread
    pub trivial_limit: usize,
    /// Problemas até este tamanho usam metade dos cores físicos
    pub small_limit: usize,
    /// Problemas até este tamanho usam todos os cores físicos
    pub medium_limit: usize,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            cache_aggression: 0.5,
            min_block: 64,
            max_block: 1 << 20,
            trivial_limit: 16, // 4 qubits
            small_limit: 4096,
            medium_limit: 1 << 20,
        }
    }
}

impl TunerConfig {
    /// Valida os knobs — falha rápida, nenhuma configuração parcialmente
    /// válida escapa
    pub fn validate(&self) -> TunerResult<()> {
        if !(self.cache_aggression > 0.0 && self.cache_aggression <= 1.0) {
            return Err(TunerError::KnobOutOfRange {
                field: "cache_aggression",
                value: self.cache_aggression,
                expected: "(0, 1]",
            });
        }
        if !self.min_block.is_power_of_two() {
            return Err(TunerError::NotPowerOfTwo { field: "min_block", value: self.min_block });
        }
        if !self.max_block.is_power_of_two() {
            return Err(TunerError::NotPowerOfTwo { field: "max_block", value: self.max_block });
        }
        if self.min_block > self.max_block {
            return Err(TunerError::InconsistentLimits("min_block > max_block"));
        }
        if self.trivial_limit >= self.small_limit || self.small_limit >= self.medium_limit {
            return Err(TunerError::InconsistentLimits(
                "expected trivial_limit < small_limit < medium_limit",
            ));
        }
        Ok(())
    }
}

/// Plano de tuning derivado — puro, nunca cacheado entre tamanhos
///
/// `prefetch_*` são puramente advisórios: o simulador pode ignorá-los,
/// mas os valores ficam expostos para uma implementação nativa agir.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningPlan {
    /// Tamanho de bloco em elementos (potência de dois)
    pub block_size: usize,
    /// Distância de prefetch em elementos
    pub prefetch_distance: usize,
    /// Nível de cache alvo do prefetch (1..=3)
    pub prefetch_level: u8,
    /// Número de threads de trabalho (≥ 1)
    pub thread_count: usize,
    /// Tier de SIMD do perfil
    pub simd_tier: SimdTier,
}

impl TuningPlan {
    /// Deriva o plano para um tamanho de problema
    ///
    /// Função pura de `(profile, config, problem_size, element_size)`.
    pub fn derive(
        profile: &ArchProfile,
        config: &TunerConfig,
        problem_size: usize,
        element_size: usize,
    ) -> Self {
        let block_size = block_size(profile, config, problem_size, element_size);
        let thread_count = thread_count(profile, config, problem_size);
        let (prefetch_distance, prefetch_level) =
            prefetch(profile, block_size, element_size);

        Self {
            block_size,
            prefetch_distance,
            prefetch_level,
            thread_count,
            simd_tier: profile.simd_tier,
        }
    }
}

/// Tamanho de bloco por heurística de localidade
///
/// Para cada nível de cache: candidato proporcional ao cache efetivo
/// (cache × aggression), pontuado por quão bem o bloco cabe no nível e
/// por quanto do dado ele cobre, arredondado à potência de dois mais
/// próxima e limitado a `[min_block, max_block]`.
pub fn block_size(
    profile: &ArchProfile,
    config: &TunerConfig,
    data_size: usize,
    element_size: usize,
) -> usize {
    let elem = element_size.max(1);
    let data_bytes = data_size.saturating_mul(elem).max(1);

    let mut best = config.min_block;
    let mut best_score = f64::NEG_INFINITY;

    for (cache_bytes, weight) in [
        (profile.l1d, 1.0),
        (profile.l2, 0.6),
        (profile.l3, 0.35),
    ] {
        let effective = cache_bytes as f64 * config.cache_aggression;
        let candidate = round_pow2((effective / elem as f64).max(1.0) as usize);
        let candidate_bytes = (candidate * elem) as f64;

        let fit = (effective / candidate_bytes).min(1.0);
        let coverage = (data_bytes as f64 / candidate_bytes).min(1.0);
        let score = weight * fit * coverage;

        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }

    best.clamp(config.min_block, config.max_block)
}

/// Threads por tamanho de problema — função escada monotônica, nunca zero
pub fn thread_count(profile: &ArchProfile, config: &TunerConfig, problem_size: usize) -> usize {
    let physical = profile.physical_cores.max(1);
    let logical = profile.logical_threads.max(physical);

    if problem_size <= config.trivial_limit {
        1
    } else if problem_size <= config.small_limit {
        (physical / 2).max(1)
    } else if problem_size <= config.medium_limit {
        physical
    } else {
        logical
    }
}

/// Distância e nível de prefetch derivados do tier de SIMD e do bloco
fn prefetch(profile: &ArchProfile, block_size: usize, element_size: usize) -> (usize, u8) {
    let lines_ahead = match profile.simd_tier {
        SimdTier::Wide => 8,
        SimdTier::Narrow => 4,
        SimdTier::Scalar => 2,
    };

    let elems_per_line = (profile.cache_line / element_size.max(1)).max(1);
    let distance = (lines_ahead * elems_per_line).min((block_size / 2).max(1)).max(1);

    let block_bytes = block_size.saturating_mul(element_size.max(1));
    let level = if block_bytes <= profile.l1d {
        1
    } else if block_bytes <= profile.l2 {
        2
    } else {
        3
    };

    (distance, level)
}

/// Potência de dois mais próxima (≥ 1)
fn round_pow2(x: usize) -> usize {
    if x <= 1 {
        return 1;
    }
    let below = 1usize << (usize::BITS - 1 - x.leading_zeros());
    let above = below << 1;
    if x - below < above - x { below } else { above }
}
