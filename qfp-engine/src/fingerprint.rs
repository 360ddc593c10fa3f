//! Resultado de fingerprinting e identidade de padrão

use serde::{Deserialize, Serialize};

/// Fingerprint produzido para um padrão
///
/// Imutável após produzido; propriedade do chamador. Estes campos são o
/// único contrato com as camadas externas — `Register`, `Gate` e
/// `TuningPlan` não fazem parte da superfície pública.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// Score de similaridade em [0, 1]
    pub similarity: f64,
    /// Confiança do score em [0, 1]
    pub confidence: f64,
    /// Identificador opaco e determinístico do padrão
    pub pattern_id: String,
    /// Qubits usados pelo pipeline
    pub qubits_used: u8,
    /// Número de operações aplicadas ao registrador
    pub depth: usize,
}

/// Identificador determinístico do padrão
///
/// FNV-1a de 64 bits sobre os bytes — identidade opaca, não hash
/// criptográfico.
pub fn pattern_id(pattern: &[u8]) -> String {
    format!("qfp-{:016x}", fnv1a64(pattern))
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    let mut hash = OFFSET;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
