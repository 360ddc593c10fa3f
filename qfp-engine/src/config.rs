//! Configuração validada do engine

use qfp_core::HARD_MAX_QUBITS;
use qfp_tuner::TunerConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuração do engine de fingerprinting
///
/// Validada uma única vez em [`crate::Engine::new`] — nenhuma configuração
/// parcialmente válida escapa da construção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Coerência mínima esperada de um match útil
    pub min_coherence: f64,
    /// Emaranhamento acima do qual a confiança é penalizada
    pub max_entanglement: f64,
    /// Similaridade mínima para contar como match nos contadores
    pub min_pattern_similarity: f64,
    /// Peso da coerência no score de similaridade (o complemento pesa o
    /// emaranhamento) — parâmetro tunável, não lei física
    pub similarity_weight: f64,
    /// Máximo de qubits por registrador (1..=20)
    pub max_parallel_qubits: u8,
    /// Máximo de itens por chunk contíguo de um worker
    pub batch_size: usize,
    /// Seed base dos streams de RNG (explícita — sem estado global)
    pub seed: u64,
    /// Knobs do tuner de arquitetura
    pub tuner: TunerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_coherence: 0.1,
            max_entanglement: 0.8,
            min_pattern_similarity: 0.5,
            similarity_weight: 0.6,
            max_parallel_qubits: 16,
            batch_size: 64,
            seed: 0x9E37_79B9_7F4A_7C15,
            tuner: TunerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Valida todos os campos — falha rápida
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("min_coherence", self.min_coherence),
            ("max_entanglement", self.max_entanglement),
            ("min_pattern_similarity", self.min_pattern_similarity),
            ("similarity_weight", self.similarity_weight),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value, expected: "[0, 1]" });
            }
        }

        if self.max_parallel_qubits == 0 || self.max_parallel_qubits > HARD_MAX_QUBITS {
            return Err(ConfigError::OutOfRange {
                field: "max_parallel_qubits",
                value: self.max_parallel_qubits as f64,
                expected: "1..=20",
            });
        }

        if self.batch_size == 0 {
            return Err(ConfigError::OutOfRange {
                field: "batch_size",
                value: 0.0,
                expected: ">= 1",
            });
        }

        self.tuner.validate()?;
        Ok(())
    }
}
