//! Tipos de erro para qfp-tuner

use thiserror::Error;

/// Resultado customizado para validação de tuning
pub type TunerResult<T> = Result<T, TunerError>;

/// Erros de configuração do tuner
///
/// Detecção de arquitetura nunca produz erro — apenas a validação dos
/// knobs configuráveis falha.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TunerError {
    #[error("{field} out of range: {value} (expected {expected})")]
    KnobOutOfRange { field: &'static str, value: f64, expected: &'static str },

    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo { field: &'static str, value: usize },

    #[error("Inconsistent limits: {0}")]
    InconsistentLimits(&'static str),
}
