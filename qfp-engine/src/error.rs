//! Tipos de erro para qfp-engine

use qfp_core::RegisterError;
use qfp_tuner::TunerError;
use thiserror::Error;

/// Resultado customizado para operações do engine
pub type EngineResult<T> = Result<T, EngineError>;

/// Erros por item do engine
///
/// Em lote, cada erro é capturado no slot do item correspondente e nunca
/// aborta os itens vizinhos. Nenhuma falha é re-tentada: todas são
/// determinísticas dado o mesmo input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Padrão vazio — recuperável por item em lote, fatal em item único
    #[error("Invalid pattern: empty input")]
    InvalidPattern,

    /// Só alcançável se a validação de config foi contornada
    #[error("Invalid qubit count: {got} (allowed 1..={max})")]
    InvalidQubitCount { got: u8, max: u8 },

    /// Invariante de normalização violado — bug numérico, nunca ignorar
    #[error("Corrupt state: {0}")]
    CorruptState(String),
}

impl From<RegisterError> for EngineError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::EmptyPattern => Self::InvalidPattern,
            RegisterError::InvalidQubitCount { got, max } => {
                Self::InvalidQubitCount { got, max }
            }
            RegisterError::CorruptState { deviation } => {
                Self::CorruptState(format!("|Σ|a|² − 1| = {deviation:e}"))
            }
            // Índices fora de alcance dentro do pipeline fixo são bug de
            // programação, classe corrupt-state
            RegisterError::QubitOutOfRange { qubit, qubit_count } => Self::CorruptState(
                format!("qubit {qubit} out of range for {qubit_count}-qubit register"),
            ),
        }
    }
}

/// Erros de construção da configuração — fatais, sem prosseguir
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange { field: &'static str, value: f64, expected: &'static str },

    #[error("Invalid tuner knobs: {0}")]
    Tuner(#[from] TunerError),
}
