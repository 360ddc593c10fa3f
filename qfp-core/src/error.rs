//! Tipos de erro para qfp-core

use thiserror::Error;

/// Resultado customizado para operações do registrador
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Erros que podem ocorrer em operações do registrador
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegisterError {
    #[error("Invalid qubit count: {got} (allowed 1..={max})")]
    InvalidQubitCount { got: u8, max: u8 },

    #[error("Empty pattern: nothing to encode")]
    EmptyPattern,

    #[error("Qubit {qubit} out of range for a {qubit_count}-qubit register")]
    QubitOutOfRange { qubit: usize, qubit_count: u8 },

    #[error("Corrupt state: |Σ|a|² − 1| = {deviation:e} exceeds tolerance")]
    CorruptState { deviation: f64 },
}
