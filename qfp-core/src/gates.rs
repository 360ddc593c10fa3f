//! # Quantum Gates — Operações sobre o Registrador
//!
//! Conjunto fechado de gates usado pelo pipeline de fingerprinting.
//! Cada gate é uma operação pura sobre o vetor de amplitudes, aplicada
//! por aritmética de índices de bits — nenhuma matriz 2^n × 2^n é
//! materializada.
//!
//! ## Gates Implementadas
//!
//! - **Single-qubit**: H (Hadamard), X (Pauli), P (phase shift)
//! - **Two-qubit**: CP (controlled phase), SWAP
//!
//! A unitariedade de cada gate é uma propriedade testada (a norma do
//! estado se preserva), não uma checagem em runtime por aplicação.

use serde::{Deserialize, Serialize};

/// Gate quântico aplicável a um [`crate::Register`](crate::register::Register)
///
/// Operação etiquetada, sem identidade persistente. As matrizes 2×2
/// correspondentes:
///
/// ```text
/// H = 1/√2 [[1,  1],    X = [[0, 1],    P(θ) = [[1, 0     ],
///           [1, -1]]         [1, 0]]            [0, e^{iθ}]]
/// ```
///
/// `ControlledPhase` aplica `e^{iθ}` apenas quando controle e alvo estão
/// ambos em |1⟩; `Swap` troca os eixos de dois qubits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard: cria/desfaz superposição no qubit
    Hadamard(usize),
    /// Pauli-X: NOT quântico no qubit
    PauliX(usize),
    /// Phase shift: multiplica o ramo |1⟩ do qubit por e^{iθ}
    PhaseShift { qubit: usize, angle: f64 },
    /// Fase controlada: e^{iθ} quando controle e alvo estão em |1⟩
    ControlledPhase { control: usize, target: usize, angle: f64 },
    /// Troca dois qubits
    Swap(usize, usize),
}

impl Gate {
    /// Nome curto da gate
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hadamard(_) => "H",
            Self::PauliX(_) => "X",
            Self::PhaseShift { .. } => "P",
            Self::ControlledPhase { .. } => "CP",
            Self::Swap(_, _) => "SWAP",
        }
    }

    /// Maior índice de qubit referenciado pela gate
    pub fn max_qubit(&self) -> usize {
        match *self {
            Self::Hadamard(q) | Self::PauliX(q) => q,
            Self::PhaseShift { qubit, .. } => qubit,
            Self::ControlledPhase { control, target, .. } => control.max(target),
            Self::Swap(a, b) => a.max(b),
        }
    }

    /// Gate atua sobre dois qubits?
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Self::ControlledPhase { .. } | Self::Swap(_, _))
    }
}

// =============================================================================
// Testes
// =============================================================================
