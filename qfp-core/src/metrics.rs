//! Métricas derivadas do vetor de amplitudes
//!
//! Escalares-resumo em [0,1] recomputados sob demanda — nunca armazenados
//! independentemente das amplitudes. São entradas heurísticas do score de
//! similaridade, não grandezas físicas calibradas.

use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Métricas derivadas de um estado
///
/// - `coherence`: norma-l1 das amplitudes, reescalada para [0,1]
///   (`((Σ|a_i|)² − 1) / (2^n − 1)`); 0 num estado base, 1 na
///   superposição uniforme de fases alinhadas.
/// - `entanglement`: média sobre os qubits da entropia linear do estado
///   reduzido de um qubit (`2·(1 − tr ρ²)`); 0 em estados produto.
/// - `superposition`: razão de participação inversa normalizada
///   (`(1/Σp_i² − 1) / (2^n − 1)`); fração efetiva de estados base com
///   probabilidade não-desprezível.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateMetrics {
    pub coherence: f64,
    pub entanglement: f64,
    pub superposition: f64,
}

impl StateMetrics {
    /// Computa as três métricas numa passagem de leitura
    pub fn compute(amplitudes: &[Complex<f64>], qubit_count: u8) -> Self {
        let dim = amplitudes.len();
        if dim < 2 {
            return Self { coherence: 0.0, entanglement: 0.0, superposition: 0.0 };
        }

        let mut l1 = 0.0;
        let mut sum_p2 = 0.0;
        for amp in amplitudes {
            let p = amp.norm_sqr();
            l1 += p.sqrt();
            sum_p2 += p * p;
        }

        if sum_p2 <= f64::EPSILON {
            // Estado sem massa: degenerado, o registrador já reporta CorruptState
            return Self { coherence: 0.0, entanglement: 0.0, superposition: 0.0 };
        }

        let scale = (dim - 1) as f64;
        let coherence = ((l1 * l1 - 1.0) / scale).clamp(0.0, 1.0);
        let superposition = ((sum_p2.recip() - 1.0) / scale).clamp(0.0, 1.0);
        let entanglement = mean_linear_entropy(amplitudes, qubit_count);

        Self { coherence, entanglement, superposition }
    }
}

/// Entropia linear média dos estados reduzidos de um qubit
///
/// Para cada qubit q monta a matriz densidade reduzida 2×2
/// `ρ_q = [[p0, c], [c*, p1]]` e computa `2·(1 − tr ρ²)`, com
/// `tr ρ² = p0² + p1² + 2|c|²`. O fator 2 leva a entropia linear de um
/// qubit (máximo 0.5) para [0,1].
fn mean_linear_entropy(amplitudes: &[Complex<f64>], qubit_count: u8) -> f64 {
    if qubit_count < 2 {
        // Um único qubit nunca está emaranhado
        return 0.0;
    }

    let mut total = 0.0;
    for q in 0..qubit_count as usize {
        let mask = 1usize << q;
        let mut p0 = 0.0;
        let mut p1 = 0.0;
        let mut cross = Complex::new(0.0, 0.0);

        for (i, amp) in amplitudes.iter().enumerate() {
            if i & mask == 0 {
                p0 += amp.norm_sqr();
                cross += amp * amplitudes[i | mask].conj();
            } else {
                p1 += amp.norm_sqr();
            }
        }

        let purity = p0 * p0 + p1 * p1 + 2.0 * cross.norm_sqr();
        total += (2.0 * (1.0 - purity)).clamp(0.0, 1.0);
    }

    total / qubit_count as f64
}
