//! Pipeline de circuito fixo
//!
//! Sequência fixa e explicável de operações (não um circuito configurável
//! pelo usuário): encode → superposição → injeção de fase → inverse-QFT →
//! difusão → medição. A injeção de fase é o único passo dependente do
//! padrão — padrões diferentes recebem fingerprints de fase diferentes.
//!
//! **Nota de honestidade:** dado um RNG com seed fixa o transform é
//! determinístico, e padrões de bytes similares tendem a produzir
//! coerências pós-medição estatisticamente próximas. É uma heurística de
//! similaridade best-effort, não vantagem quântica comprovada nem métrica
//! com garantias.

use qfp_core::{Gate, Register, StateMetrics};
use rand::Rng;
use std::f64::consts::PI;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::fingerprint::{PatternMatch, pattern_id};

/// Qubits para um padrão: `min(max, ceil(log2(len + 1)))`, piso 1
pub fn qubit_count_for(len: usize, max_qubits: u8) -> u8 {
    let x = len.saturating_add(1);
    let bits = (usize::BITS - (x - 1).leading_zeros()) as u8;
    bits.clamp(1, max_qubits)
}

/// Executa o pipeline sobre um registrador reutilizável
///
/// O registrador é redimensionado e zerado no início — workers do
/// scheduler chamam isto item após item sem realocar.
pub fn run<R: Rng>(
    register: &mut Register,
    pattern: &[u8],
    config: &EngineConfig,
    rng: &mut R,
) -> EngineResult<PatternMatch> {
    // Falha antes de tocar o registrador
    if pattern.is_empty() {
        return Err(EngineError::InvalidPattern);
    }

    let qubits = qubit_count_for(pattern.len(), config.max_parallel_qubits);
    let n = qubits as usize;
    register.reset_to(qubits)?;

    let mut depth = 0usize;

    // 1–2. codificação do padrão
    register.encode(pattern)?;

    // 3. superposição uniforme
    for q in 0..n {
        register.apply(Gate::Hadamard(q))?;
        depth += 1;
    }

    // 4. injeção de fase dependente do padrão
    for (i, &byte) in pattern.iter().enumerate() {
        let angle = 2.0 * PI * byte as f64 / 255.0;
        register.apply(Gate::PhaseShift { qubit: i % n, angle })?;
        depth += 1;
    }
    register.renormalize()?;

    // 5. passagem inverse-QFT
    for i in 0..n {
        register.apply(Gate::Hadamard(i))?;
        depth += 1;
        for j in (i + 1)..n {
            let angle = -2.0 * PI / (1u64 << (j - i + 1)) as f64;
            register.apply(Gate::ControlledPhase { control: j, target: i, angle })?;
            depth += 1;
        }
    }
    for i in 0..n / 2 {
        register.apply(Gate::Swap(i, n - 1 - i))?;
        depth += 1;
    }
    register.renormalize()?;

    // 6. uma rodada de difusão (Grover)
    for q in 0..n {
        register.apply(Gate::Hadamard(q))?;
        depth += 1;
    }
    for q in 0..n {
        register.apply(Gate::PauliX(q))?;
        depth += 1;
    }
    register.phase_flip_all_ones();
    depth += 1;
    for q in 0..n {
        register.apply(Gate::PauliX(q))?;
        depth += 1;
    }
    for q in 0..n {
        register.apply(Gate::Hadamard(q))?;
        depth += 1;
    }
    register.renormalize()?;

    // 7. medição e score
    register.measure(0, rng)?;
    let metrics = register.metrics();
    let (similarity, confidence) = score(&metrics, config);

    Ok(PatternMatch {
        similarity,
        confidence,
        pattern_id: pattern_id(pattern),
        qubits_used: qubits,
        depth,
    })
}

/// Mapeia métricas pós-medição em (similarity, confidence)
///
/// Funções monotônicas das duas métricas, clampadas a [0,1]. O peso é o
/// knob `similarity_weight` — a forma exata é heurística tunável sem
/// derivação física; tratar como parâmetro, não como lei.
pub fn score(metrics: &StateMetrics, config: &EngineConfig) -> (f64, f64) {
    let w = config.similarity_weight;
    let similarity =
        (w * metrics.coherence + (1.0 - w) * (1.0 - metrics.entanglement)).clamp(0.0, 1.0);

    let excess = (metrics.entanglement - config.max_entanglement).max(0.0);
    let mut confidence =
        (metrics.coherence * (1.0 - 0.5 * metrics.entanglement) - excess).clamp(0.0, 1.0);
    if metrics.coherence < config.min_coherence {
        // Abaixo da coerência mínima o score não é confiável
        confidence *= 0.5;
    }

    (similarity, confidence)
}
