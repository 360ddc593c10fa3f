//! Registrador de amplitudes complexas

use num_complex::Complex;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{RegisterError, RegisterResult};
use crate::gates::Gate;
use crate::metrics::StateMetrics;
use crate::simd::norm_sqr_sum_auto;

/// Limite físico do simulador (2^20 amplitudes ≈ 16 MiB)
pub const HARD_MAX_QUBITS: u8 = 20;

/// Tolerância do invariante de normalização: |Σ|a|² − 1| ≤ 1e-9
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Registrador quântico simulado
///
/// Mantém `2^qubit_count` amplitudes complexas normalizadas. Toda operação
/// pública mutante termina com a checagem do invariante de norma; um
/// registrador que falhe a checagem retorna
/// [`RegisterError::CorruptState`] e não deve continuar sendo usado.
#[derive(Debug, Clone)]
pub struct Register {
    /// Número de qubits (1..=max_qubits)
    qubit_count: u8,
    /// Limite configurado na criação
    max_qubits: u8,
    /// Vetor de amplitudes, comprimento 2^qubit_count
    amplitudes: Vec<Complex<f64>>,
}

impl Register {
    /// Cria registrador no estado base |0…0⟩
    ///
    /// `max_qubits` vem da configuração do engine e é limitado por
    /// [`HARD_MAX_QUBITS`].
    pub fn new(qubit_count: u8, max_qubits: u8) -> RegisterResult<Self> {
        let max = max_qubits.min(HARD_MAX_QUBITS);
        if qubit_count == 0 || qubit_count > max {
            return Err(RegisterError::InvalidQubitCount { got: qubit_count, max });
        }

        let dim = 1usize << qubit_count;
        let mut amplitudes = vec![Complex::new(0.0, 0.0); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);

        Ok(Self { qubit_count, max_qubits: max, amplitudes })
    }

    /// Número de qubits
    pub fn qubit_count(&self) -> u8 {
        self.qubit_count
    }

    /// Dimensão do espaço de estados (2^qubit_count)
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitudes (somente leitura)
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Volta ao estado base |0…0⟩ sem realocar
    pub fn reset(&mut self) {
        for amp in &mut self.amplitudes {
            *amp = Complex::new(0.0, 0.0);
        }
        self.amplitudes[0] = Complex::new(1.0, 0.0);
    }

    /// Redimensiona para `qubit_count` qubits e volta ao estado base
    ///
    /// Reaproveita a alocação existente — caminho usado pelos workers do
    /// scheduler, que reutilizam um registrador entre itens do lote.
    pub fn reset_to(&mut self, qubit_count: u8) -> RegisterResult<()> {
        if qubit_count == 0 || qubit_count > self.max_qubits {
            return Err(RegisterError::InvalidQubitCount {
                got: qubit_count,
                max: self.max_qubits,
            });
        }

        let dim = 1usize << qubit_count;
        self.qubit_count = qubit_count;
        self.amplitudes.clear();
        self.amplitudes.resize(dim, Complex::new(0.0, 0.0));
        self.amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(())
    }

    /// Codifica um padrão de bytes como estado inicial
    ///
    /// `amplitude_i = pattern[i]/255` para `i < pattern.len()`, zero nas
    /// demais posições, seguido de renormalização. Um padrão composto só
    /// de zeros não tem massa — nesse caso o registrador cai no estado
    /// base |0…0⟩ em vez de dividir por zero.
    pub fn encode(&mut self, pattern: &[u8]) -> RegisterResult<()> {
        if pattern.is_empty() {
            return Err(RegisterError::EmptyPattern);
        }

        let dim = self.amplitudes.len();
        for i in 0..dim {
            let value = if i < pattern.len() {
                pattern[i] as f64 / 255.0
            } else {
                0.0
            };
            self.amplitudes[i] = Complex::new(value, 0.0);
        }

        let total = norm_sqr_sum_auto(&self.amplitudes);
        if total <= NORM_TOLERANCE {
            // Padrão todo-zero: sem massa para normalizar
            self.reset();
            return Ok(());
        }

        let inv = total.sqrt().recip();
        for amp in &mut self.amplitudes {
            *amp = amp.scale(inv);
        }
        self.check_norm()
    }

    /// Aplica uma gate in place — O(2^n), aritmética de índices de bits
    pub fn apply(&mut self, gate: Gate) -> RegisterResult<()> {
        if gate.max_qubit() >= self.qubit_count as usize {
            return Err(RegisterError::QubitOutOfRange {
                qubit: gate.max_qubit(),
                qubit_count: self.qubit_count,
            });
        }

        match gate {
            Gate::Hadamard(q) => self.apply_hadamard(q),
            Gate::PauliX(q) => self.apply_pauli_x(q),
            Gate::PhaseShift { qubit, angle } => self.apply_phase_shift(qubit, angle),
            Gate::ControlledPhase { control, target, angle } => {
                self.apply_controlled_phase(control, target, angle)
            }
            Gate::Swap(a, b) => self.apply_swap(a, b),
        }

        self.check_norm()
    }

    fn apply_hadamard(&mut self, qubit: usize) {
        let mask = 1usize << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = (a + b).scale(FRAC_1_SQRT_2);
                self.amplitudes[j] = (a - b).scale(FRAC_1_SQRT_2);
            }
        }
    }

    fn apply_pauli_x(&mut self, qubit: usize) {
        let mask = 1usize << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_phase_shift(&mut self, qubit: usize, angle: f64) {
        let mask = 1usize << qubit;
        let factor = Complex::from_polar(1.0, angle);
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 {
                self.amplitudes[i] *= factor;
            }
        }
    }

    fn apply_controlled_phase(&mut self, control: usize, target: usize, angle: f64) {
        let mask = (1usize << control) | (1usize << target);
        let factor = Complex::from_polar(1.0, angle);
        for i in 0..self.amplitudes.len() {
            if i & mask == mask {
                self.amplitudes[i] *= factor;
            }
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let mask_a = 1usize << a;
        let mask_b = 1usize << b;
        for i in 0..self.amplitudes.len() {
            if i & mask_a != 0 && i & mask_b == 0 {
                self.amplitudes.swap(i, i ^ (mask_a | mask_b));
            }
        }
    }

    /// Inverte a fase do estado base |1…1⟩
    ///
    /// Primitiva da rodada de difusão (multi-controlled Z não faz parte
    /// do conjunto de gates).
    pub fn phase_flip_all_ones(&mut self) {
        let last = self.amplitudes.len() - 1;
        self.amplitudes[last] = -self.amplitudes[last];
    }

    /// Probabilidade de medir |1⟩ no qubit
    pub fn branch_probability(&self, qubit: usize) -> RegisterResult<f64> {
        if qubit >= self.qubit_count as usize {
            return Err(RegisterError::QubitOutOfRange {
                qubit,
                qubit_count: self.qubit_count,
            });
        }

        let mask = 1usize << qubit;
        let p1 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();
        Ok(p1)
    }

    /// Mede (colapsa) um qubit usando o stream de RNG injetado
    ///
    /// O ramo não observado é zerado e o estado sobrevivente é
    /// renormalizado; leituras de métricas após a medição refletem o
    /// estado pós-colapso.
    pub fn measure<R: Rng>(&mut self, qubit: usize, rng: &mut R) -> RegisterResult<bool> {
        let p1 = self.branch_probability(qubit)?;
        let draw: f64 = rng.gen_range(0.0..1.0);
        let outcome = draw < p1;

        let mask = 1usize << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) != outcome {
                *amp = Complex::new(0.0, 0.0);
            }
        }

        self.renormalize()?;
        Ok(outcome)
    }

    /// Renormaliza o vetor de amplitudes
    ///
    /// Chamada explícita: o pipeline renormaliza após sequências de fase e
    /// difusão, não após cada gate, para não mascarar bugs numéricos.
    pub fn renormalize(&mut self) -> RegisterResult<()> {
        let total = norm_sqr_sum_auto(&self.amplitudes);
        if !total.is_finite() || total <= NORM_TOLERANCE {
            return Err(RegisterError::CorruptState {
                deviation: (total - 1.0).abs(),
            });
        }

        let inv = total.sqrt().recip();
        for amp in &mut self.amplitudes {
            *amp = amp.scale(inv);
        }
        Ok(())
    }

    /// Checagem sempre ativa do invariante `Σ|a|² == 1`
    pub fn check_norm(&self) -> RegisterResult<()> {
        let total = norm_sqr_sum_auto(&self.amplitudes);
        let deviation = (total - 1.0).abs();
        if !total.is_finite() || deviation > NORM_TOLERANCE {
            return Err(RegisterError::CorruptState { deviation });
        }
        Ok(())
    }

    /// Métricas derivadas — passagem pura de leitura sobre as amplitudes
    pub fn metrics(&self) -> StateMetrics {
        StateMetrics::compute(&self.amplitudes, self.qubit_count)
    }
}
