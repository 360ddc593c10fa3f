//! # ⚛️ qfp-core — Registrador Quântico Simulado
//!
//! Implementa o registrador de amplitudes complexas usado como primitiva de
//! fingerprinting: aplicação de gates, medição probabilística e métricas
//! derivadas (coerência, emaranhamento, superposição).
//!
//! ## Computational Complexity
//!
//! **Gate application — O(2^n):**
//! - n = number of qubits (bounded, 1..=20)
//! - Pure bit-index arithmetic over the amplitude vector
//! - No 2^n × 2^n matrix is ever materialized
//!
//! **Measurement — O(2^n):**
//! - One pass to accumulate branch probability, one pass to collapse
//!
//! **Derived metrics — O(n × 2^n):**
//! - Coherence and superposition: single pass
//! - Entanglement: one reduced-density pass per qubit
//!
//! **Invariant:** `Σ |amplitude_i|² == 1` within 1e-9 after every public
//! mutating operation. The check is always active — it guards numeric
//! correctness, not user input.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          Register                               │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Amplitudes (Vec<Complex<f64>>, 2^n)      │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Gate Application (bit-index in place)    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Measurement + Norm Guard                 │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```ignore
//! use qfp_core::{Register, Gate};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut reg = Register::new(3, 20)?;
//! reg.encode(b"abc")?;
//! reg.apply(Gate::Hadamard(0))?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let bit = reg.measure(0, &mut rng)?;
//! ```

pub mod error;
pub mod gates;
pub mod metrics;
pub mod register;
pub mod simd;

pub use error::{RegisterError, RegisterResult};
pub use gates::Gate;
pub use metrics::StateMetrics;
pub use register::{Register, HARD_MAX_QUBITS, NORM_TOLERANCE};
pub use simd::{norm_sqr_sum_auto, norm_sqr_sum_scalar, norm_sqr_sum_simd};
