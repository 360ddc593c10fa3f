//! # 🧭 qfp-tuner — Detecção de Arquitetura e Tuning
//!
//! Detecta a hierarquia de cache e a topologia de cores do host uma única
//! vez e deriva planos de tuning (tamanho de bloco, distância de prefetch,
//! número de threads) por tamanho de problema.
//!
//! ## Propriedades
//!
//! - **Detecção nunca é fatal**: falha de leitura degrada para defaults
//!   conservadores (32 KiB / 256 KiB / 8 MiB, linha de 64 B), nunca para
//!   erro.
//! - **Derivação é pura**: o mesmo par `(profile, problem_size)` produz
//!   sempre o mesmo [`TuningPlan`] — testável sem mockar hardware.
//! - **Tier fechado de SIMD**: a dispatch por família de microarquitetura
//!   usa o enum [`SimdTier`], nunca string-matching de modelo de CPU.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  ArchProfile (uma vez por processo)             │
//! │    caches L1d/L2/L3 · linha · cores · SIMD      │
//! └────────────────────┬────────────────────────────┘
//!                      │ + problem_size
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │  TuningPlan (por chamada, função pura)          │
//! │    block_size · prefetch · thread_count         │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod plan;
pub mod profile;

pub use error::{TunerError, TunerResult};
pub use plan::{TunerConfig, TuningPlan};
pub use profile::{ArchProfile, SimdTier};
