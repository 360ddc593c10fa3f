//! # 🔍 qfp-engine — Fingerprinting de Padrões
//!
//! Computa um score de similaridade/confiança entre uma sequência de bytes
//! arbitrária e sequências já vistas, usando um registrador quântico
//! simulado de tamanho limitado, com tuning de performance por
//! arquitetura e scheduling de lotes.
//!
//! ## Pipeline
//!
//! ```text
//! caller ──▶ Batch Scheduler ──▶ (por item) Circuit Pipeline
//!                 │                    │
//!                 │ TuningPlan         ▼
//!                 ▼               Register ──▶ medição ──▶ PatternMatch
//!            qfp-tuner
//! ```
//!
//! ## Garantias
//!
//! - `process_batch` preserva ordem: `output[i]` corresponde a `input[i]`
//!   independente do worker e da ordem de conclusão.
//! - Falha por item vira `Err` no slot do item; nunca aborta o lote.
//! - Dado uma seed fixa, o mesmo padrão produz o mesmo `PatternMatch`
//!   bit a bit — RNG explícito por item, sem estado global.
//! - Só os campos de [`PatternMatch`] são contrato público; `Register`,
//!   `Gate` e `TuningPlan` são internos.
//!
//! ## Exemplo
//!
//! ```ignore
//! use qfp_engine::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default())?;
//! let fingerprint = engine.process_one(b"some pattern")?;
//! assert!((0.0..=1.0).contains(&fingerprint.similarity));
//!
//! let batch = engine.process_batch(&[b"a".as_slice(), b"b".as_slice()]);
//! assert_eq!(batch.len(), 2);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod scheduler;

pub use config::EngineConfig;
pub use engine::{Engine, EngineStats};
pub use error::{ConfigError, EngineError, EngineResult};
pub use fingerprint::{PatternMatch, pattern_id};

#[cfg(test)]
mod tests;
