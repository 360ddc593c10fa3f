//! Fachada pública do engine

use qfp_core::Register;
use qfp_tuner::ArchProfile;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineResult};
use crate::fingerprint::PatternMatch;
use crate::{pipeline, scheduler};

/// Engine de fingerprinting de padrões
///
/// Possui a configuração validada, o perfil de arquitetura (detectado uma
/// vez) e a seed base dos streams de RNG — nenhum estado global ambiente.
/// Compartilhável entre threads: todo o estado é imutável ou atômico.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    profile: ArchProfile,
    counters: Counters,
}

#[derive(Debug, Default)]
struct Counters {
    items: AtomicU64,
    failures: AtomicU64,
    batches: AtomicU64,
    below_threshold: AtomicU64,
}

/// Snapshot dos contadores do engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub items_processed: u64,
    pub failures: u64,
    pub batches: u64,
    /// Itens Ok com similaridade abaixo de `min_pattern_similarity`
    pub below_threshold: u64,
}

impl Engine {
    /// Cria o engine: valida a config e detecta o host uma única vez
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let profile = ArchProfile::detect();
        Self::with_profile(config, profile)
    }

    /// Cria o engine com um perfil injetado (testes, hosts conhecidos)
    pub fn with_profile(config: EngineConfig, profile: ArchProfile) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            simd = %profile.simd_tier,
            physical = profile.physical_cores,
            logical = profile.logical_threads,
            "engine profile"
        );
        Ok(Self { config, profile, counters: Counters::default() })
    }

    /// Configuração validada
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Perfil de arquitetura (imutável pela vida do engine)
    pub fn profile(&self) -> &ArchProfile {
        &self.profile
    }

    /// Processa um padrão — conveniência sobre o pipeline
    pub fn process_one(&self, pattern: &[u8]) -> EngineResult<PatternMatch> {
        // Falha antes de alocar qualquer registrador
        if pattern.is_empty() {
            let result = Err(crate::error::EngineError::InvalidPattern);
            self.record(std::slice::from_ref(&result));
            return result;
        }

        let mut register = Register::new(1, self.config.max_parallel_qubits)?;
        let mut rng = StdRng::seed_from_u64(scheduler::item_seed(self.config.seed, 0));

        let result = pipeline::run(&mut register, pattern, &self.config, &mut rng);
        self.record(std::slice::from_ref(&result));
        result
    }

    /// Processa um lote preservando a ordem; falhas ficam no slot do item
    pub fn process_batch(&self, patterns: &[&[u8]]) -> Vec<EngineResult<PatternMatch>> {
        let results = scheduler::process_batch(patterns, &self.config, &self.profile);
        self.counters.batches.fetch_add(1, Ordering::Relaxed);
        self.record(&results);
        results
    }

    /// Snapshot dos contadores
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            items_processed: self.counters.items.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            batches: self.counters.batches.load(Ordering::Relaxed),
            below_threshold: self.counters.below_threshold.load(Ordering::Relaxed),
        }
    }

    fn record(&self, results: &[EngineResult<PatternMatch>]) {
        for result in results {
            self.counters.items.fetch_add(1, Ordering::Relaxed);
            match result {
                Ok(m) if m.similarity < self.config.min_pattern_similarity => {
                    trace!(pattern_id = %m.pattern_id, similarity = m.similarity, "below threshold");
                    self.counters.below_threshold.fetch_add(1, Ordering::Relaxed);
                }
                Ok(_) => {}
                Err(err) => {
                    trace!(%err, "item failed");
                    self.counters.failures.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }
}
