//! Testes integrados para qfp-engine

use crate::*;
use qfp_tuner::ArchProfile;

fn engine() -> Engine {
    Engine::with_profile(EngineConfig::default(), ArchProfile::fallback()).unwrap()
}

#[test]
fn test_engine_rejects_invalid_config() {
    let mut cfg = EngineConfig::default();
    cfg.min_coherence = 1.5;
    assert!(matches!(
        Engine::with_profile(cfg, ArchProfile::fallback()),
        Err(ConfigError::OutOfRange { field: "min_coherence", .. })
    ));
}

#[test]
fn test_process_one_bounds() {
    let engine = engine();
    for pattern in [&b"a"[..], b"aaaa", b"uma sequencia de bytes bem maior que oito"] {
        let m = engine.process_one(pattern).unwrap();
        assert!((0.0..=1.0).contains(&m.similarity));
        assert!((0.0..=1.0).contains(&m.confidence));
    }
}

#[test]
fn test_process_one_accepts_non_ascii_bytes() {
    let engine = engine();
    // Bytes ≥ 0x80 são entrada válida (padrões são bytes, não texto)
    for pattern in ["uma sequência com acentuação".as_bytes(), &[0x80, 0xFF, 0x00, 0xEA]] {
        let m = engine.process_one(pattern).unwrap();
        assert!((0.0..=1.0).contains(&m.similarity));
        assert!((0.0..=1.0).contains(&m.confidence));
    }
}

#[test]
fn test_process_one_example_scenario() {
    let engine = engine();

    let m = engine.process_one(b"aaaa").unwrap();
    assert_eq!(m.qubits_used, 3);

    assert_eq!(engine.process_one(b"").unwrap_err(), EngineError::InvalidPattern);
}

#[test]
fn test_empty_batch_returns_empty_vec() {
    let engine = engine();
    assert!(engine.process_batch(&[]).is_empty());
}

#[test]
fn test_batch_mixed_success_and_failure() {
    let engine = engine();
    let results = engine.process_batch(&[b"x".as_slice(), b"", b"y"]);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(EngineError::InvalidPattern));
    assert!(results[2].is_ok());
}

#[test]
fn test_batch_preserves_order() {
    let engine = engine();

    // Cada input sintético carrega uma identidade distinguível
    let patterns: Vec<Vec<u8>> = (0..50u32)
        .map(|i| format!("tagged-input-{i:04}").into_bytes())
        .collect();
    let refs: Vec<&[u8]> = patterns.iter().map(|p| p.as_slice()).collect();

    let results = engine.process_batch(&refs);
    assert_eq!(results.len(), refs.len());

    for (i, result) in results.iter().enumerate() {
        let m = result.as_ref().unwrap();
        assert_eq!(m.pattern_id, pattern_id(&patterns[i]), "slot {i} out of order");
    }
}

#[test]
fn test_order_preserved_with_many_workers() {
    let profile = ArchProfile {
        physical_cores: 4,
        logical_threads: 8,
        ..ArchProfile::fallback()
    };
    let engine = Engine::with_profile(EngineConfig::default(), profile).unwrap();

    let patterns: Vec<Vec<u8>> = (0..200u32).map(|i| i.to_be_bytes().repeat(5)).collect();
    let refs: Vec<&[u8]> = patterns.iter().map(|p| p.as_slice()).collect();

    let results = engine.process_batch(&refs);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.as_ref().unwrap().pattern_id, pattern_id(&patterns[i]));
    }
}

#[test]
fn test_determinism_bit_for_bit() {
    let engine = engine();
    let a = engine.process_one(b"same bytes").unwrap();
    let b = engine.process_one(b"same bytes").unwrap();
    assert_eq!(a, b);

    // Padrões diferentes de mesmo comprimento: ids diferentes
    let x = engine.process_one(b"pattern-a").unwrap();
    let y = engine.process_one(b"pattern-b").unwrap();
    assert_ne!(x.pattern_id, y.pattern_id);
}

#[test]
fn test_single_item_batch_matches_process_one() {
    let engine = engine();
    let single = engine.process_one(b"equivalence").unwrap();
    let batch = engine.process_batch(&[b"equivalence".as_slice()]);
    assert_eq!(batch[0].as_ref().unwrap(), &single);
}

#[test]
fn test_stats_counters() {
    let engine = engine();
    engine.process_one(b"ok").ok();
    engine.process_one(b"").ok();
    engine.process_batch(&[b"a".as_slice(), b""]);

    let stats = engine.stats();
    assert_eq!(stats.items_processed, 4);
    assert_eq!(stats.failures, 2);
    assert_eq!(stats.batches, 1);
}

/// Harness do invariante: pipeline completo sobre padrões aleatórios
#[test]
fn test_pipeline_valid_for_random_lengths() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let engine = engine();
    let mut rng = StdRng::seed_from_u64(0xA11CE);

    for len in 1..=256usize {
        let pattern: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=255u8)).collect();
        let m = engine.process_one(&pattern).unwrap();
        assert!((0.0..=1.0).contains(&m.similarity), "len={len}");
        assert!((0.0..=1.0).contains(&m.confidence), "len={len}");
        assert!(m.qubits_used >= 1);
    }
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = engine();
    std::thread::scope(|s| {
        for chunk in 0..4u8 {
            let engine = &engine;
            s.spawn(move || {
                let pattern = [chunk; 16];
                engine.process_one(&pattern).unwrap();
            });
        }
    });
    assert_eq!(engine.stats().items_processed, 4);
}
