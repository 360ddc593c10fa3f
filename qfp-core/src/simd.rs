//! SIMD Optimizations for the Norm Reduction
//!
//! Vectorizes the hot `Σ |a_i|²` reduction over the amplitude vector
//! using SIMD instructions (AVX2/NEON).
//!
//! ## Performance
//!
//! - Without SIMD: O(2^n) sequential multiply-adds
//! - With SIMD: 4-wide (AVX2 f64) or 2-wide (NEON f64) accumulation
//! - The reduction runs after every mutating register operation (norm
//!   guard), so it dominates small-gate workloads
//!
//! ## Architecture Support
//!
//! - x86_64 with AVX2+FMA: 4-wide f64 vectors
//! - aarch64 with NEON: 2-wide f64 vectors
//! - Fallback: Scalar implementation
//!
//! Results must agree with the scalar path within 1e-12 — the SIMD path
//! is an optimization, never a semantic change.

use num_complex::Complex;

/// SIMD-optimized norm-squared sum for x86_64 with AVX2+FMA
///
/// `_mm256_fmadd_pd` exige o feature `fma` além de `avx2`
#[cfg(all(target_arch = "x86_64", target_feature = "avx2", target_feature = "fma"))]
pub fn norm_sqr_sum_simd(amplitudes: &[Complex<f64>]) -> f64 {
    use std::arch::x86_64::*;

    // Complex<f64> é repr(C) { re, im }: o buffer é um slice plano de f64
    let floats = amplitudes.len() * 2;
    let ptr = amplitudes.as_ptr() as *const f64;

    let mut total;
    unsafe {
        let mut acc = _mm256_setzero_pd();
        let chunks = floats / 4;

        for chunk in 0..chunks {
            let v = _mm256_loadu_pd(ptr.add(chunk * 4));
            acc = _mm256_fmadd_pd(v, v, acc);
        }

        let mut lanes = [0.0f64; 4];
        _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
        total = lanes[0] + lanes[1] + lanes[2] + lanes[3];

        for i in (chunks * 4)..floats {
            let x = *ptr.add(i);
            total += x * x;
        }
    }

    total
}

/// SIMD-optimized norm-squared sum for aarch64 with NEON
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub fn norm_sqr_sum_simd(amplitudes: &[Complex<f64>]) -> f64 {
    use std::arch::aarch64::*;

    let floats = amplitudes.len() * 2;
    let ptr = amplitudes.as_ptr() as *const f64;

    let mut total;
    unsafe {
        let mut acc = vdupq_n_f64(0.0);
        let chunks = floats / 2;

        for chunk in 0..chunks {
            let v = vld1q_f64(ptr.add(chunk * 2));
            acc = vfmaq_f64(acc, v, v);
        }

        total = vaddvq_f64(acc);

        for i in (chunks * 2)..floats {
            let x = *ptr.add(i);
            total += x * x;
        }
    }

    total
}

/// Scalar fallback (no SIMD)
#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "avx2", target_feature = "fma"),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
pub fn norm_sqr_sum_simd(amplitudes: &[Complex<f64>]) -> f64 {
    norm_sqr_sum_scalar(amplitudes)
}

/// Scalar implementation (always available as fallback)
pub fn norm_sqr_sum_scalar(amplitudes: &[Complex<f64>]) -> f64 {
    amplitudes.iter().map(|a| a.norm_sqr()).sum()
}

/// Auto-select best implementation based on vector length
pub fn norm_sqr_sum_auto(amplitudes: &[Complex<f64>]) -> f64 {
    // Abaixo disso o overhead de setup supera o ganho vetorial
    const SIMD_THRESHOLD: usize = 32;

    if amplitudes.len() >= SIMD_THRESHOLD {
        norm_sqr_sum_simd(amplitudes)
    } else {
        norm_sqr_sum_scalar(amplitudes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_amplitudes(count: usize) -> Vec<Complex<f64>> {
        (0..count)
            .map(|i| {
                let phase = i as f64 * 0.37;
                Complex::from_polar(1.0 / (count as f64).sqrt(), phase)
            })
            .collect()
    }

    #[test]
    fn test_scalar_normalized_state() {
        let amps = test_amplitudes(64);
        assert!((norm_sqr_sum_scalar(&amps) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_simd_matches_scalar() {
        for count in [1, 2, 3, 7, 16, 31, 64, 255, 1024] {
            let amps = test_amplitudes(count);
            let scalar = norm_sqr_sum_scalar(&amps);
            let simd = norm_sqr_sum_simd(&amps);
            assert!(
                (scalar - simd).abs() < 1e-12,
                "count={count}: scalar={scalar}, simd={simd}"
            );
        }
    }

    #[test]
    fn test_auto_matches_scalar() {
        for count in [4, 32, 512] {
            let amps = test_amplitudes(count);
            assert!((norm_sqr_sum_auto(&amps) - norm_sqr_sum_scalar(&amps)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(norm_sqr_sum_scalar(&[]), 0.0);
        assert_eq!(norm_sqr_sum_auto(&[]), 0.0);
    }
}
