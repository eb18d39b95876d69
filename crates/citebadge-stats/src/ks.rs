//! Two-sample Kolmogorov–Smirnov test (two-sided).
//!
//! Statistic: D = max |F₁(x) − F₂(x)| over the pooled sample.
//! p-value: exact lattice-path probability for moderate sample sizes,
//! the asymptotic Kolmogorov distribution beyond that.

use crate::outcome::TestOutcome;

/// Largest n₁·n₂ for which the exact O(n₁·n₂) path count is used.
const EXACT_MAX_CELLS: u64 = 10_000_000;

pub fn ks_2samp(a: &[f64], b: &[f64]) -> TestOutcome {
    if a.is_empty() || b.is_empty() {
        return TestOutcome::insufficient(format!(
            "empty sample (sizes {} and {})",
            a.len(),
            b.len()
        ));
    }

    let mut x = a.to_vec();
    let mut y = b.to_vec();
    x.sort_by(|p, q| p.total_cmp(q));
    y.sort_by(|p, q| p.total_cmp(q));

    let (m, n) = (x.len() as u64, y.len() as u64);
    let d_scaled = max_scaled_cdf_gap(&x, &y);
    let statistic = d_scaled as f64 / (m * n) as f64;

    let p_value = if m * n <= EXACT_MAX_CELLS {
        exact_p_value(m as usize, n as usize, d_scaled)
    } else {
        asymptotic_p_value(m, n, statistic)
    };

    TestOutcome::Computed { statistic, p_value }
}

/// max |i·n − j·m| over the merged ECDF walk, i.e. D·m·n as an integer.
fn max_scaled_cdf_gap(x: &[f64], y: &[f64]) -> u64 {
    let (m, n) = (x.len(), y.len());
    let (mut i, mut j) = (0usize, 0usize);
    let mut best = 0u64;

    while i < m && j < n {
        let v = if x[i] <= y[j] { x[i] } else { y[j] };
        while i < m && x[i] <= v {
            i += 1;
        }
        while j < n && y[j] <= v {
            j += 1;
        }
        let gap = ((i * n) as u64).abs_diff((j * m) as u64);
        best = best.max(gap);
    }
    best
}

/// P(D ≥ d) under H₀: the share of monotone lattice paths from (0,0) to
/// (m,n) that touch a cell with |i·n − j·m| ≥ d·m·n.
///
/// `col[j]` holds the share of paths reaching (i, j) that have already
/// left the band. Once outside, every path through that cell counts, so
/// small tails are accumulated directly rather than as 1 − P(inside).
fn exact_p_value(m: usize, n: usize, d_scaled: u64) -> f64 {
    if d_scaled == 0 {
        return 1.0;
    }
    let outside = |i: usize, j: usize| ((i * n) as u64).abs_diff((j * m) as u64) >= d_scaled;

    let mut col = vec![0.0f64; n + 1];
    for i in 0..=m {
        for j in 0..=n {
            col[j] = if outside(i, j) {
                1.0
            } else if i == 0 && j == 0 {
                0.0
            } else {
                // col[j] still holds column i-1; col[j-1] already holds column i.
                let from_prev = if i > 0 { i as f64 * col[j] } else { 0.0 };
                let from_below = if j > 0 { j as f64 * col[j - 1] } else { 0.0 };
                (from_prev + from_below) / (i + j) as f64
            };
        }
    }
    col[n].clamp(0.0, 1.0)
}

/// Kolmogorov limiting distribution with the small-sample correction
/// λ = (√nₑ + 0.12 + 0.11/√nₑ)·D, nₑ = m·n/(m+n).
fn asymptotic_p_value(m: u64, n: u64, d: f64) -> f64 {
    let en = ((m * n) as f64 / (m + n) as f64).sqrt();
    let lambda = (en + 0.12 + 0.11 / en) * d;
    kolmogorov_sf(lambda)
}

/// Q(λ) = 2 Σ (−1)^(k−1) exp(−2k²λ²)
fn kolmogorov_sf(lambda: f64) -> f64 {
    const EPS_TERM: f64 = 1e-3;
    const EPS_SUM: f64 = 1e-8;

    let a2 = -2.0 * lambda * lambda;
    let mut fac = 2.0;
    let mut sum = 0.0;
    let mut prev_term = 0.0f64;
    for k in 1..=100 {
        let kf = k as f64;
        let term = fac * (a2 * kf * kf).exp();
        sum += term;
        if term.abs() <= EPS_TERM * prev_term || term.abs() <= EPS_SUM * sum {
            return sum.clamp(0.0, 1.0);
        }
        fac = -fac;
        prev_term = term.abs();
    }
    // Series failed to converge: λ is tiny, distributions indistinguishable.
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed(outcome: TestOutcome) -> (f64, f64) {
        match outcome {
            TestOutcome::Computed { statistic, p_value } => (statistic, p_value),
            other => panic!("expected computed result, got {other:?}"),
        }
    }

    #[test]
    fn test_single_element_groups_are_defined() {
        let (d, p) = computed(ks_2samp(&[10.0], &[5.0]));
        assert_eq!(d, 1.0);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_disjoint_samples() {
        // Only 2 of C(6,3) = 20 orderings reach D = 1.
        let (d, p) = computed(ks_2samp(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]));
        assert_eq!(d, 1.0);
        assert!((p - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_identical_samples() {
        let (d, p) = computed(ks_2samp(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]));
        assert_eq!(d, 0.0);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_unequal_sizes_statistic() {
        // F1 jumps to 1 at 1.0; F2 is 1/2 there.
        let (d, p) = computed(ks_2samp(&[1.0], &[1.0, 2.0]));
        assert!((d - 0.5).abs() < 1e-12);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_empty_group_is_insufficient() {
        assert!(matches!(ks_2samp(&[], &[1.0]), TestOutcome::Insufficient { .. }));
        assert!(matches!(ks_2samp(&[], &[]), TestOutcome::Insufficient { .. }));
    }

    #[test]
    fn test_exact_is_symmetric() {
        let a = [1.0, 4.0, 6.0, 9.0, 12.0];
        let b = [2.0, 3.0, 5.0];
        let (d_ab, p_ab) = computed(ks_2samp(&a, &b));
        let (d_ba, p_ba) = computed(ks_2samp(&b, &a));
        assert!((d_ab - d_ba).abs() < 1e-12);
        assert!((p_ab - p_ba).abs() < 1e-12);
        assert!(p_ab > 0.0 && p_ab <= 1.0);
    }

    #[test]
    fn test_disjoint_samples_keep_tiny_p_values() {
        // Only the two extreme orderings reach D = 1: p = 2 / C(2k, k).
        for k in [10usize, 20, 30] {
            let a: Vec<f64> = (0..k).map(|i| i as f64).collect();
            let b: Vec<f64> = (k..2 * k).map(|i| i as f64).collect();
            let central_binomial: f64 = (1..=k).map(|i| (k + i) as f64 / i as f64).product();
            let expected = 2.0 / central_binomial;

            let (d, p) = computed(ks_2samp(&a, &b));
            assert_eq!(d, 1.0);
            assert!(p > 0.0, "k = {k}: p underflowed to zero");
            assert!(((p - expected) / expected).abs() < 1e-9, "k = {k}: {p} vs {expected}");
        }
    }

    #[test]
    fn test_exact_and_asymptotic_agree_at_cutoff() {
        // 3162 · 3162 cells stays exact; 3162 · 3163 crosses to the series.
        let shifted = |n: usize| -> Vec<f64> { (0..n).map(|j| j as f64 + 125.5).collect() };
        let a: Vec<f64> = (0..3162).map(|i| i as f64).collect();
        assert!((3162u64 * 3162) <= EXACT_MAX_CELLS && (3162u64 * 3163) > EXACT_MAX_CELLS);

        let (d_exact, p_exact) = computed(ks_2samp(&a, &shifted(3162)));
        let (d_asym, p_asym) = computed(ks_2samp(&a, &shifted(3163)));

        assert!((d_exact - d_asym).abs() < 1e-3);
        assert!(p_exact > 0.005 && p_exact < 0.03, "exact p = {p_exact}");
        assert!(p_asym > 0.005 && p_asym < 0.03, "asymptotic p = {p_asym}");
        assert!((p_exact / p_asym - 1.0).abs() < 0.4, "{p_exact} vs {p_asym}");
    }

    #[test]
    fn test_asymptotic_applies_small_sample_correction() {
        // nₑ = 100 → λ = (10 + 0.12 + 0.011) · D
        let d = 0.15;
        let expected = kolmogorov_sf((10.0 + 0.12 + 0.011) * d);
        assert!((asymptotic_p_value(200, 200, d) - expected).abs() < 1e-12);
        assert!(asymptotic_p_value(200, 200, d) < kolmogorov_sf(10.0 * d));
    }

    #[test]
    fn test_kolmogorov_sf_bounds() {
        assert_eq!(kolmogorov_sf(0.0), 1.0);
        assert!(kolmogorov_sf(3.0) < 1e-6);
        // Q(1.36) ≈ 0.049, the classic 5% critical value.
        assert!((kolmogorov_sf(1.36) - 0.0494).abs() < 1e-3);
    }
}
