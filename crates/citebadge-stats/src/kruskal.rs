//! Kruskal–Wallis H test for equal central tendency across k groups.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::outcome::TestOutcome;
use crate::rank::{average_ranks, tie_sizes};

/// H = 12 / (N(N+1)) · Σ Rᵢ²/nᵢ − 3(N+1), divided by the tie correction
/// 1 − Σ(t³ − t)/(N³ − N). p-value from χ²(k − 1).
pub fn kruskal(groups: &[&[f64]]) -> TestOutcome {
    if groups.len() < 2 {
        return TestOutcome::insufficient("need at least two groups");
    }
    if let Some(pos) = groups.iter().position(|g| g.is_empty()) {
        return TestOutcome::insufficient(format!("group {} is empty", pos + 1));
    }

    let pooled: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let total = pooled.len() as f64;

    let ties: f64 = tie_sizes(&pooled)
        .into_iter()
        .map(|t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum();
    let correction = 1.0 - ties / (total * total * total - total);
    if correction <= 0.0 {
        return TestOutcome::insufficient("all values are identical");
    }

    let ranks = average_ranks(&pooled);
    let mut offset = 0;
    let mut rank_term = 0.0;
    for g in groups {
        let rank_sum: f64 = ranks[offset..offset + g.len()].iter().sum();
        rank_term += rank_sum * rank_sum / g.len() as f64;
        offset += g.len();
    }

    let h = 12.0 / (total * (total + 1.0)) * rank_term - 3.0 * (total + 1.0);
    let statistic = h / correction;

    let df = (groups.len() - 1) as f64;
    match ChiSquared::new(df) {
        Ok(chi2) => TestOutcome::Computed { statistic, p_value: chi2.sf(statistic) },
        Err(e) => TestOutcome::insufficient(format!("chi-square distribution unavailable: {e}")),
    }
}
