//! Correlation of a badge flag with citation counts.
//!
//! Point-biserial correlation is Pearson's r with one 0/1 variable;
//! Spearman's ρ is Pearson's r on average ranks. Both are tested with
//! t = r·√((n−2)/(1−r²)) against Student's t with n − 2 degrees of freedom.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::outcome::TestOutcome;
use crate::rank::average_ranks;

/// Point-biserial correlation between a binary flag and a continuous value.
pub fn point_biserial(flags: &[f64], values: &[f64]) -> TestOutcome {
    correlate(flags, values)
}

/// Spearman rank correlation.
pub fn spearman(x: &[f64], y: &[f64]) -> TestOutcome {
    correlate(&average_ranks(x), &average_ranks(y))
}

/// Pearson's r with its two-sided p-value.
pub fn correlate(x: &[f64], y: &[f64]) -> TestOutcome {
    if x.len() != y.len() {
        return TestOutcome::insufficient(format!(
            "unpaired observations ({} vs {})",
            x.len(),
            y.len()
        ));
    }
    let n = x.len();
    if n < 2 {
        return TestOutcome::insufficient(format!("{n} complete observation(s), need at least 2"));
    }
    let Some(r) = pearson_r(x, y) else {
        return TestOutcome::insufficient("one variable is constant");
    };

    TestOutcome::Computed { statistic: r, p_value: r_p_value(r, n) }
}

/// Pearson's r, or None when either variable has zero variance.
pub fn pearson_r(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

fn r_p_value(r: f64, n: usize) -> f64 {
    // Two points always lie on a line.
    if n == 2 {
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

/// Keep only pairs where both values are present.
/// Returns the two aligned columns and the number of dropped pairs.
pub fn complete_pairs(pairs: &[(Option<f64>, Option<f64>)]) -> (Vec<f64>, Vec<f64>, usize) {
    let (x, y): (Vec<f64>, Vec<f64>) = pairs
        .iter()
        .filter_map(|&(a, b)| Some((a?, b?)))
        .unzip();
    let dropped = pairs.len() - x.len();
    (x, y, dropped)
}
