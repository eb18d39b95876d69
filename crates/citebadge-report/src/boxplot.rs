//! Box-and-whisker plot of citation counts split by one badge flag,
//! rendered as SVG.
//!
//! The canvas is 6.4in × 4.8in at a fixed 300 DPI (1920 × 1440 user
//! units). Boxes span Q1–Q3 with a median line; whiskers reach the most
//! extreme data within 1.5 IQR; points beyond are drawn individually.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use citebadge_common::analysis_config::sanitise_label;
use citebadge_common::{Badge, CitebadgeError, Result};
use citebadge_ingestion::JoinedTable;

const DPI: f64 = 300.0;
const WIDTH: f64 = 1920.0;
const HEIGHT: f64 = 1440.0;

const MARGIN_LEFT: f64 = 240.0;
const MARGIN_RIGHT: f64 = 60.0;
const MARGIN_TOP: f64 = 150.0;
const MARGIN_BOTTOM: f64 = 200.0;

const BOX_FILL: &str = "#4c72b0";
const INK: &str = "#3f3f3f";

/// Five-number summary plus outliers for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Linear-interpolated quantile of sorted data, q in [0, 1].
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Tukey box statistics; None for an empty category.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside: Vec<f64> = sorted.iter().copied().filter(|v| *v >= lo_fence && *v <= hi_fence).collect();
    let outliers = sorted.iter().copied().filter(|v| *v < lo_fence || *v > hi_fence).collect();

    Some(BoxStats {
        count: sorted.len(),
        q1,
        median,
        q3,
        // The quartiles are always inside the fences, so `inside` is non-empty.
        whisker_low: inside.first().copied().unwrap_or(q1),
        whisker_high: inside.last().copied().unwrap_or(q3),
        outliers,
    })
}

/// Citation counts grouped by the distinct values of one badge column,
/// ascending by flag value. Rows missing either value are skipped.
pub fn categories(table: &JoinedTable, badge: Badge) -> Vec<(f64, Vec<f64>)> {
    let mut out: Vec<(f64, Vec<f64>)> = Vec::new();
    for row in &table.rows {
        let (Some(flag), Some(citations)) = (row.badge(badge), row.citations) else {
            continue;
        };
        match out.iter_mut().find(|(f, _)| *f == flag) {
            Some((_, values)) => values.push(citations),
            None => out.push((flag, vec![citations])),
        }
    }
    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    out
}

pub fn plot_file_name(badge: Badge, label: &str) -> String {
    format!("boxplot_citations_by_{}_badge_{}.svg", badge.key(), sanitise_label(label))
}

/// Render and write the plot; returns the written path.
pub fn write_boxplot(table: &JoinedTable, badge: Badge, label: &str, dir: &Path) -> Result<PathBuf> {
    let svg = render_boxplot(table, badge, label);
    let path = dir.join(plot_file_name(badge, label));
    std::fs::write(&path, svg).map_err(|e| CitebadgeError::io(&path, e))?;
    Ok(path)
}

pub fn render_boxplot(table: &JoinedTable, badge: Badge, label: &str) -> String {
    let cats = categories(table, badge);
    let stats: Vec<(String, BoxStats)> = cats
        .iter()
        .filter_map(|(flag, values)| box_stats(values).map(|s| (format_tick(*flag), s)))
        .collect();

    let (width, height) = (WIDTH, HEIGHT);
    let (width_in, height_in) = (WIDTH / DPI, HEIGHT / DPI);
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;

    let (y_min, y_max) = value_range(&stats);
    let ticks = nice_ticks(y_min, y_max, 5);
    let (axis_lo, axis_hi) = (
        ticks.first().copied().unwrap_or(y_min),
        ticks.last().copied().unwrap_or(y_max),
    );
    let y = |v: f64| bottom - (v - axis_lo) / (axis_hi - axis_lo) * plot_h;

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width_in}in" height="{height_in}in" viewBox="0 0 {width} {height}" font-family="DejaVu Sans, Arial, sans-serif">"#
    );
    let _ = writeln!(svg, r#"<rect width="{width}" height="{height}" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="48" text-anchor="middle">Boxplot of Citations by {} Badge ({})</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        MARGIN_TOP / 2.0 + 16.0,
        badge,
        escape_xml(label)
    );

    // Y axis with grid ticks
    for t in &ticks {
        let ty = y(*t);
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{ty:.1}" x2="{}" y2="{ty:.1}" stroke="{INK}" stroke-width="3"/>"#,
            MARGIN_LEFT - 14.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" font-size="36" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 24.0,
            ty + 12.0,
            format_tick(*t)
        );
    }
    let _ = writeln!(
        svg,
        r#"<rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{plot_w}" height="{plot_h}" fill="none" stroke="{INK}" stroke-width="3"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<text transform="translate(70 {:.1}) rotate(-90)" font-size="40" text-anchor="middle">Citations</text>"#,
        MARGIN_TOP + plot_h / 2.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="40" text-anchor="middle">{} Badge</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        height - 60.0,
        badge
    );

    if stats.is_empty() {
        let _ = writeln!(
            svg,
            r##"<text x="{:.1}" y="{:.1}" font-size="40" fill="#888888" text-anchor="middle">no data</text>"##,
            MARGIN_LEFT + plot_w / 2.0,
            MARGIN_TOP + plot_h / 2.0
        );
    }

    let band = plot_w / stats.len().max(1) as f64;
    let box_w = band * 0.6;
    for (i, (tick, s)) in stats.iter().enumerate() {
        let cx = MARGIN_LEFT + band * (i as f64 + 0.5);
        let (x0, x1) = (cx - box_w / 2.0, cx + box_w / 2.0);
        let cap = box_w / 4.0;

        // Whiskers
        for (from, to) in [(s.q1, s.whisker_low), (s.q3, s.whisker_high)] {
            let _ = writeln!(
                svg,
                r#"<line x1="{cx:.1}" y1="{:.1}" x2="{cx:.1}" y2="{:.1}" stroke="{INK}" stroke-width="4"/>"#,
                y(from),
                y(to)
            );
            let _ = writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{INK}" stroke-width="4"/>"#,
                cx - cap,
                y(to),
                cx + cap,
                y(to)
            );
        }

        let _ = writeln!(
            svg,
            r#"<rect x="{x0:.1}" y="{:.1}" width="{box_w:.1}" height="{:.1}" fill="{BOX_FILL}" stroke="{INK}" stroke-width="4"/>"#,
            y(s.q3),
            (y(s.q1) - y(s.q3)).max(1.0)
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{x0:.1}" y1="{:.1}" x2="{x1:.1}" y2="{:.1}" stroke="{INK}" stroke-width="5"/>"#,
            y(s.median),
            y(s.median)
        );
        for o in &s.outliers {
            let _ = writeln!(
                svg,
                r#"<circle cx="{cx:.1}" cy="{:.1}" r="10" fill="none" stroke="{INK}" stroke-width="3"/>"#,
                y(*o)
            );
        }
        let _ = writeln!(
            svg,
            r#"<text x="{cx:.1}" y="{:.1}" font-size="36" text-anchor="middle">{tick}</text>"#,
            bottom + 50.0
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Data extent including whiskers and outliers; [0, 1] without data.
fn value_range(stats: &[(String, BoxStats)]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (_, s) in stats {
        let low = s.outliers.first().copied().unwrap_or(s.whisker_low).min(s.whisker_low);
        let high = s.outliers.last().copied().unwrap_or(s.whisker_high).max(s.whisker_high);
        lo = lo.min(low);
        hi = hi.max(high);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let lo = lo.min(0.0);
    if hi <= lo {
        return (lo, lo + 1.0);
    }
    (lo, hi)
}

/// Round tick positions covering [lo, hi] with roughly `target` steps.
fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let raw = (hi - lo) / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let start = (lo / step).floor() * step;
    let end = (hi / step).ceil() * step;
    let n = ((end - start) / step).round() as usize;
    (0..=n).map(|i| start + i as f64 * step).collect()
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        return format!("{v:.0}");
    }
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use citebadge_ingestion::JoinedRecord;

    fn row(c: Option<f64>, r: Option<f64>) -> JoinedRecord {
        JoinedRecord {
            id: "x".to_string(),
            citations: c,
            available: Some(1.0),
            functional: Some(1.0),
            replicable: r,
        }
    }

    #[test]
    fn test_box_stats_quartiles_and_outliers() {
        let s = box_stats(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q3, 4.0);
        assert_eq!(s.whisker_low, 1.0);
        assert_eq!(s.whisker_high, 4.0);
        assert_eq!(s.outliers, vec![100.0]);
    }

    #[test]
    fn test_box_stats_interpolates() {
        let s = box_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
        assert!(box_stats(&[]).is_none());
    }

    #[test]
    fn test_categories_sorted_and_skip_missing() {
        let table = JoinedTable {
            rows: vec![row(Some(4.0), Some(1.0)), row(Some(2.0), Some(0.0)), row(None, Some(0.0)), row(Some(9.0), None)],
            ..Default::default()
        };
        let cats = categories(&table, Badge::Replicable);
        assert_eq!(cats, vec![(0.0, vec![2.0]), (1.0, vec![4.0])]);
    }

    #[test]
    fn test_file_name_is_deterministic() {
        assert_eq!(
            plot_file_name(Badge::Replicable, "2022-citations-oct2024"),
            "boxplot_citations_by_replicable_badge_2022-citations-oct2024.svg"
        );
    }

    #[test]
    fn test_empty_table_renders_well_formed_svg() {
        let svg = render_boxplot(&JoinedTable::default(), Badge::Replicable, "2022 <empty>");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("no data"));
        assert!(svg.contains("(2022 &lt;empty&gt;)"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_one_box_per_category() {
        let table = JoinedTable {
            rows: vec![row(Some(4.0), Some(1.0)), row(Some(2.0), Some(0.0)), row(Some(7.0), Some(1.0))],
            ..Default::default()
        };
        let svg = render_boxplot(&table, Badge::Replicable, "t");
        assert_eq!(svg.matches(BOX_FILL).count(), 2);
        assert!(svg.contains("Boxplot of Citations by Replicable Badge (t)"));
        assert!(svg.contains(r#"width="6.4in""#));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_nice_ticks_cover_range() {
        let ticks = nice_ticks(0.0, 97.0, 5);
        assert_eq!(ticks.first(), Some(&0.0));
        assert!(*ticks.last().unwrap() >= 97.0);
        assert!(ticks.len() <= 7);
    }
}
