use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::color::{self, Rgb};
use crate::config::PlotConfig;
use crate::data::loader;
use crate::data::model::{MatchingResults, StatRow, Table};
use crate::data::source;
use crate::data::stats;

/// Half the horizontal room a violin may occupy around its position.
pub const VIOLIN_HALF_WIDTH: f64 = 0.4;

// ---------------------------------------------------------------------------
// Figure model
// ---------------------------------------------------------------------------

/// A titled grid of six panels, free of any rendering concerns.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<Panel>,
    /// Raw precision-recall curves per run; exported, never drawn.
    pub precision_recall_curves: Vec<CurveRows>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurveRows {
    pub label: String,
    pub rows: Vec<Vec<f64>>,
}

impl CurveRows {
    fn of(results: &MatchingResults) -> Self {
        CurveRows {
            label: results.det_desc().to_string(),
            rows: results.precision_recall_curves.rows().map(<[f64]>::to_vec).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Extra hint shown under the title (line styles, colour scales).
    pub note: Option<String>,
    pub lines: Vec<LineSeries>,
    pub violins: Vec<Violin>,
    /// Category labels for violin positions.
    pub x_ticks: Vec<(f64, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSeries {
    /// Legend entry; series sharing a name toggle together.
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
    pub color: Rgb,
    pub style: LineStyle,
    pub markers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolinSide {
    Both,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize)]
pub enum ViolinBody {
    /// `(value, half width)`; the widest violin of its group reaches 1.
    Density(Vec<[f64; 2]>),
    /// All samples share one value.
    Point(f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct Violin {
    pub name: Option<String>,
    pub position: f64,
    pub side: ViolinSide,
    pub color: Rgb,
    pub body: ViolinBody,
    /// `(value, half width)` of the quartile marks.
    pub quartiles: Vec<[f64; 2]>,
    pub samples: usize,
}

// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

fn line(name: Option<String>, points: Vec<[f64; 2]>, color: Rgb, style: LineStyle) -> LineSeries {
    LineSeries {
        name,
        points,
        color,
        style,
        markers: false,
    }
}

/// Half width of a density profile at `value`, by linear interpolation.
fn width_at(profile: &[[f64; 2]], value: f64) -> f64 {
    let i = profile.partition_point(|p| p[0] < value);
    match i {
        0 => profile.first().map_or(0.0, |p| p[1]),
        i if i >= profile.len() => profile.last().map_or(0.0, |p| p[1]),
        i => {
            let [x0, y0] = profile[i - 1];
            let [x1, y1] = profile[i];
            if x1 > x0 {
                y0 + (y1 - y0) * (value - x0) / (x1 - x0)
            } else {
                y0
            }
        }
    }
}

/// How a violin is drawn and how far its density extends past the data.
#[derive(Debug, Clone)]
struct ViolinStyle {
    side: ViolinSide,
    color: Rgb,
    name: Option<String>,
    quartiles: bool,
    /// Bandwidths the density curve extends past the extreme samples.
    cut: f64,
}

impl ViolinStyle {
    /// Seaborn-like violin with quartile marks.
    fn seaborn(side: ViolinSide, color: Rgb, name: Option<&str>) -> Self {
        ViolinStyle {
            side,
            color,
            name: name.map(str::to_string),
            quartiles: true,
            cut: 2.0,
        }
    }

    fn good() -> Self {
        Self::seaborn(ViolinSide::Left, Rgb::GOOD, Some("Good"))
    }

    fn bad() -> Self {
        Self::seaborn(ViolinSide::Right, Rgb::BAD, Some("Bad"))
    }

    /// Plain violin clipped to the sample range, no inner marks.
    fn clipped(color: Rgb) -> Self {
        ViolinStyle {
            side: ViolinSide::Both,
            color,
            name: None,
            quartiles: false,
            cut: 0.0,
        }
    }
}

/// Build a violin with its raw density as half width; see [`scale_to_peak`].
fn violin(values: &[f64], position: f64, style: &ViolinStyle, cfg: &PlotConfig) -> Option<Violin> {
    if values.is_empty() {
        return None;
    }
    let body = match stats::kde(values, cfg.kde_points, style.cut) {
        Some(curve) => ViolinBody::Density(curve),
        None => ViolinBody::Point(values[0]),
    };
    let quartiles = match (&body, style.quartiles) {
        (ViolinBody::Density(curve), true) => stats::quartiles(values)
            .map(|qs| qs.iter().map(|&q| [q, width_at(curve, q)]).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    Some(Violin {
        name: style.name.clone(),
        position,
        side: style.side,
        color: style.color,
        body,
        quartiles,
        samples: values.len(),
    })
}

/// Divide the widths of `violins` by their shared peak density, so the
/// widest of them spans the full half width and the rest keep their
/// relative sizes.
fn scale_to_peak(violins: &mut [Violin]) {
    let peak = violins
        .iter()
        .filter_map(|v| match &v.body {
            ViolinBody::Density(curve) => Some(curve.iter().map(|p| p[1]).fold(0.0, f64::max)),
            ViolinBody::Point(_) => None,
        })
        .fold(0.0, f64::max);
    if peak <= 0.0 {
        return;
    }
    for v in violins.iter_mut() {
        if let ViolinBody::Density(curve) = &mut v.body {
            for p in curve.iter_mut() {
                p[1] /= peak;
            }
        }
        for q in v.quartiles.iter_mut() {
            q[1] /= peak;
        }
    }
}

/// Good and bad halves of one category, scaled together.
fn split_pair(good: &[f64], bad: &[f64], position: f64, cfg: &PlotConfig) -> Vec<Violin> {
    let mut pair: Vec<Violin> = violin(good, position, &ViolinStyle::good(), cfg)
        .into_iter()
        .chain(violin(bad, position, &ViolinStyle::bad(), cfg))
        .collect();
    scale_to_peak(&mut pair);
    pair
}

/// ROC curves with id 0, one per frame difference `1..max`, as (frame difference, points).
pub fn roc_by_frame_diff(roc: &Table) -> Vec<(i64, Vec<[f64; 2]>)> {
    let mut max_z = f64::NEG_INFINITY;
    let mut curves: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    for r in roc.rows().filter(|r| r[0] == 0.0) {
        max_z = max_z.max(r[1]);
        if r[1].fract() == 0.0 {
            curves
                .entry(r[1] as i64)
                .or_default()
                .push([r[3].abs(), r[2].abs()]);
        }
    }
    if !max_z.is_finite() || max_z <= 1.0 {
        return Vec::new();
    }
    curves.range(1..max_z as i64).map(|(fd, pts)| (*fd, pts.clone())).collect()
}

fn good_bad_legend(panel: &mut Panel) {
    // Empty series give the split violins a legend entry per class.
    for (name, color) in [("Good", Rgb::GOOD), ("Bad", Rgb::BAD)] {
        panel
            .lines
            .push(line(Some(name.to_string()), Vec::new(), color, LineStyle::Solid));
    }
}

// ---------------------------------------------------------------------------
// Single result file
// ---------------------------------------------------------------------------

impl Figure {
    /// Six panels describing one detector/descriptor run.
    pub fn single(results: &MatchingResults, cfg: &PlotConfig) -> Figure {
        let attrs = &results.attributes;
        let title = format!(
            "Matching - detector={}, descriptor={}, {}",
            attrs.detector_type,
            attrs.descriptor_type,
            attrs.camera_summary()
        );
        let color = color::generate_palette(1)[0];
        let stats_avg = stats::group_mean(&results.match_stats);
        let xs: Vec<f64> = stats_avg.iter().map(|r| r.frame_diff * attrs.rate).collect();
        let series = |f: fn(&StatRow) -> f64| -> Vec<[f64; 2]> {
            xs.iter().zip(&stats_avg).map(|(&x, r)| [x, f(r)]).collect()
        };

        let precision_recall = Panel {
            title: "Precision-recall over frame difference".into(),
            x_label: "Frame difference".into(),
            y_label: "Precision / recall".into(),
            lines: vec![
                line(Some("Precision".into()), series(|r| r.precision), color, LineStyle::Solid),
                line(Some("Recall".into()), series(|r| r.recall), color, LineStyle::Dashed),
            ],
            ..Default::default()
        };

        let match_count = Panel {
            title: "Number of matches over frame difference".into(),
            x_label: "Frame difference".into(),
            y_label: "Number of matches".into(),
            lines: vec![line(None, series(|r| r.num_matches), color, LineStyle::Solid)],
            ..Default::default()
        };

        let curves = roc_by_frame_diff(&results.roc_curves);
        let max_fd = curves.last().map_or(1, |(fd, _)| *fd).max(1);
        let roc = Panel {
            title: "ROC curve".into(),
            x_label: "False positive rate".into(),
            y_label: "True positive rate".into(),
            note: (!curves.is_empty())
                .then(|| format!("Colour: frame difference 1 (dark) to {max_fd} (light)")),
            lines: curves
                .into_iter()
                .map(|(fd, points)| {
                    let t = (fd - 1) as f64 / (max_fd - 1).max(1) as f64;
                    line(None, points, color::gradient(t), LineStyle::Solid)
                })
                .collect(),
            ..Default::default()
        };

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let separability = Panel {
            title: "Match separability over changes in radial distance".into(),
            x_label: "Delta radial distance".into(),
            y_label: "Silhouette coefficient".into(),
            lines: vec![line(
                None,
                stats::separability(
                    &results.good_radial_distances,
                    &results.bad_radial_distances,
                    cfg.separability_bins,
                    cfg.separability_width(),
                    cfg.single_max_samples,
                    &mut rng,
                ),
                color,
                LineStyle::Solid,
            )],
            ..Default::default()
        };

        let width = cfg.violin_width();
        let good_bins =
            stats::bin_by_radius(&results.good_radial_distances, 1, cfg.violin_bins, width);
        let bad_bins =
            stats::bin_by_radius(&results.bad_radial_distances, 1, cfg.violin_bins, width);
        let mut descriptor = Panel {
            title: "Distribution of descriptor distances over changes in radial distance".into(),
            x_label: "Delta radial distance".into(),
            y_label: "Descriptor distance".into(),
            ..Default::default()
        };
        let occupied = (0..cfg.violin_bins)
            .filter(|&b| !good_bins[b].is_empty() || !bad_bins[b].is_empty());
        for (pos, bin) in occupied.enumerate() {
            let pos = pos as f64;
            descriptor.x_ticks.push((pos, stats::bin_label(bin, width)));
            descriptor
                .violins
                .extend(split_pair(&good_bins[bin], &bad_bins[bin], pos, cfg));
        }
        good_bad_legend(&mut descriptor);

        let overlap_bins =
            stats::bin_by_radius(&results.radial_overlaps_errors, 1, cfg.violin_bins, width);
        let mut overlaps = Panel {
            title: "Match IOU distribution for various radial distances".into(),
            x_label: "Radial distance".into(),
            y_label: "IOU".into(),
            ..Default::default()
        };
        let mut means = Vec::new();
        for (bin, values) in overlap_bins.iter().enumerate() {
            let pos = (bin + 1) as f64;
            overlaps.x_ticks.push((pos, stats::bin_label(bin, width)));
            if let Some(mut v) = violin(values, pos, &ViolinStyle::clipped(color), cfg) {
                scale_to_peak(std::slice::from_mut(&mut v));
                overlaps.violins.push(v);
            }
            // Every bin counts an extra zero sample, so empty bins plot at 0.
            means.push([pos, values.iter().sum::<f64>() / (values.len() + 1) as f64]);
        }
        overlaps.lines.push(LineSeries {
            name: Some("Mean".into()),
            points: means,
            color: Rgb::BLACK,
            style: LineStyle::Solid,
            markers: true,
        });

        Figure {
            title,
            panels: vec![
                precision_recall,
                match_count,
                roc,
                separability,
                descriptor,
                overlaps,
            ],
            precision_recall_curves: vec![CurveRows::of(results)],
        }
    }

    // -----------------------------------------------------------------------
    // Several runs of one bag
    // -----------------------------------------------------------------------

    /// Six panels comparing detector/descriptor runs. Camera parameters in
    /// the title come from the last run.
    pub fn comparative(runs: &[MatchingResults], cfg: &PlotConfig) -> Figure {
        let title = match runs.last() {
            Some(last) => format!("Matching - {}", last.attributes.camera_summary()),
            None => "Matching".to_string(),
        };
        let colors = color::generate_palette(runs.len());
        let fills = color::muted_palette(runs.len());
        let labels: Vec<String> = runs.iter().map(|r| r.det_desc().to_string()).collect();
        let ticks: Vec<(f64, String)> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (i as f64, l.clone()))
            .collect();

        let mut precision_recall = Panel {
            title: "Precision-recall over frame difference".into(),
            x_label: "Frame difference".into(),
            y_label: "Precision / recall".into(),
            note: Some("Solid: precision, dashed: recall".into()),
            ..Default::default()
        };
        let mut match_count = Panel {
            title: "Number of matches over frame difference".into(),
            x_label: "Frame difference".into(),
            y_label: "Number of matches".into(),
            ..Default::default()
        };
        let mut roc = Panel {
            title: "ROC curve".into(),
            x_label: "False positive rate".into(),
            y_label: "True positive rate".into(),
            ..Default::default()
        };
        let mut radial = Panel {
            title: "Distribution of matches over changes in radial distance".into(),
            x_label: "Detector+Descriptor".into(),
            y_label: "Delta radial distance".into(),
            x_ticks: ticks.clone(),
            ..Default::default()
        };
        let mut descriptor = Panel {
            title: "Distribution of good and bad matches over descriptor distances".into(),
            x_label: "Detector+Descriptor".into(),
            y_label: "Normalized descriptor distance".into(),
            x_ticks: ticks,
            ..Default::default()
        };
        let mut separability = Panel {
            title: "Match separability over changes in radial distance".into(),
            x_label: "Delta radial distance".into(),
            y_label: "Silhouette coefficient".into(),
            ..Default::default()
        };

        // The x axis is scaled by the last run's rate.
        let rate = runs.last().map_or(1.0, |r| r.attributes.rate);
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        for (i, run) in runs.iter().enumerate() {
            let label = &labels[i];
            let color = colors[i];
            let avg = stats::group_mean(&run.match_stats);
            let pts = |f: fn(&StatRow) -> f64| -> Vec<[f64; 2]> {
                avg.iter().map(|r| [r.frame_diff * rate, f(r)]).collect()
            };

            precision_recall.lines.push(line(
                Some(label.clone()),
                pts(|r| r.precision),
                color,
                LineStyle::Solid,
            ));
            precision_recall.lines.push(line(
                Some(label.clone()),
                pts(|r| r.recall),
                color,
                LineStyle::Dashed,
            ));
            match_count.lines.push(line(
                Some(label.clone()),
                pts(|r| r.num_matches),
                color,
                LineStyle::Solid,
            ));

            for (_, points) in roc_by_frame_diff(&run.roc_curves) {
                roc.lines
                    .push(line(Some(label.clone()), points, color, LineStyle::Solid));
            }

            let pos = i as f64;
            radial.violins.extend(violin(
                &run.good_radial_distances.column(0),
                pos,
                &ViolinStyle::seaborn(ViolinSide::Both, fills[i], None),
                cfg,
            ));

            let mut distances = run.good_radial_distances.column(1);
            let n_good = distances.len();
            distances.extend(run.bad_radial_distances.column(1));
            stats::normalize_by_max(&mut distances);
            let (good, bad) = distances.split_at(n_good);
            descriptor.violins.extend(split_pair(good, bad, pos, cfg));

            separability.lines.push(line(
                Some(label.clone()),
                stats::separability(
                    &run.good_radial_distances,
                    &run.bad_radial_distances,
                    cfg.separability_bins,
                    cfg.separability_width(),
                    cfg.comparative_max_samples,
                    &mut rng,
                ),
                color,
                LineStyle::Solid,
            ));
        }
        scale_to_peak(&mut radial.violins);
        good_bad_legend(&mut descriptor);

        Figure {
            title,
            panels: vec![
                precision_recall,
                match_count,
                roc,
                radial,
                descriptor,
                separability,
            ],
            precision_recall_curves: runs.iter().map(CurveRows::of).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing figure")
    }
}

// ---------------------------------------------------------------------------
// Path → figure
// ---------------------------------------------------------------------------

/// Classify `path`, load every result file it refers to and build the figure.
pub fn load_figure(path: &Path, cfg: &PlotConfig) -> Result<Figure> {
    let source = source::classify(path)?;
    let files = source::discover(&source)?;
    log::info!(
        "Plotting {} result file(s) from {}",
        files.len(),
        source.path().display()
    );

    let figure = if source.is_comparative() {
        Figure::comparative(&loader::load_all(&files)?, cfg)
    } else {
        let file = files.first().context("no results file")?;
        Figure::single(&loader::load_results(file)?, cfg)
    };
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Attributes;

    fn attributes(det: &str, desc: &str) -> Attributes {
        Attributes {
            detector_type: det.into(),
            descriptor_type: desc.into(),
            chi: 0.99,
            alpha: 0.5,
            fx: 300.0,
            fy: 300.0,
            cx: 320.0,
            cy: 240.0,
            rate: 2.0,
        }
    }

    fn results(det: &str, desc: &str) -> MatchingResults {
        let stat = |fd, n, p, r| StatRow {
            frame_diff: fd,
            num_matches: n,
            precision: p,
            recall: r,
        };
        MatchingResults {
            attributes: attributes(det, desc),
            match_stats: vec![
                stat(1.0, 100.0, 0.9, 0.7),
                stat(1.0, 80.0, 0.8, 0.5),
                stat(2.0, 60.0, 0.6, 0.3),
            ],
            radial_overlaps_errors: Table::from_rows(&[
                &[0.01, 0.75, 0.1],
                &[0.02, 0.25, 0.2],
                &[0.31, 0.4, 0.5],
            ]),
            good_radial_distances: Table::from_rows(&[
                &[0.001, 10.0],
                &[0.002, 12.0],
                &[0.003, 11.0],
                &[0.12, 20.0],
            ]),
            bad_radial_distances: Table::from_rows(&[
                &[0.004, 60.0],
                &[0.005, 70.0],
                &[0.12, 65.0],
            ]),
            roc_curves: Table::from_rows(&[
                &[0.0, 1.0, 0.9, 0.1],
                &[0.0, 1.0, 1.0, 0.3],
                &[0.0, 2.0, 0.8, 0.2],
                &[0.0, 3.0, 0.5, 0.5],
                &[1.0, 1.0, 0.1, 0.1],
            ]),
            precision_recall_curves: Table::default(),
        }
    }

    #[test]
    fn roc_uses_curve_zero_and_skips_last_frame_diff() {
        let r = results("A", "B");
        let curves = roc_by_frame_diff(&r.roc_curves);
        let fds: Vec<i64> = curves.iter().map(|(fd, _)| *fd).collect();
        assert_eq!(fds, vec![1, 2]);
        assert_eq!(curves[0].1, vec![[0.1, 0.9], [0.3, 1.0]]);
    }

    #[test]
    fn roc_of_empty_table_is_empty() {
        assert!(roc_by_frame_diff(&Table::default()).is_empty());
    }

    #[test]
    fn roc_with_huge_frame_diff_only_keeps_present_curves() {
        let roc = Table::from_rows(&[
            &[0.0, 1.0, 0.9, 0.1],
            &[0.0, 4.0, 0.7, 0.3],
            &[0.0, 1e12, 0.5, 0.5],
        ]);
        let fds: Vec<i64> = roc_by_frame_diff(&roc).iter().map(|(fd, _)| *fd).collect();
        assert_eq!(fds, vec![1, 4]);
    }

    #[test]
    fn single_figure_layout() {
        let fig = Figure::single(&results("GFTT", "ORB"), &PlotConfig::default());
        assert!(fig.title.starts_with("Matching - detector=GFTT, descriptor=ORB, chi=0.99"));
        let titles: Vec<&str> = fig.panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Precision-recall over frame difference",
                "Number of matches over frame difference",
                "ROC curve",
                "Match separability over changes in radial distance",
                "Distribution of descriptor distances over changes in radial distance",
                "Match IOU distribution for various radial distances",
            ]
        );

        // frame differences scaled by rate, grouped by mean
        let precision = &fig.panels[0].lines[0];
        assert_eq!(precision.points.len(), 2);
        assert_eq!(precision.points[0][0], 2.0);
        assert!((precision.points[0][1] - 0.85).abs() < 1e-12);
        assert_eq!(fig.panels[0].lines[1].style, LineStyle::Dashed);
        assert_eq!(fig.panels[1].lines[0].points[1], [4.0, 60.0]);

        assert_eq!(fig.panels[2].lines.len(), 2);

        // separability: only bin 0 has both classes
        assert_eq!(fig.panels[3].lines[0].points.len(), 1);

        // descriptor violins only for occupied bins (0 and 2)
        let ticks: Vec<&str> = fig.panels[4].x_ticks.iter().map(|t| t.1.as_str()).collect();
        assert_eq!(ticks, vec!["0-0.05", "0.1-0.15"]);

        // IOU: ten labelled positions, every bin averaged with an extra zero
        let iou = &fig.panels[5];
        assert_eq!(iou.x_ticks.len(), 10);
        let means = &iou.lines[0].points;
        assert_eq!(means.len(), 10);
        let xs: Vec<f64> = means.iter().map(|p| p[0]).collect();
        assert_eq!(xs, (1..=10).map(f64::from).collect::<Vec<_>>());
        assert!((means[0][1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((means[6][1] - 0.2).abs() < 1e-12);
        assert_eq!(means[3][1], 0.0);
        assert_eq!(iou.violins.len(), 2);
    }

    #[test]
    fn iou_mean_counts_a_zero_per_bin() {
        let mut r = results("A", "B");
        r.radial_overlaps_errors =
            Table::from_rows(&[&[0.01, 0.9, 0.0], &[0.02, 1.0, 0.0], &[0.03, 0.95, 0.0]]);
        let fig = Figure::single(&r, &PlotConfig::default());
        let means = &fig.panels[5].lines[0].points;
        assert!((means[0][1] - 0.7125).abs() < 1e-12, "{}", means[0][1]);
        assert!(means[1..].iter().all(|p| p[1] == 0.0));
    }

    #[test]
    fn iou_violin_stays_within_samples() {
        let v = violin(&[0.9, 1.0, 0.95], 1.0, &ViolinStyle::clipped(Rgb::BLACK), &PlotConfig::default())
            .unwrap();
        let ViolinBody::Density(curve) = &v.body else {
            panic!("expected a density");
        };
        assert!((curve[0][0] - 0.9).abs() < 1e-12);
        assert!((curve[curve.len() - 1][0] - 1.0).abs() < 1e-12);
        assert!(curve.iter().all(|p| p[0] <= 1.0 + 1e-12));
        assert!(v.quartiles.is_empty());
    }

    fn peak(v: &Violin) -> f64 {
        match &v.body {
            ViolinBody::Density(c) => c.iter().map(|p| p[1]).fold(0.0, f64::max),
            ViolinBody::Point(_) => 0.0,
        }
    }

    #[test]
    fn split_halves_share_one_peak() {
        let good = [1.0, 1.1, 1.2, 1.3, 1.4];
        let bad = [0.0, 3.0, 6.0, 9.0, 12.0];
        let pair = split_pair(&good, &bad, 0.0, &PlotConfig::default());
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0].side, ViolinSide::Left);
        assert_eq!(pair[1].side, ViolinSide::Right);
        assert!((peak(&pair[0]) - 1.0).abs() < 1e-12);
        assert!(peak(&pair[1]) < 0.5, "{}", peak(&pair[1]));
        assert!(pair.iter().flat_map(|v| &v.quartiles).all(|q| q[1] <= 1.0 + 1e-12));
    }

    #[test]
    fn comparative_radial_violins_share_one_peak() {
        let mut wide = results("A", "B");
        wide.good_radial_distances = Table::from_rows(&[
            &[0.0, 1.0],
            &[0.1, 1.0],
            &[0.2, 1.0],
            &[0.3, 1.0],
        ]);
        let runs = [results("GFTT", "ORB"), wide];
        let fig = Figure::comparative(&runs, &PlotConfig::default());
        let radial = &fig.panels[3].violins;
        assert_eq!(radial.len(), 2);
        assert!((peak(&radial[0]) - 1.0).abs() < 1e-12);
        assert!(peak(&radial[1]) < 1.0);
    }

    #[test]
    fn comparative_figure_has_series_per_run() {
        let runs = [results("GFTT", "ORB"), results("SIFT", "SIFT")];
        let fig = Figure::comparative(&runs, &PlotConfig::default());
        assert_eq!(fig.panels.len(), 6);
        assert!(fig.title.starts_with("Matching - chi="));
        assert_eq!(fig.panels[0].lines.len(), 4);
        assert_eq!(fig.panels[1].lines[1].name.as_deref(), Some("SIFT+SIFT"));
        assert_eq!(fig.panels[3].x_ticks[0].1, "GFTT+ORB");
        assert_eq!(fig.panels[5].lines.len(), 2);

        // descriptor distances are normalised per run
        let max = fig.panels[4]
            .violins
            .iter()
            .filter_map(|v| match &v.body {
                ViolinBody::Density(c) => Some(c.iter().map(|p| p[0]).fold(f64::MIN, f64::max)),
                ViolinBody::Point(v) => Some(*v),
            })
            .fold(f64::MIN, f64::max);
        assert!(max < 2.0, "{max}");
    }

    #[test]
    fn degenerate_violin_is_a_point() {
        let cfg = PlotConfig::default();
        let style = ViolinStyle::seaborn(ViolinSide::Both, Rgb::BLACK, None);
        let v = violin(&[3.0, 3.0], 0.0, &style, &cfg).unwrap();
        assert!(matches!(v.body, ViolinBody::Point(x) if x == 3.0));
        assert!(v.quartiles.is_empty());
        assert!(violin(&[], 0.0, &style, &cfg).is_none());
    }

    #[test]
    fn figure_serializes() {
        let fig = Figure::single(&results("A", "B"), &PlotConfig::default());
        let json = fig.to_json().unwrap();
        assert!(json.contains("\"ROC curve\""));
        assert!(json.contains("\"precision_recall_curves\""));
    }

    #[test]
    fn precision_recall_curves_are_carried_per_run() {
        let mut a = results("GFTT", "ORB");
        a.precision_recall_curves = Table::from_rows(&[&[0.0, 1.0, 0.8, 0.6]]);
        let runs = [a, results("SIFT", "SIFT")];
        let fig = Figure::comparative(&runs, &PlotConfig::default());
        let labels: Vec<&str> = fig
            .precision_recall_curves
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["GFTT+ORB", "SIFT+SIFT"]);
        assert_eq!(fig.precision_recall_curves[0].rows, vec![vec![0.0, 1.0, 0.8, 0.6]]);
        assert!(fig.precision_recall_curves[1].rows.is_empty());
    }

    #[test]
    fn invalid_path_is_rejected() {
        let err = load_figure(Path::new("notes.txt"), &PlotConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid path specified"));
    }

    #[cfg(feature = "hdf5")]
    #[test]
    fn bag_path_loads_comparative_figure() {
        use crate::data::loader::tests::write_fixture;

        let tmp = tempfile::tempdir().unwrap();
        write_fixture(&tmp.path().join("seq.bag.b.matching.hdf5"), "GFTT", "ORB", 3.0).unwrap();
        write_fixture(&tmp.path().join("seq.bag.a.matching.hdf5"), "SIFT", "SIFT", 1.0).unwrap();
        write_fixture(&tmp.path().join("other.bag.c.matching.hdf5"), "X", "Y", 9.0).unwrap();

        let fig = load_figure(&tmp.path().join("seq.bag"), &PlotConfig::default()).unwrap();
        assert!(fig.title.starts_with("Matching - chi=0.99"), "{}", fig.title);
        let names: Vec<&str> = fig.panels[0]
            .lines
            .iter()
            .filter_map(|l| l.name.as_deref())
            .collect();
        assert_eq!(names, vec!["SIFT+SIFT", "SIFT+SIFT", "GFTT+ORB", "GFTT+ORB"]);
        // frame difference 1 scaled by the last file's rate
        assert_eq!(fig.panels[0].lines[0].points[0][0], 3.0);
        assert_eq!(fig.precision_recall_curves.len(), 2);
    }

    #[cfg(feature = "hdf5")]
    #[test]
    fn result_file_loads_single_figure() {
        use crate::data::loader::tests::write_fixture;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.matching.hdf5");
        write_fixture(&path, "GFTT", "ORB", 2.0).unwrap();

        let fig = load_figure(&path, &PlotConfig::default()).unwrap();
        assert!(fig.title.starts_with("Matching - detector=GFTT, descriptor=ORB, chi=0.99"));
        assert_eq!(fig.panels.len(), 6);
        assert_eq!(fig.panels[1].lines[0].points, vec![[2.0, 10.0], [4.0, 20.0]]);
    }
}
