use rand::Rng;

use super::model::{StatRow, Table};

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Average `match_stats` rows sharing a frame difference.
///
/// The result is ordered by ascending frame difference.
pub fn group_mean(rows: &[StatRow]) -> Vec<StatRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| a.frame_diff.total_cmp(&b.frame_diff));

    sorted
        .chunk_by(|a, b| a.frame_diff == b.frame_diff)
        .map(|group| {
            let n = group.len() as f64;
            let sum = |f: fn(&StatRow) -> f64| group.iter().map(f).sum::<f64>() / n;
            StatRow {
                frame_diff: group[0].frame_diff,
                num_matches: sum(|r| r.num_matches),
                precision: sum(|r| r.precision),
                recall: sum(|r| r.recall),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Radial binning
// ---------------------------------------------------------------------------

/// Upper limit of the radial distance axis; larger values land in the last bin.
pub const RADIAL_LIMIT: f64 = 0.499999;

/// Index of the radial bin holding `r`.
pub fn radial_bin(r: f64, bins: usize, width: f64) -> usize {
    // `as usize` saturates negatives and NaN to 0.
    ((r.min(RADIAL_LIMIT) / width) as usize).min(bins.saturating_sub(1))
}

/// Split column `value_col` of `table` by the radial distance in column 0.
pub fn bin_by_radius(table: &Table, value_col: usize, bins: usize, width: f64) -> Vec<Vec<f64>> {
    let mut out = vec![Vec::new(); bins];
    if bins == 0 {
        return out;
    }
    for row in table.rows() {
        out[radial_bin(row[0], bins, width)].push(row[value_col]);
    }
    out
}

/// `"0.05-0.1"` style label of a radial bin.
pub fn bin_label(bin: usize, width: f64) -> String {
    format!("{}-{}", round_label(bin as f64 * width), round_label((bin + 1) as f64 * width))
}

fn round_label(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

// ---------------------------------------------------------------------------
// Silhouette
// ---------------------------------------------------------------------------

/// Sorted copy plus prefix sums, for O(log n) sums of absolute differences.
struct SortedSums {
    sorted: Vec<f64>,
    prefix: Vec<f64>,
}

impl SortedSums {
    fn new(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mut prefix = Vec::with_capacity(sorted.len() + 1);
        prefix.push(0.0);
        let mut acc = 0.0;
        for v in &sorted {
            acc += v;
            prefix.push(acc);
        }
        SortedSums { sorted, prefix }
    }

    fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Sum of `|x - v|` over all stored values.
    fn abs_sum(&self, x: f64) -> f64 {
        let n = self.sorted.len();
        let k = self.sorted.partition_point(|&v| v < x);
        let below = x * k as f64 - self.prefix[k];
        let above = (self.prefix[n] - self.prefix[k]) - x * (n - k) as f64;
        below + above
    }
}

/// Mean silhouette coefficient of two 1-D clusters under the L1 metric.
///
/// Returns `None` when either cluster is empty or there are fewer than three
/// samples, where the coefficient is undefined.
pub fn silhouette_l1(good: &[f64], bad: &[f64]) -> Option<f64> {
    if good.is_empty() || bad.is_empty() || good.len() + bad.len() < 3 {
        return None;
    }
    let good_sums = SortedSums::new(good);
    let bad_sums = SortedSums::new(bad);

    let score = |x: f64, own: &SortedSums, other: &SortedSums| -> f64 {
        if own.len() < 2 {
            return 0.0;
        }
        let a = own.abs_sum(x) / (own.len() - 1) as f64;
        let b = other.abs_sum(x) / other.len() as f64;
        let denom = a.max(b);
        if denom > 0.0 { (b - a) / denom } else { 0.0 }
    };

    let total: f64 = good.iter().map(|&x| score(x, &good_sums, &bad_sums)).sum::<f64>()
        + bad.iter().map(|&x| score(x, &bad_sums, &good_sums)).sum::<f64>();
    Some(total / (good.len() + bad.len()) as f64)
}

/// Random subset of at most `max` values, drawn without replacement.
pub fn subsample<R: Rng + ?Sized>(values: &[f64], max: usize, rng: &mut R) -> Vec<f64> {
    if values.len() <= max {
        return values.to_vec();
    }
    rand::seq::index::sample(rng, values.len(), max)
        .into_iter()
        .map(|i| values[i])
        .collect()
}

/// Silhouette coefficient per radial bin, at bin centres.
///
/// Only bins holding both good and bad matches produce a point.
pub fn separability<R: Rng + ?Sized>(
    good: &Table,
    bad: &Table,
    bins: usize,
    width: f64,
    max_samples: usize,
    rng: &mut R,
) -> Vec<[f64; 2]> {
    let good_bins = bin_by_radius(good, 1, bins, width);
    let bad_bins = bin_by_radius(bad, 1, bins, width);

    good_bins
        .iter()
        .zip(&bad_bins)
        .enumerate()
        .filter_map(|(i, (g, b))| {
            if g.is_empty() || b.is_empty() {
                return None;
            }
            let g = subsample(g, max_samples, rng);
            let b = subsample(b, max_samples, rng);
            let s = silhouette_l1(&g, &b);
            if s.is_none() {
                log::warn!("Radial bin {i} has too few matches for a silhouette score");
            }
            s.map(|s| [i as f64 * width + width / 2.0, s])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Distribution summaries
// ---------------------------------------------------------------------------

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Percentile with linear interpolation between closest ranks; `q` in [0, 1].
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// First quartile, median and third quartile.
pub fn quartiles(values: &[f64]) -> Option<[f64; 3]> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some([0.25, 0.5, 0.75].map(|q| percentile_sorted(&sorted, q)))
}

/// Divide every value by the maximum; left unchanged if the maximum is not positive.
pub fn normalize_by_max(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 {
        for v in values.iter_mut() {
            *v /= max;
        }
    }
}

/// Gaussian kernel density estimate evaluated on `points` evenly spaced
/// positions, extending `cut` bandwidths past the data on either side.
///
/// Bandwidth follows Scott's rule. Returns `(position, density)` pairs, or
/// `None` when the sample has fewer than two values or no spread.
pub fn kde(values: &[f64], points: usize, cut: f64) -> Option<Vec<[f64; 2]>> {
    let n = values.len();
    if n < 2 || points < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = var.sqrt();
    if !std.is_finite() || std <= 0.0 {
        return None;
    }
    let h = std * (n as f64).powf(-0.2);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min) - cut * h;
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) + cut * h;
    let step = (max - min) / (points - 1) as f64;
    let norm = 1.0 / (n as f64 * h * (2.0 * std::f64::consts::PI).sqrt());

    Some(
        (0..points)
            .map(|i| {
                let x = min + step * i as f64;
                let density: f64 = values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / h).powi(2)).exp())
                    .sum();
                [x, density * norm]
            })
            .collect(),
    )
}
