use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// StatRow – one row of `match_stats`
// ---------------------------------------------------------------------------

/// Per-frame-pair matching statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatRow {
    pub frame_diff: f64,
    pub num_matches: f64,
    pub precision: f64,
    pub recall: f64,
}

impl StatRow {
    pub fn from_slice(row: &[f64]) -> Self {
        StatRow {
            frame_diff: row[0],
            num_matches: row[1],
            precision: row[2],
            recall: row[3],
        }
    }
}

// ---------------------------------------------------------------------------
// Table – a dense row-major numeric table
// ---------------------------------------------------------------------------

/// A 2-D `f64` dataset as stored in the result file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub values: Vec<f64>,
    pub cols: usize,
}

impl Table {
    pub fn new(values: Vec<f64>, cols: usize) -> Self {
        debug_assert!(cols == 0 || values.len() % cols == 0);
        Table { values, cols }
    }

    pub fn from_rows(rows: &[&[f64]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let values = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Table { values, cols }
    }

    pub fn len(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.values.len() / self.cols
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0
        self.values.chunks_exact(self.cols.max(1))
    }

    /// Copy out a single column.
    pub fn column(&self, idx: usize) -> Vec<f64> {
        self.rows().map(|r| r[idx]).collect()
    }
}

// ---------------------------------------------------------------------------
// Attributes – scalar metadata of a run
// ---------------------------------------------------------------------------

/// Camera and pipeline parameters stored in the `attributes` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attributes {
    pub detector_type: String,
    pub descriptor_type: String,
    pub chi: f64,
    pub alpha: f64,
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
    /// Frame rate multiplier applied to frame differences on the x axis.
    pub rate: f64,
}

impl Attributes {
    pub fn det_desc(&self) -> DetDesc {
        DetDesc {
            detector: self.detector_type.clone(),
            descriptor: self.descriptor_type.clone(),
        }
    }

    /// `chi=…, alpha=…, fx=…, fy=…, cx=…, cy=…`
    pub fn camera_summary(&self) -> String {
        format!(
            "chi={:?}, alpha={:?}, fx={:?}, fy={:?}, cx={:?}, cy={:?}",
            self.chi, self.alpha, self.fx, self.fy, self.cx, self.cy
        )
    }
}

// ---------------------------------------------------------------------------
// DetDesc – detector/descriptor pairing used as a series key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DetDesc {
    pub detector: String,
    pub descriptor: String,
}

impl fmt::Display for DetDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.detector, self.descriptor)
    }
}

// ---------------------------------------------------------------------------
// MatchingResults – everything read from one result file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MatchingResults {
    pub attributes: Attributes,
    pub match_stats: Vec<StatRow>,
    /// Rows of (radial distance, overlap, error).
    pub radial_overlaps_errors: Table,
    /// Rows of (delta radial distance, descriptor distance) for true matches.
    pub good_radial_distances: Table,
    /// Same layout as `good_radial_distances`, for false matches.
    pub bad_radial_distances: Table,
    /// Rows of (curve id, frame difference, true positive rate, false positive rate).
    pub roc_curves: Table,
    /// Exported with the figure; the viewer does not plot it.
    pub precision_recall_curves: Table,
}

impl MatchingResults {
    pub fn det_desc(&self) -> DetDesc {
        self.attributes.det_desc()
    }
}
