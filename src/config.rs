// ---------------------------------------------------------------------------
// Plot configuration
// ---------------------------------------------------------------------------

/// Binning, sampling and window parameters of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Radial bins of the separability curve.
    pub separability_bins: usize,
    /// Radial bins of the violin panels.
    pub violin_bins: usize,
    /// Radial axis covered by the bins.
    pub radial_range: f64,
    /// Per-class sample cap for the silhouette in single-file mode.
    pub single_max_samples: usize,
    /// Per-class sample cap for the silhouette when comparing runs.
    pub comparative_max_samples: usize,
    /// Evaluation points of each violin's density curve.
    pub kde_points: usize,
    /// Seed for the silhouette subsampling.
    pub seed: u64,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            separability_bins: 50,
            violin_bins: 10,
            radial_range: 0.5,
            single_max_samples: 5000,
            comparative_max_samples: 1000,
            kde_points: 100,
            seed: 0,
            window_size: [1600.0, 1000.0],
            min_window_size: [800.0, 600.0],
        }
    }
}

impl PlotConfig {
    pub fn separability_width(&self) -> f64 {
        self.radial_range / self.separability_bins as f64
    }

    pub fn violin_width(&self) -> f64 {
        self.radial_range / self.violin_bins as f64
    }
}
