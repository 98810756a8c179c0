use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::PlotConfig;
use crate::figure::{self, Figure};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Figure being shown (None until results are loaded).
    pub figure: Option<Figure>,

    /// Path the figure was built from.
    pub source_path: Option<PathBuf>,

    pub config: PlotConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            figure: None,
            source_path: None,
            config,
            status_message: None,
        }
    }

    /// Show an already built figure.
    pub fn set_figure(&mut self, figure: Figure, path: PathBuf) {
        self.figure = Some(figure);
        self.source_path = Some(path);
        self.status_message = None;
    }

    /// Rebuild the figure from a results path, keeping the old one on failure.
    pub fn open(&mut self, path: &Path) {
        match figure::load_figure(path, &self.config) {
            Ok(fig) => self.set_figure(fig, path.to_path_buf()),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Write the current figure as JSON.
    pub fn export(&self, path: &Path) -> Result<()> {
        let figure = self.figure.as_ref().context("no figure loaded")?;
        std::fs::write(path, figure.to_json()?)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported figure to {}", path.display());
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlotConfig::default())
    }
}
