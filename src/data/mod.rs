/// Data layer: result discovery, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .hdf5 / .bag / directory
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  classify path → list result files
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read HDF5 → MatchingResults
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  group-by-mean, radial bins, silhouette, KDE
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod source;
pub mod stats;
