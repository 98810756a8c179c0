use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{MatchingResults, StatRow, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load all datasets of a single matching result file.
pub fn load_results(path: &Path) -> Result<MatchingResults> {
    let results =
        read_hdf5(path).with_context(|| format!("loading results from {}", path.display()))?;
    log::info!(
        "Loaded {} ({}): {} stat rows, {} good / {} bad matches",
        path.display(),
        results.det_desc(),
        results.match_stats.len(),
        results.good_radial_distances.len(),
        results.bad_radial_distances.len()
    );
    Ok(results)
}

/// Load several result files in order.
pub fn load_all(paths: &[impl AsRef<Path>]) -> Result<Vec<MatchingResults>> {
    paths.iter().map(|p| load_results(p.as_ref())).collect()
}

/// Validate a raw dataset's shape and wrap it as a [`Table`].
#[cfg_attr(not(feature = "hdf5"), allow(dead_code))]
fn table(name: &str, values: Vec<f64>, shape: &[usize], min_cols: usize) -> Result<Table> {
    let (rows, cols) = match shape {
        [] => (0, min_cols),
        [n] if *n == 0 => (0, min_cols),
        [n] => bail!("dataset '{name}' is 1-D with {n} values, expected a 2-D table"),
        [rows, cols] => (*rows, *cols),
        other => bail!("dataset '{name}' has unsupported shape {other:?}"),
    };
    if rows > 0 && cols < min_cols {
        bail!("dataset '{name}' has {cols} columns, expected at least {min_cols}");
    }
    if values.len() != rows * cols {
        bail!(
            "dataset '{name}': {} values do not fill a {rows}x{cols} table",
            values.len()
        );
    }
    Ok(Table::new(values, cols))
}

#[cfg_attr(not(feature = "hdf5"), allow(dead_code))]
fn stat_rows(table: &Table) -> Vec<StatRow> {
    table.rows().map(StatRow::from_slice).collect()
}

// ---------------------------------------------------------------------------
// HDF5 reader
// ---------------------------------------------------------------------------

#[cfg(feature = "hdf5")]
fn read_hdf5(path: &Path) -> Result<MatchingResults> {
    use super::model::Attributes;
    use hdf5::types::{FixedAscii, VarLenAscii, VarLenUnicode};

    fn dataset(file: &hdf5::File, name: &str, min_cols: usize) -> Result<Table> {
        let ds = file
            .dataset(name)
            .with_context(|| format!("missing dataset '{name}'"))?;
        let values = ds
            .read_raw::<f64>()
            .with_context(|| format!("reading dataset '{name}'"))?;
        table(name, values, &ds.shape(), min_cols)
    }

    fn number(group: &hdf5::Group, name: &str) -> Result<f64> {
        let values = group
            .attr(name)
            .with_context(|| format!("missing attribute '{name}'"))?
            .read_raw::<f64>()
            .with_context(|| format!("reading attribute '{name}'"))?;
        values
            .first()
            .copied()
            .with_context(|| format!("attribute '{name}' is empty"))
    }

    fn text(group: &hdf5::Group, name: &str) -> Result<String> {
        let attr = group
            .attr(name)
            .with_context(|| format!("missing attribute '{name}'"))?;
        if let Ok(s) = attr.read_scalar::<VarLenUnicode>() {
            return Ok(s.as_str().to_string());
        }
        if let Ok(s) = attr.read_scalar::<VarLenAscii>() {
            return Ok(s.as_str().to_string());
        }
        let s = attr
            .read_scalar::<FixedAscii<256>>()
            .with_context(|| format!("attribute '{name}' is not a string"))?;
        Ok(s.as_str().trim_end_matches('\0').to_string())
    }

    let file = hdf5::File::open(path).context("opening HDF5 file")?;
    let group = file
        .group("attributes")
        .context("missing 'attributes' group")?;

    let attributes = Attributes {
        detector_type: text(&group, "detector_type")?,
        descriptor_type: text(&group, "descriptor_type")?,
        chi: number(&group, "chi")?,
        alpha: number(&group, "alpha")?,
        fx: number(&group, "fx")?,
        fy: number(&group, "fy")?,
        cx: number(&group, "cx")?,
        cy: number(&group, "cy")?,
        rate: number(&group, "rate")?,
    };

    Ok(MatchingResults {
        attributes,
        match_stats: stat_rows(&dataset(&file, "match_stats", 4)?),
        radial_overlaps_errors: dataset(&file, "radial_overlaps_errors", 2)?,
        good_radial_distances: dataset(&file, "good_radial_distances", 2)?,
        bad_radial_distances: dataset(&file, "bad_radial_distances", 2)?,
        roc_curves: dataset(&file, "roc_curves", 4)?,
        precision_recall_curves: dataset(&file, "precision_recall_curves", 0)?,
    })
}

#[cfg(not(feature = "hdf5"))]
fn read_hdf5(_path: &Path) -> Result<MatchingResults> {
    bail!("this build was compiled without HDF5 support (enable the `hdf5` feature)")
}
