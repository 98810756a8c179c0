use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use hdf5::types::VarLenUnicode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Write synthetic `<bag>.<detector>_<descriptor>.matching.hdf5` result files
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output directory
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Bag file name the results pretend to come from
    #[arg(long, default_value = "sample.bag")]
    bag: String,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Detector/descriptor runs and how well their descriptors separate.
const RUNS: [(&str, &str, f64); 3] = [
    ("GFTT", "ORB", 1.0),
    ("SIFT", "SIFT", 1.6),
    ("AKAZE", "AKAZE", 1.3),
];

const MAX_FRAME_DIFF: usize = 30;

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1 = rng.random::<f64>().max(1e-15);
    let u2 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

struct Tables {
    match_stats: Vec<f64>,
    radial_overlaps_errors: Vec<f64>,
    good_radial_distances: Vec<f64>,
    bad_radial_distances: Vec<f64>,
    roc_curves: Vec<f64>,
    precision_recall_curves: Vec<f64>,
}

fn generate(quality: f64, rng: &mut StdRng) -> Tables {
    let mut match_stats = Vec::new();
    let mut roc_curves = Vec::new();
    let mut precision_recall_curves = Vec::new();
    for fd in 1..=MAX_FRAME_DIFF {
        let fd_f = fd as f64;
        for _ in 0..5 {
            let n = (400.0 * quality * (-fd_f / 15.0).exp() + gauss(rng, 0.0, 10.0)).max(0.0);
            let precision = (0.97 - 0.012 * fd_f / quality + gauss(rng, 0.0, 0.01)).clamp(0.0, 1.0);
            let recall = (0.85 - 0.02 * fd_f / quality + gauss(rng, 0.0, 0.01)).clamp(0.0, 1.0);
            match_stats.extend([fd_f, n, precision, recall]);
        }
        for step in 0..=20 {
            let s = step as f64 / 20.0;
            let tpr = s.powf(0.15 + 0.02 * fd_f / quality);
            roc_curves.extend([0.0, fd_f, tpr, s]);
            precision_recall_curves.extend([0.0, fd_f, 1.0 - 0.5 * s, tpr]);
        }
    }

    let mut radial_overlaps_errors = Vec::new();
    for _ in 0..2000 {
        let r = rng.random::<f64>() * 0.5;
        let overlap = (0.85 - r + gauss(rng, 0.0, 0.1)).clamp(0.0, 1.0);
        let error = gauss(rng, 0.0, 1.0 + 4.0 * r).abs();
        radial_overlaps_errors.extend([r, overlap, error]);
    }

    let mut good_radial_distances = Vec::new();
    for _ in 0..3000 {
        let dr = gauss(rng, 0.0, 0.08).abs();
        let dist = gauss(rng, 25.0 + 120.0 * dr / quality, 8.0).max(0.0);
        good_radial_distances.extend([dr, dist]);
    }
    let mut bad_radial_distances = Vec::new();
    for _ in 0..1500 {
        let dr = rng.random::<f64>() * 0.5;
        let dist = gauss(rng, 60.0 + 15.0 * quality, 15.0).max(0.0);
        bad_radial_distances.extend([dr, dist]);
    }

    Tables {
        match_stats,
        radial_overlaps_errors,
        good_radial_distances,
        bad_radial_distances,
        roc_curves,
        precision_recall_curves,
    }
}

fn write_table(file: &hdf5::File, name: &str, values: &[f64], cols: usize) -> Result<()> {
    file.new_dataset::<f64>()
        .shape((values.len() / cols, cols))
        .create(name)
        .with_context(|| format!("creating dataset '{name}'"))?
        .write_raw(values)
        .with_context(|| format!("writing dataset '{name}'"))?;
    Ok(())
}

fn write_results(path: &Path, detector: &str, descriptor: &str, tables: &Tables) -> Result<()> {
    let file = hdf5::File::create(path).context("creating HDF5 file")?;
    write_table(&file, "match_stats", &tables.match_stats, 4)?;
    write_table(&file, "radial_overlaps_errors", &tables.radial_overlaps_errors, 3)?;
    write_table(&file, "good_radial_distances", &tables.good_radial_distances, 2)?;
    write_table(&file, "bad_radial_distances", &tables.bad_radial_distances, 2)?;
    write_table(&file, "roc_curves", &tables.roc_curves, 4)?;
    write_table(&file, "precision_recall_curves", &tables.precision_recall_curves, 4)?;

    let group = file.create_group("attributes")?;
    for (name, value) in [("detector_type", detector), ("descriptor_type", descriptor)] {
        let value: VarLenUnicode = value
            .parse()
            .map_err(|e| anyhow!("attribute '{name}': {e}"))?;
        group
            .new_attr::<VarLenUnicode>()
            .shape(())
            .create(name)?
            .write_scalar(&value)?;
    }
    for (name, value) in [
        ("chi", 0.99),
        ("alpha", 0.57),
        ("fx", 295.9),
        ("fy", 295.9),
        ("cx", 511.5),
        ("cy", 511.5),
        ("rate", 1.0),
    ] {
        group
            .new_attr::<f64>()
            .shape(1)
            .create(name)?
            .write_raw(&[value][..])?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    for (detector, descriptor, quality) in RUNS {
        let tables = generate(quality, &mut rng);
        let path = args
            .out_dir
            .join(format!("{}.{detector}_{descriptor}.matching.hdf5", args.bag));
        write_results(&path, detector, descriptor, &tables)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
