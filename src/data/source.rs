use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PathError;

/// Suffix of result files written for each detector/descriptor run of a bag.
pub const MATCHING_SUFFIX: &str = ".matching.hdf5";

// ---------------------------------------------------------------------------
// ResultSource – what the user pointed us at
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    /// One result file, plotted on its own.
    Single(PathBuf),
    /// A bag file; its results live next to it as `<bag name>*.matching.hdf5`.
    Bag(PathBuf),
    /// A working directory holding `*.matching.hdf5` files.
    Directory(PathBuf),
}

impl ResultSource {
    /// Whether the figure compares several detector/descriptor runs.
    pub fn is_comparative(&self) -> bool {
        !matches!(self, ResultSource::Single(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            ResultSource::Single(p) | ResultSource::Bag(p) | ResultSource::Directory(p) => p,
        }
    }
}

/// Decide how to interpret `path`.
pub fn classify(path: &Path) -> Result<ResultSource, PathError> {
    if path.is_dir() {
        return Ok(ResultSource::Directory(path.to_path_buf()));
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if name.ends_with(".hdf5") {
        Ok(ResultSource::Single(path.to_path_buf()))
    } else if name.ends_with(".bag") {
        Ok(ResultSource::Bag(path.to_path_buf()))
    } else {
        Err(PathError::Invalid(path.to_path_buf()))
    }
}

/// List the result files a source refers to, sorted by file name.
pub fn discover(source: &ResultSource) -> Result<Vec<PathBuf>, PathError> {
    match source {
        ResultSource::Single(path) => Ok(vec![path.clone()]),
        ResultSource::Bag(bag) => {
            let prefix = bag
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let dir = match bag.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let files = list_matching(dir, |name| name.starts_with(prefix))?;
            if files.is_empty() {
                return Err(PathError::NoBagResults(bag.clone()));
            }
            Ok(files)
        }
        ResultSource::Directory(dir) => {
            let files = list_matching(dir, |_| true)?;
            if files.is_empty() {
                return Err(PathError::NoDirectoryResults(dir.clone()));
            }
            Ok(files)
        }
    }
}

fn list_matching(dir: &Path, accept: impl Fn(&str) -> bool) -> Result<Vec<PathBuf>, PathError> {
    let listing_err = |source| PathError::Listing {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_err)? {
        let entry = entry.map_err(listing_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.ends_with(MATCHING_SUFFIX) && accept(name) {
            log::debug!("Found results file {name}");
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn classifies_by_suffix() {
        assert_eq!(
            classify(Path::new("run/out.hdf5")).unwrap(),
            ResultSource::Single(PathBuf::from("run/out.hdf5"))
        );
        assert_eq!(
            classify(Path::new("run/seq01.bag")).unwrap(),
            ResultSource::Bag(PathBuf::from("run/seq01.bag"))
        );
        assert!(matches!(
            classify(Path::new("run/notes.txt")),
            Err(PathError::Invalid(_))
        ));
    }

    #[test]
    fn directory_wins_over_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("weird.hdf5");
        fs::create_dir(&dir).unwrap();
        assert_eq!(classify(&dir).unwrap(), ResultSource::Directory(dir));
    }

    #[test]
    fn bag_discovery_filters_prefix_and_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "seq01.bag");
        touch(tmp.path(), "seq01.bag.orb.matching.hdf5");
        touch(tmp.path(), "seq01.bag.akaze.matching.hdf5");
        touch(tmp.path(), "seq02.bag.orb.matching.hdf5");
        touch(tmp.path(), "seq01.bag.orb.hdf5");

        let source = ResultSource::Bag(tmp.path().join("seq01.bag"));
        let files = discover(&source).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["seq01.bag.akaze.matching.hdf5", "seq01.bag.orb.matching.hdf5"]
        );
    }

    #[test]
    fn bag_without_results_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "seq01.bag");
        let source = ResultSource::Bag(tmp.path().join("seq01.bag"));
        let err = discover(&source).unwrap_err();
        assert!(matches!(err, PathError::NoBagResults(_)));
        assert!(err.to_string().starts_with("Bag filename had no associated results files"));
    }

    #[test]
    fn directory_collects_all_results() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.matching.hdf5");
        touch(tmp.path(), "b.matching.hdf5");
        touch(tmp.path(), "c.txt");
        let files = discover(&ResultSource::Directory(tmp.path().to_path_buf())).unwrap();
        assert_eq!(files.len(), 2);
        assert!(ResultSource::Directory(tmp.path().to_path_buf()).is_comparative());
    }

    #[test]
    fn empty_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "notes.txt");
        let err = discover(&ResultSource::Directory(tmp.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, PathError::NoDirectoryResults(_)));
        assert!(err.to_string().starts_with("Directory contains no matching results files"));
    }
}
