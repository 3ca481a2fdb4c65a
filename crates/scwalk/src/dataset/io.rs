//! Directory save/load of a `Dataset`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::{Array, Dimension};
use ndarray_npy::{ReadNpyExt, ReadableElement, WritableElement, WriteNpyExt};

use super::adjlist::{format_adjlist, parse_adjlist, ADJLIST_FILE};
use super::Dataset;
use crate::error::DatasetError;

pub const FLOWS_IN_FILE: &str = "flows_in.npy";
pub const B1_FILE: &str = "B1.npy";
pub const B2_FILE: &str = "B2.npy";
pub const BCONDS_FILE: &str = "Bconds.npy";
pub const TARGETS_FILE: &str = "targets.npy";
pub const TRAIN_MASK_FILE: &str = "train_mask.npy";
pub const TEST_MASK_FILE: &str = "test_mask.npy";
pub const LAST_NODES_FILE: &str = "last_nodes.npy";

/// Every file a dataset directory holds.
pub const DATASET_FILES: [&str; 9] = [
    FLOWS_IN_FILE,
    B1_FILE,
    B2_FILE,
    BCONDS_FILE,
    TARGETS_FILE,
    TRAIN_MASK_FILE,
    TEST_MASK_FILE,
    LAST_NODES_FILE,
    ADJLIST_FILE,
];

fn write_array<A, D>(dir: &Path, file: &str, arr: &Array<A, D>) -> Result<(), DatasetError>
where
    A: WritableElement,
    D: Dimension,
{
    let path = dir.join(file);
    let f = File::create(&path).map_err(|e| DatasetError::io(&path, e))?;
    let mut writer = BufWriter::new(f);
    arr.write_npy(&mut writer).map_err(|e| DatasetError::Npy {
        file: file.to_string(),
        reason: e.to_string(),
    })?;
    writer.flush().map_err(|e| DatasetError::io(&path, e))
}

fn read_array<A, D>(dir: &Path, file: &str) -> Result<Array<A, D>, DatasetError>
where
    A: ReadableElement,
    D: Dimension,
{
    let path = dir.join(file);
    let f = File::open(&path).map_err(|e| DatasetError::io(&path, e))?;
    Array::<A, D>::read_npy(BufReader::new(f)).map_err(|e| DatasetError::Npy {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn write_files(ds: &Dataset, dir: &Path) -> Result<(), DatasetError> {
    write_array(dir, FLOWS_IN_FILE, &ds.flows_in)?;
    write_array(dir, B1_FILE, &ds.b1)?;
    write_array(dir, B2_FILE, &ds.b2)?;
    write_array(dir, BCONDS_FILE, &ds.bconds)?;
    write_array(dir, TARGETS_FILE, &ds.targets)?;
    write_array(dir, TRAIN_MASK_FILE, &ds.train_mask)?;
    write_array(dir, TEST_MASK_FILE, &ds.test_mask)?;
    write_array(dir, LAST_NODES_FILE, &ds.last_nodes)?;
    let path = dir.join(ADJLIST_FILE);
    fs::write(&path, format_adjlist(&ds.graph)).map_err(|e| DatasetError::io(&path, e))
}

/// Write `ds` to directory `dir`, replacing whatever was there.
///
/// Files are staged in a temporary sibling directory and published with a
/// rename once all of them are written. On failure `dir` is left as it was.
/// If the previous contents cannot be moved back, the error names the backup
/// directory that still holds them.
pub fn save(ds: &Dataset, dir: impl AsRef<Path>) -> Result<PathBuf, DatasetError> {
    let dir = dir.as_ref();
    let parent = match dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| DatasetError::io(&parent, e))?;
    let staging = tempfile::Builder::new()
        .prefix(".scwalk-staging-")
        .tempdir_in(&parent)
        .map_err(|e| DatasetError::io(&parent, e))?;
    write_files(ds, staging.path())?;

    let backup = if dir.exists() {
        let name = dir
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        let backup = parent.join(format!(".{name}.replaced-{}", std::process::id()));
        fs::rename(dir, &backup).map_err(|e| DatasetError::io(dir, e))?;
        Some(backup)
    } else {
        None
    };
    if let Err(e) = fs::rename(staging.path(), dir) {
        if let Some(backup) = &backup {
            if let Err(restore) = fs::rename(backup, dir) {
                tracing::error!(
                    dir = %dir.display(),
                    backup = %backup.display(),
                    publish_error = %e,
                    error = %restore,
                    "previous dataset left at backup path"
                );
                return Err(DatasetError::io(backup, restore));
            }
        }
        return Err(DatasetError::io(dir, e));
    }
    if let Some(backup) = backup {
        if let Err(e) = fs::remove_dir_all(&backup) {
            tracing::warn!(path = %backup.display(), error = %e, "could not remove replaced dataset");
        }
    }
    tracing::info!(
        dir = %dir.display(),
        examples = ds.example_count(),
        hops = ds.hop_count(),
        "dataset saved"
    );
    Ok(dir.to_path_buf())
}

/// Read a dataset directory written by `save` and check that its arrays agree.
pub fn load(dir: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let dir = dir.as_ref();
    let adj_path = dir.join(ADJLIST_FILE);
    let text = fs::read_to_string(&adj_path).map_err(|e| DatasetError::io(&adj_path, e))?;
    let ds = Dataset {
        flows_in: read_array(dir, FLOWS_IN_FILE)?,
        b1: read_array(dir, B1_FILE)?,
        b2: read_array(dir, B2_FILE)?,
        bconds: read_array(dir, BCONDS_FILE)?,
        targets: read_array(dir, TARGETS_FILE)?,
        train_mask: read_array(dir, TRAIN_MASK_FILE)?,
        test_mask: read_array(dir, TEST_MASK_FILE)?,
        graph: parse_adjlist(&text)?,
        last_nodes: read_array(dir, LAST_NODES_FILE)?,
    };
    ds.check_shapes()?;
    tracing::debug!(
        dir = %dir.display(),
        examples = ds.example_count(),
        hops = ds.hop_count(),
        "dataset loaded"
    );
    Ok(ds)
}
