//! Resolving and validating the input files of the table-building commands.

use rustc_hash::{FxHashMap, FxHashSet};

use std::path::{Path, PathBuf};

use crate::errors::*;

/// How the input files of a run were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelection {
    Files(Vec<PathBuf>),
    /// Every file in the directory whose name ends with the suffix.
    Dir { dir: PathBuf, suffix: String },
}

impl InputSelection {
    /// List the input files. Directory entries are sorted by name.
    ///
    /// Fails if no file is found or the same file is given twice.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        let files = match self {
            InputSelection::Files(files) => files.clone(),
            InputSelection::Dir { dir, suffix } => list_dir(dir, suffix)?,
        };

        if files.is_empty() {
            return Err(Error::NoInputFiles);
        }

        check_duplicates(&files)?;
        Ok(files)
    }
}

fn list_dir(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::file_io(dir, e))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::file_io(dir, e))?;
        let path = entry.path();

        if path.is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(suffix))
        {
            files.push(path);
        }
    }

    files.sort();
    log::debug!("Found {} input files in {:?}", files.len(), dir);
    Ok(files)
}

/// Fail if two paths point to the same file.
pub fn check_duplicates(files: &[PathBuf]) -> Result<()> {
    let mut seen = FxHashSet::default();

    for file in files {
        let resolved = std::fs::canonicalize(file).map_err(|e| Error::file_io(file, e))?;

        if !seen.insert(resolved) {
            return Err(Error::DuplicateInput(file.clone()));
        }
    }

    Ok(())
}

/// Column name for an input file: its file name up to the first `.`.
pub fn sample_name(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.split('.').next().unwrap_or_default().to_owned()
}

/// Sample names of the files, failing if two files map to the same name.
pub fn sample_names(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen: FxHashMap<String, &PathBuf> = FxHashMap::default();

    files
        .iter()
        .map(|file| {
            let sample = sample_name(file);

            if let Some(first) = seen.insert(sample.clone(), file) {
                return Err(Error::DuplicateSample {
                    sample,
                    first: first.clone(),
                    second: file.clone(),
                });
            }

            Ok(sample)
        })
        .collect()
}
