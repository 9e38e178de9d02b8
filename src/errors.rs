use thiserror;

use std::path::PathBuf;

use crate::read::Origin;

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error reading or writing \"{file}\": {source}")]
    FileIo { file: String, source: BoxError },

    #[error("Error reading or writing bytes: {0}")]
    BytesIo(BoxError),

    #[error("Error parsing record {idx} in {origin}: {source}")]
    ParseRecord {
        origin: Origin,
        idx: usize,
        source: BoxError,
    },

    #[error("Malformed record on line {line} in \"{file}\": {reason}")]
    MalformedRecord {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("No input files were found")]
    NoInputFiles,

    #[error("Duplicate input file given: {0:?}. Please check the file names.")]
    DuplicateInput(PathBuf),

    #[error("Input files {first:?} and {second:?} both map to the sample name \"{sample}\"")]
    DuplicateSample {
        sample: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Could not compile pattern \"{pattern}\": {source}")]
    Regex {
        pattern: String,
        source: regex::Error,
    },
}

impl Error {
    pub(crate) fn file_io(file: impl AsRef<std::path::Path>, source: impl Into<BoxError>) -> Self {
        Error::FileIo {
            file: file.as_ref().display().to_string(),
            source: source.into(),
        }
    }
}
