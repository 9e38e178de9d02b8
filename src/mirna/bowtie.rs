use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::*;
use crate::mirna::mismatch::*;

/// One line of a parsed bowtie file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BowtieRecord {
    pub mirna: String,
    pub mismatches: MismatchField,
}

/// Parse `miRNA<TAB>mismatches[<TAB>...]`. Columns after the second are ignored.
pub fn parse_line(line: &str) -> std::result::Result<BowtieRecord, String> {
    let mut fields = line.split('\t');

    let mirna = fields.next().filter(|f| !f.is_empty());
    let mismatches = fields.next();

    let (Some(mirna), Some(mismatches)) = (mirna, mismatches) else {
        return Err(format!(
            "expected at least two tab-separated fields but found \"{}\"",
            line
        ));
    };

    Ok(BowtieRecord {
        mirna: mirna.to_owned(),
        mismatches: MismatchField::parse(mismatches)?,
    })
}

/// Iterator over the records of a parsed bowtie file.
///
/// A first line starting with `#` is skipped.
pub struct BowtieReader<R: BufRead> {
    reader: R,
    file: String,
    line_num: usize,
    buf: String,
}

impl BowtieReader<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| Error::file_io(path, e))?;
        Ok(Self::new(BufReader::new(f), path.display().to_string()))
    }
}

impl<R: BufRead> BowtieReader<R> {
    pub fn new(reader: R, file: impl Into<String>) -> Self {
        Self {
            reader,
            file: file.into(),
            line_num: 0,
            buf: String::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<&str>> {
        self.buf.clear();
        let n = self
            .reader
            .read_line(&mut self.buf)
            .map_err(|e| Error::FileIo {
                file: self.file.clone(),
                source: Box::new(e),
            })?;

        if n == 0 {
            return Ok(None);
        }

        self.line_num += 1;
        Ok(Some(self.buf.trim_end_matches(['\n', '\r'])))
    }
}

impl<R: BufRead> Iterator for BowtieReader<R> {
    type Item = Result<BowtieRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = match self.next_line() {
            Ok(line) => line?.to_owned(),
            Err(e) => return Some(Err(e)),
        };

        if self.line_num == 1 && line.starts_with('#') {
            line = match self.next_line() {
                Ok(line) => line?.to_owned(),
                Err(e) => return Some(Err(e)),
            };
        }

        Some(parse_line(&line).map_err(|reason| Error::MalformedRecord {
            file: self.file.clone(),
            line: self.line_num,
            reason,
        }))
    }
}
