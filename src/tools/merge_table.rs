use rustc_hash::{FxHashMap, FxHashSet};

use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::inputs::*;

/// `(value, count)` pairs of a whitespace-separated two-column file, in file order.
pub fn read_two_columns(reader: impl BufRead, file: &str) -> Result<Vec<(String, String)>> {
    let mut res = Vec::new();
    let mut seen = FxHashSet::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;
        let malformed = |reason: String| Error::MalformedRecord {
            file: file.to_owned(),
            line: i + 1,
            reason,
        };

        let fields = line.split_ascii_whitespace().collect::<Vec<_>>();
        match fields[..] {
            [] => continue,
            [value, count] => {
                if !seen.insert(value.to_owned()) {
                    return Err(malformed(format!("value \"{}\" appears more than once", value)));
                }
                res.push((value.to_owned(), count.to_owned()));
            }
            _ => {
                return Err(malformed(format!(
                    "expected two whitespace-separated fields but found {}",
                    fields.len()
                )))
            }
        }
    }

    Ok(res)
}

/// Values of several two-column files joined on the first column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    samples: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl LookupTable {
    /// Outer join on the value column. A value missing from a file gets a count of `0`.
    ///
    /// Rows are sorted numerically if every value is a number, otherwise lexically.
    pub fn merge(samples: Vec<String>, tables: Vec<Vec<(String, String)>>) -> Self {
        assert_eq!(samples.len(), tables.len());
        let n = samples.len();

        let mut merged: FxHashMap<String, Vec<String>> = FxHashMap::default();

        for (i, table) in tables.into_iter().enumerate() {
            for (value, count) in table {
                merged.entry(value).or_insert_with(|| vec!["0".to_owned(); n])[i] = count;
            }
        }

        let mut rows = merged.into_iter().collect::<Vec<_>>();

        let numeric = rows.iter().all(|(v, _)| v.parse::<f64>().is_ok());
        if numeric {
            rows.sort_by(|(a, _), (b, _)| {
                let (x, y) = (a.parse::<f64>().unwrap_or(0.0), b.parse::<f64>().unwrap_or(0.0));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal).then(a.cmp(b))
            });
        } else {
            rows.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        Self { samples, rows }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn rows(&self) -> &[(String, Vec<String>)] {
        &self.rows
    }

    pub fn write_tsv(&self, mut writer: impl Write) -> io::Result<()> {
        write!(writer, "value")?;
        for s in &self.samples {
            write!(writer, "\t{}", s)?;
        }
        writeln!(writer)?;

        for (value, counts) in &self.rows {
            write!(writer, "{}", value)?;
            for c in counts {
                write!(writer, "\t{}", c)?;
            }
            writeln!(writer)?;
        }

        writer.flush()
    }
}

/// Merge two-column files on their first column and write the result to `output`.
pub fn merge_and_lookup(inputs: &[PathBuf], output: impl AsRef<Path>) -> Result<()> {
    let files = InputSelection::Files(inputs.to_vec()).resolve()?;
    let samples = sample_names(&files)?;

    let tables = files
        .iter()
        .map(|file| {
            let f = File::open(file).map_err(|e| Error::file_io(file, e))?;
            read_two_columns(BufReader::new(f), &file.display().to_string())
        })
        .collect::<Result<Vec<_>>>()?;

    let table = LookupTable::merge(samples, tables);

    let output = output.as_ref();
    let writer = crate::fastq::create_writer(output)?;
    table.write_tsv(writer).map_err(|e| Error::file_io(output, e))?;

    log::info!(
        "Merged {} files into {} rows in {:?}",
        files.len(),
        table.rows().len(),
        output
    );
    Ok(())
}
