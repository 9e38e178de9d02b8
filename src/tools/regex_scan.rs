use regex::bytes::Regex;

use std::io::{self, Write};
use std::path::Path;

use crate::fastq::*;
use crate::iter::*;

/// Replace the character at the 1-based `replace_idx` with `.`, if it is within the pattern.
pub fn modify_pattern(pattern: &str, replace_idx: Option<usize>) -> String {
    match replace_idx {
        Some(idx) if idx >= 1 && idx <= pattern.chars().count() => pattern
            .chars()
            .enumerate()
            .map(|(i, c)| if i == idx - 1 { '.' } else { c })
            .collect(),
        _ => pattern.to_owned(),
    }
}

/// Drop a leading `.?` or else the first character.
pub fn shrink_pattern(pattern: &str) -> &str {
    if let Some(rest) = pattern.strip_prefix(".?") {
        return rest;
    }

    let mut chars = pattern.chars();
    chars.next();
    chars.as_str()
}

/// One step of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    pub pattern: String,
    pub length: usize,
    pub match_count: usize,
    pub remained: usize,
}

/// Repeatedly remove the sequences that entirely match the pattern, shrinking the pattern from
/// its start after each step until nothing is left of it.
pub fn scan_sequences(mut seqs: Vec<Vec<u8>>, pattern: &str) -> Result<Vec<ScanRow>> {
    let mut rows = Vec::new();
    let mut pattern = pattern;

    while !pattern.is_empty() {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| Error::Regex {
            pattern: pattern.to_owned(),
            source: e,
        })?;

        let before = seqs.len();
        seqs.retain(|s| !regex.is_match(s));

        let row = ScanRow {
            pattern: pattern.to_owned(),
            length: pattern.chars().count(),
            match_count: before - seqs.len(),
            remained: seqs.len(),
        };
        log::debug!("{:?}", row);
        rows.push(row);

        pattern = shrink_pattern(pattern);
    }

    Ok(rows)
}

pub fn write_scan(rows: &[ScanRow], mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "pattern\tlength\tmatch_count\tremained_reads")?;
    for row in rows {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            row.pattern, row.length, row.match_count, row.remained
        )?;
    }
    writer.flush()
}

/// Scan the reads of a fastq file and write the table to `output`, or stdout if `None`.
pub fn regex_scan(
    input: &str,
    pattern: &str,
    replace_idx: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let pattern = modify_pattern(pattern, replace_idx);
    let seqs = iter_fastq1(input)?
        .run_collect_reads()?
        .into_iter()
        .map(|r| r.seq().to_owned())
        .collect::<Vec<_>>();
    log::info!("Scanning {} reads with pattern \"{}\"", seqs.len(), pattern);

    let rows = scan_sequences(seqs, &pattern)?;

    match output {
        Some(file) => {
            let writer = create_writer(file)?;
            write_scan(&rows, writer).map_err(|e| Error::file_io(file, e))
        }
        None => write_scan(&rows, io::stdout().lock()).map_err(|e| Error::BytesIo(Box::new(e))),
    }
}
