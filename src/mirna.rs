//! Counting reads aligned to miRNAs, grouped by mismatch signature.
//!
//! Input files are "parsed bowtie" files: an optional `#` header line followed by
//! `miRNA<TAB>mismatches<TAB>...` lines, where `mismatches` is `PM` or a comma-separated list of
//! `position:base:quality` entries. Reads with a mismatched base below the quality threshold are
//! not counted. The counts of all files are merged into one table, see [`MergedTable`].

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::errors::*;
use crate::inputs::*;

pub mod bowtie;
pub use bowtie::*;

pub mod mismatch;
pub use mismatch::*;

pub mod table;
pub use table::*;

/// Suffix of the files picked up from an input directory.
pub const PARSED_SUFFIX: &str = ".parsed.txt";

pub const DEFAULT_QSCORE: u32 = 38;

#[derive(Debug, Clone)]
pub struct CountOptions {
    pub inputs: InputSelection,
    pub output: PathBuf,
    /// Minimum quality of every mismatched base.
    pub qscore: u32,
    pub threads: usize,
    /// Also write the mismatch count and the first two mismatches as separate columns.
    pub mismatch_columns: bool,
}

/// Count the reads of one file that pass the quality threshold.
pub fn count_file(file: impl AsRef<Path>, qscore: u32) -> Result<PerFileCounts> {
    let file = file.as_ref();
    let mut counts = PerFileCounts::default();
    let mut total = 0usize;
    let mut passed = 0usize;

    for record in BowtieReader::from_path(file)? {
        let record = record?;
        total += 1;

        if !passes_quality(&record.mismatches, qscore) {
            continue;
        }
        passed += 1;

        let key = CountKey {
            signature: normalize_signature(&record.mismatches),
            mirna: record.mirna,
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    if total == 0 {
        log::warn!("No records in {:?}", file);
    }
    log::info!(
        "{:?}: {} of {} reads passed Q>={} ({} distinct miRNA variants)",
        file,
        passed,
        total,
        qscore,
        counts.len()
    );

    Ok(counts)
}

/// Count every file, using up to `threads` threads.
///
/// The result is in the same order as `files` regardless of which thread finishes first.
pub fn count_files(files: &[PathBuf], qscore: u32, threads: usize) -> Result<Vec<PerFileCounts>> {
    if threads == 0 {
        return Err(Error::InvalidArgument(
            "Number of threads must be greater than zero".to_owned(),
        ));
    }

    let next = AtomicUsize::new(0);
    let next = &next;

    let mut counted = thread::scope(|s| {
        let handles = (0..threads.min(files.len()))
            .map(|_| {
                s.spawn(move || -> Result<Vec<(usize, PerFileCounts)>> {
                    let mut res = Vec::new();

                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        let Some(file) = files.get(i) else {
                            break;
                        };
                        res.push((i, count_file(file, qscore)?));
                    }

                    Ok(res)
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect::<Result<Vec<_>>>()
    })?
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    counted.sort_unstable_by_key(|&(i, _)| i);
    Ok(counted.into_iter().map(|(_, c)| c).collect())
}

/// Resolve the inputs, count them and merge the counts into one table.
pub fn build_table(inputs: &InputSelection, qscore: u32, threads: usize) -> Result<MergedTable> {
    let files = inputs.resolve()?;
    let samples = sample_names(&files)?;

    let per_file = count_files(&files, qscore, threads)?;
    Ok(MergedTable::merge(samples, &per_file))
}

/// Build the table and write it to the output file.
///
/// Nothing is written unless every input was read successfully.
pub fn count_mirna(options: &CountOptions) -> Result<()> {
    let table = build_table(&options.inputs, options.qscore, options.threads)?;

    let writer = crate::fastq::create_writer(&options.output)?;
    table
        .write_tsv(writer, options.mismatch_columns)
        .map_err(|e| Error::file_io(&options.output, e))?;

    log::info!(
        "Wrote {} rows for {} samples to {:?}",
        table.rows().len(),
        table.samples().len(),
        options.output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_count_file_filters_quality() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("s1.parsed.txt");
        fs::write(
            &file,
            "#miRNA\tmismatch\tseq\n\
             mir-1\tPM\tACGT\n\
             mir-1\tPM\tACGT\n\
             mir-1\t12:A:40,20:T:35\tACGT\n\
             mir-1\t12:A:40\tACGT\n\
             mir-1\t12:A:39\tACGT\n",
        )
        .unwrap();

        let counts = count_file(&file, 38).unwrap();
        assert_eq!(counts.len(), 2);

        let pm = CountKey {
            mirna: "mir-1".to_owned(),
            signature: Signature::default(),
        };
        assert_eq!(counts[&pm], 2);
        assert_eq!(counts.values().sum::<u64>(), 4);
    }

    #[test]
    fn test_count_files_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = (0..5)
            .map(|i| {
                let file = dir.path().join(format!("s{i}.parsed.txt"));
                let lines = "mir-1\tPM\n".repeat(i + 1);
                fs::write(&file, lines).unwrap();
                file
            })
            .collect::<Vec<_>>();

        let counts = count_files(&files, 38, 3).unwrap();
        let sums = counts
            .iter()
            .map(|c| c.values().sum::<u64>())
            .collect::<Vec<_>>();
        assert_eq!(sums, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_malformed_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.parsed.txt");
        let bad = dir.path().join("b.parsed.txt");
        fs::write(&good, "mir-1\tPM\n").unwrap();
        fs::write(&bad, "mir-1\tPM\nmir-2\n").unwrap();

        let res = build_table(&InputSelection::Files(vec![good, bad]), 38, 2);
        assert!(matches!(res, Err(Error::MalformedRecord { line: 2, .. })));
    }
}
