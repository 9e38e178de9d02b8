use memchr::memmem;

use std::path::Path;

use crate::fastq::*;
use crate::iter::*;

fn run_reads(reads: impl Reads, threads: usize) -> Result<()> {
    if threads > 1 {
        reads.run_with_threads(threads)
    } else {
        reads.run()
    }
}

fn log_kept(input: &str) -> impl Fn(usize) + Send + Sync + '_ {
    move |n| log::info!("Kept {} reads from \"{}\"", n, input)
}

/// Keep the reads whose sequence contains `pattern`.
pub fn filter_by_sequence(
    input: &str,
    output: impl AsRef<Path>,
    pattern: &[u8],
    threads: usize,
) -> Result<()> {
    if pattern.is_empty() {
        return Err(Error::InvalidArgument("Sequence to filter by is empty".to_owned()));
    }

    let finder = memmem::Finder::new(pattern);
    let reads = iter_fastq1(input)?
        .retain(move |r| finder.find(r.seq()).is_some())
        .count(log_kept(input))
        .collect_fastq1(output)?;

    run_reads(reads, threads)
}

/// Keep the reads with `min_len <= length <= max_len`.
pub fn filter_by_length(
    input: &str,
    output: impl AsRef<Path>,
    min_len: usize,
    max_len: usize,
    threads: usize,
) -> Result<()> {
    if min_len > max_len {
        return Err(Error::InvalidArgument(format!(
            "Minimum length {} is greater than maximum length {}",
            min_len, max_len
        )));
    }

    let reads = iter_fastq1(input)?
        .length_in_bounds(min_len..=max_len)
        .count(log_kept(input))
        .collect_fastq1(output)?;

    run_reads(reads, threads)
}

/// Replace every base with quality score `<= threshold` by `N`.
pub fn mask_low_quality(
    input: &str,
    output: impl AsRef<Path>,
    threshold: u8,
    threads: usize,
) -> Result<()> {
    let reads = iter_fastq1(input)?
        .mask_qual(threshold)
        .collect_fastq1(output)?;

    run_reads(reads, threads)
}
