//! Small RNA sequencing data wrangling.
//!
//! # Overview
//! srnakit bundles the small transforms that sit around a miRNA alignment step:
//! * Counting reads per miRNA and mismatch pattern across samples ([`mirna`])
//! * Extracting reads that did not align ([`tools::extract_unmapped`])
//! * Filtering fastq reads by sequence or length, masking low quality bases
//! * Profiling how many reads match a progressively shorter regex ([`tools::regex_scan`])
//! * Merging two-column count tables ([`tools::merge_and_lookup`])
//!
//! Each of these is also a subcommand of the `srnakit` binary.
//!
//! ## miRNA counting
//! The input is a "parsed bowtie" file with one aligned read per line:
//! ```text
//! #miRNA          mismatches          ...
//! hsa-let-7a-5p   PM                  ...
//! hsa-let-7a-5p   11:T>C:40           ...
//! hsa-miR-21-5p   3:A>G:38,19:C>T:12  ...
//! ```
//! Reads with a mismatched base below the quality threshold are dropped, the rest are grouped by
//! miRNA and mismatch positions/bases (ignoring quality), and the counts of all files are merged
//! into one table with a per-miRNA total for every sample:
//! ```text
//! miRNA name      pos:mut    s1  s2  s1 (PM+1MM+2MM)  s2 (PM+1MM+2MM)
//! hsa-let-7a-5p   PM         10  4   12               4
//! hsa-let-7a-5p   11:T>C     2   0   12               4
//! ```
//!
//! ## Read streams
//! The fastq tools are built on [`Reads`], a chunked stream of reads with iterator-like
//! operations that are executed when you call [`run()`](Reads::run) or
//! [`run_with_threads()`](Reads::run_with_threads):
//! ```no_run
//! use srnakit::*;
//!
//! iter_fastq1("reads.fastq.gz")?
//!     .length_in_bounds(18..=26)
//!     .mask_qual(20)
//!     .collect_fastq1("filtered.fastq.gz")?
//!     .run()?;
//! # Ok::<(), srnakit::errors::Error>(())
//! ```

pub mod cli;
pub mod errors;
pub mod fastq;
pub mod inputs;
pub mod iter;
pub mod mirna;
pub mod read;
pub mod tools;

// commonly used functions and types

pub use crate::fastq::*;
pub use crate::iter::*;
pub use crate::read::*;
