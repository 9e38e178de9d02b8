//! Command line interface of the `srnakit` binary.

use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};

use std::path::PathBuf;

use crate::errors::*;
use crate::inputs::InputSelection;
use crate::mirna::{self, CountOptions};
use crate::tools;

#[derive(Parser, Debug)]
#[command(name = "srnakit", version, about = "Small RNA sequencing data wrangling")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count reads per miRNA and mismatch pattern across parsed bowtie files
    CountMirna(CountMirnaArgs),
    /// Extract the reads of a fastq file that are missing from an alignment file
    ExtractUnmapped(ExtractUnmappedArgs),
    /// Keep fastq reads that contain a sequence
    FilterSeq(FilterSeqArgs),
    /// Keep fastq reads within a length range
    FilterLength(FilterLengthArgs),
    /// Replace low quality bases with N
    MaskQual(MaskQualArgs),
    /// Count reads matching a regex that is shortened one character at a time
    RegexScan(RegexScanArgs),
    /// Merge two-column count files on their first column
    MergeTable(MergeTableArgs),
}

#[derive(ClapArgs, Debug)]
#[command(group(ArgGroup::new("inputs").required(true).args(["input", "dir"])))]
pub struct CountMirnaArgs {
    /// Parsed bowtie result files
    #[arg(short = 'i', long = "input", num_args = 1..)]
    pub input: Vec<PathBuf>,
    /// Directory with parsed bowtie result files (suffix ".parsed.txt")
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,
    /// Output table
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Minimum quality score of every mismatched base
    #[arg(short = 'q', long = "qscore", default_value_t = mirna::DEFAULT_QSCORE,
        value_parser = clap::value_parser!(u32).range(0..=41))]
    pub qscore: u32,
    /// Number of files counted in parallel
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
    /// Also write the mismatch count and the first two mismatches as separate columns
    #[arg(long = "mismatch-columns", default_value_t = false)]
    pub mismatch_columns: bool,
}

impl From<CountMirnaArgs> for CountOptions {
    fn from(args: CountMirnaArgs) -> Self {
        let inputs = match args.dir {
            Some(dir) => InputSelection::Dir {
                dir,
                suffix: mirna::PARSED_SUFFIX.to_owned(),
            },
            None => InputSelection::Files(args.input),
        };

        CountOptions {
            inputs,
            output: args.output,
            qscore: args.qscore,
            threads: args.threads,
            mismatch_columns: args.mismatch_columns,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ExtractUnmappedArgs {
    /// Input fastq file
    #[arg(short = 'i', long = "fastq")]
    pub fastq: String,
    /// Alignment file with the mapped sequence in the third column
    #[arg(short = 'm', long = "mapped")]
    pub mapped: PathBuf,
    /// Output fastq file for the unmapped reads
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
}

#[derive(ClapArgs, Debug)]
pub struct FilterSeqArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Sequence that kept reads must contain
    #[arg(short = 's', long = "sequence")]
    pub sequence: String,
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
}

#[derive(ClapArgs, Debug)]
pub struct FilterLengthArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Minimum read length, inclusive
    #[arg(short = 'm', long = "min")]
    pub min: usize,
    /// Maximum read length, inclusive
    #[arg(short = 'M', long = "max")]
    pub max: usize,
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
}

#[derive(ClapArgs, Debug)]
pub struct MaskQualArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Bases with a quality score at or below this are masked
    #[arg(short = 'q', long = "quality", default_value_t = 30)]
    pub quality: u8,
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,
}

#[derive(ClapArgs, Debug)]
pub struct RegexScanArgs {
    #[arg(short = 'i', long = "input")]
    pub input: String,
    /// Regex matched against whole read sequences
    #[arg(short = 's', long = "pattern")]
    pub pattern: String,
    /// 1-based position in the pattern to replace with any character
    #[arg(short = 'r', long = "replace")]
    pub replace: Option<usize>,
    /// Output table, stdout if not given
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct MergeTableArgs {
    #[arg(short = 'i', long = "input", num_args = 1.., required = true)]
    pub input: Vec<PathBuf>,
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

pub fn run(args: Args) -> Result<()> {
    use Command::*;
    match args.command {
        CountMirna(a) => mirna::count_mirna(&a.into()),
        ExtractUnmapped(a) => tools::extract_unmapped(&a.fastq, &a.mapped, &a.output, a.threads),
        FilterSeq(a) => {
            tools::filter_by_sequence(&a.input, &a.output, a.sequence.as_bytes(), a.threads)
        }
        FilterLength(a) => tools::filter_by_length(&a.input, &a.output, a.min, a.max, a.threads),
        MaskQual(a) => tools::mask_low_quality(&a.input, &a.output, a.quality, a.threads),
        RegexScan(a) => tools::regex_scan(&a.input, &a.pattern, a.replace, a.output.as_deref()),
        MergeTable(a) => tools::merge_and_lookup(&a.input, &a.output),
    }
}
