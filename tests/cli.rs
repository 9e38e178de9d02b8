use clap::Parser;

use std::fs;
use std::path::Path;

use srnakit::cli::{run, Args};
use srnakit::*;

const READS: &str = "@r1
TGAGGTAGTAGGTTGTATAGTT
+
IIIIIIIIIIIIIIIIIIIIII
@r2
TAGCTTATCAGACTGATGTTGAAAAAAAAAAA
+
IIIIIIIIIIIIIIIIIIIIII##########
@r3
AGGTAGTAGGTTGTATAGTT
+
IIIII+++++IIIIIIIIII
";

fn run_args(args: &[&str]) -> errors::Result<()> {
    let mut argv = vec!["srnakit"];
    argv.extend_from_slice(args);
    run(Args::try_parse_from(argv).unwrap())
}

fn seqs(file: &Path) -> Vec<String> {
    iter_fastq1(file.to_str().unwrap())
        .unwrap()
        .run_collect_reads()
        .unwrap()
        .iter()
        .map(|r| String::from_utf8(r.seq().to_vec()).unwrap())
        .collect()
}

#[test]
fn filter_length_gz() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fastq");
    let output = dir.path().join("len.fastq.gz");
    fs::write(&input, READS).unwrap();

    run_args(&[
        "filter-length",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-m",
        "20",
        "-M",
        "22",
    ])
    .unwrap();

    assert_eq!(
        seqs(&output),
        vec!["TGAGGTAGTAGGTTGTATAGTT", "AGGTAGTAGGTTGTATAGTT"]
    );
}

#[test]
fn filter_seq_and_mask() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fastq");
    let filtered = dir.path().join("filtered.fastq");
    let masked = dir.path().join("masked.fastq");
    fs::write(&input, READS).unwrap();

    run_args(&[
        "filter-seq",
        "-i",
        input.to_str().unwrap(),
        "-o",
        filtered.to_str().unwrap(),
        "-s",
        "GTAGTAGG",
    ])
    .unwrap();
    assert_eq!(seqs(&filtered).len(), 2);

    run_args(&[
        "mask-qual",
        "-i",
        filtered.to_str().unwrap(),
        "-o",
        masked.to_str().unwrap(),
        "-q",
        "10",
    ])
    .unwrap();
    assert_eq!(
        seqs(&masked),
        vec!["TGAGGTAGTAGGTTGTATAGTT", "AGGTANNNNNTTGTATAGTT"]
    );
}

#[test]
fn extract_unmapped() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fastq");
    let mapped = dir.path().join("mapped.txt");
    let output = dir.path().join("unmapped.fastq");
    fs::write(&input, READS).unwrap();
    fs::write(
        &mapped,
        "r1\t+\tTGAGGTAGTAGGTTGTATAGTT#1\nr3\t+\tAGGTAGTAGGTTGTATAGTT#1\n",
    )
    .unwrap();

    run_args(&[
        "extract-unmapped",
        "-i",
        input.to_str().unwrap(),
        "-m",
        mapped.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(seqs(&output), vec!["TAGCTTATCAGACTGATGTTGAAAAAAAAAAA"]);
}

#[test]
fn regex_scan_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.fastq");
    let output = dir.path().join("scan.tsv");
    fs::write(&input, READS).unwrap();

    run_args(&[
        "regex-scan",
        "-i",
        input.to_str().unwrap(),
        "-s",
        "TGAGGTAGTAGGTTGTATAGTT",
        "-r",
        "1",
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "pattern\tlength\tmatch_count\tremained_reads");
    assert_eq!(lines[1], ".GAGGTAGTAGGTTGTATAGTT\t22\t1\t2");
    assert_eq!(lines[2], "GAGGTAGTAGGTTGTATAGTT\t21\t0\t2");
    assert_eq!(lines[3], "AGGTAGTAGGTTGTATAGTT\t20\t1\t1");
    assert_eq!(lines.len(), 23);
}

#[test]
fn merge_table() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.counts.txt");
    let b = dir.path().join("b.counts.txt");
    let output = dir.path().join("merged.tsv");
    fs::write(&a, "20 5\n22 1\n").unwrap();
    fs::write(&b, "21 3\n22 2\n").unwrap();

    run_args(&[
        "merge-table",
        "-i",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "value\ta\tb\n20\t5\t0\n21\t0\t3\n22\t1\t2\n"
    );

    let res = run_args(&[
        "merge-table",
        "-i",
        a.to_str().unwrap(),
        a.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(matches!(res, Err(errors::Error::DuplicateInput(_))));
}
