use memchr::{memchr, memchr_iter};
use rustc_hash::FxHashSet;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::fastq::*;
use crate::iter::*;

/// Sequences listed in an alignment file.
///
/// The sequence is the third tab-separated column of each line, cut at the first `#`.
pub fn read_mapped(file: impl AsRef<Path>) -> Result<FxHashSet<Vec<u8>>> {
    let file = file.as_ref();
    let f = File::open(file).map_err(|e| Error::file_io(file, e))?;
    parse_mapped(BufReader::new(f), &file.display().to_string())
}

pub fn parse_mapped(reader: impl BufRead, file: &str) -> Result<FxHashSet<Vec<u8>>> {
    let mut mapped = FxHashSet::default();

    for (i, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);

        let mut tabs = memchr_iter(b'\t', line);
        let (Some(_), Some(start)) = (tabs.next(), tabs.next()) else {
            return Err(Error::MalformedRecord {
                file: file.to_owned(),
                line: i + 1,
                reason: "expected at least three tab-separated fields".to_owned(),
            });
        };
        let field = &line[start + 1..tabs.next().unwrap_or(line.len())];
        let seq = &field[..memchr(b'#', field).unwrap_or(field.len())];

        mapped.insert(seq.to_owned());
    }

    Ok(mapped)
}

/// Write the reads of `fastq` whose sequence does not appear in the alignment file.
pub fn extract_unmapped(
    fastq: &str,
    mapped_file: impl AsRef<Path>,
    output: impl AsRef<Path>,
    threads: usize,
) -> Result<()> {
    let mapped = read_mapped(&mapped_file)?;
    log::info!(
        "Loaded {} mapped sequences from {:?}",
        mapped.len(),
        mapped_file.as_ref()
    );

    let reads = iter_fastq1(fastq)?
        .retain(|r| !mapped.contains(r.seq()))
        .count(|n| log::info!("Found {} unmapped reads in \"{}\"", n, fastq))
        .collect_fastq1(output)?;

    if threads > 1 {
        reads.run_with_threads(threads)
    } else {
        reads.run()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_parse_mapped() {
        let mapped = parse_mapped(
            &b"r1\t+\tACGT#1\t0\nr2\t-\tGGCC\r\nr3\t+\tTTAA#x#y\n"[..],
            "mapped",
        )
        .unwrap();

        assert_eq!(mapped.len(), 3);
        assert!(mapped.contains(&b"ACGT"[..]));
        assert!(mapped.contains(&b"GGCC"[..]));
        assert!(mapped.contains(&b"TTAA"[..]));
    }

    #[test]
    fn test_parse_mapped_malformed() {
        let res = parse_mapped(&b"r1\t+\tACGT\nr2\t+\n"[..], "mapped");
        assert!(matches!(res, Err(Error::MalformedRecord { line: 2, .. })));
    }

    #[test]
    fn test_extract_unmapped() {
        let dir = tempfile::tempdir().unwrap();
        let fastq = dir.path().join("reads.fastq");
        let mapped = dir.path().join("mapped.txt");
        let output = dir.path().join("unmapped.fastq");
        fs::write(&fastq, "@r1\nACGT\n+\nIIII\n@r2\nCCCC\n+\nIIII\n@r3\nACGT\n+\nIIII\n").unwrap();
        fs::write(&mapped, "x\t+\tACGT#5\t0\n").unwrap();

        extract_unmapped(fastq.to_str().unwrap(), &mapped, &output, 1).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "@r2\nCCCC\n+\nIIII\n");
    }
}
