use rustc_hash::FxHashMap;

use std::cmp::Ordering;
use std::io::{self, Write};

use crate::mirna::mismatch::*;

/// Grouping key of a counted read: the miRNA and its quality-free mismatch signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountKey {
    pub mirna: String,
    pub signature: Signature,
}

pub type PerFileCounts = FxHashMap<CountKey, u64>;

/// Suffix of the per-miRNA total columns.
pub const TOTAL_SUFFIX: &str = " (PM+1MM+2MM)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub key: CountKey,
    /// One count per sample, zero if the key was not seen in that sample.
    pub counts: Vec<u64>,
    /// Per sample sum of `counts` over all rows with the same miRNA.
    pub totals: Vec<u64>,
}

impl TableRow {
    pub fn mismatch_count(&self) -> usize {
        self.key.signature.mismatch_count()
    }

    fn cmp_sort_key(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.key, &other.key);
        let (a1, b1) = (a.signature.nth(0), b.signature.nth(0));
        let (a2, b2) = (a.signature.nth(1), b.signature.nth(1));

        a.mirna
            .cmp(&b.mirna)
            .then(self.mismatch_count().cmp(&other.mismatch_count()))
            .then(a1.0.cmp(&b1.0))
            .then(a1.1.cmp(b1.1))
            .then(a2.0.cmp(&b2.0))
            .then(a2.1.cmp(b2.1))
            // only differs past the second mismatch
            .then(a.signature.cmp(&b.signature))
    }
}

/// Counts of every sample merged into one sorted table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTable {
    samples: Vec<String>,
    rows: Vec<TableRow>,
}

impl MergedTable {
    /// Outer merge the per-file counts, one sample per file.
    ///
    /// Rows are sorted by miRNA, number of mismatches, then position and base of the first two
    /// mismatches, so the result does not depend on the order the counts were produced in.
    pub fn merge(samples: Vec<String>, per_file: &[PerFileCounts]) -> Self {
        assert_eq!(samples.len(), per_file.len());
        let n = samples.len();

        let mut merged: FxHashMap<&CountKey, Vec<u64>> = FxHashMap::default();

        for (i, counts) in per_file.iter().enumerate() {
            for (key, &c) in counts {
                merged.entry(key).or_insert_with(|| vec![0; n])[i] += c;
            }
        }

        let mut totals: FxHashMap<&str, Vec<u64>> = FxHashMap::default();

        for (key, counts) in &merged {
            let t = totals.entry(key.mirna.as_str()).or_insert_with(|| vec![0; n]);
            t.iter_mut().zip(counts).for_each(|(t, c)| *t += c);
        }

        let mut rows = merged
            .iter()
            .map(|(&key, counts)| TableRow {
                key: key.clone(),
                counts: counts.clone(),
                totals: totals[key.mirna.as_str()].clone(),
            })
            .collect::<Vec<_>>();

        rows.sort_by(|a, b| a.cmp_sort_key(b));

        Self { samples, rows }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Write the table as tab-separated values with a header line.
    ///
    /// Columns are `miRNA name`, `pos:mut`, optionally `mm_count`, `pos1`, `mut1`, `pos2`,
    /// `mut2`, then one count column per sample followed by one total column per sample.
    pub fn write_tsv(&self, mut writer: impl Write, mismatch_columns: bool) -> io::Result<()> {
        write!(writer, "miRNA name\tpos:mut")?;
        if mismatch_columns {
            write!(writer, "\tmm_count\tpos1\tmut1\tpos2\tmut2")?;
        }
        for s in &self.samples {
            write!(writer, "\t{}", s)?;
        }
        for s in &self.samples {
            write!(writer, "\t{}{}", s, TOTAL_SUFFIX)?;
        }
        writeln!(writer)?;

        for row in &self.rows {
            let sig = &row.key.signature;
            write!(writer, "{}\t{}", row.key.mirna, sig.display_name())?;

            if mismatch_columns {
                let (p1, m1) = sig.nth(0);
                let (p2, m2) = sig.nth(1);
                write!(writer, "\t{}\t{}\t{}\t{}\t{}", sig.mismatch_count(), p1, m1, p2, m2)?;
            }

            for c in row.counts.iter().chain(&row.totals) {
                write!(writer, "\t{}", c)?;
            }
            writeln!(writer)?;
        }

        writer.flush()
    }
}
