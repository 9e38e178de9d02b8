use std::fmt;
use std::sync::Arc;

/// Where a read came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(String),
    Bytes,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Origin::*;
        match self {
            File(file) => write!(f, "file: \"{}\"", file),
            Bytes => write!(f, "bytes"),
        }
    }
}

/// A single fastq record.
#[derive(Debug, Clone)]
pub struct Read {
    name: Vec<u8>,
    seq: Vec<u8>,
    qual: Vec<u8>,
    origin: Arc<Origin>,
    idx: usize,
}

impl Read {
    pub fn from_fastq1(name: &[u8], seq: &[u8], qual: &[u8], origin: Arc<Origin>, idx: usize) -> Self {
        Self {
            name: name.to_owned(),
            seq: seq.to_owned(),
            qual: qual.to_owned(),
            origin,
            idx,
        }
    }

    pub fn to_fastq1(&self) -> (&[u8], &[u8], &[u8]) {
        (&self.name, &self.seq, &self.qual)
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    pub fn qual(&self) -> &[u8] {
        &self.qual
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Index of the record in its input, starting from zero.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Replace every base whose Phred+33 quality score is at most `threshold` with `N`.
    ///
    /// Returns the number of masked bases.
    pub fn mask_qual(&mut self, threshold: u8) -> usize {
        let mut masked = 0;

        for (b, &q) in self.seq.iter_mut().zip(&self.qual) {
            if q.saturating_sub(PHRED_OFFSET) <= threshold {
                *b = b'N';
                masked += 1;
            }
        }

        masked
    }
}

pub const PHRED_OFFSET: u8 = 33;

impl fmt::Display for Read {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "name: {}", String::from_utf8_lossy(&self.name))?;
        writeln!(f, "seq:  {}", String::from_utf8_lossy(&self.seq))?;
        writeln!(f, "qual: {}", String::from_utf8_lossy(&self.qual))?;
        writeln!(f, "from record {} in {}", self.idx, self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(seq: &[u8], qual: &[u8]) -> Read {
        Read::from_fastq1(b"r", seq, qual, Arc::new(Origin::Bytes), 0)
    }

    #[test]
    fn test_mask_qual_inclusive() {
        // '?' = Q30, '@' = Q31, '5' = Q20
        let mut r = read(b"ACGT", b"?@5I");
        assert_eq!(r.mask_qual(30), 2);
        assert_eq!(r.seq(), b"NCNT");
        assert_eq!(r.qual(), b"?@5I");
    }

    #[test]
    fn test_mask_qual_nothing() {
        let mut r = read(b"ACGT", b"IIII");
        assert_eq!(r.mask_qual(30), 0);
        assert_eq!(r.seq(), b"ACGT");
    }
}
