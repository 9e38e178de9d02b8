use std::ops::RangeBounds;

use crate::iter::*;

/// Keep only the reads whose sequence length is within the bounds.
pub struct LengthInBoundsReads<R: Reads, B: RangeBounds<usize> + Send + Sync> {
    reads: R,
    bounds: B,
}

impl<R: Reads, B: RangeBounds<usize> + Send + Sync> LengthInBoundsReads<R, B> {
    pub fn new(reads: R, bounds: B) -> Self {
        Self { reads, bounds }
    }
}

impl<R: Reads, B: RangeBounds<usize> + Send + Sync> Reads for LengthInBoundsReads<R, B> {
    fn next_chunk(&self) -> Result<Vec<Read>> {
        let mut reads = self.reads.next_chunk()?;

        while !reads.is_empty() {
            reads.retain(|r| self.bounds.contains(&r.len()));

            if !reads.is_empty() {
                break;
            }

            reads = self.reads.next_chunk()?;
        }

        Ok(reads)
    }

    fn finish(&mut self) -> Result<()> {
        self.reads.finish()
    }
}
