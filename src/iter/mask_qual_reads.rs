use std::sync::atomic::{AtomicUsize, Ordering};

use crate::iter::*;

/// Replace low quality bases with `N`. See [`Read::mask_qual`].
pub struct MaskQualReads<R: Reads> {
    reads: R,
    threshold: u8,
    masked: AtomicUsize,
}

impl<R: Reads> MaskQualReads<R> {
    pub fn new(reads: R, threshold: u8) -> Self {
        Self {
            reads,
            threshold,
            masked: AtomicUsize::new(0),
        }
    }
}

impl<R: Reads> Reads for MaskQualReads<R> {
    fn next_chunk(&self) -> Result<Vec<Read>> {
        let mut reads = self.reads.next_chunk()?;

        let masked = reads
            .iter_mut()
            .map(|r| r.mask_qual(self.threshold))
            .sum::<usize>();
        self.masked.fetch_add(masked, Ordering::Relaxed);

        Ok(reads)
    }

    fn finish(&mut self) -> Result<()> {
        self.reads.finish()?;
        log::info!(
            "Masked {} bases with quality <= {}",
            self.masked.load(Ordering::Relaxed),
            self.threshold
        );
        Ok(())
    }
}
