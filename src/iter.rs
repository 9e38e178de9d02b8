use std::marker::{Send, Sync};
use std::ops::RangeBounds;
use std::path::Path;
use std::thread;

pub use crate::errors::*;
pub use crate::read::*;

pub mod collect_fastq_reads;
pub use collect_fastq_reads::*;

pub mod length_in_bounds_reads;
pub use length_in_bounds_reads::*;

pub mod retain_reads;
pub use retain_reads::*;

pub mod count_reads;
pub use count_reads::*;

pub mod mask_qual_reads;
pub use mask_qual_reads::*;

/// A chunked stream of reads.
///
/// Operations are chained like iterator adapters and nothing happens until
/// [`run()`](Reads::run) or [`run_with_threads()`](Reads::run_with_threads) is called.
/// An empty chunk signals the end of the stream.
pub trait Reads: Send + Sync {
    fn run(mut self) -> Result<()>
    where
        Self: Sized,
    {
        while !self.next_chunk()?.is_empty() {}
        self.finish()
    }

    /// Pull chunks from multiple threads. The order of reads across chunks is not preserved.
    fn run_with_threads(mut self, threads: usize) -> Result<()>
    where
        Self: Sized,
    {
        if threads == 0 {
            return Err(Error::InvalidArgument(
                "Number of threads must be greater than zero".to_owned(),
            ));
        }

        let reads = &self;

        thread::scope(|s| {
            let handles = (0..threads)
                .map(|_| {
                    s.spawn(move || -> Result<()> {
                        while !reads.next_chunk()?.is_empty() {}
                        Ok(())
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .try_for_each(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
        })?;

        self.finish()
    }

    fn run_collect_reads(mut self) -> Result<Vec<Read>>
    where
        Self: Sized,
    {
        let mut res = Vec::new();

        loop {
            let reads = self.next_chunk()?;

            if reads.is_empty() {
                break;
            }

            res.extend(reads);
        }

        self.finish()?;
        Ok(res)
    }

    /// Count the reads that reach this point and pass the total to `func` when finished.
    #[must_use]
    fn count<F>(self, func: F) -> CountReads<Self, F>
    where
        F: Fn(usize) + Send + Sync,
        Self: Sized,
    {
        CountReads::new(self, func)
    }

    #[must_use]
    fn retain<F>(self, func: F) -> RetainReads<Self, F>
    where
        F: Fn(&Read) -> bool + Send + Sync,
        Self: Sized,
    {
        RetainReads::new(self, func)
    }

    #[must_use]
    fn length_in_bounds<B>(self, bounds: B) -> LengthInBoundsReads<Self, B>
    where
        B: RangeBounds<usize> + Send + Sync,
        Self: Sized,
    {
        LengthInBoundsReads::new(self, bounds)
    }

    #[must_use]
    fn mask_qual(self, threshold: u8) -> MaskQualReads<Self>
    where
        Self: Sized,
    {
        MaskQualReads::new(self, threshold)
    }

    fn collect_fastq1(self, file: impl AsRef<Path>) -> Result<CollectFastqReads<Self>>
    where
        Self: Sized,
    {
        CollectFastqReads::new(self, file)
    }

    #[must_use]
    fn boxed<'a>(self) -> Box<dyn Reads + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    fn next_chunk(&self) -> Result<Vec<Read>>;

    fn finish(&mut self) -> Result<()>;
}

impl<R: Reads + ?Sized> Reads for Box<R> {
    fn next_chunk(&self) -> Result<Vec<Read>> {
        (**self).next_chunk()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::fastq::*;

    use super::*;

    const FASTQ: &[u8] = b"@r1\nACGTACGT\n+\nIIIIIIII\n@r2\nAC\n+\nII\n@r3\nTTTTT\n+\n#####\n";

    #[test]
    fn test_chain() {
        let reads = iter_fastq1_bytes(FASTQ)
            .unwrap()
            .length_in_bounds(3..)
            .mask_qual(2)
            .run_collect_reads()
            .unwrap();

        assert_eq!(reads.len(), 2);
        assert_eq!(reads[0].seq(), b"ACGTACGT");
        assert_eq!(reads[1].seq(), b"NNNNN");
    }

    #[test]
    fn test_run_with_threads_counts_everything() {
        let n = Arc::new(AtomicUsize::new(0));
        let m = Arc::clone(&n);
        iter_fastq1_bytes(FASTQ)
            .unwrap()
            .retain(|r| r.len() > 2)
            .count(move |c| m.store(c, Ordering::Relaxed))
            .run_with_threads(3)
            .unwrap();

        assert_eq!(n.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_zero_threads() {
        let res = iter_fastq1_bytes(FASTQ).unwrap().run_with_threads(0);
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_boxed() {
        let reads = iter_fastq1_bytes(FASTQ)
            .unwrap()
            .boxed()
            .retain(|r| r.seq().starts_with(b"T"))
            .run_collect_reads()
            .unwrap();
        assert_eq!(reads.len(), 1);
        assert_eq!(reads[0].name(), b"r3");
    }
}
