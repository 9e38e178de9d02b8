use crate::iter::*;

pub struct RetainReads<R: Reads, F: Fn(&Read) -> bool + Send + Sync> {
    reads: R,
    func: F,
}

impl<R: Reads, F: Fn(&Read) -> bool + Send + Sync> RetainReads<R, F> {
    pub fn new(reads: R, func: F) -> Self {
        Self { reads, func }
    }
}

impl<R: Reads, F: Fn(&Read) -> bool + Send + Sync> Reads for RetainReads<R, F> {
    fn next_chunk(&self) -> Result<Vec<Read>> {
        let mut reads = self.reads.next_chunk()?;

        // keep pulling so that an all-filtered chunk is not mistaken for the end
        while !reads.is_empty() {
            reads.retain(|r| (self.func)(r));

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
