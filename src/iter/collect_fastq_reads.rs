use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::fastq::*;
use crate::iter::*;

pub struct CollectFastqReads<R: Reads> {
    reads: R,
    file: PathBuf,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl<R: Reads> CollectFastqReads<R> {
    /// Write every read that reaches this point to a fastq file, gzipped if it ends with `.gz`.
    pub fn new(reads: R, file: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            reads,
            file: file.as_ref().to_owned(),
            writer: Mutex::new(create_writer(file)?),
        })
    }
}

impl<R: Reads> Reads for CollectFastqReads<R> {
    fn next_chunk(&self) -> Result<Vec<Read>> {
        let reads = self.reads.next_chunk()?;

        // hold the lock for the whole chunk so records from different threads do not interleave
        let mut writer = self.writer.lock().unwrap();

        for read in &reads {
            write_fastq_record(&mut **writer, read.to_fastq1())
                .map_err(|e| Error::file_io(&self.file, e))?;
        }

        Ok(reads)
    }

    fn finish(&mut self) -> Result<()> {
        self.reads.finish()?;
        self.writer
            .get_mut()
            .unwrap()
            .flush()
            .map_err(|e| Error::file_io(&self.file, e))
    }
}
