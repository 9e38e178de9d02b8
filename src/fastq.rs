use needletail::errors::{ParseError, ParseErrorKind};
use needletail::{parse_fastx_file, parse_fastx_reader, FastxReader};

use flate2::{write::GzEncoder, Compression};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::*;
use crate::iter::*;
use crate::read::*;

pub const CHUNK_SIZE: usize = 256;

pub struct Fastq1Reads<'reader> {
    // `None` for an empty input
    reader: Mutex<Option<Box<dyn FastxReader + 'reader>>>,
    origin: Arc<Origin>,
    idx: AtomicUsize,
    chunk_size: usize,
}

impl<'reader> Reads for Fastq1Reads<'reader> {
    fn next_chunk(&self) -> Result<Vec<Read>> {
        let mut res = Vec::with_capacity(self.chunk_size);

        let mut reader = self.reader.lock().unwrap();
        let Some(reader) = reader.as_mut() else {
            return Ok(res);
        };

        for _ in 0..self.chunk_size {
            let Some(record) = reader.next() else {
                break;
            };
            let idx = self.idx.fetch_add(1, Ordering::Relaxed);
            let record = record.map_err(|e| Error::ParseRecord {
                origin: (*self.origin).clone(),
                idx,
                source: Box::new(e),
            })?;
            let Some(qual) = record.qual() else {
                return Err(Error::ParseRecord {
                    origin: (*self.origin).clone(),
                    idx,
                    source: "record has no quality scores, expected fastq".into(),
                });
            };

            res.push(Read::from_fastq1(
                record.id(),
                &record.seq(),
                qual,
                Arc::clone(&self.origin),
                idx,
            ));
        }

        Ok(res)
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Stream reads created from fastq records in an input file, which may be gzipped.
pub fn iter_fastq1(file: impl AsRef<str>) -> Result<Fastq1Reads<'static>> {
    let reader = empty_as_none(parse_fastx_file(file.as_ref())).map_err(|e| Error::FileIo {
        file: file.as_ref().to_owned(),
        source: Box::new(e),
    })?;
    if reader.is_none() {
        log::warn!("Input file \"{}\" is empty", file.as_ref());
    }

    Ok(Fastq1Reads {
        reader: Mutex::new(reader),
        origin: Arc::new(Origin::File(file.as_ref().to_owned())),
        idx: AtomicUsize::new(0),
        chunk_size: CHUNK_SIZE,
    })
}

/// Stream reads created from fastq records in a byte slice.
pub fn iter_fastq1_bytes(bytes: &[u8]) -> Result<Fastq1Reads<'_>> {
    let reader = empty_as_none(parse_fastx_reader(bytes)).map_err(|e| Error::BytesIo(Box::new(e)))?;

    Ok(Fastq1Reads {
        reader: Mutex::new(reader),
        origin: Arc::new(Origin::Bytes),
        idx: AtomicUsize::new(0),
        chunk_size: CHUNK_SIZE,
    })
}

fn empty_as_none<T>(res: std::result::Result<T, ParseError>) -> std::result::Result<Option<T>, ParseError> {
    match res {
        Ok(reader) => Ok(Some(reader)),
        Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Open a buffered writer, gzip compressed if the file name ends with `.gz`.
///
/// Missing parent directories are created.
pub fn create_writer(file: impl AsRef<Path>) -> Result<Box<dyn Write + Send>> {
    let file = file.as_ref();

    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_io(parent, e))?;
    }

    let f = File::create(file).map_err(|e| Error::file_io(file, e))?;

    let writer: Box<dyn Write + Send> = if file.extension().is_some_and(|ext| ext == "gz") {
        Box::new(BufWriter::new(GzEncoder::new(f, Compression::default())))
    } else {
        Box::new(BufWriter::new(f))
    };

    Ok(writer)
}

pub fn write_fastq_record(
    writer: &mut (dyn Write + Send),
    record: (&[u8], &[u8], &[u8]),
) -> std::io::Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(record.0)?;
    writer.write_all(b"\n")?;
    writer.write_all(record.1)?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(record.2)?;
    writer.write_all(b"\n")
}
