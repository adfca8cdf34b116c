// record.rs - FASTQ/FASTA 记录读写

use std::io::BufRead;
use std::mem;

use seq_io::fasta::Record as _;
use seq_io::fastq::Record as _;
use seq_io::{fasta, fastq};

use crate::error::{Result, SplitError};

/// Phred score given to every base of a record that carries no quality.
pub const DEFAULT_QUALITY: u8 = 30;

/// Offset of the ASCII quality encoding (phred+33).
pub const QUAL_OFFSET: u8 = 33;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// Header line without the leading '@' or '>'
    pub header: Vec<u8>,
    pub sequence: Vec<u8>,
    /// phred+33 encoded, one byte per base
    pub quality: Vec<u8>,
}

impl FastqRecord {
    pub fn new(header: impl Into<Vec<u8>>, sequence: impl Into<Vec<u8>>, quality: impl Into<Vec<u8>>) -> Self {
        FastqRecord {
            header: header.into(),
            sequence: sequence.into(),
            quality: quality.into(),
        }
    }

    /// Record whose quality is the constant [`DEFAULT_QUALITY`].
    pub fn with_default_quality(header: impl Into<Vec<u8>>, sequence: impl Into<Vec<u8>>) -> Self {
        let sequence = sequence.into();
        let quality = vec![DEFAULT_QUALITY + QUAL_OFFSET; sequence.len()];
        FastqRecord { header: header.into(), sequence, quality }
    }

    /// Read name: the header up to the first whitespace.
    pub fn name(&self) -> &[u8] {
        let end = self.header.iter().position(u8::is_ascii_whitespace).unwrap_or(self.header.len());
        &self.header[..end]
    }

    // 直接写入到buffer的方法
    pub fn write_to_bytes(&self, buffer: &mut Vec<u8>) {
        buffer.push(b'@');
        buffer.extend_from_slice(&self.header);
        buffer.push(b'\n');
        buffer.extend_from_slice(&self.sequence);
        buffer.extend_from_slice(b"\n+\n");
        buffer.extend_from_slice(&self.quality);
        buffer.push(b'\n');
    }
}

/// 提取 FASTQ header 的基础 ID（移除 /1 或 /2 后缀）
pub fn extract_base_header(head: &[u8]) -> &[u8] {
    if head.ends_with(b"/1") || head.ends_with(b"/2") { &head[..head.len() - 2] } else { head }
}

/// Whether two mates carry the same read name once `/1` and `/2` are removed.
pub fn same_fragment(r1: &FastqRecord, r2: &FastqRecord) -> bool {
    extract_base_header(r1.name()) == extract_base_header(r2.name())
}

/// Streaming reader for FASTQ and FASTA records.
///
/// The format is taken from the first non-blank byte of the input (`@` or
/// `>`). FASTQ records must be single-line; FASTA sequences may wrap and get
/// a synthesized constant quality. Headers are kept as raw bytes.
pub struct FastxReader<R: BufRead> {
    source: Source<R>,
    /// Records returned so far
    records: u64,
}

enum Source<R: BufRead> {
    Unread(R),
    Fastq(fastq::Reader<R>),
    Fasta(fasta::Reader<R>),
    Exhausted,
}

/// Skip leading blank lines and pick a parser from the first byte.
fn sniff<R: BufRead>(mut reader: R) -> Result<Source<R>> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(Source::Exhausted);
        }
        let blank = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        if blank == buf.len() {
            reader.consume(blank);
            continue;
        }
        let first = buf[blank];
        reader.consume(blank);
        return match first {
            b'@' => Ok(Source::Fastq(fastq::Reader::new(reader))),
            b'>' => Ok(Source::Fasta(fasta::Reader::new(reader))),
            other => Err(SplitError::MalformedRecord {
                record: 1,
                reason: format!("expected '@' or '>' at the start of the input, found '{}'", other.escape_ascii()),
            }),
        };
    }
}

fn fastq_error(record: u64, err: fastq::Error) -> SplitError {
    match err {
        fastq::Error::Io(e) => SplitError::Io(e),
        other => SplitError::MalformedRecord { record, reason: other.to_string() },
    }
}

fn fasta_error(record: u64, err: fasta::Error) -> SplitError {
    match err {
        fasta::Error::Io(e) => SplitError::Io(e),
        other => SplitError::MalformedRecord { record, reason: other.to_string() },
    }
}

impl<R: BufRead> FastxReader<R> {
    pub fn new(reader: R) -> Self {
        FastxReader { source: Source::Unread(reader), records: 0 }
    }

    pub fn read_record(&mut self) -> Result<Option<FastqRecord>> {
        if matches!(self.source, Source::Unread(_)) {
            if let Source::Unread(reader) = mem::replace(&mut self.source, Source::Exhausted) {
                self.source = sniff(reader)?;
            }
        }

        let index = self.records + 1;
        let record = match &mut self.source {
            Source::Fastq(reader) => match reader.next() {
                Some(Ok(rec)) => FastqRecord::new(rec.head(), rec.seq(), rec.qual()),
                Some(Err(e)) => return Err(fastq_error(index, e)),
                None => return Ok(None),
            },
            Source::Fasta(reader) => match reader.next() {
                Some(Ok(rec)) => FastqRecord::with_default_quality(rec.head(), rec.full_seq().into_owned()),
                Some(Err(e)) => return Err(fasta_error(index, e)),
                None => return Ok(None),
            },
            Source::Unread(_) | Source::Exhausted => return Ok(None),
        };
        self.records = index;
        Ok(Some(record))
    }

    pub fn read_batch(&mut self, batch_size: usize) -> Result<Vec<FastqRecord>> {
        let mut batch = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            match self.read_record()? {
                Some(record) => batch.push(record),
                None => break,
            }
        }
        Ok(batch)
    }

    /// Consume the rest of the stream, returning how many records were left.
    pub fn count_remaining(&mut self) -> Result<u64> {
        let mut n = 0;
        while self.read_record()?.is_some() {
            n += 1;
        }
        Ok(n)
    }
}

impl<R: BufRead> Iterator for FastxReader<R> {
    type Item = Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
