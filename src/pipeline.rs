// pipeline.rs - 批量读取、识别、改写并按输入顺序写出

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, trace, warn};

use crate::error::{Result, SplitError};
use crate::io::{create_writer, open_reader};
use crate::matcher::{MatchResult, PatternMatcher};
use crate::protocol::ProtocolRegistry;
use crate::record::{same_fragment, FastqRecord, FastxReader};
use crate::transform::{BoundaryTransformer, Direction, RestoreSpan};

/// Batches in flight between two pipeline stages
const CHANNEL_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub r1_input: PathBuf,
    pub r2_input: PathBuf,
    pub r1_output: PathBuf,
    pub r2_output: PathBuf,
    pub direction: Direction,
    pub restore_span: RestoreSpan,
    pub threads: usize,
    pub batch_size: usize,
    pub compression_level: u32,
    /// Fail instead of warning when R1 and R2 hold different record counts
    pub strict_pairing: bool,
}

impl SplitConfig {
    pub fn new(r1_input: PathBuf, r2_input: PathBuf, r1_output: PathBuf, r2_output: PathBuf) -> Self {
        SplitConfig {
            r1_input,
            r2_input,
            r1_output,
            r2_output,
            direction: Direction::Split,
            restore_span: RestoreSpan::CutPoint,
            threads: 4,
            batch_size: 200_000,
            compression_level: 1,
            strict_pairing: false,
        }
    }
}

/// Counts gathered over one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pairs: u64,
    pub classified: u64,
    pub passed_through: u64,
    /// Classified pairs per protocol name
    pub per_protocol: BTreeMap<String, u64>,
    /// Pairs whose R1 and R2 names differ after removing `/1` and `/2`
    pub id_mismatches: u64,
    /// R1 records with no R2 mate, dropped
    pub r1_surplus: u64,
    /// R2 records with no R1 mate, dropped
    pub r2_surplus: u64,
}

struct Batch {
    index: u64,
    r1: Vec<FastqRecord>,
    r2: Vec<FastqRecord>,
}

struct ProcessedBatch {
    index: u64,
    r1: Vec<FastqRecord>,
    r2: Vec<FastqRecord>,
    per_protocol: BTreeMap<String, u64>,
    passed_through: u64,
    id_mismatches: u64,
}

#[derive(Default)]
struct ReadTotals {
    pairs: u64,
    r1_surplus: u64,
    r2_surplus: u64,
}

/// Classify one pair and, when a protocol matched, move bases across the
/// R1/R2 boundary at its cut point. Unrecognized pairs are left untouched.
pub fn process_record_pair<'r>(
    matcher: &PatternMatcher<'r>,
    transformer: &BoundaryTransformer,
    r1: &mut FastqRecord,
    r2: &mut FastqRecord,
) -> MatchResult<'r> {
    let result = matcher.classify(&r1.sequence);
    match result.cut_point() {
        Some(cut_point) => transformer.apply(r1, r2, cut_point),
        None => trace!("{}: no protocol matched, passing through", String::from_utf8_lossy(r1.name())),
    }
    result
}

fn process_batch(matcher: &PatternMatcher<'_>, transformer: &BoundaryTransformer, batch: Batch) -> ProcessedBatch {
    let Batch { index, mut r1, mut r2 } = batch;
    let mut per_protocol = BTreeMap::new();
    let mut passed_through = 0;
    let mut id_mismatches = 0;

    for (a, b) in r1.iter_mut().zip(r2.iter_mut()) {
        if !same_fragment(a, b) {
            id_mismatches += 1;
            debug!(
                "Read names differ: '{}' vs '{}'",
                String::from_utf8_lossy(a.name()),
                String::from_utf8_lossy(b.name())
            );
        }
        match process_record_pair(matcher, transformer, a, b) {
            MatchResult::Classified { protocol, .. } => *per_protocol.entry(protocol.to_string()).or_insert(0) += 1,
            MatchResult::Unrecognized => passed_through += 1,
        }
    }

    ProcessedBatch { index, r1, r2, per_protocol, passed_through, id_mismatches }
}

fn join<T>(handle: JoinHandle<Result<T>>, name: &str) -> Result<T> {
    handle.join().map_err(|_| SplitError::Pipeline(format!("{name} thread panicked")))?
}

fn spawn_reader(config: &SplitConfig, batch_tx: Sender<Batch>) -> JoinHandle<Result<ReadTotals>> {
    let r1_input = config.r1_input.clone();
    let r2_input = config.r2_input.clone();
    let batch_size = config.batch_size.max(1);

    thread::spawn(move || -> Result<ReadTotals> {
        let mut r1_reader = FastxReader::new(open_reader(&r1_input)?);
        let mut r2_reader = FastxReader::new(open_reader(&r2_input)?);
        let mut totals = ReadTotals::default();
        let mut index = 0;

        loop {
            let mut r1_batch = r1_reader.read_batch(batch_size)?;
            let mut r2_batch = r2_reader.read_batch(batch_size)?;

            let paired = r1_batch.len().min(r2_batch.len());
            let exhausted = paired < batch_size;
            let r1_extra = (r1_batch.len() - paired) as u64;
            let r2_extra = (r2_batch.len() - paired) as u64;
            r1_batch.truncate(paired);
            r2_batch.truncate(paired);

            if paired > 0 {
                let before = totals.pairs;
                totals.pairs += paired as u64;
                if totals.pairs / 1_000_000 > before / 1_000_000 {
                    debug!("Read {} record pairs...", totals.pairs);
                }
                if batch_tx.send(Batch { index, r1: r1_batch, r2: r2_batch }).is_err() {
                    debug!("Batch channel closed, stopping reader");
                    break;
                }
                index += 1;
            }

            if exhausted {
                // one stream ended; whatever is left in the other has no mate
                totals.r1_surplus = r1_extra + r1_reader.count_remaining()?;
                totals.r2_surplus = r2_extra + r2_reader.count_remaining()?;
                break;
            }
        }

        debug!("Finished reading {} record pairs", totals.pairs);
        Ok(totals)
    })
}

fn spawn_writer(path: PathBuf, level: u32, rx: Receiver<Vec<FastqRecord>>) -> JoinHandle<Result<()>> {
    thread::spawn(move || -> Result<()> {
        let mut writer = create_writer(&path, level)?;
        let mut buffer = Vec::with_capacity(1 << 20); // 1MB buffer
        while let Ok(batch) = rx.recv() {
            buffer.clear();
            for record in &batch {
                record.write_to_bytes(&mut buffer);
            }
            writer.write_all(&buffer)?;
        }
        writer.flush()?;
        Ok(())
    })
}

/// Run the whole split or restore over a pair of files.
///
/// Batches are processed by `config.threads` workers but written strictly in
/// input order. When one input runs out before the other, the unmatched
/// records are dropped with a warning, or the run fails with
/// [`SplitError::StreamLengthMismatch`] under `strict_pairing`.
pub fn run(config: &SplitConfig, registry: Arc<ProtocolRegistry>) -> Result<RunSummary> {
    let transformer = BoundaryTransformer::new(config.direction).with_restore_span(config.restore_span);

    let (batch_tx, batch_rx) = bounded::<Batch>(CHANNEL_CAPACITY);
    let (output_tx, output_rx) = bounded::<ProcessedBatch>(CHANNEL_CAPACITY);
    let (r1_tx, r1_rx) = bounded::<Vec<FastqRecord>>(CHANNEL_CAPACITY);
    let (r2_tx, r2_rx) = bounded::<Vec<FastqRecord>>(CHANNEL_CAPACITY);

    let reader_handle = spawn_reader(config, batch_tx);

    let mut processing_handles = Vec::new();
    for _ in 0..config.threads.max(1) {
        let rx = batch_rx.clone();
        let tx = output_tx.clone();
        let registry = Arc::clone(&registry);
        processing_handles.push(thread::spawn(move || -> Result<()> {
            let matcher = PatternMatcher::new(&registry);
            while let Ok(batch) = rx.recv() {
                if tx.send(process_batch(&matcher, &transformer, batch)).is_err() {
                    break;
                }
            }
            Ok(())
        }));
    }
    drop(batch_rx);
    drop(output_tx);

    // 按批次编号恢复输入顺序，再分发到各个写入线程
    let dist_handle = thread::spawn(move || -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut pending = BTreeMap::new();
        let mut next = 0u64;

        while let Ok(processed) = output_rx.recv() {
            pending.insert(processed.index, processed);
            while let Some(ready) = pending.remove(&next) {
                for (name, count) in ready.per_protocol {
                    summary.classified += count;
                    *summary.per_protocol.entry(name).or_insert(0) += count;
                }
                summary.passed_through += ready.passed_through;
                summary.id_mismatches += ready.id_mismatches;
                r1_tx
                    .send(ready.r1)
                    .map_err(|_| SplitError::Pipeline("R1 writer stopped early".to_string()))?;
                r2_tx
                    .send(ready.r2)
                    .map_err(|_| SplitError::Pipeline("R2 writer stopped early".to_string()))?;
                next += 1;
            }
        }
        if !pending.is_empty() {
            return Err(SplitError::Pipeline(format!("batch {next} never arrived from the workers")));
        }
        Ok(summary)
    });

    let r1_writer_handle = spawn_writer(config.r1_output.clone(), config.compression_level, r1_rx);
    let r2_writer_handle = spawn_writer(config.r2_output.clone(), config.compression_level, r2_rx);

    let read_result = join(reader_handle, "reader");
    let worker_results: Vec<Result<()>> =
        processing_handles.into_iter().map(|h| join(h, "processing")).collect();
    let dist_result = join(dist_handle, "distribution");
    let r1_written = join(r1_writer_handle, "R1 writer");
    let r2_written = join(r2_writer_handle, "R2 writer");

    r1_written?;
    r2_written?;
    let totals = read_result?;
    for result in worker_results {
        result?;
    }
    let mut summary = dist_result?;

    summary.pairs = totals.pairs;
    summary.r1_surplus = totals.r1_surplus;
    summary.r2_surplus = totals.r2_surplus;

    if summary.id_mismatches > 0 {
        warn!("{} read pairs have different R1/R2 names; streams may be out of sync", summary.id_mismatches);
    }
    if summary.r1_surplus > 0 || summary.r2_surplus > 0 {
        if config.strict_pairing {
            return Err(SplitError::StreamLengthMismatch {
                paired: summary.pairs,
                r1_surplus: summary.r1_surplus,
                r2_surplus: summary.r2_surplus,
            });
        }
        warn!(
            "R1 and R2 have different record counts: processed {} pairs, dropped {} R1 and {} R2 records without a mate",
            summary.pairs, summary.r1_surplus, summary.r2_surplus
        );
    }

    Ok(summary)
}
