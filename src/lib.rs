// lib.rs - 库函数
//
// Recognize which library-preparation protocol produced a read pair from the
// structured prefix of R1, then move that prefix boundary between R1 and R2.

pub mod barcodes;
pub mod error;
pub mod io;
pub mod layout;
pub mod matcher;
pub mod pipeline;
pub mod protocol;
pub mod record;
pub mod transform;

pub use error::{Result, SplitError};
pub use layout::{Layout, Segment, SegmentKind};
pub use matcher::{MatchResult, PatternMatcher, UNRECOGNIZED};
pub use pipeline::{process_record_pair, run, RunSummary, SplitConfig};
pub use protocol::{LinkerSpec, ProtocolDefinition, ProtocolRegistry, Whitelist, AUTO};
pub use record::{extract_base_header, FastqRecord, FastxReader, DEFAULT_QUALITY};
pub use transform::{BoundaryTransformer, Direction, RestoreSpan};
