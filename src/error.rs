//! Error types for layout parsing, protocol configuration and record I/O.

use thiserror::Error;

/// Result type alias for splitter operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors raised while building the protocol tables or streaming records.
///
/// Configuration variants are raised before the first record is read.
/// A read pair that matches no protocol is not an error.
#[derive(Error, Debug)]
pub enum SplitError {
    /// A layout string could not be parsed into segments
    #[error("Malformed layout '{pattern}': {reason}")]
    MalformedLayoutSpec {
        /// The offending layout string
        pattern: String,
        /// What was wrong with it
        reason: String,
    },

    /// The protocol tables disagree with each other or with their layouts
    #[error("Protocol configuration fault for '{protocol}': {reason}")]
    ConfigurationIntegrity {
        /// Protocol the fault was found on
        protocol: String,
        /// Explanation of the inconsistency
        reason: String,
    },

    /// A protocol name that is not in the registry
    #[error("Unknown protocol '{0}'")]
    UnknownProtocol(String),

    /// R1 and R2 did not hold the same number of records
    #[error(
        "R1 and R2 record counts differ: {paired} pairs processed, \
         {r1_surplus} extra R1 and {r2_surplus} extra R2 records dropped"
    )]
    StreamLengthMismatch {
        /// Pairs that were processed
        paired: u64,
        /// R1 records without an R2 mate
        r1_surplus: u64,
        /// R2 records without an R1 mate
        r2_surplus: u64,
    },

    /// A FASTQ/FASTA record could not be parsed
    #[error("Malformed record #{record}: {reason}")]
    MalformedRecord {
        /// 1-based index of the record being parsed
        record: u64,
        /// Explanation of the problem
        reason: String,
    },

    /// A pipeline thread failed or a channel closed early
    #[error("Pipeline failure: {0}")]
    Pipeline(String),

    /// Standard I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Protocol table could not be deserialized
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
