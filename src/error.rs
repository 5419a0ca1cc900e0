use thiserror::Error;

/// Convenience result type for extraction and validation operations.
pub type EtlResult<T> = Result<T, EtlError>;

/// Error type shared across extraction and validation.
///
/// Source errors form a closed taxonomy so callers can pattern-match on the
/// failure kind instead of inspecting a catch-all. None of these are fatal:
/// the extractor converts them into an absent dataset, the validator into an
/// unmodified column, and the failure is reported through the log sink.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The source file does not exist.
    #[error("source file not found")]
    SourceMissing,

    /// The source file exists but contains no parseable content (not even a
    /// header row). A file with headers and zero data rows is *not* this
    /// error; it reads as an empty table.
    #[error("source has no parseable content")]
    SourceEmpty,

    /// The parser could not interpret the content as tabular data
    /// (ragged rows, undecodable bytes, ...).
    #[error("malformed tabular data: {message}")]
    SourceMalformed { message: String },

    /// Any other failure while reading the source.
    #[error("unexpected read error: {0}")]
    SourceUnexpected(#[from] std::io::Error),

    /// The coercion mechanism itself failed (not a per-value parse failure):
    /// the rebuilt column would violate the table's row-count invariant.
    #[error("conversion of column '{column}' failed: {message}")]
    CoerceStructural { column: String, message: String },
}
