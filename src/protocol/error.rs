//! Codec and resolution errors

use super::record_type::RecordType;

/// Result alias used across the wire codec and the resolver
pub type DnsResult<T> = Result<T, DnsError>;

/// Every failure the core can report, as a closed set of kinds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DnsError {
    /// A read or write ran past the end of the buffer.
    /// `boundary` is the buffer length, i.e. the first unreadable offset.
    #[error("Buffer overflow at offset {boundary}")]
    Overflow { boundary: usize },

    #[error("Malformed domain name: {0}")]
    MalformedName(String),

    /// A label pointer (top bits `11`) was found; pointers are never followed
    #[error("Name compression pointer at offset {offset} is not supported")]
    CompressionUnsupported { offset: usize },

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(RecordType),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),
}
