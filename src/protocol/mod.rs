//! DNS Wire Protocol
//!
//! Hand-written codec for the subset of RFC 1035 §4 this responder speaks:
//! the 12-byte header, questions, and resource records with A, AAAA and
//! TXT payloads.
//!
//! ## Layers
//!
//! ```text
//! message   ── header, question, record
//! question  ── name, wire
//! record    ── name, wire, record_type
//! name      ── wire
//! ```
//!
//! Every function takes a buffer plus offset and returns the new offset, so
//! a truncated or malformed packet surfaces as a [`DnsError`] at the exact
//! field that failed.

mod error;
mod header;
mod message;
mod name;
mod question;
mod record;
mod record_type;
pub mod wire;

pub use error::{DnsError, DnsResult};
pub use header::{Flags, Header, ResponseCode, HEADER_SIZE};
pub use message::{DnsMessage, DEFAULT_ENCODE_BUFFER_SIZE, MAX_MESSAGE_SIZE};
pub use name::{decode_name, encode_name, normalize_name, MAX_LABEL_LEN};
pub use question::Question;
pub use record::Record;
pub use record_type::{RecordType, CLASS_IN};
