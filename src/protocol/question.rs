//! Question section entries

use super::error::DnsResult;
use super::name::{decode_name, encode_name};
use super::record_type::RecordType;
use super::wire::{decode_u16, encode_u16};

/// A single (name, type, class) query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Dot-terminated name, e.g. `"example.com."`
    pub name: String,
    pub qtype: RecordType,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: RecordType, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    /// Decode a question at `offset`.
    ///
    /// A buffer that ends right after the name (or right after the type)
    /// leaves the missing fields at zero instead of failing, so degenerate
    /// queries still parse.
    pub fn decode(buf: &[u8], offset: usize) -> DnsResult<(Self, usize)> {
        let (name, offset) = decode_name(buf, offset)?;
        let mut question = Self::new(name, RecordType::Unknown(0), 0);
        if offset == buf.len() {
            return Ok((question, offset));
        }

        let (qtype, offset) = decode_u16(buf, offset)?;
        question.qtype = RecordType::from(qtype);
        if offset == buf.len() {
            return Ok((question, offset));
        }

        let (qclass, offset) = decode_u16(buf, offset)?;
        question.qclass = qclass;

        Ok((question, offset))
    }

    pub fn encode(&self, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
        let offset = encode_name(&self.name, buf, offset)?;
        let offset = encode_u16(self.qtype.code(), buf, offset)?;
        encode_u16(self.qclass, buf, offset)
    }
}
