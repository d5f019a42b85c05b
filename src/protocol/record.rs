//! Resource records
//!
//! Layout: name, type (u16), class (u16), TTL (u32), RDATA length (u16),
//! then RDATA. The RDATA length is always derived from the payload, so a
//! record can never claim a length that disagrees with its bytes.

use super::error::{DnsError, DnsResult};
use super::name::{decode_name, encode_name};
use super::question::Question;
use super::record_type::RecordType;
use super::wire::{decode_bytes, decode_u16, decode_u32, encode_bytes, encode_u16, encode_u32};

/// A resource record with type-dependent RDATA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub rtype: RecordType,
    pub class: u16,

    /// Time to live (seconds)
    pub ttl: u32,

    /// Type-specific payload
    pub rdata: Vec<u8>,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        rtype: RecordType,
        class: u16,
        ttl: u32,
        rdata: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            rtype,
            class,
            ttl,
            rdata,
        }
    }

    /// Build the answer to `question` carrying `rdata`
    pub fn answering(question: &Question, ttl: u32, rdata: Vec<u8>) -> Self {
        Self::new(question.name.clone(), question.qtype, question.qclass, ttl, rdata)
    }

    /// Declared RDATA length
    pub fn rd_length(&self) -> usize {
        self.rdata.len()
    }

    /// Encode the record at `offset`.
    ///
    /// RDATA is dispatched on type: A, AAAA and TXT are written verbatim,
    /// anything else fails with [`DnsError::UnsupportedRecordType`].
    pub fn encode(&self, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
        if !self.rtype.has_raw_rdata() {
            return Err(DnsError::UnsupportedRecordType(self.rtype));
        }
        let rd_length = u16::try_from(self.rdata.len())
            .map_err(|_| DnsError::Overflow { boundary: buf.len() })?;

        let offset = encode_name(&self.name, buf, offset)?;
        let offset = encode_u16(self.rtype.code(), buf, offset)?;
        let offset = encode_u16(self.class, buf, offset)?;
        let offset = encode_u32(self.ttl, buf, offset)?;
        let offset = encode_u16(rd_length, buf, offset)?;
        encode_bytes(&self.rdata, buf, offset)
    }

    /// Decode a record at `offset`, mirroring [`Record::encode`]
    pub fn decode(buf: &[u8], offset: usize) -> DnsResult<(Self, usize)> {
        let (name, offset) = decode_name(buf, offset)?;
        let (rtype, offset) = decode_u16(buf, offset)?;
        let (class, offset) = decode_u16(buf, offset)?;
        let (ttl, offset) = decode_u32(buf, offset)?;
        let (rd_length, offset) = decode_u16(buf, offset)?;

        let rtype = RecordType::from(rtype);
        if !rtype.has_raw_rdata() {
            return Err(DnsError::UnsupportedRecordType(rtype));
        }

        let (rdata, offset) = decode_bytes(buf, offset, rd_length as usize)?;
        Ok((Self::new(name, rtype, class, ttl, rdata.to_vec()), offset))
    }
}
