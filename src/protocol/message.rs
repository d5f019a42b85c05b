//! Message Assembler
//!
//! Turns a datagram into a [`DnsMessage`] and back. Section counts read
//! from the header are advisory: they bound how many entries are attempted,
//! never how much is allocated, and are corrected downward when the packet
//! runs out first. On encode every count is recomputed from its section.

use tracing::debug;

use super::error::{DnsError, DnsResult};
use super::header::{Flags, Header, HEADER_SIZE};
use super::question::Question;
use super::record::Record;

/// Initial scratch buffer for encoding
pub const DEFAULT_ENCODE_BUFFER_SIZE: usize = 1024;

/// Largest message the encoder will grow its buffer to
pub const MAX_MESSAGE_SIZE: usize = 65535;

/// A decoded DNS message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsMessage {
    /// Identifier, echoed back in the response
    pub id: u16,

    pub flags: Flags,

    // === Counts ===
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,

    // === Sections ===
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl DnsMessage {
    /// Decode an inbound query.
    ///
    /// Only the question section is read; answer, authority and additional
    /// sections come back empty with zero counts.
    pub fn decode(buf: &[u8]) -> DnsResult<Self> {
        let (header, offset) = Header::decode(buf, 0)?;
        let mut message = Self::from_header(&header);

        let (questions, _) = decode_section(buf, offset, header.qd_count, Question::decode)?;
        for (index, question) in questions.iter().enumerate() {
            debug!(
                "QUERY #{} {} {} class {}",
                index, question.name, question.qtype, question.qclass
            );
        }
        message.questions = questions;
        message.recount();

        Ok(message)
    }

    /// Decode every section, including resource records
    pub fn decode_full(buf: &[u8]) -> DnsResult<Self> {
        let (header, offset) = Header::decode(buf, 0)?;
        let mut message = Self::from_header(&header);

        let (questions, offset) = decode_section(buf, offset, header.qd_count, Question::decode)?;
        let (answers, offset) = decode_section(buf, offset, header.an_count, Record::decode)?;
        let (authorities, offset) = decode_section(buf, offset, header.ns_count, Record::decode)?;
        let (additionals, _) = decode_section(buf, offset, header.ar_count, Record::decode)?;

        message.questions = questions;
        message.answers = answers;
        message.authorities = authorities;
        message.additionals = additionals;
        message.recount();

        Ok(message)
    }

    /// Encode with the default scratch size, growing as needed
    pub fn encode(&self) -> DnsResult<Vec<u8>> {
        self.encode_with_capacity(DEFAULT_ENCODE_BUFFER_SIZE, MAX_MESSAGE_SIZE)
    }

    /// Encode starting from an `initial` byte scratch buffer.
    ///
    /// On overflow the buffer doubles, up to `max` bytes; only a message
    /// that does not fit in `max` fails with [`DnsError::Overflow`]. The
    /// returned bytes are exactly what was written.
    pub fn encode_with_capacity(&self, initial: usize, max: usize) -> DnsResult<Vec<u8>> {
        let mut capacity = initial.max(HEADER_SIZE).min(max);

        loop {
            let mut buf = vec![0u8; capacity];
            match self.encode_into(&mut buf) {
                Ok(len) => {
                    buf.truncate(len);
                    return Ok(buf);
                }
                Err(DnsError::Overflow { .. }) if capacity < max => {
                    capacity = capacity.saturating_mul(2).min(max);
                    debug!("Encode buffer too small, growing to {} bytes", capacity);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Encode into `buf`, returning the number of bytes written
    pub fn encode_into(&self, buf: &mut [u8]) -> DnsResult<usize> {
        let header = Header {
            id: self.id,
            flags: self.flags.pack(),
            qd_count: section_count(self.questions.len(), buf)?,
            an_count: section_count(self.answers.len(), buf)?,
            ns_count: section_count(self.authorities.len(), buf)?,
            ar_count: section_count(self.additionals.len(), buf)?,
        };

        let mut offset = header.encode(buf, 0)?;
        for question in &self.questions {
            offset = question.encode(buf, offset)?;
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            offset = record.encode(buf, offset)?;
        }

        Ok(offset)
    }

    /// Set every count to the length of its section
    pub fn recount(&mut self) {
        self.qd_count = self.questions.len() as u16;
        self.an_count = self.answers.len() as u16;
        self.ns_count = self.authorities.len() as u16;
        self.ar_count = self.additionals.len() as u16;
    }

    fn from_header(header: &Header) -> Self {
        Self {
            id: header.id,
            flags: Flags::unpack(header.flags),
            ..Default::default()
        }
    }
}

/// Decode up to `count` entries.
///
/// Stops early, without error, once the buffer is exhausted or an entry
/// makes no forward progress; the caller recounts from what was parsed.
fn decode_section<T>(
    buf: &[u8],
    mut offset: usize,
    count: u16,
    decode: fn(&[u8], usize) -> DnsResult<(T, usize)>,
) -> DnsResult<(Vec<T>, usize)> {
    let mut entries = Vec::new();

    for index in 0..count {
        if offset >= buf.len() {
            debug!("Header claims {} entries, packet holds {}", count, index);
            break;
        }

        let (entry, next) = decode(buf, offset)?;
        if next == offset {
            debug!("No progress decoding entry {} of {}, stopping", index, count);
            break;
        }

        entries.push(entry);
        offset = next;
    }

    Ok((entries, offset))
}

fn section_count(len: usize, buf: &[u8]) -> DnsResult<u16> {
    u16::try_from(len).map_err(|_| DnsError::Overflow { boundary: buf.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::header::ResponseCode;
    use crate::protocol::record_type::{RecordType, CLASS_IN};

    /// `www.baidu.com.` A IN query with recursion desired
    fn baidu_query() -> Vec<u8> {
        let mut data = vec![0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        data.extend_from_slice(b"\x03www\x05baidu\x03com\x00");
        data.extend_from_slice(&1u16.to_be_bytes()); // A record
        data.extend_from_slice(&1u16.to_be_bytes()); // IN class
        data
    }

    #[test]
    fn test_decode_query() {
        let message = DnsMessage::decode(&baidu_query()).unwrap();

        assert_eq!(message.id, 1);
        assert!(!message.flags.qr);
        assert!(message.flags.rd);
        assert_eq!(message.qd_count, 1);
        assert_eq!(
            message.questions,
            vec![Question::new("www.baidu.com.", RecordType::A, CLASS_IN)]
        );
        assert!(message.answers.is_empty());
    }

    #[test]
    fn test_decode_ignores_records_in_query() {
        let mut data = baidu_query();
        data[7] = 1; // an_count
        data.extend_from_slice(b"\x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x01\x02\x03\x04");

        let message = DnsMessage::decode(&data).unwrap();
        assert_eq!(message.an_count, 0);
        assert!(message.answers.is_empty());

        let full = DnsMessage::decode_full(&data).unwrap();
        assert_eq!(full.an_count, 1);
        assert_eq!(full.answers[0].name, ".");
        assert_eq!(full.answers[0].rdata, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_corrects_inflated_count() {
        let mut data = baidu_query();
        data[4] = 0xFF; // qd_count = 0xFF01

        let message = DnsMessage::decode(&data).unwrap();
        assert_eq!(message.qd_count, 1);
        assert_eq!(message.questions.len(), 1);
    }

    #[test]
    fn test_decode_header_only() {
        let data = [0xAB, 0xCD, 0x01, 0x00, 0x00, 0x03, 0, 0, 0, 0, 0, 0];
        let message = DnsMessage::decode(&data).unwrap();

        assert_eq!(message.id, 0xABCD);
        assert_eq!(message.qd_count, 0);
        assert!(message.questions.is_empty());
    }

    #[test]
    fn test_decode_short_header() {
        assert_eq!(
            DnsMessage::decode(&[0x00, 0x01, 0x01]),
            Err(DnsError::Overflow { boundary: 3 })
        );
    }

    #[test]
    fn test_decode_truncated_name() {
        let data = baidu_query();
        let cut = HEADER_SIZE + 7; // inside "baidu"

        assert_eq!(
            DnsMessage::decode(&data[..cut]),
            Err(DnsError::Overflow { boundary: cut })
        );
    }

    #[test]
    fn test_decode_compressed_question() {
        let mut data = baidu_query();
        data.truncate(HEADER_SIZE);
        data.extend_from_slice(b"\xc0\x0c\x00\x01\x00\x01");

        assert_eq!(
            DnsMessage::decode(&data),
            Err(DnsError::CompressionUnsupported { offset: HEADER_SIZE })
        );
    }

    #[test]
    fn test_encode_reproduces_query() {
        let data = baidu_query();
        let message = DnsMessage::decode(&data).unwrap();
        assert_eq!(message.encode().unwrap(), data);
    }

    #[test]
    fn test_encode_recomputes_counts() {
        let mut message = DnsMessage::decode(&baidu_query()).unwrap();
        message.qd_count = 9;
        message.an_count = 9;
        message
            .answers
            .push(Record::new("www.baidu.com.", RecordType::A, CLASS_IN, 60, vec![1, 1, 1, 1]));

        let wire = message.encode().unwrap();
        let (header, _) = Header::decode(&wire, 0).unwrap();
        assert_eq!(header.qd_count, 1);
        assert_eq!(header.an_count, 1);
        assert_eq!(header.ns_count, 0);
        assert_eq!(header.ar_count, 0);
    }

    #[test]
    fn test_full_roundtrip() {
        let mut message = DnsMessage {
            id: 0xBEEF,
            flags: Flags {
                qr: true,
                opcode: 2,
                aa: true,
                tc: false,
                rd: true,
                ra: false,
                rcode: ResponseCode::NameError,
            },
            questions: vec![
                Question::new("a.example.", RecordType::A, CLASS_IN),
                Question::new("b.example.", RecordType::TXT, CLASS_IN),
            ],
            answers: vec![Record::new("a.example.", RecordType::A, CLASS_IN, 60, vec![1, 2, 3, 4])],
            authorities: vec![Record::new("ns.example.", RecordType::AAAA, CLASS_IN, 7, vec![0; 16])],
            additionals: vec![
                Record::new("b.example.", RecordType::TXT, CLASS_IN, 1, b"\x03abc".to_vec()),
                Record::new(".", RecordType::TXT, CLASS_IN, 0, Vec::new()),
            ],
            ..Default::default()
        };
        message.recount();

        let wire = message.encode().unwrap();
        assert_eq!(DnsMessage::decode_full(&wire).unwrap(), message);
    }

    #[test]
    fn test_encode_unsupported_record_fails() {
        let mut message = DnsMessage::decode(&baidu_query()).unwrap();
        message
            .answers
            .push(Record::new("www.baidu.com.", RecordType::SOA, CLASS_IN, 60, vec![0; 4]));

        assert_eq!(
            message.encode(),
            Err(DnsError::UnsupportedRecordType(RecordType::SOA))
        );
    }

    #[test]
    fn test_encode_grows_buffer() {
        let mut message = DnsMessage::default();
        for i in 0..40u8 {
            message.answers.push(Record::new(
                format!("host-{}.example.", i),
                RecordType::TXT,
                CLASS_IN,
                60,
                vec![i; 200],
            ));
        }

        let wire = message.encode_with_capacity(64, MAX_MESSAGE_SIZE).unwrap();
        assert!(wire.len() > DEFAULT_ENCODE_BUFFER_SIZE);
        assert_eq!(DnsMessage::decode_full(&wire).unwrap().answers, message.answers);

        assert_eq!(
            message.encode_with_capacity(64, 512),
            Err(DnsError::Overflow { boundary: 512 })
        );
    }
}
