//! DNS Request Handler
//!
//! Resolves decoded questions against a static zone and drives the
//! decode → resolve → encode pipeline for one datagram.
//!
//! Answers are produced through a lookup table keyed by record type. A
//! question whose type has no lookup is not an error: the response code
//! becomes NOTIMP and the question goes unanswered. A supported type for a
//! name the zone does not know fails the whole request.

use tracing::{debug, warn};

use crate::config::{ServerConfig, ZoneEntry};
use crate::protocol::{
    normalize_name, DnsError, DnsMessage, DnsResult, Record, RecordType, ResponseCode,
    DEFAULT_ENCODE_BUFFER_SIZE, MAX_MESSAGE_SIZE,
};

/// Default TTL for answer records (seconds)
pub const DEFAULT_TTL: u32 = 60 * 60;

/// Longest single TXT character-string
const MAX_CHARACTER_STRING: usize = 255;

/// Produces RDATA for a name
type Lookup = fn(&DnsHandler, &str) -> DnsResult<Vec<u8>>;

/// Resolver and request pipeline backed by a static zone
#[derive(Debug, Clone)]
pub struct DnsHandler {
    /// Zone entries, names normalised with a trailing dot
    zone: Vec<ZoneEntry>,

    /// TTL for answer records (seconds)
    ttl: u32,

    /// Initial encode scratch size
    encode_buffer_size: usize,

    /// Encode scratch growth limit
    max_message_size: usize,
}

impl DnsHandler {
    /// Create a handler answering for `zone`
    pub fn new(zone: &[ZoneEntry], ttl: u32) -> DnsResult<Self> {
        let zone = zone
            .iter()
            .map(|entry| {
                Ok(ZoneEntry {
                    name: normalize_name(&entry.name)?,
                    ..entry.clone()
                })
            })
            .collect::<DnsResult<Vec<_>>>()?;

        Ok(Self {
            zone,
            ttl,
            encode_buffer_size: DEFAULT_ENCODE_BUFFER_SIZE,
            max_message_size: MAX_MESSAGE_SIZE,
        })
    }

    /// Create a handler from the server configuration
    pub fn from_config(config: &ServerConfig) -> DnsResult<Self> {
        let mut handler = Self::new(&config.zone, config.answer_ttl_secs)?;
        handler.encode_buffer_size = config.encode_buffer_size;
        handler.max_message_size = config.max_message_size;
        Ok(handler)
    }

    /// Process one request datagram into a response datagram.
    ///
    /// Any error means the datagram must be dropped without a reply.
    pub fn handle_request(&self, request: &[u8]) -> DnsResult<Vec<u8>> {
        let mut message = DnsMessage::decode(request)?;
        self.resolve(&mut message)?;
        message.encode_with_capacity(self.encode_buffer_size, self.max_message_size)
    }

    /// Turn a decoded query into a response in place
    pub fn resolve(&self, message: &mut DnsMessage) -> DnsResult<()> {
        message.flags.qr = true;
        message.flags.aa = true;
        message.flags.ra = false;
        message.flags.rcode = ResponseCode::NoError;

        message.answers.clear();
        message.authorities.clear();
        message.additionals.clear();

        for question in &message.questions {
            let Some(lookup) = Self::lookup_for(question.qtype) else {
                warn!(
                    "Can't answer question of type {} for {}",
                    question.qtype, question.name
                );
                message.flags.rcode = ResponseCode::NotImplemented;
                continue;
            };

            let rdata = lookup(self, &question.name)?;
            message
                .answers
                .push(Record::answering(question, self.ttl, rdata));
        }

        message.recount();

        debug!(
            "Resolved {} questions into {} answers (rcode {:?})",
            message.questions.len(),
            message.answers.len(),
            message.flags.rcode
        );

        Ok(())
    }

    /// Lookup table: the record types this resolver can answer
    fn lookup_for(rtype: RecordType) -> Option<Lookup> {
        match rtype {
            RecordType::A => Some(Self::lookup_a as Lookup),
            RecordType::AAAA => Some(Self::lookup_aaaa as Lookup),
            RecordType::TXT => Some(Self::lookup_txt as Lookup),
            _ => None,
        }
    }

    /// IPv4 address for `name`, 4 bytes
    pub fn lookup_a(&self, name: &str) -> DnsResult<Vec<u8>> {
        self.find(name)
            .and_then(|entry| entry.a)
            .map(|addr| addr.octets().to_vec())
            .ok_or_else(|| DnsError::UnknownDomain(name.to_string()))
    }

    /// IPv6 address for `name`, 16 bytes
    pub fn lookup_aaaa(&self, name: &str) -> DnsResult<Vec<u8>> {
        self.find(name)
            .and_then(|entry| entry.aaaa)
            .map(|addr| addr.octets().to_vec())
            .ok_or_else(|| DnsError::UnknownDomain(name.to_string()))
    }

    /// Text for `name` as a sequence of length-prefixed character-strings
    pub fn lookup_txt(&self, name: &str) -> DnsResult<Vec<u8>> {
        let text = self
            .find(name)
            .and_then(|entry| entry.txt.as_deref())
            .ok_or_else(|| DnsError::UnknownDomain(name.to_string()))?;

        Ok(character_strings(text.as_bytes()))
    }

    fn find(&self, name: &str) -> Option<&ZoneEntry> {
        let name = name.trim_end_matches('.');
        self.zone
            .iter()
            .find(|entry| entry.name.trim_end_matches('.').eq_ignore_ascii_case(name))
    }
}

/// Split text into `<character-string>`s of at most 255 bytes each
fn character_strings(text: &[u8]) -> Vec<u8> {
    if text.is_empty() {
        return vec![0];
    }

    let mut rdata = Vec::with_capacity(text.len() + text.len() / MAX_CHARACTER_STRING + 1);
    for chunk in text.chunks(MAX_CHARACTER_STRING) {
        rdata.push(chunk.len() as u8);
        rdata.extend_from_slice(chunk);
    }
    rdata
}
