//! Domain Name Codec
//!
//! Converts between dotted names (`"example.com."`) and the DNS
//! label-sequence wire format.
//!
//! ## Limitations
//!
//! Compression pointers are recognised but never followed. Hitting one
//! yields [`DnsError::CompressionUnsupported`], which is distinct from
//! [`DnsError::MalformedName`] so a real decompressor can be dropped in later.

use super::error::{DnsError, DnsResult};
use super::wire::{decode_bytes, decode_u8, encode_bytes, encode_u8};

/// Longest label the wire format can express
pub const MAX_LABEL_LEN: usize = 63;

/// Top two bits of a length byte select the label kind
const LABEL_KIND_MASK: u8 = 0xC0;
const LABEL_KIND_NORMAL: u8 = 0x00;
const LABEL_KIND_POINTER: u8 = 0xC0;

/// Decode a name starting at `offset`.
///
/// Returns the dotted name (always dot-terminated, `"."` for the root) and
/// the offset just past the terminating zero byte.
pub fn decode_name(buf: &[u8], offset: usize) -> DnsResult<(String, usize)> {
    let mut name = String::new();
    let mut offset = offset;

    loop {
        let label_start = offset;
        let (len, next) = decode_u8(buf, offset)?;
        offset = next;

        match len & LABEL_KIND_MASK {
            LABEL_KIND_NORMAL => {
                if len == 0 {
                    break;
                }

                let (label, next) = decode_bytes(buf, offset, len as usize)?;
                let label = std::str::from_utf8(label).map_err(|_| {
                    DnsError::MalformedName(format!(
                        "label at offset {} is not valid UTF-8",
                        label_start
                    ))
                })?;
                if label.contains('.') {
                    return Err(DnsError::MalformedName(format!(
                        "label at offset {} contains a '.'",
                        label_start
                    )));
                }

                name.push_str(label);
                name.push('.');
                offset = next;
            }
            LABEL_KIND_POINTER => {
                return Err(DnsError::CompressionUnsupported { offset: label_start });
            }
            _ => {
                return Err(DnsError::MalformedName(format!(
                    "reserved label type {:#04x} at offset {}",
                    len, label_start
                )));
            }
        }
    }

    if name.is_empty() {
        name.push('.');
    }

    Ok((name, offset))
}

/// Encode a dotted name at `offset`.
///
/// The empty string is the "no name" case and writes nothing. `"."` is the
/// root and writes a single zero byte. The trailing dot is optional.
pub fn encode_name(name: &str, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
    if name.is_empty() {
        return Ok(offset);
    }

    let mut offset = offset;
    for label in labels(name) {
        let label = label?;
        offset = encode_u8(label.len() as u8, buf, offset)?;
        offset = encode_bytes(label.as_bytes(), buf, offset)?;
    }

    encode_u8(0, buf, offset)
}

/// Validate a name and return it with a trailing dot
pub fn normalize_name(name: &str) -> DnsResult<String> {
    if name.is_empty() {
        return Err(DnsError::MalformedName("empty name".to_string()));
    }

    let mut normalized = String::with_capacity(name.len() + 1);
    for label in labels(name) {
        normalized.push_str(label?);
        normalized.push('.');
    }
    if normalized.is_empty() {
        normalized.push('.');
    }

    Ok(normalized)
}

/// Split a non-empty dotted name into validated labels
fn labels(name: &str) -> impl Iterator<Item = DnsResult<&str>> {
    let body = if name == "." {
        ""
    } else {
        name.strip_suffix('.').unwrap_or(name)
    };

    body.split('.')
        .filter(move |_| !body.is_empty())
        .map(move |label| {
            if label.is_empty() {
                Err(DnsError::MalformedName(format!("empty label in {:?}", name)))
            } else if label.len() > MAX_LABEL_LEN {
                Err(DnsError::MalformedName(format!(
                    "label {:?} exceeds {} bytes",
                    label, MAX_LABEL_LEN
                )))
            } else {
                Ok(label)
            }
        })
}
