//! Header Codec
//!
//! The fixed 12-byte DNS header: ID, flags word, then the four section
//! counts, each a big-endian u16.
//!
//! ## Flags word (MSB first)
//!
//! ```text
//!  15  14..11   10  9   8   7   6..4  3..0
//! ┌──┬────────┬───┬───┬───┬───┬─────┬──────┐
//! │QR│ OPCODE │AA │TC │RD │RA │  Z  │RCODE │
//! └──┴────────┴───┴───┴───┴───┴─────┴──────┘
//! ```

use super::error::DnsResult;
use super::wire::{decode_u16, encode_u16};

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 12;

const FLAG_QR: u16 = 0x8000; // Query/Response
const FLAG_AA: u16 = 0x0400; // Authoritative Answer
const FLAG_TC: u16 = 0x0200; // Truncated
const FLAG_RD: u16 = 0x0100; // Recursion Desired
const FLAG_RA: u16 = 0x0080; // Recursion Available

const OPCODE_SHIFT: u16 = 11;
const NIBBLE_MASK: u16 = 0x000F;

/// Raw header as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    pub fn decode(buf: &[u8], offset: usize) -> DnsResult<(Self, usize)> {
        let (id, offset) = decode_u16(buf, offset)?;
        let (flags, offset) = decode_u16(buf, offset)?;
        let (qd_count, offset) = decode_u16(buf, offset)?;
        let (an_count, offset) = decode_u16(buf, offset)?;
        let (ns_count, offset) = decode_u16(buf, offset)?;
        let (ar_count, offset) = decode_u16(buf, offset)?;

        let header = Self {
            id,
            flags,
            qd_count,
            an_count,
            ns_count,
            ar_count,
        };
        Ok((header, offset))
    }

    pub fn encode(&self, buf: &mut [u8], offset: usize) -> DnsResult<usize> {
        let offset = encode_u16(self.id, buf, offset)?;
        let offset = encode_u16(self.flags, buf, offset)?;
        let offset = encode_u16(self.qd_count, buf, offset)?;
        let offset = encode_u16(self.an_count, buf, offset)?;
        let offset = encode_u16(self.ns_count, buf, offset)?;
        encode_u16(self.ar_count, buf, offset)
    }
}

/// Response code carried in the low nibble of the flags word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    /// Codes 6-15
    Reserved(u8),
}

impl ResponseCode {
    pub fn code(self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Reserved(code) => code & NIBBLE_MASK as u8,
        }
    }
}

impl From<u8> for ResponseCode {
    /// Only the low four bits are significant
    fn from(code: u8) -> Self {
        match code & NIBBLE_MASK as u8 {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            other => ResponseCode::Reserved(other),
        }
    }
}

/// Unpacked view of the header flags word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    /// Query (false) or response (true)
    pub qr: bool,

    /// Operation code, 4 bits
    pub opcode: u8,

    /// Authoritative answer
    pub aa: bool,

    /// Truncated
    pub tc: bool,

    /// Recursion desired
    pub rd: bool,

    /// Recursion available
    pub ra: bool,

    pub rcode: ResponseCode,
}

impl Flags {
    /// Extract every field with mask and shift; reserved bits 6-4 are dropped
    pub fn unpack(word: u16) -> Self {
        Self {
            qr: word & FLAG_QR != 0,
            opcode: ((word >> OPCODE_SHIFT) & NIBBLE_MASK) as u8,
            aa: word & FLAG_AA != 0,
            tc: word & FLAG_TC != 0,
            rd: word & FLAG_RD != 0,
            ra: word & FLAG_RA != 0,
            rcode: ResponseCode::from((word & NIBBLE_MASK) as u8),
        }
    }

    /// Reassemble the flags word; reserved bits are always zero
    pub fn pack(&self) -> u16 {
        let mut word = ((self.opcode as u16 & NIBBLE_MASK) << OPCODE_SHIFT)
            | (self.rcode.code() as u16 & NIBBLE_MASK);

        if self.qr {
            word |= FLAG_QR;
        }
        if self.aa {
            word |= FLAG_AA;
        }
        if self.tc {
            word |= FLAG_TC;
        }
        if self.rd {
            word |= FLAG_RD;
        }
        if self.ra {
            word |= FLAG_RA;
        }

        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::error::DnsError;

    #[test]
    fn test_header_roundtrip() {
        let header = Header {
            id: 0x1234,
            flags: 0x8180,
            qd_count: 1,
            an_count: 2,
            ns_count: 3,
            ar_count: 4,
        };

        let mut buf = [0u8; HEADER_SIZE];
        assert_eq!(header.encode(&mut buf, 0), Ok(HEADER_SIZE));
        assert_eq!(buf, [0x12, 0x34, 0x81, 0x80, 0, 1, 0, 2, 0, 3, 0, 4]);

        let (decoded, off) = Header::decode(&buf, 0).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(off, HEADER_SIZE);
    }

    #[test]
    fn test_header_truncated() {
        let buf = [0u8; 11];
        assert_eq!(
            Header::decode(&buf, 0),
            Err(DnsError::Overflow { boundary: 11 })
        );
    }

    #[test]
    fn test_unpack_recursion_desired_query() {
        let flags = Flags::unpack(0x0100);

        assert!(!flags.qr);
        assert!(flags.rd);
        assert!(!flags.aa && !flags.tc && !flags.ra);
        assert_eq!(flags.opcode, 0);
        assert_eq!(flags.rcode, ResponseCode::NoError);
    }

    #[test]
    fn test_bit_positions() {
        let cases = [
            (Flags { qr: true, ..Default::default() }, 0x8000),
            (Flags { opcode: 0x0F, ..Default::default() }, 0x7800),
            (Flags { opcode: 2, ..Default::default() }, 0x1000),
            (Flags { aa: true, ..Default::default() }, 0x0400),
            (Flags { tc: true, ..Default::default() }, 0x0200),
            (Flags { rd: true, ..Default::default() }, 0x0100),
            (Flags { ra: true, ..Default::default() }, 0x0080),
            (Flags { rcode: ResponseCode::NotImplemented, ..Default::default() }, 0x0004),
        ];

        for (flags, word) in cases {
            assert_eq!(flags.pack(), word, "{:?}", flags);
        }
    }

    #[test]
    fn test_flags_roundtrip_all_combinations() {
        for bits in 0u8..16 {
            for opcode in 0u8..16 {
                for rcode in 0u8..16 {
                    let flags = Flags {
                        qr: bits & 0b0001 != 0,
                        opcode,
                        aa: bits & 0b0010 != 0,
                        tc: bits & 0b0100 != 0,
                        rd: bits & 0b1000 != 0,
                        ra: (bits ^ opcode) & 1 != 0,
                        rcode: ResponseCode::from(rcode),
                    };
                    assert_eq!(Flags::unpack(flags.pack()), flags);
                }
            }
        }
    }

    #[test]
    fn test_reserved_bits_ignored() {
        let flags = Flags::unpack(0x0070);
        assert_eq!(flags, Flags::default());
        assert_eq!(flags.pack(), 0);
    }

    #[test]
    fn test_response_codes() {
        assert_eq!(ResponseCode::from(4), ResponseCode::NotImplemented);
        assert_eq!(ResponseCode::from(9), ResponseCode::Reserved(9));
        assert_eq!(ResponseCode::Reserved(9).code(), 9);
        assert_eq!(ResponseCode::Refused.code(), 5);
    }
}
