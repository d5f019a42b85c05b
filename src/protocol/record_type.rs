//! Resource record types
//!
//! An open enumeration: the named variants are the types this responder
//! knows about, anything else is carried through as [`RecordType::Unknown`].

use std::fmt;

/// Internet class, the only class the resolver answers for
pub const CLASS_IN: u16 = 1;

/// DNS resource record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    /// Any code without a named variant
    Unknown(u16),
}

impl RecordType {
    /// Wire code of this type
    pub fn code(self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::Unknown(code) => code,
        }
    }

    /// Whether RDATA of this type is written and read as opaque bytes.
    ///
    /// Only these types can be encoded; every other type is refused rather
    /// than risk a mis-encoded payload.
    pub fn has_raw_rdata(self) -> bool {
        matches!(self, RecordType::A | RecordType::AAAA | RecordType::TXT)
    }
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::NS,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            12 => RecordType::PTR,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            28 => RecordType::AAAA,
            33 => RecordType::SRV,
            other => RecordType::Unknown(other),
        }
    }
}

impl From<RecordType> for u16 {
    fn from(rtype: RecordType) -> Self {
        rtype.code()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Unknown(code) => write!(f, "TYPE{}", code),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(RecordType::from(1), RecordType::A);
        assert_eq!(RecordType::from(6), RecordType::SOA);
        assert_eq!(RecordType::from(28), RecordType::AAAA);
        assert_eq!(u16::from(RecordType::SRV), 33);
        assert_eq!(RecordType::from(99), RecordType::Unknown(99));
        assert_eq!(RecordType::Unknown(99).code(), 99);
    }

    #[test]
    fn test_raw_rdata_types() {
        assert!(RecordType::A.has_raw_rdata());
        assert!(RecordType::AAAA.has_raw_rdata());
        assert!(RecordType::TXT.has_raw_rdata());
        assert!(!RecordType::MX.has_raw_rdata());
        assert!(!RecordType::Unknown(65).has_raw_rdata());
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordType::CNAME.to_string(), "CNAME");
        assert_eq!(RecordType::Unknown(255).to_string(), "TYPE255");
    }
}
