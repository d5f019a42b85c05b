//! minidns
//!
//! A minimal authoritative DNS responder: decode a UDP datagram, answer its
//! questions from a static zone, and encode the response.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          MINIDNS                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  dns::DnsServer   ←── UDP loop, drops bad datagrams         │
//! │  dns::DnsHandler  ←── decode → resolve → encode             │
//! │  protocol         ←── header, names, questions, records     │
//! │  protocol::wire   ←── bounds-checked big-endian primitives  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core holds no global state; the server receives its configuration
//! explicitly.

pub mod config;
pub mod dns;
pub mod protocol;

pub use config::{ServerConfig, ZoneEntry};
pub use dns::{DnsHandler, DnsServer};
pub use protocol::{DnsError, DnsMessage, DnsResult};
