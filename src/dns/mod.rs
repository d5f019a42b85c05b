//! DNS Server Module
//!
//! Answers UDP DNS queries from a static zone.
//!
//! ## DNS Records
//!
//! - A records: IPv4 address of the zone entry
//! - AAAA records: IPv6 address of the zone entry
//! - TXT records: free-form text of the zone entry
//!
//! Any other query type is answered with NOTIMP and no records.

mod handler;
mod server;

pub use handler::{DnsHandler, DEFAULT_TTL};
pub use server::{run_dns_server, DnsServer};
