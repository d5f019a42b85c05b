//! Server Configuration
//!
//! Configurable parameters for the responder. Defaults reproduce a
//! loopback test server answering for a single name.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;

use crate::protocol::{normalize_name, DEFAULT_ENCODE_BUFFER_SIZE, MAX_MESSAGE_SIZE};

/// Name the default zone answers for
pub const DEFAULT_ZONE_NAME: &str = "www.baidu.com.";

/// Main configuration for the responder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    // === Network ===

    /// UDP address to listen on
    pub bind_address: SocketAddr,

    /// Receive buffer size; longer datagrams are truncated by the socket
    pub max_datagram_size: usize,

    // === Encoding ===

    /// Initial scratch buffer for encoding responses (bytes)
    pub encode_buffer_size: usize,

    /// Upper bound the scratch buffer may grow to (bytes)
    pub max_message_size: usize,

    // === Answers ===

    /// TTL placed on every answer record (seconds)
    pub answer_ttl_secs: u32,

    // === Logging ===

    /// Default log level when RUST_LOG is unset
    pub log_level: String,

    // === Zone ===

    /// Names the resolver can answer for
    pub zone: Vec<ZoneEntry>,
}

/// Static data for one name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// Owner name; a trailing dot is optional
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<Ipv4Addr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aaaa: Option<Ipv6Addr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Network
            bind_address: SocketAddr::from(([127, 0, 0, 1], 9000)),
            max_datagram_size: 1500, // Ethernet MTU

            // Encoding
            encode_buffer_size: DEFAULT_ENCODE_BUFFER_SIZE,
            max_message_size: MAX_MESSAGE_SIZE,

            // Answers
            answer_ttl_secs: 3600, // 1 hour

            // Logging
            log_level: "info".to_string(),

            // Zone
            zone: vec![ZoneEntry {
                name: DEFAULT_ZONE_NAME.to_string(),
                a: Some(Ipv4Addr::new(10, 10, 0, 1)),
                aaaa: Some(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)),
                txt: Some("Hello World".to_string()),
            }],
        }
    }
}

impl ServerConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    // Builder-style methods for CLI overrides

    pub fn with_bind_address(mut self, addr: Option<SocketAddr>) -> Self {
        if let Some(addr) = addr {
            self.bind_address = addr;
        }
        self
    }

    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_datagram_size == 0 {
            anyhow::bail!("max_datagram_size must be greater than zero");
        }

        if self.encode_buffer_size == 0 {
            anyhow::bail!("encode_buffer_size must be greater than zero");
        }

        if self.max_message_size > MAX_MESSAGE_SIZE {
            anyhow::bail!(
                "max_message_size ({}) must not exceed {}",
                self.max_message_size,
                MAX_MESSAGE_SIZE
            );
        }

        if self.encode_buffer_size > self.max_message_size {
            anyhow::bail!(
                "encode_buffer_size ({}) must not exceed max_message_size ({})",
                self.encode_buffer_size,
                self.max_message_size
            );
        }

        for entry in &self.zone {
            normalize_name(&entry.name)
                .map_err(|e| anyhow::anyhow!("invalid zone entry {:?}: {}", entry.name, e))?;
        }

        Ok(())
    }
}
