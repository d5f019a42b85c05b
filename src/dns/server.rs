//! Simple DNS Server
//!
//! UDP socket loop around [`DnsHandler`]. Each datagram is received,
//! processed and answered before the next one is read. A datagram that
//! fails to decode, resolve or encode is logged and dropped; the loop keeps
//! serving.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::dns::DnsHandler;

/// Bytes of a dropped datagram included in debug logs
const DUMP_PREFIX_LEN: usize = 64;

/// Bound UDP responder
pub struct DnsServer {
    socket: UdpSocket,
    handler: Arc<DnsHandler>,
    max_datagram_size: usize,
}

impl DnsServer {
    /// Bind the configured address
    pub async fn bind(config: &ServerConfig, handler: Arc<DnsHandler>) -> anyhow::Result<Self> {
        let socket = std::net::UdpSocket::bind(config.bind_address)?;
        socket.set_nonblocking(true)?;
        let socket = UdpSocket::from_std(socket)?;

        Ok(Self {
            socket,
            handler,
            max_datagram_size: config.max_datagram_size,
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Serve forever
    pub async fn run(self) -> anyhow::Result<()> {
        info!("🌐 DNS server listening on {}", self.local_addr()?);

        let mut buf = vec![0u8; self.max_datagram_size];
        loop {
            let (len, src) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    error!("DNS socket error: {}", e);
                    continue;
                }
            };

            if len == 0 {
                continue;
            }

            self.serve_datagram(&buf[..len], src).await;
        }
    }

    /// Answer one datagram, or drop it on any error
    async fn serve_datagram(&self, request: &[u8], src: SocketAddr) {
        let response = match self.handler.handle_request(request) {
            Ok(response) => response,
            Err(e) => {
                warn!("Dropping DNS datagram from {}: {}", src, e);
                debug!(
                    "Dropped datagram ({} bytes): {}",
                    request.len(),
                    hex::encode(&request[..request.len().min(DUMP_PREFIX_LEN)])
                );
                return;
            }
        };

        match self.socket.send_to(&response, src).await {
            Ok(sent) => debug!("Sent {} byte response to {}", sent, src),
            Err(e) => warn!("Failed to send DNS response to {}: {}", src, e),
        }
    }
}

/// Bind and run the DNS server
pub async fn run_dns_server(
    config: Arc<ServerConfig>,
    handler: Arc<DnsHandler>,
) -> anyhow::Result<()> {
    DnsServer::bind(&config, handler).await?.run().await
}
