use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{is_discover_request, local_ipv4, reply_payload};
use crate::config::DiscoveryConfig;
use crate::error::{PolyglotError, Result};

const RECV_BUFFER_SIZE: usize = 1024;

/// Owns the discovery socket for as long as it listens.
pub struct DiscoveryResponder {
    socket: UdpSocket,
}

impl DiscoveryResponder {
    pub async fn bind(config: &DiscoveryConfig) -> Result<Self> {
        let addr = format!("{}:{}", config.bind_host, config.port);

        let socket = UdpSocket::bind(&addr)
            .await
            .map_err(|e| PolyglotError::DiscoveryBindFailed(format!("{addr}: {e}")))?;
        socket
            .set_broadcast(true)
            .map_err(|e| PolyglotError::DiscoveryBindFailed(format!("{addr}: {e}")))?;

        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Answer discovery requests until `cancel` fires.
    ///
    /// Receive and send errors only affect the datagram in hand.
    pub async fn run(self, cancel: CancellationToken) {
        let mut buf = [0u8; RECV_BUFFER_SIZE];

        loop {
            let received = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Discovery service shutting down...");
                    break;
                }
                received = self.socket.recv_from(&mut buf) => received,
            };

            match received {
                Ok((len, peer)) => self.handle_datagram(&buf[..len], peer).await,
                Err(e) => debug!("Discovery receive error: {}", e),
            }
        }
    }

    async fn handle_datagram(&self, datagram: &[u8], peer: SocketAddr) {
        if !is_discover_request(datagram) {
            debug!(%peer, len = datagram.len(), "Ignoring unrelated datagram");
            return;
        }

        let reply = reply_payload(local_ipv4());
        match self.socket.send_to(reply.as_bytes(), peer).await {
            Ok(_) => debug!(%peer, %reply, "Answered discovery request"),
            Err(e) => debug!(%peer, "Discovery reply failed: {}", e),
        }
    }

    pub fn spawn(self, cancel: CancellationToken) -> DiscoveryHandle {
        let local_addr = self
            .socket
            .local_addr()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 0)));
        let task = tokio::spawn(self.run(cancel.clone()));

        DiscoveryHandle {
            local_addr,
            cancel,
            task,
        }
    }
}

/// A running responder task.
pub struct DiscoveryHandle {
    local_addr: SocketAddr,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl DiscoveryHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop listening and wait for the socket to be released.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            debug!("Discovery task ended abnormally: {}", e);
        }
    }
}
