//! Local-network service discovery.
//!
//! Clients broadcast the ASCII request `DISCOVER_SERVER` to UDP port 5005 and
//! the responder answers the sender with `SERVER_IP:<ipv4>`. There is no
//! framing and no acknowledgement.

mod responder;

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::DiscoveryConfig;

pub use responder::{DiscoveryHandle, DiscoveryResponder};

pub const DISCOVER_MARKER: &str = "DISCOVER_SERVER";
pub const REPLY_PREFIX: &str = "SERVER_IP:";

// Never contacted: connecting a UDP socket only selects the outbound route.
const ROUTE_CHECK_ADDR: &str = "10.255.255.255:1";

/// True when the datagram is valid UTF-8 and, trimmed, equals the marker.
pub fn is_discover_request(datagram: &[u8]) -> bool {
    std::str::from_utf8(datagram)
        .map(|text| text.trim() == DISCOVER_MARKER)
        .unwrap_or(false)
}

pub fn reply_payload(ip: Ipv4Addr) -> String {
    format!("{REPLY_PREFIX}{ip}")
}

/// IPv4 address of the interface that routes off-host, or loopback when there
/// is none.
pub fn local_ipv4() -> Ipv4Addr {
    fn route_local_addr() -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(ROUTE_CHECK_ADDR)?;
        Ok(socket.local_addr()?.ip())
    }

    match route_local_addr() {
        Ok(IpAddr::V4(ip)) if !ip.is_unspecified() => ip,
        _ => Ipv4Addr::LOCALHOST,
    }
}

/// Bind and spawn the responder when discovery is enabled.
///
/// A bind failure disables discovery only; it is logged and `None` returned
/// so the HTTP service can still start.
pub async fn start_discovery(
    config: &DiscoveryConfig,
    cancel: CancellationToken,
) -> Option<DiscoveryHandle> {
    if !config.enabled {
        info!("Discovery service disabled");
        return None;
    }

    match DiscoveryResponder::bind(config).await {
        Ok(responder) => {
            let handle = responder.spawn(cancel);
            info!(addr = %handle.local_addr(), "Discovery Service: listening for requests");
            Some(handle)
        }
        Err(e) => {
            warn!("{} (might be running already)", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_matches_exact_marker() {
        assert!(is_discover_request(b"DISCOVER_SERVER"));
    }

    #[test]
    fn test_request_is_trimmed() {
        assert!(is_discover_request(b"  DISCOVER_SERVER\r\n"));
        assert!(is_discover_request(b"\tDISCOVER_SERVER "));
    }

    #[test]
    fn test_other_payloads_are_ignored() {
        assert!(!is_discover_request(b"discover_server"));
        assert!(!is_discover_request(b"DISCOVER_SERVER_NOW"));
        assert!(!is_discover_request(b"HELLO"));
        assert!(!is_discover_request(b""));
    }

    #[test]
    fn test_invalid_utf8_is_ignored() {
        assert!(!is_discover_request(&[0xFF, 0xFE, b'D', b'I']));
    }

    #[test]
    fn test_reply_payload_format() {
        assert_eq!(
            reply_payload(Ipv4Addr::new(192, 168, 1, 42)),
            "SERVER_IP:192.168.1.42"
        );
    }

    #[test]
    fn test_local_ipv4_is_a_concrete_address() {
        let ip = local_ipv4();
        assert!(!ip.is_unspecified());
        assert!(reply_payload(ip)[REPLY_PREFIX.len()..]
            .parse::<Ipv4Addr>()
            .is_ok());
    }

    #[tokio::test]
    async fn test_disabled_discovery_starts_nothing() {
        let config = DiscoveryConfig {
            enabled: false,
            ..DiscoveryConfig::default()
        };
        assert!(start_discovery(&config, CancellationToken::new())
            .await
            .is_none());
    }
}
