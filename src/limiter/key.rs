//! Client key derivation from request metadata.

use std::net::{IpAddr, SocketAddr};

/// Derive a stable client key from the forwarded-for chain and peer address.
///
/// Precedence:
/// 1. The left-most entry of `X-Forwarded-For` that is a valid IP literal.
/// 2. The peer address with its port stripped.
/// 3. The raw peer-address string, unparsed.
///
/// Extraction never fails; a malformed header or address only degrades the
/// key. The raw fallback means clients behind a misconfigured proxy are
/// bucketed by whatever string the connection reports, never exempted.
pub fn client_key(forwarded_for: Option<&str>, peer_addr: &str) -> String {
    if let Some(chain) = forwarded_for {
        for hop in chain.split(',') {
            let hop = hop.trim();
            if hop.parse::<IpAddr>().is_ok() {
                return hop.to_string();
            }
        }
    }

    match peer_addr.parse::<SocketAddr>() {
        Ok(addr) => addr.ip().to_string(),
        Err(_) => peer_addr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_for_takes_first_valid_ip() {
        let key = client_key(Some("203.0.113.5, 10.0.0.1"), "192.0.2.1:443");
        assert_eq!(key, "203.0.113.5");
    }

    #[test]
    fn test_forwarded_for_skips_garbage_entries() {
        let key = client_key(Some("unknown, 203.0.113.5"), "192.0.2.1:443");
        assert_eq!(key, "203.0.113.5");
    }

    #[test]
    fn test_forwarded_for_all_invalid_falls_back_to_peer() {
        let key = client_key(Some("unknown, also-bad"), "192.0.2.1:443");
        assert_eq!(key, "192.0.2.1");
    }

    #[test]
    fn test_peer_address_port_stripped() {
        assert_eq!(client_key(None, "192.0.2.1:8080"), "192.0.2.1");
        assert_eq!(client_key(None, "[2001:db8::1]:8080"), "2001:db8::1");
    }

    #[test]
    fn test_unparseable_peer_returns_raw_string() {
        assert_eq!(client_key(None, "not-an-address"), "not-an-address");
    }

    #[test]
    fn test_whitespace_in_forwarded_chain() {
        let key = client_key(Some("  203.0.113.5  ,10.0.0.1"), "192.0.2.1:443");
        assert_eq!(key, "203.0.113.5");
    }
}
