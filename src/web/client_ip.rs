//! Caller address extraction.
//!
//! The trust decision needs the original caller's address, which behind a
//! reverse proxy only exists in the forwarded-address header. Honoring that
//! header is a deliberate weakening that is only sound when a trusted proxy
//! overwrites it on every request, so it sits behind a config switch and
//! falls back to the transport peer address.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Header consulted for the original caller address.
pub const FORWARDED_HEADER: &str = "x-forwarded-for";

/// Resolve the textual caller address to check for membership.
///
/// Returns the first entry of the forwarded header when present and
/// trusted, else the peer address. Proxies append one hop address per
/// traversal; the first entry is the original caller.
pub fn caller_address(headers: &HeaderMap, peer: SocketAddr, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(forwarded) = headers
            .get(FORWARDED_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(first) = forwarded.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    peer.ip().to_string()
}
