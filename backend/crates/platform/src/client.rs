//! Client identification utilities
//!
//! Derives the per-client key used for rate limiting from HTTP headers.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Placeholder identity when no address can be determined at all
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive a client identity for rate-limit keys.
///
/// Preference order: `X-Real-IP` (set by a trusted reverse proxy), the
/// first hop of `X-Forwarded-For`, the transport-level peer address, and
/// finally a constant placeholder.
///
/// This is a heuristic, not authentication: a client talking to the
/// server directly controls these headers and can pick its own identity.
/// Accepted limitation - the limiter only needs to be accurate behind the
/// reverse proxy the site actually deploys.
pub fn client_identity(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> String {
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let trimmed = real_ip.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_hop) = xff.split(',').next() {
            let trimmed = first_hop.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    match peer_ip {
        Some(ip) => ip.to_string(),
        None => UNKNOWN_CLIENT.to_string(),
    }
}
