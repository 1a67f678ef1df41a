//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for request governance:
//! - Fixed-window rate limiting with bounded memory
//! - Trusted-origin / referer access guard
//! - Single-slot TTL response cache
//! - Client identity extraction for rate-limit keys

pub mod cache;
pub mod client;
pub mod origin;
pub mod rate_limit;
