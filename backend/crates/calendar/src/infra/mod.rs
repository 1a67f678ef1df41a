//! Calendar Infrastructure Layer

pub mod http;
pub mod ics;
