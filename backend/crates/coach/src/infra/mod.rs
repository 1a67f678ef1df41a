//! Coach Infrastructure Layer

pub mod gemini;
