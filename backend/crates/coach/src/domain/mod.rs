//! Coach Domain Layer

pub mod gateway;
pub mod message;
