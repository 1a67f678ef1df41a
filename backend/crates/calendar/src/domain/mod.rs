//! Calendar Domain Layer

pub mod event;
