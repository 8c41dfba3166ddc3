//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Injectable time source (system clock, fixed clock for tests)
//! - HTTP fetching of remote documents with a bounded timeout
//! - Cache-suppression response headers

pub mod cache;
pub mod clock;
pub mod fetch;
