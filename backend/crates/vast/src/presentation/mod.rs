//! Presentation Layer
//!
//! HTTP handlers, DTOs and the VAST renderer.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod xml;
