//! Domain Layer - Selection logic and entities
//!
//! This layer contains:
//! - Domain entities (Ad, AdConfig, Defaults)
//! - Domain value objects (ActiveWindow, MediaFile, SelectionContext)
//! - Domain services (hashing, bucketing, filtering, selectors)
//! - The tiered decision engine
//! - Source traits (interfaces)

pub mod engine;
pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
