//! VAST Ad Decision Module
//!
//! Clean Architecture structure:
//! - `domain/` - Selection logic, entities, source traits
//! - `application/` - Use cases
//! - `infra/` - Inventory document sources
//! - `presentation/` - HTTP handlers and VAST rendering
//!
//! ## Decision Model
//! - Selection is a pure function of (inventory, content id, viewer id, time bucket)
//! - No state survives a request; the inventory is re-read every time
//! - Fail-open: every failure renders a valid, empty VAST document

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{RotationMode, VastConfig};
pub use domain::engine::{Decision, NoAdReason, Placement, decide};
pub use error::{VastError, VastResult};
pub use infra::AnyAdConfigSource;
pub use presentation::router::{vast_router, vast_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
