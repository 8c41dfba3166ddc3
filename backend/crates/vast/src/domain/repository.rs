//! Source Traits
//!
//! Where the inventory document comes from. Implementations are in the
//! infrastructure layer.

use crate::domain::entities::AdConfig;
use crate::error::VastResult;

/// Inventory document source
///
/// Called once per request; implementations must not cache across calls.
#[trait_variant::make(AdConfigSource: Send)]
pub trait LocalAdConfigSource {
    /// Fetch and decode the current document
    async fn load(&self) -> VastResult<AdConfig>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}
