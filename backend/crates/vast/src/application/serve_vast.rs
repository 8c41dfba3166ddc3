//! Serve VAST Use Case

use crate::application::config::{RotationMode, VastConfig};
use crate::domain::engine::{Decision, NoAdReason, decide};
use crate::domain::repository::AdConfigSource;
use crate::domain::services::{position_bucket, time_bucket};
use crate::domain::value_objects::SelectionContext;
use kernel::id::{ContentId, ViewerId};
use platform::clock::Clock;
use std::sync::Arc;

/// Default ad break when the player does not name one
pub const DEFAULT_BREAK_TYPE: &str = "preroll";

/// Input DTO for serve VAST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeVastInput {
    pub content_id: ContentId,
    pub viewer_id: ViewerId,
    pub break_type: String,
    pub position_seconds: u64,
}

impl Default for ServeVastInput {
    fn default() -> Self {
        Self {
            content_id: ContentId::default(),
            viewer_id: ViewerId::default(),
            break_type: DEFAULT_BREAK_TYPE.to_string(),
            position_seconds: 0,
        }
    }
}

/// Serve VAST Use Case
///
/// Loads the inventory, builds the selection context and runs the engine.
/// Never fails: every failure path ends in [`Decision::NoAd`].
pub struct ServeVastUseCase<S>
where
    S: AdConfigSource,
{
    source: Arc<S>,
    clock: Arc<dyn Clock>,
    config: Arc<VastConfig>,
}

impl<S> ServeVastUseCase<S>
where
    S: AdConfigSource,
{
    pub fn new(source: Arc<S>, clock: Arc<dyn Clock>, config: Arc<VastConfig>) -> Self {
        Self {
            source,
            clock,
            config,
        }
    }

    pub async fn execute(&self, input: ServeVastInput) -> Decision {
        let ad_config = match self.source.load().await {
            Ok(ad_config) => ad_config,
            Err(e) => {
                e.log();
                return Decision::NoAd(NoAdReason::ConfigUnavailable);
            }
        };

        let ctx = self.selection_context(&input);
        let decision = decide(&ad_config, &ctx);

        match &decision {
            Decision::Serve(placement) => {
                tracing::info!(
                    content_id = %ctx.content_id,
                    tier = %placement.tier,
                    ad_id = placement.ad.id.as_deref().unwrap_or_default(),
                    delivery = placement.media.delivery.as_str(),
                    bucket = ctx.bucket,
                    "Served ad"
                );
            }
            Decision::NoAd(reason) => {
                tracing::debug!(
                    content_id = %ctx.content_id,
                    reason = reason.as_str(),
                    bucket = ctx.bucket,
                    "No ad served"
                );
            }
        }

        decision
    }

    /// Build the context every selector hashes against
    pub fn selection_context(&self, input: &ServeVastInput) -> SelectionContext {
        let now = self.clock.now();
        let today = now.date_naive();

        match self.config.rotation_mode {
            RotationMode::WallClock => SelectionContext::new(
                input.content_id.clone(),
                input.viewer_id.as_str(),
                time_bucket(self.config.bucket_window, now),
                today,
            ),
            RotationMode::PlaybackPosition => SelectionContext::new(
                input.content_id.clone(),
                format!("{}|{}", input.viewer_id, input.break_type),
                position_bucket(input.position_seconds, self.config.position_window_secs()),
                today,
            ),
        }
    }
}
