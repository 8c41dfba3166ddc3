//! Domain Value Objects
//!
//! Immutable value types for the ad decision domain.

use chrono::NaiveDate;
use kernel::id::ContentId;
use std::fmt;

/// Inclusive date range during which an ad may be served
///
/// An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ActiveWindow {
    pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

    /// Parse `YYYY-MM-DD` bounds. Blank strings count as absent; any other
    /// unparseable bound yields `None` (the ad is then never active).
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Option<Self> {
        Some(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| s <= date) && self.end.is_none_or(|e| date <= e)
    }
}

fn parse_bound(raw: Option<&str>) -> Option<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Some(None),
        Some(s) => NaiveDate::parse_from_str(s, ActiveWindow::DATE_FORMAT)
            .ok()
            .map(Some),
    }
}

/// How the player should pull the creative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Progressive,
    Streaming,
}

impl Delivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::Progressive => "progressive",
            Delivery::Streaming => "streaming",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Delivery::Progressive => "video/mp4",
            Delivery::Streaming => "application/x-mpegURL",
        }
    }
}

/// Resolved creative: delivery type plus trimmed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub delivery: Delivery,
    pub url: String,
}

impl MediaFile {
    pub fn progressive(url: impl Into<String>) -> Self {
        Self {
            delivery: Delivery::Progressive,
            url: url.into(),
        }
    }

    pub fn streaming(url: impl Into<String>) -> Self {
        Self {
            delivery: Delivery::Streaming,
            url: url.into(),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.delivery.mime_type()
    }
}

/// Inventory tier an ad was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Film,
    Sponsor,
    House,
}

impl Tier {
    /// Seed prefix for this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Film => "film",
            Tier::Sponsor => "sponsor",
            Tier::House => "house",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a selector needs to reproduce a pick
///
/// Two requests with equal contexts and equal configs always receive the
/// same ad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    pub content_id: ContentId,
    /// Viewer component of every seed (`rida`, optionally scoped by break)
    pub viewer_key: String,
    /// Logical clock: time bucket or playback-position bucket
    pub bucket: i64,
    /// Calendar date used for eligibility
    pub today: NaiveDate,
}

impl SelectionContext {
    pub fn new(
        content_id: ContentId,
        viewer_key: impl Into<String>,
        bucket: i64,
        today: NaiveDate,
    ) -> Self {
        Self {
            content_id,
            viewer_key: viewer_key.into(),
            bucket,
            today,
        }
    }

    /// `"{tier}|{contentId}|{viewer}"`
    pub fn seed(&self, tier: Tier) -> String {
        format!("{}|{}|{}", tier, self.content_id, self.viewer_key)
    }

    /// `"fill|{contentId}|{viewer}|{bucket}"`
    pub fn fill_key(&self) -> String {
        format!("fill|{}|{}|{}", self.content_id, self.viewer_key, self.bucket)
    }
}
