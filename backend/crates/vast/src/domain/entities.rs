//! Domain Entities
//!
//! The ad inventory document and its entries. The document is operator
//! edited and fetched on every request, so decoding is lenient: missing
//! fields take defaults and a broken entry only costs that entry.

use crate::domain::value_objects::ActiveWindow;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Fill percent used when the document does not set one
pub const DEFAULT_SPONSOR_FILL_PERCENT: i64 = 70;

/// Single advertisement candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    #[serde(default)]
    pub id: Option<String>,
    /// Generic creative location; delivery type is sniffed from the suffix
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mp4: Option<String>,
    #[serde(default)]
    pub hls: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl Ad {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_mp4(mut self, url: impl Into<String>) -> Self {
        self.mp4 = Some(url.into());
        self
    }

    pub fn with_hls(mut self, url: impl Into<String>) -> Self {
        self.hls = Some(url.into());
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn with_window(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start = start.map(String::from);
        self.end = end.map(String::from);
        self
    }

    /// Priority with the default of 0 applied
    pub fn priority(&self) -> i64 {
        self.priority.unwrap_or(0)
    }

    /// `None` when a date bound is malformed
    pub fn active_window(&self) -> Option<ActiveWindow> {
        ActiveWindow::parse(self.start.as_deref(), self.end.as_deref())
    }
}

/// Global knobs of the inventory document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub duration_seconds: Option<u32>,
    /// Compared against a 0-99 roll; values outside 0-100 saturate
    pub sponsor_fill_percent: i64,
    /// Master switch for the sponsor/house mix
    pub serve_sponsors: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            duration_seconds: None,
            sponsor_fill_percent: DEFAULT_SPONSOR_FILL_PERCENT,
            serve_sponsors: false,
        }
    }
}

impl Defaults {
    fn decode(value: Option<Value>) -> Self {
        let map = match value {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => return Self::default(),
            Some(_) => {
                tracing::warn!("Ad config `defaults` is not an object, ignoring");
                return Self::default();
            }
        };

        let fallback = Self::default();
        Self {
            duration_seconds: map
                .get("durationSeconds")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok()),
            sponsor_fill_percent: map
                .get("sponsorFillPercent")
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.floor() as i64)))
                .unwrap_or(fallback.sponsor_fill_percent),
            serve_sponsors: map
                .get("serveSponsors")
                .and_then(Value::as_bool)
                .unwrap_or(fallback.serve_sponsors),
        }
    }
}

/// The full inventory document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdConfig {
    /// Per-title overrides keyed by content id
    pub film_sponsors: HashMap<String, Vec<Ad>>,
    pub sponsor_ads: Vec<Ad>,
    pub house_ads: Vec<Ad>,
    pub defaults: Defaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawAdConfig {
    film_sponsors: Option<Value>,
    sponsor_ads: Option<Value>,
    house_ads: Option<Value>,
    defaults: Option<Value>,
}

impl AdConfig {
    /// Document with no inventory at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a JSON document
    ///
    /// Fails only when the bytes are not JSON or the top level is not an
    /// object; everything below that is decoded leniently.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("ad config must be a JSON object"));
        }
        let raw: RawAdConfig = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawAdConfig) -> Self {
        let film_sponsors = match raw.film_sponsors {
            Some(Value::Object(map)) => decode_film_sponsors(map),
            None | Some(Value::Null) => HashMap::new(),
            Some(_) => {
                tracing::warn!("Ad config `filmSponsors` is not an object, ignoring");
                HashMap::new()
            }
        };

        Self {
            film_sponsors,
            sponsor_ads: decode_pool("sponsorAds", raw.sponsor_ads),
            house_ads: decode_pool("houseAds", raw.house_ads),
            defaults: Defaults::decode(raw.defaults),
        }
    }

    pub fn film_pool(&self, content_id: &str) -> Option<&[Ad]> {
        self.film_sponsors.get(content_id).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.film_sponsors.values().all(Vec::is_empty)
            && self.sponsor_ads.is_empty()
            && self.house_ads.is_empty()
    }
}

fn decode_film_sponsors(map: Map<String, Value>) -> HashMap<String, Vec<Ad>> {
    map.into_iter()
        .filter_map(|(content_id, value)| match value {
            Value::Array(_) => {
                let pool = format!("filmSponsors.{content_id}");
                let ads = decode_pool(&pool, Some(value));
                Some((content_id, ads))
            }
            _ => {
                tracing::warn!(
                    content_id = %content_id,
                    "Film sponsor entry is not a list, ignoring"
                );
                None
            }
        })
        .collect()
}

fn decode_pool(pool: &str, value: Option<Value>) -> Vec<Ad> {
    let items = match value {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => return Vec::new(),
        Some(_) => {
            tracing::warn!(pool, "Ad pool is not a list, ignoring");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Ad>(item) {
            Ok(ad) => Some(ad),
            Err(e) => {
                tracing::warn!(pool, index, error = %e, "Dropping malformed ad entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_document() {
        let json = br#"{
            "filmSponsors": {
                "X": [{"id": "f1", "priority": 5, "url": "a.mp4"}]
            },
            "sponsorAds": [{"id": "s1", "mp4": "https://cdn/s1.mp4", "start": "2025-01-01", "end": "2025-12-31"}],
            "houseAds": [{"id": "h1", "hls": "https://cdn/h1.m3u8", "durationSeconds": 30}],
            "defaults": {"durationSeconds": 20, "sponsorFillPercent": 40, "serveSponsors": false}
        }"#;

        let config = AdConfig::from_json_slice(json).unwrap();
        assert_eq!(config.film_pool("X").unwrap()[0].priority(), 5);
        assert_eq!(config.sponsor_ads[0].start.as_deref(), Some("2025-01-01"));
        assert_eq!(config.house_ads[0].duration_seconds, Some(30));
        assert_eq!(
            config.defaults,
            Defaults {
                duration_seconds: Some(20),
                sponsor_fill_percent: 40,
                serve_sponsors: false,
            }
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = AdConfig::from_json_slice(b"{}").unwrap();
        assert!(config.is_empty());
        assert_eq!(config.defaults, Defaults::default());
        assert_eq!(config.defaults.sponsor_fill_percent, 70);
        assert!(!config.defaults.serve_sponsors);
    }

    #[test]
    fn test_malformed_entry_is_dropped() {
        let json = br#"{"houseAds": [
            {"id": "ok", "url": "ok.mp4"},
            {"id": "bad", "durationSeconds": "fifteen"},
            "not-an-object"
        ]}"#;
        let config = AdConfig::from_json_slice(json).unwrap();
        assert_eq!(config.house_ads.len(), 1);
        assert_eq!(config.house_ads[0].id.as_deref(), Some("ok"));
    }

    #[test]
    fn test_wrongly_typed_pools_are_ignored() {
        let json = br#"{
            "filmSponsors": {"X": {"id": "f1"}, "Y": [{"id": "y1"}]},
            "sponsorAds": "nope",
            "defaults": {"sponsorFillPercent": "high", "serveSponsors": "yes"}
        }"#;
        let config = AdConfig::from_json_slice(json).unwrap();
        assert!(config.film_pool("X").is_none());
        assert_eq!(config.film_pool("Y").unwrap().len(), 1);
        assert!(config.sponsor_ads.is_empty());
        assert_eq!(config.defaults, Defaults::default());
    }

    #[test]
    fn test_fractional_fill_percent_floors() {
        let config =
            AdConfig::from_json_slice(br#"{"defaults": {"sponsorFillPercent": 33.9}}"#).unwrap();
        assert_eq!(config.defaults.sponsor_fill_percent, 33);
    }

    #[test]
    fn test_not_json_is_error() {
        assert!(AdConfig::from_json_slice(b"<html>oops</html>").is_err());
        assert!(AdConfig::from_json_slice(b"null").is_err());
        assert!(AdConfig::from_json_slice(b"[]").is_err());
    }

    #[test]
    fn test_ad_builders() {
        let ad = Ad::new("h1")
            .with_url("h1.mp4")
            .with_priority(3)
            .with_window(Some("2025-01-01"), None);
        assert_eq!(ad.priority(), 3);
        assert!(ad.active_window().is_some());
        assert_eq!(Ad::new("x").priority(), 0);
    }
}
