//! Domain Services
//!
//! Pure selection logic. Nothing here reads the clock or any shared state:
//! every "random" choice is a hash of its inputs.

use crate::domain::entities::{Ad, Defaults};
use crate::domain::value_objects::MediaFile;
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;

/// Duration used when neither the ad nor the defaults set one
pub const FALLBACK_DURATION_SECS: u32 = 15;

/// Polynomial rolling hash: `h = h * 31 + c (mod 2^32)` over UTF-16 code units
///
/// Must stay bit-for-bit stable: rotation outcomes are compared across
/// deployments and against players that compute the same recurrence.
pub fn hash32(key: &str) -> u32 {
    key.encode_utf16()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(u32::from(c)))
}

/// `floor(now / window)`; a zero window is treated as 1 ms
pub fn time_bucket(window: Duration, now: DateTime<Utc>) -> i64 {
    let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX).max(1);
    now.timestamp_millis().div_euclid(window_ms)
}

/// Bucket keyed on playback position instead of wall-clock time
pub fn position_bucket(position_secs: u64, window_secs: u64) -> i64 {
    i64::try_from(position_secs / window_secs.max(1)).unwrap_or(i64::MAX)
}

/// Ads whose active window covers `today`, in their original order
///
/// Ads with a malformed date bound are never active.
pub fn filter_active(ads: &[Ad], today: NaiveDate) -> Vec<&Ad> {
    ads.iter()
        .filter(|ad| ad.active_window().is_some_and(|w| w.contains(today)))
        .collect()
}

/// Deterministic pick: `list[hash32("{seed}|{bucket}|{len}") % len]`
pub fn pick_rotation<'a, T>(list: &'a [T], seed: &str, bucket: i64) -> Option<&'a T> {
    if list.is_empty() {
        return None;
    }
    let key = format!("{}|{}|{}", seed, bucket, list.len());
    let index = hash32(&key) as usize % list.len();
    list.get(index)
}

/// Rotate among the ads sharing the highest priority
pub fn pick_highest_priority<'a>(active: &[&'a Ad], seed: &str, bucket: i64) -> Option<&'a Ad> {
    let top_priority = active.iter().map(|ad| ad.priority()).max()?;

    // Stable: list order among equals is preserved before rotating.
    let top: Vec<&Ad> = active
        .iter()
        .copied()
        .filter(|ad| ad.priority() == top_priority)
        .collect();

    pick_rotation(&top, seed, bucket)
        .copied()
        .or_else(|| top.first().copied())
}

/// Resolve the creative to serve; `None` means the ad is unservable
pub fn resolve_media(ad: &Ad) -> Option<MediaFile> {
    if let Some(mp4) = non_blank(ad.mp4.as_deref()) {
        return Some(MediaFile::progressive(mp4));
    }
    if let Some(hls) = non_blank(ad.hls.as_deref()) {
        return Some(MediaFile::streaming(hls));
    }

    let url = non_blank(ad.url.as_deref())?;
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .to_ascii_lowercase();

    if path.ends_with(".mp4") {
        Some(MediaFile::progressive(url))
    } else if path.ends_with(".m3u8") {
        Some(MediaFile::streaming(url))
    } else {
        None
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Ad duration, then document default, then 15 s
pub fn resolve_duration(ad: &Ad, defaults: &Defaults) -> u32 {
    ad.duration_seconds
        .or(defaults.duration_seconds)
        .unwrap_or(FALLBACK_DURATION_SECS)
}

/// `HH:MM:SS`, zero padded
pub fn format_duration(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
