//! Decision Engine
//!
//! Tiered fallback over the inventory document:
//! 1. film sponsor override for the requested title
//! 2. sponsor/house mix, arbitrated by the fill-percent roll
//! 3. house rotation
//! 4. no ad
//!
//! The first tier yielding a candidate wins. A candidate without a servable
//! creative ends the decision with "no ad"; it is not replaced.

use crate::domain::entities::{Ad, AdConfig};
use crate::domain::services::{
    filter_active, hash32, pick_highest_priority, pick_rotation, resolve_duration, resolve_media,
};
use crate::domain::value_objects::{MediaFile, SelectionContext, Tier};

/// Ad chosen for this request, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub ad: Ad,
    pub tier: Tier,
    pub media: MediaFile,
    pub duration_seconds: u32,
}

/// Why nothing was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAdReason {
    /// The inventory document could not be loaded
    ConfigUnavailable,
    /// No tier produced a candidate
    NoEligibleInventory,
    /// The candidate had no mp4/hls/recognisable url
    UnusableCreative,
}

impl NoAdReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoAdReason::ConfigUnavailable => "config_unavailable",
            NoAdReason::NoEligibleInventory => "no_eligible_inventory",
            NoAdReason::UnusableCreative => "unusable_creative",
        }
    }
}

/// Engine output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Serve(Placement),
    NoAd(NoAdReason),
}

impl Decision {
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Decision::Serve(p) => Some(p),
            Decision::NoAd(_) => None,
        }
    }

    pub fn is_no_ad(&self) -> bool {
        matches!(self, Decision::NoAd(_))
    }
}

/// Run the tiers against `config` for `ctx`
pub fn decide(config: &AdConfig, ctx: &SelectionContext) -> Decision {
    let Some((tier, ad)) = choose(config, ctx) else {
        return Decision::NoAd(NoAdReason::NoEligibleInventory);
    };

    let Some(media) = resolve_media(ad) else {
        tracing::debug!(
            ad_id = ad.id.as_deref().unwrap_or_default(),
            tier = %tier,
            "Chosen ad has no servable creative"
        );
        return Decision::NoAd(NoAdReason::UnusableCreative);
    };

    Decision::Serve(Placement {
        ad: ad.clone(),
        tier,
        media,
        duration_seconds: resolve_duration(ad, &config.defaults),
    })
}

fn choose<'a>(config: &'a AdConfig, ctx: &SelectionContext) -> Option<(Tier, &'a Ad)> {
    let today = ctx.today;
    let bucket = ctx.bucket;

    // Tier 1: title-specific sponsor beats everything, including the switch
    if let Some(film_pool) = config.film_pool(ctx.content_id.as_str()) {
        let active = filter_active(film_pool, today);
        if let Some(ad) = pick_highest_priority(&active, &ctx.seed(Tier::Film), bucket) {
            return Some((Tier::Film, ad));
        }
    }

    let house = filter_active(&config.house_ads, today);

    // Tier 2: sponsor/house mix
    if config.defaults.serve_sponsors {
        let sponsors = filter_active(&config.sponsor_ads, today);
        let roll = hash32(&ctx.fill_key()) % 100;
        let sponsor_wins = i64::from(roll) < config.defaults.sponsor_fill_percent;

        tracing::trace!(
            roll,
            fill = config.defaults.sponsor_fill_percent,
            sponsors = sponsors.len(),
            house = house.len(),
            "Sponsor fill roll"
        );

        let pick = if sponsor_wins && !sponsors.is_empty() {
            pick_highest_priority(&sponsors, &ctx.seed(Tier::Sponsor), bucket)
                .map(|ad| (Tier::Sponsor, ad))
        } else if !house.is_empty() {
            pick_rotation(&house, &ctx.seed(Tier::House), bucket).map(|ad| (Tier::House, *ad))
        } else {
            pick_highest_priority(&sponsors, &ctx.seed(Tier::Sponsor), bucket)
                .map(|ad| (Tier::Sponsor, ad))
        };

        if pick.is_some() {
            return pick;
        }
    }

    // Tier 3: house rotation
    pick_rotation(&house, &ctx.seed(Tier::House), bucket).map(|ad| (Tier::House, *ad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Defaults;
    use chrono::NaiveDate;
    use kernel::id::ContentId;

    fn ctx(content: &str, viewer: &str, bucket: i64) -> SelectionContext {
        SelectionContext::new(
            ContentId::new(content),
            viewer,
            bucket,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    fn config(fill: i64, serve_sponsors: bool) -> AdConfig {
        AdConfig {
            sponsor_ads: vec![Ad::new("s1").with_url("s1.mp4")],
            house_ads: vec![
                Ad::new("h1").with_url("h1.mp4"),
                Ad::new("h2").with_url("h2.mp4"),
            ],
            defaults: Defaults {
                duration_seconds: None,
                sponsor_fill_percent: fill,
                serve_sponsors,
            },
            ..AdConfig::default()
        }
    }

    fn tier_of(decision: &Decision) -> Option<Tier> {
        decision.placement().map(|p| p.tier)
    }

    #[test]
    fn test_fill_100_always_sponsor() {
        let config = config(100, true);
        for bucket in 0..100 {
            assert_eq!(tier_of(&decide(&config, &ctx("c", "v", bucket))), Some(Tier::Sponsor));
        }
    }

    #[test]
    fn test_fill_0_always_house() {
        let config = config(0, true);
        for bucket in 0..100 {
            assert_eq!(tier_of(&decide(&config, &ctx("c", "v", bucket))), Some(Tier::House));
        }
    }

    #[test]
    fn test_roll_decides_branch() {
        let config = config(50, true);
        for bucket in 0..100 {
            let c = ctx("c", "v", bucket);
            let roll = hash32(&c.fill_key()) % 100;
            let expected = if roll < 50 { Tier::Sponsor } else { Tier::House };
            assert_eq!(tier_of(&decide(&config, &c)), Some(expected));
        }
    }

    #[test]
    fn test_house_roll_falls_back_to_sponsor_when_no_house() {
        let mut config = config(0, true);
        config.house_ads.clear();
        assert_eq!(tier_of(&decide(&config, &ctx("c", "v", 1))), Some(Tier::Sponsor));
    }

    #[test]
    fn test_sponsor_roll_falls_back_to_house_when_no_sponsor() {
        let mut config = config(100, true);
        config.sponsor_ads[0] = Ad::new("s1")
            .with_url("s1.mp4")
            .with_window(None, Some("2020-01-01"));
        assert_eq!(tier_of(&decide(&config, &ctx("c", "v", 1))), Some(Tier::House));
    }

    #[test]
    fn test_absent_switch_keeps_sponsors_off() {
        let config = AdConfig::from_json_slice(
            br#"{
                "sponsorAds": [{"id": "s1", "url": "s1.mp4"}],
                "houseAds": [{"id": "h1", "url": "h1.mp4"}],
                "defaults": {"sponsorFillPercent": 100}
            }"#,
        )
        .unwrap();
        assert!(!config.defaults.serve_sponsors);

        for bucket in 0..100 {
            let decision = decide(&config, &ctx("c", &format!("v{bucket}"), bucket));
            assert_eq!(tier_of(&decision), Some(Tier::House));
        }
    }

    #[test]
    fn test_film_pool_with_nothing_active_falls_through() {
        let mut config = config(0, true);
        config.film_sponsors.insert(
            "c".into(),
            vec![Ad::new("f1").with_url("f1.mp4").with_window(Some("2030-01-01"), None)],
        );
        assert_eq!(tier_of(&decide(&config, &ctx("c", "v", 1))), Some(Tier::House));
    }

    #[test]
    fn test_unusable_creative_is_no_ad() {
        let config = AdConfig {
            house_ads: vec![Ad::new("h1").with_url("h1.webm")],
            ..AdConfig::default()
        };
        assert_eq!(
            decide(&config, &ctx("c", "v", 1)),
            Decision::NoAd(NoAdReason::UnusableCreative)
        );
    }

    #[test]
    fn test_duration_is_resolved() {
        let mut config = config(0, false);
        config.defaults.duration_seconds = Some(25);
        let decision = decide(&config, &ctx("c", "v", 1));
        assert_eq!(decision.placement().unwrap().duration_seconds, 25);
    }

    #[test]
    fn test_viewers_spread_over_house_pool() {
        let config = config(0, false);
        let ids: std::collections::HashSet<_> = (0..100)
            .map(|i| {
                decide(&config, &ctx("c", &format!("viewer-{i}"), 1))
                    .placement()
                    .unwrap()
                    .ad
                    .id
                    .clone()
            })
            .collect();
        assert_eq!(ids.len(), 2);
    }
}
