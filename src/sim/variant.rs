//! Comet variants: per-kind radius, sprite/glow assets and physics category
//!
//! Everything here is a pure lookup. A comet picks its variant once, at
//! spawn, from its kind and the score at that moment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::category;
use crate::consts::*;

/// Texture names shipped with the game's atlas
pub mod texture {
    pub const COMET_LARGE: [&str; 3] = ["CometLarge", "CometLarge2", "CometLarge3"];
    pub const COMET_LARGE_GLOW: [&str; 3] = ["CometLargeGlow", "CometLargeGlow2", "CometLargeGlow3"];
    pub const COMET_MEDIUM: [&str; 3] = ["CometMedium", "CometMedium2", "CometMedium3"];
    pub const COMET_MEDIUM_GLOW: [&str; 3] =
        ["CometMediumGlow", "CometMediumGlow2", "CometMediumGlow3"];
    pub const COMET_SMALL: [&str; 3] = ["CometSmall", "CometSmall2", "CometSmall3"];
    pub const COMET_SMALL_GLOW: [&str; 3] = ["CometSmallGlow", "CometSmallGlow2", "CometSmallGlow3"];
    pub const COMET_STAR: [&str; 3] = ["CometStar", "CometStar2", "CometStar3"];
    pub const COMET_STAR_GLOW: [&str; 3] = ["CometStarGlow", "CometStarGlow2", "CometStarGlow3"];

    pub const CRACKED_LARGE: &str = "CrackedLarge";
    pub const CRACKED_MEDIUM: &str = "CrackedMedium";
    pub const CRACKED_SMALL: &str = "CrackedSmall";
    pub const CRACKED_RED: &str = "CrackedRed";
    pub const EXPLOSION: [&str; 5] = ["Explosion1", "Explosion2", "Explosion3", "Explosion4", "Explosion5"];

    /// Particle effect file for the explosion glow
    pub const EXPLOSION_GLOW_EFFECT: &str = "ExplosionGlow";
}

/// Comet kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CometKind {
    /// Large and slow
    Slow,
    /// Small and quick
    Fast,
    /// Medium sized
    Regular,
    /// Star pickup, worth points instead of a life
    Award,
}

impl CometKind {
    pub const ALL: [CometKind; 4] = [
        CometKind::Slow,
        CometKind::Fast,
        CometKind::Regular,
        CometKind::Award,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CometKind::Slow => "slow",
            CometKind::Fast => "fast",
            CometKind::Regular => "regular",
            CometKind::Award => "award",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" | "large" => Some(CometKind::Slow),
            "fast" | "small" => Some(CometKind::Fast),
            "regular" | "medium" => Some(CometKind::Regular),
            "award" | "star" => Some(CometKind::Award),
            _ => None,
        }
    }

    /// Collision radius, independent of score
    pub fn radius(&self) -> f32 {
        match self {
            CometKind::Slow => SLOW_RADIUS,
            CometKind::Regular => REGULAR_RADIUS,
            CometKind::Fast => FAST_RADIUS,
            CometKind::Award => AWARD_RADIUS,
        }
    }

    /// Awards have no specular highlight overlay
    pub fn has_highlight(&self) -> bool {
        *self != CometKind::Award
    }

    /// Physics category bit for contact filtering
    pub fn category(&self) -> u32 {
        match self {
            CometKind::Award => category::AWARD,
            _ => category::COMET,
        }
    }

    /// First frame of the explosion animation (crack size follows comet size)
    pub fn crack_texture(&self) -> &'static str {
        match self {
            CometKind::Slow => texture::CRACKED_LARGE,
            CometKind::Fast => texture::CRACKED_SMALL,
            CometKind::Regular | CometKind::Award => texture::CRACKED_MEDIUM,
        }
    }
}

/// Asset bracket chosen from the score at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VisualTier {
    Base,
    Tier2,
    Tier3,
}

impl VisualTier {
    /// Base up to 90, Tier2 in (90, 190], Tier3 above 190
    pub fn for_score(score: u64) -> Self {
        if score > TIER3_MIN_SCORE_EXCLUSIVE {
            VisualTier::Tier3
        } else if score > TIER2_MIN_SCORE_EXCLUSIVE {
            VisualTier::Tier2
        } else {
            VisualTier::Base
        }
    }

    fn index(&self) -> usize {
        match self {
            VisualTier::Base => 0,
            VisualTier::Tier2 => 1,
            VisualTier::Tier3 => 2,
        }
    }
}

/// Sprite + glow texture pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetPair {
    pub sphere: &'static str,
    pub glow: &'static str,
}

/// Everything a comet needs to know about its kind, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CometVariant {
    pub kind: CometKind,
    pub tier: VisualTier,
    pub collision_radius: f32,
    pub assets: AssetPair,
    /// Glow anchor override; None keeps the sprite's default center anchor
    pub glow_anchor: Option<Vec2>,
    pub has_highlight: bool,
}

impl CometVariant {
    /// Resolve the variant for a kind at the given score
    pub fn select(kind: CometKind, score: u64) -> Self {
        let tier = VisualTier::for_score(score);
        let i = tier.index();

        let (sphere, glow) = match kind {
            CometKind::Slow => (texture::COMET_LARGE[i], texture::COMET_LARGE_GLOW[i]),
            CometKind::Fast => (texture::COMET_SMALL[i], texture::COMET_SMALL_GLOW[i]),
            CometKind::Regular => (texture::COMET_MEDIUM[i], texture::COMET_MEDIUM_GLOW[i]),
            CometKind::Award => (texture::COMET_STAR[i], texture::COMET_STAR_GLOW[i]),
        };

        // Off-center anchor makes the glow trail like a flare
        let glow_anchor = match kind {
            CometKind::Award => None,
            _ => Some(Vec2::new(FLARE_ANCHOR.0, FLARE_ANCHOR.1)),
        };

        Self {
            kind,
            tier,
            collision_radius: kind.radius(),
            assets: AssetPair { sphere, glow },
            glow_anchor,
            has_highlight: kind.has_highlight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(VisualTier::for_score(0), VisualTier::Base);
        assert_eq!(VisualTier::for_score(90), VisualTier::Base);
        assert_eq!(VisualTier::for_score(91), VisualTier::Tier2);
        assert_eq!(VisualTier::for_score(190), VisualTier::Tier2);
        assert_eq!(VisualTier::for_score(191), VisualTier::Tier3);
        assert_eq!(VisualTier::for_score(u64::MAX), VisualTier::Tier3);
    }

    #[test]
    fn test_regular_assets_by_score() {
        assert_eq!(CometVariant::select(CometKind::Regular, 50).assets.sphere, "CometMedium");
        assert_eq!(CometVariant::select(CometKind::Regular, 150).assets.sphere, "CometMedium2");
        let top = CometVariant::select(CometKind::Regular, 250);
        assert_eq!(top.tier, VisualTier::Tier3);
        assert_eq!(top.assets.sphere, "CometMedium3");
        assert_eq!(top.assets.glow, "CometMediumGlow3");
    }

    #[test]
    fn test_every_kind_tier_pair_is_distinct() {
        let mut seen = HashSet::new();
        for kind in CometKind::ALL {
            for score in [0, 100, 200] {
                let v = CometVariant::select(kind, score);
                assert!(seen.insert(v.assets.sphere), "duplicate sphere {}", v.assets.sphere);
                assert!(seen.insert(v.assets.glow), "duplicate glow {}", v.assets.glow);
            }
        }
    }

    #[test]
    fn test_award_uses_default_anchor() {
        assert!(CometVariant::select(CometKind::Award, 0).glow_anchor.is_none());
        let slow = CometVariant::select(CometKind::Slow, 0);
        assert_eq!(slow.glow_anchor, Some(Vec2::new(0.68, 0.38)));
    }

    #[test]
    fn test_crack_texture_follows_size() {
        assert_eq!(CometKind::Slow.crack_texture(), texture::CRACKED_LARGE);
        assert_eq!(CometKind::Fast.crack_texture(), texture::CRACKED_SMALL);
        assert_eq!(CometKind::Regular.crack_texture(), texture::CRACKED_MEDIUM);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(CometKind::from_str("STAR"), Some(CometKind::Award));
        assert_eq!(CometKind::from_str("regular"), Some(CometKind::Regular));
        assert_eq!(CometKind::from_str("meteor"), None);
    }

    fn any_kind() -> impl Strategy<Value = CometKind> {
        prop::sample::select(CometKind::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn radius_depends_only_on_kind(kind in any_kind(), a in any::<u64>(), b in any::<u64>()) {
            let va = CometVariant::select(kind, a);
            let vb = CometVariant::select(kind, b);
            prop_assert_eq!(va.collision_radius, vb.collision_radius);
            prop_assert_eq!(va.collision_radius, kind.radius());
        }

        #[test]
        fn highlight_absent_only_for_award(kind in any_kind(), score in any::<u64>()) {
            let v = CometVariant::select(kind, score);
            prop_assert_eq!(v.has_highlight, kind != CometKind::Award);
        }

        #[test]
        fn tier_matches_brackets(score in any::<u64>()) {
            let tier = VisualTier::for_score(score);
            let expected = if score <= 90 {
                VisualTier::Base
            } else if score <= 190 {
                VisualTier::Tier2
            } else {
                VisualTier::Tier3
            };
            prop_assert_eq!(tier, expected);
            prop_assert_eq!(tier, VisualTier::for_score(score));
        }
    }
}
