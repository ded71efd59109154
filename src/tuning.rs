//! Data-driven spawn balance
//!
//! Loaded from JSON. Missing fields take their defaults, so a tuning file
//! only needs to list what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::CometKind;

/// Relative spawn weights per kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindWeights {
    pub slow: f32,
    pub fast: f32,
    pub regular: f32,
    pub award: f32,
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            slow: 2.0,
            fast: 3.0,
            regular: 4.0,
            award: 1.0,
        }
    }
}

impl KindWeights {
    pub fn weight(&self, kind: CometKind) -> f32 {
        match kind {
            CometKind::Slow => self.slow,
            CometKind::Fast => self.fast,
            CometKind::Regular => self.regular,
            CometKind::Award => self.award,
        }
        .max(0.0)
    }

    pub fn total(&self) -> f32 {
        CometKind::ALL.iter().map(|k| self.weight(*k)).sum()
    }

    /// Map a roll in [0, total) to a kind
    pub fn pick(&self, roll: f32) -> CometKind {
        let mut acc = 0.0;
        for kind in CometKind::ALL {
            acc += self.weight(kind);
            if roll < acc {
                return kind;
            }
        }
        CometKind::Regular
    }
}

/// Emitter and play-field balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play field size (centered on the origin)
    pub field_width: f32,
    pub field_height: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Maximum comets in flight
    pub max_comets: usize,
    /// Seconds for a comet to cross the field, per kind
    pub slow_fall_duration: f32,
    pub regular_fall_duration: f32,
    pub fast_fall_duration: f32,
    pub award_fall_duration: f32,
    pub weights: KindWeights,
    /// Player circle radius
    pub player_radius: f32,
    /// Player horizontal speed (units per second)
    pub player_speed: f32,
    /// Score gained per second survived
    pub score_per_second: f32,
    /// Bonus for catching an award
    pub award_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 640.0,
            field_height: 1136.0,
            spawn_interval: 0.8,
            max_comets: 12,
            slow_fall_duration: 6.0,
            regular_fall_duration: 4.0,
            fast_fall_duration: 2.5,
            award_fall_duration: 3.5,
            weights: KindWeights::default(),
            player_radius: 24.0,
            player_speed: 900.0,
            score_per_second: 5.0,
            award_bonus: 10,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Using default tuning ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Time to cross the field for a kind
    pub fn fall_duration(&self, kind: CometKind) -> f32 {
        match kind {
            CometKind::Slow => self.slow_fall_duration,
            CometKind::Regular => self.regular_fall_duration,
            CometKind::Fast => self.fast_fall_duration,
            CometKind::Award => self.award_fall_duration,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.field_width * 0.5
    }

    pub fn half_height(&self) -> f32 {
        self.field_height * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval": 0.25, "weights": { "award": 0.0 } }"#)
            .expect("valid json");
        assert_eq!(tuning.spawn_interval, 0.25);
        assert_eq!(tuning.field_width, 640.0);
        assert_eq!(tuning.weights.award, 0.0);
        assert_eq!(tuning.weights.regular, 4.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ spawn_interval: }").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_weights_pick() {
        let weights = KindWeights {
            slow: 1.0,
            fast: 0.0,
            regular: 1.0,
            award: 1.0,
        };
        assert_eq!(weights.total(), 3.0);
        assert_eq!(weights.pick(0.5), CometKind::Slow);
        assert_eq!(weights.pick(1.5), CometKind::Regular);
        assert_eq!(weights.pick(2.5), CometKind::Award);
    }
}
