//! Data-driven game balance
//!
//! Every number the simulation reads lives here so hosts can ship a JSON
//! file instead of recompiling. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ObstacleKind;

/// Reasons a tuning file is rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("Malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("min_spawn_interval_ms ({min}) exceeds base_spawn_interval_ms ({base})")]
    IntervalRange { min: f64, base: f64 },
    #[error("max_speed ({max}) is below base_speed ({base})")]
    SpeedRange { base: f32, max: f32 },
    #[error("max_speed must be finite, got {0}")]
    MaxSpeedNotFinite(f32),
    #[error("hitbox_padding must not be negative, got {0}")]
    NegativePadding(f32),
    #[error("hitbox_padding ({padding}) leaves no hitbox inside player_size ({player_size})")]
    HitboxInverted { padding: f32, player_size: f32 },
    #[error("player_bottom_fraction must be in [0, 1), got {0}")]
    PlayerBottomFraction(f32),
    #[error("slide_scale must be in (0, 1], got {0}")]
    SlideScale(f32),
    #[error("Obstacle kind weights must be non-negative and not all zero")]
    KindWeights,
}

/// Per-kind values (height scale, spawn weight)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerKind {
    pub normal: f32,
    pub high: f32,
    pub low: f32,
}

impl PerKind {
    pub fn get(&self, kind: ObstacleKind) -> f32 {
        match kind {
            ObstacleKind::Normal => self.normal,
            ObstacleKind::High => self.high,
            ObstacleKind::Low => self.low,
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen / geometry ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_size: f32,
    /// Player's bottom edge sits this fraction of the height above the screen bottom
    pub player_bottom_fraction: f32,
    pub hitbox_padding: f32,
    pub obstacle_size: f32,
    /// Obstacle height multiplier per kind (High is taller, Low is shorter)
    pub kind_scale: PerKind,

    // === Spawning ===
    /// Relative spawn weights per kind
    pub kind_weight: PerKind,

    // === Difficulty ramp ===
    pub base_speed: f32,
    pub max_speed: f32,
    pub base_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub difficulty_ramp_ms: f64,

    // === Vertical actions ===
    pub jump_duration_ms: f64,
    pub jump_height: f32,
    pub slide_duration_ms: f64,
    pub slide_scale: f32,

    // === Input ===
    pub lane_swipe_threshold: f32,
    pub vertical_swipe_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player_size: PLAYER_SIZE,
            player_bottom_fraction: PLAYER_BOTTOM_FRACTION,
            hitbox_padding: HITBOX_PADDING,
            obstacle_size: OBSTACLE_SIZE,
            kind_scale: PerKind {
                normal: 1.0,
                high: 1.5,
                low: 0.6,
            },

            kind_weight: PerKind {
                normal: 0.5,
                high: 0.25,
                low: 0.25,
            },

            base_speed: BASE_SPEED,
            max_speed: MAX_SPEED,
            base_spawn_interval_ms: BASE_SPAWN_INTERVAL,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL,
            difficulty_ramp_ms: DIFFICULTY_RAMP_MS,

            jump_duration_ms: JUMP_DURATION_MS,
            jump_height: JUMP_HEIGHT,
            slide_duration_ms: SLIDE_DURATION_MS,
            slide_scale: SLIDE_SCALE,

            lane_swipe_threshold: LANE_SWIPE_THRESHOLD,
            vertical_swipe_threshold: VERTICAL_SWIPE_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning ({}x{} screen)", tuning.screen_width, tuning.screen_height);
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers, serialization can't fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation can't make sense of
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive_f32 = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_size", self.player_size),
            ("obstacle_size", self.obstacle_size),
            ("base_speed", self.base_speed),
            ("jump_height", self.jump_height),
            ("lane_swipe_threshold", self.lane_swipe_threshold),
            ("vertical_swipe_threshold", self.vertical_swipe_threshold),
            ("kind_scale.normal", self.kind_scale.normal),
            ("kind_scale.high", self.kind_scale.high),
            ("kind_scale.low", self.kind_scale.low),
        ];
        for (field, value) in positive_f32 {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive {
                    field,
                    value: value as f64,
                });
            }
        }

        let positive_f64 = [
            ("base_spawn_interval_ms", self.base_spawn_interval_ms),
            ("min_spawn_interval_ms", self.min_spawn_interval_ms),
            ("difficulty_ramp_ms", self.difficulty_ramp_ms),
            ("jump_duration_ms", self.jump_duration_ms),
            ("slide_duration_ms", self.slide_duration_ms),
        ];
        for (field, value) in positive_f64 {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.min_spawn_interval_ms > self.base_spawn_interval_ms {
            return Err(TuningError::IntervalRange {
                min: self.min_spawn_interval_ms,
                base: self.base_spawn_interval_ms,
            });
        }
        if !self.max_speed.is_finite() {
            return Err(TuningError::MaxSpeedNotFinite(self.max_speed));
        }
        if self.max_speed < self.base_speed {
            return Err(TuningError::SpeedRange {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        if !(self.slide_scale > 0.0 && self.slide_scale <= 1.0) {
            return Err(TuningError::SlideScale(self.slide_scale));
        }

        // Padding eats into both edges of the player's square
        if !(self.hitbox_padding >= 0.0) {
            return Err(TuningError::NegativePadding(self.hitbox_padding));
        }
        if 2.0 * self.hitbox_padding >= self.player_size {
            return Err(TuningError::HitboxInverted {
                padding: self.hitbox_padding,
                player_size: self.player_size,
            });
        }
        if !(self.player_bottom_fraction >= 0.0 && self.player_bottom_fraction < 1.0) {
            return Err(TuningError::PlayerBottomFraction(self.player_bottom_fraction));
        }

        let w = self.kind_weight;
        let weights_ok = [w.normal, w.high, w.low]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
            && w.normal + w.high + w.low > 0.0;
        if !weights_ok {
            return Err(TuningError::KindWeights);
        }

        Ok(())
    }

    /// Lane pitch derived from screen width
    pub fn lane_width(&self) -> f32 {
        self.screen_width / LANE_COUNT as f32
    }

    /// Top edge of the player's square in screen space
    pub fn player_top(&self) -> f32 {
        self.screen_height - self.screen_height * self.player_bottom_fraction - self.player_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 250.0, "max_speed": 500.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 250.0);
        assert_eq!(tuning.max_speed, 500.0);
        assert_eq!(tuning.obstacle_size, OBSTACLE_SIZE);
        assert_eq!(tuning.kind_scale.high, 1.5);
    }

    #[test]
    fn test_round_trip_through_json() {
        let tuning = Tuning {
            jump_height: 140.0,
            ..Default::default()
        };
        let parsed = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let tuning = Tuning {
            min_spawn_interval_ms: 2000.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::IntervalRange { .. })
        ));

        let tuning = Tuning {
            max_speed: 100.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::SpeedRange { .. })));
    }

    #[test]
    fn test_rejects_bad_values() {
        let tuning = Tuning {
            obstacle_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive { field: "obstacle_size", .. })
        ));

        let tuning = Tuning {
            slide_scale: 1.5,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::SlideScale(_))));

        let tuning = Tuning {
            kind_weight: PerKind {
                normal: 0.0,
                high: 0.0,
                low: 0.0,
            },
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::KindWeights)));
    }

    #[test]
    fn test_rejects_max_speed_not_finite() {
        for max_speed in [f32::INFINITY, f32::NAN] {
            let tuning = Tuning {
                max_speed,
                ..Default::default()
            };
            assert!(matches!(
                tuning.validate(),
                Err(TuningError::MaxSpeedNotFinite(_))
            ));
        }
    }

    #[test]
    fn test_rejects_negative_padding() {
        let tuning = Tuning {
            hitbox_padding: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NegativePadding(_))
        ));

        let tuning = Tuning {
            hitbox_padding: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_rejects_padding_that_inverts_hitbox() {
        assert!(matches!(
            Tuning::from_json(r#"{ "hitbox_padding": 100.0 }"#),
            Err(TuningError::HitboxInverted { .. })
        ));

        // Exactly half the player leaves an empty band
        let tuning = Tuning {
            hitbox_padding: PLAYER_SIZE / 2.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::HitboxInverted { .. })
        ));

        let tuning = Tuning {
            hitbox_padding: PLAYER_SIZE / 2.0 - 1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_rejects_player_bottom_fraction_out_of_range() {
        for fraction in [-0.1, 1.0, 1.5, f32::NAN] {
            let tuning = Tuning {
                player_bottom_fraction: fraction,
                ..Default::default()
            };
            assert!(matches!(
                tuning.validate(),
                Err(TuningError::PlayerBottomFraction(_))
            ));
        }

        let tuning = Tuning {
            player_bottom_fraction: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_player_geometry() {
        let tuning = Tuning::default();
        assert!((tuning.lane_width() - 130.0).abs() < 1e-4);
        // 844 - 168.8 - 50
        assert!((tuning.player_top() - 625.2).abs() < 1e-3);
    }
}
