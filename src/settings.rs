//! Game settings
//!
//! Screen size, starting lives and presentation preferences. Physics
//! constants live in `consts` and are not configurable.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Screen;

/// Smallest screen that still fits one brick column and the paddle row
pub const MIN_SCREEN_WIDTH: f32 = BRICK_WIDTH + 2.0 * BRICK_MARGIN;
pub const MIN_SCREEN_HEIGHT: f32 = PADDLE_Y + 2.0 * PADDLE_HEIGHT;
/// Largest screen accepted; the brick wall grows with the width
pub const MAX_SCREEN_WIDTH: f32 = 4096.0;
pub const MAX_SCREEN_HEIGHT: f32 = 4096.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window title
    pub title: String,
    /// Playfield dimensions
    pub screen: Screen,
    /// Lives at session start; the run ends when they drop below zero
    pub starting_lives: i32,

    // === Accessibility ===
    /// Skip flash colors (timing of removals and serves is unchanged)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_owned(),
            screen: Screen::default(),
            starting_lives: 1,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values into a playable range
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.screen.width = clamp_dimension(
            "width",
            self.screen.width,
            SCREEN_WIDTH,
            MIN_SCREEN_WIDTH..=MAX_SCREEN_WIDTH,
        );
        self.screen.height = clamp_dimension(
            "height",
            self.screen.height,
            SCREEN_HEIGHT,
            MIN_SCREEN_HEIGHT..=MAX_SCREEN_HEIGHT,
        );
        self.starting_lives = self.starting_lives.max(0);
        self
    }
}

/// Non-finite values take `fallback`, the rest are clamped into `range`
fn clamp_dimension(name: &str, value: f32, fallback: f32, range: RangeInclusive<f32>) -> f32 {
    if !value.is_finite() {
        log::warn!("Screen {name} {value} is not finite, using {fallback}");
        return fallback;
    }
    if !range.contains(&value) {
        let clamped = value.clamp(*range.start(), *range.end());
        log::warn!("Screen {name} {value} out of range, using {clamped}");
        return clamped;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_board() {
        let s = Settings::default();
        assert_eq!(s.screen, Screen::new(830.0, 400.0));
        assert_eq!(s.starting_lives, 1);
        assert!(!s.reduced_motion);
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.starting_lives = 3;
        s.reduced_motion = true;
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "starting_lives": 2 }"#).unwrap();
        assert_eq!(s.starting_lives, 2);
        assert_eq!(s.screen, Screen::default());
        assert_eq!(s.title, WINDOW_TITLE);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json_or_default("{ nope"), Settings::default());
    }

    #[test]
    fn test_validated_clamps() {
        let s = Settings {
            screen: Screen::new(10.0, f32::NAN),
            starting_lives: -4,
            ..Default::default()
        }
        .validated();
        assert_eq!(s.screen.width, MIN_SCREEN_WIDTH);
        assert_eq!(s.screen.height, SCREEN_HEIGHT);
        assert_eq!(s.starting_lives, 0);
    }

    #[test]
    fn test_validated_rejects_infinite_width() {
        // 1e39 overflows f32 and parses as infinity
        let s = Settings::from_json(r#"{ "screen": { "width": 1e39, "height": 400 } }"#)
            .unwrap()
            .validated();
        assert!(s.screen.width.is_finite());
        assert_eq!(s.screen.width, SCREEN_WIDTH);
        assert_eq!(s.screen.height, 400.0);
    }

    #[test]
    fn test_validated_caps_huge_screen() {
        let s = Settings {
            screen: Screen::new(1e9, 1e9),
            ..Default::default()
        }
        .validated();
        assert_eq!(s.screen.width, MAX_SCREEN_WIDTH);
        assert_eq!(s.screen.height, MAX_SCREEN_HEIGHT);
    }
}
