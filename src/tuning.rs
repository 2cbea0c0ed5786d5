//! Data-driven tuning knobs
//!
//! Defaults match the classic demo values; a JSON file named by the
//! `MICRO_PONG_TUNING` environment variable overrides them at startup.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Gameplay knobs fixed for the lifetime of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball displacement per game tick
    pub ball_velocity: [i32; 2],
    /// Ball circle radius in pixels
    pub ball_radius: i32,
    /// Paddle speed while a button is held (pixels per game tick)
    pub paddle_speed: i32,
    /// Raw interrupts per game tick
    pub tick_divisor: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_velocity: [4, 3],
            ball_radius: 3,
            paddle_speed: 4,
            tick_divisor: crate::consts::TICK_DIVISOR,
        }
    }
}

impl Tuning {
    #[inline]
    pub fn ball_velocity(&self) -> IVec2 {
        IVec2::from_array(self.ball_velocity)
    }

    /// Environment variable naming the override file
    const ENV_KEY: &'static str = "MICRO_PONG_TUNING";

    /// Load tuning, falling back to defaults on any failure
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_KEY) else {
            log::info!("using default tuning");
            return Self::default();
        };
        match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("ignoring tuning file {path}: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_values() {
        let t = Tuning::default();
        assert_eq!(t.ball_velocity(), IVec2::new(4, 3));
        assert_eq!(t.ball_radius, 3);
        assert_eq!(t.paddle_speed, 4);
        assert_eq!(t.tick_divisor, 15);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"paddle_speed": 6}"#).unwrap();
        assert_eq!(t.paddle_speed, 6);
        assert_eq!(t.ball_velocity, [4, 3]);
    }
}
