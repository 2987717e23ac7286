//! Per-process strip settings.
//!
//! Explicit process-scoped state, loaded once and injected into the
//! components that need it; refreshed through [`StripConfig::load`] when a
//! settings-changed event arrives, never read from ambient statics.

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "ledge";
const CONFIG_NAME: &str = "strip";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Gap kept between neighbouring widgets, physical px.
    pub margin: i32,
    /// Inset from the strip's right edge used when the platform reports no
    /// reserved system region.
    pub fallback_inset: i32,
    /// Horizontal pointer travel (px) before a press becomes a drag.
    pub drag_dead_zone: i32,
    /// Exponential convergence factor applied per animation frame.
    pub anim_factor: f32,
    /// Distance (px) under which an animated window snaps to its target.
    pub anim_epsilon: f32,
    /// Half-period of the shared blink clock.
    pub blink_interval_ms: u64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            margin: 4,
            fallback_inset: 200,
            drag_dead_zone: 5,
            anim_factor: 0.25,
            anim_epsilon: 1.0,
            blink_interval_ms: 500,
        }
    }
}

impl StripConfig {
    /// Load the persisted config, falling back to defaults on any trouble.
    pub fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load strip config, using defaults");
            Self::default()
        })
    }

    pub fn save(self) {
        if let Err(e) = confy::store(APP_NAME, CONFIG_NAME, self) {
            tracing::warn!(error = %e, "failed to save strip config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = StripConfig::default();
        assert!(config.margin > 0);
        assert!(config.drag_dead_zone > 0);
        assert!(config.anim_factor > 0.0 && config.anim_factor < 1.0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        // Older config files may miss newer fields.
        let config: StripConfig = serde_json::from_str(r#"{"margin": 8}"#).expect("parse");
        assert_eq!(config.margin, 8);
        assert_eq!(config.drag_dead_zone, StripConfig::default().drag_dead_zone);
    }
}
