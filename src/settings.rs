//! Widget settings
//!
//! Fixed for the lifetime of the process: read once (defaults or a JSON file)
//! and handed to `WidgetState::new`.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Phase, bounce};

/// Durations and geometry for one widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timer ===
    /// Focus phase length in seconds
    pub focus_secs: u32,
    /// Break phase length in seconds
    pub break_secs: u32,

    // === Canvas ===
    pub canvas_width: i32,
    pub canvas_height: i32,

    // === Icon ===
    pub icon_width: i32,
    pub icon_height: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_secs: FOCUS_SECS,
            break_secs: BREAK_SECS,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            icon_width: ICON_WIDTH,
            icon_height: ICON_HEIGHT,
        }
    }
}

impl Settings {
    /// Canvas size as a vector
    pub fn canvas(&self) -> IVec2 {
        IVec2::new(self.canvas_width, self.canvas_height)
    }

    /// Icon size as a vector
    pub fn icon(&self) -> IVec2 {
        IVec2::new(self.icon_width, self.icon_height)
    }

    /// Configured duration for a phase
    pub fn duration_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::Break => self.break_secs,
        }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every construction precondition of the timer and animator
    pub fn validate(&self) -> Result<(), ConfigError> {
        for phase in [Phase::Focus, Phase::Break] {
            if self.duration_for(phase) == 0 {
                return Err(ConfigError::ZeroDuration(phase));
            }
        }

        let icon = self.icon();
        let canvas = self.canvas();
        if icon.min_element() < 1 {
            return Err(ConfigError::EmptyIcon {
                width: icon.x,
                height: icon.y,
            });
        }
        if icon.cmpgt(canvas).any() {
            return Err(ConfigError::IconExceedsCanvas {
                icon_width: icon.x,
                icon_height: icon.y,
                canvas_width: canvas.x,
                canvas_height: canvas.y,
            });
        }

        let step = bounce::step_for(canvas);
        if step.cmpgt(icon).any() {
            return Err(ConfigError::StepExceedsIcon {
                step_x: step.x,
                step_y: step.y,
                icon_width: icon.x,
                icon_height: icon.y,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.duration_for(Phase::Focus), 1500);
        assert_eq!(settings.duration_for(Phase::Break), 300);
        assert_eq!(settings.canvas(), IVec2::new(200, 200));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{ "focus_secs": 60 }"#).unwrap();
        assert_eq!(settings.focus_secs, 60);
        assert_eq!(settings.break_secs, BREAK_SECS);
        assert_eq!(settings.icon(), IVec2::new(ICON_WIDTH, ICON_HEIGHT));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Settings::from_json("{ focus_secs: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let settings = Settings {
            break_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ZeroDuration(Phase::Break))
        ));
    }

    #[test]
    fn test_empty_icon_rejected() {
        let settings = Settings {
            icon_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::EmptyIcon { width: 0, .. })
        ));
    }

    #[test]
    fn test_icon_larger_than_canvas_rejected() {
        let settings = Settings {
            icon_height: 201,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::IconExceedsCanvas { .. })
        ));
    }

    #[test]
    fn test_step_larger_than_icon_rejected() {
        // 600 / 2 / 30 = 10 px per tick against a 4 px icon
        let settings = Settings {
            canvas_width: 600,
            icon_width: 4,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::StepExceedsIcon { step_x: 10, .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/bounce-pomodoro.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
