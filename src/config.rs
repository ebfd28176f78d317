//! Scene configuration.
//!
//! Every tunable lives in one [`SceneConfig`]: background, spring profiles
//! and the cast. All fields are optional in TOML; anything left out keeps
//! the built-in value. A `[[cast]]` table replaces the whole built-in cast.
//!
//! # Example
//!
//! ```
//! use login_monsters::config::SceneConfig;
//!
//! let config = SceneConfig::from_toml_str(r##"
//!     background = "#f5f0ff"
//!
//!     [springs.lean]
//!     stiffness = 800.0
//!     damping = 40.0
//!     mass = 0.1
//! "##).unwrap();
//!
//! assert_eq!(config.springs.lean.stiffness, 800.0);
//! assert_eq!(config.cast.len(), 4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::character::{CharacterConfig, presets};
use crate::error::{MonsterError, Result};
use crate::motion::SpringProfiles;
use crate::types::Rgba;

/// Everything the scene needs to build its characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas fill. Terminal default leaves the canvas transparent.
    pub background: Rgba,
    pub springs: SpringProfiles,
    /// Back to front.
    pub cast: Vec<CharacterConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Rgba::TERMINAL_DEFAULT,
            springs: SpringProfiles::default(),
            cast: presets::default_cast(),
        }
    }
}

impl SceneConfig {
    /// Read and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), characters = config.cast.len(), "loaded scene config");
        Ok(config)
    }

    /// Parse and validate an in-memory TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject anything the animation could not run with.
    pub fn validate(&self) -> Result<()> {
        if let Some(profile) = self.springs.first_invalid() {
            return Err(MonsterError::Invalid(format!(
                "{profile} spring needs positive stiffness and mass and non-negative damping"
            )));
        }
        if self.cast.is_empty() {
            return Err(MonsterError::Invalid("cast is empty".to_string()));
        }
        for character in &self.cast {
            character.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.background.is_terminal_default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_spring_override() {
        let config = SceneConfig::from_toml_str(
            r#"
            [springs.pupil]
            stiffness = 200.0
            "#,
        )
        .unwrap();
        assert_eq!(config.springs.pupil.stiffness, 200.0);
        assert_eq!(config.springs.pupil.damping, 20.0);
        assert_eq!(config.springs.lean, SpringProfiles::default().lean);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string(&SceneConfig::default()).unwrap();
        let parsed = SceneConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, SceneConfig::default());
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut config = SceneConfig::default();
        config.cast[1].face.divisor = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MonsterError::Invalid(ref msg) if msg.starts_with("Inky")));
    }

    #[test]
    fn test_character_table_overrides_cast() {
        let config = SceneConfig::from_toml_str(
            r##"
            [[cast]]
            name = "Blot"
            face_anchor = { x = 200.0, y = 150.0 }
            focus_lean = -4.0
            face = { divisor = 150.0, max_shift = 10.0 }
            pupil = { divisor = 100.0, max_shift = 3.0 }
            body = { kind = "dome", center_x = 200.0, base_y = 360.0, half_width = 80.0, height = 120.0 }
            palette = { body = "#336699", eye_white = "#ffffff", pupil = "#000000", mouth = "#000000" }
            eyes = { left = { x = 185.0, y = 150.0 }, right = { x = 215.0, y = 150.0 }, radius = 5.0, pupil_radii = [5.0, 5.0] }
            mouth = { center = { x = 200.0, y = 170.0 }, width = 12.0, depth = 4.0, attentive_size = 4.0 }
            poses = { eyes = "tracking_dot", password_eyes = "tracking_dot", attentive_mouth = "attentive_dot" }
            "##,
        )
        .unwrap();
        assert_eq!(config.cast.len(), 1);
        let blot = &config.cast[0];
        assert_eq!(blot.entrance, crate::motion::Entrance::INSTANT);
        assert!(blot.tilt.is_identity());
        assert!(!blot.mouth.filled);
    }

    #[test]
    fn test_invalid_character_is_invalid_error() {
        let mut config = SceneConfig::default();
        config.cast[2].entrance.scale_from = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MonsterError::Invalid(ref msg) if msg.starts_with("Gloop: entrance")));
    }

    #[test]
    fn test_invalid_spring_rejected() {
        let err = SceneConfig::from_toml_str(
            r#"
            [springs.gaze]
            mass = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, MonsterError::Invalid(ref msg) if msg.starts_with("gaze")));
    }

    #[test]
    fn test_bad_color_is_parse_error() {
        let err = SceneConfig::from_toml_str(r#"background = "purple""#).unwrap_err();
        assert!(matches!(err, MonsterError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SceneConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, MonsterError::Io(_)));
    }
}
