//! Scene profile
//!
//! Load and save a scene configuration (section order + transition table)
//! from/to JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{SceneController, SceneError, Section, TransitionTable};

/// Profile format version
pub const PROFILE_VERSION: &str = "1.0";

/// Profile error types
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unsupported profile version: {0}")]
    UnsupportedVersion(String),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneProfile {
    /// Profile format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Section names in narrative order
    pub sections: Vec<String>,
    /// Transition table over those sections
    #[serde(default)]
    pub table: TransitionTable,
}

fn default_version() -> String {
    PROFILE_VERSION.to_string()
}

impl SceneProfile {
    pub fn new(sections: Vec<String>, table: TransitionTable) -> Self {
        Self {
            version: PROFILE_VERSION.to_string(),
            sections,
            table,
        }
    }

    /// Parse a profile, rejecting unknown format versions
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: SceneProfile = serde_json::from_str(json)?;

        if profile.version != PROFILE_VERSION {
            return Err(ProfileError::UnsupportedVersion(profile.version));
        }

        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a controller with bare sections in profile order and the
    /// profile's table installed. Hooks are wired afterwards by the app.
    pub fn instantiate<C>(&self) -> Result<SceneController<C>, ProfileError> {
        let mut scene = SceneController::new();

        for name in &self.sections {
            scene.register(Section::new(name.clone()))?;
        }

        scene.set_table(self.table.clone())?;
        Ok(scene)
    }
}
