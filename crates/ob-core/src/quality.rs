//! Render quality toggle
//!
//! The scene renders at full or half resolution; the menu flips between the
//! two at runtime.

use serde::{Deserialize, Serialize};

/// Render quality setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderQuality {
    /// Half-resolution rendering
    Half,
    /// Full-resolution rendering
    #[default]
    Full,
}

impl RenderQuality {
    /// Resolution scale factor applied by the renderer
    pub fn factor(self) -> f32 {
        match self {
            RenderQuality::Half => 0.5,
            RenderQuality::Full => 1.0,
        }
    }

    /// The other setting
    pub fn toggled(self) -> Self {
        match self {
            RenderQuality::Half => RenderQuality::Full,
            RenderQuality::Full => RenderQuality::Half,
        }
    }
}
