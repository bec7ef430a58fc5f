//! The site's sections
//!
//! Fourteen themed sections in narrative order. Renderers wire their
//! content and hooks after construction; the names and auxiliary cues
//! here are the vocabulary the transition table speaks.

use ob_scene::Section;

/// Narrative order of the heads page
pub const SECTION_NAMES: [&str; 14] = [
    "hello", "beams", "drop", "ball", "flow", "neons", "height", "wave", "face", "rocks",
    "galaxy", "gravity", "city", "end",
];

/// Auxiliary cue names used by the transition table
pub mod cues {
    /// Wake the smoke field shared by the hello/beams viewpoints
    pub const SMOKE_START: &str = "smoke:start";
    /// Put the smoke field back to sleep
    pub const SMOKE_STOP: &str = "smoke:stop";
    /// Reveal the flow field; section wiring guards it to run once
    pub const FIELD_IN: &str = "field:in";
}

/// Assets preloaded before the scene fades in
pub const PRELOAD_ASSETS: [&str; 4] = [
    "img/texture-ball.png",
    "img/texture-ball-alpha.png",
    "img/sprite-smoke.png",
    "img/sprite-logo.png",
];

/// Bare sections in narrative order, hooks defaulted
pub fn build_sections<C>() -> Vec<Section<C>> {
    SECTION_NAMES.iter().copied().map(Section::new).collect()
}
