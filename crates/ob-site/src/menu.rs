//! Menu model
//!
//! The three-button corner menu: sounds on/off, help overlay, quality
//! toggle. Button labels mirror the state they produce.

use ob_core::RenderQuality;

/// Menu buttons, addressed by what they do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Sounds,
    Help,
    Quality,
}

/// Menu state outside the components it drives
#[derive(Debug, Default)]
pub struct MenuModel {
    help_open: bool,
}

impl MenuModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label of the sounds button for the given mute state
    pub fn sounds_label(muted: bool) -> &'static str {
        if muted { "UNMUTE" } else { "MUTE" }
    }

    /// Label of the quality button for the given setting
    pub fn quality_label(quality: RenderQuality) -> &'static str {
        match quality {
            RenderQuality::Half => "QUALITY 0.5",
            RenderQuality::Full => "QUALITY 1",
        }
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    pub fn is_help_open(&self) -> bool {
        self.help_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_state() {
        assert_eq!(MenuModel::sounds_label(true), "UNMUTE");
        assert_eq!(MenuModel::sounds_label(false), "MUTE");
        assert_eq!(MenuModel::quality_label(RenderQuality::Full), "QUALITY 1");
        assert_eq!(MenuModel::quality_label(RenderQuality::Half), "QUALITY 0.5");
    }

    #[test]
    fn test_help_overlay_flag() {
        let mut menu = MenuModel::new();
        assert!(!menu.is_help_open());
        menu.open_help();
        assert!(menu.is_help_open());
        menu.close_help();
        assert!(!menu.is_help_open());
    }
}
