//! Slide gating
//!
//! The background loop follows the heads pane: sliding back to heads
//! fades it in, sliding away to tails fades it out. Installed as shell
//! bus subscriptions on a shared bank handle.

use std::cell::RefCell;
use std::rc::Rc;

use ob_app::{AppEvent, AppShell, Pane, events};

use crate::SoundBank;

/// The sound that tracks the heads pane
pub const BACKGROUND: &str = "background";

/// Fade length bracketing a slide
pub const SLIDE_FADE_MS: u32 = 2000;

/// Subscribe the bank to the shell's slide events
pub fn wire_slide_gating(shell: &mut AppShell, bank: Rc<RefCell<SoundBank>>) {
    shell.on(events::SLIDE_BEGIN, move |event| {
        if let AppEvent::SlideBegin { to } = event {
            let mut bank = bank.borrow_mut();
            match to {
                Pane::Heads => bank.fade(BACKGROUND, 0.0, 1.0, SLIDE_FADE_MS),
                Pane::Tails => bank.fade(BACKGROUND, 1.0, 0.0, SLIDE_FADE_MS),
            };
        }
        Ok(())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MixerCommand;

    #[test]
    fn test_slide_direction_picks_fade() {
        let mut shell = AppShell::new();
        let bank = Rc::new(RefCell::new(SoundBank::site_defaults()));

        let commands = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&commands);
        bank.borrow_mut()
            .on_command(move |cmd| sink.borrow_mut().push(cmd));

        wire_slide_gating(&mut shell, Rc::clone(&bank));

        // Heads -> tails: background out.
        shell.slide();
        shell.complete_slide();
        // Tails -> heads: background back in.
        shell.slide();

        let commands = commands.borrow();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            MixerCommand::Fade {
                sound: BACKGROUND.to_string(),
                from: 1.0,
                to: 0.0,
                duration_ms: SLIDE_FADE_MS,
            }
        );
        assert_eq!(
            commands[1],
            MixerCommand::Fade {
                sound: BACKGROUND.to_string(),
                from: 0.0,
                to: 1.0,
                duration_ms: SLIDE_FADE_MS,
            }
        );
    }
}
