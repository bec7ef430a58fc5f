//! Sound bank
//!
//! The site's named sounds and their playback parameters, plus the global
//! mute toggle. Every operation turns into a [`MixerCommand`] handed to
//! the sink; an unknown sound name is reported and dropped, never fatal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One named sound definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDef {
    /// Source files in preference order (format fallbacks)
    pub sources: Vec<String>,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub looped: bool,
}

fn default_volume() -> f32 {
    1.0
}

impl SoundDef {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            volume: 1.0,
            looped: false,
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_loop(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }
}

/// Instruction for the external mixer
#[derive(Debug, Clone, PartialEq)]
pub enum MixerCommand {
    Play(String),
    Stop(String),
    Fade {
        sound: String,
        from: f32,
        to: f32,
        duration_ms: u32,
    },
    Mute(bool),
}

/// Named sounds plus the global mute state
pub struct SoundBank {
    sounds: HashMap<String, SoundDef>,
    muted: bool,
    sink: Box<dyn FnMut(MixerCommand)>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self {
            sounds: HashMap::new(),
            muted: false,
            sink: Box::new(|_| {}),
        }
    }

    /// The site's sound manifest
    pub fn site_defaults() -> Self {
        let mut bank = Self::new();
        bank.insert(
            "background",
            SoundDef::new([
                "sounds/background.mp3",
                "sounds/background.ogg",
                "sounds/background.wav",
            ])
            .with_volume(0.5)
            .with_loop(true),
        );
        bank.insert(
            "wind",
            SoundDef::new(["sounds/wind.mp3", "sounds/wind.ogg", "sounds/wind.wav"]),
        );
        bank.insert(
            "whitenoise",
            SoundDef::new([
                "sounds/whitenoise.mp3",
                "sounds/whitenoise.ogg",
                "sounds/whitenoise.wav",
            ])
            .with_volume(0.05),
        );
        bank.insert(
            "neon",
            SoundDef::new(["sounds/neon.mp3", "sounds/neon.ogg", "sounds/neon.wav"])
                .with_volume(0.05),
        );
        bank
    }

    /// Pass the mixer command sink, replacing any previous one
    pub fn on_command(&mut self, sink: impl FnMut(MixerCommand) + 'static) {
        self.sink = Box::new(sink);
    }

    pub fn insert(&mut self, name: impl Into<String>, def: SoundDef) {
        self.sounds.insert(name.into(), def);
    }

    pub fn get(&self, name: &str) -> Option<&SoundDef> {
        self.sounds.get(name)
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Toggle on/off sounds. Returns the new muted state.
    pub fn toggle(&mut self) -> bool {
        self.muted = !self.muted;
        (self.sink)(MixerCommand::Mute(self.muted));
        self.muted
    }

    /// The page became visible again; playback resumes
    pub fn page_visible(&mut self) {
        self.muted = false;
        (self.sink)(MixerCommand::Mute(false));
    }

    pub fn play(&mut self, name: &str) -> bool {
        if !self.sounds.contains_key(name) {
            log::warn!("play on unknown sound '{name}'");
            return false;
        }

        (self.sink)(MixerCommand::Play(name.to_string()));
        true
    }

    pub fn stop(&mut self, name: &str) -> bool {
        if !self.sounds.contains_key(name) {
            log::warn!("stop on unknown sound '{name}'");
            return false;
        }

        (self.sink)(MixerCommand::Stop(name.to_string()));
        true
    }

    /// Fade a sound between two volumes over `duration_ms`
    pub fn fade(&mut self, name: &str, from: f32, to: f32, duration_ms: u32) -> bool {
        if !self.sounds.contains_key(name) {
            log::warn!("fade on unknown sound '{name}'");
            return false;
        }

        (self.sink)(MixerCommand::Fade {
            sound: name.to_string(),
            from,
            to,
            duration_ms,
        });
        true
    }
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::new()
    }
}
