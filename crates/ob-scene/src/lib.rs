//! ob-scene: Obverse scene core
//!
//! The section-transition heart of the engine:
//! - `Section`: a named, stateful unit with replaceable lifecycle hooks
//! - `SectionRegistry`: ordered sections, name-to-index lookup
//! - `SceneController`: the orchestrator that turns navigation into
//!   `section:changeBegin` / `section:changeComplete` events and drives the
//!   transition table
//! - `TransitionTable`: the data-driven mapping from a (from, to) pair to
//!   the ordered enter/exit/show/hide/start/stop/cue steps it requires
//! - `SceneProfile`: JSON-loadable scene configuration
//! - `NavigationMap`: the section index widget model
//!
//! Rendering, timing and input capture stay outside; the controller only
//! needs a transport that reports transition completion back via
//! [`SceneController::complete_transition`].

mod change;
mod controller;
mod map;
mod profile;
mod registry;
mod section;
mod table;

pub use change::*;
pub use controller::*;
pub use map::*;
pub use profile::*;
pub use registry::*;
pub use section::*;
pub use table::*;

use thiserror::Error;

/// Scene error types
#[derive(Debug, Error)]
pub enum SceneError {
    /// Navigation target outside the registry range
    #[error("invalid section index {index} (registered: {len})")]
    InvalidIndex { index: usize, len: usize },

    /// A section with this name is already registered
    #[error("duplicate section name: {0}")]
    DuplicateSection(String),

    /// A transition-table step names a section the registry does not know
    #[error("unknown section in transition table: {0}")]
    UnknownSection(String),
}

pub type SceneResult<T> = Result<T, SceneError>;
