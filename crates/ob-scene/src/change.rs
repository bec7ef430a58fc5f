//! Change payloads and scene event names
//!
//! Every `section:changeBegin` / `section:changeComplete` subscriber
//! receives the same explicit `Change` record; there is no implicit
//! context binding.

use ob_core::Way;
use serde::{Deserialize, Serialize};

/// Stable reference to a registered section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHandle {
    /// Position in the narrative order
    pub index: usize,
    /// Registered name
    pub name: String,
}

/// Payload carried by both change events of one navigation transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub from: SectionHandle,
    pub to: SectionHandle,
    /// Direction of traversal, `down` iff `to.index > from.index`
    pub way: Way,
}

/// Payload type published on the scene bus
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// A navigation transition beginning or settling
    Change(Change),
    /// The user pushed past the last section
    End,
}

impl SceneEvent {
    /// The change record, when this event carries one
    pub fn change(&self) -> Option<&Change> {
        match self {
            SceneEvent::Change(change) => Some(change),
            SceneEvent::End => None,
        }
    }
}

/// Scene event names
pub mod events {
    /// A navigation transition has been accepted; sections are entering
    pub const CHANGE_BEGIN: &str = "section:changeBegin";
    /// The transport finished; the traversal is settling
    pub const CHANGE_COMPLETE: &str = "section:changeComplete";
    /// Navigation past the last section
    pub const END: &str = "end";
}
