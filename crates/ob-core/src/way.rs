//! Traversal direction
//!
//! A `Way` says which direction the user is perceived to be moving through
//! the narrative. It only selects animation variants; it never carries
//! state of its own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of traversal between two sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Way {
    /// Toward earlier sections (content appears to enter from above)
    Up,
    /// Toward later sections
    #[default]
    Down,
}

impl Way {
    /// Direction of a transition between two registry indices.
    ///
    /// `Down` iff `to > from`.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from { Way::Down } else { Way::Up }
    }

    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Way::Up => Way::Down,
            Way::Down => Way::Up,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Way::Up => "up",
            Way::Down => "down",
        }
    }
}

impl fmt::Display for Way {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_ordinal_rule() {
        assert_eq!(Way::between(0, 2), Way::Down);
        assert_eq!(Way::between(9, 2), Way::Up);
        // Equal indices never reach a transition; the tie resolves Up.
        assert_eq!(Way::between(3, 3), Way::Up);
    }

    #[test]
    fn test_flipped() {
        assert_eq!(Way::Up.flipped(), Way::Down);
        assert_eq!(Way::Down.flipped(), Way::Up);
    }

    #[test]
    fn test_display() {
        assert_eq!(Way::Up.to_string(), "up");
        assert_eq!(Way::Down.to_string(), "down");
    }
}
