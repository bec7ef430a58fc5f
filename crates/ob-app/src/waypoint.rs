//! Scroll waypoints
//!
//! Tracks which tails-page sections are in view as the user scrolls.
//! Each item reveals its content once, the first time it comes into view;
//! enter/leave changes keep firing for content that animates while
//! visible (the wireframe demo). Tracking is gated by `start`/`stop` so
//! the shell can freeze it during slides.

/// A change produced by one scroll update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointChange {
    /// First time this item came into view
    Appeared(usize),
    /// The item entered the viewport band
    Activated(usize),
    /// The item left the viewport band
    Deactivated(usize),
}

#[derive(Debug)]
struct WaypointItem {
    top: f32,
    height: f32,
    appeared: bool,
    active: bool,
}

/// Viewport tracker for a vertical list of items
#[derive(Debug)]
pub struct Waypoints {
    items: Vec<WaypointItem>,
    /// Activation offset as a percentage of the viewport height: an item
    /// only counts as in view once its top clears the bottom band
    offset_percent: f32,
    running: bool,
}

impl Waypoints {
    pub fn new(offset_percent: f32) -> Self {
        Self {
            items: Vec::new(),
            offset_percent,
            running: false,
        }
    }

    /// Track an item by its page-space top and height; returns its index
    pub fn add(&mut self, top: f32, height: f32) -> usize {
        self.items.push(WaypointItem {
            top,
            height,
            appeared: false,
            active: false,
        });
        self.items.len() - 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.active)
    }

    /// Process a scroll position. Returns the ordered changes since the
    /// last update; empty while stopped.
    pub fn update(&mut self, viewport_top: f32, viewport_height: f32) -> Vec<WaypointChange> {
        if !self.running {
            return Vec::new();
        }

        let threshold = viewport_top + viewport_height * (1.0 - self.offset_percent / 100.0);
        let mut changes = Vec::new();

        for (index, item) in self.items.iter_mut().enumerate() {
            let in_view = item.top < threshold && item.top + item.height > viewport_top;

            if in_view && !item.active {
                item.active = true;
                if !item.appeared {
                    item.appeared = true;
                    changes.push(WaypointChange::Appeared(index));
                }
                changes.push(WaypointChange::Activated(index));
            } else if !in_view && item.active {
                item.active = false;
                changes.push(WaypointChange::Deactivated(index));
            }
        }

        changes
    }
}
