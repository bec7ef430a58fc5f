//! Navigation map
//!
//! The section index widget: one node per section, a single active
//! highlight, click-to-navigate. DOM-free model; the renderer draws nodes
//! and forwards clicks into [`NavigationMap::select`].

/// Delay between consecutive node reveals during the intro
pub const REVEAL_STAGGER_MS: u32 = 50;

/// Visual index of the sections
pub struct NavigationMap {
    nodes: usize,
    active: Option<usize>,
    on_select: Box<dyn FnMut(usize)>,
}

impl NavigationMap {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            active: None,
            on_select: Box::new(|_| {}),
        }
    }

    /// One map with one node per name
    pub fn with_nodes(count: usize) -> Self {
        let mut map = Self::new();
        map.nodes = count;
        map
    }

    /// Append a node; returns its index
    pub fn add_node(&mut self) -> usize {
        self.nodes += 1;
        self.nodes - 1
    }

    pub fn len(&self) -> usize {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }

    /// Highlight a node, clearing any previous highlight. False when out
    /// of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.nodes {
            return false;
        }

        self.active = Some(index);
        true
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Pass the click handler, replacing any previous one
    pub fn on_select(&mut self, handler: impl FnMut(usize) + 'static) {
        self.on_select = Box::new(handler);
    }

    /// A click on a node; invokes the handler for valid indices
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.nodes {
            return false;
        }

        (self.on_select)(index);
        true
    }

    /// Reveal delays for the intro animation, one entry per node
    pub fn reveal_schedule(&self) -> Vec<(usize, u32)> {
        (0..self.nodes)
            .map(|i| (i, i as u32 * REVEAL_STAGGER_MS))
            .collect()
    }
}

impl Default for NavigationMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_single_active_node() {
        let mut map = NavigationMap::with_nodes(3);
        assert!(map.set_active(1));
        assert!(map.set_active(2));
        assert_eq!(map.active(), Some(2));
        assert!(!map.set_active(3));
        assert_eq!(map.active(), Some(2));
    }

    #[test]
    fn test_select_forwards_valid_clicks() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let mut map = NavigationMap::with_nodes(2);

        let sink = Rc::clone(&clicked);
        map.on_select(move |index| sink.borrow_mut().push(index));

        assert!(map.select(1));
        assert!(!map.select(5));
        assert_eq!(*clicked.borrow(), vec![1]);
    }

    #[test]
    fn test_reveal_schedule_staggers() {
        let map = NavigationMap::with_nodes(3);
        assert_eq!(map.reveal_schedule(), vec![(0, 0), (1, 50), (2, 100)]);
    }
}
