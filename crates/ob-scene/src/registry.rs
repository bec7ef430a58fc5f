//! Section registry
//!
//! Ordered list of sections; insertion order is the narrative order, and
//! the index is the only addressing scheme exposed to navigation.

use crate::{SceneError, SceneResult, Section, SectionHandle};

/// Owns the sections in narrative order
pub struct SectionRegistry<C> {
    sections: Vec<Section<C>>,
}

impl<C> SectionRegistry<C> {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Register a section at the end of the order and assign its index.
    ///
    /// Section names must be unique; a duplicate is rejected without
    /// touching the order.
    pub fn register(&mut self, mut section: Section<C>) -> SceneResult<usize> {
        if self.index_of(section.name()).is_some() {
            return Err(SceneError::DuplicateSection(section.name().to_string()));
        }

        let index = self.sections.len();
        section.assign_index(index);
        self.sections.push(section);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section<C>> {
        self.sections.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Section<C>> {
        self.sections.get_mut(index)
    }

    /// Linear name lookup
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name() == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Section<C>> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    /// Stable handle for event payloads
    pub fn handle(&self, index: usize) -> Option<SectionHandle> {
        self.get(index).map(|s| SectionHandle {
            index,
            name: s.name().to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section<C>> {
        self.sections.iter()
    }

    /// All registered names, in narrative order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }
}

impl<C> Default for SectionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_assigns_indices_in_order() {
        let mut registry: SectionRegistry<()> = SectionRegistry::new();

        for name in ["hello", "beams", "drop"] {
            registry.register(Section::new(name)).unwrap();
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(1).unwrap().name(), "beams");
        assert_eq!(registry.get(1).unwrap().index(), Some(1));
        assert_eq!(registry.index_of("drop"), Some(2));
        assert_eq!(registry.index_of("galaxy"), None);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry: SectionRegistry<()> = SectionRegistry::new();
        registry.register(Section::new("hello")).unwrap();

        let err = registry.register(Section::new("hello")).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateSection(name) if name == "hello"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_handle_carries_name_and_index() {
        let mut registry: SectionRegistry<()> = SectionRegistry::new();
        registry.register(Section::new("hello")).unwrap();

        let handle = registry.handle(0).unwrap();
        assert_eq!(handle.index, 0);
        assert_eq!(handle.name, "hello");
        assert!(registry.handle(1).is_none());
    }
}
