//! Section
//!
//! A named, independently startable unit of visual content occupying one
//! step of the linear narrative. A section is a capability object with a
//! fixed shape: any presentation content can be wrapped in one as long as
//! it exposes some of the optional hooks.
//!
//! `enter`/`exit` animate appearance and may be called regardless of
//! `playing`; `start`/`stop` guard the "active" concept behind the
//! `playing` flag and refuse double invocation.

use ob_core::Way;

type WayHook = Box<dyn FnMut(Way)>;
type Hook = Box<dyn FnMut()>;
type CueHook = Box<dyn FnMut(&str)>;

fn noop_way(_: Way) {}
fn noop() {}
fn noop_cue(_: &str) {}

/// One step of the narrative, generic over the opaque renderable content
/// an external renderer places in its scene graph
pub struct Section<C> {
    name: String,
    index: Option<usize>,
    playing: bool,
    visible: bool,
    children: Vec<C>,

    enter: WayHook,
    exit: WayHook,
    start: Hook,
    stop: Hook,
    show: Hook,
    hide: Hook,
    cue: CueHook,
}

impl<C> Section<C> {
    /// Create a section. Every hook defaults to a no-op.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            playing: false,
            visible: true,
            children: Vec::new(),
            enter: Box::new(noop_way),
            exit: Box::new(noop_way),
            start: Box::new(noop),
            stop: Box::new(noop),
            show: Box::new(noop),
            hide: Box::new(noop),
            cue: Box::new(noop_cue),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the narrative order, assigned at registration
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub(crate) fn assign_index(&mut self, index: usize) {
        self.index = Some(index);
    }

    /// Attach renderable content. Multiple calls accumulate children in
    /// order; duplicates are not detected.
    pub fn add_child(&mut self, content: C) {
        self.children.push(content);
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// True between a successful `start()` and the matching `stop()`
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Play the in animation toward `way`
    pub fn enter(&mut self, way: Way) {
        (self.enter)(way);
    }

    /// Play the out animation toward `way`
    pub fn exit(&mut self, way: Way) {
        (self.exit)(way);
    }

    /// Start the section. Returns false (and skips the handler) when
    /// already playing.
    pub fn start(&mut self) -> bool {
        if self.playing {
            return false;
        }

        (self.start)();
        self.playing = true;
        true
    }

    /// Stop the section. Returns false (and skips the handler) when not
    /// playing.
    pub fn stop(&mut self) -> bool {
        if !self.playing {
            return false;
        }

        (self.stop)();
        self.playing = false;
        true
    }

    /// Make the section's content visible. No-op when already visible.
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }

        (self.show)();
        self.visible = true;
        true
    }

    /// Hide the section's content. No-op when already hidden.
    pub fn hide(&mut self) -> bool {
        if !self.visible {
            return false;
        }

        (self.hide)();
        self.visible = false;
        true
    }

    /// Fire a named auxiliary effect (smoke, field, ...). Unhandled cues
    /// fall through to the default no-op.
    pub fn cue(&mut self, name: &str) {
        (self.cue)(name);
    }

    /// Pass the in handler, replacing any previous one
    pub fn on_enter(&mut self, handler: impl FnMut(Way) + 'static) {
        self.enter = Box::new(handler);
    }

    /// Pass the out handler, replacing any previous one
    pub fn on_exit(&mut self, handler: impl FnMut(Way) + 'static) {
        self.exit = Box::new(handler);
    }

    /// Pass the start handler, replacing any previous one
    pub fn on_start(&mut self, handler: impl FnMut() + 'static) {
        self.start = Box::new(handler);
    }

    /// Pass the stop handler, replacing any previous one
    pub fn on_stop(&mut self, handler: impl FnMut() + 'static) {
        self.stop = Box::new(handler);
    }

    /// Pass the show handler, replacing any previous one
    pub fn on_show(&mut self, handler: impl FnMut() + 'static) {
        self.show = Box::new(handler);
    }

    /// Pass the hide handler, replacing any previous one
    pub fn on_hide(&mut self, handler: impl FnMut() + 'static) {
        self.hide = Box::new(handler);
    }

    /// Pass the cue handler, replacing any previous one
    pub fn on_cue(&mut self, handler: impl FnMut(&str) + 'static) {
        self.cue = Box::new(handler);
    }
}

impl<C> std::fmt::Debug for Section<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("playing", &self.playing)
            .field("visible", &self.visible)
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counter() -> (Rc<RefCell<u32>>, Rc<RefCell<u32>>) {
        (Rc::new(RefCell::new(0)), Rc::new(RefCell::new(0)))
    }

    #[test]
    fn test_double_start_is_guarded() {
        let (starts, _) = counter();
        let mut section: Section<()> = Section::new("hello");

        let sink = Rc::clone(&starts);
        section.on_start(move || *sink.borrow_mut() += 1);

        assert!(section.start());
        assert!(!section.start());
        assert_eq!(*starts.borrow(), 1);
        assert!(section.is_playing());
    }

    #[test]
    fn test_stop_without_start_is_guarded() {
        let (_, stops) = counter();
        let mut section: Section<()> = Section::new("hello");

        let sink = Rc::clone(&stops);
        section.on_stop(move || *sink.borrow_mut() += 1);

        assert!(!section.stop());
        assert_eq!(*stops.borrow(), 0);

        section.start();
        assert!(section.stop());
        assert!(!section.stop());
        assert_eq!(*stops.borrow(), 1);
    }

    #[test]
    fn test_enter_exit_ignore_playing() {
        let ways = Rc::new(RefCell::new(Vec::new()));
        let mut section: Section<()> = Section::new("wave");

        let sink = Rc::clone(&ways);
        section.on_enter(move |way| sink.borrow_mut().push(way));

        section.enter(Way::Down);
        section.start();
        section.enter(Way::Up);

        assert_eq!(*ways.borrow(), vec![Way::Down, Way::Up]);
    }

    #[test]
    fn test_show_hide_idempotent() {
        let shows = Rc::new(RefCell::new(0));
        let mut section: Section<()> = Section::new("height");

        let sink = Rc::clone(&shows);
        section.on_show(move || *sink.borrow_mut() += 1);

        // Sections are born visible.
        assert!(!section.show());
        assert!(section.hide());
        assert!(section.show());
        assert!(!section.show());
        assert_eq!(*shows.borrow(), 1);
    }

    #[test]
    fn test_children_accumulate_in_order() {
        let mut section: Section<&str> = Section::new("hello");
        section.add_child("title");
        section.add_child("smoke");
        section.add_child("smoke");

        assert_eq!(section.children(), &["title", "smoke", "smoke"]);
    }

    #[test]
    fn test_cue_reaches_handler() {
        let cues = Rc::new(RefCell::new(Vec::new()));
        let mut section: Section<()> = Section::new("flow");

        let sink = Rc::clone(&cues);
        section.on_cue(move |name| sink.borrow_mut().push(name.to_string()));

        section.cue("field:in");
        assert_eq!(*cues.borrow(), vec!["field:in".to_string()]);
    }
}
