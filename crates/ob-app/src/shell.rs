//! App shell
//!
//! The heads/tails slide: a two-pane navigation with an edge-peek preview
//! (hovering the trigger strip) and a full slide between panes. The shell
//! owns no animation; a transport animates the panes with the durations
//! from [`SlideTiming`] and reports back through `complete_slide` /
//! `complete_close`.
//!
//! Event order matches the site's expectations: `heads:visible` fires as
//! soon as the heads pane starts coming into view (slide begin toward
//! heads, or a peek from tails), while `heads:invisible` only fires once
//! the pane has fully left (slide or peek-close completion).

use ob_event::{EventBus, HandlerResult, SubscriptionId};
use serde::{Deserialize, Serialize};

/// One of the two top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    /// The WebGL scene page
    #[default]
    Heads,
    /// The scrolling content page
    Tails,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::Heads => Pane::Tails,
            Pane::Tails => Pane::Heads,
        }
    }
}

/// Pane animation durations for one slide, in milliseconds.
///
/// The pane being revealed trails slightly behind the one leaving, which
/// is what gives the slide its overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideTiming {
    pub heads_ms: u32,
    pub tails_ms: u32,
}

impl SlideTiming {
    /// Durations for a full slide toward `to`
    pub fn for_slide(to: Pane) -> Self {
        match to {
            Pane::Heads => Self {
                heads_ms: 1050,
                tails_ms: 1000,
            },
            Pane::Tails => Self {
                heads_ms: 1000,
                tails_ms: 1050,
            },
        }
    }

    /// Durations for an edge peek (open or close)
    pub fn for_peek() -> Self {
        Self {
            heads_ms: 400,
            tails_ms: 400,
        }
    }
}

/// Payload type published on the shell bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A slide toward `to` is starting
    SlideBegin { to: Pane },
    /// The slide toward `to` finished
    SlideComplete { to: Pane },
    /// The heads pane is at least partially in the viewport
    HeadsVisible,
    /// The heads pane is completely out of the viewport
    HeadsInvisible,
}

/// Shell event names
pub mod events {
    pub const SLIDE_BEGIN: &str = "slideBegin";
    pub const SLIDE_COMPLETE: &str = "slideComplete";
    pub const HEADS_VISIBLE: &str = "heads:visible";
    pub const HEADS_INVISIBLE: &str = "heads:invisible";
}

/// Handles navigation between heads and tails
pub struct AppShell {
    bus: EventBus<AppEvent>,
    pane: Pane,
    peeking: bool,
    sliding: bool,
    pending_slide: Option<Pane>,
    pending_close: bool,
    chained: Option<Box<dyn FnOnce()>>,
}

impl AppShell {
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
            pane: Pane::Heads,
            peeking: false,
            sliding: false,
            pending_slide: None,
            pending_close: false,
            chained: None,
        }
    }

    /// The pane most recently navigated to. Toggles at slide begin, so it
    /// reads as "where the user is headed" during a slide.
    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn is_sliding(&self) -> bool {
        self.sliding
    }

    pub fn is_peeking(&self) -> bool {
        self.peeking
    }

    /// Listen on the shell bus (`events::*` names)
    pub fn on(
        &mut self,
        name: &str,
        handler: impl FnMut(&AppEvent) -> HandlerResult + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(name, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Start a full slide to the other pane. Rejected while a slide is
    /// already running.
    pub fn slide(&mut self) -> bool {
        self.slide_impl(None)
    }

    /// Start a full slide and run `callback` once it completes (used to
    /// chain "slide, then unlock the scene")
    pub fn slide_then(&mut self, callback: impl FnOnce() + 'static) -> bool {
        self.slide_impl(Some(Box::new(callback)))
    }

    fn slide_impl(&mut self, callback: Option<Box<dyn FnOnce()>>) -> bool {
        if self.sliding {
            return false;
        }

        let to = self.pane.other();
        log::debug!("slide -> {to:?}");

        self.sliding = true;
        self.peeking = false;

        if to == Pane::Heads {
            self.bus.publish(events::HEADS_VISIBLE, &AppEvent::HeadsVisible);
        }
        self.bus
            .publish(events::SLIDE_BEGIN, &AppEvent::SlideBegin { to });

        self.pane = to;
        self.pending_slide = Some(to);
        self.chained = callback;
        true
    }

    /// Transport completion callback for the slide
    pub fn complete_slide(&mut self) -> bool {
        let Some(to) = self.pending_slide.take() else {
            return false;
        };

        self.sliding = false;
        self.bus
            .publish(events::SLIDE_COMPLETE, &AppEvent::SlideComplete { to });

        if to == Pane::Tails {
            self.bus
                .publish(events::HEADS_INVISIBLE, &AppEvent::HeadsInvisible);
        }

        if let Some(callback) = self.chained.take() {
            callback();
        }
        true
    }

    /// Edge-peek the other pane into view. From tails this brings the
    /// heads pane partially back, which wakes the scene.
    pub fn open(&mut self) -> bool {
        if self.sliding || self.peeking {
            return false;
        }

        self.peeking = true;
        if self.pane == Pane::Tails {
            self.bus.publish(events::HEADS_VISIBLE, &AppEvent::HeadsVisible);
        }
        true
    }

    /// Revert the edge peek. When the heads pane was peeked in from
    /// tails, `complete_close` reports it fully gone.
    pub fn close(&mut self) -> bool {
        if self.sliding || !self.peeking {
            return false;
        }

        self.peeking = false;
        self.pending_close = self.pane == Pane::Tails;
        true
    }

    /// Transport completion callback for a peek close
    pub fn complete_close(&mut self) -> bool {
        if !self.pending_close {
            return false;
        }

        self.pending_close = false;
        self.bus
            .publish(events::HEADS_INVISIBLE, &AppEvent::HeadsInvisible);
        true
    }
}

impl Default for AppShell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<AppEvent>>>;

    fn record(shell: &mut AppShell, name: &'static str) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        shell.on(name, move |event| {
            sink.borrow_mut().push(*event);
            Ok(())
        });
        log
    }

    #[test]
    fn test_slide_toggles_and_brackets_events() {
        let mut shell = AppShell::new();
        let begins = record(&mut shell, events::SLIDE_BEGIN);
        let completes = record(&mut shell, events::SLIDE_COMPLETE);
        let invisible = record(&mut shell, events::HEADS_INVISIBLE);

        assert!(shell.slide());
        assert_eq!(shell.pane(), Pane::Tails);
        assert!(shell.is_sliding());
        assert_eq!(*begins.borrow(), vec![AppEvent::SlideBegin { to: Pane::Tails }]);
        assert!(completes.borrow().is_empty());
        assert!(invisible.borrow().is_empty());

        assert!(shell.complete_slide());
        assert!(!shell.is_sliding());
        assert_eq!(
            *completes.borrow(),
            vec![AppEvent::SlideComplete { to: Pane::Tails }]
        );
        // Heads disappears only once the slide has fully landed on tails.
        assert_eq!(*invisible.borrow(), vec![AppEvent::HeadsInvisible]);
    }

    #[test]
    fn test_slide_back_to_heads_announces_visibility_up_front() {
        let mut shell = AppShell::new();
        shell.slide();
        shell.complete_slide();

        let visible = record(&mut shell, events::HEADS_VISIBLE);
        let begins = record(&mut shell, events::SLIDE_BEGIN);

        assert!(shell.slide());
        assert_eq!(*visible.borrow(), vec![AppEvent::HeadsVisible]);
        assert_eq!(*begins.borrow(), vec![AppEvent::SlideBegin { to: Pane::Heads }]);

        shell.complete_slide();
        assert_eq!(shell.pane(), Pane::Heads);
    }

    #[test]
    fn test_slide_rejected_while_sliding() {
        let mut shell = AppShell::new();
        assert!(shell.slide());
        assert!(!shell.slide());

        shell.complete_slide();
        assert!(shell.slide());
    }

    #[test]
    fn test_chained_callback_runs_on_completion() {
        let ran = Rc::new(RefCell::new(false));
        let mut shell = AppShell::new();

        let sink = Rc::clone(&ran);
        assert!(shell.slide_then(move || *sink.borrow_mut() = true));
        assert!(!*ran.borrow());

        shell.complete_slide();
        assert!(*ran.borrow());
    }

    #[test]
    fn test_peek_from_tails_wakes_and_sleeps_heads() {
        let mut shell = AppShell::new();
        shell.slide();
        shell.complete_slide();

        let visible = record(&mut shell, events::HEADS_VISIBLE);
        let invisible = record(&mut shell, events::HEADS_INVISIBLE);

        assert!(shell.open());
        assert!(!shell.open());
        assert_eq!(visible.borrow().len(), 1);

        assert!(shell.close());
        assert!(invisible.borrow().is_empty());
        assert!(shell.complete_close());
        assert!(!shell.complete_close());
        assert_eq!(invisible.borrow().len(), 1);
    }

    #[test]
    fn test_peek_from_heads_is_silent() {
        let mut shell = AppShell::new();
        let visible = record(&mut shell, events::HEADS_VISIBLE);
        let invisible = record(&mut shell, events::HEADS_INVISIBLE);

        shell.open();
        shell.close();
        assert!(!shell.complete_close());
        assert!(visible.borrow().is_empty());
        assert!(invisible.borrow().is_empty());
    }

    #[test]
    fn test_peek_rejected_while_sliding() {
        let mut shell = AppShell::new();
        shell.slide();
        assert!(!shell.open());
        assert!(!shell.close());
    }

    #[test]
    fn test_slide_timing_overlap() {
        let to_tails = SlideTiming::for_slide(Pane::Tails);
        assert!(to_tails.tails_ms > to_tails.heads_ms);

        let to_heads = SlideTiming::for_slide(Pane::Heads);
        assert!(to_heads.heads_ms > to_heads.tails_ms);

        assert_eq!(SlideTiming::for_peek().heads_ms, 400);
    }
}
