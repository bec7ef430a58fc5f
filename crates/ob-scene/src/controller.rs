//! Scene controller
//!
//! The orchestrator. Owns the section registry and the transition table,
//! computes transitions between arbitrary index pairs, and brackets every
//! navigation with `section:changeBegin` / `section:changeComplete` on its
//! bus.
//!
//! `current_index` advances at `go_to` time, not at completion: it means
//! "target of the most recent navigation", never "currently visible".
//! A `go_to` arriving while a transition is still in flight overrides it:
//! the new `change:begin` departs from the previous *target*, and the
//! superseded transition never settles. The transport reports completion
//! through [`SceneController::complete_transition`].

use std::collections::HashSet;

use ob_core::{RenderQuality, Way};
use ob_event::{EventBus, HandlerResult, SubscriptionId};

use crate::{
    Change, Instruction, SceneError, SceneEvent, SceneResult, Section, SectionOp,
    SectionRegistry, TransitionTable, events,
};

/// Orchestrator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Not running; sections keep their last appearance
    Idle,
    /// Running, settled on `current_index`
    Active,
    /// Running, a navigation transport is in flight
    Transitioning,
}

/// Owns the sections and decides what enters, exits, starts and stops on
/// every navigation
pub struct SceneController<C> {
    registry: SectionRegistry<C>,
    table: TransitionTable,
    bus: EventBus<SceneEvent>,
    state: SceneState,
    current: Option<usize>,
    locked: bool,
    pending: Option<Change>,
    quality: RenderQuality,
}

impl<C> std::fmt::Debug for SceneController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneController")
            .field("state", &self.state)
            .field("current", &self.current)
            .field("locked", &self.locked)
            .field("quality", &self.quality)
            .finish()
    }
}

impl<C> SceneController<C> {
    pub fn new() -> Self {
        Self {
            registry: SectionRegistry::new(),
            table: TransitionTable::new(),
            bus: EventBus::new(),
            state: SceneState::Idle,
            current: None,
            locked: false,
            pending: None,
            quality: RenderQuality::default(),
        }
    }

    /// Register a section at the end of the narrative order
    pub fn register(&mut self, section: Section<C>) -> SceneResult<usize> {
        self.registry.register(section)
    }

    /// Install the transition table, validated against the registered
    /// sections. Register every section first.
    pub fn set_table(&mut self, table: TransitionTable) -> SceneResult<()> {
        let known: HashSet<&str> = self.registry.names().collect();
        table.validate(&known)?;
        self.table = table;
        Ok(())
    }

    /// Listen on the scene bus (`events::*` names)
    pub fn on(
        &mut self,
        name: &str,
        handler: impl FnMut(&SceneEvent) -> HandlerResult + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(name, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Activate the scene on the current section (first activation lands
    /// on index 0). Publishes no change events: the very first activation
    /// has no meaningful `from`. Returns false with no sections registered
    /// or when already running.
    pub fn start(&mut self) -> bool {
        if self.registry.is_empty() || self.state != SceneState::Idle {
            return false;
        }

        let index = *self.current.get_or_insert(0);
        if let Some(section) = self.registry.get_mut(index) {
            section.start();
        }

        self.state = SceneState::Active;
        log::debug!("scene started at section {index}");
        true
    }

    /// Stop the scene, stopping the current section. The position is kept
    /// for the next `start()`.
    pub fn stop(&mut self) -> bool {
        if self.state == SceneState::Idle {
            return false;
        }

        if let Some(index) = self.current {
            if let Some(section) = self.registry.get_mut(index) {
                section.stop();
            }
        }

        self.state = SceneState::Idle;
        log::debug!("scene stopped");
        true
    }

    /// Navigate to a section by index.
    ///
    /// Returns `Ok(true)` when a transition begins. Returns `Ok(false)`
    /// without publishing anything when the target equals the current
    /// index, the scene is idle, or navigation is locked. An out-of-range
    /// index is the only error and leaves all state untouched.
    pub fn go_to(&mut self, target: usize) -> SceneResult<bool> {
        let len = self.registry.len();
        if target >= len {
            return Err(SceneError::InvalidIndex { index: target, len });
        }

        let Some(current) = self.current else {
            log::debug!("goTo {target} before start, ignored");
            return Ok(false);
        };

        if self.state == SceneState::Idle {
            log::debug!("goTo {target} while idle, ignored");
            return Ok(false);
        }

        if self.locked {
            log::debug!("goTo {target} while locked, ignored");
            return Ok(false);
        }

        if target == current {
            return Ok(false);
        }

        let (Some(from), Some(to)) = (self.registry.handle(current), self.registry.handle(target))
        else {
            return Ok(false);
        };

        if self.pending.is_some() {
            log::debug!("goTo {target} overrides the in-flight transition");
        }

        let way = Way::between(current, target);
        let change = Change { from, to, way };

        self.bus
            .publish(events::CHANGE_BEGIN, &SceneEvent::Change(change.clone()));

        let plan = self
            .table
            .plan_begin(&change.from.name, &change.to.name, way);
        self.apply(&plan);

        self.current = Some(target);
        self.pending = Some(change);
        self.state = SceneState::Transitioning;
        Ok(true)
    }

    /// Navigate one section forward. Pushing past the last section
    /// publishes `end` instead of navigating.
    pub fn next(&mut self) -> SceneResult<bool> {
        let Some(current) = self.current else {
            return Ok(false);
        };

        if self.state == SceneState::Idle || self.locked {
            return Ok(false);
        }

        if current + 1 >= self.registry.len() {
            if self.state == SceneState::Active {
                self.bus.publish(events::END, &SceneEvent::End);
            }
            return Ok(false);
        }

        self.go_to(current + 1)
    }

    /// Navigate one section backward; a no-op at the first section
    pub fn prev(&mut self) -> SceneResult<bool> {
        match self.current {
            Some(current) if current > 0 => self.go_to(current - 1),
            _ => Ok(false),
        }
    }

    /// Transport completion callback: publishes `section:changeComplete`
    /// for the most recent transition and runs its settlement plan.
    /// Returns false when no transition is pending (including one
    /// superseded by a later `go_to`).
    pub fn complete_transition(&mut self) -> bool {
        let Some(change) = self.pending.take() else {
            return false;
        };

        self.bus
            .publish(events::CHANGE_COMPLETE, &SceneEvent::Change(change.clone()));

        let plan = self.table.plan_complete(&change.from.name, &change.to.name);
        self.apply(&plan);

        if self.state == SceneState::Transitioning {
            self.state = SceneState::Active;
        }
        true
    }

    /// Freeze section navigation (advisory; used while the heads/tails
    /// slide runs)
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Target of the most recent navigation; `None` before the first start
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Linear lookup for callers that refer to sections symbolically
    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.registry.index_of(name)
    }

    pub fn section(&self, index: usize) -> Option<&Section<C>> {
        self.registry.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section<C>> {
        self.registry.get_mut(index)
    }

    pub fn section_count(&self) -> usize {
        self.registry.len()
    }

    pub fn quality(&self) -> RenderQuality {
        self.quality
    }

    pub fn set_quality(&mut self, quality: RenderQuality) {
        log::debug!("render quality -> {quality:?}");
        self.quality = quality;
    }

    fn apply(&mut self, plan: &[Instruction]) {
        for instruction in plan {
            let Some(section) = self.registry.by_name_mut(&instruction.target) else {
                // set_table validated; only reachable with no table set
                log::warn!("transition step names unknown section '{}'", instruction.target);
                continue;
            };

            match &instruction.op {
                SectionOp::Enter(way) => section.enter(*way),
                SectionOp::Exit(way) => section.exit(*way),
                SectionOp::Start => {
                    section.start();
                }
                SectionOp::Stop => {
                    section.stop();
                }
                SectionOp::Show => {
                    section.show();
                }
                SectionOp::Hide => {
                    section.hide();
                }
                SectionOp::Cue(name) => section.cue(name),
            }
        }
    }
}

impl<C> Default for SceneController<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Step;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(String, SceneEvent)>>>;

    fn controller(names: &[&str]) -> SceneController<()> {
        let mut scene = SceneController::new();
        for name in names {
            scene.register(Section::new(*name)).unwrap();
        }
        scene
    }

    fn record(scene: &mut SceneController<()>, name: &'static str) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        scene.on(name, move |event| {
            sink.borrow_mut().push((name.to_string(), event.clone()));
            Ok(())
        });
        log
    }

    #[test]
    fn test_start_requires_sections() {
        let mut scene = controller(&[]);
        assert!(!scene.start());
        assert_eq!(scene.state(), SceneState::Idle);
    }

    #[test]
    fn test_start_activates_first_section() {
        let mut scene = controller(&["hello", "beams"]);
        assert!(scene.start());
        assert!(!scene.start());

        assert_eq!(scene.state(), SceneState::Active);
        assert_eq!(scene.current_index(), Some(0));
        assert!(scene.section(0).unwrap().is_playing());
    }

    #[test]
    fn test_go_to_same_index_publishes_nothing() {
        let mut scene = controller(&["hello", "beams"]);
        let begins = record(&mut scene, events::CHANGE_BEGIN);

        scene.start();
        assert!(!scene.go_to(0).unwrap());
        assert!(begins.borrow().is_empty());
    }

    #[test]
    fn test_go_to_out_of_range_is_invalid_index() {
        let mut scene = controller(&["hello", "beams", "drop"]);
        scene.start();

        let err = scene.go_to(3).unwrap_err();
        assert!(matches!(err, SceneError::InvalidIndex { index: 3, len: 3 }));
        assert_eq!(scene.current_index(), Some(0));
        assert_eq!(scene.state(), SceneState::Active);
    }

    #[test]
    fn test_go_to_before_start_is_ignored() {
        let mut scene = controller(&["hello", "beams"]);
        let begins = record(&mut scene, events::CHANGE_BEGIN);

        assert!(!scene.go_to(1).unwrap());
        assert!(begins.borrow().is_empty());
        assert_eq!(scene.current_index(), None);
    }

    #[test]
    fn test_way_follows_ordinal_comparison() {
        let mut scene = controller(&["hello", "beams", "drop", "ball"]);
        let begins = record(&mut scene, events::CHANGE_BEGIN);
        scene.start();

        scene.go_to(3).unwrap();
        scene.complete_transition();
        scene.go_to(1).unwrap();

        let log = begins.borrow();
        assert_eq!(log[0].1.change().unwrap().way, Way::Down);
        assert_eq!(log[1].1.change().unwrap().way, Way::Up);
    }

    #[test]
    fn test_sequence_begin_then_complete_with_same_payload() {
        let mut scene = controller(&["hello", "beams", "drop"]);
        let begins = record(&mut scene, events::CHANGE_BEGIN);
        let completes = record(&mut scene, events::CHANGE_COMPLETE);

        scene.start();
        assert!(scene.go_to(2).unwrap());

        assert_eq!(begins.borrow().len(), 1);
        assert!(completes.borrow().is_empty());
        assert_eq!(scene.state(), SceneState::Transitioning);

        let begin = begins.borrow()[0].1.change().unwrap().clone();
        assert_eq!(begin.from.name, "hello");
        assert_eq!(begin.to.name, "drop");
        assert_eq!(begin.way, Way::Down);

        assert!(scene.complete_transition());
        assert_eq!(completes.borrow().len(), 1);
        assert_eq!(completes.borrow()[0].1.change().unwrap(), &begin);
        assert_eq!(scene.state(), SceneState::Active);

        // Nothing left to settle.
        assert!(!scene.complete_transition());
    }

    #[test]
    fn test_lock_suppresses_and_unlock_restores() {
        let mut scene = controller(&["hello", "beams"]);
        let begins = record(&mut scene, events::CHANGE_BEGIN);
        scene.start();

        scene.lock();
        assert!(!scene.go_to(1).unwrap());
        assert!(begins.borrow().is_empty());
        assert_eq!(scene.current_index(), Some(0));

        scene.unlock();
        assert!(scene.go_to(1).unwrap());
        assert_eq!(begins.borrow().len(), 1);
    }

    #[test]
    fn test_reentrant_go_to_overrides_in_flight_transition() {
        let mut scene = controller(&["hello", "beams", "drop", "ball"]);
        let begins = record(&mut scene, events::CHANGE_BEGIN);
        let completes = record(&mut scene, events::CHANGE_COMPLETE);
        scene.start();

        scene.go_to(2).unwrap();
        // Transport still in flight; the user scrubs again.
        scene.go_to(3).unwrap();

        let log = begins.borrow();
        assert_eq!(log.len(), 2);
        // The override departs from the previous target, not from the
        // last settled index.
        assert_eq!(log[1].1.change().unwrap().from.name, "drop");
        assert_eq!(log[1].1.change().unwrap().to.name, "ball");
        drop(log);

        // Only the most recent transition settles.
        assert!(scene.complete_transition());
        assert!(!scene.complete_transition());
        let completes = completes.borrow();
        assert_eq!(completes.len(), 1);
        assert_eq!(completes[0].1.change().unwrap().to.name, "ball");
    }

    #[test]
    fn test_table_drives_section_state() {
        let mut scene = controller(&["hello", "beams"]);
        let table = TransitionTable::new()
            .with_arrival("beams", vec![Step::enter("beams"), Step::start("beams")])
            .with_departure("hello", vec![Step::exit("hello")])
            .with_settlement("hello", vec![Step::stop("hello").always()]);
        scene.set_table(table).unwrap();

        scene.start();
        assert!(scene.section(0).unwrap().is_playing());

        scene.go_to(1).unwrap();
        assert!(scene.section(1).unwrap().is_playing());
        // The source keeps playing until the transport settles.
        assert!(scene.section(0).unwrap().is_playing());

        scene.complete_transition();
        assert!(!scene.section(0).unwrap().is_playing());
        assert!(scene.section(1).unwrap().is_playing());
    }

    #[test]
    fn test_set_table_validates_against_registry() {
        let mut scene = controller(&["hello"]);
        let table = TransitionTable::new().with_arrival("galaxy", vec![Step::start("galaxy")]);

        assert!(matches!(
            scene.set_table(table),
            Err(SceneError::UnknownSection(name)) if name == "galaxy"
        ));
    }

    #[test]
    fn test_next_past_last_publishes_end() {
        let mut scene = controller(&["hello", "beams"]);
        let ends = record(&mut scene, events::END);
        scene.start();

        scene.go_to(1).unwrap();
        scene.complete_transition();

        assert!(!scene.next().unwrap());
        assert_eq!(ends.borrow().len(), 1);
        assert_eq!(ends.borrow()[0].1, SceneEvent::End);

        // Locked during the end slide: no event storm.
        scene.lock();
        assert!(!scene.next().unwrap());
        assert_eq!(ends.borrow().len(), 1);
    }

    #[test]
    fn test_prev_at_first_section_is_noop() {
        let mut scene = controller(&["hello", "beams"]);
        scene.start();

        assert!(!scene.prev().unwrap());
        assert!(scene.next().unwrap());
        scene.complete_transition();
        assert!(scene.prev().unwrap());
    }

    #[test]
    fn test_stop_keeps_position_for_restart() {
        let mut scene = controller(&["hello", "beams"]);
        scene.start();
        scene.go_to(1).unwrap();
        scene.complete_transition();

        assert!(scene.stop());
        assert!(!scene.stop());
        assert_eq!(scene.state(), SceneState::Idle);
        assert!(!scene.go_to(0).unwrap());

        assert!(scene.start());
        assert_eq!(scene.current_index(), Some(1));
        assert!(scene.section(1).unwrap().is_playing());
    }

    #[test]
    fn test_faulting_subscriber_does_not_block_others() {
        let mut scene = controller(&["hello", "beams"]);
        scene.on(events::CHANGE_BEGIN, |_| anyhow::bail!("subscriber down"));
        let begins = record(&mut scene, events::CHANGE_BEGIN);

        scene.start();
        scene.go_to(1).unwrap();
        assert_eq!(begins.borrow().len(), 1);
    }
}
