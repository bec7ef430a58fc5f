//! Site context
//!
//! One explicitly constructed context object owning the scene, the shell,
//! the sounds, the map, the waypoints and the menu, with every
//! cross-component subscription installed at build time.
//!
//! Bus handlers never call back into a component that may be mid-publish;
//! they enqueue a [`SiteAction`] instead, and [`Site::pump`] drains the
//! queue once the publishing call has returned. Every host-facing method
//! pumps before returning, so from the outside the site behaves as one
//! synchronous machine.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ob_app::{AppEvent, AppShell, Pane, WaypointChange, Waypoints, events as app_events};
use ob_core::{PreloadQueue, RenderQuality};
use ob_scene::{
    NavigationMap, SceneController, SceneEvent, SceneResult, events as scene_events,
};
use ob_sound::{BACKGROUND, SLIDE_FADE_MS, SoundBank, wire_slide_gating};

use crate::{MenuButton, MenuModel, PRELOAD_ASSETS, build_sections, site_table};

/// Activation offset for the tails waypoints (percent of viewport height)
const WAYPOINT_OFFSET: f32 = 30.0;

/// Deferred component actions produced by bus handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteAction {
    Navigate(usize),
    HighlightMap(usize),
    StartScene,
    StopScene,
    LockScene,
    UnlockScene,
    Slide,
    StartWaypoints,
    StopWaypoints,
}

type ActionQueue = Rc<RefCell<VecDeque<SiteAction>>>;

fn push(queue: &ActionQueue, action: SiteAction) {
    queue.borrow_mut().push_back(action);
}

/// The assembled heads/tails site
pub struct Site<C> {
    scene: Rc<RefCell<SceneController<C>>>,
    shell: Rc<RefCell<AppShell>>,
    sounds: Rc<RefCell<SoundBank>>,
    map: Rc<RefCell<NavigationMap>>,
    waypoints: Rc<RefCell<Waypoints>>,
    menu: MenuModel,
    preload: PreloadQueue,
    actions: ActionQueue,
}

impl<C> Site<C> {
    pub fn new() -> Self {
        let mut controller = SceneController::new();
        for section in build_sections::<C>() {
            if let Err(err) = controller.register(section) {
                log::error!("section rejected: {err}");
            }
        }
        if let Err(err) = controller.set_table(site_table()) {
            log::error!("site table rejected: {err}");
        }

        let scene = Rc::new(RefCell::new(controller));
        let shell = Rc::new(RefCell::new(AppShell::new()));
        let sounds = Rc::new(RefCell::new(SoundBank::site_defaults()));
        let map = Rc::new(RefCell::new(NavigationMap::with_nodes(
            scene.borrow().section_count(),
        )));
        let waypoints = Rc::new(RefCell::new(Waypoints::new(WAYPOINT_OFFSET)));
        let actions: ActionQueue = Rc::new(RefCell::new(VecDeque::new()));

        // map clicks navigate
        {
            let queue = Rc::clone(&actions);
            map.borrow_mut()
                .on_select(move |index| push(&queue, SiteAction::Navigate(index)));
        }

        // scene bus: highlight the destination node, slide away at the end
        {
            let queue = Rc::clone(&actions);
            scene
                .borrow_mut()
                .on(scene_events::CHANGE_BEGIN, move |event| {
                    if let SceneEvent::Change(change) = event {
                        push(&queue, SiteAction::HighlightMap(change.to.index));
                    }
                    Ok(())
                });

            let queue = Rc::clone(&actions);
            scene.borrow_mut().on(scene_events::END, move |_| {
                push(&queue, SiteAction::Slide);
                Ok(())
            });
        }

        // shell bus: freeze section navigation and the tails waypoints
        // while a slide runs, and start/stop the scene with heads
        // visibility
        {
            let queue = Rc::clone(&actions);
            shell.borrow_mut().on(app_events::SLIDE_BEGIN, move |event| {
                push(&queue, SiteAction::LockScene);
                if let AppEvent::SlideBegin { to: Pane::Heads } = event {
                    push(&queue, SiteAction::StopWaypoints);
                }
                Ok(())
            });

            let queue = Rc::clone(&actions);
            shell
                .borrow_mut()
                .on(app_events::SLIDE_COMPLETE, move |event| {
                    push(&queue, SiteAction::UnlockScene);
                    if let AppEvent::SlideComplete { to: Pane::Tails } = event {
                        push(&queue, SiteAction::StartWaypoints);
                    }
                    Ok(())
                });

            let queue = Rc::clone(&actions);
            shell.borrow_mut().on(app_events::HEADS_VISIBLE, move |_| {
                push(&queue, SiteAction::StartScene);
                Ok(())
            });

            let queue = Rc::clone(&actions);
            shell.borrow_mut().on(app_events::HEADS_INVISIBLE, move |_| {
                push(&queue, SiteAction::StopScene);
                Ok(())
            });
        }

        wire_slide_gating(&mut shell.borrow_mut(), Rc::clone(&sounds));

        Site {
            scene,
            shell,
            sounds,
            map,
            waypoints,
            menu: MenuModel::new(),
            preload: PreloadQueue::new(PRELOAD_ASSETS.len()),
            actions,
        }
    }

    /// Drain the deferred actions. Applying one action may publish events
    /// that enqueue more; the loop runs until the queue is dry.
    pub fn pump(&mut self) {
        loop {
            let action = self.actions.borrow_mut().pop_front();
            let Some(action) = action else {
                break;
            };

            match action {
                SiteAction::Navigate(index) => {
                    if let Err(err) = self.scene.borrow_mut().go_to(index) {
                        log::warn!("map navigation failed: {err}");
                    }
                }
                SiteAction::HighlightMap(index) => {
                    self.map.borrow_mut().set_active(index);
                }
                SiteAction::StartScene => {
                    self.scene.borrow_mut().start();
                }
                SiteAction::StopScene => {
                    self.scene.borrow_mut().stop();
                }
                SiteAction::LockScene => self.scene.borrow_mut().lock(),
                SiteAction::UnlockScene => self.scene.borrow_mut().unlock(),
                SiteAction::Slide => {
                    self.shell.borrow_mut().slide();
                }
                SiteAction::StartWaypoints => self.waypoints.borrow_mut().start(),
                SiteAction::StopWaypoints => self.waypoints.borrow_mut().stop(),
            }
        }
    }

    /// Start the site on the heads pane: scene running, background
    /// fading in
    pub fn start(&mut self) {
        self.scene.borrow_mut().start();
        self.sounds
            .borrow_mut()
            .fade(BACKGROUND, 0.0, 1.0, SLIDE_FADE_MS);
        self.pump();
    }

    /// Navigate to a section by index
    pub fn go_to(&mut self, index: usize) -> SceneResult<bool> {
        let result = self.scene.borrow_mut().go_to(index);
        self.pump();
        result
    }

    /// Navigate one section forward; past the last section this starts
    /// the slide to tails
    pub fn next(&mut self) -> SceneResult<bool> {
        let result = self.scene.borrow_mut().next();
        self.pump();
        result
    }

    pub fn prev(&mut self) -> SceneResult<bool> {
        let result = self.scene.borrow_mut().prev();
        self.pump();
        result
    }

    /// The navigation transport finished its camera move
    pub fn complete_transition(&mut self) -> bool {
        let settled = self.scene.borrow_mut().complete_transition();
        self.pump();
        settled
    }

    /// A click on a map node
    pub fn click_map(&mut self, index: usize) -> bool {
        let hit = self.map.borrow_mut().select(index);
        self.pump();
        hit
    }

    /// Toggle the top-level slide
    pub fn slide(&mut self) -> bool {
        let started = self.shell.borrow_mut().slide();
        self.pump();
        started
    }

    /// The slide transport finished moving the panes
    pub fn complete_slide(&mut self) -> bool {
        let landed = self.shell.borrow_mut().complete_slide();
        self.pump();
        landed
    }

    /// Edge-peek the other pane
    pub fn open(&mut self) -> bool {
        let opened = self.shell.borrow_mut().open();
        self.pump();
        opened
    }

    pub fn close(&mut self) -> bool {
        let closed = self.shell.borrow_mut().close();
        self.pump();
        closed
    }

    pub fn complete_close(&mut self) -> bool {
        let done = self.shell.borrow_mut().complete_close();
        self.pump();
        done
    }

    /// A tails-page scroll step; returns the waypoint changes for the
    /// renderer to animate
    pub fn scroll_tails(&mut self, viewport_top: f32, viewport_height: f32) -> Vec<WaypointChange> {
        self.waypoints
            .borrow_mut()
            .update(viewport_top, viewport_height)
    }

    /// A menu button press. Returns the button's new label where one
    /// applies.
    pub fn menu_activate(&mut self, button: MenuButton) -> Option<&'static str> {
        match button {
            MenuButton::Sounds => {
                let muted = self.sounds.borrow_mut().toggle();
                Some(MenuModel::sounds_label(muted))
            }
            MenuButton::Help => {
                self.menu.open_help();
                None
            }
            MenuButton::Quality => {
                let mut scene = self.scene.borrow_mut();
                let quality = scene.quality().toggled();
                scene.set_quality(quality);
                Some(MenuModel::quality_label(quality))
            }
        }
    }

    /// One preloaded (or failed) asset reported by the loader
    pub fn mark_asset_loaded(&mut self) {
        self.preload.mark_loaded();
    }

    pub fn preload(&self) -> &PreloadQueue {
        &self.preload
    }

    pub fn preload_mut(&mut self) -> &mut PreloadQueue {
        &mut self.preload
    }

    pub fn menu(&self) -> &MenuModel {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuModel {
        &mut self.menu
    }

    pub fn scene(&self) -> Rc<RefCell<SceneController<C>>> {
        Rc::clone(&self.scene)
    }

    pub fn shell(&self) -> Rc<RefCell<AppShell>> {
        Rc::clone(&self.shell)
    }

    pub fn sounds(&self) -> Rc<RefCell<SoundBank>> {
        Rc::clone(&self.sounds)
    }

    pub fn map(&self) -> Rc<RefCell<NavigationMap>> {
        Rc::clone(&self.map)
    }

    pub fn waypoints(&self) -> Rc<RefCell<Waypoints>> {
        Rc::clone(&self.waypoints)
    }

    /// Current render quality, for the renderer's framebuffer scale
    pub fn quality(&self) -> RenderQuality {
        self.scene.borrow().quality()
    }
}

impl<C> Default for Site<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_click_navigates_and_highlights() {
        let mut site: Site<()> = Site::new();
        site.start();

        assert!(site.click_map(2));
        assert_eq!(site.scene().borrow().current_index(), Some(2));
        assert_eq!(site.map().borrow().active(), Some(2));
    }

    #[test]
    fn test_menu_sound_toggle_labels() {
        let mut site: Site<()> = Site::new();
        assert_eq!(site.menu_activate(MenuButton::Sounds), Some("UNMUTE"));
        assert_eq!(site.menu_activate(MenuButton::Sounds), Some("MUTE"));
    }

    #[test]
    fn test_menu_quality_toggle_applies_to_scene() {
        let mut site: Site<()> = Site::new();
        assert_eq!(site.menu_activate(MenuButton::Quality), Some("QUALITY 0.5"));
        assert_eq!(site.quality(), RenderQuality::Half);
        assert_eq!(site.menu_activate(MenuButton::Quality), Some("QUALITY 1"));
    }

    #[test]
    fn test_menu_help_opens_overlay() {
        let mut site: Site<()> = Site::new();
        assert_eq!(site.menu_activate(MenuButton::Help), None);
        assert!(site.menu().is_help_open());
    }
}
