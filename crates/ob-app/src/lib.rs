//! ob-app: Obverse app shell
//!
//! Top-level navigation between the two panes of the site: the WebGL
//! "heads" page and the scrolling "tails" page. Independent of section
//! transitions; the scene controller and the audio layer subscribe to the
//! shell's `slideBegin`/`slideComplete` and `heads:visible`/
//! `heads:invisible` events to start, stop and fade themselves.

mod shell;
mod waypoint;

pub use shell::*;
pub use waypoint::*;
