//! ob-site: the Obverse heads/tails site
//!
//! Assembles the engine crates into the actual site: fourteen themed
//! sections on the heads pane, the complete transition table between
//! them, the navigation map, the menu, the sound gating and the top-level
//! slide. The [`Site`] context object owns every component and wires the
//! cross-component subscriptions; hosts drive it from their input and
//! animation loops.

mod menu;
mod sections;
mod site;
mod table;

pub use menu::*;
pub use sections::*;
pub use site::*;
pub use table::*;
