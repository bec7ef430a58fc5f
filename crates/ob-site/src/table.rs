//! The site transition table
//!
//! Encodes which sections enter, exit, start, stop, show, hide and cue on
//! every navigation. Neighboring viewpoints share content: the smoke
//! field spans hello/beams, the flow field backs ball through height, the
//! rocks bed backs face through galaxy. Those sections pre-enter on
//! arrival and are only stopped or hidden once the traversal has moved
//! far enough away, which is what the `unless` guard sets express.
//!
//! Endpoint sections of a jump get their full in/out animation;
//! intermediate sections are only shown or hidden.

use ob_core::Way;
use ob_scene::{SceneProfile, Step, TransitionTable};

use crate::cues;
use crate::sections::SECTION_NAMES;

/// The complete transition table of the heads page
pub fn site_table() -> TransitionTable {
    TransitionTable::new()
        // arrivals
        .with_arrival(
            "hello",
            vec![
                Step::enter("hello"),
                Step::start("hello"),
                Step::cue("hello", cues::SMOKE_START),
                Step::exit_fixed("beams", Way::Up),
                Step::start("beams"),
            ],
        )
        .with_arrival(
            "beams",
            vec![
                Step::cue("hello", cues::SMOKE_START),
                Step::enter("beams"),
                Step::start("beams"),
            ],
        )
        .with_arrival(
            "drop",
            vec![
                Step::exit_fixed("beams", Way::Down),
                Step::start("beams"),
                Step::enter("drop"),
                Step::start("drop"),
            ],
        )
        .with_arrival(
            "ball",
            vec![
                Step::exit_fixed("drop", Way::Down),
                Step::start("drop"),
                Step::enter("ball"),
                Step::start("ball"),
                Step::cue("flow", cues::FIELD_IN),
                Step::start("flow"),
            ],
        )
        .with_arrival(
            "flow",
            vec![
                Step::enter("flow"),
                Step::cue("flow", cues::FIELD_IN),
                Step::start("flow"),
                Step::cue("neons", cues::SMOKE_START),
            ],
        )
        // neons never plays an in animation of its own; the neon tubes
        // light up from the start hook
        .with_arrival(
            "neons",
            vec![
                Step::cue("flow", cues::FIELD_IN),
                Step::start("flow"),
                Step::start("neons"),
                Step::cue("neons", cues::SMOKE_START),
                Step::show("height"),
            ],
        )
        .with_arrival(
            "height",
            vec![
                Step::cue("flow", cues::FIELD_IN),
                Step::start("flow"),
                Step::cue("neons", cues::SMOKE_START),
                Step::show("height"),
                Step::enter("height"),
                Step::start("height"),
            ],
        )
        .with_arrival(
            "wave",
            vec![
                Step::show("height"),
                Step::enter("wave"),
                Step::start("wave"),
            ],
        )
        .with_arrival(
            "face",
            vec![
                Step::enter("face"),
                Step::start("face"),
                Step::show("rocks"),
            ],
        )
        .with_arrival(
            "rocks",
            vec![
                Step::show("rocks"),
                Step::enter("rocks"),
                Step::start("rocks"),
            ],
        )
        .with_arrival(
            "galaxy",
            vec![
                Step::show("rocks"),
                Step::enter("galaxy"),
                Step::start("galaxy"),
                Step::show("gravity"),
            ],
        )
        .with_arrival(
            "gravity",
            vec![
                Step::show("gravity"),
                Step::enter("gravity"),
                Step::start("gravity"),
            ],
        )
        .with_arrival("end", vec![Step::enter("end")])
        // departures; hello has no out animation
        .with_departure("beams", vec![Step::exit("beams")])
        .with_departure("drop", vec![Step::exit("drop")])
        .with_departure("ball", vec![Step::exit("ball")])
        .with_departure("flow", vec![Step::exit("flow")])
        .with_departure("neons", vec![Step::exit("neons")])
        .with_departure("height", vec![Step::exit("height")])
        .with_departure("wave", vec![Step::exit("wave")])
        .with_departure("face", vec![Step::exit("face")])
        .with_departure("rocks", vec![Step::exit("rocks")])
        .with_departure("galaxy", vec![Step::exit("galaxy")])
        .with_departure("gravity", vec![Step::exit("gravity")])
        .with_departure("end", vec![Step::exit("end")])
        // settlements
        .with_settlement(
            "hello",
            vec![
                Step::stop("hello").always(),
                Step::cue("hello", cues::SMOKE_STOP).unless(["beams"]),
                Step::stop("beams").unless(["beams", "drop"]),
            ],
        )
        .with_settlement(
            "beams",
            vec![
                Step::cue("hello", cues::SMOKE_STOP).unless(["hello"]),
                Step::stop("beams").unless(["hello", "drop"]),
            ],
        )
        .with_settlement(
            "drop",
            vec![
                Step::stop("beams").unless(["hello", "beams"]),
                Step::stop("drop").unless(["ball"]),
            ],
        )
        .with_settlement(
            "ball",
            vec![
                Step::stop("ball").always(),
                Step::stop("drop").unless(["drop"]),
                Step::stop("flow").unless(["flow", "neons", "height"]),
            ],
        )
        .with_settlement(
            "flow",
            vec![
                Step::cue("neons", cues::SMOKE_STOP).unless(["neons", "height"]),
                Step::stop("flow").unless(["ball", "neons", "height"]),
            ],
        )
        .with_settlement(
            "neons",
            vec![
                Step::stop("neons").always(),
                Step::cue("neons", cues::SMOKE_STOP).unless(["flow", "height"]),
                Step::stop("flow").unless(["ball", "flow", "height"]),
                Step::hide("height").unless(["height", "wave"]),
            ],
        )
        .with_settlement(
            "height",
            vec![
                Step::stop("height").always(),
                Step::hide("height").unless(["neons", "wave"]),
                Step::cue("neons", cues::SMOKE_STOP).unless(["flow", "neons"]),
                Step::stop("flow").unless(["ball", "flow", "neons"]),
            ],
        )
        .with_settlement(
            "wave",
            vec![
                Step::stop("wave").always(),
                Step::hide("height").unless(["neons", "height"]),
            ],
        )
        .with_settlement(
            "face",
            vec![
                Step::stop("face").always(),
                Step::hide("rocks").unless(["rocks", "galaxy"]),
            ],
        )
        .with_settlement(
            "rocks",
            vec![
                Step::stop("rocks").always(),
                Step::hide("rocks").unless(["face", "galaxy"]),
            ],
        )
        .with_settlement(
            "galaxy",
            vec![
                Step::stop("galaxy").always(),
                Step::hide("rocks").unless(["face", "rocks"]),
                Step::hide("gravity").unless(["gravity"]),
            ],
        )
        .with_settlement(
            "gravity",
            vec![
                Step::stop("gravity").always(),
                Step::hide("gravity").unless(["galaxy"]),
            ],
        )
}

/// The site as a loadable profile: section order plus the table
pub fn site_profile() -> SceneProfile {
    SceneProfile::new(
        SECTION_NAMES.iter().map(|s| s.to_string()).collect(),
        site_table(),
    )
}
