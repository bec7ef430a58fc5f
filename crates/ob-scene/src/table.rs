//! Transition table
//!
//! The explicit mapping from a navigation transition to the ordered
//! section actions it requires. Three phases:
//!
//! - **arrivals**, keyed by the destination name: enter/start/cue/show of
//!   the destination and any neighbors that must pre-enter because their
//!   content is visible from the destination's viewpoint
//! - **departures**, keyed by the source name: the source's out animation
//! - **settlements**, keyed by the source name: stop/hide once the
//!   transport finishes, each step guarded by an `unless_to` set so that
//!   sections shared between neighboring viewpoints survive short hops
//!
//! Endpoint sections get full enter/exit; sections strictly between the
//! endpoints of a multi-step jump are only shown/hidden by explicit steps.
//! Table entries are pure data; planning never mutates sections.

use std::collections::{HashMap, HashSet};

use ob_core::Way;
use serde::{Deserialize, Serialize};

use crate::{SceneError, SceneResult};

/// How a directional step picks its way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WayMode {
    /// Use the transition's own direction
    #[default]
    Travel,
    /// Always animate upward
    Up,
    /// Always animate downward
    Down,
}

impl WayMode {
    /// Resolve against the transition's direction
    pub fn resolve(self, travel: Way) -> Way {
        match self {
            WayMode::Travel => travel,
            WayMode::Up => Way::Up,
            WayMode::Down => Way::Down,
        }
    }
}

/// One action a table step applies to its target section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    Enter {
        #[serde(default)]
        way: WayMode,
    },
    Exit {
        #[serde(default)]
        way: WayMode,
    },
    Start,
    Stop,
    Show,
    Hide,
    Cue {
        name: String,
    },
}

/// A table step: one action on one named section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub target: String,
    pub action: Action,
}

impl Step {
    pub fn new(target: impl Into<String>, action: Action) -> Self {
        Self {
            target: target.into(),
            action,
        }
    }

    /// Enter along the transition's direction
    pub fn enter(target: impl Into<String>) -> Self {
        Self::new(target, Action::Enter { way: WayMode::Travel })
    }

    /// Enter along a fixed direction
    pub fn enter_fixed(target: impl Into<String>, way: Way) -> Self {
        let way = match way {
            Way::Up => WayMode::Up,
            Way::Down => WayMode::Down,
        };
        Self::new(target, Action::Enter { way })
    }

    /// Exit along the transition's direction
    pub fn exit(target: impl Into<String>) -> Self {
        Self::new(target, Action::Exit { way: WayMode::Travel })
    }

    /// Exit along a fixed direction
    pub fn exit_fixed(target: impl Into<String>, way: Way) -> Self {
        let way = match way {
            Way::Up => WayMode::Up,
            Way::Down => WayMode::Down,
        };
        Self::new(target, Action::Exit { way })
    }

    pub fn start(target: impl Into<String>) -> Self {
        Self::new(target, Action::Start)
    }

    pub fn stop(target: impl Into<String>) -> Self {
        Self::new(target, Action::Stop)
    }

    pub fn show(target: impl Into<String>) -> Self {
        Self::new(target, Action::Show)
    }

    pub fn hide(target: impl Into<String>) -> Self {
        Self::new(target, Action::Hide)
    }

    pub fn cue(target: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            target,
            Action::Cue {
                name: name.into(),
            },
        )
    }

    /// Turn this step into a settlement step skipped for the given
    /// destinations
    pub fn unless<I, S>(self, destinations: I) -> ConditionalStep
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConditionalStep {
            step: self,
            unless_to: destinations.into_iter().map(Into::into).collect(),
        }
    }

    /// Turn this step into an unconditional settlement step
    pub fn always(self) -> ConditionalStep {
        ConditionalStep {
            step: self,
            unless_to: HashSet::new(),
        }
    }
}

/// A settlement step with destination guards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalStep {
    #[serde(flatten)]
    pub step: Step,
    /// Destinations for which this step must be skipped
    #[serde(default, skip_serializing_if = "HashSet::is_empty")]
    pub unless_to: HashSet<String>,
}

impl ConditionalStep {
    /// Does this step apply when arriving at `to`?
    pub fn applies_to(&self, to: &str) -> bool {
        !self.unless_to.contains(to)
    }
}

/// A resolved, directly executable section operation
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOp {
    Enter(Way),
    Exit(Way),
    Start,
    Stop,
    Show,
    Hide,
    Cue(String),
}

/// One entry of a transition plan
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub target: String,
    pub op: SectionOp,
}

fn resolve(step: &Step, travel: Way) -> Instruction {
    let op = match &step.action {
        Action::Enter { way } => SectionOp::Enter(way.resolve(travel)),
        Action::Exit { way } => SectionOp::Exit(way.resolve(travel)),
        Action::Start => SectionOp::Start,
        Action::Stop => SectionOp::Stop,
        Action::Show => SectionOp::Show,
        Action::Hide => SectionOp::Hide,
        Action::Cue { name } => SectionOp::Cue(name.clone()),
    };

    Instruction {
        target: step.target.clone(),
        op,
    }
}

/// The full transition table of a scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitionTable {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    arrivals: HashMap<String, Vec<Step>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    departures: HashMap<String, Vec<Step>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    settlements: HashMap<String, Vec<ConditionalStep>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps run at `change:begin` when `to` is the destination
    pub fn with_arrival(mut self, to: impl Into<String>, steps: Vec<Step>) -> Self {
        self.arrivals.insert(to.into(), steps);
        self
    }

    /// Steps run at `change:begin` when `from` is the source
    pub fn with_departure(mut self, from: impl Into<String>, steps: Vec<Step>) -> Self {
        self.departures.insert(from.into(), steps);
        self
    }

    /// Guarded steps run at `change:complete` when `from` was the source
    pub fn with_settlement(
        mut self,
        from: impl Into<String>,
        steps: Vec<ConditionalStep>,
    ) -> Self {
        self.settlements.insert(from.into(), steps);
        self
    }

    /// The ordered instructions for the begin phase of a transition:
    /// the destination's arrival steps, then the source's departure steps.
    pub fn plan_begin(&self, from: &str, to: &str, way: Way) -> Vec<Instruction> {
        let arrivals = self.arrivals.get(to).map(Vec::as_slice).unwrap_or(&[]);
        let departures = self.departures.get(from).map(Vec::as_slice).unwrap_or(&[]);

        arrivals
            .iter()
            .chain(departures)
            .map(|step| resolve(step, way))
            .collect()
    }

    /// The ordered instructions for the settle phase, with `unless_to`
    /// guards applied against the destination.
    pub fn plan_complete(&self, from: &str, to: &str) -> Vec<Instruction> {
        let settlements = self.settlements.get(from).map(Vec::as_slice).unwrap_or(&[]);

        // Way never varies a settlement; Travel resolves arbitrarily.
        settlements
            .iter()
            .filter(|cond| cond.applies_to(to))
            .map(|cond| resolve(&cond.step, Way::Down))
            .collect()
    }

    /// Check that every key, target and guard names a known section
    pub fn validate(&self, known: &HashSet<&str>) -> SceneResult<()> {
        let check = |name: &str| -> SceneResult<()> {
            if known.contains(name) {
                Ok(())
            } else {
                Err(SceneError::UnknownSection(name.to_string()))
            }
        };

        for (to, steps) in &self.arrivals {
            check(to)?;
            for step in steps {
                check(&step.target)?;
            }
        }

        for (from, steps) in &self.departures {
            check(from)?;
            for step in steps {
                check(&step.target)?;
            }
        }

        for (from, steps) in &self.settlements {
            check(from)?;
            for cond in steps {
                check(&cond.step.target)?;
                for guard in &cond.unless_to {
                    check(guard)?;
                }
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty() && self.departures.is_empty() && self.settlements.is_empty()
    }
}
