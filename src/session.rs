//! Event-driven session state.
//!
//! The host delivers selection changes and UI messages one at a time. [`Session::apply`] is a
//! reducer: it consumes the session, applies one [`Event`], reruns the pipeline when the event
//! calls for it, and hands back the next session together with the [`Outcome`] the host should act
//! on. There is no other mutable state.

use std::collections::BTreeSet;

use crate::{
    config::Config,
    extract::StyleProperty,
    foundation::error::{RespondiffError, RespondiffResult},
    history::{HistoryDirection, SelectionHistory},
    navigate::{Direction, counterpart, navigate},
    notice::Notice,
    pipeline::{AllowList, AllowMode, Assignment, RunOutput, run},
    scene::graph::{NodeId, Scene},
    units::LengthMode,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    SelectionChanged(Vec<NodeId>),
    /// Property names chosen in the UI; unknown names are ignored.
    FieldsUpdated(Vec<String>),
    Navigate(Direction),
    SwitchBreakpoint { name: String },
    HistoryStep(HistoryDirection),
    ToggleUnits { pixels: bool },
}

/// JSON form of [`Event`], addressing nodes by their scene keys.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EventDef {
    SelectionChanged { nodes: Vec<String> },
    FieldsUpdated { fields: Vec<String> },
    Navigate { direction: Direction },
    SwitchBreakpoint { name: String },
    HistoryStep { direction: HistoryDirection },
    ToggleUnits { pixels: bool },
}

impl EventDef {
    pub fn resolve(self, scene: &Scene) -> RespondiffResult<Event> {
        Ok(match self {
            Self::SelectionChanged { nodes } => Event::SelectionChanged(
                nodes
                    .iter()
                    .map(|key| {
                        scene.find(key).ok_or_else(|| {
                            RespondiffError::scene(format!(
                                "selected node '{key}' is not in the scene"
                            ))
                        })
                    })
                    .collect::<RespondiffResult<Vec<_>>>()?,
            ),
            Self::FieldsUpdated { fields } => Event::FieldsUpdated(fields),
            Self::Navigate { direction } => Event::Navigate(direction),
            Self::SwitchBreakpoint { name } => Event::SwitchBreakpoint { name },
            Self::HistoryStep { direction } => Event::HistoryStep(direction),
            Self::ToggleUnits { pixels } => Event::ToggleUnits { pixels },
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointStatus {
    pub name: String,
    pub min_width: u32,
    /// A selected node is assigned to this tier.
    pub active: bool,
}

/// Everything the UI panel needs after a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiMessage {
    pub css: String,
    pub available_props: Vec<StyleProperty>,
    pub used_props: Vec<StyleProperty>,
    pub selected_fields: Vec<StyleProperty>,
    pub breakpoints: Vec<BreakpointStatus>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub pixels: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Selection the host should apply, when the event moved it.
    pub select: Option<Vec<NodeId>>,
    pub message: Option<UiMessage>,
    pub notices: Vec<Notice>,
}

#[derive(Debug)]
pub struct Transition {
    pub session: Session,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    config: Config,
    allow: AllowList,
    selection: Vec<NodeId>,
    history: SelectionHistory,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    #[tracing::instrument(skip(self, scene))]
    pub fn apply(mut self, scene: &Scene, event: Event) -> Transition {
        let mut outcome = Outcome::default();

        let mode = match event {
            Event::SelectionChanged(ids) => {
                self.selection = ids;
                self.history.record(&self.selection);
                capture_if_single(&self.selection)
            }
            Event::FieldsUpdated(names) => {
                self.allow = AllowList::Only(parse_fields(&names));
                AllowMode::Filter
            }
            Event::Navigate(direction) => match navigate(scene, &self.selection, direction) {
                Some(next) => {
                    self.move_selection(next, &mut outcome);
                    AllowMode::Capture
                }
                None => {
                    outcome.notices.push(Notice::NoNavigationTarget { direction });
                    return self.finish(outcome);
                }
            },
            Event::SwitchBreakpoint { name } => match self.switch_target(scene, &name) {
                Ok(target) => {
                    self.move_selection(vec![target], &mut outcome);
                    AllowMode::Capture
                }
                Err(notice) => {
                    outcome.notices.push(notice);
                    return self.finish(outcome);
                }
            },
            Event::HistoryStep(direction) => match self.history.step(direction) {
                Some(entry) => {
                    self.selection = entry.clone();
                    outcome.select = Some(entry);
                    AllowMode::Filter
                }
                None => {
                    outcome.notices.push(Notice::HistoryExhausted { direction });
                    return self.finish(outcome);
                }
            },
            Event::ToggleUnits { pixels } => {
                self.config.length_mode = if pixels {
                    LengthMode::Px
                } else {
                    LengthMode::Rem
                };
                AllowMode::Filter
            }
        };

        let (message, notices) = self.rerun(scene, mode);
        outcome.message = Some(message);
        outcome.notices.extend(notices);
        self.finish(outcome)
    }

    /// Run the pipeline on the current selection without changing it or the allow-list.
    pub fn refresh(&mut self, scene: &Scene) -> (UiMessage, Vec<Notice>) {
        self.rerun(scene, AllowMode::Filter)
    }

    fn rerun(&mut self, scene: &Scene, mode: AllowMode) -> (UiMessage, Vec<Notice>) {
        let out = run(scene, &self.selection, &self.config, &self.allow, mode);
        if let Some(captured) = out.captured.clone() {
            self.allow = captured;
        }
        let message = self.message_for(&out);
        (message, out.notices)
    }

    fn message_for(&self, out: &RunOutput) -> UiMessage {
        let breakpoints = self.breakpoint_statuses(&out.assignment);
        let nav = UiMessage {
            breakpoints,
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
            pixels: self.config.length_mode == LengthMode::Px,
            ..UiMessage::default()
        };
        if self.selection.is_empty() {
            return nav;
        }
        UiMessage {
            css: out.css.clone(),
            available_props: out.available.clone(),
            used_props: out.used.clone(),
            selected_fields: self.allow.selected(&out.available),
            ..nav
        }
    }

    fn breakpoint_statuses(&self, assignment: &Assignment) -> Vec<BreakpointStatus> {
        self.config
            .breakpoints
            .ascending()
            .map(|bp| BreakpointStatus {
                name: bp.name.clone(),
                min_width: bp.min_width,
                active: assignment.get(&bp.name).is_some(),
            })
            .collect()
    }

    fn move_selection(&mut self, next: Vec<NodeId>, outcome: &mut Outcome) {
        self.history.record(&next);
        self.selection = next.clone();
        outcome.select = Some(next);
    }

    fn switch_target(&self, scene: &Scene, name: &str) -> Result<NodeId, Notice> {
        if self.config.breakpoints.get(name).is_none() {
            return Err(Notice::UnknownBreakpoint {
                name: name.to_string(),
            });
        }
        self.selection
            .first()
            .and_then(|&node| counterpart(scene, &self.config.breakpoints, node, name))
            .ok_or_else(|| Notice::NoCounterpart {
                breakpoint: name.to_string(),
            })
    }

    fn finish(self, outcome: Outcome) -> Transition {
        for notice in &outcome.notices {
            tracing::info!(%notice, "notice");
        }
        Transition {
            session: self,
            outcome,
        }
    }
}

fn capture_if_single(selection: &[NodeId]) -> AllowMode {
    if selection.len() == 1 {
        AllowMode::Capture
    } else {
        AllowMode::Filter
    }
}

fn parse_fields(names: &[String]) -> BTreeSet<StyleProperty> {
    names
        .iter()
        .filter_map(|name| match name.parse::<StyleProperty>() {
            Ok(prop) => Some(prop),
            Err(_) => {
                tracing::warn!(field = %name, "ignoring unknown style property");
                None
            }
        })
        .collect()
}
