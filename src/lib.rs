//! respondiff turns a design selection into responsive CSS.
//!
//! Selected nodes are grouped by the breakpoint their outermost frame's width falls into, a fixed
//! set of layout and typography properties is extracted from each, and every tier is diffed
//! against the next narrower one. The result is a base block plus one `min-width` media query per
//! tier that changes something.
//!
//! The stages are usable one by one:
//!
//! 1. Classify: [`classify()`] over a [`Scene`] and a [`BreakpointTable`]
//! 2. Extract: [`extract_styles`] into a [`StyleRecord`]
//! 3. Diff: [`compute_diffs`] into a [`MediaQueryMap`]
//! 4. Emit: [`render_css`]
//!
//! [`run`] chains all four for one selection, and [`Session::apply`] wraps the pipeline in an
//! event reducer that carries the allow-list, unit mode and selection history between events.
#![forbid(unsafe_code)]

pub mod breakpoints;
pub mod classify;
pub mod config;
pub mod diff;
pub mod extract;
mod foundation;
pub mod history;
pub mod navigate;
pub mod notice;
pub mod pipeline;
pub mod render;
pub mod scene;
pub mod session;
pub mod units;

pub use breakpoints::{Breakpoint, BreakpointTable};
pub use classify::{classify, find_ancestor_frame};
pub use config::Config;
pub use diff::{MediaQueryMap, RemovalPolicy, TierDiff, compute_diffs, diff_in_order};
pub use extract::{
    ExtractOpts, LineHeightPolicy, StyleProperty, StyleRecord, collapse_edges, extract_styles,
};
pub use foundation::error::{RespondiffError, RespondiffResult};
pub use history::{HistoryDirection, SelectionHistory};
pub use navigate::{Direction, counterpart, navigate};
pub use notice::Notice;
pub use pipeline::{AllowList, AllowMode, Assignment, RunOutput, assign, run};
pub use render::{MediaLabel, RenderOpts, render_css};
pub use scene::graph::{NodeId, Scene, SceneNode};
pub use scene::model::{FontWeight, NodeDef, NodeKind, NodeProps, SceneDef, UnitValue, ValueUnit};
pub use session::{BreakpointStatus, Event, EventDef, Outcome, Session, Transition, UiMessage};
pub use units::{LengthMode, format_length, length_token};
