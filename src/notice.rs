use std::fmt;

use crate::{history::HistoryDirection, navigate::Direction};

/// Non-blocking advisory surfaced to the user. None of these stop the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A second selected node classified into an already claimed tier.
    BreakpointTaken { breakpoint: String, min_width: u32 },
    NoNavigationTarget { direction: Direction },
    HistoryExhausted { direction: HistoryDirection },
    UnknownBreakpoint { name: String },
    NoCounterpart { breakpoint: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreakpointTaken { min_width, .. } => {
                write!(f, "A node for breakpoint {min_width} is already selected!")
            }
            Self::NoNavigationTarget { direction } => {
                write!(f, "No elements to navigate {}", direction.describe())
            }
            Self::HistoryExhausted { direction } => match direction {
                HistoryDirection::Back => f.write_str("No earlier selection in history"),
                HistoryDirection::Forward => f.write_str("No later selection in history"),
            },
            Self::UnknownBreakpoint { name } => write!(f, "Unknown breakpoint '{name}'"),
            Self::NoCounterpart { breakpoint } => {
                write!(f, "No matching element found for breakpoint '{breakpoint}'")
            }
        }
    }
}
