use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::error::{RespondiffError, RespondiffResult};

/// A named minimum-width tier.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Breakpoint {
    pub name: String,
    pub min_width: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, min_width: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
        }
    }
}

/// Immutable set of breakpoints, stored ascending by minimum width.
///
/// The first (narrowest) tier is the base tier: its styles render without a media-query wrapper.
/// On the wire the table is a JSON object mapping names to widths; the object's key order is
/// irrelevant because tiers are always ordered by width.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct BreakpointTable {
    tiers: Vec<Breakpoint>,
}

impl BreakpointTable {
    pub fn new(tiers: impl IntoIterator<Item = Breakpoint>) -> RespondiffResult<Self> {
        let mut tiers: Vec<Breakpoint> = tiers.into_iter().collect();
        if tiers.is_empty() {
            return Err(RespondiffError::validation(
                "breakpoint table must have at least one tier",
            ));
        }

        let mut names = BTreeSet::new();
        let mut widths = BTreeSet::new();
        for bp in &tiers {
            if bp.name.trim().is_empty() {
                return Err(RespondiffError::validation(
                    "breakpoint name must be non-empty",
                ));
            }
            if bp.min_width == 0 {
                return Err(RespondiffError::validation(format!(
                    "breakpoint '{}' must have min_width > 0",
                    bp.name
                )));
            }
            if !names.insert(bp.name.as_str()) {
                return Err(RespondiffError::validation(format!(
                    "duplicate breakpoint name '{}'",
                    bp.name
                )));
            }
            if !widths.insert(bp.min_width) {
                return Err(RespondiffError::validation(format!(
                    "breakpoint '{}' reuses min_width {}",
                    bp.name, bp.min_width
                )));
            }
        }

        tiers.sort_by_key(|bp| bp.min_width);
        Ok(Self { tiers })
    }

    /// The table shipped with the design-tool plugin.
    pub fn desktop() -> Self {
        Self {
            tiers: vec![
                Breakpoint::new("base", 1024),
                Breakpoint::new("$desktop-breakpoint-s", 1366),
                Breakpoint::new("$desktop-breakpoint-md", 1440),
                Breakpoint::new("$desktop-breakpoint-l", 1920),
                Breakpoint::new("$desktop-breakpoint-xl", 2560),
            ],
        }
    }

    pub fn base(&self) -> &Breakpoint {
        &self.tiers[0]
    }

    pub fn is_base(&self, name: &str) -> bool {
        self.base().name == name
    }

    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.tiers.iter().find(|bp| bp.name == name)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn ascending(&self) -> impl DoubleEndedIterator<Item = &Breakpoint> {
        self.tiers.iter()
    }

    pub fn descending(&self) -> impl Iterator<Item = &Breakpoint> {
        self.tiers.iter().rev()
    }

    /// Widest tier whose minimum width is `<= width`.
    pub fn tier_for_width(&self, width: f64) -> Option<&Breakpoint> {
        self.descending().find(|bp| width >= f64::from(bp.min_width))
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::desktop()
    }
}

impl TryFrom<BTreeMap<String, u32>> for BreakpointTable {
    type Error = RespondiffError;

    fn try_from(map: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        Self::new(
            map.into_iter()
                .map(|(name, min_width)| Breakpoint { name, min_width }),
        )
    }
}

impl From<BreakpointTable> for BTreeMap<String, u32> {
    fn from(table: BreakpointTable) -> Self {
        table
            .tiers
            .into_iter()
            .map(|bp| (bp.name, bp.min_width))
            .collect()
    }
}
