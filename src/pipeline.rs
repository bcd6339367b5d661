use std::collections::BTreeSet;

use crate::{
    breakpoints::{Breakpoint, BreakpointTable},
    classify::classify,
    config::Config,
    diff::compute_diffs,
    extract::{StyleProperty, StyleRecord, extract_styles},
    notice::Notice,
    render::render_css,
    scene::graph::{NodeId, Scene},
};

/// Which extracted properties take part in diffing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AllowList {
    #[default]
    Unrestricted,
    Only(BTreeSet<StyleProperty>),
}

impl AllowList {
    pub fn only(props: impl IntoIterator<Item = StyleProperty>) -> Self {
        Self::Only(props.into_iter().collect())
    }

    pub fn allows(&self, prop: StyleProperty) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Only(set) => set.contains(&prop),
        }
    }

    fn apply(&self, record: StyleRecord) -> StyleRecord {
        match self {
            Self::Unrestricted => record,
            Self::Only(set) => record.restricted_to(set),
        }
    }

    /// Property names to report as selected, given what the current selection offers.
    pub fn selected(&self, available: &[StyleProperty]) -> Vec<StyleProperty> {
        match self {
            Self::Unrestricted => available.to_vec(),
            Self::Only(set) => set.iter().copied().collect(),
        }
    }
}

/// How a run treats the allow-list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AllowMode {
    /// Restrict records to the allow-list.
    #[default]
    Filter,
    /// Ignore the allow-list and capture every available property as the new one.
    Capture,
}

/// Breakpoint -> node claims for one run, ascending by tier width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    claims: Vec<(Breakpoint, NodeId)>,
}

impl Assignment {
    pub fn get(&self, tier: &str) -> Option<NodeId> {
        self.claims
            .iter()
            .find(|(bp, _)| bp.name == tier)
            .map(|(_, id)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Breakpoint, NodeId)> {
        self.claims.iter().map(|(bp, id)| (bp, *id))
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Classify each selected node; the first node to claim a tier keeps it.
pub fn assign(
    scene: &Scene,
    selection: &[NodeId],
    table: &BreakpointTable,
) -> (Assignment, Vec<Notice>) {
    let mut claims: Vec<(Breakpoint, NodeId)> = Vec::new();
    let mut notices = Vec::new();

    for &node in selection {
        let Some(tier) = classify(scene, node, table) else {
            continue;
        };
        if claims.iter().any(|(bp, _)| bp.name == tier.name) {
            tracing::warn!(
                breakpoint = %tier.name,
                node = ?scene.key(node),
                "breakpoint already claimed; node rejected"
            );
            notices.push(Notice::BreakpointTaken {
                breakpoint: tier.name.clone(),
                min_width: tier.min_width,
            });
            continue;
        }
        claims.push((tier.clone(), node));
    }

    claims.sort_by_key(|(bp, _)| bp.min_width);
    (Assignment { claims }, notices)
}

#[derive(Clone, Debug, Default)]
pub struct RunOutput {
    pub css: String,
    /// Properties extracted from any assigned node, before allow-list filtering.
    pub available: Vec<StyleProperty>,
    /// Properties that appear in at least one tier's diff.
    pub used: Vec<StyleProperty>,
    pub assignment: Assignment,
    pub notices: Vec<Notice>,
    /// New allow-list when the run was made in [`AllowMode::Capture`] and found any tier.
    pub captured: Option<AllowList>,
}

/// classify -> extract -> filter -> diff -> render for one selection.
#[tracing::instrument(skip(scene, config, allow), fields(selected = selection.len()))]
pub fn run(
    scene: &Scene,
    selection: &[NodeId],
    config: &Config,
    allow: &AllowList,
    mode: AllowMode,
) -> RunOutput {
    if selection.is_empty() {
        return RunOutput::default();
    }

    let (assignment, notices) = assign(scene, selection, &config.breakpoints);
    let extract_opts = config.extract_opts();

    let mut available = BTreeSet::new();
    let mut tiers = Vec::with_capacity(assignment.len());
    for (bp, node) in assignment.iter() {
        let Some(n) = scene.get(node) else {
            continue;
        };
        let record = extract_styles(&n.props, &extract_opts);
        available.extend(record.properties());
        let record = match mode {
            AllowMode::Capture => record,
            AllowMode::Filter => allow.apply(record),
        };
        tiers.push((bp.clone(), record));
    }

    let captured = (mode == AllowMode::Capture && !assignment.is_empty())
        .then(|| AllowList::Only(available.clone()));

    let map = compute_diffs(tiers, config.removal);
    let css = render_css(&map, &config.breakpoints, &config.render_opts());
    tracing::debug!(tiers = map.tiers().len(), bytes = css.len(), "rendered css");

    RunOutput {
        css,
        available: available.into_iter().collect(),
        used: map.used_properties(),
        assignment,
        notices,
        captured,
    }
}
