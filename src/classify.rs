use crate::{
    breakpoints::{Breakpoint, BreakpointTable},
    scene::{
        graph::{NodeId, Scene},
        model::NodeKind,
    },
};

/// Outermost frame above `node` that sits strictly inside the page/section boundary.
///
/// The walk stops at the first page or section parent (or the root). Every frame met on the way
/// replaces the previous candidate, so nested frames resolve to the outer one.
pub fn find_ancestor_frame(scene: &Scene, node: NodeId) -> Option<NodeId> {
    let mut last_frame = None;
    for ancestor in scene.ancestors(node) {
        let kind = scene.get(ancestor)?.kind;
        if kind.is_boundary() {
            break;
        }
        if kind == NodeKind::Frame {
            last_frame = Some(ancestor);
        }
    }
    last_frame
}

/// Breakpoint tier a node belongs to, judged by its ancestor frame's width.
///
/// Returns `None` when the node has no ancestor frame, the frame has no width, or the frame is
/// narrower than the base tier.
pub fn classify<'t>(
    scene: &Scene,
    node: NodeId,
    table: &'t BreakpointTable,
) -> Option<&'t Breakpoint> {
    let Some(frame) = find_ancestor_frame(scene, node) else {
        tracing::debug!(node = ?scene.key(node), "no ancestor frame; node excluded");
        return None;
    };
    let width = scene.get(frame)?.props.width?;
    let tier = table.tier_for_width(width);
    if tier.is_none() {
        tracing::debug!(
            node = ?scene.key(node),
            frame_width = width,
            "ancestor frame narrower than base tier; node excluded"
        );
    }
    tier
}
