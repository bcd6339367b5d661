use crate::{
    breakpoints::BreakpointTable,
    classify::find_ancestor_frame,
    scene::{
        graph::{NodeId, Scene},
        model::NodeKind,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Parent, unless it is a page.
    Up,
    /// First child.
    Down,
    PrevSibling,
    NextSibling,
}

impl Direction {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::PrevSibling => "to the previous sibling",
            Self::NextSibling => "to the next sibling",
        }
    }
}

/// Move every selected node one step in `dir`.
///
/// Nodes without a target in that direction drop out; duplicate targets collapse. Returns `None`
/// when no selected node can move.
pub fn navigate(scene: &Scene, selection: &[NodeId], dir: Direction) -> Option<Vec<NodeId>> {
    let mut next: Vec<NodeId> = Vec::new();
    for &node in selection {
        let Some(target) = step(scene, node, dir) else {
            continue;
        };
        if !next.contains(&target) {
            next.push(target);
        }
    }
    (!next.is_empty()).then_some(next)
}

fn step(scene: &Scene, node: NodeId, dir: Direction) -> Option<NodeId> {
    match dir {
        Direction::Up => {
            let parent = scene.parent(node)?;
            (scene.get(parent)?.kind != NodeKind::Page).then_some(parent)
        }
        Direction::Down => scene.children(node).first().copied(),
        Direction::PrevSibling => {
            let (siblings, pos) = scene.siblings(node)?;
            pos.checked_sub(1).map(|i| siblings[i])
        }
        Direction::NextSibling => {
            let (siblings, pos) = scene.siblings(node)?;
            siblings.get(pos + 1).copied()
        }
    }
}

/// Same element laid out for another breakpoint.
///
/// Starting from `node`'s outermost frame, looks for a sibling outermost frame (same page or
/// section) whose width classifies as `tier`, then follows `node`'s path below its own frame.
/// Each path step matches a child by name, falling back to the child's position for unnamed
/// nodes.
pub fn counterpart(
    scene: &Scene,
    table: &BreakpointTable,
    node: NodeId,
    tier: &str,
) -> Option<NodeId> {
    let frame = find_ancestor_frame(scene, node)?;
    let path = path_below(scene, frame, node)?;
    let boundary = boundary_of(scene, frame);

    let scope: Vec<NodeId> = match boundary {
        Some(b) => scene.descendants(b),
        None => scene
            .roots()
            .iter()
            .flat_map(|&r| scene.descendants(r))
            .collect(),
    };

    scope
        .into_iter()
        .filter(|&candidate| is_outermost_frame(scene, candidate))
        .filter(|&candidate| boundary_of(scene, candidate) == boundary)
        .filter(|&candidate| {
            scene
                .get(candidate)
                .and_then(|n| n.props.width)
                .and_then(|w| table.tier_for_width(w))
                .is_some_and(|bp| bp.name == tier)
        })
        .find_map(|candidate| follow_path(scene, candidate, &path))
}

enum PathStep {
    Named(String),
    Index(usize),
}

fn path_below(scene: &Scene, frame: NodeId, node: NodeId) -> Option<Vec<PathStep>> {
    let mut steps = Vec::new();
    let mut cur = node;
    while cur != frame {
        let n = scene.get(cur)?;
        let step = match &n.name {
            Some(name) => PathStep::Named(name.clone()),
            None => PathStep::Index(scene.siblings(cur)?.1),
        };
        steps.push(step);
        cur = n.parent()?;
    }
    steps.reverse();
    Some(steps)
}

fn follow_path(scene: &Scene, from: NodeId, path: &[PathStep]) -> Option<NodeId> {
    let mut cur = from;
    for step in path {
        let children = scene.children(cur);
        cur = match step {
            PathStep::Named(name) => children
                .iter()
                .copied()
                .find(|&c| scene.get(c).and_then(|n| n.name.as_deref()) == Some(name.as_str()))?,
            PathStep::Index(i) => children.get(*i).copied()?,
        };
    }
    Some(cur)
}

fn boundary_of(scene: &Scene, node: NodeId) -> Option<NodeId> {
    scene
        .ancestors(node)
        .find(|&a| scene.get(a).is_some_and(|n| n.kind.is_boundary()))
}

fn is_outermost_frame(scene: &Scene, node: NodeId) -> bool {
    scene.get(node).is_some_and(|n| n.kind == NodeKind::Frame)
        && scene
            .ancestors(node)
            .take_while(|&a| scene.get(a).is_some_and(|n| !n.kind.is_boundary()))
            .all(|a| scene.get(a).is_some_and(|n| n.kind != NodeKind::Frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::model::{NodeDef, SceneDef};

    fn card(frame_id: &str, width: f64, prefix: &str) -> NodeDef {
        NodeDef::frame(frame_id, width).named("Screen").child(
            NodeDef::new(format!("{prefix}-card"), NodeKind::Frame)
                .named("Card")
                .child(NodeDef::new(format!("{prefix}-title"), NodeKind::Text).named("Title"))
                .child(NodeDef::new(format!("{prefix}-body"), NodeKind::Text).named("Body")),
        )
    }

    fn scene() -> Scene {
        let def = SceneDef {
            roots: vec![
                NodeDef::page("page")
                    .child(card("f-base", 1280.0, "b"))
                    .child(card("f-md", 1440.0, "m")),
            ],
        };
        Scene::from_def(&def).unwrap()
    }

    fn id(s: &Scene, key: &str) -> NodeId {
        s.find(key).unwrap()
    }

    #[test]
    fn up_stops_below_page() {
        let s = scene();
        let got = navigate(&s, &[id(&s, "b-title")], Direction::Up).unwrap();
        assert_eq!(got, vec![id(&s, "b-card")]);
        assert!(navigate(&s, &[id(&s, "f-base")], Direction::Up).is_none());
    }

    #[test]
    fn up_collapses_shared_parent() {
        let s = scene();
        let got = navigate(&s, &[id(&s, "b-title"), id(&s, "b-body")], Direction::Up).unwrap();
        assert_eq!(got, vec![id(&s, "b-card")]);
    }

    #[test]
    fn down_picks_first_child() {
        let s = scene();
        let got = navigate(&s, &[id(&s, "b-card")], Direction::Down).unwrap();
        assert_eq!(got, vec![id(&s, "b-title")]);
        assert!(navigate(&s, &[id(&s, "b-title")], Direction::Down).is_none());
    }

    #[test]
    fn siblings_do_not_wrap() {
        let s = scene();
        assert_eq!(
            navigate(&s, &[id(&s, "b-title")], Direction::NextSibling).unwrap(),
            vec![id(&s, "b-body")]
        );
        assert!(navigate(&s, &[id(&s, "b-title")], Direction::PrevSibling).is_none());
        assert!(navigate(&s, &[id(&s, "b-body")], Direction::NextSibling).is_none());
    }

    #[test]
    fn partial_moves_keep_movable_nodes() {
        let s = scene();
        let got = navigate(&s, &[id(&s, "b-title"), id(&s, "b-body")], Direction::NextSibling)
            .unwrap();
        assert_eq!(got, vec![id(&s, "b-body")]);
    }

    #[test]
    fn counterpart_follows_named_path() {
        let s = scene();
        let t = BreakpointTable::new([
            crate::breakpoints::Breakpoint::new("base", 1024),
            crate::breakpoints::Breakpoint::new("md", 1440),
        ])
        .unwrap();
        assert_eq!(
            counterpart(&s, &t, id(&s, "b-body"), "md"),
            Some(id(&s, "m-body"))
        );
        assert_eq!(
            counterpart(&s, &t, id(&s, "m-title"), "base"),
            Some(id(&s, "b-title"))
        );
        assert_eq!(counterpart(&s, &t, id(&s, "b-body"), "xl"), None);
        assert_eq!(counterpart(&s, &t, id(&s, "f-base"), "md"), None);
    }
}
