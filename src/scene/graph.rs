use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{RespondiffError, RespondiffResult};
use crate::scene::model::{NodeDef, NodeKind, NodeProps, SceneDef};

/// Index of a node inside the [`Scene`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub key: String,
    pub name: Option<String>,
    pub kind: NodeKind,
    pub props: NodeProps,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Read-only scene graph.
///
/// Nodes live in a flat arena. The parent link is a plain index used for upward lookups only;
/// ownership flows strictly downward through each node's ordered child list.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    by_key: HashMap<String, NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_def(def: &SceneDef) -> RespondiffResult<Self> {
        let mut scene = Self::new();
        for root in &def.roots {
            scene.insert(None, root)?;
        }
        Ok(scene)
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> RespondiffResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| RespondiffError::serde(format!("parse scene JSON: {e}")))?;
        Self::from_def(&def)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RespondiffResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RespondiffError::io(format!("open scene JSON '{}'", path.display()), e)
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Insert `def` (and its subtree) as the last child of `parent`, or as a new root.
    pub fn insert(&mut self, parent: Option<NodeId>, def: &NodeDef) -> RespondiffResult<NodeId> {
        if def.id.trim().is_empty() {
            return Err(RespondiffError::scene("node id must be non-empty"));
        }
        if self.by_key.contains_key(&def.id) {
            return Err(RespondiffError::scene(format!(
                "duplicate node id '{}'",
                def.id
            )));
        }
        if let Some(p) = parent
            && p.0 >= self.nodes.len()
        {
            return Err(RespondiffError::scene(format!(
                "parent index {} is not part of this scene",
                p.0
            )));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            key: def.id.clone(),
            name: def.name.clone(),
            kind: def.kind,
            props: def.props.clone(),
            parent,
            children: Vec::new(),
        });
        self.by_key.insert(def.id.clone(), id);
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }

        for child in &def.children {
            self.insert(Some(id), child)?;
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.key.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(SceneNode::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(SceneNode::children).unwrap_or(&[])
    }

    /// Parent's child list and the position of `id` inside it.
    pub fn siblings(&self, id: NodeId) -> Option<(&[NodeId], usize)> {
        let siblings: &[NodeId] = match self.parent(id) {
            Some(p) => self.children(p),
            None => &self.roots,
        };
        let pos = siblings.iter().position(|&s| s == id)?;
        Some((siblings, pos))
    }

    /// Iterate ancestors from the direct parent upward.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self.parent(id),
        }
    }

    /// Depth-first, pre-order walk of the subtree rooted at `id` (inclusive).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }
}

pub struct Ancestors<'a> {
    scene: &'a Scene,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = self.scene.parent(cur);
        Some(cur)
    }
}
