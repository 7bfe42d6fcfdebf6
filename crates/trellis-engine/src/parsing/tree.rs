use std::fmt;

use serde::Serialize;

use super::matcher::NodeKind;

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeId(usize);

/// One element of the parsed outline.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Nesting-precedence key, fixed at creation.
    pub weight: u32,
    /// Back-reference for upward walks; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Insertion-ordered children.
    pub children: Vec<NodeId>,
}

/// The parse result: an arena of nodes with a single root at index 0.
///
/// Append-only while being built; nodes are never removed or reparented.
#[derive(Debug, Clone, Serialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = NodeId(0);

    fn new() -> Self {
        Tree {
            nodes: vec![Node {
                kind: NodeKind::Root,
                weight: 0,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id).children.iter().map(|&c| self.node(c))
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root is always present.
        self.nodes.len() == 1
    }

    fn append(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        let weight = kind.weight();
        self.nodes.push(Node {
            kind,
            weight,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let node = self.node(id);
        for _ in 0..depth {
            f.write_str(".")?;
        }
        if depth > 0 {
            f.write_str(" ")?;
        }
        writeln!(f, "<{} weight={}>", node.kind, node.weight)?;
        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

/// Diagnostic rendering: kind, weight, and captures per node, one line each,
/// dot-indented by depth.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, Tree::ROOT, 0)
    }
}

/// Builds a [`Tree`] one classified line at a time.
///
/// Keeps a single cursor at the most recently inserted node. Each new node is
/// placed by comparing weights while walking the cursor's ancestor chain:
/// heavier nodes nest under the cursor, equal weights become siblings, and
/// lighter nodes climb until they find an anchor they can attach to.
pub struct TreeBuilder {
    tree: Tree,
    cursor: NodeId,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder {
            tree: Tree::new(),
            cursor: Tree::ROOT,
        }
    }

    pub fn push(&mut self, kind: NodeKind) {
        let weight = kind.weight();
        let mut at = self.cursor;
        while weight < self.tree.node(at).weight {
            // Every node heavier than the root has a parent, and the root's
            // weight of 0 is below any produced weight, so this walk stops.
            at = self.tree.node(at).parent.unwrap_or(Tree::ROOT);
        }
        let parent = if weight > self.tree.node(at).weight {
            at
        } else {
            self.tree.node(at).parent.unwrap_or(Tree::ROOT)
        };
        self.cursor = self.tree.append(kind, parent);
    }

    pub fn finish(self) -> Tree {
        self.tree
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
