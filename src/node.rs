//! Search-tree nodes held in an index arena.
//!
//! Nodes refer to their parent by index instead of by pointer. The search is
//! depth-first, so the arena only ever holds the live path from the root to
//! the current node: abandoning a node pops it off the end and backtracking is
//! just moving to the parent index.

use crate::state::GridState;
use crate::transition::Move;

/// Index of a node in its [`SearchTree`].
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub state: GridState,
    pub parent: Option<NodeId>,
    /// Number of moves from the root; the root sits at depth 0.
    pub depth: usize,
    /// Index into [`Move::ALL`] of the next move to try.
    cursor: usize,
}

impl Node {
    pub fn is_target(&self) -> bool {
        self.state.is_target()
    }
}

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub const ROOT: NodeId = 0;

    pub fn new(root: GridState) -> Self {
        Self {
            nodes: vec![Node {
                state: root,
                parent: None,
                depth: 0,
                cursor: 0,
            }],
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// The most recently added live node, or `None` once the root is discarded.
    pub fn current(&self) -> Option<NodeId> {
        self.nodes.len().checked_sub(1)
    }

    /// Number of nodes on the live path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attaches `state` below `parent`, which must be the current node.
    pub fn push_child(&mut self, parent: NodeId, state: GridState) -> NodeId {
        debug_assert_eq!(self.current(), Some(parent), "children extend the live path");
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            depth,
            cursor: 0,
        });
        self.nodes.len() - 1
    }

    /// Drops the current node and returns its parent.
    pub fn discard(&mut self, id: NodeId) -> Option<NodeId> {
        debug_assert_eq!(self.current(), Some(id), "only the current node can be discarded");
        self.nodes.pop().and_then(|node| node.parent)
    }

    /// Advances the node's cursor to the next applicable move.
    ///
    /// The cursor is kept, so returning to this node later resumes enumeration
    /// where it left off.
    pub fn next_move(&mut self, id: NodeId) -> Option<Move> {
        let node = &mut self.nodes[id];
        while node.cursor < Move::ALL.len() {
            let candidate = Move::ALL[node.cursor];
            node.cursor += 1;
            if candidate.is_applicable(&node.state) {
                return Some(candidate);
            }
        }
        None
    }

    /// Whether any ancestor of `id` holds a state equal to its own.
    pub fn has_loop(&self, id: NodeId) -> bool {
        let state = &self.nodes[id].state;
        let mut ancestor = self.nodes[id].parent;
        while let Some(a) = ancestor {
            if self.nodes[a].state == *state {
                return true;
            }
            ancestor = self.nodes[a].parent;
        }
        false
    }

    /// Clones the states from the root down to `id`.
    pub fn path_to(&self, id: NodeId) -> Vec<GridState> {
        let mut path = Vec::with_capacity(self.nodes[id].depth + 1);
        let mut cursor = Some(id);
        while let Some(n) = cursor {
            path.push(self.nodes[n].state.clone());
            cursor = self.nodes[n].parent;
        }
        path.reverse();
        path
    }
}
