use crate::types::NodeId;
use glam::Vec3;
use std::fmt::Write;

/// One segment of the cactus: a ring of vertices extruded along `up`.
#[derive(Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Unit growth axis in world space.
    pub up: Vec3,
    /// Position in the segment's own frame, copied from the parent at creation.
    pub local_position: Vec3,
    /// Base position in world space, recomputed every traversal.
    pub world_position: Vec3,
    /// First index of this segment's ring in the shared vertex buffer.
    /// Assigned at construction, never reassigned.
    pub vertices_start_index: usize,
    /// Depth label; root is 0.
    pub generation: u32,
    /// Sampled maximum extrusion length, fixed at construction.
    pub length_max: f32,
    /// Sampled ring radius, fixed at construction.
    pub radius: f32,
    /// Fraction of `length_max` currently realized, clamped to [0, 1].
    pub growth: f32,
}

impl Node {
    /// Current tip of this segment in its local frame:
    /// `local_position + up * (length_max * growth)`.
    pub fn to_position(&self) -> Vec3 {
        self.local_position + self.up * (self.length_max * self.growth)
    }
}

/// Append-only arena of segments.
///
/// Nodes are addressed by [`NodeId`] handles; each node keeps its parent's
/// handle and an ordered list of child handles, so there are no ownership
/// cycles and parent lookup is O(1). Nodes are never removed or reparented
/// during a simulation run.
#[derive(Debug)]
pub struct Tree {
    pub nodes: Vec<Node>,
    split_count: usize,
}

impl Tree {
    /// Creates an empty tree whose segments each own `split_count` buffer
    /// slots.
    pub fn new(split_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(8),
            split_count,
        }
    }

    pub fn split_count(&self) -> usize {
        self.split_count
    }

    /// Adds the root segment at the origin.
    ///
    /// ### Panics
    /// Panics if the tree already has a root.
    pub fn add_root(
        &mut self,
        up: Vec3,
        length_max: f32,
        radius: f32,
        initial_growth: f32,
    ) -> NodeId {
        assert!(self.nodes.is_empty(), "tree already has a root");
        self.nodes.push(Node {
            parent: None,
            children: Vec::with_capacity(1),
            up,
            local_position: Vec3::ZERO,
            world_position: Vec3::ZERO,
            vertices_start_index: 0,
            generation: 0,
            length_max,
            radius,
            growth: initial_growth.clamp(0.0, 1.0),
        });
        0
    }

    /// Adds a child segment under `parent`.
    ///
    /// The child copies the parent's `local_position`, starts its world
    /// position at the parent's current tip, and is handed the next free
    /// buffer slice (`nodes.len() * split_count`), keeping all slices
    /// disjoint and contiguous in creation order.
    ///
    /// ### Panics
    /// Panics if `parent` is out of bounds or if the computed slice would
    /// collide with an existing one (contract violation, not a runtime error).
    pub fn add_child(
        &mut self,
        parent: NodeId,
        up: Vec3,
        length_max: f32,
        radius: f32,
        initial_growth: f32,
    ) -> NodeId {
        let id = self.nodes.len();
        let start = id * self.split_count;
        let p = &self.nodes[parent];
        debug_assert!(
            self.nodes.iter().all(|n| n.vertices_start_index != start),
            "vertex slice at {start} already owned"
        );
        let node = Node {
            parent: Some(parent),
            children: Vec::with_capacity(1),
            up,
            local_position: p.local_position,
            world_position: p.local_position + p.to_position(),
            vertices_start_index: start,
            generation: p.generation + 1,
            length_max,
            radius,
            growth: initial_growth.clamp(0.0, 1.0),
        };
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes[id].parent.is_none()
    }

    /// A terminal segment has no children and is the only kind eligible to
    /// spawn a new generation.
    pub fn is_end(&self, id: NodeId) -> bool {
        self.nodes[id].children.is_empty()
    }

    /// All currently terminal segments reachable from `from`, depth-first.
    pub fn ends(&self, from: NodeId) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(4);
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.children.is_empty() {
                result.push(id);
            } else {
                // Reverse so children are visited in creation order.
                stack.extend(node.children.iter().rev());
            }
        }
        result
    }

    /// Textual dump of the subtree under `from`: generation, child count,
    /// world position, and growth per segment, indented by depth.
    pub fn describe(&self, from: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![(from, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            let _ = writeln!(
                out,
                "{:indent$}[{}] children={} world=({:.3}, {:.3}, {:.3}) growth={:.3}",
                "",
                node.generation,
                node.children.len(),
                node.world_position.x,
                node.world_position.y,
                node.world_position.z,
                node.growth,
                indent = depth * 2,
            );
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(len: usize) -> (Tree, NodeId) {
        let mut tree = Tree::new(4);
        let root = tree.add_root(Vec3::Y, 1.0, 1.0, 0.0);
        let mut parent = root;
        for _ in 1..len {
            parent = tree.add_child(parent, Vec3::Y, 1.0, 1.0, 0.0);
        }
        (tree, root)
    }

    #[test]
    fn root_sits_at_the_origin() {
        let (tree, root) = chain_of(1);
        assert!(tree.is_root(root));
        assert_eq!(tree.nodes[root].local_position, Vec3::ZERO);
        assert_eq!(tree.nodes[root].world_position, Vec3::ZERO);
        assert_eq!(tree.nodes[root].vertices_start_index, 0);
        assert_eq!(tree.nodes[root].generation, 0);
    }

    #[test]
    fn child_starts_at_parent_tip_and_owns_next_slice() {
        let mut tree = Tree::new(4);
        let root = tree.add_root(Vec3::Y, 2.0, 1.0, 0.5);
        let child = tree.add_child(root, Vec3::Y, 1.0, 1.0, 0.0);

        // Parent tip = local + up * (length_max * growth) = (0, 1, 0).
        assert_eq!(tree.nodes[child].world_position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tree.nodes[child].vertices_start_index, 4);
        assert_eq!(tree.nodes[child].generation, 1);
        assert_eq!(tree.nodes[child].parent, Some(root));
        assert_eq!(tree.nodes[root].children, vec![child]);
    }

    #[test]
    fn to_position_scales_with_growth() {
        let mut tree = Tree::new(4);
        let root = tree.add_root(Vec3::Y, 4.0, 1.0, 0.25);
        assert_eq!(tree.nodes[root].to_position(), Vec3::new(0.0, 1.0, 0.0));
        tree.nodes[root].growth = 1.0;
        assert_eq!(tree.nodes[root].to_position(), Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn initial_growth_is_clamped() {
        let mut tree = Tree::new(4);
        let root = tree.add_root(Vec3::Y, 1.0, 1.0, 3.0);
        assert_eq!(tree.nodes[root].growth, 1.0);
    }

    #[test]
    fn ends_returns_exactly_the_childless_nodes() {
        let (mut tree, root) = chain_of(3);
        assert_eq!(tree.ends(root), vec![2]);
        assert!(tree.is_end(2));
        assert!(!tree.is_end(root));

        // Spawning from the tip replaces it as the end; the count is
        // unchanged.
        let new_tip = tree.add_child(2, Vec3::Y, 1.0, 1.0, 0.0);
        assert_eq!(tree.ends(root), vec![new_tip]);
    }

    #[test]
    fn describe_lists_every_node_once() {
        let (tree, root) = chain_of(3);
        let dump = tree.describe(root);
        assert_eq!(dump.lines().count(), 3);
        assert!(dump.lines().next().unwrap().contains("[0]"));
        assert!(dump.contains("[2]"));
    }
}
