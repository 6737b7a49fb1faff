//! Growth traversals over the segment tree.
//!
//! One simulation tick is one depth-first walk from the root, strictly
//! parent-before-children: each segment updates its growth, recomputes its
//! world position from the parent's freshly updated state, and rewrites its
//! own slice of the vertex buffer. Nothing is cached across ticks; a
//! segment's world position is always derived from the parent's latest
//! state, so a mid-run spawn can never leave a stale base behind.
//!
//! [`grow`] also collects spawn candidates: terminal segments whose growth
//! is at or above the spawn threshold. The tree is never mutated during the
//! walk — the caller processes the returned candidates afterwards.

use crate::tree::Tree;
use crate::types::NodeId;
use crate::vertex_buffer::VertexBuffer;
use glam::Vec3;

enum Op {
    Add(f32),
    Set(f32),
    Sync,
}

impl Op {
    fn apply(&self, growth: f32) -> f32 {
        match *self {
            Op::Add(delta) => (growth + delta).clamp(0.0, 1.0),
            Op::Set(value) => value.clamp(0.0, 1.0),
            Op::Sync => growth,
        }
    }
}

/// Adds `delta` to every segment's growth (clamped to [0, 1]), updates world
/// positions and vertex heights, and returns the terminal segments whose
/// growth ended at or above `spawn_threshold`, in visit order.
///
/// ### Panics
/// Panics if `root` is not the tree's root (root-only entry point).
pub fn grow(
    tree: &mut Tree,
    root: NodeId,
    delta: f32,
    vertices: &mut VertexBuffer,
    spawn_threshold: f32,
) -> Vec<NodeId> {
    assert!(tree.is_root(root), "grow must be entered at the root");
    let mut spawns = Vec::with_capacity(4);
    walk(
        tree,
        vertices,
        root,
        None,
        &Op::Add(delta),
        Some((spawn_threshold, &mut spawns)),
    );
    spawns
}

/// Assigns `value` as every segment's growth (clamped to [0, 1]) and resyncs
/// positions and vertices. Direct scrubbing control; never spawns.
///
/// ### Panics
/// Panics if `root` is not the tree's root.
pub fn scrub(tree: &mut Tree, root: NodeId, value: f32, vertices: &mut VertexBuffer) {
    assert!(tree.is_root(root), "scrub must be entered at the root");
    walk(tree, vertices, root, None, &Op::Set(value), None);
}

/// Rewrites every segment's vertex heights from its current state without
/// changing any growth value. Used after the buffer gains a ring.
///
/// ### Panics
/// Panics if `root` is not the tree's root.
pub fn write_vertices(tree: &mut Tree, root: NodeId, vertices: &mut VertexBuffer) {
    assert!(
        tree.is_root(root),
        "write_vertices must be entered at the root"
    );
    walk(tree, vertices, root, None, &Op::Sync, None);
}

fn walk(
    tree: &mut Tree,
    vertices: &mut VertexBuffer,
    id: NodeId,
    parent_world: Option<Vec3>,
    op: &Op,
    mut spawns: Option<(f32, &mut Vec<NodeId>)>,
) {
    let is_end = tree.is_end(id);
    let node = &mut tree.nodes[id];
    node.growth = op.apply(node.growth);
    if let Some(parent_world) = parent_world {
        node.world_position = parent_world + node.to_position();
    }

    let world = node.world_position;
    let start = node.vertices_start_index;
    let growth = node.growth;
    vertices.write_ring_height(start, world.y);
    if is_end {
        // The terminal segment owns the shared tip slot.
        vertices.write_tip_height(start, world.y);
        if let Some((threshold, spawns)) = spawns.as_mut()
            && growth >= *threshold
        {
            spawns.push(id);
        }
    }

    for i in 0..tree.nodes[id].children.len() {
        let child = tree.nodes[id].children[i];
        walk(
            tree,
            vertices,
            child,
            Some(world),
            op,
            spawns.as_mut().map(|(t, s)| (*t, &mut **s)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A chain of `len` segments with unit length and radius, plus a
    /// matching buffer.
    fn chain(len: usize) -> (Tree, NodeId, VertexBuffer) {
        let mut tree = Tree::new(4);
        let root = tree.add_root(Vec3::Y, 1.0, 1.0, 0.0);
        let mut parent = root;
        for _ in 1..len {
            parent = tree.add_child(parent, Vec3::Y, 1.0, 1.0, 0.0);
        }
        let buf = VertexBuffer::new(4, len);
        (tree, root, buf)
    }

    #[test]
    fn growth_is_clamped_to_one_under_repeated_addition() {
        let (mut tree, root, mut buf) = chain(1);
        for _ in 0..3 {
            grow(&mut tree, root, 0.6, &mut buf, 2.0);
        }
        assert_eq!(tree.nodes[root].growth, 1.0);
    }

    #[test]
    fn negative_delta_cannot_push_growth_below_zero() {
        let (mut tree, root, mut buf) = chain(1);
        grow(&mut tree, root, -0.5, &mut buf, 2.0);
        assert_eq!(tree.nodes[root].growth, 0.0);
    }

    #[test]
    fn world_positions_stack_along_the_chain() {
        let (mut tree, root, mut buf) = chain(3);
        scrub(&mut tree, root, 0.5, &mut buf);

        // Each unit-length segment extrudes 0.5 along +Y.
        assert_eq!(tree.nodes[0].world_position.y, 0.0);
        assert_eq!(tree.nodes[1].world_position.y, 0.5);
        assert_eq!(tree.nodes[2].world_position.y, 1.0);
    }

    #[test]
    fn ring_heights_follow_world_positions() {
        let (mut tree, root, mut buf) = chain(2);
        scrub(&mut tree, root, 1.0, &mut buf);

        let points = buf.as_slice();
        assert!(points[0..4].iter().all(|v| v.y == 0.0));
        assert!(points[4..8].iter().all(|v| v.y == 1.0));
        // The terminal segment also wrote the tip.
        assert_eq!(points[8].y, 1.0);
    }

    #[test]
    fn only_the_terminal_segment_at_threshold_is_a_spawn_candidate() {
        let (mut tree, root, mut buf) = chain(2);
        let spawns = grow(&mut tree, root, 0.5, &mut buf, 0.5);
        // Both segments reached 0.5, but only the end is eligible.
        assert_eq!(spawns, vec![1]);
    }

    #[test]
    fn a_segment_that_gained_a_child_is_never_reported_again() {
        let (mut tree, root, mut buf) = chain(2);
        let spawns = grow(&mut tree, root, 0.6, &mut buf, 0.5);
        assert_eq!(spawns, vec![1]);

        let child = tree.add_child(1, Vec3::Y, 1.0, 1.0, 0.0);
        let mut buf = VertexBuffer::new(4, 3);
        let spawns = grow(&mut tree, root, 0.1, &mut buf, 0.5);
        assert!(!spawns.contains(&1));
        assert!(!spawns.contains(&child), "fresh child is far below threshold");
    }

    #[test]
    fn scrub_never_reports_spawn_candidates_but_moves_vertices() {
        let (mut tree, root, mut buf) = chain(2);
        scrub(&mut tree, root, 0.9, &mut buf);
        assert_eq!(tree.nodes[1].growth, 0.9);
        // Root's base stays at the origin; the chain's tip is the second
        // segment's world height.
        assert_eq!(buf.as_slice()[8].y, 0.9);

        // Scrubbing back down moves everything back too.
        scrub(&mut tree, root, 0.0, &mut buf);
        assert_eq!(buf.as_slice()[8].y, 0.0);
    }

    #[test]
    fn write_vertices_resyncs_without_changing_growth() {
        let (mut tree, root, mut buf) = chain(2);
        scrub(&mut tree, root, 0.5, &mut buf);

        let mut fresh = VertexBuffer::new(4, 2);
        write_vertices(&mut tree, root, &mut fresh);
        assert_eq!(tree.nodes[1].growth, 0.5);
        assert_eq!(fresh.as_slice(), buf.as_slice());
    }

    #[test]
    #[should_panic(expected = "entered at the root")]
    fn grow_rejects_non_root_entry() {
        let (mut tree, _root, mut buf) = chain(2);
        grow(&mut tree, 1, 0.1, &mut buf, 0.5);
    }
}
