//! Simulation orchestration: owns the tree, the vertex buffer, and the
//! triangle index, and drives their shared lifecycle.

use crate::config::{Config, ConfigError};
use crate::growth;
use crate::topology;
use crate::tree::Tree;
use crate::types::NodeId;
use crate::vertex_buffer::VertexBuffer;
use glam::Vec3;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Drives the growth simulation.
///
/// The controller owns every shared resource: the segment tree, the vertex
/// buffer, and the triangle index. Hosts advance the simulation through
/// discrete, caller-driven ticks and read the resulting mesh back between
/// ticks through the read-only accessors; the buffer and index are never
/// handed out mutably.
///
/// Spawning is queue-driven: a growth tick first walks the whole tree, then
/// processes the terminal segments that crossed the spawn threshold. The
/// tree is never mutated while it is being walked. Each new generation
/// appends its buffer slice past the previous end, so existing segments'
/// offsets stay valid across reallocation, and the triangle index is rebuilt
/// from scratch on the same event.
#[derive(Debug)]
pub struct GrowthController {
    config: Config,
    rng: StdRng,
    tree: Tree,
    root: NodeId,
    vertices: VertexBuffer,
    triangles: Vec<[u32; 3]>,
}

impl GrowthController {
    /// Validates `config` and builds the starting state: a chain of
    /// `initial_frame_count` segments with sampled lengths and radii, a
    /// shaped ring per segment, and the initial triangle index.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut tree = Tree::new(config.split_count);
        let mut vertices = VertexBuffer::new(config.split_count, config.initial_frame_count);

        let length_max = config.length.sample(&mut rng);
        let radius = config.radius.sample(&mut rng);
        let root = tree.add_root(Vec3::Y, length_max, radius, config.initial_growth);
        vertices.shape_ring(0, radius);

        let mut parent = root;
        for _ in 1..config.initial_frame_count {
            let length_max = config.length.sample(&mut rng);
            let radius = config.radius.sample(&mut rng);
            parent = tree.add_child(parent, Vec3::Y, length_max, radius, config.initial_growth);
            vertices.shape_ring(tree.nodes[parent].vertices_start_index, radius);
        }

        let triangles = topology::build(config.split_count, config.initial_frame_count);
        growth::write_vertices(&mut tree, root, &mut vertices);

        Ok(Self {
            config,
            rng,
            tree,
            root,
            vertices,
            triangles,
        })
    }

    /// Advances the simulation by `dt` seconds: grows every segment by
    /// `growth_velocity * dt`, then spawns one child under each terminal
    /// segment that crossed the spawn threshold during the walk.
    pub fn tick(&mut self, dt: f32) {
        let delta = self.config.growth_velocity * dt;
        let spawns = growth::grow(
            &mut self.tree,
            self.root,
            delta,
            &mut self.vertices,
            self.config.spawn_threshold,
        );
        for id in spawns {
            // A candidate could have gained a child while the queue was
            // being processed; only still-terminal segments spawn.
            if self.tree.is_end(id) {
                self.new_generation(id);
            }
        }
    }

    /// Scrubs the whole tree to a single growth value. Never spawns.
    pub fn set_growth(&mut self, value: f32) {
        growth::scrub(&mut self.tree, self.root, value, &mut self.vertices);
    }

    /// Spawns a new generation under every currently terminal segment,
    /// regardless of growth level.
    pub fn force_grow_terminal_nodes(&mut self) {
        for id in self.tree.ends(self.root) {
            self.new_generation(id);
        }
    }

    /// Number of rings currently allocated.
    pub fn frame_count(&self) -> usize {
        self.vertices.frame_count()
    }

    /// Current mesh vertices, read-only between ticks.
    pub fn vertices(&self) -> &[Vec3] {
        self.vertices.as_slice()
    }

    /// Current triangle index, read-only between ticks.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Textual dump of the whole tree.
    pub fn describe_tree(&self) -> String {
        self.tree.describe(self.root)
    }

    /// Extends the buffer by one ring, attaches a fresh segment under
    /// `parent`, and rebuilds the triangle index.
    ///
    /// The new slice is appended past the previous end, so every existing
    /// segment's start offset stays valid.
    fn new_generation(&mut self, parent: NodeId) {
        let length_max = self.config.length.sample(&mut self.rng);
        let radius = self.config.radius.sample(&mut self.rng);

        self.vertices.append_ring();
        let child = self
            .tree
            .add_child(parent, Vec3::Y, length_max, radius, 0.0);
        self.vertices
            .shape_ring(self.tree.nodes[child].vertices_start_index, radius);
        self.triangles = topology::build(self.config.split_count, self.frame_count());
        growth::write_vertices(&mut self.tree, self.root, &mut self.vertices);

        debug!(
            "spawned generation {} under {} (frames now {})",
            self.tree.nodes[child].generation,
            parent,
            self.frame_count()
        );
    }
}
