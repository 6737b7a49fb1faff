//! Core growth simulation for a procedurally grown cactus mesh.
//!
//! Main components:
//! - [`tree`] — segment tree: nodes, positions, structural queries.
//! - [`growth`] — growth/scrub traversals writing into the vertex buffer.
//! - [`vertex_buffer`] — the shared ring/tip vertex array.
//! - [`topology`] — triangle index generation (cap + lateral faces).
//! - [`controller`] — simulation orchestration and buffer/topology lifecycle.
//! - [`config`] — configuration, sampled ranges, validation.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod controller;
pub mod growth;
pub mod topology;
pub mod tree;
pub mod types;
pub mod vertex_buffer;
