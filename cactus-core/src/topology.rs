//! Triangle index generation for the cactus surface.
//!
//! The full index list is the cap fan followed by the lateral quad faces,
//! rebuilt wholesale whenever the ring count changes. Both builders are
//! pure functions of `(split_count, frame_count)`; the same input always
//! yields the same index sequence.

use log::error;

/// Triangles closing the top ring against the shared tip vertex.
///
/// Emits `split_count` triangles fanning over the buffer's highest indices,
/// wound so the closing face points outward. The winding is fixed for the
/// whole fan.
pub fn cap_triangles(split_count: usize, frame_count: usize) -> Vec<[u32; 3]> {
    let last = (split_count * frame_count) as u32;
    let split = split_count as u32;
    (0..split)
        .map(|i| {
            let x = i;
            let y = (i + 1) % split;
            let z = split;
            [last - x, last - y, last - z]
        })
        .collect()
}

/// Lateral faces between consecutive rings.
///
/// For every consecutive ring pair and every radial slot, emits the two
/// triangles of the connecting quad, wound consistently so normals face
/// outward. With fewer than two rings there is no lateral surface: the
/// condition is reported and an empty list is returned.
pub fn lateral_triangles(split_count: usize, frame_count: usize) -> Vec<[u32; 3]> {
    if frame_count <= 1 {
        error!("cannot build lateral faces with frame_count {frame_count} (need at least 2 rings)");
        return Vec::new();
    }
    let split = split_count as u32;
    let quads = split_count * (frame_count - 1);
    let mut result = Vec::with_capacity(quads * 2);
    for i in 0..quads as u32 {
        let x = i;
        let y = ((i + 1) % split) + ((i / split) * split);
        let z = y + split;
        let a = x + split;
        result.push([x, z, y]);
        result.push([x, a, z]);
    }
    result
}

/// Full index list: cap triangles first, then all lateral faces.
pub fn build(split_count: usize, frame_count: usize) -> Vec<[u32; 3]> {
    let mut triangles = cap_triangles(split_count, frame_count);
    triangles.extend(lateral_triangles(split_count, frame_count));
    triangles
}
