//! Mesh presentation: projects the simulation's vertex/triangle data onto
//! the screen and recomputes face normals for flat shading.
//!
//! The core exposes its mesh read-only between ticks; this module is the
//! consuming collaborator. Normals are recomputed from scratch on every
//! frame, so they are always in sync with the latest tick or topology
//! rebuild.

use glam::Vec3;

/// Turntable camera: yaw around the growth axis, pitch toward the viewer,
/// orthographic projection with zoom and screen-space pan.
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub pan: egui::Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.4,
            zoom: 120.0,
            pan: egui::vec2(0.0, 120.0),
        }
    }
}

impl Camera {
    /// Rotates a world-space point into view space. `z` points away from
    /// the viewer and is used for depth sorting.
    pub fn view(&self, p: Vec3) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let x = p.x * cy + p.z * sy;
        let z = -p.x * sy + p.z * cy;
        let (sp, cp) = self.pitch.sin_cos();
        let y = p.y * cp - z * sp;
        let depth = p.y * sp + z * cp;
        Vec3::new(x, y, depth)
    }

    /// Maps a view-space point to egui screen coordinates inside `rect`.
    /// The y-axis is flipped so world up is screen up.
    pub fn to_screen(&self, v: Vec3, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + v.x * self.zoom + self.pan.x,
            center.y - v.y * self.zoom + self.pan.y,
        )
    }
}

/// One triangle ready for drawing: view-space corners and the face normal
/// in view space.
pub struct Face {
    pub corners: [Vec3; 3],
    pub normal: Vec3,
}

impl Face {
    /// Mean view-space depth, for painter's-algorithm sorting.
    pub fn depth(&self) -> f32 {
        (self.corners[0].z + self.corners[1].z + self.corners[2].z) / 3.0
    }
}

/// Normal of the triangle `(a, b, c)` with counter-clockwise winding.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Transforms the mesh into view space, recomputes every face normal, and
/// returns the faces sorted back-to-front so they can be painted in order.
pub fn sorted_faces(vertices: &[Vec3], triangles: &[[u32; 3]], camera: &Camera) -> Vec<Face> {
    let mut faces: Vec<Face> = triangles
        .iter()
        .map(|tri| {
            let corners = [
                camera.view(vertices[tri[0] as usize]),
                camera.view(vertices[tri[1] as usize]),
                camera.view(vertices[tri[2] as usize]),
            ];
            Face {
                normal: face_normal(corners[0], corners[1], corners[2]),
                corners,
            }
        })
        .collect();
    faces.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
    faces
}
