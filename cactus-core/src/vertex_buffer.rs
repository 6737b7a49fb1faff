use glam::Vec3;

/// The shared, growable vertex array backing the whole cactus mesh.
///
/// Layout is `[ring 0][ring 1] … [ring frame_count-1][tip]`: one ring of
/// `split_count` points per segment, in creation order, followed by one
/// trailing tip slot shared by whichever segment is currently terminal on
/// the chain. Total length is therefore `split_count * frame_count + 1`.
///
/// Segments hold only their start offset into this buffer, never a
/// reference; all writes go through the accessors here so bounds checking
/// stays in one place. A ring's radial shape (x, z) is written once when
/// the ring is allocated; growth updates rewrite only the axis (y)
/// coordinate.
#[derive(Debug)]
pub struct VertexBuffer {
    points: Vec<Vec3>,
    split_count: usize,
}

impl VertexBuffer {
    /// Allocates a zeroed buffer for `frame_count` rings plus the tip.
    pub fn new(split_count: usize, frame_count: usize) -> Self {
        Self {
            points: vec![Vec3::ZERO; split_count * frame_count + 1],
            split_count,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn split_count(&self) -> usize {
        self.split_count
    }

    /// Number of full rings currently allocated.
    #[inline]
    pub fn frame_count(&self) -> usize {
        (self.points.len() - 1) / self.split_count
    }

    /// Index of the shared tip slot (always the last element).
    #[inline]
    pub fn tip_index(&self) -> usize {
        self.points.len() - 1
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vec3] {
        &self.points
    }

    /// Appends one ring of zeroed points, keeping the tip slot last.
    ///
    /// Existing ring offsets stay valid: the new ring's slice starts at the
    /// previous tip position and the tip moves `split_count` slots up.
    pub fn append_ring(&mut self) {
        // Inserting before the tip shifts it to the new last slot.
        let at = self.tip_index();
        self.points
            .splice(at..at, std::iter::repeat_n(Vec3::ZERO, self.split_count));
    }

    /// Writes the radial shape of the ring starting at `start`: a circle of
    /// the given radius in the x/z plane. The y coordinate is left as is.
    ///
    /// ### Panics
    /// Panics if `start` is not the first index of a full ring.
    pub fn shape_ring(&mut self, start: usize, radius: f32) {
        let ring = &mut self.points[start..start + self.split_count];
        let step = std::f32::consts::TAU / ring.len() as f32;
        for (i, v) in ring.iter_mut().enumerate() {
            let angle = step * i as f32;
            v.x = angle.cos() * radius;
            v.z = angle.sin() * radius;
        }
    }

    /// Rewrites the axis coordinate of the ring starting at `start`,
    /// preserving its radial shape.
    #[inline]
    pub fn write_ring_height(&mut self, start: usize, height: f32) {
        for v in &mut self.points[start..start + self.split_count] {
            v.y = height;
        }
    }

    /// Rewrites the axis coordinate of the tip slot just past the ring at
    /// `start`. Only the terminal segment of a chain may own the tip, so
    /// `start + split_count` must be the buffer's last index.
    #[inline]
    pub fn write_tip_height(&mut self, start: usize, height: f32) {
        let index = start + self.split_count;
        self.points[index].y = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_matches_split_times_frames_plus_tip() {
        let buf = VertexBuffer::new(4, 2);
        assert_eq!(buf.len(), 9);
        assert_eq!(buf.frame_count(), 2);
        assert_eq!(buf.tip_index(), 8);
    }

    #[test]
    fn append_ring_grows_by_split_count_and_keeps_the_tip_last() {
        let mut buf = VertexBuffer::new(4, 2);
        buf.points[8] = Vec3::new(0.0, 5.0, 0.0);

        buf.append_ring();

        assert_eq!(buf.len(), 13);
        assert_eq!(buf.frame_count(), 3);
        // Tip value moved to the new last slot; the new ring is zeroed.
        assert_eq!(buf.points[12], Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(buf.points[8], Vec3::ZERO);
        assert_eq!(buf.points[11], Vec3::ZERO);
    }

    #[test]
    fn shape_ring_places_points_on_a_circle() {
        let mut buf = VertexBuffer::new(4, 2);
        buf.shape_ring(4, 2.0);

        let ring = &buf.as_slice()[4..8];
        for v in ring {
            assert!(((v.x * v.x + v.z * v.z).sqrt() - 2.0).abs() < 1e-5);
            assert_eq!(v.y, 0.0);
        }
        // First point sits on the +x axis.
        assert!((ring[0].x - 2.0).abs() < 1e-6);
        assert!(ring[0].z.abs() < 1e-6);
    }

    #[test]
    fn height_writes_preserve_the_radial_shape() {
        let mut buf = VertexBuffer::new(4, 2);
        buf.shape_ring(0, 1.0);
        let before: Vec<(f32, f32)> = buf.as_slice()[0..4].iter().map(|v| (v.x, v.z)).collect();

        buf.write_ring_height(0, 3.5);

        let ring = &buf.as_slice()[0..4];
        for (v, (x, z)) in ring.iter().zip(before) {
            assert_eq!(v.y, 3.5);
            assert_eq!(v.x, x);
            assert_eq!(v.z, z);
        }
    }

    #[test]
    fn tip_write_touches_only_the_last_slot() {
        let mut buf = VertexBuffer::new(4, 2);
        buf.write_tip_height(4, 2.0);
        assert_eq!(buf.as_slice()[8].y, 2.0);
        assert!(buf.as_slice()[..8].iter().all(|v| v.y == 0.0));
    }
}
