//! Axis-aligned bounding boxes
//!
//! Every collision query rebuilds boxes from current positions and per-entity
//! radii; boxes are never cached across frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box stored as corner points
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box centered on `center` extending `half_extent` on both axes
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        let h = Vec2::splat(half_extent);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Standard AABB overlap test: true unless the boxes are strictly
    /// disjoint on either axis
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_extents() {
        let b = Aabb::centered(Vec2::new(1.0, 2.0), 0.5);
        assert_eq!(b.left(), 0.5);
        assert_eq!(b.right(), 1.5);
        assert_eq!(b.bottom(), 1.5);
        assert_eq!(b.top(), 2.5);
        assert!((b.width() - 1.0).abs() < 1e-6);
        assert!((b.height() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Aabb::centered(Vec2::ZERO, 0.5);
        let b = Aabb::centered(Vec2::new(0.4, 0.4), 0.5);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_disjoint_one_axis() {
        let a = Aabb::centered(Vec2::ZERO, 0.5);
        // Overlaps in Y, disjoint in X
        let b = Aabb::centered(Vec2::new(1.2, 0.0), 0.5);
        assert!(!a.intersects(&b));
        // Overlaps in X, disjoint in Y
        let c = Aabb::centered(Vec2::new(0.0, -1.2), 0.5);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_intersects_touching_edges() {
        // Shared edge is contact, not disjoint
        let a = Aabb::centered(Vec2::ZERO, 0.5);
        let b = Aabb::centered(Vec2::new(1.0, 0.0), 0.5);
        assert!(a.intersects(&b));
    }
}
