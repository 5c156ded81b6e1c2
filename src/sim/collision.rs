//! Axis-aligned collision predicates
//!
//! Rectangle overlap is strict (touching edges do not collide) while point
//! containment is inclusive (a point on the edge is inside). Landing on a
//! platform relies on the first, item pickup on the second.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle from a top-left position and a size
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Square of half-extent `half` centered on `center`
    pub fn centered(center: Vec2, half: f32) -> Self {
        Self::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// True iff the rectangles overlap on both axes (edges touching is not overlap)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True iff the point lies in the rectangle, edges included
#[inline]
pub fn point_in_rect(px: f32, py: f32, rect: &Rect) -> bool {
    px >= rect.x && px <= rect.right() && py >= rect.y && py <= rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Shares the bottom edge (player resting exactly on a platform)
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_point_on_edge_is_inside() {
        let r = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert!(point_in_rect(0.0, 0.0, &r));
        assert!(point_in_rect(20.0, 20.0, &r));
        assert!(point_in_rect(20.0, 5.0, &r));
        assert!(!point_in_rect(20.01, 5.0, &r));
        assert!(!point_in_rect(5.0, -0.01, &r));
    }

    #[test]
    fn test_centered_rect() {
        let r = Rect::centered(Vec2::new(250.0, 410.0), 10.0);
        assert_eq!(r, Rect::new(240.0, 400.0, 20.0, 20.0));
        assert_eq!(r.center(), Vec2::new(250.0, 410.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, aw in 1.0f32..50.0, ah in 1.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, bw in 1.0f32..50.0, bh in 1.0f32..50.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_adjacent_rects_never_overlap(
            x in -100.0f32..100.0, y in -100.0f32..100.0, w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let right = Rect::new(a.right(), y, w, h);
            let below = Rect::new(x, a.bottom(), w, h);
            prop_assert!(!overlaps(&a, &right));
            prop_assert!(!overlaps(&a, &below));
        }

        #[test]
        fn prop_corners_are_contained(
            x in -100.0f32..100.0, y in -100.0f32..100.0, w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(point_in_rect(r.x, r.y, &r));
            prop_assert!(point_in_rect(r.right(), r.y, &r));
            prop_assert!(point_in_rect(r.x, r.bottom(), &r));
            prop_assert!(point_in_rect(r.right(), r.bottom(), &r));
        }
    }
}
