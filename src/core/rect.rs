//! Axis-Aligned Rectangles
//!
//! Every entity's visual and collision bounds. Overlap is strict: rectangles
//! that only share an edge do not collide.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, fixed_half};
use super::vec2::FixedVec2;

/// Axis-aligned rectangle in fixed-point screen coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedRect {
    /// Left edge
    pub x: Fixed,
    /// Top edge
    pub y: Fixed,
    /// Width
    pub w: Fixed,
    /// Height
    pub h: Fixed,
}

impl FixedRect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed, w: Fixed, h: Fixed) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle of the given size centered on `center`.
    #[inline]
    pub fn centered(center: FixedVec2, w: Fixed, h: Fixed) -> Self {
        Self {
            x: center.x.wrapping_sub(fixed_half(w)),
            y: center.y.wrapping_sub(fixed_half(h)),
            w,
            h,
        }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> Fixed {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> Fixed {
        self.x.wrapping_add(self.w)
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> Fixed {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> Fixed {
        self.y.wrapping_add(self.h)
    }

    /// Top-left corner.
    #[inline]
    pub fn position(&self) -> FixedVec2 {
        FixedVec2::new(self.x, self.y)
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> FixedVec2 {
        FixedVec2::new(
            self.x.wrapping_add(fixed_half(self.w)),
            self.y.wrapping_add(fixed_half(self.h)),
        )
    }

    /// Move so the center lands on `center`, keeping the size.
    #[inline]
    pub fn set_center(&mut self, center: FixedVec2) {
        *self = Self::centered(center, self.w, self.h);
    }

    /// Move horizontally so the right edge lands on `right`.
    #[inline]
    pub fn set_right(&mut self, right: Fixed) {
        self.x = right.wrapping_sub(self.w);
    }

    /// Move vertically so the bottom edge lands on `bottom`.
    #[inline]
    pub fn set_bottom(&mut self, bottom: Fixed) {
        self.y = bottom.wrapping_sub(self.h);
    }

    /// Translate in place.
    #[inline]
    pub fn translate(&mut self, delta: FixedVec2) {
        self.x = self.x.wrapping_add(delta.x);
        self.y = self.y.wrapping_add(delta.y);
    }

    /// Copy translated by `delta`.
    #[inline]
    pub fn offset(self, delta: FixedVec2) -> Self {
        let mut moved = self;
        moved.translate(delta);
        moved
    }

    /// Strict overlap test.
    #[inline]
    pub fn overlaps(&self, other: &FixedRect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

impl fmt::Debug for FixedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.position().to_floats();
        let (w, h) = FixedVec2::new(self.w, self.h).to_floats();
        write!(f, "Rect({:.2}, {:.2}, {:.2}x{:.2})", x, y, w, h)
    }
}
