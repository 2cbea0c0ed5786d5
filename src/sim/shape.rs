//! Shape geometry: inclusive pixel regions and the closed shape set
//!
//! Everything is integer pixel math. A `Region` is an inclusive axis-aligned
//! box; a `Shape` answers two questions about itself placed at a center:
//! its bounding box, and whether a given pixel falls inside it. The
//! compositor relies on the bounding box being a superset of every
//! contained pixel.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::OUTLINE_WIDTH;

/// An axis-aligned pixel region with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Top-left corner (inclusive)
    pub top_left: IVec2,
    /// Bottom-right corner (inclusive)
    pub bot_right: IVec2,
}

impl Region {
    /// Build a region from inclusive corners. Corners must already satisfy
    /// `top_left <= bot_right` on both axes.
    #[inline]
    pub fn new(top_left: IVec2, bot_right: IVec2) -> Self {
        debug_assert!(top_left.x <= bot_right.x && top_left.y <= bot_right.y);
        Self { top_left, bot_right }
    }

    /// Region of `center ± half` on each axis
    #[inline]
    pub fn from_center_half_extents(center: IVec2, half: IVec2) -> Self {
        Self::new(center - half, center + half)
    }

    /// Width in pixels (inclusive corners)
    #[inline]
    pub fn width(&self) -> i32 {
        self.bot_right.x - self.top_left.x + 1
    }

    /// Height in pixels (inclusive corners)
    #[inline]
    pub fn height(&self) -> i32 {
        self.bot_right.y - self.top_left.y + 1
    }

    /// Pixel count
    #[inline]
    pub fn area(&self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    /// Does this region contain the pixel?
    #[inline]
    pub fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bot_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bot_right.y
    }

    /// Is `other` entirely inside this region?
    pub fn contains_region(&self, other: &Region) -> bool {
        self.contains_point(other.top_left) && self.contains_point(other.bot_right)
    }

    /// Smallest region covering both `self` and `other`
    pub fn union(&self, other: &Region) -> Region {
        Region {
            top_left: self.top_left.min(other.top_left),
            bot_right: self.bot_right.max(other.bot_right),
        }
    }

    /// Clip this region to `bounds`. Returns `None` when they are disjoint.
    pub fn clamp_to(&self, bounds: &Region) -> Option<Region> {
        let top_left = self.top_left.max(bounds.top_left);
        let bot_right = self.bot_right.min(bounds.bot_right);
        if top_left.x > bot_right.x || top_left.y > bot_right.y {
            None
        } else {
            Some(Region { top_left, bot_right })
        }
    }
}

/// The closed set of drawable shapes
///
/// Shapes are stateless beyond their dimensions; placement comes from the
/// owning layer at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled rectangle with the given half-extents
    Rect { half: IVec2 },
    /// One-pixel frame along a rectangle's border (same bounds as `Rect`)
    RectOutline { half: IVec2 },
    /// Filled circle with the given radius
    Circle { radius: i32 },
}

impl Shape {
    /// Axis-aligned bounding box of the shape placed at `center`
    pub fn bounds_at(&self, center: IVec2) -> Region {
        let half = match *self {
            Shape::Rect { half } | Shape::RectOutline { half } => half,
            Shape::Circle { radius } => IVec2::splat(radius),
        };
        Region::from_center_half_extents(center, half)
    }

    /// Is `point` inside the shape placed at `center`?
    pub fn contains_at(&self, center: IVec2, point: IVec2) -> bool {
        let d = point - center;
        match *self {
            Shape::Rect { half } => d.abs().cmple(half).all(),
            Shape::RectOutline { half } => {
                let inner = half - IVec2::splat(OUTLINE_WIDTH);
                d.abs().cmple(half).all() && !d.abs().cmple(inner).all()
            }
            Shape::Circle { radius } => d.length_squared() <= radius * radius,
        }
    }
}
