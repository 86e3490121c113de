use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in a page's own coordinate space (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Part of this rectangle inside `other`; empty overlaps collapse to zero size.
    pub fn clip_to(&self, other: &Self) -> Self {
        let x0 = self.x0.max(other.x0).min(other.x1);
        let y0 = self.y0.max(other.y0).min(other.y1);
        Self {
            x0,
            y0,
            x1: self.x1.min(other.x1).max(x0),
            y1: self.y1.min(other.y1).max(y0),
        }
    }

    /// Express the part of this rectangle visible on `page` as page fractions.
    pub fn normalize_in(&self, page: &Rect) -> NormalizedRect {
        let width = page.width();
        let height = page.height();
        if width <= 0.0 || height <= 0.0 {
            return NormalizedRect::default();
        }
        let visible = self.clip_to(page);
        NormalizedRect {
            x: clamp_unit((visible.x0 - page.x0) / width),
            y: clamp_unit((visible.y0 - page.y0) / height),
            w: clamp_unit(visible.width() / width),
            h: clamp_unit(visible.height() / height),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Rectangle expressed as fractions of its page's width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }

    /// Convert back to absolute coordinates on `page`.
    pub fn to_absolute(&self, page: &Rect) -> Rect {
        Rect::from_size(
            page.x0 + self.x * page.width(),
            page.y0 + self.y * page.height(),
            self.w * page.width(),
            self.h * page.height(),
        )
    }
}
