//! Layout types: Point, BoundingBox, Layout.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{LayoutError, Result};

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ─── BoundingBox ─────────────────────────────────────────────────────────────

/// Axis-aligned rectangle. Corners are always stored normalized, so
/// `left <= right` and `top <= bottom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

fn coordinate_separator() -> &'static Regex {
    static SEP: OnceLock<Regex> = OnceLock::new();
    SEP.get_or_init(|| Regex::new(r"\s*,\s*").expect("static regex"))
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        }
    }

    /// Parse a user-supplied `x1,y1,x2,y2` string.
    pub fn from_user_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let fields: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            coordinate_separator().split(trimmed).collect()
        };
        if fields.len() != 4 {
            return Err(LayoutError::BoundingBoxFormat(input.to_string()));
        }

        let mut coords = [0.0_f64; 4];
        for (slot, field) in coords.iter_mut().zip(&fields) {
            *slot = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LayoutError::BoundingBoxCoordinate {
                    value: field.to_string(),
                    input: input.to_string(),
                })?;
        }
        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }

    /// Corner coordinates as `(left, top, right, bottom)`.
    pub fn coords(&self) -> (f64, f64, f64, f64) {
        (self.left, self.top, self.right, self.bottom)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn contains(&self, p: &Point, tolerance: f64) -> bool {
        p.x >= self.left - tolerance
            && p.x <= self.right + tolerance
            && p.y >= self.top - tolerance
            && p.y <= self.bottom + tolerance
    }
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Node coordinates produced by a layout algorithm, indexed like the
/// nodes of the graph it was computed for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub coords: Vec<Point>,
}

impl Layout {
    pub fn new(coords: Vec<Point>) -> Self {
        Self { coords }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Smallest box enclosing every coordinate, `None` for an empty layout.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.coords.first()?;
        let mut bbox = BoundingBox::new(first.x, first.y, first.x, first.y);
        for p in &self.coords[1..] {
            bbox.left = bbox.left.min(p.x);
            bbox.right = bbox.right.max(p.x);
            bbox.top = bbox.top.min(p.y);
            bbox.bottom = bbox.bottom.max(p.y);
        }
        Some(bbox)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.coords {
            p.x += dx;
            p.y += dy;
        }
    }

    /// Multiply every coordinate by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.coords {
            p.x *= factor;
            p.y *= factor;
        }
    }

    /// Flip vertically. Screen coordinates in CX grow downward.
    pub fn mirror_y(&mut self) {
        for p in &mut self.coords {
            p.y = -p.y;
        }
    }

    /// Scale and translate the layout so it fits into `target`.
    ///
    /// With `keep_aspect_ratio` both axes share the smaller ratio and the
    /// layout is centered. An axis with zero extent never constrains the
    /// ratio; a layout that is a single point is only moved to the center.
    pub fn fit_into(&mut self, target: &BoundingBox, keep_aspect_ratio: bool) {
        let Some(current) = self.bounding_box() else {
            return;
        };

        let axis_ratio = |have: f64, want: f64| -> Option<f64> {
            if have > f64::EPSILON {
                Some(want / have)
            } else {
                None
            }
        };
        let rx = axis_ratio(current.width(), target.width());
        let ry = axis_ratio(current.height(), target.height());

        let (sx, sy) = if keep_aspect_ratio {
            let r = match (rx, ry) {
                (Some(a), Some(b)) => a.min(b),
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => 1.0,
            };
            (r, r)
        } else {
            (rx.unwrap_or(1.0), ry.unwrap_or(1.0))
        };

        let from = current.center();
        let to = target.center();
        for p in &mut self.coords {
            p.x = (p.x - from.x) * sx + to.x;
            p.y = (p.y - from.y) * sy + to.y;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
