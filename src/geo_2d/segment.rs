use serde::{Serialize, Deserialize};

use crate::geo_2d::{Point2, PointKey, Rect};

/// One straight leg of a trace with its copper width.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
    pub width_mm: f64,
}
impl Segment {
    /// Create a new segment.
    pub fn new(a: Point2, b: Point2, width_mm: f64) -> Self {
        Segment{a, b, width_mm}
    }

    /// Get the footprint of the segment, padded by half its width on every side.
    /// A zero-length segment becomes a square around its point.
    /// Returns `None` if the segment is not axis-aligned.
    pub fn padded_rect(&self) -> Option<Rect> {
        let half = self.width_mm * 0.5;
        let (a, b) = (self.a, self.b);

        if a.u == b.u && a.v == b.v {
            return Some(Rect::new(a.u - half, a.u + half, a.v - half, a.v + half));
        }
        if a.v == b.v {
            return Some(Rect::new(a.u.min(b.u) - half, a.u.max(b.u) + half, a.v - half, a.v + half));
        }
        if a.u == b.u {
            return Some(Rect::new(a.u - half, a.u + half, a.v.min(b.v) - half, a.v.max(b.v) + half));
        }
        None
    }

    /// Rounded keys of both endpoints.
    pub fn keys(&self) -> [PointKey; 2] {
        [self.a.key(), self.b.key()]
    }

    /// Check whether two segments share a (rounded) endpoint.
    pub fn shares_endpoint(&self, other: &Segment) -> bool {
        let mine = self.keys();
        other.keys().iter().any(|k| mine.contains(k))
    }

    /// Centerline length.
    pub fn length(&self) -> f64 {
        self.a.manhattan(&self.b)
    }

    /// Copy of the segment with a different width.
    pub fn with_width(&self, width_mm: f64) -> Segment {
        Segment{a: self.a, b: self.b, width_mm}
    }
}
