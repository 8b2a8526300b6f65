use std::fmt;
use serde::{Serialize, Deserialize};

/// Axis-aligned rectangle in the face-local (u, v) frame.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Rect {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}
impl Rect {
    /// Create a new rectangle.
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Rect{u_min, u_max, v_min, v_max}
    }

    /// Create a rectangle of the given size centered on the origin.
    pub fn centered(u_size: f64, v_size: f64) -> Self {
        Rect{
            u_min: -0.5 * u_size,
            u_max: 0.5 * u_size,
            v_min: -0.5 * v_size,
            v_max: 0.5 * v_size,
        }
    }

    pub fn u_size(&self) -> f64 {
        self.u_max - self.u_min
    }

    pub fn v_size(&self) -> f64 {
        self.v_max - self.v_min
    }

    pub fn u_center(&self) -> f64 {
        (self.u_min + self.u_max) * 0.5
    }

    pub fn v_center(&self) -> f64 {
        (self.v_min + self.v_max) * 0.5
    }

    /// Area of the rectangle (zero if inverted).
    pub fn area(&self) -> f64 {
        self.u_size().max(0.0) * self.v_size().max(0.0)
    }

    /// Check for a strictly positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        self.u_size() > 0.0 && self.v_size() > 0.0
    }

    /// Closed-interval intersection test: touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.u_max < other.u_min
            || other.u_max < self.u_min
            || self.v_max < other.v_min
            || other.v_max < self.v_min)
    }

    /// Closed containment test.
    pub fn contains(&self, u: f64, v: f64) -> bool {
        self.u_min <= u && u <= self.u_max && self.v_min <= v && v <= self.v_max
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect{
            u_min: self.u_min.min(other.u_min),
            u_max: self.u_max.max(other.u_max),
            v_min: self.v_min.min(other.v_min),
            v_max: self.v_max.max(other.v_max),
        }
    }
}
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        write!(f, "[u: {:.*}..{:.*}, v: {:.*}..{:.*}]",
            precision, self.u_min, precision, self.u_max,
            precision, self.v_min, precision, self.v_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_sizes() {
        let r = Rect::centered(20.0, 10.0);
        assert_eq!(r.u_size(), 20.0);
        assert_eq!(r.v_size(), 10.0);
        assert_eq!(r.u_center(), 0.0);
        assert_eq!(r.area(), 200.0);
        assert!(r.is_valid());
        assert!(!Rect::new(1.0, 1.0, 0.0, 2.0).is_valid());
    }

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::new(0.0, 1.0, 0.0, 1.0);
        let b = Rect::new(1.0, 2.0, 0.0, 1.0);
        let c = Rect::new(1.0001, 2.0, 0.0, 1.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn closed_containment_and_union() {
        let a = Rect::new(0.0, 1.0, 0.0, 1.0);
        assert!(a.contains(1.0, 0.0));
        assert!(!a.contains(1.1, 0.5));
        let u = a.union(&Rect::new(-1.0, 0.5, 0.5, 3.0));
        assert_eq!(u, Rect::new(-1.0, 1.0, 0.0, 3.0));
    }
}
