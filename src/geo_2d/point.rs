use std::ops::{
    Add, AddAssign,
    Sub,
};
use std::fmt;
use serde::{Serialize, Deserialize};

/// Decimal digits kept when two vertices are compared for coincidence.
pub const ROUND_DIGITS: i32 = 6;

/// A point in the face-local (u, v) frame, in mm.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub u: f64,
    pub v: f64,
}
impl Point2 {
    /// Create a new point.
    pub fn new(u: f64, v: f64) -> Self {
        Point2{u, v}
    }

    /// Create a new zero point.
    pub fn zero() -> Self {
        Point2{u: 0.0, v: 0.0}
    }

    /// Get the rounded key used to match shared vertices.
    pub fn key(&self) -> PointKey {
        let scale = 10f64.powi(ROUND_DIGITS);
        PointKey((self.u * scale).round_ties_even() as i64, (self.v * scale).round_ties_even() as i64)
    }

    /// Get the Manhattan distance between two points.
    /// Equal to the leg length for axis-aligned legs.
    pub fn manhattan(&self, other: &Point2) -> f64 {
        (self.u - other.u).abs() + (self.v - other.v).abs()
    }

    /// Check that two points differ in exactly one coordinate.
    pub fn is_axis_step_to(&self, other: &Point2) -> bool {
        (self.u == other.u) != (self.v == other.v)
    }
}
impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        write!(f, "({:.*}, {:.*})", precision, self.u, precision, self.v)
    }
}
impl Add<(f64, f64)> for Point2 {
    type Output = Self;

    fn add(self, (du, dv): (f64, f64)) -> Self {
        Point2{
            u: self.u + du,
            v: self.v + dv,
        }
    }
}
impl AddAssign<(f64, f64)> for Point2 {
    fn add_assign(&mut self, (du, dv): (f64, f64)) {
        self.u += du;
        self.v += dv;
    }
}
impl Sub<Point2> for Point2 {
    type Output = (f64, f64);

    fn sub(self, rhs: Point2) -> (f64, f64) {
        (self.u - rhs.u, self.v - rhs.v)
    }
}

/// Hashable, rounded vertex identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(pub i64, pub i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_merge_float_noise() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(1.0 + 1e-9, 2.0 - 1e-9);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Point2::new(1.00001, 2.0).key());
    }

    #[test]
    fn key_ties_round_to_even() {
        assert_eq!(Point2::new(0.0000005, 0.0000015).key(), PointKey(0, 2));
        assert_eq!(Point2::new(0.0000045, -0.0000005).key(), PointKey(4, 0));
    }

    #[test]
    fn translate_and_difference() {
        let mut p = Point2::new(1.0, -1.0) + (0.5, 0.5);
        assert_eq!(p, Point2::new(1.5, -0.5));
        p += (-1.5, 0.5);
        assert_eq!(p, Point2::zero());
        assert_eq!(Point2::new(3.0, 4.0) - Point2::new(1.0, 1.0), (2.0, 3.0));
    }

    #[test]
    fn axis_steps() {
        let a = Point2::new(0.0, 0.0);
        assert!(a.is_axis_step_to(&Point2::new(2.0, 0.0)));
        assert!(!a.is_axis_step_to(&Point2::new(2.0, 1.0)));
        assert!(!a.is_axis_step_to(&a));
        assert_eq!(a.manhattan(&Point2::new(2.0, -3.0)), 5.0);
    }

    #[test]
    fn display_precision() {
        let p = Point2::new(1.23456, -2.0);
        assert_eq!(format!("{}", p), "(1.235, -2.000)");
        assert_eq!(format!("{:.1}", p), "(1.2, -2.0)");
    }
}
