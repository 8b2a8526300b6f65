use crate::geo_2d::{Point2, Rect};
use crate::spiral::{
    err_infeasible,
    err_input,
    ProcResult,
    SpiralDirection,
    StartEdge,
};

/// Travel direction of a spiral leg, in counter-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Travel {
    East,
    North,
    West,
    South,
}
impl Travel {
    const ORDER: [Travel; 4] = [Travel::East, Travel::North, Travel::West, Travel::South];

    fn index(self) -> usize {
        match self {
            Travel::East => 0,
            Travel::North => 1,
            Travel::West => 2,
            Travel::South => 3,
        }
    }

    /// Turn left for CCW spirals, right for CW spirals.
    fn turn(self, direction: SpiralDirection) -> Travel {
        let delta = match direction {
            SpiralDirection::Ccw => 1,
            SpiralDirection::Cw => 3,
        };
        Travel::ORDER[(self.index() + delta) % 4]
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Travel::East | Travel::West)
    }
}

/// Remaining free region of the spiral, shrunk one pitch per leg.
struct Boundary {
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
}
impl Boundary {
    fn is_collapsed(&self) -> bool {
        self.left >= self.right || self.bottom >= self.top
    }

    fn move_to_edge(&self, travel: Travel, from: Point2) -> Point2 {
        match travel {
            Travel::East => Point2::new(self.right, from.v),
            Travel::West => Point2::new(self.left, from.v),
            Travel::North => Point2::new(from.u, self.top),
            Travel::South => Point2::new(from.u, self.bottom),
        }
    }

    /// Pull in the boundary line the leg just ran along.
    fn shrink_behind(&mut self, travel: Travel, at: Point2, pitch_mm: f64) -> ProcResult<()> {
        if travel.is_horizontal() {
            if at.v == self.bottom {
                self.bottom += pitch_mm;
            } else if at.v == self.top {
                self.top -= pitch_mm;
            } else {
                err_input("spiral state error: horizontal leg is off the top/bottom boundary")?;
            }
        } else if at.u == self.left {
            self.left += pitch_mm;
        } else if at.u == self.right {
            self.right -= pitch_mm;
        } else {
            err_input("spiral state error: vertical leg is off the left/right boundary")?;
        }
        Ok(())
    }
}

/// Initial corner and travel direction for a start edge and winding direction.
fn start_state(bounds: &Rect, start_edge: StartEdge, direction: SpiralDirection) -> (Point2, Travel) {
    let (u_min, u_max, v_min, v_max) = (bounds.u_min, bounds.u_max, bounds.v_min, bounds.v_max);
    match (direction, start_edge) {
        (SpiralDirection::Ccw, StartEdge::NegV) => (Point2::new(u_min, v_min), Travel::East),
        (SpiralDirection::Ccw, StartEdge::PosU) => (Point2::new(u_max, v_min), Travel::North),
        (SpiralDirection::Ccw, StartEdge::PosV) => (Point2::new(u_max, v_max), Travel::West),
        (SpiralDirection::Ccw, StartEdge::NegU) => (Point2::new(u_min, v_max), Travel::South),
        (SpiralDirection::Cw, StartEdge::NegV) => (Point2::new(u_max, v_min), Travel::West),
        (SpiralDirection::Cw, StartEdge::PosU) => (Point2::new(u_max, v_max), Travel::South),
        (SpiralDirection::Cw, StartEdge::PosV) => (Point2::new(u_min, v_max), Travel::East),
        (SpiralDirection::Cw, StartEdge::NegU) => (Point2::new(u_min, v_min), Travel::North),
    }
}

/// Walk the bounds inward into a rectangular spiral centerline.
/// Each leg runs to the current boundary, then that boundary moves in by one pitch.
/// Returns `1 + 4 * turns` vertices, outermost first.
pub fn spiral_polyline(
    bounds: &Rect,
    turns: usize,
    pitch_mm: f64,
    start_edge: StartEdge,
    direction: SpiralDirection,
) -> ProcResult<Vec<Point2>> {
    if turns == 0 {
        err_input("turns must be > 0")?;
    }
    if !(pitch_mm > 0.0) {
        err_input("pitch_mm must be > 0")?;
    }

    let (mut at, mut travel) = start_state(bounds, start_edge, direction);
    let mut boundary = Boundary{
        left: bounds.u_min,
        right: bounds.u_max,
        bottom: bounds.v_min,
        top: bounds.v_max,
    };

    let mut points = vec![at];

    for _ in 0..turns {
        for _ in 0..4 {
            if boundary.is_collapsed() {
                err_infeasible("bounds collapsed before completing the requested turns")?;
            }
            let next = boundary.move_to_edge(travel, at);
            if points.last() != Some(&next) {
                points.push(next);
            }
            boundary.shrink_behind(travel, next, pitch_mm)?;
            travel = travel.turn(direction);
            at = next;
        }
    }

    Ok(points)
}
