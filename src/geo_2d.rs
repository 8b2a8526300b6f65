mod point;
mod rect;
mod segment;

pub use point::{
    Point2,
    PointKey,
    ROUND_DIGITS,
};
pub use rect::Rect;
pub use segment::Segment;
