/*!
 * Planar rectangular spiral synthesis.
 *
 * A spiral is built in two steps:
 * - `derive_spiral` turns manufacturing constraints and a turn count into pitch, width, gap and bounds,
 * - `spiral_polyline` walks those bounds inward into the centerline.
 *
 * Double-D coils split the face first (`DdSplit`) and run both steps per region.
 */

mod proc_errors;
mod derive;
mod path;
mod dd_split;

use itertools::Itertools;
use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter};

use crate::geo_2d::{Point2, Rect};

// Re-export errors
pub use proc_errors::{
    SpiralError,
    ProcResult,
    err_input,
    err_infeasible,
};
// Re-export the synthesis steps
pub use derive::{
    derive_spiral,
    RELAXATION_PASSES,
};
pub use path::spiral_polyline;
pub use dd_split::DdSplit;

/// Winding direction of a spiral, seen from the face normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpiralDirection {
    Cw,
    Ccw,
}
impl SpiralDirection {
    /// Decode a sampled direction index (0 = CW, 1 = CCW).
    pub fn from_idx(idx: i64) -> ProcResult<Self> {
        match idx {
            0 => Ok(SpiralDirection::Cw),
            1 => Ok(SpiralDirection::Ccw),
            _ => err_input(&format!("direction index must be 0 (CW) or 1 (CCW), got {idx}")),
        }
    }
}

/// Face edge the outermost leg starts along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StartEdge {
    /// Index 0, the +u (right) edge.
    PosU,
    /// Index 1, the -u (left) edge.
    NegU,
    /// Index 2, the +v (top) edge.
    PosV,
    /// Index 3, the -v (bottom) edge.
    NegV,
}
impl StartEdge {
    /// Decode a sampled start edge index.
    pub fn from_idx(idx: i64) -> ProcResult<Self> {
        match idx {
            0 => Ok(StartEdge::PosU),
            1 => Ok(StartEdge::NegU),
            2 => Ok(StartEdge::PosV),
            3 => Ok(StartEdge::NegV),
            _ => err_input(&format!("start edge index must be in 0..=3, got {idx}")),
        }
    }
}

/// Axis a double-D face is split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SplitAxis {
    U,
    V,
}
impl SplitAxis {
    /// Decode a sampled split axis index (0 = u, 1 = v).
    pub fn from_idx(idx: i64) -> ProcResult<Self> {
        match idx {
            0 => Ok(SplitAxis::U),
            1 => Ok(SplitAxis::V),
            _ => err_input(&format!("split axis index must be 0 (u) or 1 (v), got {idx}")),
        }
    }
}

/// Manufacturing constraints shared by every spiral of a coil instance.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SpiralConstraints {
    pub edge_clearance_mm: f64,
    pub fill_scale: f64,
    pub pitch_duty: f64,
    pub min_trace_width_mm: f64,
    pub min_trace_gap_mm: f64,
}
impl SpiralConstraints {
    /// Check the constraint domains.
    pub fn check(&self) -> ProcResult<()> {
        if !(self.edge_clearance_mm >= 0.0) {
            err_input("edge_clearance_mm must be >= 0")?;
        }
        if !(self.fill_scale > 0.0 && self.fill_scale <= 1.0) {
            err_input("fill_scale must be in (0, 1]")?;
        }
        if !(self.pitch_duty > 0.0) {
            err_input("pitch_duty must be > 0")?;
        }
        if !(self.min_trace_width_mm > 0.0) || !(self.min_trace_gap_mm >= 0.0) {
            err_input("min_trace_width_mm must be > 0 and min_trace_gap_mm must be >= 0")?;
        }
        Ok(())
    }
}

/// Per-spiral shape choices.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SpiralShape {
    pub turns: usize,
    pub direction: SpiralDirection,
    pub start_edge: StartEdge,
}
impl SpiralShape {
    /// Decode the sampled indices of one spiral.
    pub fn from_indices(turns: i64, direction_idx: i64, start_edge_idx: i64) -> ProcResult<Self> {
        if turns <= 0 {
            err_input(&format!("turns must be > 0, got {turns}"))?;
        }
        Ok(SpiralShape{
            turns: turns as usize,
            direction: SpiralDirection::from_idx(direction_idx)?,
            start_edge: StartEdge::from_idx(start_edge_idx)?,
        })
    }
}

/// Geometry derived from the constraints for one spiral.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DerivedSpiral {
    /// Bounds of the trace centerline.
    pub bounds: Rect,
    pub pitch_mm: f64,
    pub trace_width_mm: f64,
    pub trace_gap_mm: f64,
}

/// A single spiral centerline, in face coordinates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpiralMask {
    pub turns: usize,
    pub start_edge: StartEdge,
    pub direction: SpiralDirection,
    pub derived: DerivedSpiral,
    /// `1 + 4 * turns` vertices, outermost first.
    pub polyline: Vec<Point2>,
}
impl SpiralMask {
    /// Iterate over the legs of the polyline as vertex pairs.
    pub fn legs(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.polyline.iter().copied().tuple_windows()
    }

    /// Total centerline length in mm.
    pub fn length_mm(&self) -> f64 {
        self.legs().map(|(a, b)| a.manhattan(&b)).sum()
    }
}

/// Build a single spiral filling a `u_size_mm` x `v_size_mm` region centered on the origin.
pub fn build_spiral_mask(
    u_size_mm: f64,
    v_size_mm: f64,
    shape: &SpiralShape,
    constraints: &SpiralConstraints,
) -> ProcResult<SpiralMask> {
    let derived = derive_spiral(u_size_mm, v_size_mm, shape.turns, constraints)?;
    let polyline = spiral_polyline(
        &derived.bounds,
        shape.turns,
        derived.pitch_mm,
        shape.start_edge,
        shape.direction,
    )?;
    Ok(SpiralMask{
        turns: shape.turns,
        start_edge: shape.start_edge,
        direction: shape.direction,
        derived,
        polyline,
    })
}

/// Build the spirals of one face.
/// One shape gives a single spiral over the whole face,
/// two shapes give a double-D pair placed by `dd`.
pub fn build_spiral_masks(
    face_u_size_mm: f64,
    face_v_size_mm: f64,
    shapes: &[SpiralShape],
    constraints: &SpiralConstraints,
    dd: Option<&DdSplit>,
) -> ProcResult<Vec<SpiralMask>> {
    match shapes {
        [shape] => Ok(vec![build_spiral_mask(face_u_size_mm, face_v_size_mm, shape, constraints)?]),
        [shape_a, shape_b] => {
            let dd = match dd {
                Some(dd) => dd,
                None => return err_input("a DD split is required for two spirals"),
            };
            let (region_a, region_b) = dd.split(&Rect::centered(face_u_size_mm, face_v_size_mm))?;

            let mut masks = Vec::with_capacity(2);
            for (region, shape) in [(region_a, shape_a), (region_b, shape_b)] {
                let mut mask = build_spiral_mask(region.u_size(), region.v_size(), shape, constraints)?;
                let shift = (region.u_center(), region.v_center());
                for point in mask.polyline.iter_mut() {
                    *point += shift;
                }
                masks.push(mask);
            }
            Ok(masks)
        },
        _ => err_input(&format!("spiral count must be 1 or 2, got {}", shapes.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> SpiralConstraints {
        SpiralConstraints{
            edge_clearance_mm: 1.0,
            fill_scale: 0.9,
            pitch_duty: 0.5,
            min_trace_width_mm: 0.2,
            min_trace_gap_mm: 0.0,
        }
    }

    fn shape(turns: usize) -> SpiralShape {
        SpiralShape{turns, direction: SpiralDirection::Ccw, start_edge: StartEdge::NegV}
    }

    #[test]
    fn single_spiral_point_count() {
        let masks = build_spiral_masks(20.0, 20.0, &[shape(3)], &constraints(), None).unwrap();
        assert_eq!(masks.len(), 1);
        assert_eq!(masks[0].polyline.len(), 13);
        assert_eq!(masks[0].legs().count(), 12);
        assert!(masks[0].length_mm() > 0.0);
    }

    #[test]
    fn dd_spirals_sit_in_their_regions() {
        let dd = DdSplit{axis: SplitAxis::U, gap_mm: 4.0, ratio: 0.5};
        let masks = build_spiral_masks(44.0, 20.0, &[shape(2), shape(3)], &constraints(), Some(&dd)).unwrap();
        assert_eq!(masks.len(), 2);
        assert_eq!(masks[0].polyline.len(), 9);
        assert_eq!(masks[1].polyline.len(), 13);
        assert!(masks[0].polyline.iter().all(|p| p.u < -2.0));
        assert!(masks[1].polyline.iter().all(|p| p.u > 2.0));
    }

    #[test]
    fn dd_requires_split() {
        let result = build_spiral_masks(44.0, 20.0, &[shape(2), shape(2)], &constraints(), None);
        assert!(matches!(result, Err(SpiralError::InvalidInput(_))));
        let result = build_spiral_masks(44.0, 20.0, &[], &constraints(), None);
        assert!(matches!(result, Err(SpiralError::InvalidInput(_))));
    }

    #[test]
    fn index_decoding() {
        assert_eq!(StartEdge::from_idx(3).unwrap(), StartEdge::NegV);
        assert!(StartEdge::from_idx(4).is_err());
        assert_eq!(SpiralDirection::from_idx(1).unwrap(), SpiralDirection::Ccw);
        assert!(SplitAxis::from_idx(2).is_err());
        assert!(SpiralShape::from_indices(0, 0, 0).is_err());
        assert_eq!(SplitAxis::V.to_string(), "v");
    }
}
