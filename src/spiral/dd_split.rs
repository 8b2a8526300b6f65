use serde::{Serialize, Deserialize};

use crate::geo_2d::Rect;
use crate::spiral::{
    err_infeasible,
    err_input,
    ProcResult,
    SplitAxis,
};

/// Split of one face into two spiral regions for a double-D coil.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DdSplit {
    pub axis: SplitAxis,
    pub gap_mm: f64,
    /// Share of the non-gap span given to the first region.
    pub ratio: f64,
}
impl DdSplit {
    /// Split `bounds` into two regions separated by the gap.
    /// The first region sits on the low side of the split axis.
    pub fn split(&self, bounds: &Rect) -> ProcResult<(Rect, Rect)> {
        if !(self.gap_mm >= 0.0) {
            err_input("DD gap_mm must be >= 0")?;
        }
        if !(self.ratio > 0.0 && self.ratio < 1.0) {
            err_input("DD ratio must be in (0, 1)")?;
        }

        let span = match self.axis {
            SplitAxis::U => bounds.u_size(),
            SplitAxis::V => bounds.v_size(),
        };
        if self.gap_mm >= span {
            err_infeasible(&format!("DD gap {:.3} mm does not fit in the {} span {:.3} mm", self.gap_mm, self.axis, span))?;
        }
        let available = span - self.gap_mm;
        let a_size = available * self.ratio;
        let b_size = available - a_size;

        Ok(match self.axis {
            SplitAxis::U => (
                Rect::new(bounds.u_min, bounds.u_min + a_size, bounds.v_min, bounds.v_max),
                Rect::new(bounds.u_max - b_size, bounds.u_max, bounds.v_min, bounds.v_max),
            ),
            SplitAxis::V => (
                Rect::new(bounds.u_min, bounds.u_max, bounds.v_min, bounds.v_min + a_size),
                Rect::new(bounds.u_min, bounds.u_max, bounds.v_max - b_size, bounds.v_max),
            ),
        })
    }
}
