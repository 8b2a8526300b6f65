/*!
 * Copper layer assignment.
 *
 * Splits a spiral centerline into top and bottom layer segments according to a `LayerPolicy`,
 * placing a via wherever two consecutive turns change layer.
 */

mod proc_errors;
mod policies;
mod overlap;

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::geo_2d::{Point2, Segment};
use crate::spiral::SpiralMask;

// Re-export errors
pub use proc_errors::{
    LayeringError,
    ProcResult,
    err_str,
};
// Re-export policies
pub use policies::{
    LayerPolicy,
    LayerChoice,
    SingleTop,
    RadialSplit,
    AlternateTurns,
};
pub use overlap::{
    OverlapEstimate,
    estimate_overlap,
    DEFAULT_GRID_STEP_MM,
    MAX_GRID_CELLS,
};

/// A spiral routed over the copper layers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayeredSpiral {
    pub layer_mode: i64,
    pub top_segments: Vec<Segment>,
    pub bottom_segments: Vec<Segment>,
    pub via_points: Vec<Point2>,
    /// Outer end of the trace.
    pub terminal_a: Point2,
    /// Inner end of the trace.
    pub terminal_b: Point2,
    pub terminal_a_is_top: bool,
    pub terminal_b_is_top: bool,
    pub overlap: OverlapEstimate,
}
impl LayeredSpiral {
    /// All segments, top layer first.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.top_segments.iter().chain(self.bottom_segments.iter())
    }
}

/// Route one spiral on the layers chosen by `policy`.
pub fn layer_spiral(mask: &SpiralMask, policy: &LayerChoice) -> ProcResult<LayeredSpiral> {
    let turns = mask.turns;
    if turns == 0 {
        err_str("spiral has no turns")?;
    }
    if mask.polyline.len() != 1 + 4 * turns {
        err_str(&format!(
            "polyline has {} points, expected {} for {} turns",
            mask.polyline.len(), 1 + 4 * turns, turns,
        ))?;
    }

    let turn_is_top = policy.assign_turns(turns);
    let width = mask.derived.trace_width_mm;

    let mut top_segments = Vec::new();
    let mut bottom_segments = Vec::new();
    for (leg_idx, (a, b)) in mask.legs().enumerate() {
        let segment = Segment::new(a, b, width);
        match turn_is_top[leg_idx / 4] {
            true => top_segments.push(segment),
            false => bottom_segments.push(segment),
        }
    }

    let via_points = turn_is_top.windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] != pair[1])
        .map(|(turn, _)| mask.polyline[4 * (turn + 1)])
        .collect();

    let overlap = estimate_overlap(&top_segments, &bottom_segments)?;
    debug!(
        policy = policy.get_policy_name(),
        overlap_ratio = overlap.overlap_ratio,
        grid_step_mm = overlap.grid_step_mm,
        "layered spiral overlap"
    );

    Ok(LayeredSpiral{
        layer_mode: policy.mode_idx(),
        top_segments,
        bottom_segments,
        via_points,
        terminal_a: mask.polyline[0],
        terminal_b: mask.polyline[mask.polyline.len() - 1],
        terminal_a_is_top: turn_is_top[0],
        terminal_b_is_top: turn_is_top[turns - 1],
        overlap,
    })
}

/// Route every spiral of a face with the same policy.
pub fn layer_spirals(masks: &[SpiralMask], policy: &LayerChoice) -> ProcResult<Vec<LayeredSpiral>> {
    masks.iter().map(|mask| layer_spiral(mask, policy)).collect()
}
