use serde::{Serialize, Deserialize};

use crate::geo_2d::{Rect, Segment};
use crate::layering::{LayeringError, ProcResult};

/// Smallest raster cell size, in mm.
pub const DEFAULT_GRID_STEP_MM: f64 = 2.0;
/// Upper bound on the raster cell count.
pub const MAX_GRID_CELLS: usize = 120_000;

/// Rasterized estimate of the copper overlap between the two layers.
/// Only used for diagnostics, so cell-center sampling is close enough.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct OverlapEstimate {
    pub top_area_mm2: f64,
    pub bottom_area_mm2: f64,
    pub overlap_area_mm2: f64,
    /// Overlap over the smaller layer area (0 if either layer is empty).
    pub overlap_ratio: f64,
    pub grid_step_mm: f64,
}
impl OverlapEstimate {
    fn empty() -> Self {
        OverlapEstimate{
            top_area_mm2: 0.0,
            bottom_area_mm2: 0.0,
            overlap_area_mm2: 0.0,
            overlap_ratio: 0.0,
            grid_step_mm: DEFAULT_GRID_STEP_MM,
        }
    }
}

fn footprints(segments: &[Segment]) -> ProcResult<Vec<Rect>> {
    segments.iter()
        .map(|s| s.padded_rect().ok_or_else(|| LayeringError::NonAxisAligned(format!("{} -> {}", s.a, s.b))))
        .collect()
}

/// Estimate the top/bottom copper areas and their overlap on a regular grid.
pub fn estimate_overlap(top: &[Segment], bottom: &[Segment]) -> ProcResult<OverlapEstimate> {
    let top_rects = footprints(top)?;
    let bottom_rects = footprints(bottom)?;

    let extent = match top_rects.iter().chain(bottom_rects.iter()).copied().reduce(|acc, r| acc.union(&r)) {
        Some(extent) => extent,
        None => return Ok(OverlapEstimate::empty()),
    };
    let span_u = extent.u_size();
    let span_v = extent.v_size();
    if span_u <= 0.0 || span_v <= 0.0 {
        return Ok(OverlapEstimate::empty());
    }

    let mut grid = DEFAULT_GRID_STEP_MM.max((span_u * span_v / MAX_GRID_CELLS as f64).sqrt());
    let nu = ((span_u / grid) as usize + 1).max(1);
    let nv = ((span_v / grid) as usize + 1).max(1);
    grid = grid.max(span_u / nu as f64).max(span_v / nv as f64);

    let hit = |rects: &[Rect], u: f64, v: f64| rects.iter().any(|r| r.contains(u, v));

    let (mut top_count, mut bottom_count, mut overlap_count) = (0usize, 0usize, 0usize);
    for iu in 0..nu {
        let u = extent.u_min + (iu as f64 + 0.5) * grid;
        for iv in 0..nv {
            let v = extent.v_min + (iv as f64 + 0.5) * grid;
            let in_top = hit(&top_rects, u, v);
            let in_bottom = hit(&bottom_rects, u, v);
            top_count += in_top as usize;
            bottom_count += in_bottom as usize;
            overlap_count += (in_top && in_bottom) as usize;
        }
    }

    let cell_area = grid * grid;
    let top_area = top_count as f64 * cell_area;
    let bottom_area = bottom_count as f64 * cell_area;
    let overlap_area = overlap_count as f64 * cell_area;
    let denom = top_area.min(bottom_area);

    Ok(OverlapEstimate{
        top_area_mm2: top_area,
        bottom_area_mm2: bottom_area,
        overlap_area_mm2: overlap_area,
        overlap_ratio: if denom > 0.0 { overlap_area / denom } else { 0.0 },
        grid_step_mm: grid,
    })
}
