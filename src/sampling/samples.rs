use serde::{Serialize, Deserialize};

use crate::sampling::Face;

/// Orientation of the inner PCB stack behind a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnerPlaneAxis {
    Yz,
    Zx,
    Xy,
}
impl InnerPlaneAxis {
    pub fn from_idx(idx: i64) -> Option<Self> {
        match idx {
            0 => Some(InnerPlaneAxis::Yz),
            1 => Some(InnerPlaneAxis::Zx),
            2 => Some(InnerPlaneAxis::Xy),
            _ => None,
        }
    }
}

/// Every gene drawn for one coil instance in an accepted attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilInstanceSample {
    pub name: String,
    pub face: Face,
    pub present: bool,

    pub inner_plane_axis_idx: i64,
    pub inner_plane_axis: InnerPlaneAxis,
    pub inner_pcb_count: i64,
    pub inner_spacing_ratio_half: Vec<f64>,
    /// Mirrored spacing weights, zero padded to `max_inner_pcb_count + 1`.
    pub inner_spacing_ratio: Vec<f64>,

    pub min_trace_width_mm: f64,
    pub min_trace_gap_mm: f64,
    pub edge_clearance_mm: f64,
    pub fill_scale: f64,
    pub pitch_duty: f64,

    pub layer_mode_idx: i64,
    pub radial_split_top_turn_fraction: f64,
    pub radial_split_outer_is_top: bool,

    pub spiral_count: i64,
    pub spiral_turns: Vec<i64>,
    pub spiral_direction_idx: Vec<i64>,
    pub spiral_start_edge_idx: Vec<i64>,
    pub dd_split_axis_idx: i64,
    pub dd_gap_mm: f64,
    pub dd_split_ratio: f64,

    pub trace_layer_count: i64,
}

/// Which outer faces carry a present coil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceOccupancy {
    pub pos_x: bool,
    pub neg_x: bool,
    pub pos_y: bool,
    pub neg_y: bool,
    pub pos_z: bool,
    pub neg_z: bool,
}
impl FaceOccupancy {
    pub fn from_instances(instances: &[CoilInstanceSample]) -> Self {
        let mut occupancy = FaceOccupancy::default();
        for instance in instances.iter().filter(|i| i.present) {
            let flag = match instance.face {
                Face::PosX => &mut occupancy.pos_x,
                Face::NegX => &mut occupancy.neg_x,
                Face::PosY => &mut occupancy.pos_y,
                Face::NegY => &mut occupancy.neg_y,
                Face::PosZ => &mut occupancy.pos_z,
                Face::NegZ => &mut occupancy.neg_z,
            };
            *flag = true;
        }
        occupancy
    }
}

/// Accepted coil configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilSample {
    pub max_spiral_count: i64,
    pub max_inner_pcb_count: i64,
    pub instances: Vec<CoilInstanceSample>,
    pub outer_faces: FaceOccupancy,
    /// 1-based attempt that was accepted.
    pub attempts: usize,
}

/// Module outer dimensions, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleSample {
    pub outer_w_mm: f64,
    pub outer_h_mm: f64,
    pub thickness_mm: f64,
}

/// Top level output of a sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSample {
    pub seed: u64,
    pub module: ModuleSample,
    pub pcb_layer_count: i64,
    pub coil: CoilSample,
}
