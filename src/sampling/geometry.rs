use serde::{Serialize, Deserialize};
use tracing::trace;

use crate::geo_2d::{Point2, Segment};
use crate::layering::{self, LayerChoice, LayeredSpiral};
use crate::sampling::{
    CoilInstanceSample,
    CopperLayer,
    Face,
    ModuleSample,
    Rejection,
};
use crate::spiral::{
    self,
    DdSplit,
    SpiralConstraints,
    SpiralMask,
    SpiralShape,
    SplitAxis,
};
use crate::validate::{
    detect_self_contact,
    topology_from_segments,
    ContactReport,
    TopologyReport,
};

/// Share of the module face usable by the coil, per in-plane direction.
pub const IN_PLANE_SCALE: f64 = 0.95;

/// In-plane (u, v) size of a module face available to a coil, in mm.
pub fn face_size_mm(face: Face, module: &ModuleSample) -> (f64, f64) {
    let (u, v) = match face {
        Face::PosX | Face::NegX => (module.outer_w_mm, module.outer_h_mm),
        Face::PosY | Face::NegY => (module.thickness_mm, module.outer_h_mm),
        Face::PosZ | Face::NegZ => (module.thickness_mm, module.outer_w_mm),
    };
    (u * IN_PLANE_SCALE, v * IN_PLANE_SCALE)
}

/// Layer mode actually routed: multi-layer modes need two copper layers on both the board and the trace.
pub fn effective_layer_mode(layer_mode_idx: i64, pcb_layer_count: i64, trace_layer_count: i64) -> i64 {
    match pcb_layer_count.min(trace_layer_count) >= 2 {
        true => layer_mode_idx,
        false => 0,
    }
}

/// Connection from the inner end of the first spiral to the outer end of the second.
/// Straight if the ends line up, otherwise an L through `(b.u, a.v)`.
pub fn dd_bridge(from: Point2, to: Point2) -> Vec<Segment> {
    if from.u == to.u || from.v == to.v {
        return vec![Segment::new(from, to, 0.0)];
    }
    let corner = Point2::new(to.u, from.v);
    vec![Segment::new(from, corner, 0.0), Segment::new(corner, to, 0.0)]
}

/// Everything built while checking one coil instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGeometry {
    pub face_u_mm: f64,
    pub face_v_mm: f64,
    pub effective_layer_mode: i64,
    pub masks: Vec<SpiralMask>,
    pub layered: Vec<LayeredSpiral>,
    pub bridge: Vec<Segment>,
    pub contact_top: Vec<ContactReport>,
    pub contact_bottom: Vec<ContactReport>,
    pub topology: TopologyReport,
}

fn build_masks(instance: &CoilInstanceSample, face_u_mm: f64, face_v_mm: f64) -> spiral::ProcResult<Vec<SpiralMask>> {
    let constraints = SpiralConstraints{
        edge_clearance_mm: instance.edge_clearance_mm,
        fill_scale: instance.fill_scale,
        pitch_duty: instance.pitch_duty,
        min_trace_width_mm: instance.min_trace_width_mm,
        min_trace_gap_mm: instance.min_trace_gap_mm,
    };
    constraints.check()?;

    let count = instance.spiral_count;
    if !(1..=2).contains(&count) {
        spiral::err_input(&format!("spiral count must be 1 or 2, got {count}"))?;
    }
    let count = count as usize;
    if count > instance.spiral_turns.len()
        || count > instance.spiral_direction_idx.len()
        || count > instance.spiral_start_edge_idx.len()
    {
        spiral::err_input("per-spiral genes must cover every spiral")?;
    }
    let shapes = (0..count)
        .map(|i| SpiralShape::from_indices(
            instance.spiral_turns[i],
            instance.spiral_direction_idx[i],
            instance.spiral_start_edge_idx[i],
        ))
        .collect::<spiral::ProcResult<Vec<_>>>()?;

    let dd = match count {
        2 => Some(DdSplit{
            axis: SplitAxis::from_idx(instance.dd_split_axis_idx)?,
            gap_mm: instance.dd_gap_mm,
            ratio: instance.dd_split_ratio,
        }),
        _ => None,
    };
    spiral::build_spiral_masks(face_u_mm, face_v_mm, &shapes, &constraints, dd.as_ref())
}

fn route(instance: &CoilInstanceSample, masks: &[SpiralMask], layer_mode: i64) -> layering::ProcResult<Vec<LayeredSpiral>> {
    let policy = LayerChoice::from_mode(
        layer_mode,
        instance.radial_split_top_turn_fraction,
        instance.radial_split_outer_is_top,
    )?;
    layering::layer_spirals(masks, &policy)
}

/// Build and check the trace of one present instance.
/// Checks run in a fixed order and the first failure is returned.
pub fn build_instance_geometry(
    instance: &CoilInstanceSample,
    module: &ModuleSample,
    pcb_layer_count: i64,
) -> Result<InstanceGeometry, Rejection> {
    let (face_u_mm, face_v_mm) = face_size_mm(instance.face, module);
    let layer_mode = effective_layer_mode(instance.layer_mode_idx, pcb_layer_count, instance.trace_layer_count);

    let masks = build_masks(instance, face_u_mm, face_v_mm).map_err(|error| {
        trace!(instance = %instance.name, %error, "mask rejected");
        Rejection::GeometryInfeasible
    })?;

    let layered = route(instance, &masks, layer_mode).map_err(|error| {
        trace!(instance = %instance.name, %error, "layer assignment rejected");
        Rejection::LayerAssignment
    })?;

    let contact_check = |segments: &[Segment]| detect_self_contact(segments).map_err(|error| {
        trace!(instance = %instance.name, %error, "contact check rejected");
        Rejection::LayerAssignment
    });
    let contact_top = layered.iter()
        .map(|l| contact_check(&l.top_segments[..]))
        .collect::<Result<Vec<_>, _>>()?;
    if contact_top.iter().any(|r| r.detected) {
        return Err(Rejection::SelfContact(CopperLayer::Top));
    }
    let contact_bottom = layered.iter()
        .map(|l| contact_check(&l.bottom_segments[..]))
        .collect::<Result<Vec<_>, _>>()?;
    if contact_bottom.iter().any(|r| r.detected) {
        return Err(Rejection::SelfContact(CopperLayer::Bottom));
    }

    let bridge = match &layered[..] {
        [first, second] => dd_bridge(first.terminal_b, second.terminal_a),
        _ => Vec::new(),
    };
    let centerlines: Vec<Segment> = layered.iter()
        .flat_map(|l| l.segments())
        .chain(bridge.iter())
        .map(|s| s.with_width(0.0))
        .collect();
    let topology = topology_from_segments(&centerlines);
    topology.check().map_err(Rejection::TopologyInvalid)?;

    Ok(InstanceGeometry{
        face_u_mm,
        face_v_mm,
        effective_layer_mode: layer_mode,
        masks,
        layered,
        bridge,
        contact_top,
        contact_bottom,
        topology,
    })
}
