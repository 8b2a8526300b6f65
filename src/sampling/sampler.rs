use tracing::{debug, info, warn};

use crate::sampling::{
    build_instance_geometry,
    CoilInstanceSample,
    CoilInstanceSpec,
    CoilSample,
    CoilSpec,
    DesignSample,
    DesignSpec,
    FaceOccupancy,
    InnerPlaneAxis,
    ModuleSample,
    ModuleSpec,
    ProcResult,
    RangeSampler,
    Rejection,
    RejectionHistogram,
    SamplingError,
    err_spec,
};

/// Attempts made before sampling gives up.
pub const MAX_ATTEMPTS: usize = 2000;

/// Draw the module outer dimensions, width then height then thickness.
pub fn sample_module(module: &ModuleSpec, sampler: &mut RangeSampler) -> ModuleSample {
    let outer_w_mm = sampler.sample(&module.outer_w_mm);
    let outer_h_mm = sampler.sample(&module.outer_h_mm);
    let thickness_mm = sampler.sample(&module.thickness_mm);
    ModuleSample{outer_w_mm, outer_h_mm, thickness_mm}
}

/// Mirror the head of the half spacing profile into the weights of `gaps` gaps.
/// An odd gap count shares its middle weight.
pub fn mirror_spacing(half: &[f64], gaps: usize) -> Vec<f64> {
    let k = ((gaps + 1) / 2).min(half.len());
    let head = &half[..k];
    let mirrored = match gaps % 2 {
        1 => &head[..head.len().saturating_sub(1)],
        _ => head,
    };
    head.iter().chain(mirrored.iter().rev()).copied().collect()
}

enum InstanceDraw {
    Drawn(CoilInstanceSample),
    Rejected(Rejection),
}

/// Draw the genes of one instance in their fixed order.
fn draw_instance(coil: &CoilSpec, instance: &CoilInstanceSpec, sampler: &mut RangeSampler) -> ProcResult<InstanceDraw> {
    let present = sampler.sample_bool(&instance.present);

    let inner_plane_axis_idx = sampler.sample_int(&coil.inner_plane_axis_idx);
    let inner_plane_axis = match InnerPlaneAxis::from_idx(inner_plane_axis_idx) {
        Some(axis) => axis,
        None => return err_spec(&format!("invalid coil.inner_plane_axis_idx: {inner_plane_axis_idx}")),
    };

    let inner_pcb_count = sampler.sample_int(&coil.inner_pcb_count);
    if inner_pcb_count < 0 || inner_pcb_count > coil.max_inner_pcb_count {
        return Ok(InstanceDraw::Rejected(Rejection::InnerPcbCountOutOfRange));
    }

    let inner_spacing_ratio_half = sampler.sample_each(&coil.inner_spacing_ratio_half);
    let gaps = inner_pcb_count as usize + 1;
    let mut inner_spacing_ratio = mirror_spacing(&inner_spacing_ratio_half, gaps);
    if !(inner_spacing_ratio.iter().sum::<f64>() > 0.0) {
        return Ok(InstanceDraw::Rejected(Rejection::InnerSpacingSumNotPositive));
    }
    let padded_len = coil.max_inner_pcb_count as usize + 1;
    if inner_spacing_ratio.len() < padded_len {
        inner_spacing_ratio.resize(padded_len, 0.0);
    }

    // Field order is the draw order
    Ok(InstanceDraw::Drawn(CoilInstanceSample{
        name: instance.name.clone(),
        face: instance.face,
        present,
        inner_plane_axis_idx,
        inner_plane_axis,
        inner_pcb_count,
        inner_spacing_ratio_half,
        inner_spacing_ratio,
        min_trace_width_mm: sampler.sample(&coil.min_trace_width_mm),
        min_trace_gap_mm: sampler.sample(&coil.min_trace_gap_mm),
        edge_clearance_mm: sampler.sample(&coil.edge_clearance_mm),
        fill_scale: sampler.sample(&coil.fill_scale),
        pitch_duty: sampler.sample(&coil.pitch_duty),
        layer_mode_idx: sampler.sample_int(&coil.layer_mode_idx),
        radial_split_top_turn_fraction: sampler.sample(&coil.radial_split_top_turn_fraction),
        radial_split_outer_is_top: sampler.sample_bool(&coil.radial_split_outer_is_top),
        spiral_count: sampler.sample_int(&coil.spiral_count),
        spiral_turns: sampler.sample_int_each(&coil.spiral_turns),
        spiral_direction_idx: sampler.sample_int_each(&coil.spiral_direction_idx),
        spiral_start_edge_idx: sampler.sample_int_each(&coil.spiral_start_edge_idx),
        dd_split_axis_idx: sampler.sample_int(&coil.dd_split_axis_idx),
        dd_gap_mm: sampler.sample(&coil.dd_gap_mm),
        dd_split_ratio: sampler.sample(&coil.dd_split_ratio),
        trace_layer_count: sampler.sample_int(&coil.trace_layer_count),
    }))
}

enum AttemptOutcome {
    Accepted(Vec<CoilInstanceSample>),
    Rejected {
        instance: Option<String>,
        rejection: Rejection,
    },
}

/// One attempt over every instance, in declaration order.
/// The first rejection ends the attempt.
fn run_attempt(
    coil: &CoilSpec,
    module: &ModuleSample,
    pcb_layer_count: i64,
    sampler: &mut RangeSampler,
) -> ProcResult<AttemptOutcome> {
    let mut instances = Vec::with_capacity(coil.instances.len());
    for instance_spec in coil.instances.iter() {
        let rejected = |rejection| AttemptOutcome::Rejected{instance: Some(instance_spec.name.clone()), rejection};

        let instance = match draw_instance(coil, instance_spec, sampler)? {
            InstanceDraw::Drawn(instance) => instance,
            InstanceDraw::Rejected(rejection) => return Ok(rejected(rejection)),
        };
        if instance.present {
            if let Err(rejection) = build_instance_geometry(&instance, module, pcb_layer_count) {
                return Ok(rejected(rejection));
            }
        }
        instances.push(instance);
    }

    if !instances.iter().any(|i| i.present) {
        return Ok(AttemptOutcome::Rejected{instance: None, rejection: Rejection::NoInstancePresent});
    }
    Ok(AttemptOutcome::Accepted(instances))
}

/// Draw coil instances until an attempt passes every check.
/// Fails with `SamplingError::Exhausted` after `MAX_ATTEMPTS` rejected attempts.
pub fn sample_coil(
    coil: &CoilSpec,
    module: &ModuleSample,
    pcb_layer_count: i64,
    sampler: &mut RangeSampler,
) -> ProcResult<CoilSample> {
    let mut histogram = RejectionHistogram::default();

    for attempt in 1..=MAX_ATTEMPTS {
        match run_attempt(coil, module, pcb_layer_count, sampler)? {
            AttemptOutcome::Accepted(instances) => {
                let outer_faces = FaceOccupancy::from_instances(&instances);
                info!(
                    attempt,
                    present = instances.iter().filter(|i| i.present).count(),
                    rejected = histogram.total(),
                    "coil sample accepted"
                );
                return Ok(CoilSample{
                    max_spiral_count: coil.max_spiral_count,
                    max_inner_pcb_count: coil.max_inner_pcb_count,
                    instances,
                    outer_faces,
                    attempts: attempt,
                });
            },
            AttemptOutcome::Rejected{instance, rejection} => {
                debug!(attempt, instance = instance.as_deref().unwrap_or("-"), reason = rejection.reason(), "attempt rejected");
                histogram.record(instance.as_deref(), rejection);
            },
        }
    }

    warn!(attempts = MAX_ATTEMPTS, "coil sampling exhausted\n{}", histogram);
    Err(SamplingError::Exhausted{attempts: MAX_ATTEMPTS, histogram})
}

/// Sample a full design: module dimensions first, then the coil.
pub fn sample_design(spec: &DesignSpec, seed: u64) -> ProcResult<DesignSample> {
    let mut sampler = RangeSampler::new(seed);
    let module = sample_module(&spec.module, &mut sampler);
    debug!(
        outer_w_mm = module.outer_w_mm,
        outer_h_mm = module.outer_h_mm,
        thickness_mm = module.thickness_mm,
        "module sampled"
    );
    let coil = sample_coil(&spec.coil, &module, spec.pcb.layer_count, &mut sampler)?;
    Ok(DesignSample{
        seed,
        module,
        pcb_layer_count: spec.pcb.layer_count,
        coil,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{IntRangeSpec, RangeSpec};

    fn spec() -> DesignSpec {
        DesignSpec::default().validated().unwrap()
    }

    #[test]
    fn spacing_mirror() {
        let half = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mirror_spacing(&half, 1), vec![1.0]);
        assert_eq!(mirror_spacing(&half, 2), vec![1.0, 1.0]);
        assert_eq!(mirror_spacing(&half, 3), vec![1.0, 2.0, 1.0]);
        assert_eq!(mirror_spacing(&half, 4), vec![1.0, 2.0, 2.0, 1.0]);
        assert_eq!(mirror_spacing(&half, 9), vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn module_draw_order() {
        let module = ModuleSpec{
            outer_w_mm: RangeSpec::new(50.0, 150.0, 10.0),
            outer_h_mm: RangeSpec::fixed(80.0),
            thickness_mm: RangeSpec::new(5.0, 10.0, 1.0),
        };
        let mut sampler = RangeSampler::new(11);
        let sample = sample_module(&module, &mut sampler);
        assert_eq!(sampler.draws(), 2);
        assert_eq!(sample.outer_h_mm, 80.0);

        let mut by_hand = RangeSampler::new(11);
        assert_eq!(sample.outer_w_mm, by_hand.sample(&module.outer_w_mm));
        assert_eq!(sample.thickness_mm, by_hand.sample(&module.thickness_mm));
    }

    #[test]
    fn default_spec_samples() {
        let design = sample_design(&spec(), 599).unwrap();
        let coil = &design.coil;
        assert_eq!(coil.instances.len(), 2);
        assert!(coil.instances[0].present);
        assert!(coil.outer_faces.pos_x);
        assert!(!coil.outer_faces.pos_y);
        assert!(coil.attempts >= 1);
        for instance in &coil.instances {
            assert_eq!(instance.inner_spacing_ratio.len(), 9);
            assert_eq!(instance.spiral_turns.len(), 2);
        }
    }

    #[test]
    fn same_seed_same_design() {
        let a = sample_design(&spec(), 1234).unwrap();
        let b = sample_design(&spec(), 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unreachable_gap_exhausts_the_budget() {
        let mut spec = spec();
        spec.coil.min_trace_gap_mm = RangeSpec::fixed(50.0);
        match sample_design(&spec, 7) {
            Err(SamplingError::Exhausted{attempts, histogram}) => {
                assert_eq!(attempts, MAX_ATTEMPTS);
                assert_eq!(histogram.total(), MAX_ATTEMPTS);
                assert_eq!(histogram.get("front:mask_geometry_infeasible"), MAX_ATTEMPTS);
            },
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn nothing_present_is_rejected() {
        let mut spec = spec();
        for instance in spec.coil.instances.iter_mut() {
            instance.present = IntRangeSpec::fixed(0);
        }
        match sample_design(&spec, 3) {
            Err(SamplingError::Exhausted{histogram, ..}) => {
                assert_eq!(histogram.get("no_instance_present"), MAX_ATTEMPTS);
            },
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_axis_is_fatal() {
        let mut spec = spec();
        spec.coil.inner_plane_axis_idx = IntRangeSpec::fixed(5);
        assert!(matches!(sample_design(&spec, 3), Err(SamplingError::SpecError(_))));
    }

    #[test]
    fn inner_pcb_count_is_checked_against_its_bound() {
        let mut spec = spec();
        spec.coil.inner_pcb_count = IntRangeSpec::fixed(9);
        match sample_design(&spec, 3) {
            Err(SamplingError::Exhausted{histogram, ..}) => {
                assert_eq!(histogram.get("front:inner_pcb_count_out_of_range"), MAX_ATTEMPTS);
            },
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn zero_spacing_is_rejected() {
        let mut spec = spec();
        spec.coil.inner_pcb_count = IntRangeSpec::fixed(0);
        spec.coil.inner_spacing_ratio_half[0] = RangeSpec::fixed(0.0);
        match sample_design(&spec, 3) {
            Err(SamplingError::Exhausted{histogram, ..}) => {
                assert_eq!(histogram.get("front:inner_spacing_sum_not_positive"), MAX_ATTEMPTS);
            },
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }
}
