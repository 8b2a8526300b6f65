use crate::geo_2d::Rect;
use crate::spiral::{
    err_infeasible,
    err_input,
    DerivedSpiral,
    ProcResult,
    SpiralConstraints,
};

/// Number of relaxation passes between pitch and trace width.
/// Fixed (no tolerance check) so derived values are reproducible bit-for-bit.
pub const RELAXATION_PASSES: usize = 8;

/// Derive the pitch, trace width, trace gap and centerline bounds of a spiral
/// with `turns` turns on a `u_size_mm` x `v_size_mm` region centered on the origin.
pub fn derive_spiral(
    u_size_mm: f64,
    v_size_mm: f64,
    turns: usize,
    constraints: &SpiralConstraints,
) -> ProcResult<DerivedSpiral> {
    constraints.check()?;
    if turns == 0 {
        err_input("turns must be > 0")?;
    }
    if !(u_size_mm > 0.0 && v_size_mm > 0.0) {
        err_input(&format!("face sizes must be > 0 (got {u_size_mm} x {v_size_mm})"))?;
    }

    let clearance = constraints.edge_clearance_mm;
    let usable_u = u_size_mm - 2.0 * clearance;
    let usable_v = v_size_mm - 2.0 * clearance;
    let span = usable_u.min(usable_v);
    if span <= 0.0 {
        err_infeasible(&format!("usable span {span:.4} mm is not positive after edge clearance"))?;
    }

    let denom = 2.0 * turns as f64 + constraints.pitch_duty;
    let mut span_eff = span;
    let mut pitch = 0.0;
    let mut width = constraints.min_trace_width_mm;
    for _ in 0..RELAXATION_PASSES {
        if span_eff <= 0.0 {
            err_infeasible("effective span collapsed during relaxation")?;
        }
        pitch = constraints.fill_scale * span_eff / denom;
        if pitch <= 0.0 {
            err_infeasible("derived pitch is not positive")?;
        }
        width = constraints.min_trace_width_mm.max(constraints.pitch_duty * pitch);
        span_eff = span - width;
    }

    let gap = pitch - width;
    if gap < constraints.min_trace_gap_mm {
        err_infeasible(&format!(
            "derived trace gap {gap:.4} mm is below the minimum {:.4} mm",
            constraints.min_trace_gap_mm
        ))?;
    }

    let inset = clearance + 0.5 * width;
    let bounds = Rect::new(
        -0.5 * u_size_mm + inset,
        0.5 * u_size_mm - inset,
        -0.5 * v_size_mm + inset,
        0.5 * v_size_mm - inset,
    );
    if !bounds.is_valid() {
        err_infeasible("spiral bounds vanish after the trace width margin")?;
    }

    Ok(DerivedSpiral{
        bounds,
        pitch_mm: pitch,
        trace_width_mm: width,
        trace_gap_mm: gap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spiral::SpiralError;

    fn constraints(min_gap: f64) -> SpiralConstraints {
        SpiralConstraints{
            edge_clearance_mm: 1.0,
            fill_scale: 0.9,
            pitch_duty: 0.5,
            min_trace_width_mm: 0.2,
            min_trace_gap_mm: min_gap,
        }
    }

    #[test]
    fn square_face_three_turns() {
        let derived = derive_spiral(20.0, 20.0, 3, &constraints(0.0)).unwrap();
        assert!((derived.pitch_mm - 2.331).abs() < 1e-3);
        assert!((derived.trace_width_mm - 1.165).abs() < 1e-3);
        assert!((derived.trace_gap_mm - 1.165).abs() < 1e-3);
        assert!((derived.bounds.u_size() - 16.834).abs() < 1e-3);
        assert!((derived.bounds.v_size() - 16.834).abs() < 1e-3);
        assert!((derived.pitch_mm - (derived.trace_width_mm + derived.trace_gap_mm)).abs() < 1e-12);
    }

    #[test]
    fn relaxation_matches_unrolled_loop() {
        let c = constraints(0.0);
        let span: f64 = 18.0;
        let mut span_eff = span;
        let mut pitch = 0.0;
        let mut width = 0.0;
        for _ in 0..8 {
            pitch = c.fill_scale * span_eff / (2.0 * 3.0 + c.pitch_duty);
            width = c.min_trace_width_mm.max(c.pitch_duty * pitch);
            span_eff = span - width;
        }
        let derived = derive_spiral(20.0, 20.0, 3, &c).unwrap();
        assert_eq!(derived.pitch_mm.to_bits(), pitch.to_bits());
        assert_eq!(derived.trace_width_mm.to_bits(), width.to_bits());
    }

    #[test]
    fn width_floor_applies() {
        let mut c = constraints(0.0);
        c.min_trace_width_mm = 2.0;
        let derived = derive_spiral(20.0, 20.0, 3, &c).unwrap();
        assert_eq!(derived.trace_width_mm, 2.0);
        assert!(derived.trace_gap_mm >= 0.0);
    }

    #[test]
    fn gap_below_minimum_is_infeasible() {
        let result = derive_spiral(20.0, 20.0, 3, &constraints(5.0));
        assert!(matches!(result, Err(SpiralError::GeometryInfeasible(_))));
    }

    #[test]
    fn clearance_eats_face() {
        let mut c = constraints(0.0);
        c.edge_clearance_mm = 10.0;
        let result = derive_spiral(20.0, 40.0, 3, &c);
        assert!(matches!(result, Err(SpiralError::GeometryInfeasible(_))));
    }

    #[test]
    fn bad_inputs_rejected() {
        assert!(matches!(derive_spiral(20.0, 20.0, 0, &constraints(0.0)), Err(SpiralError::InvalidInput(_))));
        assert!(matches!(derive_spiral(-1.0, 20.0, 3, &constraints(0.0)), Err(SpiralError::InvalidInput(_))));
        let mut c = constraints(0.0);
        c.fill_scale = 1.5;
        assert!(matches!(derive_spiral(20.0, 20.0, 3, &c), Err(SpiralError::InvalidInput(_))));
    }

    #[test]
    fn rectangular_face_keeps_own_bounds() {
        let derived = derive_spiral(40.0, 20.0, 2, &constraints(0.0)).unwrap();
        let w = derived.trace_width_mm;
        assert!((derived.bounds.u_size() - (38.0 - w)).abs() < 1e-9);
        assert!((derived.bounds.v_size() - (18.0 - w)).abs() < 1e-9);
        assert_eq!(derived.bounds.u_center(), 0.0);
    }
}
