use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter};

use crate::args;
use crate::sampling::{
    err_spec,
    IntRangeSpec,
    ProcResult,
    RangeSpec,
};

/// Number of spirals a face can carry.
pub const MAX_SPIRAL_COUNT: i64 = 2;
/// Default upper bound of inner PCBs stacked behind a face.
pub const DEFAULT_MAX_INNER_PCB_COUNT: i64 = 8;

/// Outer face of the module box a coil instance sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

/// Full search space of a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignSpec {
    #[serde(default)]
    pub module: ModuleSpec,
    #[serde(default)]
    pub pcb: PcbSpec,
    pub coil: CoilSpec,
}

/// Module outer dimension ranges, in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSpec {
    #[serde(default = "default_outer_mm")]
    pub outer_w_mm: RangeSpec,
    #[serde(default = "default_outer_mm")]
    pub outer_h_mm: RangeSpec,
    #[serde(default)]
    pub thickness_mm: RangeSpec,
}
impl Default for ModuleSpec {
    fn default() -> Self {
        ModuleSpec{
            outer_w_mm: default_outer_mm(),
            outer_h_mm: default_outer_mm(),
            thickness_mm: RangeSpec::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PcbSpec {
    #[serde(default = "default_layer_count")]
    pub layer_count: i64,
}
impl Default for PcbSpec {
    fn default() -> Self {
        PcbSpec{layer_count: default_layer_count()}
    }
}

/// A named coil placement on a module face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoilInstanceSpec {
    /// Blank names are replaced by `i{index}_{face}`.
    #[serde(default)]
    pub name: String,
    pub face: Face,
    pub present: IntRangeSpec,
}

/// Gene ranges shared by every coil instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoilSpec {
    pub min_trace_width_mm: RangeSpec,
    pub min_trace_gap_mm: RangeSpec,
    pub edge_clearance_mm: RangeSpec,
    pub fill_scale: RangeSpec,
    pub pitch_duty: RangeSpec,

    pub layer_mode_idx: IntRangeSpec,
    pub radial_split_top_turn_fraction: RangeSpec,
    pub radial_split_outer_is_top: IntRangeSpec,

    #[serde(default = "default_max_spiral_count")]
    pub max_spiral_count: i64,
    pub spiral_count: IntRangeSpec,
    pub spiral_turns: Vec<IntRangeSpec>,
    pub spiral_direction_idx: Vec<IntRangeSpec>,
    pub spiral_start_edge_idx: Vec<IntRangeSpec>,
    pub dd_split_axis_idx: IntRangeSpec,
    pub dd_gap_mm: RangeSpec,
    pub dd_split_ratio: RangeSpec,

    pub trace_layer_count: IntRangeSpec,
    pub inner_plane_axis_idx: IntRangeSpec,
    #[serde(default = "default_max_inner_pcb_count")]
    pub max_inner_pcb_count: i64,
    pub inner_pcb_count: IntRangeSpec,
    pub inner_spacing_ratio_half: Vec<RangeSpec>,

    pub instances: Vec<CoilInstanceSpec>,
}
impl CoilSpec {
    /// Length of `inner_spacing_ratio_half` for the current inner PCB bound.
    pub fn spacing_half_len(&self) -> usize {
        (((self.max_inner_pcb_count + 1) + 1) / 2).max(0) as usize
    }
}

impl DesignSpec {
    /// Load a design spec file (json, toml or yaml), name its instances and validate it.
    pub fn from_cfg_file(path: &str) -> args::ProcResult<Self> {
        let spec: DesignSpec = crate::io::read_cfg_file(path)?;
        Ok(spec.validated()?)
    }

    /// Fill in default instance names, then check every range against its allowed domain.
    pub fn validated(mut self) -> ProcResult<Self> {
        for (idx, instance) in self.coil.instances.iter_mut().enumerate() {
            let trimmed = instance.name.trim().to_string();
            instance.name = match trimmed.is_empty() {
                true => format!("i{}_{}", idx, instance.face),
                false => trimmed,
            };
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the spec. Instance names must already be filled in.
    pub fn validate(&self) -> ProcResult<()> {
        let module = &self.module;
        check_range("module.outer_w_mm", &module.outer_w_mm)?;
        check_range("module.outer_h_mm", &module.outer_h_mm)?;
        check_range("module.thickness_mm", &module.thickness_mm)?;

        if self.pcb.layer_count < 1 {
            err_spec("pcb.layer_count must be >= 1")?;
        }

        let coil = &self.coil;
        if coil.max_spiral_count != MAX_SPIRAL_COUNT {
            err_spec(&format!("coil.max_spiral_count must be {} (fixed)", MAX_SPIRAL_COUNT))?;
        }
        if coil.max_inner_pcb_count < 0 {
            err_spec("coil.max_inner_pcb_count must be >= 0")?;
        }
        if coil.instances.is_empty() {
            err_spec("coil.instances must be a non-empty list")?;
        }

        let mut seen_names = BTreeSet::new();
        for (idx, instance) in coil.instances.iter().enumerate() {
            if !is_identifier(&instance.name) {
                err_spec(&format!(
                    "coil.instances[{}].name must match [A-Za-z_][A-Za-z0-9_]*, got {:?}",
                    idx, instance.name,
                ))?;
            }
            if !seen_names.insert(instance.name.as_str()) {
                err_spec(&format!("coil.instances[{}].name must be unique, got duplicate {:?}", idx, instance.name))?;
            }
            IntCheck::flag().check(&format!("coil.instances[{}].present", idx), &instance.present)?;
        }

        let spiral_count = MAX_SPIRAL_COUNT as usize;
        check_len("coil.spiral_turns", coil.spiral_turns.len(), spiral_count)?;
        check_len("coil.spiral_direction_idx", coil.spiral_direction_idx.len(), spiral_count)?;
        check_len("coil.spiral_start_edge_idx", coil.spiral_start_edge_idx.len(), spiral_count)?;
        check_len("coil.inner_spacing_ratio_half", coil.inner_spacing_ratio_half.len(), coil.spacing_half_len())?;

        check_range("coil.min_trace_width_mm", &coil.min_trace_width_mm)?;
        if !(coil.min_trace_width_mm.min > 0.0) {
            err_spec("coil.min_trace_width_mm.min must be > 0")?;
        }
        check_range("coil.min_trace_gap_mm", &coil.min_trace_gap_mm)?;
        if coil.min_trace_gap_mm.min < 0.0 {
            err_spec("coil.min_trace_gap_mm.min must be >= 0")?;
        }
        check_range("coil.edge_clearance_mm", &coil.edge_clearance_mm)?;
        if coil.edge_clearance_mm.min < 0.0 {
            err_spec("coil.edge_clearance_mm.min must be >= 0")?;
        }
        check_range("coil.fill_scale", &coil.fill_scale)?;
        if !(0.0 < coil.fill_scale.min && coil.fill_scale.max <= 1.0) {
            err_spec("coil.fill_scale must be within (0, 1]")?;
        }
        check_range("coil.pitch_duty", &coil.pitch_duty)?;
        if !(0.0 < coil.pitch_duty.min && coil.pitch_duty.max <= 1.0) {
            err_spec("coil.pitch_duty must be within (0, 1]")?;
        }

        IntCheck::unit_step().check("coil.layer_mode_idx", &coil.layer_mode_idx)?;
        check_range("coil.radial_split_top_turn_fraction", &coil.radial_split_top_turn_fraction)?;
        let fraction = &coil.radial_split_top_turn_fraction;
        if !(0.0 <= fraction.min && fraction.max <= 1.0) {
            err_spec("coil.radial_split_top_turn_fraction must be within [0, 1]")?;
        }
        IntCheck::flag().check("coil.radial_split_outer_is_top", &coil.radial_split_outer_is_top)?;

        IntCheck::between(1, coil.max_spiral_count).check("coil.spiral_count", &coil.spiral_count)?;
        for (idx, range) in coil.spiral_turns.iter().enumerate() {
            IntCheck{min_allowed: Some(1), ..IntCheck::unit_step()}.check(&format!("coil.spiral_turns[{}]", idx), range)?;
        }
        for (idx, range) in coil.spiral_direction_idx.iter().enumerate() {
            IntCheck::flag().check(&format!("coil.spiral_direction_idx[{}]", idx), range)?;
        }
        for (idx, range) in coil.spiral_start_edge_idx.iter().enumerate() {
            IntCheck::between(0, 3).check(&format!("coil.spiral_start_edge_idx[{}]", idx), range)?;
        }
        IntCheck::flag().check("coil.dd_split_axis_idx", &coil.dd_split_axis_idx)?;
        check_range("coil.dd_gap_mm", &coil.dd_gap_mm)?;
        check_range("coil.dd_split_ratio", &coil.dd_split_ratio)?;
        if !(0.0 < coil.dd_split_ratio.min && coil.dd_split_ratio.max < 1.0) {
            err_spec("coil.dd_split_ratio must be within (0, 1)")?;
        }

        IntCheck::between(1, 2).check("coil.trace_layer_count", &coil.trace_layer_count)?;
        IntCheck::between(0, 2).check("coil.inner_plane_axis_idx", &coil.inner_plane_axis_idx)?;
        IntCheck::between(0, coil.max_inner_pcb_count).check("coil.inner_pcb_count", &coil.inner_pcb_count)?;
        if let Some(first) = coil.inner_spacing_ratio_half.first() {
            if !(first.max > 0.0) {
                err_spec("coil.inner_spacing_ratio_half[0].max must be > 0")?;
            }
        }
        for (idx, range) in coil.inner_spacing_ratio_half.iter().enumerate() {
            check_range(&format!("coil.inner_spacing_ratio_half[{}]", idx), range)?;
        }

        Ok(())
    }
}

impl Default for DesignSpec {
    /// A feasible example: one coil always on +x, an optional one on -x.
    fn default() -> Self {
        DesignSpec{
            module: ModuleSpec{
                outer_w_mm: RangeSpec::fixed(100.0),
                outer_h_mm: RangeSpec::fixed(100.0),
                thickness_mm: RangeSpec::fixed(8.0),
            },
            pcb: PcbSpec{layer_count: 2},
            coil: CoilSpec{
                min_trace_width_mm: RangeSpec::new(0.2, 0.4, 0.1),
                min_trace_gap_mm: RangeSpec::new(0.1, 0.3, 0.1),
                edge_clearance_mm: RangeSpec::new(1.0, 3.0, 1.0),
                fill_scale: RangeSpec::new(0.7, 0.9, 0.1),
                pitch_duty: RangeSpec::new(0.4, 0.6, 0.1),
                layer_mode_idx: IntRangeSpec::new(0, 2, 1),
                radial_split_top_turn_fraction: RangeSpec::new(0.25, 0.75, 0.25),
                radial_split_outer_is_top: IntRangeSpec::new(0, 1, 1),
                max_spiral_count: MAX_SPIRAL_COUNT,
                spiral_count: IntRangeSpec::new(1, 2, 1),
                spiral_turns: vec![IntRangeSpec::new(3, 10, 1), IntRangeSpec::new(3, 10, 1)],
                spiral_direction_idx: vec![IntRangeSpec::new(0, 1, 1), IntRangeSpec::new(0, 1, 1)],
                spiral_start_edge_idx: vec![IntRangeSpec::new(0, 3, 1), IntRangeSpec::new(0, 3, 1)],
                dd_split_axis_idx: IntRangeSpec::new(0, 1, 1),
                dd_gap_mm: RangeSpec::new(2.0, 6.0, 2.0),
                dd_split_ratio: RangeSpec::new(0.4, 0.6, 0.1),
                trace_layer_count: IntRangeSpec::new(1, 2, 1),
                inner_plane_axis_idx: IntRangeSpec::new(0, 2, 1),
                max_inner_pcb_count: DEFAULT_MAX_INNER_PCB_COUNT,
                inner_pcb_count: IntRangeSpec::new(0, 2, 1),
                inner_spacing_ratio_half: vec![
                    RangeSpec::new(0.5, 1.5, 0.5),
                    RangeSpec::new(0.5, 1.5, 0.5),
                    RangeSpec::fixed(1.0),
                    RangeSpec::fixed(1.0),
                    RangeSpec::fixed(1.0),
                ],
                instances: vec![
                    CoilInstanceSpec{name: "front".to_string(), face: Face::PosX, present: IntRangeSpec::fixed(1)},
                    CoilInstanceSpec{name: "back".to_string(), face: Face::NegX, present: IntRangeSpec::new(0, 1, 1)},
                ],
            },
        }
    }
}

//
// ----------------------------------
// Private helpers
//

fn default_outer_mm() -> RangeSpec {
    RangeSpec::fixed(100.0)
}

fn default_layer_count() -> i64 {
    2
}

fn default_max_spiral_count() -> i64 {
    MAX_SPIRAL_COUNT
}

fn default_max_inner_pcb_count() -> i64 {
    DEFAULT_MAX_INNER_PCB_COUNT
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

fn check_len(name: &str, len: usize, expected: usize) -> ProcResult<()> {
    if len != expected {
        err_spec(&format!("{} must have length {}, got {}", name, expected, len))?;
    }
    Ok(())
}

fn check_range(name: &str, range: &RangeSpec) -> ProcResult<()> {
    if range.min > range.max {
        err_spec(&format!("{} must satisfy min <= max", name))?;
    }
    if range.step < 0.0 {
        err_spec(&format!("{} must satisfy step >= 0", name))?;
    }
    Ok(())
}

/// Domain of an integer range.
struct IntCheck {
    unit_step: bool,
    min_allowed: Option<i64>,
    max_allowed: Option<i64>,
}
impl IntCheck {
    /// Step 0 or 1, any bounds.
    fn unit_step() -> Self {
        IntCheck{unit_step: true, min_allowed: None, max_allowed: None}
    }

    fn between(min: i64, max: i64) -> Self {
        IntCheck{unit_step: true, min_allowed: Some(min), max_allowed: Some(max)}
    }

    /// 0/1 valued.
    fn flag() -> Self {
        IntCheck::between(0, 1)
    }

    fn check(&self, name: &str, range: &IntRangeSpec) -> ProcResult<()> {
        if range.min > range.max {
            err_spec(&format!("{} must satisfy min <= max", name))?;
        }
        if range.step < 0 {
            err_spec(&format!("{} must satisfy step >= 0", name))?;
        }
        if self.unit_step && !(range.step == 0 || range.step == 1) {
            err_spec(&format!("{}.step must be one of {{0, 1}}", name))?;
        }
        if let Some(min_allowed) = self.min_allowed {
            if range.min < min_allowed {
                err_spec(&format!("{}.min must be >= {}", name, min_allowed))?;
            }
        }
        if let Some(max_allowed) = self.max_allowed {
            if range.max > max_allowed {
                err_spec(&format!("{}.max must be <= {}", name, max_allowed))?;
            }
        }
        Ok(())
    }
}
