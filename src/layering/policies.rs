/*!
 * Layer assignment policies.
 * Adding new policies should be done here.
 *
 * New policies need:
 * - A struct implementing `LayerPolicy`
 * - An enum variant containing that struct in `LayerChoice`
 * - A mode index, name and constructor in `LAYER_POLICY_CONSTRUCTION`
 *
 */

mod single_top;
mod radial_split;
mod alternate_turns;

use enum_dispatch::enum_dispatch;

use crate::layering;

pub use single_top::SingleTop;
pub use radial_split::RadialSplit;
pub use alternate_turns::AlternateTurns;

/// Layer policy trait.
/// Decides which copper layer each turn of a spiral is routed on.
#[enum_dispatch] // enum dispatch allows us to use the enum as a kind of trait object
pub trait LayerPolicy {
    /// Get the name of the policy.
    fn get_policy_name(&self) -> &'static str;

    /// Get the sampled mode index of the policy.
    fn mode_idx(&self) -> i64;

    /// Assign each turn (outermost first) to the top (`true`) or bottom (`false`) layer.
    fn assign_turns(&self, turns: usize) -> Vec<bool>;
}

/// Layer policies enum.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(LayerPolicy)]
pub enum LayerChoice {
    /// Every turn on the top layer.
    SingleTop(SingleTop),
    /// A contiguous band of turns on the top layer, the rest below.
    RadialSplit(RadialSplit),
    /// Even turns on top, odd turns below.
    AlternateTurns(AlternateTurns),
}

/// Policy construction array -- Laid out here for easy modification.
const LAYER_POLICY_CONSTRUCTION: &[LayerPolicyConstructor] = &[
    LayerPolicyConstructor{
        mode_idx: 0,
        name: "single_layer_top",
        constructor: |_, _| LayerChoice::SingleTop(SingleTop),
    },
    LayerPolicyConstructor{
        mode_idx: 1,
        name: "radial_split",
        constructor: |top_turn_fraction, outer_is_top| {
            LayerChoice::RadialSplit(RadialSplit{top_turn_fraction, outer_is_top})
        },
    },
    LayerPolicyConstructor{
        mode_idx: 2,
        name: "alternate_turns",
        constructor: |_, _| LayerChoice::AlternateTurns(AlternateTurns),
    },
];

//
// ----------------------------------
// Private functions and structs, no modifications needed
//      |
//      V
//

/// Policy constructor struct. Used to construct a policy from its sampled mode index.
struct LayerPolicyConstructor {
    mode_idx: i64,
    name: &'static str,
    constructor: fn(f64, bool) -> LayerChoice,
}

impl LayerChoice {
    /// Construct a layer policy from a sampled mode index and the radial split genes.
    pub fn from_mode(mode_idx: i64, top_turn_fraction: f64, outer_is_top: bool) -> layering::ProcResult<Self> {
        if !(0.0..=1.0).contains(&top_turn_fraction) {
            layering::err_str(&format!("radial split top turn fraction must be within [0, 1], got {top_turn_fraction}"))?;
        }
        for constructor in LAYER_POLICY_CONSTRUCTION.iter() {
            if constructor.mode_idx == mode_idx {
                return Ok((constructor.constructor)(top_turn_fraction, outer_is_top));
            }
        }

        let mut error_str = format!("Layer mode not found: {mode_idx}\n");
        error_str.push_str("Available modes:\n");
        for constructor in LAYER_POLICY_CONSTRUCTION.iter() {
            error_str.push_str(&format!("    {} ({})\n", constructor.mode_idx, constructor.name));
        }
        layering::err_str(&error_str)
    }
}
