use serde::{Serialize, Deserialize};

use crate::layering::policies::LayerPolicy;

/// Radial routing: a band of `round(turns * top_turn_fraction)` turns (at least one) on top,
/// taken from the outside or the inside of the spiral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialSplit {
    pub top_turn_fraction: f64,
    pub outer_is_top: bool,
}
impl RadialSplit {
    /// Number of turns routed on top.
    pub fn top_turns(&self, turns: usize) -> usize {
        let rounded = (turns as f64 * self.top_turn_fraction).round_ties_even();
        let clamped = rounded.clamp(0.0, turns as f64) as usize;
        clamped.max(1)
    }
}

impl LayerPolicy for RadialSplit {
    fn get_policy_name(&self) -> &'static str {
        "Radial Split"
    }

    fn mode_idx(&self) -> i64 {
        1
    }

    fn assign_turns(&self, turns: usize) -> Vec<bool> {
        let top_turns = self.top_turns(turns);
        (0..turns)
            .map(|turn| match self.outer_is_top {
                true => turn < top_turns,
                false => turn + top_turns >= turns,
            })
            .collect()
    }
}
