use crate::layering::policies::LayerPolicy;

/// Alternating routing: turn 0 on top, turn 1 below, and so on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlternateTurns;

impl LayerPolicy for AlternateTurns {
    fn get_policy_name(&self) -> &'static str {
        "Alternate Turns"
    }

    fn mode_idx(&self) -> i64 {
        2
    }

    fn assign_turns(&self, turns: usize) -> Vec<bool> {
        (0..turns).map(|turn| turn % 2 == 0).collect()
    }
}
