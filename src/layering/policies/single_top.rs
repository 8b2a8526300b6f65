use crate::layering::policies::LayerPolicy;

/// Single-layer routing: every turn on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleTop;

impl LayerPolicy for SingleTop {
    fn get_policy_name(&self) -> &'static str {
        "Single Layer Top"
    }

    fn mode_idx(&self) -> i64 {
        0
    }

    fn assign_turns(&self, turns: usize) -> Vec<bool> {
        vec![true; turns]
    }
}
