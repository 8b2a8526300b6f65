use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::validate::TopologyFault;

/// Copper layer of a routed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopperLayer {
    Top,
    Bottom,
}

/// Why a candidate was thrown away.
/// These are expected outcomes of the retry loop, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InnerPcbCountOutOfRange,
    InnerSpacingSumNotPositive,
    GeometryInfeasible,
    LayerAssignment,
    SelfContact(CopperLayer),
    TopologyInvalid(TopologyFault),
    NoInstancePresent,
}
impl Rejection {
    /// Histogram reason string.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::InnerPcbCountOutOfRange => "inner_pcb_count_out_of_range",
            Rejection::InnerSpacingSumNotPositive => "inner_spacing_sum_not_positive",
            Rejection::GeometryInfeasible => "mask_geometry_infeasible",
            Rejection::LayerAssignment => "layer_assignment_infeasible",
            Rejection::SelfContact(CopperLayer::Top) => "self_contact_top",
            Rejection::SelfContact(CopperLayer::Bottom) => "self_contact_bottom",
            Rejection::TopologyInvalid(fault) => fault.reason(),
            Rejection::NoInstancePresent => "no_instance_present",
        }
    }
}
impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Rejection counts keyed by `"{instance}:{reason}"`, or the bare reason for whole-attempt rejections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RejectionHistogram(BTreeMap<String, usize>);
impl RejectionHistogram {
    /// Count one rejection.
    pub fn record(&mut self, instance: Option<&str>, rejection: Rejection) {
        let key = match instance {
            Some(name) => format!("{}:{}", name, rejection.reason()),
            None => rejection.reason().to_string(),
        };
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Total number of recorded rejections.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &usize)> + '_ {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl std::fmt::Display for RejectionHistogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "    (none)");
        }
        let lines: Vec<String> = self.0.iter().map(|(key, count)| format!("    {}: {}", key, count)).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
