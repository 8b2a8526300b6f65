use std::collections::{BTreeMap, BTreeSet};
use serde::{Serialize, Deserialize};

use crate::geo_2d::{PointKey, Segment};

/// Connectivity summary of a trace graph.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologyReport {
    pub component_count: usize,
    /// Vertices with exactly one neighbor.
    pub endpoint_count: usize,
    /// Any vertex with more than two neighbors.
    pub has_branch: bool,
}

/// Reason a trace graph is not a single open path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyFault {
    ComponentCount,
    EndpointCount,
    Branch,
}
impl TopologyFault {
    pub fn reason(&self) -> &'static str {
        match self {
            TopologyFault::ComponentCount => "topology_component_count",
            TopologyFault::EndpointCount => "topology_endpoint_count",
            TopologyFault::Branch => "topology_has_branch",
        }
    }
}
impl std::fmt::Display for TopologyFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl TopologyReport {
    /// Check for a single open path, reporting the first failing property.
    pub fn check(&self) -> Result<(), TopologyFault> {
        if self.component_count != 1 {
            return Err(TopologyFault::ComponentCount);
        }
        if self.endpoint_count != 2 {
            return Err(TopologyFault::EndpointCount);
        }
        if self.has_branch {
            return Err(TopologyFault::Branch);
        }
        Ok(())
    }
}

/// Build the vertex graph of the segments and summarize it.
/// Vertices are matched on rounded coordinates, repeated edges collapse.
pub fn topology_from_segments<'a, I>(segments: I) -> TopologyReport
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut neighbors: BTreeMap<PointKey, BTreeSet<PointKey>> = BTreeMap::new();
    for segment in segments {
        let [a, b] = segment.keys();
        // Zero-length legs add no vertex
        if a == b {
            continue;
        }
        neighbors.entry(a).or_default().insert(b);
        neighbors.entry(b).or_default().insert(a);
    }

    let mut visited: BTreeSet<PointKey> = BTreeSet::new();
    let mut component_count = 0;
    for start in neighbors.keys() {
        if visited.contains(start) {
            continue;
        }
        component_count += 1;
        let mut stack = vec![*start];
        visited.insert(*start);
        while let Some(node) = stack.pop() {
            for next in &neighbors[&node] {
                if visited.insert(*next) {
                    stack.push(*next);
                }
            }
        }
    }

    TopologyReport{
        component_count,
        endpoint_count: neighbors.values().filter(|n| n.len() == 1).count(),
        has_branch: neighbors.values().any(|n| n.len() > 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_2d::Point2;

    fn seg(u0: f64, v0: f64, u1: f64, v1: f64) -> Segment {
        Segment::new(Point2::new(u0, v0), Point2::new(u1, v1), 0.0)
    }

    #[test]
    fn empty_graph() {
        let report = topology_from_segments(std::iter::empty());
        assert_eq!(report, TopologyReport{component_count: 0, endpoint_count: 0, has_branch: false});
        assert_eq!(report.check(), Err(TopologyFault::ComponentCount));
    }

    #[test]
    fn three_chained_legs_form_a_path() {
        let segments = [seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0), seg(1.0, 1.0, 0.0, 1.0)];
        let report = topology_from_segments(&segments);
        assert_eq!(report, TopologyReport{component_count: 1, endpoint_count: 2, has_branch: false});
        assert!(report.check().is_ok());
    }

    #[test]
    fn closed_loop_has_no_endpoints() {
        let segments = [
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 1.0, 1.0),
            seg(1.0, 1.0, 0.0, 1.0),
            seg(0.0, 1.0, 0.0, 0.0),
        ];
        let report = topology_from_segments(&segments);
        assert_eq!(report.endpoint_count, 0);
        assert_eq!(report.check(), Err(TopologyFault::EndpointCount));
    }

    #[test]
    fn branch_is_reported_after_counts() {
        let segments = [seg(-1.0, 0.0, 0.0, 0.0), seg(0.0, 0.0, 1.0, 0.0), seg(0.0, 0.0, 0.0, 1.0)];
        let report = topology_from_segments(&segments);
        assert!(report.has_branch);
        assert_eq!(report.endpoint_count, 3);
        assert_eq!(report.check(), Err(TopologyFault::EndpointCount));
    }

    #[test]
    fn disconnected_pieces() {
        let segments = [seg(0.0, 0.0, 1.0, 0.0), seg(5.0, 0.0, 6.0, 0.0)];
        let report = topology_from_segments(&segments);
        assert_eq!(report.component_count, 2);
        assert_eq!(report.check(), Err(TopologyFault::ComponentCount));
    }

    #[test]
    fn duplicate_edges_and_self_loops_collapse() {
        let segments = [
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 0.0, 0.0),
            seg(1.0, 0.0, 1.0, 0.0),
            seg(1.0 + 1e-9, 0.0, 2.0, 0.0),
        ];
        let report = topology_from_segments(&segments);
        assert_eq!(report, TopologyReport{component_count: 1, endpoint_count: 2, has_branch: false});
    }

    #[test]
    fn stray_zero_length_leg_is_dropped() {
        let segments = [seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0), seg(5.0, 5.0, 5.0, 5.0)];
        let report = topology_from_segments(&segments);
        assert_eq!(report, TopologyReport{component_count: 1, endpoint_count: 2, has_branch: false});
        assert!(report.check().is_ok());

        let report = topology_from_segments(&[seg(5.0, 5.0, 5.0, 5.0)]);
        assert_eq!(report, TopologyReport::default());
    }
}
