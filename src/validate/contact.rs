use serde::{Serialize, Deserialize};

use crate::geo_2d::{Rect, Segment};
use crate::layering::{LayeringError, ProcResult};

/// Number of offending pairs kept in a report.
pub const MAX_EXAMPLE_PAIRS: usize = 30;

/// Self-contact findings for one layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ContactReport {
    pub detected: bool,
    pub pair_count: usize,
    /// First offending index pairs, `(i, j)` with `i < j` in lexicographic order.
    pub example_pairs: Vec<(usize, usize)>,
}

/// Check every pair of same-layer segments for copper contact.
/// Pairs sharing an endpoint are connected on purpose and skipped.
/// Touching footprints count as contact.
/// Fails on legs that are neither horizontal nor vertical.
pub fn detect_self_contact(segments: &[Segment]) -> ProcResult<ContactReport> {
    let footprints = segments.iter()
        .map(|s| s.padded_rect().ok_or_else(|| LayeringError::NonAxisAligned(format!("{} -> {}", s.a, s.b))))
        .collect::<ProcResult<Vec<Rect>>>()?;

    let mut report = ContactReport::default();
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if segments[i].shares_endpoint(&segments[j]) {
                continue;
            }
            if footprints[i].intersects(&footprints[j]) {
                report.pair_count += 1;
                if report.example_pairs.len() < MAX_EXAMPLE_PAIRS {
                    report.example_pairs.push((i, j));
                }
            }
        }
    }
    report.detected = report.pair_count > 0;
    Ok(report)
}
