/*!
 * Electrical checks on routed traces.
 *
 * - `detect_self_contact` finds same-layer legs whose copper touches without sharing a vertex.
 * - `topology_from_segments` checks that the trace is a single open path.
 */

mod contact;
mod topology;

pub use contact::{
    ContactReport,
    detect_self_contact,
    MAX_EXAMPLE_PAIRS,
};
pub use topology::{
    TopologyReport,
    TopologyFault,
    topology_from_segments,
};
