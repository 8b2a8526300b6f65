/*!
 * Seeded rejection sampling of coil designs.
 *
 * The design spec gives a range for every gene. A `RangeSampler` draws them in a fixed order,
 * each present instance is synthesized and checked, and the whole attempt is redrawn on the first
 * rejection. Rejections are counted per instance and reason.
 */

mod proc_errors;
mod range;
mod cfg;
mod rejection;
mod samples;
mod geometry;
mod sampler;

// Re-export errors
pub use proc_errors::{
    SamplingError,
    ProcResult,
    err_spec,
};
pub use range::{
    RangeRepr,
    RangeSpec,
    IntRangeSpec,
    RangeSampler,
    UNSET_SENTINEL,
};
pub use cfg::{
    DesignSpec,
    ModuleSpec,
    PcbSpec,
    CoilSpec,
    CoilInstanceSpec,
    Face,
    MAX_SPIRAL_COUNT,
    DEFAULT_MAX_INNER_PCB_COUNT,
};
pub use rejection::{
    CopperLayer,
    Rejection,
    RejectionHistogram,
};
pub use samples::{
    InnerPlaneAxis,
    CoilInstanceSample,
    FaceOccupancy,
    CoilSample,
    ModuleSample,
    DesignSample,
};
pub use geometry::{
    InstanceGeometry,
    build_instance_geometry,
    dd_bridge,
    effective_layer_mode,
    face_size_mm,
    IN_PLANE_SCALE,
};
pub use sampler::{
    sample_coil,
    sample_design,
    sample_module,
    mirror_spacing,
    MAX_ATTEMPTS,
};
