pub mod geo_2d;
pub mod spiral;
pub mod layering;
pub mod validate;
pub mod sampling;
pub mod args;
pub mod io;
pub mod example;
mod crate_errors;

use serde::Serialize;
use tracing::info;

pub use crate_errors::{
    PcbCoilError,
    PcbCoilResult,
    err_str,
};

use crate::sampling::{
    build_instance_geometry,
    DesignSample,
    DesignSpec,
    Face,
    InstanceGeometry,
};

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "pcbcoil=info";

/// Install the global `tracing` subscriber, writing to stderr.
/// Filtering follows `RUST_LOG`, falling back to `DEFAULT_LOG_FILTER`.
pub fn init_logging(json: bool) -> PcbCoilResult<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr).with_target(true));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|error| PcbCoilError::StringOnly(format!("Failed to initialize logging: {}", error)))
}

/// Geometry of one present instance, rebuilt from its accepted genes.
#[derive(Debug, Serialize)]
pub struct InstanceDebug {
    pub name: String,
    pub face: Face,
    pub geometry: InstanceGeometry,
}

/// What the `sample` command writes.
#[derive(Debug, Serialize)]
pub struct SampleOutput {
    #[serde(flatten)]
    pub design: DesignSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_geometry: Option<Vec<InstanceDebug>>,
}

/// Rebuild the geometry of every present instance of an accepted design.
/// Rebuilding draws nothing from the random stream.
pub fn debug_geometry(design: &DesignSample) -> PcbCoilResult<Vec<InstanceDebug>> {
    let mut instances = Vec::new();
    for instance in design.coil.instances.iter().filter(|i| i.present) {
        let geometry = match build_instance_geometry(instance, &design.module, design.pcb_layer_count) {
            Ok(geometry) => geometry,
            Err(rejection) => return err_str(&format!(
                "accepted instance {} no longer builds: {}",
                instance.name, rejection,
            )),
        };
        instances.push(InstanceDebug{name: instance.name.clone(), face: instance.face, geometry});
    }
    Ok(instances)
}

/// Sample a design and optionally attach its debug geometry.
pub fn sample_output(spec: &DesignSpec, seed: u64, with_geometry: bool) -> PcbCoilResult<SampleOutput> {
    let design = sampling::sample_design(spec, seed)?;
    let debug_geometry = match with_geometry {
        true => Some(debug_geometry(&design)?),
        false => None,
    };
    Ok(SampleOutput{design, debug_geometry})
}

/// Run the `sample` command: load the spec, sample, then print or save the JSON.
pub fn run_sample(sample_args: &args::SampleArgs) -> PcbCoilResult<()> {
    info!(path = %sample_args.spec_path, "loading design spec");
    let spec = DesignSpec::from_cfg_file(&sample_args.spec_path)?;
    info!(seed = sample_args.seed, instances = spec.coil.instances.len(), "sampling design");

    let output = sample_output(&spec, sample_args.seed, sample_args.debug_geometry)?;
    match &sample_args.output_path {
        Some(output_path) => {
            io::write_json(output_path, &output)?;
            info!(path = %output_path, "design written");
        },
        None => println!("{}", io::to_json_string(&output)?),
    }
    Ok(())
}

/// Run the `example` command.
pub fn run_example(example_args: &args::ExampleArgs) -> PcbCoilResult<()> {
    println!("{}", example::example_config(example_args.format)?);
    Ok(())
}

/// Dispatch a parsed command line.
pub fn run(cli: args::PcbCoilCli) -> PcbCoilResult<()> {
    match cli.command {
        args::Command::Sample(sample_args) => run_sample(&sample_args),
        args::Command::Example(example_args) => run_example(&example_args),
    }
}

/// Top-level tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_geometry_covers_present_instances() {
        let spec = DesignSpec::default().validated().unwrap();
        let output = sample_output(&spec, 21, true).unwrap();
        let present = output.design.coil.instances.iter().filter(|i| i.present).count();
        let geometry = output.debug_geometry.as_ref().unwrap();
        assert_eq!(geometry.len(), present);
        assert!(geometry.iter().all(|g| g.geometry.topology.check().is_ok()));
    }

    #[test]
    fn output_is_flat_json() {
        let spec = DesignSpec::default().validated().unwrap();
        let output = sample_output(&spec, 21, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&io::to_json_string(&output).unwrap()).unwrap();
        assert_eq!(value["seed"], 21);
        assert!(value["coil"]["instances"].is_array());
        assert!(value.get("debug_geometry").is_none());
    }
}
