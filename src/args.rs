mod proc_errors;

use clap::{
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};
use strum::Display;

pub use proc_errors::{
    ArgError,
    ProcResult,
    err_str,
};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 599;

/// Randomized planar WPT coil synthesis and validation.
#[derive(Debug, Parser)]
#[command(version)]
pub struct PcbCoilCli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true)]
    /// Emit logs as JSON lines on stderr.
    pub json_logs: bool,
}

/// Subcommands of the pcbcoil binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(name = "sample")]
    /// Sample a valid coil design from a spec file and print it as JSON.
    Sample(SampleArgs),

    #[command(name = "example")]
    /// Print the built-in example spec.
    Example(ExampleArgs),
}

/// Arguments for the sample command.
#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Path to the design spec (.toml, .yaml, .yml or .json).
    pub spec_path: String,

    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    /// Seed of the random stream.
    pub seed: u64,

    #[arg(short, long = "output")]
    /// Write the JSON output to this file instead of stdout.
    pub output_path: Option<String>,

    #[arg(long)]
    /// Include the masks, layered spirals and check reports of every present instance.
    pub debug_geometry: bool,
}

/// Arguments for the example command.
#[derive(Debug, Args)]
pub struct ExampleArgs {
    #[arg(short, long, value_enum, default_value_t = Format::Toml)]
    /// Output format.
    pub format: Format,
}

/// Config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

/// Parse the command line arguments, exiting with usage on error.
pub fn parse_cli_args() -> PcbCoilCli {
    PcbCoilCli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        PcbCoilCli::command().debug_assert();
    }

    #[test]
    fn sample_defaults() {
        let cli = PcbCoilCli::try_parse_from(["pcbcoil", "sample", "spec.toml"]).unwrap();
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.spec_path, "spec.toml");
                assert_eq!(args.seed, DEFAULT_SEED);
                assert!(args.output_path.is_none());
                assert!(!args.debug_geometry);
            },
            other => panic!("unexpected command {:?}", other),
        }
        assert!(!cli.json_logs);
    }

    #[test]
    fn example_format() {
        let cli = PcbCoilCli::try_parse_from(["pcbcoil", "--json-logs", "example", "--format", "yaml"]).unwrap();
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Command::Example(ExampleArgs{format: Format::Yaml})));
    }
}
