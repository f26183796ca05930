use cgnp::core::io::StructureFormat;
use cgnp::engine::config::CoreSizing;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Caroline <cjs323@lehigh.edu>",
    version,
    about = "CGNP - Build coarse-grained, alkane-coated spherical nanoparticles for molecular-dynamics simulations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a nanoparticle and write it to a structure file.
    Build(BuildArgs),
    /// Print the bead and chain counts a configuration would produce, without building.
    Inspect(InspectArgs),
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path for the output structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Output format. Inferred from the output extension when omitted, BGF otherwise.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Also write the build summary as TOML to this path.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    #[command(flatten)]
    pub geometry: GeometryArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,
}

/// Nanoparticle parameters shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GeometryArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Core radius in nanometers.
    #[arg(short, long, value_name = "NM")]
    pub radius: Option<f64>,

    /// Diameter of a core bead in nanometers.
    #[arg(short = 'd', long, value_name = "NM")]
    pub bead_diameter: Option<f64>,

    /// Alkane monomer units per chain; must be a multiple of three.
    #[arg(short = 'n', long, value_name = "INT")]
    pub chain_length: Option<usize>,

    /// Requested chains per square nanometer.
    #[arg(long, value_name = "FLOAT")]
    pub chain_density: Option<f64>,

    /// Policy deciding how many beads make up the core.
    #[arg(long, value_enum, value_name = "MODE")]
    pub sizing: Option<SizingArg>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S core.surface-density=0.3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingArg {
    /// Fixed number of beads per square nanometer.
    Area,
    /// Ratio of sphere surface to bead cross-section.
    Ratio,
}

impl From<SizingArg> for CoreSizing {
    fn from(arg: SizingArg) -> Self {
        match arg {
            SizingArg::Area => CoreSizing::AreaCoverage,
            SizingArg::Ratio => CoreSizing::AreaRatio,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Bgf,
    Xyz,
}

impl From<FormatArg> for StructureFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Bgf => StructureFormat::Bgf,
            FormatArg::Xyz => StructureFormat::Xyz,
        }
    }
}
