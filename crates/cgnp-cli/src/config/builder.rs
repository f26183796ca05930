use super::defaults::DefaultsConfig;
use super::file::{FileChainConfig, FileConfig};
use crate::cli::GeometryArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use cgnp::core::geometry::sphere::BondWindow;
use cgnp::engine::config::{ChainConfig, NanoparticleConfig, NanoparticleConfigBuilder};
use std::str::FromStr;
use tracing::debug;

/// Resolves the final build configuration.
///
/// Each parameter is taken from, in decreasing precedence: the explicit command-line
/// flag, a `--set` override, the config file, and finally [`DefaultsConfig`].
pub fn build_config(args: &GeometryArgs) -> Result<NanoparticleConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Configuration after --set overrides: {:?}", file_config);

    let core_file = file_config.core.take().unwrap_or_default();
    let chain_file = file_config.chain.take().unwrap_or_default();
    let coating_file = file_config.coating.take().unwrap_or_default();

    let window_file = core_file.bond_window.unwrap_or_default();
    let bond_window = BondWindow {
        lower_offset: window_file
            .lower_offset
            .unwrap_or(defaults.bond_window.lower_offset),
        upper_offset: window_file
            .upper_offset
            .unwrap_or(defaults.bond_window.upper_offset),
    };

    let backfill = coating_file
        .backfill
        .map(|file_val| merge_backfill(file_val, &defaults))
        .transpose()?;

    NanoparticleConfigBuilder::new()
        .radius(args.radius.or(core_file.radius).unwrap_or(defaults.radius))
        .bead_diameter(
            args.bead_diameter
                .or(core_file.bead_diameter)
                .unwrap_or(defaults.bead_diameter),
        )
        .sizing(
            args.sizing
                .map(Into::into)
                .or(core_file.sizing)
                .unwrap_or(defaults.sizing),
        )
        .surface_density(
            core_file
                .surface_density
                .unwrap_or(defaults.surface_density),
        )
        .bond_window(bond_window)
        .chain_length(
            args.chain_length
                .or(chain_file.chain_length)
                .unwrap_or(defaults.chain_length),
        )
        .segment_separation(
            chain_file
                .segment_separation
                .unwrap_or(defaults.segment_separation),
        )
        .chain_density(
            args.chain_density
                .or(coating_file.chain_density)
                .unwrap_or(defaults.chain_density),
        )
        .coating_pattern(coating_file.pattern.unwrap_or(defaults.pattern))
        .backfill(backfill)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn merge_backfill(file_val: FileChainConfig, defaults: &DefaultsConfig) -> Result<ChainConfig> {
    Ok(ChainConfig {
        chain_length: file_val.chain_length.ok_or_else(|| {
            CliError::Config("`coating.backfill` requires `chain-length`".to_string())
        })?,
        segment_separation: file_val
            .segment_separation
            .unwrap_or(defaults.segment_separation),
    })
}

fn parse<T>(key: &str, value: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parser::parse_value(key, value)
        .map(Some)
        .map_err(|e: ParseError| CliError::Config(e.to_string()))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for assignment in set_values {
        let (key, value) =
            parser::parse_assignment(assignment).map_err(|e| CliError::Argument(e.to_string()))?;

        match key {
            "core.radius" => {
                config.core.get_or_insert_with(Default::default).radius = parse(key, value)?;
            }
            "core.bead-diameter" => {
                config.core.get_or_insert_with(Default::default).bead_diameter =
                    parse(key, value)?;
            }
            "core.sizing" => {
                config.core.get_or_insert_with(Default::default).sizing = parse(key, value)?;
            }
            "core.surface-density" => {
                config.core.get_or_insert_with(Default::default).surface_density =
                    parse(key, value)?;
            }
            "core.bond-window.lower-offset" => {
                config
                    .core
                    .get_or_insert_with(Default::default)
                    .bond_window
                    .get_or_insert_with(Default::default)
                    .lower_offset = parse(key, value)?;
            }
            "core.bond-window.upper-offset" => {
                config
                    .core
                    .get_or_insert_with(Default::default)
                    .bond_window
                    .get_or_insert_with(Default::default)
                    .upper_offset = parse(key, value)?;
            }
            "chain.chain-length" => {
                config.chain.get_or_insert_with(Default::default).chain_length =
                    parse(key, value)?;
            }
            "chain.segment-separation" => {
                config
                    .chain
                    .get_or_insert_with(Default::default)
                    .segment_separation = parse(key, value)?;
            }
            "coating.chain-density" => {
                config
                    .coating
                    .get_or_insert_with(Default::default)
                    .chain_density = parse(key, value)?;
            }
            "coating.pattern" => {
                config.coating.get_or_insert_with(Default::default).pattern = parse(key, value)?;
            }
            "coating.backfill.chain-length" => {
                config
                    .coating
                    .get_or_insert_with(Default::default)
                    .backfill
                    .get_or_insert_with(Default::default)
                    .chain_length = parse(key, value)?;
            }
            "coating.backfill.segment-separation" => {
                config
                    .coating
                    .get_or_insert_with(Default::default)
                    .backfill
                    .get_or_insert_with(Default::default)
                    .segment_separation = parse(key, value)?;
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
