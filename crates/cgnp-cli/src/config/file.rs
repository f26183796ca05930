use crate::error::{CliError, Result};
use cgnp::engine::config::{CoatingPattern, CoreSizing};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileBondWindow {
    pub lower_offset: Option<f64>,
    pub upper_offset: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileCoreConfig {
    pub radius: Option<f64>,
    pub bead_diameter: Option<f64>,
    pub sizing: Option<CoreSizing>,
    pub surface_density: Option<f64>,
    pub bond_window: Option<FileBondWindow>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileChainConfig {
    pub chain_length: Option<usize>,
    pub segment_separation: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileCoatingConfig {
    pub chain_density: Option<f64>,
    pub pattern: Option<CoatingPattern>,
    pub backfill: Option<FileChainConfig>,
}

/// The TOML configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub core: Option<FileCoreConfig>,
    pub chain: Option<FileChainConfig>,
    pub coating: Option<FileCoatingConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
