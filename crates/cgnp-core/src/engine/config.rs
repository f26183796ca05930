use crate::core::geometry::sphere::{BondWindow, DEFAULT_SURFACE_DENSITY, SizingMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default distance between consecutive chain beads, in nanometers.
pub const DEFAULT_SEGMENT_SEPARATION: f64 = 0.30;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Which policy sizes the core; the numeric parameters live on [`CoreConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoreSizing {
    #[default]
    AreaCoverage,
    AreaRatio,
}

impl FromStr for CoreSizing {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "area" | "area-coverage" => Ok(CoreSizing::AreaCoverage),
            "ratio" | "area-ratio" => Ok(CoreSizing::AreaRatio),
            _ => Err(ParseOptionError {
                kind: "core sizing",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CoreSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoreSizing::AreaCoverage => "area-coverage",
            CoreSizing::AreaRatio => "area-ratio",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid {kind}: '{value}'")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
}

/// Arrangement of chains over the core surface. Only full isotropic coverage exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoatingPattern {
    #[default]
    Isotropic,
}

impl FromStr for CoatingPattern {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isotropic" => Ok(CoatingPattern::Isotropic),
            _ => Err(ParseOptionError {
                kind: "coating pattern",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoreConfig {
    /// Core radius in nanometers.
    pub radius: f64,
    /// Diameter of a coarse-grained core bead in nanometers.
    pub bead_diameter: f64,
    pub sizing: CoreSizing,
    /// Beads per square nanometer for [`CoreSizing::AreaCoverage`].
    pub surface_density: f64,
    /// Proximity-bond window for [`CoreSizing::AreaRatio`].
    pub bond_window: BondWindow,
}

impl CoreConfig {
    /// The sphere sizing policy described by this configuration.
    pub fn sizing_mode(&self) -> SizingMode {
        match self.sizing {
            CoreSizing::AreaCoverage => SizingMode::AreaCoverage {
                density: self.surface_density,
            },
            CoreSizing::AreaRatio => SizingMode::AreaRatio {
                bead_diameter: self.bead_diameter,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChainConfig {
    /// Number of alkane monomer units per chain; must be a multiple of three.
    pub chain_length: usize,
    /// Distance between consecutive chain beads in nanometers.
    pub segment_separation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CoatingConfig {
    /// Requested chains per square nanometer. Accepted but not used to size the coating.
    pub chain_density: f64,
    pub pattern: CoatingPattern,
    /// Second chain type for uncoated surface. Accepted but not applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backfill: Option<ChainConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NanoparticleConfig {
    pub core: CoreConfig,
    pub chain: ChainConfig,
    pub coating: CoatingConfig,
}

#[derive(Default)]
pub struct NanoparticleConfigBuilder {
    radius: Option<f64>,
    bead_diameter: Option<f64>,
    sizing: Option<CoreSizing>,
    surface_density: Option<f64>,
    bond_window: Option<BondWindow>,
    chain_length: Option<usize>,
    segment_separation: Option<f64>,
    chain_density: Option<f64>,
    pattern: Option<CoatingPattern>,
    backfill: Option<ChainConfig>,
}

impl NanoparticleConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    pub fn bead_diameter(mut self, diameter: f64) -> Self {
        self.bead_diameter = Some(diameter);
        self
    }
    pub fn sizing(mut self, sizing: CoreSizing) -> Self {
        self.sizing = Some(sizing);
        self
    }
    pub fn surface_density(mut self, density: f64) -> Self {
        self.surface_density = Some(density);
        self
    }
    pub fn bond_window(mut self, window: BondWindow) -> Self {
        self.bond_window = Some(window);
        self
    }
    pub fn chain_length(mut self, length: usize) -> Self {
        self.chain_length = Some(length);
        self
    }
    pub fn segment_separation(mut self, separation: f64) -> Self {
        self.segment_separation = Some(separation);
        self
    }
    pub fn chain_density(mut self, density: f64) -> Self {
        self.chain_density = Some(density);
        self
    }
    pub fn coating_pattern(mut self, pattern: CoatingPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }
    pub fn backfill(mut self, backfill: Option<ChainConfig>) -> Self {
        self.backfill = backfill;
        self
    }

    /// Builds the configuration.
    ///
    /// `radius`, `bead_diameter`, `chain_length` and `chain_density` are required; the
    /// remaining parameters fall back to their defaults.
    pub fn build(self) -> Result<NanoparticleConfig, ConfigError> {
        let core = CoreConfig {
            radius: self.radius.ok_or(ConfigError::MissingParameter("radius"))?,
            bead_diameter: self
                .bead_diameter
                .ok_or(ConfigError::MissingParameter("bead_diameter"))?,
            sizing: self.sizing.unwrap_or_default(),
            surface_density: self.surface_density.unwrap_or(DEFAULT_SURFACE_DENSITY),
            bond_window: self.bond_window.unwrap_or_default(),
        };
        let chain = ChainConfig {
            chain_length: self
                .chain_length
                .ok_or(ConfigError::MissingParameter("chain_length"))?,
            segment_separation: self
                .segment_separation
                .unwrap_or(DEFAULT_SEGMENT_SEPARATION),
        };
        let coating = CoatingConfig {
            chain_density: self
                .chain_density
                .ok_or(ConfigError::MissingParameter("chain_density"))?,
            pattern: self.pattern.unwrap_or_default(),
            backfill: self.backfill,
        };
        Ok(NanoparticleConfig {
            core,
            chain,
            coating,
        })
    }
}
