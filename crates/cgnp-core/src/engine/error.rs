use thiserror::Error;

use super::config::ConfigError;
use crate::core::geometry::fuse::FuseError;

/// Largest number of beads a single nanoparticle may contain.
pub const MAX_BEADS: usize = 50_000_000;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(
        "Invalid chain length {chain_length}: due to the 3:1 coarse-grain ratio of the alkane chains, the chain length must be a positive multiple of three"
    )]
    InvalidChainLength { chain_length: usize },

    #[error("Invalid value {value} for '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Core of radius {radius} nm yields no beads under the selected sizing policy")]
    EmptyCore { radius: f64 },

    #[error("Nanoparticle would need {requested:e} beads, above the limit of {limit}")]
    TooManyBeads { requested: f64, limit: usize },

    #[error(
        "Attachment mismatch: the core exposes {attachment_points} attachment point(s) but {chains} chain(s) were fused"
    )]
    AttachmentMismatch {
        attachment_points: usize,
        chains: usize,
    },

    #[error("Assembly left {count} unconsumed attachment point(s)")]
    UnconsumedPorts { count: usize },

    #[error("Port fusion failed: {source}")]
    Fusion {
        #[from]
        source: FuseError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

/// Ensures `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, BuildError> {
    if !value.is_finite() {
        return Err(BuildError::InvalidParameter {
            name,
            value,
            reason: "must be a finite number",
        });
    }
    if value <= 0.0 {
        return Err(BuildError::InvalidParameter {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(value)
}
