use super::config::{ChainConfig, DEFAULT_SEGMENT_SEPARATION};
use super::error::{BuildError, MAX_BEADS, require_positive};
use crate::core::geometry::fuse::force_overlap;
use crate::core::models::bead::{Bead, BeadKind};
use crate::core::models::compound::Compound;
use crate::core::models::ids::PortId;
use crate::core::models::port::Port;
use nalgebra::{Point3, Unit, Vector3};
use tracing::trace;

/// Alkane monomer units represented by one coarse-grained bead.
pub const COARSE_GRAIN_RATIO: usize = 3;

pub const UP_PORT: &str = "up";
pub const DOWN_PORT: &str = "down";
pub const END_PORT: &str = "end";

/// A capped coarse-grained alkane chain with a single free attachment port.
#[derive(Debug, Clone)]
pub struct Chain {
    compound: Compound,
    free_port: PortId,
}

impl Chain {
    pub fn compound(&self) -> &Compound {
        &self.compound
    }

    /// The port by which the chain attaches to the core.
    pub fn free_port(&self) -> PortId {
        self.free_port
    }

    pub fn bead_count(&self) -> usize {
        self.compound.bead_count()
    }

    pub fn into_parts(self) -> (Compound, PortId) {
        (self.compound, self.free_port)
    }
}

/// Grows linear chains of segment beads terminated by one cap bead.
///
/// Chains are built along the +Y axis: each new segment's `up` port is fused onto the
/// current tail's `down` port, and the cap's `end` port closes the chain. The first
/// segment's `up` port is left free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainBuilder {
    chain_length: usize,
    segment_separation: f64,
}

impl ChainBuilder {
    pub fn new(chain_length: usize) -> Self {
        Self {
            chain_length,
            segment_separation: DEFAULT_SEGMENT_SEPARATION,
        }
    }

    pub fn with_segment_separation(mut self, separation: f64) -> Self {
        self.segment_separation = separation;
        self
    }

    pub fn from_config(config: &ChainConfig) -> Self {
        Self::new(config.chain_length).with_segment_separation(config.segment_separation)
    }

    pub fn chain_length(&self) -> usize {
        self.chain_length
    }

    pub fn segment_separation(&self) -> f64 {
        self.segment_separation
    }

    /// Number of beads a chain will contain, after validating the parameters.
    pub fn bead_count(&self) -> Result<usize, BuildError> {
        if self.chain_length == 0 || self.chain_length % COARSE_GRAIN_RATIO != 0 {
            return Err(BuildError::InvalidChainLength {
                chain_length: self.chain_length,
            });
        }
        require_positive("segment_separation", self.segment_separation)?;
        let count = self.chain_length / COARSE_GRAIN_RATIO;
        if count > MAX_BEADS {
            return Err(BuildError::TooManyBeads {
                requested: count as f64,
                limit: MAX_BEADS,
            });
        }
        Ok(count)
    }

    /// Builds one chain.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidChainLength`] before any bead is placed if the chain
    /// length is zero or not a multiple of three.
    pub fn build(&self) -> Result<Chain, BuildError> {
        let segments = self.bead_count()? - 1;
        let sep = self.segment_separation;

        if segments == 0 {
            let (compound, end) = cap_bead(sep)?;
            return Ok(Chain {
                compound,
                free_port: end,
            });
        }

        let (mut compound, free_port, mut tail_down) = segment_bead(sep)?;
        for _ in 1..segments {
            let (segment, up, down) = segment_bead(sep)?;
            let merged = force_overlap(&mut compound, segment, up, tail_down)?;
            tail_down = merged.ports[down];
        }

        let (cap, end) = cap_bead(sep)?;
        force_overlap(&mut compound, cap, end, tail_down)?;

        if compound.port_count() != 1 {
            return Err(BuildError::Internal(format!(
                "chain finished with {} free ports instead of one",
                compound.port_count()
            )));
        }
        trace!(beads = compound.bead_count(), "Chain successfully built.");

        Ok(Chain {
            compound,
            free_port,
        })
    }
}

/// A middle bead at the origin with `up` and `down` ports half a separation away.
fn segment_bead(separation: f64) -> Result<(Compound, PortId, PortId), BuildError> {
    let mut compound = Compound::new();
    let origin = Point3::origin();
    let bead = compound.add_bead(Bead::new(BeadKind::Segment, origin));
    let half = separation / 2.0;
    let up = compound
        .add_port(Port::new(UP_PORT, bead, &origin, Vector3::y_axis(), half))
        .ok_or_else(|| orphan_port(UP_PORT))?;
    let down = compound
        .add_port(Port::new(DOWN_PORT, bead, &origin, minus_y(), half))
        .ok_or_else(|| orphan_port(DOWN_PORT))?;
    Ok((compound, up, down))
}

/// A cap bead at the origin with a single `end` port half a separation above it.
fn cap_bead(separation: f64) -> Result<(Compound, PortId), BuildError> {
    let mut compound = Compound::new();
    let origin = Point3::origin();
    let bead = compound.add_bead(Bead::new(BeadKind::Cap, origin));
    let end = compound
        .add_port(Port::new(
            END_PORT,
            bead,
            &origin,
            Vector3::y_axis(),
            separation / 2.0,
        ))
        .ok_or_else(|| orphan_port(END_PORT))?;
    Ok((compound, end))
}

fn orphan_port(label: &str) -> BuildError {
    BuildError::Internal(format!("port '{}' has no anchor bead", label))
}

fn minus_y() -> Unit<Vector3<f64>> {
    Unit::new_unchecked(-Vector3::y())
}
