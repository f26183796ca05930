//! # Core Models Module
//!
//! Data structures used to represent coarse-grained structures.
//!
//! Every structural piece (a single bead with its ports, a chain, the core, the whole
//! nanoparticle) is a [`compound::Compound`]: a flat container of beads, attachment
//! ports, bonds and rigid-body labels. Larger structures are produced by fusing smaller
//! compounds together rather than by nesting them.
//!
//! - [`bead`] - Coarse-grained particle with a type tag and position
//! - [`port`] - Directional attachment point anchored at a bead
//! - [`topology`] - Bonds between beads
//! - [`compound`] - The container tying beads, ports and bonds together
//! - [`ids`] - Key types for beads and ports
//!
//! ```ignore
//! use cgnp::core::models::{bead::{Bead, BeadKind}, compound::Compound};
//! use nalgebra::Point3;
//!
//! let mut compound = Compound::new();
//! let id = compound.add_bead(Bead::new(BeadKind::Segment, Point3::origin()));
//! ```

pub mod bead;
pub mod compound;
pub mod ids;
pub mod port;
pub mod topology;
