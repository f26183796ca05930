//! Geometry routines used to construct coarse-grained structures.
//!
//! - [`sphere`] - Deterministic near-uniform point sampling on a sphere and the
//!   proximity-bond search between neighbouring surface beads
//! - [`transform`] - Rotation helpers for aligning direction vectors
//! - [`fuse`] - Rigid alignment of two ports followed by their removal

pub mod fuse;
pub mod sphere;
pub mod transform;
