//! # Core Module
//!
//! Fundamental building blocks for coarse-grained nanoparticle construction.
//!
//! - **Structure Representation** ([`models`]) - Beads, ports, bonds and the generic
//!   [`Compound`](models::compound::Compound) container
//! - **Geometry** ([`geometry`]) - Sphere point sampling, rigid transforms and port fusion
//! - **File I/O** ([`io`]) - Writers for BGF and XYZ structure files

pub mod geometry;
pub mod io;
pub mod models;
