//! # CGNP Core Library
//!
//! Builds coarse-grained, alkane-coated spherical nanoparticles for use in
//! molecular-dynamics simulations.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Compound`, `Bead`, `Port`),
//!   rigid-body geometry (sphere sampling, port alignment, fusion) and structure writers.
//!
//! - **[`engine`]: The Builders.** Configuration, error types, progress reporting and the
//!   two leaf builders: the sphere-shaped core and the capped coarse-grained alkane chain.
//!
//! - **[`workflows`]: The Public API.** Ties the builders together into the complete
//!   nanoparticle assembly procedure and returns the finished structure to the caller.

pub mod core;
pub mod engine;
pub mod workflows;
