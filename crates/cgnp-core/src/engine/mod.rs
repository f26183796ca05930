//! # Engine Module
//!
//! Builders that turn a [`config::NanoparticleConfig`] into the structural pieces of a
//! coarse-grained nanoparticle.
//!
//! ## Architecture
//!
//! - **Core** ([`core_builder`]) - Core beads on a sphere, each with an outward attachment point
//! - **Chains** ([`chain_builder`]) - Capped linear chains grown by port fusion
//! - **Configuration** ([`config`]) - Build parameters and their builder
//! - **Progress Monitoring** ([`progress`]) - Phase and task events for user feedback
//! - **Error Handling** ([`error`]) - Build errors shared by every stage
//!
//! The two builders are independent; the assembly workflow in
//! [`crate::workflows::assemble`] combines them.

pub mod chain_builder;
pub mod config;
pub mod core_builder;
pub mod error;
pub mod progress;
