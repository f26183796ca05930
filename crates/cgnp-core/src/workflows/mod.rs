//! # Workflows Module
//!
//! High-level entry points that turn a configuration into a finished nanoparticle.
//!
//! - **Assembly Workflow** ([`assemble`]) - Builds the core, fuses one chain onto each
//!   of its attachment points and labels the core as a rigid body.

pub mod assemble;
