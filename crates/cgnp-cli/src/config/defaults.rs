use cgnp::core::geometry::sphere::{BondWindow, DEFAULT_SURFACE_DENSITY};
use cgnp::engine::config::{CoatingPattern, CoreSizing, DEFAULT_SEGMENT_SEPARATION};

/// Values used for every parameter that neither the config file nor the command line sets.
pub struct DefaultsConfig {
    pub radius: f64,
    pub bead_diameter: f64,
    pub sizing: CoreSizing,
    pub surface_density: f64,
    pub bond_window: BondWindow,
    pub chain_length: usize,
    pub segment_separation: f64,
    pub chain_density: f64,
    pub pattern: CoatingPattern,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            bead_diameter: 0.2,
            sizing: CoreSizing::AreaCoverage,
            surface_density: DEFAULT_SURFACE_DENSITY,
            bond_window: BondWindow::default(),
            chain_length: 12,
            segment_separation: DEFAULT_SEGMENT_SEPARATION,
            chain_density: 0.5,
            pattern: CoatingPattern::Isotropic,
        }
    }
}
