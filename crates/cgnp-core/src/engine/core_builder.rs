use super::config::{CoreConfig, CoreSizing};
use super::error::{BuildError, MAX_BEADS, require_positive};
use crate::core::geometry::sphere::{SpherePointGenerator, proximity_pairs};
use crate::core::models::bead::{Bead, BeadKind};
use crate::core::models::compound::Compound;
use crate::core::models::ids::{BeadId, PortId};
use crate::core::models::port::Port;
use crate::core::models::topology::BondKind;
use nalgebra::Unit;
use tracing::{debug, info};

/// Port separation as a fraction of the core radius.
pub const PORT_SEPARATION_FRACTION: f64 = 0.2;

/// Label of the `i`-th core attachment point.
pub fn attachment_label(index: usize) -> String {
    format!("port[{}]", index)
}

/// The nanoparticle core: beads on a sphere, each carrying one outward port.
#[derive(Debug, Clone)]
pub struct Core {
    compound: Compound,
    beads: Vec<BeadId>,
    attachment_points: Vec<PortId>,
}

impl Core {
    pub fn compound(&self) -> &Compound {
        &self.compound
    }

    /// Core beads in lattice order.
    pub fn beads(&self) -> &[BeadId] {
        &self.beads
    }

    /// Attachment points in lattice order; `attachment_points()[i]` is anchored at `beads()[i]`.
    pub fn attachment_points(&self) -> &[PortId] {
        &self.attachment_points
    }

    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }

    pub fn into_parts(self) -> (Compound, Vec<PortId>) {
        (self.compound, self.attachment_points)
    }
}

fn sphere_generator(config: &CoreConfig) -> Result<SpherePointGenerator, BuildError> {
    require_positive("radius", config.radius)?;
    match config.sizing {
        CoreSizing::AreaCoverage => {
            require_positive("surface_density", config.surface_density)?;
        }
        CoreSizing::AreaRatio => {
            require_positive("bead_diameter", config.bead_diameter)?;
        }
    }
    Ok(SpherePointGenerator::new(config.radius, config.sizing_mode()))
}

fn checked_point_count(
    config: &CoreConfig,
    generator: &SpherePointGenerator,
) -> Result<usize, BuildError> {
    let count = generator
        .point_count()
        .filter(|&count| count <= MAX_BEADS)
        .ok_or_else(|| BuildError::TooManyBeads {
            requested: generator.target_count().floor(),
            limit: MAX_BEADS,
        })?;
    if count == 0 {
        return Err(BuildError::EmptyCore {
            radius: config.radius,
        });
    }
    Ok(count)
}

/// Number of core beads the configuration yields, without placing them.
pub fn core_bead_count(config: &CoreConfig) -> Result<usize, BuildError> {
    checked_point_count(config, &sphere_generator(config)?)
}

/// Places the core beads and their attachment points.
///
/// Every bead gets a port labeled `port[i]` pointing radially outward, `R/5` away from
/// the bead. In area-ratio mode, neighbouring beads whose distance falls inside the
/// configured bond window are additionally joined by proximity bonds.
///
/// # Errors
///
/// Returns [`BuildError::InvalidParameter`] for a non-positive radius or sizing
/// parameter, [`BuildError::EmptyCore`] when the sizing policy yields no beads and
/// [`BuildError::TooManyBeads`] when it yields more than [`MAX_BEADS`].
pub fn build_core(config: &CoreConfig) -> Result<Core, BuildError> {
    let generator = sphere_generator(config)?;
    let count = checked_point_count(config, &generator)?;
    let points = generator
        .points()
        .ok_or_else(|| BuildError::Internal(format!("{} core points could not be placed", count)))?;

    let separation = config.radius * PORT_SEPARATION_FRACTION;
    let mut compound = Compound::new();
    let mut beads = Vec::with_capacity(count);
    let mut attachment_points = Vec::with_capacity(count);

    for (i, position) in points.into_iter().enumerate() {
        let direction = Unit::new_normalize(position.coords);
        let bead = compound.add_bead(Bead::new(BeadKind::Core, position));
        let port = Port::new(
            &attachment_label(i),
            bead,
            &position,
            direction,
            separation,
        );
        let port_id = compound.add_port(port).ok_or_else(|| {
            BuildError::Internal(format!("core port {} lost its anchor bead", i))
        })?;
        beads.push(bead);
        attachment_points.push(port_id);
    }

    if config.sizing == CoreSizing::AreaRatio {
        let positions: Vec<_> = beads
            .iter()
            .filter_map(|&id| compound.bead(id).map(|b| b.position))
            .collect();
        let (min, max) = config.bond_window.bounds(config.bead_diameter);
        let pairs = proximity_pairs(&positions, min, max);
        for &(i, j) in &pairs {
            compound
                .add_bond(beads[i], beads[j], BondKind::Proximity)
                .ok_or_else(|| BuildError::Internal("proximity bond between missing beads".into()))?;
        }
        debug!(
            bonds = pairs.len(),
            kind = %BondKind::Proximity,
            min,
            max,
            "Connected neighbouring core beads."
        );
    }

    info!(
        beads = beads.len(),
        radius = config.radius,
        "Core successfully built."
    );

    Ok(Core {
        compound,
        beads,
        attachment_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::sphere::BondWindow;

    fn area_config(radius: f64) -> CoreConfig {
        CoreConfig {
            radius,
            bead_diameter: 0.2,
            sizing: CoreSizing::AreaCoverage,
            surface_density: 0.2,
            bond_window: BondWindow::default(),
        }
    }

    fn ratio_config(radius: f64, bead_diameter: f64) -> CoreConfig {
        CoreConfig {
            radius,
            bead_diameter,
            sizing: CoreSizing::AreaRatio,
            surface_density: 0.2,
            bond_window: BondWindow::default(),
        }
    }

    #[test]
    fn radius_ten_core_has_251_beads_and_ports() {
        let core = build_core(&area_config(10.0)).unwrap();
        assert_eq!(core.bead_count(), 251);
        assert_eq!(core.attachment_points().len(), 251);
        assert_eq!(core.compound().port_count(), 251);
        assert!(core.compound().bonds().is_empty());
    }

    #[test]
    fn ports_point_outward_at_a_fifth_of_the_radius() {
        let core = build_core(&area_config(5.0)).unwrap();
        for (i, (&bead_id, &port_id)) in core
            .beads()
            .iter()
            .zip(core.attachment_points())
            .enumerate()
        {
            let bead = core.compound().bead(bead_id).unwrap();
            let port = core.compound().port(port_id).unwrap();
            assert_eq!(bead.kind, BeadKind::Core);
            assert_eq!(port.anchor, bead_id);
            assert_eq!(port.label, attachment_label(i));
            assert!((bead.position.coords.norm() - 5.0).abs() < 1e-9);
            assert!((port.separation - 1.0).abs() < 1e-12);
            assert!((port.position.coords.norm() - 6.0).abs() < 1e-9);
            let radial = bead.position.coords.normalize();
            assert!((port.orientation.into_inner() - radial).norm() < 1e-9);
        }
    }

    #[test]
    fn ratio_mode_sizes_by_bead_footprint_and_adds_proximity_bonds() {
        let core = build_core(&ratio_config(2.5, 0.6)).unwrap();
        assert_eq!(core.bead_count(), 69);
        assert!(!core.compound().bonds().is_empty());

        let (min, max) = BondWindow::default().bounds(0.6);
        for bond in core.compound().bonds() {
            assert_eq!(bond.kind, BondKind::Proximity);
            let a = core.compound().bead(bond.bead1_id).unwrap().position;
            let b = core.compound().bead(bond.bead2_id).unwrap().position;
            let distance = (a - b).norm();
            assert!(distance >= min - 1e-9 && distance <= max + 1e-9);
        }
    }

    #[test]
    fn core_bead_count_matches_built_core() {
        let config = ratio_config(2.5, 0.6);
        assert_eq!(core_bead_count(&config).unwrap(), 69);
        assert_eq!(core_bead_count(&area_config(10.0)).unwrap(), 251);
    }

    #[test]
    fn tiny_core_is_reported_as_empty() {
        let err = build_core(&area_config(0.5)).unwrap_err();
        assert!(matches!(err, BuildError::EmptyCore { radius } if radius == 0.5));
    }

    #[test]
    fn oversized_core_is_rejected_before_placing_beads() {
        for config in [area_config(1e10), ratio_config(1e6, 0.2)] {
            let err = build_core(&config).unwrap_err();
            assert!(matches!(
                err,
                BuildError::TooManyBeads { requested, limit }
                    if requested > MAX_BEADS as f64 && limit == MAX_BEADS
            ));
            assert!(matches!(
                core_bead_count(&config),
                Err(BuildError::TooManyBeads { .. })
            ));
        }
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        let err = build_core(&area_config(-1.0)).unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameter { name: "radius", .. }));

        let err = build_core(&ratio_config(2.5, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidParameter {
                name: "bead_diameter",
                ..
            }
        ));

        let mut config = area_config(10.0);
        config.surface_density = f64::NAN;
        let err = build_core(&config).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidParameter {
                name: "surface_density",
                ..
            }
        ));
    }

    #[test]
    fn building_twice_gives_identical_positions() {
        let a = build_core(&area_config(3.0)).unwrap();
        let b = build_core(&area_config(3.0)).unwrap();
        let positions = |core: &Core| -> Vec<_> {
            core.beads()
                .iter()
                .map(|&id| core.compound().bead(id).unwrap().position)
                .collect()
        };
        assert_eq!(positions(&a), positions(&b));
    }
}
