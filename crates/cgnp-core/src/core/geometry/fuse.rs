use super::transform::{rigid_transform, rotation_to_align};
use crate::core::models::compound::{Compound, Merged};
use crate::core::models::ids::PortId;
use crate::core::models::port::Port;
use crate::core::models::topology::BondKind;
use nalgebra::Isometry3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FuseError {
    #[error("Port to move from is not a live port of the moving structure")]
    MissingMovingPort,
    #[error("Target port is not a live port of the target structure")]
    MissingTargetPort,
    #[error("Port '{label}' is anchored at a bead that is not part of its structure")]
    DanglingAnchor { label: String },
}

/// Rigid transform placing `from` on top of `to`, facing it.
///
/// After the transform the moving port sits at the target port's position and its
/// orientation is antiparallel to the target's.
pub fn port_alignment(from: &Port, to: &Port) -> Isometry3<f64> {
    let rotation = rotation_to_align(&from.orientation, &-to.orientation.into_inner());
    rigid_transform(&rotation, &from.position, &to.position)
}

/// Fuses `moving` onto `target` by overlapping two ports.
///
/// `moving` is rigidly transformed so that its port `from` coincides with the target's
/// port `to`, then absorbed into `target`. Both ports are consumed and the two anchor
/// beads are bonded. Returns the key mapping of the absorbed structure.
///
/// # Errors
///
/// Fails without modifying `target` if either port is not live in its structure or is
/// anchored at a bead its structure does not contain.
pub fn force_overlap(
    target: &mut Compound,
    mut moving: Compound,
    from: PortId,
    to: PortId,
) -> Result<Merged, FuseError> {
    let from_port = moving.port(from).ok_or(FuseError::MissingMovingPort)?;
    let to_port = target.port(to).ok_or(FuseError::MissingTargetPort)?;
    for (structure, port) in [(&moving, from_port), (&*target, to_port)] {
        if structure.bead(port.anchor).is_none() {
            return Err(FuseError::DanglingAnchor {
                label: port.label.clone(),
            });
        }
    }

    let isometry = port_alignment(from_port, to_port);
    moving.transform(&isometry);

    let from_port = moving
        .remove_port(from)
        .ok_or(FuseError::MissingMovingPort)?;
    let to_port = target.remove_port(to).ok_or(FuseError::MissingTargetPort)?;

    let merged = target.absorb(moving);
    let moved_anchor = merged
        .beads
        .get(from_port.anchor)
        .copied()
        .ok_or_else(|| FuseError::DanglingAnchor {
            label: from_port.label.clone(),
        })?;
    target
        .add_bond(to_port.anchor, moved_anchor, BondKind::Fused)
        .ok_or(FuseError::DanglingAnchor {
            label: to_port.label,
        })?;

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bead::{Bead, BeadKind};
    use crate::core::models::ids::BeadId;
    use nalgebra::{Point3, Unit, Vector3};

    fn single_bead(
        kind: BeadKind,
        label: &str,
        direction: Vector3<f64>,
        sep: f64,
    ) -> (Compound, BeadId, PortId) {
        let mut compound = Compound::new();
        let bead = compound.add_bead(Bead::new(kind, Point3::origin()));
        let port = compound
            .add_port(Port::new(
                label,
                bead,
                &Point3::origin(),
                Unit::new_normalize(direction),
                sep,
            ))
            .unwrap();
        (compound, bead, port)
    }

    #[test]
    fn port_alignment_makes_ports_coincide_and_face_each_other() {
        let (moving, _, from) = single_bead(BeadKind::Segment, "up", Vector3::y(), 0.15);
        let mut target = Compound::new();
        let anchor = target.add_bead(Bead::new(BeadKind::Core, Point3::new(3.0, 0.0, 4.0)));
        let to = target
            .add_port(Port::new(
                "port[0]",
                anchor,
                &Point3::new(3.0, 0.0, 4.0),
                Unit::new_normalize(Vector3::new(3.0, 0.0, 4.0)),
                1.0,
            ))
            .unwrap();

        let from_port = moving.port(from).unwrap();
        let to_port = target.port(to).unwrap();
        let isometry = port_alignment(from_port, to_port);

        let mut moved = from_port.clone();
        moved.transform(&isometry);
        assert!((moved.position - to_port.position).norm() < 1e-9);
        assert!((moved.orientation.into_inner() + to_port.orientation.into_inner()).norm() < 1e-9);
    }

    #[test]
    fn force_overlap_consumes_both_ports_and_bonds_anchors() {
        let (mut target, target_bead, down) =
            single_bead(BeadKind::Segment, "down", -Vector3::y(), 0.15);
        let (moving, moving_bead, up) = single_bead(BeadKind::Segment, "up", Vector3::y(), 0.15);

        let merged = force_overlap(&mut target, moving, up, down).unwrap();

        assert_eq!(target.bead_count(), 2);
        assert_eq!(target.port_count(), 0);
        let new_bead = merged.beads[moving_bead];
        assert_eq!(target.bonded_neighbors(target_bead).unwrap(), &[new_bead]);
        assert_eq!(target.bonds()[0].kind, BondKind::Fused);

        let position = target.bead(new_bead).unwrap().position;
        assert!((position - Point3::new(0.0, -0.3, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn force_overlap_flips_structures_facing_the_same_way() {
        let (mut target, _, to) = single_bead(BeadKind::Core, "port[0]", Vector3::x(), 1.0);
        let (moving, moving_bead, from) = single_bead(BeadKind::Segment, "up", Vector3::x(), 0.5);

        let merged = force_overlap(&mut target, moving, from, to).unwrap();

        let position = target.bead(merged.beads[moving_bead]).unwrap().position;
        assert!((position - Point3::new(1.5, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn force_overlap_carries_remaining_ports_along() {
        let (mut target, _, to) = single_bead(BeadKind::Core, "port[0]", Vector3::z(), 1.0);
        let (mut moving, moving_bead, from) =
            single_bead(BeadKind::Segment, "up", Vector3::y(), 0.15);
        let down = moving
            .add_port(Port::new(
                "down",
                moving_bead,
                &Point3::origin(),
                Unit::new_normalize(-Vector3::y()),
                0.15,
            ))
            .unwrap();

        let merged = force_overlap(&mut target, moving, from, to).unwrap();

        assert_eq!(target.port_count(), 1);
        let carried = target.port(merged.ports[down]).unwrap();
        assert!((carried.orientation.into_inner() - Vector3::z()).norm() < 1e-9);
        assert!((carried.position - Point3::new(0.0, 0.0, 1.3)).norm() < 1e-9);
    }

    #[test]
    fn force_overlap_rejects_dead_ports() {
        let (mut target, _, to) = single_bead(BeadKind::Core, "port[0]", Vector3::z(), 1.0);
        let (moving, _, from) = single_bead(BeadKind::Segment, "up", Vector3::y(), 0.15);

        let _ = target.remove_port(to);
        let result = force_overlap(&mut target, moving, from, to);
        assert_eq!(result.unwrap_err(), FuseError::MissingTargetPort);
        assert_eq!(target.bead_count(), 1);
    }

    #[test]
    fn force_overlap_rejects_ports_with_dangling_anchors() {
        let (mut target, _, _) = single_bead(BeadKind::Core, "port[0]", Vector3::z(), 1.0);
        let foreign = BeadId::from(slotmap::KeyData::from_ffi(u64::MAX >> 1));
        let to = target.insert_port_unchecked(Port::new(
            "port[1]",
            foreign,
            &Point3::origin(),
            Vector3::z_axis(),
            1.0,
        ));
        let (moving, _, from) = single_bead(BeadKind::Segment, "up", Vector3::y(), 0.15);

        let err = force_overlap(&mut target, moving, from, to).unwrap_err();

        assert_eq!(
            err,
            FuseError::DanglingAnchor {
                label: "port[1]".to_string()
            }
        );
        assert_eq!(target.bead_count(), 1);
        assert_eq!(target.port_count(), 2);
        assert!(target.bonds().is_empty());
    }
}
