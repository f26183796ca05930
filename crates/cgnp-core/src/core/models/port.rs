use super::ids::BeadId;
use nalgebra::{Isometry3, Point3, Unit, Vector3};

/// A directional attachment point marking an open bonding site.
///
/// A port is anchored at a bead and sits `separation` nanometers away from it along
/// `orientation`. Two ports are joined by rigidly moving one structure so that its
/// port coincides with, and faces, the other one (see
/// [`force_overlap`](crate::core::geometry::fuse::force_overlap)).
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    /// Label used to identify the port within its structure (e.g. "up", "port[3]").
    pub label: String,
    /// The bead this port belongs to.
    pub anchor: BeadId,
    /// Position of the port in nanometers.
    pub position: Point3<f64>,
    /// Unit vector pointing away from the anchor bead.
    pub orientation: Unit<Vector3<f64>>,
    /// Distance between the anchor bead and the port.
    pub separation: f64,
}

impl Port {
    /// Creates a port `separation` nanometers from `anchor_position` along `orientation`.
    pub fn new(
        label: &str,
        anchor: BeadId,
        anchor_position: &Point3<f64>,
        orientation: Unit<Vector3<f64>>,
        separation: f64,
    ) -> Self {
        Self {
            label: label.to_string(),
            anchor,
            position: anchor_position + orientation.into_inner() * separation,
            orientation,
            separation,
        }
    }

    /// Applies a rigid transform to the port's position and orientation.
    pub fn transform(&mut self, isometry: &Isometry3<f64>) {
        self.position = isometry * self.position;
        self.orientation = Unit::new_unchecked(isometry.rotation * self.orientation.into_inner());
    }
}
