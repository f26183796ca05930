use nalgebra::{Isometry3, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};
use std::f64::consts::PI;

const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Returns the shortest rotation taking direction `from` onto direction `to`.
///
/// Unlike [`Rotation3::rotation_between`], antiparallel inputs are handled by a half
/// turn about an arbitrary axis perpendicular to `from`.
pub fn rotation_to_align(from: &Vector3<f64>, to: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::rotation_between(from, to).unwrap_or_else(|| {
        let axis = perpendicular(from);
        Rotation3::from_axis_angle(&axis, PI)
    })
}

/// Any unit vector perpendicular to `v`.
pub fn perpendicular(v: &Vector3<f64>) -> Unit<Vector3<f64>> {
    let candidate = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let axis = v.cross(&candidate);
    Unit::try_new(axis, PARALLEL_TOLERANCE).unwrap_or_else(Vector3::z_axis)
}

/// Builds the rigid transform that first applies `rotation` about the origin and then
/// moves the rotated `pivot` onto `destination`.
pub fn rigid_transform(
    rotation: &Rotation3<f64>,
    pivot: &Point3<f64>,
    destination: &Point3<f64>,
) -> Isometry3<f64> {
    let translation = destination - rotation * pivot;
    Isometry3::from_parts(
        Translation3::from(translation),
        UnitQuaternion::from_rotation_matrix(rotation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: &Vector3<f64>, b: &Vector3<f64>) {
        assert!((a - b).norm() < 1e-9, "expected {:?}, got {:?}", b, a);
    }

    #[test]
    fn rotation_to_align_maps_from_onto_to() {
        let from = Vector3::new(1.0, 2.0, -0.5).normalize();
        let to = Vector3::new(-0.3, 0.1, 0.9).normalize();
        let rotation = rotation_to_align(&from, &to);
        assert_vec_eq(&(rotation * from), &to);
    }

    #[test]
    fn rotation_to_align_handles_parallel_vectors() {
        let v = Vector3::new(0.0, 0.0, 1.0);
        let rotation = rotation_to_align(&v, &v);
        assert_vec_eq(&(rotation * v), &v);
    }

    #[test]
    fn rotation_to_align_handles_antiparallel_vectors() {
        for from in [Vector3::x(), Vector3::y(), Vector3::new(1.0, 1.0, 1.0).normalize()] {
            let to = -from;
            let rotation = rotation_to_align(&from, &to);
            assert_vec_eq(&(rotation * from), &to);
        }
    }

    #[test]
    fn perpendicular_is_orthogonal_unit_vector() {
        for v in [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(3.0, -2.0, 1.0)] {
            let p = perpendicular(&v);
            assert!(p.dot(&v).abs() < 1e-12);
            assert!((p.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn rigid_transform_moves_pivot_onto_destination() {
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), PI);
        let pivot = Point3::new(0.0, 1.0, 0.0);
        let destination = Point3::new(5.0, 5.0, 5.0);
        let isometry = rigid_transform(&rotation, &pivot, &destination);

        assert!((isometry * pivot - destination).norm() < 1e-9);
        let origin_image = isometry * Point3::origin();
        assert!((origin_image - Point3::new(5.0, 6.0, 5.0)).norm() < 1e-9);
    }
}
