//! Point sampling on the surface of the nanoparticle core.
//!
//! Two sizing policies decide how many core beads are placed on a sphere of radius
//! `R`:
//!
//! - **Area coverage**: `N = floor(ρ · 4πR²)`, a fixed number of beads per unit area
//!   (ρ = 0.2 nm⁻² by default).
//! - **Area ratio**: `N = floor((R / (d/2))²)`, the ratio of the sphere's surface to the
//!   cross-sectional area of a single bead of diameter `d`.
//!
//! The points themselves follow a golden-spiral lattice, which is deterministic for a
//! given `(R, N)` and close to uniform.

use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::{Point3, Unit, Vector3};
use serde::Serialize;
use std::f64::consts::PI;

/// Core beads per square nanometer used by the area-coverage policy.
pub const DEFAULT_SURFACE_DENSITY: f64 = 0.2;

/// Lower offset (nm) of the proximity-bond window around twice the bead diameter.
pub const DEFAULT_BOND_WINDOW_LOWER: f64 = -0.4;
/// Upper offset (nm) of the proximity-bond window around twice the bead diameter.
pub const DEFAULT_BOND_WINDOW_UPPER: f64 = 0.3;

/// Policy deciding how many beads populate the core surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingMode {
    /// A fixed number of beads per square nanometer of surface.
    AreaCoverage { density: f64 },
    /// The surface is tiled by non-overlapping bead footprints of the given diameter.
    AreaRatio { bead_diameter: f64 },
}

impl Default for SizingMode {
    fn default() -> Self {
        SizingMode::AreaCoverage {
            density: DEFAULT_SURFACE_DENSITY,
        }
    }
}

/// Distance window, relative to twice the bead diameter, inside which two core beads
/// are connected by a proximity bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BondWindow {
    pub lower_offset: f64,
    pub upper_offset: f64,
}

impl Default for BondWindow {
    fn default() -> Self {
        Self {
            lower_offset: DEFAULT_BOND_WINDOW_LOWER,
            upper_offset: DEFAULT_BOND_WINDOW_UPPER,
        }
    }
}

impl BondWindow {
    /// Returns the `[min, max]` bond distance for beads of `bead_diameter`.
    pub fn bounds(&self, bead_diameter: f64) -> (f64, f64) {
        let center = 2.0 * bead_diameter;
        (center + self.lower_offset, center + self.upper_offset)
    }
}

/// Generates the core bead positions on a sphere of a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePointGenerator {
    radius: f64,
    mode: SizingMode,
}

impl SpherePointGenerator {
    pub fn new(radius: f64, mode: SizingMode) -> Self {
        Self { radius, mode }
    }

    /// Unrounded number of points the sizing policy asks for.
    pub fn target_count(&self) -> f64 {
        match self.mode {
            SizingMode::AreaCoverage { density } => density * 4.0 * PI * self.radius.powi(2),
            SizingMode::AreaRatio { bead_diameter } => (self.radius / (bead_diameter / 2.0)).powi(2),
        }
    }

    /// Number of points the sizing policy yields for this radius.
    ///
    /// Degenerate inputs yield zero points. Returns `None` when the count does not fit
    /// in a `usize`.
    pub fn point_count(&self) -> Option<usize> {
        let count = self.target_count();
        if count.is_nan() || count <= 0.0 {
            Some(0)
        } else if count >= usize::MAX as f64 {
            None
        } else {
            Some(count.floor() as usize)
        }
    }

    /// Points on the sphere surface in lattice order, or `None` when
    /// [`point_count`](Self::point_count) overflows.
    pub fn points(&self) -> Option<Vec<Point3<f64>>> {
        let points = golden_spiral(self.point_count()?)
            .into_iter()
            .map(|dir| Point3::from(dir.into_inner() * self.radius))
            .collect();
        Some(points)
    }
}

/// `n` unit vectors arranged on a golden-spiral lattice.
///
/// The sphere is cut into `n` bands of equal height along z; one point sits in the
/// middle of each band and consecutive points advance in longitude by `2π/φ`.
pub fn golden_spiral(n: usize) -> Vec<Unit<Vector3<f64>>> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let longitude_increment = 2.0 * PI / phi;
    let dz = 2.0 / n as f64;

    (0..n)
        .map(|i| {
            let z = i as f64 * dz - 1.0 + dz / 2.0;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let azimuth = i as f64 * longitude_increment;
            Unit::new_normalize(Vector3::new(r * azimuth.cos(), r * azimuth.sin(), z))
        })
        .collect()
}

/// Index pairs `(i, j)` with `i < j` whose separation lies inside `[min, max]`.
pub fn proximity_pairs(points: &[Point3<f64>], min: f64, max: f64) -> Vec<(usize, usize)> {
    if points.is_empty() || max < 0.0 || max < min {
        return Vec::new();
    }

    let coords: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
    let kdtree: KdTree<f64, 3> = (&coords).into();
    let max_sq = max * max;
    let min_sq = min.max(0.0).powi(2);

    let mut pairs = Vec::new();
    for (i, query) in coords.iter().enumerate() {
        for neighbour in kdtree.within::<SquaredEuclidean>(query, max_sq) {
            let j = neighbour.item as usize;
            if j > i && neighbour.distance >= min_sq {
                pairs.push((i, j));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}
