use nalgebra::Point3;
use std::fmt;

/// The structural role of a coarse-grained bead.
///
/// Each bead in a nanoparticle is either part of the rigid core, a middle segment of
/// a coating chain, or the capping bead that terminates a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BeadKind {
    /// Silica core bead sitting on the nanoparticle surface.
    Core,
    /// Middle bead of an alkane chain, representing three CH2 units.
    Segment,
    /// Terminal bead of an alkane chain, representing the CH3-capped end.
    Cap,
}

impl BeadKind {
    /// Returns the conventional particle name used when writing structure files.
    pub fn particle_name(&self) -> &'static str {
        match self {
            BeadKind::Core => "_CGN",
            BeadKind::Segment => "_MMM",
            BeadKind::Cap => "_MME",
        }
    }
}

impl fmt::Display for BeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BeadKind::Core => "Core",
                BeadKind::Segment => "Segment",
                BeadKind::Cap => "Cap",
            }
        )
    }
}

/// A single coarse-grained particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Bead {
    /// Particle name written to structure files (e.g. "_CGN").
    pub name: String,
    /// Structural role of the bead.
    pub kind: BeadKind,
    /// Position in nanometers.
    pub position: Point3<f64>,
    /// Index of the structural unit the bead belongs to (core = 0, chains 1..=N).
    pub unit: usize,
    /// Rigid-body group, if the bead moves as part of a rigid unit.
    pub rigid_body: Option<usize>,
}

impl Bead {
    /// Creates a bead of the given kind at `position`, named after its kind.
    pub fn new(kind: BeadKind, position: Point3<f64>) -> Self {
        Self {
            name: kind.particle_name().to_string(),
            kind,
            position,
            unit: 0,
            rigid_body: None,
        }
    }
}
