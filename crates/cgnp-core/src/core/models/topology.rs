use super::ids::BeadId;
use std::fmt;

/// How a bond between two beads came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BondKind {
    /// Created when two ports were fused together.
    #[default]
    Fused,
    /// Created between core beads that sit within the proximity window of each other.
    Proximity,
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Fused => "Fused",
                Self::Proximity => "Proximity",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub bead1_id: BeadId, // ID of the first bead
    pub bead2_id: BeadId, // ID of the second bead
    pub kind: BondKind,
}

impl Bond {
    pub fn new(bead1_id: BeadId, bead2_id: BeadId, kind: BondKind) -> Self {
        Self {
            bead1_id,
            bead2_id,
            kind,
        }
    }
}
