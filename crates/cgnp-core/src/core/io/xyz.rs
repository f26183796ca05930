use super::NM_TO_ANGSTROM;
use super::traits::{StructureFile, StructureFileError};
use crate::core::models::compound::Compound;
use std::io::Write;

/// Plain XYZ writer: bead count, a comment line, then `name x y z` per bead.
///
/// Bonds are not representable in XYZ and are dropped.
pub struct XyzFile;

impl StructureFile for XyzFile {
    type Error = StructureFileError;

    fn write_to(structure: &Compound, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.bead_count())?;
        writeln!(writer, "Coarse-grained nanoparticle generated by cgnp")?;
        for (_, bead) in structure.beads_iter() {
            let p = bead.position * NM_TO_ANGSTROM;
            writeln!(writer, "{:<5} {:>12.6} {:>12.6} {:>12.6}", bead.name, p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
