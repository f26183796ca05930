use super::NM_TO_ANGSTROM;
use super::traits::{StructureFile, StructureFileError};
use crate::core::models::bead::Bead;
use crate::core::models::compound::Compound;
use crate::core::models::ids::BeadId;
use itertools::Itertools;
use slotmap::SecondaryMap;
use std::collections::BTreeMap;
use std::io::Write;

const HEADER: &[&str] = &[
    "BIOGRF  332",
    "DESCRP nanoparticle",
    "REMARK Generated by cgnp",
    "FORMAT ATOM   (a6,1x,i5,1x,a5,1x,a3,1x,a1,1x,a5,3f10.5,1x,a5,i3,i2,1x,f8.5)",
];
const CONECT_FORMAT: &str = "FORMAT CONECT (a6,12i6)";
/// Partners per `CONECT` record; the bead's own serial takes the first of the 12 fields.
const CONECT_PARTNERS_PER_LINE: usize = 11;

/// Residue name of the core unit.
pub const CORE_RESIDUE: &str = "COR";
/// Residue name of every chain unit.
pub const CHAIN_RESIDUE: &str = "CHN";

/// Biograf (BGF) writer: one `HETATM` record per bead followed by `CONECT` records.
///
/// Each structural unit becomes one residue: the core is residue 0 on chain `A`, chain
/// `i` is residue `i` on chain `B`.
pub struct BgfFile;

fn residue_of(bead: &Bead) -> (char, &'static str) {
    if bead.unit == 0 {
        ('A', CORE_RESIDUE)
    } else {
        ('B', CHAIN_RESIDUE)
    }
}

fn hetatm_line(serial: usize, bead: &Bead) -> String {
    let (chain_id, residue) = residue_of(bead);
    let position = bead.position * NM_TO_ANGSTROM;
    format!(
        "{:<6} {:>5} {:<5} {:>3} {:1} {:>5}{:>10.5}{:>10.5}{:>10.5} {:<5}{:>3}{:>2} {:>8.5}",
        "HETATM",
        serial,
        bead.name,
        residue,
        chain_id,
        bead.unit,
        position.x,
        position.y,
        position.z,
        bead.name,
        1,
        0,
        0.0
    )
}

impl StructureFile for BgfFile {
    type Error = StructureFileError;

    fn write_to(structure: &Compound, writer: &mut impl Write) -> Result<(), Self::Error> {
        for line in HEADER {
            writeln!(writer, "{}", line)?;
        }

        let mut serials: SecondaryMap<BeadId, usize> = SecondaryMap::new();
        for (index, (bead_id, bead)) in structure.beads_iter().enumerate() {
            let serial = index + 1;
            serials.insert(bead_id, serial);
            writeln!(writer, "{}", hetatm_line(serial, bead))?;
        }

        writeln!(writer, "{}", CONECT_FORMAT)?;
        let mut bond_map: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for bond in structure.bonds() {
            let lookup = |id: BeadId| {
                serials.get(id).copied().ok_or_else(|| {
                    StructureFileError::Inconsistency(format!(
                        "Bond refers to bead {:?} which is not part of the structure",
                        id
                    ))
                })
            };
            let s1 = lookup(bond.bead1_id)?;
            let s2 = lookup(bond.bead2_id)?;
            bond_map.entry(s1).or_default().push(s2);
            bond_map.entry(s2).or_default().push(s1);
        }
        for (serial, partners) in &bond_map {
            let partners: Vec<usize> = partners.iter().copied().sorted().collect();
            for chunk in partners.chunks(CONECT_PARTNERS_PER_LINE) {
                write!(writer, "CONECT{:>6}", serial)?;
                for partner in chunk {
                    write!(writer, "{:>6}", partner)?;
                }
                writeln!(writer)?;
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}
