use crate::core::models::compound::Compound;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

/// Defines the interface for serializing a bead structure to a file format.
pub trait StructureFile {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes `structure` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the structure's bonds refer to beads it
    /// does not contain.
    fn write_to(structure: &Compound, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes `structure` to a newly created file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(structure: &Compound, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(structure, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
