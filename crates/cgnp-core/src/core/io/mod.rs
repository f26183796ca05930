//! Writers for the structure file formats a finished nanoparticle can be saved in.
//!
//! Every writer implements [`traits::StructureFile`]. Coordinates are stored in
//! nanometers internally and written in ångströms.

pub mod bgf;
pub mod traits;
pub mod xyz;

use crate::core::models::compound::Compound;
use bgf::BgfFile;
use std::fmt;
use std::path::Path;
use traits::{StructureFile, StructureFileError};
use xyz::XyzFile;
use std::str::FromStr;
use thiserror::Error;

/// Conversion factor from nanometers to ångströms.
pub const NM_TO_ANGSTROM: f64 = 10.0;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StructureFormat {
    #[default]
    Bgf,
    Xyz,
}

impl StructureFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            StructureFormat::Bgf => "bgf",
            StructureFormat::Xyz => "xyz",
        }
    }

    /// Guesses the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

/// Writes `structure` to `path` in the given format.
pub fn write_structure<P: AsRef<Path>>(
    structure: &Compound,
    format: StructureFormat,
    path: P,
) -> Result<(), StructureFileError> {
    match format {
        StructureFormat::Bgf => BgfFile::write_to_path(structure, path),
        StructureFormat::Xyz => XyzFile::write_to_path(structure, path),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown structure format: '{0}' (expected 'bgf' or 'xyz')")]
pub struct ParseStructureFormatError(pub String);

impl FromStr for StructureFormat {
    type Err = ParseStructureFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bgf" => Ok(StructureFormat::Bgf),
            "xyz" => Ok(StructureFormat::Xyz),
            _ => Err(ParseStructureFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("BGF".parse::<StructureFormat>(), Ok(StructureFormat::Bgf));
        assert_eq!(" xyz ".parse::<StructureFormat>(), Ok(StructureFormat::Xyz));
        assert!("pdb".parse::<StructureFormat>().is_err());
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(
            StructureFormat::from_path(Path::new("out/np.XYZ")),
            Some(StructureFormat::Xyz)
        );
        assert_eq!(
            StructureFormat::from_path(Path::new("np.bgf")),
            Some(StructureFormat::Bgf)
        );
        assert_eq!(StructureFormat::from_path(Path::new("np")), None);
        assert_eq!(StructureFormat::from_path(Path::new("np.pdb")), None);
    }
}
