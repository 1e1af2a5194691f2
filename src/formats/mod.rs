//! Structure file loader.
//!
//! Supports automatic format detection for:
//! - mmCIF (.cif, .mmcif)
//! - PDB (.pdb, .ent)
//!
//! Format detection priority:
//! 1. Explicit format specification (-f option)
//! 2. File extension
//! 3. Content-based detection
//!
//! Parsing itself is delegated to `pdbtbx`; this module only picks the
//! format and converts the result into the crate's own model.

use std::any::Any;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::panic;
use std::path::{Path, PathBuf};

use log::debug;
use pdbtbx::{Format, ReadOptions, StrictnessLevel, PDB};
use thiserror::Error;

use crate::model::{Chain, Residue, Structure};

/// Detected structure file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Mmcif,
    Pdb,
}

impl std::fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StructureFormat::Mmcif => write!(f, "mmCIF"),
            StructureFormat::Pdb => write!(f, "PDB"),
        }
    }
}

impl From<StructureFormat> for Format {
    fn from(format: StructureFormat) -> Self {
        match format {
            StructureFormat::Mmcif => Format::Mmcif,
            StructureFormat::Pdb => Format::Pdb,
        }
    }
}

/// Errors that can occur while loading a structure file.
#[derive(Error, Debug)]
pub enum StructureError {
    #[error("File not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("Could not determine structure format.\n\
             Hint: Use -f/--format to specify the format explicitly:\n  \
             rnafold-cif -f cif <file>   # mmCIF format\n  \
             rnafold-cif -f pdb <file>   # PDB format")]
    UnknownFormat,

    #[error("{0}")]
    Parse(String),
}

/// Result type for loading operations.
pub type StructureResult<T> = Result<T, StructureError>;

/// Detects format from file extension.
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<StructureFormat> {
    let ext = path.as_ref().extension().and_then(OsStr::to_str)?;
    match ext.to_lowercase().as_str() {
        "cif" | "mmcif" => Some(StructureFormat::Mmcif),
        "pdb" | "ent" => Some(StructureFormat::Pdb),
        _ => None,
    }
}

/// Detects the structure format by examining the content.
pub fn detect_format_from_content(content: &str) -> Option<StructureFormat> {
    for line in content.lines() {
        let trimmed = line.trim_end();
        if trimmed.trim_start().is_empty() {
            continue;
        }

        // mmCIF: leading comments are allowed before the data block
        if trimmed.starts_with('#') {
            continue;
        }
        if trimmed.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data_")) {
            return Some(StructureFormat::Mmcif);
        }

        // PDB: fixed-column record names
        const PDB_RECORDS: [&str; 6] = ["HEADER", "ATOM  ", "HETATM", "CRYST1", "MODEL ", "REMARK"];
        let padded = format!("{:<6}", trimmed);
        if PDB_RECORDS.iter().any(|r| padded.starts_with(r)) {
            return Some(StructureFormat::Pdb);
        }

        // First meaningful line doesn't match any known format
        return None;
    }

    None
}

/// Converts a parsed `pdbtbx` document into a `Structure`.
///
/// Only the first model is used. Residues without a name are kept with an
/// empty name so that residue order is preserved.
fn convert(pdb: &PDB, id: &str) -> Structure {
    let chains = pdb
        .models()
        .next()
        .into_iter()
        .flat_map(|model| model.chains())
        .map(|chain| {
            let residues = chain
                .residues()
                .map(|residue| Residue::new(residue.name().unwrap_or_default()))
                .collect();
            Chain::new(chain.id(), residues)
        })
        .collect();
    Structure::new(id, chains)
}

/// Extracts the message of a caught parser panic.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "parser panicked".to_string()
    }
}

/// Parses a file with a known format.
fn parse_with_format(path: &Path, format: StructureFormat, id: &str) -> StructureResult<Structure> {
    let path_str = path.to_string_lossy().into_owned();
    // pdbtbx panics on some malformed records instead of returning an error
    let read = panic::catch_unwind(|| {
        ReadOptions::default()
            .set_format(format.into())
            .set_level(StrictnessLevel::Loose)
            .read(path_str.as_str())
    })
    .map_err(|payload| StructureError::Parse(panic_message(payload.as_ref())))?;

    let (pdb, warnings) = read.map_err(|errors| {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        StructureError::Parse(message)
    })?;

    for warning in &warnings {
        debug!("{} parser warning: {}", format, warning);
    }
    if let Some(identifier) = &pdb.identifier {
        debug!("File identifier: {}", identifier);
    }

    Ok(convert(&pdb, id))
}

/// Loads a structure file with optional format specification.
///
/// `id` becomes the structure identifier used to name output files.
///
/// Detection priority:
/// 1. Explicit format (if provided)
/// 2. File extension
/// 3. Content-based detection
pub fn load_structure<P: AsRef<Path>>(
    path: P,
    forced_format: Option<StructureFormat>,
    id: &str,
) -> StructureResult<Structure> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StructureError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let file_size = file.metadata()?.len() as usize;

    if file_size == 0 {
        return Err(StructureError::EmptyFile);
    }

    let format = match forced_format.or_else(|| detect_format_from_extension(path)) {
        Some(format) => format,
        None => {
            let mut reader = BufReader::with_capacity(1024 * 1024, file);
            let mut content = String::with_capacity(file_size);
            reader.read_to_string(&mut content)?;
            detect_format_from_content(&content).ok_or(StructureError::UnknownFormat)?
        }
    };
    debug!("Reading {} as {}", path.display(), format);

    parse_with_format(path, format, id)
}
