//! Output file writer.
//!
//! Each chain with a non-empty sequence produces two files in the output
//! directory:
//!
//! ```text
//! {structure_id}_{chain_id}_sequence.txt             raw sequence
//! {structure_id}_{chain_id}_secondary_structure.txt  three-line report
//! ```
//!
//! Existing files are overwritten.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{FoldResult, RnaSequence};

/// Paths of the two files written for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutputPaths {
    pub sequence: PathBuf,
    pub secondary_structure: PathBuf,
}

impl ChainOutputPaths {
    /// Builds the output paths for a chain of a structure.
    pub fn new(output_dir: &Path, structure_id: &str, chain_id: &str) -> Self {
        Self {
            sequence: output_dir.join(format!("{}_{}_sequence.txt", structure_id, chain_id)),
            secondary_structure: output_dir
                .join(format!("{}_{}_secondary_structure.txt", structure_id, chain_id)),
        }
    }
}

/// Formats the secondary structure report.
pub fn format_report(sequence: &str, fold: &FoldResult) -> String {
    format!(
        "Sequence: {}\nSecondary Structure: {}\nMFE: {:.2}\n",
        sequence, fold.structure, fold.mfe
    )
}

/// Creates the output directory (and parents) if needed.
pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))
}

/// Writes the raw sequence, without a trailing newline.
pub fn write_sequence(path: &Path, sequence: &RnaSequence) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(sequence.as_str().as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Writes the three-line secondary structure report.
pub fn write_report(path: &Path, sequence: &RnaSequence, fold: &FoldResult) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(format_report(sequence.as_str(), fold).as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let paths = ChainOutputPaths::new(Path::new("output"), "RNA_structure", "B");
        let out = Path::new("output");
        assert_eq!(paths.sequence, out.join("RNA_structure_B_sequence.txt"));
        assert_eq!(
            paths.secondary_structure,
            out.join("RNA_structure_B_secondary_structure.txt")
        );
    }

    #[test]
    fn test_format_report() {
        let fold = FoldResult::new("(((...)))", -1.2);
        let report = format_report("GGGAAACCC", &fold);
        assert_eq!(
            report,
            "Sequence: GGGAAACCC\nSecondary Structure: (((...)))\nMFE: -1.20\n"
        );
        assert_eq!(report.lines().count(), 3);
    }

    #[test]
    fn test_format_report_rounding() {
        let fold = FoldResult::new("..", 0.0);
        assert!(format_report("GC", &fold).ends_with("MFE: 0.00\n"));

        let fold = FoldResult::new("..", -7.468);
        assert!(format_report("GC", &fold).ends_with("MFE: -7.47\n"));
    }

    #[test]
    fn test_write_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");
        ensure_output_dir(&out).unwrap();
        // Idempotent
        ensure_output_dir(&out).unwrap();

        let paths = ChainOutputPaths::new(&out, "S", "A");
        let seq = RnaSequence::new("A", "GGGAAACCCC");
        let fold = FoldResult::new("((((..))))", -3.1);
        write_sequence(&paths.sequence, &seq).unwrap();
        write_report(&paths.secondary_structure, &seq, &fold).unwrap();

        // Shorter content replaces the old file entirely
        let seq = RnaSequence::new("A", "GGGAAACCC");
        let fold = FoldResult::new("(((...)))", -1.2);
        write_sequence(&paths.sequence, &seq).unwrap();
        write_report(&paths.secondary_structure, &seq, &fold).unwrap();

        assert_eq!(fs::read_to_string(&paths.sequence).unwrap(), "GGGAAACCC");
        assert_eq!(
            fs::read_to_string(&paths.secondary_structure).unwrap(),
            "Sequence: GGGAAACCC\nSecondary Structure: (((...)))\nMFE: -1.20\n"
        );
    }
}
