//! Structure-to-secondary-structure pipeline.
//!
//! This module orchestrates one run:
//! - Load the structure file (missing or malformed input is reported, not raised)
//! - Extract the RNA sequence of every chain
//! - Fold each non-empty sequence
//! - Write the sequence and report files
//!
//! Folding and write errors abort the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, warn};

use crate::extract::extract_sequence;
use crate::fold::Folder;
use crate::formats::{load_structure, StructureError, StructureFormat};
use crate::model::{FoldResult, RnaSequence};
use crate::output::{ensure_output_dir, write_report, write_sequence, ChainOutputPaths};

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default structure identifier used in output file names.
pub const DEFAULT_STRUCTURE_ID: &str = "RNA_structure";

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory receiving the output files
    pub output_dir: PathBuf,
    /// Identifier used as the output file name prefix
    pub structure_id: String,
    /// Forced input format (`None` = auto-detect)
    pub format: Option<StructureFormat>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            structure_id: DEFAULT_STRUCTURE_ID.to_string(),
            format: None,
        }
    }
}

/// Result for a chain that was folded and written.
#[derive(Debug, Clone)]
pub struct ChainReport {
    pub sequence: RnaSequence,
    pub fold: FoldResult,
    pub paths: ChainOutputPaths,
}

/// What a completed run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub structure_id: String,
    /// Chains with output files, in file order
    pub written: Vec<ChainReport>,
    /// Chains without any canonical residue
    pub skipped: Vec<String>,
}

/// Processes one structure file.
///
/// Returns `Ok(None)` when the input is missing or cannot be parsed; the
/// problem is printed and nothing is written. Returns `Ok(Some(_))` once
/// every chain has been handled.
pub fn process_structure_file<F: Folder + ?Sized>(
    path: &Path,
    config: &RunConfig,
    folder: &F,
) -> Result<Option<RunSummary>> {
    let structure = match load_structure(path, config.format, &config.structure_id) {
        Ok(structure) => structure,
        Err(StructureError::NotFound(p)) => {
            eprintln!("Error: File not found at {}", p.display());
            return Ok(None);
        }
        Err(e) => {
            eprintln!("Error parsing {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    println!("Successfully parsed {}", path.display());
    println!("Structure ID: {}", structure.id);
    debug!("{} chains", structure.chain_count());

    ensure_output_dir(&config.output_dir)?;

    let mut summary = RunSummary {
        structure_id: structure.id.clone(),
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for chain in &structure.chains {
        println!("Processing chain {}...", chain.id);

        let sequence = extract_sequence(chain);
        if sequence.is_empty() {
            println!("No standard RNA sequence found for chain {}", chain.id);
            summary.skipped.push(chain.id.clone());
            continue;
        }

        if !seen.insert(chain.id.clone()) {
            warn!(
                "Chain id {} appears more than once; its output files will be overwritten",
                chain.id
            );
        }

        println!("Sequence: {}", sequence.as_str());

        let fold = folder.fold(sequence.as_str())?;
        println!("Secondary Structure: {} (MFE: {:.2})", fold.structure, fold.mfe);
        debug!("Chain {}: {} base pairs", chain.id, fold.pair_count());

        let paths = ChainOutputPaths::new(&config.output_dir, &structure.id, &chain.id);

        write_sequence(&paths.sequence, &sequence)?;
        println!("Sequence saved to {}", paths.sequence.display());

        write_report(&paths.secondary_structure, &sequence, &fold)?;
        println!(
            "Secondary structure and MFE saved to {}",
            paths.secondary_structure.display()
        );

        summary.written.push(ChainReport {
            sequence,
            fold,
            paths,
        });
    }

    Ok(Some(summary))
}
