//! rnafold-cif - RNA secondary structure from 3D structure files
//!
//! Extracts RNA chain sequences from a structure file and folds them with
//! ViennaRNA's `RNAfold`.
//!
//! ## Usage
//!
//! ```bash
//! rnafold-cif 1c2w_B.cif
//! rnafold-cif -o results -s 1c2w 1c2w_B.cif
//! rnafold-cif -f pdb -T 25 structure.txt
//! ```
//!
//! ## Output
//!
//! For every chain with at least one A/U/G/C residue:
//! - `{id}_{chain}_sequence.txt`
//! - `{id}_{chain}_secondary_structure.txt`

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::debug;

use rnafold_cif::fold::{RnaFold, DEFAULT_RNAFOLD};
use rnafold_cif::formats::StructureFormat;
use rnafold_cif::pipeline::{
    process_structure_file, RunConfig, DEFAULT_OUTPUT_DIR, DEFAULT_STRUCTURE_ID,
};

/// Structure format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// mmCIF format
    Cif,
    /// PDB format
    Pdb,
    /// Auto-detect from extension and content
    Auto,
}

impl From<FormatArg> for Option<StructureFormat> {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Cif => Some(StructureFormat::Mmcif),
            FormatArg::Pdb => Some(StructureFormat::Pdb),
            FormatArg::Auto => None,
        }
    }
}

/// rnafold-cif - Predict RNA secondary structure from mmCIF/PDB files
///
/// Every chain with canonical ribonucleotides (A, U, G, C) is folded with
/// RNAfold; its sequence and a short report are written to the output directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Structure file (mmCIF or PDB format)
    file: PathBuf,

    /// Output directory (created if missing)
    #[arg(short = 'o', long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Force a specific file format (overrides auto-detection)
    #[arg(short = 'f', long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Structure identifier used to name output files
    #[arg(short = 's', long = "structure-id", default_value = DEFAULT_STRUCTURE_ID)]
    structure_id: String,

    /// RNAfold executable
    #[arg(long = "rnafold", default_value = DEFAULT_RNAFOLD)]
    rnafold: PathBuf,

    /// Folding temperature in degrees Celsius (RNAfold default: 37)
    #[arg(short = 'T', long = "temperature")]
    temperature: Option<f64>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();
    debug!("Debug mode enabled");

    if args.structure_id.trim().is_empty() {
        anyhow::bail!("Structure identifier must not be empty");
    }

    let folder = RnaFold::new(&args.rnafold).with_temperature(args.temperature);
    if let Err(e) = folder.probe() {
        debug!("Probe failed: {}", e);
        println!(
            "Required tool (RNAfold from ViennaRNA) is not installed or not runnable ({}). \
             Install it using 'conda install -c bioconda viennarna' or see \
             https://www.tbi.univie.ac.at/RNA/, or point --rnafold at the executable.",
            args.rnafold.display()
        );
        return Ok(());
    }

    let config = RunConfig {
        output_dir: args.output_dir,
        structure_id: args.structure_id,
        format: args.format.into(),
    };

    if let Some(summary) = process_structure_file(&args.file, &config, &folder)? {
        debug!(
            "{}: {} chains written, {} skipped",
            summary.structure_id,
            summary.written.len(),
            summary.skipped.len()
        );
    }

    Ok(())
}
