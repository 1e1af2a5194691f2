//! Secondary structure prediction.
//!
//! Folding is delegated to ViennaRNA's `RNAfold`, run as a child process.
//! The sequence is written to its stdin and the minimum free energy
//! structure is read back from stdout:
//!
//! ```text
//! GGGAAACCC
//! (((...))) ( -1.20)
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;
use thiserror::Error;

use crate::model::FoldResult;

/// Default name of the folding program.
pub const DEFAULT_RNAFOLD: &str = "RNAfold";

/// Errors that can occur while folding.
#[derive(Error, Debug)]
pub enum FoldError {
    #[error("{program} is not available: {reason}")]
    Unavailable { program: String, reason: String },

    #[error("Failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Unexpected RNAfold output: {0}")]
    InvalidOutput(String),

    #[error("Structure length {structure} does not match sequence length {sequence}")]
    LengthMismatch { sequence: usize, structure: usize },
}

/// Result type for folding operations.
pub type FoldingResult<T> = Result<T, FoldError>;

/// A minimum free energy folding routine.
pub trait Folder {
    /// Folds an A/U/G/C sequence into a dot-bracket structure and its MFE.
    fn fold(&self, sequence: &str) -> FoldingResult<FoldResult>;
}

/// `RNAfold` invoked as a child process.
#[derive(Debug, Clone)]
pub struct RnaFold {
    program: PathBuf,
    temperature: Option<f64>,
}

impl Default for RnaFold {
    fn default() -> Self {
        Self::new(DEFAULT_RNAFOLD)
    }
}

impl RnaFold {
    /// Creates a folder running the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            temperature: None,
        }
    }

    /// Sets the folding temperature in degrees Celsius (`-T`).
    pub fn with_temperature(mut self, celsius: Option<f64>) -> Self {
        self.temperature = celsius;
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Checks that the program can be run, returning its version line.
    pub fn probe(&self) -> FoldingResult<String> {
        let unavailable = |reason: String| FoldError::Unavailable {
            program: self.program_name(),
            reason,
        };

        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| unavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(unavailable(format!("exited with status {}", output.status)));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Found {}", version);
        Ok(version)
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        // do not generate PostScript
        command.arg("--noPS");
        if let Some(celsius) = self.temperature {
            command.arg("-T").arg(celsius.to_string());
        }
        command
    }
}

impl Folder for RnaFold {
    fn fold(&self, sequence: &str) -> FoldingResult<FoldResult> {
        let io_err = |source: std::io::Error| FoldError::Io {
            program: self.program_name(),
            source,
        };

        debug!("Folding {} nt with {}", sequence.len(), self.program_name());
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(io_err)?;

        {
            // stdin is dropped at the end of this block so RNAfold sees EOF
            let mut stdin = child.stdin.take().ok_or_else(|| {
                io_err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "failed to open stdin",
                ))
            })?;
            stdin.write_all(sequence.as_bytes()).map_err(io_err)?;
            stdin.write_all(b"\n").map_err(io_err)?;
        }

        let output = child.wait_with_output().map_err(io_err)?;
        if !output.status.success() {
            return Err(FoldError::Failed {
                program: self.program_name(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_rnafold_output(sequence, &String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses `RNAfold` stdout for a single sequence.
///
/// The second non-empty line holds the structure followed by the energy in
/// parentheses. The structure must be as long as `sequence`.
pub fn parse_rnafold_output(sequence: &str, stdout: &str) -> FoldingResult<FoldResult> {
    let lines: Vec<&str> = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('>'))
        .collect();
    if lines.len() < 2 {
        return Err(FoldError::InvalidOutput(format!(
            "need at least 2 lines, got {:?}",
            stdout
        )));
    }

    let line = lines[1];
    let open = line
        .rfind('(')
        .filter(|&i| line.ends_with(')') && i > 0)
        .ok_or_else(|| FoldError::InvalidOutput(format!("no energy in {:?}", line)))?;

    let structure = line[..open].trim_end();
    let energy_str = line[open + 1..line.len() - 1].trim();
    let mfe: f64 = energy_str
        .parse()
        .map_err(|_| FoldError::InvalidOutput(format!("bad energy {:?}", energy_str)))?;

    if structure.len() != sequence.len() {
        return Err(FoldError::LengthMismatch {
            sequence: sequence.len(),
            structure: structure.len(),
        });
    }

    Ok(FoldResult::new(structure, mfe))
}
