//! # rnafold-cif - RNA secondary structure from 3D structure files
//!
//! Reads an mmCIF or PDB file, extracts the sequence of every RNA chain and
//! predicts its minimum free energy secondary structure with ViennaRNA's
//! `RNAfold`.
//!
//! ## Architecture
//!
//! The crate is a linear pipeline with one module per step:
//! - `model`: Structures, chains, residues, sequences and fold results
//! - `formats`: Structure file loading and format detection (via `pdbtbx`)
//! - `extract`: Canonical ribonucleotide filtering
//! - `fold`: `RNAfold` invocation behind the `Folder` trait
//! - `output`: Sequence and report files
//! - `pipeline`: Orchestration of a single run

pub mod extract;
pub mod fold;
pub mod formats;
pub mod model;
pub mod output;
pub mod pipeline;
