//! Data model for structures, chains and fold results.
//!
//! This module contains the data structures used throughout the pipeline:
//! - Structures, chains and residues (as read from a structure file)
//! - Derived RNA sequences
//! - Fold results (dot-bracket structure + minimum free energy)
//!
//! Everything here is built once and never mutated afterwards.

/// A single residue (monomer) within a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    /// Residue name as found in the file (e.g. "A", "G", "PSU", "HOH")
    pub name: String,
}

impl Residue {
    /// Creates a new residue.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A polymer strand with its ordered residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Chain identifier (e.g. "A", "B")
    pub id: String,
    /// Residues in file order
    pub residues: Vec<Residue>,
}

impl Chain {
    /// Creates a new chain.
    pub fn new(id: impl Into<String>, residues: Vec<Residue>) -> Self {
        Self {
            id: id.into(),
            residues,
        }
    }

    /// Returns the number of residues.
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }
}

/// A parsed structure file.
#[derive(Debug, Clone)]
pub struct Structure {
    /// Identifier used to name output files
    pub id: String,
    /// Chains in file order
    pub chains: Vec<Chain>,
}

impl Structure {
    /// Creates a new structure.
    pub fn new(id: impl Into<String>, chains: Vec<Chain>) -> Self {
        Self {
            id: id.into(),
            chains,
        }
    }

    /// Returns the number of chains.
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }
}

/// RNA sequence derived from a chain, restricted to A/U/G/C.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnaSequence {
    /// Identifier of the chain the sequence was taken from
    pub chain_id: String,
    /// One-letter codes, in residue order
    pub data: String,
}

impl RnaSequence {
    /// Creates a new sequence.
    pub fn new(chain_id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            data: data.into(),
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no canonical residue was found.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the sequence as a string slice.
    pub fn as_str(&self) -> &str {
        &self.data
    }
}

/// Minimum free energy prediction for one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldResult {
    /// Dot-bracket notation, one character per sequence position
    pub structure: String,
    /// Minimum free energy in kcal/mol
    pub mfe: f64,
}

impl FoldResult {
    /// Creates a new fold result.
    pub fn new(structure: impl Into<String>, mfe: f64) -> Self {
        Self {
            structure: structure.into(),
            mfe,
        }
    }

    /// Returns the number of base pairs in the structure.
    pub fn pair_count(&self) -> usize {
        self.structure.bytes().filter(|&b| b == b'(').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_accessors() {
        let structure = Structure::new(
            "RNA_structure",
            vec![
                Chain::new("A", vec![Residue::new("G"), Residue::new("C")]),
                Chain::new("B", vec![]),
            ],
        );

        assert_eq!(structure.chain_count(), 2);
        assert_eq!(structure.chains[0].residue_count(), 2);
        assert_eq!(structure.chains[1].id, "B");
    }

    #[test]
    fn test_empty_sequence() {
        let seq = RnaSequence::new("A", "");
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn test_pair_count() {
        let fold = FoldResult::new("(((...)))", -1.2);
        assert_eq!(fold.pair_count(), 3);

        let unpaired = FoldResult::new(".........", 0.0);
        assert_eq!(unpaired.pair_count(), 0);
    }
}
