//! RNA sequence extraction.
//!
//! Only the four canonical ribonucleotides contribute to a chain's
//! sequence. Modified bases, amino acids, ions and waters are dropped.

use log::debug;

use crate::model::{Chain, RnaSequence};

/// Residue names kept in the derived sequence.
pub const CANONICAL_RIBONUCLEOTIDES: [&str; 4] = ["A", "U", "G", "C"];

/// Returns true if the (untrimmed) residue name is A, U, G or C.
pub fn is_canonical(name: &str) -> bool {
    CANONICAL_RIBONUCLEOTIDES.contains(&name.trim())
}

/// Builds the RNA sequence of a chain, in residue order.
///
/// The result is empty when the chain has no canonical residue; callers
/// are expected to skip such chains.
pub fn extract_sequence(chain: &Chain) -> RnaSequence {
    let mut data = String::with_capacity(chain.residue_count());
    let mut skipped = 0usize;

    for residue in &chain.residues {
        let name = residue.name.trim();
        if is_canonical(name) {
            data.push_str(name);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        debug!(
            "Chain {}: kept {} residues, skipped {} non-canonical",
            chain.id,
            data.len(),
            skipped
        );
    }

    RnaSequence::new(chain.id.clone(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Residue;

    fn chain(id: &str, names: &[&str]) -> Chain {
        Chain::new(id, names.iter().map(|n| Residue::new(*n)).collect())
    }

    #[test]
    fn test_canonical_in_order() {
        let c = chain("A", &["G", "C", "A", "U", "U", "G"]);
        assert_eq!(extract_sequence(&c).as_str(), "GCAUUG");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let c = chain("A", &["  G", "C ", " A "]);
        assert_eq!(extract_sequence(&c).as_str(), "GCA");
    }

    #[test]
    fn test_non_canonical_dropped() {
        // Modified bases, DNA, protein and water
        let c = chain("B", &["G", "PSU", "DA", "ALA", "HOH", "C", "MG", "T"]);
        let seq = extract_sequence(&c);
        assert_eq!(seq.chain_id, "B");
        assert_eq!(seq.as_str(), "GC");
    }

    #[test]
    fn test_only_non_canonical_is_empty() {
        let c = chain("P", &["MET", "GLY", "5MC", "HOH"]);
        assert!(extract_sequence(&c).is_empty());

        let empty = chain("E", &[]);
        assert!(extract_sequence(&empty).is_empty());
    }

    #[test]
    fn test_exact_match_only() {
        // Lowercase or longer names are not canonical
        assert!(!is_canonical("a"));
        assert!(!is_canonical("GTP"));
        assert!(!is_canonical(""));
        assert!(is_canonical(" U "));
    }
}
