//! Sequence extraction from structure files.
//!
//! This module joins the per-chain residue codes into sequence strings and
//! FASTA records.

use crate::chains::{build_chain_sequences, SequenceSource};
use crate::structure::StructureFile;
use crate::Error;
use core::fmt;
use indexmap::IndexMap;

/// One FASTA entry: a `>` definition line followed by the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Definition line, without the leading `>`
    pub header: String,
    /// One-letter sequence on a single line
    pub sequence: String,
}

impl fmt::Display for FastaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}\n{}", self.header, self.sequence)
    }
}

/// Get sequences of all chains in a structure.
///
/// # Arguments
///
/// * `file` - Reference to a loaded structure
/// * `source` - Read the alpha carbons of ATOM records, or the SEQRES records
///
/// # Returns
///
/// A map from chain identifier to its one-letter sequence, in the order the
/// chains appear in the file.
///
/// # Example
///
/// ```no_run
/// use pdbkit::{get_sequences, SequenceSource, StructureFile};
/// use std::path::Path;
///
/// let file = StructureFile::read(Path::new("path/to/1HHP.pdb")).unwrap();
/// let sequences = get_sequences(&file, SequenceSource::Atom).unwrap();
/// for (chain_id, seq) in sequences {
///     println!("Chain {}: {}", chain_id, seq);
/// }
/// ```
pub fn get_sequences(
    file: &StructureFile,
    source: SequenceSource,
) -> Result<IndexMap<char, String>, Error> {
    Ok(build_chain_sequences(file.lines(), source)?
        .into_iter()
        .map(|(chain, seq)| (chain, seq.join("")))
        .collect())
}

/// FASTA records of the SEQRES sequences, one per chain, headed
/// `<ID>_<chain>`. With `chain` set only that chain is returned.
pub fn seqres_fasta(file: &StructureFile, chain: Option<char>) -> Result<Vec<FastaRecord>, Error> {
    Ok(get_sequences(file, SequenceSource::Seqres)?
        .into_iter()
        .filter(|(id, _)| chain.map_or(true, |c| c == *id))
        .map(|(id, sequence)| FastaRecord {
            header: format!("{}_{}", file.id(), id),
            sequence,
        })
        .collect())
}
