//! Per-chain residue sequences.
//!
//! Sequences are built either from the alpha carbons of the ATOM records
//! (the residues that were observed) or from the SEQRES records (the
//! residues the depositors declared). The two are never reconciled.

use crate::records::{Record, RecordKind};
use crate::residues::{one_letter_or_unknown, UNKNOWN_RESIDUE};
use crate::structure::StructureFile;
use crate::Error;
use indexmap::IndexMap;
use tracing::debug;

/// One-letter sequences keyed by chain identifier, in the order the chains
/// first appear in the file.
pub type ChainSequences = IndexMap<char, Vec<&'static str>>;

/// Which records a sequence is read from.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequenceSource {
    /// One residue per ATOM record of an alpha carbon
    #[default]
    Atom,
    /// Every residue listed in the SEQRES records
    Seqres,
}

impl std::fmt::Display for SequenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SequenceSource::Atom => write!(f, "atom"),
            SequenceSource::Seqres => write!(f, "seqres"),
        }
    }
}

/// A single chain, or every chain in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainSelection {
    /// Only the chain with this identifier
    Chain(char),
    /// Every chain, keyed by identifier
    All,
}

/// Result of [`residue_sequences`], shaped by the [`ChainSelection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResidueSequences {
    /// Sequence of the selected chain
    Chain(Vec<&'static str>),
    /// Sequences of all chains
    All(ChainSequences),
}

/// Visit every qualifying residue of `source` in file order, as
/// `(chain, one-letter code)`.
fn for_each_residue<S, F>(lines: &[S], source: SequenceSource, mut visit: F) -> Result<(), Error>
where
    S: AsRef<str>,
    F: FnMut(char, &'static str),
{
    let mut unknown = 0;
    let mut push = |chain: char, resn: &str| {
        let code = one_letter_or_unknown(resn);
        if code == UNKNOWN_RESIDUE {
            unknown += 1;
        }
        visit(chain, code);
    };

    for line in lines {
        let record = Record::classify(line.as_ref());
        match (source, record.kind()) {
            (SequenceSource::Atom, RecordKind::Atom) => {
                if !record.is_alpha_carbon()? {
                    continue;
                }
                if let Some(chain) = record.chain_id()? {
                    push(chain, record.residue_name()?);
                }
            }
            (SequenceSource::Seqres, RecordKind::Seqres) => {
                if let Some(chain) = record.chain_id()? {
                    for resn in record.seqres_residues()? {
                        push(chain, resn);
                    }
                }
            }
            _ => {}
        }
    }

    if unknown > 0 {
        debug!("Marked {unknown} non-standard {source} residue(s) as {UNKNOWN_RESIDUE}");
    }
    Ok(())
}

/// One-letter sequence of a single chain.
///
/// Residues that are not in the code table are kept as `X`, so the length
/// always equals the number of qualifying records (or SEQRES tokens).
///
/// # Example
///
/// ```
/// use pdbkit::{build_residue_sequence, SequenceSource};
///
/// let lines = ["ATOM      1  CA  ALA A   1      11.104  13.207   2.104  1.00 20.00           C"];
/// let seq = build_residue_sequence(&lines, 'A', SequenceSource::Atom).unwrap();
/// assert_eq!(seq, vec!["A"]);
/// ```
pub fn build_residue_sequence<S: AsRef<str>>(
    lines: &[S],
    chain: char,
    source: SequenceSource,
) -> Result<Vec<&'static str>, Error> {
    let mut seq = Vec::new();
    for_each_residue(lines, source, |c, code| {
        if c == chain {
            seq.push(code);
        }
    })?;
    Ok(seq)
}

/// One-letter sequences of every chain.
pub fn build_chain_sequences<S: AsRef<str>>(
    lines: &[S],
    source: SequenceSource,
) -> Result<ChainSequences, Error> {
    let mut sequences = ChainSequences::new();
    for_each_residue(lines, source, |chain, code| {
        sequences.entry(chain).or_default().push(code);
    })?;
    Ok(sequences)
}

/// Sequence(s) for a [`ChainSelection`].
pub fn residue_sequences<S: AsRef<str>>(
    lines: &[S],
    selection: ChainSelection,
    source: SequenceSource,
) -> Result<ResidueSequences, Error> {
    match selection {
        ChainSelection::Chain(chain) => {
            build_residue_sequence(lines, chain, source).map(ResidueSequences::Chain)
        }
        ChainSelection::All => build_chain_sequences(lines, source).map(ResidueSequences::All),
    }
}

/// Sequence accessors on a loaded structure.
pub trait ChainExt {
    /// The observed sequence of a chain, from its alpha carbons.
    fn pdb_seq(&self, chain: char) -> Result<Vec<&'static str>, Error>;

    /// The declared sequence of a chain, from its SEQRES records.
    fn seqres_seq(&self, chain: char) -> Result<Vec<&'static str>, Error>;
}

impl ChainExt for StructureFile {
    fn pdb_seq(&self, chain: char) -> Result<Vec<&'static str>, Error> {
        build_residue_sequence(self.lines(), chain, SequenceSource::Atom)
    }

    fn seqres_seq(&self, chain: char) -> Result<Vec<&'static str>, Error> {
        build_residue_sequence(self.lines(), chain, SequenceSource::Seqres)
    }
}
