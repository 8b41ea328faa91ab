//! Line-level extraction: metadata blocks, B-factors, non-standard residues,
//! chain relabelling and record selection.
//!
//! All functions take the raw lines of a structure and return new values;
//! nothing here touches the filesystem.

use crate::records::{Record, RecordKind};
use crate::residues::is_standard;
use crate::Error;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Metadata blocks that can be pulled from a structure header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataKey {
    /// Classification, deposition date and ID
    Header,
    /// Title of the experiment
    Title,
    /// Biological source of the molecules
    Source,
    /// Keywords
    Keywds,
    /// Authors of the entry
    Author,
    /// Resolution, from `REMARK   2`. Best effort: only lines that mention
    /// the resolution are reported.
    Resolution,
    /// Primary citation
    Jrnl,
}

impl MetadataKey {
    /// Keys in the order of their numeric menu entries `1`..`7`.
    pub const ALL: [MetadataKey; 7] = [
        MetadataKey::Header,
        MetadataKey::Title,
        MetadataKey::Source,
        MetadataKey::Keywds,
        MetadataKey::Author,
        MetadataKey::Resolution,
        MetadataKey::Jrnl,
    ];

    /// The record kind holding this block.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            MetadataKey::Header => RecordKind::Header,
            MetadataKey::Title => RecordKind::Title,
            MetadataKey::Source => RecordKind::Source,
            MetadataKey::Keywds => RecordKind::Keywds,
            MetadataKey::Author => RecordKind::Author,
            MetadataKey::Resolution => RecordKind::Resolution,
            MetadataKey::Jrnl => RecordKind::Jrnl,
        }
    }
}

impl FromStr for MetadataKey {
    type Err = Error;

    /// Accepts the block names (any case) and the numeric keys `1`..`7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| Error::invalid_argument(format!("metadata key {n} is not in 1-7")));
        }
        Self::ALL
            .into_iter()
            .find(|key| key.record_kind().to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument(format!("unknown metadata key '{s}'")))
    }
}

/// Lines holding the metadata block `key`, in file order, with trailing
/// whitespace removed.
pub fn extract_metadata<S: AsRef<str>>(lines: &[S], key: MetadataKey) -> Vec<&str> {
    let kind = key.record_kind();
    lines
        .iter()
        .map(|line| Record::classify(line.as_ref()))
        .filter(|record| record.kind() == kind)
        .map(|record| record.raw().trim_end())
        .collect()
}

/// Temperature factors of every ATOM record in `chain`, as
/// `(index, B-factor)`, where `index` counts the returned entries from zero.
pub fn extract_temperature_factors<S: AsRef<str>>(
    lines: &[S],
    chain: char,
) -> Result<Vec<(usize, f64)>, Error> {
    let mut b_factors = Vec::new();
    for line in lines {
        let record = Record::classify(line.as_ref());
        if record.kind() != RecordKind::Atom || record.chain_id()? != Some(chain) {
            continue;
        }
        b_factors.push((b_factors.len(), record.temperature_factor()?));
    }
    Ok(b_factors)
}

/// Distinct residue names of HETATM records that are not standard residues.
pub fn extract_non_standard_residues<S: AsRef<str>>(lines: &[S]) -> Result<BTreeSet<String>, Error> {
    let mut residues = BTreeSet::new();
    for line in lines {
        let record = Record::classify(line.as_ref());
        if record.kind() != RecordKind::Hetatm {
            continue;
        }
        let resn = record.residue_name()?;
        if !is_standard(resn) && !residues.contains(resn) {
            residues.insert(resn.to_string());
        }
    }
    Ok(residues)
}

/// Copy `lines`, relabelling chain `old_chain` to `new_chain` on every record
/// of `kind`. Other lines are copied unchanged.
///
/// `new_chain` must be a single ASCII character, anything else would shift
/// the columns after it.
pub fn replace_chain_identifier<S: AsRef<str>>(
    lines: &[S],
    kind: RecordKind,
    old_chain: char,
    new_chain: &str,
) -> Result<Vec<String>, Error> {
    let column = kind.chain_column().ok_or_else(|| {
        Error::invalid_argument(format!("{kind} records have no chain identifier"))
    })?;
    if new_chain.len() != 1 || !new_chain.is_ascii() {
        return Err(Error::invalid_argument(format!(
            "new chain identifier '{new_chain}' must be exactly one ASCII character"
        )));
    }

    lines
        .iter()
        .map(|line| {
            let record = Record::classify(line.as_ref());
            if record.kind() != kind || record.chain_id()? != Some(old_chain) {
                return Ok(line.as_ref().to_string());
            }
            let raw = line.as_ref();
            let after = column + old_chain.len_utf8();
            Ok(format!("{}{}{}", &raw[..column], new_chain, &raw[after..]))
        })
        .collect()
}

/// ATOM or HETATM lines of `chain`, verbatim and in file order.
pub fn select_records<S: AsRef<str>>(
    lines: &[S],
    kind: RecordKind,
    chain: char,
) -> Result<Vec<&str>, Error> {
    if !matches!(kind, RecordKind::Atom | RecordKind::Hetatm) {
        return Err(Error::invalid_argument(format!(
            "only ATOM and HETATM records can be selected by chain, not {kind}"
        )));
    }

    let mut selected = Vec::new();
    for line in lines {
        let record = Record::classify(line.as_ref());
        if record.kind() == kind && record.chain_id()? == Some(chain) {
            selected.push(line.as_ref());
        }
    }
    Ok(selected)
}
