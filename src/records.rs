//! Fixed-column record classification.
//!
//! Every line of a PDB file starts with a six character record name. The
//! remaining columns are laid out per record kind, at the offsets in
//! [`columns`].

use crate::Error;
use core::fmt;

/// Column layout of the PDB format, 0-indexed and half-open.
pub mod columns {
    use std::ops::Range;

    /// Record name, left aligned and padded with spaces
    pub const RECORD_NAME: Range<usize> = 0..6;
    /// REMARK number, right aligned
    pub const REMARK_NUMBER: Range<usize> = 7..10;
    /// Window of the atom name that holds `CA` for alpha carbons
    pub const ATOM_NAME: Range<usize> = 13..15;
    /// Residue name of ATOM and HETATM records
    pub const RESIDUE_NAME: Range<usize> = 17..20;
    /// Chain identifier of ATOM and HETATM records
    pub const ATOM_CHAIN_ID: usize = 21;
    /// Temperature factor of ATOM and HETATM records
    pub const TEMPERATURE_FACTOR: Range<usize> = 60..66;
    /// Chain identifier of SEQRES records
    pub const SEQRES_CHAIN_ID: usize = 11;
    /// Residue names of SEQRES records, separated by spaces
    pub const SEQRES_RESIDUES: Range<usize> = 19..70;
}

/// Atom name of alpha carbons.
pub const ALPHA_CARBON: &str = "CA";

/// REMARK number under which the resolution is reported.
const RESOLUTION_REMARK: &str = "2";

/// The record kinds the classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `HEADER`
    Header,
    /// `TITLE`
    Title,
    /// `SOURCE`
    Source,
    /// `KEYWDS`
    Keywds,
    /// `AUTHOR`
    Author,
    /// `JRNL`
    Jrnl,
    /// `REMARK   2` lines mentioning the resolution. Best effort only, as
    /// there is no record name of its own.
    Resolution,
    /// `SEQRES`
    Seqres,
    /// `ATOM`
    Atom,
    /// `HETATM`
    Hetatm,
    /// Anything else
    Other,
}

impl RecordKind {
    /// Kinds that are recognised from the record name alone.
    const NAMED: [RecordKind; 9] = [
        RecordKind::Header,
        RecordKind::Title,
        RecordKind::Source,
        RecordKind::Keywds,
        RecordKind::Author,
        RecordKind::Jrnl,
        RecordKind::Seqres,
        RecordKind::Atom,
        RecordKind::Hetatm,
    ];

    /// The record name as written in columns 1-6, without padding.
    pub fn record_name(&self) -> &'static str {
        match self {
            RecordKind::Header => "HEADER",
            RecordKind::Title => "TITLE",
            RecordKind::Source => "SOURCE",
            RecordKind::Keywds => "KEYWDS",
            RecordKind::Author => "AUTHOR",
            RecordKind::Jrnl => "JRNL",
            RecordKind::Resolution => "REMARK",
            RecordKind::Seqres => "SEQRES",
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
            RecordKind::Other => "",
        }
    }

    /// Column of the chain identifier, for the kinds that have one.
    pub fn chain_column(&self) -> Option<usize> {
        match self {
            RecordKind::Atom | RecordKind::Hetatm => Some(columns::ATOM_CHAIN_ID),
            RecordKind::Seqres => Some(columns::SEQRES_CHAIN_ID),
            _ => None,
        }
    }

    fn has_atom_fields(&self) -> bool {
        matches!(self, RecordKind::Atom | RecordKind::Hetatm)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Resolution => write!(f, "RESOLUTION"),
            RecordKind::Other => write!(f, "OTHER"),
            kind => write!(f, "{}", kind.record_name()),
        }
    }
}

/// One classified line. The line itself is borrowed and never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    kind: RecordKind,
    raw: &'a str,
}

impl<'a> Record<'a> {
    /// Classify `line` by its record name.
    pub fn classify(line: &'a str) -> Self {
        let raw = line.trim_end_matches(['\n', '\r']);
        let name = field(raw, columns::RECORD_NAME).trim_end();

        let kind = RecordKind::NAMED
            .into_iter()
            .find(|kind| kind.record_name() == name)
            .unwrap_or_else(|| {
                if name == "REMARK" && is_resolution_remark(raw) {
                    RecordKind::Resolution
                } else {
                    RecordKind::Other
                }
            });

        Self { kind, raw }
    }

    /// The classified kind.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The line as read, without its line terminator.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The chain identifier, or `None` if the line ends before its column.
    pub fn chain_id(&self) -> Result<Option<char>, Error> {
        let column = self
            .kind
            .chain_column()
            .ok_or_else(|| Error::field_access("chain identifier", self.kind))?;
        Ok(self.raw.get(column..).and_then(|rest| rest.chars().next()))
    }

    /// The two characters of the atom name compared against `CA`, or `None`
    /// if the line ends before them.
    pub fn atom_name(&self) -> Result<Option<&'a str>, Error> {
        self.require_atom_fields("atom name")?;
        Ok(self.raw.get(columns::ATOM_NAME))
    }

    /// Whether this ATOM or HETATM record is an alpha carbon.
    pub fn is_alpha_carbon(&self) -> Result<bool, Error> {
        Ok(self.atom_name()? == Some(ALPHA_CARBON))
    }

    /// The three-letter residue name, with padding removed. Lines that stop
    /// inside the field yield what is there.
    pub fn residue_name(&self) -> Result<&'a str, Error> {
        self.require_atom_fields("residue name")?;
        if self.raw.len() <= columns::RESIDUE_NAME.start {
            return Err(Error::malformed(
                self.kind,
                self.raw,
                format!("line ends before the residue name at column {}", columns::RESIDUE_NAME.start + 1),
            ));
        }
        Ok(field(self.raw, columns::RESIDUE_NAME).trim())
    }

    /// The temperature factor (B-factor).
    pub fn temperature_factor(&self) -> Result<f64, Error> {
        self.require_atom_fields("temperature factor")?;
        if self.raw.len() <= columns::TEMPERATURE_FACTOR.start {
            return Err(Error::malformed(
                self.kind,
                self.raw,
                format!(
                    "line ends before the temperature factor at column {}",
                    columns::TEMPERATURE_FACTOR.start + 1
                ),
            ));
        }
        let text = field(self.raw, columns::TEMPERATURE_FACTOR).trim();
        text.parse::<f64>().map_err(|_| {
            Error::malformed(
                self.kind,
                self.raw,
                format!("temperature factor '{text}' is not a number"),
            )
        })
    }

    /// The three-letter residue names of a SEQRES record, left to right.
    pub fn seqres_residues(&self) -> Result<impl Iterator<Item = &'a str>, Error> {
        if self.kind != RecordKind::Seqres {
            return Err(Error::field_access("residue list", self.kind));
        }
        Ok(field(self.raw, columns::SEQRES_RESIDUES).split_whitespace())
    }

    fn require_atom_fields(&self, field: &'static str) -> Result<(), Error> {
        if self.kind.has_atom_fields() {
            Ok(())
        } else {
            Err(Error::field_access(field, self.kind))
        }
    }
}

/// The part of `range` present in `line`. Right-trimmed lines give a short
/// or empty field instead of failing.
fn field(line: &str, range: std::ops::Range<usize>) -> &str {
    let end = range.end.min(line.len());
    line.get(range.start.min(end)..end).unwrap_or("")
}

fn is_resolution_remark(line: &str) -> bool {
    field(line, columns::REMARK_NUMBER).trim() == RESOLUTION_REMARK
        && line.contains("RESOLUTION")
}
