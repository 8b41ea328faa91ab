//! Subcommands of the `pdbkit` binary. Each module holds the `Args` of one
//! subcommand and the `run` function that executes it.

pub(crate) mod alter_chain;
pub(crate) mod bfactors;
pub(crate) mod chains;
pub(crate) mod details;
pub(crate) mod nonstandard;
pub(crate) mod records;
pub(crate) mod residues;

use clap::ValueEnum;
use pdbkit::RecordKind;

/// Record kinds that carry a chain identifier.
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub(crate) enum RecordArg {
    /// ATOM records
    #[default]
    Atom,
    /// HETATM records
    Hetatm,
    /// SEQRES records
    Seqres,
}

impl From<RecordArg> for RecordKind {
    fn from(arg: RecordArg) -> Self {
        match arg {
            RecordArg::Atom => RecordKind::Atom,
            RecordArg::Hetatm => RecordKind::Hetatm,
            RecordArg::Seqres => RecordKind::Seqres,
        }
    }
}

/// Chain identifiers are a single character.
pub(crate) fn parse_chain(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("chain identifier '{s}' must be a single character")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_arguments() {
        assert_eq!(parse_chain("A"), Ok('A'));
        assert_eq!(parse_chain("1"), Ok('1'));
        assert!(parse_chain("").is_err());
        assert!(parse_chain("AB").is_err());
    }
}
