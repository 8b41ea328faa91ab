use crate::cli::{parse_chain, RecordArg};
use clap::Parser;
use pdbkit::utils::{write_lines, ALTERED_CHAIN_FILE};
use pdbkit::{replace_chain_identifier, Error, RecordKind, StructureSource};
use std::path::PathBuf;
use tracing::{info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Structure ID, e.g. 1HHP
    id: String,

    /// Record type whose chain identifiers are replaced
    #[arg(short, long, value_enum, default_value_t = RecordArg::Atom)]
    record: RecordArg,

    /// Chain identifier to replace
    #[arg(long = "from", value_parser = parse_chain)]
    old_chain: char,

    /// New chain identifier, a single character
    #[arg(long = "to")]
    new_chain: String,

    /// Output file
    #[arg(short, long, default_value = ALTERED_CHAIN_FILE)]
    output: PathBuf,
}

pub(crate) fn run(args: &Args, source: &dyn StructureSource) -> Result<(), Error> {
    trace!("{args:?}");

    let file = source.load(&args.id)?;
    let altered = replace_chain_identifier(
        file.lines(),
        args.record.into(),
        args.old_chain,
        &args.new_chain,
    )?;

    let changed = file
        .lines()
        .iter()
        .zip(&altered)
        .filter(|(old, new)| old != new)
        .count();
    if changed == 0 {
        warn!(
            "No {} records of chain {} in {}",
            RecordKind::from(args.record),
            args.old_chain,
            file.id()
        );
    }

    write_lines(&args.output, &altered)?;
    info!(
        "Relabelled {changed} record(s) from chain {} to {}; saved to {}",
        args.old_chain,
        args.new_chain,
        args.output.display()
    );
    Ok(())
}
