use crate::cli::{parse_chain, RecordArg};
use clap::Parser;
use pdbkit::utils::{write_lines, SELECTED_RECORDS_FILE};
use pdbkit::{select_records, Error, StructureSource};
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Structure ID, e.g. 1HHP
    id: String,

    /// Chain whose records are selected
    #[arg(short, long, value_parser = parse_chain)]
    chain: char,

    /// Record type to select (ATOM or HETATM)
    #[arg(short, long, value_enum, default_value_t = RecordArg::Atom)]
    record: RecordArg,

    /// Write the records to a file instead of printing them
    #[arg(short, long, num_args = 0..=1, default_missing_value = SELECTED_RECORDS_FILE)]
    write: Option<PathBuf>,
}

pub(crate) fn run(args: &Args, source: &dyn StructureSource) -> Result<(), Error> {
    trace!("{args:?}");

    let file = source.load(&args.id)?;
    let selected = select_records(file.lines(), args.record.into(), args.chain)?;

    match &args.write {
        Some(output_file) => {
            write_lines(output_file, &selected)?;
            info!(
                "Saved {} record(s) to {}",
                selected.len(),
                output_file.display()
            );
        }
        None => {
            for line in selected {
                println!("{}", line.trim());
            }
        }
    }
    Ok(())
}
