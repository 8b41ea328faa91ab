use crate::cli::parse_chain;
use clap::Parser;
use pdbkit::utils::{fasta_path, write_fasta};
use pdbkit::{seqres_fasta, Error, StructureSource};
use tracing::{info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Structure ID, e.g. 1HHP
    id: String,

    /// Name of the output file, written as `<OUTPUT>.fasta`
    #[arg(short, long)]
    output: String,

    /// Only write this chain
    #[arg(short, long, value_parser = parse_chain)]
    chain: Option<char>,
}

pub(crate) fn run(args: &Args, source: &dyn StructureSource) -> Result<(), Error> {
    trace!("{args:?}");

    let file = source.load(&args.id)?;
    let records = seqres_fasta(&file, args.chain)?;
    if records.is_empty() {
        warn!(
            "No SEQRES records{} in {}",
            args.chain.map(|c| format!(" for chain {c}")).unwrap_or_default(),
            file.id()
        );
    }

    let output_file = fasta_path(&args.output);
    write_fasta(&output_file, &records)?;
    info!(
        "Saved {} chain sequence(s) to {}",
        records.len(),
        output_file.display()
    );
    Ok(())
}
