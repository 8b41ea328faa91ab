use clap::Parser;
use pdbkit::{extract_non_standard_residues, Error, StructureSource};
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Structure ID, e.g. 1HHP
    id: String,
}

pub(crate) fn run(args: &Args, source: &dyn StructureSource) -> Result<(), Error> {
    trace!("{args:?}");

    let file = source.load(&args.id)?;
    let residues = extract_non_standard_residues(file.lines())?;
    info!(
        "Found {} non-standard residue name(s) in {}",
        residues.len(),
        file.id()
    );
    for resn in residues {
        println!("{resn}");
    }
    Ok(())
}
