use clap::Parser;
use pdbkit::{extract_metadata, Error, MetadataKey, StructureSource};
use tracing::{trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Structure ID, e.g. 1HHP
    id: String,

    /// Metadata block to print: HEADER, TITLE, SOURCE, KEYWDS, AUTHOR,
    /// RESOLUTION or JRNL, or its number 1-7 in that order
    key: MetadataKey,
}

pub(crate) fn run(args: &Args, source: &dyn StructureSource) -> Result<(), Error> {
    trace!("{args:?}");

    let file = source.load(&args.id)?;
    let lines = extract_metadata(file.lines(), args.key);
    if lines.is_empty() {
        match args.key {
            MetadataKey::Resolution => warn!(
                "No resolution found in {}; only REMARK 2 records are searched",
                file.id()
            ),
            key => warn!("No {} records in {}", key.record_kind(), file.id()),
        }
    }

    for line in lines {
        println!("{}", line.trim());
    }
    Ok(())
}
