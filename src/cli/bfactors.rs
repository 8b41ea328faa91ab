use crate::cli::parse_chain;
use clap::Parser;
use pdbkit::utils::{
    summarize_column, temperature_factors_to_df, B_FACTOR_LABEL, RESIDUE_INDEX_LABEL,
};
use pdbkit::{extract_temperature_factors, write_df_to_file, DataFrameFileType, Error, StructureSource};
use std::path::PathBuf;
use tracing::{debug, info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Structure ID, e.g. 1HHP
    id: String,

    /// Chain whose ATOM records are read
    #[arg(short, long, value_parser = parse_chain)]
    chain: char,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Name of the output file. Defaults to `<ID>_<CHAIN>_bfactors`
    #[arg(short = 'f', long = "filename")]
    filename: Option<String>,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,
}

pub(crate) fn run(args: &Args, source: &dyn StructureSource) -> Result<(), Error> {
    trace!("{args:?}");

    let file = source.load(&args.id)?;
    let b_factors = extract_temperature_factors(file.lines(), args.chain)?;
    if b_factors.is_empty() {
        warn!("No ATOM records of chain {} in {}", args.chain, file.id());
    }

    let mut df = temperature_factors_to_df(&b_factors, RESIDUE_INDEX_LABEL, B_FACTOR_LABEL)?;
    if let Some((mean, max)) = summarize_column(&df, B_FACTOR_LABEL)? {
        info!(
            "Chain {} of {}: {} atoms, mean B-factor {mean:.2}, max {max:.2}",
            args.chain,
            file.id(),
            df.height()
        );
    }
    debug!("{df}");

    // Prepare output directory
    std::fs::create_dir_all(&args.output)
        .map_err(|e| Error::from_io(e, Some(args.output.clone())))?;
    let filename = args
        .filename
        .clone()
        .unwrap_or_else(|| format!("{}_{}_bfactors", file.id(), args.chain));
    let output_file = write_df_to_file(&mut df, &args.output.join(filename), args.output_format)?;
    info!("Results saved to {}", output_file.display());
    Ok(())
}
