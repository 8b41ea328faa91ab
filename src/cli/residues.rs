use crate::cli::parse_chain;
use clap::Parser;
use pdbkit::utils::run_with_threads;
use pdbkit::{
    residue_sequences, ChainSelection, Error, ResidueSequences, SequenceSource, StructureSource,
};
use rayon::prelude::*;
use tracing::{debug, error, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Structure IDs, e.g. 1HHP
    #[arg(required = true)]
    ids: Vec<String>,

    /// Chain to extract. All chains are printed when omitted
    #[arg(short, long, value_parser = parse_chain)]
    chain: Option<char>,

    /// Records the sequence is read from
    #[arg(short, long, value_enum, default_value_t = SequenceSource::Atom)]
    source: SequenceSource,

    /// Number of structures processed in parallel (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args, source: &dyn StructureSource) -> Result<(), Error> {
    trace!("{args:?}");

    let selection = match args.chain {
        Some(chain) => ChainSelection::Chain(chain),
        None => ChainSelection::All,
    };

    let results: Vec<Result<(String, ResidueSequences), Error>> =
        run_with_threads(args.num_threads, || {
            debug!("Using {} thread(s)", rayon::current_num_threads());
            args.ids
                .par_iter()
                .map(|id| {
                    let file = source.load(id)?;
                    let sequences = residue_sequences(file.lines(), selection, args.source)?;
                    Ok((file.id().to_string(), sequences))
                })
                .collect()
        });

    // Print in argument order; report every failure but return the first
    let mut first_err = None;
    for (id, result) in args.ids.iter().zip(results) {
        match result {
            Ok((id, ResidueSequences::Chain(seq))) => {
                println!("{id}_{}: {}", args.chain.unwrap_or(' '), seq.join(""));
            }
            Ok((id, ResidueSequences::All(sequences))) => {
                println!("Structure: {id}");
                for (chain, seq) in sequences {
                    println!("{chain}: {}", seq.join(""));
                }
                println!();
            }
            Err(e) => {
                error!("{id}: {e}");
                first_err.get_or_insert(e);
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
