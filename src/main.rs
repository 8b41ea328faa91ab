mod cli;

use clap::{Parser, Subcommand};
use pdbkit::fetch::RCSB_URL_PDB;
use pdbkit::{CachedSource, Error, LocalCache, RcsbClient};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, trace, Level};

/// Extract metadata, sequences, chains, ligands and B-factors from PDB files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding downloaded `<ID>.pdb` files
    #[arg(long = "cache-dir", default_value = ".", global = true)]
    cache_dir: PathBuf,

    /// Only read cached files, never download
    #[arg(long, global = true)]
    offline: bool,

    /// Download location of PDB files
    #[arg(long = "base-url", default_value_t = String::from(RCSB_URL_PDB), global = true)]
    base_url: String,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a metadata block (HEADER, TITLE, SOURCE, ...)
    Details(cli::details::Args),
    /// Print one-letter sequences of one or all chains
    Residues(cli::residues::Args),
    /// Write the SEQRES sequences of the chains to a FASTA file
    Chains(cli::chains::Args),
    /// Print or write the ATOM or HETATM records of a chain
    Records(cli::records::Args),
    /// Replace a chain identifier and write the altered file
    AlterChain(cli::alter_chain::Args),
    /// Print the non-standard residues of the HETATM records
    Nonstandard(cli::nonstandard::Args),
    /// Write the B-factors of a chain as a table for plotting
    Bfactors(cli::bfactors::Args),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    trace!("{args:?}");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<(), Error> {
    let source = CachedSource::new(
        LocalCache::new(&args.cache_dir),
        RcsbClient::new(&args.base_url)?,
    )
    .offline(args.offline);

    match &args.command {
        Command::Details(a) => cli::details::run(a, &source),
        Command::Residues(a) => cli::residues::run(a, &source),
        Command::Chains(a) => cli::chains::run(a, &source),
        Command::Records(a) => cli::records::run(a, &source),
        Command::AlterChain(a) => cli::alter_chain::run(a, &source),
        Command::Nonstandard(a) => cli::nonstandard::run(a, &source),
        Command::Bfactors(a) => cli::bfactors::run(a, &source),
    }
}
