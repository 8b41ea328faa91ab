#![warn(missing_docs)]

//! # pdbkit
//!
//! This library reads Protein Data Bank (PDB) structure files line by line
//! and extracts parts of them: header metadata, per-chain amino acid
//! sequences (from ATOM or SEQRES records), ATOM/HETATM records of a chain,
//! relabelled chains, non-standard residues and B-factors.
//!
//! Every extraction function takes the raw lines of a file and returns new
//! values. Retrieval from the RCSB data bank, the local `<ID>.pdb` cache and
//! file output live in [`fetch`] and [`utils`].
//!
//! ```
//! use pdbkit::{extract_non_standard_residues, replace_chain_identifier, RecordKind};
//!
//! let lines = [
//!     "ATOM      1  CA  ALA A   1      11.104  13.207   2.104  1.00 20.00           C",
//!     "HETATM    2 FE   HEM A 201      10.000  10.000  10.000  1.00 15.00          FE",
//! ];
//! let ligands = extract_non_standard_residues(&lines).unwrap();
//! assert!(ligands.contains("HEM"));
//!
//! let altered = replace_chain_identifier(&lines, RecordKind::Atom, 'A', "X").unwrap();
//! assert_eq!(&altered[0][21..22], "X");
//! assert_eq!(altered[1], lines[1]);
//! ```

mod chains;
mod error;
pub mod fetch;
mod metadata;
pub mod records;
pub mod residues;
mod sequences;
mod structure;
pub mod utils;

// Re-export key public types
pub use chains::{
    build_chain_sequences, build_residue_sequence, residue_sequences, ChainExt, ChainSelection,
    ChainSequences, ResidueSequences, SequenceSource,
};
pub use error::Error;
pub use fetch::{CachedSource, LocalCache, RcsbClient, StructureSource};
pub use metadata::{
    extract_metadata, extract_non_standard_residues, extract_temperature_factors,
    replace_chain_identifier, select_records, MetadataKey,
};
pub use records::{Record, RecordKind};
pub use sequences::{get_sequences, seqres_fasta, FastaRecord};
pub use structure::StructureFile;
pub use utils::{write_df_to_file, DataFrameFileType};
