//! Residue code table.
//!
//! Maps the three-letter names of the standard amino acids to their
//! one-letter codes. Anything absent from the table is a non-standard
//! residue (ligands, waters, modified residues).

/// One-letter code used for residues missing from the table.
pub const UNKNOWN_RESIDUE: &str = "X";

/// Three-letter names of every standard residue, including the ambiguity
/// codes ASX and GLX and selenocysteine.
pub const STANDARD_RESIDUES: [&str; 23] = [
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "LEU", "LYS", "MET",
    "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL", "ASX", "GLX", "SEC",
];

/// The residue one-letter code, or `None` if it's not a standard residue.
pub fn one_letter_code(three_letter: &str) -> Option<&'static str> {
    let aa_code = match three_letter.trim().to_uppercase().as_str() {
        "ALA" => "A",
        "ARG" => "R",
        "ASN" => "N",
        "ASP" => "D",
        "CYS" => "C",
        "GLN" => "Q",
        "GLU" => "E",
        "GLY" => "G",
        "HIS" => "H",
        "ILE" => "I",
        "LEU" => "L",
        "LYS" => "K",
        "MET" => "M",
        "PHE" => "F",
        "PRO" => "P",
        "SER" => "S",
        "THR" => "T",
        "TRP" => "W",
        "TYR" => "Y",
        "VAL" => "V",
        "ASX" => "B", // ASN or ASP
        "GLX" => "Z", // GLN or GLU
        "SEC" => "U",
        _ => UNKNOWN_RESIDUE,
    };

    match aa_code {
        UNKNOWN_RESIDUE => None,
        _ => Some(aa_code),
    }
}

/// Like [`one_letter_code`], but unknown residues map to [`UNKNOWN_RESIDUE`]
/// so they stay visible in a sequence.
pub fn one_letter_or_unknown(three_letter: &str) -> &'static str {
    one_letter_code(three_letter).unwrap_or(UNKNOWN_RESIDUE)
}

/// Reverse lookup from a one-letter code to the standard three-letter name.
pub fn three_letter_code(one_letter: &str) -> Option<&'static str> {
    STANDARD_RESIDUES
        .iter()
        .copied()
        .find(|three| one_letter_code(three) == Some(one_letter))
}

/// Whether `three_letter` names a standard residue.
pub fn is_standard(three_letter: &str) -> bool {
    one_letter_code(three_letter).is_some()
}
