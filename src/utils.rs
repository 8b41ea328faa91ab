//! Output helpers: FASTA and line files, B-factor tables, thread pools.

use crate::sequences::FastaRecord;
use crate::Error;
use polars::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default output of chain relabelling.
pub const ALTERED_CHAIN_FILE: &str = "altered_chain.fasta";

/// Default output when writing selected ATOM/HETATM records.
pub const SELECTED_RECORDS_FILE: &str = "Proteins_or_nonproteins.fasta";

/// Column names (axis labels) of a B-factor table.
pub const RESIDUE_INDEX_LABEL: &str = "residue_index";
/// Column name of the B-factor values.
pub const B_FACTOR_LABEL: &str = "b_factor";

/// `<output_filename>.fasta`
pub fn fasta_path(output_filename: &str) -> PathBuf {
    PathBuf::from(format!("{output_filename}.fasta"))
}

static TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Replace `path` with `contents` in one step: the data goes to a sibling
/// temporary file that is then renamed over the destination.
///
/// Every call writes its own temporary file, so concurrent writers of the
/// same path never share one. The last rename wins.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::invalid_argument(format!("'{}' is not a file path", path.display())))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let tmp_path = path.with_file_name(tmp_name);

    let write = || -> std::io::Result<()> {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        std::fs::rename(&tmp_path, path)
    };
    write().map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        Error::from_io(e, Some(path.to_path_buf()))
    })
}

/// Write `lines` verbatim, each terminated by a newline.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), Error> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }
    write_atomically(path, contents.as_bytes())
}

/// Write FASTA records, one definition line and one sequence line each.
pub fn write_fasta(path: &Path, records: &[FastaRecord]) -> Result<(), Error> {
    let lines: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    write_lines(path, &lines)
}

/// Tabulate a B-factor series with one column per axis label.
pub fn temperature_factors_to_df(
    b_factors: &[(usize, f64)],
    x_label: &str,
    y_label: &str,
) -> Result<DataFrame, Error> {
    Ok(df!(
        x_label => b_factors.iter().map(|(i, _)| *i as u64).collect::<Vec<u64>>(),
        y_label => b_factors.iter().map(|(_, b)| *b).collect::<Vec<f64>>(),
    )?)
}

/// Mean and maximum of a column using polars lazy aggregation, or `None` if
/// the column is empty.
pub fn summarize_column(df: &DataFrame, column: &str) -> Result<Option<(f64, f64)>, Error> {
    let stats = df
        .clone()
        .lazy()
        .select([
            col(column).mean().alias("mean"),
            col(column).max().alias("max"),
        ])
        .collect()?;
    let mean = stats.column("mean")?.f64()?.get(0);
    let max = stats.column("max")?.f64()?.get(0);
    Ok(mean.zip(max))
}

/// Write a DataFrame to a file of the given type. The extension is replaced
/// by the file type. The table is serialized in memory first, so a failed
/// write leaves any previous file untouched.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<PathBuf, Error> {
    let path = file_path.with_extension(file_type.to_string());
    let mut buf: Vec<u8> = Vec::new();
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut buf).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut buf).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut buf)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut buf)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    write_atomically(&path, &buf)?;
    Ok(path)
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

/// Run `f` on a rayon pool with `num_threads` threads (0 for all cores).
pub fn run_with_threads<T, F>(num_threads: usize, f: F) -> T
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(num_threads).build() {
        Ok(pool) => pool.install(f),
        Err(_) => f(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pdbkit-utils-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn output_names() {
        assert_eq!(fasta_path("chains"), PathBuf::from("chains.fasta"));
        assert_eq!(ALTERED_CHAIN_FILE, "altered_chain.fasta");
    }

    #[test]
    fn lines_are_written_verbatim() {
        let dir = scratch_dir("lines");
        let path = dir.join("out.fasta");
        std::fs::write(&path, "old contents that are longer than the new ones\n").unwrap();

        write_lines(&path, &["ATOM  first", "ATOM  second"]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "ATOM  first\nATOM  second\n"
        );
        // No temporary file is left behind
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn concurrent_writers_of_one_path() {
        let dir = scratch_dir("concurrent");
        let path = dir.join("1ABC.pdb");
        let target = path.as_path();
        let contents: Vec<String> = (0..8).map(|i| format!("writer {i}\n").repeat(500)).collect();

        std::thread::scope(|s| {
            let handles: Vec<_> = contents
                .iter()
                .map(|c| s.spawn(move || write_atomically(target, c.as_bytes())))
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        });

        // One writer's contents in full, and no temporary files left over
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains(&written));
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_writes_report_the_path() {
        let path = Path::new("/definitely/not/a/dir/out.fasta");
        let err = write_lines(path, &["x"]).unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }

    #[test]
    fn fasta_output() {
        let dir = scratch_dir("fasta");
        let path = dir.join("chains.fasta");
        let records = vec![
            FastaRecord {
                header: "1TST_A".to_string(),
                sequence: "MQIF".to_string(),
            },
            FastaRecord {
                header: "1TST_B".to_string(),
                sequence: "GS".to_string(),
            },
        ];
        write_fasta(&path, &records).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            ">1TST_A\nMQIF\n>1TST_B\nGS\n"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn b_factor_table() {
        let series = [(0, 20.0), (1, 10.0), (2, 30.0)];
        let df = temperature_factors_to_df(&series, RESIDUE_INDEX_LABEL, B_FACTOR_LABEL).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.get_column_names_str(), vec!["residue_index", "b_factor"]);
        assert_eq!(
            df.column(RESIDUE_INDEX_LABEL).unwrap().dtype(),
            &DataType::UInt64
        );

        let (mean, max) = summarize_column(&df, B_FACTOR_LABEL).unwrap().unwrap();
        assert!((mean - 20.0).abs() < 1e-9);
        assert_eq!(max, 30.0);

        let empty = temperature_factors_to_df(&[], RESIDUE_INDEX_LABEL, B_FACTOR_LABEL).unwrap();
        assert_eq!(summarize_column(&empty, B_FACTOR_LABEL).unwrap(), None);
    }

    #[test]
    fn b_factor_table_to_csv() {
        let dir = scratch_dir("csv");
        let mut df =
            temperature_factors_to_df(&[(0, 1.5), (1, 2.5)], RESIDUE_INDEX_LABEL, B_FACTOR_LABEL)
                .unwrap();
        let path = write_df_to_file(&mut df, &dir.join("bfactors"), DataFrameFileType::Csv).unwrap();
        assert!(path.ends_with("bfactors.csv"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "residue_index,b_factor\n0,1.5\n1,2.5\n"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn b_factor_table_replaces_previous_file() {
        let dir = scratch_dir("replace");
        let stale = "residue_index,b_factor\n".to_string() + &"9,99.9\n".repeat(100);
        std::fs::write(dir.join("bfactors.csv"), &stale).unwrap();

        let mut df =
            temperature_factors_to_df(&[(0, 4.5)], RESIDUE_INDEX_LABEL, B_FACTOR_LABEL).unwrap();
        let path = write_df_to_file(&mut df, &dir.join("bfactors"), DataFrameFileType::Csv).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "residue_index,b_factor\n0,4.5\n"
        );
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
