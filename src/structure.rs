use crate::records::Record;
use crate::Error;
use std::path::Path;

/// The raw lines of one structure file, as read from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureFile {
    id: String,
    lines: Vec<String>,
}

impl StructureFile {
    /// Split `text` into lines. The structure ID is upper-cased.
    pub fn from_text(id: &str, text: &str) -> Self {
        Self {
            id: id.trim().to_uppercase(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Read a structure file from disk. The ID is taken from the file stem.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
        let id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        Ok(Self::from_text(id, &text))
    }

    /// Upper-cased structure ID, e.g. `1HHP`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw lines in file order, without line terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Classify every line, in file order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.lines.iter().map(|line| Record::classify(line))
    }

    /// The whole file, newline terminated.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
