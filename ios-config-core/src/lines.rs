use std::fs;
use std::path::Path;

/// Raw lines of one configuration file.
///
/// Leading whitespace is kept: indentation decides which lines belong to an
/// `interface` stanza. Trailing `\r` from CRLF files is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSource {
    lines: Vec<String>,
}

impl LineSource {
    /// Split `text` into lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(ToOwned::to_owned).collect(),
        }
    }

    /// Decode bytes as UTF-8, replacing invalid sequences.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_text(&String::from_utf8_lossy(bytes))
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Whitespace-delimited fields of a line.
pub(crate) fn fields(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// The field at `index`, if the line has that many.
pub(crate) fn field(line: &str, index: usize) -> Option<&str> {
    line.split_whitespace().nth(index)
}

/// True when the line is part of an indented stanza body.
pub(crate) fn is_indented(line: &str) -> bool {
    line.starts_with(' ')
}
