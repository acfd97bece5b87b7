//! Re-openable line sources.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use super::parse::is_metadata;

/// Something the engine can read from start to end, once per pass.
pub trait TransactionSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
    /// Short human-readable name used in error contexts.
    fn describe(&self) -> String;
}

/// Database stored in a file.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionSource for FileSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Database held in memory, in the same line format as a file.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    text: String,
}

impl MemorySource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for l in lines {
            text.push_str(l.as_ref());
            text.push('\n');
        }
        Self { text }
    }
}

impl TransactionSource for MemorySource {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// A data line with its 1-based file line number and its 0-based data-line ordinal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLine {
    pub line: usize,
    pub ordinal: usize,
    pub text: String,
}

/// Iterate data lines in file order, skipping metadata.
pub fn data_lines<'a>(
    reader: Box<dyn BufRead + 'a>,
) -> impl Iterator<Item = io::Result<DataLine>> + 'a {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, res)| match res {
            Ok(text) if is_metadata(&text) => None,
            Ok(text) => Some(Ok((idx + 1, text))),
            Err(e) => Some(Err(e)),
        })
        .enumerate()
        .map(|(ordinal, res)| res.map(|(line, text)| DataLine { line, ordinal, text }))
}
