// src/anthology/reader.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lazily yields the lines of an anthology file with line terminators removed.
///
/// `\n` and `\r\n` endings are both accepted. Invalid UTF-8 surfaces as an
/// `io::Error` item rather than a panic.
pub struct AnthologyLines<R: BufRead> {
    reader: R,
}

impl<R: BufRead> Iterator for AnthologyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with('\n') {
                    buf.pop();
                    if buf.ends_with('\r') {
                        buf.pop();
                    }
                }
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

pub fn lines_from_reader<R: BufRead>(reader: R) -> AnthologyLines<R> {
    AnthologyLines { reader }
}

/// Opens the anthology for a single sequential pass.
pub fn open_anthology<P: AsRef<Path>>(path: P) -> io::Result<AnthologyLines<BufReader<File>>> {
    let path = path.as_ref();
    tracing::info!("Reading anthology from: {}", path.display());
    let file = File::open(path)?;
    Ok(lines_from_reader(BufReader::new(file)))
}

/// Adapts a fallible line source into the plain line iterator the extractors
/// consume. The first read error stops the stream and is kept in `error`.
pub struct UntilError<I> {
    inner: I,
    pub error: Option<io::Error>,
}

impl<I> UntilError<I> {
    pub fn new(inner: I) -> Self {
        Self { inner, error: None }
    }

    /// Returns the error that stopped the stream, if any.
    pub fn into_result(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<I: Iterator<Item = io::Result<String>>> Iterator for UntilError<I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        match self.inner.next()? {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::error!("Failed to read anthology line: {}", e);
                self.error = Some(e);
                None
            }
        }
    }
}
