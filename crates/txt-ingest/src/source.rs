//! Input sources: stdin and named files, read completely before parsing.
//!
//! Stdin goes through the [`StdinReader`] trait so tests can supply input
//! without piping anything into the test process.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{IngestError, Result};

/// Abstraction over reading all of stdin.
pub trait StdinReader: Send + Sync {
    /// Read all content from stdin.
    fn read_all(&self) -> io::Result<Vec<u8>>;
}

/// Real stdin reader using std::io.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealStdin;

impl StdinReader for RealStdin {
    fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Mock stdin reader for testing.
#[derive(Debug, Clone, Default)]
pub struct MockStdin {
    content: Vec<u8>,
}

impl MockStdin {
    /// Create a mock that yields `content`.
    pub fn piped(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl StdinReader for MockStdin {
    fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.content.clone())
    }
}

/// Reads all of stdin as UTF-8 text.
pub fn read_stdin(reader: &dyn StdinReader) -> Result<String> {
    let bytes = reader.read_all().map_err(|e| IngestError::read("stdin", e))?;
    decode("stdin", bytes)
}

/// Reads a whole file as UTF-8 text. Errors name the file.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let bytes = fs::read(path).map_err(|e| IngestError::read(&name, e))?;
    tracing::debug!(file = %name, bytes = bytes.len(), "read file");
    decode(&name, bytes)
}

fn decode(name: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| IngestError::read(name, io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mock_stdin_is_read_completely() {
        let text = read_stdin(&MockStdin::piped("a b\nc d\n")).unwrap();
        assert_eq!(text, "a b\nc d\n");
    }

    #[test]
    fn invalid_utf8_names_source() {
        let err = read_stdin(&MockStdin::piped(vec![0xff, 0xfe])).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[test]
    fn read_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x,y\n1,2\n").unwrap();
        assert_eq!(read_file(file.path()).unwrap(), "x,y\n1,2\n");
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_file("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, IngestError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
