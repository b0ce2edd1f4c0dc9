//! Reading classification input from files and stdin

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Label used for text read from standard input
pub const STDIN_LABEL: &str = "<stdin>";

/// One unit of text to classify, with the label it is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText {
    /// File path, `path:line`, or [`STDIN_LABEL`]
    pub source: String,
    /// Raw bytes; no decoding is applied
    pub bytes: Vec<u8>,
}

/// File reader for raw byte input
pub struct FileReader;

impl FileReader {
    /// Read a whole file as bytes
    pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read all of standard input
    pub fn read_stdin() -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Failed to read standard input")?;
        Ok(buffer)
    }

    /// Split `bytes` into one input per line.
    ///
    /// Lines are labelled `source:N` (1-based). Line terminators, including
    /// a trailing `\r`, are stripped; empty lines are kept so numbering
    /// matches the file.
    pub fn split_lines(source: &str, bytes: &[u8]) -> Vec<InputText> {
        if bytes.is_empty() {
            return Vec::new();
        }
        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);

        body.split(|&b| b == b'\n')
            .enumerate()
            .map(|(i, line)| InputText {
                source: format!("{source}:{}", i + 1),
                bytes: line.strip_suffix(b"\r").unwrap_or(line).to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_bytes_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, b"caf\xc3\xa9 \xff").unwrap();

        assert_eq!(FileReader::read_bytes(&file_path).unwrap(), b"caf\xc3\xa9 \xff");
    }

    #[test]
    fn test_read_bytes_nonexistent_file() {
        let err = FileReader::read_bytes(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_split_lines() {
        let lines = FileReader::split_lines("f.txt", b"one\r\n\nthree\n");
        let sources: Vec<_> = lines.iter().map(|l| l.source.as_str()).collect();
        assert_eq!(sources, vec!["f.txt:1", "f.txt:2", "f.txt:3"]);
        assert_eq!(lines[0].bytes, b"one");
        assert!(lines[1].bytes.is_empty());
        assert_eq!(lines[2].bytes, b"three");
    }

    #[test]
    fn test_split_lines_without_trailing_newline() {
        let lines = FileReader::split_lines("f", b"a\nb");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].bytes, b"b");
    }

    #[test]
    fn test_split_lines_empty_input() {
        assert!(FileReader::split_lines("f", b"").is_empty());
        // A lone newline is one empty line
        assert_eq!(FileReader::split_lines("f", b"\n").len(), 1);
    }
}
