//! Utility functions for the CLI

use super::output::format_error;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read input from file
pub fn read_input_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format_error("read file", &format!("{}: {}", path.display(), e)))
}

/// Read a document piped through stdin
pub fn read_stdin() -> Result<String, String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err("No input provided. Pass INPUT files or pipe a document via stdin".to_string());
    }
    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .map_err(|e| format_error("read stdin", &e.to_string()))?;
    if buffer.trim().is_empty() {
        return Err("Empty document on stdin".to_string());
    }
    Ok(buffer)
}

/// Name of a document: the file stem of its path
pub fn document_name(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Where the result for `input` goes inside `dir`
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let name = document_name(input).unwrap_or_else(|| "document".to_string());
    dir.join(format!("{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_stem() {
        assert_eq!(
            output_path(Path::new("out"), Path::new("data/wiki-12.naf.json")),
            PathBuf::from("out/wiki-12.naf.json")
        );
        assert_eq!(document_name(Path::new("a/b.json")).as_deref(), Some("b"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_input_file(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(err.starts_with("ERROR: read file"));
    }
}
