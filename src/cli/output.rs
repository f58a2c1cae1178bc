//! Output helpers for the CLI

use std::io::{self, Write};
use std::path::Path;

/// Format error message for display
pub fn format_error(operation: &str, details: &str) -> String {
    format!("ERROR: {} - {}", operation, details)
}

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&Path>) -> Result<(), String> {
    if let Some(path) = path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format_error("create directory", &format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| format_error("write file", &format!("{}: {}", path.display(), e)))?;
        log::info!("Wrote {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", content).map_err(|e| format_error("write stdout", &e.to_string()))?;
        stdout.flush().map_err(|e| format_error("flush stdout", &e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_format() {
        assert_eq!(format_error("parse", "bad json"), "ERROR: parse - bad json");
    }

    #[test]
    fn writes_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        write_output("{}", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
