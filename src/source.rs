use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a definition file, normalizing CRLF line endings.
pub fn read_source(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if text.contains("\r\n") {
        return Ok(text.replace("\r\n", "\n"));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_line_endings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("A.java");
        fs::write(&path, "/** a */\r\nint A = 1;\r\n").expect("write");
        assert_eq!(read_source(&path).expect("read"), "/** a */\nint A = 1;\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Missing.java");
        let err = read_source(&path).unwrap_err();
        assert!(err.to_string().contains("Missing.java"));
    }
}
