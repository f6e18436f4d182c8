use std::path::PathBuf;

use anyhow::{Context, Result};
use glob::glob;

/// Expands each pattern into the files it matches, in pattern order.
/// A plain path that exists is taken as-is; a pattern matching no file is
/// an error.
pub fn expand_inputs<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let literal = PathBuf::from(pattern);
        if literal.is_file() {
            resolved.push(literal);
            continue;
        }

        let matches =
            glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
        let mut found = false;
        for entry in matches {
            let path = entry?;
            if path.is_file() {
                resolved.push(path);
                found = true;
            }
        }
        if !found {
            anyhow::bail!("No inputs matched pattern: {pattern}");
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn expands_globs_and_literals() {
        let dir = tempdir().unwrap();
        for name in ["a.mp4", "b.mp4", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let pattern = format!("{}/*.mp4", dir.path().display());
        let literal = dir.path().join("notes.txt").display().to_string();

        let inputs = expand_inputs(&[pattern, literal]).unwrap();
        assert_eq!(inputs.len(), 3);
        assert!(inputs[0].ends_with("a.mp4"));
        assert!(inputs[2].ends_with("notes.txt"));
    }

    #[test]
    fn unmatched_pattern_fails() {
        let dir = tempdir().unwrap();
        let pattern = format!("{}/*.mkv", dir.path().display());
        assert!(expand_inputs(&[pattern]).is_err());
    }
}
