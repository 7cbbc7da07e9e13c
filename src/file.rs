//! Filesystem helpers.

use anyhow::Result;
use std::path::Path;

/// Returns whether anything exists at `path`.
///
/// ## Returns
/// - `Ok(true)` - Something exists at `path`.
/// - `Ok(false)` - Nothing exists at `path`.
/// - `Err(_)` - Existence could not be determined, e.g. a parent directory is not readable.
pub fn exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    path.as_ref().try_exists().map_err(Into::into)
}

#[cfg(test)]
mod test {
    use super::exists;

    #[test]
    fn missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!exists(dir.path().join("nope")).unwrap());
    }

    #[test]
    fn existing_file_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "").unwrap();

        assert!(exists(dir.path()).unwrap());
        assert!(exists(&file).unwrap());
    }
}
