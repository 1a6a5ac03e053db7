//! Crash-safe whole-file replacement.
//!
//! # Invariants
//! - Readers observe either the previous or the new content, never a prefix.
//! - A failed write leaves no temporary file behind.

use std::io::{self, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

const TEMP_PREFIX: &str = ".recipebook-";
const TEMP_SUFFIX: &str = ".tmp";

/// Replaces `path` with `bytes` via temp file + fsync + rename.
///
/// The temp file lives in the target directory so the rename never crosses a
/// filesystem boundary. `NamedTempFile` deletes itself when dropped on an
/// error path.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut temp = temp_file_beside(path)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

fn temp_file_beside(path: &Path) -> io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
}

#[cfg(test)]
mod tests {
    use super::{write_atomically, TEMP_PREFIX};
    use std::fs;

    fn leftover_temp_files(dir: &std::path::Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(TEMP_PREFIX))
            .count()
    }

    #[test]
    fn replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, b"old content that is longer").unwrap();

        write_atomically(&path, b"[]").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"[]");
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be replaced by a regular file.
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        assert!(write_atomically(&target, b"[]").is_err());
        assert!(target.is_dir());
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }
}
