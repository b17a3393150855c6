//! Single-call entry operations: existence, move, remove, create.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::Result;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;

/// Whether `path` exists, following symbolic links (a dangling link is `false`).
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).is_ok()
}

/// Move `src` to `dst` with a single rename. An existing destination file is
/// replaced; moving across filesystems fails with `Io`.
pub fn move_path<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    try_atomic_move(src, dst)?;
    debug!(src = %src.display(), dst = %dst.display(), "moved");
    Ok(())
}

/// Remove a file or symbolic link.
pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::remove_file(path).map_err(io_error_with_help("remove file", path))?;
    debug!(path = %path.display(), "removed file");
    Ok(())
}

/// Remove an empty directory.
pub fn remove_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::remove_dir(path).map_err(io_error_with_help("remove directory", path))?;
    debug!(path = %path.display(), "removed directory");
    Ok(())
}

/// Create one directory; the parent must already exist.
pub fn create_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir(path).map_err(io_error_with_help("create directory", path))?;
    debug!(path = %path.display(), "created directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FsError;
    use tempfile::tempdir;

    #[test]
    fn create_then_remove_dir() {
        let td = tempdir().unwrap();
        let d = td.path().join("fresh");
        create_dir(&d).unwrap();
        assert!(d.is_dir());
        assert!(matches!(create_dir(&d).unwrap_err(), FsError::AlreadyExists(_)));
        remove_dir(&d).unwrap();
        assert!(!exists(&d));
    }

    #[test]
    fn remove_dir_refuses_non_empty() {
        let td = tempdir().unwrap();
        let d = td.path().join("full");
        fs::create_dir(&d).unwrap();
        fs::write(d.join("f"), b"").unwrap();
        assert!(remove_dir(&d).is_err());
        assert!(d.is_dir());
    }

    #[test]
    fn move_replaces_existing_file() {
        let td = tempdir().unwrap();
        let a = td.path().join("a");
        let b = td.path().join("b");
        fs::write(&a, b"new").unwrap();
        fs::write(&b, b"old").unwrap();
        move_path(&a, &b).unwrap();
        assert!(!exists(&a));
        assert_eq!(fs::read(&b).unwrap(), b"new");
    }

    #[test]
    fn remove_missing_file_is_not_found() {
        let td = tempdir().unwrap();
        let err = remove_file(td.path().join("ghost")).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }
}
