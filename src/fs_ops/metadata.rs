//! Timestamps and permission bits.
//! - `times` reports modification/access time as seconds since the Unix epoch.
//! - The `preserve_*` helpers copy permissions (mode on Unix, readonly on
//!   Windows) and timestamps from a source onto a destination. They are
//!   best-effort: failures are logged and swallowed.

use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

use crate::errors::Result;

use super::helpers::io_error_with_help;

/// Modification and access time, in seconds since the Unix epoch on every
/// platform (Windows FILETIME values are rebased by the conversion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimes {
    pub modified: i64,
    pub accessed: i64,
}

/// Read the timestamps of `path`, following symbolic links.
pub fn times<P: AsRef<Path>>(path: P) -> Result<FileTimes> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(io_error_with_help("stat", path))?;
    Ok(FileTimes {
        modified: FileTime::from_last_modification_time(&meta).unix_seconds(),
        accessed: FileTime::from_last_access_time(&meta).unix_seconds(),
    })
}

/// Copy permission bits from `src_meta` onto `dest`.
pub(super) fn preserve_permissions(dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let src_mode = src_meta.permissions().mode() & 0o7777;
        let perms = fs::Permissions::from_mode(src_mode);
        if let Err(e) = fs::set_permissions(dest, perms) {
            warn!(path = %dest.display(), mode = format!("{:o}", src_mode), error = %e, "failed to set permissions on destination");
        } else {
            trace!(path = %dest.display(), mode = format!("{:o}", src_mode), "set permissions on destination");
        }
    }

    #[cfg(windows)]
    {
        let ro = src_meta.permissions().readonly();
        match fs::metadata(dest) {
            Ok(meta) => {
                let mut perms = meta.permissions();
                perms.set_readonly(ro);
                if let Err(e) = fs::set_permissions(dest, perms) {
                    warn!(path = %dest.display(), readonly = ro, error = %e, "failed to set readonly attribute on destination");
                } else {
                    trace!(path = %dest.display(), readonly = ro, "set readonly attribute on destination");
                }
            }
            Err(e) => {
                warn!(path = %dest.display(), error = %e, "failed to stat destination for readonly preservation");
            }
        }
    }
}

/// Copy access/modification times from `src_meta` onto `dest`.
pub(super) fn preserve_times(dest: &Path, src_meta: &fs::Metadata) {
    let at = FileTime::from_last_access_time(src_meta);
    let mt = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FsError;
    use filetime::set_file_mtime;
    use tempfile::tempdir;

    #[test]
    fn times_reports_unix_seconds() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("stamped");
        fs::write(&p, b"x").unwrap();
        set_file_times(&p, FileTime::from_unix_time(1_000_000, 0), FileTime::from_unix_time(2_000_000, 0)).unwrap();

        let t = times(&p).unwrap();
        assert_eq!(t.modified, 2_000_000);
        assert_eq!(t.accessed, 1_000_000);
    }

    #[test]
    fn times_of_missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        let err = times(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn preserve_times_copies_mtime() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::write(&src, b"a").unwrap();
        fs::write(&dst, b"b").unwrap();
        set_file_mtime(&src, FileTime::from_unix_time(1_234_567, 0)).unwrap();

        preserve_times(&dst, &fs::metadata(&src).unwrap());
        assert_eq!(times(&dst).unwrap().modified, 1_234_567);
    }
}
