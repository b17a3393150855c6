use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Hidden sibling name in `dst_dir` for staging a copy before the final rename.
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!(".cfs.{pid}.{nanos}.tmp"))
}

/// Directory that will hold `path`; "." for a bare file name.
pub(super) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}

#[cfg(windows)]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_of_bare_name_is_current_dir() {
        assert_eq!(parent_dir(Path::new("file.txt")), Path::new("."));
        assert_eq!(parent_dir(Path::new("a/file.txt")), Path::new("a"));
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let p = unique_temp_path(Path::new("dest"));
        assert_eq!(p.parent(), Some(Path::new("dest")));
        let name = p.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with(".cfs.") && name.ends_with(".tmp"), "{name}");
    }
}
