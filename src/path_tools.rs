//! Pure path-string helpers: basename, extension handling and joining.
//!
//! Nothing here touches the filesystem and nothing normalizes: `join` does not
//! collapse duplicate separators or resolve `.`/`..`, and both `/` and `\` are
//! treated as separators when splitting regardless of platform.

use std::ffi::{OsStr, OsString};
use std::path::MAIN_SEPARATOR_STR;

#[inline]
fn is_separator(c: u8) -> bool {
    c == b'/' || c == b'\\'
}

/// Final component of `path`: everything after the last `/` or `\`.
/// A path without separators is returned whole; a trailing separator yields "".
pub fn basename(path: &str) -> &str {
    match path.bytes().rposition(is_separator) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// `basename` for platform-native strings, so non-UTF-8 entry names work too.
pub fn basename_os(path: &OsStr) -> &OsStr {
    let bytes = path.as_encoded_bytes();
    match bytes.iter().rposition(|&c| is_separator(c)) {
        // SAFETY: the split is immediately after an ASCII separator, which is
        // a valid boundary for the platform encoding.
        Some(i) => unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[i + 1..]) },
        None => path,
    }
}

/// Byte offset of the last `.` inside the basename, if any.
fn extension_dot(path: &str) -> Option<usize> {
    let base_start = path.len() - basename(path).len();
    path[base_start..].rfind('.').map(|i| base_start + i)
}

/// Text after the last `.` of the basename.
///
/// When the basename has no `.` the whole input comes back unchanged; callers
/// that need to tell "no extension" apart should use [`has_extension`].
pub fn extension(path: &str) -> &str {
    match extension_dot(path) {
        Some(dot) => &path[dot + 1..],
        None => path,
    }
}

/// Whether the basename carries a `.` at all.
pub fn has_extension(path: &str) -> bool {
    extension_dot(path).is_some()
}

/// `path` with its final `.extension` removed. A path whose basename has no
/// `.` is returned unchanged.
pub fn remove_extension(path: &str) -> String {
    match extension_dot(path) {
        Some(dot) => path[..dot].to_owned(),
        None => path.to_owned(),
    }
}

/// Truncate at the basename's last `.` (or keep everything if there is none)
/// and append `.new_ext`.
pub fn replace_extension(path: &str, new_ext: &str) -> String {
    let stem = match extension_dot(path) {
        Some(dot) => &path[..dot],
        None => path,
    };
    let mut out = String::with_capacity(stem.len() + 1 + new_ext.len());
    out.push_str(stem);
    out.push('.');
    out.push_str(new_ext);
    out
}

/// Concatenate `base` and each component with the platform separator.
pub fn join<B, I, C>(base: B, components: I) -> OsString
where
    B: AsRef<OsStr>,
    I: IntoIterator<Item = C>,
    C: AsRef<OsStr>,
{
    let mut out = base.as_ref().to_os_string();
    for c in components {
        out.push(MAIN_SEPARATOR_STR);
        out.push(c.as_ref());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::MAIN_SEPARATOR;

    #[test]
    fn basename_cases() {
        assert_eq!(basename("a/b/c.txt"), "c.txt");
        assert_eq!(basename("a\\b\\c.txt"), "c.txt");
        assert_eq!(basename("mixed/dir\\file"), "file");
        assert_eq!(basename("plain"), "plain");
        assert_eq!(basename("/rooted"), "rooted");
        assert_eq!(basename("trailing/"), "");
        assert_eq!(basename(""), "");
        assert_eq!(basename("dir/."), ".");
        assert_eq!(basename("dir/.."), "..");
    }

    #[test]
    fn basename_os_matches_str_version() {
        for p in ["a/b", "x\\y", "nosep", "dir/.hidden", ""] {
            assert_eq!(basename_os(OsStr::new(p)), OsStr::new(basename(p)));
        }
    }

    #[test]
    fn extension_handling_on_multi_dot_name() {
        assert_eq!(extension("a/b.tar.gz"), "gz");
        assert_eq!(remove_extension("a/b.tar.gz"), "a/b.tar");
        assert_eq!(replace_extension("a/b.tar.gz", "zip"), "a/b.tar.zip");
    }

    #[test]
    fn no_dot_falls_back_to_whole_input() {
        assert_eq!(extension("README"), "README");
        assert!(!has_extension("README"));
        assert_eq!(remove_extension("README"), "README");
        assert_eq!(replace_extension("README", "md"), "README.md");
    }

    #[test]
    fn dots_in_parent_directories_are_ignored() {
        assert_eq!(extension("v1.2/Makefile"), "v1.2/Makefile");
        assert_eq!(remove_extension("v1.2/Makefile"), "v1.2/Makefile");
        assert_eq!(replace_extension("v1.2/Makefile", "bak"), "v1.2/Makefile.bak");
    }

    #[test]
    fn dotfile_extension_is_its_name() {
        assert_eq!(extension(".gitignore"), "gitignore");
        assert_eq!(remove_extension(".gitignore"), "");
        assert_eq!(replace_extension("name.", "txt"), "name.txt");
    }

    #[test]
    fn join_uses_platform_separator_without_normalizing() {
        let sep = MAIN_SEPARATOR;
        assert_eq!(join("a", ["b", "c"]), OsString::from(format!("a{sep}b{sep}c")));
        assert_eq!(join("a/", ["b"]), OsString::from(format!("a/{sep}b")));
        assert_eq!(join("a", ["..", "."]), OsString::from(format!("a{sep}..{sep}.")));
        assert_eq!(join("alone", Vec::<&str>::new()), OsString::from("alone"));
    }
}
