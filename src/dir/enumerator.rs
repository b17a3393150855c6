use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Platform seam for directory enumeration cursors.
///
/// A cursor yields raw entry names, `.` and `..` included, in whatever order
/// the OS produces them. Dropping a cursor must release the OS resource;
/// `close` does the same but reports the release error.
pub trait DirectoryEnumerator: Sized {
    /// Open a cursor over `path`.
    ///
    /// Backends whose native API hands out the first match while creating the
    /// cursor return that name here instead of dropping it; everyone else
    /// returns `None` and produces the first name from `next_name`.
    fn open(path: &Path) -> io::Result<(Self, Option<OsString>)>;

    /// Next raw name, or `None` once the listing is exhausted.
    fn next_name(&mut self) -> io::Result<Option<OsString>>;

    /// Release the cursor.
    fn close(self) -> io::Result<()>;
}
