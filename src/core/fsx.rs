//! Filesystem access layer for rill.
//!
//! Everything the column engine knows about the disk goes through the [Fs]
//! trait: listing a directory, probing accessibility, and classifying a path.
//! The production implementation is [OsFs]; tests substitute their own.

use std::fs;
use std::io;
use std::path::Path;

/// A single entry in a directory listing.
///
/// Created and populated by [Fs::list_entries].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    name: String,
    is_dir: bool,
}

impl DirEntry {
    pub fn new(name: String, is_dir: bool) -> Self {
        DirEntry { name, is_dir }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// The filesystem collaborator used by the column engine.
///
/// All calls are synchronous and may block on slow storage.
pub trait Fs {
    /// Lists the entries of `path`, ordered by name (case-insensitive).
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Checks whether a path can be moved into.
    ///
    /// The check sequence matters: exists, then resides on a filesystem with
    /// nonzero capacity, then readable. A failed check short-circuits the
    /// rest.
    fn is_accessible(&self, path: &Path) -> bool;

    /// Checks whether `path` is a directory.
    fn is_directory(&self, path: &Path) -> bool;
}

/// [Fs] implementation backed by the real operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl Fs for OsFs {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::with_capacity(64);

        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so a link to a directory colors and enters
            // like one; a broken link counts as a plain file.
            let is_dir = entry.path().is_dir();
            entries.push(DirEntry::new(name, is_dir));
        }

        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(entries)
    }

    fn is_accessible(&self, path: &Path) -> bool {
        path.exists() && has_capacity(path) && is_readable(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Probes whether the filesystem holding `path` reports any blocks at all.
///
/// Pseudo-filesystems and dead mounts report zero capacity; descending into
/// them hangs or lies, so they are treated as inaccessible.
#[cfg(unix)]
fn has_capacity(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    let mut vfs: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut vfs) };
    rc == 0 && vfs.f_blocks > 0
}

#[cfg(not(unix))]
fn has_capacity(_path: &Path) -> bool {
    true
}

#[cfg(unix)]
fn is_readable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::R_OK) == 0 }
}

#[cfg(not(unix))]
fn is_readable(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// In-memory [Fs] for exercising paths the real filesystem cannot produce
/// deterministically (denied access, listings that fail mid-session).
#[cfg(test)]
pub mod testfs {
    use super::{DirEntry, Fs};
    use std::collections::{HashMap, HashSet};
    use std::io;
    use std::path::{Path, PathBuf};

    #[derive(Default)]
    pub struct MockFs {
        dirs: HashMap<PathBuf, Vec<DirEntry>>,
        files: HashSet<PathBuf>,
        denied: HashSet<PathBuf>,
        failing: HashSet<PathBuf>,
    }

    impl MockFs {
        pub fn with_dir(mut self, path: &str, entries: &[(&str, bool)]) -> Self {
            self.dirs.insert(
                PathBuf::from(path),
                entries
                    .iter()
                    .map(|(name, is_dir)| DirEntry::new(name.to_string(), *is_dir))
                    .collect(),
            );
            self
        }

        pub fn with_file(mut self, path: &str) -> Self {
            self.files.insert(PathBuf::from(path));
            self
        }

        /// Marks `path` as failing the access checks.
        pub fn deny(mut self, path: &str) -> Self {
            self.denied.insert(PathBuf::from(path));
            self
        }

        /// Makes listing `path` return an error while the path itself stays
        /// accessible.
        pub fn fail_listing(mut self, path: &str) -> Self {
            self.failing.insert(PathBuf::from(path));
            self
        }
    }

    impl Fs for MockFs {
        fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
            if self.failing.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "listing failed",
                ));
            }
            self.dirs
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
        }

        fn is_accessible(&self, path: &Path) -> bool {
            !self.denied.contains(path)
                && (self.dirs.contains_key(path) || self.files.contains(path))
        }

        fn is_directory(&self, path: &Path) -> bool {
            self.dirs.contains_key(path)
        }
    }
}
