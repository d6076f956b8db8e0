//! Path probe port
//!
//! Strict `path`/`file`/`directory` typed lookups need to check what is
//! actually on disk; this port keeps the accessor itself free of file
//! system calls.

use std::path::Path;

/// Port answering existence and kind questions about paths.
pub trait PathProbe {
    /// True when something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// True when `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// True when `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }
}

/// A probe that reports nothing on disk.
///
/// Useful wherever strict path validation is not needed; strict
/// `path`/`file`/`directory` lookups through this probe always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl PathProbe for NullProbe {
    fn exists(&self, _path: &Path) -> bool {
        false
    }

    fn is_file(&self, _path: &Path) -> bool {
        false
    }

    fn is_dir(&self, _path: &Path) -> bool {
        false
    }
}
