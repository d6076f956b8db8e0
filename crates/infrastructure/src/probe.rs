//! On-disk path probe

use std::path::Path;

use seltzer_application::ports::PathProbe;

/// A probe answering from the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdPathProbe;

impl StdPathProbe {
    /// Creates a new probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PathProbe for StdPathProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn reports_existence_and_kind() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("probe.txt");
        fs::write(&file, "x").unwrap();

        let probe = StdPathProbe::new();
        assert!(probe.exists(&file));
        assert!(probe.is_file(&file));
        assert!(!probe.is_dir(&file));

        assert!(probe.exists(dir.path()));
        assert!(probe.is_dir(dir.path()));
        assert!(!probe.is_file(dir.path()));

        assert!(!probe.exists(&dir.path().join("missing")));
    }
}
