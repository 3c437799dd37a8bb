//! File discovery for finding images in directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Discovers image files in directories.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Discover all supported image files under a directory.
    ///
    /// Traversal descends at most `max_depth` levels when given (unlimited
    /// otherwise). The result is path-sorted so the unsorted barcode is
    /// deterministic across runs.
    pub fn discover(&self, root: &Path, max_depth: Option<usize>) -> Vec<PathBuf> {
        let mut walker = WalkDir::new(root).follow_links(true);
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && self.is_supported(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.to_lowercase() == ext_lower)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(ProcessingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.tiff")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("no_extension")));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let discovery = FileDiscovery::new(ProcessingConfig::default());
        let files = discovery.discover(dir.path(), None);

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.png"));
        assert!(files[1].ends_with("b.jpg"));
    }

    #[test]
    fn test_discover_respects_max_depth() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("top.jpg"), b"x").unwrap();
        std::fs::write(nested.join("below.jpg"), b"x").unwrap();

        let discovery = FileDiscovery::new(ProcessingConfig::default());

        let shallow = discovery.discover(dir.path(), Some(1));
        assert_eq!(shallow.len(), 1);
        assert!(shallow[0].ends_with("top.jpg"));

        let all = discovery.discover(dir.path(), None);
        assert_eq!(all.len(), 2);
    }
}
