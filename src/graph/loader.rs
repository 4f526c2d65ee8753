//! Sources of imported (`.search`) documents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::document::Blif;
use crate::error::{BlifError, Result};
use crate::parser;

/// Resolves a `.search` path to a parsed document.
pub trait DocumentLoader {
    fn load(&self, path: &str) -> Result<Blif>;
}

/// Loads imported documents from the file system.
///
/// Relative paths resolve against `base_dir` when set, otherwise against
/// the process working directory.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    base_dir: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir`.
    pub fn relative_to(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    /// Resolve relative paths against the directory holding `file`.
    pub fn beside(file: &Path) -> Self {
        match file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Self::relative_to(dir),
            _ => Self::new(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentLoader for FileLoader {
    fn load(&self, path: &str) -> Result<Blif> {
        parser::parse_file(&self.resolve(path))
    }
}

/// Serves imported documents from in-memory sources keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(path.into(), source.into());
    }
}

impl DocumentLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<Blif> {
        self.sources
            .get(path)
            .map(|source| parser::parse_str(source))
            .ok_or_else(|| BlifError::ImportNotFound {
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_loader() {
        let loader = MemoryLoader::new().with_source("lib.blif", ".model lib\n.end\n");
        assert_eq!(loader.load("lib.blif").unwrap().model_name(), Some("lib"));
        assert!(matches!(
            loader.load("other.blif"),
            Err(BlifError::ImportNotFound { .. })
        ));
    }

    #[test]
    fn test_file_loader_resolves_beside_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lib.blif"), ".model lib\n.end\n").unwrap();

        let loader = FileLoader::beside(&dir.path().join("top.blif"));
        assert_eq!(loader.load("lib.blif").unwrap().model_name(), Some("lib"));
        assert!(matches!(
            loader.load("missing.blif"),
            Err(BlifError::FileReadError { .. })
        ));
    }
}
