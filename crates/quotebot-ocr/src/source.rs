//! Local directory document source

use crate::error::OcrError;
use quotebot_domain::traits::DocumentSource;
use quotebot_domain::DocumentRef;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lists documents in a directory by extension
///
/// Only regular files directly inside the directory are listed; extension
/// matching ignores case. Documents come back sorted by file name so runs are
/// reproducible.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl DirectorySource {
    /// Source listing `.pdf` files in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extensions: vec!["pdf".to_string()],
        }
    }

    /// Replace the accepted extensions (without the leading dot)
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Directory being listed
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|accepted| *accepted == ext))
    }
}

impl DocumentSource for DirectorySource {
    type Error = OcrError;

    fn list_documents(&self) -> Result<Vec<DocumentRef>, Self::Error> {
        let mut documents = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && self.accepts(&path) {
                debug!("Found document: {}", path.display());
                documents.push(DocumentRef::from_path(path));
            }
        }
        documents.sort_by(|a, b| a.id.cmp(&b.id));

        info!("Found {} document(s) in {}", documents.len(), self.dir.display());
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_pdfs_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let docs = DirectorySource::new(dir.path()).list_documents().unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a.PDF", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"x").unwrap();
        fs::write(dir.path().join("b.pdf"), b"x").unwrap();

        let docs = DirectorySource::new(dir.path())
            .with_extensions([".txt"])
            .list_documents()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "a.txt");
    }

    #[test]
    fn test_missing_directory() {
        let result = DirectorySource::new("/nonexistent/quotebot/input").list_documents();
        assert!(matches!(result, Err(OcrError::Io(_))));
    }
}
