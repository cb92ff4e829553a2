//! Document references

use std::fmt;
use std::path::{Path, PathBuf};

/// A single input document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    /// Identifier used in logs and reports (the file name)
    pub id: String,
    /// Location of the document
    pub path: PathBuf,
}

impl DocumentRef {
    /// Create a reference for a path, using its file name as the id
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { id, path }
    }

    /// File name without extension, used to name derived files
    pub fn stem(&self) -> String {
        Path::new(&self.id)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.clone())
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_uses_file_name() {
        let doc = DocumentRef::from_path("/data/input/proposal_01.pdf");
        assert_eq!(doc.id, "proposal_01.pdf");
        assert_eq!(doc.stem(), "proposal_01");
    }

    #[test]
    fn test_stem_without_extension() {
        let doc = DocumentRef::from_path("scan");
        assert_eq!(doc.stem(), "scan");
    }
}
