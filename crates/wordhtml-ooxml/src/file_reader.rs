//! Access to files outside the package (linked images)

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Opens external files referenced by the document
pub trait FileReader: Send + Sync {
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read>>;
}

/// Resolves relative URIs against the directory of the source document
#[derive(Debug, Clone, Default)]
pub struct PathFileReader {
    base: Option<PathBuf>,
}

impl PathFileReader {
    /// Reader for a document whose location is known
    pub fn relative_to(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    /// Reader for a document read from memory; only absolute paths work
    pub fn detached() -> Self {
        Self::default()
    }

    /// Directory of `document`, or the current directory for a bare file name
    pub fn for_document(document: &Path) -> Self {
        let base = document
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::relative_to(base)
    }

    fn resolve(&self, uri: &str) -> io::Result<PathBuf> {
        let path = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        match &self.base {
            Some(base) => Ok(base.join(path)),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "could not find external image '{}', path of input document is unknown",
                    uri
                ),
            )),
        }
    }
}

impl FileReader for PathFileReader {
    fn open(&self, uri: &str) -> io::Result<Box<dyn Read>> {
        let path = self.resolve(uri)?;
        let file = File::open(&path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("could not open external image '{}': {}", uri, e),
            )
        })?;
        Ok(Box::new(file))
    }
}
