//! Archive handling for DOCX files
//!
//! DOCX files are ZIP archives containing XML parts and media. The whole
//! package is unpacked into memory once; parts are then served by path.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use zip::read::ZipArchive;

use wordhtml_ast::ImageOpener;

use crate::error::{OoxmlError, Result};

/// Represents an unpacked OOXML package
#[derive(Debug, Default)]
pub struct OoxmlArchive {
    /// All files in the archive, keyed by path
    files: HashMap<String, Arc<[u8]>>,
}

impl OoxmlArchive {
    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, Arc::from(contents));
        }

        debug!(parts = files.len(), "unpacked docx archive");
        Ok(Self { files })
    }

    /// Create from bytes of a ZIP file held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Build an archive directly from (path, contents) pairs
    pub fn from_parts<I, P, C>(parts: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<Vec<u8>>,
    {
        Self {
            files: parts
                .into_iter()
                .map(|(path, contents)| (path.into(), Arc::from(contents.into())))
                .collect(),
        }
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_ref())
    }

    /// Get a file's contents, failing if the part is absent
    pub fn require(&self, path: &str) -> Result<&[u8]> {
        self.get(path)
            .ok_or_else(|| OoxmlError::MissingFile(path.to_string()))
    }

    /// Check if a file exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all files in the archive
    pub fn file_list(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_str())
    }

    /// Open a stream over a part
    pub fn open_part(&self, path: &str) -> io::Result<Box<dyn Read>> {
        match self.files.get(path) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.to_vec()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Could not find file in docx: {}", path),
            )),
        }
    }

    /// A lazy opener for a part, resolved only when the image is rendered
    pub fn part_opener(self: &Arc<Self>, path: &str) -> ImageOpener {
        let archive = Arc::clone(self);
        let path = path.to_string();
        ImageOpener::new(move || archive.open_part(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[test]
    fn test_file_operations() {
        let archive = OoxmlArchive::from_parts([("word/document.xml", "<root/>")]);
        assert!(archive.contains("word/document.xml"));
        assert_eq!(archive.get("word/document.xml"), Some(&b"<root/>"[..]));
        assert!(archive.get("word/styles.xml").is_none());
    }

    #[test]
    fn test_require_missing_part() {
        let archive = OoxmlArchive::default();
        let err = archive.require("word/document.xml").unwrap_err();
        assert!(matches!(err, OoxmlError::MissingFile(ref p) if p == "word/document.xml"));
    }

    #[test]
    fn test_open_part_reads_bytes() {
        let archive = OoxmlArchive::from_parts([("word/media/image1.png", vec![1u8, 2, 3])]);
        let mut bytes = Vec::new();
        archive
            .open_part("word/media/image1.png")
            .unwrap()
            .read_to_end(&mut bytes)
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_part_opener_missing_part_is_io_error() {
        let archive = Arc::new(OoxmlArchive::default());
        let opener = archive.part_opener("word/media/missing.png");
        let err = opener.open().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("word/media/missing.png"));
    }

    #[test]
    fn test_roundtrip_from_zip_bytes() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            let options = SimpleFileOptions::default();
            zip.add_directory("word/", options).unwrap();
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(b"<w:document/>").unwrap();
            zip.finish().unwrap();
        }

        let archive = OoxmlArchive::from_bytes(buffer.get_ref()).unwrap();
        assert!(archive.contains("word/document.xml"));
        assert_eq!(archive.file_list().count(), 1);
    }
}
