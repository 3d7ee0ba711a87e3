//! ZIP container access
//!
//! Member lookup is exact: case-sensitive, `/`-separated, with no
//! normalization of `.` or `..` segments.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use super::error::{EpubError, Result};

/// An open EPUB archive, released when dropped
pub struct EpubArchive {
    name: String,
    zip: ZipArchive<File>,
}

impl EpubArchive {
    /// Open the archive at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EpubError::ArchiveNotFound(name.clone()),
            _ => EpubError::Io(e),
        })?;
        if !file.metadata()?.is_file() {
            return Err(EpubError::ArchiveNotFound(name));
        }

        let zip = ZipArchive::new(file)?;
        tracing::debug!("Opened archive {} ({} members)", name, zip.len());

        Ok(Self { name, zip })
    }

    /// Path the archive was opened from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full names of every member, in central directory order
    pub fn member_names(&self) -> Vec<String> {
        self.zip.file_names().map(str::to_string).collect()
    }

    /// Open a read stream over the member called exactly `name`
    pub fn find_member(&mut self, name: &str) -> Result<Option<impl Read + '_>> {
        match self.zip.by_name(name) {
            Ok(file) => Ok(Some(file)),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a whole member into memory
    pub fn read_member(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let Some(mut file) = self.find_member(name)? else {
            return Ok(None);
        };
        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(Some(content))
    }

    /// Read a member as UTF-8 text; invalid sequences are replaced
    pub fn read_member_to_string(&mut self, name: &str) -> Result<Option<String>> {
        Ok(self
            .read_member(name)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! In-memory EPUB builders shared by the unit tests

    use std::io::{Cursor, Write};
    use std::path::{Path, PathBuf};

    use zip::{write::SimpleFileOptions, ZipWriter};

    pub const CONTAINER_XML: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

    pub const CONTENT_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="3.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:1234</dc:identifier>
    <dc:title>Test Book</dc:title>
    <dc:creator>Jane Doe</dc:creator>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="chapter1" href="chapter1.xhtml" media-type="application/xhtml+xml"/>
    <item id="style" href="style.css" media-type="text/css"/>
  </manifest>
  <spine>
    <itemref idref="chapter1"/>
  </spine>
</package>"#;

    pub const STYLE_CSS: &[u8] = b"body { margin: 0; }\n";

    /// In-memory ZIP builder
    #[derive(Default)]
    pub struct ZipFixture {
        entries: Vec<(String, Vec<u8>)>,
    }

    impl ZipFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn file(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
            self.entries.push((name.to_string(), content.as_ref().to_vec()));
            self
        }

        pub fn build(&self) -> Vec<u8> {
            let mut buffer = Vec::new();
            {
                let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
                let options = SimpleFileOptions::default()
                    .compression_method(zip::CompressionMethod::Stored);
                for (name, content) in &self.entries {
                    zip.start_file(name.as_str(), options).unwrap();
                    zip.write_all(content).unwrap();
                }
                zip.finish().unwrap();
            }
            buffer
        }
    }

    /// The standard two-item book used across tests
    pub fn sample_epub() -> Vec<u8> {
        ZipFixture::new()
            .file("mimetype", "application/epub+zip")
            .file("META-INF/container.xml", CONTAINER_XML)
            .file("OEBPS/content.opf", CONTENT_OPF)
            .file("OEBPS/chapter1.xhtml", "<html><body><p>One</p></body></html>")
            .file("OEBPS/style.css", STYLE_CSS)
            .build()
    }

    pub fn write_to(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_open_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let result = EpubArchive::open(dir.path().join("missing.epub"));
        assert!(matches!(result, Err(EpubError::ArchiveNotFound(_))));
    }

    #[test]
    fn test_open_corrupt_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_to(dir.path(), "broken.epub", b"this is not a zip file");
        let result = EpubArchive::open(path);
        assert!(matches!(result, Err(EpubError::Archive(_))));
    }

    #[test]
    fn test_member_lookup_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_to(dir.path(), "book.epub", &sample_epub());
        let mut archive = EpubArchive::open(path).unwrap();

        assert_eq!(
            archive.read_member("OEBPS/style.css").unwrap().as_deref(),
            Some(STYLE_CSS)
        );
        assert!(archive.read_member("oebps/style.css").unwrap().is_none());
        assert!(archive.read_member("OEBPS/./style.css").unwrap().is_none());
        assert!(archive.read_member("style.css").unwrap().is_none());
    }

    #[test]
    fn test_member_names_in_archive_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_to(dir.path(), "book.epub", &sample_epub());
        let archive = EpubArchive::open(path).unwrap();

        let names = archive.member_names();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"META-INF/container.xml".to_string()));
        assert!(names.contains(&"OEBPS/chapter1.xhtml".to_string()));
    }
}
