//! EPUB access module
//!
//! Opens ZIP-packaged EPUBs, follows `META-INF/container.xml` to the
//! package document and projects it into web publication documents.
//! Everything here is blocking and is created fresh for each request.

mod archive;
mod asset;
mod container;
mod error;
mod manifest;
mod package;
mod xml;

use std::path::Path;

use chrono::{DateTime, Utc};

pub use archive::EpubArchive;
pub use asset::{base_directory, member_name, resolve_asset, Asset};
pub use container::{parse_container, resolve_container, CONTAINER_PATH};
pub use error::{EpubError, Result};
pub use manifest::{Icon, Link, Metadata, PublicationManifest, UrlBase, WebAppManifest};
pub use package::{PackageDocument, PackageItem, PackageMetadata, XHTML_MEDIA_TYPE};

#[cfg(test)]
pub(crate) use archive::fixtures;

/// An opened archive together with its resolved package document path
pub struct Publication {
    archive: EpubArchive,
    package_path: String,
}

impl Publication {
    /// Open an archive and resolve its container descriptor
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut archive = EpubArchive::open(path)?;
        let package_path = resolve_container(&mut archive)?;
        tracing::debug!("{}: package document at {}", archive.name(), package_path);

        Ok(Self {
            archive,
            package_path,
        })
    }

    /// Parse the package document
    pub fn package(&mut self) -> Result<PackageDocument> {
        PackageDocument::load(&mut self.archive, &self.package_path)
    }

    /// Build the publication manifest
    pub fn manifest(
        &mut self,
        urls: &UrlBase,
        modified: DateTime<Utc>,
    ) -> Result<PublicationManifest> {
        let package = self.package()?;
        Ok(PublicationManifest::project(&package, urls, modified))
    }

    /// Build the web-app install manifest; only the metadata is needed
    pub fn webapp_manifest(&mut self) -> Result<WebAppManifest> {
        let package = PackageDocument::load_metadata(&mut self.archive, &self.package_path)?;
        Ok(WebAppManifest::from_package(&package))
    }

    /// Read an asset addressed relative to the package's base directory
    pub fn asset(&mut self, asset_name: &str) -> Result<Asset> {
        resolve_asset(&mut self.archive, &self.package_path, asset_name)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_publication_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_to(dir.path(), "book.epub", &sample_epub());

        let mut publication = Publication::open(&path).unwrap();
        assert_eq!(publication.package_path, "OEBPS/content.opf");

        let urls = UrlBase::new("http://", "localhost:8080", "book.epub");
        let manifest = publication.manifest(&urls, Utc::now()).unwrap();
        assert_eq!(manifest.spine.len(), 1);
        assert_eq!(manifest.resources.len(), 1);

        let webapp = publication.webapp_manifest().unwrap();
        assert_eq!(webapp.name, "Test Book");

        let asset = publication.asset("style.css").unwrap();
        assert_eq!(asset.data, STYLE_CSS);
    }

    #[test]
    fn test_open_without_container_fails() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = ZipFixture::new()
            .file("OEBPS/content.opf", CONTENT_OPF)
            .build();
        let path = write_to(dir.path(), "book.epub", &bytes);

        assert!(matches!(
            Publication::open(&path),
            Err(EpubError::Container(_))
        ));
    }

    #[test]
    fn test_broken_package_document() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = ZipFixture::new()
            .file("META-INF/container.xml", CONTAINER_XML)
            .file("OEBPS/content.opf", "<package><metadata/></package>")
            .file("OEBPS/style.css", STYLE_CSS)
            .build();
        let path = write_to(dir.path(), "book.epub", &bytes);

        let mut publication = Publication::open(&path).unwrap();
        let urls = UrlBase::new("http://", "localhost", "book.epub");
        assert!(matches!(
            publication.manifest(&urls, Utc::now()),
            Err(EpubError::Package(_))
        ));
        // The install manifest only reads the metadata
        assert_eq!(publication.webapp_manifest().unwrap().name, "");
        // Assets only need the container
        assert!(publication.asset("style.css").is_ok());
    }
}
