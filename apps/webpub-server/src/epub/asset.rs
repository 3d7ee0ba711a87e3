//! Asset extraction
//!
//! Assets are addressed relative to the directory holding the package
//! document, i.e. the first segment of its path.

use super::archive::EpubArchive;
use super::error::{EpubError, Result};
use crate::mediatype::asset_content_type;

/// Raw bytes of one archive member with the content type to serve it as
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Full member name inside the archive
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Directory assets are resolved against.
///
/// A package document at the archive root has no base directory.
pub fn base_directory(package_path: &str) -> &str {
    match package_path.split_once('/') {
        Some((first, _)) => first,
        None => "",
    }
}

/// Full member name for `asset_name` beneath the package's base directory
pub fn member_name(package_path: &str, asset_name: &str) -> String {
    match base_directory(package_path) {
        "" => asset_name.to_string(),
        base => format!("{}/{}", base, asset_name),
    }
}

/// Locate and read an asset
pub fn resolve_asset(
    archive: &mut EpubArchive,
    package_path: &str,
    asset_name: &str,
) -> Result<Asset> {
    let wanted = member_name(package_path, asset_name);

    let name = archive
        .member_names()
        .into_iter()
        .find(|name| *name == wanted)
        .ok_or_else(|| EpubError::AssetNotFound(asset_name.to_string()))?;

    let data = archive
        .read_member(&name)?
        .ok_or_else(|| EpubError::AssetNotFound(asset_name.to_string()))?;

    Ok(Asset {
        media_type: asset_content_type(&name),
        name,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::super::archive::fixtures::*;
    use super::*;

    fn open_sample(dir: &std::path::Path) -> EpubArchive {
        EpubArchive::open(write_to(dir, "book.epub", &sample_epub())).unwrap()
    }

    #[test]
    fn test_base_directory() {
        assert_eq!(base_directory("OEBPS/content.opf"), "OEBPS");
        assert_eq!(base_directory("OPS/package/content.opf"), "OPS");
        assert_eq!(base_directory("content.opf"), "");
    }

    #[test]
    fn test_member_name() {
        assert_eq!(member_name("OEBPS/content.opf", "style.css"), "OEBPS/style.css");
        assert_eq!(
            member_name("OEBPS/content.opf", "images/cover.png"),
            "OEBPS/images/cover.png"
        );
        assert_eq!(member_name("content.opf", "style.css"), "style.css");
    }

    #[test]
    fn test_resolve_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = open_sample(dir.path());

        let asset = resolve_asset(&mut archive, "OEBPS/content.opf", "style.css").unwrap();
        assert_eq!(asset.name, "OEBPS/style.css");
        assert_eq!(asset.media_type, "text/css");
        assert_eq!(asset.data, STYLE_CSS);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = open_sample(dir.path());

        let first = resolve_asset(&mut archive, "OEBPS/content.opf", "chapter1.xhtml").unwrap();
        let second = resolve_asset(&mut archive, "OEBPS/content.opf", "chapter1.xhtml").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.media_type, "application/xhtml+xml");
    }

    #[test]
    fn test_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = open_sample(dir.path());

        let result = resolve_asset(&mut archive, "OEBPS/content.opf", "missing.css");
        assert!(matches!(result, Err(EpubError::AssetNotFound(name)) if name == "missing.css"));

        // Paths are not normalized
        let result = resolve_asset(&mut archive, "OEBPS/content.opf", "./style.css");
        assert!(matches!(result, Err(EpubError::AssetNotFound(_))));
    }

    #[test]
    fn test_root_level_package() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = ZipFixture::new()
            .file("content.opf", "<package/>")
            .file("style.css", STYLE_CSS)
            .build();
        let mut archive = EpubArchive::open(write_to(dir.path(), "flat.epub", &bytes)).unwrap();

        let asset = resolve_asset(&mut archive, "content.opf", "style.css").unwrap();
        assert_eq!(asset.name, "style.css");
        assert_eq!(asset.data, STYLE_CSS);
    }
}
