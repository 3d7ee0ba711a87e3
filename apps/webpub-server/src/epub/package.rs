//! Package document parsing
//!
//! Reads the Dublin Core metadata and the item list of an OPF package
//! document. Only the first occurrence of each metadata element is kept;
//! items keep their document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::archive::EpubArchive;
use super::error::{EpubError, Result};
use super::xml::{attribute, local_name, ElementPath};

/// Media type of XHTML content documents
pub const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// Parsed package document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageDocument {
    /// `version` attribute of the `package` element
    pub version: Option<String>,
    pub metadata: PackageMetadata,
    /// Items of `package/manifest`, in document order
    pub items: Vec<PackageItem>,
}

/// Dublin Core metadata; absent elements stay empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageMetadata {
    pub title: String,
    pub creator: String,
    pub identifier: String,
    pub language: String,
}

/// One `item` of the package manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageItem {
    pub id: String,
    pub href: String,
    pub media_type: String,
    pub properties: Option<String>,
}

impl PackageItem {
    /// Whether the item belongs to the reading order
    pub fn is_content_document(&self) -> bool {
        self.media_type == XHTML_MEDIA_TYPE
    }

    fn from_element(element: &BytesStart<'_>) -> quick_xml::Result<Self> {
        Ok(Self {
            id: attribute(element, "id")?.unwrap_or_default(),
            href: attribute(element, "href")?.unwrap_or_default(),
            media_type: attribute(element, "media-type")?.unwrap_or_default(),
            properties: attribute(element, "properties")?,
        })
    }
}

/// Metadata element currently collecting text
#[derive(Debug, Clone, Copy)]
enum MetaField {
    Title,
    Creator,
    Identifier,
    Language,
}

impl MetaField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(MetaField::Title),
            "creator" => Some(MetaField::Creator),
            "identifier" => Some(MetaField::Identifier),
            "language" => Some(MetaField::Language),
            _ => None,
        }
    }
}

impl PackageDocument {
    /// Read and parse the package document at `package_path`
    pub fn load(archive: &mut EpubArchive, package_path: &str) -> Result<Self> {
        Self::parse(&read_package(archive, package_path)?)
    }

    /// Like [`PackageDocument::load`], without requiring a `manifest` element
    pub fn load_metadata(archive: &mut EpubArchive, package_path: &str) -> Result<Self> {
        Self::parse_metadata(&read_package(archive, package_path)?)
    }

    /// Parse package document XML.
    ///
    /// Fails if the `package`, `metadata` or `manifest` element is absent.
    pub fn parse(xml: &str) -> Result<Self> {
        let (doc, seen_manifest) = Self::scan(xml)?;
        if !seen_manifest {
            return Err(EpubError::Package("missing manifest element".to_string()));
        }
        Ok(doc)
    }

    /// Parse only what the metadata needs; a missing `manifest` leaves
    /// `items` empty
    pub fn parse_metadata(xml: &str) -> Result<Self> {
        Self::scan(xml).map(|(doc, _)| doc)
    }

    fn scan(xml: &str) -> Result<(Self, bool)> {
        let malformed = |e: quick_xml::Error| EpubError::Package(format!("malformed XML: {}", e));

        let mut reader = Reader::from_str(xml);

        let mut doc = PackageDocument::default();
        let mut path = ElementPath::default();
        let (mut seen_package, mut seen_metadata, mut seen_manifest) = (false, false, false);
        let mut seen_fields = [false; 4];
        let mut collecting: Option<MetaField> = None;
        let mut text = String::new();

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(e) => {
                    let name = local_name(&e);
                    if path.is_empty() && name == "package" {
                        seen_package = true;
                        doc.version = attribute(&e, "version").map_err(malformed)?;
                    } else if path.is(&["package"]) && name == "metadata" {
                        seen_metadata = true;
                    } else if path.is(&["package"]) && name == "manifest" {
                        seen_manifest = true;
                    } else if path.is(&["package", "metadata"]) {
                        collecting = MetaField::from_name(&name)
                            .filter(|field| !seen_fields[*field as usize]);
                        text.clear();
                    } else if path.is(&["package", "manifest"]) && name == "item" {
                        doc.items.push(PackageItem::from_element(&e).map_err(malformed)?);
                    }
                    path.push(name);
                }
                Event::Empty(e) => {
                    let name = local_name(&e);
                    if path.is_empty() && name == "package" {
                        seen_package = true;
                    } else if path.is(&["package"]) && name == "metadata" {
                        seen_metadata = true;
                    } else if path.is(&["package"]) && name == "manifest" {
                        seen_manifest = true;
                    } else if path.is(&["package", "manifest"]) && name == "item" {
                        doc.items.push(PackageItem::from_element(&e).map_err(malformed)?);
                    } else if path.is(&["package", "metadata"]) {
                        // <dc:title/> still counts as the first occurrence
                        if let Some(field) = MetaField::from_name(&name) {
                            seen_fields[field as usize] = true;
                        }
                    }
                }
                Event::Text(t) if collecting.is_some() => {
                    text.push_str(&t.unescape().map_err(malformed)?);
                }
                Event::CData(c) if collecting.is_some() => {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
                Event::End(_) => {
                    path.pop();
                    if path.is(&["package", "metadata"]) {
                        if let Some(field) = collecting.take() {
                            seen_fields[field as usize] = true;
                            doc.metadata.set(field, text.trim().to_string());
                            text.clear();
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !path.is_empty() {
            return Err(EpubError::Package("unexpected end of document".to_string()));
        }
        if !seen_package {
            return Err(EpubError::Package("missing package element".to_string()));
        }
        if !seen_metadata {
            return Err(EpubError::Package("missing metadata element".to_string()));
        }

        Ok((doc, seen_manifest))
    }
}

fn read_package(archive: &mut EpubArchive, package_path: &str) -> Result<String> {
    archive
        .read_member_to_string(package_path)?
        .ok_or_else(|| EpubError::Package(format!("{} is missing", package_path)))
}

impl PackageMetadata {
    fn set(&mut self, field: MetaField, value: String) {
        match field {
            MetaField::Title => self.title = value,
            MetaField::Creator => self.creator = value,
            MetaField::Identifier => self.identifier = value,
            MetaField::Language => self.language = value,
        }
    }
}
