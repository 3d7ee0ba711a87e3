//! Publication manifest projection
//!
//! Turns a parsed package document into the JSON documents served to
//! readers: the publication manifest and the web-app install manifest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::package::{PackageDocument, PackageItem};
use crate::mediatype;

/// Publication metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub identifier: String,
    pub language: String,
    /// Time the manifest was generated
    pub modified: DateTime<Utc>,
}

/// One addressable resource of the publication
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    pub href: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// The JSON manifest describing one publication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationManifest {
    pub metadata: Metadata,
    /// Always exactly the self link
    pub links: Vec<Link>,
    /// XHTML content documents, in package order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spine: Vec<Link>,
    /// Every other item, in package order
    pub resources: Vec<Link>,
}

/// Absolute URL builder for one archive, as seen by the requesting client
#[derive(Debug, Clone)]
pub struct UrlBase {
    /// `http://` or `https://`
    pub scheme: &'static str,
    pub host: String,
    /// Archive filename as it appears in request paths
    pub filename: String,
}

impl UrlBase {
    pub fn new(scheme: &'static str, host: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            scheme,
            host: host.into(),
            filename: filename.into(),
        }
    }

    /// URL of a package item, relative to the archive route
    pub fn item_href(&self, href: &str) -> String {
        format!("{}{}/{}/{}", self.scheme, self.host, self.filename, href)
    }

    /// URL of this publication's manifest
    pub fn self_href(&self) -> String {
        format!(
            "{}{}/manifest/{}/manifest.json",
            self.scheme, self.host, self.filename
        )
    }
}

impl PublicationManifest {
    /// Project a package document into a manifest.
    ///
    /// Every package item lands in exactly one of `spine` or `resources`.
    pub fn project(package: &PackageDocument, urls: &UrlBase, modified: DateTime<Utc>) -> Self {
        let metadata = Metadata {
            title: package.metadata.title.clone(),
            author: package.metadata.creator.clone(),
            identifier: package.metadata.identifier.clone(),
            language: package.metadata.language.clone(),
            modified,
        };

        let self_link = Link {
            rel: Some("self".to_string()),
            href: urls.self_href(),
            media_type: mediatype::EPUB.mime.to_string(),
            ..Default::default()
        };

        let (spine, resources): (Vec<_>, Vec<_>) =
            package.items.iter().partition(|item| item.is_content_document());

        let to_link = |item: &PackageItem| Link {
            href: urls.item_href(&item.href),
            media_type: item.media_type.clone(),
            ..Default::default()
        };

        Self {
            metadata,
            links: vec![self_link],
            spine: spine.into_iter().map(to_link).collect(),
            resources: resources.into_iter().map(to_link).collect(),
        }
    }
}

/// Icon entry of the web-app manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub src: String,
    pub size: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Web-app install manifest for the reader shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebAppManifest {
    pub short_name: String,
    pub name: String,
    pub start_url: String,
    pub display: String,
    pub icons: Icon,
}

impl WebAppManifest {
    /// Fixed install descriptor named after the publication title
    pub fn from_package(package: &PackageDocument) -> Self {
        Self {
            short_name: package.metadata.title.clone(),
            name: package.metadata.title.clone(),
            start_url: "index.html".to_string(),
            display: "standalone".to_string(),
            icons: Icon {
                src: "logo.png".to_string(),
                size: "144x144".to_string(),
                media_type: mediatype::PNG.mime.to_string(),
            },
        }
    }
}
