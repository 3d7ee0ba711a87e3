//! Media type registry
//!
//! Known publication and resource formats, each with its MIME string,
//! a human readable label and its default file extension.

use std::path::Path;

/// A registered media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaType {
    /// MIME string, parameters included
    pub mime: &'static str,
    /// Human readable label
    pub name: Option<&'static str>,
    /// Default file extension, without the dot
    pub extension: Option<&'static str>,
}

impl MediaType {
    pub const fn new(
        mime: &'static str,
        name: Option<&'static str>,
        extension: Option<&'static str>,
    ) -> Self {
        Self {
            mime,
            name,
            extension,
        }
    }

    /// Look up a media type by file extension (case-insensitive, dot optional)
    pub fn from_extension(ext: &str) -> Option<MediaType> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        REGISTRY
            .iter()
            .find(|media_type| media_type.extension == Some(ext.as_str()))
            .copied()
    }

    /// Look up a media type from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<MediaType> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaType::from_extension)
    }
}

pub const AAC: MediaType = MediaType::new("audio/aac", None, Some("aac"));
pub const ACSM: MediaType = MediaType::new("application/vnd.adobe.adept+xml", Some("Adobe Content Server Message"), Some("acsm"));
pub const AIFF: MediaType = MediaType::new("audio/aiff", None, Some("aiff"));
pub const AVI: MediaType = MediaType::new("video/x-msvideo", None, Some("avi"));
pub const AVIF: MediaType = MediaType::new("image/avif", None, Some("avif"));
pub const BINARY: MediaType = MediaType::new("application/octet-stream", None, None);
pub const BMP: MediaType = MediaType::new("image/bmp", Some("Bitmap Image File"), Some("bmp"));
pub const CBZ: MediaType = MediaType::new("application/vnd.comicbook+zip", Some("Comic Book Archive"), Some("cbz"));
pub const CSS: MediaType = MediaType::new("text/css", Some("Cascading Style Sheets"), Some("css"));
pub const DIVINA: MediaType = MediaType::new("application/divina+zip", Some("Digital Visual Narratives"), Some("divina"));
pub const DIVINA_MANIFEST: MediaType = MediaType::new("application/divina+json", Some("Digital Visual Narratives"), Some("json"));
pub const EPUB: MediaType = MediaType::new("application/epub+zip", Some("EPUB"), Some("epub"));
pub const GIF: MediaType = MediaType::new("image/gif", None, Some("gif"));
pub const GZ: MediaType = MediaType::new("application/gzip", None, Some("gz"));
pub const HTML: MediaType = MediaType::new("text/html", Some("Hypertext Markup Language"), Some("html"));
pub const JAVASCRIPT: MediaType = MediaType::new("text/javascript", Some("JavaScript"), Some("js"));
pub const JPEG: MediaType = MediaType::new("image/jpeg", None, Some("jpeg"));
pub const JSON: MediaType = MediaType::new("application/json", Some("JSON"), Some("json"));
pub const JXL: MediaType = MediaType::new("image/jxl", Some("JPEG XL"), Some("jxl"));
pub const LCP_LICENSE_DOCUMENT: MediaType = MediaType::new("application/vnd.readium.lcp.license.v1.0+json", Some("LCP License"), Some("lcpl"));
pub const LCP_PROTECTED_AUDIOBOOK: MediaType = MediaType::new("application/audiobook+lcp", Some("LCP Protected Audiobook"), Some("lcpa"));
pub const LCP_PROTECTED_PDF: MediaType = MediaType::new("application/pdf+lcp", Some("LCP Protected PDF"), Some("lcpdf"));
pub const LCP_STATUS_DOCUMENT: MediaType = MediaType::new("application/vnd.readium.license.status.v1.0+json", Some("LCP Status Document"), None);
pub const LPF: MediaType = MediaType::new("application/lpf+zip", Some("Lightweight Packaging Format"), Some("lpf"));
pub const MP3: MediaType = MediaType::new("audio/mpeg", None, Some("mp3"));
pub const MPEG: MediaType = MediaType::new("video/mpeg", None, Some("mpeg"));
pub const NCX: MediaType = MediaType::new("application/x-dtbncx+xml", Some("Navigation Control File"), Some("ncx"));
pub const OGG: MediaType = MediaType::new("audio/ogg", None, Some("oga"));
pub const OGV: MediaType = MediaType::new("video/ogg", None, Some("ogv"));
pub const OPDS1: MediaType = MediaType::new("application/atom+xml;profile=opds-catalog", None, None);
pub const OPDS1_ENTRY: MediaType = MediaType::new("application/atom+xml;type=entry;profile=opds-catalog", None, None);
pub const OPDS2: MediaType = MediaType::new("application/opds+json", None, None);
pub const OPDS2_PUBLICATION: MediaType = MediaType::new("application/opds-publication+json", None, None);
pub const OPDS_AUTHENTICATION: MediaType = MediaType::new("application/opds-authentication+json", None, None);
pub const OPUS: MediaType = MediaType::new("audio/opus", None, Some("opus"));
pub const OTF: MediaType = MediaType::new("font/otf", Some("OpenType Font"), Some("otf"));
pub const PDF: MediaType = MediaType::new("application/pdf", Some("PDF"), Some("pdf"));
pub const PNG: MediaType = MediaType::new("image/png", Some("Portable Network Graphics"), Some("png"));
pub const READIUM_AUDIOBOOK: MediaType = MediaType::new("application/audiobook+zip", Some("Readium Audiobook"), Some("audiobook"));
pub const READIUM_AUDIOBOOK_MANIFEST: MediaType = MediaType::new("application/audiobook+json", Some("Readium Audiobook"), Some("json"));
pub const READIUM_WEBPUB: MediaType = MediaType::new("application/webpub+zip", Some("Readium Web Publication"), Some("webpub"));
pub const READIUM_WEBPUB_MANIFEST: MediaType = MediaType::new("application/webpub+json", Some("Readium Web Publication"), Some("json"));
pub const SMIL: MediaType = MediaType::new("application/smil+xml", Some("Synchronized Multimedia Integration Language"), Some("smil"));
pub const SVG: MediaType = MediaType::new("image/svg+xml", Some("Scalable Vector Graphics"), Some("svg"));
pub const TEXT: MediaType = MediaType::new("text/plain", Some("Text"), Some("txt"));
pub const TIFF: MediaType = MediaType::new("image/tiff", None, Some("tiff"));
pub const TTF: MediaType = MediaType::new("font/ttf", Some("TrueType Font"), Some("ttf"));
pub const W3C_WPUB_MANIFEST: MediaType = MediaType::new("application/x.readium.w3c.wpub+json", Some("Web Publication"), Some("json"));
pub const WAV: MediaType = MediaType::new("audio/wav", None, Some("wav"));
pub const WEBM_AUDIO: MediaType = MediaType::new("audio/webm", None, Some("webm"));
pub const WEBM_VIDEO: MediaType = MediaType::new("video/webm", None, Some("webm"));
pub const WEBP: MediaType = MediaType::new("image/webp", None, Some("webp"));
pub const WOFF: MediaType = MediaType::new("font/woff", None, Some("woff"));
pub const WOFF2: MediaType = MediaType::new("font/woff2", None, Some("woff2"));
pub const XHTML: MediaType = MediaType::new("application/xhtml+xml", None, Some("xhtml"));
pub const XML: MediaType = MediaType::new("application/xml", Some("Xtensible Markup Language"), Some("xml"));
pub const ZAB: MediaType = MediaType::new("application/x.readium.zab+zip", Some("Zipped Audio Book"), Some("zab"));
pub const ZIP: MediaType = MediaType::new("application/zip", Some("ZIP Archive"), Some("zip"));

/// Every registered type. Canonical entries come before profile-specific
/// ones sharing their extension, so extension lookup finds them first.
pub const REGISTRY: &[MediaType] = &[
    JSON,
    AAC,
    ACSM,
    AIFF,
    AVI,
    AVIF,
    BINARY,
    BMP,
    CBZ,
    CSS,
    DIVINA,
    DIVINA_MANIFEST,
    EPUB,
    GIF,
    GZ,
    HTML,
    JAVASCRIPT,
    JPEG,
    JXL,
    LCP_LICENSE_DOCUMENT,
    LCP_PROTECTED_AUDIOBOOK,
    LCP_PROTECTED_PDF,
    LCP_STATUS_DOCUMENT,
    LPF,
    MP3,
    MPEG,
    NCX,
    OGG,
    OGV,
    OPDS1,
    OPDS1_ENTRY,
    OPDS2,
    OPDS2_PUBLICATION,
    OPDS_AUTHENTICATION,
    OPUS,
    OTF,
    PDF,
    PNG,
    READIUM_AUDIOBOOK,
    READIUM_AUDIOBOOK_MANIFEST,
    READIUM_WEBPUB,
    READIUM_WEBPUB_MANIFEST,
    SMIL,
    SVG,
    TEXT,
    TIFF,
    TTF,
    W3C_WPUB_MANIFEST,
    WAV,
    WEBM_AUDIO,
    WEBM_VIDEO,
    WEBP,
    WOFF,
    WOFF2,
    XHTML,
    XML,
    ZAB,
    ZIP,
];

/// Content type for an asset served straight out of an archive.
///
/// Stylesheets, scripts and `.xml` documents get fixed types (`.xml` is
/// served as XHTML); anything else is looked up in the registry, then
/// guessed from the extension, then sent as `application/octet-stream`.
pub fn asset_content_type(name: &str) -> String {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "css" => CSS.mime.to_string(),
        "xml" => XHTML.mime.to_string(),
        "js" => JAVASCRIPT.mime.to_string(),
        _ => MediaType::from_path(name)
            .map(|media_type| media_type.mime.to_string())
            .or_else(|| mime_guess::from_path(name).first().map(|m| m.to_string()))
            .unwrap_or_else(|| BINARY.mime.to_string()),
    }
}
