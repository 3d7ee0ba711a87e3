//! Container descriptor (`META-INF/container.xml`) resolution
//!
//! The descriptor points at the package document. When several
//! `rootfile` entries are declared, the first one is the default
//! rendition and is the one used by every endpoint.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::archive::EpubArchive;
use super::error::{EpubError, Result};
use super::xml::{attribute, local_name, ElementPath};

/// Fixed location of the container descriptor
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Find the package document path declared by the archive's container
pub fn resolve_container(archive: &mut EpubArchive) -> Result<String> {
    let xml = archive
        .read_member_to_string(CONTAINER_PATH)?
        .ok_or_else(|| EpubError::Container(format!("{} is missing", CONTAINER_PATH)))?;
    parse_container(&xml)
}

/// Extract `container/rootfiles/rootfile/@full-path` from descriptor XML
pub fn parse_container(xml: &str) -> Result<String> {
    let malformed = |e: quick_xml::Error| EpubError::Container(format!("malformed XML: {}", e));

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut path = ElementPath::default();
    let mut full_path: Option<String> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                let name = local_name(&e);
                if full_path.is_none() && name == "rootfile" && path.is(&["container", "rootfiles"]) {
                    full_path = attribute(&e, "full-path").map_err(malformed)?;
                }
                path.push(name);
            }
            Event::Empty(e) => {
                if full_path.is_none()
                    && local_name(&e) == "rootfile"
                    && path.is(&["container", "rootfiles"])
                {
                    full_path = attribute(&e, "full-path").map_err(malformed)?;
                }
            }
            Event::End(_) => path.pop(),
            Event::Eof => break,
            _ => {}
        }
        // An empty full-path does not count as a declaration
        if full_path.as_deref() == Some("") {
            full_path = None;
        }
    }

    if !path.is_empty() {
        return Err(EpubError::Container("unexpected end of document".to_string()));
    }

    full_path.ok_or_else(|| EpubError::Container("no rootfile with a full-path".to_string()))
}
