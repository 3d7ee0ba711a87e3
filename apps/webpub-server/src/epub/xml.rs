//! Small helpers over the quick-xml event reader
//!
//! EPUB documents mix default and prefixed namespaces (`dc:title`,
//! `opf:role`); matching is done on local names only.

use quick_xml::events::BytesStart;

/// Local name of an element, without its namespace prefix
pub fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Unescaped value of the attribute whose local name is `name`
pub fn attribute(element: &BytesStart<'_>, name: &str) -> quick_xml::Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Stack of the local names of currently open elements
#[derive(Debug, Default)]
pub struct ElementPath(Vec<String>);

impl ElementPath {
    pub fn push(&mut self, name: String) {
        self.0.push(name);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn is(&self, expected: &[&str]) -> bool {
        self.0.len() == expected.len() && self.0.iter().zip(expected).all(|(a, b)| a == b)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_attribute_lookup() {
        let element = BytesStart::from_content(
            r#"dc:creator opf:role="aut" opf:file-as="Doe, Jane""#,
            10,
        );
        assert_eq!(local_name(&element), "creator");
        assert_eq!(attribute(&element, "role").unwrap(), Some("aut".to_string()));
        assert_eq!(
            attribute(&element, "file-as").unwrap(),
            Some("Doe, Jane".to_string())
        );
        assert_eq!(attribute(&element, "id").unwrap(), None);
    }

    #[test]
    fn test_attribute_is_unescaped() {
        let element = BytesStart::from_content(r#"item href="a&amp;b.xhtml""#, 4);
        assert_eq!(
            attribute(&element, "href").unwrap(),
            Some("a&b.xhtml".to_string())
        );
    }

    #[test]
    fn test_element_path() {
        let mut path = ElementPath::default();
        assert!(path.is_empty());
        path.push("package".to_string());
        path.push("metadata".to_string());
        assert!(path.is(&["package", "metadata"]));
        assert!(!path.is(&["package"]));
        path.pop();
        assert!(path.is(&["package"]));
    }
}
