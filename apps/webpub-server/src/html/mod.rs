//! Reader index page
//!
//! The page is a plain HTML template with a single variable, the archive
//! filename, written as `{{filename}}` (or `{{.}}`).

use std::path::Path;

/// Template shipped with the server, used when no file is configured
const BUILTIN_TEMPLATE: &str = include_str!("../../templates/index.html");

const PLACEHOLDERS: [&str; 2] = ["{{filename}}", "{{.}}"];

/// Index page template, loaded once at startup
#[derive(Debug, Clone)]
pub struct IndexTemplate {
    source: String,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            source: BUILTIN_TEMPLATE.to_string(),
        }
    }
}

impl IndexTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load the template at `path`, falling back to the built-in one if the
    /// file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                tracing::info!("Loaded index template from {}", path.display());
                Ok(Self::new(source))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No index template at {}, using the built-in page",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Render the page for one archive; the filename is HTML-escaped
    pub fn render(&self, filename: &str) -> String {
        let escaped = html_escape::encode_safe(filename);
        PLACEHOLDERS
            .iter()
            .fold(self.source.clone(), |page, placeholder| {
                page.replace(placeholder, &escaped)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_renders_filename() {
        let page = IndexTemplate::default().render("book.epub");
        assert!(page.contains("<title>book.epub</title>"));
        assert!(page.contains("/book.epub/manifest.json"));
        assert!(!page.contains("{{filename}}"));
    }

    #[test]
    fn test_dot_placeholder() {
        let template = IndexTemplate::new("<h1>{{.}}</h1><p>{{filename}}</p>");
        assert_eq!(template.render("a.epub"), "<h1>a.epub</h1><p>a.epub</p>");
    }

    #[test]
    fn test_filename_is_escaped() {
        let template = IndexTemplate::new("<h1>{{filename}}</h1>");
        let page = template.render("<script>x</script>.epub");
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_load_missing_file_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let template = IndexTemplate::load(dir.path().join("index.html")).unwrap();
        assert!(template.render("b.epub").contains("b.epub"));
    }

    #[test]
    fn test_load_custom_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "custom {{filename}}").unwrap();
        let template = IndexTemplate::load(&path).unwrap();
        assert_eq!(template.render("c.epub"), "custom c.epub");
    }
}
