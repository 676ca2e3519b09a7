//! Fragment sources: backends that produce ordered [`TextFragment`]s.
//!
//! The pipeline depends only on the [`FragmentSource`] trait, never on a
//! concrete extraction library. A backend is selected once, at pipeline
//! construction time, usually through the [`SourceRegistry`].

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "pdf")]
pub use pdf::PdfFragmentSource;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::TextFragment;

/// Abstract interface over fragment extraction backends.
///
/// Implementations return one document's fragments as a complete, ordered
/// list — no streaming or partial results. Page numbers are 1-based and no
/// fragment spans multiple pages.
pub trait FragmentSource: Send + Sync {
    /// Backend name for logging and diagnostics.
    fn name(&self) -> &str;

    /// File extensions this backend handles (lowercase, no dot).
    fn supported_extensions(&self) -> &[&str];

    /// Extract fragments from a file.
    fn extract(&self, path: &Path) -> Result<Vec<TextFragment>>;

    /// Extract fragments from an in-memory byte slice.
    fn extract_bytes(&self, data: &[u8]) -> Result<Vec<TextFragment>>;
}

/// Source for pre-extracted fragment lists stored as a JSON array.
///
/// The format is the serde shape of [`TextFragment`]:
/// `[{"text", "font_size", "is_bold", "page", "y_position", "x_position"}, ...]`.
pub struct JsonFragmentSource;

impl FragmentSource for JsonFragmentSource {
    fn name(&self) -> &str {
        "json"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn extract(&self, path: &Path) -> Result<Vec<TextFragment>> {
        let data = fs::read(path)?;
        self.extract_bytes(&data)
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<Vec<TextFragment>> {
        let fragments: Vec<TextFragment> = serde_json::from_slice(data)?;
        Ok(fragments)
    }
}

/// Registry of available fragment sources, keyed by file extension.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn FragmentSource>>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in backends.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonFragmentSource));
        #[cfg(feature = "pdf")]
        registry.register(Arc::new(PdfFragmentSource::new()));
        registry
    }

    /// Register a backend.
    pub fn register(&mut self, source: Arc<dyn FragmentSource>) {
        self.sources.push(source);
    }

    /// Whether some backend handles the extension.
    pub fn supports(&self, extension: &str) -> bool {
        self.get_by_extension(extension).is_some()
    }

    /// Find a backend by extension (case-insensitive).
    pub fn get_by_extension(&self, extension: &str) -> Option<Arc<dyn FragmentSource>> {
        let extension = extension.to_lowercase();
        self.sources
            .iter()
            .find(|s| s.supported_extensions().contains(&extension.as_str()))
            .cloned()
    }

    /// Find a backend for a path, by its extension.
    pub fn for_path(&self, path: &Path) -> Result<Arc<dyn FragmentSource>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        self.get_by_extension(extension).ok_or_else(|| {
            Error::Source(format!("no fragment source for '{}'", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_source_round_trip() {
        let json = r#"[
            {"text": "Heading", "font_size": 16.0, "is_bold": true, "page": 1, "y_position": 0.1, "x_position": 72.0},
            {"text": "Body", "font_size": 11.0, "page": 1, "y_position": 0.2}
        ]"#;
        let fragments = JsonFragmentSource.extract_bytes(json.as_bytes()).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Heading");
        assert!(!fragments[1].is_bold);
    }

    #[test]
    fn test_json_source_rejects_garbage() {
        assert!(JsonFragmentSource.extract_bytes(b"not json").is_err());
    }

    #[test]
    fn test_registry_defaults() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.supports("json"));
        assert!(registry.supports("JSON"));
        assert!(!registry.supports("docx"));
        #[cfg(feature = "pdf")]
        assert!(registry.supports("pdf"));
    }

    #[test]
    fn test_registry_for_path() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.for_path(Path::new("a/b/doc.json")).is_ok());
        assert!(registry.for_path(Path::new("no_extension")).is_err());
    }
}
