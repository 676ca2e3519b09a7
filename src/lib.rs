//! # outliner
//!
//! Document outline extraction and persona-driven relevance ranking.
//!
//! The library turns a flat list of styled text fragments into a structured
//! outline: a document title plus H1/H2/H3 headings with page numbers. A
//! secondary mode pools the sections of a document collection and ranks them
//! for a persona with a job to be done.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outliner::outline_file;
//!
//! fn main() -> outliner::Result<()> {
//!     let outline = outline_file("report.pdf")?;
//!     println!("{}", serde_json::to_string_pretty(&outline)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structural outline**: title + H1/H2/H3 headings with page numbers
//! - **Style-signal classifier**: font size, numbering, shape, and position
//! - **Persona ranking**: cross-document section ranking with a per-document
//!   diversity cap and refined excerpts
//! - **Pluggable sources**: PDF (via `lopdf`, feature `pdf`) and
//!   pre-extracted JSON fragment files
//! - **Parallel batches**: independent documents processed via Rayon
//! - **Deterministic**: identical input always yields identical output

pub mod analyze;
pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod rank;
pub mod source;

// Re-export commonly used types
pub use analyze::{analyze_document, extract_outline, DocumentAnalysis, FontProfile};
pub use batch::{analyze_collection, extract_outlines, rank_collection, DocumentInput};
pub use config::{OutlineConfig, RankConfig};
pub use error::{Error, Result};
pub use model::{
    Heading, HeadingLevel, Outline, PersonaMetadata, PersonaOutput, RankedSection, Section,
    SubsectionAnalysis, TextFragment,
};
pub use rank::{build_persona_output, PersonaContext};
#[cfg(feature = "pdf")]
pub use source::PdfFragmentSource;
pub use source::{FragmentSource, JsonFragmentSource, SourceRegistry};

use std::path::Path;

/// Extract an outline from a document file with default settings.
///
/// The source backend is chosen by file extension (`.pdf`, `.json`).
///
/// # Example
///
/// ```no_run
/// use outliner::outline_file;
///
/// let outline = outline_file("document.pdf").unwrap();
/// println!("{} headings", outline.headings.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    Outliner::new().outline_file(path)
}

/// Extract an outline from an in-memory fragment list with default settings.
pub fn outline_fragments(fragments: &[TextFragment]) -> Result<Outline> {
    extract_outline(fragments, &OutlineConfig::default())
}

/// Builder tying configuration and source selection together.
///
/// # Example
///
/// ```no_run
/// use outliner::{Outliner, PersonaContext};
///
/// let outliner = Outliner::new().sequential();
/// let outline = outliner.outline_file("guide.pdf")?;
///
/// let persona = PersonaContext::build("Travel Planner", "plan a 4 day trip");
/// let output = outliner.rank_files(&[std::path::Path::new("guide.pdf")], &persona)?;
/// # Ok::<(), outliner::Error>(())
/// ```
pub struct Outliner {
    outline_config: OutlineConfig,
    rank_config: RankConfig,
    registry: SourceRegistry,
}

impl Outliner {
    /// Create a builder with default configuration and the built-in sources.
    pub fn new() -> Self {
        Self {
            outline_config: OutlineConfig::default(),
            rank_config: RankConfig::default(),
            registry: SourceRegistry::with_defaults(),
        }
    }

    /// Replace the outline configuration.
    pub fn with_outline_config(mut self, config: OutlineConfig) -> Self {
        self.outline_config = config;
        self
    }

    /// Replace the ranking configuration.
    pub fn with_rank_config(mut self, config: RankConfig) -> Self {
        self.rank_config = config;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.outline_config.parallel = false;
        self
    }

    /// Register an additional fragment source backend.
    pub fn with_source(mut self, source: std::sync::Arc<dyn FragmentSource>) -> Self {
        self.registry.register(source);
        self
    }

    /// Load fragments from a file, selecting the backend by extension.
    pub fn load_fragments<P: AsRef<Path>>(&self, path: P) -> Result<Vec<TextFragment>> {
        let path = path.as_ref();
        let source = self.registry.for_path(path)?;
        log::debug!("reading '{}' via {} source", path.display(), source.name());
        source.extract(path)
    }

    /// Extract the outline of one document file.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let fragments = self.load_fragments(path)?;
        extract_outline(&fragments, &self.outline_config)
    }

    /// Extract the outline of an in-memory fragment list.
    pub fn outline_fragments(&self, fragments: &[TextFragment]) -> Result<Outline> {
        extract_outline(fragments, &self.outline_config)
    }

    /// Analyze one document file, keeping section bodies.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentAnalysis> {
        let path = path.as_ref();
        let fragments = self.load_fragments(path)?;
        let name = document_name(path);
        analyze_document(&name, &fragments, &self.outline_config)
    }

    /// Run persona-mode ranking over a collection of document files.
    ///
    /// Documents are pooled in the given order; the output's
    /// `input_documents` lists their file names.
    pub fn rank_files(&self, paths: &[&Path], persona: &PersonaContext) -> Result<PersonaOutput> {
        let mut inputs = Vec::with_capacity(paths.len());
        for path in paths {
            let fragments = self.load_fragments(path)?;
            inputs.push(DocumentInput::new(document_name(path), fragments));
        }
        rank_collection(&inputs, persona, &self.outline_config, &self.rank_config)
    }

    /// Run persona-mode ranking over already-loaded fragment lists.
    pub fn rank_inputs(
        &self,
        inputs: &[DocumentInput],
        persona: &PersonaContext,
    ) -> Result<PersonaOutput> {
        rank_collection(inputs, persona, &self.outline_config, &self.rank_config)
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_fragments_convenience() {
        let fragments = vec![
            TextFragment::new("Annual Report", 20.0, true, 1, 0.05, 72.0),
            TextFragment::new(
                "The fiscal year closed with steady growth across regions.",
                11.0,
                false,
                1,
                0.2,
                72.0,
            ),
            TextFragment::new("1. Financial Summary", 15.0, true, 1, 0.4, 72.0),
        ];
        let outline = outline_fragments(&fragments).unwrap();
        assert_eq!(outline.title, "Annual Report");
        assert_eq!(outline.headings.len(), 1);
    }

    #[test]
    fn test_outliner_builder_chained() {
        let outliner = Outliner::new()
            .with_outline_config(OutlineConfig::new().with_acceptance_threshold(0.5))
            .with_rank_config(RankConfig::new().with_top_sections(5))
            .sequential();

        assert_eq!(outliner.outline_config.acceptance_threshold, 0.5);
        assert_eq!(outliner.rank_config.top_sections, 5);
        assert!(!outliner.outline_config.parallel);
    }

    #[test]
    fn test_outline_file_unknown_extension() {
        let result = Outliner::new().outline_file("document.docx");
        assert!(result.is_err());
    }

    #[test]
    fn test_document_name() {
        assert_eq!(document_name(Path::new("a/b/report.pdf")), "report.pdf");
        assert_eq!(document_name(Path::new("plain.json")), "plain.json");
    }
}
