//! Batch processing across documents.
//!
//! Documents are independent: each runs its own pipeline with no shared
//! mutable state, so the batch is driven by `rayon` when
//! [`OutlineConfig::parallel`] is set and falls back to a plain sequential
//! loop otherwise. Output order always matches input order.

use rayon::prelude::*;

use crate::analyze::{analyze_document, extract_outline, DocumentAnalysis};
use crate::config::{OutlineConfig, RankConfig};
use crate::error::Result;
use crate::model::{Outline, PersonaOutput, Section, TextFragment};
use crate::rank::{build_persona_output, PersonaContext};

/// One document's worth of input to a batch run.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    /// Document name, carried through to ranking output.
    pub name: String,

    /// Fragments in extraction order.
    pub fragments: Vec<TextFragment>,
}

impl DocumentInput {
    pub fn new(name: impl Into<String>, fragments: Vec<TextFragment>) -> Self {
        Self {
            name: name.into(),
            fragments,
        }
    }
}

/// Extract outlines for a batch of documents.
///
/// Each document gets its own result; a malformed document does not abort
/// the rest of the batch.
pub fn extract_outlines(
    inputs: &[DocumentInput],
    config: &OutlineConfig,
) -> Vec<(String, Result<Outline>)> {
    let run = |input: &DocumentInput| {
        (
            input.name.clone(),
            extract_outline(&input.fragments, config),
        )
    };

    if config.parallel {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    }
}

/// Analyze a batch of documents, keeping section bodies.
///
/// Unlike [`extract_outlines`] this is all-or-nothing: persona ranking needs
/// the complete cross-document pool, so any malformed document fails the
/// batch.
pub fn analyze_collection(
    inputs: &[DocumentInput],
    config: &OutlineConfig,
) -> Result<Vec<DocumentAnalysis>> {
    let run = |input: &DocumentInput| analyze_document(&input.name, &input.fragments, config);

    if config.parallel {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    }
}

/// Run the full persona-mode pipeline over a document collection.
///
/// Analyzes every document, pools all sections in input order, and ranks
/// the pool against the persona.
pub fn rank_collection(
    inputs: &[DocumentInput],
    persona: &PersonaContext,
    outline_config: &OutlineConfig,
    rank_config: &RankConfig,
) -> Result<PersonaOutput> {
    let analyses = analyze_collection(inputs, outline_config)?;

    let sections: Vec<Section> = analyses
        .into_iter()
        .flat_map(|a| a.sections)
        .collect();
    log::debug!(
        "pooled {} sections from {} documents",
        sections.len(),
        inputs.len()
    );

    let input_documents = inputs.iter().map(|i| i.name.clone()).collect();
    Ok(build_persona_output(
        input_documents,
        persona,
        &sections,
        rank_config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, title: &str, body: &str) -> DocumentInput {
        DocumentInput::new(
            name,
            vec![
                TextFragment::new(title, 18.0, true, 1, 0.05, 72.0),
                TextFragment::new(body, 11.0, false, 1, 0.2, 72.0),
            ],
        )
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let inputs = vec![
            doc("c.pdf", "Gamma Title", "Gamma body text about nothing much."),
            doc("a.pdf", "Alpha Title", "Alpha body text about nothing much."),
            doc("b.pdf", "Beta Title", "Beta body text about nothing much."),
        ];
        for config in [OutlineConfig::default(), OutlineConfig::default().sequential()] {
            let results = extract_outlines(&inputs, &config);
            let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
            assert_eq!(names, vec!["c.pdf", "a.pdf", "b.pdf"]);
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let inputs = vec![
            doc("one.pdf", "First Document", "Plenty of plain body text here."),
            doc("two.pdf", "Second Document", "More plain body text over here."),
        ];
        let par = extract_outlines(&inputs, &OutlineConfig::default());
        let seq = extract_outlines(&inputs, &OutlineConfig::default().sequential());
        for ((pn, po), (sn, so)) in par.iter().zip(seq.iter()) {
            assert_eq!(pn, sn);
            assert_eq!(po.as_ref().unwrap(), so.as_ref().unwrap());
        }
    }

    #[test]
    fn test_one_bad_document_does_not_abort_outlines() {
        let inputs = vec![
            doc("good.pdf", "Fine Title", "Fine body text for the document."),
            DocumentInput::new(
                "bad.pdf",
                vec![TextFragment::new("x", -1.0, false, 1, 0.1, 0.0)],
            ),
        ];
        let results = extract_outlines(&inputs, &OutlineConfig::default());
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
    }

    #[test]
    fn test_rank_collection_pools_all_documents() {
        let inputs = vec![
            doc(
                "menu.pdf",
                "Dinner Menu Ideas",
                "Vegetarian buffet dishes with lentils, beans and seasonal sides.",
            ),
            doc(
                "prep.pdf",
                "Preparation Notes",
                "Scale each recipe by headcount and label allergens clearly.",
            ),
        ];
        let persona = PersonaContext::build("Food Contractor", "prepare a vegetarian buffet");
        let output = rank_collection(
            &inputs,
            &persona,
            &OutlineConfig::default(),
            &RankConfig::default(),
        )
        .unwrap();

        assert_eq!(output.metadata.input_documents, vec!["menu.pdf", "prep.pdf"]);
        let docs: std::collections::BTreeSet<&str> = output
            .extracted_sections
            .iter()
            .map(|s| s.document.as_str())
            .collect();
        assert!(docs.contains("menu.pdf"));
        assert!(docs.contains("prep.pdf"));
    }

    #[test]
    fn test_rank_collection_fails_on_invalid_fragment() {
        let inputs = vec![DocumentInput::new(
            "bad.pdf",
            vec![TextFragment::new("x", f32::NAN, false, 1, 0.1, 0.0)],
        )];
        let persona = PersonaContext::build("Analyst", "review reports");
        let result = rank_collection(
            &inputs,
            &persona,
            &OutlineConfig::default(),
            &RankConfig::default(),
        );
        assert!(result.is_err());
    }
}
