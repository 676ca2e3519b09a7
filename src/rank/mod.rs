//! Persona-driven relevance ranking.

mod keywords;
mod ranker;

pub use keywords::PersonaContext;
pub use ranker::{rank_sections, refine_text, relevance_score, Ranking};

use crate::config::RankConfig;
use crate::model::{PersonaMetadata, PersonaOutput, Section};

/// Rank a pooled section list and wrap it in the persona-mode output
/// contract.
///
/// `input_documents` lists the documents that contributed sections, in
/// processing order.
pub fn build_persona_output(
    input_documents: Vec<String>,
    persona: &PersonaContext,
    sections: &[Section],
    config: &RankConfig,
) -> PersonaOutput {
    let ranking = rank_sections(sections, persona, config);
    PersonaOutput {
        metadata: PersonaMetadata {
            input_documents,
            persona: persona.role.clone(),
            job_to_be_done: persona.task.clone(),
        },
        extracted_sections: ranking.extracted_sections,
        subsection_analysis: ranking.subsection_analysis,
    }
}
