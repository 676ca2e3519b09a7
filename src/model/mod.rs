//! Data model types.

mod fragment;
mod outline;
mod section;

pub use fragment::{validate_fragments, TextFragment};
pub use outline::{Heading, HeadingLevel, Outline};
pub use section::{
    PersonaMetadata, PersonaOutput, RankedSection, Section, SubsectionAnalysis,
};
