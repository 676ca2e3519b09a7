//! Persona context: keyword derivation from a role/task description.

use std::collections::BTreeSet;

/// Common English words carrying no relevance signal.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "has", "have",
    "her", "his", "its", "one", "our", "out", "was", "were", "will", "with", "that", "this",
    "then", "them", "they", "from", "into", "your", "been", "each", "more", "most", "some",
    "such", "than", "very", "what", "when", "where", "which", "while", "who", "whom", "why",
    "how", "about", "after", "before", "between", "during", "under", "over", "their", "there",
    "these", "those", "based", "using",
];

/// A built-in domain keyword table: when any trigger appears as a substring
/// of the lowered role/task text, the whole keyword list joins the derived
/// set.
struct DomainTable {
    triggers: &'static [&'static str],
    keywords: &'static [&'static str],
}

const DOMAIN_TABLES: &[DomainTable] = &[
    DomainTable {
        triggers: &["travel", "trip", "planner", "tourist", "itinerary"],
        keywords: &[
            "itinerary", "accommodation", "hotel", "restaurant", "attraction", "tour",
            "transport", "flight", "train", "bus", "guide", "booking", "reservation",
            "sightseeing", "museum", "beach", "activity", "cost", "price", "budget", "travel",
            "destination", "location", "map", "route", "schedule", "visit", "explore",
            "experience", "culture", "history", "tradition", "city", "town", "festival",
            "event", "entertainment", "nightlife", "shopping", "market",
        ],
    },
    DomainTable {
        triggers: &["hr", "human resources", "form", "onboarding", "compliance", "acrobat"],
        keywords: &[
            "form", "fillable", "field", "signature", "submit", "workflow", "approval",
            "onboarding", "compliance", "document", "template", "process", "digital",
            "electronic", "pdf", "create", "manage", "distribute", "collect", "employee",
            "policy", "procedure", "training", "export", "convert", "edit", "share",
            "collaboration", "review", "comment", "security", "permission", "access",
            "protect", "password", "encrypt",
        ],
    },
    DomainTable {
        triggers: &["food", "contractor", "catering", "caterer", "menu", "chef", "buffet"],
        keywords: &[
            "recipe", "ingredient", "cook", "preparation", "vegetarian", "vegan", "buffet",
            "menu", "dish", "meal", "serving", "portion", "corporate", "catering", "dinner",
            "lunch", "breakfast", "food", "cuisine", "dietary", "allergen", "nutrition",
            "quantity", "scale", "cooking", "kitchen",
        ],
    },
];

/// The persona/task context driving one ranking invocation.
///
/// `derived_keywords` is a deduplicated, lower-cased token set extracted
/// from role + task, minus stop-words, plus every built-in domain list whose
/// trigger matches the text by substring. Rebuilt per invocation; stateless
/// across documents.
#[derive(Debug, Clone)]
pub struct PersonaContext {
    /// Persona role string, as supplied.
    pub role: String,

    /// Task description, as supplied.
    pub task: String,

    /// Lower-cased keyword set.
    pub derived_keywords: BTreeSet<String>,
}

impl PersonaContext {
    /// Derive the keyword set from a role and task description.
    pub fn build(role: impl Into<String>, task: impl Into<String>) -> Self {
        let role = role.into();
        let task = task.into();
        let text = format!("{} {}", role, task).to_lowercase();

        let mut derived_keywords: BTreeSet<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= 3)
            .filter(|token| !STOP_WORDS.contains(token))
            .map(str::to_string)
            .collect();

        for table in DOMAIN_TABLES {
            if table.triggers.iter().any(|t| text.contains(t)) {
                derived_keywords.extend(table.keywords.iter().map(|k| k.to_string()));
            }
        }

        log::debug!(
            "persona '{}': {} derived keywords",
            role,
            derived_keywords.len()
        );

        Self {
            role,
            task,
            derived_keywords,
        }
    }
}
