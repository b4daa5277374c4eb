//! Field-name derivation for association edges.
//!
//! An association label is free text such as `enrollsIn(N)`, `has`, or
//! nothing at all. It is turned into a field name and a multiplicity:
//!
//! | label            | target   | field             | collection |
//! |------------------|----------|-------------------|------------|
//! | `enrollsIn(N)`   | `Course` | `enrollsIn`       | yes        |
//! | `advisor (1)`    | `Teacher`| `advisor`         | no         |
//! | *(empty)*        | `Course` | `course`          | no         |
//! | `manages`        | `Dept`   | `managesDept`     | no         |
//! | `has (N)`        | `Room`   | `hasRoom`         | yes        |

use log::trace;

use crate::text::{label_text, lower_first, sanitize_identifier};

/// Marker for a to-many end.
pub const MANY_MARKER: &str = "(N)";
/// Marker for a to-one end.
pub const ONE_MARKER: &str = "(1)";

/// Relationship verbs that say nothing about what the field holds.
pub const DEFAULT_GENERIC_VERBS: &[&str] = &[
    "has",
    "contains",
    "manages",
    "offers",
    "teaches",
    "enrolls",
    "submits",
    "requires",
    "joins",
    "hosts",
    "employs",
    "receives",
    "stocks",
    "results_in",
];

/// Closed vocabulary of uninformative relationship verbs.
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericVerbs {
    verbs: Vec<String>,
}

impl GenericVerbs {
    /// Build a vocabulary from any list of verbs.
    pub fn new<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            verbs: verbs
                .into_iter()
                .map(|verb| verb.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.verbs.iter().any(|verb| *verb == word)
    }

    /// Whether `phrase` has at least one word and every word is generic.
    pub fn is_generic_phrase(&self, phrase: &str) -> bool {
        let mut words = phrase.split_whitespace().peekable();
        words.peek().is_some() && words.all(|word| self.contains(&sanitize_identifier(word)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.verbs.iter().map(String::as_str)
    }
}

impl Default for GenericVerbs {
    fn default() -> Self {
        Self::new(DEFAULT_GENERIC_VERBS)
    }
}

/// Result of deriving a field from an association label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedField {
    pub name: String,
    pub is_collection: bool,
}

/// Derive the field name and multiplicity of an association.
///
/// # Arguments
///
/// * `raw_label` - Edge text as found in the document (may contain markup)
/// * `target_name` - Sanitized name of the target entity
/// * `verbs` - Vocabulary of uninformative verbs
///
/// # Examples
///
/// ```
/// use erdgen_parser::naming::{GenericVerbs, derive_field};
///
/// let verbs = GenericVerbs::default();
///
/// let field = derive_field("enrollsIn(N)", "Course", &verbs);
/// assert_eq!(field.name, "enrollsIn");
/// assert!(field.is_collection);
///
/// assert_eq!(derive_field("manages", "Employee", &verbs).name, "managesEmployee");
/// assert_eq!(derive_field("", "Course", &verbs).name, "course");
/// ```
pub fn derive_field(raw_label: &str, target_name: &str, verbs: &GenericVerbs) -> DerivedField {
    let text = label_text(raw_label);
    let is_collection = text.contains(MANY_MARKER);
    let candidate = text.replace(MANY_MARKER, "").replace(ONE_MARKER, "");
    let candidate = candidate.trim();

    let name = if candidate.is_empty() {
        lower_first(target_name)
    } else if verbs.is_generic_phrase(candidate) {
        let verb_phrase = sanitize_identifier(candidate);
        lower_first(&format!("{verb_phrase}{target_name}"))
    } else {
        sanitize_identifier(candidate)
    };

    // A label made only of punctuation leaves nothing to name the field after.
    let name = if name.is_empty() {
        lower_first(target_name)
    } else {
        name
    };

    trace!(raw_label, target_name, name:% = name, is_collection; "Derived field");

    DerivedField {
        name,
        is_collection,
    }
}
