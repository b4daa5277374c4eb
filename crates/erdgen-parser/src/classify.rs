//! Semantic classification of edges from their rendering style.
//!
//! Diagrams carry no explicit relationship type; the arrowhead glyph is the
//! only signal. The rule lives behind [`EdgeClassifier`] so it can be
//! replaced without touching extraction.

use std::fmt;

use crate::style::Style;

/// What an edge means for the generated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// A field on the source entity referring to the target.
    Association,
    /// The source entity extends the target entity.
    Inheritance,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Association => write!(f, "association"),
            EdgeKind::Inheritance => write!(f, "inheritance"),
        }
    }
}

/// Decides the [`EdgeKind`] of an edge from its parsed style.
///
/// Contract: total and pure. Every style maps to exactly one kind, and the
/// same style always maps to the same kind.
pub trait EdgeClassifier {
    fn classify(&self, style: &Style<'_>) -> EdgeKind;
}

/// The UML convention: a hollow triangle at the target end is generalization.
///
/// In draw.io terms that is `endArrow=block` (or `blockThin`) together with
/// `endFill=0`. Everything else, including filled triangles, is an
/// association.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmlEdgeClassifier;

impl EdgeClassifier for UmlEdgeClassifier {
    fn classify(&self, style: &Style<'_>) -> EdgeKind {
        let triangle = matches!(style.get("endArrow"), Some("block" | "blockThin"));
        let hollow = style.get("endFill") == Some("0");

        if triangle && hollow {
            EdgeKind::Inheritance
        } else {
            EdgeKind::Association
        }
    }
}

impl<F> EdgeClassifier for F
where
    F: Fn(&Style<'_>) -> EdgeKind,
{
    fn classify(&self, style: &Style<'_>) -> EdgeKind {
        self(style)
    }
}
