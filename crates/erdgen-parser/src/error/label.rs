//! Spans of the diagram document annotated with a short note.
//!
//! Every cell the loader reads remembers the byte range of its XML element,
//! so a label can point an operator at the offending shape or arrow.

use crate::span::Span;

/// Whether a label marks the subject of a diagnostic or related context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The element the diagnostic is about, e.g. the dangling edge.
    Subject,
    /// A related element, e.g. the cell that first claimed a duplicated id.
    Context,
}

/// A note attached to a range of the diagram document.
///
/// ```text
/// warning[E103]: duplicate cell id `2`
///   |
/// 9 | <mxCell id="2" value="Course" vertex="1" parent="1"/>
///   | ----------------------------------------------------- ignored
/// 7 | <mxCell id="2" value="Student" vertex="1" parent="1"/>
///   | ----------------------------------------------------- first defined here
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    role: LabelRole,
    span: Span,
    note: String,
}

impl Label {
    pub fn new(role: LabelRole, span: Span, note: impl Into<String>) -> Self {
        Self {
            role,
            span,
            note: note.into(),
        }
    }

    /// Label the subject of a diagnostic.
    pub fn primary(span: Span, note: impl Into<String>) -> Self {
        Self::new(LabelRole::Subject, span, note)
    }

    /// Label an element related to the subject.
    pub fn secondary(span: Span, note: impl Into<String>) -> Self {
        Self::new(LabelRole::Context, span, note)
    }

    pub fn role(&self) -> LabelRole {
        self.role
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.note
    }

    pub fn is_primary(&self) -> bool {
        self.role == LabelRole::Subject
    }

    pub fn is_secondary(&self) -> bool {
        self.role == LabelRole::Context
    }
}
