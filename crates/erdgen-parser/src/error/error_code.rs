//! Error codes for the erdgen diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document errors (fatal)
//! - `E1xx` - Extraction anomalies
//! - `E2xx` - Inheritance anomalies
//! - `E3xx` - Synthesis anomalies

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Malformed document.
    ///
    /// The input is not well-formed XML.
    E001,

    /// Missing graph model.
    ///
    /// The document contains no `mxGraphModel` element to read cells from.
    E002,

    /// Compressed diagram.
    ///
    /// The page content is stored compressed. Save the diagram uncompressed
    /// (draw.io: File > Properties > Compressed) and try again.
    E003,

    // =========================================================================
    // Extraction Anomalies (E1xx)
    // =========================================================================
    /// Unnamed entity.
    ///
    /// A top-level shape has no identifier characters left after its text was
    /// normalized, so it cannot be referenced from code.
    E100,

    /// Unanchored edge.
    ///
    /// An edge is missing its source or target end.
    E101,

    /// Unknown edge endpoint.
    ///
    /// An edge points at a cell that is not an entity.
    E102,

    /// Duplicate cell id.
    ///
    /// Two cells share an id; only the first is kept.
    E103,

    /// Cell without an id.
    ///
    /// The cell cannot be referenced by edges and was skipped.
    E104,

    /// Ignored page.
    ///
    /// Only the first page of a multi-page document is read.
    E105,

    // =========================================================================
    // Inheritance Anomalies (E2xx)
    // =========================================================================
    /// Multiple parents.
    ///
    /// An entity is drawn extending more than one parent; generated classes
    /// support a single superclass.
    E200,

    /// Inheritance cycle.
    ///
    /// Following generalization edges leads back to the starting entity.
    E201,

    // =========================================================================
    // Synthesis Anomalies (E3xx)
    // =========================================================================
    /// Duplicate class name.
    ///
    /// Two entities normalize to the same class name.
    E300,

    /// Duplicate field name.
    ///
    /// Two relations of the same entity derive the same field name.
    E301,

    /// Unknown field type.
    ///
    /// A relation refers to an entity that is not part of the model.
    E302,

    /// Unknown superclass.
    ///
    /// The recorded parent of an entity is not part of the model, so no
    /// `extends` clause is generated.
    E303,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Document errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            // Extraction anomalies
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            // Inheritance anomalies
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            // Synthesis anomalies
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Document errors
            ErrorCode::E001 => "malformed document",
            ErrorCode::E002 => "missing graph model",
            ErrorCode::E003 => "compressed diagram",
            // Extraction anomalies
            ErrorCode::E100 => "unnamed entity",
            ErrorCode::E101 => "unanchored edge",
            ErrorCode::E102 => "unknown edge endpoint",
            ErrorCode::E103 => "duplicate cell id",
            ErrorCode::E104 => "cell without id",
            ErrorCode::E105 => "ignored page",
            // Inheritance anomalies
            ErrorCode::E200 => "multiple parents",
            ErrorCode::E201 => "inheritance cycle",
            // Synthesis anomalies
            ErrorCode::E300 => "duplicate class name",
            ErrorCode::E301 => "duplicate field name",
            ErrorCode::E302 => "unknown field type",
            ErrorCode::E303 => "unknown superclass",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
