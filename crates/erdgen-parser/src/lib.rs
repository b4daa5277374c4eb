//! # Erdgen Parser
//!
//! Model extraction for draw.io / mxGraph entity-relationship diagrams. This
//! crate turns diagram XML into the [`erdgen_core::model::ModelIr`] consumed
//! by class synthesis.
//!
//! ## Usage
//!
//! ```
//! # use erdgen_parser::{parse, ExtractConfig, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"<mxGraphModel><root>
//!         <mxCell id="0"/>
//!         <mxCell id="1" parent="0"/>
//!         <mxCell id="2" value="Student" vertex="1" parent="1"/>
//!         <mxCell id="3" value="Course" vertex="1" parent="1"/>
//!         <mxCell id="4" value="enrollsIn(N)" edge="1" parent="1" source="2" target="3"/>
//!     </root></mxGraphModel>"#;
//!
//!     let extraction = parse(source, &ExtractConfig::default())?;
//!     assert_eq!(extraction.ir().entities().len(), 2);
//!     assert_eq!(extraction.ir().relations()[0].field_name(), "enrollsIn");
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod error;
mod extract;
mod inheritance;
mod loader;
pub mod naming;
pub mod style;
pub mod text;

pub use erdgen_core::span::{self, Span};
pub use extract::{ExtractConfig, Extraction, extract, extract_with};

use erdgen_core::graph::RawGraph;

use error::{Diagnostic, ParseError};

/// Read diagram XML into a raw graph.
///
/// Returns the graph together with the warnings raised while reading it
/// (skipped cells, duplicate ids, ignored pages).
///
/// # Errors
///
/// Returns [`ParseError`] if the document is not well-formed XML, contains
/// no graph model, or stores its page compressed.
pub fn load(source: &str) -> Result<(RawGraph, Vec<Diagnostic>), ParseError> {
    let loaded = loader::load(source);
    let warnings = loaded.diagnostics.finish()?;
    Ok((loaded.graph, warnings))
}

/// Parse diagram XML into the model IR.
///
/// This is the main entry point of the crate. It runs the complete
/// extraction pipeline:
///
/// 1. **Load** - Read the XML into a [`RawGraph`] of cells
/// 2. **Collect** - Sort cells into entities, edge labels and edges
/// 3. **Resolve** - Validate edge endpoints, classify and name fields
/// 4. **Settle inheritance** - Apply the inheritance policy and break cycles
///
/// # Arguments
///
/// * `source` - The diagram XML
/// * `config` - Configuration for the extraction phase
///
/// # Returns
///
/// The [`Extraction`] with loader warnings first, followed by extraction
/// warnings, or a [`ParseError`] if the document cannot be read as a graph.
pub fn parse(source: &str, config: &ExtractConfig) -> Result<Extraction, ParseError> {
    // Step 1: Load
    let (graph, load_warnings) = load(source)?;

    // Steps 2-4: Extract
    let mut extraction = extract(&graph, config);
    extraction.prepend_warnings(load_warnings);
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_orders_loader_warnings_first() {
        let source = r#"<mxGraphModel><root>
            <mxCell id="0"/>
            <mxCell id="1" parent="0"/>
            <mxCell id="2" value="A" vertex="1" parent="1"/>
            <mxCell id="2" value="B" vertex="1" parent="1"/>
            <mxCell id="3" value="x" edge="1" parent="1" source="2"/>
        </root></mxGraphModel>"#;

        let extraction = parse(source, &ExtractConfig::default()).unwrap();
        let codes: Vec<_> = extraction.warnings().iter().map(|w| w.code()).collect();
        assert_eq!(codes, vec![Some(ErrorCode::E103), Some(ErrorCode::E101)]);
    }

    #[test]
    fn test_parse_fails_on_malformed_document() {
        let err = parse("<mxGraphModel>", &ExtractConfig::default()).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
    }

    #[test]
    fn test_load_exposes_raw_graph() {
        let (graph, warnings) = load(r#"<mxGraphModel><root><mxCell id="0"/></root></mxGraphModel>"#).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(warnings.is_empty());
    }
}
