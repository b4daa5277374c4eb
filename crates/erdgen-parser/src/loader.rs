//! Reading mxGraph / draw.io XML into a [`RawGraph`].
//!
//! Accepted layouts:
//!
//! ```text
//! <mxfile>                      <mxGraphModel>
//!   <diagram>                     <root>
//!     <mxGraphModel>                <mxCell id="0"/>
//!       <root>                      ...
//!         <mxCell id="0"/>        </root>
//!         <mxCell id="1" parent="0"/>
//!         <object id="2" label="Student">
//!           <mxCell vertex="1" parent="1"/>
//!         </object>
//!         ...
//! ```
//!
//! Cells wrapped in `<object>` / `<UserObject>` take their id and text from
//! the wrapper (`label` attribute). Only the first page is read.

use log::{debug, info};
use roxmltree::{Document, Node};

use erdgen_core::{
    graph::{Cell, CellKind, RawGraph},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

const GRAPH_MODEL: &str = "mxGraphModel";
const CELL: &str = "mxCell";
const DIAGRAM: &str = "diagram";
const WRAPPERS: &[&str] = &["object", "UserObject"];

/// Result of loading a document: the graph and the warnings raised while reading it.
#[derive(Debug)]
pub(crate) struct Loaded {
    pub(crate) graph: RawGraph,
    pub(crate) diagnostics: DiagnosticCollector,
}

/// Parse diagram XML into a raw graph.
///
/// Fatal problems (unreadable XML, no graph model, compressed pages) are
/// reported as errors in the returned collector; the graph is then empty.
pub(crate) fn load(source: &str) -> Loaded {
    let mut diagnostics = DiagnosticCollector::new();

    let document = match Document::parse(source) {
        Ok(document) => document,
        Err(err) => {
            diagnostics.emit(malformed_document(source, &err));
            return Loaded {
                graph: RawGraph::new(),
                diagnostics,
            };
        }
    };

    let graph = match find_graph_model(&document, &mut diagnostics) {
        Some(model) => read_cells(model, &mut diagnostics),
        None => RawGraph::new(),
    };

    info!(cells = graph.len(); "Document loaded");
    Loaded { graph, diagnostics }
}

fn node_span(node: Node<'_, '_>) -> Span {
    Span::new(node.range())
}

fn malformed_document(source: &str, err: &roxmltree::Error) -> Diagnostic {
    let pos = err.pos();
    let offset = line_col_to_offset(source, pos.row as usize, pos.col as usize);
    Diagnostic::error(format!("document is not well-formed XML: {err}"))
        .with_code(ErrorCode::E001)
        .with_label(Span::new(offset..offset), "here")
        .with_help("export the diagram from draw.io as uncompressed XML")
}

/// Convert a 1-based row/column into a byte offset, clamped to the source.
fn line_col_to_offset(source: &str, row: usize, col: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(row.saturating_sub(1))
        .map(str::len)
        .sum();
    let line = &source[line_start.min(source.len())..];
    let in_line = line
        .char_indices()
        .nth(col.saturating_sub(1))
        .map_or(line.len(), |(idx, _)| idx);
    (line_start + in_line).min(source.len())
}

/// Locate the graph model of the first page.
fn find_graph_model<'a, 'input>(
    document: &'a Document<'input>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Node<'a, 'input>> {
    let root = document.root_element();

    if root.has_tag_name(GRAPH_MODEL) {
        return Some(root);
    }

    let pages: Vec<Node<'a, 'input>> = root
        .children()
        .filter(|node| node.has_tag_name(DIAGRAM))
        .collect();

    for extra in pages.iter().skip(1) {
        let name = extra.attribute("name").unwrap_or("unnamed");
        diagnostics.emit(
            Diagnostic::warning(format!("page `{name}` ignored; only the first page is read"))
                .with_code(ErrorCode::E105)
                .with_label(node_span(*extra), "ignored page"),
        );
    }

    let search_root = pages.first().copied().unwrap_or(root);
    if let Some(model) = search_root
        .descendants()
        .find(|node| node.has_tag_name(GRAPH_MODEL))
    {
        return Some(model);
    }

    match pages.first() {
        Some(page) if page.text().is_some_and(|text| !text.trim().is_empty()) => {
            diagnostics.emit(
                Diagnostic::error("diagram page is stored compressed")
                    .with_code(ErrorCode::E003)
                    .with_label(node_span(*page), "compressed page content")
                    .with_help("disable File > Properties > Compressed in draw.io and save again"),
            );
        }
        _ => {
            diagnostics.emit(
                Diagnostic::error("document contains no `mxGraphModel`")
                    .with_code(ErrorCode::E002)
                    .with_label(node_span(root), "expected a diagram document")
                    .with_help("the input must be a draw.io / mxGraph XML document"),
            );
        }
    }
    None
}

fn read_cells(model: Node<'_, '_>, diagnostics: &mut DiagnosticCollector) -> RawGraph {
    let mut graph = RawGraph::new();

    let Some(root) = model.children().find(|node| node.has_tag_name("root")) else {
        debug!("Graph model has no <root>, document is empty");
        return graph;
    };

    for node in root.children().filter(Node::is_element) {
        let Some(cell) = read_cell(node, diagnostics) else {
            continue;
        };
        if let Err(duplicate) = graph.push(cell) {
            let mut diag = Diagnostic::warning(format!("duplicate cell id `{}`", duplicate.id()))
                .with_code(ErrorCode::E103)
                .with_optional_label(duplicate.span(), "ignored");
            if let Some(first_span) = graph.get(duplicate.id()).and_then(Cell::span) {
                diag = diag.with_secondary_label(first_span, "first defined here");
            }
            diagnostics.emit(diag);
        }
    }

    graph
}

/// Read one child of `<root>`: a bare `mxCell` or a wrapper around one.
fn read_cell(node: Node<'_, '_>, diagnostics: &mut DiagnosticCollector) -> Option<Cell> {
    let span = node_span(node);
    let tag = node.tag_name().name();

    let (cell_node, id, value) = if tag == CELL {
        (node, node.attribute("id"), node.attribute("value"))
    } else if WRAPPERS.contains(&tag) {
        let inner = node.children().find(|child| child.has_tag_name(CELL))?;
        (inner, node.attribute("id"), node.attribute("label"))
    } else {
        debug!(tag; "Skipping unknown element");
        return None;
    };

    let Some(id) = id else {
        diagnostics.emit(
            Diagnostic::warning(format!("`<{tag}>` without an id ignored"))
                .with_code(ErrorCode::E104)
                .with_label(span, "missing `id`"),
        );
        return None;
    };

    let kind = if cell_node.attribute("edge") == Some("1") {
        CellKind::Edge
    } else if cell_node.attribute("vertex") == Some("1") {
        CellKind::Vertex
    } else {
        CellKind::Container
    };

    let cell = Cell::new(Id::new(id), cell_node.attribute("parent").map(Id::new), kind)
        .with_value(value.unwrap_or_default())
        .with_style(cell_node.attribute("style").unwrap_or_default())
        .with_source(cell_node.attribute("source").map(Id::new))
        .with_target(cell_node.attribute("target").map(Id::new))
        .with_span(span);

    Some(cell)
}
