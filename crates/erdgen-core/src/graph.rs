//! The raw, schema-less diagram graph.
//!
//! A [`RawGraph`] is the flat list of cells a diagram document is made of,
//! in document order. Nothing here carries model semantics: whether a cell
//! is an entity, a label, or a decoration is decided later by the extractor
//! from the cell's kind, parent scope, text, and style.
//!
//! # Example
//!
//! ```
//! use erdgen_core::graph::{Cell, RawGraph};
//!
//! let graph: RawGraph = [
//!     Cell::container("0", None),
//!     Cell::container("1", Some("0")),
//!     Cell::vertex("2", "1", "Student"),
//!     Cell::vertex("3", "1", "Course"),
//!     Cell::edge("4", "1", "2", "3", "enrollsIn(N)"),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(graph.len(), 5);
//! assert!(graph.get("4".into()).is_some_and(|cell| cell.is_edge()));
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::{identifier::Id, span::Span};

/// What a cell is, as declared by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// A shape (`vertex="1"`).
    Vertex,
    /// A connector (`edge="1"`).
    Edge,
    /// Neither a shape nor a connector: the root cell and layers.
    Container,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Vertex => write!(f, "vertex"),
            CellKind::Edge => write!(f, "edge"),
            CellKind::Container => write!(f, "container"),
        }
    }
}

/// A single node of the raw graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: Id,
    parent: Option<Id>,
    kind: CellKind,
    value: String,
    style: String,
    source: Option<Id>,
    target: Option<Id>,
    span: Option<Span>,
}

impl Cell {
    /// Create a cell with the given id, parent, and kind and no text or style.
    pub fn new(id: Id, parent: Option<Id>, kind: CellKind) -> Self {
        Self {
            id,
            parent,
            kind,
            value: String::new(),
            style: String::new(),
            source: None,
            target: None,
            span: None,
        }
    }

    /// Shorthand for a container cell (root or layer).
    pub fn container(id: &str, parent: Option<&str>) -> Self {
        Self::new(Id::new(id), parent.map(Id::new), CellKind::Container)
    }

    /// Shorthand for a vertex with text.
    pub fn vertex(id: &str, parent: &str, value: &str) -> Self {
        Self::new(Id::new(id), Some(Id::new(parent)), CellKind::Vertex).with_value(value)
    }

    /// Shorthand for an edge between two cells with a label.
    pub fn edge(id: &str, parent: &str, source: &str, target: &str, value: &str) -> Self {
        Self::new(Id::new(id), Some(Id::new(parent)), CellKind::Edge)
            .with_source(Some(Id::new(source)))
            .with_target(Some(Id::new(target)))
            .with_value(value)
    }

    /// Set the free-text value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the raw style string.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the source reference.
    pub fn with_source(mut self, source: Option<Id>) -> Self {
        self.source = source;
        self
    }

    /// Set the target reference.
    pub fn with_target(mut self, target: Option<Id>) -> Self {
        self.target = target;
        self
    }

    /// Attach the location of the element this cell was read from.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The parent-scope reference, `None` for the absolute root.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_vertex(&self) -> bool {
        self.kind == CellKind::Vertex
    }

    pub fn is_edge(&self) -> bool {
        self.kind == CellKind::Edge
    }

    /// The raw, undecoded text of the cell.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn source(&self) -> Option<Id> {
        self.source
    }

    pub fn target(&self) -> Option<Id> {
        self.target
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }
}

/// Ordered collection of cells, indexed by id.
///
/// Insertion order is document order and is preserved by every iterator.
/// Ids are unique: pushing a cell whose id is already present is rejected
/// and the rejected cell is handed back to the caller.
#[derive(Debug, Clone, Default)]
pub struct RawGraph {
    cells: IndexMap<Id, Cell>,
}

impl RawGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell.
    ///
    /// # Errors
    ///
    /// Returns the cell back if a cell with the same id already exists;
    /// the first cell keeps its place.
    pub fn push(&mut self, cell: Cell) -> Result<(), Box<Cell>> {
        if self.cells.contains_key(&cell.id) {
            return Err(Box::new(cell));
        }
        self.cells.insert(cell.id, cell);
        Ok(())
    }

    /// Look up a cell by id.
    pub fn get(&self, id: Id) -> Option<&Cell> {
        self.cells.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.cells.contains_key(&id)
    }

    /// Iterate over all cells in document order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Cell> for RawGraph {
    /// Collects cells, keeping the first cell for every repeated id.
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut graph = Self::new();
        for cell in iter {
            let _ = graph.push(cell);
        }
        graph
    }
}
