//! Extraction of the model IR from a raw graph.
//!
//! The graph is walked once, sorting every cell into the collection it
//! contributes to:
//!
//! - vertices in the entity scope become [`Entity`] candidates
//! - vertices parented to an edge become label candidates for that edge
//! - edges are queued for resolution once every entity is known
//!
//! Queued edges are then validated, classified and turned into relations or
//! inheritance candidates, all in document order.

use indexmap::IndexMap;
use log::{debug, info, trace};

use erdgen_core::{
    graph::{Cell, CellKind, RawGraph},
    identifier::Id,
    model::{Entity, InheritanceEdge, InheritancePolicy, ModelIr, Relation},
};

use crate::{
    classify::{EdgeClassifier, EdgeKind, UmlEdgeClassifier},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    inheritance::{self, Candidate},
    naming::{GenericVerbs, derive_field},
    style::Style,
    text::{label_text, normalize_name},
};

/// Scope id used by draw.io for the default layer when no root can be found.
const DEFAULT_LAYER_ID: &str = "1";

/// Knobs of the extraction phase.
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    generic_verbs: GenericVerbs,
    inheritance_policy: InheritancePolicy,
}

impl ExtractConfig {
    pub fn new(generic_verbs: GenericVerbs, inheritance_policy: InheritancePolicy) -> Self {
        Self {
            generic_verbs,
            inheritance_policy,
        }
    }

    pub fn with_generic_verbs(mut self, generic_verbs: GenericVerbs) -> Self {
        self.generic_verbs = generic_verbs;
        self
    }

    pub fn with_inheritance_policy(mut self, inheritance_policy: InheritancePolicy) -> Self {
        self.inheritance_policy = inheritance_policy;
        self
    }

    pub fn generic_verbs(&self) -> &GenericVerbs {
        &self.generic_verbs
    }

    pub fn inheritance_policy(&self) -> InheritancePolicy {
        self.inheritance_policy
    }
}

/// The IR of one diagram together with the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct Extraction {
    ir: ModelIr,
    warnings: Vec<Diagnostic>,
}

impl Extraction {
    pub fn ir(&self) -> &ModelIr {
        &self.ir
    }

    /// Recoverable anomalies in the order they were found.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (ModelIr, Vec<Diagnostic>) {
        (self.ir, self.warnings)
    }

    pub(crate) fn prepend_warnings(&mut self, mut earlier: Vec<Diagnostic>) {
        earlier.append(&mut self.warnings);
        self.warnings = earlier;
    }
}

/// Extract the IR from `graph` using the UML arrowhead convention.
///
/// Never fails: every anomaly is reported as a warning and the offending
/// cell is left out of the IR.
pub fn extract(graph: &RawGraph, config: &ExtractConfig) -> Extraction {
    extract_with(graph, config, &UmlEdgeClassifier)
}

/// Extract the IR from `graph`, deciding edge kinds with `classifier`.
pub fn extract_with(
    graph: &RawGraph,
    config: &ExtractConfig,
    classifier: &dyn EdgeClassifier,
) -> Extraction {
    Extractor::new(graph, config, classifier).run()
}

struct Extractor<'g> {
    graph: &'g RawGraph,
    config: &'g ExtractConfig,
    classifier: &'g dyn EdgeClassifier,
    diagnostics: DiagnosticCollector,
}

impl<'g> Extractor<'g> {
    fn new(
        graph: &'g RawGraph,
        config: &'g ExtractConfig,
        classifier: &'g dyn EdgeClassifier,
    ) -> Self {
        Self {
            graph,
            config,
            classifier,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn run(mut self) -> Extraction {
        let graph = self.graph;
        let scope = entity_scope(graph);
        debug!(scope:% = scope; "Entity scope resolved");

        let mut entities: IndexMap<Id, Entity> = IndexMap::new();
        let mut edge_labels: IndexMap<Id, &'g str> = IndexMap::new();
        let mut edges: Vec<&'g Cell> = Vec::new();

        for cell in graph.cells() {
            match cell.kind() {
                CellKind::Vertex if cell.parent() == Some(scope) => {
                    if let Some(entity) = self.entity(cell) {
                        entities.insert(entity.id(), entity);
                    }
                }
                CellKind::Vertex => {
                    let Some(parent) = cell.parent() else {
                        continue;
                    };
                    let parent_is_edge = graph.get(parent).is_some_and(Cell::is_edge);
                    if parent_is_edge && !label_text(cell.value()).trim().is_empty() {
                        edge_labels.entry(parent).or_insert(cell.value());
                    }
                }
                CellKind::Edge => edges.push(cell),
                CellKind::Container => {}
            }
        }

        let mut relations = Vec::new();
        let mut candidates = Vec::new();

        for edge in edges {
            let Some((source, target)) = self.endpoints(edge, &entities) else {
                continue;
            };

            let style = Style::parse(edge.style());
            match self.classifier.classify(&style) {
                EdgeKind::Inheritance => {
                    debug!(edge:% = edge.id(), child:% = source, parent:% = target; "Generalization edge");
                    candidates.push(Candidate {
                        edge_id: edge.id(),
                        edge: InheritanceEdge::new(source, target),
                        span: edge.span(),
                    });
                }
                EdgeKind::Association => {
                    let raw_label = edge_label(edge, &edge_labels);
                    let target_name = entities.get(&target).map_or("", Entity::name);
                    let field = derive_field(raw_label, target_name, self.config.generic_verbs());
                    debug!(
                        edge:% = edge.id(),
                        field:% = field.name,
                        is_collection = field.is_collection;
                        "Association edge"
                    );
                    relations.push(Relation::new(
                        source,
                        target,
                        raw_label,
                        field.name,
                        field.is_collection,
                    ));
                }
            }
        }

        let inheritance = inheritance::resolve(
            candidates,
            self.config.inheritance_policy(),
            &entities,
            &mut self.diagnostics,
        );

        let ir = ModelIr::new(entities.into_values().collect(), inheritance, relations);
        info!(
            entities = ir.entities().len(),
            relations = ir.relations().len(),
            inheritance = ir.inheritance().len();
            "Model extracted"
        );
        trace!(ir:? = ir; "Extracted model");

        let warnings = match self.diagnostics.finish() {
            Ok(warnings) => warnings,
            // Extraction only emits warnings.
            Err(err) => err.diagnostics().to_vec(),
        };
        Extraction { ir, warnings }
    }

    /// Turn a vertex in scope into an entity, if its text survives normalization.
    fn entity(&mut self, cell: &Cell) -> Option<Entity> {
        if cell.value().trim().is_empty() {
            return None;
        }

        let name = normalize_name(cell.value());
        if name.is_empty() {
            self.diagnostics.emit(
                Diagnostic::warning(format!(
                    "shape `{}` has no usable name (text {:?})",
                    cell.id(),
                    cell.value()
                ))
                .with_code(ErrorCode::E100)
                .with_optional_label(cell.span(), "shape skipped")
                .with_help("names may only use letters, digits and `_`"),
            );
            return None;
        }

        debug!(id:% = cell.id(), name:% = name; "Entity found");
        Some(Entity::new(cell.id(), name))
    }

    /// Both endpoint ids of `edge`, if each resolves to a known entity.
    ///
    /// Emits exactly one warning for an edge that is rejected.
    fn endpoints(&mut self, edge: &Cell, entities: &IndexMap<Id, Entity>) -> Option<(Id, Id)> {
        let (Some(source), Some(target)) = (edge.source(), edge.target()) else {
            let missing = match (edge.source(), edge.target()) {
                (None, None) => "source and target",
                (None, Some(_)) => "source",
                _ => "target",
            };
            self.diagnostics.emit(
                Diagnostic::warning(format!("edge `{}` is missing its {missing}", edge.id()))
                    .with_code(ErrorCode::E101)
                    .with_optional_label(edge.span(), "dangling edge")
                    .with_help("connect both ends of the arrow to an entity"),
            );
            return None;
        };

        let unknown: Vec<Id> = [source, target]
            .into_iter()
            .filter(|id| !entities.contains_key(id))
            .collect();
        if unknown.is_empty() {
            return Some((source, target));
        }

        let described: Vec<String> = unknown
            .iter()
            .map(|id| match self.graph.get(*id) {
                Some(_) => format!("`{id}` (not an entity)"),
                None => format!("`{id}` (missing)"),
            })
            .collect();
        self.diagnostics.emit(
            Diagnostic::warning(format!(
                "edge `{}` connects unknown cells: {}",
                edge.id(),
                described.join(", ")
            ))
            .with_code(ErrorCode::E102)
            .with_optional_label(edge.span(), "edge ignored")
            .with_help("attach the arrow to a top-level named shape"),
        );
        None
    }
}

/// The text an edge is labelled with: its own, else the first child label.
fn edge_label<'g>(edge: &'g Cell, edge_labels: &IndexMap<Id, &'g str>) -> &'g str {
    if !label_text(edge.value()).trim().is_empty() {
        return edge.value();
    }
    edge_labels.get(&edge.id()).copied().unwrap_or("")
}

/// The parent id that marks a vertex as a top-level entity.
fn entity_scope(graph: &RawGraph) -> Id {
    let Some(root) = graph
        .cells()
        .find(|cell| cell.kind() == CellKind::Container && cell.parent().is_none())
        .map(Cell::id)
    else {
        return Id::new(DEFAULT_LAYER_ID);
    };

    graph
        .cells()
        .find(|cell| cell.kind() == CellKind::Container && cell.parent() == Some(root))
        .map_or(root, Cell::id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vec<Cell> {
        vec![Cell::container("0", None), Cell::container("1", Some("0"))]
    }

    fn inheritance(id: &str, child: &str, parent: &str) -> Cell {
        Cell::edge(id, "1", child, parent, "").with_style("endArrow=block;endSize=16;endFill=0;html=1;")
    }

    fn run(cells: Vec<Cell>) -> Extraction {
        extract(&cells.into_iter().collect(), &ExtractConfig::default())
    }

    fn names(extraction: &Extraction) -> Vec<&str> {
        extraction.ir().entities().iter().map(Entity::name).collect()
    }

    #[test]
    fn test_entities_in_scope() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "Student"),
            Cell::vertex("3", "1", "&lt;&lt;interface&gt;&gt;<br>Course Unit"),
            Cell::vertex("4", "2", "nested"),
            Cell::vertex("5", "1", ""),
        ]);

        let extraction = run(cells);
        assert_eq!(names(&extraction), vec!["Student", "CourseUnit"]);
        assert!(extraction.warnings().is_empty());
    }

    #[test]
    fn test_unnamed_entity_is_reported() {
        let mut cells = base();
        cells.push(Cell::vertex("2", "1", "<br>&nbsp;"));

        let extraction = run(cells);
        assert!(extraction.ir().entities().is_empty());
        assert_eq!(extraction.warnings()[0].code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_scope_without_layer_is_root() {
        let cells = vec![
            Cell::container("root", None),
            Cell::vertex("2", "root", "Solo"),
        ];

        assert_eq!(names(&run(cells)), vec!["Solo"]);
    }

    #[test]
    fn test_scope_without_root_is_default_layer_id() {
        let cells = vec![Cell::vertex("2", "1", "A"), Cell::vertex("3", "x", "B")];

        assert_eq!(names(&run(cells)), vec!["A"]);
    }

    #[test]
    fn test_association_from_edge_text() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "Student"),
            Cell::vertex("3", "1", "Course"),
            Cell::edge("4", "1", "2", "3", "enrollsIn(N)"),
        ]);

        let extraction = run(cells);
        let relations = extraction.ir().relations();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].field_name(), "enrollsIn");
        assert!(relations[0].is_collection());
        assert_eq!(relations[0].raw_label(), "enrollsIn(N)");
    }

    #[test]
    fn test_label_from_child_vertex() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "Teacher"),
            Cell::vertex("3", "1", "Course"),
            Cell::edge("4", "1", "2", "3", ""),
            Cell::vertex("5", "4", "").with_style("edgeLabel;html=1;"),
            Cell::vertex("6", "4", "teaches (N)").with_style("edgeLabel;html=1;"),
            Cell::vertex("7", "4", "ignored"),
        ]);

        let extraction = run(cells);
        let relation = &extraction.ir().relations()[0];
        assert_eq!(relation.raw_label(), "teaches (N)");
        assert_eq!(relation.field_name(), "teachesCourse");
        assert_eq!(names(&extraction), vec!["Teacher", "Course"]);
    }

    #[test]
    fn test_edges_may_precede_their_endpoints() {
        let mut cells = base();
        cells.extend([
            Cell::edge("4", "1", "2", "3", ""),
            Cell::vertex("2", "1", "Order"),
            Cell::vertex("3", "1", "Invoice"),
        ]);

        let extraction = run(cells);
        assert_eq!(extraction.ir().relations()[0].field_name(), "invoice");
    }

    #[test]
    fn test_dangling_edge() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "A"),
            Cell::edge("3", "1", "2", "2", "x").with_target(None),
        ]);

        let extraction = run(cells);
        assert!(extraction.ir().relations().is_empty());
        assert_eq!(extraction.warnings().len(), 1);
        assert_eq!(extraction.warnings()[0].code(), Some(ErrorCode::E101));
        assert_eq!(extraction.warnings()[0].message(), "edge `3` is missing its target");
    }

    #[test]
    fn test_unknown_endpoints_give_one_warning() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "A"),
            Cell::vertex("3", "1", "<hr>"),
            Cell::edge("4", "1", "3", "99", "has"),
        ]);

        let extraction = run(cells);
        assert!(extraction.ir().relations().is_empty());

        let edge_warnings: Vec<_> = extraction
            .warnings()
            .iter()
            .filter(|w| w.code() == Some(ErrorCode::E102))
            .collect();
        assert_eq!(edge_warnings.len(), 1);
        assert!(edge_warnings[0].message().contains("`3` (not an entity)"));
        assert!(edge_warnings[0].message().contains("`99` (missing)"));
    }

    #[test]
    fn test_inheritance_edges() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "Person"),
            Cell::vertex("3", "1", "Employee"),
            inheritance("4", "3", "2"),
        ]);

        let extraction = run(cells);
        let ir = extraction.ir();
        assert!(ir.relations().is_empty());
        assert_eq!(ir.inheritance().parent_of(Id::new("3")), Some(Id::new("2")));
    }

    #[test]
    fn test_inheritance_policy_is_applied() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "A"),
            Cell::vertex("3", "1", "B"),
            Cell::vertex("4", "1", "C"),
            inheritance("5", "4", "2"),
            inheritance("6", "4", "3"),
        ]);
        let graph: RawGraph = cells.into_iter().collect();

        let first = extract(&graph, &ExtractConfig::default());
        assert_eq!(first.ir().inheritance().parent_of(Id::new("4")), Some(Id::new("2")));

        let config = ExtractConfig::default().with_inheritance_policy(InheritancePolicy::RejectMultiple);
        let rejected = extract(&graph, &config);
        assert_eq!(rejected.ir().inheritance().parent_of(Id::new("4")), None);
        assert_eq!(rejected.warnings()[0].code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_custom_classifier() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "Shape"),
            Cell::vertex("3", "1", "Circle"),
            Cell::edge("4", "1", "3", "2", "").with_style("dashed=1;"),
        ]);
        let graph: RawGraph = cells.into_iter().collect();

        let dashed = |style: &Style<'_>| {
            if style.is_enabled("dashed") {
                EdgeKind::Inheritance
            } else {
                EdgeKind::Association
            }
        };
        let extraction = extract_with(&graph, &ExtractConfig::default(), &dashed);

        assert_eq!(
            extraction.ir().inheritance().parent_of(Id::new("3")),
            Some(Id::new("2"))
        );
    }

    #[test]
    fn test_custom_verbs() {
        let mut cells = base();
        cells.extend([
            Cell::vertex("2", "1", "Driver"),
            Cell::vertex("3", "1", "Car"),
            Cell::edge("4", "1", "2", "3", "drives"),
        ]);
        let graph: RawGraph = cells.into_iter().collect();

        let config = ExtractConfig::default().with_generic_verbs(GenericVerbs::new(["drives"]));
        let extraction = extract(&graph, &config);
        assert_eq!(extraction.ir().relations()[0].field_name(), "drivesCar");
    }
}
