//! Settling drawn generalization edges into single inheritance.
//!
//! Two passes over the candidate edges, both in document order:
//!
//! 1. The [`InheritancePolicy`] decides what happens to a child drawn with
//!    more than one parent.
//! 2. Edges that would close a cycle (`A extends B extends A`, or an entity
//!    extending itself) are dropped, since no class hierarchy can express them.

use indexmap::IndexMap;
use log::debug;
use petgraph::{
    algo::has_path_connecting,
    graph::{DiGraph, NodeIndex},
};

use erdgen_core::{
    identifier::Id,
    model::{Entity, InheritanceEdge, InheritanceMap, InheritancePolicy},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

/// A generalization edge as drawn, before policy and cycle checks.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    pub(crate) edge_id: Id,
    pub(crate) edge: InheritanceEdge,
    pub(crate) span: Option<Span>,
}

pub(crate) fn resolve(
    candidates: Vec<Candidate>,
    policy: InheritancePolicy,
    entities: &IndexMap<Id, Entity>,
    diagnostics: &mut DiagnosticCollector,
) -> InheritanceMap {
    let name = |id: Id| entities.get(&id).map_or("?", Entity::name);

    let accepted = apply_policy(candidates, policy, &name, diagnostics);

    let mut map = InheritanceMap::new();
    let mut hierarchy: DiGraph<Id, ()> = DiGraph::new();
    let mut nodes: IndexMap<Id, NodeIndex> = IndexMap::new();

    for candidate in accepted {
        let InheritanceEdge { child, parent } = candidate.edge;
        let child_idx = *nodes
            .entry(child)
            .or_insert_with(|| hierarchy.add_node(child));
        let parent_idx = *nodes
            .entry(parent)
            .or_insert_with(|| hierarchy.add_node(parent));

        // Edges point child -> parent; a path parent ~> child means this edge closes a cycle.
        if has_path_connecting(&hierarchy, parent_idx, child_idx, None) {
            let message = if child == parent {
                format!("`{}` cannot extend itself", name(child))
            } else {
                format!(
                    "`{}` extending `{}` would create an inheritance cycle",
                    name(child),
                    name(parent)
                )
            };
            diagnostics.emit(
                Diagnostic::warning(message)
                    .with_code(ErrorCode::E201)
                    .with_optional_label(candidate.span, "edge ignored")
                    .with_help("remove one of the generalization arrows in the cycle"),
            );
            continue;
        }

        hierarchy.add_edge(child_idx, parent_idx, ());
        if map.insert(candidate.edge).is_ok() {
            debug!(child:% = name(child), parent:% = name(parent); "Inheritance recorded");
        }
    }

    map
}

fn apply_policy<'n>(
    candidates: Vec<Candidate>,
    policy: InheritancePolicy,
    name: &impl Fn(Id) -> &'n str,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<Candidate> {
    let mut parents: IndexMap<Id, Vec<(usize, Candidate)>> = IndexMap::new();
    for (position, candidate) in candidates.into_iter().enumerate() {
        let drawn = parents.entry(candidate.edge.child).or_default();
        if drawn
            .iter()
            .any(|(_, seen)| seen.edge.parent == candidate.edge.parent)
        {
            debug!(edge:% = candidate.edge_id; "Repeated generalization edge skipped");
            continue;
        }
        drawn.push((position, candidate));
    }

    let mut accepted = Vec::new();
    for (child, drawn) in parents {
        let Some((first, rest)) = drawn.split_first() else {
            continue;
        };

        if rest.is_empty() {
            accepted.push(*first);
            continue;
        }

        match policy {
            InheritancePolicy::FirstParentWins => {
                for (_, extra) in rest {
                    diagnostics.emit(
                        Diagnostic::warning(format!(
                            "`{}` already extends `{}`; ignoring `{}`",
                            name(child),
                            name(first.1.edge.parent),
                            name(extra.edge.parent)
                        ))
                        .with_code(ErrorCode::E200)
                        .with_optional_label(extra.span, "ignored parent")
                        .with_help("generated classes have a single superclass"),
                    );
                }
                accepted.push(*first);
            }
            InheritancePolicy::RejectMultiple => {
                let all: Vec<&str> = drawn.iter().map(|(_, c)| name(c.edge.parent)).collect();
                let mut diag = Diagnostic::warning(format!(
                    "`{}` extends multiple parents ({}); no superclass recorded",
                    name(child),
                    all.join(", ")
                ))
                .with_code(ErrorCode::E200)
                .with_help("generated classes have a single superclass");
                for (_, candidate) in &drawn {
                    diag = diag.with_optional_label(candidate.span, "parent edge");
                }
                diagnostics.emit(diag);
            }
        }
    }

    // Restore document order across children.
    accepted.sort_by_key(|(position, _)| *position);
    accepted.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(names: &[(&str, &str)]) -> IndexMap<Id, Entity> {
        names
            .iter()
            .map(|(id, name)| (Id::new(id), Entity::new(Id::new(id), *name)))
            .collect()
    }

    fn candidate(edge: &str, child: &str, parent: &str, offset: usize) -> Candidate {
        Candidate {
            edge_id: Id::new(edge),
            edge: InheritanceEdge::new(Id::new(child), Id::new(parent)),
            span: Some(Span::new(offset..offset + 1)),
        }
    }

    fn run(candidates: Vec<Candidate>, policy: InheritancePolicy) -> (InheritanceMap, Vec<Diagnostic>) {
        let entities = entities(&[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")]);
        let mut diagnostics = DiagnosticCollector::new();
        let map = resolve(candidates, policy, &entities, &mut diagnostics);
        (map, diagnostics.finish().unwrap())
    }

    #[test]
    fn test_single_parents_are_recorded() {
        let (map, warnings) = run(
            vec![candidate("e1", "b", "a", 1), candidate("e2", "c", "a", 2)],
            InheritancePolicy::FirstParentWins,
        );

        assert!(warnings.is_empty());
        assert_eq!(map.parent_of(Id::new("b")), Some(Id::new("a")));
        assert_eq!(map.children_of(Id::new("a")), &[Id::new("b"), Id::new("c")]);
    }

    #[test]
    fn test_first_parent_wins() {
        let (map, warnings) = run(
            vec![candidate("e1", "c", "a", 1), candidate("e2", "c", "b", 2)],
            InheritancePolicy::FirstParentWins,
        );

        assert_eq!(map.parent_of(Id::new("c")), Some(Id::new("a")));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E200));
        assert!(warnings[0].message().contains("ignoring `B`"));
    }

    #[test]
    fn test_reject_multiple() {
        let (map, warnings) = run(
            vec![
                candidate("e1", "c", "a", 1),
                candidate("e2", "c", "b", 2),
                candidate("e3", "d", "a", 3),
            ],
            InheritancePolicy::RejectMultiple,
        );

        assert_eq!(map.parent_of(Id::new("c")), None);
        assert_eq!(map.parent_of(Id::new("d")), Some(Id::new("a")));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].labels().len(), 2);
    }

    #[test]
    fn test_repeated_edge_is_not_multiple_inheritance() {
        let (map, warnings) = run(
            vec![candidate("e1", "b", "a", 1), candidate("e2", "b", "a", 2)],
            InheritancePolicy::RejectMultiple,
        );

        assert!(warnings.is_empty());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_cycle_is_broken_at_closing_edge() {
        let (map, warnings) = run(
            vec![
                candidate("e1", "a", "b", 1),
                candidate("e2", "b", "c", 2),
                candidate("e3", "c", "a", 3),
            ],
            InheritancePolicy::FirstParentWins,
        );

        assert_eq!(map.len(), 2);
        assert_eq!(map.parent_of(Id::new("c")), None);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E201));
    }

    #[test]
    fn test_self_inheritance() {
        let (map, warnings) = run(
            vec![candidate("e1", "a", "a", 1)],
            InheritancePolicy::FirstParentWins,
        );

        assert!(map.is_empty());
        assert_eq!(warnings[0].message(), "`A` cannot extend itself");
    }

    #[test]
    fn test_document_order_is_kept() {
        let (map, _) = run(
            vec![
                candidate("e1", "b", "a", 1),
                candidate("e2", "c", "a", 2),
                candidate("e3", "b", "d", 3),
                candidate("e4", "d", "a", 4),
            ],
            InheritancePolicy::FirstParentWins,
        );

        let children: Vec<Id> = map.edges().map(|edge| edge.child).collect();
        assert_eq!(children, vec![Id::new("b"), Id::new("c"), Id::new("d")]);
    }
}
