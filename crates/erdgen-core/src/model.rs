//! Intermediate representation produced by extraction.
//!
//! The IR is the `(entities, inheritance, relations)` triple handed from the
//! model extractor to the class synthesizer. It is built once, in full, and
//! never mutated afterwards. Every collection keeps first-seen document order,
//! which the synthesizer relies on for deterministic output.
//!
//! # Pipeline Position
//!
//! ```text
//! Document text
//!     ↓ load
//! RawGraph (cells in document order)
//!     ↓ extract
//! ModelIr (these types)
//!     ↓ synthesize
//! Generated class sources
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// A modeled class-to-be, derived from a diagram shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: Id,
    name: String,
}

impl Entity {
    /// Create an entity from a cell id and an already-sanitized name.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The sanitized identifier-safe name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A directed, non-inheritance association producing a field on `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    source: Id,
    target: Id,
    raw_label: String,
    field_name: String,
    is_collection: bool,
}

impl Relation {
    /// Create a new relation.
    ///
    /// # Arguments
    ///
    /// * `source` - Entity the field is declared on
    /// * `target` - Entity the field refers to
    /// * `raw_label` - Edge text exactly as found in the diagram
    /// * `field_name` - Derived, sanitized field name
    /// * `is_collection` - Whether the label carried a many-multiplicity marker
    pub fn new(
        source: Id,
        target: Id,
        raw_label: impl Into<String>,
        field_name: impl Into<String>,
        is_collection: bool,
    ) -> Self {
        Self {
            source,
            target,
            raw_label: raw_label.into(),
            field_name: field_name.into(),
            is_collection,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn raw_label(&self) -> &str {
        &self.raw_label
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn is_collection(&self) -> bool {
        self.is_collection
    }
}

/// A generalization edge: `child` extends `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InheritanceEdge {
    pub child: Id,
    pub parent: Id,
}

impl InheritanceEdge {
    pub fn new(child: Id, parent: Id) -> Self {
        Self { child, parent }
    }
}

/// How a child drawn with more than one generalization edge is handled.
///
/// Code generation honors single inheritance only, so extraction has to
/// settle on at most one parent per entity.
///
/// - `FirstParentWins` - Keep the first edge in document order (default)
/// - `RejectMultiple` - Treat multiple parents as a modeling error and keep none
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritancePolicy {
    #[default]
    FirstParentWins,
    RejectMultiple,
}

impl fmt::Display for InheritancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InheritancePolicy::FirstParentWins => write!(f, "first_parent_wins"),
            InheritancePolicy::RejectMultiple => write!(f, "reject_multiple"),
        }
    }
}

/// Honored inheritance relationships, at most one parent per child.
///
/// Provides both directions: the parent → children map the model is usually
/// described with, and the child → parent lookup synthesis needs. Both keep
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InheritanceMap {
    children: IndexMap<Id, Vec<Id>>,
    parents: IndexMap<Id, Id>,
}

impl InheritanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `edge`.
    ///
    /// Returns the already-recorded parent, leaving the map unchanged, if the
    /// child has one.
    pub fn insert(&mut self, edge: InheritanceEdge) -> Result<(), Id> {
        if let Some(existing) = self.parents.get(&edge.child) {
            return Err(*existing);
        }
        self.parents.insert(edge.child, edge.parent);
        self.children.entry(edge.parent).or_default().push(edge.child);
        Ok(())
    }

    /// The recorded parent of `child`, if any.
    pub fn parent_of(&self, child: Id) -> Option<Id> {
        self.parents.get(&child).copied()
    }

    /// Children recorded for `parent`, in insertion order.
    pub fn children_of(&self, parent: Id) -> &[Id] {
        self.children.get(&parent).map_or(&[], Vec::as_slice)
    }

    /// Iterate over `(parent, children)` pairs in first-seen parent order.
    pub fn by_parent(&self) -> impl Iterator<Item = (Id, &[Id])> {
        self.children
            .iter()
            .map(|(parent, children)| (*parent, children.as_slice()))
    }

    /// Iterate over honored edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = InheritanceEdge> + '_ {
        self.parents
            .iter()
            .map(|(child, parent)| InheritanceEdge::new(*child, *parent))
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

/// The complete intermediate representation of one diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelIr {
    entities: Vec<Entity>,
    inheritance: InheritanceMap,
    relations: Vec<Relation>,
    /// Position of each entity in `entities`, first occurrence of an id wins.
    entity_index: IndexMap<Id, usize>,
    /// Positions in `relations`, grouped by source entity.
    relations_by_source: IndexMap<Id, Vec<usize>>,
}

impl ModelIr {
    /// Assemble an IR from its three parts.
    ///
    /// The caller is responsible for the extraction invariants: unique entity
    /// ids and relation/inheritance endpoints that refer to known entities.
    pub fn new(
        entities: Vec<Entity>,
        inheritance: InheritanceMap,
        relations: Vec<Relation>,
    ) -> Self {
        let mut entity_index = IndexMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            entity_index.entry(entity.id()).or_insert(position);
        }

        let mut relations_by_source: IndexMap<Id, Vec<usize>> = IndexMap::new();
        for (position, relation) in relations.iter().enumerate() {
            relations_by_source
                .entry(relation.source())
                .or_default()
                .push(position);
        }

        Self {
            entities,
            inheritance,
            relations,
            entity_index,
            relations_by_source,
        }
    }

    /// Entities in first-seen order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn inheritance(&self) -> &InheritanceMap {
        &self.inheritance
    }

    /// Relations in extraction order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: Id) -> Option<&Entity> {
        self.entity_index
            .get(&id)
            .map(|&position| &self.entities[position])
    }

    pub fn contains_entity(&self, id: Id) -> bool {
        self.entity(id).is_some()
    }

    /// Relations declared on `source`, in extraction order.
    pub fn relations_from(&self, source: Id) -> impl Iterator<Item = &Relation> {
        self.relations_by_source
            .get(&source)
            .into_iter()
            .flatten()
            .map(|&position| &self.relations[position])
    }
}
