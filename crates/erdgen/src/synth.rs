//! Class synthesis: from the model IR to one class per entity.
//!
//! Names are settled in two scopes:
//!
//! - **Class names** across the whole model. Entities are visited in IR
//!   order; a name that is already taken gets a numeric suffix from 2.
//! - **Field names** within one class. Relations are visited in IR order; a
//!   taken name is first retried with the target type appended, then with a
//!   numeric suffix from 2.
//!
//! Apart from the class-name table, each class is synthesized independently
//! of every other.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};

use erdgen_core::{
    identifier::Id,
    model::{ModelIr, Relation},
};
use erdgen_parser::error::{Diagnostic, ErrorCode};

use crate::{
    emit::{ClassSpec, Emitter, FieldSpec},
    generated::{GeneratedClass, GeneratedClasses},
};

/// Generated classes together with the warnings raised while naming them.
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    classes: GeneratedClasses,
    warnings: Vec<Diagnostic>,
}

impl Synthesis {
    pub fn classes(&self) -> &GeneratedClasses {
        &self.classes
    }

    /// Recoverable anomalies in the order they were found.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (GeneratedClasses, Vec<Diagnostic>) {
        (self.classes, self.warnings)
    }
}

/// Synthesize and emit one class per entity of `ir`.
///
/// The output depends only on `ir` and the emitter: the same inputs always
/// produce byte-identical classes in the same order.
pub fn synthesize(ir: &ModelIr, emitter: &dyn Emitter) -> Synthesis {
    let mut warnings = Vec::new();

    let class_names = resolve_class_names(ir, emitter, &mut warnings);
    report_unknown_sources(ir, &mut warnings);

    let mut classes = Vec::with_capacity(class_names.len());
    for (&entity, class_name) in &class_names {
        let spec = class_spec(ir, entity, class_name, &class_names, emitter, &mut warnings);
        let source = emitter.emit_class(&spec);
        let file_name = format!("{}{}", spec.name, emitter.file_extension());
        classes.push(GeneratedClass::new(spec.name, file_name, source));
    }

    info!(classes = classes.len(), warnings = warnings.len(); "Classes synthesized");
    Synthesis {
        classes: GeneratedClasses::new(classes),
        warnings,
    }
}

fn resolve_class_names(
    ir: &ModelIr,
    emitter: &dyn Emitter,
    warnings: &mut Vec<Diagnostic>,
) -> IndexMap<Id, String> {
    let mut taken = IndexSet::new();
    let mut names = IndexMap::with_capacity(ir.entities().len());

    for entity in ir.entities() {
        let wanted = emitter.legalize_identifier(entity.name());
        let name = if taken.contains(&wanted) {
            let renamed = with_free_suffix(&wanted, &taken);
            report(
                warnings,
                Diagnostic::warning(format!(
                    "class name `{wanted}` is already taken; entity `{}` generated as `{renamed}`",
                    entity.id()
                ))
                .with_code(ErrorCode::E300)
                .with_help("give each entity a distinct name in the diagram"),
            );
            renamed
        } else {
            wanted
        };

        debug!(entity:% = entity.id(), class:% = name; "Class name resolved");
        taken.insert(name.clone());
        names.insert(entity.id(), name);
    }

    names
}

/// Build the emitter input for one entity.
///
/// A field name that is already taken is retried once with the target type
/// appended to the *wanted* name, so two `has` edges to `B` become `hasB` and
/// `hasBB`. Only when that is taken too does the numeric suffix apply.
fn class_spec(
    ir: &ModelIr,
    entity: Id,
    class_name: &str,
    class_names: &IndexMap<Id, String>,
    emitter: &dyn Emitter,
    warnings: &mut Vec<Diagnostic>,
) -> ClassSpec {
    let superclass = match ir.inheritance().parent_of(entity) {
        Some(parent) => {
            let name = class_names.get(&parent).cloned();
            if name.is_none() {
                report(
                    warnings,
                    Diagnostic::warning(format!(
                        "superclass `{parent}` of `{class_name}` is not an entity; `extends` clause dropped"
                    ))
                    .with_code(ErrorCode::E303),
                );
            }
            name
        }
        None => None,
    };

    let mut taken = IndexSet::new();
    let mut fields = Vec::new();

    for relation in ir.relations_from(entity) {
        let Some(type_name) = class_names.get(&relation.target()) else {
            report(
                warnings,
                unknown_entity(relation, relation.target(), "target"),
            );
            continue;
        };

        let wanted = emitter.legalize_identifier(relation.field_name());
        let name = if taken.contains(&wanted) {
            let typed = format!("{wanted}{type_name}");
            let renamed = if taken.contains(&typed) {
                with_free_suffix(&wanted, &taken)
            } else {
                typed
            };
            report(
                warnings,
                Diagnostic::warning(format!(
                    "field `{wanted}` already exists on `{class_name}`; renamed to `{renamed}`"
                ))
                .with_code(ErrorCode::E301)
                .with_help("label the association edges so each field gets its own name"),
            );
            renamed
        } else {
            wanted
        };

        taken.insert(name.clone());
        fields.push(FieldSpec {
            name,
            type_name: type_name.clone(),
            is_collection: relation.is_collection(),
        });
    }

    ClassSpec {
        name: class_name.to_string(),
        superclass,
        fields,
    }
}

fn report_unknown_sources(ir: &ModelIr, warnings: &mut Vec<Diagnostic>) {
    for relation in ir.relations() {
        if !ir.contains_entity(relation.source()) {
            report(warnings, unknown_entity(relation, relation.source(), "source"));
        }
    }
}

fn unknown_entity(relation: &Relation, id: Id, end: &str) -> Diagnostic {
    Diagnostic::warning(format!(
        "field `{}` skipped: {end} `{id}` is not an entity",
        relation.field_name()
    ))
    .with_code(ErrorCode::E302)
}

/// `base` followed by the smallest number from 2 that is not yet taken.
fn with_free_suffix(base: &str, taken: &IndexSet<String>) -> String {
    let mut n = 2usize;
    loop {
        let candidate = format!("{base}{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn report(warnings: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    warn!(code:? = diagnostic.code(); "{}", diagnostic.message());
    warnings.push(diagnostic);
}
