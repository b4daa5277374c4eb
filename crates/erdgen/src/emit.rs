//! Rendering resolved classes as target-language source text.
//!
//! Synthesis decides *what* each class contains; an [`Emitter`] decides how
//! that is spelled. [`JavaEmitter`] is the only target today.

use log::trace;

use crate::config::OutputConfig;

/// A field whose name has already been made unique within its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub type_name: String,
    pub is_collection: bool,
}

/// A class with resolved names, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    pub name: String,
    pub superclass: Option<String>,
    pub fields: Vec<FieldSpec>,
}

/// Spelling rules of a target language.
pub trait Emitter {
    /// File suffix for one class, including the dot.
    fn file_extension(&self) -> &str;

    /// Turn a sanitized name into a legal identifier of the target language.
    ///
    /// Must be deterministic. Inputs only contain ASCII letters, digits and `_`.
    fn legalize_identifier(&self, name: &str) -> String;

    /// Render the complete source text of one class.
    fn emit_class(&self, class: &ClassSpec) -> String;
}

/// Java reserved words, including literals and the restricted identifiers
/// that cannot name a type.
const JAVA_RESERVED: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "permits", "private", "protected",
    "public", "record", "return", "sealed", "short", "static", "strictfp", "super", "switch",
    "synchronized", "this", "throw", "throws", "transient", "true", "try", "var", "void",
    "volatile", "while", "yield",
];

/// Emits one `public class` per file.
///
/// ```text
/// package com.example;
///
/// public class Student extends Person {
///     private java.util.List<Course> enrollsIn;
///     private Teacher advisor;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JavaEmitter {
    package: Option<String>,
    list_type: String,
    indent: usize,
}

impl JavaEmitter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            package: config.package().map(str::to_string),
            list_type: config.list_type().to_string(),
            indent: config.indent(),
        }
    }
}

impl Default for JavaEmitter {
    fn default() -> Self {
        Self::new(&OutputConfig::default())
    }
}

impl Emitter for JavaEmitter {
    fn file_extension(&self) -> &str {
        ".java"
    }

    fn legalize_identifier(&self, name: &str) -> String {
        if name.is_empty() {
            return "_unnamed".to_string();
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("_{name}");
        }
        if JAVA_RESERVED.contains(&name) {
            return format!("{name}_");
        }
        name.to_string()
    }

    fn emit_class(&self, class: &ClassSpec) -> String {
        let indent = " ".repeat(self.indent);
        let mut source = String::new();

        if let Some(package) = &self.package {
            source.push_str(&format!("package {package};\n\n"));
        }

        match &class.superclass {
            Some(parent) => {
                source.push_str(&format!("public class {} extends {parent} {{\n", class.name))
            }
            None => source.push_str(&format!("public class {} {{\n", class.name)),
        }

        for field in &class.fields {
            let type_name = if field.is_collection {
                format!("{}<{}>", self.list_type, field.type_name)
            } else {
                field.type_name.clone()
            };
            source.push_str(&format!("{indent}private {type_name} {};\n", field.name));
        }

        source.push_str("}\n");
        trace!(class:% = class.name, bytes = source.len(); "Class emitted");
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> ClassSpec {
        ClassSpec {
            name: "Student".to_string(),
            superclass: Some("Person".to_string()),
            fields: vec![
                FieldSpec {
                    name: "enrollsIn".to_string(),
                    type_name: "Course".to_string(),
                    is_collection: true,
                },
                FieldSpec {
                    name: "advisor".to_string(),
                    type_name: "Teacher".to_string(),
                    is_collection: false,
                },
            ],
        }
    }

    #[test]
    fn test_emit_default_layout() {
        let source = JavaEmitter::default().emit_class(&student());

        assert_eq!(
            source,
            "public class Student extends Person {\n    \
             private java.util.List<Course> enrollsIn;\n    \
             private Teacher advisor;\n\
             }\n"
        );
    }

    #[test]
    fn test_emit_without_fields_or_parent() {
        let class = ClassSpec {
            name: "Empty".to_string(),
            superclass: None,
            fields: Vec::new(),
        };

        assert_eq!(
            JavaEmitter::default().emit_class(&class),
            "public class Empty {\n}\n"
        );
    }

    #[test]
    fn test_emit_with_output_config() {
        let config = OutputConfig::new(Some("com.school".to_string()), "List".to_string(), 2);
        let source = JavaEmitter::new(&config).emit_class(&student());

        assert!(source.starts_with("package com.school;\n\npublic class Student"));
        assert!(source.contains("\n  private List<Course> enrollsIn;\n"));
    }

    #[test]
    fn test_legalize_identifier() {
        let emitter = JavaEmitter::default();

        assert_eq!(emitter.legalize_identifier("Course"), "Course");
        assert_eq!(emitter.legalize_identifier("class"), "class_");
        assert_eq!(emitter.legalize_identifier("record"), "record_");
        assert_eq!(emitter.legalize_identifier("3D"), "_3D");
        assert_eq!(emitter.legalize_identifier("_"), "__");
        assert_eq!(emitter.file_extension(), ".java");
    }
}
