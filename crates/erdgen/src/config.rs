//! Configuration types for erdgen class generation.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a configuration source only needs to name the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining extraction and output settings.
//! - [`ExtractionConfig`] - Generic verb vocabulary and inheritance policy.
//! - [`OutputConfig`] - Package, list type, and indentation of generated classes.
//!
//! # Example
//!
//! ```
//! # use erdgen::config::AppConfig;
//! let config = AppConfig::from_toml_str(r#"
//!     [extraction]
//!     inheritance_policy = "reject_multiple"
//!
//!     [output]
//!     package = "com.example.model"
//! "#).unwrap();
//!
//! assert_eq!(config.output().package(), Some("com.example.model"));
//! assert_eq!(config.output().indent(), 4);
//! ```

use serde::Deserialize;

use erdgen_core::model::InheritancePolicy;
use erdgen_parser::{
    ExtractConfig,
    naming::{DEFAULT_GENERIC_VERBS, GenericVerbs},
};

use crate::ErdgenError;

const DEFAULT_LIST_TYPE: &str = "java.util.List";
const DEFAULT_INDENT: usize = 4;

/// Top-level configuration combining extraction and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction configuration section.
    #[serde(default)]
    extraction: ExtractionConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given sections.
    pub fn new(extraction: ExtractionConfig, output: OutputConfig) -> Self {
        Self { extraction, output }
    }

    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ErdgenError::Config`] if the text is not valid TOML, does not
    /// match the configuration schema, or names an unusable package or list type.
    pub fn from_toml_str(text: &str) -> Result<Self, ErdgenError> {
        let config: Self =
            toml::from_str(text).map_err(|err| ErdgenError::Config(err.to_string()))?;
        config.output.validate()?;
        Ok(config)
    }

    /// Returns the extraction configuration.
    pub fn extraction(&self) -> &ExtractionConfig {
        &self.extraction
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Settings of the model extraction phase.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Relationship verbs that are too generic to name a field on their own.
    #[serde(default = "default_generic_verbs")]
    generic_verbs: Vec<String>,

    /// What to do with entities drawn with more than one parent.
    #[serde(default)]
    inheritance_policy: InheritancePolicy,
}

fn default_generic_verbs() -> Vec<String> {
    DEFAULT_GENERIC_VERBS.iter().map(|verb| verb.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            generic_verbs: default_generic_verbs(),
            inheritance_policy: InheritancePolicy::default(),
        }
    }
}

impl ExtractionConfig {
    pub fn new(generic_verbs: Vec<String>, inheritance_policy: InheritancePolicy) -> Self {
        Self {
            generic_verbs,
            inheritance_policy,
        }
    }

    pub fn generic_verbs(&self) -> &[String] {
        &self.generic_verbs
    }

    pub fn inheritance_policy(&self) -> InheritancePolicy {
        self.inheritance_policy
    }

    /// The parser-side view of these settings.
    pub fn to_extract_config(&self) -> ExtractConfig {
        ExtractConfig::new(
            GenericVerbs::new(&self.generic_verbs),
            self.inheritance_policy,
        )
    }
}

/// Settings of the generated source text.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Package declared at the top of every class, if any.
    #[serde(default)]
    package: Option<String>,

    /// Fully qualified generic type used for to-many fields.
    #[serde(default = "default_list_type")]
    list_type: String,

    /// Spaces before each field declaration.
    #[serde(default = "default_indent")]
    indent: usize,
}

fn default_list_type() -> String {
    DEFAULT_LIST_TYPE.to_string()
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            package: None,
            list_type: default_list_type(),
            indent: DEFAULT_INDENT,
        }
    }
}

impl OutputConfig {
    pub fn new(package: Option<String>, list_type: String, indent: usize) -> Self {
        Self {
            package,
            list_type,
            indent,
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn list_type(&self) -> &str {
        &self.list_type
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    fn validate(&self) -> Result<(), ErdgenError> {
        if let Some(package) = self.package.as_deref().filter(|p| !is_qualified_name(p)) {
            return Err(ErdgenError::Config(format!(
                "Invalid package name in config: `{package}`"
            )));
        }
        if !is_qualified_name(&self.list_type) {
            return Err(ErdgenError::Config(format!(
                "Invalid list type in config: `{}`",
                self.list_type
            )));
        }
        Ok(())
    }
}

/// Whether `name` is a dot-separated sequence of plain identifiers.
fn is_qualified_name(name: &str) -> bool {
    name.split('.').all(|segment| {
        segment.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
