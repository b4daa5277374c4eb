//! Erdgen - Generate class definitions from entity-relationship diagrams.
//!
//! Reads draw.io / mxGraph documents, extracts entities, associations and
//! generalizations into an intermediate model, and synthesizes one Java class
//! per entity.

pub mod config;
pub mod emit;
pub mod report;

mod error;
mod generated;
mod synth;

pub use erdgen_core::{graph, identifier, model};
pub use erdgen_parser::{Extraction, error::Diagnostic};

pub use error::ErdgenError;
pub use generated::{GeneratedClass, GeneratedClasses};
pub use synth::Synthesis;

use log::{debug, info, trace};

use erdgen_core::{graph::RawGraph, model::ModelIr};

use config::AppConfig;
use emit::JavaEmitter;

/// Generator turning diagrams into class definitions.
///
/// This provides an API for processing diagrams through the extraction and
/// synthesis stages. Nothing is read from or written to disk.
///
/// # Examples
///
/// ```rust
/// use erdgen::{ClassGenerator, config::AppConfig};
///
/// let source = r#"<mxGraphModel><root>
///     <mxCell id="0"/>
///     <mxCell id="1" parent="0"/>
///     <mxCell id="2" value="Student" vertex="1" parent="1"/>
///     <mxCell id="3" value="Course" vertex="1" parent="1"/>
///     <mxCell id="4" value="enrollsIn(N)" edge="1" parent="1" source="2" target="3"/>
/// </root></mxGraphModel>"#;
///
/// let generator = ClassGenerator::new(AppConfig::default());
///
/// // Parse source to the model IR
/// let extraction = generator.parse(source)
///     .expect("Failed to parse");
///
/// // Synthesize one class per entity
/// let synthesis = generator.generate(extraction.ir());
/// let student = synthesis.classes().get("Student").unwrap();
/// assert!(student.source().contains("private java.util.List<Course> enrollsIn;"));
/// ```
#[derive(Debug, Default)]
pub struct ClassGenerator {
    config: AppConfig,
}

impl ClassGenerator {
    /// Create a new generator with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Extraction and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse diagram XML into the model IR.
    ///
    /// # Errors
    ///
    /// Returns [`ErdgenError::Parse`] if the document cannot be read as a
    /// graph at all. Every other anomaly is a warning on the [`Extraction`].
    pub fn parse(&self, source: &str) -> Result<Extraction, ErdgenError> {
        info!("Parsing diagram");

        let extract_config = self.config.extraction().to_extract_config();
        let extraction = erdgen_parser::parse(source, &extract_config)
            .map_err(|err| ErdgenError::new_parse_error(err, source))?;

        debug!(warnings = extraction.warnings().len(); "Diagram parsed successfully");
        Ok(extraction)
    }

    /// Extract the model IR from an already-built raw graph.
    pub fn extract(&self, graph: &RawGraph) -> Extraction {
        info!(cells = graph.len(); "Extracting model from graph");
        erdgen_parser::extract(graph, &self.config.extraction().to_extract_config())
    }

    /// Synthesize one class per entity of `ir`.
    ///
    /// Never fails; naming conflicts are resolved and reported as warnings.
    pub fn generate(&self, ir: &ModelIr) -> Synthesis {
        info!(entities = ir.entities().len(); "Generating classes");
        let emitter = JavaEmitter::new(self.config.output());
        let synthesis = synth::synthesize(ir, &emitter);
        trace!(classes:? = synthesis.classes(); "Generated classes");
        synthesis
    }

    /// Parse and generate in one step.
    ///
    /// Returns the classes with every warning of both stages, extraction
    /// warnings first.
    ///
    /// # Errors
    ///
    /// Returns [`ErdgenError::Parse`] if the document cannot be read as a graph.
    pub fn generate_from_source(
        &self,
        source: &str,
    ) -> Result<(GeneratedClasses, Vec<Diagnostic>), ErdgenError> {
        let (ir, mut warnings) = self.parse(source)?.into_parts();
        let (classes, synth_warnings) = self.generate(&ir).into_parts();
        warnings.extend(synth_warnings);
        Ok((classes, warnings))
    }
}
