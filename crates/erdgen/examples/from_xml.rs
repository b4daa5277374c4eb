//! Example: Generating classes from draw.io XML
//!
//! Runs a small university diagram through extraction and synthesis, prints
//! every generated class, and renders the warnings with miette.
//!
//! Set `RUST_LOG=debug` to follow each extraction decision.

use log::{LevelFilter, info};

use erdgen::{ClassGenerator, config::AppConfig, report};

const DIAGRAM: &str = r#"<mxfile host="app.diagrams.net">
  <diagram id="uni" name="University">
    <mxGraphModel dx="1426" dy="794" grid="1" gridSize="10">
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <mxCell id="person" value="Person" style="swimlane;html=1;" vertex="1" parent="1"/>
        <mxCell id="student" value="Student" style="swimlane;html=1;" vertex="1" parent="1"/>
        <mxCell id="teacher" value="&lt;b&gt;Teacher&lt;/b&gt;" style="swimlane;html=1;" vertex="1" parent="1"/>
        <mxCell id="course" value="Course" style="swimlane;html=1;" vertex="1" parent="1"/>
        <mxCell id="room" value="Room" style="swimlane;html=1;" vertex="1" parent="1"/>
        <mxCell id="g1" style="endArrow=block;endSize=16;endFill=0;html=1;" edge="1" parent="1" source="student" target="person"/>
        <mxCell id="g2" style="endArrow=block;endSize=16;endFill=0;html=1;" edge="1" parent="1" source="teacher" target="person"/>
        <mxCell id="a1" value="enrollsIn(N)" style="endArrow=open;html=1;" edge="1" parent="1" source="student" target="course"/>
        <mxCell id="a2" value="advisor (1)" style="endArrow=open;html=1;" edge="1" parent="1" source="student" target="teacher"/>
        <mxCell id="a3" value="" style="endArrow=open;html=1;" edge="1" parent="1" source="teacher" target="course"/>
        <mxCell id="a3l" value="teaches (N)" style="edgeLabel;html=1;" vertex="1" connectable="0" parent="a3"/>
        <mxCell id="a4" value="has" style="endArrow=open;html=1;" edge="1" parent="1" source="course" target="room"/>
        <mxCell id="a5" value="has" style="endArrow=open;html=1;" edge="1" parent="1" source="course" target="building"/>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>"#;

const CONFIG: &str = r#"
[output]
package = "edu.example.model"
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(LevelFilter::Info)
        .init();

    let config = AppConfig::from_toml_str(CONFIG)?;
    let generator = ClassGenerator::new(config);

    let extraction = generator.parse(DIAGRAM)?;
    let synthesis = generator.generate(extraction.ir());

    for class in synthesis.classes() {
        println!("// {}", class.file_name());
        println!("{}", class.source());
    }

    let reporter = miette::GraphicalReportHandler::new();
    let warnings = extraction.warnings().iter().chain(synthesis.warnings());
    for warning in warnings {
        let reportable = report::Reportable::Diagnostic(report::DiagnosticAdapter::new(warning, DIAGRAM));
        let mut rendered = String::new();
        reporter.render_report(&mut rendered, &reportable)?;
        eprintln!("{rendered}");
    }

    info!(classes = synthesis.classes().len(); "Done");
    Ok(())
}
