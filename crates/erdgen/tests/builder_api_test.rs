//! Integration tests for the ClassGenerator API
//!
//! These tests drive whole diagrams through parsing and generation.

use erdgen::{
    ClassGenerator, ErdgenError,
    config::AppConfig,
    graph::{Cell, RawGraph},
    identifier::Id,
    report,
};
use erdgen_parser::error::ErrorCode;

/// Wrap cells in a draw.io document with the usual root and default layer.
fn drawio(cells: &str) -> String {
    format!(
        r#"<mxfile host="app.diagrams.net">
  <diagram id="page" name="Page-1">
    <mxGraphModel dx="1426" dy="794" grid="1">
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
{cells}
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>"#
    )
}

const GENERALIZATION: &str = "endArrow=block;endSize=16;endFill=0;html=1;";

#[test]
fn test_builder_api_exists() {
    let _generator = ClassGenerator::default();
}

#[test]
fn test_enrolls_in_collection() {
    let source = drawio(
        r#"
        <mxCell id="10" value="Student" style="rounded=0;whiteSpace=wrap;html=1;" vertex="1" parent="1"/>
        <mxCell id="20" value="Course" style="rounded=0;whiteSpace=wrap;html=1;" vertex="1" parent="1"/>
        <mxCell id="30" value="enrollsIn(N)" style="endArrow=open;html=1;" edge="1" parent="1" source="10" target="20"/>
        "#,
    );

    let (classes, warnings) = ClassGenerator::default()
        .generate_from_source(&source)
        .expect("Failed to generate");

    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
    assert_eq!(
        classes.get("Student").unwrap().source(),
        "public class Student {\n    private java.util.List<Course> enrollsIn;\n}\n"
    );
    assert_eq!(classes.get("Course").unwrap().file_name(), "Course.java");
}

#[test]
fn test_person_employee_inheritance() {
    let source = drawio(&format!(
        r#"
        <mxCell id="1a" value="Person" vertex="1" parent="1"/>
        <mxCell id="2b" value="Employee" vertex="1" parent="1"/>
        <mxCell id="3c" style="{GENERALIZATION}" edge="1" parent="1" source="2b" target="1a"/>
        "#
    ));

    let (classes, _) = ClassGenerator::default()
        .generate_from_source(&source)
        .expect("Failed to generate");

    let employee = classes.get("Employee").unwrap().source();
    assert_eq!(employee, "public class Employee extends Person {\n}\n");
    assert!(!classes.get("Person").unwrap().source().contains("extends"));
}

#[test]
fn test_two_manages_edges_get_distinct_fields() {
    let source = drawio(
        r#"
        <mxCell id="m" value="Manager" vertex="1" parent="1"/>
        <mxCell id="d" value="Department" vertex="1" parent="1"/>
        <mxCell id="p" value="Project" vertex="1" parent="1"/>
        <mxCell id="e1" value="manages" edge="1" parent="1" source="m" target="d"/>
        <mxCell id="e2" value="manages" edge="1" parent="1" source="m" target="p"/>
        "#,
    );

    let (classes, warnings) = ClassGenerator::default()
        .generate_from_source(&source)
        .expect("Failed to generate");

    assert!(warnings.is_empty());
    let manager = classes.get("Manager").unwrap().source();
    assert!(manager.contains("    private Department managesDepartment;\n"));
    assert!(manager.contains("    private Project managesProject;\n"));
}

#[test]
fn test_orphan_edge_gives_one_warning() {
    let source = drawio(
        r#"
        <mxCell id="a" value="Order" vertex="1" parent="1"/>
        <mxCell id="e" value="has" edge="1" parent="1" source="a" target="nowhere"/>
        "#,
    );

    let (classes, warnings) = ClassGenerator::default()
        .generate_from_source(&source)
        .expect("Failed to generate");

    assert_eq!(classes.get("Order").unwrap().source(), "public class Order {\n}\n");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(ErrorCode::E102));
    assert!(!warnings[0].labels().is_empty(), "Warning should point at the edge");
}

#[test]
fn test_label_on_child_vertex_and_object_wrapper() {
    let source = drawio(
        r#"
        <object id="t" label="&lt;b&gt;Teacher&lt;/b&gt;" salary="high">
          <mxCell style="swimlane;" vertex="1" parent="1"/>
        </object>
        <mxCell id="c" value="Course&amp;nbsp;Unit" vertex="1" parent="1"/>
        <mxCell id="e" value="" edge="1" parent="1" source="t" target="c"/>
        <mxCell id="l" value="teaches (N)" style="edgeLabel;html=1;" vertex="1" connectable="0" parent="e"/>
        "#,
    );

    let (classes, _) = ClassGenerator::default()
        .generate_from_source(&source)
        .expect("Failed to generate");

    assert_eq!(
        classes.get("Teacher").unwrap().source(),
        "public class Teacher {\n    private java.util.List<CourseUnit> teachesCourseUnit;\n}\n"
    );
}

#[test]
fn test_configured_output() {
    let config = AppConfig::from_toml_str(
        r#"
        [extraction]
        generic_verbs = ["owns"]

        [output]
        package = "com.example"
        list_type = "java.util.Set"
        indent = 2
        "#,
    )
    .expect("Failed to parse config");
    let source = drawio(
        r#"
        <mxCell id="a" value="Person" vertex="1" parent="1"/>
        <mxCell id="b" value="Car" vertex="1" parent="1"/>
        <mxCell id="e" value="owns (N)" edge="1" parent="1" source="a" target="b"/>
        "#,
    );

    let (classes, _) = ClassGenerator::new(config)
        .generate_from_source(&source)
        .expect("Failed to generate");

    assert_eq!(
        classes.get("Person").unwrap().source(),
        "package com.example;\n\npublic class Person {\n  private java.util.Set<Car> ownsCar;\n}\n"
    );
}

#[test]
fn test_parse_invalid_document_returns_error() {
    let result = ClassGenerator::default().parse("this is not a diagram");

    let err = result.expect_err("Should return error for invalid XML");
    assert!(matches!(err, ErdgenError::Parse { .. }));

    let reportables = report::to_reportables(&err);
    assert_eq!(reportables.len(), 1);
}

#[test]
fn test_generate_from_raw_graph() {
    let graph: RawGraph = [
        Cell::container("0", None),
        Cell::container("1", Some("0")),
        Cell::vertex("2", "1", "Shop"),
        Cell::vertex("3", "1", "Product"),
        Cell::edge("4", "1", "2", "3", "stocks (N)"),
    ]
    .into_iter()
    .collect();

    let generator = ClassGenerator::default();
    let extraction = generator.extract(&graph);
    assert_eq!(
        extraction.ir().relations()[0].target(),
        Id::new("3")
    );

    let synthesis = generator.generate(extraction.ir());
    let map = synthesis.classes().to_map();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Shop", "Product"]);
    assert!(map["Shop"].contains("private java.util.List<Product> stocksProduct;"));
}

#[test]
fn test_generation_is_deterministic() {
    let source = drawio(
        r#"
        <mxCell id="a" value="A" vertex="1" parent="1"/>
        <mxCell id="b" value="B" vertex="1" parent="1"/>
        <mxCell id="e1" value="has" edge="1" parent="1" source="a" target="b"/>
        <mxCell id="e2" value="has" edge="1" parent="1" source="a" target="b"/>
        <mxCell id="e3" value="has (N)" edge="1" parent="1" source="a" target="b"/>
        "#,
    );

    let generator = ClassGenerator::default();
    let (first, _) = generator.generate_from_source(&source).unwrap();
    let (second, warnings) = generator.generate_from_source(&source).unwrap();

    assert_eq!(first, second);
    assert_eq!(warnings.len(), 2);
    let a = first.get("A").unwrap().source();
    assert!(a.contains("private B hasB;"));
    assert!(a.contains("private B hasBB;"));
    assert!(a.contains("private java.util.List<B> hasB2;"));
}

#[test]
fn test_generator_reusability() {
    let generator = ClassGenerator::default();

    let one = generator
        .generate_from_source(&drawio(r#"<mxCell id="x" value="One" vertex="1" parent="1"/>"#))
        .unwrap()
        .0;
    let two = generator
        .generate_from_source(&drawio(r#"<mxCell id="x" value="Two" vertex="1" parent="1"/>"#))
        .unwrap()
        .0;

    assert!(one.get("One").is_some());
    assert!(two.get("Two").is_some());
    assert!(two.get("One").is_none());
}
