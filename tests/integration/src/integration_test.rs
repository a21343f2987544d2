//! End-to-end integration tests across the optgen crates
//!
//! These exercise the complete flow: schema loading from mixed formats ->
//! placeholder resolution -> validation -> emission -> template injection.

use optgen_blocks::inject_file;
use optgen_core::{
    Artifact, ArtifactConfig, Generator, GeneratorConfig, emit_table, resolve_schema,
    validate_schema,
};
use optgen_fs::NormalizedPath;
use optgen_schema::SchemaLoader;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Set up a project with one schema per supported format
fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    fs::write(
        dir.join("core.json"),
        r#"{"groups": {"Core": {
            "Threads": {"value_type": "unsigned", "value_default": 4, "cl": "threads", "cl_short": "j"}
        }}}"#,
    )
    .unwrap();
    fs::write(
        dir.join("render.yaml"),
        r#"groups:
  Render:
    Backend:
      value_type: std::string
      value_default: gl
      value_allowed: [gl, vulkan, "null"]
      cl: backend
      doc: "Rendering backend of ${name}, one of ${value_allowed}"
"#,
    )
    .unwrap();
    fs::write(
        dir.join("audio.toml"),
        r#"[groups.Audio.Muted]
value_type = "bool"
value_default = false
doc = "Start with sound off"

[groups.Core.Seed]
value_type = "int"
value_default = 42
check_fun = "return value != 0;"
"#,
    )
    .unwrap();

    fs::write(
        dir.join("Options.h.in"),
        "#pragma once\nnamespace engine {\nstruct Options {\n${OPTGEN_DECL_HEADER_OPTIONS}\n};\n}\n",
    )
    .unwrap();
    fs::write(
        dir.join("Options.inc.in"),
        "// Do not edit\n${OPTGEN_DECL_INCLUDE_OPTIONS}\n// End\n",
    )
    .unwrap();

    temp
}

fn config(dir: &Path) -> GeneratorConfig {
    GeneratorConfig {
        verbose: false,
        schemas: ["core.json", "render.yaml", "audio.toml"]
            .into_iter()
            .map(|name| dir.join(name))
            .collect(),
        declaration: ArtifactConfig {
            template: Some(dir.join("Options.h.in")),
            output: Some(dir.join("Options.h")),
            marker: None,
        },
        table: ArtifactConfig {
            template: Some(dir.join("Options.inc.in")),
            output: Some(dir.join("Options.inc")),
            marker: None,
        },
    }
}

#[test]
fn test_mixed_formats_merge_in_load_order() {
    let temp = setup_project();
    let dir = temp.path();

    let paths: Vec<NormalizedPath> = ["core.json", "render.yaml", "audio.toml"]
        .into_iter()
        .map(|name| NormalizedPath::new(dir.join(name)))
        .collect();
    let mut schema = SchemaLoader::new().load_files(&paths).unwrap();
    resolve_schema(&mut schema).unwrap();
    let options = validate_schema(&schema).unwrap();

    let order: Vec<(String, String)> = options
        .iter()
        .map(|(group, option)| (group.name.clone(), option.name.clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Core".to_string(), "Threads".to_string()),
            ("Core".to_string(), "Seed".to_string()),
            ("Render".to_string(), "Backend".to_string()),
            ("Audio".to_string(), "Muted".to_string()),
        ]
    );
}

#[test]
fn test_full_run_produces_expected_rows() {
    let temp = setup_project();
    let dir = temp.path();

    let report = Generator::new(config(dir)).run().unwrap();
    assert_eq!(report.groups, 3);
    assert_eq!(report.options, 4);

    let header = fs::read_to_string(dir.join("Options.h")).unwrap();
    assert!(header.starts_with("#pragma once\nnamespace engine {\nstruct Options {\n"));
    assert!(header.ends_with("};\n}\n"));
    assert!(header.contains("    unsigned Threads = 4;\n"));
    assert!(header.contains("    int Seed = 42;\n"));
    assert!(header.contains(
        "    /// @brief Rendering backend of Backend, one of gl,vulkan,null\n    std::string Backend = \"gl\";\n"
    ));
    assert!(header.contains("    /// @brief Start with sound off\n    bool Muted = false;\n"));

    let table = fs::read_to_string(dir.join("Options.inc")).unwrap();
    assert!(table.starts_with("// Do not edit\n#ifndef OPT_CORE\n"));
    assert!(table.ends_with("\n// End\n"));
    assert!(table.contains(
        "OPT_CORE(Core, Threads, unsigned, 4, ([](const auto& value) -> bool { (void)value; return true; }), \"\", \"threads\", \"j\", \"\")\n"
    ));
    assert!(table.contains(
        "OPT_CORE(Core, Seed, int, 42, ([](const auto& value) -> bool {return value != 0;}), \"\", \"\", \"\", \"\")\n"
    ));
    assert!(table.contains("\"backend\", \"\", \"gl|vulkan|null\")\n"));
    assert!(table.contains("#ifndef OPT_AUDIO\n#define OPT_AUDIO("));
}

#[test]
fn test_template_can_be_its_own_output() {
    let temp = setup_project();
    let dir = temp.path();
    let mut config = config(dir);
    config.table.output = config.table.template.clone();

    Generator::new(config).run().unwrap();

    let table = fs::read_to_string(dir.join("Options.inc.in")).unwrap();
    assert!(!table.contains("${OPTGEN_DECL_INCLUDE_OPTIONS}"));
    assert!(table.contains("OPT_RENDER(Render, Backend, std::string, \"gl\", "));
}

#[test]
fn test_crlf_template_keeps_line_endings() {
    let temp = setup_project();
    let dir = temp.path();
    fs::write(
        dir.join("Options.inc.in"),
        "// head\r\n${OPTGEN_DECL_INCLUDE_OPTIONS}\r\n// tail\r\n",
    )
    .unwrap();

    Generator::new(config(dir)).run().unwrap();

    let table = fs::read_to_string(dir.join("Options.inc")).unwrap();
    assert!(table.starts_with("// head\r\n#ifndef OPT_CORE\n"));
    assert!(table.ends_with("\n// tail\r\n"));
}

#[test]
fn test_custom_marker_from_config_file() {
    let temp = setup_project();
    let dir = temp.path();
    fs::write(dir.join("Rows.inc.in"), "before\n@ROWS@\nafter\n").unwrap();
    fs::write(
        dir.join("optgen.json"),
        r#"{
            "schemas": ["core.json"],
            "declaration": {"template": "Options.h.in", "output": "Options.h"},
            "table": {"template": "Rows.inc.in", "output": "Rows.inc", "marker": "@ROWS@"}
        }"#,
    )
    .unwrap();

    let mut config = GeneratorConfig::load(&NormalizedPath::new(dir.join("optgen.json"))).unwrap();
    assert_eq!(config.table.marker.as_deref(), Some("@ROWS@"));

    // Paths in the config are taken relative to the project directory here
    config.schemas = config.schemas.iter().map(|p| dir.join(p)).collect();
    for artifact in Artifact::ALL {
        let settings = config.artifact_mut(artifact);
        settings.template = settings.template.as_ref().map(|p| dir.join(p));
        settings.output = settings.output.as_ref().map(|p| dir.join(p));
    }

    Generator::new(config).run().unwrap();

    let rows = fs::read_to_string(dir.join("Rows.inc")).unwrap();
    assert!(rows.starts_with("before\n#ifndef OPT_CORE\n"));
    assert!(rows.ends_with("\nafter\n"));
}

#[test]
fn test_inject_table_directly() {
    let temp = setup_project();
    let dir = temp.path();

    let mut schema = SchemaLoader::new()
        .load_files(&[NormalizedPath::new(dir.join("core.json"))])
        .unwrap();
    resolve_schema(&mut schema).unwrap();
    let block = emit_table(&validate_schema(&schema).unwrap());

    let injection = inject_file(
        &NormalizedPath::new(dir.join("Options.inc.in")),
        &NormalizedPath::new(dir.join("direct.inc")),
        Artifact::Table.default_marker(),
        &block,
    )
    .unwrap();

    assert_eq!(injection.line, 2);
    assert_eq!(
        fs::read_to_string(dir.join("direct.inc")).unwrap(),
        format!("// Do not edit\n{block}// End\n")
    );
}
