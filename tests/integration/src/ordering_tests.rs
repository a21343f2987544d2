//! Property tests: both artifacts list groups and options in schema order.

use optgen_core::{emit_declarations, emit_table, resolve_schema, validate_schema};
use optgen_fs::{DocumentFormat, NormalizedPath};
use optgen_schema::{Schema, SchemaLoader};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Drops repeated names, keeping the first occurrence.
fn unique(names: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

fn layout() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec(
        (
            "[A-Z][a-z]{2,6}",
            prop::collection::vec("[A-Z][a-zA-Z0-9]{1,8}", 1..5).prop_map(unique),
        ),
        1..5,
    )
    .prop_map(|groups| {
        let mut seen = Vec::new();
        groups
            .into_iter()
            .filter(|(name, _)| {
                let fresh = !seen.contains(name);
                seen.push(name.clone());
                fresh
            })
            .collect()
    })
}

fn load(groups: &[(String, Vec<String>)]) -> Schema {
    let mut root = Map::new();
    for (group, options) in groups {
        let mut entries = Map::new();
        for (idx, option) in options.iter().enumerate() {
            entries.insert(
                option.clone(),
                json!({"value_type": "int", "value_default": idx, "doc": "${name} of ${value_type}"}),
            );
        }
        root.insert(group.clone(), Value::Object(entries));
    }
    let document = json!({ "groups": root }).to_string();

    let mut schema = Schema::default();
    SchemaLoader::new()
        .load_str(
            &NormalizedPath::new("generated.json"),
            DocumentFormat::Json,
            &document,
            &mut schema,
        )
        .unwrap();
    schema
}

proptest! {
    #[test]
    fn emitted_order_matches_schema(groups in layout()) {
        let mut schema = load(&groups);
        resolve_schema(&mut schema).unwrap();
        let options = validate_schema(&schema).unwrap();

        let expected: Vec<String> = groups
            .iter()
            .flat_map(|(_, options)| options.iter().cloned())
            .collect();

        let declarations = emit_declarations(&options);
        let declared: Vec<String> = declarations
            .lines()
            .filter(|line| line.starts_with("    int "))
            .filter_map(|line| line.split_whitespace().nth(1).map(str::to_string))
            .collect();

        let table = emit_table(&options);
        let rows: Vec<String> = table
            .lines()
            .filter(|line| line.starts_with("OPT_"))
            .filter_map(|line| line.split(", ").nth(1).map(str::to_string))
            .collect();

        prop_assert_eq!(&declared, &expected);
        prop_assert_eq!(&rows, &expected);
    }

    #[test]
    fn emission_is_deterministic(groups in layout()) {
        let mut first = load(&groups);
        let mut second = load(&groups);
        resolve_schema(&mut first).unwrap();
        resolve_schema(&mut second).unwrap();
        let first = validate_schema(&first).unwrap();
        let second = validate_schema(&second).unwrap();

        prop_assert_eq!(emit_declarations(&first), emit_declarations(&second));
        prop_assert_eq!(emit_table(&first), emit_table(&second));
    }
}
