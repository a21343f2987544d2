//! Loader for option schema documents
//!
//! Documents may be JSON, YAML or TOML (detected from the extension) and
//! must contain a `groups` root key. The legacy root key `Options` is
//! accepted as well:
//!
//! ```yaml
//! groups:
//!   Graphics:
//!     Quality:
//!       value_type: std::string
//!       value_default: medium
//!       value_allowed: low,medium,high
//!       cl: quality
//! ```
//!
//! Group and option order follows the documents. Loading several documents
//! appends to the same [`Schema`]; a group seen again is extended.

use crate::model::{Field, FieldMap, OptionDef, Schema};
use crate::{Error, Result};
use optgen_fs::{ConfigStore, DocumentFormat, NormalizedPath};
use serde_json::{Map, Value};

/// Root key of a schema document.
pub const ROOT_KEY: &str = "groups";

/// Root key used by older schema documents.
pub const LEGACY_ROOT_KEY: &str = "Options";

/// Loads option groups from schema documents.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    store: ConfigStore,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self {
            store: ConfigStore::new(),
        }
    }

    /// Load every document, in argument order, into one schema.
    pub fn load_files(&self, paths: &[NormalizedPath]) -> Result<Schema> {
        let mut schema = Schema::new();
        for path in paths {
            self.load_file(path, &mut schema)?;
        }
        Ok(schema)
    }

    /// Load one document and append its groups to `schema`.
    pub fn load_file(&self, path: &NormalizedPath, schema: &mut Schema) -> Result<()> {
        tracing::debug!(path = %path, "Parsing schema file");
        let document: Value = self.store.load(path)?;
        self.load_document(path, &document, schema)?;
        tracing::debug!(path = %path, "Done parsing schema file");
        Ok(())
    }

    /// Parse schema text that was not read from disk.
    ///
    /// `path` is used for error messages only.
    pub fn load_str(
        &self,
        path: &NormalizedPath,
        format: DocumentFormat,
        content: &str,
        schema: &mut Schema,
    ) -> Result<()> {
        let document: Value = self.store.parse(path, format, content)?;
        self.load_document(path, &document, schema)
    }

    fn load_document(
        &self,
        path: &NormalizedPath,
        document: &Value,
        schema: &mut Schema,
    ) -> Result<()> {
        let root = document
            .as_object()
            .ok_or_else(|| Error::schema(path.to_native(), "document root is not a mapping"))?;

        let groups = root
            .get(ROOT_KEY)
            .or_else(|| root.get(LEGACY_ROOT_KEY))
            .ok_or_else(|| {
                Error::schema(
                    path.to_native(),
                    format!("missing root key '{ROOT_KEY}'"),
                )
            })?;
        let groups = as_mapping(path, groups, || format!("'{ROOT_KEY}'"))?;

        for (group_name, options) in groups {
            tracing::debug!(group = %group_name, "Parsing group");
            check_identifier(path, "group", group_name)?;
            let options = as_mapping(path, options, || format!("group '{group_name}'"))?;

            for (option_name, fields) in options {
                check_identifier(path, "option", option_name)?;
                let option = parse_option(path, group_name, option_name, fields)?;
                let group = schema.group_entry(group_name);
                if group.option(option_name).is_some() {
                    return Err(Error::schema(
                        path.to_native(),
                        format!("option '{group_name}.{option_name}' is defined more than once"),
                    ));
                }
                group.options.push(option);
            }
        }

        Ok(())
    }
}

fn parse_option(
    path: &NormalizedPath,
    group: &str,
    option: &str,
    fields: &Value,
) -> Result<OptionDef> {
    tracing::debug!("Parsing option '{group}.{option}'");
    let fields = as_mapping(path, fields, || format!("option '{group}.{option}'"))?;

    let mut map = FieldMap::new();
    for (key, value) in fields {
        let field = Field::from_key(key).ok_or_else(|| Error::UnknownField {
            path: path.to_native(),
            group: group.to_string(),
            option: option.to_string(),
            key: key.clone(),
        })?;

        let text = field_text(field, value).ok_or_else(|| {
            Error::schema(
                path.to_native(),
                format!(
                    "field '{key}' of option '{group}.{option}' must be a string, number or boolean"
                ),
            )
        })?;
        tracing::trace!("Parsing '{key}' = '{text}'");
        map.set(field, text);
    }

    for required in [Field::ValueType, Field::ValueDefault] {
        if !map.is_declared(required) {
            return Err(Error::schema(
                path.to_native(),
                format!("option '{group}.{option}' is missing required field '{required}'"),
            ));
        }
    }

    Ok(OptionDef::new(option, map))
}

/// Group and option names are emitted as C++ identifiers.
fn check_identifier(path: &NormalizedPath, kind: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::schema(
            path.to_native(),
            format!("{kind} name '{name}' is not a valid identifier"),
        ))
    }
}

/// Textual form of a scalar field value.
///
/// `value_allowed` may also be given as a sequence, which is joined with
/// commas to match the string spelling.
fn field_text(field: Field, value: &Value) -> Option<String> {
    match value {
        Value::Array(items) if field == Field::ValueAllowed => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(",")),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_mapping<'a>(
    path: &NormalizedPath,
    value: &'a Value,
    what: impl FnOnce() -> String,
) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::schema(path.to_native(), format!("{} is not a mapping", what())))
}
