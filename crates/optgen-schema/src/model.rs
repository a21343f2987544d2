//! Option schema model
//!
//! Options keep their raw field text in a [`FieldMap`] keyed by the closed
//! [`Field`] set. Field values may still contain `${field}` placeholders at
//! this stage.

use std::fmt;

/// The closed set of fields an option may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ValueType,
    ValueDefault,
    ValueAllowed,
    Doc,
    CheckFun,
    Cl,
    ClShort,
    ClMetavar,
}

impl Field {
    pub const COUNT: usize = 8;

    /// All fields, in declaration order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::ValueType,
        Field::ValueDefault,
        Field::ValueAllowed,
        Field::Doc,
        Field::CheckFun,
        Field::Cl,
        Field::ClShort,
        Field::ClMetavar,
    ];

    /// The key used for this field in schema documents and placeholders.
    pub fn key(self) -> &'static str {
        match self {
            Field::ValueType => "value_type",
            Field::ValueDefault => "value_default",
            Field::ValueAllowed => "value_allowed",
            Field::Doc => "doc",
            Field::CheckFun => "check_fun",
            Field::Cl => "cl",
            Field::ClShort => "cl_short",
            Field::ClMetavar => "cl_metavar",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fixed-size map from [`Field`] to its (optional) text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: [Option<String>; Field::COUNT],
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = Some(value.into());
    }

    pub fn is_declared(&self, field: Field) -> bool {
        self.values[field.index()].is_some()
    }

    /// Declared fields and their text, in [`Field::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }
}

impl<S: Into<String>> FromIterator<(Field, S)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (Field, S)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (field, value) in iter {
            map.set(field, value);
        }
        map
    }
}

/// A single option as declared in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    name: String,
    pub fields: FieldMap,
}

impl OptionDef {
    pub fn new(name: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named, ordered collection of options emitted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    name: String,
    pub options: Vec<OptionDef>,
}

impl OptionGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn option(&self, name: &str) -> Option<&OptionDef> {
        self.options.iter().find(|opt| opt.name == name)
    }
}

/// All groups loaded from one or more schema documents, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    groups: Vec<OptionGroup>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [OptionGroup] {
        &mut self.groups
    }

    pub fn into_groups(self) -> Vec<OptionGroup> {
        self.groups
    }

    pub fn group(&self, name: &str) -> Option<&OptionGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Existing group with `name`, or a new one appended at the end.
    pub fn group_entry(&mut self, name: &str) -> &mut OptionGroup {
        let idx = match self.groups.iter().position(|group| group.name == name) {
            Some(idx) => idx,
            None => {
                self.groups.push(OptionGroup::new(name));
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }

    pub fn option_count(&self) -> usize {
        self.groups.iter().map(|group| group.options.len()).sum()
    }
}

/// Closed set of option value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Unsigned,
    Float,
    Double,
    String,
}

impl ValueType {
    /// Parse a type tag. `string` is accepted as a short spelling of
    /// `std::string`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "unsigned" => Some(Self::Unsigned),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "std::string" | "string" => Some(Self::String),
            _ => None,
        }
    }

    /// The C++ spelling used in generated declarations.
    pub fn cxx_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Unsigned => "unsigned",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "std::string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cxx_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("name"), None);
        assert_eq!(Field::from_key("value_allow"), None);
    }

    #[test]
    fn field_map_iterates_in_field_order() {
        let map: FieldMap = [
            (Field::Doc, "docs"),
            (Field::ValueType, "int"),
            (Field::ValueDefault, "1"),
        ]
        .into_iter()
        .collect();

        let fields: Vec<Field> = map.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::ValueType, Field::ValueDefault, Field::Doc]);
    }

    #[test]
    fn group_entry_extends_existing_group() {
        let mut schema = Schema::new();
        schema.group_entry("Core").options.push(OptionDef::new("A", FieldMap::new()));
        schema.group_entry("Render").options.push(OptionDef::new("B", FieldMap::new()));
        schema.group_entry("Core").options.push(OptionDef::new("C", FieldMap::new()));

        let names: Vec<&str> = schema.groups().iter().map(OptionGroup::name).collect();
        assert_eq!(names, vec!["Core", "Render"]);
        assert_eq!(schema.group("Core").unwrap().options.len(), 2);
        assert_eq!(schema.option_count(), 3);
    }

    #[test]
    fn value_type_tags() {
        assert_eq!(ValueType::from_tag("std::string"), Some(ValueType::String));
        assert_eq!(ValueType::from_tag("string"), Some(ValueType::String));
        assert_eq!(ValueType::from_tag(" bool "), Some(ValueType::Bool));
        assert_eq!(ValueType::from_tag("long double"), None);
        assert_eq!(ValueType::String.cxx_name(), "std::string");
    }
}
