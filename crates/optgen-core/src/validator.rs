//! Constraint checks and predicate synthesis for resolved options.

use crate::emitter::literal;
use crate::error::{Error, Result};
use optgen_schema::{Field, OptionDef, Schema, ValueType};

/// Separator between values in `value_allowed`.
pub const ALLOWED_SEPARATOR: char = ',';

/// Separator used when deriving a metavar from the allowed values.
pub const METAVAR_SEPARATOR: &str = "|";

const PREDICATE_PREFIX: &str = "[](const auto& value) -> bool ";

/// Validity check attached to an option's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckPredicate {
    /// Accepts any value.
    AcceptAll,
    /// Accepts exactly the listed values, in schema order.
    OneOf(Vec<String>),
    /// User-supplied function body taking `value`.
    Custom(String),
}

impl CheckPredicate {
    /// C++ lambda source for this predicate.
    pub fn source(&self, value_type: ValueType) -> String {
        match self {
            Self::AcceptAll => format!("{PREDICATE_PREFIX}{{ (void)value; return true; }}"),
            Self::OneOf(allowed) => {
                let entries: Vec<String> = allowed
                    .iter()
                    .map(|value| literal(value_type, value))
                    .collect();
                format!(
                    "{PREDICATE_PREFIX}{{ std::vector<{}> allowed{{{}}}; \
                     return (std::find(allowed.begin(), allowed.end(), value) != allowed.end()); }}",
                    value_type.cxx_name(),
                    entries.join(", ")
                )
            }
            Self::Custom(body) => format!("{PREDICATE_PREFIX}{{{body}}}"),
        }
    }
}

/// A resolved and validated option, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOption {
    pub name: String,
    pub value_type: ValueType,
    pub default: String,
    pub allowed: Option<Vec<String>>,
    pub doc: Option<String>,
    pub check: CheckPredicate,
    pub cl: Option<String>,
    pub cl_short: Option<String>,
    pub cl_metavar: Option<String>,
}

impl ValidatedOption {
    /// Default value rendered as a literal of the option's type.
    pub fn default_literal(&self) -> String {
        literal(self.value_type, &self.default)
    }

    pub fn check_source(&self) -> String {
        self.check.source(self.value_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedGroup {
    pub name: String,
    pub options: Vec<ValidatedOption>,
}

/// The frozen, ordered result of validation.
///
/// Both emitters walk this in the same group-then-option order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    groups: Vec<ValidatedGroup>,
}

impl OptionSet {
    pub fn groups(&self) -> &[ValidatedGroup] {
        &self.groups
    }

    /// `(group, option)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&ValidatedGroup, &ValidatedOption)> {
        self.groups
            .iter()
            .flat_map(|group| group.options.iter().map(move |option| (group, option)))
    }

    pub fn option_count(&self) -> usize {
        self.groups.iter().map(|group| group.options.len()).sum()
    }
}

/// Validates every option of a resolved schema.
pub fn validate_schema(schema: &Schema) -> Result<OptionSet> {
    let groups = schema
        .groups()
        .iter()
        .map(|group| {
            let options = group
                .options
                .iter()
                .map(|option| validate_option(group.name(), option))
                .collect::<Result<Vec<_>>>()?;
            Ok(ValidatedGroup {
                name: group.name().to_string(),
                options,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(OptionSet { groups })
}

/// Validates one resolved option.
///
/// # Errors
/// - `Error::Schema` for an unknown type tag or an empty allowed set.
/// - `Error::InvalidDefault` if the default is not an allowed value.
pub fn validate_option(group: &str, option: &OptionDef) -> Result<ValidatedOption> {
    let schema_error = |message: String| Error::Schema {
        group: group.to_string(),
        option: option.name().to_string(),
        message,
    };

    let fields = &option.fields;
    let tag = fields.get(Field::ValueType).unwrap_or_default();
    let value_type = ValueType::from_tag(tag)
        .ok_or_else(|| schema_error(format!("unknown value type '{tag}'")))?;
    let default = fields.get(Field::ValueDefault).unwrap_or_default().to_string();

    // Empty strings count as absent for the optional fields
    let optional = |field: Field| {
        fields
            .get(field)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let cl = optional(Field::Cl);
    let mut cl_metavar = optional(Field::ClMetavar);
    let custom_check = optional(Field::CheckFun);

    let allowed = match fields.get(Field::ValueAllowed) {
        Some(raw) => {
            let values: Vec<String> = raw
                .split(ALLOWED_SEPARATOR)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect();
            if values.is_empty() {
                return Err(schema_error("empty set of allowed values".to_string()));
            }
            Some(values)
        }
        None => None,
    };

    let check = match &allowed {
        Some(values) => {
            if !values.contains(&default) {
                return Err(Error::InvalidDefault {
                    group: group.to_string(),
                    option: option.name().to_string(),
                    default,
                    allowed: values.clone(),
                });
            }
            if custom_check.is_some() {
                tracing::warn!(
                    "option '{group}.{}': check_fun is ignored because value_allowed is set",
                    option.name()
                );
            }
            if cl.is_some() && cl_metavar.is_none() {
                cl_metavar = Some(values.join(METAVAR_SEPARATOR));
            }
            CheckPredicate::OneOf(values.clone())
        }
        None => match custom_check {
            Some(body) => CheckPredicate::Custom(body),
            None => CheckPredicate::AcceptAll,
        },
    };

    tracing::debug!("Done validating option '{group}.{}'", option.name());

    Ok(ValidatedOption {
        name: option.name().to_string(),
        value_type,
        default,
        allowed,
        doc: optional(Field::Doc),
        check,
        cl,
        cl_short: optional(Field::ClShort),
        cl_metavar,
    })
}
