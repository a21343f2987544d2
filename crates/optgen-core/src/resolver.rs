//! Placeholder resolution within a single option.
//!
//! Any field may reference another field of the same option with
//! `${field}`, e.g. a doc string of `"Renderer (${value_type})"`. The
//! pseudo-field `${name}` expands to the option's own name.
//!
//! Fields are resolved depth-first. The fields currently being resolved are
//! kept on an explicit stack, so a reference back into that stack is
//! reported as [`Error::CyclicReference`] instead of recursing forever.
//! A field's text is rescanned after each substitution pass until no
//! placeholder remains. Resolved fields are memoized and written back into
//! the option.

use crate::error::{Error, Result};
use optgen_schema::{Field, FieldMap, OptionDef, Schema};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Name usable in placeholders that expands to the option name.
pub const NAME_REFERENCE: &str = "name";

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("Invalid placeholder regex"));

/// Resolves every option of every group in place.
pub fn resolve_schema(schema: &mut Schema) -> Result<()> {
    for group in schema.groups_mut() {
        let group_name = group.name().to_string();
        for option in &mut group.options {
            resolve_option(&group_name, option)?;
        }
    }
    Ok(())
}

/// Resolves all placeholders of one option in place.
///
/// # Errors
/// - `Error::UnknownReference` if a placeholder names a field the option
///   does not declare.
/// - `Error::CyclicReference` if fields reference each other in a cycle.
pub fn resolve_option(group: &str, option: &mut OptionDef) -> Result<()> {
    let option_name = option.name().to_string();
    let mut resolver = FieldResolver {
        group,
        option: &option_name,
        fields: &mut option.fields,
        resolved: HashSet::new(),
        active: Vec::new(),
    };

    for field in Field::ALL {
        if resolver.fields.is_declared(field) {
            resolver.resolve(field)?;
        }
    }
    Ok(())
}

struct FieldResolver<'a> {
    group: &'a str,
    option: &'a str,
    fields: &'a mut FieldMap,
    resolved: HashSet<Field>,
    /// Fields on the current resolution path, outermost first.
    active: Vec<Field>,
}

impl FieldResolver<'_> {
    fn resolve(&mut self, field: Field) -> Result<String> {
        let raw = self.fields.get(field).unwrap_or_default().to_string();
        if self.resolved.contains(&field) {
            return Ok(raw);
        }

        if let Some(start) = self.active.iter().position(|active| *active == field) {
            let mut cycle: Vec<String> = self.active[start..]
                .iter()
                .map(|f| f.key().to_string())
                .collect();
            cycle.push(field.key().to_string());
            return Err(Error::CyclicReference {
                group: self.group.to_string(),
                option: self.option.to_string(),
                cycle,
            });
        }

        self.active.push(field);

        // Substitution can join surrounding text into a new placeholder, so
        // rescan until none is left. `field` stays active meanwhile.
        let mut value = raw.clone();
        while PLACEHOLDER_REGEX.is_match(&value) {
            value = self.substitute(field, &value)?;
        }

        self.active.pop();

        if value != raw {
            tracing::trace!(
                "Resolved '{}.{}.{field}' = '{value}'",
                self.group,
                self.option
            );
        }
        self.fields.set(field, value.clone());
        self.resolved.insert(field);
        Ok(value)
    }

    /// One left-to-right pass replacing every placeholder in `text`.
    fn substitute(&mut self, field: Field, text: &str) -> Result<String> {
        let mut value = String::with_capacity(text.len());
        let mut last = 0;
        for caps in PLACEHOLDER_REGEX.captures_iter(text) {
            let (Some(whole), Some(reference)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            value.push_str(&text[last..whole.start()]);
            value.push_str(&self.lookup(field, reference.as_str())?);
            last = whole.end();
        }
        value.push_str(&text[last..]);
        Ok(value)
    }

    fn lookup(&mut self, field: Field, reference: &str) -> Result<String> {
        if reference == NAME_REFERENCE {
            return Ok(self.option.to_string());
        }

        match Field::from_key(reference).filter(|target| self.fields.is_declared(*target)) {
            Some(target) => self.resolve(target),
            None => Err(Error::UnknownReference {
                group: self.group.to_string(),
                option: self.option.to_string(),
                field: field.key().to_string(),
                reference: reference.to_string(),
            }),
        }
    }
}
