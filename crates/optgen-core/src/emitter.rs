//! Rendering of the two generated artifacts.
//!
//! The declaration artifact holds one C++ struct per group with a typed,
//! defaulted field per option:
//!
//! ```text
//!   /// @brief Graphics specific options
//!   struct GraphicsType {
//!
//!     bool VSync = true;
//!   } Graphics;
//! ```
//!
//! The table artifact holds one X-macro row per option. Each group's rows go
//! through `OPT_<GROUP>`, which falls back to the shared `OPT` handler unless
//! the including file defined a group-specific one first:
//!
//! ```text
//! #ifndef OPT_GRAPHICS
//! #define OPT_GRAPHICS(Structure, Name, ...) OPT(Structure, Name, ...)
//! #endif
//!
//! OPT_GRAPHICS(Graphics, VSync, bool, true, (...), "", "", "", "")
//! ```
//!
//! Both walk the same [`OptionSet`] so their group and option order always
//! agree.

use crate::validator::{OptionSet, ValidatedOption};
use optgen_schema::ValueType;
use std::fmt::Write;

/// Parameter list shared by the row macros.
pub const ROW_SIGNATURE: &str = "(Structure, Name, Type, DefaultValue, CheckFun, Doc, \
                                 CommandLine, CommandLineShort, CommandLineMetaVar)";

/// Shared row handler the per-group macros forward to.
pub const ROW_HANDLER: &str = "OPT";

/// Rendering of an absent string cell.
const EMPTY_CELL: &str = "\"\"";

/// The two artifacts produced per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Typed struct declarations (`*.h`).
    Declaration,
    /// Flat row table (`*.inc`).
    Table,
}

impl Artifact {
    pub const ALL: [Artifact; 2] = [Artifact::Declaration, Artifact::Table];

    pub fn name(self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::Table => "table",
        }
    }

    /// Marker token expected in the artifact's template.
    pub fn default_marker(self) -> &'static str {
        match self {
            Self::Declaration => "${OPTGEN_DECL_HEADER_OPTIONS}",
            Self::Table => "${OPTGEN_DECL_INCLUDE_OPTIONS}",
        }
    }

    pub fn render(self, options: &OptionSet) -> String {
        match self {
            Self::Declaration => emit_declarations(options),
            Self::Table => emit_table(options),
        }
    }
}

/// Renders `value` as a literal of `value_type`.
///
/// Strings are quoted, booleans lowercased, numbers left as written.
pub fn literal(value_type: ValueType, value: &str) -> String {
    match value_type {
        ValueType::String => quote(value),
        ValueType::Bool => value.to_lowercase(),
        ValueType::Int | ValueType::Unsigned | ValueType::Float | ValueType::Double => {
            value.to_string()
        }
    }
}

/// Quotes `text` as a C string literal.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

fn cell(value: Option<&str>) -> String {
    value.map_or_else(|| EMPTY_CELL.to_string(), quote)
}

/// Renders the struct declarations for every group.
pub fn emit_declarations(options: &OptionSet) -> String {
    let mut out = String::new();
    for group in options.groups() {
        let _ = writeln!(out, "  /// @brief {} specific options", group.name);
        let _ = writeln!(out, "  struct {}Type {{", group.name);
        for option in &group.options {
            out.push('\n');
            write_doc(&mut out, option);
            let _ = writeln!(
                out,
                "    {} {} = {};",
                option.value_type.cxx_name(),
                option.name,
                option.default_literal()
            );
        }
        let _ = writeln!(out, "  }} {};", group.name);
        out.push('\n');
    }
    out
}

fn write_doc(out: &mut String, option: &ValidatedOption) {
    let Some(doc) = option.doc.as_deref() else {
        return;
    };
    for (idx, line) in doc.lines().enumerate() {
        if idx == 0 {
            let _ = writeln!(out, "    /// @brief {line}");
        } else {
            let _ = writeln!(out, "    ///        {line}");
        }
    }
}

/// Renders the row table for every group.
pub fn emit_table(options: &OptionSet) -> String {
    let mut out = String::new();
    for group in options.groups() {
        let row_macro = format!("{ROW_HANDLER}_{}", group.name.to_uppercase());
        let _ = writeln!(out, "#ifndef {row_macro}");
        let _ = writeln!(
            out,
            "#define {row_macro}{ROW_SIGNATURE} {ROW_HANDLER}{ROW_SIGNATURE}"
        );
        let _ = writeln!(out, "#endif");
        out.push('\n');

        for option in &group.options {
            let _ = writeln!(
                out,
                "{row_macro}({}, {}, {}, {}, ({}), {}, {}, {}, {})",
                group.name,
                option.name,
                option.value_type.cxx_name(),
                option.default_literal(),
                option.check_source(),
                cell(option.doc.as_deref()),
                cell(option.cl.as_deref()),
                cell(option.cl_short.as_deref()),
                cell(option.cl_metavar.as_deref()),
            );
        }
        out.push('\n');
    }
    out
}
