//! Marker-line replacement for template files.

use crate::error::{Error, Result};
use optgen_fs::{NormalizedPath, io};

/// Template content with its marker line replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// The full resulting content.
    pub content: String,
    /// The 1-based line number of the replaced marker line.
    pub line: usize,
}

/// Replaces the first line containing `marker` with `block`.
///
/// Line endings of all other lines are preserved. If the marker line ended
/// with a line break and `block` does not, the same line break is appended
/// so the following line stays on its own line.
///
/// Returns `None` if no line contains the marker. An empty marker never
/// matches.
///
/// # Example
/// ```
/// use optgen_blocks::replace_marker_line;
///
/// let template = "before\n  ${MARKER}\nafter\n";
/// let injection = replace_marker_line(template, "${MARKER}", "generated\n").unwrap();
/// assert_eq!(injection.content, "before\ngenerated\nafter\n");
/// assert_eq!(injection.line, 2);
/// ```
pub fn replace_marker_line(content: &str, marker: &str, block: &str) -> Option<Injection> {
    if marker.is_empty() {
        return None;
    }

    let mut output = String::with_capacity(content.len() + block.len());
    let mut replaced_at = None;

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        if replaced_at.is_none() && line.contains(marker) {
            output.push_str(block);
            if !block.ends_with('\n') {
                if line.ends_with("\r\n") {
                    output.push_str("\r\n");
                } else if line.ends_with('\n') {
                    output.push('\n');
                }
            }
            replaced_at = Some(idx + 1);
        } else {
            output.push_str(line);
        }
    }

    replaced_at.map(|line| Injection {
        content: output,
        line,
    })
}

/// Reads `template` and replaces its marker line with `block`.
///
/// Nothing is written; see [`inject_file`].
///
/// # Errors
/// - `Error::MissingInput` if the template does not exist.
/// - `Error::MarkerNotFound` if no line contains the marker.
pub fn render_file(template: &NormalizedPath, marker: &str, block: &str) -> Result<Injection> {
    if !template.exists() {
        return Err(Error::MissingInput {
            path: template.to_native(),
        });
    }

    tracing::debug!(template = %template, "Reading template file");
    let content = io::read_text(template)?;

    let injection =
        replace_marker_line(&content, marker, block).ok_or_else(|| Error::MarkerNotFound {
            marker: marker.to_string(),
            path: template.to_native(),
        })?;
    tracing::debug!(line = injection.line, "Replacing marker line");

    Ok(injection)
}

/// Injects `block` into `template` at its marker and writes the result to
/// `output`.
///
/// `output` may be the template itself. The write is atomic: on any error
/// the output is left untouched.
pub fn inject_file(
    template: &NormalizedPath,
    output: &NormalizedPath,
    marker: &str,
    block: &str,
) -> Result<Injection> {
    let injection = render_file(template, marker, block)?;
    tracing::debug!(output = %output, "Writing output file");
    io::write_text(output, &injection.content)?;
    Ok(injection)
}
