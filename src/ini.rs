//! INI-style config file parser.
//!
//! Grammar:
//!
//! - `[name]` starts a section; the name runs up to the last `]` on the line.
//!   `[DEFAULT]` is the unsectioned area.
//! - `key = value` or `key: value` sets an option. The first `=` or `:`
//!   splits the line; both sides are trimmed.
//! - Lines starting with `#` or `;` (after optional whitespace) are comments.
//! - A line indented deeper than the line that opened the current option
//!   continues that option's value on a new line.
//! - Keys are case-sensitive. Repeating a key replaces its value.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::GetconfError;
use crate::types::DEFAULT_SECTION;

/// One parsed file: the `DEFAULT` area plus named sections.
///
/// A section present in `sections` was declared, even if it holds no keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    pub defaults: BTreeMap<String, String>,
    pub sections: BTreeMap<String, BTreeMap<String, String>>,
}

/// Where the parser is currently writing.
#[derive(Clone, PartialEq)]
enum Cursor {
    Defaults,
    Section(String),
}

/// Parse `content` (read from `path`) into an [`IniDocument`].
///
/// `path` is only used for error messages.
pub fn parse(path: &Path, content: &str) -> Result<IniDocument, GetconfError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut doc = IniDocument::default();
    // Values collect as lines and are joined once the file is done.
    let mut pending: BTreeMap<(Option<String>, String), Vec<String>> = BTreeMap::new();
    let mut cursor: Option<Cursor> = None;
    let mut option: Option<String> = None;
    let mut indent_level = 0;

    let error = |line: usize, reason: String| GetconfError::ParseError {
        path: path.to_path_buf(),
        line,
        reason,
    };

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        let value = line.trim();

        if value.starts_with('#') || value.starts_with(';') {
            continue;
        }
        if value.is_empty() {
            // Blank lines belong to the current value; trailing ones are
            // dropped when joining.
            if let (Some(cur), Some(opt)) = (&cursor, &option)
                && let Some(lines) = pending.get_mut(&(section_key(cur), opt.clone()))
            {
                lines.push(String::new());
            }
            continue;
        }

        let cur_indent = line.len() - line.trim_start().len();
        if let (Some(cur), Some(opt)) = (&cursor, &option)
            && cur_indent > indent_level
        {
            if let Some(lines) = pending.get_mut(&(section_key(cur), opt.clone())) {
                lines.push(value.to_string());
            }
            continue;
        }

        indent_level = cur_indent;

        if let Some(header) = section_header(value) {
            if header == DEFAULT_SECTION {
                cursor = Some(Cursor::Defaults);
            } else {
                doc.sections.entry(header.to_string()).or_default();
                cursor = Some(Cursor::Section(header.to_string()));
            }
            option = None;
            continue;
        }

        let Some(cur) = &cursor else {
            return Err(error(
                lineno,
                format!("file contains no section headers: {value:?}"),
            ));
        };

        let Some(split) = value.find(['=', ':']) else {
            return Err(error(lineno, format!("expected 'key = value', found {value:?}")));
        };
        let key = value[..split].trim();
        if key.is_empty() {
            return Err(error(lineno, "option name is empty".into()));
        }
        let val = value[split + 1..].trim();

        pending.insert((section_key(cur), key.to_string()), vec![val.to_string()]);
        option = Some(key.to_string());
    }

    for ((section, key), lines) in pending {
        let joined = lines.join("\n").trim_end().to_string();
        match section {
            None => doc.defaults.insert(key, joined),
            Some(name) => doc.sections.entry(name).or_default().insert(key, joined),
        };
    }

    Ok(doc)
}

fn section_key(cursor: &Cursor) -> Option<String> {
    match cursor {
        Cursor::Defaults => None,
        Cursor::Section(name) => Some(name.clone()),
    }
}

/// `[name]` → `name`. The name must be non-empty and ends at the last `]`.
fn section_header(value: &str) -> Option<&str> {
    let rest = value.strip_prefix('[')?;
    let end = rest.rfind(']')?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}
