//! Introspection operations: loaded files, seen keys, single-key lookup.
//!
//! Provides the logic behind `config files`, `config keys` and `config get`,
//! and the `ConfigResult` enum that callers use to display results.

use std::fmt;
use std::path::PathBuf;

use crate::error::GetconfError;
use crate::resolver::Resolver;
use crate::types::{ConfigAction, ConfigKey};

/// Result of an introspection operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// Patterns that were searched and files that were parsed.
    Files {
        searched: Vec<String>,
        loaded: Vec<PathBuf>,
    },
    /// Every key resolved so far.
    Keys(Vec<ConfigKey>),
    /// One key's resolved value and where it could be set.
    KeyValue {
        key: String,
        value: Option<String>,
        envvar: String,
        doc: Option<String>,
    },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Files { searched, loaded } => {
                writeln!(f, "Searched:")?;
                for pattern in searched {
                    writeln!(f, "  {pattern}")?;
                }
                write!(f, "Loaded:")?;
                for path in loaded {
                    write!(f, "\n  {}", path.display())?;
                }
                Ok(())
            }
            ConfigResult::Keys(keys) => {
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    if !key.doc.is_empty() {
                        writeln!(f, "# {}", key.doc)?;
                    }
                    write!(f, "[{}] {} (env: {})", key.section, key.entry, key.envvar)?;
                }
                Ok(())
            }
            ConfigResult::KeyValue {
                key,
                value,
                envvar,
                doc,
            } => {
                if let Some(doc) = doc {
                    writeln!(f, "# {doc}")?;
                }
                writeln!(f, "# env: {envvar}")?;
                match value {
                    Some(v) => write!(f, "{key} = {v}"),
                    None => write!(f, "{key} = <not set>"),
                }
            }
        }
    }
}

/// Run `action` against `resolver`.
pub fn handle(resolver: &Resolver, action: &ConfigAction) -> Result<ConfigResult, GetconfError> {
    match action {
        ConfigAction::Files => Ok(ConfigResult::Files {
            searched: resolver.search_patterns().to_vec(),
            loaded: resolver.files().to_vec(),
        }),
        ConfigAction::Keys => Ok(ConfigResult::Keys(resolver.list_keys())),
        ConfigAction::Get { key } => get_value(resolver, key),
    }
}

/// Resolve `key` as text, reusing any doc recorded for it earlier so the
/// lookup does not add an undocumented duplicate to the seen keys.
pub fn get_value(resolver: &Resolver, key: &str) -> Result<ConfigResult, GetconfError> {
    let doc = resolver.recorded_doc(key);
    let value = resolver.getstr(key, None, doc.as_deref().unwrap_or(""))?;
    Ok(ConfigResult::KeyValue {
        key: key.to_string(),
        value,
        envvar: resolver.env_var_for(key),
        doc,
    })
}
