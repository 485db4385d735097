//! The precedence chain: an ordered list of value sources.
//!
//! ```text
//! Environment      {NAMESPACE}[_{SECTION}]_{ENTRY}
//!        ↓ not found
//! Config files     (section or DEFAULT, entry), later files win
//!        ↓ not found
//! Default table    (bare section, entry)
//!        ↓ not found
//! Caller default   returned by the accessor
//! ```
//!
//! Each source answers `Ok(None)` for "not here, try the next one". Errors
//! are fatal and stop the walk.

use std::sync::Arc;

use toml::Value;

use crate::defaults::Defaults;
use crate::env::Environment;
use crate::error::GetconfError;
use crate::store::ParsedStore;

/// Everything a source may need to find one key.
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
    /// Section as written in the key (empty for bare keys).
    pub section: &'a str,
    /// Section used in config files (`DEFAULT` for bare keys).
    pub config_section: &'a str,
    pub entry: &'a str,
    pub envvar: &'a str,
}

pub trait Source: Send + Sync {
    /// Short name used in trace logs.
    fn name(&self) -> &'static str;

    fn lookup(&self, key: &Lookup<'_>) -> Result<Option<Value>, GetconfError>;
}

pub struct EnvSource {
    env: Arc<dyn Environment>,
}

impl EnvSource {
    pub fn new(env: Arc<dyn Environment>) -> Self {
        Self { env }
    }
}

impl Source for EnvSource {
    fn name(&self) -> &'static str {
        "env"
    }

    /// Present means found, even when empty.
    fn lookup(&self, key: &Lookup<'_>) -> Result<Option<Value>, GetconfError> {
        Ok(self.env.var(key.envvar).map(Value::String))
    }
}

pub struct FileSource {
    store: ParsedStore,
}

impl FileSource {
    pub fn new(store: ParsedStore) -> Self {
        Self { store }
    }
}

impl Source for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn lookup(&self, key: &Lookup<'_>) -> Result<Option<Value>, GetconfError> {
        Ok(self
            .store
            .get(key.config_section, key.entry)?
            .map(Value::String))
    }
}

pub struct DefaultsSource {
    defaults: Defaults,
}

impl DefaultsSource {
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults }
    }
}

impl Source for DefaultsSource {
    fn name(&self) -> &'static str {
        "defaults"
    }

    /// Keyed by the bare section, not the config-file section.
    fn lookup(&self, key: &Lookup<'_>) -> Result<Option<Value>, GetconfError> {
        Ok(self.defaults.get(key.section, key.entry).cloned())
    }
}

/// Walk `sources` in order and return the first value found, with the name
/// of the source that supplied it.
pub fn first_match(
    sources: &[Box<dyn Source>],
    key: &Lookup<'_>,
) -> Result<Option<(&'static str, Value)>, GetconfError> {
    for source in sources {
        if let Some(value) = source.lookup(key)? {
            return Ok(Some((source.name(), value)));
        }
    }
    Ok(None)
}
