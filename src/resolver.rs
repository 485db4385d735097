use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use toml::Value;
use tracing::{trace, warn};

use crate::builder::ResolverBuilder;
use crate::coerce;
use crate::defaults::Defaults;
use crate::env::env_key;
use crate::error::GetconfError;
use crate::ops::{self, ConfigResult};
use crate::section::SectionView;
use crate::source::{self, Lookup, Source};
use crate::types::{ConfigAction, ConfigKey, KeyPath};

/// Default separator for [`Resolver::getlist`].
pub const LIST_SEPARATOR: &str = ",";

/// Caller default for [`Resolver::getlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDefault {
    Items(Vec<String>),
    /// Split like a configured value. Prefer [`ListDefault::Items`].
    Text(String),
}

impl From<Vec<String>> for ListDefault {
    fn from(items: Vec<String>) -> Self {
        ListDefault::Items(items)
    }
}

impl From<&[&str]> for ListDefault {
    fn from(items: &[&str]) -> Self {
        ListDefault::Items(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ListDefault {
    fn from(items: [&str; N]) -> Self {
        ListDefault::Items(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<ListDefault> for Value {
    fn from(default: ListDefault) -> Self {
        match default {
            ListDefault::Items(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            ListDefault::Text(text) => Value::String(text),
        }
    }
}

/// Layered configuration lookup for one namespace.
///
/// Every accessor walks the same chain: environment variable, parsed config
/// files, default table, and finally the default passed to the accessor.
///
/// Every resolved key is remembered and can be listed with
/// [`list_keys`](Self::list_keys).
pub struct Resolver {
    namespace: String,
    search_patterns: Vec<String>,
    files: Vec<PathBuf>,
    sources: Vec<Box<dyn Source>>,
    seen: Mutex<BTreeSet<ConfigKey>>,
}

impl Resolver {
    pub fn builder(namespace: &str) -> ResolverBuilder {
        ResolverBuilder::new(namespace)
    }

    /// Build a resolver reading the process environment.
    pub fn new<I, P>(
        namespace: &str,
        paths: I,
        defaults: Option<Defaults>,
    ) -> Result<Self, GetconfError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::builder(namespace)
            .search_paths(paths)
            .defaults(defaults.unwrap_or_default())
            .build()
    }

    pub(crate) fn from_parts(
        namespace: String,
        search_patterns: Vec<String>,
        files: Vec<PathBuf>,
        sources: Vec<Box<dyn Source>>,
    ) -> Self {
        Self {
            namespace,
            search_patterns,
            files,
            sources,
            seen: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Config files that were parsed, in merge order (last wins).
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Normalized candidate patterns that were searched, in order.
    pub fn search_patterns(&self) -> &[String] {
        &self.search_patterns
    }

    /// Environment variable consulted for `key`.
    pub fn env_var_for(&self, key: &str) -> String {
        let path = KeyPath::parse(key);
        env_key(&self.namespace, path.section, path.entry)
    }

    /// Walk the chain for `key` and record it as seen.
    fn resolve(
        &self,
        key: &str,
        default: Option<Value>,
        doc: &str,
    ) -> Result<Option<Value>, GetconfError> {
        let path = KeyPath::parse(key);
        let envvar = env_key(&self.namespace, path.section, path.entry);
        let lookup = Lookup {
            section: path.section,
            config_section: path.config_section(),
            entry: path.entry,
            envvar: &envvar,
        };

        let value = match source::first_match(&self.sources, &lookup)? {
            Some((source, value)) => {
                trace!(key, source, "resolved config key");
                Some(value)
            }
            None => {
                trace!(key, "using caller default");
                default
            }
        };

        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ConfigKey {
                section: lookup.config_section.to_string(),
                entry: lookup.entry.to_string(),
                envvar,
                doc: doc.to_string(),
            });

        Ok(value)
    }

    /// Retrieve a value as text.
    pub fn getstr(
        &self,
        key: &str,
        default: Option<&str>,
        doc: &str,
    ) -> Result<Option<String>, GetconfError> {
        let default = default.map(|d| Value::String(d.to_string()));
        self.resolve(key, default, doc)?
            .map(|v| coerce::to_text(key, v))
            .transpose()
    }

    /// Alias for [`getstr`](Self::getstr).
    #[deprecated(note = "use getstr()")]
    pub fn get(
        &self,
        key: &str,
        default: Option<&str>,
        doc: &str,
    ) -> Result<Option<String>, GetconfError> {
        warn!(key, "Resolver::get() is deprecated, use getstr()");
        self.getstr(key, default, doc)
    }

    /// Retrieve a value as a list, splitting text on `,`.
    ///
    /// Pieces are trimmed and empty pieces dropped, so `" a, b ,,c "` gives
    /// `["a", "b", "c"]`. A list from the default table is returned as is.
    pub fn getlist(
        &self,
        key: &str,
        default: Option<ListDefault>,
        doc: &str,
    ) -> Result<Option<Vec<String>>, GetconfError> {
        self.getlist_sep(key, default, doc, LIST_SEPARATOR)
    }

    /// Like [`getlist`](Self::getlist) with an explicit separator.
    pub fn getlist_sep(
        &self,
        key: &str,
        default: Option<ListDefault>,
        doc: &str,
        sep: &str,
    ) -> Result<Option<Vec<String>>, GetconfError> {
        if sep.is_empty() {
            return Err(GetconfError::EmptySeparator { key: key.into() });
        }
        if let Some(ListDefault::Text(_)) = &default {
            warn!(key, "text defaults for getlist() are deprecated, pass a list");
        }
        self.resolve(key, default.map(Value::from), doc)?
            .map(|v| coerce::to_list(key, v, sep))
            .transpose()
    }

    /// Retrieve a value as a boolean.
    ///
    /// `on`, `true`, `yes` and `1` (any case) are true; any other text is
    /// false.
    pub fn getbool(
        &self,
        key: &str,
        default: Option<bool>,
        doc: &str,
    ) -> Result<Option<bool>, GetconfError> {
        Ok(self
            .resolve(key, default.map(Value::Boolean), doc)?
            .map(coerce::to_bool))
    }

    /// Retrieve a value as an integer. Text that is not an integer is an
    /// error, not a reason to fall back to `default`.
    pub fn getint(
        &self,
        key: &str,
        default: Option<i64>,
        doc: &str,
    ) -> Result<Option<i64>, GetconfError> {
        self.resolve(key, default.map(Value::Integer), doc)?
            .map(|v| coerce::to_int(key, v))
            .transpose()
    }

    /// Retrieve a value as a float.
    pub fn getfloat(
        &self,
        key: &str,
        default: Option<f64>,
        doc: &str,
    ) -> Result<Option<f64>, GetconfError> {
        self.resolve(key, default.map(Value::Float), doc)?
            .map(|v| coerce::to_float(key, v))
            .transpose()
    }

    /// A read-only view of one section.
    pub fn get_section(&self, name: &str) -> SectionView<'_> {
        SectionView::new(self, name)
    }

    /// Every key resolved so far, sorted by `(section, entry, envvar, doc)`.
    pub fn list_keys(&self) -> Vec<ConfigKey> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Handle a `ConfigAction` (files / keys / get).
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, GetconfError> {
        ops::handle(self, action)
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(&self, action: &ConfigAction) -> Result<(), GetconfError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Names of the lookup sources, highest priority first.
    pub(crate) fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// The first non-empty doc recorded for `key`, if any.
    pub(crate) fn recorded_doc(&self, key: &str) -> Option<String> {
        let path = KeyPath::parse(key);
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|k| {
                k.section == path.config_section() && k.entry == path.entry && !k.doc.is_empty()
            })
            .map(|k| k.doc.clone())
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("namespace", &self.namespace)
            .field("search_patterns", &self.search_patterns)
            .field("files", &self.files)
            .field("sources", &self.source_names())
            .finish_non_exhaustive()
    }
}
