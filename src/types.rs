use serde::Serialize;

/// Name of the parser's unsectioned area. Keys without a dot are looked up
/// here in config files.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A lookup key split into its section and entry parts.
///
/// `"db.host"` → section `"db"`, entry `"host"`. Only the first dot splits, so
/// `"a.b.c"` → section `"a"`, entry `"b.c"`. A key without a dot has an empty
/// section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'a> {
    pub section: &'a str,
    pub entry: &'a str,
}

impl<'a> KeyPath<'a> {
    pub fn parse(key: &'a str) -> Self {
        match key.split_once('.') {
            Some((section, entry)) => KeyPath { section, entry },
            None => KeyPath {
                section: "",
                entry: key,
            },
        }
    }

    /// The section name used for config files: the bare section, or
    /// [`DEFAULT_SECTION`] when there is none.
    ///
    /// The default table is keyed by the bare section instead; see
    /// [`Defaults`](crate::Defaults).
    pub fn config_section(&self) -> &'a str {
        if self.section.is_empty() {
            DEFAULT_SECTION
        } else {
            self.section
        }
    }
}

/// A key that has been resolved at least once.
///
/// Field order is the sort order used by [`Resolver::list_keys`](crate::Resolver::list_keys).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConfigKey {
    /// Config-file section (`DEFAULT` for unsectioned keys).
    pub section: String,
    pub entry: String,
    /// Environment variable consulted for this key.
    pub envvar: String,
    pub doc: String,
}

/// An introspection operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the searched patterns and the files that were loaded.
    Files,
    /// Show every key resolved so far.
    Keys,
    /// Resolve one key and show where it could come from.
    Get { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_key_splits_on_first_dot() {
        let path = KeyPath::parse("a.b.c");
        assert_eq!(path.section, "a");
        assert_eq!(path.entry, "b.c");
    }

    #[test]
    fn bare_key_has_empty_section() {
        let path = KeyPath::parse("secret_key");
        assert_eq!(path.section, "");
        assert_eq!(path.entry, "secret_key");
        assert_eq!(path.config_section(), "DEFAULT");
    }

    #[test]
    fn trailing_dot_gives_empty_entry() {
        let path = KeyPath::parse("db.");
        assert_eq!(path.section, "db");
        assert_eq!(path.entry, "");
        assert_eq!(path.config_section(), "db");
    }

    #[test]
    fn config_keys_sort_by_section_then_entry() {
        let key = |section: &str, entry: &str| ConfigKey {
            section: section.into(),
            entry: entry.into(),
            envvar: String::new(),
            doc: String::new(),
        };
        let mut keys = vec![key("db", "port"), key("DEFAULT", "z"), key("db", "host")];
        keys.sort();
        assert_eq!(keys, vec![key("DEFAULT", "z"), key("db", "host"), key("db", "port")]);
    }
}
