//! The cumulative view over every parsed config file.
//!
//! Files are overlaid in discovery order: a later file replaces an earlier
//! file's value for the same `(section, key)`, and nothing else.
//!
//! Lookups follow the INI conventions the files are written for:
//!
//! - A key missing from an existing section falls back to `[DEFAULT]`.
//! - A section that no file declared finds nothing, even if `[DEFAULT]` has
//!   the key.
//! - `%(name)s` in a value is replaced by the value of `name` from the same
//!   section (or `[DEFAULT]`); `%%` is a literal `%`.

use crate::error::GetconfError;
use crate::ini::IniDocument;
use crate::types::DEFAULT_SECTION;

const MAX_INTERPOLATION_DEPTH: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStore {
    doc: IniDocument,
}

impl ParsedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `doc` on top of the current contents, key by key.
    pub fn overlay(&mut self, doc: IniDocument) {
        self.doc.defaults.extend(doc.defaults);
        for (name, entries) in doc.sections {
            self.doc.sections.entry(name).or_default().extend(entries);
        }
    }

    /// Raw (uninterpolated) value for `key` in `section`.
    pub fn get_raw(&self, section: &str, key: &str) -> Option<&str> {
        if section == DEFAULT_SECTION {
            return self.doc.defaults.get(key).map(String::as_str);
        }
        let entries = self.doc.sections.get(section)?;
        entries
            .get(key)
            .or_else(|| self.doc.defaults.get(key))
            .map(String::as_str)
    }

    /// Interpolated value for `key` in `section`, or `None` if absent.
    pub fn get(&self, section: &str, key: &str) -> Result<Option<String>, GetconfError> {
        let Some(raw) = self.get_raw(section, key) else {
            return Ok(None);
        };
        let mut out = String::new();
        self.interpolate(section, key, raw, 1, &mut out)?;
        Ok(Some(out))
    }

    fn interpolate(
        &self,
        section: &str,
        key: &str,
        raw: &str,
        depth: usize,
        out: &mut String,
    ) -> Result<(), GetconfError> {
        let error = |reason: String| GetconfError::Interpolation {
            section: section.to_string(),
            entry: key.to_string(),
            reason,
        };

        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(error(format!(
                "recursion limit of {MAX_INTERPOLATION_DEPTH} exceeded"
            )));
        }

        let mut rest = raw;
        while let Some(p) = rest.find('%') {
            out.push_str(&rest[..p]);
            rest = &rest[p..];

            if let Some(after) = rest.strip_prefix("%%") {
                out.push('%');
                rest = after;
            } else if let Some(after) = rest.strip_prefix("%(") {
                let Some(close) = after.find(")s") else {
                    return Err(error(format!("bad interpolation reference in {raw:?}")));
                };
                let name = &after[..close];
                if name.is_empty() || name.contains(')') {
                    return Err(error(format!("bad interpolation reference in {raw:?}")));
                }
                rest = &after[close + 2..];

                let Some(value) = self.get_raw(section, name) else {
                    return Err(error(format!("missing option '{name}' referenced in {raw:?}")));
                };
                if value.contains('%') {
                    self.interpolate(section, key, value, depth + 1, out)?;
                } else {
                    out.push_str(value);
                }
            } else {
                return Err(error(format!(
                    "'%' must be followed by '%' or '(', found {rest:?}"
                )));
            }
        }
        out.push_str(rest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ini;
    use std::path::Path;

    fn store(files: &[&str]) -> ParsedStore {
        let mut store = ParsedStore::new();
        for content in files {
            store.overlay(ini::parse(Path::new("t.ini"), content).unwrap());
        }
        store
    }

    #[test]
    fn later_file_overrides_earlier() {
        let s = store(&["[db]\nhost = a\nport = 1\n", "[db]\nhost = b\n"]);
        assert_eq!(s.get("db", "host").unwrap().as_deref(), Some("b"));
        assert_eq!(s.get("db", "port").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn sections_union_across_files() {
        let s = store(&["[a]\nx = 1\n", "[b]\ny = 2\n"]);
        assert_eq!(s.get("a", "x").unwrap().as_deref(), Some("1"));
        assert_eq!(s.get("b", "y").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn missing_key_is_none() {
        let s = store(&["[db]\nhost = a\n"]);
        assert_eq!(s.get("db", "nope").unwrap(), None);
        assert_eq!(s.get("nope", "host").unwrap(), None);
    }

    #[test]
    fn default_area_lookup() {
        let s = store(&["[DEFAULT]\nsecret = x\n"]);
        assert_eq!(s.get("DEFAULT", "secret").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn declared_section_inherits_defaults() {
        let s = store(&["[DEFAULT]\ntimeout = 5\n[db]\nhost = a\n"]);
        assert_eq!(s.get("db", "timeout").unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn undeclared_section_does_not_inherit_defaults() {
        let s = store(&["[DEFAULT]\ntimeout = 5\n"]);
        assert_eq!(s.get("cache", "timeout").unwrap(), None);
    }

    #[test]
    fn interpolation_within_section() {
        let s = store(&["[paths]\nroot = /srv\nlogs = %(root)s/logs\n"]);
        assert_eq!(s.get("paths", "logs").unwrap().as_deref(), Some("/srv/logs"));
    }

    #[test]
    fn interpolation_from_defaults() {
        let s = store(&["[DEFAULT]\nroot = /srv\n[web]\nstatic = %(root)s/static\n"]);
        assert_eq!(s.get("web", "static").unwrap().as_deref(), Some("/srv/static"));
    }

    #[test]
    fn interpolation_is_recursive() {
        let s = store(&["[a]\nx = 1\ny = %(x)s2\nz = %(y)s3\n"]);
        assert_eq!(s.get("a", "z").unwrap().as_deref(), Some("123"));
    }

    #[test]
    fn interpolation_uses_overlaid_value() {
        let s = store(&["[a]\nbase = old\nfull = %(base)s/x\n", "[a]\nbase = new\n"]);
        assert_eq!(s.get("a", "full").unwrap().as_deref(), Some("new/x"));
    }

    #[test]
    fn double_percent_is_literal() {
        let s = store(&["[a]\nratio = 50%%\n"]);
        assert_eq!(s.get("a", "ratio").unwrap().as_deref(), Some("50%"));
    }

    #[test]
    fn lone_percent_is_error() {
        let s = store(&["[a]\nratio = 50%\n"]);
        assert!(matches!(
            s.get("a", "ratio"),
            Err(GetconfError::Interpolation { .. })
        ));
    }

    #[test]
    fn missing_reference_is_error() {
        let s = store(&["[a]\nx = %(nope)s\n"]);
        let err = s.get("a", "x").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn unterminated_reference_is_error() {
        let s = store(&["[a]\nx = %(y\ny = 1\n"]);
        assert!(s.get("a", "x").is_err());
    }

    #[test]
    fn self_reference_hits_depth_limit() {
        let s = store(&["[a]\nx = %(x)s\n"]);
        let err = s.get("a", "x").unwrap_err();
        assert!(err.to_string().contains("recursion limit"));
    }
}
