#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use crate::{Defaults, Resolver};

    /// Synthetic environment from `(name, value)` pairs.
    pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Write `content` to `dir/name` and return the full path.
    pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Resolver for namespace `app` that searches every file in `dir`.
    pub fn resolver_in(dir: &Path, env_pairs: &[(&str, &str)], defaults: Defaults) -> Resolver {
        Resolver::builder("app")
            .search_paths([dir])
            .defaults(defaults)
            .env(env(env_pairs))
            .build()
            .unwrap()
    }

    #[test]
    fn resolver_in_reads_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        write(dir.path(), "a.ini", "[x]\nk = v\n");
        let r = resolver_in(dir.path(), &[], Defaults::new());
        assert_eq!(r.files().len(), 1);
    }
}
