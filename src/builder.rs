use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::defaults::Defaults;
use crate::env::{Environment, ProcessEnv, env_key};
use crate::error::GetconfError;
use crate::file;
use crate::ini;
use crate::resolver::Resolver;
use crate::source::{DefaultsSource, EnvSource, FileSource, Source};
use crate::store::ParsedStore;

/// Builder for a [`Resolver`].
///
/// ```ignore
/// let config = Resolver::builder("blusers")
///     .search_paths(["/etc/blusers/settings.ini", "~/.blusers.ini"])
///     .defaults(Defaults::new().with("psql", "server", "localhost:5432"))
///     .build()?;
/// ```
pub struct ResolverBuilder {
    namespace: String,
    search_paths: Vec<PathBuf>,
    defaults: Defaults,
    env: Arc<dyn Environment>,
}

impl ResolverBuilder {
    pub(crate) fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            search_paths: Vec::new(),
            defaults: Defaults::new(),
            env: Arc::new(ProcessEnv),
        }
    }

    /// Replace the candidate paths.
    ///
    /// Paths are listed in **priority-ascending** order: files found through
    /// later entries override files found through earlier ones. Each entry may
    /// be a file, a directory (every file inside), or a glob pattern; a
    /// leading `~` is expanded.
    pub fn search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Append one candidate path (highest priority so far).
    pub fn add_search_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Set the in-process default table (lowest-priority source).
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Read environment variables from `env` instead of the process
    /// environment. Applies to `{NAMESPACE}_CONFIG` and to every lookup.
    pub fn env<E: Environment + 'static>(mut self, env: E) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Validate the namespace: it must contain something besides whitespace.
    fn effective_namespace(&self) -> Result<&str, GetconfError> {
        if self.namespace.trim().is_empty() {
            return Err(GetconfError::NamespaceRequired);
        }
        Ok(&self.namespace)
    }

    /// The candidate list, with `{NAMESPACE}_CONFIG` appended last when set
    /// and non-empty.
    fn effective_search_paths(&self, namespace: &str) -> Vec<PathBuf> {
        let mut paths = self.search_paths.clone();
        if let Some(extra) = self.env.var(&env_key(namespace, "", "config"))
            && !extra.is_empty()
        {
            paths.push(PathBuf::from(extra));
        }
        paths
    }

    /// Discover, read and parse every config file, then assemble the chain.
    pub fn build(self) -> Result<Resolver, GetconfError> {
        let namespace = self.effective_namespace()?.to_string();
        let search_patterns: Vec<String> = self
            .effective_search_paths(&namespace)
            .iter()
            .map(|p| file::candidate_pattern(p))
            .collect();

        let discovered = file::discover(&search_patterns);
        let mut store = ParsedStore::new();
        let mut files = Vec::new();
        for (path, content) in file::load_config_files(&discovered)? {
            store.overlay(ini::parse(&path, &content)?);
            files.push(path);
        }

        info!(
            namespace = %namespace,
            files = ?files,
            search = ?search_patterns,
            "loaded configuration"
        );

        let mut sources: Vec<Box<dyn Source>> = vec![
            Box::new(EnvSource::new(self.env)),
            Box::new(FileSource::new(store)),
        ];
        if !self.defaults.is_empty() {
            sources.push(Box::new(DefaultsSource::new(self.defaults)));
        }

        Ok(Resolver::from_parts(namespace, search_patterns, files, sources))
    }
}
