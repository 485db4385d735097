use std::collections::HashMap;

/// Read access to environment variables.
///
/// The resolver reads through this trait so tests can pass synthetic data
/// instead of touching the process environment.
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The live process environment. Values that are not valid UTF-8 are
/// converted lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Build the environment variable name for `entry` in `section`.
///
/// `{NAMESPACE}_{SECTION}_{ENTRY}`, or `{NAMESPACE}_{ENTRY}` when the section
/// is empty. Each component is uppercased on its own before joining.
pub fn env_key(namespace: &str, section: &str, entry: &str) -> String {
    let parts: &[&str] = if section.is_empty() {
        &[namespace, entry]
    } else {
        &[namespace, section, entry]
    };
    parts
        .iter()
        .map(|p| p.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_key() {
        assert_eq!(env_key("myapp", "", "secret_key"), "MYAPP_SECRET_KEY");
    }

    #[test]
    fn sectioned_key() {
        assert_eq!(env_key("blusers", "psql", "server"), "BLUSERS_PSQL_SERVER");
    }

    #[test]
    fn dots_in_entry_are_kept() {
        assert_eq!(env_key("app", "a", "b.c"), "APP_A_B.C");
    }

    #[test]
    fn mixed_case_namespace_is_uppercased() {
        assert_eq!(env_key("MyApp", "Db", "Host"), "MYAPP_DB_HOST");
    }

    #[test]
    fn non_ascii_components_uppercase_per_component() {
        assert_eq!(env_key("app", "straße", "größe"), "APP_STRASSE_GRÖSSE");
    }

    #[test]
    fn synthetic_environment_lookup() {
        let env = HashMap::from([("APP_PORT".to_string(), "80".to_string())]);
        assert_eq!(env.var("APP_PORT").as_deref(), Some("80"));
        assert_eq!(env.var("APP_HOST"), None);
    }

    #[test]
    fn process_env_missing_var() {
        assert_eq!(ProcessEnv.var("GETCONF_TEST_SURELY_UNSET_VARIABLE"), None);
    }
}
