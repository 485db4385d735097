//! Layered configuration lookup for applications that read settings from
//! environment variables, INI files and built-in defaults.
//!
//! ```ignore
//! let config = Resolver::new("blusers", ["/etc/blusers/settings.ini"], None)?;
//! let server = config.getstr("psql.server", Some("localhost:5432"), "PostgreSQL server")?;
//! ```
//!
//! That call looks at, in order:
//!
//! 1. the environment variable `BLUSERS_PSQL_SERVER`;
//! 2. key `server` in section `[psql]` of the file named by `BLUSERS_CONFIG`,
//!    if set;
//! 3. key `server` in section `[psql]` of `/etc/blusers/settings.ini`;
//! 4. entry `server` of section `psql` in the default table;
//! 5. the default passed to the call.
//!
//! The first source that has the key wins. There is no merging of values
//! across sources.
//!
//! # Keys and environment variables
//!
//! A key is `section.entry` or a bare `entry`. Only the first dot splits, so
//! `a.b.c` is entry `b.c` in section `a`.
//!
//! | Key | Env var | File location | Default table |
//! |-----|---------|---------------|---------------|
//! | `psql.server` | `NS_PSQL_SERVER` | `[psql] server` | `psql` → `server` |
//! | `secret_key` | `NS_SECRET_KEY` | `[DEFAULT] secret_key` | `""` → `secret_key` |
//!
//! Each component of the env var name is uppercased on its own. A set
//! variable wins even when it is empty.
//!
//! Note the last column: bare keys are read from the `[DEFAULT]` section of
//! config files but from the `""` section of the default table.
//!
//! # Config file discovery
//!
//! Candidate paths are given in **priority-ascending** order. Each one may be
//! a file, a directory (meaning every file in it) or a glob pattern, and may
//! start with `~`. Matches within one candidate are sorted by name, so a
//! `conf.d/` style directory layers `10-base.ini` under `99-local.ini`.
//! `{NAMESPACE}_CONFIG`, when set, is appended as the highest-priority
//! candidate.
//!
//! Candidates that match nothing are skipped. A file that fails to parse
//! aborts construction. See the [`ini`] module for the accepted syntax.
//!
//! # Typed accessors
//!
//! [`getstr`](Resolver::getstr), [`getlist`](Resolver::getlist),
//! [`getbool`](Resolver::getbool), [`getint`](Resolver::getint) and
//! [`getfloat`](Resolver::getfloat) all take `(key, default, doc)` and
//! return `Ok(None)` only when nothing is configured and the default is
//! `None`. Malformed numbers are errors, never a silent fallback.
//!
//! # Introspection
//!
//! Every key that is looked up is recorded along with its env var and doc
//! string. [`Resolver::list_keys`] returns them sorted, which is useful for
//! generating documentation of the settings an application actually reads.
//! With the `clap` feature, [`ConfigArgs`] adds `config files|keys|get`
//! subcommands backed by [`Resolver::handle`].
//!
//! # Logging
//!
//! Events are emitted through [`tracing`]. Nothing is printed unless the
//! application installs a subscriber.

pub mod error;
pub mod ini;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod coerce;
mod defaults;
mod env;
mod file;
mod ops;
mod resolver;
mod section;
mod source;
mod store;

#[cfg(test)]
mod fixtures;

pub use builder::ResolverBuilder;
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use defaults::Defaults;
pub use env::{Environment, ProcessEnv};
pub use error::GetconfError;
pub use ops::ConfigResult;
pub use resolver::{LIST_SEPARATOR, ListDefault, Resolver};
pub use section::SectionView;
pub use types::{ConfigAction, ConfigKey, DEFAULT_SECTION};
