//! Clap adapter for getconf.
//!
//! This module is the **optional integration layer** between getconf's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`ConfigArgs`] can be embedded in your clap `#[derive(Subcommand)]` enum to
//! get `config files|keys|get` subcommands. The only bridge to the core is
//! [`ConfigArgs::into_action()`]; from there everything flows through
//! [`Resolver::handle()`](crate::Resolver::handle).

use clap::{Args, Subcommand};

use crate::types::ConfigAction;

/// Clap-derived args for the `config` subcommand group.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the searched locations and the config files that were loaded.
    Files,
    /// Show every configuration key the application has read.
    Keys,
    /// Show the resolved value and environment variable for a key.
    Get {
        /// Dotted key (e.g. "psql.server").
        key: String,
    },
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) maps to `ConfigAction::Keys`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::Keys) => ConfigAction::Keys,
            Some(ConfigSubcommand::Files) => ConfigAction::Files,
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
        }
    }
}
