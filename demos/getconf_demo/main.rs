//! # getconf demo application
//!
//! A sample CLI that reads its settings through [`getconf::Resolver`]. It
//! exists to exercise the crate by hand, not to do anything useful.
//!
//! ```sh
//! cargo run --example getconf_demo -- show
//! GETCONF_DEMO_SERVER_PORT=9999 cargo run --example getconf_demo -- show
//! GETCONF_DEMO_CONFIG=./demo.ini cargo run --example getconf_demo -- config files
//! cargo run --example getconf_demo -- config get server.port
//! ```
//!
//! Files are read from `/etc/getconf-demo/settings.ini`, then
//! `~/.config/getconf-demo/conf.d/`, then `./getconf-demo.ini`.

use clap::{Parser, Subcommand};

use getconf::{ConfigArgs, Defaults, GetconfError, ListDefault, Resolver};

#[derive(Parser, Debug)]
#[command(name = "getconf-demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved settings.
    Show,
    /// Inspect configuration files and keys.
    Config(ConfigArgs),
}

fn make_resolver() -> Result<Resolver, GetconfError> {
    Resolver::builder("getconf_demo")
        .search_paths([
            "/etc/getconf-demo/settings.ini",
            "~/.config/getconf-demo/conf.d/",
            "./getconf-demo.ini",
        ])
        .defaults(
            Defaults::new()
                .with("server", "host", "127.0.0.1")
                .with("server", "port", 8080i64)
                .with_key("debug", false),
        )
        .build()
}

#[derive(Debug)]
struct Settings {
    host: String,
    port: i64,
    debug: bool,
    ratio: f64,
    tags: Vec<String>,
}

/// Read every setting once; this also records them for `config keys`.
fn read_settings(config: &Resolver) -> Result<Settings, GetconfError> {
    Ok(Settings {
        host: config
            .getstr("server.host", None, "Address to bind")?
            .unwrap_or_default(),
        port: config
            .getint("server.port", None, "Port to bind")?
            .unwrap_or_default(),
        debug: config
            .getbool("debug", Some(false), "Verbose output")?
            .unwrap_or_default(),
        ratio: config
            .getfloat("cache.ratio", Some(0.5), "Cache fill ratio")?
            .unwrap_or_default(),
        tags: config
            .getlist(
                "server.tags",
                Some(ListDefault::from(["web", "demo"])),
                "Comma-separated labels",
            )?
            .unwrap_or_default(),
    })
}

fn run(cli: Cli) -> Result<(), GetconfError> {
    let config = make_resolver()?;
    let settings = read_settings(&config)?;
    match cli.command {
        Commands::Show => {
            println!("server.host = {}", settings.host);
            println!("server.port = {}", settings.port);
            println!("debug       = {}", settings.debug);
            println!("cache.ratio = {}", settings.ratio);
            println!("server.tags = {}", settings.tags.join(", "));
            Ok(())
        }
        Commands::Config(args) => config.handle_and_print(&args.into_action()),
    }
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
