#[macro_use]
extern crate tracing;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use directories::ProjectDirs;
use lightbox::cli::{Cli, Sub};
use lightbox::replay::{replay, Script};
use lightbox::utils::version;
use lightbox_config::Config;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "lightbox=debug,lightbox_config=debug";

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    tracy_client::Client::start();

    match cli.subcommand {
        Sub::Validate => {
            let path = config_path(cli.config)
                .context("no config file given and no default config location")?;
            Config::load(&path)?;
            info!("config is valid");
        }
        Sub::Replay { script, json } => {
            info!("lightbox {}", version());

            let config = load_config(cli.config)?;
            let script = Script::load(&script)?;
            let replay = replay(config, &script);

            let mut stdout = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &replay)
                    .context("error writing replay")?;
                writeln!(stdout)?;
            } else {
                for step in &replay.steps {
                    for ev in &step.host_events {
                        writeln!(stdout, "{:>6} ms  {ev:?}", step.time_ms)?;
                    }
                    if let Some(action) = &step.release {
                        writeln!(stdout, "{:>6} ms  release: {action:?}", step.time_ms)?;
                    }
                }
                writeln!(stdout, "final state: {:?}", replay.state)?;
            }
        }
        Sub::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "lightbox", &mut io::stdout());
        }
    }

    Ok(())
}

/// Loads the config, falling back to the defaults when there is no config file.
fn load_config(cli_path: Option<PathBuf>) -> anyhow::Result<Config> {
    let explicit = cli_path.is_some() || env_config_path().is_some();
    match config_path(cli_path) {
        Some(path) if explicit || path.exists() => Config::load(&path),
        _ => {
            debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn env_config_path() -> Option<PathBuf> {
    env::var_os("LIGHTBOX_CONFIG").map(PathBuf::from)
}

fn default_config_path() -> Option<PathBuf> {
    let Some(dirs) = ProjectDirs::from("", "", "lightbox") else {
        warn!("error retrieving home directory");
        return None;
    };

    let mut path = dirs.config_dir().to_owned();
    path.push("config.json");
    Some(path)
}

fn config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(env_config_path).or_else(default_config_path)
}
