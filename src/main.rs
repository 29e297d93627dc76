use std::path::PathBuf;

use anyhow::Result;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::{Parser, Subcommand};

use script_host::core::config::{DEFAULT_CONFIG_PATH, LOCAL_CONFIG_PATH};
use script_host::scripting::{spawn_by_name, IncrementValue, RenderRequest, ScriptCatalog};
use script_host::{headless_app, HostConfig, NumericEntity};

#[derive(Parser, Debug)]
#[command(about = "Discover, construct and drive reflected script types", version)]
struct Cli {
    /// Config file(s), merged in order. Defaults to the base file plus the local overlay.
    #[arg(long = "config", global = true)]
    config: Vec<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every script type as `<namespace>.<Type>`.
    List,
    /// Spawn a NumericEntity, apply increments, render it.
    Run {
        #[arg(long = "increment", allow_hyphen_values = true)]
        increments: Vec<f32>,
        /// Extra script types to construct by name.
        #[arg(long = "spawn")]
        spawn: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = if cli.config.is_empty() {
        vec![PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from(LOCAL_CONFIG_PATH)]
    } else {
        cli.config.clone()
    };
    let (cfg, used, errors) = HostConfig::load_layered(&paths);

    let mut app = match cli.command {
        // listing goes to stdout; skip the startup log of the same lines
        Command::List => headless_app(HostConfig {
            list_types_on_startup: false,
            ..cfg.clone()
        }),
        Command::Run { .. } => headless_app(cfg.clone()),
    };
    // LogPlugin writes to stderr; stdout carries only rendered values and listings.
    app.add_plugins(LogPlugin {
        filter: cfg.log_filter.clone(),
        ..default()
    });

    for p in &used {
        info!(target: "config", "loaded {p}");
    }
    for e in &errors {
        warn!(target: "config", "{e}");
    }

    // Startup schedule: type listing, startup scripts.
    app.update();

    match cli.command {
        Command::List => {
            let catalog = app.world().resource::<ScriptCatalog>();
            for line in catalog.qualified(&cfg.script_namespace) {
                println!("{line}");
            }
        }
        Command::Run { increments, spawn } => {
            let target = app.world_mut().spawn(NumericEntity::default()).id();
            for delta in increments {
                app.world_mut().send_event(IncrementValue { target, delta });
            }
            app.world_mut().send_event(RenderRequest { target });
            app.update();

            for name in spawn {
                let entity = spawn_by_name(app.world_mut(), &name)?;
                info!(target: "scripting", "constructed {name} as {entity:?}");
            }
        }
    }
    Ok(())
}
