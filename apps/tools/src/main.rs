use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use packer_core::{Action, AppState, Store};
use tracing::{info, warn};

mod config;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "packer-tools", about = "Replay packer actions and export plugin artifacts")]
struct Cli {
    /// Settings file; defaults to ./packer.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the state before any action is applied.
    InitialState,
    /// Fold a JSON array of actions into a state and print it.
    Replay {
        #[arg(long)]
        actions: PathBuf,
        /// Starting state; fields left out take their defaults.
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Replay actions, then write the produced zip and key files.
    Export {
        #[arg(long)]
        actions: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::InitialState => {
            println!("{}", render_state(&AppState::default(), &settings)?);
        }
        Command::Replay { actions, state } => {
            let initial = match state {
                Some(path) => load_state(&path)?,
                None => AppState::default(),
            };
            let state = replay(initial, load_actions(&actions)?);
            println!("{}", render_state(&state, &settings)?);
        }
        Command::Export { actions, out_dir } => {
            let state = replay(AppState::default(), load_actions(&actions)?);
            for path in export_artifacts(&state, &out_dir)? {
                println!("wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn load_actions(path: &Path) -> Result<Vec<Action>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read actions file '{}'", path.display()))?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("'{}' is not a JSON array of actions", path.display()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Action::from_json_value(record)
                .with_context(|| format!("invalid action at index {index} in '{}'", path.display()))
        })
        .collect()
}

fn load_state(path: &Path) -> Result<AppState> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse state file '{}'", path.display()))
}

fn replay(initial: AppState, actions: Vec<Action>) -> AppState {
    let mut store = Store::new(initial);
    store.dispatch_all(actions);
    info!(dispatched = store.dispatched(), "replayed actions");
    store.into_state()
}

fn render_state(state: &AppState, settings: &Settings) -> Result<String> {
    let rendered = if settings.pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    Ok(rendered)
}

/// Writes the zip and key as `<id>.zip` and `<id>.ppk` inside `out_dir`.
fn export_artifacts(state: &AppState, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let (Some(contents), Some(ppk)) = (&state.plugin.url.contents, &state.plugin.url.ppk) else {
        match &state.error {
            Some(error) => bail!("no plugin artifacts were produced; last error: {error}"),
            None => bail!("no plugin artifacts were produced"),
        }
    };
    if state.loading {
        warn!("exporting while a build is still marked as loading");
    }

    // The key download is named after the plugin id, never after `state.ppk`,
    // which a later UPLOAD_PPK may have replaced.
    let stem = state.plugin.id.as_deref().unwrap_or("plugin");
    let zip_name = format!("{stem}.zip");
    let ppk_name = format!("{stem}.ppk");
    let targets = [
        (artifact_file_name(&zip_name)?, contents),
        (artifact_file_name(&ppk_name)?, ppk),
    ];

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory '{}'", out_dir.display()))?;

    let mut written = Vec::with_capacity(targets.len());
    for (name, blob) in targets {
        let path = out_dir.join(name);
        fs::write(&path, blob.as_bytes())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), media_type = %blob.media_type(), size = blob.len(), "exported artifact");
        written.push(path);
    }

    Ok(written)
}

/// Accepts a bare file name only, so a join onto the output directory stays
/// inside it.
fn artifact_file_name(raw: &str) -> Result<&str> {
    match Path::new(raw).file_name().and_then(|name| name.to_str()) {
        Some(name) if name == raw => Ok(name),
        _ => bail!("refusing to export artifact under unsafe file name '{raw}'"),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
