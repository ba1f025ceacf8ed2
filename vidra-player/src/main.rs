//! Headless harness: mounts a controller over the simulated backend and
//! drives it from line commands on stdin, printing a JSON snapshot after
//! each one.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use log::{LevelFilter, info, warn};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use vidra_config::{ConfigSource, ControllerConfig};
use vidra_model::PlayerOptions;
use vidra_player::sim::{
    DEFAULT_SIM_DURATION, SimCommand, SimulatedBackend, parse_source,
};
use vidra_player::{Message, PlaybackController, TokioScheduler};

type SimController = PlaybackController<SimulatedBackend, TokioScheduler>;

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "vidra-sim")]
#[command(about = "Drive a Vidra playback controller from the terminal")]
struct Cli {
    /// Quality variant as LABEL=URL[@FORMAT]; repeat for each variant, best
    /// first
    #[arg(long = "source", value_name = "LABEL=URL[@FORMAT]", required = true)]
    sources: Vec<String>,

    /// Start playing as soon as metadata loads
    #[arg(long, default_value_t = false)]
    autoplay: bool,

    /// Restart from the beginning when playback ends
    #[arg(long = "loop", default_value_t = false)]
    loop_playback: bool,

    /// Accessible title for the player
    #[arg(long)]
    title: Option<String>,

    /// Poster image URL
    #[arg(long)]
    poster: Option<String>,

    /// Controller tuning file (TOML or JSON); overrides env discovery
    #[arg(long)]
    config: Option<PathBuf>,

    /// Duration in seconds reported for every simulated source
    #[arg(long, default_value_t = DEFAULT_SIM_DURATION)]
    duration: f64,
}

fn init_logger() {
    // Stdout carries snapshots; keep logs off it.
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("vidra_player", LevelFilter::Debug)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let options = player_options(&cli);

    let sources = cli
        .sources
        .iter()
        .map(|raw| parse_source(raw))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --source")?;

    let (scheduler, mut fired) = TokioScheduler::new(Handle::current());
    let mut player = PlaybackController::mount(
        SimulatedBackend::new(cli.duration),
        scheduler,
        sources,
        options,
        config,
    )?
    .on_ended(|| info!("[Sim] Playback finished"));

    pump(&mut player);
    print_snapshot(&player)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match SimCommand::parse(&line) {
                    Ok(SimCommand::Quit) => break,
                    Ok(command) => {
                        run_command(&mut player, &command);
                        print_snapshot(&player)?;
                    }
                    Err(err) => warn!("[Sim] {}", err),
                }
            }
            Some(id) = fired.recv() => {
                player.update(Message::Timer(id));
                pump(&mut player);
                print_snapshot(&player)?;
            }
        }
    }

    player.unmount();
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ControllerConfig> {
    let (config, source) = match &cli.config {
        Some(path) => (
            ControllerConfig::load_from_file(path)?,
            ConfigSource::File(path.clone()),
        ),
        None => ControllerConfig::load_from_env()?,
    };
    info!("[Sim] Controller config from {}", source);
    Ok(config)
}

fn player_options(cli: &Cli) -> PlayerOptions {
    let mut options = PlayerOptions::default()
        .autoplay(cli.autoplay)
        .looping(cli.loop_playback);
    if let Some(title) = &cli.title {
        options = options.with_title(title.clone());
    }
    if let Some(poster) = &cli.poster {
        options = options.with_poster(poster.clone());
    }
    options
}

fn run_command(player: &mut SimController, command: &SimCommand) {
    match command {
        SimCommand::Tick(seconds) => player.backend_mut().tick(*seconds),
        SimCommand::State => {}
        other => {
            if let Some(message) = other.to_message() {
                player.update(message);
            }
        }
    }
    pump(player);
}

/// Feed queued backend notifications back until the backend goes quiet.
fn pump(player: &mut SimController) {
    loop {
        let notifications = player.backend_mut().drain();
        if notifications.is_empty() {
            break;
        }
        for message in notifications {
            player.update(message);
        }
    }
}

fn print_snapshot(player: &SimController) -> anyhow::Result<()> {
    let snapshot = player.snapshot();
    let line = json!({
        "label": player.accessible_label(),
        "clock": snapshot.clock(),
        "quality_menu_available": snapshot.quality_menu_available(),
        "snapshot": snapshot,
    });
    println!(
        "{}",
        serde_json::to_string(&line).context("failed to encode snapshot")?
    );
    Ok(())
}
