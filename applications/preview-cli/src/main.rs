/// Preview Player CLI - play catalog previews against a simulated output
use anyhow::Context;
use clap::{Parser, Subcommand};
use preview_core::TrackId;
use preview_cli::{
    driver::{self, PlayOptions},
    load_playlist, CliConfig, SimulatedOutput, SimulatedSession,
};
use preview_playback::{EngineDependencies, PlaybackEngine, PlaybackState, PlayerEvent};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "preview-cli")]
#[command(about = "Preview Player command-line driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a playlist file
    Play {
        /// Catalog search response or JSON array of tracks
        playlist: PathBuf,
        /// Track ID to start with (default: first playable track)
        #[arg(short, long)]
        track: Option<TrackId>,
        /// Start with shuffle on
        #[arg(long)]
        shuffle: bool,
        /// Start with repeat on
        #[arg(long)]
        repeat: bool,
        /// Seek to this many seconds once the first track is playing
        #[arg(long)]
        start_at: Option<f64>,
        /// Configuration file path
        #[arg(short, long, env = "PREVIEW_CONFIG")]
        config: Option<PathBuf>,
    },
    /// List the tracks in a playlist file
    Inspect {
        /// Catalog search response or JSON array of tracks
        playlist: PathBuf,
        /// Print the decoded tracks as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "preview_playback=info,preview_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            playlist,
            track,
            shuffle,
            repeat,
            start_at,
            config,
        } => {
            let mut config = CliConfig::load(config.as_deref())?;
            config.engine.shuffle |= shuffle;
            config.engine.repeat |= repeat;

            let options = PlayOptions {
                track,
                start_at: start_at.map(driver::parse_start_at).transpose()?,
                ..PlayOptions::default()
            };
            play(&playlist, &config, &options)?;
        }
        Commands::Inspect { playlist, json } => {
            inspect(&playlist, json)?;
        }
    }

    Ok(())
}

fn play(path: &Path, config: &CliConfig, options: &PlayOptions) -> anyhow::Result<()> {
    let tracks = load_playlist(path)?;
    let output = SimulatedOutput::spawn(config.simulation.clone())
        .context("Failed to start simulated output")?;

    let deps = EngineDependencies::new(Box::new(output), Box::new(SimulatedSession::default()));
    let mut engine = PlaybackEngine::new(deps, config.engine.clone());
    if let Some(message) = engine.player_error() {
        eprintln!("warning: {message}");
    }

    let mut last_second = None;
    let state = driver::run(&mut engine, &tracks, options, |engine, event| {
        print_event(engine, event, &mut last_second);
    })?;

    if state == PlaybackState::Error {
        anyhow::bail!(
            "Playback failed: {}",
            engine.player_error().unwrap_or_default()
        );
    }
    Ok(())
}

fn print_event(engine: &PlaybackEngine, event: &PlayerEvent, last_second: &mut Option<u64>) {
    match event {
        PlayerEvent::TrackChanged { .. } => {
            *last_second = None;
            println!(
                "▶ {} - {} {}",
                engine.song_title(),
                engine.artist_name(),
                driver::track_position_label(engine)
            );
        }
        PlayerEvent::StateChanged { state } => println!("  state: {state:?}"),
        PlayerEvent::DurationChanged { .. } => {
            println!("  duration: {}", engine.formatted_duration());
        }
        PlayerEvent::PositionChanged { position_ms } => {
            let second = position_ms / 1000;
            if *last_second != Some(second) {
                *last_second = Some(second);
                println!(
                    "  {} / {}",
                    engine.formatted_current_time(),
                    engine.formatted_duration()
                );
            }
        }
        PlayerEvent::ShuffleChanged { enabled } => println!("  shuffle: {enabled}"),
        PlayerEvent::RepeatChanged { enabled } => println!("  repeat: {enabled}"),
        PlayerEvent::Error { message } => eprintln!("  error: {message}"),
    }
}

fn inspect(path: &Path, json: bool) -> anyhow::Result<()> {
    let tracks = load_playlist(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
        return Ok(());
    }

    println!("{} tracks", tracks.len());
    for track in &tracks {
        println!(
            "{:>3}  {:<40} {:<24} {}",
            track.track_number_label(),
            track.title,
            track.artist_name,
            if track.is_playable() { "playable" } else { "no preview" }
        );
    }
    Ok(())
}
