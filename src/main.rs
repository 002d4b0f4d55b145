//! Topic wheel desktop app.
//!
//! ```bash
//! # built-in topics
//! topic-wheel
//!
//! # topics from a file, reproducible spins
//! topic-wheel --topics topics.json --seed 7
//!
//! # spin from another process
//! printf 'spin\n' | topic-wheel
//! ```

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use topic_wheel::{fallback_topics, load_font, parse_command, topics, Palette, RngSource, WheelApp, WheelConfig};

/// Spin a wheel of impromptu speaking topics
#[derive(Parser, Debug)]
#[command(name = "topic-wheel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON topic file: {"topics": [...]} or a bare array
    #[arg(long)]
    topics: Option<PathBuf>,

    /// TrueType/OpenType font for labels, instead of the bundled DejaVu Sans
    #[arg(long)]
    font: Option<PathBuf>,

    /// Window size in logical pixels
    #[arg(long, default_value = "400")]
    size: u32,

    /// Seed for reproducible spins
    #[arg(long)]
    seed: Option<u64>,

    /// Sector colors, e.g. "#FFF2C6,#AAC4F5"
    #[arg(long)]
    palette: Option<String>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Logging verbosity when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("topic-wheel v{}", env!("CARGO_PKG_VERSION"));

    let items = match &cli.topics {
        Some(path) => topics::load(path)?,
        None => {
            debug!("no topic file given, using built-in topics");
            fallback_topics()
        }
    };

    let palette = cli.palette.as_deref().map(Palette::parse).transpose()?;
    let config = WheelConfig::builder()
        .canvas_size(cli.size.max(120))
        .maybe_title(cli.title)
        .maybe_palette(palette)
        .build();

    let mut app = WheelApp::new(config, items);
    if let Some(path) = &cli.font {
        app = app.with_font(load_font(path)?);
    }
    if let Some(seed) = cli.seed {
        app = app.with_rng(RngSource::seeded(seed));
    }

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                Ok(None) => warn!(%line, "unknown command"),
                Err(err) => warn!(%err, "ignoring command"),
            }
        }
        debug!("command pipe closed");
    });

    app.show_with_commands(receiver)?;
    Ok(())
}
