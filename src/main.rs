use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use swipe_cards::demo::{self, Script};
use swipe_cards::Options;
use swipe_cards_config::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Replays a swipe over a headless card stack and reports how it resolved.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of cards in the stack.
    #[arg(long, default_value_t = 3)]
    cards: usize,
    /// Index of the card to drag, 0 being the front-most.
    #[arg(long, default_value_t = 0)]
    card: usize,
    #[arg(long, default_value_t = 300.)]
    width: f64,
    #[arg(long, default_value_t = 400.)]
    height: f64,
    /// Horizontal drag distance, negative to swipe left.
    #[arg(long, default_value_t = 150., allow_negative_numbers = true)]
    drag: f64,
    /// Number of move events the drag is split into.
    #[arg(long, default_value_t = 8)]
    steps: usize,
    /// Use touch events instead of pointer events.
    #[arg(long)]
    touch: bool,
    /// Give up after this many frames.
    #[arg(long, default_value_t = 600)]
    max_frames: usize,
    /// Milliseconds of wall time between frames.
    #[arg(long, default_value_t = 16)]
    frame_interval_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "swipe_cards=debug".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|err| anyhow!("{err:?}"))?,
        None => Config::default(),
    };

    let script = Script {
        cards: cli.cards,
        card: cli.card,
        width: cli.width,
        height: cli.height,
        drag: cli.drag,
        steps: cli.steps,
        touch: cli.touch,
        max_frames: cli.max_frames,
        frame_interval: Duration::from_millis(cli.frame_interval_ms),
        ..Script::default()
    };

    let report = demo::run(script, Options::from_config(&config))?;

    match report.target_x {
        Some(x) if x != 0. => info!("card {} dismissed toward {x}", cli.card),
        Some(_) => info!("card {} sprang back", cli.card),
        None => info!("card {} was never picked up", cli.card),
    }

    if report.settled {
        info!(
            "stack at rest after {} frames, {} cards left",
            report.frames,
            cli.cards - report.detached.len()
        );
    } else {
        warn!(
            "stack still {:?} after {} frames; dismissing the last card leaves the session open",
            report.state, report.frames
        );
    }

    Ok(())
}
