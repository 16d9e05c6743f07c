use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bouncing_tracer::config::Config;
use bouncing_tracer::driver::{self, present_frames};
use bouncing_tracer::{CancellationToken, RenderSession, Scene, Strategy};

mod display;

use display::HeadlessDisplay;

#[derive(Parser)]
#[command(name = "bouncing_tracer")]
#[command(about = "Real-time ray tracer of a bouncing sphere")]
struct Args {
    /// TOML file with render settings; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Keep the full width x height instead of the largest square that fits
    #[arg(long)]
    rectangular: bool,

    /// sequential, parallel or parallel-show-threads
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Tint pixels by the worker thread that rendered them
    #[arg(long)]
    show_threads: bool,

    /// Worker threads for the parallel strategies
    #[arg(short, long)]
    threads: Option<usize>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    seconds: Option<f64>,

    /// Open a preview window instead of rendering headless (needs the `preview` feature)
    #[arg(short, long)]
    window: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.rectangular {
            config.square = false;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if self.show_threads {
            match config.strategy {
                Strategy::Parallel | Strategy::ParallelShowThreads => config.strategy = Strategy::ParallelShowThreads,
                Strategy::Sequential => bail!("--show-threads needs a parallel strategy, not sequential"),
            }
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if self.frames.is_some() {
            config.max_frames = self.frames;
        }
        if self.seconds.is_some() {
            config.duration_secs = self.seconds;
        }
        Ok(())
    }
}

fn init_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_thread_names(true).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);

    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    args.apply(&mut config)?;

    let (width, height) = config.image_size();
    let session = RenderSession::new(width, height).context("configuring image")?;
    let settings = config.loop_settings();
    let cancel = CancellationToken::new();

    if args.window && cfg!(not(feature = "preview")) {
        bail!("this build has no preview window, rebuild with --features preview");
    }
    #[cfg(feature = "preview")]
    let mut window = if args.window { Some(display::WindowDisplay::new(width, height)?) } else { None };

    let (render_loop, frames) = driver::spawn(session, Scene::bouncing_spheres(), settings, cancel.clone())?;

    #[cfg(feature = "preview")]
    let shown = match window.as_mut() {
        Some(window) => present_frames(&frames, window, &cancel),
        None => present_frames(&frames, &mut HeadlessDisplay::new(), &cancel),
    };
    #[cfg(not(feature = "preview"))]
    let shown = present_frames(&frames, &mut HeadlessDisplay::new(), &cancel);

    let summary = render_loop.join().map_err(|_| anyhow!("render loop panicked"))??;
    info!(
        frames = summary.frames,
        shown,
        average_fps = %format!("{:.1}", summary.average_fps()),
        seconds = summary.wall_time.as_secs_f64(),
        cancelled = summary.cancelled,
        "session finished"
    );
    Ok(())
}
