/*
 * 3D Boid Flocking Simulation
 *
 * Boids move inside a cube under cohesion, separation, velocity matching,
 * attraction to a few leaders and an optional pull toward anchor points
 * that form a shape. By default the flock is shown in a nannou window with
 * live egui sliders; `--headless` runs a fixed number of ticks and logs
 * flock statistics instead.
 *
 * Logging is controlled with RUST_LOG, e.g. `RUST_LOG=boids3d=debug`.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use nannou::prelude::Vec3;
use tracing::info;

use boids3d::app::{self, Launch};
use boids3d::{AnchorSet, RunConfig, Simulation, SimulationParams};

#[derive(Debug, Parser)]
#[command(name = "boids3d", about = "3D boid flocking simulation")]
struct Cli {
    /// JSON run configuration (rule parameters and spawn settings)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with anchor points as [[x, y, z], ...]
    #[arg(long)]
    anchors: Option<PathBuf>,

    /// Use anchor coordinates as given instead of fitting them to the spawn cube
    #[arg(long)]
    raw_anchors: bool,

    /// Number of boids
    #[arg(short = 'n', long)]
    boids: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of leaders, random in 1..=5 when omitted
    #[arg(long)]
    leaders: Option<usize>,

    /// Run without a window and log statistics
    #[arg(long)]
    headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Fixed simulation rate in ticks per second; one tick per frame when omitted
    #[arg(long)]
    tick_rate: Option<f32>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };
    if let Some(boids) = cli.boids {
        config.spawn.population = boids;
    }
    if let Some(seed) = cli.seed {
        config.spawn.seed = seed;
    }
    if cli.leaders.is_some() {
        config.spawn.leader_count = cli.leaders;
    }
    config.params = config.params.clamped();

    let anchors = match &cli.anchors {
        Some(path) => load_anchors(path, cli.raw_anchors)?,
        None => AnchorSet::default(),
    };

    let simulation = Simulation::spawn(&config.spawn, anchors.clone())
        .context("failed to spawn the flock")?;
    info!(
        boids = simulation.flock().len(),
        leaders = ?simulation.flock().leaders(),
        anchors = anchors.len(),
        seed = config.spawn.seed,
        "flock ready"
    );

    if cli.headless {
        run_headless(simulation, &config.params, cli.ticks);
        return Ok(());
    }

    app::run(Launch {
        params: config.params,
        spawn: config.spawn,
        anchors,
        simulation,
        tick_rate: cli.tick_rate,
    });
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn load_config(path: &Path) -> Result<RunConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    RunConfig::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn load_anchors(path: &Path, raw: bool) -> Result<AnchorSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read anchors {}", path.display()))?;
    let arrays: Vec<[f32; 3]> = serde_json::from_str(&text)
        .with_context(|| format!("invalid anchor file {}", path.display()))?;
    let anchors = if raw {
        AnchorSet::from_arrays(&arrays)?
    } else {
        AnchorSet::normalized(arrays.into_iter().map(Vec3::from).collect())?
    };
    Ok(anchors)
}

fn run_headless(mut simulation: Simulation, params: &SimulationParams, ticks: u64) {
    let report_every = (ticks / 10).max(1);
    let started = Instant::now();
    for _ in 0..ticks {
        simulation.tick(params);
        if simulation.tick_count() % report_every == 0 {
            log_stats(&simulation);
        }
    }
    if ticks % report_every != 0 {
        log_stats(&simulation);
    }
    info!(ticks, elapsed = ?started.elapsed(), "headless run finished");
}

fn log_stats(simulation: &Simulation) {
    let stats = simulation.stats();
    info!(
        tick = stats.tick,
        mean_speed = stats.mean_speed,
        max_speed = stats.max_speed,
        outside_box = stats.outside_box,
        centroid = ?stats.centroid,
        "flock stats"
    );
}
