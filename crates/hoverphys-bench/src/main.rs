// Scenario bench: one hover vehicle on flat or heightfield ground, scripted
// input, optional lockstep determinism check and real-time pacer.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use hoverphys_bench::{Lockstep, ScenarioDescriptor, Sim, Telemetry};
use hoverphys_core::hex32;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "hover_bench", version, about = "Run a scripted hover-vehicle scenario and print telemetry")]
struct Opts {
    /// Scenario JSON (default: built-in straight / sweeper / brake run)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override tick count
    #[arg(long)]
    ticks: Option<u32>,

    /// Print telemetry every N ticks (0 = never)
    #[arg(long)]
    print_every: Option<u32>,

    /// Run a shadow sim and fail on the first hash mismatch
    #[arg(long, action = ArgAction::SetTrue)]
    lockstep: bool,

    /// Pace frames to wall clock at this rate (does not affect results)
    #[arg(long)]
    realtime_hz: Option<f32>,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

// ---------- tiny env helpers ----------
fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|s| s.parse::<u32>().ok())
}

fn print_line(t: &Telemetry) {
    let s = &t.state;
    let f = s.forward();
    println!(
        "tick {:5}  |v|={:6.2}  n={:.2}  yaw={:7.2}  w={:+7.2}  y={:5.2}  {:?}{}",
        t.tick,
        s.horizontal_speed(),
        t.normalized_speed,
        f.x.atan2(f.z).to_degrees(),
        s.angular_velocity_yaw,
        s.position.y,
        t.report.regime,
        if t.report.clamped { "  [clamp]" } else { "" },
    );
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let level: Level = opts.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")?;

    let mut scenario = match &opts.scenario {
        Some(p) => ScenarioDescriptor::from_path(p)?,
        None => ScenarioDescriptor::default(),
    };
    if let Some(t) = opts.ticks.or_else(|| env_u32("HOVER_TICKS")) {
        scenario.ticks = t;
    }
    scenario.validate().context("scenario")?;
    let print_every = opts.print_every.or_else(|| env_u32("HOVER_PRINT_EVERY")).unwrap_or(25);

    info!(ticks = scenario.ticks, dt = scenario.dt, lockstep = opts.lockstep, "starting scenario");

    // Optional wall-clock pacing (does not affect determinism)
    let mut pacer = opts.realtime_hz.filter(|hz| *hz > 0.0).map(|hz| (Instant::now(), Duration::from_secs_f32(1.0 / hz)));
    let mut pace = move || {
        if let Some((ref mut last, frame)) = pacer {
            let now = Instant::now();
            let next = *last + frame;
            if now < next { std::thread::sleep(next - now); }
            *last = Instant::now();
        }
    };
    let emit = |ts: &[Telemetry]| {
        for t in ts {
            if print_every != 0 && t.tick % print_every as u64 == 0 { print_line(t); }
        }
    };

    let final_hash = if opts.lockstep {
        let mut ls = Lockstep::new(scenario);
        while !ls.done() {
            let ts = ls.step_frame()?;
            emit(&ts);
            pace();
        }
        info!(equal_ticks = ls.equal_ticks(), "lockstep passed");
        ls.active.step_hash()
    } else {
        let mut sim = Sim::new(scenario);
        while !sim.done() {
            let ts = sim.step_frame();
            emit(&ts);
            pace();
        }
        sim.step_hash()
    };

    println!("final hash = {}", hex32(final_hash));
    Ok(())
}
