//! Skyward headless runner
//!
//! Drives the simulation with a scripted pilot on a synthetic clock and
//! prints the final world as JSON.

use clap::{Parser, ValueEnum};

use skyward::sim::{TickInput, World, tick};
use skyward::{CameraRig, SimConfig};

/// Scripted pilot behaviours
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Script {
    /// No input at all
    Idle,
    /// Accelerate and fly straight
    Cruise,
    /// Accelerate while turning left and climbing
    Spiral,
}

impl Script {
    fn input(self, tick_index: u64) -> TickInput {
        match self {
            Script::Idle => TickInput::default(),
            Script::Cruise => TickInput {
                move_forward: tick_index < 10,
                ..Default::default()
            },
            Script::Spiral => TickInput {
                move_forward: tick_index < 10,
                turn_left: true,
                ascend: tick_index % 40 == 0,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "skyward", about = "Run the scene simulation headless")]
struct Args {
    /// JSON config file (defaults are used when missing or invalid)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Pilot script
    #[arg(long, value_enum, default_value_t = Script::Spiral)]
    script: Script,
    /// Cycle the camera every N ticks (0 keeps the top view)
    #[arg(long, default_value_t = 0)]
    camera_every: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load_or_default(path),
        None => SimConfig::default(),
    };
    let period = config.tick_period_ms as f32 / 1000.0;
    log::info!(
        "Skyward starting: {} ticks of {:.0} ms, script {:?}",
        args.ticks,
        period * 1000.0,
        args.script
    );

    let mut world = World::new(config);
    let mut camera = CameraRig::new();
    let mut was_game_over = false;

    for i in 0..args.ticks {
        let now = (i + 1) as f32 * period;
        tick(&mut world, &args.script.input(i), now);

        if args.camera_every > 0 && (i + 1) % args.camera_every == 0 {
            camera.cycle(now);
        }
        if world.is_game_over() && !was_game_over {
            log::warn!("Game over after {} ticks (t={now:.2}s)", i + 1);
            was_game_over = true;
        }
    }

    let destroyed: Vec<&str> = world
        .entities()
        .iter()
        .filter(|e| e.destroyed)
        .map(|e| e.name.as_str())
        .collect();
    log::info!(
        "Finished at t={:.2}s: destroyed {:?}, {} explosion(s) active, camera {}",
        world.elapsed_time,
        destroyed,
        world.explosions().len(),
        camera.mode.as_str()
    );

    let pose = camera.pose(&world, world.elapsed_time);
    log::debug!("Camera eye {} looking at {}", pose.eye, pose.center);

    match serde_json::to_string_pretty(&world) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize world: {e}"),
    }
}
