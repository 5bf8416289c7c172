//! Headless arena runner for the tank steering controller.

use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use tank_ai::scenario::Scenario;
use tank_ai::{init_logging, AgentKinematics, SteeringAgent};

/// Runs AI tanks through an arena scenario without rendering
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Number of simulation ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u32,
    /// JSON scenario file; the built-in arena is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::demo().context("building the demo arena")?,
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(scenario.plugin());
    let tanks = scenario.populate(app.world_mut());

    for _ in 0..args.ticks {
        app.update();
    }

    for tank in tanks {
        let world = app.world();
        if let (Some(kinematics), Some(agent)) = (
            world.get::<AgentKinematics>(tank),
            world.get::<SteeringAgent>(tank),
        ) {
            info!(
                "tank {tank:?} at {:?} facing {:.0} deg, speed {:.1}, {:?}, next node {}",
                kinematics.position,
                kinematics.rotation,
                kinematics.speed,
                agent.behaviour(),
                agent.next_waypoint()
            );
        }
    }
    Ok(())
}
