//! Arena scenarios for the headless runner.
//!
//! A scenario lists the player position, the AI tanks, the walls, the patrol
//! route and optionally the steering configuration. It is stored as JSON:
//!
//! ```json
//! {
//!   "player": [400.0, 300.0],
//!   "tanks": [{ "position": [0.0, 0.0], "rotation": 0.0, "speed": 0.0 }],
//!   "walls": [{ "center": [200.0, 20.0], "half_width": 16.0 }],
//!   "waypoints": { "nodes": [[0.0, 0.0], [600.0, 0.0]] },
//!   "steering": { "accumulator": "reset_each_tick" }
//! }
//! ```

use std::fs;
use std::path::Path;

use bevy::prelude::{Entity, World};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::{ArenaError, WaypointSequence};
use crate::config::{ConfigError, SteeringConfig};
use crate::control::{AiTank, PlayerReported, TankAiPlugin, Wall};
use crate::kinematics::AgentKinematics;

/// Errors raised while loading a [`Scenario`].
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    /// The scenario file is not valid JSON for [`Scenario`].
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    /// The embedded steering configuration is out of range.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Initial arena layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Player position; the player does not move.
    pub player: Vec2,
    /// Starting kinematics for each AI tank.
    pub tanks: Vec<AgentKinematics>,
    /// Walls to steer around.
    #[serde(default)]
    pub walls: Vec<Wall>,
    /// Patrol route shared by every tank.
    pub waypoints: WaypointSequence,
    /// Controller configuration.
    #[serde(default)]
    pub steering: SteeringConfig,
}

impl Scenario {
    /// Built-in arena: one tank patrolling a square past two walls while the
    /// player waits beside the route.
    ///
    /// # Errors
    /// Returns [`ArenaError::EmptyWaypoints`] if the built-in route is
    /// rejected.
    pub fn demo() -> Result<Self, ArenaError> {
        Ok(Self {
            player: Vec2::new(420.0, 300.0),
            tanks: vec![AgentKinematics::at(Vec2::ZERO, 0.0)],
            walls: vec![
                Wall {
                    center: Vec2::new(300.0, 10.0),
                    half_width: 16.0,
                },
                Wall {
                    center: Vec2::new(600.0, 300.0),
                    half_width: 16.0,
                },
            ],
            waypoints: WaypointSequence::new(vec![
                Vec2::new(600.0, 0.0),
                Vec2::new(600.0, 600.0),
                Vec2::new(0.0, 600.0),
                Vec2::new(0.0, 0.0),
            ])?,
            steering: SteeringConfig::default(),
        })
    }

    /// Parses and validates a JSON scenario.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Parse`] for malformed JSON or an empty route,
    /// and [`ScenarioError::Config`] for an invalid steering section.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.steering.validate()?;
        Ok(scenario)
    }

    /// Reads, parses and validates a JSON scenario file.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Io`] when the file cannot be read, otherwise
    /// as [`Scenario::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Plugin configured for this scenario, with motion integration enabled.
    #[must_use]
    pub fn plugin(&self) -> TankAiPlugin {
        TankAiPlugin::new(self.waypoints.clone())
            .with_config(self.steering)
            .with_motion_integration()
    }

    /// Spawns the player, walls and tanks, then reports the player.
    ///
    /// Add [`Scenario::plugin`] to the app first so the report is observed.
    /// Returns the tank entities in scenario order.
    pub fn populate(&self, world: &mut World) -> Vec<Entity> {
        let player = world.spawn(AgentKinematics::at(self.player, 0.0)).id();
        for wall in &self.walls {
            world.spawn(*wall);
        }
        let tanks = self
            .tanks
            .iter()
            .map(|kinematics| world.spawn((AiTank, *kinematics)).id())
            .collect();
        world.trigger(PlayerReported { player });
        tanks
    }
}
