//! Utility helpers for tests.
//!
//! Builders for routes, obstacle sets and Bevy apps running the steering
//! plugin, plus a tolerance assertion for vectors.

use bevy::prelude::*;
use glam::Vec2;
use tank_ai::{
    AgentKinematics, Obstacle, ObstacleRegistry, PlayerReported, SteeringConfig, TankAiPlugin,
    WaypointSequence,
};

/// Assert that `actual` lies within `tolerance` of `expected`.
///
/// # Panics
/// Panics with both vectors in the message when they differ by more than
/// `tolerance`.
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, tolerance: f32) {
    assert!(
        actual.distance(expected) <= tolerance,
        "expected {expected:?} within {tolerance}, got {actual:?}"
    );
}

/// Builds a route through `points`.
///
/// # Panics
/// Panics if `points` is empty.
pub fn route(points: &[(f32, f32)]) -> WaypointSequence {
    WaypointSequence::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
        .expect("routes used in tests must not be empty")
}

/// Builds a registry from `(x, y, radius)` circles in order.
///
/// # Panics
/// Panics if any radius is negative.
pub fn obstacles(circles: &[(f32, f32, f32)]) -> ObstacleRegistry {
    circles
        .iter()
        .map(|&(x, y, radius)| {
            Obstacle::new(Vec2::new(x, y), radius).expect("test obstacles must be valid")
        })
        .collect()
}

/// App with `MinimalPlugins` and the steering plugin for `route`.
pub fn arena_app(route: WaypointSequence, config: SteeringConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(TankAiPlugin::new(route).with_config(config));
    app
}

/// Spawns a stationary player at `position` and reports it.
pub fn spawn_player(app: &mut App, position: Vec2) -> Entity {
    let world = app.world_mut();
    let player = world.spawn(AgentKinematics::at(position, 0.0)).id();
    world.trigger(PlayerReported { player });
    player
}
