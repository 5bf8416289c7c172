//! Bevy plugin wiring the steering controllers into the schedule.

use bevy::prelude::*;

use super::components::TargetIdentity;
use super::systems::{
    advance_kinematics_system, attach_controllers_system, drive_controllers_system,
    record_player_identity, register_walls_system,
};
use crate::arena::{ObstacleRegistry, WaypointSequence};
use crate::config::SteeringConfig;

/// Drives every [`super::AiTank`] once per `Update`.
///
/// Requires Bevy's `TimePlugin` (part of `MinimalPlugins`). An
/// [`ObstacleRegistry`] inserted before the plugin is kept and extended.
#[derive(Debug, Clone)]
pub struct TankAiPlugin {
    waypoints: WaypointSequence,
    config: SteeringConfig,
    integrate_motion: bool,
}

impl TankAiPlugin {
    /// Plugin patrolling `waypoints` with the default configuration.
    #[must_use]
    pub fn new(waypoints: WaypointSequence) -> Self {
        Self {
            waypoints,
            config: SteeringConfig::default(),
            integrate_motion: false,
        }
    }

    /// Uses `config` for every controller created by the plugin.
    #[must_use]
    pub fn with_config(mut self, config: SteeringConfig) -> Self {
        self.config = config;
        self
    }

    /// Also moves units along their heading after steering, for hosts
    /// without their own movement system.
    #[must_use]
    pub fn with_motion_integration(mut self) -> Self {
        self.integrate_motion = true;
        self
    }
}

impl Plugin for TankAiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.waypoints.clone())
            .insert_resource(self.config)
            .init_resource::<ObstacleRegistry>()
            .init_resource::<TargetIdentity>()
            .add_observer(record_player_identity)
            .add_systems(
                Update,
                (
                    register_walls_system,
                    attach_controllers_system,
                    drive_controllers_system,
                )
                    .chain(),
            );

        if self.integrate_motion {
            app.add_systems(
                Update,
                advance_kinematics_system.after(drive_controllers_system),
            );
        }
    }
}
