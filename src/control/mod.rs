//! Control loop adapter between the ECS world and the steering controllers.
//!
//! The adapter listens for the player report, turns walls into obstacles,
//! attaches a controller to every AI tank and drives each controller once
//! per tick with kinematics resolved from the world.

mod components;
mod plugin;
mod systems;

pub use components::{AiTank, PlayerReported, SteeringAgent, TargetIdentity, Wall};
pub use plugin::TankAiPlugin;
pub use systems::{
    advance_kinematics_system, attach_controllers_system, drive_controllers_system,
    register_walls_system,
};
