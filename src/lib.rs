//! Steering controller for autonomous tanks in a 2D arena.
//!
//! Each tick a [`SteeringController`] combines seek, path-following and
//! collision-avoidance vectors into a velocity, then turns its tank one step
//! towards that velocity's heading and sets its speed. The [`control`]
//! module drives one controller per AI tank inside a Bevy app.
pub mod arena;
pub mod config;
pub mod constants;
pub mod control;
pub mod geometry;
pub mod kinematics;
pub mod logging;
pub mod numeric;
pub mod scenario;
pub mod steering;
pub use constants::*;

// Re-export commonly used items
pub use arena::{ArenaError, Obstacle, ObstacleRegistry, Surroundings, WaypointSequence};
pub use config::{
    AccumulatorPolicy, ConfigError, RoamingBehaviour, SteeringConfig, TurnPolicy, WaypointArrival,
};
pub use control::{AiTank, PlayerReported, SteeringAgent, TankAiPlugin, TargetIdentity, Wall};
pub use geometry::{distance, line_intersects_circle, truncate, unit_vector};
pub use kinematics::{AgentKinematics, KinematicsStore, MotionUpdate};
pub use logging::init as init_logging;
pub use steering::{BehaviourState, SteeringController, SteeringError};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use tank_ai::prelude::*;
    //! ```

    pub use crate::AgentKinematics;
    pub use crate::KinematicsStore;
    pub use crate::ObstacleRegistry;
    pub use crate::SteeringConfig;
    pub use crate::SteeringController;
    pub use crate::Surroundings;
    pub use crate::TankAiPlugin;
    pub use crate::WaypointSequence;
    pub use glam::Vec2;
}
