//! ECS components, resources and events used by the control loop.

use bevy::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::steering::SteeringController;

/// Marks a unit driven by a steering controller.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct AiTank;

/// Wall geometry the tanks must steer around.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Centre of the wall.
    pub center: Vec2,
    /// Half of the wall's bounding width.
    pub half_width: f32,
}

/// Steering controller owned by an [`AiTank`].
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct SteeringAgent(pub SteeringController);

/// Entity the tanks chase, once reported.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TargetIdentity(pub Option<Entity>);

/// Announces the player entity. Later reports replace earlier ones.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerReported {
    /// The player's entity.
    pub player: Entity,
}
