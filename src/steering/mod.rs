//! Steering behaviours and the per-agent controller that composes them.
//!
//! The controller combines three vectors each tick:
//!
//! - seek: straight at the target,
//! - path following: towards the next patrol node,
//! - collision avoidance: away from the closest obstacle on the look-ahead
//!   probe.
//!
//! The [`BehaviourState`] decides which of seek and path following is used.
//! Avoidance is always added on top.

pub mod avoidance;
pub mod behaviour;
mod controller;
pub mod path;
pub mod rotation;

pub use avoidance::LookAhead;
pub use behaviour::BehaviourState;
pub use controller::{SteeringController, SteeringError};
pub use rotation::Turn;
