//! Steering constants shared by the controller and the arena helpers.
//!
//! These values are fixed for every controller. Only the maximum speed can
//! be changed per instance, see [`crate::SteeringController::set_max_speed`].

/// Length of the forward look-ahead probe, and the proximity at which the
/// tank stops in front of its target.
pub const MAX_SEE_AHEAD: f32 = 50.0;
/// Magnitude of the force pushing the tank away from the selected threat.
pub const MAX_AVOID_FORCE: f32 = 50.0;
/// Upper bound on the accumulated steering force.
pub const MAX_FORCE: f32 = 10.0;
/// Speed cap used when no other value is configured.
pub const DEFAULT_MAX_SPEED: f32 = 50.0;
/// Distance from a node, per axis, at which it counts as reached.
pub const NODE_THRESHOLD: f32 = 100.0;
/// Degrees turned per tick under the fixed-step turn policy.
pub const TURN_STEP_DEGREES: f32 = 1.0;
/// Scale applied to a wall's half-width to obtain its obstacle radius.
pub const OBSTACLE_RADIUS_SCALE: f32 = 1.5;
/// Fraction of the look-ahead used for the near probe point.
pub const HALF_AHEAD_FACTOR: f32 = 0.5;
