//! Per-controller configuration.
//!
//! Every option defaults to the legacy behaviour: steering force carried
//! across ticks, a fixed one-degree turn per tick, an axis-aligned arrival
//! box and patrolling when the target is out of range. The alternatives are
//! opt-in because each one changes observable timing.

use std::fs;
use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DEFAULT_MAX_SPEED;

/// Errors raised while loading or validating a [`SteeringConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read steering config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for [`SteeringConfig`].
    #[error("failed to parse steering config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The speed cap must be finite and non-negative.
    #[error("max_speed {0} must be finite and non-negative")]
    InvalidMaxSpeed(f32),
    /// A time-scaled turn rate must be finite and positive.
    #[error("turn rate {0} degrees per second must be finite and positive")]
    InvalidTurnRate(f32),
}

/// How the steering accumulator behaves between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulatorPolicy {
    /// Keep adding to the previous tick's steering force. The force is only
    /// cleared once the heading is reached.
    #[default]
    Carry,
    /// Start every tick from a zero steering force.
    ResetEachTick,
}

/// How far the tank turns per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPolicy {
    /// Turn exactly [`crate::TURN_STEP_DEGREES`] per tick, ignoring `dt`.
    #[default]
    FixedStep,
    /// Turn `round(degrees_per_second * dt)` whole degrees per tick.
    TimeScaled {
        /// Angular speed in degrees per second.
        degrees_per_second: f32,
    },
}

/// How waypoint arrival is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointArrival {
    /// Both axis offsets below [`crate::NODE_THRESHOLD`].
    #[default]
    AxisAlignedBox,
    /// Euclidean distance below [`crate::NODE_THRESHOLD`].
    Radius,
}

/// Behaviour resumed whenever the target is out of stopping range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoamingBehaviour {
    /// Patrol the waypoint sequence.
    #[default]
    PathFollowing,
    /// Head straight for the target.
    SeekTarget,
}

/// Tunables for one steering controller.
///
/// # Examples
/// ```
/// use tank_ai::{AccumulatorPolicy, SteeringConfig};
/// let config = SteeringConfig::from_json_str(r#"{"accumulator": "reset_each_tick"}"#).unwrap();
/// assert_eq!(config.accumulator, AccumulatorPolicy::ResetEachTick);
/// assert!((config.max_speed - 50.0).abs() < f32::EPSILON);
/// ```
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SteeringConfig {
    /// Speed cap applied to the simulated velocity.
    pub max_speed: f32,
    /// Steering accumulator policy.
    pub accumulator: AccumulatorPolicy,
    /// Turn rate policy.
    pub turn: TurnPolicy,
    /// Waypoint arrival test.
    pub arrival: WaypointArrival,
    /// State entered while the target is out of range.
    pub roaming: RoamingBehaviour,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            accumulator: AccumulatorPolicy::default(),
            turn: TurnPolicy::default(),
            arrival: WaypointArrival::default(),
            roaming: RoamingBehaviour::default(),
        }
    }
}

impl SteeringConfig {
    /// Parses and validates a JSON document. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// errors described in [`SteeringConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`SteeringConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks numeric fields.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidMaxSpeed`] or
    /// [`ConfigError::InvalidTurnRate`] for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(ConfigError::InvalidMaxSpeed(self.max_speed));
        }
        if let TurnPolicy::TimeScaled { degrees_per_second } = self.turn {
            if !degrees_per_second.is_finite() || degrees_per_second <= 0.0 {
                return Err(ConfigError::InvalidTurnRate(degrees_per_second));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_document_yields_legacy_defaults() {
        let config = SteeringConfig::from_json_str("{}").expect("defaults parse");
        assert_eq!(config, SteeringConfig::default());
    }

    #[rstest]
    fn nested_policies_parse() {
        let config = SteeringConfig::from_json_str(
            r#"{
                "max_speed": 20.0,
                "turn": {"time_scaled": {"degrees_per_second": 90.0}},
                "arrival": "radius",
                "roaming": "seek_target"
            }"#,
        )
        .expect("valid config");
        assert_eq!(
            config.turn,
            TurnPolicy::TimeScaled {
                degrees_per_second: 90.0
            }
        );
        assert_eq!(config.arrival, WaypointArrival::Radius);
        assert_eq!(config.roaming, RoamingBehaviour::SeekTarget);
    }

    #[rstest]
    #[case(r#"{"max_speed": -1.0}"#)]
    #[case(r#"{"turn": {"time_scaled": {"degrees_per_second": 0.0}}}"#)]
    fn out_of_range_values_are_rejected(#[case] json: &str) {
        let result = SteeringConfig::from_json_str(json);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidMaxSpeed(_) | ConfigError::InvalidTurnRate(_))
        ));
    }

    #[rstest]
    fn unknown_fields_are_rejected() {
        let result = SteeringConfig::from_json_str(r#"{"max_force": 3.0}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[rstest]
    fn missing_file_reports_io_error() {
        let result = SteeringConfig::from_path("definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
