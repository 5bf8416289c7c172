//! Constant-rate turning towards a desired heading.

use crate::config::TurnPolicy;
use crate::numeric::{degrees_to_f32, round_to_i64};
use crate::TURN_STEP_DEGREES;

/// Outcome of comparing the current rotation with the desired heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Turn {
    /// Current and desired heading round to the same whole degree.
    Aligned,
    /// Increase the rotation by the given number of degrees.
    Clockwise(f32),
    /// Decrease the rotation by the given number of degrees.
    Anticlockwise(f32),
}

impl Turn {
    /// Rotation after applying this turn to `rotation`.
    #[must_use]
    pub fn apply(self, rotation: f32) -> f32 {
        match self {
            Self::Aligned => rotation,
            Self::Clockwise(step) => rotation + step,
            Self::Anticlockwise(step) => rotation - step,
        }
    }
}

/// Degrees turned this tick under `policy`.
#[must_use]
pub fn step_degrees(policy: TurnPolicy, dt: f32) -> f32 {
    match policy {
        TurnPolicy::FixedStep => TURN_STEP_DEGREES,
        TurnPolicy::TimeScaled { degrees_per_second } => {
            degrees_to_f32(round_to_i64(degrees_per_second * dt))
        }
    }
}

/// Picks the shorter direction from `current` to `desired` (both degrees).
///
/// The offset `desired - current + 360` is rounded and reduced modulo 360
/// with a truncating remainder; offsets below 180 turn clockwise.
///
/// Rotations are not normalised. Once `current` passes 360 while `desired`
/// sits near 0, the offset is negative, its remainder stays negative and
/// the result is [`Turn::Clockwise`] on every tick, so the rotation keeps
/// growing (361, 362, ...).
#[must_use]
pub fn shortest_turn(current: f32, desired: f32, step: f32) -> Turn {
    if round_to_i64(current - desired) == 0 {
        return Turn::Aligned;
    }
    if round_to_i64(desired - current + 360.0) % 360 < 180 {
        Turn::Clockwise(step)
    } else {
        Turn::Anticlockwise(step)
    }
}
