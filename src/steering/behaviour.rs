//! Discrete behaviour states and the transition rule between them.

use serde::{Deserialize, Serialize};

use crate::config::RoamingBehaviour;
use crate::MAX_SEE_AHEAD;

/// Mode gating which steering vectors are composed each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BehaviourState {
    /// Steer towards the next node of the patrol route.
    #[default]
    PathFollowing,
    /// Steer straight towards the target.
    SeekTarget,
    /// Hold position: speed is forced to zero, velocity is left as is.
    Stop,
    /// Reserved. No transition enters this state; a host may set it
    /// explicitly, in which case the tank composes no steering.
    Retreat,
}

impl From<RoamingBehaviour> for BehaviourState {
    fn from(roaming: RoamingBehaviour) -> Self {
        match roaming {
            RoamingBehaviour::PathFollowing => Self::PathFollowing,
            RoamingBehaviour::SeekTarget => Self::SeekTarget,
        }
    }
}

/// State for the next tick given the current distance to the target.
///
/// Inside [`MAX_SEE_AHEAD`] the tank stops; otherwise it resumes roaming.
#[must_use]
pub fn next_state(distance_to_target: f32, roaming: RoamingBehaviour) -> BehaviourState {
    if distance_to_target < MAX_SEE_AHEAD {
        BehaviourState::Stop
    } else {
        roaming.into()
    }
}
