//! Motion state of arena units and the lookup capability the controller
//! reads it through.

use std::hash::{BuildHasher, Hash};

use bevy::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, heading and speed of a unit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentKinematics {
    /// World position.
    pub position: Vec2,
    /// Heading in degrees. Kept roughly in `[0, 360)` but never normalised
    /// by the controller.
    pub rotation: f32,
    /// Scalar speed along the heading.
    pub speed: f32,
}

impl AgentKinematics {
    /// A stationary unit at `position` facing `rotation` degrees.
    #[must_use]
    pub const fn at(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            speed: 0.0,
        }
    }

    /// Overwrites rotation and speed with a controller's decision.
    pub const fn apply(&mut self, motion: MotionUpdate) {
        self.rotation = motion.rotation;
        self.speed = motion.speed;
    }
}

/// The part of [`AgentKinematics`] written back after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionUpdate {
    /// New heading in degrees.
    pub rotation: f32,
    /// New speed.
    pub speed: f32,
}

impl From<&AgentKinematics> for MotionUpdate {
    fn from(kinematics: &AgentKinematics) -> Self {
        Self {
            rotation: kinematics.rotation,
            speed: kinematics.speed,
        }
    }
}

/// Resolves unit identities to their motion state.
///
/// The controller reads the target and agent snapshots through
/// [`KinematicsStore::kinematics`] and writes its decision back through
/// [`KinematicsStore::apply_motion`].
pub trait KinematicsStore {
    /// Identity type used by the backing storage.
    type Id: Copy + std::fmt::Debug;

    /// Snapshot of the unit's motion state, or `None` when `id` is unknown.
    fn kinematics(&self, id: Self::Id) -> Option<AgentKinematics>;

    /// Writes rotation and speed for `id`. Returns `false` when `id` is
    /// unknown.
    fn apply_motion(&mut self, id: Self::Id, motion: MotionUpdate) -> bool;
}

impl<K, S> KinematicsStore for hashbrown::HashMap<K, AgentKinematics, S>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
    S: BuildHasher,
{
    type Id = K;

    fn kinematics(&self, id: K) -> Option<AgentKinematics> {
        self.get(&id).copied()
    }

    fn apply_motion(&mut self, id: K, motion: MotionUpdate) -> bool {
        self.get_mut(&id).map(|entry| entry.apply(motion)).is_some()
    }
}

impl KinematicsStore for Query<'_, '_, &mut AgentKinematics> {
    type Id = Entity;

    fn kinematics(&self, id: Entity) -> Option<AgentKinematics> {
        self.get(id).ok().copied()
    }

    fn apply_motion(&mut self, id: Entity, motion: MotionUpdate) -> bool {
        self.get_mut(id)
            .map(|mut entry| entry.apply(motion))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn map_store_round_trips_motion() {
        let mut store: hashbrown::HashMap<u32, AgentKinematics> = hashbrown::HashMap::new();
        store.insert(7, AgentKinematics::at(Vec2::new(1.0, 2.0), 45.0));

        let motion = MotionUpdate {
            rotation: 46.0,
            speed: 3.0,
        };
        assert!(store.apply_motion(7, motion));

        let updated = store.kinematics(7).expect("stored kinematics");
        assert_eq!(updated.position, Vec2::new(1.0, 2.0));
        assert_eq!(MotionUpdate::from(&updated), motion);
    }

    #[rstest]
    fn map_store_reports_unknown_ids() {
        let mut store: hashbrown::HashMap<u32, AgentKinematics> = hashbrown::HashMap::new();
        assert!(store.kinematics(1).is_none());
        assert!(!store.apply_motion(1, MotionUpdate::default()));
    }
}
