//! Per-agent steering controller.

use glam::Vec2;
use log::{debug, trace};
use thiserror::Error;

use super::avoidance::{avoidance_force, most_threatening, LookAhead};
use super::behaviour::{next_state, BehaviourState};
use super::path::follow;
use super::rotation::{shortest_turn, step_degrees, Turn};
use crate::arena::Surroundings;
use crate::config::{AccumulatorPolicy, ConfigError, SteeringConfig};
use crate::geometry::{heading_degrees, truncate, unit_vector};
use crate::kinematics::{AgentKinematics, KinematicsStore, MotionUpdate};
use crate::MAX_FORCE;

/// Identity resolution failures raised by [`SteeringController::update`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteeringError {
    /// The target's kinematics could not be found.
    #[error("target {id} has no kinematics")]
    UnknownTarget {
        /// Debug rendering of the unresolved identity.
        id: String,
    },
    /// The agent's kinematics could not be found or written.
    #[error("agent {id} has no kinematics")]
    UnknownAgent {
        /// Debug rendering of the unresolved identity.
        id: String,
    },
}

/// Steering state owned by one AI tank.
///
/// Each tick composes a seek, path-following and collision-avoidance vector
/// into a steering force, integrates it into the simulated velocity and
/// turns the tank one step towards that velocity's heading.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringController {
    velocity: Vec2,
    steering: Vec2,
    probe: LookAhead,
    next_waypoint: usize,
    behaviour: BehaviourState,
    config: SteeringConfig,
}

impl Default for SteeringController {
    fn default() -> Self {
        Self::new(SteeringConfig::default())
    }
}

impl SteeringController {
    /// A fresh controller patrolling from the first waypoint.
    #[must_use]
    pub const fn new(config: SteeringConfig) -> Self {
        Self {
            velocity: Vec2::ZERO,
            steering: Vec2::ZERO,
            probe: LookAhead {
                ahead: Vec2::ZERO,
                half_ahead: Vec2::ZERO,
            },
            next_waypoint: 0,
            behaviour: BehaviourState::PathFollowing,
            config,
        }
    }

    /// Runs one tick for `agent` chasing `target`, resolving both through
    /// `store` and writing the new rotation and speed back to it.
    ///
    /// # Errors
    /// Returns [`SteeringError`] when either identity does not resolve. The
    /// controller state is left untouched in that case.
    pub fn update<S: KinematicsStore>(
        &mut self,
        surroundings: Surroundings<'_>,
        store: &mut S,
        target: S::Id,
        agent: S::Id,
        dt: f32,
    ) -> Result<(), SteeringError> {
        let target_position = store
            .kinematics(target)
            .ok_or_else(|| SteeringError::UnknownTarget {
                id: format!("{target:?}"),
            })?
            .position;
        let mut kinematics = store
            .kinematics(agent)
            .ok_or_else(|| SteeringError::UnknownAgent {
                id: format!("{agent:?}"),
            })?;

        self.step(surroundings, target_position, &mut kinematics, dt);

        if store.apply_motion(agent, MotionUpdate::from(&kinematics)) {
            Ok(())
        } else {
            Err(SteeringError::UnknownAgent {
                id: format!("{agent:?}"),
            })
        }
    }

    /// Runs one tick against an agent snapshot, updating its rotation and
    /// speed in place.
    ///
    /// `dt` only matters under [`crate::TurnPolicy::TimeScaled`].
    pub fn step(
        &mut self,
        surroundings: Surroundings<'_>,
        target: Vec2,
        agent: &mut AgentKinematics,
        dt: f32,
    ) {
        if self.config.accumulator == AccumulatorPolicy::ResetEachTick {
            self.steering = Vec2::ZERO;
        }

        let to_target = target - agent.position;
        let to_node = follow(
            surroundings.waypoints,
            &mut self.next_waypoint,
            agent.position,
            self.config.arrival,
        );

        match self.behaviour {
            BehaviourState::PathFollowing => self.compose(to_node, surroundings, agent),
            BehaviourState::SeekTarget => self.compose(to_target, surroundings, agent),
            BehaviourState::Stop => agent.speed = 0.0,
            BehaviourState::Retreat => {}
        }

        let desired = heading_degrees(self.velocity);
        let step = step_degrees(self.config.turn, dt);
        let turn = shortest_turn(agent.rotation, desired, step);
        if turn == Turn::Aligned {
            self.steering = Vec2::ZERO;
        }
        agent.rotation = turn.apply(agent.rotation);
        trace!(
            "velocity {:?} steering {:?} desired heading {desired:.1} rotation {:.1}",
            self.velocity,
            self.steering,
            agent.rotation
        );

        let distance_to_target = to_target.length();
        let next = next_state(distance_to_target, self.config.roaming);
        if next != BehaviourState::Stop {
            agent.speed = self.velocity.length();
        }
        if next != self.behaviour {
            debug!(
                "behaviour {:?} -> {next:?} at {distance_to_target:.1} from target",
                self.behaviour
            );
        }
        self.behaviour = next;
    }

    fn compose(&mut self, direction: Vec2, surroundings: Surroundings<'_>, agent: &AgentKinematics) {
        self.steering += unit_vector(direction);
        let avoidance = self.collision_avoidance(surroundings, agent);
        self.steering += avoidance;
        self.steering = truncate(self.steering, MAX_FORCE);
        self.velocity = truncate(self.velocity + self.steering, self.config.max_speed);
    }

    fn collision_avoidance(
        &mut self,
        surroundings: Surroundings<'_>,
        agent: &AgentKinematics,
    ) -> Vec2 {
        self.probe = LookAhead::from_heading(agent.position, agent.rotation);
        let threat = most_threatening(surroundings.obstacles, self.probe, agent.position);
        if !threat.is_none() {
            trace!("avoiding obstacle at {:?}", threat.center());
        }
        avoidance_force(&threat, self.probe)
    }

    /// Simulated velocity carried between ticks.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current steering accumulator.
    #[must_use]
    pub const fn steering(&self) -> Vec2 {
        self.steering
    }

    /// Far probe point from the last avoidance pass.
    #[must_use]
    pub const fn ahead(&self) -> Vec2 {
        self.probe.ahead
    }

    /// Near probe point from the last avoidance pass.
    #[must_use]
    pub const fn half_ahead(&self) -> Vec2 {
        self.probe.half_ahead
    }

    /// Index of the node currently being steered towards.
    #[must_use]
    pub const fn next_waypoint(&self) -> usize {
        self.next_waypoint
    }

    /// Behaviour used on the next tick.
    #[must_use]
    pub const fn behaviour(&self) -> BehaviourState {
        self.behaviour
    }

    /// Forces the behaviour for the next tick. The usual transition rule
    /// applies again at the end of that tick.
    pub const fn set_behaviour(&mut self, behaviour: BehaviourState) {
        self.behaviour = behaviour;
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Changes the speed cap applied to the simulated velocity.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidMaxSpeed`] when `max_speed` is negative
    /// or not finite; the previous cap is kept.
    pub fn set_max_speed(&mut self, max_speed: f32) -> Result<(), ConfigError> {
        if !max_speed.is_finite() || max_speed < 0.0 {
            return Err(ConfigError::InvalidMaxSpeed(max_speed));
        }
        self.config.max_speed = max_speed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Obstacle, ObstacleRegistry, WaypointSequence};
    use crate::config::{RoamingBehaviour, TurnPolicy};
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn far_route() -> WaypointSequence {
        WaypointSequence::new(vec![Vec2::new(1000.0, 0.0)]).expect("non-empty route")
    }

    #[rstest]
    fn stop_zeroes_speed_but_keeps_velocity(far_route: WaypointSequence) {
        let obstacles = ObstacleRegistry::new();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let mut controller = SteeringController::default();
        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);

        controller.step(surroundings, Vec2::new(500.0, 0.0), &mut agent, 0.016);
        let velocity = controller.velocity();
        assert!(agent.speed > 0.0);

        controller.step(surroundings, Vec2::new(10.0, 0.0), &mut agent, 0.016);
        assert_eq!(controller.behaviour(), BehaviourState::Stop);

        for _ in 0..3 {
            controller.step(surroundings, Vec2::new(10.0, 0.0), &mut agent, 0.016);
            assert!(agent.speed.abs() < f32::EPSILON);
            assert_eq!(controller.behaviour(), BehaviourState::Stop);
        }
        assert!(controller.velocity().length() >= velocity.length());
    }

    #[rstest]
    fn seek_target_steers_at_target(far_route: WaypointSequence) {
        let obstacles = ObstacleRegistry::new();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let mut controller = SteeringController::default();
        controller.set_behaviour(BehaviourState::SeekTarget);
        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);

        controller.step(surroundings, Vec2::new(0.0, 300.0), &mut agent, 0.016);

        assert_relative_eq!(controller.velocity().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(controller.velocity().y, 1.0, epsilon = 1e-6);
        assert_eq!(controller.behaviour(), BehaviourState::PathFollowing);
    }

    #[rstest]
    fn seek_roaming_keeps_chasing(far_route: WaypointSequence) {
        let obstacles = ObstacleRegistry::new();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let config = SteeringConfig {
            roaming: RoamingBehaviour::SeekTarget,
            ..SteeringConfig::default()
        };
        let mut controller = SteeringController::new(config);
        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);

        controller.step(surroundings, Vec2::new(0.0, 300.0), &mut agent, 0.016);
        assert_eq!(controller.behaviour(), BehaviourState::SeekTarget);
    }

    #[rstest]
    fn retreat_composes_nothing(far_route: WaypointSequence) {
        let obstacles = ObstacleRegistry::new();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let mut controller = SteeringController::default();
        controller.set_behaviour(BehaviourState::Retreat);
        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);

        controller.step(surroundings, Vec2::new(300.0, 0.0), &mut agent, 0.016);
        assert_eq!(controller.velocity(), Vec2::ZERO);
        assert_eq!(controller.steering(), Vec2::ZERO);
    }

    #[rstest]
    fn speed_respects_max_speed(far_route: WaypointSequence) {
        let obstacles = ObstacleRegistry::new();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let mut controller = SteeringController::default();
        controller.set_max_speed(4.0).expect("valid cap");
        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);

        for _ in 0..20 {
            controller.step(surroundings, Vec2::new(500.0, 0.0), &mut agent, 0.016);
        }
        assert_relative_eq!(agent.speed, 4.0, epsilon = 1e-4);
        assert!(controller.steering().length() <= MAX_FORCE + 1e-4);
    }

    #[rstest]
    #[case(-5.0)]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn invalid_max_speed_keeps_previous_cap(
        far_route: WaypointSequence,
        #[case] max_speed: f32,
    ) {
        let obstacles = ObstacleRegistry::new();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let mut controller = SteeringController::default();
        controller.set_max_speed(2.0).expect("valid cap");

        assert!(matches!(
            controller.set_max_speed(max_speed),
            Err(ConfigError::InvalidMaxSpeed(_))
        ));
        assert_relative_eq!(controller.config().max_speed, 2.0);

        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);
        for _ in 0..3 {
            controller.step(surroundings, Vec2::new(500.0, 0.0), &mut agent, 0.016);
        }
        assert_relative_eq!(agent.speed, 2.0, epsilon = 1e-4);
        assert!(controller.velocity().x > 0.0);
    }

    #[rstest]
    fn obstacle_ahead_pushes_velocity_aside(far_route: WaypointSequence) {
        let obstacles: ObstacleRegistry = [Obstacle::new(Vec2::new(45.0, -5.0), 10.0)
            .expect("valid obstacle")]
        .into_iter()
        .collect();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let mut controller = SteeringController::default();
        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);

        controller.step(surroundings, Vec2::new(500.0, 0.0), &mut agent, 0.016);

        assert_relative_eq!(controller.ahead().x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(controller.half_ahead().x, 25.0, epsilon = 1e-4);
        assert!(controller.velocity().y > 0.0);
        assert!(agent.rotation > 0.0);
    }

    #[rstest]
    fn time_scaled_turns_use_dt(far_route: WaypointSequence) {
        let obstacles = ObstacleRegistry::new();
        let surroundings = Surroundings::new(&obstacles, &far_route);
        let config = SteeringConfig {
            turn: TurnPolicy::TimeScaled {
                degrees_per_second: 180.0,
            },
            ..SteeringConfig::default()
        };
        let mut controller = SteeringController::new(config);
        controller.set_behaviour(BehaviourState::SeekTarget);
        let mut agent = AgentKinematics::at(Vec2::ZERO, 0.0);

        controller.step(surroundings, Vec2::new(0.0, 300.0), &mut agent, 0.05);
        assert_relative_eq!(agent.rotation, 9.0, epsilon = 1e-4);
    }
}
