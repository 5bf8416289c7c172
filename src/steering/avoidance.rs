//! Collision avoidance against static circular obstacles.

use glam::Vec2;

use crate::arena::{Obstacle, ObstacleRegistry};
use crate::geometry::{distance, heading_vector, line_intersects_circle, unit_vector};
use crate::{HALF_AHEAD_FACTOR, MAX_AVOID_FORCE, MAX_SEE_AHEAD};

/// Forward probe points derived from the tank's position and heading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookAhead {
    /// Point [`MAX_SEE_AHEAD`] in front of the tank.
    pub ahead: Vec2,
    /// Point halfway to [`LookAhead::ahead`].
    pub half_ahead: Vec2,
}

impl LookAhead {
    /// Probe points for a tank at `position` facing `rotation` degrees.
    #[must_use]
    pub fn from_heading(position: Vec2, rotation: f32) -> Self {
        let reach = heading_vector(rotation) * MAX_SEE_AHEAD;
        Self {
            ahead: position + reach,
            half_ahead: position + reach * HALF_AHEAD_FACTOR,
        }
    }
}

/// The obstacle crossing the probe segment that lies closest to `position`.
///
/// Returns [`Obstacle::NONE`] when no obstacle crosses the probe. Equally
/// close candidates resolve to the one registered first.
#[must_use]
pub fn most_threatening(
    obstacles: &ObstacleRegistry,
    probe: LookAhead,
    position: Vec2,
) -> Obstacle {
    let mut threat = Obstacle::NONE;
    for obstacle in obstacles.iter() {
        let crosses = line_intersects_circle(
            probe.ahead,
            probe.half_ahead,
            obstacle.center(),
            obstacle.radius(),
        );
        if crosses
            && (threat.is_none()
                || distance(position, obstacle.center()) < distance(position, threat.center()))
        {
            threat = *obstacle;
        }
    }
    threat
}

/// Force pushing the probe tip away from `threat`, or zero for the sentinel.
#[must_use]
pub fn avoidance_force(threat: &Obstacle, probe: LookAhead) -> Vec2 {
    if threat.is_none() {
        return Vec2::ZERO;
    }
    unit_vector(probe.ahead - threat.center()) * MAX_AVOID_FORCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    fn circle(x: f32, y: f32, radius: f32) -> Obstacle {
        Obstacle::new(Vec2::new(x, y), radius).expect("valid obstacle")
    }

    #[fixture]
    fn probe() -> LookAhead {
        LookAhead::from_heading(Vec2::ZERO, 0.0)
    }

    #[rstest]
    fn probe_points_follow_heading() {
        let north = LookAhead::from_heading(Vec2::new(10.0, 10.0), 90.0);
        assert_relative_eq!(north.ahead.x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(north.ahead.y, 60.0, epsilon = 1e-4);
        assert_relative_eq!(north.half_ahead.y, 35.0, epsilon = 1e-4);
    }

    #[rstest]
    fn no_obstacle_yields_sentinel_and_zero_force(probe: LookAhead) {
        let registry: ObstacleRegistry = [circle(0.0, 200.0, 10.0)].into_iter().collect();
        let threat = most_threatening(&registry, probe, Vec2::ZERO);
        assert!(threat.is_none());
        assert_eq!(avoidance_force(&threat, probe), Vec2::ZERO);
    }

    #[rstest]
    fn closest_candidate_wins_in_any_order(probe: LookAhead) {
        let near = circle(30.0, 5.0, 8.0);
        let far = circle(55.0, -3.0, 8.0);
        for registry in [
            [near, far].into_iter().collect::<ObstacleRegistry>(),
            [far, near].into_iter().collect::<ObstacleRegistry>(),
        ] {
            assert_eq!(most_threatening(&registry, probe, Vec2::ZERO), near);
        }
    }

    #[rstest]
    fn ties_keep_first_registered(probe: LookAhead) {
        let upper = circle(40.0, 3.0, 5.0);
        let lower = circle(40.0, -3.0, 5.0);
        let registry: ObstacleRegistry = [upper, lower].into_iter().collect();
        assert_eq!(most_threatening(&registry, probe, Vec2::ZERO), upper);
    }

    #[rstest]
    fn force_points_from_obstacle_to_probe_tip(probe: LookAhead) {
        let threat = circle(50.0, -10.0, 15.0);
        let force = avoidance_force(&threat, probe);
        assert_relative_eq!(force.length(), MAX_AVOID_FORCE, epsilon = 1e-3);
        assert_relative_eq!(force.x, 0.0, epsilon = 1e-3);
        assert!(force.y > 0.0);
    }
}
