//! Systems registering arena geometry and driving the steering controllers.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{info, trace, warn};

use super::components::{AiTank, PlayerReported, SteeringAgent, TargetIdentity, Wall};
use crate::arena::{Obstacle, ObstacleRegistry, Surroundings, WaypointSequence};
use crate::config::SteeringConfig;
use crate::geometry::heading_vector;
use crate::kinematics::AgentKinematics;
use crate::steering::SteeringController;

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(crate) fn record_player_identity(event: On<PlayerReported>, mut target: ResMut<TargetIdentity>) {
    let PlayerReported { player } = *event.event();
    info!("tracking player {player:?}");
    target.0 = Some(player);
}

/// Turns every newly spawned [`Wall`] into an obstacle.
pub fn register_walls_system(
    walls: Query<(Entity, &Wall), Added<Wall>>,
    mut obstacles: ResMut<ObstacleRegistry>,
) {
    for (entity, wall) in &walls {
        match Obstacle::from_wall(wall.center, wall.half_width) {
            Ok(obstacle) => {
                info!(
                    "registered obstacle at {:?} with radius {:.1} for wall {entity:?}",
                    obstacle.center(),
                    obstacle.radius()
                );
                obstacles.register(obstacle);
            }
            Err(err) => warn!("ignoring wall {entity:?}: {err}"),
        }
    }
}

/// Gives every newly spawned [`AiTank`] its own controller.
pub fn attach_controllers_system(
    mut commands: Commands,
    tanks: Query<Entity, (Added<AiTank>, Without<SteeringAgent>)>,
    config: Res<SteeringConfig>,
) {
    for entity in &tanks {
        commands
            .entity(entity)
            .insert(SteeringAgent(SteeringController::new(*config)));
        info!("attached steering controller to {entity:?}");
    }
}

/// Runs one controller tick per tank against the reported player.
///
/// Skips the tick entirely until a player has been reported. Tanks whose
/// kinematics cannot be resolved are logged and left alone.
pub fn drive_controllers_system(
    time: Res<Time>,
    target: Res<TargetIdentity>,
    obstacles: Res<ObstacleRegistry>,
    waypoints: Res<WaypointSequence>,
    mut agents: Query<(Entity, &mut SteeringAgent)>,
    mut kinematics: Query<&mut AgentKinematics>,
) {
    let Some(player) = target.0 else {
        trace!("no player reported yet");
        return;
    };
    let surroundings = Surroundings::new(&obstacles, &waypoints);
    let dt = time.delta_secs();
    for (entity, mut agent) in &mut agents {
        if let Err(err) = agent.update(surroundings, &mut kinematics, player, entity, dt) {
            warn!("skipping steering for {entity:?}: {err}");
        }
    }
}

/// Moves every unit along its heading at its speed.
pub fn advance_kinematics_system(time: Res<Time>, mut units: Query<&mut AgentKinematics>) {
    let dt = time.delta_secs();
    for mut unit in &mut units {
        let travel = heading_vector(unit.rotation) * unit.speed * dt;
        unit.position += travel;
    }
}
