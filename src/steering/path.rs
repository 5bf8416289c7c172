//! Path following over the cyclic waypoint sequence.

use glam::Vec2;

use crate::arena::WaypointSequence;
use crate::config::WaypointArrival;
use crate::NODE_THRESHOLD;

/// Whether `offset` (node minus position) counts as having reached the node.
#[must_use]
pub fn has_arrived(offset: Vec2, arrival: WaypointArrival) -> bool {
    match arrival {
        WaypointArrival::AxisAlignedBox => {
            offset.x.abs() < NODE_THRESHOLD && offset.y.abs() < NODE_THRESHOLD
        }
        WaypointArrival::Radius => offset.length() < NODE_THRESHOLD,
    }
}

/// Vector from `position` to the node at `*cursor`.
///
/// When that node has been reached the cursor moves on, wrapping at the end
/// of the sequence. The returned vector always points at the node the cursor
/// held on entry.
pub fn follow(
    waypoints: &WaypointSequence,
    cursor: &mut usize,
    position: Vec2,
    arrival: WaypointArrival,
) -> Vec2 {
    let to_node = waypoints.node(*cursor) - position;
    if has_arrived(to_node, arrival) {
        *cursor = waypoints.next_index(*cursor);
        log::debug!("reached waypoint, heading for node {}", *cursor);
    }
    to_node
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn square_route() -> WaypointSequence {
        WaypointSequence::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(500.0, 0.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(0.0, 500.0),
        ])
        .expect("non-empty route")
    }

    #[rstest]
    #[case::inside_box(Vec2::new(99.0, -99.0), WaypointArrival::AxisAlignedBox, true)]
    #[case::on_box_edge(Vec2::new(100.0, 0.0), WaypointArrival::AxisAlignedBox, false)]
    #[case::box_corner_outside_radius(Vec2::new(90.0, 90.0), WaypointArrival::Radius, false)]
    #[case::box_corner_inside_box(Vec2::new(90.0, 90.0), WaypointArrival::AxisAlignedBox, true)]
    #[case::inside_radius(Vec2::new(60.0, 60.0), WaypointArrival::Radius, true)]
    fn arrival_tests(#[case] offset: Vec2, #[case] arrival: WaypointArrival, #[case] hit: bool) {
        assert_eq!(has_arrived(offset, arrival), hit);
    }

    #[rstest]
    fn returns_vector_to_node_before_advancing() {
        let route = square_route();
        let mut cursor = 1;
        let to_node = follow(
            &route,
            &mut cursor,
            Vec2::new(450.0, 20.0),
            WaypointArrival::AxisAlignedBox,
        );
        assert_eq!(to_node, Vec2::new(50.0, -20.0));
        assert_eq!(cursor, 2);
    }

    #[rstest]
    fn far_node_keeps_cursor() {
        let route = square_route();
        let mut cursor = 2;
        let to_node = follow(&route, &mut cursor, Vec2::ZERO, WaypointArrival::AxisAlignedBox);
        assert_eq!(to_node, Vec2::new(500.0, 500.0));
        assert_eq!(cursor, 2);
    }

    #[rstest]
    fn last_node_wraps_to_first() {
        let route = square_route();
        let mut cursor = 3;
        follow(
            &route,
            &mut cursor,
            Vec2::new(0.0, 450.0),
            WaypointArrival::AxisAlignedBox,
        );
        assert_eq!(cursor, 0);
    }
}
