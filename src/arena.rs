//! Static arena data read by the steering controller.
//!
//! Obstacles and waypoints are populated during setup and treated as
//! read-only while agents are updated. [`Surroundings`] borrows both for the
//! duration of a single tick.

use bevy::prelude::Resource;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::OBSTACLE_RADIUS_SCALE;

/// Errors raised while building arena data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArenaError {
    /// Path following needs at least one node to wrap around.
    #[error("waypoint sequence must contain at least one node")]
    EmptyWaypoints,
    /// Obstacle radii must be finite and non-negative.
    #[error("obstacle radius {radius} must be finite and non-negative")]
    InvalidRadius {
        /// The rejected radius.
        radius: f32,
    },
}

/// A static circular region the tank steers around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    center: Vec2,
    radius: f32,
}

impl Obstacle {
    /// Zero-radius sentinel meaning "no threat".
    pub const NONE: Self = Self {
        center: Vec2::ZERO,
        radius: 0.0,
    };

    /// Creates an obstacle from its centre and radius.
    ///
    /// # Errors
    /// Returns [`ArenaError::InvalidRadius`] when `radius` is negative or not
    /// finite.
    pub fn new(center: Vec2, radius: f32) -> Result<Self, ArenaError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ArenaError::InvalidRadius { radius });
        }
        Ok(Self { center, radius })
    }

    /// Derives the obstacle covering a wall from its centre and half-width.
    ///
    /// The radius is [`OBSTACLE_RADIUS_SCALE`] times the half-width so the
    /// circle comfortably encloses the wall's corners.
    ///
    /// # Errors
    /// Returns [`ArenaError::InvalidRadius`] for a negative or non-finite
    /// half-width.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use tank_ai::Obstacle;
    /// let obstacle = Obstacle::from_wall(Vec2::new(5.0, 5.0), 10.0).unwrap();
    /// assert!((obstacle.radius() - 15.0).abs() < f32::EPSILON);
    /// ```
    pub fn from_wall(center: Vec2, half_width: f32) -> Result<Self, ArenaError> {
        Self::new(center, half_width * OBSTACLE_RADIUS_SCALE)
    }

    /// Centre of the circle.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Radius of the circle.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether this is the "no threat" sentinel (or any zero-radius circle).
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.radius == 0.0
    }
}

/// Append-only collection of static obstacles.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }

    /// Adds an obstacle. Registration order is kept and decides ties during
    /// threat selection.
    pub fn register(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Iterates the obstacles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Number of registered obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether no obstacle has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl FromIterator<Obstacle> for ObstacleRegistry {
    fn from_iter<I: IntoIterator<Item = Obstacle>>(iter: I) -> Self {
        Self {
            obstacles: iter.into_iter().collect(),
        }
    }
}

/// Ordered, cyclic, non-empty list of nodes the tank patrols.
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct WaypointSequence {
    nodes: Vec<Vec2>,
}

impl WaypointSequence {
    /// Builds a sequence from its nodes.
    ///
    /// # Errors
    /// Returns [`ArenaError::EmptyWaypoints`] when `nodes` is empty.
    pub fn new(nodes: Vec<Vec2>) -> Result<Self, ArenaError> {
        if nodes.is_empty() {
            return Err(ArenaError::EmptyWaypoints);
        }
        Ok(Self { nodes })
    }

    /// Position of the node at `index`, wrapping past the end.
    #[must_use]
    pub fn node(&self, index: usize) -> Vec2 {
        self.nodes
            .get(index % self.nodes.len())
            .copied()
            .unwrap_or_default()
    }

    /// Index following `index`, wrapping to 0 after the last node.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use tank_ai::WaypointSequence;
    /// let nodes = WaypointSequence::new(vec![Vec2::ZERO, Vec2::ONE]).unwrap();
    /// assert_eq!(nodes.next_index(0), 1);
    /// assert_eq!(nodes.next_index(1), 0);
    /// ```
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next >= self.nodes.len() {
            0
        } else {
            next
        }
    }

    /// Number of nodes; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in patrol order.
    #[must_use]
    pub fn nodes(&self) -> &[Vec2] {
        &self.nodes
    }
}

impl<'de> Deserialize<'de> for WaypointSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            nodes: Vec<Vec2>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.nodes).map_err(serde::de::Error::custom)
    }
}

/// Borrowed view of the arena used for one controller tick.
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    /// Obstacles to avoid.
    pub obstacles: &'a ObstacleRegistry,
    /// Nodes to patrol.
    pub waypoints: &'a WaypointSequence,
}

impl<'a> Surroundings<'a> {
    /// Bundles the obstacle registry and waypoint sequence.
    #[must_use]
    pub const fn new(obstacles: &'a ObstacleRegistry, waypoints: &'a WaypointSequence) -> Self {
        Self {
            obstacles,
            waypoints,
        }
    }
}
