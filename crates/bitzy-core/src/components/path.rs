//! Waypoint path followed while walking.

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Min/max number of waypoints in a generated path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathComplexity {
    pub min: u32,
    pub max: u32,
}

impl Default for PathComplexity {
    fn default() -> Self {
        Self { min: 3, max: 6 }
    }
}

impl PathComplexity {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Same range shifted up by `extra` waypoints
    pub fn with_extra(self, extra: u32) -> Self {
        Self {
            min: self.min.saturating_add(extra),
            max: self.max.saturating_add(extra),
        }
    }

    /// `(low, high)` with the bounds in order
    pub fn ordered(&self) -> (u32, u32) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

/// Ordered waypoints plus the index of the one being walked to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<Vec2>,
    index: usize,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            index: 0,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Waypoint currently being walked to
    pub fn current(&self) -> Option<Vec2> {
        self.waypoints.get(self.index).copied()
    }

    pub fn advance(&mut self) {
        if self.index < self.waypoints.len() {
            self.index += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// True when there is nothing left to walk to
    pub fn is_finished(&self) -> bool {
        self.index >= self.waypoints.len()
    }

    pub fn remaining(&self) -> &[Vec2] {
        &self.waypoints[self.index.min(self.waypoints.len())..]
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.index = 0;
    }
}
