//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Unique identifier for food items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodId(pub u32);

/// 2D position on the plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

/// Fixed bounds of the simulated plane: [0,width] x [0,height]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Hard clamp onto the plane (no wrap, no bounce)
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2 {
            x: pos.x.clamp(0.0, self.width),
            y: pos.y.clamp(0.0, self.height),
        }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        (0.0..=self.width).contains(&pos.x) && (0.0..=self.height).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(100.0, 50.0);
        assert_eq!(bounds.clamp(Vec2::new(-1.0, -0.5)), Vec2::new(0.0, 0.0));
        assert_eq!(bounds.clamp(Vec2::new(120.0, 60.0)), Vec2::new(100.0, 50.0));
        assert_eq!(bounds.clamp(Vec2::new(10.0, 20.0)), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::new(10.0, 10.0);
        assert!(bounds.contains(Vec2::new(0.0, 10.0)));
        assert!(!bounds.contains(Vec2::new(10.1, 0.0)));
    }
}
