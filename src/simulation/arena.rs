//! Walled rectangular arena with cylindrical obstacles

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::Point2D;

/// Configuration for a randomly populated arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena size along x [m]
    pub width: f64,
    /// Arena size along y [m]
    pub height: f64,
    /// Number of cylinders to place
    pub cylinders: usize,
    /// Cylinder radius [m]
    pub cylinder_radius: f64,
    /// Radius around the start position kept free of cylinders [m]
    pub clearance: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 4.0,
            cylinders: 12,
            cylinder_radius: 0.1,
            clearance: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub center: Point2D,
    pub radius: f64,
}

impl Cylinder {
    pub fn new(center: Point2D, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Distance along a unit ray to the cylinder surface, 0 if the origin is inside
    fn ray_distance(&self, origin: Point2D, dir: (f64, f64)) -> Option<f64> {
        let fx = origin.x - self.center.x;
        let fy = origin.y - self.center.y;
        let b = fx * dir.0 + fy * dir.1;
        let c = fx * fx + fy * fy - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        if t >= 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

/// Rectangle centred on the origin, walls at `±width/2` and `±height/2`
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub cylinders: Vec<Cylinder>,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            cylinders: Vec::new(),
        }
    }

    pub fn with_cylinder(mut self, center: Point2D, radius: f64) -> Self {
        self.cylinders.push(Cylinder::new(center, radius));
        self
    }

    /// Place cylinders at random, away from the walls, from each other and
    /// from `start`. Gives up on a cylinder after a bounded number of tries,
    /// so crowded configurations may end up with fewer cylinders.
    pub fn random<R: Rng>(config: &ArenaConfig, start: Point2D, rng: &mut R) -> Self {
        let mut arena = Arena::new(config.width, config.height);
        let r = config.cylinder_radius;
        let half_w = config.width / 2.0 - r;
        let half_h = config.height / 2.0 - r;
        if !(half_w.is_finite() && half_h.is_finite()) || half_w <= 0.0 || half_h <= 0.0 {
            return arena;
        }

        let max_tries = config.cylinders * 100;
        let mut tries = 0;
        while arena.cylinders.len() < config.cylinders && tries < max_tries {
            tries += 1;
            let center = Point2D::new(rng.gen_range(-half_w..=half_w), rng.gen_range(-half_h..=half_h));
            if center.distance(&start) < config.clearance + r {
                continue;
            }
            if arena.cylinders.iter().any(|c| c.center.distance(&center) < c.radius + r + 0.01) {
                continue;
            }
            arena.cylinders.push(Cylinder::new(center, r));
        }
        arena
    }

    /// Whether a disc of `radius` at `point` lies fully inside the walls
    pub fn contains(&self, point: Point2D, radius: f64) -> bool {
        point.x - radius >= -self.width / 2.0
            && point.x + radius <= self.width / 2.0
            && point.y - radius >= -self.height / 2.0
            && point.y + radius <= self.height / 2.0
    }

    /// Whether a disc of `radius` at `point` overlaps a wall or a cylinder
    pub fn collides(&self, point: Point2D, radius: f64) -> bool {
        !self.contains(point, radius)
            || self
                .cylinders
                .iter()
                .any(|c| c.center.distance(&point) < c.radius + radius)
    }

    /// Distance to the nearest surface hit by a ray, if within `max_range`
    pub fn ray_distance(&self, origin: Point2D, angle: f64, max_range: f64) -> Option<f64> {
        let dir = (angle.cos(), angle.sin());
        let walls = self.wall_distance(origin, dir);
        let nearest = self
            .cylinders
            .iter()
            .filter_map(|c| c.ray_distance(origin, dir))
            .chain(walls)
            .fold(f64::INFINITY, f64::min);

        if nearest <= max_range {
            Some(nearest)
        } else {
            None
        }
    }

    fn wall_distance(&self, origin: Point2D, dir: (f64, f64)) -> Option<f64> {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let tx = if dir.0 > 0.0 {
            (half_w - origin.x) / dir.0
        } else if dir.0 < 0.0 {
            (-half_w - origin.x) / dir.0
        } else {
            f64::INFINITY
        };
        let ty = if dir.1 > 0.0 {
            (half_h - origin.y) / dir.1
        } else if dir.1 < 0.0 {
            (-half_h - origin.y) / dir.1
        } else {
            f64::INFINITY
        };

        let t = tx.min(ty);
        if t.is_finite() {
            Some(t.max(0.0))
        } else {
            None
        }
    }
}
