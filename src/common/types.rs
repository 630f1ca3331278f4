//! Common types used throughout footbot_diffusion

use nalgebra::Vector2;
use std::ops::{Add, AddAssign};

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// 2D pose (position + orientation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0 }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Normalize yaw to (-pi, pi]
    pub fn normalize_yaw(&mut self) {
        self.yaw = normalize_angle(self.yaw);
    }
}

/// Wrap an angle into (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::PI;
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// One proximity sensor sample: intensity in [0, 1] and bearing [rad]
/// relative to the robot heading, counter-clockwise positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityReading {
    pub value: f64,
    pub angle: f64,
}

impl ProximityReading {
    pub fn new(value: f64, angle: f64) -> Self {
        Self { value, angle }
    }

    /// Convenience constructor taking the bearing in degrees
    pub fn from_degrees(value: f64, angle_deg: f64) -> Self {
        Self { value, angle: angle_deg.to_radians() }
    }

    /// Same reading seen from the other side of the heading axis
    pub fn mirrored(&self) -> Self {
        Self { value: self.value, angle: -self.angle }
    }
}

/// Aggregate obstacle direction for one control cycle.
///
/// Angles follow the `atan2` convention: counter-clockwise positive,
/// so a positive angle means the obstacle mass sits on the robot's left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleVector(pub Vector2<f64>);

impl ObstacleVector {
    pub fn zero() -> Self {
        Self(Vector2::zeros())
    }

    /// Build from a length and an angle [rad]
    pub fn from_polar(length: f64, angle: f64) -> Self {
        Self(Vector2::new(length * angle.cos(), length * angle.sin()))
    }

    pub fn length(&self) -> f64 {
        self.0.norm()
    }

    /// Angle in (-pi, pi]; zero for the zero vector
    pub fn angle(&self) -> f64 {
        self.0.y.atan2(self.0.x)
    }
}

impl Default for ObstacleVector {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for ObstacleVector {
    type Output = ObstacleVector;

    fn add(self, rhs: ObstacleVector) -> ObstacleVector {
        ObstacleVector(self.0 + rhs.0)
    }
}

impl AddAssign for ObstacleVector {
    fn add_assign(&mut self, rhs: ObstacleVector) {
        self.0 += rhs.0;
    }
}

/// Left/right wheel linear speeds, positive = forward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelCommand {
    pub left: f64,
    pub right: f64,
}

impl WheelCommand {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    pub fn straight(speed: f64) -> Self {
        Self { left: speed, right: speed }
    }

    pub fn stop() -> Self {
        Self { left: 0.0, right: 0.0 }
    }

    /// Swap sides, i.e. the command for the mirrored situation
    pub fn swapped(&self) -> Self {
        Self { left: self.right, right: self.left }
    }

    pub fn is_straight(&self) -> bool {
        self.left == self.right
    }
}

impl Default for WheelCommand {
    fn default() -> Self {
        Self::stop()
    }
}
