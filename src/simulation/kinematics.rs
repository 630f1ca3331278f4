//! Differential drive kinematics of the foot-bot

use crate::common::{Pose2D, WheelCommand};

/// Radius of the foot-bot body [m]
pub const FOOTBOT_BODY_RADIUS: f64 = 0.085;
/// Distance between the two wheels [m]
pub const FOOTBOT_INTERWHEEL_DISTANCE: f64 = 0.14;
/// Wheel commands are expressed in cm/s
const CM_PER_M: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDriveModel {
    pub pose: Pose2D,
    pub interwheel_distance: f64,
}

impl DifferentialDriveModel {
    pub fn new(pose: Pose2D) -> Self {
        Self {
            pose,
            interwheel_distance: FOOTBOT_INTERWHEEL_DISTANCE,
        }
    }

    /// Linear [m/s] and angular [rad/s] velocity for a wheel command
    pub fn twist(&self, command: &WheelCommand) -> (f64, f64) {
        let left = command.left / CM_PER_M;
        let right = command.right / CM_PER_M;
        ((left + right) / 2.0, (right - left) / self.interwheel_distance)
    }

    /// Pose after applying `command` for `dt` seconds
    pub fn predict(&self, command: &WheelCommand, dt: f64) -> Pose2D {
        let (v, omega) = self.twist(command);
        let mut next = Pose2D::new(
            self.pose.x + v * self.pose.yaw.cos() * dt,
            self.pose.y + v * self.pose.yaw.sin() * dt,
            self.pose.yaw + omega * dt,
        );
        next.normalize_yaw();
        next
    }

    pub fn step(&mut self, command: &WheelCommand, dt: f64) {
        self.pose = self.predict(command, dt);
    }
}
