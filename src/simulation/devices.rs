//! Simulated foot-bot proximity ring and wheel actuator

use std::f64::consts::PI;
use std::sync::{Mutex, PoisonError};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::common::{
    normalize_angle, ControllerError, ControllerResult, DifferentialSteeringActuator, Point2D, Pose2D,
    ProximityReading, ProximitySensor, WheelCommand,
};
use crate::simulation::arena::Arena;
use crate::simulation::kinematics::FOOTBOT_BODY_RADIUS;

/// Configuration of the proximity sensor ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityRingConfig {
    pub num_sensors: usize,
    /// Distance of each sensor from the robot centre [m]
    pub ring_radius: f64,
    /// Sensing range measured from the sensor [m]
    pub range: f64,
    /// Standard deviation of the Gaussian noise added to non-zero readings
    pub noise_std: f64,
}

impl Default for ProximityRingConfig {
    fn default() -> Self {
        Self {
            num_sensors: 24,
            ring_radius: FOOTBOT_BODY_RADIUS,
            range: 0.1,
            noise_std: 0.0,
        }
    }
}

/// Ray-cast proximity ring. A hit at distance `d` reads `e^-d`, no hit reads 0.
pub struct SimulatedProximitySensor {
    config: ProximityRingConfig,
    angles: Vec<f64>,
    noise: Option<Normal<f64>>,
    snapshot: Mutex<Vec<ProximityReading>>,
}

impl SimulatedProximitySensor {
    pub fn new(config: ProximityRingConfig) -> ControllerResult<Self> {
        if config.num_sensors == 0 {
            return Err(ControllerError::InvalidParameter("num_sensors must be > 0".to_string()));
        }
        let noise = if config.noise_std > 0.0 {
            let normal = Normal::new(0.0, config.noise_std)
                .map_err(|e| ControllerError::InvalidParameter(format!("noise_std: {}", e)))?;
            Some(normal)
        } else {
            None
        };

        let n = config.num_sensors as f64;
        let angles = (0..config.num_sensors)
            .map(|i| normalize_angle(PI / n + i as f64 * 2.0 * PI / n))
            .collect();

        Ok(Self {
            config,
            angles,
            noise,
            snapshot: Mutex::new(Vec::new()),
        })
    }

    /// Sensor bearings relative to the heading
    pub fn sensor_angles(&self) -> &[f64] {
        &self.angles
    }

    /// Noise-free readings for a robot at `pose`
    pub fn measure(&self, arena: &Arena, pose: &Pose2D) -> Vec<ProximityReading> {
        self.angles
            .iter()
            .map(|&bearing| {
                let heading = pose.yaw + bearing;
                let origin = Point2D::new(
                    pose.x + self.config.ring_radius * heading.cos(),
                    pose.y + self.config.ring_radius * heading.sin(),
                );
                let value = arena
                    .ray_distance(origin, heading, self.config.range)
                    .map_or(0.0, |d| (-d).exp());
                ProximityReading::new(value, bearing)
            })
            .collect()
    }

    /// Take a new snapshot, adding noise to the readings that hit something
    pub fn sense<R: Rng>(&self, arena: &Arena, pose: &Pose2D, rng: &mut R) {
        let mut readings = self.measure(arena, pose);
        if let Some(noise) = &self.noise {
            for reading in readings.iter_mut().filter(|r| r.value > 0.0) {
                reading.value = (reading.value + noise.sample(rng)).clamp(0.0, 1.0);
            }
        }
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = readings;
    }
}

impl ProximitySensor for SimulatedProximitySensor {
    fn readings(&self) -> Vec<ProximityReading> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Wheels that remember the last command they were given
#[derive(Default)]
pub struct SimulatedWheels {
    last: Mutex<Option<WheelCommand>>,
}

impl SimulatedWheels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending command, if any
    pub fn take_command(&self) -> Option<WheelCommand> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

impl DifferentialSteeringActuator for SimulatedWheels {
    fn set_linear_velocity(&self, left: f64, right: f64) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(WheelCommand::new(left, right));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sensor_layout() {
        let sensor = SimulatedProximitySensor::new(ProximityRingConfig::default()).unwrap();
        let angles = sensor.sensor_angles();
        assert_eq!(angles.len(), 24);
        assert!((angles[0] - PI / 24.0).abs() < 1e-10);
        assert!((angles[23] + PI / 24.0).abs() < 1e-10);
        assert!(angles.iter().all(|a| *a > -PI && *a <= PI));
    }

    #[test]
    fn test_front_obstacle_is_sensed() {
        let sensor = SimulatedProximitySensor::new(ProximityRingConfig::default()).unwrap();
        let arena = Arena::new(10.0, 10.0).with_cylinder(Point2D::new(0.25, 0.0), 0.1);
        let readings = sensor.measure(&arena, &Pose2D::origin());

        let front = readings.iter().find(|r| (r.angle - PI / 24.0).abs() < 1e-10).unwrap();
        assert!(front.value > 0.9 && front.value < 1.0);
        assert!(readings.iter().filter(|r| r.angle.abs() > PI / 2.0).all(|r| r.value == 0.0));
    }

    #[test]
    fn test_readings_follow_heading() {
        let sensor = SimulatedProximitySensor::new(ProximityRingConfig::default()).unwrap();
        let arena = Arena::new(10.0, 10.0).with_cylinder(Point2D::new(0.0, 0.25), 0.1);
        let readings = sensor.measure(&arena, &Pose2D::new(0.0, 0.0, PI / 2.0));
        let strongest = readings
            .iter()
            .max_by(|a, b| a.value.total_cmp(&b.value))
            .unwrap();
        assert!(strongest.angle.abs() < 0.2);
    }

    #[test]
    fn test_sense_stores_snapshot_with_bounded_noise() {
        let config = ProximityRingConfig { noise_std: 0.05, ..Default::default() };
        let sensor = SimulatedProximitySensor::new(config).unwrap();
        let arena = Arena::new(10.0, 10.0).with_cylinder(Point2D::new(0.2, 0.0), 0.1);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(sensor.readings().is_empty());
        sensor.sense(&arena, &Pose2D::origin(), &mut rng);
        let readings = sensor.readings();
        assert_eq!(readings.len(), 24);
        assert!(readings.iter().all(|r| (0.0..=1.0).contains(&r.value)));
        assert!(readings.iter().filter(|r| r.angle.abs() > PI / 2.0).all(|r| r.value == 0.0));
    }

    #[test]
    fn test_invalid_ring() {
        let config = ProximityRingConfig { num_sensors: 0, ..Default::default() };
        assert!(SimulatedProximitySensor::new(config).is_err());
    }

    #[test]
    fn test_wheels_take_command() {
        let wheels = SimulatedWheels::new();
        assert!(wheels.take_command().is_none());
        wheels.set_linear_velocity(1.0, 2.0);
        assert_eq!(wheels.take_command(), Some(WheelCommand::new(1.0, 2.0)));
        assert!(wheels.take_command().is_none());
    }
}
