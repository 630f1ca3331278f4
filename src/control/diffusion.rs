//! Diffusion obstacle avoidance controller for the foot-bot
//!
//! Every proximity reading is turned into a vector pointing at the
//! sensed obstacle, with a length that grows super-linearly with the
//! reading intensity. The vectors are summed and the resultant decides
//! the wheel speeds: below `delta` the robot goes straight, above it the
//! wheel on the obstacle side is slowed by `-cos(angle)` so that the
//! robot turns away. Close obstacles dominate far ones.
//!
//! The controller keeps no state between cycles.

use std::sync::Arc;

use log::{debug, info};

use crate::common::{
    ControllerError, ControllerResult, DifferentialSteeringActuator, ObstacleVector,
    ProximityReading, ProximitySensor, RobotController, WheelCommand,
};
use crate::control::diagnostics::Encounter;
use crate::control::params::DiffusionParams;
use crate::registry::DeviceRegistry;

/// Device key of the wheel actuator
pub const WHEELS_DEVICE: &str = "differential_steering";
/// Device key of the proximity sensor ring
pub const PROXIMITY_DEVICE: &str = "footbot_proximity";

/// Length of the obstacle vector contributed by one reading: `2 (e^(r^2) - 1)`
pub fn expo_scale(reading: f64) -> f64 {
    2.0 * ((reading * reading).exp() - 1.0)
}

/// Scaling applied to the wheel on the obstacle side, in [-1, 1]
pub fn turn_factor(angle: f64) -> f64 {
    -angle.cos()
}

/// Sum of the exponentially scaled readings. Zero readings are skipped.
pub fn obstacle_vector(readings: &[ProximityReading]) -> ObstacleVector {
    readings
        .iter()
        .filter(|r| r.value > 0.0)
        .fold(ObstacleVector::zero(), |acc, r| {
            acc + ObstacleVector::from_polar(expo_scale(r.value), r.angle)
        })
}

/// Diffusion obstacle avoidance controller.
///
/// Drives straight until the weighted sum of proximity readings grows past
/// `delta`, then slows the wheel on the side away from the obstacle. Device
/// handles are attached by [`RobotController::init`]; [`FootBotDiffusion::step`]
/// works without them.
pub struct FootBotDiffusion {
    params: DiffusionParams,
    wheels: Option<Arc<dyn DifferentialSteeringActuator>>,
    proximity: Option<Arc<dyn ProximitySensor>>,
}

impl FootBotDiffusion {
    pub fn new() -> Self {
        Self::with_params(DiffusionParams::default())
    }

    /// Controller with fixed parameters and no devices attached, for
    /// driving [`FootBotDiffusion::step`] directly
    pub fn with_params(params: DiffusionParams) -> Self {
        FootBotDiffusion {
            params,
            wheels: None,
            proximity: None,
        }
    }

    pub fn params(&self) -> &DiffusionParams {
        &self.params
    }

    /// Map one sensor snapshot to a wheel command
    pub fn step(&self, readings: &[ProximityReading]) -> WheelCommand {
        self.decide(&obstacle_vector(readings))
    }

    /// Wheel command for an already aggregated obstacle vector
    pub fn decide(&self, obstacle: &ObstacleVector) -> WheelCommand {
        let velocity = self.params.velocity;
        if obstacle.length() <= self.params.delta {
            return WheelCommand::straight(velocity);
        }

        let angle = obstacle.angle();
        let f = turn_factor(angle);
        if angle > 0.0 {
            WheelCommand::new(velocity, velocity * f)
        } else {
            WheelCommand::new(velocity * f, velocity)
        }
    }
}

impl Default for FootBotDiffusion {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotController for FootBotDiffusion {
    fn init(&mut self, node: &toml::Table, devices: &DeviceRegistry) -> ControllerResult<()> {
        let wheels = devices.actuator(WHEELS_DEVICE)?;
        let proximity = devices.sensor(PROXIMITY_DEVICE)?;
        self.params = DiffusionParams::from_node(node)?;
        self.wheels = Some(wheels);
        self.proximity = Some(proximity);

        info!(
            "footbot diffusion: alpha={} deg, delta={}, velocity={}",
            self.params.alpha, self.params.delta, self.params.velocity
        );
        Ok(())
    }

    fn control_step(&mut self) -> ControllerResult<()> {
        let (wheels, proximity) = match (&self.wheels, &self.proximity) {
            (Some(w), Some(p)) => (w, p),
            _ => return Err(ControllerError::NotInitialized),
        };

        let readings = proximity.readings();
        let obstacle = obstacle_vector(&readings);
        let command = self.decide(&obstacle);
        debug!(
            "obstacle |v|={:.3} angle={:.3} -> left={:.3} right={:.3}",
            obstacle.length(),
            obstacle.angle(),
            command.left,
            command.right
        );
        wheels.apply(command);

        Encounter::classify(&readings).log();
        Ok(())
    }

    fn destroy(&mut self) {
        self.wheels = None;
        self.proximity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{E, PI};
    use std::sync::Mutex;

    struct FixedProximity(Vec<ProximityReading>);

    impl ProximitySensor for FixedProximity {
        fn readings(&self) -> Vec<ProximityReading> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingWheels {
        commands: Mutex<Vec<WheelCommand>>,
    }

    impl DifferentialSteeringActuator for RecordingWheels {
        fn set_linear_velocity(&self, left: f64, right: f64) {
            self.commands.lock().unwrap().push(WheelCommand::new(left, right));
        }
    }

    fn devices(readings: Vec<ProximityReading>) -> (DeviceRegistry, Arc<RecordingWheels>) {
        let wheels = Arc::new(RecordingWheels::default());
        let mut devices = DeviceRegistry::new();
        devices.add_actuator(WHEELS_DEVICE, wheels.clone());
        devices.add_sensor(PROXIMITY_DEVICE, Arc::new(FixedProximity(readings)));
        (devices, wheels)
    }

    #[test]
    fn test_empty_readings_go_straight() {
        let controller = FootBotDiffusion::new();
        assert_eq!(controller.step(&[]), WheelCommand::new(2.5, 2.5));
    }

    #[test]
    fn test_scenario_obstacle_on_the_left() {
        let controller = FootBotDiffusion::new();
        let readings = [ProximityReading::from_degrees(1.0, 30.0)];

        assert_relative_eq!(obstacle_vector(&readings).length(), 2.0 * (E - 1.0), epsilon = 1e-12);
        let cmd = controller.step(&readings);
        assert_relative_eq!(cmd.left, 2.5);
        assert_relative_eq!(cmd.right, -2.5 * 30.0_f64.to_radians().cos(), epsilon = 1e-12);
        assert!((cmd.right + 2.165).abs() < 1e-3);
    }

    #[test]
    fn test_weak_reading_below_delta_goes_straight() {
        let controller = FootBotDiffusion::new();
        let readings = [ProximityReading::new(0.3, 0.0)];

        let magnitude = obstacle_vector(&readings).length();
        assert!((magnitude - 0.188).abs() < 1e-3);
        assert_eq!(controller.step(&readings), WheelCommand::straight(2.5));
    }

    #[test]
    fn test_resultant_equal_to_delta_goes_straight() {
        let readings = [ProximityReading::new(0.6, 0.4), ProximityReading::new(0.2, -1.1)];
        let delta = obstacle_vector(&readings).length();
        let controller = FootBotDiffusion::with_params(DiffusionParams::default().with_delta(delta));
        assert_eq!(controller.step(&readings), WheelCommand::straight(2.5));

        let tighter = FootBotDiffusion::with_params(DiffusionParams::default().with_delta(delta * 0.999));
        assert!(!tighter.step(&readings).is_straight());
    }

    #[test]
    fn test_mirrored_readings_swap_wheels() {
        let controller = FootBotDiffusion::new();
        let cases = vec![
            vec![ProximityReading::from_degrees(0.9, 30.0)],
            vec![ProximityReading::from_degrees(0.7, 80.0), ProximityReading::from_degrees(0.4, -15.0)],
            vec![
                ProximityReading::from_degrees(0.95, 170.0),
                ProximityReading::from_degrees(0.5, 120.0),
                ProximityReading::from_degrees(0.0, -60.0),
            ],
        ];

        for readings in cases {
            let mirrored: Vec<_> = readings.iter().map(|r| r.mirrored()).collect();
            let cmd = controller.step(&readings);
            let mirrored_cmd = controller.step(&mirrored).swapped();
            assert_relative_eq!(cmd.left, mirrored_cmd.left, epsilon = 1e-12);
            assert_relative_eq!(cmd.right, mirrored_cmd.right, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_expo_scale_strictly_increasing() {
        assert_eq!(expo_scale(0.0), 0.0);
        let mut previous = expo_scale(0.0);
        for i in 1..=100 {
            let current = expo_scale(i as f64 / 100.0);
            assert!(current > previous);
            previous = current;
        }

        for &r in &[0.05, 0.2, 0.35, 0.49] {
            let single = obstacle_vector(&[ProximityReading::new(r, 0.7)]).length();
            let doubled = obstacle_vector(&[ProximityReading::new(2.0 * r, 0.7)]).length();
            assert!(doubled > single);
        }
    }

    #[test]
    fn test_turn_factor_bounds_and_wheel_speed() {
        let controller = FootBotDiffusion::new();
        for i in -36..=36 {
            let angle = i as f64 * PI / 36.0;
            let f = turn_factor(angle);
            assert!((-1.0..=1.0).contains(&f));

            let readings = [ProximityReading::new(1.0, angle)];
            let obstacle = obstacle_vector(&readings);
            let expected = 2.5 * turn_factor(obstacle.angle());
            let cmd = controller.step(&readings);
            if obstacle.angle() > 0.0 {
                assert_eq!(cmd.left, 2.5);
                assert_eq!(cmd.right, expected);
            } else {
                assert_eq!(cmd.left, expected);
                assert_eq!(cmd.right, 2.5);
            }
        }
    }

    #[test]
    fn test_obstacle_ahead_reverses_inner_wheel() {
        let controller = FootBotDiffusion::new();
        let cmd = controller.step(&[ProximityReading::from_degrees(0.9, -5.0)]);
        assert!(cmd.left < 0.0);
        assert_eq!(cmd.right, 2.5);
    }

    #[test]
    fn test_abeam_obstacle_pivots() {
        let controller = FootBotDiffusion::new();
        let cmd = controller.step(&[ProximityReading::new(0.9, PI / 2.0)]);
        assert_eq!(cmd.left, 2.5);
        assert!(cmd.right.abs() < 1e-12);
    }

    #[test]
    fn test_wheel_speeds_bounded_by_velocity() {
        let controller = FootBotDiffusion::with_params(DiffusionParams::new(10.0, 0.1, 4.0));
        for i in 0..24 {
            let angle = -PI + i as f64 * PI / 12.0;
            let cmd = controller.step(&[
                ProximityReading::new(0.8, angle),
                ProximityReading::new(0.3, angle + 0.4),
            ]);
            assert!(cmd.left.abs() <= 4.0 + 1e-12);
            assert!(cmd.right.abs() <= 4.0 + 1e-12);
        }
    }

    #[test]
    fn test_init_reads_node_and_control_step_emits_once() {
        let (devices, wheels) = devices(vec![ProximityReading::from_degrees(1.0, 30.0)]);
        let node: toml::Table = toml::from_str("velocity = 5.0\nangle_threshold = 20.0").unwrap();

        let mut controller = FootBotDiffusion::new();
        controller.init(&node, &devices).unwrap();
        assert!((controller.params().velocity - 5.0).abs() < 1e-10);
        assert!((controller.params().delta - 0.5).abs() < 1e-10);

        controller.control_step().unwrap();
        let commands = wheels.commands.lock().unwrap();
        assert_eq!(commands.len(), 1);
        assert_relative_eq!(commands[0].left, 5.0);
        assert!(commands[0].right < 0.0);
    }

    #[test]
    fn test_init_fails_fast_without_devices() {
        let mut devices = DeviceRegistry::new();
        devices.add_sensor(PROXIMITY_DEVICE, Arc::new(FixedProximity(vec![])));

        let mut controller = FootBotDiffusion::new();
        let err = controller.init(&toml::Table::new(), &devices).unwrap_err();
        assert!(matches!(err, ControllerError::MissingDevice(ref name) if name == WHEELS_DEVICE));
        assert!(matches!(controller.control_step(), Err(ControllerError::NotInitialized)));
    }

    #[test]
    fn test_destroy_releases_devices() {
        let (devices, _wheels) = devices(vec![]);
        let mut controller = FootBotDiffusion::new();
        controller.init(&toml::Table::new(), &devices).unwrap();
        controller.destroy();
        assert!(matches!(controller.control_step(), Err(ControllerError::NotInitialized)));
    }
}
