//! Kinematic test bench for proximity-driven controllers
//!
//! Plays the host's part: owns the devices, instantiates a controller by
//! name, and calls it once per tick. A tick is sense -> control step ->
//! integrate. Moves that would overlap a wall or a cylinder are rejected
//! (the robot may still rotate in place) and counted as collisions.

pub mod arena;
pub mod config;
pub mod devices;
pub mod kinematics;

pub use arena::{Arena, ArenaConfig, Cylinder};
pub use config::{ControllerSection, ExperimentConfig, SimulationConfig, DEFAULT_CONFIG_PATH};
pub use devices::{ProximityRingConfig, SimulatedProximitySensor, SimulatedWheels};
pub use kinematics::{DifferentialDriveModel, FOOTBOT_BODY_RADIUS, FOOTBOT_INTERWHEEL_DISTANCE};

use std::sync::Arc;

use itertools::Itertools;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{ControllerError, ControllerResult, Pose2D, ProximitySensor, RobotController, WheelCommand};
use crate::control::{Encounter, PROXIMITY_DEVICE, WHEELS_DEVICE};
use crate::registry::{ControllerRegistry, DeviceRegistry};

/// Outcome of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Robot pose after every tick, starting with the initial pose
    pub trajectory: Vec<Pose2D>,
    /// Ticks whose move was rejected because it would overlap an obstacle
    pub collisions: usize,
    /// Ticks whose proximity snapshot showed a full-intensity reading
    pub contacts: usize,
    pub steps: usize,
}

impl SimulationReport {
    /// Length of the driven path [m]
    pub fn distance_travelled(&self) -> f64 {
        self.trajectory
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.position().distance(&b.position()))
            .sum()
    }
}

pub struct Simulation {
    arena: Arena,
    robot: DifferentialDriveModel,
    sensor: Arc<SimulatedProximitySensor>,
    wheels: Arc<SimulatedWheels>,
    controller: Box<dyn RobotController>,
    rng: StdRng,
    dt: f64,
    steps: usize,
    trajectory: Vec<Pose2D>,
    collisions: usize,
    contacts: usize,
}

impl Simulation {
    /// Build a randomly populated arena from `config.arena` and set up the run
    pub fn new(config: &ExperimentConfig, registry: &ControllerRegistry) -> ControllerResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.simulation.seed);
        let start = config.simulation.start_pose();
        let arena = Arena::random(&config.arena, start.position(), &mut rng);
        Self::build(arena, config, registry, rng)
    }

    /// Set up a run in a given arena
    pub fn with_arena(arena: Arena, config: &ExperimentConfig, registry: &ControllerRegistry) -> ControllerResult<Self> {
        let rng = StdRng::seed_from_u64(config.simulation.seed);
        Self::build(arena, config, registry, rng)
    }

    fn build(
        arena: Arena,
        config: &ExperimentConfig,
        registry: &ControllerRegistry,
        rng: StdRng,
    ) -> ControllerResult<Self> {
        if !(config.simulation.dt > 0.0) {
            return Err(ControllerError::InvalidParameter(format!(
                "dt must be > 0, got {}",
                config.simulation.dt
            )));
        }
        let start = config.simulation.start_pose();
        if arena.collides(start.position(), FOOTBOT_BODY_RADIUS) {
            return Err(ControllerError::InvalidParameter(format!(
                "start position ({}, {}) overlaps an obstacle",
                start.x, start.y
            )));
        }

        let sensor = Arc::new(SimulatedProximitySensor::new(config.sensor.clone())?);
        let wheels = Arc::new(SimulatedWheels::new());
        let mut devices = DeviceRegistry::new();
        devices.add_sensor(PROXIMITY_DEVICE, sensor.clone());
        devices.add_actuator(WHEELS_DEVICE, wheels.clone());

        let mut controller = registry.create(&config.controller.name)?;
        controller.init(&config.controller.params, &devices)?;
        info!(
            "simulation: controller <{}>, {} cylinders, {} steps of {} s",
            config.controller.name,
            arena.cylinders.len(),
            config.simulation.steps,
            config.simulation.dt
        );

        Ok(Self {
            arena,
            robot: DifferentialDriveModel::new(start),
            sensor,
            wheels,
            controller,
            rng,
            dt: config.simulation.dt,
            steps: config.simulation.steps,
            trajectory: vec![start],
            collisions: 0,
            contacts: 0,
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn pose(&self) -> Pose2D {
        self.robot.pose
    }

    /// Run one tick and return the command the controller issued
    pub fn step(&mut self) -> ControllerResult<WheelCommand> {
        self.sensor.sense(&self.arena, &self.robot.pose, &mut self.rng);
        if Encounter::classify(&self.sensor.readings()).is_contact() {
            self.contacts += 1;
        }

        self.controller.control_step()?;
        let command = self.wheels.take_command().unwrap_or_default();

        let next = self.robot.predict(&command, self.dt);
        if self.arena.collides(next.position(), FOOTBOT_BODY_RADIUS) {
            warn!("move to ({:.3}, {:.3}) rejected: collision", next.x, next.y);
            self.collisions += 1;
            self.robot.pose.yaw = next.yaw;
        } else {
            self.robot.pose = next;
        }
        self.trajectory.push(self.robot.pose);
        Ok(command)
    }

    /// Run all configured steps
    pub fn run(mut self) -> ControllerResult<SimulationReport> {
        for _ in 0..self.steps {
            self.step()?;
        }
        self.controller.destroy();

        let report = SimulationReport {
            trajectory: self.trajectory,
            collisions: self.collisions,
            contacts: self.contacts,
            steps: self.steps,
        };
        info!(
            "simulation finished: {:.2} m travelled, {} collisions, {} contacts",
            report.distance_travelled(),
            report.collisions,
            report.contacts
        );
        Ok(report)
    }
}
