//! Controller factories registered under a stable name

use std::collections::BTreeMap;

use log::debug;

use crate::common::{ControllerError, ControllerResult, RobotController};
use crate::control::FootBotDiffusion;

/// Name under which the diffusion controller is registered
pub const DIFFUSION_CONTROLLER_NAME: &str = "footbot_diffusion_controller";

pub type ControllerFactory = Box<dyn Fn() -> Box<dyn RobotController> + Send + Sync>;

#[derive(Default)]
pub struct ControllerRegistry {
    factories: BTreeMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every controller this crate provides
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            DIFFUSION_CONTROLLER_NAME.to_string(),
            Box::new(|| Box::new(FootBotDiffusion::new()) as Box<dyn RobotController>),
        );
        registry
    }

    pub fn register<F>(&mut self, name: &str, factory: F) -> ControllerResult<()>
    where
        F: Fn() -> Box<dyn RobotController> + Send + Sync + 'static,
    {
        if self.factories.contains_key(name) {
            return Err(ControllerError::DuplicateController(name.to_string()));
        }
        debug!("registering controller <{}>", name);
        self.factories.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Instantiate a fresh, uninitialized controller
    pub fn create(&self, name: &str) -> ControllerResult<Box<dyn RobotController>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ControllerError::UnknownController(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(|k| k.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DeviceRegistry;

    struct Idle;

    impl RobotController for Idle {
        fn init(&mut self, _node: &toml::Table, _devices: &DeviceRegistry) -> ControllerResult<()> {
            Ok(())
        }

        fn control_step(&mut self) -> ControllerResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builtin_contains_diffusion() {
        let registry = ControllerRegistry::with_builtin();
        assert!(registry.contains(DIFFUSION_CONTROLLER_NAME));
        assert!(registry.create(DIFFUSION_CONTROLLER_NAME).is_ok());
    }

    #[test]
    fn test_unknown_controller() {
        let registry = ControllerRegistry::new();
        assert!(matches!(
            registry.create("footbot_flocking_controller"),
            Err(ControllerError::UnknownController(_))
        ));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ControllerRegistry::with_builtin();
        registry.register("idle", || Box::new(Idle) as Box<dyn RobotController>).unwrap();
        assert!(matches!(
            registry.register(DIFFUSION_CONTROLLER_NAME, || Box::new(Idle) as Box<dyn RobotController>),
            Err(ControllerError::DuplicateController(_))
        ));
        assert_eq!(registry.names(), vec![DIFFUSION_CONTROLLER_NAME, "idle"]);
    }

    #[test]
    fn test_created_controller_needs_init() {
        let registry = ControllerRegistry::with_builtin();
        let mut controller = registry.create(DIFFUSION_CONTROLLER_NAME).unwrap();
        assert!(matches!(controller.control_step(), Err(ControllerError::NotInitialized)));
    }
}
