use std::{collections::HashMap, fmt};

use serde_json::{Map, Value};
use tracing::warn;

use crate::{
    controller::{BaseController, Controller, BASE_CONTROLLER_TYPE},
    error::{Result, ViewStateError},
};

/// Constructor arguments, forwarded untouched to the resolved type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerArgs {
    pub positional: Vec<Value>,
    pub keyword: Map<String, Value>,
}

impl ControllerArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn with_keyword(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

/// Resolves a controller type path into a fresh, unattached controller.
pub trait ControllerFactory: Send + Sync {
    fn init_controller(&self, type_path: &str, args: ControllerArgs)
        -> Result<Box<dyn Controller>>;
}

pub type Constructor =
    Box<dyn Fn(ControllerArgs) -> Result<Box<dyn Controller>> + Send + Sync>;

/// Type-path to constructor table, filled in at startup.
#[derive(Default)]
pub struct ControllerRegistry {
    constructors: HashMap<String, Constructor>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with [`BaseController`] available as `controller.base`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BASE_CONTROLLER_TYPE, |args| {
            Ok(Box::new(BaseController::with_args(args)))
        });
        registry
    }

    pub fn register<F>(&mut self, type_path: impl Into<String>, constructor: F)
    where
        F: Fn(ControllerArgs) -> Result<Box<dyn Controller>> + Send + Sync + 'static,
    {
        let type_path = type_path.into();
        if self
            .constructors
            .insert(type_path.clone(), Box::new(constructor))
            .is_some()
        {
            warn!(%type_path, "replaced previously registered controller type");
        }
    }

    pub fn contains(&self, type_path: &str) -> bool {
        self.constructors.contains_key(type_path)
    }

    pub fn type_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl ControllerFactory for ControllerRegistry {
    fn init_controller(
        &self,
        type_path: &str,
        args: ControllerArgs,
    ) -> Result<Box<dyn Controller>> {
        let constructor =
            self.constructors
                .get(type_path)
                .ok_or_else(|| ViewStateError::UnknownControllerType {
                    type_path: type_path.to_owned(),
                })?;
        constructor(args)
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("type_paths", &self.type_paths())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/factory_tests.rs"]
mod tests;
