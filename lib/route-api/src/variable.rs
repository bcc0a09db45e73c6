use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A project or environment variable as delivered by the control plane
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EnvironmentVariable {
    /// Variable name (e.g. `LAGOON_FASTLY_SERVICE_ID`)
    pub name: String,

    /// Raw variable value
    pub value: String,

    /// Visibility tier of this variable
    pub scope: VariableScope,
}

impl EnvironmentVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>, scope: VariableScope) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            scope,
        }
    }
}

/// Visibility tier of an environment variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VariableScope {
    /// Only visible while building images
    Build,
    /// Only visible to running workloads
    Runtime,
    /// Visible at build and run time
    Global,
    /// Container registry credentials
    ContainerRegistry,
    /// Platform-managed container registry credentials
    InternalContainerRegistry,
    /// Platform-managed settings, never exposed to workloads
    InternalSystem,
}

impl VariableScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableScope::Build => "build",
            VariableScope::Runtime => "runtime",
            VariableScope::Global => "global",
            VariableScope::ContainerRegistry => "container_registry",
            VariableScope::InternalContainerRegistry => "internal_container_registry",
            VariableScope::InternalSystem => "internal_system",
        }
    }
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
