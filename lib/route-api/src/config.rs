//! Route related parts of the deployment configuration file

use crate::route::{DeclaredRoutes, InsecurePolicy};
use serde::Deserialize;
use std::collections::BTreeMap;

/// The subset of the deployment configuration file the route engine reads
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeployConfig {
    #[serde(default)]
    pub routes: RoutesConfig,

    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl DeployConfig {
    /// Declared routes for one environment, empty when none are declared
    pub fn environment_routes(&self, environment: &str) -> DeclaredRoutes {
        self.environments
            .get(environment)
            .and_then(|env| env.routes.clone())
            .unwrap_or_default()
    }
}

/// Global route settings
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RoutesConfig {
    #[serde(default)]
    pub autogenerate: AutogenerateConfig,
}

/// Settings for routes synthesized from the router pattern
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutogenerateConfig {
    #[serde(default = "default_enabled", deserialize_with = "crate::lenient::bool")]
    pub enabled: bool,

    #[serde(default = "default_enabled", deserialize_with = "crate::lenient::bool")]
    pub allow_pullrequests: bool,

    /// Overrides the `Allow` insecure default of autogenerated routes
    #[serde(default)]
    pub insecure: Option<InsecurePolicy>,

    /// Subdomain prefixes added as alternative names
    #[serde(default)]
    pub prefixes: Vec<String>,
}

impl Default for AutogenerateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_pullrequests: true,
            insecure: None,
            prefixes: Vec::new(),
        }
    }
}

/// Per environment settings
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub routes: Option<DeclaredRoutes>,
}

fn default_enabled() -> bool {
    true
}
