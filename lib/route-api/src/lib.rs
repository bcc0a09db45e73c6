//! Route API types for environment route resolution
//!
//! This library defines the data exchanged with the route resolution engine:
//! - EnvironmentVariable: scoped project/environment variables
//! - RouteEntry: declarative routes from the deployment configuration file
//! - ApiRoute: partially specified routes supplied by the control-plane API
//! - ResolvedRoute: fully defaulted routes handed to the manifest renderer
//! - Workload: workload metadata consumed by route autogeneration

pub mod config;
pub mod fastly;
pub mod lenient;
pub mod resolved;
pub mod route;
pub mod variable;
pub mod workload;

pub use config::{AutogenerateConfig, DeployConfig, EnvironmentConfig, RoutesConfig};
pub use fastly::FastlyConfig;
pub use resolved::{ApiRoute, ApiRoutes, ResolvedRoute};
pub use route::{DeclaredRoutes, IngressOverride, InsecurePolicy, PathRoute, RouteEntry};
pub use variable::{EnvironmentVariable, VariableScope};
pub use workload::Workload;

/// Label and annotation prefix used on generated resources
pub const LABEL_PREFIX: &str = "lagoon.sh";
