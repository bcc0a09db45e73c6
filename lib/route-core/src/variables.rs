//! Scoped variable lookup

use crate::{Result, RouteError};
use route_api::{EnvironmentVariable, VariableScope};

/// Global Fastly override: `SERVICE_ID:WATCH[:SECRET_SUFFIX]`
pub const FASTLY_SERVICE_ID: &str = "LAGOON_FASTLY_SERVICE_ID";
/// Per-domain Fastly overrides: `DOMAIN:SERVICE_ID:WATCH[:SECRET_SUFFIX],...`
pub const FASTLY_SERVICE_IDS: &str = "LAGOON_FASTLY_SERVICE_IDS";
/// Pattern used to build autogenerated domains
pub const ROUTER_PATTERN: &str = "LAGOON_SYSTEM_ROUTER_PATTERN";

pub const ROUTE: &str = "LAGOON_ROUTE";
pub const ROUTES: &str = "LAGOON_ROUTES";
pub const AUTOGENERATED_ROUTES: &str = "LAGOON_AUTOGENERATED_ROUTES";

/// Scopes the Fastly overrides are read from
pub const FASTLY_SCOPES: &[VariableScope] = &[VariableScope::Build, VariableScope::Global];

/// Find the first variable named `name` whose scope is in `scopes`.
///
/// An empty `scopes` slice matches every scope.
pub fn lookup_variable<'a>(
    name: &str,
    scopes: &[VariableScope],
    variables: &'a [EnvironmentVariable],
) -> Result<&'a EnvironmentVariable> {
    variables
        .iter()
        .find(|v| v.name == name && (scopes.is_empty() || scopes.contains(&v.scope)))
        .ok_or_else(|| RouteError::VariableNotFound {
            name: name.to_string(),
        })
}

/// Combine project and environment variables into one set.
///
/// Environment variables replace project variables of the same name in
/// place; environment-only variables are appended in their own order.
pub fn merge_variables(
    project: Vec<EnvironmentVariable>,
    environment: Vec<EnvironmentVariable>,
) -> Vec<EnvironmentVariable> {
    let mut merged = project;
    for var in environment {
        match merged.iter_mut().find(|existing| existing.name == var.name) {
            Some(existing) => *existing = var,
            None => merged.push(var),
        }
    }
    merged
}
