use anyhow::{Context, Result};
use route_api::{ApiRoute, ApiRoutes, DeployConfig, EnvironmentVariable, Workload};
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn read_config(path: &Path) -> Result<DeployConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;
    serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse configuration file {}", path.display()))
}

/// API routes file; a missing path means no API routes
pub fn read_api_routes(path: Option<&Path>) -> Result<Vec<ApiRoute>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read API routes {}", path.display()))?;
    let routes: ApiRoutes = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse API routes {}", path.display()))?;
    debug!("Loaded {} API routes", routes.routes.len());
    Ok(routes.routes)
}

pub fn read_workloads(path: Option<&Path>) -> Result<Vec<Workload>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read workloads {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse workloads {}", path.display()))
}

/// Variables passed as a JSON array; empty input means no variables
pub fn parse_variables(name: &str, raw: Option<&str>) -> Result<Vec<EnvironmentVariable>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).with_context(|| format!("failed to parse {}", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_api::VariableScope;

    #[test]
    fn test_parse_variables() {
        let raw = r#"[{"name":"LAGOON_SYSTEM_ROUTER_PATTERN","value":"${service}.example.com","scope":"internal_system"}]"#;
        let vars = parse_variables("LAGOON_PROJECT_VARIABLES", Some(raw)).unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].scope, VariableScope::InternalSystem);

        assert!(parse_variables("LAGOON_PROJECT_VARIABLES", None).unwrap().is_empty());
        assert!(parse_variables("LAGOON_PROJECT_VARIABLES", Some("  ")).unwrap().is_empty());
        let err = parse_variables("LAGOON_PROJECT_VARIABLES", Some("{")).unwrap_err();
        assert!(err.to_string().contains("LAGOON_PROJECT_VARIABLES"));
    }

    #[test]
    fn test_missing_optional_files() {
        assert!(read_api_routes(None).unwrap().is_empty());
        assert!(read_workloads(None).unwrap().is_empty());
        assert!(read_config(Path::new("/nonexistent/.lagoon.yml")).is_err());
    }
}
