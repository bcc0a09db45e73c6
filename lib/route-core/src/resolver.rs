use crate::autogen::{generate_autogenerated_routes, AutogeneratedRoute};
use crate::context::BuildContext;
use crate::defaults::RouteDefaults;
use crate::generate::generate_routes;
use crate::merge::merge_routes;
use crate::summary::RouteSummary;
use crate::{Result, RouteError};
use route_api::{ApiRoute, AutogenerateConfig, DeclaredRoutes, EnvironmentVariable, ResolvedRoute, Workload};
use serde::Serialize;
use tracing::{error, info, warn};

/// Inputs of one resolution run
#[derive(Clone, Copy, Debug)]
pub struct ResolveInput<'a> {
    pub declared: &'a DeclaredRoutes,
    pub api_routes: &'a [ApiRoute],
    pub variables: &'a [EnvironmentVariable],
    pub workloads: &'a [Workload],
    pub autogenerate: &'a AutogenerateConfig,
}

/// Routes of one resolution run
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResolvedRoutes {
    pub routes: Vec<ResolvedRoute>,
    pub autogenerated: Vec<AutogeneratedRoute>,
    pub summary: RouteSummary,
}

/// Outcome of [`RouteResolver::resolve`]
///
/// A failed autogeneration leaves the merged routes intact; `resolved` then
/// carries no autogenerated routes and the failure is kept in
/// `autogenerate_error`.
#[derive(Debug)]
pub struct Resolution {
    pub resolved: ResolvedRoutes,
    pub autogenerate_error: Option<RouteError>,
}

impl Resolution {
    /// The routes, or the autogeneration failure if there was one
    pub fn into_result(self) -> Result<ResolvedRoutes> {
        match self.autogenerate_error {
            Some(err) => Err(err),
            None => Ok(self.resolved),
        }
    }
}

/// Resolves the routes of one environment
pub struct RouteResolver {
    defaults: RouteDefaults,
    context: BuildContext,
}

impl RouteResolver {
    pub fn new(defaults: RouteDefaults, context: BuildContext) -> Self {
        Self { defaults, context }
    }

    /// Declared routes merged with the API routes
    pub fn resolve_routes(&self, input: &ResolveInput<'_>) -> Result<Vec<ResolvedRoute>> {
        let generated = generate_routes(input.declared, input.variables, &self.defaults)?;
        merge_routes(generated, input.api_routes, input.variables, &self.defaults)
    }

    /// Autogenerated routes, empty when autogeneration is skipped for this
    /// build
    pub fn resolve_autogenerated(&self, input: &ResolveInput<'_>) -> Result<Vec<AutogeneratedRoute>> {
        if !self.autogenerate_enabled(input.autogenerate) {
            return Ok(Vec::new());
        }
        generate_autogenerated_routes(
            input.workloads,
            input.autogenerate,
            &self.context,
            input.variables,
            &self.defaults,
        )
    }

    /// Resolve both route sets and summarize them.
    ///
    /// Errors in declared or API routes fail the whole run. Autogeneration
    /// errors are reported in the returned [`Resolution`].
    pub fn resolve(&self, input: &ResolveInput<'_>) -> Result<Resolution> {
        let routes = self.resolve_routes(input)?;

        let (autogenerated, autogenerate_error) = match self.resolve_autogenerated(input) {
            Ok(autogenerated) => (autogenerated, None),
            Err(err) => {
                error!("Unable to autogenerate routes for {}: {}", self.context.environment, err);
                (Vec::new(), Some(err))
            }
        };

        let summary = RouteSummary::from_routes(&routes, &autogenerated);
        info!(
            "Resolved {} routes and {} autogenerated routes for {}/{}",
            routes.len(),
            autogenerated.len(),
            self.context.project,
            self.context.environment
        );
        Ok(Resolution {
            resolved: ResolvedRoutes {
                routes,
                autogenerated,
                summary,
            },
            autogenerate_error,
        })
    }

    fn autogenerate_enabled(&self, config: &AutogenerateConfig) -> bool {
        if !config.enabled {
            warn!("Autogenerated routes are disabled for {}", self.context.environment);
            return false;
        }
        if self.context.is_pullrequest() && !config.allow_pullrequests {
            warn!(
                "Autogenerated routes are disabled for pull request environment {}",
                self.context.environment
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BuildType;
    use crate::variables::ROUTER_PATTERN;
    use crate::ErrorKind;
    use route_api::VariableScope;

    fn resolver(build_type: BuildType) -> RouteResolver {
        RouteResolver::new(
            RouteDefaults {
                ingress_class: "nginx".to_string(),
                ..Default::default()
            },
            BuildContext::new("demo", "main", build_type),
        )
    }

    fn workloads() -> Vec<Workload> {
        vec![Workload {
            name: "nginx".to_string(),
            service_type: "nginx".to_string(),
            autogenerated_routes_enabled: true,
            ..Default::default()
        }]
    }

    fn pattern() -> Vec<EnvironmentVariable> {
        vec![EnvironmentVariable::new(
            ROUTER_PATTERN,
            "${service}.${project}.${environment}.example.com",
            VariableScope::InternalSystem,
        )]
    }

    #[test]
    fn test_resolve_all_sources() {
        let declared: DeclaredRoutes = serde_yaml::from_str("- nginx:\n    - www.example.com\n").unwrap();
        let workloads = workloads();
        let variables = pattern();
        let config = AutogenerateConfig::default();
        let input = ResolveInput {
            declared: &declared,
            api_routes: &[],
            variables: &variables,
            workloads: &workloads,
            autogenerate: &config,
        };
        let resolved = resolver(BuildType::Branch).resolve(&input).unwrap().into_result().unwrap();
        assert_eq!(resolved.routes.len(), 1);
        assert_eq!(resolved.autogenerated.len(), 1);
        assert_eq!(resolved.summary.primary.as_deref(), Some("https://www.example.com"));
    }

    #[test]
    fn test_missing_router_pattern_keeps_merged_routes() {
        let declared: DeclaredRoutes = serde_yaml::from_str("- nginx:\n    - www.example.com\n").unwrap();
        let workloads = workloads();
        let config = AutogenerateConfig::default();
        let input = ResolveInput {
            declared: &declared,
            api_routes: &[],
            variables: &[],
            workloads: &workloads,
            autogenerate: &config,
        };
        let resolver = resolver(BuildType::Branch);
        let resolution = resolver.resolve(&input).unwrap();
        assert_eq!(resolution.resolved.routes.len(), 1);
        assert_eq!(resolution.resolved.routes[0].domain, "www.example.com");
        assert!(resolution.resolved.autogenerated.is_empty());
        assert_eq!(resolution.resolved.summary.primary.as_deref(), Some("https://www.example.com"));
        let err = resolution.autogenerate_error.as_ref().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingDependency);
        assert_eq!(resolution.into_result().unwrap_err().kind(), ErrorKind::MissingDependency);

        assert_eq!(resolver.resolve_routes(&input).unwrap().len(), 1);
        assert!(resolver.resolve_autogenerated(&input).is_err());
    }

    #[test]
    fn test_autogeneration_skipped_for_pullrequests() {
        let declared = DeclaredRoutes::new();
        let workloads = workloads();
        let config = AutogenerateConfig {
            allow_pullrequests: false,
            ..Default::default()
        };
        let input = ResolveInput {
            declared: &declared,
            api_routes: &[],
            variables: &[],
            workloads: &workloads,
            autogenerate: &config,
        };
        let resolution = resolver(BuildType::Pullrequest).resolve(&input).unwrap();
        assert!(resolution.autogenerate_error.is_none());
        assert!(resolution.resolved.autogenerated.is_empty());

        let resolution = resolver(BuildType::Branch).resolve(&input).unwrap();
        assert!(resolution.autogenerate_error.is_some());
    }

    #[test]
    fn test_autogeneration_disabled() {
        let declared = DeclaredRoutes::new();
        let workloads = workloads();
        let config = AutogenerateConfig {
            enabled: false,
            ..Default::default()
        };
        let input = ResolveInput {
            declared: &declared,
            api_routes: &[],
            variables: &[],
            workloads: &workloads,
            autogenerate: &config,
        };
        let resolved = resolver(BuildType::Branch).resolve(&input).unwrap().into_result().unwrap();
        assert!(resolved.autogenerated.is_empty());
        assert!(resolved.summary.primary.is_none());
    }
}
