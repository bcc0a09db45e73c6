//! Routes synthesized from the router pattern
//!
//! The router pattern is a domain template such as
//! `${service}.${project}.${environment}.example.com`. Every eligible
//! workload gets one route on the domain produced from it.

use crate::context::BuildContext;
use crate::defaults::RouteDefaults;
use crate::dns::{short_identifier, shorten_long_labels};
use crate::fastly::resolve_fastly_config;
use crate::validation::validate_domain;
use crate::variables::{lookup_variable, ROUTER_PATTERN};
use crate::{Result, RouteError, RouteSource};
use route_api::{
    AutogenerateConfig, EnvironmentVariable, FastlyConfig, InsecurePolicy, ResolvedRoute, VariableScope,
    Workload, LABEL_PREFIX,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Workload types that receive autogenerated routes
pub const SUPPORTED_AUTOGENERATED_TYPES: &[&str] = &[
    "node",
    "node-persistent",
    "nginx",
    "nginx-php",
    "nginx-php-persistent",
    "varnish",
    "varnish-persistent",
    "python",
    "python-persistent",
];

const CHART: &str = "autogenerated-ingress";
const CHART_VERSION: &str = "0.1.0";

/// Domain pair produced from the router pattern for one service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutogeneratedDomain {
    pub domain: String,
    pub short_domain: String,
}

/// Substitute the pattern tokens for `service`.
///
/// Each token is replaced once. A pattern without `${service}` gets the
/// service prepended as its own label. Over-long labels of the full domain
/// are shortened; the short domain replaces project and environment with
/// hashed identifiers instead.
pub fn domain_from_pattern(pattern: &str, service: &str, project: &str, environment: &str) -> AutogeneratedDomain {
    let domain = pattern
        .replacen("${service}", service, 1)
        .replacen("${project}", project, 1)
        .replacen("${environment}", environment, 1);
    let short_domain = pattern
        .replacen("${service}", service, 1)
        .replacen("${project}", &short_identifier(project), 1)
        .replacen("${environment}", &short_identifier(environment), 1);

    let (domain, short_domain) = if pattern.contains("${service}") {
        (domain, short_domain)
    } else {
        (format!("{}.{}", service, domain), format!("{}.{}", service, short_domain))
    };

    AutogeneratedDomain {
        domain: shorten_long_labels(&domain),
        short_domain,
    }
}

/// An autogenerated route with the short domain reported next to it
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AutogeneratedRoute {
    #[serde(flatten)]
    pub route: ResolvedRoute,

    #[serde(rename = "shortDomain")]
    pub short_domain: String,
}

/// Build the autogenerated routes for every eligible workload.
///
/// Fails with [`RouteError::MissingDependency`] when the router pattern is
/// not available, whatever the reason for the failed lookup.
pub fn generate_autogenerated_routes(
    workloads: &[Workload],
    config: &AutogenerateConfig,
    context: &BuildContext,
    variables: &[EnvironmentVariable],
    defaults: &RouteDefaults,
) -> Result<Vec<AutogeneratedRoute>> {
    let pattern = lookup_variable(ROUTER_PATTERN, &[VariableScope::InternalSystem], variables)
        .map_err(|err| RouteError::MissingDependency { source: Box::new(err) })?;

    let mut routes = Vec::new();
    for workload in workloads {
        if !workload.autogenerated_routes_enabled
            || !SUPPORTED_AUTOGENERATED_TYPES.contains(&workload.service_type.as_str())
        {
            continue;
        }
        let service = workload.service_name();
        let AutogeneratedDomain { domain, short_domain } =
            domain_from_pattern(&pattern.value, service, &context.project, &context.environment);
        let origin = RouteSource::Autogenerated {
            service: service.to_string(),
        };
        validate_domain(&domain, &origin)?;
        let domain = domain.to_lowercase();

        let fastly = resolve_fastly_config(
            &defaults.fastly_no_cache_service_id,
            &FastlyConfig {
                service_id: defaults.fastly_service_id.clone(),
                ..Default::default()
            },
            &domain,
            &defaults.fastly_api_secret_prefix,
            variables,
        )?;

        let route = ResolvedRoute {
            alternative_names: config
                .prefixes
                .iter()
                .map(|prefix| format!("{}.{}", prefix, domain))
                .collect(),
            domain,
            service: service.to_string(),
            ingress_name: service.to_string(),
            tls_acme: Some(workload.autogenerated_routes_tls_acme),
            insecure: Some(config.insecure.unwrap_or(InsecurePolicy::Allow)),
            fastly,
            labels: labels(service, &workload.service_type),
            ingress_class: defaults.ingress_class.clone(),
            autogenerated: true,
            ..Default::default()
        };
        debug!("Autogenerated route {} for service {}", route.domain, service);
        routes.push(AutogeneratedRoute { route, short_domain });
    }

    info!("Autogenerated {} routes", routes.len());
    Ok(routes)
}

fn labels(service: &str, service_type: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (format!("{}/autogenerated", LABEL_PREFIX), "true".to_string()),
        ("helm.sh/chart".to_string(), format!("{}-{}", CHART, CHART_VERSION)),
        ("app.kubernetes.io/name".to_string(), CHART.to_string()),
        ("app.kubernetes.io/instance".to_string(), service.to_string()),
        (format!("{}/service", LABEL_PREFIX), service.to_string()),
        (format!("{}/service-type", LABEL_PREFIX), service_type.to_string()),
    ])
}
