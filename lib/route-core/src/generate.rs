//! Routes declared in the deployment configuration file

use crate::defaults::{hsts_max_age, RouteDefaults};
use crate::dns::wildcard_ingress_name;
use crate::fastly::resolve_fastly_config;
use crate::validation::{validate_domain, validate_wildcard};
use crate::{Result, RouteSource};
use route_api::{DeclaredRoutes, EnvironmentVariable, IngressOverride, ResolvedRoute, RouteEntry};
use tracing::{debug, info};

/// Turn the declared route map into fully defaulted routes.
///
/// Routes come out in declaration order. Any invalid route aborts the
/// whole generation.
pub fn generate_routes(
    declared: &DeclaredRoutes,
    variables: &[EnvironmentVariable],
    defaults: &RouteDefaults,
) -> Result<Vec<ResolvedRoute>> {
    let mut routes = Vec::new();
    for services in declared {
        for (service, entries) in services {
            let origin = RouteSource::ConfigFile {
                service: service.clone(),
            };
            for entry in entries {
                let candidates = match entry {
                    RouteEntry::Domain(domain) => vec![defaults.route(domain, service)],
                    RouteEntry::Ingresses(ingresses) => ingresses
                        .iter()
                        .map(|(domain, ingress)| {
                            apply_override(defaults.route(domain, service), ingress, &origin)
                        })
                        .collect::<Result<Vec<_>>>()?,
                };
                for mut route in candidates {
                    route.fastly = resolve_fastly_config(
                        "",
                        &route.fastly,
                        &route.domain,
                        &defaults.fastly_api_secret_prefix,
                        variables,
                    )?;
                    validate_domain(&route.domain, &origin)?;
                    debug!("Generated route {} for service {}", route.domain, service);
                    routes.push(route);
                }
            }
        }
    }
    info!("Generated {} routes from the configuration file", routes.len());
    Ok(routes)
}

/// Apply the fields present in `ingress` over a defaulted route
fn apply_override(
    mut route: ResolvedRoute,
    ingress: &IngressOverride,
    origin: &RouteSource,
) -> Result<ResolvedRoute> {
    route.fastly = ingress.fastly.clone().unwrap_or_default();
    if let Some(annotations) = &ingress.annotations {
        route.annotations = annotations.clone();
    }
    if ingress.tls_acme.is_some() {
        route.tls_acme = ingress.tls_acme;
    }
    if ingress.migrate.is_some() {
        route.migrate = ingress.migrate;
    }
    if ingress.insecure.is_some() {
        route.insecure = ingress.insecure;
    }
    if let Some(alternative_names) = &ingress.alternative_names {
        route.alternative_names = alternative_names.clone();
    }
    if let Some(class) = ingress.ingress_class.as_deref().filter(|c| !c.is_empty()) {
        route.ingress_class = class.to_string();
    }
    if let Some(path) = ingress.monitoring_path.as_deref().filter(|p| !p.is_empty()) {
        route.monitoring_path = path.to_string();
    }

    if ingress.hsts_enabled.is_some() {
        route.hsts_enabled = ingress.hsts_enabled;
    }
    if ingress.hsts_include_subdomains.is_some() {
        route.hsts_include_subdomains = ingress.hsts_include_subdomains;
    }
    if ingress.hsts_preload.is_some() {
        route.hsts_preload = ingress.hsts_preload;
    }
    route.hsts_max_age = hsts_max_age(route.hsts_enabled, ingress.hsts_max_age);

    if ingress.wildcard.is_some() {
        route.wildcard = ingress.wildcard;
        validate_wildcard(&route, origin)?;
        if route.is_wildcard() {
            route.ingress_name = wildcard_ingress_name(&route.domain);
        }
    }

    if ingress.disable_request_verification.is_some() {
        route.disable_request_verification = ingress.disable_request_verification;
    }
    if let Some(path_routes) = &ingress.path_routes {
        route.path_routes = path_routes.clone();
    }
    Ok(route)
}
