//! Reconciliation of declared routes with API routes

use crate::api::apply_api_defaults;
use crate::defaults::RouteDefaults;
use crate::fastly::resolve_fastly_config;
use crate::validation::validate_domain;
use crate::{Result, RouteSource};
use route_api::{ApiRoute, EnvironmentVariable, ResolvedRoute};
use tracing::{debug, info, warn};

/// Merge API routes onto the routes generated from the configuration file.
///
/// An API route replaces a declared route with the same domain entirely.
/// Declared routes keep their order and come first; API-only routes follow
/// in API order. Fastly settings are then resolved again for every route
/// and domains are lowercased.
pub fn merge_routes(
    declared: Vec<ResolvedRoute>,
    api_routes: &[ApiRoute],
    variables: &[EnvironmentVariable],
    defaults: &RouteDefaults,
) -> Result<Vec<ResolvedRoute>> {
    let mut merged: Vec<ResolvedRoute> = Vec::with_capacity(declared.len() + api_routes.len());

    for route in declared {
        validate_domain(
            &route.domain,
            &RouteSource::ConfigFile {
                service: route.service.clone(),
            },
        )?;
        if contains_domain(&merged, &route.domain) {
            warn!("Route {} is declared more than once, keeping the first", route.domain);
            continue;
        }
        match api_routes
            .iter()
            .rev()
            .find(|api| api.domain.eq_ignore_ascii_case(&route.domain))
        {
            Some(api) => {
                validate_domain(&api.domain, &RouteSource::Api)?;
                debug!("Route {} replaced by the API definition", route.domain);
                merged.push(apply_api_defaults(api, defaults)?);
            }
            None => merged.push(route),
        }
    }

    for api in api_routes {
        validate_domain(&api.domain, &RouteSource::Api)?;
        let route = apply_api_defaults(api, defaults)?;
        if contains_domain(&merged, &api.domain) {
            continue;
        }
        debug!("Route {} added from the API", api.domain);
        merged.push(route);
    }

    let routes = merged
        .into_iter()
        .map(|mut route| {
            route.fastly = resolve_fastly_config(
                "",
                &route.fastly,
                &route.domain,
                &defaults.fastly_api_secret_prefix,
                variables,
            )?;
            route.domain = route.domain.to_lowercase();
            Ok(route)
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Merged route list has {} routes", routes.len());
    Ok(routes)
}

/// Domains are compared without regard to letter case
fn contains_domain(routes: &[ResolvedRoute], domain: &str) -> bool {
    routes.iter().any(|existing| existing.domain.eq_ignore_ascii_case(domain))
}
