//! Defaulting for routes supplied by the control-plane API

use crate::defaults::{hsts_max_age, RouteDefaults, DEFAULT_DISABLE_REQUEST_VERIFICATION, DEFAULT_TLS_ACME};
use crate::dns::wildcard_ingress_name;
use crate::validation::validate_wildcard;
use crate::{Result, RouteSource};
use route_api::{ApiRoute, ResolvedRoute};

/// Fill the unset fields of an API route with the environment defaults.
///
/// The wildcard rules are checked here as well as for declared routes, so
/// neither source can slip a wildcard route past the other's gate.
pub fn apply_api_defaults(api: &ApiRoute, defaults: &RouteDefaults) -> Result<ResolvedRoute> {
    let mut route = ResolvedRoute {
        domain: api.domain.clone(),
        service: api.service.clone().unwrap_or_default(),
        ingress_name: api.domain.clone(),
        tls_acme: Some(api.tls_acme.unwrap_or(DEFAULT_TLS_ACME)),
        migrate: api.migrate,
        insecure: Some(api.insecure.unwrap_or_default()),
        monitoring_path: api.monitoring_path.clone().unwrap_or_default(),
        fastly: api.fastly.clone().unwrap_or_default(),
        annotations: api.annotations.clone().unwrap_or_default(),
        labels: api.labels.clone().unwrap_or_default(),
        alternative_names: api.alternative_names.clone().unwrap_or_default(),
        ingress_class: api
            .ingress_class
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| defaults.ingress_class.clone()),
        hsts_enabled: api.hsts_enabled,
        hsts_max_age: hsts_max_age(api.hsts_enabled, api.hsts_max_age),
        hsts_include_subdomains: api.hsts_include_subdomains,
        hsts_preload: api.hsts_preload,
        wildcard: api.wildcard,
        autogenerated: false,
        disable_request_verification: Some(
            api.disable_request_verification
                .unwrap_or(DEFAULT_DISABLE_REQUEST_VERIFICATION),
        ),
        path_routes: api.path_routes.clone().unwrap_or_default(),
    };

    validate_wildcard(&route, &RouteSource::Api)?;
    if route.is_wildcard() {
        route.ingress_name = wildcard_ingress_name(&route.domain);
    }
    Ok(route)
}
