//! Fastly service selection from route settings and override variables
//!
//! Precedence, lowest first:
//! 1. the route's own service id, else the no-cache service id (watched)
//! 2. `LAGOON_FASTLY_SERVICE_ID` for every route
//! 3. a matching tuple in `LAGOON_FASTLY_SERVICE_IDS` for one domain
//!
//! A secret name is always carried with the configured prefix.

use crate::variables::{lookup_variable, FASTLY_SCOPES, FASTLY_SERVICE_ID, FASTLY_SERVICE_IDS};
use crate::{Result, RouteError};
use route_api::lenient::parse_bool;
use route_api::{EnvironmentVariable, FastlyConfig};
use tracing::debug;

/// Resolve the Fastly configuration for `domain`.
///
/// `current.service_id` is the explicitly configured service id. Missing
/// override variables mean "no override"; malformed ones are errors.
pub fn resolve_fastly_config(
    no_cache_service_id: &str,
    current: &FastlyConfig,
    domain: &str,
    secret_prefix: &str,
    variables: &[EnvironmentVariable],
) -> Result<FastlyConfig> {
    let mut config = current.clone();
    if config.service_id.is_empty() && !no_cache_service_id.is_empty() {
        config.service_id = no_cache_service_id.to_string();
        config.watch = true;
    }

    if let Ok(global) = lookup_variable(FASTLY_SERVICE_ID, FASTLY_SCOPES, variables) {
        let parts: Vec<&str> = global.value.split(':').collect();
        let Some(watch) = parts.get(1) else {
            return Err(configuration_error(
                FASTLY_SERVICE_ID,
                domain,
                "no watch status was provided, only the service id".to_string(),
            ));
        };
        config.watch = parse_watch(FASTLY_SERVICE_ID, domain, watch)?;
        config.service_id = parts[0].to_string();
        if let Some(suffix) = parts.get(2) {
            config.api_secret_name = format!("{}{}", secret_prefix, suffix);
        }
        debug!("Applied global Fastly override to route {}", domain);
    }

    if let Ok(per_domain) = lookup_variable(FASTLY_SERVICE_IDS, FASTLY_SCOPES, variables) {
        for entry in per_domain.value.split(',').map(str::trim) {
            let parts: Vec<&str> = entry.split(':').collect();
            if parts[0] != domain {
                continue;
            }
            let (Some(service_id), Some(watch)) = (parts.get(1), parts.get(2)) else {
                return Err(configuration_error(
                    FASTLY_SERVICE_IDS,
                    domain,
                    "no watch status was provided, only the route and service id".to_string(),
                ));
            };
            config.watch = parse_watch(FASTLY_SERVICE_IDS, domain, watch)?;
            config.service_id = service_id.to_string();
            // a matching tuple without a secret clears any inherited one
            config.api_secret_name = match parts.get(3) {
                Some(suffix) => format!("{}{}", secret_prefix, suffix),
                None => String::new(),
            };
            debug!("Applied per-domain Fastly override to route {}", domain);
        }
    }

    if !config.api_secret_name.is_empty() && !config.api_secret_name.starts_with(secret_prefix) {
        config.api_secret_name = format!("{}{}", secret_prefix, config.api_secret_name);
    }

    Ok(config)
}

fn parse_watch(variable: &str, domain: &str, value: &str) -> Result<bool> {
    parse_bool(value).ok_or_else(|| {
        configuration_error(
            variable,
            domain,
            format!("the provided value {} is not a valid boolean", value),
        )
    })
}

fn configuration_error(variable: &str, domain: &str, message: String) -> RouteError {
    RouteError::Configuration {
        variable: variable.to_string(),
        domain: domain.to_string(),
        message,
    }
}
