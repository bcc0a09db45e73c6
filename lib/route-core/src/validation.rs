//! Validation gates shared by every route source

use crate::dns::dns1123_subdomain_errors;
use crate::{Result, RouteError, RouteSource};
use route_api::ResolvedRoute;

/// Fail unless the lowercased `domain` is a DNS-1123 subdomain
pub fn validate_domain(domain: &str, origin: &RouteSource) -> Result<()> {
    let errors = dns1123_subdomain_errors(&domain.to_lowercase());
    if errors.is_empty() {
        return Ok(());
    }
    Err(RouteError::InvalidDomain {
        domain: domain.to_string(),
        origin: origin.clone(),
        reason: errors.join("; "),
    })
}

/// Wildcard routes can neither use tls-acme nor carry alternative names
pub fn validate_wildcard(route: &ResolvedRoute, origin: &RouteSource) -> Result<()> {
    if !route.is_wildcard() {
        return Ok(());
    }
    if route.tls_acme == Some(true) {
        return Err(RouteError::WildcardTlsAcme {
            domain: route.domain.clone(),
            origin: origin.clone(),
        });
    }
    if !route.alternative_names.is_empty() {
        return Err(RouteError::WildcardAlternativeNames {
            domain: route.domain.clone(),
            origin: origin.clone(),
        });
    }
    Ok(())
}
