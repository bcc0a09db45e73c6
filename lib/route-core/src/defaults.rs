//! Environment wide route defaults

use route_api::{InsecurePolicy, ResolvedRoute};

/// HSTS max-age applied when HSTS is enabled without an explicit value
pub const DEFAULT_HSTS_MAX_AGE: u64 = 31_536_000;
pub const DEFAULT_MONITORING_PATH: &str = "/";
pub const DEFAULT_TLS_ACME: bool = true;
pub const DEFAULT_DISABLE_REQUEST_VERIFICATION: bool = false;

/// Defaults for one resolution run
///
/// Built once by the caller and passed by reference; nothing in the engine
/// mutates it.
#[derive(Clone, Debug, Default)]
pub struct RouteDefaults {
    /// Ingress class used when a route does not name one
    pub ingress_class: String,
    /// Whether the environment takes part in active/standby switching
    pub active_standby: bool,
    /// Fastly service used for autogenerated routes with no other service
    pub fastly_no_cache_service_id: String,
    /// Fastly service explicitly configured for autogenerated routes
    pub fastly_service_id: String,
    /// Prefix of Fastly API secret names
    pub fastly_api_secret_prefix: String,
}

impl RouteDefaults {
    /// A route for `domain` on `service` carrying every default
    pub fn route(&self, domain: &str, service: &str) -> ResolvedRoute {
        ResolvedRoute {
            domain: domain.to_string(),
            service: service.to_string(),
            ingress_name: domain.to_string(),
            tls_acme: Some(DEFAULT_TLS_ACME),
            migrate: self.active_standby.then_some(true),
            insecure: Some(InsecurePolicy::default()),
            monitoring_path: DEFAULT_MONITORING_PATH.to_string(),
            ingress_class: self.ingress_class.clone(),
            disable_request_verification: Some(DEFAULT_DISABLE_REQUEST_VERIFICATION),
            ..Default::default()
        }
    }
}

/// HSTS max-age for a route: an explicit positive value, else the default
/// when HSTS is enabled
pub fn hsts_max_age(enabled: Option<bool>, explicit: Option<u64>) -> Option<u64> {
    match explicit {
        Some(age) if age > 0 => Some(age),
        _ if enabled == Some(true) => Some(DEFAULT_HSTS_MAX_AGE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_route() {
        let defaults = RouteDefaults {
            ingress_class: "nginx".to_string(),
            ..Default::default()
        };
        let route = defaults.route("www.example.com", "nginx");
        assert_eq!(route.ingress_name, "www.example.com");
        assert_eq!(route.tls_acme, Some(true));
        assert_eq!(route.insecure, Some(InsecurePolicy::Redirect));
        assert_eq!(route.monitoring_path, "/");
        assert_eq!(route.ingress_class, "nginx");
        assert_eq!(route.migrate, None);
        assert!(route.annotations.is_empty());
        assert!(route.alternative_names.is_empty());
    }

    #[test]
    fn test_active_standby_sets_migrate() {
        let defaults = RouteDefaults {
            active_standby: true,
            ..Default::default()
        };
        assert_eq!(defaults.route("a.com", "nginx").migrate, Some(true));
    }

    #[test]
    fn test_hsts_max_age() {
        assert_eq!(hsts_max_age(Some(true), None), Some(DEFAULT_HSTS_MAX_AGE));
        assert_eq!(hsts_max_age(Some(true), Some(0)), Some(DEFAULT_HSTS_MAX_AGE));
        assert_eq!(hsts_max_age(Some(true), Some(600)), Some(600));
        assert_eq!(hsts_max_age(None, Some(600)), Some(600));
        assert_eq!(hsts_max_age(Some(false), None), None);
        assert_eq!(hsts_max_age(None, None), None);
    }
}
