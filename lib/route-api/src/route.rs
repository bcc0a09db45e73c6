//! Declarative routes as written in the deployment configuration file
//!
//! A service's route list mixes two shapes:
//!
//! ```yaml
//! routes:
//!   - nginx:
//!       - www.example.com
//!       - "api.example.com":
//!           tls-acme: false
//!           insecure: Allow
//! ```
//!
//! Every override field is optional. An absent field inherits the
//! environment default; it never means "false" or "empty".

use crate::fastly::FastlyConfig;
use schemars::JsonSchema;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered route declarations: one map of `service -> entries` per list item
pub type DeclaredRoutes = Vec<BTreeMap<String, Vec<RouteEntry>>>;

/// One entry of a service's declarative route list
#[derive(Clone, Debug, PartialEq)]
pub enum RouteEntry {
    /// A bare domain using every default
    Domain(String),
    /// Domains carrying field overrides
    Ingresses(BTreeMap<String, IngressOverride>),
}

impl<'de> Deserialize<'de> for RouteEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = RouteEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a domain string or a map of domain to route overrides")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RouteEntry::Domain(v.to_string()))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut ingresses = BTreeMap::new();
                while let Some((domain, ingress)) = map.next_entry::<String, Option<IngressOverride>>()? {
                    ingresses.insert(domain, ingress.unwrap_or_default());
                }
                Ok(RouteEntry::Ingresses(ingresses))
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

/// Optional per-domain overrides from the configuration file
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IngressOverride {
    #[serde(rename = "tls-acme", default, deserialize_with = "crate::lenient::option_bool")]
    pub tls_acme: Option<bool>,

    #[serde(default, deserialize_with = "crate::lenient::option_bool")]
    pub migrate: Option<bool>,

    #[serde(default)]
    pub insecure: Option<InsecurePolicy>,

    #[serde(rename = "monitoring-path", default)]
    pub monitoring_path: Option<String>,

    #[serde(default)]
    pub fastly: Option<FastlyConfig>,

    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(rename = "ingressClass", default)]
    pub ingress_class: Option<String>,

    #[serde(rename = "hstsEnabled", default, deserialize_with = "crate::lenient::option_bool")]
    pub hsts_enabled: Option<bool>,

    #[serde(rename = "hstsMaxAge", default)]
    pub hsts_max_age: Option<u64>,

    #[serde(rename = "hstsIncludeSubdomains", default, deserialize_with = "crate::lenient::option_bool")]
    pub hsts_include_subdomains: Option<bool>,

    #[serde(rename = "hstsPreload", default, deserialize_with = "crate::lenient::option_bool")]
    pub hsts_preload: Option<bool>,

    #[serde(rename = "alternativenames", default)]
    pub alternative_names: Option<Vec<String>>,

    #[serde(default, deserialize_with = "crate::lenient::option_bool")]
    pub wildcard: Option<bool>,

    #[serde(rename = "disableRequestVerification", default, deserialize_with = "crate::lenient::option_bool")]
    pub disable_request_verification: Option<bool>,

    #[serde(rename = "pathRoutes", default)]
    pub path_routes: Option<Vec<PathRoute>>,
}

/// How plain HTTP requests are treated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum InsecurePolicy {
    /// Serve plain HTTP
    Allow,
    /// Redirect plain HTTP to HTTPS
    Redirect,
    /// Refuse plain HTTP
    #[serde(rename = "None")]
    Disabled,
}

impl Default for InsecurePolicy {
    fn default() -> Self {
        InsecurePolicy::Redirect
    }
}

/// Path based sub-route sending a path prefix to another service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PathRoute {
    /// Service receiving matching requests
    pub to_service: String,
    /// Path prefix to match
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_route_list() {
        let yaml = r#"
- nginx:
    - www.example.com
    - "api.example.com":
        tls-acme: "false"
        insecure: Allow
        fastly:
          service-id: abc123
          watch: "true"
        pathRoutes:
          - toService: node
            path: /api
"#;
        let routes: DeclaredRoutes = serde_yaml::from_str(yaml).unwrap();
        let nginx = &routes[0]["nginx"];
        assert_eq!(nginx[0], RouteEntry::Domain("www.example.com".to_string()));

        let RouteEntry::Ingresses(ingresses) = &nginx[1] else {
            panic!("expected ingress overrides");
        };
        let api = &ingresses["api.example.com"];
        assert_eq!(api.tls_acme, Some(false));
        assert_eq!(api.insecure, Some(InsecurePolicy::Allow));
        assert_eq!(api.fastly.as_ref().map(|f| f.watch), Some(true));
        assert_eq!(api.path_routes.as_ref().map(Vec::len), Some(1));
        assert_eq!(api.wildcard, None);
        assert_eq!(api.annotations, None);
    }

    #[test]
    fn test_domain_with_empty_overrides() {
        let routes: DeclaredRoutes = serde_yaml::from_str("- nginx:\n    - \"a.example.com\":\n").unwrap();
        let RouteEntry::Ingresses(ingresses) = &routes[0]["nginx"][0] else {
            panic!("expected ingress overrides");
        };
        assert_eq!(ingresses["a.example.com"], IngressOverride::default());
    }

    #[test]
    fn test_insecure_none_wire_name() {
        let policy: InsecurePolicy = serde_json::from_str(r#""None""#).unwrap();
        assert_eq!(policy, InsecurePolicy::Disabled);
        assert!(serde_json::from_str::<InsecurePolicy>(r#""Sometimes""#).is_err());
    }
}
