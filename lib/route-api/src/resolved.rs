use crate::fastly::FastlyConfig;
use crate::route::{InsecurePolicy, PathRoute};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route list as delivered by the control-plane API
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ApiRoutes {
    #[serde(default)]
    pub routes: Vec<ApiRoute>,
}

/// A route defined through the API
///
/// Only `domain` is required; every other field may be absent or `null`
/// and then falls back to the environment defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiRoute {
    pub domain: String,

    #[serde(default)]
    pub service: Option<String>,

    #[serde(rename = "tls-acme", default)]
    pub tls_acme: Option<bool>,

    #[serde(default)]
    pub migrate: Option<bool>,

    #[serde(default)]
    pub insecure: Option<InsecurePolicy>,

    #[serde(rename = "monitoring-path", default)]
    pub monitoring_path: Option<String>,

    #[serde(default)]
    pub fastly: Option<FastlyConfig>,

    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(rename = "alternativeNames", default)]
    pub alternative_names: Option<Vec<String>>,

    #[serde(rename = "ingressClass", default)]
    pub ingress_class: Option<String>,

    #[serde(rename = "hstsEnabled", default)]
    pub hsts_enabled: Option<bool>,

    #[serde(rename = "hstsMaxAge", default)]
    pub hsts_max_age: Option<u64>,

    #[serde(rename = "hstsIncludeSubdomains", default)]
    pub hsts_include_subdomains: Option<bool>,

    #[serde(rename = "hstsPreload", default)]
    pub hsts_preload: Option<bool>,

    #[serde(default)]
    pub wildcard: Option<bool>,

    #[serde(rename = "disableRequestVerification", default)]
    pub disable_request_verification: Option<bool>,

    #[serde(rename = "pathRoutes", default)]
    pub path_routes: Option<Vec<PathRoute>>,
}

/// A fully defaulted route ready for manifest rendering
///
/// Optional booleans keep "unset" apart from "false" so the renderer can
/// tell an explicit `false` from a field nobody configured.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedRoute {
    /// Lowercase DNS-1123 domain
    pub domain: String,

    /// Backend service receiving traffic for `/`
    pub service: String,

    /// Name of the ingress resource
    #[serde(rename = "ingressName")]
    pub ingress_name: String,

    #[serde(rename = "tls-acme")]
    pub tls_acme: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrate: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<InsecurePolicy>,

    #[serde(rename = "monitoring-path", default, skip_serializing_if = "String::is_empty")]
    pub monitoring_path: String,

    #[serde(default)]
    pub fastly: FastlyConfig,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(rename = "alternativeNames", default)]
    pub alternative_names: Vec<String>,

    #[serde(rename = "ingressClass", default)]
    pub ingress_class: String,

    #[serde(rename = "hstsEnabled", skip_serializing_if = "Option::is_none")]
    pub hsts_enabled: Option<bool>,

    #[serde(rename = "hstsMaxAge", skip_serializing_if = "Option::is_none")]
    pub hsts_max_age: Option<u64>,

    #[serde(rename = "hstsIncludeSubdomains", skip_serializing_if = "Option::is_none")]
    pub hsts_include_subdomains: Option<bool>,

    #[serde(rename = "hstsPreload", skip_serializing_if = "Option::is_none")]
    pub hsts_preload: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<bool>,

    /// Synthesized from the router pattern rather than declared
    #[serde(default)]
    pub autogenerated: bool,

    #[serde(rename = "disableRequestVerification", skip_serializing_if = "Option::is_none")]
    pub disable_request_verification: Option<bool>,

    #[serde(rename = "pathRoutes", default, skip_serializing_if = "Vec::is_empty")]
    pub path_routes: Vec<PathRoute>,
}

impl ResolvedRoute {
    /// Whether this route is a wildcard route
    pub fn is_wildcard(&self) -> bool {
        self.wildcard.unwrap_or(false)
    }

    /// Path routes in rendering order: `/` to the primary service first
    pub fn paths(&self) -> Vec<PathRoute> {
        let mut paths = vec![PathRoute {
            to_service: self.service.clone(),
            path: "/".to_string(),
        }];
        paths.extend(self.path_routes.iter().cloned());
        paths
    }

    /// The `https://` URL of this route
    pub fn url(&self) -> String {
        format!("https://{}", self.domain)
    }
}
