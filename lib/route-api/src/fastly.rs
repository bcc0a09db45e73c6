use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fastly CDN configuration attached to a route
///
/// Derived afresh on every resolution from the route's own settings and the
/// Fastly override variables; callers should not edit it by hand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FastlyConfig {
    /// Fastly service id fronting this route
    #[serde(rename = "service-id", default, skip_serializing_if = "String::is_empty")]
    pub service_id: String,

    /// Name of the secret holding the Fastly API token
    #[serde(rename = "api-secret-name", default, skip_serializing_if = "String::is_empty")]
    pub api_secret_name: String,

    /// Whether the Fastly controller watches this route
    #[serde(default, deserialize_with = "crate::lenient::bool")]
    #[schemars(with = "bool")]
    pub watch: bool,
}
