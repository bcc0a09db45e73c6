use serde::{Deserialize, Serialize};

/// Workload metadata consumed by route autogeneration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workload {
    /// Workload name as declared in the compose file
    pub name: String,

    /// Optional name override used for the service and ingress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Workload type (e.g. `nginx-php`, `node`)
    #[serde(rename = "type")]
    pub service_type: String,

    #[serde(default)]
    pub autogenerated_routes_enabled: bool,

    #[serde(default)]
    pub autogenerated_routes_tls_acme: bool,
}

impl Workload {
    /// Name used for the service and ingress of this workload's routes
    pub fn service_name(&self) -> &str {
        match self.type_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}
