use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouteError>;

/// Where a route came from, used to point errors at the right input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteSource {
    /// Declared in the deployment configuration file for `service`
    ConfigFile { service: String },
    /// Supplied by the control-plane API
    Api,
    /// Synthesized from the router pattern for `service`
    Autogenerated { service: String },
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSource::ConfigFile { service } => {
                write!(f, "in configuration file (service {})", service)
            }
            RouteSource::Api => f.write_str("in API-defined routes"),
            RouteSource::Autogenerated { service } => {
                write!(f, "autogenerated for service {}", service)
            }
        }
    }
}

/// Coarse error classes callers branch on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    MissingDependency,
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Route {domain} {origin} is not valid: {reason}")]
    InvalidDomain {
        domain: String,
        origin: RouteSource,
        reason: String,
    },

    #[error("Route {domain} {origin} has wildcard: true and tls-acme: true, this is not supported")]
    WildcardTlsAcme { domain: String, origin: RouteSource },

    #[error("Route {domain} {origin} has wildcard: true and alternativenames defined, this is not supported")]
    WildcardAlternativeNames { domain: String, origin: RouteSource },

    #[error("Invalid {variable} value for route {domain}: {message}")]
    Configuration {
        variable: String,
        domain: String,
        message: String,
    },

    #[error("Variable {name} not found")]
    VariableNotFound { name: String },

    #[error("Unable to generate autogenerated routes: {source}")]
    MissingDependency {
        #[source]
        source: Box<RouteError>,
    },
}

impl RouteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::InvalidDomain { .. }
            | RouteError::WildcardTlsAcme { .. }
            | RouteError::WildcardAlternativeNames { .. } => ErrorKind::Validation,
            RouteError::Configuration { .. } => ErrorKind::Configuration,
            RouteError::VariableNotFound { .. } | RouteError::MissingDependency { .. } => {
                ErrorKind::MissingDependency
            }
        }
    }
}
