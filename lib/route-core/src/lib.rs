//! Environment route resolution engine
//!
//! This library provides:
//! - Route generation from the deployment configuration file
//! - Merging with routes supplied by the control-plane API
//! - Fastly service selection from override variables
//! - DNS validation and autogenerated domains from the router pattern

pub mod api;
pub mod autogen;
pub mod context;
pub mod defaults;
pub mod dns;
pub mod error;
pub mod fastly;
pub mod generate;
pub mod merge;
pub mod resolver;
pub mod summary;
pub mod validation;
pub mod variables;

pub use autogen::AutogeneratedRoute;
pub use context::{BuildContext, BuildType};
pub use defaults::RouteDefaults;
pub use error::{ErrorKind, Result, RouteError, RouteSource};
pub use resolver::{Resolution, ResolveInput, ResolvedRoutes, RouteResolver};
pub use summary::RouteSummary;
