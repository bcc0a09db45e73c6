use crate::autogen::AutogeneratedRoute;
use crate::variables::{AUTOGENERATED_ROUTES, ROUTE, ROUTES};
use route_api::{EnvironmentVariable, ResolvedRoute, VariableScope};
use serde::Serialize;

/// Route URLs exported to the running environment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    /// Primary route of the environment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Every active route, autogenerated routes first
    pub routes: Vec<String>,
    pub autogenerated: Vec<String>,
}

impl RouteSummary {
    pub fn from_routes(routes: &[ResolvedRoute], autogenerated: &[AutogeneratedRoute]) -> Self {
        let merged: Vec<String> = routes.iter().map(ResolvedRoute::url).collect();
        let autogenerated: Vec<String> = autogenerated.iter().map(|a| a.route.url()).collect();
        let primary = merged.first().or_else(|| autogenerated.first()).cloned();
        Self {
            primary,
            routes: autogenerated.iter().chain(merged.iter()).cloned().collect(),
            autogenerated,
        }
    }

    pub fn routes_value(&self) -> String {
        self.routes.join(",")
    }

    pub fn autogenerated_value(&self) -> String {
        self.autogenerated.join(",")
    }

    /// Runtime variables carrying the summary; `LAGOON_ROUTE` is omitted
    /// when there is no route at all
    pub fn to_variables(&self) -> Vec<EnvironmentVariable> {
        let mut variables = Vec::with_capacity(3);
        if let Some(primary) = &self.primary {
            variables.push(EnvironmentVariable::new(ROUTE, primary.as_str(), VariableScope::Runtime));
        }
        variables.push(EnvironmentVariable::new(ROUTES, self.routes_value(), VariableScope::Runtime));
        variables.push(EnvironmentVariable::new(
            AUTOGENERATED_ROUTES,
            self.autogenerated_value(),
            VariableScope::Runtime,
        ));
        variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(domain: &str) -> ResolvedRoute {
        ResolvedRoute {
            domain: domain.to_string(),
            ..Default::default()
        }
    }

    fn autogenerated(domain: &str) -> AutogeneratedRoute {
        AutogeneratedRoute {
            route: ResolvedRoute {
                autogenerated: true,
                ..route(domain)
            },
            short_domain: String::new(),
        }
    }

    #[test]
    fn test_summary_order() {
        let summary = RouteSummary::from_routes(
            &[route("a.example.com"), route("b.example.com")],
            &[autogenerated("nginx.demo.main.example.com")],
        );
        assert_eq!(summary.primary.as_deref(), Some("https://a.example.com"));
        assert_eq!(
            summary.routes_value(),
            "https://nginx.demo.main.example.com,https://a.example.com,https://b.example.com"
        );
        assert_eq!(summary.autogenerated_value(), "https://nginx.demo.main.example.com");
    }

    #[test]
    fn test_primary_falls_back_to_autogenerated() {
        let summary = RouteSummary::from_routes(&[], &[autogenerated("nginx.demo.main.example.com")]);
        assert_eq!(summary.primary.as_deref(), Some("https://nginx.demo.main.example.com"));
    }

    #[test]
    fn test_to_variables() {
        let empty = RouteSummary::from_routes(&[], &[]);
        let names: Vec<_> = empty.to_variables().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec![ROUTES, AUTOGENERATED_ROUTES]);

        let summary = RouteSummary::from_routes(&[route("a.example.com")], &[]);
        let variables = summary.to_variables();
        assert_eq!(variables[0].name, ROUTE);
        assert_eq!(variables[0].value, "https://a.example.com");
        assert!(variables.iter().all(|v| v.scope == VariableScope::Runtime));
    }

    #[test]
    fn test_serialized_shape() {
        let summary = RouteSummary::from_routes(&[route("a.example.com")], &[]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["primary"], "https://a.example.com");
        assert_eq!(json["routes"][0], "https://a.example.com");
        assert!(json["autogenerated"].as_array().unwrap().is_empty());
    }
}
