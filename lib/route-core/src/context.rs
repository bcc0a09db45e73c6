use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of build the routes are resolved for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Branch,
    Pullrequest,
    Promote,
}

impl Default for BuildType {
    fn default() -> Self {
        BuildType::Branch
    }
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Branch => "branch",
            BuildType::Pullrequest => "pullrequest",
            BuildType::Promote => "promote",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "branch" => Ok(BuildType::Branch),
            "pullrequest" => Ok(BuildType::Pullrequest),
            "promote" => Ok(BuildType::Promote),
            other => Err(format!("unknown build type {}", other)),
        }
    }
}

/// Identity of the environment being built
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildContext {
    pub project: String,
    pub environment: String,
    pub build_type: BuildType,
}

impl BuildContext {
    pub fn new(project: impl Into<String>, environment: impl Into<String>, build_type: BuildType) -> Self {
        Self {
            project: project.into(),
            environment: environment.into(),
            build_type,
        }
    }

    pub fn is_pullrequest(&self) -> bool {
        self.build_type == BuildType::Pullrequest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_type_parse() {
        assert_eq!("pullrequest".parse::<BuildType>(), Ok(BuildType::Pullrequest));
        assert_eq!("branch".parse::<BuildType>(), Ok(BuildType::Branch));
        assert!("tag".parse::<BuildType>().is_err());
        assert_eq!(BuildType::Promote.to_string(), "promote");
    }

    #[test]
    fn test_is_pullrequest() {
        assert!(BuildContext::new("demo", "pr-1", BuildType::Pullrequest).is_pullrequest());
        assert!(!BuildContext::new("demo", "main", BuildType::Branch).is_pullrequest());
    }
}
