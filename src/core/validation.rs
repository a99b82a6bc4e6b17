//! Validation for cloud project ids and resource names
//!
//! Both identifiers end up in inventory request paths, so they are checked
//! before any request is built.

use crate::error::{InspectorError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A validated project id
///
/// # Rules
/// - Lowercase letters (a-z), numbers (0-9), hyphens (-) only
/// - Must start with a letter and must not end with a hyphen
/// - Length: 6-30 characters
///
/// # Examples
///
/// ```
/// use vpc_inspector::core::validation::ProjectId;
///
/// let project = ProjectId::new("k8s-playground-123456").unwrap();
/// assert_eq!(project.as_str(), "k8s-playground-123456");
///
/// assert!(ProjectId::new("Playground").is_err()); // uppercase
/// assert!(ProjectId::new("abc").is_err()); // too short
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    const PATTERN: &'static str = r"^[a-z][-a-z0-9]{4,28}[a-z0-9]$";

    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(Self::PATTERN).expect("project id pattern"));

        if !re.is_match(&id) {
            return Err(InspectorError::InvalidProject(id));
        }
        Ok(ProjectId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated resource name (networks, subnetworks)
///
/// # Rules
/// - Lowercase letters (a-z), numbers (0-9), hyphens (-) only
/// - Must start with a letter and must not end with a hyphen
/// - Length: 1-63 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    const PATTERN: &'static str = r"^[a-z]([-a-z0-9]{0,61}[a-z0-9])?$";

    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(Self::PATTERN).expect("resource name pattern"));

        if !re.is_match(&name) {
            return Err(InspectorError::InvalidResourceName(name));
        }
        Ok(ResourceName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl TryFrom<String> for $ty {
            type Error = InspectorError;

            fn try_from(value: String) -> Result<Self> {
                $ty::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_newtype_impls!(ProjectId);
string_newtype_impls!(ResourceName);
