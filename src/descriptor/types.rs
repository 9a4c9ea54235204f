//! Type definitions for item descriptors
//!
//! Plain data shared by the registry, the reconciler and the visibility
//! filter.

use serde::Serialize;
use std::fmt;

/// Id of the generic organization folder descriptor
///
/// Delegating descriptor ids are namespaced under it, which keeps them
/// distinct from the generic id.
pub const ORGANIZATION_FOLDER_ID: &str = "organization-folder";

/// Category every organization folder entry is listed under by default
pub const NESTED_PROJECTS_CATEGORY: &str = "nested-projects";

/// Icon metadata forwarded to the UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IconSpec {
    /// Path pattern with a `:size` placeholder, e.g. `images/:size/github.png`
    pub file_path_pattern: Option<String>,
    /// CSS icon class
    pub class_name: Option<String>,
}

impl IconSpec {
    pub fn with_class(class_name: &str) -> Self {
        Self {
            file_path_pattern: None,
            class_name: Some(class_name.to_string()),
        }
    }
}

/// Where a "New Item" listing is being rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// A single view (list view, dashboard)
    View { name: String },
    /// A container of views
    ViewGroup,
    /// A folder or other item container outside a view
    ItemGroup { name: String },
    Other,
}

impl Context {
    /// Views and view groups are where the generic entry may be hidden
    pub fn is_view_like(&self) -> bool {
        matches!(self, Context::View { .. } | Context::ViewGroup)
    }
}

/// What an item descriptor is, as far as reconciliation and filtering care
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorKind {
    /// The well-known organization folder entry
    Generic,
    /// An entry forwarding to one navigator provider
    Delegating { provider_id: String },
    /// Anything else contributed to the registry
    Other,
}

/// A configured source locator produced by a navigator provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigator {
    pub provider_id: String,
    /// Name the navigator was inferred from, if any
    pub name: Option<String>,
}

impl Navigator {
    pub fn new(provider_id: &str, name: Option<&str>) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            name: name.map(str::to_string),
        }
    }
}

/// A folder that scans one or more navigators for projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationFolder {
    pub name: String,
    pub navigators: Vec<Navigator>,
}

impl OrganizationFolder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            navigators: Vec::new(),
        }
    }
}

impl fmt::Display for OrganizationFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<&str> = self
            .navigators
            .iter()
            .map(|n| n.provider_id.as_str())
            .collect();
        write!(f, "{} [{}]", self.name, providers.join(", "))
    }
}
