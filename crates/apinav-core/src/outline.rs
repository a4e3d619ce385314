#![forbid(unsafe_code)]

//! The parts of a resolved API description the navigation bar shows
//! around the tag tree: overview, servers, security, and components.

use crate::model::{Header, TagTree};

/// Title and description outline of the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct SpecInfo {
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
}

impl SpecInfo {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Title shown for the overview entry; `"Overview"` when blank.
    #[must_use]
    pub fn nav_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("Overview")
    }
}

/// A schema listed under the components section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SubComponent {
    pub id: String,
    pub name: String,
    /// `Some(false)` hides the entry; absent means shown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expanded: Option<bool>,
}

impl SubComponent {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expanded: None,
        }
    }

    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }
}

/// A component group (`schemas`, `responses`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Component {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_components: Vec<SubComponent>,
}

impl Component {
    #[must_use]
    pub fn new(name: impl Into<String>, sub_components: Vec<SubComponent>) -> Self {
        Self {
            name: name.into(),
            sub_components,
        }
    }
}

/// Output of the spec-processing collaborator, as far as navigation cares.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ResolvedSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub info: Option<SpecInfo>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub info_description_headers: Vec<Header>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_security_schemes: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: TagTree,
    #[cfg_attr(feature = "serde", serde(default))]
    pub components: Vec<Component>,
    /// Set when the API description failed to load.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spec_load_error: Option<String>,
}

impl ResolvedSpec {
    #[must_use]
    pub fn new(tags: TagTree) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_info(mut self, info: SpecInfo) -> Self {
        self.info = Some(info);
        self
    }

    #[must_use]
    pub fn with_info_headers(mut self, headers: Vec<Header>) -> Self {
        self.info_description_headers = headers;
        self
    }

    #[must_use]
    pub fn with_security_schemes(mut self, present: bool) -> Self {
        self.has_security_schemes = present;
        self
    }

    #[must_use]
    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    #[must_use]
    pub fn with_load_error(mut self, message: impl Into<String>) -> Self {
        self.spec_load_error = Some(message.into());
        self
    }

    /// Whether the navigation bar has anything beyond its frame to show.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.spec_load_error.is_none()
    }
}
