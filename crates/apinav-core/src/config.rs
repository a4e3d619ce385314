#![forbid(unsafe_code)]

//! Render-mode configuration for the navigation bar.
//!
//! The flags mirror the attributes an embedding page sets on the viewer
//! (`render-style`, `use-path-in-nav-bar`, ...). They only steer what the
//! renderer emits; visibility and expansion rules never read them.
//!
//! Configuration can come from attribute pairs or from `APINAV_*`
//! environment variables. Unrecognized values keep the default.

/// Environment variable prefix; `render-style` becomes `APINAV_RENDER_STYLE`.
const ENV_PREFIX: &str = "APINAV_";

const ATTR_RENDER_STYLE: &str = "render-style";
const ATTR_SHOW_METHOD: &str = "show-method-in-nav-bar";
const ATTR_USE_PATH: &str = "use-path-in-nav-bar";
const ATTR_INFO_HEADINGS: &str = "info-description-headings-in-navbar";
const ATTR_ACTIVE_MARKER: &str = "nav-active-item-marker";
const ATTR_ON_TAG_CLICK: &str = "on-nav-tag-click";
const ATTR_ALLOW_SEARCH: &str = "allow-search";
const ATTR_SHOW_INFO: &str = "show-info";
const ATTR_ALLOW_SERVER_SELECTION: &str = "allow-server-selection";
const ATTR_ALLOW_AUTHENTICATION: &str = "allow-authentication";
const ATTR_SHOW_COMPONENTS: &str = "show-components";

/// Overall layout of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Printed/read-only view: every group is shown expanded and headers navigate.
    Read,
    /// Default interactive view.
    #[default]
    View,
    /// One operation at a time; enables expand/collapse-all and components.
    Focused,
}

impl RenderStyle {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "read" => Some(Self::Read),
            "view" => Some(Self::View),
            "focused" => Some(Self::Focused),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::View => "view",
            Self::Focused => "focused",
        }
    }

    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }
}

/// How the HTTP method of an operation is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodStyle {
    #[default]
    PlainText,
    ColoredText,
    /// Three-letter badge.
    ColoredBlock,
}

impl MethodStyle {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "as-plain-text" | "false" => Some(Self::PlainText),
            "as-colored-text" => Some(Self::ColoredText),
            "as-colored-block" => Some(Self::ColoredBlock),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "as-plain-text",
            Self::ColoredText => "as-colored-text",
            Self::ColoredBlock => "as-colored-block",
        }
    }
}

/// Marker drawn next to the active (scrolled-to) item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveItemMarker {
    #[default]
    LeftBar,
    ColoredBlock,
}

impl ActiveItemMarker {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left-bar" => Some(Self::LeftBar),
            "colored-block" => Some(Self::ColoredBlock),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftBar => "left-bar",
            Self::ColoredBlock => "colored-block",
        }
    }
}

/// What clicking a tag header does in focused mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavTagClick {
    #[default]
    ExpandCollapse,
    ShowDescription,
}

impl NavTagClick {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expand-collapse" => Some(Self::ExpandCollapse),
            "show-description" => Some(Self::ShowDescription),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpandCollapse => "expand-collapse",
            Self::ShowDescription => "show-description",
        }
    }
}

/// Navigation bar configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavConfig {
    pub render_style: RenderStyle,
    pub show_method_in_nav_bar: MethodStyle,
    /// Show path templates instead of summaries.
    pub use_path_in_nav_bar: bool,
    /// List markdown headings of descriptions under the overview and leaf tags.
    pub info_description_headings_in_nav_bar: bool,
    pub nav_active_item_marker: ActiveItemMarker,
    pub on_nav_tag_click: NavTagClick,
    pub allow_search: bool,
    pub show_info: bool,
    pub allow_server_selection: bool,
    pub allow_authentication: bool,
    pub show_components: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            render_style: RenderStyle::default(),
            show_method_in_nav_bar: MethodStyle::default(),
            use_path_in_nav_bar: false,
            info_description_headings_in_nav_bar: false,
            nav_active_item_marker: ActiveItemMarker::default(),
            on_nav_tag_click: NavTagClick::default(),
            allow_search: true,
            show_info: true,
            allow_server_selection: true,
            allow_authentication: true,
            show_components: false,
        }
    }
}

impl NavConfig {
    #[must_use]
    pub fn with_render_style(mut self, style: RenderStyle) -> Self {
        self.render_style = style;
        self
    }

    #[must_use]
    pub fn with_method_style(mut self, style: MethodStyle) -> Self {
        self.show_method_in_nav_bar = style;
        self
    }

    #[must_use]
    pub fn with_use_path(mut self, use_path: bool) -> Self {
        self.use_path_in_nav_bar = use_path;
        self
    }

    #[must_use]
    pub fn with_info_headings(mut self, enabled: bool) -> Self {
        self.info_description_headings_in_nav_bar = enabled;
        self
    }

    #[must_use]
    pub fn with_active_marker(mut self, marker: ActiveItemMarker) -> Self {
        self.nav_active_item_marker = marker;
        self
    }

    #[must_use]
    pub fn with_tag_click(mut self, click: NavTagClick) -> Self {
        self.on_nav_tag_click = click;
        self
    }

    #[must_use]
    pub fn with_allow_search(mut self, allow: bool) -> Self {
        self.allow_search = allow;
        self
    }

    #[must_use]
    pub fn with_show_info(mut self, show: bool) -> Self {
        self.show_info = show;
        self
    }

    #[must_use]
    pub fn with_server_selection(mut self, allow: bool) -> Self {
        self.allow_server_selection = allow;
        self
    }

    #[must_use]
    pub fn with_authentication(mut self, allow: bool) -> Self {
        self.allow_authentication = allow;
        self
    }

    #[must_use]
    pub fn with_components(mut self, show: bool) -> Self {
        self.show_components = show;
        self
    }

    /// Focused mode where a tag click only expands or collapses; leaf
    /// headings are not listed then.
    #[must_use]
    pub fn expands_on_tag_click(&self) -> bool {
        self.render_style == RenderStyle::Focused
            && self.on_nav_tag_click == NavTagClick::ExpandCollapse
    }

    /// Read configuration from attribute pairs such as
    /// `("render-style", "focused")`. Later pairs win.
    #[must_use]
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(String, &str)> = attributes
            .into_iter()
            .map(|(name, value)| (name.trim().to_ascii_lowercase(), value))
            .collect();
        Self::from_lookup(|attr| {
            pairs
                .iter()
                .rev()
                .find(|(name, _)| name == attr)
                .map(|(_, value)| (*value).to_owned())
        })
    }

    /// Read configuration from `APINAV_*` variables of the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read configuration through a custom environment lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|attr| get_env(&env_key(attr)))
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |attr: &str, default: bool| {
            lookup(attr)
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(default)
        };

        Self {
            render_style: lookup(ATTR_RENDER_STYLE)
                .as_deref()
                .and_then(RenderStyle::parse)
                .unwrap_or(defaults.render_style),
            show_method_in_nav_bar: lookup(ATTR_SHOW_METHOD)
                .as_deref()
                .and_then(MethodStyle::parse)
                .unwrap_or(defaults.show_method_in_nav_bar),
            use_path_in_nav_bar: flag(ATTR_USE_PATH, defaults.use_path_in_nav_bar),
            info_description_headings_in_nav_bar: flag(
                ATTR_INFO_HEADINGS,
                defaults.info_description_headings_in_nav_bar,
            ),
            nav_active_item_marker: lookup(ATTR_ACTIVE_MARKER)
                .as_deref()
                .and_then(ActiveItemMarker::parse)
                .unwrap_or(defaults.nav_active_item_marker),
            on_nav_tag_click: lookup(ATTR_ON_TAG_CLICK)
                .as_deref()
                .and_then(NavTagClick::parse)
                .unwrap_or(defaults.on_nav_tag_click),
            allow_search: flag(ATTR_ALLOW_SEARCH, defaults.allow_search),
            show_info: flag(ATTR_SHOW_INFO, defaults.show_info),
            allow_server_selection: flag(
                ATTR_ALLOW_SERVER_SELECTION,
                defaults.allow_server_selection,
            ),
            allow_authentication: flag(ATTR_ALLOW_AUTHENTICATION, defaults.allow_authentication),
            show_components: flag(ATTR_SHOW_COMPONENTS, defaults.show_components),
        }
    }

    /// Serialize to a compact JSON line (for diagnostics).
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            concat!(
                r#"{{"render_style":"{}","show_method":"{}","use_path":{},"#,
                r#""info_headings":{},"active_marker":"{}","on_tag_click":"{}","#,
                r#""allow_search":{},"show_info":{},"allow_server_selection":{},"#,
                r#""allow_authentication":{},"show_components":{}}}"#
            ),
            self.render_style.as_str(),
            self.show_method_in_nav_bar.as_str(),
            self.use_path_in_nav_bar,
            self.info_description_headings_in_nav_bar,
            self.nav_active_item_marker.as_str(),
            self.on_nav_tag_click.as_str(),
            self.allow_search,
            self.show_info,
            self.allow_server_selection,
            self.allow_authentication,
            self.show_components,
        )
    }
}

fn env_key(attr: &str) -> String {
    let mut key = String::with_capacity(ENV_PREFIX.len() + attr.len());
    key.push_str(ENV_PREFIX);
    key.extend(
        attr.chars()
            .map(|c| if c == '-' { '_' } else { c.to_ascii_uppercase() }),
    );
    key
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
