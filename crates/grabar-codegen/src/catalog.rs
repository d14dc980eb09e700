//! Static catalog of the wait and assertion kinds offered to users.
//!
//! The catalog drives option pickers and the `catalog` CLI command; every
//! entry's `id` is accepted by [`crate::StepBuilder::from_payload`].

use serde::Serialize;

/// Whether an entry produces a wait or an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// `page.waitFor*` and friends
    Wait,
    /// `expect(...)` matchers
    Assert,
}

/// Grouping shown in pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Element visibility
    Visibility,
    /// Element text and values
    Content,
    /// Attributes, classes, CSS
    Attributes,
    /// Enabled, checked, focused...
    State,
    /// Page load and URL
    Page,
    /// Requests and responses
    Network,
    /// Viewport placement
    Layout,
    /// Accessible name, role, axe
    Accessibility,
    /// Everything else
    Advanced,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Self; 9] = [
        Self::Visibility,
        Self::Content,
        Self::Attributes,
        Self::State,
        Self::Page,
        Self::Network,
        Self::Layout,
        Self::Accessibility,
        Self::Advanced,
    ];

    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visibility => "visibility",
            Self::Content => "content",
            Self::Attributes => "attributes",
            Self::State => "state",
            Self::Page => "page",
            Self::Network => "network",
            Self::Layout => "layout",
            Self::Accessibility => "accessibility",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a lowercase identifier
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a payload parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Free text
    String,
    /// Non-negative integer
    Number,
    /// List of strings
    Array,
}

/// A parameter an entry accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Key in the payload
    pub name: &'static str,
    /// Expected type
    #[serde(rename = "type")]
    pub kind: ParamType,
    /// Whether the builder rejects a payload without it
    pub required: bool,
    /// Value used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    /// Short help text
    pub description: &'static str,
}

/// One selectable wait or assertion kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Stable identifier (Playwright method or matcher name)
    pub id: &'static str,
    /// Wait or assertion
    pub family: Family,
    /// Picker grouping
    pub category: Category,
    /// Short help text
    pub description: &'static str,
    /// Whether an element selector is required
    pub needs_selector: bool,
    /// Accepted parameters
    pub params: &'static [ParamSpec],
}

impl CatalogEntry {
    /// Look up a parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

// =============================================================================
// PARAMETERS
// =============================================================================

const fn string(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind: ParamType::String,
        required: true,
        default: None,
        description,
    }
}

const TIMEOUT: ParamSpec = ParamSpec {
    name: "timeout",
    kind: ParamType::Number,
    required: false,
    default: None,
    description: "Timeout override in milliseconds",
};

const P_NONE: &[ParamSpec] = &[];
const P_TIMEOUT: &[ParamSpec] = &[TIMEOUT];
const P_URL: &[ParamSpec] = &[string("url", "Exact URL or /regex/")];
const P_URL_TIMEOUT: &[ParamSpec] = &[string("url", "URL, glob, or /regex/"), TIMEOUT];
const P_DELAY: &[ParamSpec] = &[ParamSpec {
    name: "timeout",
    kind: ParamType::Number,
    required: true,
    default: Some("1000"),
    description: "Delay in milliseconds",
}];
const P_CONDITION: &[ParamSpec] = &[ParamSpec {
    name: "condition",
    kind: ParamType::String,
    required: true,
    default: Some("document.querySelector('.ready') !== null"),
    description: "JavaScript expression evaluated in the page",
}];
const P_STATE: &[ParamSpec] = &[
    ParamSpec {
        name: "state",
        kind: ParamType::String,
        required: false,
        default: Some("load"),
        description: "load, domcontentloaded or networkidle",
    },
    TIMEOUT,
];
const P_NAVIGATION: &[ParamSpec] = &[
    ParamSpec {
        name: "url",
        kind: ParamType::String,
        required: false,
        default: None,
        description: "Expected destination URL",
    },
    ParamSpec {
        name: "waitUntil",
        kind: ParamType::String,
        required: false,
        default: Some("networkidle"),
        description: "load, domcontentloaded, networkidle or commit",
    },
    TIMEOUT,
];
const P_COUNT: &[ParamSpec] = &[ParamSpec {
    name: "count",
    kind: ParamType::Number,
    required: true,
    default: None,
    description: "Expected number of matching elements",
}];
const P_TEXT: &[ParamSpec] = &[string("text", "Expected text or /regex/")];
const P_VALUE: &[ParamSpec] = &[string("value", "Expected input value")];
const P_NAME_VALUE: &[ParamSpec] = &[
    string("name", "Attribute or property name"),
    string("value", "Expected value"),
];
const P_CLASS: &[ParamSpec] = &[string("className", "Expected class")];
const P_ID: &[ParamSpec] = &[string("id", "Expected id")];
const P_TITLE: &[ParamSpec] = &[string("title", "Expected title or /regex/")];
const P_NAME: &[ParamSpec] = &[string("name", "Expected accessible name")];
const P_DESCRIPTION: &[ParamSpec] = &[string("description", "Expected accessible description")];
const P_ROLE: &[ParamSpec] = &[string("role", "Expected ARIA role")];
const P_VALUES: &[ParamSpec] = &[ParamSpec {
    name: "values",
    kind: ParamType::Array,
    required: true,
    default: None,
    description: "Expected selected option values",
}];
const P_SCREENSHOT: &[ParamSpec] = &[string("name", "Snapshot file name")];

// =============================================================================
// ENTRIES
// =============================================================================

const fn wait(
    id: &'static str,
    category: Category,
    needs_selector: bool,
    params: &'static [ParamSpec],
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        family: Family::Wait,
        category,
        description,
        needs_selector,
        params,
    }
}

const fn assert(
    id: &'static str,
    category: Category,
    needs_selector: bool,
    params: &'static [ParamSpec],
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        family: Family::Assert,
        category,
        description,
        needs_selector,
        params,
    }
}

static CATALOG: &[CatalogEntry] = &[
    wait(
        "waitForVisible",
        Category::Visibility,
        true,
        P_TIMEOUT,
        "Wait until the element is visible",
    ),
    wait(
        "waitForHidden",
        Category::Visibility,
        true,
        P_TIMEOUT,
        "Wait until the element is hidden",
    ),
    wait(
        "waitForSelector",
        Category::Visibility,
        true,
        P_TIMEOUT,
        "Wait until the element is attached",
    ),
    wait("waitForEnabled", Category::State, true, P_TIMEOUT, "Wait until the element is enabled"),
    wait("waitForDisabled", Category::State, true, P_TIMEOUT, "Wait until the element is disabled"),
    wait("waitForEditable", Category::State, true, P_TIMEOUT, "Wait until the element is editable"),
    wait("waitForDOMContentLoaded", Category::Page, false, P_TIMEOUT, "Wait for DOMContentLoaded"),
    wait("waitForLoad", Category::Page, false, P_TIMEOUT, "Wait for the load event"),
    wait("waitForLoadState", Category::Page, false, P_STATE, "Wait for a page load state"),
    wait("waitForURL", Category::Page, false, P_URL, "Wait until the page URL matches"),
    wait(
        "waitForNavigation",
        Category::Page,
        false,
        P_NAVIGATION,
        "Wait for a navigation to finish",
    ),
    wait(
        "waitForNetworkIdle",
        Category::Network,
        false,
        P_TIMEOUT,
        "Wait until the network is idle",
    ),
    wait(
        "waitForResponse",
        Category::Network,
        false,
        P_URL_TIMEOUT,
        "Wait for a matching response",
    ),
    wait("waitForRequest", Category::Network, false, P_URL_TIMEOUT, "Wait for a matching request"),
    wait(
        "waitForTimeout",
        Category::Advanced,
        false,
        P_DELAY,
        "Wait a fixed number of milliseconds",
    ),
    wait(
        "waitForFunction",
        Category::Advanced,
        false,
        P_CONDITION,
        "Wait until a page predicate holds",
    ),
    assert("toBeVisible", Category::Visibility, true, P_NONE, "Element is visible"),
    assert("toBeHidden", Category::Visibility, true, P_NONE, "Element is hidden"),
    assert("toHaveCount", Category::Visibility, true, P_COUNT, "Number of matching elements"),
    assert("toHaveText", Category::Content, true, P_TEXT, "Element text matches exactly"),
    assert("toContainText", Category::Content, true, P_TEXT, "Element text contains"),
    assert("toHaveValue", Category::Content, true, P_VALUE, "Input value"),
    assert("toBeEmpty", Category::Content, true, P_NONE, "Element has no content"),
    assert("toHaveAttribute", Category::Attributes, true, P_NAME_VALUE, "Attribute value"),
    assert("toHaveClass", Category::Attributes, true, P_CLASS, "Class attribute"),
    assert("toHaveCSS", Category::Attributes, true, P_NAME_VALUE, "Computed CSS property"),
    assert("toHaveId", Category::Attributes, true, P_ID, "Element id"),
    assert("toBeChecked", Category::State, true, P_NONE, "Checkbox or radio is checked"),
    assert("toBeDisabled", Category::State, true, P_NONE, "Element is disabled"),
    assert("toBeEnabled", Category::State, true, P_NONE, "Element is enabled"),
    assert("toBeEditable", Category::State, true, P_NONE, "Element is editable"),
    assert("toBeFocused", Category::State, true, P_NONE, "Element has focus"),
    assert("toHaveURL", Category::Page, false, P_URL, "Page URL"),
    assert("toHaveTitle", Category::Page, false, P_TITLE, "Page title"),
    assert("toBeInViewport", Category::Layout, true, P_NONE, "Element intersects the viewport"),
    assert("toHaveAccessibleName", Category::Accessibility, true, P_NAME, "Accessible name"),
    assert(
        "toHaveAccessibleDescription",
        Category::Accessibility,
        true,
        P_DESCRIPTION,
        "Accessible description",
    ),
    assert("toHaveRole", Category::Accessibility, true, P_ROLE, "ARIA role"),
    assert(
        "toHaveValues",
        Category::Advanced,
        true,
        P_VALUES,
        "Selected options of a multi-select",
    ),
    assert(
        "toHaveScreenshot",
        Category::Advanced,
        true,
        P_SCREENSHOT,
        "Visual snapshot comparison",
    ),
    assert("toPassAxe", Category::Advanced, true, P_NONE, "No axe accessibility violations"),
];

/// Every wait and assertion kind, waits first.
#[must_use]
pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

/// Find an entry by id (case-sensitive, as Playwright names are)
#[must_use]
pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Entries in one category, preserving catalog order
pub fn by_category(category: Category) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |e| e.category == category)
}
