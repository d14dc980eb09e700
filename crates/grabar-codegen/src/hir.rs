//! Typed representation of the wait and assertion statements a user can add
//! while recording.
//!
//! # Design Principles
//!
//! 1. **Closed set**: every wait/assertion kind is one enum variant carrying
//!    only the fields meaningful for it
//! 2. **No templates**: values are never spliced into text; [`crate::render`]
//!    formats each variant exhaustively
//! 3. **Determinism**: the same step always renders to the same statement

use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};

/// An element target: either a raw selector (`#login`, `text=Sign in`) or a
/// Playwright locator expression (`getByRole('button')`, `page.locator(...)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Create a target, rejecting blank selectors.
    pub fn new(selector: impl Into<String>) -> Result<Self> {
        let selector = selector.into();
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(CodegenError::EmptyTarget {
                kind: "target".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The selector or expression as given
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the target is already a locator expression rather than a raw
    /// selector string.
    #[must_use]
    pub fn is_expression(&self) -> bool {
        self.is_page_expression() || self.needs_page_prefix()
    }

    pub(crate) fn is_page_expression(&self) -> bool {
        self.0.starts_with("page.")
    }

    pub(crate) fn needs_page_prefix(&self) -> bool {
        self.0.starts_with("getBy")
            || self.0.starts_with("locator(")
            || self.0.starts_with("frameLocator(")
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text or URL matcher: an exact string, or a regular expression source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TextPattern {
    /// Exact text (rendered as a quoted string)
    Literal(String),
    /// Regular expression source (rendered as `/source/`)
    Regex(String),
}

impl TextPattern {
    /// Create a literal pattern
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Create a regex pattern
    #[must_use]
    pub fn regex(source: impl Into<String>) -> Self {
        Self::Regex(source.into())
    }

    /// Parse user input: `/.../` becomes a regex, anything else a literal.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('/') && trimmed.ends_with('/') {
            Self::Regex(trimmed[1..trimmed.len() - 1].to_string())
        } else {
            Self::Literal(input.to_string())
        }
    }
}

/// Page load states accepted by `waitForLoadState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// The `load` event fired
    #[default]
    Load,
    /// `DOMContentLoaded` fired
    #[serde(rename = "domcontentloaded")]
    DomContentLoaded,
    /// No network connections for at least 500ms
    #[serde(rename = "networkidle")]
    NetworkIdle,
}

impl LoadState {
    /// The Playwright state name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle => "networkidle",
        }
    }

    /// Parse a Playwright state name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "load" => Some(Self::Load),
            "domcontentloaded" => Some(Self::DomContentLoaded),
            "networkidle" => Some(Self::NetworkIdle),
            _ => None,
        }
    }
}

/// `waitUntil` values accepted by navigation waits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUntil {
    /// The `load` event fired
    Load,
    /// `DOMContentLoaded` fired
    #[serde(rename = "domcontentloaded")]
    DomContentLoaded,
    /// No network connections for at least 500ms
    #[default]
    #[serde(rename = "networkidle")]
    NetworkIdle,
    /// The navigation response was received
    Commit,
}

impl WaitUntil {
    /// The Playwright option value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle => "networkidle",
            Self::Commit => "commit",
        }
    }

    /// Parse a Playwright option value
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "load" => Some(Self::Load),
            "domcontentloaded" => Some(Self::DomContentLoaded),
            "networkidle" => Some(Self::NetworkIdle),
            "commit" => Some(Self::Commit),
            _ => None,
        }
    }
}

/// A wait the user inserted into the recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "wait", rename_all = "snake_case")]
pub enum WaitStep {
    /// Element becomes visible
    Visible {
        /// Element to wait for
        target: Target,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Element becomes hidden or detached
    Hidden {
        /// Element to wait for
        target: Target,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Element is attached to the DOM
    Attached {
        /// Element to wait for
        target: Target,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Element becomes enabled
    Enabled {
        /// Element to wait for
        target: Target,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Element becomes disabled
    Disabled {
        /// Element to wait for
        target: Target,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Element becomes editable
    Editable {
        /// Element to wait for
        target: Target,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Page reaches a load state
    LoadState {
        /// State to reach
        state: LoadState,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Page URL matches
    Url {
        /// URL or pattern
        url: TextPattern,
    },
    /// A response for a matching URL arrives
    Response {
        /// URL or pattern
        url: TextPattern,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// A request for a matching URL is issued
    Request {
        /// URL or pattern
        url: TextPattern,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
    /// Fixed delay
    Timeout {
        /// Delay in milliseconds
        ms: u64,
    },
    /// A JavaScript predicate evaluated in the page returns truthy
    Function {
        /// Condition expression (page-side JavaScript)
        condition: String,
    },
    /// A navigation completes
    Navigation {
        /// Expected destination, if any
        url: Option<String>,
        /// Load milestone to wait for
        wait_until: WaitUntil,
        /// Optional timeout override
        timeout_ms: Option<u64>,
    },
}

impl WaitStep {
    /// The element this wait targets, if it is element-level
    #[must_use]
    pub fn target(&self) -> Option<&Target> {
        match self {
            Self::Visible { target, .. }
            | Self::Hidden { target, .. }
            | Self::Attached { target, .. }
            | Self::Enabled { target, .. }
            | Self::Disabled { target, .. }
            | Self::Editable { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// The check an assertion performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "expect", content = "value", rename_all = "snake_case")]
pub enum Expectation {
    /// `toBeVisible()`
    Visible,
    /// `toBeHidden()`
    Hidden,
    /// `toHaveCount(n)`
    Count(u32),
    /// `toHaveText(text)`
    Text(TextPattern),
    /// `toContainText(text)`
    ContainsText(String),
    /// `toHaveValue(value)`
    Value(String),
    /// `toBeEmpty()`
    Empty,
    /// `toHaveAttribute(name, value)`
    Attribute {
        /// Attribute name
        name: String,
        /// Expected value
        value: String,
    },
    /// `toHaveClass(class)`
    Class(String),
    /// `toHaveCSS(name, value)`
    Css {
        /// CSS property
        name: String,
        /// Expected computed value
        value: String,
    },
    /// `toHaveId(id)`
    Id(String),
    /// `toBeChecked()`
    Checked,
    /// `toBeDisabled()`
    Disabled,
    /// `toBeEnabled()`
    Enabled,
    /// `toBeEditable()`
    Editable,
    /// `toBeFocused()`
    Focused,
    /// `toHaveURL(url)` on the page
    Url(TextPattern),
    /// `toHaveTitle(title)` on the page
    Title(TextPattern),
    /// `toBeInViewport()`
    InViewport,
    /// `toHaveAccessibleName(name)`
    AccessibleName(String),
    /// `toHaveAccessibleDescription(description)`
    AccessibleDescription(String),
    /// `toHaveRole(role)`
    Role(String),
    /// `toHaveValues([..])`
    Values(Vec<String>),
    /// `toHaveScreenshot(name)`
    Screenshot(String),
    /// `toPassAxe()` (requires the axe matcher plugin)
    PassesAxe,
}

impl Expectation {
    /// The Playwright matcher name
    #[must_use]
    pub const fn matcher(&self) -> &'static str {
        match self {
            Self::Visible => "toBeVisible",
            Self::Hidden => "toBeHidden",
            Self::Count(_) => "toHaveCount",
            Self::Text(_) => "toHaveText",
            Self::ContainsText(_) => "toContainText",
            Self::Value(_) => "toHaveValue",
            Self::Empty => "toBeEmpty",
            Self::Attribute { .. } => "toHaveAttribute",
            Self::Class(_) => "toHaveClass",
            Self::Css { .. } => "toHaveCSS",
            Self::Id(_) => "toHaveId",
            Self::Checked => "toBeChecked",
            Self::Disabled => "toBeDisabled",
            Self::Enabled => "toBeEnabled",
            Self::Editable => "toBeEditable",
            Self::Focused => "toBeFocused",
            Self::Url(_) => "toHaveURL",
            Self::Title(_) => "toHaveTitle",
            Self::InViewport => "toBeInViewport",
            Self::AccessibleName(_) => "toHaveAccessibleName",
            Self::AccessibleDescription(_) => "toHaveAccessibleDescription",
            Self::Role(_) => "toHaveRole",
            Self::Values(_) => "toHaveValues",
            Self::Screenshot(_) => "toHaveScreenshot",
            Self::PassesAxe => "toPassAxe",
        }
    }

    /// Whether the assertion is made against the page rather than an element
    #[must_use]
    pub const fn is_page_level(&self) -> bool {
        matches!(self, Self::Url(_) | Self::Title(_))
    }
}

/// An assertion the user inserted into the recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// Element under test; `None` for page-level expectations
    pub target: Option<Target>,
    /// What is checked
    pub expectation: Expectation,
    /// `expect.soft` instead of `expect`
    pub soft: bool,
}

impl Assertion {
    /// Assertion against an element
    #[must_use]
    pub fn element(target: Target, expectation: Expectation) -> Self {
        Self {
            target: Some(target),
            expectation,
            soft: false,
        }
    }

    /// Assertion against the page (`toHaveURL`, `toHaveTitle`)
    #[must_use]
    pub fn page(expectation: Expectation) -> Self {
        Self {
            target: None,
            expectation,
            soft: false,
        }
    }

    /// Make this a soft assertion
    #[must_use]
    pub fn soft(mut self) -> Self {
        self.soft = true;
        self
    }
}

/// A manually inserted statement: either a wait or an assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// A wait
    Wait(WaitStep),
    /// An assertion
    Assert(Assertion),
}

impl From<WaitStep> for Step {
    fn from(wait: WaitStep) -> Self {
        Self::Wait(wait)
    }
}

impl From<Assertion> for Step {
    fn from(assertion: Assertion) -> Self {
        Self::Assert(assertion)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod target_tests {
        use super::*;

        #[test]
        fn test_target_trims() {
            let target = Target::new("  #login ").unwrap();
            assert_eq!(target.as_str(), "#login");
        }

        #[test]
        fn test_target_rejects_blank() {
            assert!(Target::new("   ").is_err());
            assert!(Target::new("").is_err());
        }

        #[test]
        fn test_target_expression_detection() {
            assert!(Target::new("page.getByRole('button')").unwrap().is_expression());
            assert!(Target::new("getByText('Hi')").unwrap().is_expression());
            assert!(Target::new("locator('#a')").unwrap().is_expression());
            assert!(Target::new("frameLocator('#f')").unwrap().is_expression());
            assert!(!Target::new("#a > .b").unwrap().is_expression());
        }
    }

    mod pattern_tests {
        use super::*;

        #[test]
        fn test_parse_regex() {
            assert_eq!(TextPattern::parse("/dash.*/"), TextPattern::regex("dash.*"));
        }

        #[test]
        fn test_parse_literal() {
            assert_eq!(
                TextPattern::parse("https://example.com/"),
                TextPattern::literal("https://example.com/")
            );
        }

        #[test]
        fn test_single_slash_is_literal() {
            assert_eq!(TextPattern::parse("/"), TextPattern::literal("/"));
        }
    }

    mod state_tests {
        use super::*;

        #[test]
        fn test_load_state_round_trip_names() {
            for state in [LoadState::Load, LoadState::DomContentLoaded, LoadState::NetworkIdle] {
                assert_eq!(LoadState::parse(state.as_str()), Some(state));
            }
            assert_eq!(LoadState::parse("idle"), None);
        }

        #[test]
        fn test_wait_until_default_is_networkidle() {
            assert_eq!(WaitUntil::default(), WaitUntil::NetworkIdle);
            assert_eq!(WaitUntil::parse("commit"), Some(WaitUntil::Commit));
        }
    }

    mod expectation_tests {
        use super::*;

        #[test]
        fn test_page_level() {
            assert!(Expectation::Url(TextPattern::literal("x")).is_page_level());
            assert!(Expectation::Title(TextPattern::literal("x")).is_page_level());
            assert!(!Expectation::Visible.is_page_level());
        }

        #[test]
        fn test_matcher_names() {
            let css = Expectation::Css {
                name: "a".into(),
                value: "b".into(),
            };
            assert_eq!(css.matcher(), "toHaveCSS");
            assert_eq!(Expectation::Url(TextPattern::literal("x")).matcher(), "toHaveURL");
            assert_eq!(Expectation::PassesAxe.matcher(), "toPassAxe");
        }

        #[test]
        fn test_soft_builder() {
            let a = Assertion::page(Expectation::Title(TextPattern::literal("Home"))).soft();
            assert!(a.soft);
            assert!(a.target.is_none());
        }
    }

    #[test]
    fn test_wait_target_accessor() {
        let target = Target::new("#spinner").unwrap();
        let wait = WaitStep::Hidden {
            target: target.clone(),
            timeout_ms: None,
        };
        assert_eq!(wait.target(), Some(&target));
        assert_eq!(WaitStep::Timeout { ms: 10 }.target(), None);
    }

    #[test]
    fn test_step_serde_tagging() {
        let step = Step::from(WaitStep::Timeout { ms: 500 });
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step\":\"wait\""));
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}
