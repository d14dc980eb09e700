//! Build typed steps from loosely-typed dialog payloads.
//!
//! A payload is a kind id, an optional element selector and a map of named
//! parameters, as collected by a wait or assertion picker. The builder
//! validates it against the [`crate::catalog`] and produces a [`Step`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog::{self, CatalogEntry, Family};
use crate::error::{CodegenError, Result};
use crate::hir::{
    Assertion, Expectation, LoadState, Step, Target, TextPattern, WaitStep, WaitUntil,
};

/// Parameter map of a payload
pub type Params = BTreeMap<String, Value>;

/// Default URL pattern for the `network` shorthand
pub const DEFAULT_NETWORK_PATTERN: &str = "**/api/**";

/// Shorthand wait states emitted by the in-page wait picker.
const ALIASES: &[(&str, &str)] = &[
    ("element", "waitForVisible"),
    ("removed", "waitForHidden"),
    ("navigation", "waitForNavigation"),
    ("network", "waitForResponse"),
    ("timeout", "waitForTimeout"),
    ("pageLoad", "waitForLoadState"),
];

/// Resolve a shorthand alias to its catalog id
#[must_use]
pub fn canonical_kind(kind: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == kind)
        .map_or(kind, |(_, id)| *id)
}

/// Builder for a single wait or assertion step.
#[derive(Debug, Clone, Default)]
pub struct StepBuilder {
    kind: String,
    selector: Option<String>,
    params: Params,
    soft: bool,
}

impl StepBuilder {
    /// Start building a step of the given kind (catalog id or alias)
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Build directly from a picker payload.
    ///
    /// A boolean `soft` parameter turns an assertion into `expect.soft`.
    pub fn from_payload(kind: &str, selector: Option<&str>, params: &Params) -> Result<Step> {
        let mut builder = Self::new(kind);
        builder.selector = selector.map(str::to_string);
        builder.params = params.clone();
        builder.soft = params.get("soft").is_some_and(truthy);
        builder.build()
    }

    /// Set the element selector
    #[must_use]
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set a parameter
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Mark an assertion as soft
    #[must_use]
    pub fn soft(mut self, soft: bool) -> Self {
        self.soft = soft;
        self
    }

    /// Validate and produce the step
    pub fn build(self) -> Result<Step> {
        let id = canonical_kind(&self.kind);
        let entry = catalog::find(id).ok_or_else(|| CodegenError::UnknownKind {
            id: self.kind.clone(),
        })?;
        let ctx = Ctx {
            entry,
            selector: self.selector.as_deref(),
            params: &self.params,
            alias: id != self.kind,
        };
        match entry.family {
            Family::Wait => build_wait(&ctx).map(Step::Wait),
            Family::Assert => {
                let mut assertion = build_assertion(&ctx)?;
                assertion.soft = self.soft;
                Ok(Step::Assert(assertion))
            }
        }
    }
}

struct Ctx<'a> {
    entry: &'static CatalogEntry,
    selector: Option<&'a str>,
    params: &'a Params,
    alias: bool,
}

impl Ctx<'_> {
    fn id(&self) -> &'static str {
        self.entry.id
    }

    fn target(&self) -> Result<Target> {
        self.selector
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| CodegenError::EmptyTarget {
                kind: self.id().to_string(),
            })
            .and_then(Target::new)
    }

    fn text(&self, name: &str) -> Result<Option<String>> {
        match self.params.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(CodegenError::invalid(self.id(), name, "expected a string")),
        }
    }

    fn number(&self, name: &str) -> Result<Option<u64>> {
        match self.params.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                CodegenError::invalid(self.id(), name, "expected a non-negative integer")
            }),
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| {
                CodegenError::invalid(self.id(), name, format!("'{s}' is not a number"))
            }),
            Some(_) => Err(CodegenError::invalid(self.id(), name, "expected a number")),
        }
    }

    fn default_of(&self, name: &str) -> Option<&'static str> {
        self.entry.param(name).and_then(|p| p.default)
    }

    fn required_text(&self, name: &str) -> Result<String> {
        match self.text(name)? {
            Some(s) => Ok(s),
            None => self
                .default_of(name)
                .map(str::to_string)
                .ok_or_else(|| CodegenError::missing(self.id(), name)),
        }
    }

    fn required_number(&self, name: &str) -> Result<u64> {
        match self.number(name)? {
            Some(n) => Ok(n),
            None => self
                .default_of(name)
                .and_then(|d| d.parse().ok())
                .ok_or_else(|| CodegenError::missing(self.id(), name)),
        }
    }

    fn strings(&self, name: &str) -> Result<Vec<String>> {
        match self.params.get(name) {
            None | Some(Value::Null) => Err(CodegenError::missing(self.id(), name)),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(CodegenError::invalid(self.id(), name, "expected strings")),
                })
                .collect(),
            Some(Value::String(s)) => Ok(s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()),
            Some(_) => Err(CodegenError::invalid(self.id(), name, "expected an array")),
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn build_wait(ctx: &Ctx<'_>) -> Result<WaitStep> {
    let id = ctx.id();
    let step = match id {
        "waitForVisible" => WaitStep::Visible {
            target: ctx.target()?,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForHidden" => WaitStep::Hidden {
            target: ctx.target()?,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForSelector" => WaitStep::Attached {
            target: ctx.target()?,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForEnabled" => WaitStep::Enabled {
            target: ctx.target()?,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForDisabled" => WaitStep::Disabled {
            target: ctx.target()?,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForEditable" => WaitStep::Editable {
            target: ctx.target()?,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForDOMContentLoaded" => WaitStep::LoadState {
            state: LoadState::DomContentLoaded,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForLoad" => WaitStep::LoadState {
            state: LoadState::Load,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForNetworkIdle" => WaitStep::LoadState {
            state: LoadState::NetworkIdle,
            timeout_ms: ctx.number("timeout")?,
        },
        "waitForLoadState" => {
            let state = match ctx.text("state")? {
                Some(name) => LoadState::parse(&name).ok_or_else(|| {
                    CodegenError::invalid(id, "state", format!("unknown load state '{name}'"))
                })?,
                None => LoadState::default(),
            };
            WaitStep::LoadState {
                state,
                timeout_ms: ctx.number("timeout")?,
            }
        }
        "waitForURL" => WaitStep::Url {
            url: TextPattern::parse(&ctx.required_text("url")?),
        },
        "waitForResponse" | "waitForRequest" => {
            let url = match ctx.text("url")?.or(ctx.text("urlOrPredicate")?) {
                Some(url) => url,
                None if ctx.alias => DEFAULT_NETWORK_PATTERN.to_string(),
                None => return Err(CodegenError::missing(id, "url")),
            };
            let url = TextPattern::parse(&url);
            let timeout_ms = ctx.number("timeout")?;
            if id == "waitForResponse" {
                WaitStep::Response { url, timeout_ms }
            } else {
                WaitStep::Request { url, timeout_ms }
            }
        }
        "waitForTimeout" => WaitStep::Timeout {
            ms: ctx.required_number("timeout")?,
        },
        "waitForFunction" => WaitStep::Function {
            condition: ctx
                .text("condition")?
                .or(ctx.text("predicate")?)
                .or_else(|| ctx.default_of("condition").map(str::to_string))
                .ok_or_else(|| CodegenError::missing(id, "condition"))?,
        },
        "waitForNavigation" => {
            let wait_until = match ctx.text("waitUntil")? {
                Some(name) => WaitUntil::parse(&name).ok_or_else(|| {
                    CodegenError::invalid(id, "waitUntil", format!("unknown milestone '{name}'"))
                })?,
                None => WaitUntil::default(),
            };
            WaitStep::Navigation {
                url: ctx.text("url")?,
                wait_until,
                timeout_ms: ctx.number("timeout")?,
            }
        }
        _ => {
            return Err(CodegenError::UnknownKind { id: id.to_string() });
        }
    };
    Ok(step)
}

fn build_assertion(ctx: &Ctx<'_>) -> Result<Assertion> {
    let id = ctx.id();
    let expectation = match id {
        "toBeVisible" => Expectation::Visible,
        "toBeHidden" => Expectation::Hidden,
        "toHaveCount" => {
            let count = ctx.required_number("count")?;
            Expectation::Count(
                u32::try_from(count)
                    .map_err(|_| CodegenError::invalid(id, "count", "count is too large"))?,
            )
        }
        "toHaveText" => Expectation::Text(TextPattern::parse(&ctx.required_text("text")?)),
        "toContainText" => Expectation::ContainsText(ctx.required_text("text")?),
        "toHaveValue" => Expectation::Value(ctx.required_text("value")?),
        "toBeEmpty" => Expectation::Empty,
        "toHaveAttribute" => Expectation::Attribute {
            name: ctx.required_text("name")?,
            value: ctx.required_text("value")?,
        },
        "toHaveClass" => Expectation::Class(ctx.required_text("className")?),
        "toHaveCSS" => Expectation::Css {
            name: ctx.required_text("name")?,
            value: ctx.required_text("value")?,
        },
        "toHaveId" => Expectation::Id(ctx.required_text("id")?),
        "toBeChecked" => Expectation::Checked,
        "toBeDisabled" => Expectation::Disabled,
        "toBeEnabled" => Expectation::Enabled,
        "toBeEditable" => Expectation::Editable,
        "toBeFocused" => Expectation::Focused,
        "toHaveURL" => Expectation::Url(TextPattern::parse(&ctx.required_text("url")?)),
        "toHaveTitle" => Expectation::Title(TextPattern::parse(&ctx.required_text("title")?)),
        "toBeInViewport" => Expectation::InViewport,
        "toHaveAccessibleName" => Expectation::AccessibleName(ctx.required_text("name")?),
        "toHaveAccessibleDescription" => {
            Expectation::AccessibleDescription(ctx.required_text("description")?)
        }
        "toHaveRole" => Expectation::Role(ctx.required_text("role")?),
        "toHaveValues" => Expectation::Values(ctx.strings("values")?),
        "toHaveScreenshot" => Expectation::Screenshot(ctx.required_text("name")?),
        "toPassAxe" => Expectation::PassesAxe,
        _ => return Err(CodegenError::UnknownKind { id: id.to_string() }),
    };
    if expectation.is_page_level() {
        Ok(Assertion::page(expectation))
    } else {
        Ok(Assertion::element(ctx.target()?, expectation))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codegen::render;
    use serde_json::json;

    fn params(value: Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    mod wait_tests {
        use super::*;

        #[test]
        fn test_visible_from_payload() {
            let step = StepBuilder::from_payload("waitForVisible", Some("#ready"), &Params::new())
                .unwrap();
            assert_eq!(
                render(&step),
                "await page.waitForSelector('#ready', { state: 'visible' });"
            );
        }

        #[test]
        fn test_timeout_string_param() {
            let step = StepBuilder::new("waitForTimeout")
                .param("timeout", "2500")
                .build()
                .unwrap();
            assert_eq!(step, Step::Wait(WaitStep::Timeout { ms: 2500 }));
        }

        #[test]
        fn test_timeout_default() {
            let step = StepBuilder::new("waitForTimeout").build().unwrap();
            assert_eq!(step, Step::Wait(WaitStep::Timeout { ms: 1000 }));
        }

        #[test]
        fn test_timeout_invalid() {
            let err = StepBuilder::new("waitForTimeout")
                .param("timeout", "soon")
                .build()
                .unwrap_err();
            assert!(matches!(err, CodegenError::InvalidParam { .. }));
        }

        #[test]
        fn test_url_required() {
            let err = StepBuilder::new("waitForURL").build().unwrap_err();
            assert!(matches!(err, CodegenError::MissingParam { .. }));
        }

        #[test]
        fn test_response_accepts_url_or_predicate_key() {
            let step = StepBuilder::from_payload(
                "waitForResponse",
                None,
                &params(json!({ "urlOrPredicate": "/api\\/users/" })),
            )
            .unwrap();
            assert_eq!(
                step,
                Step::Wait(WaitStep::Response {
                    url: TextPattern::regex("api\\/users"),
                    timeout_ms: None,
                })
            );
        }

        #[test]
        fn test_load_state_invalid() {
            let err = StepBuilder::new("waitForLoadState")
                .param("state", "idle")
                .build()
                .unwrap_err();
            assert!(err.to_string().contains("idle"));
        }

        #[test]
        fn test_element_wait_requires_selector() {
            let err = StepBuilder::new("waitForHidden").selector("  ").build().unwrap_err();
            assert!(matches!(err, CodegenError::EmptyTarget { .. }));
        }
    }

    mod alias_tests {
        use super::*;

        #[test]
        fn test_canonical_kind() {
            assert_eq!(canonical_kind("element"), "waitForVisible");
            assert_eq!(canonical_kind("pageLoad"), "waitForLoadState");
            assert_eq!(canonical_kind("toBeVisible"), "toBeVisible");
        }

        #[test]
        fn test_network_alias_default_pattern() {
            let step = StepBuilder::new("network").param("timeout", 5000).build().unwrap();
            assert_eq!(
                render(&step),
                "await page.waitForResponse('**/api/**', { timeout: 5000 });"
            );
        }

        #[test]
        fn test_removed_alias() {
            let step = StepBuilder::new("removed").selector(".spinner").build().unwrap();
            assert!(matches!(step, Step::Wait(WaitStep::Hidden { .. })));
        }

        #[test]
        fn test_navigation_alias() {
            let step = StepBuilder::new("navigation")
                .param("url", "https://example.com/done")
                .build()
                .unwrap();
            assert_eq!(
                render(&step),
                "await page.waitForNavigation({ url: 'https://example.com/done', \
                 waitUntil: 'networkidle' });"
            );
        }
    }

    mod assertion_tests {
        use super::*;

        #[test]
        fn test_soft_payload() {
            let step = StepBuilder::from_payload(
                "toHaveText",
                Some("h1"),
                &params(json!({ "text": "Welcome", "soft": true })),
            )
            .unwrap();
            assert_eq!(
                render(&step),
                "await expect.soft(page.locator('h1')).toHaveText('Welcome');"
            );
        }

        #[test]
        fn test_page_level_without_selector() {
            let step = StepBuilder::new("toHaveTitle").param("title", "Home").build().unwrap();
            assert_eq!(render(&step), "await expect(page).toHaveTitle('Home');");
        }

        #[test]
        fn test_element_assertion_without_selector_fails() {
            let err = StepBuilder::new("toBeChecked").build().unwrap_err();
            assert!(matches!(err, CodegenError::EmptyTarget { .. }));
        }

        #[test]
        fn test_values_from_comma_string() {
            let step = StepBuilder::new("toHaveValues")
                .selector("select")
                .param("values", "a, b,,c")
                .build()
                .unwrap();
            assert_eq!(
                render(&step),
                "await expect(page.locator('select')).toHaveValues(['a', 'b', 'c']);"
            );
        }

        #[test]
        fn test_count_negative_rejected() {
            let err = StepBuilder::new("toHaveCount")
                .selector("li")
                .param("count", -1)
                .build()
                .unwrap_err();
            assert!(matches!(err, CodegenError::InvalidParam { .. }));
        }

        #[test]
        fn test_unknown_kind() {
            let err = StepBuilder::new("toBeShiny").build().unwrap_err();
            assert_eq!(err.to_string(), "Unknown step kind 'toBeShiny'");
        }

        #[test]
        fn test_every_catalog_entry_builds_with_full_payload() {
            let full = params(json!({
                "url": "https://x.test/",
                "timeout": 100,
                "condition": "true",
                "count": 2,
                "text": "t",
                "value": "v",
                "name": "n",
                "className": "c",
                "id": "i",
                "title": "T",
                "description": "d",
                "role": "button",
                "values": ["a"],
            }));
            for entry in catalog::catalog() {
                let step = StepBuilder::from_payload(entry.id, Some("#el"), &full);
                assert!(step.is_ok(), "{} failed: {:?}", entry.id, step);
            }
        }
    }
}
