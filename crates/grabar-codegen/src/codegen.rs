//! Rendering of typed steps to Playwright statements.
//!
//! Every function here is pure: the output depends only on the step, and
//! values are escaped into literals rather than substituted into a template.

use crate::hir::{Assertion, Expectation, Step, Target, TextPattern, WaitStep};

/// Render a step as a single `await ...;` statement.
#[must_use]
pub fn render(step: &Step) -> String {
    match step {
        Step::Wait(wait) => render_wait(wait),
        Step::Assert(assertion) => render_assertion(assertion),
    }
}

/// Render a wait.
#[must_use]
pub fn render_wait(wait: &WaitStep) -> String {
    match wait {
        WaitStep::Visible { target, timeout_ms } => element_wait(target, "visible", *timeout_ms),
        WaitStep::Hidden { target, timeout_ms } => element_wait(target, "hidden", *timeout_ms),
        WaitStep::Attached { target, timeout_ms } => element_wait(target, "attached", *timeout_ms),
        // `waitFor` has no enabled/disabled/editable states; web-first
        // assertions poll until they hold instead.
        WaitStep::Enabled { target, timeout_ms } => {
            polling_wait(target, "toBeEnabled", *timeout_ms)
        }
        WaitStep::Disabled { target, timeout_ms } => {
            polling_wait(target, "toBeDisabled", *timeout_ms)
        }
        WaitStep::Editable { target, timeout_ms } => {
            polling_wait(target, "toBeEditable", *timeout_ms)
        }
        WaitStep::LoadState { state, timeout_ms } => match timeout_ms {
            Some(ms) => format!(
                "await page.waitForLoadState({}, {{ timeout: {ms} }});",
                quote(state.as_str())
            ),
            None => format!("await page.waitForLoadState({});", quote(state.as_str())),
        },
        WaitStep::Url { url } => format!("await page.waitForURL({});", pattern(url)),
        WaitStep::Response { url, timeout_ms } => {
            format!("await page.waitForResponse({}{});", pattern(url), timeout_arg(*timeout_ms))
        }
        WaitStep::Request { url, timeout_ms } => {
            format!("await page.waitForRequest({}{});", pattern(url), timeout_arg(*timeout_ms))
        }
        WaitStep::Timeout { ms } => format!("await page.waitForTimeout({ms});"),
        WaitStep::Function { condition } => {
            format!("await page.waitForFunction(() => {});", condition.trim())
        }
        WaitStep::Navigation {
            url,
            wait_until,
            timeout_ms,
        } => {
            let mut options = Vec::with_capacity(3);
            if let Some(url) = url.as_deref().filter(|u| !u.trim().is_empty()) {
                options.push(format!("url: {}", quote(url)));
            }
            options.push(format!("waitUntil: {}", quote(wait_until.as_str())));
            if let Some(ms) = timeout_ms {
                options.push(format!("timeout: {ms}"));
            }
            format!("await page.waitForNavigation({{ {} }});", options.join(", "))
        }
    }
}

/// Render an assertion.
#[must_use]
pub fn render_assertion(assertion: &Assertion) -> String {
    let expect = if assertion.soft { "expect.soft" } else { "expect" };
    let subject = match (&assertion.target, assertion.expectation.is_page_level()) {
        (Some(target), false) => locator_expr(target),
        _ => "page".to_string(),
    };
    let matcher = assertion.expectation.matcher();
    let args = expectation_args(&assertion.expectation);
    format!("await {expect}({subject}).{matcher}({args});")
}

/// The locator expression for a target.
///
/// Expressions starting with `page.` are used verbatim, bare `getBy*`,
/// `locator(` and `frameLocator(` calls are anchored on `page`, and anything
/// else is treated as a selector string.
#[must_use]
pub fn locator_expr(target: &Target) -> String {
    if target.is_page_expression() {
        target.as_str().to_string()
    } else if target.needs_page_prefix() {
        format!("page.{}", target.as_str())
    } else {
        format!("page.locator({})", quote(target.as_str()))
    }
}

/// Quote a string as a single-quoted JavaScript literal.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render a text pattern as a string or regex literal.
#[must_use]
pub fn pattern(pattern: &TextPattern) -> String {
    match pattern {
        TextPattern::Literal(text) => quote(text),
        TextPattern::Regex(source) => {
            let mut out = String::with_capacity(source.len() + 2);
            out.push('/');
            let mut escaped = false;
            for c in source.chars() {
                match c {
                    '/' if !escaped => out.push_str("\\/"),
                    '\n' => out.push_str("\\n"),
                    c => out.push(c),
                }
                escaped = c == '\\' && !escaped;
            }
            if escaped {
                out.push('\\');
            }
            out.push('/');
            out
        }
    }
}

fn element_wait(target: &Target, state: &str, timeout_ms: Option<u64>) -> String {
    let options = match timeout_ms {
        Some(ms) => format!("{{ state: {}, timeout: {ms} }}", quote(state)),
        None => format!("{{ state: {} }}", quote(state)),
    };
    if target.is_expression() {
        format!("await {}.waitFor({options});", locator_expr(target))
    } else {
        format!(
            "await page.waitForSelector({}, {options});",
            quote(target.as_str())
        )
    }
}

fn polling_wait(target: &Target, matcher: &str, timeout_ms: Option<u64>) -> String {
    let options = timeout_ms.map_or_else(String::new, |ms| format!("{{ timeout: {ms} }}"));
    format!("await expect({}).{matcher}({options});", locator_expr(target))
}

fn timeout_arg(timeout_ms: Option<u64>) -> String {
    timeout_ms.map_or_else(String::new, |ms| format!(", {{ timeout: {ms} }}"))
}

fn expectation_args(expectation: &Expectation) -> String {
    match expectation {
        Expectation::Visible
        | Expectation::Hidden
        | Expectation::Empty
        | Expectation::Checked
        | Expectation::Disabled
        | Expectation::Enabled
        | Expectation::Editable
        | Expectation::Focused
        | Expectation::InViewport
        | Expectation::PassesAxe => String::new(),
        Expectation::Count(n) => n.to_string(),
        Expectation::Text(p) | Expectation::Url(p) | Expectation::Title(p) => pattern(p),
        Expectation::ContainsText(s)
        | Expectation::Value(s)
        | Expectation::Class(s)
        | Expectation::Id(s)
        | Expectation::AccessibleName(s)
        | Expectation::AccessibleDescription(s)
        | Expectation::Role(s)
        | Expectation::Screenshot(s) => quote(s),
        Expectation::Attribute { name, value } | Expectation::Css { name, value } => {
            format!("{}, {}", quote(name), quote(value))
        }
        Expectation::Values(values) => {
            let items: Vec<String> = values.iter().map(|v| quote(v)).collect();
            format!("[{}]", items.join(", "))
        }
    }
}
