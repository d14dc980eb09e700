//! End-to-end tests of grabar-codegen: payload in, statement out.
//!
//! These mirror what the recorder's wait and assertion pickers submit.

use std::collections::BTreeMap;

use grabar_codegen::catalog::{by_category, find};
use grabar_codegen::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn payload(value: Value) -> Params {
    serde_json::from_value(value).unwrap()
}

fn emit(kind: &str, selector: Option<&str>, params: Value) -> String {
    let step = StepBuilder::from_payload(kind, selector, &payload(params)).unwrap();
    render(&step)
}

// ============================================================================
// Waits
// ============================================================================

#[test]
fn wait_for_selector_is_attached_state() {
    assert_eq!(
        emit("waitForSelector", Some(".row"), json!({})),
        "await page.waitForSelector('.row', { state: 'attached' });"
    );
}

#[test]
fn wait_for_visible_on_get_by_locator() {
    assert_eq!(
        emit("waitForVisible", Some("getByRole('dialog')"), json!({ "timeout": 2000 })),
        "await page.getByRole('dialog').waitFor({ state: 'visible', timeout: 2000 });"
    );
}

#[test]
fn wait_for_disabled_polls_with_expect() {
    assert_eq!(
        emit("waitForDisabled", Some("#save"), json!({})),
        "await expect(page.locator('#save')).toBeDisabled();"
    );
}

#[test]
fn page_load_waits() {
    assert_eq!(
        emit("waitForDOMContentLoaded", None, json!({})),
        "await page.waitForLoadState('domcontentloaded');"
    );
    assert_eq!(emit("waitForLoad", None, json!({})), "await page.waitForLoadState('load');");
    assert_eq!(
        emit("waitForNetworkIdle", None, json!({})),
        "await page.waitForLoadState('networkidle');"
    );
    assert_eq!(
        emit("pageLoad", None, json!({ "state": "domcontentloaded", "timeout": 10 })),
        "await page.waitForLoadState('domcontentloaded', { timeout: 10 });"
    );
}

#[test]
fn wait_for_url_literal_and_regex() {
    assert_eq!(
        emit("waitForURL", None, json!({ "url": "https://shop.test/cart" })),
        "await page.waitForURL('https://shop.test/cart');"
    );
    assert_eq!(
        emit("waitForURL", None, json!({ "url": "/cart$/" })),
        "await page.waitForURL(/cart$/);"
    );
}

#[test]
fn wait_for_request_requires_url_unless_shorthand() {
    let err = StepBuilder::new("waitForRequest").build().unwrap_err();
    assert!(matches!(err, CodegenError::MissingParam { .. }));
    assert_eq!(
        emit("waitForRequest", None, json!({ "url": "**/track" })),
        "await page.waitForRequest('**/track');"
    );
}

#[test]
fn wait_for_function_uses_default_condition() {
    assert_eq!(
        emit("waitForFunction", None, json!({})),
        "await page.waitForFunction(() => document.querySelector('.ready') !== null);"
    );
}

#[test]
fn element_shorthand_with_quote_in_selector() {
    assert_eq!(
        emit("element", Some("text='Sign in'"), json!({})),
        r"await page.waitForSelector('text=\'Sign in\'', { state: 'visible' });"
    );
}

#[test]
fn timeout_shorthand() {
    assert_eq!(
        emit("timeout", None, json!({ "timeout": 750 })),
        "await page.waitForTimeout(750);"
    );
}

// ============================================================================
// Assertions
// ============================================================================

#[test]
fn assertion_matchers_without_arguments() {
    for (kind, matcher) in [
        ("toBeVisible", "toBeVisible"),
        ("toBeHidden", "toBeHidden"),
        ("toBeEmpty", "toBeEmpty"),
        ("toBeChecked", "toBeChecked"),
        ("toBeFocused", "toBeFocused"),
        ("toBeInViewport", "toBeInViewport"),
        ("toPassAxe", "toPassAxe"),
    ] {
        assert_eq!(
            emit(kind, Some("#el"), json!({})),
            format!("await expect(page.locator('#el')).{matcher}();")
        );
    }
}

#[test]
fn assertion_css_and_id() {
    assert_eq!(
        emit("toHaveCSS", Some("button"), json!({ "name": "color", "value": "rgb(0, 0, 0)" })),
        "await expect(page.locator('button')).toHaveCSS('color', 'rgb(0, 0, 0)');"
    );
    assert_eq!(
        emit("toHaveId", Some("form"), json!({ "id": "signup" })),
        "await expect(page.locator('form')).toHaveId('signup');"
    );
}

#[test]
fn assertion_accessibility() {
    assert_eq!(
        emit("toHaveRole", Some("getByText('Save')"), json!({ "role": "button" })),
        "await expect(page.getByText('Save')).toHaveRole('button');"
    );
    assert_eq!(
        emit("toHaveAccessibleName", Some("#close"), json!({ "name": "Close dialog" })),
        "await expect(page.locator('#close')).toHaveAccessibleName('Close dialog');"
    );
}

#[test]
fn assertion_url_regex_soft() {
    assert_eq!(
        emit("toHaveURL", None, json!({ "url": "/\\/done$/", "soft": "true" })),
        "await expect.soft(page).toHaveURL(/\\/done$/);"
    );
}

#[test]
fn assertion_count_from_string() {
    assert_eq!(
        emit("toHaveCount", Some("li.item"), json!({ "count": "4" })),
        "await expect(page.locator('li.item')).toHaveCount(4);"
    );
}

#[test]
fn assertion_values_array() {
    assert_eq!(
        emit("toHaveValues", Some("#colors"), json!({ "values": ["red", "green"] })),
        "await expect(page.locator('#colors')).toHaveValues(['red', 'green']);"
    );
}

#[test]
fn assertion_screenshot() {
    assert_eq!(
        emit("toHaveScreenshot", Some("#chart"), json!({ "name": "chart.png" })),
        "await expect(page.locator('#chart')).toHaveScreenshot('chart.png');"
    );
}

#[test]
fn assertion_text_with_injection_attempt() {
    assert_eq!(
        emit("toHaveText", Some("h1"), json!({ "text": "'); process.exit(1); ('" })),
        r"await expect(page.locator('h1')).toHaveText('\'); process.exit(1); (\'');"
    );
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn catalog_covers_every_category_with_entries() {
    for category in Category::ALL {
        assert!(
            by_category(category).next().is_some(),
            "category {category} has no entries"
        );
    }
}

#[test]
fn catalog_entry_required_params_enforced() {
    for entry in catalog() {
        for param in entry.params.iter().filter(|p| p.required && p.default.is_none()) {
            let mut params = BTreeMap::new();
            for other in entry.params.iter().filter(|p| p.name != param.name) {
                let value = match other.kind {
                    grabar_codegen::ParamType::Number => json!(1),
                    grabar_codegen::ParamType::Array => json!(["a"]),
                    grabar_codegen::ParamType::String => json!("x"),
                };
                params.insert(other.name.to_string(), value);
            }
            let result = StepBuilder::from_payload(entry.id, Some("#el"), &params);
            assert!(
                matches!(result, Err(CodegenError::MissingParam { .. })),
                "{} accepted payload without {}",
                entry.id,
                param.name
            );
        }
    }
}

#[test]
fn catalog_find_and_family() {
    assert_eq!(find("waitForLoadState").unwrap().family, Family::Wait);
    assert_eq!(find("toHaveRole").unwrap().family, Family::Assert);
}

#[test]
fn step_json_round_trip() {
    let step = StepBuilder::new("toHaveAttribute")
        .selector("a.home")
        .param("name", "href")
        .param("value", "/")
        .soft(true)
        .build()
        .unwrap();
    let json = serde_json::to_string(&step).unwrap();
    let back: Step = serde_json::from_str(&json).unwrap();
    assert_eq!(back, step);
    assert_eq!(render(&back), render(&step));
}
