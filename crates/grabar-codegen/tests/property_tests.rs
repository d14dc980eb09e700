//! Property-based tests for grabar-codegen.
//!
//! Uses proptest to verify that rendering stays deterministic and that no
//! user-supplied value can break out of its string literal.

use grabar_codegen::prelude::*;
use proptest::prelude::*;

/// True when `inner` contains a quote or line break not preceded by an
/// escaping backslash.
fn has_unescaped_breakout(inner: &str) -> bool {
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '\'' | '\n' | '\r' => return true,
            _ => {}
        }
    }
    escaped
}

// === Quoting Property Tests ===

proptest! {
    /// Quoted literals never contain an unescaped quote or newline.
    #[test]
    fn prop_quote_never_breaks_out(s in ".*") {
        let quoted = quote(&s);
        prop_assert!(quoted.starts_with('\'') && quoted.ends_with('\''));
        let inner = &quoted[1..quoted.len() - 1];
        prop_assert!(!has_unescaped_breakout(inner), "breakout in {}", quoted);
    }

    /// Plain alphanumeric text is quoted verbatim.
    #[test]
    fn prop_quote_plain_verbatim(s in "[a-zA-Z0-9 ]{0,40}") {
        prop_assert_eq!(quote(&s), format!("'{}'", s));
    }

    /// Assertion text values never escape their literal.
    #[test]
    fn prop_assertion_text_contained(text in "[^\\n]{1,40}") {
        let step = StepBuilder::new("toContainText")
            .selector("#out")
            .param("text", text.clone())
            .build()
            .unwrap();
        let js = render(&step);
        prop_assert!(js.starts_with("await expect(page.locator('#out')).toContainText('"));
        prop_assert!(js.ends_with("');"));
        let inner = &js["await expect(page.locator('#out')).toContainText('".len()..js.len() - 3];
        prop_assert!(!has_unescaped_breakout(inner), "breakout in {}", js);
    }
}

// === Determinism Property Tests ===

proptest! {
    /// Rendering the same payload twice yields the same statement.
    #[test]
    fn prop_render_deterministic(
        idx in 0..catalog().len(),
        selector in "[#.a-z][a-z0-9-]{0,12}",
        timeout in 0u64..100_000,
    ) {
        let entry = &catalog()[idx];
        let build = || {
            StepBuilder::new(entry.id)
                .selector(selector.clone())
                .param("timeout", timeout)
                .param("url", "https://example.test/")
                .param("condition", "window.ok")
                .param("count", 1)
                .param("text", "hello")
                .param("value", "v")
                .param("name", "n")
                .param("className", "c")
                .param("id", "i")
                .param("title", "t")
                .param("description", "d")
                .param("role", "link")
                .param("values", vec!["x", "y"])
                .build()
                .unwrap()
        };
        prop_assert_eq!(render(&build()), render(&build()));
    }

    /// Every rendered statement is a single awaited line.
    #[test]
    fn prop_single_awaited_statement(
        idx in 0..catalog().len(),
        text in "[a-zA-Z0-9 '\"\\\\/]{1,20}",
    ) {
        let entry = &catalog()[idx];
        let step = StepBuilder::new(entry.id)
            .selector("#el")
            .param("url", text.clone())
            .param("condition", "true")
            .param("count", 3)
            .param("text", text.clone())
            .param("value", text.clone())
            .param("name", text.clone())
            .param("className", text.clone())
            .param("id", text.clone())
            .param("title", text.clone())
            .param("description", text.clone())
            .param("role", text.clone())
            .param("values", vec![text.clone()])
            .build()
            .unwrap();
        let js = render(&step);
        prop_assert!(js.starts_with("await "));
        prop_assert!(js.ends_with(");"));
        prop_assert!(!js.contains('\n'));
    }

    /// Timeouts survive rendering unchanged.
    #[test]
    fn prop_timeout_rendered(ms in 0u64..10_000_000) {
        let step = StepBuilder::new("waitForTimeout").param("timeout", ms).build().unwrap();
        prop_assert_eq!(render(&step), format!("await page.waitForTimeout({});", ms));
    }
}
