//! Property-based tests for grabar.
//!
//! Uses proptest to check the coalescing, merge and reveal invariants over
//! generated action streams and document bodies.

#![allow(clippy::unwrap_used)]

use grabar::prelude::*;
use proptest::prelude::*;

fn fill(target: &str, value: &str) -> Action {
    Action::parse(&format!("await page.locator('{target}').fill('{value}');")).unwrap()
}

fn line_strategy() -> impl Strategy<Value = StatementLine> {
    (any::<bool>(), "[a-z#().']{1,16}").prop_map(|(manual, text)| {
        if manual {
            StatementLine::manual(text, 0)
        } else {
            StatementLine::mechanical(text, 0)
        }
    })
}

fn model(body: Vec<StatementLine>) -> SourceDocumentModel {
    SourceDocumentModel::from_parts(
        "main",
        vec!["test('t', async ({ page }) => {".to_string()],
        body,
        vec!["});".to_string()],
    )
}

/// Runs of keystrokes; adjacent runs never share a target.
fn runs_strategy() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec(
        (0usize..5, prop::collection::vec("[a-z0-9]{1,6}", 1..6)),
        0..12,
    )
    .prop_map(|runs| {
        let mut out: Vec<(String, Vec<String>)> = Vec::new();
        for (target, values) in runs {
            let key = format!("#field{target}");
            if out.last().is_some_and(|(last, _)| *last == key) {
                continue;
            }
            out.push((key, values));
        }
        out
    })
}

// === Coalescing Property Tests ===

proptest! {
    /// One survivor per run of same-target fills, holding the final value.
    #[test]
    fn prop_one_fill_per_run(runs in runs_strategy()) {
        let mut history = Vec::new();
        for (target, values) in &runs {
            for value in values {
                history = coalesce(&history, Some(fill(target, value)));
            }
        }
        prop_assert_eq!(history.len(), runs.len());
        for (action, (target, values)) in history.iter().zip(&runs) {
            let expected = fill(target, values.last().unwrap());
            prop_assert_eq!(action.text(), expected.text());
        }
    }

    /// An empty tick leaves the history untouched.
    #[test]
    fn prop_empty_tick_is_noop(runs in runs_strategy()) {
        let history = collapse(
            runs.iter()
                .flat_map(|(t, vs)| vs.iter().map(move |v| fill(t, v))),
        );
        prop_assert_eq!(coalesce(&history, None), history);
    }

    /// Coalescing grows the history by at most one entry.
    #[test]
    fn prop_coalesce_grows_by_at_most_one(
        runs in runs_strategy(),
        target in 0usize..5,
        value in "[a-z]{1,4}",
    ) {
        let history = collapse(
            runs.iter()
                .flat_map(|(t, vs)| vs.iter().map(move |v| fill(t, v))),
        );
        let out = coalesce(&history, Some(fill(&format!("#field{target}"), &value)));
        prop_assert!(out.len() == history.len() || out.len() == history.len() + 1);
    }
}

// === Merge Property Tests ===

proptest! {
    /// Merging a model with itself changes nothing.
    #[test]
    fn prop_merge_self_is_identity(body in prop::collection::vec(line_strategy(), 0..20)) {
        let x = model(body);
        prop_assert_eq!(merge(Some(&x), x.clone()), x);
    }

    /// Without a previous model the fresh one is returned unchanged.
    #[test]
    fn prop_merge_without_previous(body in prop::collection::vec(line_strategy(), 0..20)) {
        let x = model(body);
        prop_assert_eq!(merge(None, x.clone()), x);
    }

    /// Manual lines survive in order, fresh mechanical lines all appear in order.
    #[test]
    fn prop_merge_keeps_manual_and_fresh(
        previous in prop::collection::vec(line_strategy(), 0..20),
        extra in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let previous = model(previous);
        let mut fresh_lines: Vec<StatementLine> = previous
            .body
            .iter()
            .filter(|l| l.is_mechanical())
            .map(|l| StatementLine::mechanical(format!("{} ", l.text), 0))
            .collect();
        fresh_lines.extend(extra.iter().map(|t| StatementLine::mechanical(t.as_str(), 0)));
        let fresh = model(fresh_lines.clone());

        let merged = merge(Some(&previous), fresh);

        let manual = |m: &SourceDocumentModel| -> Vec<String> {
            m.body.iter().filter(|l| l.is_manual()).map(|l| l.text.clone()).collect()
        };
        let mechanical: Vec<String> = merged
            .body
            .iter()
            .filter(|l| l.is_mechanical())
            .map(|l| l.text.clone())
            .collect();
        prop_assert_eq!(manual(&merged), manual(&previous));
        prop_assert_eq!(
            mechanical,
            fresh_lines.into_iter().map(|l| l.text).collect::<Vec<_>>()
        );
        prop_assert_eq!(merged.body_len(), previous.body_len() + extra.len());
    }

    /// Unstructured input on both sides degrades to the fresh body.
    #[test]
    fn prop_unstructured_fallback(
        previous in prop::collection::vec("[a-z.();']{0,12}", 1..8),
        fresh in prop::collection::vec("[a-z.();']{0,12}", 1..8),
    ) {
        let previous = SourceDocumentModel::unstructured("x", &previous.join("\n"));
        let fresh = SourceDocumentModel::unstructured("x", &fresh.join("\n"));
        let outcome = merge_with_report(Some(&previous), fresh.clone());
        prop_assert_eq!(outcome.model.body_len(), fresh.body_len());
        prop_assert!(outcome.report.fallback);
    }
}

// === Reveal Property Tests ===

proptest! {
    /// The reveal line always lies inside the body.
    #[test]
    fn prop_reveal_within_body(
        body in prop::collection::vec(line_strategy(), 0..20),
        index in 0usize..40,
        manual in any::<bool>(),
    ) {
        let x = model(body);
        let change = if manual { ChangeKind::Manual { index } } else { ChangeKind::Mechanical };
        let reveal = compute_reveal(&x, change);
        if x.body_len() == 0 {
            prop_assert_eq!(reveal.line_number, 0);
        } else {
            prop_assert!(reveal.line_number < x.body_len());
        }
    }
}
