//! Reconcile a freshly generated document with the previously displayed one.
//!
//! Manual lines are sticky anchors. Walking the previous body in order, a
//! manual line is copied forward and a mechanical slot takes the next fresh
//! mechanical line. Fresh lines left over are newly recorded actions and go
//! to the end of the body.
//!
//! ```text
//! previous: [M click(#x)] [U expect(#x)] [M click(#y)]
//! fresh:    [M click(#x)] [M click(#y)]  [M click(#z)]
//! merged:   [M click(#x)] [U expect(#x)] [M click(#y)] [M click(#z)]
//! ```

use serde::Serialize;

use crate::document::{LineOrigin, SourceDocumentModel, StatementLine};
use crate::result::Degradation;

/// Bookkeeping from one merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Manual lines carried forward
    pub kept: usize,
    /// Mechanical slots filled from the fresh body
    pub consumed: usize,
    /// Fresh mechanical lines appended after the walk
    pub appended: usize,
    /// Previous mechanical slots with no fresh line to fill them
    pub truncated: usize,
    /// Whether the merge fell back to wholesale replacement
    pub fallback: bool,
    /// Problems met along the way
    pub degradations: Vec<Degradation>,
}

impl MergeReport {
    /// Whether anything degraded
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// A merged document and how it was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The reconciled document
    pub model: SourceDocumentModel,
    /// What the merge did
    pub report: MergeReport,
}

/// Merge `fresh` against `previous`, discarding the report.
#[must_use]
pub fn merge(
    previous: Option<&SourceDocumentModel>,
    fresh: SourceDocumentModel,
) -> SourceDocumentModel {
    merge_with_report(previous, fresh).model
}

/// Merge `fresh` against `previous`.
///
/// - No previous model: `fresh` is returned as is.
/// - Either side unstructured: `fresh` replaces the document wholesale and
///   the report carries [`Degradation::StructuralParseFailure`].
/// - Otherwise manual lines of `previous` keep their place among the
///   mechanical lines of `fresh`; header and footer come from `fresh`.
#[must_use]
pub fn merge_with_report(
    previous: Option<&SourceDocumentModel>,
    fresh: SourceDocumentModel,
) -> MergeOutcome {
    let Some(previous) = previous else {
        return MergeOutcome {
            model: fresh,
            report: MergeReport::default(),
        };
    };

    if !previous.is_structured() || !fresh.is_structured() {
        tracing::warn!(
            file_id = %fresh.id,
            reason = Degradation::StructuralParseFailure.as_str(),
            previous_structured = previous.is_structured(),
            fresh_structured = fresh.is_structured(),
            "merge fell back to wholesale replacement"
        );
        return MergeOutcome {
            model: fresh,
            report: MergeReport {
                fallback: true,
                degradations: vec![Degradation::StructuralParseFailure],
                ..MergeReport::default()
            },
        };
    }

    let SourceDocumentModel {
        id,
        header,
        body: fresh_body,
        footer,
        ..
    } = fresh;

    let mut fresh_lines = fresh_body
        .into_iter()
        .filter(|line| line.origin == LineOrigin::Mechanical);
    let mut report = MergeReport::default();
    let mut body: Vec<StatementLine> = Vec::with_capacity(previous.body.len() + 1);

    for line in &previous.body {
        match line.origin {
            LineOrigin::Manual => {
                body.push(line.clone());
                report.kept += 1;
            }
            LineOrigin::Mechanical => match fresh_lines.next() {
                Some(next) => {
                    body.push(next);
                    report.consumed += 1;
                }
                None => report.truncated += 1,
            },
        }
    }
    for line in fresh_lines {
        body.push(line);
        report.appended += 1;
    }

    if report.truncated > 0 {
        tracing::warn!(
            file_id = %id,
            reason = Degradation::MergeInvariantViolation.as_str(),
            truncated = report.truncated,
            "previous body had more mechanical slots than fresh statements"
        );
        report.degradations.push(Degradation::MergeInvariantViolation);
    }

    tracing::debug!(
        file_id = %id,
        kept = report.kept,
        consumed = report.consumed,
        appended = report.appended,
        truncated = report.truncated,
        "merged source"
    );

    MergeOutcome {
        model: SourceDocumentModel::from_parts(id, header, body, footer),
        report,
    }
}
