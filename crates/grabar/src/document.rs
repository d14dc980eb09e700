//! Structured view of one generated test file.
//!
//! ```text
//! import { test, expect } from '@playwright/test';     ┐ header
//! test('test', async ({ page }) => {                   ┘ (through the block start)
//!   await page.goto('https://example.com/');          ┐
//!   await expect(page.locator('h1')).toBeVisible();    │ body (mechanical / manual)
//!   await page.getByRole('link').click();             ┘
//! });                                                  ─ footer
//! ```

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::config::RecorderConfig;

/// Where a body line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineOrigin {
    /// Regenerated from the action stream every cycle
    Mechanical,
    /// Inserted by the user; survives regeneration
    Manual,
}

/// One line of the body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatementLine {
    /// Mechanical or manual
    pub origin: LineOrigin,
    /// Literal source text, indentation included
    pub text: String,
    /// Index within the body
    pub position: usize,
}

impl StatementLine {
    /// Create a mechanical line
    #[must_use]
    pub fn mechanical(text: impl Into<String>, position: usize) -> Self {
        Self {
            origin: LineOrigin::Mechanical,
            text: text.into(),
            position,
        }
    }

    /// Create a manual line
    #[must_use]
    pub fn manual(text: impl Into<String>, position: usize) -> Self {
        Self {
            origin: LineOrigin::Manual,
            text: text.into(),
            position,
        }
    }

    /// Whether the line is mechanical
    #[must_use]
    pub fn is_mechanical(&self) -> bool {
        self.origin == LineOrigin::Mechanical
    }

    /// Whether the line is manual
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.origin == LineOrigin::Manual
    }
}

/// Where the header and footer of a text were found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    /// Index of the block start line (last header line)
    pub block_start: usize,
    /// Index of the footer line
    pub footer_start: usize,
}

/// Locate the block start and footer of generated text.
///
/// The header runs through the first line containing the block start
/// marker; the footer starts at the last non-blank line when it closes the
/// block. Returns `None` when either is missing.
#[must_use]
pub fn find_markers(lines: &[&str], config: &RecorderConfig) -> Option<Markers> {
    let block_start = lines
        .iter()
        .position(|line| line.contains(config.block_start_marker.as_str()))?;
    let footer_start = lines.iter().rposition(|line| !line.trim().is_empty())?;
    if footer_start <= block_start || !config.is_footer_line(lines[footer_start]) {
        return None;
    }
    Some(Markers {
        block_start,
        footer_start,
    })
}

/// One logical test file split into header, body and footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocumentModel {
    /// File id
    pub id: String,
    /// Boilerplate before the body
    pub header: Vec<String>,
    /// Statements
    pub body: Vec<StatementLine>,
    /// Boilerplate after the body
    pub footer: Vec<String>,
    structured: bool,
}

impl SourceDocumentModel {
    /// Assemble a structured model from parts; positions are renumbered.
    #[must_use]
    pub fn from_parts(
        id: impl Into<String>,
        header: Vec<String>,
        body: Vec<StatementLine>,
        footer: Vec<String>,
    ) -> Self {
        let mut model = Self {
            id: id.into(),
            header,
            body,
            footer,
            structured: true,
        };
        model.renumber();
        model
    }

    /// A model with no recognizable structure: every line is body.
    #[must_use]
    pub fn unstructured(id: impl Into<String>, text: &str) -> Self {
        let body = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| StatementLine::mechanical(line, i))
            .collect();
        Self {
            id: id.into(),
            header: Vec::new(),
            body,
            footer: Vec::new(),
            structured: false,
        }
    }

    /// Build the freshly generated model for a tick: header and footer from
    /// the driver's text, body from the coalesced action list.
    ///
    /// Text without markers yields an [`unstructured`](Self::unstructured)
    /// model holding the text verbatim.
    #[must_use]
    pub fn generate(
        id: impl Into<String>,
        fresh_text: &str,
        actions: &[Action],
        config: &RecorderConfig,
    ) -> Self {
        let lines: Vec<&str> = fresh_text.split('\n').collect();
        let Some(markers) = find_markers(&lines, config) else {
            return Self::unstructured(id, fresh_text);
        };
        let header = lines[..=markers.block_start]
            .iter()
            .map(|l| (*l).to_string())
            .collect();
        let footer = lines[markers.footer_start..]
            .iter()
            .map(|l| (*l).to_string())
            .collect();
        let body = actions
            .iter()
            .enumerate()
            .map(|(i, action)| StatementLine::mechanical(action.statement(config), i))
            .collect();
        Self {
            id: id.into(),
            header,
            body,
            footer,
            structured: true,
        }
    }

    /// Split already rendered text, taking every body line as mechanical.
    #[must_use]
    pub fn parse(id: impl Into<String>, text: &str, config: &RecorderConfig) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let Some(markers) = find_markers(&lines, config) else {
            return Self::unstructured(id, text);
        };
        Self::from_parts(
            id,
            lines[..=markers.block_start]
                .iter()
                .map(|l| (*l).to_string())
                .collect(),
            lines[markers.block_start + 1..markers.footer_start]
                .iter()
                .filter(|l| !l.trim().is_empty())
                .enumerate()
                .map(|(i, l)| StatementLine::mechanical(*l, i))
                .collect(),
            lines[markers.footer_start..]
                .iter()
                .map(|l| (*l).to_string())
                .collect(),
        )
    }

    /// Whether header and footer were recognized
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        self.structured
    }

    /// Number of body lines
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Number of mechanical body lines
    #[must_use]
    pub fn mechanical_count(&self) -> usize {
        self.body.iter().filter(|l| l.is_mechanical()).count()
    }

    /// Number of manual body lines
    #[must_use]
    pub fn manual_count(&self) -> usize {
        self.body.iter().filter(|l| l.is_manual()).count()
    }

    /// Index of the last mechanical body line
    #[must_use]
    pub fn last_mechanical_index(&self) -> Option<usize> {
        self.body.iter().rposition(StatementLine::is_mechanical)
    }

    /// Insert a manual line at `index` (clamped to the body length) and
    /// return where it landed.
    pub fn insert_manual(&mut self, index: usize, text: impl Into<String>) -> usize {
        let index = index.min(self.body.len());
        self.body.insert(index, StatementLine::manual(text, index));
        self.renumber();
        index
    }

    /// Reset every `position` to its body index
    pub fn renumber(&mut self) {
        for (i, line) in self.body.iter_mut().enumerate() {
            line.position = i;
        }
    }

    /// Every line of the document, in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .map(String::as_str)
            .chain(self.body.iter().map(|l| l.text.as_str()))
            .chain(self.footer.iter().map(String::as_str))
    }

    /// The document as one newline-joined blob
    #[must_use]
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TEXT: &str = "import { test, expect } from '@playwright/test';\n\
                        \n\
                        test('test', async ({ page }) => {\n\
                        \x20 await page.goto('https://example.com/');\n\
                        });";

    fn actions(texts: &[&str]) -> Vec<Action> {
        texts.iter().filter_map(|t| Action::parse(t)).collect()
    }

    mod marker_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_markers_found() {
            let lines: Vec<&str> = TEXT.split('\n').collect();
            let markers = find_markers(&lines, &RecorderConfig::default()).unwrap();
            assert_eq!(markers.block_start, 2);
            assert_eq!(markers.footer_start, 4);
        }

        #[test]
        fn test_trailing_newline_kept_in_footer() {
            let text = format!("{TEXT}\n");
            let lines: Vec<&str> = text.split('\n').collect();
            let markers = find_markers(&lines, &RecorderConfig::default()).unwrap();
            assert_eq!(markers.footer_start, 4);
        }

        #[test]
        fn test_missing_block_start() {
            let lines = vec!["page.click('#a');", "});"];
            assert!(find_markers(&lines, &RecorderConfig::default()).is_none());
        }

        #[test]
        fn test_missing_footer() {
            let lines = vec!["test('t', async ({ page }) => {", "  await page.click('#a');"];
            assert!(find_markers(&lines, &RecorderConfig::default()).is_none());
        }

        #[test]
        fn test_footer_must_follow_block_start() {
            let lines = vec!["}", "const f = async () => 1;"];
            assert!(find_markers(&lines, &RecorderConfig::default()).is_none());
        }
    }

    mod generate_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_generate_uses_actions_for_body() {
            let config = RecorderConfig::default();
            let model = SourceDocumentModel::generate(
                "main",
                TEXT,
                &actions(&["page.goto('https://example.com/');", "await page.click('#go');"]),
                &config,
            );
            assert!(model.is_structured());
            assert_eq!(model.header.len(), 3);
            assert_eq!(model.footer, vec!["});".to_string()]);
            assert_eq!(
                model.text(),
                "import { test, expect } from '@playwright/test';\n\
                 \n\
                 test('test', async ({ page }) => {\n\
                 \x20 await page.goto('https://example.com/');\n\
                 \x20 await page.click('#go');\n\
                 });"
            );
        }

        #[test]
        fn test_generate_unstructured_keeps_text() {
            let config = RecorderConfig::default();
            let text = "page.click('#a');\npage.click('#b');";
            let model = SourceDocumentModel::generate("x", text, &[], &config);
            assert!(!model.is_structured());
            assert_eq!(model.text(), text);
            assert_eq!(model.body_len(), 2);
        }
    }

    mod parse_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parse_round_trips_text() {
            let model = SourceDocumentModel::parse("main", TEXT, &RecorderConfig::default());
            assert!(model.is_structured());
            assert_eq!(model.body_len(), 1);
            assert_eq!(model.text(), TEXT);
        }
    }

    mod edit_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_insert_manual_renumbers() {
            let config = RecorderConfig::default();
            let mut model = SourceDocumentModel::generate(
                "main",
                TEXT,
                &actions(&["page.click('#a');", "page.click('#b');"]),
                &config,
            );
            let at = model.insert_manual(1, "  await expect(page.locator('#a')).toBeVisible();");
            assert_eq!(at, 1);
            assert_eq!(model.manual_count(), 1);
            assert_eq!(model.mechanical_count(), 2);
            let positions: Vec<_> = model.body.iter().map(|l| l.position).collect();
            assert_eq!(positions, vec![0, 1, 2]);
            assert!(model.body[1].is_manual());
        }

        #[test]
        fn test_insert_manual_clamps_index() {
            let mut model = SourceDocumentModel::from_parts("m", vec![], vec![], vec![]);
            assert_eq!(model.insert_manual(10, "x"), 0);
        }

        #[test]
        fn test_last_mechanical_index() {
            let model = SourceDocumentModel::from_parts(
                "m",
                vec![],
                vec![
                    StatementLine::mechanical("a", 0),
                    StatementLine::mechanical("b", 1),
                    StatementLine::manual("c", 2),
                ],
                vec![],
            );
            assert_eq!(model.last_mechanical_index(), Some(1));
        }
    }
}
