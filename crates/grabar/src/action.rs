//! Recorded actions and the metadata derived from their statement text.
//!
//! An [`Action`] is one generated automation statement, e.g.
//! `await page.getByLabel('Email').fill('a@b.c');`. Its kind and target key
//! are derived once, from the last top-level call of the statement, and the
//! value is never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::config::RecorderConfig;

/// What an action does, as far as coalescing is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// `locator.fill(value)`
    Fill,
    /// `page.waitFor*(...)` / `locator.waitFor(...)`
    Wait,
    /// `expect(...).to*(...)`
    Assert,
    /// Anything else (click, goto, press, ...)
    #[default]
    Other,
}

/// One recorded automation step
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    text: String,
    kind: ActionKind,
    target: Option<String>,
}

impl Action {
    /// Parse a statement. Blank input is "no action" and yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let expr = expression_of(text);
        let (kind, target) = match last_top_level_call(expr) {
            Ok(Some(call)) => (call.kind(), call.target_key()),
            Ok(None) => (ActionKind::Other, None),
            // Unbalanced text still gets a kind so a malformed fill is
            // recognized, but never a target.
            Err(Unbalanced) => (fallback_kind(expr), None),
        };
        Some(Self {
            text: text.to_string(),
            kind,
            target,
        })
    }

    /// The trimmed statement text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Derived kind
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Derived target key, if the statement could be scanned
    #[must_use]
    pub fn target_key(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Whether this is a fill
    #[must_use]
    pub fn is_fill(&self) -> bool {
        self.kind == ActionKind::Fill
    }

    /// The body line this action renders to
    #[must_use]
    pub fn statement(&self, config: &RecorderConfig) -> String {
        format_statement(&self.text, config)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Format a statement as a body line: indentation, then `await` when the
/// configuration asks for it and the statement lacks it.
///
/// Comments, declarations and lines already awaiting are left as they are.
/// Every line of a multi-line statement is indented.
#[must_use]
pub fn format_statement(text: &str, config: &RecorderConfig) -> String {
    let trimmed = text.trim();
    let needs_await = config.await_prefix
        && !trimmed.is_empty()
        && !starts_with_keyword(trimmed, "await")
        && !DECLARATION_KEYWORDS.iter().any(|k| starts_with_keyword(trimmed, k))
        && !trimmed.starts_with("//")
        && !trimmed.starts_with("/*");
    let mut lines = trimmed.lines();
    let first = lines.next().unwrap_or_default();
    let mut out = if needs_await {
        format!("{}await {first}", config.indent)
    } else {
        format!("{}{first}", config.indent)
    };
    for line in lines {
        out.push('\n');
        if !line.trim().is_empty() {
            out.push_str(&config.indent);
            out.push_str(line.trim_end());
        }
    }
    out
}

const DECLARATION_KEYWORDS: [&str; 3] = ["const", "let", "var"];

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword)
        .is_some_and(|rest| rest.is_empty() || !is_ident_char(rest.chars().next().unwrap_or(' ')))
}

/// Strip `await` and trailing semicolons
fn expression_of(text: &str) -> &str {
    let mut expr = text.trim();
    if starts_with_keyword(expr, "await") {
        expr = expr["await".len()..].trim_start();
    }
    expr.trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn fallback_kind(expr: &str) -> ActionKind {
    if expr.contains(".fill(") {
        ActionKind::Fill
    } else if expr.starts_with("expect(") || expr.starts_with("expect.soft(") {
        ActionKind::Assert
    } else if expr.contains("waitFor") {
        ActionKind::Wait
    } else {
        ActionKind::Other
    }
}

// =============================================================================
// SCANNING
// =============================================================================

/// Marker for text with unclosed strings or unmatched brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Unbalanced;

/// A character outside string literals, with its bracket depth.
///
/// Openers carry the depth before them and closers the depth after them, so
/// a top-level `(` and its matching `)` both report depth 0.
#[derive(Debug, Clone, Copy)]
struct Structural {
    index: usize,
    ch: char,
    depth: usize,
}

fn structural_chars(text: &str) -> Result<Vec<Structural>, Unbalanced> {
    let mut out = Vec::with_capacity(text.len());
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => quote = Some(ch),
            '(' | '[' | '{' => {
                out.push(Structural { index, ch, depth });
                depth += 1;
            }
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1).ok_or(Unbalanced)?;
                out.push(Structural { index, ch, depth });
            }
            _ => out.push(Structural { index, ch, depth }),
        }
    }

    if quote.is_some() || depth != 0 {
        return Err(Unbalanced);
    }
    Ok(out)
}

/// The last call made at the top level of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallSite<'a> {
    /// Expression the method is called on (empty for a bare function call)
    pub receiver: &'a str,
    /// Method or function name
    pub name: &'a str,
    /// Raw argument text between the parentheses
    pub args: &'a str,
}

impl CallSite<'_> {
    fn kind(&self) -> ActionKind {
        if self.name == "fill" {
            ActionKind::Fill
        } else if self.name.starts_with("waitFor") {
            ActionKind::Wait
        } else if self.receiver.starts_with("expect(") || self.receiver.starts_with("expect.soft(")
        {
            ActionKind::Assert
        } else {
            ActionKind::Other
        }
    }

    fn target_key(&self) -> Option<String> {
        if self.receiver.starts_with("expect") {
            return expect_subject(self.receiver).map(str::to_string);
        }
        if self.receiver.is_empty() {
            return None;
        }
        // `page.fill('#a', 'x')`: the selector argument identifies the target.
        if self.receiver.chars().all(|c| is_ident_char(c) || c == '.') {
            let first = first_argument(self.args)?;
            return Some(format!("{}[{}]", self.receiver, first));
        }
        Some(self.receiver.to_string())
    }
}

pub(crate) fn last_top_level_call(expr: &str) -> Result<Option<CallSite<'_>>, Unbalanced> {
    let chars = structural_chars(expr)?;
    let mut open: Option<usize> = None;
    let mut last: Option<(usize, usize)> = None;
    for s in &chars {
        if s.depth != 0 {
            continue;
        }
        match s.ch {
            '(' => open = Some(s.index),
            ')' => {
                if let Some(o) = open.take() {
                    last = Some((o, s.index));
                }
            }
            _ => {}
        }
    }

    let Some((open, close)) = last else {
        return Ok(None);
    };
    let before = &expr[..open];
    let name_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_ident_char(*c))
        .last()
        .map_or(open, |(i, _)| i);
    let name = &expr[name_start..open];
    if name.is_empty() {
        return Ok(None);
    }
    let receiver = expr[..name_start].trim_end();
    let receiver = receiver.strip_suffix('.').unwrap_or(receiver).trim_end();
    Ok(Some(CallSite {
        receiver,
        name,
        args: &expr[open + 1..close],
    }))
}

/// `expect(subject)` / `expect.soft(subject).not` -> `subject`
fn expect_subject(receiver: &str) -> Option<&str> {
    let open = receiver.find('(')?;
    let chars = structural_chars(&receiver[open..]).ok()?;
    let close = chars
        .iter()
        .find(|s| s.depth == 0 && s.ch == ')')
        .map(|s| open + s.index)?;
    let subject = receiver[open + 1..close].trim();
    (!subject.is_empty()).then_some(subject)
}

/// First comma-separated argument at the top level
fn first_argument(args: &str) -> Option<&str> {
    let chars = structural_chars(args).ok()?;
    let end = chars
        .iter()
        .find(|s| s.depth == 0 && s.ch == ',')
        .map_or(args.len(), |s| s.index);
    let first = args[..end].trim();
    (!first.is_empty()).then_some(first)
}
