//! Heading detection from plain page text.
//!
//! Each non-blank line is tested against [`HEADING_RULES`] in order and the
//! first rule that matches decides its [`HeadingKind`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::MAX_HEADINGS_PER_PAGE;
use crate::model::{Heading, HeadingKind};

static NUMBERED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.?\s+[A-Z]").expect("numbered heading pattern is valid"));

/// A trimmed line together with the line that follows it in the page.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// The trimmed line under test
    pub line: &'a str,
    /// The untrimmed next line, `None` for the last line of the page
    pub next: Option<&'a str>,
}

/// A heading rule: the kind it assigns and the predicate that decides it.
pub type HeadingRule = (HeadingKind, fn(&LineContext<'_>) -> bool);

/// Heading rules in priority order.
pub const HEADING_RULES: [HeadingRule; 3] = [
    (HeadingKind::Uppercase, is_uppercase_heading),
    (HeadingKind::Numbered, is_numbered_heading),
    (HeadingKind::Title, is_title_heading),
];

/// At least one upper-case letter, no lower-case letters, 4 to 99 chars.
fn is_uppercase_heading(ctx: &LineContext<'_>) -> bool {
    let len = ctx.line.chars().count();
    len > 3
        && len < 100
        && ctx.line.chars().any(char::is_uppercase)
        && !ctx.line.chars().any(char::is_lowercase)
}

fn is_numbered_heading(ctx: &LineContext<'_>) -> bool {
    NUMBERED_HEADING.is_match(ctx.line)
}

/// A short capitalized line followed by a line of real content.
fn is_title_heading(ctx: &LineContext<'_>) -> bool {
    let Some(next) = ctx.next else {
        return false;
    };
    ctx.line.chars().count() < 50
        && next.trim().chars().count() > 20
        && ctx.line.chars().next().is_some_and(char::is_uppercase)
}

/// Classify one line, returning the kind assigned by the first matching rule.
pub fn classify_line(ctx: &LineContext<'_>) -> Option<HeadingKind> {
    HEADING_RULES
        .iter()
        .find(|(_, matches)| matches(ctx))
        .map(|(kind, _)| *kind)
}

/// Find heading candidates in page text, in line order.
///
/// Line numbers are 1-indexed positions in the `\n`-split text, blank lines
/// included. At most [`MAX_HEADINGS_PER_PAGE`] candidates are returned.
pub fn detect_headings(text: &str) -> Vec<Heading> {
    let lines: Vec<&str> = text.split('\n').collect();

    lines
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.trim();
            if line.is_empty() {
                return None;
            }
            let ctx = LineContext {
                line,
                next: lines.get(i + 1).copied(),
            };
            classify_line(&ctx).map(|kind| Heading::new(line, kind, i + 1))
        })
        .take(MAX_HEADINGS_PER_PAGE)
        .collect()
}
