//! Path column syntax: `/literal/{name}/{<regex>name}/{opt}?/*rest`.

use std::collections::HashSet;

use regex::Regex;

use super::types::{ParamSpec, PathPattern, PathSegment, SegmentPart};
use crate::error::ParseErrorKind;

impl PathPattern {
    /// Parse a path pattern.
    ///
    /// `defaults` are the action's argument bindings; a parameter whose name
    /// appears there gets that value as its default.
    pub fn parse(raw: &str, defaults: &[(String, String)]) -> Result<Self, ParseErrorKind> {
        let Some(body) = raw.strip_prefix('/') else {
            return Err(ParseErrorKind::RelativePath(raw.to_string()));
        };

        let mut pieces = split_segments(body)?;
        // "/users/" is written the same as "/users"; the trailing slash is optional anyway
        if pieces.last().is_some_and(|s| s.is_empty()) {
            pieces.pop();
        }

        let mut segments = Vec::with_capacity(pieces.len());
        let mut seen = HashSet::new();
        let last = pieces.len().saturating_sub(1);

        for (position, piece) in pieces.into_iter().enumerate() {
            let segment = parse_segment(piece, position == last)?;
            for param in segment.params() {
                if !seen.insert(param.name.clone()) {
                    return Err(ParseErrorKind::DuplicateParam(param.name.clone()));
                }
            }
            segments.push(segment);
        }

        let mut pattern = PathPattern {
            raw: raw.to_string(),
            segments,
        };
        for segment in &mut pattern.segments {
            for part in &mut segment.parts {
                if let SegmentPart::Param(param) = part {
                    param.default = defaults
                        .iter()
                        .find(|(name, _)| *name == param.name)
                        .map(|(_, value)| value.clone());
                }
            }
        }
        Ok(pattern)
    }
}

/// Nesting state of `{...}` groups in a path pattern.
///
/// Inside a group, escaped characters and characters within a regex class
/// (`[^}]`) never open or close anything.
#[derive(Debug, Default)]
pub(crate) struct BraceTracker {
    depth: usize,
    class: usize,
    escaped: bool,
}

impl BraceTracker {
    /// `true` when the next character is outside every `{...}` group
    pub(crate) fn is_outside(&self) -> bool {
        self.depth == 0
    }

    /// Account for `c`; returns `true` when it closed the outermost group.
    pub(crate) fn step(&mut self, c: char) -> bool {
        if self.depth == 0 {
            if c == '{' {
                self.depth = 1;
            }
            return false;
        }
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match c {
            '\\' => self.escaped = true,
            '[' => self.class += 1,
            ']' if self.class > 0 => self.class -= 1,
            _ if self.class > 0 => {}
            '{' => self.depth += 1,
            '}' => {
                self.depth -= 1;
                return self.depth == 0;
            }
            _ => {}
        }
        false
    }
}

/// Split on `/` outside of `{...}` so custom regexes may contain slashes.
fn split_segments(body: &str) -> Result<Vec<&str>, ParseErrorKind> {
    let mut segments = Vec::new();
    let mut braces = BraceTracker::default();
    let mut start = 0;
    for (i, c) in body.char_indices() {
        if c == '/' && braces.is_outside() {
            segments.push(&body[start..i]);
            start = i + 1;
        }
        braces.step(c);
    }
    if !braces.is_outside() {
        return Err(ParseErrorKind::Unterminated { open: '{' });
    }
    segments.push(&body[start..]);
    Ok(segments)
}

fn parse_segment(piece: &str, is_last: bool) -> Result<PathSegment, ParseErrorKind> {
    if let Some(name) = piece.strip_prefix('*') {
        if !is_identifier(name) {
            return Err(ParseErrorKind::InvalidParamName(name.to_string()));
        }
        if !is_last {
            return Err(ParseErrorKind::MisplacedWildcard(name.to_string()));
        }
        return Ok(PathSegment {
            parts: vec![SegmentPart::Param(ParamSpec {
                name: name.to_string(),
                regex: None,
                default: None,
                wildcard: true,
            })],
            optional: false,
        });
    }

    let (body, optional) = match piece.strip_suffix('?') {
        Some(body) => (body, true),
        None => (piece, false),
    };

    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = body;
    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let close = matching_brace(&rest[open..])
            .ok_or(ParseErrorKind::Unterminated { open: '{' })?;
        if !literal.is_empty() {
            parts.push(SegmentPart::Literal(std::mem::take(&mut literal)));
        }
        parts.push(SegmentPart::Param(parse_param(&rest[open + 1..open + close])?));
        rest = &rest[open + close + 1..];
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(SegmentPart::Literal(literal));
    }

    Ok(PathSegment { parts, optional })
}

/// Offset of the `}` closing the `{` at the start of `s`.
fn matching_brace(s: &str) -> Option<usize> {
    let mut braces = BraceTracker::default();
    s.char_indices().find(|&(_, c)| braces.step(c)).map(|(i, _)| i)
}

/// `name` or `<regex>name`
fn parse_param(inner: &str) -> Result<ParamSpec, ParseErrorKind> {
    let (regex, name) = match inner.strip_prefix('<') {
        Some(typed) => {
            let gt = typed
                .rfind('>')
                .ok_or_else(|| ParseErrorKind::InvalidParamName(inner.to_string()))?;
            (Some(&typed[..gt]), &typed[gt + 1..])
        }
        None => (None, inner),
    };

    if !is_identifier(name) {
        return Err(ParseErrorKind::InvalidParamName(name.to_string()));
    }

    if let Some(re) = regex {
        if re.is_empty() {
            return Err(ParseErrorKind::InvalidRegex {
                name: name.to_string(),
                message: "empty pattern".to_string(),
            });
        }
        Regex::new(&format!("^(?:{re})$")).map_err(|e| ParseErrorKind::InvalidRegex {
            name: name.to_string(),
            message: e.to_string(),
        })?;
    }

    Ok(ParamSpec {
        name: name.to_string(),
        regex: regex.map(str::to_string),
        default: None,
        wildcard: false,
    })
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
