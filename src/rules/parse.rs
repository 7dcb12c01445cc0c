//! Line-by-line reader for the routes DSL.
//!
//! ```text
//! METHOD [host:HOST] PATH [[constraints]] ACTION[(name:'literal', ...)] [[constraints]]
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use super::types::{HostPattern, RouteMethod, RouteOrigin, RouteRule, RouteSource};
use crate::error::{LoadError, ParseError, ParseErrorKind};
use crate::pattern::{is_identifier, BraceTracker, PathPattern};
use crate::query::{decode_component, QueryConstraint};

const HOST_PREFIX: &str = "host:";

/// Parse every source in order into one rule list.
///
/// Definition indices run across sources, so the first rule of the second
/// source comes right after the last rule of the first. All bad lines are
/// collected; if there is at least one, nothing is returned.
pub fn parse_sources(sources: &[RouteSource]) -> Result<Vec<RouteRule>, LoadError> {
    let mut rules = Vec::new();
    let mut errors = Vec::new();

    for source in sources {
        let source_name: Arc<str> = Arc::from(source.name.as_str());
        for (offset, line) in source.text.lines().enumerate() {
            let line_no = offset + 1;
            match parse_line(line) {
                Ok(None) => {}
                Ok(Some(parsed)) => {
                    let origin = RouteOrigin {
                        source: Arc::clone(&source_name),
                        line: line_no,
                    };
                    rules.push(parsed.into_rule(rules.len(), origin));
                }
                Err(kind) => {
                    debug!(source = %source.name, line = line_no, error = %kind, "Rejected route line");
                    errors.push(ParseError {
                        source_name: source.name.clone(),
                        line: line_no,
                        kind,
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(rules)
    } else {
        warn!(
            error_count = errors.len(),
            sources = sources.len(),
            "Route definitions rejected"
        );
        Err(LoadError::Aborted(errors))
    }
}

/// Parse a single named source.
pub fn parse_routes(name: &str, text: &str) -> Result<Vec<RouteRule>, LoadError> {
    parse_sources(&[RouteSource::new(name, text)])
}

/// A rule before it has a position in the table
#[derive(Debug)]
pub(crate) struct ParsedLine {
    method: RouteMethod,
    host: HostPattern,
    path: PathPattern,
    action: String,
    args: Vec<(String, String)>,
    constraints: Vec<QueryConstraint>,
}

impl ParsedLine {
    fn into_rule(self, index: usize, origin: RouteOrigin) -> RouteRule {
        RouteRule {
            method: self.method,
            host: self.host,
            path: self.path,
            action: self.action,
            args: self.args,
            constraints: self.constraints,
            index,
            origin,
        }
    }
}

/// `Ok(None)` for blank and comment lines.
pub(crate) fn parse_line(line: &str) -> Result<Option<ParsedLine>, ParseErrorKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut cursor = Cursor::new(trimmed);

    let method_token = cursor.take_token();
    let method = RouteMethod::parse(method_token)
        .ok_or_else(|| ParseErrorKind::UnknownMethod(method_token.to_string()))?;
    cursor.skip_ws();

    let mut host = HostPattern::Any;
    if cursor.rest().starts_with(HOST_PREFIX) {
        cursor.advance(HOST_PREFIX.len());
        host = HostPattern::parse(cursor.take_token());
        cursor.skip_ws();
    }

    if cursor.at_end_or_comment() {
        return Err(ParseErrorKind::MissingPath);
    }
    let raw_path = cursor.take_path()?;
    cursor.skip_ws();

    let mut constraints = None;
    if cursor.peek() == Some('[') {
        constraints = Some(parse_constraints(cursor.take_bracket()?)?);
        cursor.skip_ws();
    }

    let action = cursor.take_action()?;
    if action.is_empty() {
        return Err(ParseErrorKind::MissingAction);
    }

    let args = if cursor.peek() == Some('(') {
        parse_args(cursor.take_args()?)?
    } else {
        Vec::new()
    };
    cursor.skip_ws();

    if cursor.peek() == Some('[') {
        if constraints.is_some() {
            return Err(ParseErrorKind::DuplicateConstraintGroup);
        }
        constraints = Some(parse_constraints(cursor.take_bracket()?)?);
        cursor.skip_ws();
    }

    if !cursor.at_end_or_comment() {
        return Err(ParseErrorKind::TrailingInput(cursor.rest().to_string()));
    }

    let path = PathPattern::parse(raw_path, &args)?;

    Ok(Some(ParsedLine {
        method,
        host,
        path,
        action: action.to_string(),
        args,
        constraints: constraints.unwrap_or_default(),
    }))
}

/// Byte cursor over one trimmed line
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.pos = (self.pos + bytes).min(self.src.len());
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.advance(rest.len() - rest.trim_start().len());
    }

    /// `#` only starts a comment at the start of the line or after whitespace
    fn at_end_or_comment(&self) -> bool {
        match self.peek() {
            None => true,
            Some('#') => self.src[..self.pos]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace),
            Some(_) => false,
        }
    }

    /// Everything up to the next whitespace
    fn take_token(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.advance(end);
        &rest[..end]
    }

    /// Path pattern: stops at whitespace or a `[` opening a constraint group,
    /// neither counting inside `{...}`
    fn take_path(&mut self) -> Result<&'a str, ParseErrorKind> {
        self.take_braced(|c| c.is_whitespace() || c == '[')
    }

    /// Action identifier: stops at whitespace, `(` or `[` outside of `{...}`
    fn take_action(&mut self) -> Result<&'a str, ParseErrorKind> {
        self.take_braced(|c| c.is_whitespace() || c == '(' || c == '[')
    }

    fn take_braced(&mut self, stop: impl Fn(char) -> bool) -> Result<&'a str, ParseErrorKind> {
        let rest = self.rest();
        let mut braces = BraceTracker::default();
        let mut end = rest.len();
        for (i, c) in rest.char_indices() {
            if braces.is_outside() && stop(c) {
                end = i;
                break;
            }
            braces.step(c);
        }
        if !braces.is_outside() {
            return Err(ParseErrorKind::Unterminated { open: '{' });
        }
        self.advance(end);
        Ok(&rest[..end])
    }

    /// Inner text of a `[...]` group; the cursor must sit on `[`
    fn take_bracket(&mut self) -> Result<&'a str, ParseErrorKind> {
        let rest = self.rest();
        let close = rest
            .find(']')
            .ok_or(ParseErrorKind::Unterminated { open: '[' })?;
        self.advance(close + 1);
        Ok(&rest[1..close])
    }

    /// Inner text of a `(...)` group; `)` inside quotes does not close it
    fn take_args(&mut self) -> Result<&'a str, ParseErrorKind> {
        let rest = self.rest();
        let mut quote: Option<char> = None;
        let mut escaped = false;
        for (i, c) in rest.char_indices().skip(1) {
            if escaped {
                escaped = false;
                continue;
            }
            match (quote, c) {
                (Some(_), '\\') => escaped = true,
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(c),
                (None, ')') => {
                    self.advance(i + 1);
                    return Ok(&rest[1..i]);
                }
                (None, _) => {}
            }
        }
        Err(ParseErrorKind::Unterminated {
            open: quote.unwrap_or('('),
        })
    }
}

/// `name:'literal', other:"literal"`
fn parse_args(inner: &str) -> Result<Vec<(String, String)>, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidArgument(inner.trim().to_string());
    let mut args: Vec<(String, String)> = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| *c != ':' && !c.is_whitespace()) {
            name.push(c);
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.next() != Some(':') || !is_identifier(&name) {
            return Err(invalid());
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let quote = match chars.next() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(invalid()),
        };
        let mut value = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    value.push(escaped);
                }
                continue;
            }
            if c == quote {
                closed = true;
                break;
            }
            value.push(c);
        }
        if !closed {
            return Err(ParseErrorKind::Unterminated { open: quote });
        }
        if args.iter().any(|(existing, _)| *existing == name) {
            return Err(ParseErrorKind::InvalidArgument(name));
        }
        args.push((name, value));

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => {}
            Some(_) => return Err(invalid()),
        }
    }

    Ok(args)
}

/// `name, !name, name=value, name!=value` separated by commas and/or spaces
fn parse_constraints(inner: &str) -> Result<Vec<QueryConstraint>, ParseErrorKind> {
    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_constraint)
        .collect()
}

fn parse_constraint(token: &str) -> Result<QueryConstraint, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidConstraint(token.to_string());

    let constraint = if let Some((name, expected)) = token.split_once("!=") {
        QueryConstraint::NotEquals {
            name: decode_component(name),
            expected: decode_component(expected),
        }
    } else if let Some(name) = token.strip_prefix('!') {
        if name.contains('=') {
            return Err(invalid());
        }
        QueryConstraint::Absent(decode_component(name))
    } else if let Some((name, expected)) = token.split_once('=') {
        QueryConstraint::Equals {
            name: decode_component(name),
            expected: decode_component(expected),
        }
    } else {
        QueryConstraint::Present(decode_component(token))
    };

    if constraint.name().is_empty() || constraint.name().starts_with('!') {
        return Err(invalid());
    }
    Ok(constraint)
}
