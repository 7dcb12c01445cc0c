use http::Method;
use std::fmt;
use std::sync::Arc;

use crate::pattern::PathPattern;
use crate::query::QueryConstraint;

/// Method column of a route: a concrete verb or `*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMethod {
    /// `*` - admits every request method
    Any,
    /// A single verb
    Only(Method),
}

impl RouteMethod {
    /// Parse a method token (case-insensitive).
    ///
    /// Only the verbs the routes DSL knows about are accepted; anything else
    /// is an unknown method and rejects the line.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        if token == "*" {
            return Some(RouteMethod::Any);
        }
        let method = match token.to_ascii_uppercase().as_str() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "PATCH" => Method::PATCH,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            _ => return None,
        };
        Some(RouteMethod::Only(method))
    }

    /// Whether a request with `method` passes this column.
    #[must_use]
    pub fn admits(&self, method: &Method) -> bool {
        match self {
            RouteMethod::Any => true,
            RouteMethod::Only(m) => m == method,
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMethod::Any => f.write_str("*"),
            RouteMethod::Only(m) => f.write_str(m.as_str()),
        }
    }
}

/// Host column of a route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostPattern {
    /// No `host:` given (or `host:*`)
    #[default]
    Any,
    /// Literal host, stored lowercase
    Exact(String),
}

impl HostPattern {
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "" | "*" => HostPattern::Any,
            host => HostPattern::Exact(host.to_ascii_lowercase()),
        }
    }

    /// Case-insensitive host comparison.
    ///
    /// A request host carrying a port (`example.org:8080`) also matches a
    /// pattern written without one. A request without a host only passes `Any`.
    #[must_use]
    pub fn admits(&self, host: Option<&str>) -> bool {
        let expected = match self {
            HostPattern::Any => return true,
            HostPattern::Exact(expected) => expected,
        };
        let Some(host) = host.map(str::trim) else {
            return false;
        };
        if host.eq_ignore_ascii_case(expected) {
            return true;
        }
        if expected.contains(':') {
            return false;
        }
        host.rsplit_once(':')
            .is_some_and(|(name, port)| {
                port.bytes().all(|b| b.is_ascii_digit()) && name.eq_ignore_ascii_case(expected)
            })
    }
}

impl fmt::Display for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPattern::Any => f.write_str("*"),
            HostPattern::Exact(host) => f.write_str(host),
        }
    }
}

/// One logical block of route definitions (usually one file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSource {
    /// Name used in diagnostics
    pub name: String,
    /// Raw DSL text
    pub text: String,
}

impl RouteSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Where a rule was defined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOrigin {
    pub source: Arc<str>,
    pub line: usize,
}

impl fmt::Display for RouteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

/// A parsed route definition. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// HTTP method column
    pub method: RouteMethod,
    /// Host constraint, [`HostPattern::Any`] when omitted
    pub host: HostPattern,
    /// Parsed path pattern
    pub path: PathPattern,
    /// Action identifier as written, possibly with `{name}` placeholders
    pub action: String,
    /// `(name:'literal')` bindings in declaration order
    pub args: Vec<(String, String)>,
    /// Query constraints in declaration order
    pub constraints: Vec<QueryConstraint>,
    /// Position in the overall table (definition order)
    pub index: usize,
    /// Source and line of the definition
    pub origin: RouteOrigin,
}

impl RouteRule {
    /// Static/default binding for `name`
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method)?;
        if let HostPattern::Exact(host) = &self.host {
            write!(f, " host:{host}")?;
        }
        write!(f, " {} {}", self.path.raw, self.action)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self
                .args
                .iter()
                .map(|(k, v)| format!("{k}:'{v}'"))
                .collect();
            write!(f, "({})", args.join(", "))?;
        }
        if !self.constraints.is_empty() {
            let constraints: Vec<String> =
                self.constraints.iter().map(ToString::to_string).collect();
            write!(f, " [{}]", constraints.join(", "))?;
        }
        Ok(())
    }
}

/// Case-insensitive action comparison (Unicode-aware, allocation free).
#[must_use]
pub fn action_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
