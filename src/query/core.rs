use std::borrow::Cow;
use std::fmt;

/// Decoded query string parameters, in request order.
///
/// A name written without `=` (`?flag`) is present with an empty value.
/// For repeated names the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string (with or without the leading `?`).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = raw
            .split('&')
            .filter(|piece| !piece.is_empty())
            .map(|piece| match piece.split_once('=') {
                Some((name, value)) => (decode_component(name), decode_component(value)),
                None => (decode_component(piece), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// First value for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `name` appears at all, with any value
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Form-decode one query component: `+` is a space, `%XX` is UTF-8.
///
/// Malformed input degrades to the raw text instead of failing.
#[must_use]
pub fn decode_component(raw: &str) -> String {
    if !raw.contains(['%', '+']) {
        return raw.to_string();
    }
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Predicate over one query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryConstraint {
    /// `[name]`: the key exists, any value including empty
    Present(String),
    /// `[!name]`: the key does not exist at all
    Absent(String),
    /// `[name=value]`: the key exists with exactly this value
    Equals {
        name: String,
        expected: String,
    },
    /// `[name!=value]`: the key exists with a different value
    NotEquals {
        name: String,
        expected: String,
    },
}

impl QueryConstraint {
    /// The parameter this constraint looks at
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            QueryConstraint::Present(name) | QueryConstraint::Absent(name) => name,
            QueryConstraint::Equals { name, .. } | QueryConstraint::NotEquals { name, .. } => name,
        }
    }
}

impl fmt::Display for QueryConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryConstraint::Present(name) => write!(f, "{name}"),
            QueryConstraint::Absent(name) => write!(f, "!{name}"),
            QueryConstraint::Equals { name, expected } => write!(f, "{name}={expected}"),
            QueryConstraint::NotEquals { name, expected } => write!(f, "{name}!={expected}"),
        }
    }
}

/// Evaluate one constraint.
#[must_use]
pub fn satisfies(constraint: &QueryConstraint, query: &QueryParams) -> bool {
    match constraint {
        QueryConstraint::Present(name) => query.contains(name),
        QueryConstraint::Absent(name) => !query.contains(name),
        QueryConstraint::Equals { name, expected } => query.get(name) == Some(expected.as_str()),
        // Existence is still required: a missing key fails
        QueryConstraint::NotEquals { name, expected } => {
            matches!(query.get(name), Some(value) if value != expected)
        }
    }
}

/// First constraint that rejects `query`, if any.
#[must_use]
pub fn first_violation<'c>(
    constraints: &'c [QueryConstraint],
    query: &QueryParams,
) -> Option<&'c QueryConstraint> {
    constraints.iter().find(|c| !satisfies(c, query))
}

/// All constraints must pass (logical AND). An empty list always passes.
#[must_use]
pub fn evaluate(constraints: &[QueryConstraint], query: &QueryParams) -> bool {
    first_violation(constraints, query).is_none()
}
