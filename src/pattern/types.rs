/// Regex used for `{name}` segments with no custom pattern.
pub const DEFAULT_SEGMENT_REGEX: &str = "[^/]+";

/// Dynamic part of a path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Name the captured value is bound to
    pub name: String,
    /// Custom capture regex from `{<regex>name}`
    pub regex: Option<String>,
    /// Value used when an optional segment is absent (from the action arguments)
    pub default: Option<String>,
    /// `*name`: consumes the remaining path, separators included
    pub wildcard: bool,
}

impl ParamSpec {
    /// Regex this parameter captures with.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match (&self.regex, self.wildcard) {
            (Some(custom), _) => custom,
            (None, true) => ".*",
            (None, false) => DEFAULT_SEGMENT_REGEX,
        }
    }
}

/// One piece of a path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPart {
    /// Matched verbatim
    Literal(String),
    /// Captured into a parameter
    Param(ParamSpec),
}

/// Everything between two `/` separators.
///
/// A segment can mix literals and parameters (`file-{id}.json`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Ordered pieces of the segment
    pub parts: Vec<SegmentPart>,
    /// Written with a trailing `?`; the whole segment may be absent
    pub optional: bool,
}

impl PathSegment {
    /// `true` for a `*name` segment
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self.parts.as_slice(), [SegmentPart::Param(p)] if p.wildcard)
    }

    /// Parameters declared in this segment.
    pub fn params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.parts.iter().filter_map(|part| match part {
            SegmentPart::Param(p) => Some(p),
            SegmentPart::Literal(_) => None,
        })
    }
}

/// Parsed form of a route's path column (the `PathSegmentSpec`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    /// The pattern exactly as written in the routes file
    pub raw: String,
    /// Segments in order; empty for `/`
    pub segments: Vec<PathSegment>,
}

impl PathPattern {
    /// All dynamic parameters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.segments.iter().flat_map(PathSegment::params)
    }

    /// Whether the path declares a parameter called `name`.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.params().any(|p| p.name == name)
    }
}
