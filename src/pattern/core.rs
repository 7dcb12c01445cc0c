//! Path pattern compiler - turns a [`PathPattern`] into one anchored regex.
//!
//! # JSF Compliance (Rule 206)
//!
//! Compilation happens once per route at load time. [`CompiledPattern::captures`]
//! is on the request hot path and keeps parameters in a [`ParamVec`].

use std::borrow::Cow;
use std::sync::Arc;

use regex::Regex;
use smallvec::SmallVec;

use super::types::{PathPattern, SegmentPart};
use crate::error::ParseErrorKind;

/// Maximum number of parameters before heap allocation.
/// Most route tables have ≤4 path params (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they come from the compiled table and are
/// shared across every match; values are per-request data.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Capture metadata for one dynamic parameter
#[derive(Debug, Clone)]
pub struct CapturedParam {
    /// Parameter name
    pub name: Arc<str>,
    /// Consumes the rest of the path
    pub wildcard: bool,
    /// Lives in an optional segment (or is a wildcard) and may not participate
    pub optional: bool,
    /// Value surfaced when the capture did not participate
    pub default: Option<String>,
    /// Named group inside the route regex (`p0`, `p1`, ...)
    group: String,
    /// Anchored regex for one value, used when generating URLs
    validator: Regex,
}

impl CapturedParam {
    /// Whether `value` could have been captured by this parameter.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.validator.is_match(value)
    }
}

/// A path matcher anchored at both ends plus its ordered capture list.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    params: Vec<CapturedParam>,
}

impl CompiledPattern {
    /// Compile a parsed pattern.
    ///
    /// Transforms `/users/{id}` into `^/users/(?P<p0>[^/]+)/?$`. Groups are named
    /// positionally so groups inside custom regexes never shift the indices.
    pub fn compile(pattern: &PathPattern) -> Result<Self, ParseErrorKind> {
        if pattern.segments.is_empty() {
            return Ok(Self {
                regex: Regex::new(r"^/$").map_err(|e| invalid("/", &e))?,
                params: Vec::new(),
            });
        }

        let mut source = String::with_capacity(pattern.raw.len() + 16);
        source.push('^');
        let mut params = Vec::with_capacity(pattern.params().count());
        let mut ends_with_wildcard = false;

        for segment in &pattern.segments {
            let wildcard = segment.is_wildcard();
            // A wildcard also matches its bare prefix (`/files` for `/files/*path`)
            let optional = segment.optional || wildcard;
            source.push_str(if optional { "(?:/" } else { "/" });

            for part in &segment.parts {
                match part {
                    SegmentPart::Literal(text) => source.push_str(&regex::escape(text)),
                    SegmentPart::Param(spec) => {
                        let group = format!("p{}", params.len());
                        source.push_str("(?P<");
                        source.push_str(&group);
                        source.push('>');
                        source.push_str(spec.pattern());
                        source.push(')');

                        let validator = Regex::new(&format!("^(?:{})$", spec.pattern()))
                            .map_err(|e| invalid(&spec.name, &e))?;
                        params.push(CapturedParam {
                            name: Arc::from(spec.name.as_str()),
                            wildcard: spec.wildcard,
                            optional,
                            default: spec.default.clone(),
                            group,
                            validator,
                        });
                    }
                }
            }

            if optional {
                source.push_str(")?");
            }
            ends_with_wildcard = wildcard;
        }

        if !ends_with_wildcard {
            source.push_str("/?");
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| invalid(&pattern.raw, &e))?;
        Ok(Self { regex, params })
    }

    /// Declared parameters in path order.
    #[must_use]
    pub fn params(&self) -> &[CapturedParam] {
        &self.params
    }

    /// Metadata for the parameter called `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&CapturedParam> {
        self.params.iter().find(|p| p.name.as_ref() == name)
    }

    /// Regex source, for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Structural test without extracting anything.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and extract its parameters.
    ///
    /// Values are percent-decoded. A parameter that did not participate (absent
    /// optional segment) takes its default, or is left out when it has none.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<ParamVec> {
        let caps = self.regex.captures(path)?;
        let mut values = ParamVec::new();
        for param in &self.params {
            match caps.name(&param.group) {
                Some(m) => values.push((Arc::clone(&param.name), decode_path_value(m.as_str()))),
                None => {
                    if let Some(default) = &param.default {
                        values.push((Arc::clone(&param.name), default.clone()));
                    }
                }
            }
        }
        Some(values)
    }
}

/// Percent-decode a captured path value; malformed input is kept as-is.
///
/// `+` is not a space inside a path.
#[must_use]
pub fn decode_path_value(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

fn invalid(name: &str, err: &regex::Error) -> ParseErrorKind {
    ParseErrorKind::InvalidRegex {
        name: name.to_string(),
        message: err.to_string(),
    }
}
