//! Reverse routing: action + parameters back to a URL.

use std::borrow::Cow;
use tracing::debug;

use super::core::{action_placeholders, render_action};
use super::table::{CompiledRoute, RouteTable};
use crate::pattern::SegmentPart;
use crate::rules::{action_eq, HostPattern, RouteMethod};

/// A URL generated for an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseRoute {
    /// Method column of the route that produced the URL
    pub method: RouteMethod,
    /// Host column of that route
    pub host: HostPattern,
    /// Path plus query string for the parameters the path did not consume
    pub url: String,
}

impl RouteTable {
    /// Generate a URL for `action` from `params`.
    ///
    /// Walks the table in order and uses the first route that can represent
    /// the action with the given parameters:
    ///
    /// - the action (template rendered with `params`) equals `action`, ignoring case
    /// - every required path parameter is supplied or has a default
    /// - every supplied path value fits the segment's regex
    /// - argument bindings with no path counterpart agree with supplied values
    ///
    /// Parameters the path does not consume become the query string, in the
    /// order given.
    #[must_use]
    pub fn reverse(&self, action: &str, params: &[(&str, &str)]) -> Option<ReverseRoute> {
        let found = self.iter().find_map(|route| reverse_route(route, action, params));
        if found.is_none() {
            debug!(action = %action, params = ?params, "No route can generate a URL");
        }
        found
    }
}

fn reverse_route(route: &CompiledRoute, action: &str, params: &[(&str, &str)]) -> Option<ReverseRoute> {
    let lookup = |name: &str| params.iter().find(|(k, _)| *k == name).map(|(_, v)| *v);

    let rendered = render_action(&route.rule.action, lookup);
    if !action_eq(&rendered, action) {
        return None;
    }

    for (name, value) in &route.rule.args {
        if route.rule.path.has_param(name) {
            continue;
        }
        if lookup(name).is_some_and(|given| given != value) {
            return None;
        }
    }

    let mut url = String::with_capacity(route.rule.path.raw.len() + 16);
    for segment in &route.rule.path.segments {
        let mut piece = String::new();
        let mut present = true;
        for part in &segment.parts {
            match part {
                SegmentPart::Literal(text) => piece.push_str(text),
                SegmentPart::Param(spec) => {
                    let supplied = lookup(&spec.name);
                    let value = match supplied {
                        Some(v) => v,
                        // Optional segments and wildcards are simply left out
                        None if segment.optional || spec.wildcard => {
                            present = false;
                            break;
                        }
                        None => spec.default.as_deref()?,
                    };
                    if !route.pattern.param(&spec.name)?.accepts(value) {
                        return None;
                    }
                    if spec.wildcard {
                        let encoded: Vec<Cow<'_, str>> =
                            value.split('/').map(urlencoding::encode).collect();
                        piece.push_str(&encoded.join("/"));
                    } else {
                        piece.push_str(&urlencoding::encode(value));
                    }
                }
            }
        }
        if present {
            url.push('/');
            url.push_str(&piece);
        }
    }
    if url.is_empty() {
        url.push('/');
    }

    let placeholders = action_placeholders(&route.rule.action);
    let query: Vec<String> = params
        .iter()
        .filter(|(k, _)| {
            !route.rule.path.has_param(k)
                && route.rule.arg(k).is_none()
                && !placeholders.contains(k)
        })
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    Some(ReverseRoute {
        method: route.rule.method.clone(),
        host: route.rule.host.clone(),
        url,
    })
}
