//! Router core module - hot path for request matching.
//!
//! # JSF Compliance (Rule 206)
//!
//! Matching reads an immutable [`RouteTable`] through a lock-free
//! [`ArcSwap`] load. Parameters live in a stack-allocated [`ParamVec`] for
//! routes with ≤8 params.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use arc_swap::ArcSwap;
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::request::RequestDescriptor;
use super::table::{CompiledRoute, RouteTable};
use crate::error::LoadError;
use crate::pattern::ParamVec;
use crate::query::QueryParams;
use crate::rules::{action_eq, RouteSource};
use crate::runtime_config::MatcherConfig;

/// Header (and query parameter) clients use to simulate other verbs
pub const METHOD_OVERRIDE: &str = "x-http-method-override";

/// Matches slower than this are logged at `warn`
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Result of successfully matching a request to a route.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// The matched route (Arc to avoid expensive clones)
    pub route: Arc<CompiledRoute>,
    /// Action identifier with `{name}` placeholders filled from `params`
    pub action: String,
    /// Path values in declaration order, then argument bindings the path did
    /// not supply. Path values win on a name collision.
    pub params: ParamVec,
}

impl MatchResult {
    pub(crate) fn new(route: Arc<CompiledRoute>, mut params: ParamVec) -> Self {
        for (name, value) in &route.rule.args {
            if !params.iter().any(|(k, _)| k.as_ref() == name) {
                params.push((Arc::from(name.as_str()), value.clone()));
            }
        }
        let action = render_action(&route.rule.action, |name| {
            params
                .iter()
                .find(|(k, _)| k.as_ref() == name)
                .map(|(_, v)| v.as_str())
        });
        Self {
            route,
            action,
            params,
        }
    }

    /// Get a parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the resolved action is `action`, ignoring case
    #[must_use]
    pub fn is_action(&self, action: &str) -> bool {
        action_eq(&self.action, action)
    }

    /// Convert params to a HashMap
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Substitute `{name}` placeholders; unknown names are left as written.
pub(crate) fn render_action<'v, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'v str>,
{
    if !template.contains('{') {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let name = &rest[open + 1..open + close];
        match lookup(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..=open + close]),
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Placeholder names used by an action template.
pub(crate) fn action_placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        names.push(&rest[open + 1..open + close]);
        rest = &rest[open + close + 1..];
    }
    names
}

/// Top-level entry point: resolves requests against the published table.
///
/// The table sits behind an [`ArcSwap`]; every match works on one snapshot, and
/// [`reload`](Self::reload) publishes a fully built replacement with a single
/// atomic store. Matching never locks.
pub struct RequestMatcher {
    table: ArcSwap<RouteTable>,
    config: MatcherConfig,
}

impl RequestMatcher {
    /// Publish `table` with the default configuration
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self::with_config(table, MatcherConfig::default())
    }

    #[must_use]
    pub fn with_config(table: RouteTable, config: MatcherConfig) -> Self {
        Self {
            table: ArcSwap::from_pointee(table),
            config,
        }
    }

    /// Parse, compile and publish `sources`.
    pub fn from_sources(sources: &[RouteSource]) -> Result<Self, LoadError> {
        Ok(Self::new(RouteTable::from_sources(sources)?))
    }

    /// Snapshot of the currently published table
    #[must_use]
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Atomically replace the published table.
    pub fn publish(&self, table: RouteTable) {
        let routes_count = table.len();
        self.table.store(Arc::new(table));
        info!(routes_count, "Published new routing table");
    }

    /// Build a new table from `sources` and publish it.
    ///
    /// On error nothing is published and the previous table stays active.
    pub fn reload(&self, sources: &[RouteSource]) -> Result<usize, LoadError> {
        match RouteTable::from_sources(sources) {
            Ok(table) => {
                let count = table.len();
                self.publish(table);
                Ok(count)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    active_routes = self.table.load().len(),
                    "Route reload aborted, keeping the active table"
                );
                Err(err)
            }
        }
    }

    /// Method used for matching.
    ///
    /// `x-http-method-override` as a header wins over the same name in the
    /// query string. An override that is not a valid method token is ignored.
    fn effective_method(&self, request: &RequestDescriptor<'_>, query: &QueryParams) -> Option<Method> {
        if self.config.method_override {
            let requested = request
                .headers
                .header(METHOD_OVERRIDE)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .or_else(|| {
                    query
                        .get(METHOD_OVERRIDE)
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                });
            if let Some(requested) = requested {
                match parse_method(requested) {
                    Some(method) => return Some(method),
                    None => debug!(
                        override_value = %requested,
                        "Ignoring invalid method override"
                    ),
                }
            }
        }
        parse_method(request.method)
    }

    /// Match a request.
    ///
    /// # Returns
    ///
    /// * `Some(MatchResult)` - first route (in table order) whose method, host,
    ///   path and query constraints all accept the request
    /// * `None` - no route applies; this is not an error
    #[must_use]
    pub fn match_request(&self, request: &RequestDescriptor<'_>) -> Option<MatchResult> {
        let table = self.table.load();
        let query = request.query.map(QueryParams::parse).unwrap_or_default();
        let method = self.effective_method(request, &query);

        debug!(
            method = %request.method,
            effective_method = ?method,
            path = %request.path,
            host = ?request.host,
            "Route match attempt"
        );

        let match_start = Instant::now();
        let mut result = table.find(method.as_ref(), request.path, request.host, &query);
        if result.is_none() && self.config.head_fallback && method == Some(Method::HEAD) {
            debug!(path = %request.path, "No HEAD route, retrying as GET");
            result = table.find(Some(&Method::GET), request.path, request.host, &query);
        }
        let match_duration = match_start.elapsed();

        match &result {
            Some(m) => {
                if match_duration > SLOW_MATCH {
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        action = %m.action,
                        route_index = m.route.index(),
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    debug!(
                        method = %request.method,
                        path = %request.path,
                        action = %m.action,
                        route_index = m.route.index(),
                        route_pattern = %m.route.rule.path.raw,
                        params = ?m.params,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
            }
            None => debug!(
                method = %request.method,
                path = %request.path,
                duration_us = match_duration.as_micros(),
                "No route matched"
            ),
        }

        result
    }
}

impl std::fmt::Debug for RequestMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestMatcher")
            .field("routes", &self.table.load().len())
            .field("config", &self.config)
            .finish()
    }
}

fn parse_method(token: &str) -> Option<Method> {
    Method::from_bytes(token.trim().to_ascii_uppercase().as_bytes()).ok()
}
