//! Compiled, ordered route table.

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::core::MatchResult;
use crate::error::{LoadError, ParseError, ParseErrorKind};
use crate::pattern::CompiledPattern;
use crate::query::{self, QueryParams};
use crate::rules::{self, action_eq, RouteMethod, RouteRule, RouteSource};

/// A [`RouteRule`] plus its compiled path matcher.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// The rule as parsed
    pub rule: RouteRule,
    /// Anchored matcher and capture metadata
    pub pattern: CompiledPattern,
}

impl CompiledRoute {
    /// Compile one rule's path pattern.
    pub fn compile(rule: RouteRule) -> Result<Self, ParseErrorKind> {
        let pattern = CompiledPattern::compile(&rule.path)?;
        Ok(Self { rule, pattern })
    }

    /// Definition-order index
    #[must_use]
    pub fn index(&self) -> usize {
        self.rule.index
    }

    /// Action identifier exactly as written
    #[must_use]
    pub fn action(&self) -> &str {
        &self.rule.action
    }

    /// Whether `action` names this route's action, ignoring case.
    #[must_use]
    pub fn action_matches(&self, action: &str) -> bool {
        action_eq(&self.rule.action, action)
    }

    /// Declared dynamic names, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.pattern.params().iter().map(|p| p.name.as_ref())
    }
}

/// Routes in definition order, with a per-method candidate index.
///
/// Built once, never mutated. A reload builds a new table; see
/// [`RequestMatcher::reload`](super::RequestMatcher::reload).
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Arc<CompiledRoute>>,
    /// For every verb named in the table: indices of routes admitting it, ascending
    by_method: HashMap<Method, Vec<usize>>,
    /// Indices of `*` routes, used for verbs no route names
    any_method: Vec<usize>,
}

impl RouteTable {
    /// A table that matches nothing
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and compile `sources` in order.
    pub fn from_sources(sources: &[RouteSource]) -> Result<Self, LoadError> {
        let rules = rules::parse_sources(sources)?;
        Self::build(rules)
    }

    /// Compile parsed rules into a table.
    ///
    /// Rules keep the order they are given in; their `index` is rewritten to
    /// their position. Any compile failure aborts the whole build.
    pub fn build(rules: Vec<RouteRule>) -> Result<Self, LoadError> {
        let mut routes = Vec::with_capacity(rules.len());
        let mut errors = Vec::new();

        for (position, mut rule) in rules.into_iter().enumerate() {
            rule.index = position;
            let origin = rule.origin.clone();
            match CompiledRoute::compile(rule) {
                Ok(route) => routes.push(Arc::new(route)),
                Err(kind) => errors.push(ParseError {
                    source_name: origin.source.to_string(),
                    line: origin.line,
                    kind,
                }),
            }
        }

        if !errors.is_empty() {
            warn!(error_count = errors.len(), "Route table build aborted");
            return Err(LoadError::Aborted(errors));
        }

        let mut by_method: HashMap<Method, Vec<usize>> = HashMap::new();
        let mut any_method = Vec::new();
        for route in &routes {
            match &route.rule.method {
                RouteMethod::Any => any_method.push(route.index()),
                RouteMethod::Only(m) => {
                    by_method.entry(m.clone()).or_default();
                }
            }
        }
        for (method, indices) in &mut by_method {
            indices.extend(
                routes
                    .iter()
                    .filter(|r| r.rule.method.admits(method))
                    .map(|r| r.index()),
            );
        }

        let routes_summary: Vec<String> = routes
            .iter()
            .take(10)
            .map(|r| format!("{} {} -> {}", r.rule.method, r.rule.path.raw, r.rule.action))
            .collect();
        info!(
            routes_count = routes.len(),
            methods = by_method.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self {
            routes,
            by_method,
            any_method,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route at definition index `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<CompiledRoute>> {
        self.routes.get(index)
    }

    /// All routes in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompiledRoute>> {
        self.routes.iter()
    }

    fn candidate_indices(&self, method: Option<&Method>) -> &[usize] {
        method
            .and_then(|m| self.by_method.get(m))
            .map_or(self.any_method.as_slice(), Vec::as_slice)
    }

    /// Cheap pre-filter over (method, host), in table order.
    ///
    /// `None` as the method (a token that is not a valid HTTP method) only
    /// admits `*` routes.
    pub fn candidates<'t>(
        &'t self,
        method: Option<&Method>,
        host: Option<&'t str>,
    ) -> impl Iterator<Item = &'t Arc<CompiledRoute>> + 't {
        self.candidate_indices(method)
            .iter()
            .filter_map(move |&i| self.routes.get(i))
            .filter(move |r| r.rule.host.admits(host))
    }

    /// First route matching the request, in table order.
    ///
    /// Per candidate: structural path match, then query constraints. The first
    /// candidate passing both wins and nothing after it is looked at.
    #[must_use]
    pub fn find(
        &self,
        method: Option<&Method>,
        path: &str,
        host: Option<&str>,
        query: &QueryParams,
    ) -> Option<MatchResult> {
        for route in self.candidates(method, host) {
            let Some(path_params) = route.pattern.captures(path) else {
                continue;
            };
            if let Some(violated) = query::first_violation(&route.rule.constraints, query) {
                debug!(
                    route_index = route.index(),
                    action = %route.rule.action,
                    constraint = %violated,
                    "Path matched but query constraint failed"
                );
                continue;
            }
            return Some(MatchResult::new(Arc::clone(route), path_params));
        }
        None
    }

    /// Print all routes to stdout
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!("[route] #{} {} ({})", route.index(), route.rule, route.rule.origin);
        }
    }
}
