//! # Router Module
//!
//! The router module turns a compiled [`RouteTable`] into request decisions.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Holding compiled routes in definition order
//! - Narrowing candidates by method and host before any regex runs
//! - Matching the path, then the query constraints, first match wins
//! - Merging path values with the route's argument bindings
//! - Publishing reloaded tables without blocking readers
//! - Generating URLs back from actions (reverse routing)
//!
//! ## Architecture
//!
//! 1. **Compilation**: at load time every route's path (e.g. `/pets/{id}`) is
//!    compiled into one anchored regex; see [`crate::pattern`].
//!
//! 2. **Matching**: [`RequestMatcher::match_request`] resolves the effective
//!    method (`x-http-method-override`, HEAD falling back to GET), walks the
//!    pre-filtered candidates in table order and returns the first route whose
//!    path and query constraints both accept the request.
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_dsl::router::{RequestDescriptor, RequestMatcher};
//! use brrtrouter_dsl::rules::RouteSource;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let routes = RouteSource::new(
//!     "routes",
//!     "GET /param/{param} myTestController.paramAction",
//! );
//! let matcher = RequestMatcher::from_sources(&[routes])?;
//!
//! let m = matcher
//!     .match_request(&RequestDescriptor::new("GET", "/param/myparam"))
//!     .expect("route should match");
//! assert_eq!(m.action, "myTestController.paramAction");
//! assert_eq!(m.get("param"), Some("myparam"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! A [`RouteTable`] never changes after it is built. [`RequestMatcher`] keeps
//! the published table in an `ArcSwap`, so any number of threads can match
//! while a reload builds the next table on the side.

mod core;
mod request;
mod reverse;
mod table;

pub use self::core::{MatchResult, RequestMatcher, METHOD_OVERRIDE};
pub use request::{NoHeaders, RequestDescriptor, RequestHeaders};
pub use reverse::ReverseRoute;
pub use table::{CompiledRoute, RouteTable};
