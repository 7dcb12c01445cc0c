//! # BRRTRouter DSL
//!
//! **BRRTRouter DSL** is a declarative, first-match-wins request router for Rust, driven entirely
//! by a compact, line-oriented routes file.
//!
//! ## Overview
//!
//! Each non-blank line of a routes file binds an HTTP method, an optional host, a path pattern
//! and optional query-string constraints to an *action identifier* (`controller.method`). At
//! startup the lines are parsed into an ordered table; every incoming request is then resolved
//! to the first route (in definition order) that accepts it.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`rules`]** - DSL parsing: one line in, one [`RouteRule`] out
//! - **[`pattern`]** - Path pattern syntax and compilation to anchored regexes
//! - **[`query`]** - Query string decoding and the `[name=value]` constraint predicates
//! - **[`router`]** - Route table, request matching and reverse routing
//! - **[`loader`]** - Reading routes files from disk
//! - **[`hot_reload`]** - Live reloading of routes files
//! - **[`runtime_config`]** - Matcher settings from the environment or TOML
//! - **[`telemetry`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `brrtroute` command-line tool
//!
//! ### Request Matching Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Server as Hosting server
//!     participant Matcher as RequestMatcher
//!     participant Table as RouteTable
//!     participant Pattern as CompiledPattern
//!     participant Query as query::evaluate
//!
//!     Server->>Matcher: match_request(&RequestDescriptor)
//!     Matcher->>Matcher: Effective method<br/>(x-http-method-override)
//!     Matcher->>Table: find(method, path, host, query)
//!     loop Candidates in definition order
//!         Table->>Pattern: captures(path)
//!         Pattern-->>Table: ParamVec or None
//!         Table->>Query: constraints hold?
//!     end
//!     Table-->>Matcher: First MatchResult
//!     alt No match and method is HEAD
//!         Matcher->>Table: find(GET, ...)
//!     end
//!     Matcher-->>Server: Option<MatchResult>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtrouter_dsl::{RequestDescriptor, RequestMatcher, RouteSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let routes = RouteSource::new(
//!     "conf/routes",
//!     r#"
//! ## Home
//! GET  /                       home.index
//! GET  /param                  myTestController.paramAction(param:'default')
//! GET  /param/{param}          myTestController.paramAction
//! GET  /regex/{<[0-9]+>number} myTestController.regexNumberAction
//! GET  /qsparampresence [qsParamA] myTestController.qsParamPresence
//! "#,
//! );
//! let matcher = RequestMatcher::from_sources(&[routes])?;
//!
//! let m = matcher
//!     .match_request(&RequestDescriptor::new("GET", "/param"))
//!     .expect("route should match");
//! assert_eq!(m.action, "myTestController.paramAction");
//! assert_eq!(m.get("param"), Some("default"));
//!
//! assert!(matcher
//!     .match_request(&RequestDescriptor::new("GET", "/qsparampresence"))
//!     .is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ## Reloading
//!
//! A load is all-or-nothing. [`RequestMatcher::reload`] builds the replacement table on the
//! side and swaps it in atomically; if any line is bad the previous table stays active and the
//! error lists every offending line.
//!
//! ## Logging
//!
//! All modules log through `tracing`. Binaries call [`telemetry::init_logging`] once at startup:
//!
//! ```bash
//! BRRTR_LOG_LEVEL=debug BRRTR_LOG_FORMAT=json brrtroute match --routes conf/routes --path /param
//! ```

pub mod cli;
pub mod error;
pub mod hot_reload;
pub mod loader;
pub mod pattern;
pub mod query;
pub mod router;
pub mod rules;
pub mod runtime_config;
pub mod telemetry;

pub use error::{LoadError, ParseError, ParseErrorKind};
pub use query::{QueryConstraint, QueryParams};
pub use router::{MatchResult, RequestDescriptor, RequestMatcher, RouteTable};
pub use rules::{RouteRule, RouteSource};
pub use runtime_config::MatcherConfig;
