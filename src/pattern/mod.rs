//! # Pattern Module
//!
//! Path patterns from the routes DSL and their compiled regex matchers.
//!
//! ## Syntax
//!
//! | Written            | Meaning                                              |
//! |--------------------|------------------------------------------------------|
//! | `/users`           | literal segment                                      |
//! | `/{id}`            | dynamic segment, any run of non-`/` characters       |
//! | `/{<[0-9]+>id}`    | dynamic segment with a custom regex                  |
//! | `/{page}?`         | optional segment, defaulted from the action args     |
//! | `/*path`           | wildcard, consumes the rest of the path              |
//! | `/file-{id}.json`  | literals and parameters mixed in one segment         |
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_dsl::pattern::{CompiledPattern, PathPattern};
//!
//! let pattern = PathPattern::parse("/regex/{<[0-9]+>number}", &[]).unwrap();
//! let compiled = CompiledPattern::compile(&pattern).unwrap();
//! assert!(compiled.is_match("/regex/42"));
//! assert!(!compiled.is_match("/regex/marvin"));
//! ```

mod core;
mod syntax;
mod types;

pub use self::core::{decode_path_value, CapturedParam, CompiledPattern, ParamVec, MAX_INLINE_PARAMS};
pub(crate) use syntax::{is_identifier, BraceTracker};
pub use types::{ParamSpec, PathPattern, PathSegment, SegmentPart, DEFAULT_SEGMENT_REGEX};
