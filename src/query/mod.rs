//! # Query Module
//!
//! Query string decoding and the bracketed query-constraint predicates
//! (`[name]`, `[!name]`, `[name=value]`, `[name!=value]`) attached to routes.
//!
//! Constraints are a plain enum evaluated by [`evaluate`]; a route passes only
//! when every one of its constraints passes.

mod core;
#[cfg(test)]
mod tests;

pub use self::core::{
    decode_component, evaluate, first_violation, satisfies, QueryConstraint, QueryParams,
};
