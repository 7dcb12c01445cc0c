//! # Rules Module
//!
//! Reads the routes DSL into ordered [`RouteRule`]s.
//!
//! ## Format
//!
//! ```text
//! # comment
//! GET     /simpleaction                        myTestController.simpleAction
//! GET     /param                               myTestController.paramAction(param:'default')
//! GET     /param/{param}                       myTestController.paramAction
//! PUT     /http                                myTestController.httpAction(type:'PUT')
//! GET     /regex/{<[0-9]+>number}              myTestController.regexNumberAction
//! GET     host:samplehost.org /host            myTestController.hostAction
//! GET     /qsparampresence [qsParamA]          myTestController.qsParamPresence
//! *       /files/*path                         assets.serve
//! ```
//!
//! The parser does no I/O. Callers hand it [`RouteSource`]s in the order the
//! rules should apply; a single bad line rejects the whole load.

mod parse;
#[cfg(test)]
mod tests;
mod types;

pub use parse::{parse_routes, parse_sources};
pub use types::{action_eq, HostPattern, RouteMethod, RouteOrigin, RouteRule, RouteSource};
