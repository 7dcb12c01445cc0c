//! # CLI Module
//!
//! Command-line tooling for routes files, shipped as the `brrtroute` binary.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Parse and compile routes files, then list the resulting table:
//!
//! ```bash
//! brrtroute check --routes conf/routes --routes conf/admin.routes
//! ```
//!
//! Exits non-zero and prints every bad line when the load is rejected.
//!
//! ### `match`
//!
//! Resolve one request against the routes and print the result as JSON:
//!
//! ```bash
//! brrtroute match --routes conf/routes --method GET --path /param/myparam \
//!     --host samplehost.org --query 'qsParamA=abc' -H 'x-http-method-override: PUT'
//! ```

mod commands;

pub use commands::{match_to_json, parse_header, run_cli, Cli, Commands};
