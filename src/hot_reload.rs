//! # Hot Reload Module
//!
//! Watches routes files and publishes a rebuilt table when they change.
//!
//! ## Reload Process
//!
//! When any watched file changes:
//!
//! 1. **Detection** - Filesystem watcher reports a modify/create event
//!    (or a removal inside a pattern's directory)
//! 2. **Read** - Patterns are re-expanded and every file is re-read, in the original order
//! 3. **Build** - A complete new [`RouteTable`](crate::router::RouteTable) is parsed and compiled
//! 4. **Publish** - The table is swapped in atomically
//!
//! ## Error Handling
//!
//! If any file fails to read, parse or compile:
//! - The error is logged
//! - The previous table remains active
//! - Requests keep being served
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brrtrouter_dsl::hot_reload::watch_routes;
//! use brrtrouter_dsl::router::RequestMatcher;
//! use std::sync::Arc;
//!
//! let files = ["conf/routes", "conf/modules/*.routes"];
//! let matcher = Arc::new(RequestMatcher::from_files(&files)?);
//! let _watcher = watch_routes(&files, Arc::clone(&matcher))?;
//! ```

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::loader::{is_pattern, pattern_dir};
use crate::router::RequestMatcher;

/// Watch `paths` and reload `matcher` whenever one of them changes.
///
/// Plain paths are watched as files. A file-name pattern watches its
/// directory, so files added or removed there join the next reload.
/// The watcher stops when the returned value is dropped.
pub fn watch_routes<P: AsRef<Path>>(
    paths: &[P],
    matcher: Arc<RequestMatcher>,
) -> notify::Result<RecommendedWatcher> {
    let files: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let watch_files = files.clone();
    let has_patterns = files.iter().any(|f| is_pattern(f));

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| match res {
            Ok(event) => {
                let relevant = match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) => true,
                    EventKind::Remove(_) => has_patterns,
                    _ => false,
                };
                if relevant {
                    match matcher.reload_from_files(&watch_files) {
                        Ok(count) => info!(routes_count = count, "hot-reload: routes updated"),
                        Err(err) => warn!(error = %err, "hot-reload: keeping previous routes"),
                    }
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    let mut targets: Vec<PathBuf> = Vec::with_capacity(files.len());
    for file in &files {
        let target = if is_pattern(file) {
            pattern_dir(file)
        } else {
            file.clone()
        };
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    for target in &targets {
        watcher.watch(target, RecursiveMode::NonRecursive)?;
    }
    Ok(watcher)
}
