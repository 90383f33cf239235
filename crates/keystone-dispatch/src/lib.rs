//! Resolution of the language server configuration governing a position.
//!
//! The crate keeps the global [`ConfigRegistry`] of client configurations,
//! merges project overrides onto it to form each session's effective list,
//! and picks the configuration whose scope selectors most specifically match
//! a document position. Editors plug in through the narrow [`ScopeContext`]
//! trait, so nothing here depends on a concrete view or window type.
//!
//! All resolution is synchronous and allocation-light: it runs on every
//! cursor move and view activation. Registry changes are not broadcast;
//! callers push them into each [`SessionConfigManager`].

#![deny(missing_docs)]

mod context;
mod matcher;
mod merge;
mod registry;
mod session;
mod syntax;

#[cfg(test)]
mod tests;

pub use context::{Point, ScopeContext};
pub use matcher::{
    ScopeMatch, best_match, best_match_available, best_match_default, best_match_global,
    best_scored_match,
};
pub use merge::{apply_overrides, resolve_configs};
pub use registry::{ConfigRegistry, SharedRegistry, global};
pub use session::{ConfigManager, SessionConfigManager, SessionConfigs};
pub use syntax::{config_supports_syntax, language_matches_syntax, syntax_language};
