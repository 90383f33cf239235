//! Configuration model for language server dispatch.
//!
//! The crate defines the immutable values the resolver works with
//! ([`ClientConfig`], [`LanguageConfig`]), the project-scoped [`Override`]
//! model, and the boundary parsers that turn user settings and project data
//! into those values. Anything that fails to parse is rejected here with a
//! [`ConfigError`]; downstream crates assume well-typed input.

mod client;
mod defaults;
mod error;
mod language;
mod overrides;

pub use client::{
    ClientConfig, ClientDefinition, ConfigOrigin, EnvMap, JsonMap, clients_from_value,
    parse_clients,
};
pub use defaults::{PYLS, default_clients};
pub use error::ConfigError;
pub use language::LanguageConfig;
pub use overrides::{Override, ProjectOverrides};
