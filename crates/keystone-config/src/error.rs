//! Errors raised while reading client definitions and project overrides.
//!
//! Everything here is a boundary failure: once a [`crate::ClientConfig`] or
//! [`crate::ProjectOverrides`] value exists it is well-typed, and the
//! resolution layer never has to validate it again.

use thiserror::Error;

/// Errors produced by the configuration boundary.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings document could not be parsed at all.
    #[error("failed to parse settings document: {0}")]
    Parse(#[source] serde_json::Error),

    /// A client definition was present but could not be turned into a
    /// configuration.
    #[error("client '{name}' is invalid: {message}")]
    InvalidClient {
        /// Configuration name as written in the settings.
        name: String,
        /// Description of the problem.
        message: String,
    },

    /// A client definition has fields of the wrong shape.
    #[error("client '{name}' could not be read: {source}")]
    MalformedClient {
        /// Configuration name as written in the settings.
        name: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A project override has fields of the wrong shape.
    #[error("override for '{name}' is malformed: {source}")]
    MalformedOverride {
        /// Configuration name the override targets.
        name: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// A settings section that must be an object is something else.
    #[error("expected '{section}' to be an object")]
    NotAnObject {
        /// Dotted path of the offending section.
        section: String,
    },
}

impl ConfigError {
    /// Returns the configuration name involved, when the error is tied to one.
    #[must_use]
    pub fn config_name(&self) -> Option<&str> {
        match self {
            Self::InvalidClient { name, .. }
            | Self::MalformedClient { name, .. }
            | Self::MalformedOverride { name, .. } => Some(name.as_str()),
            Self::Parse(_) | Self::NotAnObject { .. } => None,
        }
    }
}
