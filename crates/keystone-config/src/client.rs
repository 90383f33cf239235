//! Server configuration values and the client-definition boundary.
//!
//! A [`ClientConfig`] is an immutable description of one language server:
//! how to launch it, which languages it serves, and the option payloads
//! handed to it on startup. Sequence and mapping fields live behind [`Arc`]
//! so deriving an effective configuration from a base shares every field the
//! derivation does not touch.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::ConfigError;
use crate::language::LanguageConfig;

/// JSON object payload (initialisation options, server settings).
pub type JsonMap = serde_json::Map<String, Value>;

/// Environment variables passed to the server process.
pub type EnvMap = BTreeMap<String, String>;

/// Where a registered configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConfigOrigin {
    /// Shipped with the application.
    BuiltIn,
    /// Registered at runtime by the user or another component.
    User,
}

/// One language server configuration.
///
/// `name` is the identity used for lookup, enabling and disabling, and for
/// matching project overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    name: Arc<str>,
    binary_args: Arc<[String]>,
    tcp_port: Option<u16>,
    languages: Arc<[LanguageConfig]>,
    enabled: bool,
    init_options: Arc<JsonMap>,
    settings: Arc<JsonMap>,
    env: Arc<EnvMap>,
}

impl ClientConfig {
    /// Creates an enabled configuration with no languages or option payloads.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, binary_args: impl Into<Arc<[String]>>) -> Self {
        Self {
            name: name.into(),
            binary_args: binary_args.into(),
            tcp_port: None,
            languages: Arc::from(Vec::new()),
            enabled: true,
            init_options: Arc::default(),
            settings: Arc::default(),
            env: Arc::default(),
        }
    }

    /// Builds a configuration from a user-settings client definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidClient`] when the name is blank.
    pub fn from_definition(name: &str, definition: ClientDefinition) -> Result<Self, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidClient {
                name: name.to_owned(),
                message: String::from("client name must not be empty"),
            });
        }

        let ClientDefinition {
            command,
            tcp_port,
            enabled,
            initialization_options,
            settings,
            env,
            mut languages,
            language_id,
            scopes,
            syntaxes,
        } = definition;

        if languages.is_empty() {
            if let Some(id) = language_id {
                languages.push(LanguageConfig::new(id, scopes, syntaxes));
            }
        }

        Ok(Self::new(name, command)
            .with_tcp_port(tcp_port)
            .with_languages(languages)
            .with_enabled(enabled)
            .with_init_options(initialization_options)
            .with_settings(settings)
            .with_env(env))
    }

    /// Sets the TCP port the server listens on instead of stdio.
    #[must_use]
    pub const fn with_tcp_port(mut self, tcp_port: Option<u16>) -> Self {
        self.tcp_port = tcp_port;
        self
    }

    /// Replaces the launch command.
    #[must_use]
    pub fn with_binary_args(mut self, binary_args: impl Into<Arc<[String]>>) -> Self {
        self.binary_args = binary_args.into();
        self
    }

    /// Replaces the language bindings.
    #[must_use]
    pub fn with_languages(mut self, languages: impl Into<Arc<[LanguageConfig]>>) -> Self {
        self.languages = languages.into();
        self
    }

    /// Sets the declared enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Replaces the `initializationOptions` payload.
    #[must_use]
    pub fn with_init_options(mut self, init_options: impl Into<Arc<JsonMap>>) -> Self {
        self.init_options = init_options.into();
        self
    }

    /// Replaces the server settings payload.
    #[must_use]
    pub fn with_settings(mut self, settings: impl Into<Arc<JsonMap>>) -> Self {
        self.settings = settings.into();
        self
    }

    /// Replaces the process environment.
    #[must_use]
    pub fn with_env(mut self, env: impl Into<Arc<EnvMap>>) -> Self {
        self.env = env.into();
        self
    }

    /// Unique configuration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Command line used to launch the server.
    #[must_use]
    pub fn binary_args(&self) -> &[String] {
        &self.binary_args
    }

    /// TCP port, when the server is reached over TCP.
    #[must_use]
    pub const fn tcp_port(&self) -> Option<u16> {
        self.tcp_port
    }

    /// Language bindings in declaration order.
    #[must_use]
    pub fn languages(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// Whether the configuration may be selected.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// `initializationOptions` sent with the `initialize` request.
    #[must_use]
    pub fn init_options(&self) -> &JsonMap {
        &self.init_options
    }

    /// Settings answered to `workspace/configuration`.
    #[must_use]
    pub fn settings(&self) -> &JsonMap {
        &self.settings
    }

    /// Environment for the server process.
    #[must_use]
    pub fn env(&self) -> &EnvMap {
        &self.env
    }
}

const fn default_enabled() -> bool {
    true
}

/// Client definition as written in user settings.
///
/// Both the multi-language form (`languages`) and the older single-language
/// form (`languageId`, `scopes` and `syntaxes` at the top level) are
/// accepted. The top-level form is only consulted when `languages` is empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientDefinition {
    /// Launch command.
    #[serde(default)]
    pub command: Vec<String>,
    /// Optional TCP port.
    #[serde(default)]
    pub tcp_port: Option<u16>,
    /// Declared enabled flag; defaults to `true`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `initializationOptions` payload.
    #[serde(default, rename = "initializationOptions")]
    pub initialization_options: JsonMap,
    /// Server settings payload.
    #[serde(default)]
    pub settings: JsonMap,
    /// Process environment.
    #[serde(default)]
    pub env: EnvMap,
    /// Language bindings.
    #[serde(default)]
    pub languages: Vec<LanguageConfig>,
    /// Single-language form: language identifier.
    #[serde(default, rename = "languageId")]
    pub language_id: Option<String>,
    /// Single-language form: scope selectors.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Single-language form: syntax names.
    #[serde(default)]
    pub syntaxes: Vec<String>,
}

/// Parses a JSON object of `name -> definition` into configurations.
///
/// Document order is preserved.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for invalid JSON,
/// [`ConfigError::NotAnObject`] when the document is not an object, and the
/// per-client errors of [`clients_from_value`].
pub fn parse_clients(json: &str) -> Result<Vec<ClientConfig>, ConfigError> {
    let value: Value = serde_json::from_str(json).map_err(ConfigError::Parse)?;
    clients_from_value(&value)
}

/// Reads configurations from an already-parsed `name -> definition` object.
///
/// # Errors
///
/// Returns [`ConfigError::NotAnObject`] when `value` is not an object,
/// [`ConfigError::MalformedClient`] when a definition has fields of the wrong
/// shape, and [`ConfigError::InvalidClient`] for blank names.
pub fn clients_from_value(value: &Value) -> Result<Vec<ClientConfig>, ConfigError> {
    let entries = value.as_object().ok_or_else(|| ConfigError::NotAnObject {
        section: String::from("clients"),
    })?;

    entries
        .iter()
        .map(|(name, raw)| {
            let definition =
                ClientDefinition::deserialize(raw).map_err(|source| ConfigError::MalformedClient {
                    name: name.clone(),
                    source,
                })?;
            ClientConfig::from_definition(name, definition)
        })
        .collect()
}
