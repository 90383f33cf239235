//! Global registry of client configurations.
//!
//! The [`ConfigRegistry`] keeps built-in configurations ahead of
//! user-registered ones and tracks which names have been switched on or off
//! globally. Nothing is ever removed: disabling only makes a configuration
//! ineligible for matching. Registering an existing name replaces the prior
//! entry in place.
//!
//! Sessions are not notified of changes. Whoever mutates the registry must
//! push fresh configuration lists to the session managers that should see
//! the change.

mod shared;

use std::collections::BTreeSet;

use keystone_config::{ClientConfig, ConfigOrigin, ProjectOverrides};
use tracing::debug;

use crate::merge::resolve_configs;
use crate::syntax::config_supports_syntax;

pub use shared::{SharedRegistry, global};

const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Process-wide collection of every known client configuration.
///
/// A configuration is enabled when its name has not been disabled and it
/// either is a built-in declaring itself enabled or has been enabled
/// explicitly. User configurations stay off until [`Self::enable`] is called.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    defaults: Vec<ClientConfig>,
    user_added: Vec<ClientConfig>,
    enabled_names: BTreeSet<String>,
    disabled_names: BTreeSet<String>,
}

impl ConfigRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with built-in configurations.
    ///
    /// A later built-in with the same name as an earlier one replaces it.
    #[must_use]
    pub fn with_defaults(defaults: impl IntoIterator<Item = ClientConfig>) -> Self {
        let mut registry = Self::default();
        for config in defaults {
            registry.insert(config, ConfigOrigin::BuiltIn);
        }
        registry
    }

    /// Inserts a user configuration, replacing any entry with the same name.
    pub fn register(&mut self, config: ClientConfig) {
        self.insert(config, ConfigOrigin::User);
    }

    fn insert(&mut self, config: ClientConfig, origin: ConfigOrigin) {
        let name = config.name().to_owned();
        if let Some((slot_origin, slot)) = self.slot_mut(&name) {
            *slot = config;
            debug!(
                target: REGISTRY_TARGET,
                config = name.as_str(),
                origin = %slot_origin,
                "replaced registered configuration"
            );
            return;
        }

        match origin {
            ConfigOrigin::BuiltIn => self.defaults.push(config),
            ConfigOrigin::User => self.user_added.push(config),
        }
        debug!(
            target: REGISTRY_TARGET,
            config = name.as_str(),
            %origin,
            "registered configuration"
        );
    }

    fn slot_mut(&mut self, name: &str) -> Option<(ConfigOrigin, &mut ClientConfig)> {
        if let Some(slot) = self.defaults.iter_mut().find(|config| config.name() == name) {
            return Some((ConfigOrigin::BuiltIn, slot));
        }
        self.user_added
            .iter_mut()
            .find(|config| config.name() == name)
            .map(|slot| (ConfigOrigin::User, slot))
    }

    fn declared(&self) -> impl Iterator<Item = (ConfigOrigin, &ClientConfig)> {
        let defaults = self
            .defaults
            .iter()
            .map(|config| (ConfigOrigin::BuiltIn, config));
        let user_added = self
            .user_added
            .iter()
            .map(|config| (ConfigOrigin::User, config));
        defaults.chain(user_added)
    }

    fn find(&self, name: &str) -> Option<(ConfigOrigin, &ClientConfig)> {
        self.declared().find(|(_, config)| config.name() == name)
    }

    /// Enables `name` globally. Unknown names are ignored.
    pub fn enable(&mut self, name: &str) {
        if self.find(name).is_none() {
            debug!(
                target: REGISTRY_TARGET,
                config = name,
                "ignoring enable of unknown configuration"
            );
            return;
        }
        self.disabled_names.remove(name);
        self.enabled_names.insert(name.to_owned());
        debug!(target: REGISTRY_TARGET, config = name, "enabled configuration");
    }

    /// Disables `name` globally. Unknown names are ignored.
    pub fn disable(&mut self, name: &str) {
        if self.find(name).is_none() {
            debug!(
                target: REGISTRY_TARGET,
                config = name,
                "ignoring disable of unknown configuration"
            );
            return;
        }
        self.enabled_names.remove(name);
        self.disabled_names.insert(name.to_owned());
        debug!(target: REGISTRY_TARGET, config = name, "disabled configuration");
    }

    /// Whether `name` is registered and currently enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.find(name)
            .is_some_and(|(origin, config)| self.effective_enabled(origin, config))
    }

    fn effective_enabled(&self, origin: ConfigOrigin, config: &ClientConfig) -> bool {
        let name = config.name();
        let declared = origin == ConfigOrigin::BuiltIn && config.enabled();
        !self.disabled_names.contains(name) && (declared || self.enabled_names.contains(name))
    }

    fn effective(&self, origin: ConfigOrigin, config: &ClientConfig) -> ClientConfig {
        config
            .clone()
            .with_enabled(self.effective_enabled(origin, config))
    }

    /// Returns the configuration registered as `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ClientConfig> {
        self.find(name)
            .map(|(origin, config)| self.effective(origin, config))
    }

    /// Every configuration, built-ins first, each in registration order.
    ///
    /// The `enabled` flag of each returned value reflects the registry state.
    #[must_use]
    pub fn all(&self) -> Vec<ClientConfig> {
        self.declared()
            .map(|(origin, config)| self.effective(origin, config))
            .collect()
    }

    /// Built-in configurations only, in registration order.
    #[must_use]
    pub fn defaults(&self) -> Vec<ClientConfig> {
        self.defaults
            .iter()
            .map(|config| self.effective(ConfigOrigin::BuiltIn, config))
            .collect()
    }

    /// Applies one project's overrides to [`Self::all`].
    #[must_use]
    pub fn resolve_session(&self, overrides: &ProjectOverrides) -> Vec<ClientConfig> {
        resolve_configs(self.all(), overrides)
    }

    /// Whether any registered configuration could serve `syntax`.
    #[must_use]
    pub fn supports_syntax(&self, syntax: &str) -> bool {
        self.declared()
            .any(|(_, config)| config_supports_syntax(config, syntax))
    }

    /// Whether a built-in configuration could serve `syntax`.
    #[must_use]
    pub fn defaults_support_syntax(&self, syntax: &str) -> bool {
        self.defaults
            .iter()
            .any(|config| config_supports_syntax(config, syntax))
    }

    /// Number of registered configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defaults.len() + self.user_added.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.user_added.is_empty()
    }
}
