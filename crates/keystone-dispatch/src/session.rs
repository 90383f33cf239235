//! Per-session views of the effective configuration list.
//!
//! A session (one editor window) sees the global registry through its
//! project's overrides. [`SessionConfigManager`] computes that effective list
//! lazily on the first query and afterwards only replaces it when told to:
//! it never watches the registry. Callers that mutate the registry or the
//! project overrides must call [`SessionConfigManager::update`] or
//! [`SessionConfigManager::refresh`] on every live manager that should see
//! the change.

use std::collections::BTreeMap;

use keystone_config::{ClientConfig, LanguageConfig, ProjectOverrides};
use tracing::debug;

use crate::context::{Point, ScopeContext};
use crate::matcher::best_match;
use crate::registry::{SharedRegistry, global};
use crate::syntax::{config_supports_syntax, syntax_language};

const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Ready effective configuration list for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfigs {
    configs: Vec<ClientConfig>,
}

impl SessionConfigs {
    /// Wraps an effective configuration list.
    #[must_use]
    pub const fn new(configs: Vec<ClientConfig>) -> Self {
        Self { configs }
    }

    /// Effective configurations in registry order.
    #[must_use]
    pub fn configs(&self) -> &[ClientConfig] {
        self.configs.as_slice()
    }

    /// Whether some enabled configuration applies at the primary selection.
    #[must_use]
    pub fn is_supported<C>(&self, context: &C) -> bool
    where
        C: ScopeContext + ?Sized,
    {
        self.scope_config(context, None).is_some()
    }

    /// The configuration governing `position`, or the primary selection when
    /// `position` is `None`.
    #[must_use]
    pub fn scope_config<C>(&self, context: &C, position: Option<Point>) -> Option<&ClientConfig>
    where
        C: ScopeContext + ?Sized,
    {
        best_match(&self.configs, context, position)
    }

    /// Configurations whose syntax names are compatible with the document.
    #[must_use]
    pub fn configs_for_context<C>(&self, context: &C) -> Vec<&ClientConfig>
    where
        C: ScopeContext + ?Sized,
    {
        let syntax = context.syntax();
        self.configs
            .iter()
            .filter(|config| config_supports_syntax(config, syntax))
            .collect()
    }

    /// Whether any configuration is compatible with the document's syntax.
    #[must_use]
    pub fn syntax_supported<C>(&self, context: &C) -> bool
    where
        C: ScopeContext + ?Sized,
    {
        let syntax = context.syntax();
        self.configs
            .iter()
            .any(|config| config_supports_syntax(config, syntax))
    }

    /// The first syntax-compatible language of each configuration, keyed by
    /// configuration name.
    #[must_use]
    pub fn language_bindings_for_context<C>(
        &self,
        context: &C,
    ) -> BTreeMap<&str, &LanguageConfig>
    where
        C: ScopeContext + ?Sized,
    {
        let syntax = context.syntax();
        self.configs
            .iter()
            .filter_map(|config| {
                syntax_language(config, syntax).map(|language| (config.name(), language))
            })
            .collect()
    }
}

/// Lazily-initialised, push-updated configuration state for one session.
#[derive(Debug, Clone)]
pub struct SessionConfigManager {
    registry: SharedRegistry,
    overrides: ProjectOverrides,
    // `None` until the first query or explicit initialisation.
    configs: Option<SessionConfigs>,
}

impl SessionConfigManager {
    /// Creates an uninitialised manager for a session with `overrides`.
    #[must_use]
    pub const fn new(registry: SharedRegistry, overrides: ProjectOverrides) -> Self {
        Self {
            registry,
            overrides,
            configs: None,
        }
    }

    /// Whether the effective list has been computed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.configs.is_some()
    }

    /// Project overrides this session resolves with.
    #[must_use]
    pub const fn overrides(&self) -> &ProjectOverrides {
        &self.overrides
    }

    /// Computes the effective list if that has not happened yet.
    pub fn initialise(&mut self) -> &SessionConfigs {
        let registry = &self.registry;
        let overrides = &self.overrides;
        self.configs
            .get_or_insert_with(|| resolve(registry, overrides))
    }

    /// Replaces the effective list wholesale.
    pub fn update(&mut self, configs: Vec<ClientConfig>) {
        debug!(
            target: SESSION_TARGET,
            configs = configs.len(),
            "session configurations replaced"
        );
        self.configs = Some(SessionConfigs::new(configs));
    }

    /// Re-resolves the effective list from the registry and current overrides.
    pub fn refresh(&mut self) {
        let configs = self.registry.read(|registry| registry.resolve_session(&self.overrides));
        self.update(configs);
    }

    /// Replaces the project overrides and re-resolves.
    pub fn set_overrides(&mut self, overrides: ProjectOverrides) {
        self.overrides = overrides;
        self.refresh();
    }

    /// See [`SessionConfigs::is_supported`].
    pub fn is_supported<C>(&mut self, context: &C) -> bool
    where
        C: ScopeContext + ?Sized,
    {
        self.initialise().is_supported(context)
    }

    /// See [`SessionConfigs::scope_config`].
    pub fn scope_config<C>(&mut self, context: &C, position: Option<Point>) -> Option<ClientConfig>
    where
        C: ScopeContext + ?Sized,
    {
        self.initialise().scope_config(context, position).cloned()
    }

    /// See [`SessionConfigs::configs_for_context`].
    pub fn configs_for_context<C>(&mut self, context: &C) -> Vec<ClientConfig>
    where
        C: ScopeContext + ?Sized,
    {
        self.initialise()
            .configs_for_context(context)
            .into_iter()
            .cloned()
            .collect()
    }

    /// See [`SessionConfigs::syntax_supported`].
    pub fn syntax_supported<C>(&mut self, context: &C) -> bool
    where
        C: ScopeContext + ?Sized,
    {
        self.initialise().syntax_supported(context)
    }

    /// See [`SessionConfigs::language_bindings_for_context`].
    pub fn language_bindings_for_context<C>(
        &mut self,
        context: &C,
    ) -> BTreeMap<String, LanguageConfig>
    where
        C: ScopeContext + ?Sized,
    {
        self.initialise()
            .language_bindings_for_context(context)
            .into_iter()
            .map(|(name, language)| (name.to_owned(), language.clone()))
            .collect()
    }
}

fn resolve(registry: &SharedRegistry, overrides: &ProjectOverrides) -> SessionConfigs {
    let configs = registry.read(|registry| registry.resolve_session(overrides));
    debug!(
        target: SESSION_TARGET,
        configs = configs.len(),
        overrides = overrides.len(),
        "session configurations resolved"
    );
    SessionConfigs::new(configs)
}

/// Creates session managers bound to one registry.
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    registry: SharedRegistry,
}

impl ConfigManager {
    /// Creates a factory for sessions over `registry`.
    #[must_use]
    pub const fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Creates a factory over the process-wide registry.
    #[must_use]
    pub fn global() -> Self {
        Self::new(global().clone())
    }

    /// Registry the created sessions resolve against.
    #[must_use]
    pub const fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Creates an uninitialised manager for a session with `overrides`.
    #[must_use]
    pub fn for_session(&self, overrides: ProjectOverrides) -> SessionConfigManager {
        SessionConfigManager::new(self.registry.clone(), overrides)
    }
}
