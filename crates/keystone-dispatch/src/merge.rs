//! Merging project overrides onto global configurations.

use keystone_config::{ClientConfig, Override, ProjectOverrides};
use tracing::debug;

const MERGE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::merge");

/// Derives the effective configuration for `base` under `overrides`.
///
/// Each overridable field takes the override's value when present and the
/// base's value otherwise. Language bindings always come from `base`.
/// Fields that are not overridden are shared with `base`, not copied.
#[must_use]
pub fn apply_overrides(base: &ClientConfig, overrides: &Override) -> ClientConfig {
    let mut effective = base.clone();
    if let Some(command) = overrides.command() {
        effective = effective.with_binary_args(command.clone());
    }
    if let Some(tcp_port) = overrides.tcp_port() {
        effective = effective.with_tcp_port(tcp_port);
    }
    if let Some(enabled) = overrides.enabled() {
        effective = effective.with_enabled(enabled);
    }
    if let Some(init_options) = overrides.init_options() {
        effective = effective.with_init_options(init_options.clone());
    }
    if let Some(settings) = overrides.settings() {
        effective = effective.with_settings(settings.clone());
    }
    if let Some(env) = overrides.env() {
        effective = effective.with_env(env.clone());
    }
    effective
}

/// Applies `overrides` to each configuration in order.
///
/// Configurations without an override entry pass through unchanged. The
/// output order is the input order.
#[must_use]
pub fn resolve_configs(
    configs: impl IntoIterator<Item = ClientConfig>,
    overrides: &ProjectOverrides,
) -> Vec<ClientConfig> {
    configs
        .into_iter()
        .map(|config| match overrides.get(config.name()) {
            Some(entry) => {
                debug!(
                    target: MERGE_TARGET,
                    config = config.name(),
                    enabled = ?entry.enabled(),
                    "applying project override"
                );
                apply_overrides(&config, entry)
            }
            None => config,
        })
        .collect()
}
