//! Project-scoped overrides for client configurations.
//!
//! Projects adjust global configurations through the `LSP` section of their
//! settings: one entry per configuration name, each carrying any subset of
//! `command`, `tcp_port`, `enabled`, `initializationOptions`, `settings` and
//! `env`. Absent fields fall through to the global value. Language bindings
//! cannot be overridden.
//!
//! Parsing happens here so that a malformed override is rejected before it
//! reaches the resolver.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::client::{EnvMap, JsonMap};
use crate::error::ConfigError;

/// Partial configuration applied on top of a global configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Override {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<Arc<[String]>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    tcp_port: Option<Option<u16>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(
        default,
        rename = "initializationOptions",
        skip_serializing_if = "Option::is_none"
    )]
    init_options: Option<Arc<JsonMap>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    settings: Option<Arc<JsonMap>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    env: Option<Arc<EnvMap>>,
}

// A key that is present with `null` still counts as present.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Override {
    /// Creates an override that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the launch command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<Arc<[String]>>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Overrides the TCP port; `None` clears it.
    #[must_use]
    pub const fn with_tcp_port(mut self, tcp_port: Option<u16>) -> Self {
        self.tcp_port = Some(tcp_port);
        self
    }

    /// Overrides the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Overrides `initializationOptions`.
    #[must_use]
    pub fn with_init_options(mut self, init_options: impl Into<Arc<JsonMap>>) -> Self {
        self.init_options = Some(init_options.into());
        self
    }

    /// Overrides the server settings payload.
    #[must_use]
    pub fn with_settings(mut self, settings: impl Into<Arc<JsonMap>>) -> Self {
        self.settings = Some(settings.into());
        self
    }

    /// Overrides the process environment.
    #[must_use]
    pub fn with_env(mut self, env: impl Into<Arc<EnvMap>>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Command override, when present.
    #[must_use]
    pub const fn command(&self) -> Option<&Arc<[String]>> {
        self.command.as_ref()
    }

    /// TCP port override, when present. The inner `None` clears the port.
    #[must_use]
    pub const fn tcp_port(&self) -> Option<Option<u16>> {
        self.tcp_port
    }

    /// Enabled override, when present.
    #[must_use]
    pub const fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// `initializationOptions` override, when present.
    #[must_use]
    pub const fn init_options(&self) -> Option<&Arc<JsonMap>> {
        self.init_options.as_ref()
    }

    /// Settings override, when present.
    #[must_use]
    pub const fn settings(&self) -> Option<&Arc<JsonMap>> {
        self.settings.as_ref()
    }

    /// Environment override, when present.
    #[must_use]
    pub const fn env(&self) -> Option<&Arc<EnvMap>> {
        self.env.as_ref()
    }

    /// Returns `true` when no field is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.command.is_none()
            && self.tcp_port.is_none()
            && self.enabled.is_none()
            && self.init_options.is_none()
            && self.settings.is_none()
            && self.env.is_none()
    }
}

/// Overrides for one project, keyed by configuration name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ProjectOverrides {
    overrides: BTreeMap<String, Override>,
}

impl ProjectOverrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from a project data document.
    ///
    /// Overrides live under `settings.LSP`; a document without that section
    /// has no overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotAnObject`] when `settings` or `settings.LSP`
    /// is not an object, and [`ConfigError::MalformedOverride`] when an entry
    /// has fields of the wrong shape.
    pub fn from_project_data(data: &Value) -> Result<Self, ConfigError> {
        let Some(settings) = data.get("settings") else {
            return Ok(Self::default());
        };
        if !settings.is_object() {
            return Err(ConfigError::NotAnObject {
                section: String::from("settings"),
            });
        }
        match settings.get("LSP") {
            Some(section) => Self::from_section(section, "settings.LSP"),
            None => Ok(Self::default()),
        }
    }

    /// Parses a project data document and reads its overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid JSON and otherwise the
    /// errors of [`Self::from_project_data`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let data: Value = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        Self::from_project_data(&data)
    }

    /// Reads overrides from the `LSP` section itself.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotAnObject`] when `section` is not an object
    /// and [`ConfigError::MalformedOverride`] for ill-shaped entries.
    pub fn from_lsp_section(section: &Value) -> Result<Self, ConfigError> {
        Self::from_section(section, "LSP")
    }

    fn from_section(section: &Value, path: &str) -> Result<Self, ConfigError> {
        let entries = section.as_object().ok_or_else(|| ConfigError::NotAnObject {
            section: path.to_owned(),
        })?;

        let mut overrides = BTreeMap::new();
        for (name, raw) in entries {
            let entry = Override::deserialize(raw).map_err(|source| {
                ConfigError::MalformedOverride {
                    name: name.clone(),
                    source,
                }
            })?;
            overrides.insert(name.clone(), entry);
        }
        Ok(Self { overrides })
    }

    /// Returns the override for `name`, when present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Override> {
        self.overrides.get(name)
    }

    /// Stores an override, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, entry: Override) -> Option<Override> {
        self.overrides.insert(name.into(), entry)
    }

    /// Enables `name` for this project only.
    pub fn enable(&mut self, name: &str) {
        self.set_enabled(name, true);
    }

    /// Disables `name` for this project only.
    pub fn disable(&mut self, name: &str) {
        self.set_enabled(name, false);
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) {
        self.overrides.entry(name.to_owned()).or_default().enabled = Some(enabled);
    }

    /// Iterates overrides ordered by configuration name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Override)> {
        self.overrides
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of configurations with an override.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Returns `true` when the project overrides nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl FromIterator<(String, Override)> for ProjectOverrides {
    fn from_iter<I: IntoIterator<Item = (String, Override)>>(iter: I) -> Self {
        Self {
            overrides: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_fields_stay_absent() {
        let entry: Override =
            serde_json::from_value(json!({"enabled": false})).expect("override should parse");

        assert_eq!(entry.enabled(), Some(false));
        assert!(entry.command().is_none());
        assert!(entry.tcp_port().is_none());
        assert!(entry.init_options().is_none());
    }

    #[test]
    fn null_tcp_port_is_a_present_value() {
        let entry: Override =
            serde_json::from_value(json!({"tcp_port": null})).expect("override should parse");

        assert_eq!(entry.tcp_port(), Some(None));
    }

    #[test]
    fn reads_overrides_from_project_settings() {
        let data = json!({
            "folders": [{"path": "."}],
            "settings": {
                "LSP": {
                    "pyls": {"enabled": false},
                    "rls": {"command": ["rls", "--verbose"], "env": {"RUST_LOG": "info"}}
                }
            }
        });
        let overrides = ProjectOverrides::from_project_data(&data).expect("overrides should parse");

        assert_eq!(overrides.len(), 2);
        assert_eq!(
            overrides.get("pyls").and_then(Override::enabled),
            Some(false)
        );
        let rls = overrides.get("rls").expect("rls override");
        assert_eq!(
            rls.command().map(|command| command.to_vec()),
            Some(vec![String::from("rls"), String::from("--verbose")])
        );
    }

    #[test]
    fn project_without_lsp_section_has_no_overrides() {
        let overrides = ProjectOverrides::from_project_data(&json!({"settings": {"tab_size": 4}}))
            .expect("overrides should parse");
        assert!(overrides.is_empty());

        let overrides =
            ProjectOverrides::from_project_data(&json!({})).expect("overrides should parse");
        assert!(overrides.is_empty());
    }

    #[test]
    fn rejects_malformed_override_by_name() {
        let data = json!({"settings": {"LSP": {"pyls": {"enabled": "yes"}}}});
        let error =
            ProjectOverrides::from_project_data(&data).expect_err("string flag should fail");

        assert!(matches!(error, ConfigError::MalformedOverride { .. }));
        assert_eq!(error.config_name(), Some("pyls"));
    }

    #[test]
    fn rejects_non_object_lsp_section() {
        let data = json!({"settings": {"LSP": ["pyls"]}});
        let error = ProjectOverrides::from_project_data(&data).expect_err("array should fail");

        match error {
            ConfigError::NotAnObject { section } => assert_eq!(section, "settings.LSP"),
            other => panic!("expected NotAnObject, got {other:?}"),
        }
    }

    #[test]
    fn enable_and_disable_keep_other_fields() {
        let mut overrides = ProjectOverrides::new();
        overrides.insert("rls", Override::new().with_tcp_port(Some(9000)));

        overrides.disable("rls");
        overrides.enable("pyls");

        let rls = overrides.get("rls").expect("rls override");
        assert_eq!(rls.enabled(), Some(false));
        assert_eq!(rls.tcp_port(), Some(Some(9000)));
        assert_eq!(
            overrides.get("pyls").and_then(Override::enabled),
            Some(true)
        );
    }

    #[test]
    fn serialises_only_present_fields() {
        let mut overrides = ProjectOverrides::new();
        overrides.disable("pyls");

        let value = serde_json::to_value(&overrides).expect("overrides should serialise");
        assert_eq!(value, json!({"pyls": {"enabled": false}}));

        let reparsed = ProjectOverrides::from_lsp_section(&value).expect("round trip");
        assert_eq!(reparsed, overrides);
    }

    #[test]
    fn collects_and_iterates_in_name_order() {
        let overrides: ProjectOverrides = [
            (String::from("rls"), Override::new().with_enabled(true)),
            (String::from("clangd"), Override::new().with_tcp_port(None)),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = overrides.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["clangd", "rls"]);
        assert!(overrides.iter().all(|(_, entry)| !entry.is_empty()));
    }
}
