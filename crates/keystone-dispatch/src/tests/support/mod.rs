//! Shared fixtures and helpers for dispatch tests.

mod recording_context;

use keystone_config::{ClientConfig, LanguageConfig};
use rstest::fixture;

pub use recording_context::RecordingContext;

/// Syntax identifier used by the Python fixtures.
pub const PYTHON_SYNTAX: &str = "Packages/Python/Python.sublime-syntax";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

/// Builds a language binding.
#[must_use]
pub fn language(id: &str, scopes: &[&str], syntaxes: &[&str]) -> LanguageConfig {
    LanguageConfig::new(id, strings(scopes), strings(syntaxes))
}

/// Builds an enabled configuration with one language claiming `scopes` and
/// serving the Python syntax.
#[must_use]
pub fn client(name: &str, scopes: &[&str]) -> ClientConfig {
    ClientConfig::new(name, strings(&[name])).with_languages(vec![language(
        name,
        scopes,
        &["Python"],
    )])
}

/// Python configuration claiming `source.python`.
#[fixture]
pub fn python_client() -> ClientConfig {
    client("python", &["source.python"])
}

/// Django configuration claiming `source.python.django`.
#[fixture]
pub fn django_client() -> ClientConfig {
    client("django", &["source.python.django"])
}

/// Cursor inside a Django template where the Python selector scores 8 and the
/// Django selector scores 16.
#[fixture]
pub fn django_context() -> RecordingContext {
    RecordingContext::new(PYTHON_SYNTAX)
        .with_selection(10)
        .with_score("source.python", 8)
        .with_score("source.python.django", 16)
}
