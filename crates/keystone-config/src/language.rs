//! Language bindings declared by a server configuration.

use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

const LANGUAGE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::language");

/// One language served by a client configuration.
///
/// A binding names the scope selectors it claims (scored against the
/// document at a position) and the syntax names it matches by identifier.
/// Bindings are immutable once built, so the syntax matcher is compiled on
/// first use and kept for the life of the binding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageConfig {
    #[serde(rename = "languageId")]
    id: String,
    #[serde(default)]
    scopes: Vec<String>,
    #[serde(default)]
    syntaxes: Vec<String>,
    #[serde(skip)]
    syntax_matcher: OnceCell<Option<Regex>>,
}

impl PartialEq for LanguageConfig {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.scopes == other.scopes && self.syntaxes == other.syntaxes
    }
}

impl Eq for LanguageConfig {}

impl LanguageConfig {
    /// Creates a binding for `id` with the given selectors and syntax names.
    #[must_use]
    pub fn new(id: impl Into<String>, scopes: Vec<String>, syntaxes: Vec<String>) -> Self {
        Self {
            id: id.into(),
            scopes,
            syntaxes,
            syntax_matcher: OnceCell::new(),
        }
    }

    /// Language identifier reported to the server (e.g. `python`).
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Scope selectors in declaration order.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        self.scopes.as_slice()
    }

    /// Syntax name patterns in declaration order.
    #[must_use]
    pub fn syntaxes(&self) -> &[String] {
        self.syntaxes.as_slice()
    }

    /// Case-insensitive matcher for any syntax name as a whole word.
    ///
    /// Names are matched literally. `None` when the binding declares no
    /// syntax names: such a binding deliberately matches no document,
    /// where an empty alternation would match every one.
    #[must_use]
    pub fn syntax_matcher(&self) -> Option<&Regex> {
        self.syntax_matcher
            .get_or_init(|| self.compile_syntax_matcher())
            .as_ref()
    }

    fn compile_syntax_matcher(&self) -> Option<Regex> {
        if self.syntaxes.is_empty() {
            return None;
        }

        let pattern = self
            .syntaxes
            .iter()
            .map(|name| format!(r"\b{}\b", regex::escape(name)))
            .collect::<Vec<_>>()
            .join("|");

        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|error| {
                warn!(
                    target: LANGUAGE_TARGET,
                    language = self.id.as_str(),
                    %error,
                    "syntax names could not be compiled into a matcher"
                );
            })
            .ok()
    }
}
