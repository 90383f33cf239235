//! Coarse syntax-level compatibility checks.
//!
//! These answer "can this configuration ever apply to this document" by
//! looking for any declared syntax name inside the document's syntax
//! identifier, as a whole word and ignoring case. Position and selector
//! specificity play no part.

use keystone_config::{ClientConfig, LanguageConfig};

/// Whether any of `language`'s syntax names occurs in `syntax` as a word.
///
/// A binding without syntax names deliberately matches no document. The
/// binding's compiled matcher is reused across calls.
#[must_use]
pub fn language_matches_syntax(language: &LanguageConfig, syntax: &str) -> bool {
    language
        .syntax_matcher()
        .is_some_and(|matcher| matcher.is_match(syntax))
}

/// Whether any language of `config` matches `syntax`.
#[must_use]
pub fn config_supports_syntax(config: &ClientConfig, syntax: &str) -> bool {
    syntax_language(config, syntax).is_some()
}

/// The first language of `config` that matches `syntax`.
#[must_use]
pub fn syntax_language<'a>(config: &'a ClientConfig, syntax: &str) -> Option<&'a LanguageConfig> {
    config
        .languages()
        .iter()
        .find(|language| language_matches_syntax(language, syntax))
}
