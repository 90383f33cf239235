//! Built-in client configurations.
//!
//! Only `pyls` ships enabled; the rest must be switched on globally or per
//! project once the user has installed the server.

use crate::client::ClientConfig;
use crate::language::LanguageConfig;

/// Name of the built-in Python configuration.
pub const PYLS: &str = "pyls";

/// Returns the built-in configurations in their canonical order.
#[must_use]
pub fn default_clients() -> Vec<ClientConfig> {
    vec![
        ClientConfig::new(PYLS, strings(&["pyls"])).with_languages(vec![LanguageConfig::new(
            "python",
            strings(&["source.python"]),
            strings(&[
                "Packages/Python/Python.sublime-syntax",
                "Packages/MagicPython/grammars/MagicPython.tmLanguage",
                "Packages/Djaneiro/Syntaxes/Python Django.tmLanguage",
            ]),
        )]),
        ClientConfig::new("rls", strings(&["rustup", "run", "nightly", "rls"]))
            .with_languages(vec![LanguageConfig::new(
                "rust",
                strings(&["source.rust"]),
                strings(&[
                    "Packages/Rust/Rust.sublime-syntax",
                    "Packages/Rust Enhanced/RustEnhanced.sublime-syntax",
                ]),
            )])
            .with_enabled(false),
        ClientConfig::new("clangd", strings(&["clangd"]))
            .with_languages(vec![
                LanguageConfig::new(
                    "c",
                    strings(&["source.c"]),
                    strings(&["Packages/C++/C.sublime-syntax"]),
                ),
                LanguageConfig::new(
                    "cpp",
                    strings(&["source.c++"]),
                    strings(&["Packages/C++/C++.sublime-syntax"]),
                ),
            ])
            .with_enabled(false),
        ClientConfig::new("gopls", strings(&["gopls"]))
            .with_languages(vec![LanguageConfig::new(
                "go",
                strings(&["source.go"]),
                strings(&[
                    "Packages/Go/Go.sublime-syntax",
                    "Packages/GoSublime/syntax/GoSublime-Go.tmLanguage",
                ]),
            )])
            .with_enabled(false),
        ClientConfig::new(
            "typescript-language-server",
            strings(&["typescript-language-server", "--stdio"]),
        )
        .with_languages(vec![
            LanguageConfig::new(
                "javascript",
                strings(&["source.js"]),
                strings(&[
                    "Packages/JavaScript/JavaScript.sublime-syntax",
                    "Packages/Babel/JavaScript (Babel).sublime-syntax",
                ]),
            ),
            LanguageConfig::new(
                "typescript",
                strings(&["source.ts", "source.tsx"]),
                strings(&[
                    "Packages/TypeScript-TmLanguage/TypeScript.tmLanguage",
                    "Packages/TypeScript-TmLanguage/TypeScriptReact.tmLanguage",
                ]),
            ),
        ])
        .with_enabled(false),
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn only_pyls_is_enabled_by_default() {
        let enabled: Vec<String> = default_clients()
            .iter()
            .filter(|config| config.enabled())
            .map(|config| config.name().to_owned())
            .collect();

        assert_eq!(enabled, [PYLS]);
    }

    #[test]
    fn default_names_are_unique() {
        let clients = default_clients();
        let names: BTreeSet<&str> = clients.iter().map(ClientConfig::name).collect();

        assert_eq!(names.len(), clients.len());
    }

    #[test]
    fn every_default_declares_a_language() {
        for config in default_clients() {
            assert!(
                !config.languages().is_empty(),
                "{} should declare a language",
                config.name()
            );
        }
    }
}
