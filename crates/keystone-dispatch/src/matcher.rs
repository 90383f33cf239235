//! Scope-specificity selection of the configuration for a position.
//!
//! Every scope selector of every language of every eligible candidate is
//! scored at the position; the highest score wins. Candidates, languages and
//! selectors are visited in declaration order and only a strictly higher
//! score displaces the current best, so the earliest candidate wins ties.
//! A score of zero never selects anything.

use keystone_config::ClientConfig;
use tracing::trace;

use crate::context::{Point, ScopeContext};
use crate::registry::ConfigRegistry;

const MATCHER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::matcher");

/// Winning candidate together with the score that selected it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopeMatch<'a> {
    /// Selected configuration.
    pub config: &'a ClientConfig,
    /// Highest selector score the configuration reached.
    pub score: u32,
}

/// Picks the enabled candidate whose selectors best match `context`.
///
/// When `position` is `None` the context's primary selection is used; a
/// context without a selection matches nothing. Disabled candidates are
/// skipped before scoring.
#[must_use]
pub fn best_match<'a, C>(
    candidates: &'a [ClientConfig],
    context: &C,
    position: Option<Point>,
) -> Option<&'a ClientConfig>
where
    C: ScopeContext + ?Sized,
{
    best_scored_match(candidates, context, position).map(|found| found.config)
}

/// Like [`best_match`], but also reports the winning score.
#[must_use]
pub fn best_scored_match<'a, C>(
    candidates: &'a [ClientConfig],
    context: &C,
    position: Option<Point>,
) -> Option<ScopeMatch<'a>>
where
    C: ScopeContext + ?Sized,
{
    select(
        candidates.iter().filter(|config| config.enabled()),
        context,
        position,
    )
}

/// Runs the matcher over every enabled configuration in `registry`.
///
/// Used before any project or session context exists.
#[must_use]
pub fn best_match_global<C>(registry: &ConfigRegistry, context: &C) -> Option<ClientConfig>
where
    C: ScopeContext + ?Sized,
{
    let candidates = registry.all();
    best_match(&candidates, context, None).cloned()
}

/// Runs the matcher over the enabled built-in configurations only.
#[must_use]
pub fn best_match_default<C>(registry: &ConfigRegistry, context: &C) -> Option<ClientConfig>
where
    C: ScopeContext + ?Sized,
{
    let candidates = registry.defaults();
    best_match(&candidates, context, None).cloned()
}

/// Runs the matcher over every registered configuration, enabled or not.
///
/// This finds the configuration a user could switch on for the document,
/// which [`best_match_global`] cannot report while it is disabled.
#[must_use]
pub fn best_match_available<C>(registry: &ConfigRegistry, context: &C) -> Option<ClientConfig>
where
    C: ScopeContext + ?Sized,
{
    let candidates = registry.all();
    select(candidates.iter(), context, None).map(|found| found.config.clone())
}

fn select<'a, C>(
    candidates: impl IntoIterator<Item = &'a ClientConfig>,
    context: &C,
    position: Option<Point>,
) -> Option<ScopeMatch<'a>>
where
    C: ScopeContext + ?Sized,
{
    let Some(position) = position.or_else(|| context.primary_position()) else {
        trace!(target: MATCHER_TARGET, "no position to match against");
        return None;
    };

    let mut best: Option<ScopeMatch<'a>> = None;
    for config in candidates {
        for language in config.languages() {
            for selector in language.scopes() {
                let score = context.score_selector(position, selector);
                let best_score = best.map_or(0, |found| found.score);
                if score > best_score {
                    best = Some(ScopeMatch { config, score });
                }
            }
        }
    }

    trace!(
        target: MATCHER_TARGET,
        position,
        config = best.map(|found| found.config.name()),
        score = best.map(|found| found.score),
        "resolved scope configuration"
    );
    best
}
