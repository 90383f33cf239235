//! Recording scope context used in tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::context::{Point, ScopeContext};

/// Test double that scores selectors from a table and records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    syntax: String,
    selection: Option<Point>,
    scores: HashMap<String, u32>,
    positioned: HashMap<(Point, String), u32>,
    calls: RefCell<Vec<(Point, String)>>,
}

impl RecordingContext {
    /// Creates a context for a document with the given syntax identifier.
    pub fn new(syntax: impl Into<String>) -> Self {
        Self {
            syntax: syntax.into(),
            ..Self::default()
        }
    }

    /// Places the primary selection at `point`.
    pub fn with_selection(mut self, point: Point) -> Self {
        self.selection = Some(point);
        self
    }

    /// Scores `selector` at every position.
    pub fn with_score(mut self, selector: &str, score: u32) -> Self {
        self.scores.insert(selector.to_owned(), score);
        self
    }

    /// Scores `selector` at `point` only, taking precedence over
    /// [`Self::with_score`].
    pub fn with_score_at(mut self, point: Point, selector: &str, score: u32) -> Self {
        self.positioned.insert((point, selector.to_owned()), score);
        self
    }

    /// Adds or replaces a score on an existing context.
    pub fn set_score(&mut self, selector: &str, score: u32) {
        self.scores.insert(selector.to_owned(), score);
    }

    /// Selectors scored so far, in call order.
    pub fn scored_selectors(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, selector)| selector.clone())
            .collect()
    }

    /// Positions scored so far, in call order.
    pub fn scored_positions(&self) -> Vec<Point> {
        self.calls.borrow().iter().map(|(point, _)| *point).collect()
    }
}

impl ScopeContext for RecordingContext {
    fn syntax(&self) -> &str {
        self.syntax.as_str()
    }

    fn primary_position(&self) -> Option<Point> {
        self.selection
    }

    fn score_selector(&self, position: Point, selector: &str) -> u32 {
        self.calls
            .borrow_mut()
            .push((position, selector.to_owned()));
        self.positioned
            .get(&(position, selector.to_owned()))
            .or_else(|| self.scores.get(selector))
            .copied()
            .unwrap_or(0)
    }
}
