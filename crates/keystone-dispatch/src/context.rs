//! Narrow view of the document a resolution runs against.

/// Character offset into a document.
pub type Point = usize;

/// Document capabilities consumed by the resolver.
///
/// Editors implement this over their view objects. The resolver never parses
/// selectors itself: it aggregates whatever [`ScopeContext::score_selector`]
/// reports.
pub trait ScopeContext {
    /// Syntax identifier of the document, such as
    /// `Packages/Python/Python.sublime-syntax`.
    fn syntax(&self) -> &str;

    /// Start of the primary selection, when the view has one.
    fn primary_position(&self) -> Option<Point>;

    /// Specificity of `selector` at `position`. Zero means no match.
    fn score_selector(&self, position: Point, selector: &str) -> u32;
}

impl<T: ScopeContext + ?Sized> ScopeContext for &T {
    fn syntax(&self) -> &str {
        (**self).syntax()
    }

    fn primary_position(&self) -> Option<Point> {
        (**self).primary_position()
    }

    fn score_selector(&self, position: Point, selector: &str) -> u32 {
        (**self).score_selector(position, selector)
    }
}
