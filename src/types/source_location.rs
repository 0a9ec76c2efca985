use alloc::sync::Arc;

use crate::types::ErrorLocationProvider;

/// A span of markup text that a token, AST node or error refers to.
///
/// The input is shared between every location produced by one parse, so
/// cloning a location is cheap. Offsets are byte offsets; `[start, end)` is
/// the covered range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// The markup the parser was given.
    pub input: Arc<str>,
    /// Zero-based inclusive start offset in bytes.
    pub start: usize,
    /// Zero-based exclusive end offset in bytes.
    pub end: usize,
}

impl SourceLocation {
    /// Creates a location covering `[start, end)` of `input`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mathfield::types::SourceLocation;
    /// use std::sync::Arc;
    ///
    /// let loc = SourceLocation::new(Arc::from(r"\frac{a}{b}"), 0, 5);
    /// assert_eq!(loc.text(), r"\frac");
    /// ```
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Convenience constructor copying `input` into a fresh shared buffer.
    #[must_use]
    pub fn from_str(input: &str, start: usize, end: usize) -> Self {
        Self::new(Arc::from(input), start, end)
    }

    /// A zero-width location at `offset`, used for "expected X here" errors.
    #[must_use]
    pub const fn at(input: Arc<str>, offset: usize) -> Self {
        Self::new(input, offset, offset)
    }

    /// Start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The full input this location points into.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The covered slice of the input, or `""` when the offsets do not fall
    /// on character boundaries.
    #[must_use]
    pub fn text(&self) -> &str {
        self.input.get(self.start..self.end).unwrap_or("")
    }

    /// Merges two locations into one spanning from the start of `first` to
    /// the end of `second`.
    ///
    /// Returns whichever side is present when only one is, and `None` when
    /// both are absent or the two point into different inputs.
    #[must_use]
    pub fn range(first: Option<Self>, second: Option<Self>) -> Option<Self> {
        match (first, second) {
            (Some(fp), None) => Some(fp),
            (None, Some(sp)) => Some(sp),
            (Some(fp), Some(sp)) => {
                if !Arc::ptr_eq(&fp.input, &sp.input) {
                    return None;
                }
                Some(Self {
                    input: Arc::clone(&fp.input),
                    start: fp.start,
                    end: sp.end,
                })
            }
            (None, None) => None,
        }
    }
}

impl ErrorLocationProvider for SourceLocation {
    fn loc(&self) -> Option<&SourceLocation> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_creation() {
        let input = Arc::from(r"x^{2} + \alpha");
        let loc = SourceLocation::new(Arc::clone(&input), 8, 14);

        assert_eq!(loc.start(), 8);
        assert_eq!(loc.end(), 14);
        assert_eq!(loc.text(), r"\alpha");
        assert_eq!(loc.input(), r"x^{2} + \alpha");
    }

    #[test]
    fn test_zero_width_location() {
        let loc = SourceLocation::at(Arc::from("abc"), 3);
        assert_eq!(loc.start(), loc.end());
        assert_eq!(loc.text(), "");
    }

    #[test]
    fn test_range_method() {
        let input = Arc::from("test input");

        let loc1 = SourceLocation::new(Arc::clone(&input), 0, 4);
        let result = SourceLocation::range(Some(loc1.clone()), None);
        assert_eq!(result.as_ref().map(SourceLocation::end), Some(4));

        let loc2 = SourceLocation::new(Arc::clone(&input), 5, 10);
        let result = SourceLocation::range(Some(loc1.clone()), Some(loc2));
        assert_eq!(result.map(|l| (l.start(), l.end())), Some((0, 10)));

        let other = SourceLocation::from_str("different input", 0, 3);
        assert!(SourceLocation::range(Some(loc1), Some(other)).is_none());
    }
}
