use crate::coerce::coerce_int;

/// Options for [`coerce_bounded_int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsOptions {
    /// Value used when the raw input is absent or invalid and no override is set.
    pub fallback: i64,
    /// Lower clamp. `Some(0)` is treated the same as `None`.
    pub min: Option<i64>,
    /// Programmatic value that replaces `fallback`. A valid raw input still wins.
    pub options_override: Option<i64>,
}

impl BoundsOptions {
    /// Options with only a fallback.
    #[must_use]
    pub const fn new(fallback: i64) -> Self {
        Self {
            fallback,
            min: None,
            options_override: None,
        }
    }

    /// Set the lower clamp.
    #[must_use]
    pub const fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set (or clear) the programmatic override.
    #[must_use]
    pub const fn with_override(mut self, options_override: Option<i64>) -> Self {
        self.options_override = options_override;
        self
    }

    /// The value used when raw input does not parse.
    #[must_use]
    pub const fn effective_fallback(&self) -> i64 {
        match self.options_override {
            Some(v) => v,
            None => self.fallback,
        }
    }

    /// The clamp actually applied. A zero minimum is not a clamp.
    #[must_use]
    pub const fn effective_min(&self) -> Option<i64> {
        match self.min {
            Some(0) | None => None,
            Some(m) => Some(m),
        }
    }
}

/// Coerce `raw` to an integer with override and lower-bound handling.
///
/// Precedence is valid raw input, then `options_override`, then `fallback`.
/// Whatever wins is raised to `min` when `min` is set and non-zero.
///
/// ```rust
/// use vexil_env::{BoundsOptions, coerce_bounded_int};
///
/// let opts = BoundsOptions::new(10).with_min(20);
/// assert_eq!(coerce_bounded_int(Some("50"), &opts), 50);
/// assert_eq!(coerce_bounded_int(Some("5"), &opts), 20);
///
/// let opts = BoundsOptions::new(10).with_override(Some(99));
/// assert_eq!(coerce_bounded_int(None, &opts), 99);
/// ```
#[must_use]
pub fn coerce_bounded_int(raw: Option<&str>, options: &BoundsOptions) -> i64 {
    let parsed = coerce_int(raw, options.effective_fallback());

    match options.effective_min() {
        Some(min) => parsed.max(min),
        None => parsed,
    }
}
