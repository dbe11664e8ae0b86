//! Order identifiers

use std::{fmt, ops::RangeInclusive};

use jiff::civil::DateTime;
use rand::Rng;

/// Prefix shared by every order identifier.
pub const ORDER_ID_PREFIX: &str = "HC";

/// Range the random order suffix is drawn from.
pub const SUFFIX_RANGE: RangeInclusive<u16> = 1000..=9999;

/// Source of the four-digit suffix that follows the timestamp in an order id.
pub trait SuffixSource {
    /// Draw the next suffix, in [`SUFFIX_RANGE`].
    fn next_suffix(&mut self) -> u16;
}

impl<R: Rng + ?Sized> SuffixSource for R {
    fn next_suffix(&mut self) -> u16 {
        self.gen_range(SUFFIX_RANGE)
    }
}

/// Always yields the same suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSuffix(u16);

impl FixedSuffix {
    /// Create a fixed suffix source, or `None` if `suffix` is not four digits.
    #[must_use]
    pub fn new(suffix: u16) -> Option<Self> {
        SUFFIX_RANGE.contains(&suffix).then_some(FixedSuffix(suffix))
    }
}

impl SuffixSource for FixedSuffix {
    fn next_suffix(&mut self) -> u16 {
        self.0
    }
}

/// `HC-<YYYYMMDDHHMMSS>-<NNNN>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Generate an id for an order placed at `now`.
    pub fn generate(now: DateTime, source: &mut impl SuffixSource) -> Self {
        let suffix = source.next_suffix();

        OrderId(format!(
            "{ORDER_ID_PREFIX}-{}-{suffix:04}",
            now.strftime("%Y%m%d%H%M%S")
        ))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
