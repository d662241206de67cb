//! Bar scaling.
//!
//! Bar length for value `v` is `(v - min) * width / range`, with a floor of
//! one cell so the minimum stays visible. `range` is `max - min`, or 1 when
//! every value is equal.

use crate::{Bounds, StackPair};

/// Linear value-to-length mapping shared by both columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    min: i64,
    range: i64,
}

impl Scale {
    /// Scale over `bounds`. Empty bounds give a unit range at zero.
    pub fn new(bounds: Option<Bounds>) -> Self {
        bounds.map_or(Self { min: 0, range: 1 }, |b| {
            let range = i64::from(b.max) - i64::from(b.min);
            Self { min: i64::from(b.min), range: range.max(1) }
        })
    }

    /// Scale for the current contents of `stacks`.
    pub fn for_pair(stacks: &StackPair) -> Self {
        Self::new(stacks.scale_bounds())
    }

    /// Bar length for `value` when the longest bar is `width` cells.
    pub fn bar_len(&self, value: i32, width: u16) -> u16 {
        let offset = (i64::from(value) - self.min).clamp(0, self.range);
        let len = offset * i64::from(width) / self.range;
        u16::try_from(len).unwrap_or(width).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_full_width() {
        let scale = Scale::new(Some(Bounds { min: 0, max: 100 }));
        assert_eq!(scale.bar_len(100, 50), 50);
        assert_eq!(scale.bar_len(50, 50), 25);
    }

    #[test]
    fn minimum_is_still_visible() {
        let scale = Scale::new(Some(Bounds { min: -10, max: 10 }));
        assert_eq!(scale.bar_len(-10, 40), 1);
    }

    #[test]
    fn degenerate_range_does_not_divide_by_zero() {
        let scale = Scale::new(Some(Bounds::point(7)));
        assert_eq!(scale.bar_len(7, 30), 1);

        let scale = Scale::new(None);
        assert_eq!(scale.bar_len(0, 30), 1);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let scale = Scale::new(Some(Bounds { min: i32::MIN, max: i32::MAX }));
        assert_eq!(scale.bar_len(i32::MAX, 1000), 1000);
        assert_eq!(scale.bar_len(i32::MIN, 1000), 1);
    }

    #[test]
    fn follows_combined_bounds_once_b_is_populated() {
        let mut stacks = StackPair::new([0, 10, 20]);
        assert_eq!(Scale::for_pair(&stacks).bar_len(20, 10), 10);

        stacks.apply(crate::Command::Pb);
        stacks.apply(crate::Command::Ra);
        assert_eq!(Scale::for_pair(&stacks).bar_len(10, 10), 5);
    }
}
