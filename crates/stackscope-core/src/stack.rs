//! Stack containers and their primitive mutations.
//!
//! A [`Stack`] is an ordered sequence of integers where index 0 is the top.
//! [`StackPair`] owns the two stacks a sort trace manipulates: `A`, which
//! receives the initial values, and `B`, which starts empty.
//!
//! # Invariants
//!
//! - Every primitive is a no-op when its stack has too few elements.
//! - No operation creates, destroys or duplicates a value. The multiset union
//!   of `A` and `B` is the same after every command.
//! - [`Stack::bounds`] always describes the current contents, including after
//!   values leave or enter through a transfer.

use std::collections::VecDeque;

use crate::Command;

/// Smallest and largest value held by a non-empty stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest value.
    pub min: i32,
    /// Largest value.
    pub max: i32,
}

impl Bounds {
    /// Bounds of a single value.
    pub fn point(value: i32) -> Self {
        Self { min: value, max: value }
    }

    /// Bounds of a sequence. `None` if the sequence is empty.
    pub fn of(values: impl IntoIterator<Item = i32>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| {
            Some(acc.map_or_else(|| Self::point(v), |b: Self| b.include(v)))
        })
    }

    /// Widen to include `value`.
    pub fn include(self, value: i32) -> Self {
        Self { min: self.min.min(value), max: self.max.max(value) }
    }

    /// Smallest bounds covering both.
    pub fn merge(self, other: Self) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
}

/// Ordered integer container with the top at index 0.
///
/// Backed by a [`VecDeque`] so moving values between the two ends is O(1).
/// Capacity grows by doubling when exhausted; allocation failure aborts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: VecDeque<i32>,
    /// `None` while empty.
    bounds: Option<Bounds>,
}

impl Stack {
    /// Create an empty stack with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { values: VecDeque::with_capacity(capacity), bounds: None }
    }

    /// Create a stack from values listed top first.
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Self {
        let values: VecDeque<i32> = values.into_iter().collect();
        let bounds = Bounds::of(values.iter().copied());
        Self { values, bounds }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the stack holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values the backing storage holds without reallocating.
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Values from top to bottom.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = i32> + '_ {
        self.values.iter().copied()
    }

    /// Values from top to bottom, collected.
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Current minimum and maximum. `None` if empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Exchange the two topmost values.
    pub fn swap(&mut self) {
        if self.values.len() >= 2 {
            self.values.swap(0, 1);
        }
    }

    /// Move the top value to the bottom.
    pub fn rotate(&mut self) {
        if self.values.len() >= 2 {
            self.values.rotate_left(1);
        }
    }

    /// Move the bottom value to the top.
    pub fn reverse_rotate(&mut self) {
        if self.values.len() >= 2 {
            self.values.rotate_right(1);
        }
    }

    /// Pop the top of `self` and push it onto `dst`.
    pub fn transfer_to(&mut self, dst: &mut Stack) {
        if let Some(value) = self.pop_top() {
            dst.push_top(value);
        }
    }

    fn push_top(&mut self, value: i32) {
        self.values.push_front(value);
        self.bounds = Some(self.bounds.map_or_else(|| Bounds::point(value), |b| b.include(value)));
    }

    fn pop_top(&mut self) -> Option<i32> {
        let value = self.values.pop_front()?;
        // Only an extremum leaving can shrink the bounds.
        if self.bounds.is_some_and(|b| value == b.min || value == b.max) {
            self.bounds = Bounds::of(self.values.iter().copied());
        }
        Some(value)
    }
}

/// The two stacks of a sort trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackPair {
    a: Stack,
    b: Stack,
}

impl StackPair {
    /// Load `values` into `A` (first value on top). `B` starts empty.
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        let a = Stack::from_values(values);
        let b = Stack::with_capacity(a.len());
        Self { a, b }
    }

    /// Build a pair from explicit stacks.
    pub fn from_stacks(a: Stack, b: Stack) -> Self {
        Self { a, b }
    }

    /// Primary stack.
    pub fn a(&self) -> &Stack {
        &self.a
    }

    /// Secondary stack.
    pub fn b(&self) -> &Stack {
        &self.b
    }

    /// Total number of values across both stacks.
    pub fn total_len(&self) -> usize {
        self.a.len() + self.b.len()
    }

    /// Apply a command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Sa => self.a.swap(),
            Command::Sb => self.b.swap(),
            Command::Ss => {
                self.a.swap();
                self.b.swap();
            },
            Command::Pa => self.b.transfer_to(&mut self.a),
            Command::Pb => self.a.transfer_to(&mut self.b),
            Command::Ra => self.a.rotate(),
            Command::Rb => self.b.rotate(),
            Command::Rr => {
                self.a.rotate();
                self.b.rotate();
            },
            Command::Rra => self.a.reverse_rotate(),
            Command::Rrb => self.b.reverse_rotate(),
            Command::Rrr => {
                self.a.reverse_rotate();
                self.b.reverse_rotate();
            },
        }
    }

    /// Interpret a raw token and apply it.
    ///
    /// Returns the recognized command, or `None` for a token outside the
    /// vocabulary, which leaves both stacks untouched.
    pub fn execute(&mut self, token: &[u8]) -> Option<Command> {
        let command = Command::parse(token)?;
        self.apply(command);
        Some(command)
    }

    /// Bounds used to scale bars.
    ///
    /// While `B` is empty this is `A`'s own range so a single populated stack
    /// uses the full bar width. Otherwise it covers both stacks.
    pub fn scale_bounds(&self) -> Option<Bounds> {
        if self.b.is_empty() {
            return self.a.bounds();
        }
        match (self.a.bounds(), self.b.bounds()) {
            (Some(a), Some(b)) => Some(a.merge(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &[i32], b: &[i32]) -> StackPair {
        StackPair::from_stacks(
            Stack::from_values(a.iter().copied()),
            Stack::from_values(b.iter().copied()),
        )
    }

    #[test]
    fn sorting_trace_scenario() {
        let mut stacks = StackPair::new([3, 1, 2]);

        stacks.apply(Command::Sa);
        assert_eq!(stacks.a().to_vec(), vec![1, 3, 2]);

        stacks.apply(Command::Pb);
        assert_eq!(stacks.a().to_vec(), vec![3, 2]);
        assert_eq!(stacks.b().to_vec(), vec![1]);

        stacks.apply(Command::Pb);
        assert_eq!(stacks.a().to_vec(), vec![2]);
        assert_eq!(stacks.b().to_vec(), vec![3, 1]);
        assert_eq!(stacks.total_len(), 3);
    }

    #[test]
    fn rotate_single_is_noop() {
        let mut stacks = StackPair::new([5]);
        stacks.apply(Command::Ra);
        assert_eq!(stacks.a().to_vec(), vec![5]);
    }

    #[test]
    fn reverse_rotate_brings_bottom_to_top() {
        let mut stacks = StackPair::new([1, 2, 3]);
        stacks.apply(Command::Rra);
        assert_eq!(stacks.a().to_vec(), vec![3, 1, 2]);
    }

    #[test]
    fn rotate_moves_top_to_bottom() {
        let mut stacks = StackPair::new([1, 2, 3]);
        stacks.apply(Command::Ra);
        assert_eq!(stacks.a().to_vec(), vec![2, 3, 1]);
    }

    #[test]
    fn unknown_token_is_ignored() {
        let mut stacks = StackPair::new([4, 2]);
        let before = stacks.clone();

        assert_eq!(stacks.execute(b"zz"), None);
        assert_eq!(stacks, before);
    }

    #[test]
    fn push_from_empty_is_noop() {
        let mut stacks = StackPair::new([1, 2]);
        stacks.apply(Command::Pa);
        assert_eq!(stacks.a().to_vec(), vec![1, 2]);
        assert!(stacks.b().is_empty());
    }

    #[test]
    fn combined_commands_touch_both_stacks() {
        let mut stacks = pair(&[1, 2, 3], &[4, 5, 6]);

        stacks.apply(Command::Ss);
        assert_eq!(stacks.a().to_vec(), vec![2, 1, 3]);
        assert_eq!(stacks.b().to_vec(), vec![5, 4, 6]);

        stacks.apply(Command::Rr);
        assert_eq!(stacks.a().to_vec(), vec![1, 3, 2]);
        assert_eq!(stacks.b().to_vec(), vec![4, 6, 5]);

        stacks.apply(Command::Rrr);
        assert_eq!(stacks.a().to_vec(), vec![2, 1, 3]);
        assert_eq!(stacks.b().to_vec(), vec![5, 4, 6]);
    }

    #[test]
    fn bounds_follow_transfers() {
        let mut stacks = StackPair::new([9, 1, 5]);
        assert_eq!(stacks.a().bounds(), Some(Bounds { min: 1, max: 9 }));
        assert_eq!(stacks.b().bounds(), None);

        stacks.apply(Command::Pb);
        assert_eq!(stacks.a().bounds(), Some(Bounds { min: 1, max: 5 }));
        assert_eq!(stacks.b().bounds(), Some(Bounds::point(9)));

        stacks.apply(Command::Pa);
        assert_eq!(stacks.a().bounds(), Some(Bounds { min: 1, max: 9 }));
        assert_eq!(stacks.b().bounds(), None);
    }

    #[test]
    fn scale_bounds_uses_a_alone_while_b_empty() {
        let stacks = pair(&[10, 20], &[]);
        assert_eq!(stacks.scale_bounds(), Some(Bounds { min: 10, max: 20 }));

        let stacks = pair(&[10, 20], &[-5]);
        assert_eq!(stacks.scale_bounds(), Some(Bounds { min: -5, max: 20 }));

        let stacks = pair(&[], &[7]);
        assert_eq!(stacks.scale_bounds(), Some(Bounds::point(7)));

        assert_eq!(StackPair::default().scale_bounds(), None);
    }

    #[test]
    fn b_preallocates_for_every_value() {
        let stacks = StackPair::new(0..64);
        assert!(stacks.b().capacity() >= 64);
    }
}
