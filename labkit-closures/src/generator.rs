//! Arithmetic sequence cursors
//!
//! `start, start + step, start + 2·step, ...` produced one value per call.
//! The sequence is infinite and cannot be rewound; make a new cursor to start
//! over. Integer cursors overflow like ordinary arithmetic.

use num_traits::{One, Zero};
use std::ops::Add;

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceGenerator<T> {
    current: T,
    step: T,
}

impl<T> SequenceGenerator<T>
where
    T: Copy + Add<Output = T>,
{
    pub fn new(start: T, step: T) -> Self {
        Self { current: start, step }
    }

    /// Return the current value, then advance by `step`.
    pub fn next_value(&mut self) -> T {
        let value = self.current;
        self.current = self.current + self.step;
        value
    }

    /// The value the next call will return.
    pub fn peek(&self) -> T {
        self.current
    }

    pub fn step(&self) -> T {
        self.step
    }
}

impl<T> Default for SequenceGenerator<T>
where
    T: Copy + Add<Output = T> + Zero + One,
{
    fn default() -> Self {
        Self::new(T::zero(), T::one())
    }
}

impl<T> Iterator for SequenceGenerator<T>
where
    T: Copy + Add<Output = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.next_value())
    }
}

/// Build a cursor; `start` defaults to 0 and `step` to 1.
pub fn make_sequence_generator<T>(start: Option<T>, step: Option<T>) -> SequenceGenerator<T>
where
    T: Copy + Add<Output = T> + Zero + One,
{
    SequenceGenerator::new(start.unwrap_or_else(T::zero), step.unwrap_or_else(T::one))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_step() {
        let mut generator = make_sequence_generator(Some(5), Some(2));
        assert_eq!(generator.next_value(), 5);
        assert_eq!(generator.next_value(), 7);
        assert_eq!(generator.next_value(), 9);
    }

    #[test]
    fn test_defaults() {
        let mut generator: SequenceGenerator<i32> = make_sequence_generator(None, None);
        assert_eq!(generator.next_value(), 0);
        assert_eq!(generator.next_value(), 1);
        assert_eq!(SequenceGenerator::<i64>::default().peek(), 0);
    }

    #[test]
    fn test_only_start_given() {
        let mut generator = make_sequence_generator(Some(10), None);
        assert_eq!(generator.next_value(), 10);
        assert_eq!(generator.next_value(), 11);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = make_sequence_generator(Some(0), Some(10));
        let mut b = make_sequence_generator(Some(0), Some(10));
        a.next_value();
        a.next_value();
        assert_eq!(b.next_value(), 0);
        assert_eq!(a.next_value(), 20);
    }

    #[test]
    fn test_clone_forks_state() {
        let mut a = SequenceGenerator::new(1, 1);
        a.next_value();
        let mut fork = a.clone();
        assert_eq!(fork.next_value(), 2);
        assert_eq!(a.next_value(), 2);
    }

    #[test]
    fn test_iterator_negative_and_fractional_steps() {
        let down: Vec<i32> = SequenceGenerator::new(3, -2).take(4).collect();
        assert_eq!(down, vec![3, 1, -1, -3]);
        let halves: Vec<f64> = SequenceGenerator::new(0.0, 0.5).take(3).collect();
        assert_eq!(halves, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut generator = SequenceGenerator::new(4, 4);
        assert_eq!(generator.peek(), 4);
        assert_eq!(generator.peek(), 4);
        assert_eq!(generator.next_value(), 4);
        assert_eq!(generator.peek(), 8);
        assert_eq!(generator.step(), 4);
    }
}
