//! Accumulators: a running value folded with each new input

use std::fmt;

/// Boxed combining function: `(stored, incoming) -> new stored`.
pub type Combine<T> = Box<dyn FnMut(&T, T) -> T>;

/// A running value plus an optional combining operation.
///
/// Without an operation the accumulator is constant: every call ignores its
/// argument and yields the initial value. Each instance owns its state.
pub struct Accumulator<T> {
    stored: T,
    combine: Option<Combine<T>>,
}

impl<T: Clone> Accumulator<T> {
    pub fn new<F>(initial: T, combine: F) -> Self
    where
        F: FnMut(&T, T) -> T + 'static,
    {
        Self {
            stored: initial,
            combine: Some(Box::new(combine)),
        }
    }

    pub fn constant(initial: T) -> Self {
        Self {
            stored: initial,
            combine: None,
        }
    }

    /// Fold `value` into the stored value and return the result.
    pub fn call(&mut self, value: T) -> T {
        if let Some(combine) = self.combine.as_mut() {
            self.stored = combine(&self.stored, value);
        }
        self.stored.clone()
    }

    pub fn current(&self) -> &T {
        &self.stored
    }

    pub fn is_constant(&self) -> bool {
        self.combine.is_none()
    }
}

impl<T: fmt::Debug> fmt::Debug for Accumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("stored", &self.stored)
            .field("constant", &self.combine.is_none())
            .finish()
    }
}

/// Build an accumulator; `None` yields the constant form.
pub fn make_accumulator<T, F>(initial: T, combine: Option<F>) -> Accumulator<T>
where
    T: Clone,
    F: FnMut(&T, T) -> T + 'static,
{
    match combine {
        Some(f) => Accumulator::new(initial, f),
        None => Accumulator::constant(initial),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_accumulator() {
        let mut acc = make_accumulator(10, Some(|a: &i64, b: i64| a + b));
        assert_eq!(acc.call(5), 15);
        assert_eq!(acc.call(3), 18);
        assert_eq!(*acc.current(), 18);
    }

    #[test]
    fn test_constant_without_combine() {
        let mut acc = make_accumulator(7, None::<fn(&i32, i32) -> i32>);
        assert!(acc.is_constant());
        assert_eq!(acc.call(100), 7);
        assert_eq!(acc.call(-3), 7);
        assert_eq!(*acc.current(), 7);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = Accumulator::new(0, |a: &i32, b| a + b);
        let mut second = Accumulator::new(0, |a: &i32, b| a + b);
        first.call(10);
        first.call(10);
        assert_eq!(second.call(1), 1);
        assert_eq!(*first.current(), 20);
    }

    #[test]
    fn test_non_numeric_state() {
        let mut words = Accumulator::new(String::new(), |a: &String, b: String| {
            if a.is_empty() {
                b
            } else {
                format!("{} {}", a, b)
            }
        });
        words.call("spotted".to_string());
        assert_eq!(words.call("frog".to_string()), "spotted frog");
    }

    #[test]
    fn test_stateful_combine() {
        let mut calls = 0;
        let mut acc = Accumulator::new(1, move |a: &i32, b| {
            calls += 1;
            a * b + calls
        });
        assert_eq!(acc.call(2), 3);
        assert_eq!(acc.call(2), 8);
    }

    #[test]
    fn test_debug_hides_closure() {
        let acc = Accumulator::constant(1);
        assert_eq!(format!("{:?}", acc), "Accumulator { stored: 1, constant: true }");
    }
}
