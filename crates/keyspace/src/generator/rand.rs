use ::rand::{Rng, rng};

/// A source of uniformly distributed indices.
///
/// This abstraction lets the sampling generators use a real random source in
/// production and a predictable one in tests.
///
/// # Example
/// ```
/// use keyspace::RandSource;
///
/// struct AlwaysFirst;
/// impl RandSource for AlwaysFirst {
///     fn below(&self, _upper: usize) -> usize {
///         0
///     }
/// }
///
/// assert_eq!(AlwaysFirst.pick(&['x', 'y']), 'x');
/// assert!(!AlwaysFirst.coin());
/// ```
pub trait RandSource: Send + Sync {
    /// Returns a value in `0..upper`. `upper` is always greater than 0.
    fn below(&self, upper: usize) -> usize;

    /// Picks one element of a non-empty slice.
    fn pick<T: Copy>(&self, items: &[T]) -> T
    where
        Self: Sized,
    {
        items[self.below(items.len())]
    }

    /// A fair coin flip.
    fn coin(&self) -> bool
    where
        Self: Sized,
    {
        self.below(2) == 1
    }

    /// Fisher-Yates shuffle in place.
    fn shuffle<T>(&self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            items.swap(i, self.below(i + 1));
        }
    }
}

/// A `RandSource` backed by the thread-local RNG (`rand::rng()`).
///
/// The thread-local generator is a cryptographically secure, periodically
/// reseeded ChaCha stream. This type stores nothing, so it is `Send + Sync`
/// and free to share between workers even though the RNG itself is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn below(&self, upper: usize) -> usize {
        rng().random_range(0..upper)
    }
}

#[cfg(test)]
pub(crate) use testing::StepRandom;

#[cfg(test)]
mod testing {
    use super::RandSource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic source cycling through 0, 1, 2, ... modulo `upper`.
    #[derive(Default, Debug)]
    pub(crate) struct StepRandom {
        next: AtomicUsize,
    }

    impl RandSource for StepRandom {
        fn below(&self, upper: usize) -> usize {
            self.next.fetch_add(1, Ordering::Relaxed) % upper
        }
    }
}
