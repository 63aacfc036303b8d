use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// The one source of randomness in the arena.
///
/// The trait is object-safe so the binary can swap in a seeded source for
/// reproducible battles and the tests can swap in fixed stubs. Implementations
/// return `None` for an empty range instead of panicking; callers handle the
/// empty case explicitly.
pub trait RandomSource {
    /// Picks an index uniformly at random from `0..len`, or `None` when
    /// `len == 0`.
    fn pick_index(&mut self, len: usize) -> Option<usize>;
}

/// Picks one element of `items` uniformly at random, or `None` when the slice
/// is empty.
pub fn choose<'a, T>(source: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    source.pick_index(items.len()).map(|i| &items[i])
}

/// The production source, backed by the thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadRngSource {
    rng: ThreadRng,
}

impl RandomSource for ThreadRngSource {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }
}

/// A deterministic source for reproducible battles: the same seed always
/// produces the same sequence of picks.
#[derive(Debug)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        SeededSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_returns_none_for_an_empty_slice() {
        let mut source = ThreadRngSource::default();
        let empty: [u8; 0] = [];
        assert!(choose(&mut source, &empty).is_none());
    }

    #[test]
    fn choose_returns_a_member_of_the_slice() {
        let mut source = ThreadRngSource::default();
        let items = ["Knight", "Orc", "Golem"];
        for _ in 0..32 {
            let picked = choose(&mut source, &items).unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn seeded_sources_repeat_their_sequence() {
        let mut first = SeededSource::new(42);
        let mut second = SeededSource::new(42);
        for _ in 0..16 {
            assert_eq!(first.pick_index(10), second.pick_index(10));
        }
    }
}
