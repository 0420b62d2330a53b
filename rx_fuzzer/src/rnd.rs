/**
 * Seeded randomness for the fuzzer. Every draw comes from one thread-local
 * PCG state, so a whole run is reproducible from the single u64 seed that
 * gets reported on failure.
 */

use std::cell::RefCell;
use std::time::SystemTime;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

struct SeededRng {
    rng: Mcg128Xsl64,
    seed: u64,
}

thread_local! {
    static RNG: RefCell<SeededRng> = RefCell::new(SeededRng{
        rng: Mcg128Xsl64::new(0),
        seed: 0,
    });
}

pub fn reseed(seed: u64) {
    RNG.with(|r| {
        let mut r = r.borrow_mut();
        r.rng = Mcg128Xsl64::seed_from_u64(seed);
        r.seed = seed;
    });
}

pub fn current_seed() -> u64 {
    RNG.with(|r| r.borrow().seed)
}

pub fn seed_from_system_time() -> u64 {
    SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap().as_secs()
}

/// A draw in `0..bound`.
pub fn draw(bound: usize) -> usize {
    RNG.with(|r| r.borrow_mut().rng.gen_range(0, bound))
}

/// True with the given percent probability.
pub fn chance(percent: usize) -> bool {
    draw(100) < percent
}

/// One of the slice's elements, for weighing node and term kinds.
pub fn pick<T>(choices: &[T]) -> &T {
    &choices[draw(choices.len())]
}

/// One symbol of the charset.
pub fn pick_symbol(charset: &str) -> char {
    let symbols: Vec<char> = charset.chars().collect();
    symbols[draw(symbols.len())]
}

/// A candidate string of charset symbols, shorter than `max_len`.
pub fn pick_string(max_len: usize, charset: &str) -> String {
    (0..draw(max_len)).map(|_| pick_symbol(charset)).collect()
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod rnd_tests {
    use super::*;

    #[test]
    fn reseeding_reproduces_the_draws() {
        reseed(42);
        let first: Vec<usize> = (0..8).map(|_| draw(100)).collect();
        reseed(42);
        let second: Vec<usize> = (0..8).map(|_| draw(100)).collect();
        assert_eq!(first, second);
        assert_eq!(current_seed(), 42);
    }

    #[test]
    fn chance_extremes() {
        reseed(7);
        assert!((0..32).all(|_| !chance(0)));
        assert!((0..32).all(|_| chance(100)));
    }

    #[test]
    fn picked_symbols_come_from_the_charset() {
        reseed(3);
        for _ in 0..32 {
            assert!("xyz".contains(pick_symbol("xyz")));
        }
        let candidate = pick_string(5, "ab");
        assert!(candidate.len() < 5);
        assert!(candidate.chars().all(|c| c == 'a' || c == 'b'));
    }
}
