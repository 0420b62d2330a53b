/**
 * All of the regex syntax-tree (AST) data-structures and the combinators
 * that build them.
 */

use thiserror::Error;
use rx_match::Match;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("repetition upper bound precedes its lower bound")]
pub struct InvalidBounds;

/// An immutable regex tree over symbols of type `A`. A parent owns its
/// children; comparison is structural, never by identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Regex<A> {
    /// Matches no sequence at all
    Fail,

    /// Matches only the zero-length sequence
    Empty,

    /// Matches exactly one symbol satisfying the predicate
    Leaf(Match<A>),

    /// Language union
    Or{
        first: Box<Regex<A>>,
        second: Box<Regex<A>>,
    },

    /// Language concatenation
    And{
        first: Box<Regex<A>>,
        second: Box<Regex<A>>,
    },

    /// Between `least` and `most` consecutive repetitions of the subnode,
    /// unbounded above when `most` is `None`. Invariant: `least <= most`.
    Repeat{
        subnode: Box<Regex<A>>,
        least: usize,
        most: Option<usize>,
    },
}

/**
 * Smart constructors. None of these rewrite anything: optimization is a
 * separate, explicit pass, so structurally distinct builds stay distinct.
 */

impl <A> Regex<A> {
    pub fn fail() -> Regex<A> {
        Regex::Fail
    }

    pub fn empty() -> Regex<A> {
        Regex::Empty
    }

    pub fn leaf(m: Match<A>) -> Regex<A> {
        Regex::Leaf(m)
    }

    pub fn literal(sym: A) -> Regex<A> {
        Regex::Leaf(Match::Literal(sym))
    }

    pub fn or(first: Regex<A>, second: Regex<A>) -> Regex<A> {
        Regex::Or{ first: Box::new(first), second: Box::new(second) }
    }

    pub fn and(first: Regex<A>, second: Regex<A>) -> Regex<A> {
        Regex::And{ first: Box::new(first), second: Box::new(second) }
    }

    /// Checked repetition; `most < least` is a construction error, never
    /// silently clamped.
    pub fn repeat(subnode: Regex<A>, least: usize, most: Option<usize>) -> Result<Regex<A>, InvalidBounds> {
        match most {
            Some(m) if m < least => Err(InvalidBounds),
            _ => Ok(Regex::Repeat{ subnode: Box::new(subnode), least, most }),
        }
    }

    pub fn star(subnode: Regex<A>) -> Regex<A> {
        Regex::Repeat{ subnode: Box::new(subnode), least: 0, most: None }
    }

    pub fn plus(subnode: Regex<A>) -> Regex<A> {
        Regex::Repeat{ subnode: Box::new(subnode), least: 1, most: None }
    }

    pub fn opt(subnode: Regex<A>) -> Regex<A> {
        Regex::Repeat{ subnode: Box::new(subnode), least: 0, most: Some(1) }
    }

    pub fn count(subnode: Regex<A>, n: usize) -> Regex<A> {
        Regex::Repeat{ subnode: Box::new(subnode), least: n, most: Some(n) }
    }

    /// Concatenation of one literal per symbol, left-associated to keep the
    /// tree shape deterministic (matching reading order).
    pub fn seq<I>(symbols: I) -> Regex<A> where I : IntoIterator<Item = A> {
        let mut nodes = symbols.into_iter().map(Regex::literal);
        match nodes.next() {
            None => Regex::Empty,
            Some(first) => nodes.fold(first, Regex::and),
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod ast_tests {
    use super::*;

    fn ch(c: char) -> Regex<char> {
        Regex::literal(c)
    }

    #[test]
    fn seq_of_nothing_is_empty() {
        assert_eq!(Regex::<char>::seq("".chars()), Regex::Empty);
    }

    #[test]
    fn seq_left_associates() {
        assert_eq!(
            Regex::seq("abc".chars()),
            Regex::and(Regex::and(ch('a'), ch('b')), ch('c'))
        );
    }

    #[test]
    fn repeat_rejects_descending_bounds() {
        assert_eq!(Regex::repeat(ch('a'), 3, Some(1)), Err(InvalidBounds));
    }

    #[test]
    fn repeat_accepts_ordered_and_unbounded() {
        assert!(Regex::repeat(ch('a'), 1, Some(3)).is_ok());
        assert!(Regex::repeat(ch('a'), 5, None).is_ok());
        assert!(Regex::repeat(ch('a'), 2, Some(2)).is_ok());
    }

    #[test]
    fn sugar_expands_to_repeat() {
        assert_eq!(Regex::star(ch('a')), Regex::repeat(ch('a'), 0, None).unwrap());
        assert_eq!(Regex::plus(ch('a')), Regex::repeat(ch('a'), 1, None).unwrap());
        assert_eq!(Regex::opt(ch('a')), Regex::repeat(ch('a'), 0, Some(1)).unwrap());
        assert_eq!(Regex::count(ch('a'), 4), Regex::repeat(ch('a'), 4, Some(4)).unwrap());
    }

    #[test]
    fn constructors_do_not_rewrite() {
        // And(Empty, x) stays as built until the optimizer runs
        let node = Regex::and(Regex::Empty, ch('a'));
        assert_eq!(
            node,
            Regex::And{ first: Box::new(Regex::Empty), second: Box::new(ch('a')) }
        );
    }
}
