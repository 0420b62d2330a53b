/**
 * Leaf predicates testing a single symbol of the input sequence.
 */

use thiserror::Error;
use crate::classify::{ClassKind, Classify};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    #[error("range upper bound precedes its lower bound")]
    DescendingRange,

    #[error("a negated class needs at least one term")]
    EmptyNegation,
}

/// A predicate over exactly one symbol. All variants are pure and immutable
/// once built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Match<A> {
    Literal(A),
    Range(A, A),
    Wildcard,
    Class(ClassKind),
    NoneOf(Vec<Negated<A>>),
}

/// One negated term of a `NoneOf`: the symbol must fail the underlying
/// literal or range test.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Negated<A> {
    Literal(A),
    Range(A, A),
}

/**
 * Checked constructors for the variants that carry invariants.
 */

impl <A> Match<A> where A : Ord {
    /// An inclusive range; rejects `upper < lower` instead of clamping.
    pub fn range(lower: A, upper: A) -> Result<Match<A>, MatchError> {
        if lower > upper {
            Err(MatchError::DescendingRange)
        }
        else {
            Ok(Match::Range(lower, upper))
        }
    }

    /// The negation of the union of `terms`; rejects an empty term list.
    pub fn none_of(terms: Vec<Negated<A>>) -> Result<Match<A>, MatchError> {
        if terms.is_empty() {
            Err(MatchError::EmptyNegation)
        }
        else {
            Ok(Match::NoneOf(terms))
        }
    }
}

impl <A> Negated<A> where A : Ord {
    pub fn range(lower: A, upper: A) -> Result<Negated<A>, MatchError> {
        if lower > upper {
            Err(MatchError::DescendingRange)
        }
        else {
            Ok(Negated::Range(lower, upper))
        }
    }

    /// The underlying positive test of the negated term.
    pub fn accepts(&self, sym: &A) -> bool {
        match self {
            Negated::Literal(a) => sym == a,
            Negated::Range(lower, upper) => lower <= sym && sym <= upper,
        }
    }
}

/**
 * The single operation of the algebra.
 */

impl <A> Match<A> where A : Ord + Classify {
    pub fn matches(&self, sym: &A) -> bool {
        match self {
            Match::Literal(a) => sym == a,
            Match::Range(lower, upper) => lower <= sym && sym <= upper,
            Match::Wildcard => true,
            Match::Class(kind) => kind.matches(sym),
            // Short-circuits on the first term whose underlying test accepts
            Match::NoneOf(terms) => terms.iter().all(|t| !t.accepts(sym)),
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
