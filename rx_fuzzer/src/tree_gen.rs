/**
 * Random regex tree generation.
 */

use rx_match::{ClassKind, Match, Negated};
use rx_syntax::Regex;
use crate::rnd::*;

/// The symbols leaf nodes draw from. The space is deliberate: it is a
/// literal atom outside of classes and must survive printing and reparsing.
pub const ALPHABET: &str = "abcde ";

/// Only the kinds the grammar can spell directly; the complement shorthands
/// print as an expanded negated class, which parses back to NoneOf and would
/// trip the structural comparison.
const CLASS_KINDS: [ClassKind; 9] = [
    ClassKind::Digit,
    ClassKind::NotDigit,
    ClassKind::Space,
    ClassKind::NotSpace,
    ClassKind::Blank,
    ClassKind::NotBlank,
    ClassKind::Alpha,
    ClassKind::Alnum,
    ClassKind::Ascii,
];

pub fn random_tree(depth: usize) -> Regex<char> {
    if depth == 0 {
        return random_leaf();
    }
    match draw(8) {
        0 | 1 => Regex::or(random_tree(depth - 1), random_tree(depth - 1)),
        2 | 3 | 4 => Regex::and(random_tree(depth - 1), random_tree(depth - 1)),
        5 => random_repeat(depth - 1),
        _ => random_leaf(),
    }
}

fn random_repeat(depth: usize) -> Regex<char> {
    let subnode = random_tree(depth);
    let least = draw(3);
    let most = if chance(50) {
        None
    }
    else {
        Some(least + draw(3))
    };
    // The bounds are ascending by construction
    Regex::repeat(subnode, least, most).unwrap()
}

fn random_leaf() -> Regex<char> {
    match draw(10) {
        0 => Regex::Empty,
        1 => Regex::leaf(Match::Wildcard),
        2 => Regex::leaf(Match::Class(*pick(&CLASS_KINDS))),
        3 => {
            let (lo, hi) = random_bounds();
            Regex::leaf(Match::Range(lo, hi))
        },
        4 => Regex::leaf(random_none_of()),
        _ => Regex::literal(random_symbol()),
    }
}

fn random_symbol() -> char {
    pick_symbol(ALPHABET)
}

fn random_bounds() -> (char, char) {
    let a = random_symbol();
    let b = random_symbol();
    if a <= b {
        (a, b)
    }
    else {
        (b, a)
    }
}

fn random_none_of() -> Match<char> {
    let count = 1 + draw(3);
    let mut terms = Vec::new();
    for _ in 0..count {
        if chance(50) {
            terms.push(Negated::Literal(random_symbol()));
        }
        else {
            let (lo, hi) = random_bounds();
            terms.push(Negated::Range(lo, hi));
        }
    }
    Match::none_of(terms).unwrap()
}
