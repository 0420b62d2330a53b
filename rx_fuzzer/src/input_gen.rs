/**
 * Candidate input generation.
 */

use rx_match::Match;
use rx_syntax::Regex;
use crate::rnd::*;
use crate::tree_gen::ALPHABET;

/// Symbols to probe Match leaves with; wider than the tree alphabet so
/// classes and negated terms get both accepting and rejecting picks. The
/// tab is the one symbol no range over the tree alphabet can cover.
const SYMBOL_POOL: &str = "abcde XYZ059\t!.";

pub fn random_candidate(max_len: usize) -> String {
    pick_string(max_len, ALPHABET)
}

/// A sequence the tree is guaranteed to accept, when one can be found.
pub fn witness(node: &Regex<char>) -> Option<String> {
    match node {
        Regex::Fail => None,
        Regex::Empty => Some(String::new()),
        Regex::Leaf(m) => witness_symbol(m).map(|c| c.to_string()),

        Regex::Or{ first, second } => {
            if chance(50) {
                witness(first).or_else(|| witness(second))
            }
            else {
                witness(second).or_else(|| witness(first))
            }
        },

        Regex::And{ first, second } => {
            let mut result = witness(first)?;
            result.push_str(&witness(second)?);
            Some(result)
        },

        Regex::Repeat{ subnode, least, most } => {
            let mut count = *least;
            if Some(count) != *most && chance(50) {
                count += 1;
            }
            if count == 0 {
                return Some(String::new());
            }
            match witness(subnode) {
                Some(part) => Some(part.repeat(count)),
                // The mandatory iterations have no witness, but zero
                // iterations may still be allowed
                None if *least == 0 => Some(String::new()),
                None => None,
            }
        },
    }
}

fn witness_symbol(m: &Match<char>) -> Option<char> {
    SYMBOL_POOL.chars().find(|c| m.matches(c))
}
