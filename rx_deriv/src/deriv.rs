/**
 * Matching by Brzozowski derivatives.
 *
 * The derivative of a tree with respect to a symbol is the tree matching
 * exactly the suffixes that could follow that symbol. Folding the derivative
 * over an input and asking whether the final tree is nullable decides an
 * anchored, full-sequence match without ever building an automaton.
 */

use rx_match::Classify;
use rx_syntax::Regex;

/// Does the tree accept the zero-length sequence?
pub fn nullable<A>(node: &Regex<A>) -> bool {
    match node {
        Regex::Fail => false,
        Regex::Empty => true,
        Regex::Leaf(_) => false,
        Regex::Or{ first, second } => nullable(first) || nullable(second),
        Regex::And{ first, second } => nullable(first) && nullable(second),
        Regex::Repeat{ subnode, least, .. } => *least == 0 || nullable(subnode),
    }
}

/// The tree matching exactly the suffixes `s` such that `sym` followed by
/// `s` is matched by `node`.
pub fn derive<A>(node: &Regex<A>, sym: &A) -> Regex<A>
where A : Clone + Ord + Classify {
    match node {
        Regex::Fail => Regex::Fail,

        // Empty matches nothing that consumes a symbol
        Regex::Empty => Regex::Fail,

        Regex::Leaf(m) => {
            if m.matches(sym) {
                Regex::Empty
            }
            else {
                Regex::Fail
            }
        },

        Regex::Or{ first, second } => or(derive(first, sym), derive(second, sym)),

        // When the first part is nullable the symbol may instead begin
        // matching the second part
        Regex::And{ first, second } => {
            let through_first = and(derive(first, sym), (**second).clone());
            if nullable(first) {
                or(through_first, derive(second, sym))
            }
            else {
                through_first
            }
        },

        // One iteration consumes the symbol, the remaining count carries on.
        // A nullable subnode needs no extra branch: the remaining repeat can
        // always spend its mandatory iterations on the empty sequence.
        Regex::Repeat{ subnode, least, most } => {
            if *most == Some(0) {
                return Regex::Fail;
            }
            let rest = Regex::Repeat{
                subnode: subnode.clone(),
                least: least.saturating_sub(1),
                most: most.map(|m| m - 1),
            };
            and(derive(subnode, sym), rest)
        },
    }
}

/// True iff the symbol sequence is matched in full, anchored at both ends.
///
/// Symbols are pulled one at a time, and the fold stops as soon as the
/// derivative collapses to `Fail`, so an infinite input that stops matching
/// still terminates.
pub fn accepts<A, I>(node: &Regex<A>, sequence: I) -> bool
where
    A : Clone + Ord + Classify,
    I : IntoIterator<Item = A>,
{
    let mut current = node.clone();
    for sym in sequence {
        current = derive(&current, &sym);
        if let Regex::Fail = current {
            return false;
        }
    }
    nullable(&current)
}

/**
 * Simplifying constructors the derivative relies on. Without the Fail and
 * Empty absorption rules a failed derivative would stay buried inside And
 * and Or nodes and the short-circuit in `accepts` would never fire.
 */

fn or<A>(first: Regex<A>, second: Regex<A>) -> Regex<A> {
    match (first, second) {
        (Regex::Fail, second) => second,
        (first, Regex::Fail) => first,
        (first, second) => Regex::Or{ first: Box::new(first), second: Box::new(second) },
    }
}

fn and<A>(first: Regex<A>, second: Regex<A>) -> Regex<A> {
    match (first, second) {
        (Regex::Fail, _) | (_, Regex::Fail) => Regex::Fail,
        (Regex::Empty, second) => second,
        (first, Regex::Empty) => first,
        (first, second) => Regex::And{ first: Box::new(first), second: Box::new(second) },
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod deriv_tests {
    use super::*;
    use rx_syntax::parse;

    fn acc(rx: &str, input: &str) -> bool {
        let node = parse(rx).unwrap();
        accepts(&node, input.chars())
    }

    #[test]
    fn empty_pattern() {
        assert!(acc("", ""));
        assert!(!acc("", "a"));
    }

    #[test]
    fn literals_and_concatenation() {
        assert!(acc("ab", "ab"));
        assert!(!acc("ab", "a"));
        assert!(!acc("ab", "abc"));
        assert!(!acc("ab", ""));
    }

    #[test]
    fn alternation() {
        assert!(acc("a|b", "a"));
        assert!(acc("a|b", "b"));
        assert!(!acc("a|b", "c"));
        assert!(!acc("a|b", "ab"));
    }

    #[test]
    fn star_plus_opt() {
        assert!(acc("a*", ""));
        assert!(acc("a*", "a"));
        assert!(acc("a*", "aaaa"));
        assert!(!acc("a*", "ab"));

        assert!(!acc("a+", ""));
        assert!(acc("a+", "aaa"));

        assert!(acc("a?", ""));
        assert!(acc("a?", "a"));
        assert!(!acc("a?", "aa"));
    }

    #[test]
    fn bounded_repetition() {
        assert!(acc("ab{1,3}e", "abe"));
        assert!(acc("ab{1,3}e", "abbe"));
        assert!(acc("ab{1,3}e", "abbbe"));
        assert!(!acc("ab{1,3}e", "abbbbe"));
        assert!(!acc("ab{1,3}e", "ae"));
        assert!(!acc("ab{1,3}e", "ab"));
    }

    #[test]
    fn repetition_of_a_nullable_subnode() {
        assert!(acc("(a?){2}", ""));
        assert!(acc("(a?){2}", "a"));
        assert!(acc("(a?){2}", "aa"));
        assert!(!acc("(a?){2}", "aaa"));

        assert!(acc("(ab|){3}", "abab"));
        assert!(!acc("(ab|){3}", "ababab!"));
    }

    #[test]
    fn wildcard() {
        assert!(acc("a.c", "abc"));
        assert!(acc("a.c", "a c"));
        assert!(!acc("a.c", "ac"));
        assert!(!acc("a.c", "abbc"));
    }

    #[test]
    fn classes() {
        for input in ["abe", "ace", "ade", "aee", "age", "aie", "aje", "ake"].iter() {
            assert!(acc("a[b-degi-k]e", input), "should accept {:?}", input);
        }
        for input in ["afe", "ahe", "abbe", "ae"].iter() {
            assert!(!acc("a[b-degi-k]e", input), "should reject {:?}", input);
        }
    }

    #[test]
    fn shorthand_classes() {
        assert!(acc(r"\d+", "123"));
        assert!(!acc(r"\d+", "12a"));
        assert!(!acc(r"\d+", ""));
        assert!(acc(r"\s", "\t"));
        assert!(!acc(r"\S", " "));
    }

    #[test]
    fn negated_class_with_shorthand_expansion() {
        assert!(acc(r"a[^b\dc]", "aZ"));
        assert!(acc(r"a[^b\dc]", "a!"));
        assert!(!acc(r"a[^b\dc]", "ab"));
        assert!(!acc(r"a[^b\dc]", "a5"));
        assert!(!acc(r"a[^b\dc]", "ac"));
        assert!(!acc(r"a[^b\dc]", "aZc"));
    }

    #[test]
    fn single_derivatives() {
        let node = parse("ab").unwrap();
        assert_eq!(derive(&node, &'a'), Regex::literal('b'));
        assert_eq!(derive(&node, &'b'), Regex::Fail);

        let node = parse("a|b").unwrap();
        assert_eq!(derive(&node, &'a'), Regex::Empty);
    }

    #[test]
    fn fail_matches_nothing() {
        assert!(!accepts(&Regex::<char>::Fail, "".chars()));
        assert!(!accepts(&Regex::Fail, "a".chars()));
    }

    #[test]
    fn terminates_on_infinite_input() {
        let node = parse("a*").unwrap();
        assert!(!accepts(&node, std::iter::repeat('b')));

        let node = parse("ab").unwrap();
        assert!(!accepts(&node, "ax".chars().chain(std::iter::repeat('x'))));
    }

    #[test]
    fn byte_symbols() {
        let node = Regex::seq(b"ab".iter().copied());
        assert!(accepts(&node, b"ab".iter().copied()));
        assert!(!accepts(&node, b"ba".iter().copied()));
    }
}
