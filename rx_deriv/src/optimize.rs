/**
 * Canonicalizing rewrites over regex trees.
 *
 * The optimizer never changes the matched language; it only rewrites the
 * tree into a canonical shape, so that two independently built trees with
 * the same language (associativity aside) compare structurally equal. Tests
 * lean on this in place of a language-equivalence decision procedure.
 */

use rx_syntax::Regex;

/// Rewrites the tree to a canonical fixpoint.
pub fn optimize<A>(node: &Regex<A>) -> Regex<A>
where A : Clone + Ord {
    let mut current = node.clone();
    loop {
        let next = pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// One bottom-up rewrite pass.
fn pass<A>(node: &Regex<A>) -> Regex<A>
where A : Clone + Ord {
    match node {
        Regex::Fail => Regex::Fail,
        Regex::Empty => Regex::Empty,
        Regex::Leaf(m) => Regex::Leaf(m.clone()),

        Regex::Or{ first, second } => rebuild_or(pass(first), pass(second)),

        Regex::And{ first, second } => rebuild_and(pass(first), pass(second)),

        Regex::Repeat{ subnode, least, most } => rebuild_repeat(pass(subnode), *least, *most),
    }
}

fn rebuild_or<A>(first: Regex<A>, second: Regex<A>) -> Regex<A>
where A : Clone + Ord {
    let mut terms = Vec::new();
    flatten_or(first, &mut terms);
    flatten_or(second, &mut terms);

    // Fail is the identity of union
    terms.retain(|t| *t != Regex::Fail);

    // Alternatives that all test a single symbol get a fixed order, so that
    // [bcd] and [dbc] end up as the same tree; mixed alternatives keep their
    // order to stay deterministic
    let all_leaves = terms.iter().all(|t| match t {
        Regex::Leaf(_) => true,
        _ => false,
    });
    if all_leaves {
        terms.sort();
    }

    let mut unique: Vec<Regex<A>> = Vec::new();
    for term in terms {
        if !unique.contains(&term) {
            unique.push(term);
        }
    }

    let mut it = unique.into_iter();
    match it.next() {
        None => Regex::Fail,
        Some(head) => it.fold(head, Regex::or),
    }
}

fn rebuild_and<A>(first: Regex<A>, second: Regex<A>) -> Regex<A>
where A : Clone + Ord {
    let mut factors = Vec::new();
    flatten_and(first, &mut factors);
    flatten_and(second, &mut factors);

    // A failing factor fails the whole concatenation
    if factors.iter().any(|f| *f == Regex::Fail) {
        return Regex::Fail;
    }

    // Empty is the identity of concatenation
    factors.retain(|f| *f != Regex::Empty);

    let mut it = factors.into_iter();
    match it.next() {
        None => Regex::Empty,
        Some(head) => it.fold(head, Regex::and),
    }
}

fn rebuild_repeat<A: PartialEq>(subnode: Regex<A>, least: usize, most: Option<usize>) -> Regex<A> {
    if most == Some(0) {
        return Regex::Empty;
    }
    if least == 1 && most == Some(1) {
        return subnode;
    }
    if subnode == Regex::Fail {
        // Zero iterations of an impossible subnode are still the empty
        // sequence; one or more can never happen
        return if least == 0 {
            Regex::Empty
        }
        else {
            Regex::Fail
        };
    }
    Regex::Repeat{ subnode: Box::new(subnode), least, most }
}

/// Folding the chains flat re-nests them to the left when rebuilt.
fn flatten_or<A>(node: Regex<A>, out: &mut Vec<Regex<A>>) {
    match node {
        Regex::Or{ first, second } => {
            flatten_or(*first, out);
            flatten_or(*second, out);
        },
        node => out.push(node),
    }
}

fn flatten_and<A>(node: Regex<A>, out: &mut Vec<Regex<A>>) {
    match node {
        Regex::And{ first, second } => {
            flatten_and(*first, out);
            flatten_and(*second, out);
        },
        node => out.push(node),
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod optimize_tests {
    use super::*;
    use crate::deriv::accepts;
    use rx_syntax::{parse, print};

    fn ch(c: char) -> Regex<char> {
        Regex::literal(c)
    }

    fn alt(first: Regex<char>, second: Regex<char>) -> Regex<char> {
        Regex::or(first, second)
    }

    fn cat(first: Regex<char>, second: Regex<char>) -> Regex<char> {
        Regex::and(first, second)
    }

    #[test]
    fn chains_flatten_to_the_left() {
        let right = cat(ch('a'), cat(ch('b'), ch('c')));
        let left = cat(cat(ch('a'), ch('b')), ch('c'));
        assert_eq!(optimize(&right), left);

        let right = alt(ch('x'), alt(cat(ch('a'), ch('b')), ch('y')));
        let left = alt(alt(ch('x'), cat(ch('a'), ch('b'))), ch('y'));
        assert_eq!(optimize(&right), left);
    }

    #[test]
    fn empty_is_dropped_from_concatenation() {
        assert_eq!(optimize(&cat(Regex::Empty, ch('a'))), ch('a'));
        assert_eq!(optimize(&cat(ch('a'), Regex::Empty)), ch('a'));
        assert_eq!(
            optimize(&cat(cat(ch('a'), Regex::Empty), ch('b'))),
            cat(ch('a'), ch('b'))
        );
        assert_eq!(optimize(&cat(Regex::Empty, Regex::Empty)), Regex::Empty);
    }

    #[test]
    fn fail_absorbs_concatenation() {
        assert_eq!(optimize(&cat(ch('a'), Regex::Fail)), Regex::Fail);
        assert_eq!(optimize(&cat(Regex::Fail, ch('a'))), Regex::Fail);
    }

    #[test]
    fn fail_is_dropped_from_alternation() {
        assert_eq!(optimize(&alt(Regex::Fail, ch('a'))), ch('a'));
        assert_eq!(optimize(&alt(ch('a'), Regex::Fail)), ch('a'));
        assert_eq!(optimize(&alt(Regex::Fail, Regex::Fail)), Regex::Fail);
    }

    #[test]
    fn duplicate_alternatives_collapse() {
        assert_eq!(optimize(&alt(ch('a'), ch('a'))), ch('a'));
        let branch = cat(ch('a'), ch('b'));
        assert_eq!(optimize(&alt(branch.clone(), branch.clone())), branch);
    }

    #[test]
    fn leaf_alternatives_get_a_canonical_order() {
        assert_eq!(optimize(&parse("[dcb]").unwrap()), optimize(&parse("[bcd]").unwrap()));
        assert_eq!(optimize(&parse("d|c|b").unwrap()), optimize(&parse("b|c|d").unwrap()));
        assert_eq!(optimize(&parse("b|c|b").unwrap()), optimize(&parse("b|c").unwrap()));
    }

    #[test]
    fn mixed_alternatives_keep_their_order() {
        let node = alt(cat(ch('a'), ch('b')), ch('a'));
        assert_eq!(optimize(&node), node);
    }

    #[test]
    fn repeat_rewrites() {
        assert_eq!(optimize(&Regex::repeat(ch('a'), 1, Some(1)).unwrap()), ch('a'));
        assert_eq!(optimize(&Regex::repeat(ch('a'), 0, Some(0)).unwrap()), Regex::Empty);
        assert_eq!(optimize(&Regex::star(Regex::<char>::Fail)), Regex::Empty);
        assert_eq!(optimize(&Regex::repeat(Regex::<char>::Fail, 2, None).unwrap()), Regex::Fail);
        let kept = Regex::repeat(ch('a'), 1, Some(3)).unwrap();
        assert_eq!(optimize(&kept), kept);
    }

    #[test]
    fn associativity_converges_in_printed_form() {
        let first = optimize(&parse("((ab)c)d").unwrap());
        let second = optimize(&parse("a(b(cd))").unwrap());
        assert_eq!(first, second);
        assert_eq!(print(&first), print(&second));
        assert_eq!(print(&first), "abcd");
    }

    #[test]
    fn optimizing_preserves_the_language() {
        let sources = ["a(b|c)*d", "ab{1,3}e", r"a[^b\dc]", "(|a)(b|)", "[dcb]x"];
        let candidates = ["", "a", "ab", "abd", "abe", "abbbe", "acbd", "aZ", "bx", "dx"];
        for source in sources.iter() {
            let node = parse(source).unwrap();
            let optimized = optimize(&node);
            for candidate in candidates.iter() {
                assert_eq!(
                    accepts(&node, candidate.chars()),
                    accepts(&optimized, candidate.chars()),
                    "pattern {:?} on input {:?}",
                    source,
                    candidate
                );
            }
        }
    }

    #[test]
    fn idempotent() {
        let node = parse("a(b|c)*d{2,}|x").unwrap();
        let once = optimize(&node);
        assert_eq!(optimize(&once), once);
    }
}
