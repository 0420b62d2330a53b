/**
 * Printing a syntax tree back to regex source text.
 *
 * The printed form parses back to the same tree, except for constructs the
 * surface syntax cannot name directly (Fail and the complement shorthands),
 * which print as an equivalent bracket expression instead.
 */

use std::fmt;
use rx_match::{ClassKind, Match, Negated};
use crate::ast::Regex;
use crate::parser::SPECIAL_CHARS;

/// Characters that need a backslash inside a bracket expression.
const CLASS_SPECIAL_CHARS: &str = r"]\-^";

pub fn print(node: &Regex<char>) -> String {
    node.to_string()
}

impl fmt::Display for Regex<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        print_node(self, 0, &mut out);
        f.write_str(&out)
    }
}

/// Binding strength of a node, used to decide where parentheses are needed.
/// Alternation is the loosest, then concatenation, then repetition; atoms
/// never need wrapping.
fn level(node: &Regex<char>) -> u8 {
    match node {
        Regex::Or{ .. } => 0,
        Regex::And{ .. } => 1,
        Regex::Repeat{ .. } => 2,
        Regex::Fail | Regex::Empty | Regex::Leaf(_) => 3,
    }
}

fn print_node(node: &Regex<char>, context: u8, out: &mut String) {
    let wrap = level(node) < context;
    if wrap {
        out.push('(');
    }

    match node {
        // Fail has no surface syntax; a bracket expression excluding every
        // code point denotes the same empty language
        Regex::Fail => out.push_str("[^\u{0}-\u{10FFFF}]"),

        Regex::Empty => {},

        Regex::Leaf(m) => print_match(m, out),

        Regex::Or{ first, second } => {
            print_node(first, 0, out);
            out.push('|');
            // The right operand stays unwrapped only when it is not itself
            // an Or, which keeps the printed form re-parsing left-nested
            print_node(second, 1, out);
        },

        Regex::And{ first, second } => {
            print_node(first, 1, out);
            print_node(second, 2, out);
        },

        Regex::Repeat{ subnode, least, most } => {
            // An empty subnode would make the suffix dangle. A quantified
            // subnode needs no group: quantifiers stack, so a** reparses to
            // the same nesting.
            if **subnode == Regex::Empty {
                out.push_str("()");
            }
            else {
                print_node(subnode, 2, out);
            }
            match (*least, *most) {
                (0, None) => out.push('*'),
                (1, None) => out.push('+'),
                (0, Some(1)) => out.push('?'),
                (n, None) => out.push_str(&format!("{{{},}}", n)),
                (n, Some(m)) if n == m => out.push_str(&format!("{{{}}}", n)),
                (n, Some(m)) => out.push_str(&format!("{{{},{}}}", n, m)),
            }
        },
    }

    if wrap {
        out.push(')');
    }
}

fn print_match(m: &Match<char>, out: &mut String) {
    match m {
        Match::Literal(c) => {
            if SPECIAL_CHARS.contains(*c) {
                out.push('\\');
            }
            out.push(*c);
        },

        Match::Range(lo, hi) => {
            out.push('[');
            push_class_char(*lo, out);
            out.push('-');
            push_class_char(*hi, out);
            out.push(']');
        },

        Match::Wildcard => out.push('.'),

        Match::Class(kind) => match kind {
            ClassKind::Digit => out.push_str(r"\d"),
            ClassKind::NotDigit => out.push_str(r"\D"),
            ClassKind::Space => out.push_str(r"\s"),
            ClassKind::NotSpace => out.push_str(r"\S"),
            ClassKind::Blank => out.push_str(r"\h"),
            ClassKind::NotBlank => out.push_str(r"\H"),
            ClassKind::Alpha => out.push_str("[[:alpha:]]"),
            ClassKind::Alnum => out.push_str("[[:alnum:]]"),
            ClassKind::Ascii => out.push_str("[[:ascii:]]"),

            // No shorthand exists for these; a negated class over the
            // positive counterpart denotes the same set
            ClassKind::NotAlpha | ClassKind::NotAlnum | ClassKind::NotAscii => {
                out.push_str("[^");
                for (lo, hi) in kind.complement().ranges() {
                    push_class_char(*lo, out);
                    if lo != hi {
                        out.push('-');
                        push_class_char(*hi, out);
                    }
                }
                out.push(']');
            },
        },

        Match::NoneOf(terms) => {
            out.push_str("[^");
            for term in terms {
                match term {
                    Negated::Literal(c) => push_class_char(*c, out),
                    Negated::Range(lo, hi) => {
                        push_class_char(*lo, out);
                        out.push('-');
                        push_class_char(*hi, out);
                    },
                }
            }
            out.push(']');
        },
    }
}

fn push_class_char(c: char, out: &mut String) {
    if CLASS_SPECIAL_CHARS.contains(c) {
        out.push('\\');
    }
    out.push(c);
}

// Tests ///////////////////////////////////////////////////////////////////////
