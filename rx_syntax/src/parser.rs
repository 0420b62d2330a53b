/**
 * A parser from regex source text to the syntax tree.
 */

use thiserror::Error;
use rx_match::{ClassKind, Match, Negated};
use crate::ast::Regex;

/*
 * Reference grammar for the parser:
 *
 * alternative ::= sequence ( '|' sequence ) * ;
 *
 * sequence    ::= quantified * ;
 *
 * quantified  ::= atom ( '*' | '+' | '?' | '{' repeat '}' ) * ;
 *
 * repeat      ::= number ( ',' number ? ) ? ;
 *
 * atom        ::= '(' '?:' ? alternative ')'
 *               | '[' '^' ? class-item + ']'
 *               | '.'
 *               | '\' ESCAPE
 *               | ANY_NONSPECIAL_CHAR
 *               ;
 *
 * class-item  ::= '[:' CLASS_NAME ':]'
 *               | class-atom ( '-' class-atom ) ?
 *               ;
 *
 * class-atom  ::= '\' ESCAPE
 *               | ANY_CHAR_EXCEPT_CLOSING_BRACKET
 *               ;
 */

/// The characters that need a backslash to be taken literally outside of a
/// bracket expression. Inside one, most of them are plain symbols.
pub(crate) const SPECIAL_CHARS: &str = "|*+?()[]{}.<\\";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input at offset {at}, expected {expected}")]
    UnexpectedEnd{ at: usize, expected: &'static str },

    #[error("unexpected character '{found}' at offset {at}, expected {expected}")]
    Unexpected{ at: usize, found: char, expected: &'static str },

    #[error("quantifier with no preceding atom at offset {at}")]
    DanglingQuantifier{ at: usize },

    #[error("malformed repetition count at offset {at}")]
    MalformedRepeat{ at: usize },

    #[error("repetition bounds out of order at offset {at}")]
    RepeatOutOfOrder{ at: usize },

    #[error("empty character class at offset {at}")]
    EmptyClass{ at: usize },

    #[error("descending character range at offset {at}")]
    DescendingRange{ at: usize },

    #[error("class shorthand cannot be a range endpoint at offset {at}")]
    ClassRangeEndpoint{ at: usize },

    #[error("unknown escape sequence '\\{found}' at offset {at}")]
    UnknownEscape{ at: usize, found: char },

    #[error("unknown class name '{name}' at offset {at}")]
    UnknownClassName{ at: usize, name: String },

    #[error("trailing input at offset {at}")]
    TrailingInput{ at: usize },
}

/// A small helper to ease the Chars interface a bit, remembering how far
/// into the source it points so errors can carry a position.
#[derive(Clone)]
struct Cursor<'a> {
    it: std::str::Chars<'a>,
    offset: usize,
}

impl <'a> Cursor<'a> {
    fn next(&self) -> Option<(char, Cursor<'a>)> {
        let mut clone = self.clone();
        match clone.it.next() {
            Some(c) => {
                clone.offset += 1;
                Some((c, clone))
            },
            None => None,
        }
    }

    fn peek(&self) -> Option<char> {
        self.it.clone().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut it = self.it.clone();
        it.next();
        it.next()
    }

    /// Steps over one character the caller has already peeked; a no-op at
    /// the end of input.
    fn advance(&self) -> Cursor<'a> {
        match self.next() {
            Some((_, rest)) => rest,
            None => self.clone(),
        }
    }
}

type ParseResult<'a, T> = Result<(T, Cursor<'a>), ParseError>;

/// What a backslash escape denotes.
enum Escape {
    Symbol(char),
    Class(ClassKind),
}

/// One entry of a bracket expression.
enum ClassAtom {
    Symbol(char),
    Class(ClassKind),
}

enum ClassItem {
    Symbol(char),
    Range(char, char),
    Class(ClassKind),
}

/**
 * Actual parsing.
 */

pub fn parse(source: &str) -> Result<Regex<char>, ParseError> {
    let it = Cursor{ it: source.chars(), offset: 0 };
    let (node, it) = parse_alternative(it)?;
    match it.next() {
        Some(_) => Err(ParseError::TrailingInput{ at: it.offset }),
        None => Ok(node),
    }
}

fn parse_alternative(it: Cursor<'_>) -> ParseResult<'_, Regex<char>> {
    let (mut node, mut it) = parse_sequence(it)?;
    while let Some(('|', rest)) = it.next() {
        let (second, rest) = parse_sequence(rest)?;
        node = Regex::or(node, second);
        it = rest;
    }
    Ok((node, it))
}

fn parse_sequence(it: Cursor<'_>) -> ParseResult<'_, Regex<char>> {
    let mut it = it;
    let mut nodes = Vec::new();
    loop {
        match it.peek() {
            None | Some('|') | Some(')') => break,

            // A quantifier this early has nothing to bind to; quantifiers
            // after an atom are consumed by parse_quantified below
            Some('*') | Some('+') | Some('?') | Some('{') => {
                return Err(ParseError::DanglingQuantifier{ at: it.offset });
            },

            _ => {
                let (node, rest) = parse_quantified(it)?;
                nodes.push(node);
                it = rest;
            },
        }
    }

    let mut nodes = nodes.into_iter();
    let node = match nodes.next() {
        None => Regex::Empty,
        Some(first) => nodes.fold(first, Regex::and),
    };
    Ok((node, it))
}

fn parse_quantified(it: Cursor<'_>) -> ParseResult<'_, Regex<char>> {
    let (mut node, mut it) = parse_atom(it)?;
    loop {
        match it.peek() {
            Some('*') => {
                node = Regex::star(node);
                it = it.advance();
            },

            Some('+') => {
                node = Regex::plus(node);
                it = it.advance();
            },

            Some('?') => {
                node = Regex::opt(node);
                it = it.advance();
            },

            Some('{') => {
                let at = it.offset;
                let ((least, most), rest) = parse_repeat_bounds(it)?;
                node = Regex::repeat(node, least, most)
                    .map_err(|_| ParseError::RepeatOutOfOrder{ at })?;
                it = rest;
            },

            _ => break,
        }
    }
    Ok((node, it))
}

fn parse_repeat_bounds(it: Cursor<'_>) -> ParseResult<'_, (usize, Option<usize>)> {
    let it = it.advance(); // consume '{'

    let at = it.offset;
    let (least, it) = match parse_number(&it) {
        Some(x) => x,
        None => return Err(ParseError::MalformedRepeat{ at }),
    };

    match it.next() {
        Some(('}', rest)) => Ok(((least, Some(least)), rest)),

        Some((',', rest)) => {
            if let Some(('}', rest)) = rest.next() {
                return Ok(((least, None), rest));
            }

            let at = rest.offset;
            let (most, rest) = match parse_number(&rest) {
                Some(x) => x,
                None => return Err(ParseError::MalformedRepeat{ at }),
            };
            if most < least {
                return Err(ParseError::RepeatOutOfOrder{ at });
            }

            match rest.next() {
                Some(('}', rest)) => Ok(((least, Some(most)), rest)),
                Some((c, _)) => Err(ParseError::Unexpected{ at: rest.offset, found: c, expected: "'}'" }),
                None => Err(ParseError::UnexpectedEnd{ at: rest.offset, expected: "'}'" }),
            }
        },

        Some((c, _)) => Err(ParseError::Unexpected{ at: it.offset, found: c, expected: "',' or '}'" }),
        None => Err(ParseError::UnexpectedEnd{ at: it.offset, expected: "',' or '}'" }),
    }
}

fn parse_number<'a>(it: &Cursor<'a>) -> Option<(usize, Cursor<'a>)> {
    let mut value: usize = 0;
    let mut digits = 0;
    let mut it = it.clone();
    while let Some((c, rest)) = it.next() {
        match c.to_digit(10) {
            Some(d) => {
                value = value.checked_mul(10)?.checked_add(d as usize)?;
                digits += 1;
                it = rest;
            },
            None => break,
        }
    }

    if digits == 0 {
        None
    }
    else {
        Some((value, it))
    }
}

fn parse_atom(it: Cursor<'_>) -> ParseResult<'_, Regex<char>> {
    let at = it.offset;
    match it.next() {
        Some(('(', it)) => parse_group(it),
        Some(('[', it)) => parse_class(it, at),
        Some(('.', it)) => Ok((Regex::leaf(Match::Wildcard), it)),

        Some(('\\', it)) => {
            let (esc, it) = parse_escape(it)?;
            let node = match esc {
                Escape::Symbol(c) => Regex::literal(c),
                Escape::Class(kind) => Regex::leaf(Match::Class(kind)),
            };
            Ok((node, it))
        },

        Some((c, it)) => {
            if SPECIAL_CHARS.contains(c) {
                Err(ParseError::Unexpected{ at, found: c, expected: "an atom" })
            }
            else {
                Ok((Regex::literal(c), it))
            }
        },

        None => Err(ParseError::UnexpectedEnd{ at, expected: "an atom" }),
    }
}

fn parse_group(it: Cursor<'_>) -> ParseResult<'_, Regex<char>> {
    // '?:' marks a non-capturing group; grouping is all either form does here
    let it = if let Some(('?', rest)) = it.next() {
        match rest.next() {
            Some((':', rest)) => rest,
            Some((c, _)) => return Err(ParseError::Unexpected{ at: rest.offset, found: c, expected: "':'" }),
            None => return Err(ParseError::UnexpectedEnd{ at: rest.offset, expected: "':'" }),
        }
    }
    else {
        it
    };

    let (node, it) = parse_alternative(it)?;
    match it.next() {
        Some((')', rest)) => Ok((node, rest)),
        Some((c, _)) => Err(ParseError::Unexpected{ at: it.offset, found: c, expected: "')'" }),
        None => Err(ParseError::UnexpectedEnd{ at: it.offset, expected: "')'" }),
    }
}

fn parse_class(it: Cursor<'_>, open_at: usize) -> ParseResult<'_, Regex<char>> {
    let (negated, mut it) = match it.peek() {
        Some('^') => (true, it.advance()),
        _ => (false, it),
    };

    let mut items = Vec::new();
    loop {
        match it.peek() {
            None => return Err(ParseError::UnexpectedEnd{ at: it.offset, expected: "']'" }),

            Some(']') => {
                it = it.advance();
                break;
            },

            _ => {
                let (item, rest) = parse_class_item(it)?;
                items.push(item);
                it = rest;
            },
        }
    }

    let node = if negated {
        let mut terms = Vec::new();
        for item in items {
            match item {
                ClassItem::Symbol(c) => terms.push(Negated::Literal(c)),
                ClassItem::Range(lo, hi) => terms.push(Negated::Range(lo, hi)),

                // Shorthands flatten to their enumerated set before negation,
                // since NoneOf only holds literal and range terms
                ClassItem::Class(kind) => {
                    for (lo, hi) in kind.ranges() {
                        if lo == hi {
                            terms.push(Negated::Literal(*lo));
                        }
                        else {
                            terms.push(Negated::Range(*lo, *hi));
                        }
                    }
                },
            }
        }
        let m = Match::none_of(terms).map_err(|_| ParseError::EmptyClass{ at: open_at })?;
        Regex::leaf(m)
    }
    else {
        let mut nodes = items.into_iter().map(|item| {
            Regex::leaf(match item {
                ClassItem::Symbol(c) => Match::Literal(c),
                ClassItem::Range(lo, hi) => Match::Range(lo, hi),
                ClassItem::Class(kind) => Match::Class(kind),
            })
        });
        match nodes.next() {
            None => return Err(ParseError::EmptyClass{ at: open_at }),
            Some(first) => nodes.fold(first, Regex::or),
        }
    };

    Ok((node, it))
}

fn parse_class_item(it: Cursor<'_>) -> ParseResult<'_, ClassItem> {
    // POSIX-style named class
    if it.peek() == Some('[') && it.peek2() == Some(':') {
        return parse_posix_class(it);
    }

    let at = it.offset;
    let (left, it) = parse_class_atom(it)?;

    // A '-' starts a range unless it would finish the class
    if let (Some('-'), Some(after)) = (it.peek(), it.peek2()) {
        if after != ']' {
            let it = it.advance(); // consume '-'
            let right_at = it.offset;
            let (right, it) = parse_class_atom(it)?;
            return match (left, right) {
                (ClassAtom::Symbol(lo), ClassAtom::Symbol(hi)) => {
                    if lo > hi {
                        Err(ParseError::DescendingRange{ at })
                    }
                    else {
                        Ok((ClassItem::Range(lo, hi), it))
                    }
                },

                // A shorthand denotes a set, not a single symbol, so a range
                // endpoint made from one is ill-defined
                (ClassAtom::Class(_), _) => Err(ParseError::ClassRangeEndpoint{ at }),
                (_, ClassAtom::Class(_)) => Err(ParseError::ClassRangeEndpoint{ at: right_at }),
            };
        }
    }

    match left {
        ClassAtom::Symbol(c) => Ok((ClassItem::Symbol(c), it)),
        ClassAtom::Class(kind) => Ok((ClassItem::Class(kind), it)),
    }
}

fn parse_class_atom(it: Cursor<'_>) -> ParseResult<'_, ClassAtom> {
    let at = it.offset;
    match it.next() {
        Some(('\\', rest)) => {
            let (esc, rest) = parse_escape(rest)?;
            match esc {
                Escape::Symbol(c) => Ok((ClassAtom::Symbol(c), rest)),
                Escape::Class(kind) => Ok((ClassAtom::Class(kind), rest)),
            }
        },

        Some((']', _)) => Err(ParseError::Unexpected{ at, found: ']', expected: "a class item" }),
        Some((c, rest)) => Ok((ClassAtom::Symbol(c), rest)),
        None => Err(ParseError::UnexpectedEnd{ at, expected: "a class item" }),
    }
}

fn parse_posix_class(it: Cursor<'_>) -> ParseResult<'_, ClassItem> {
    let at = it.offset;
    let it = it.advance(); // consume '['
    let mut it = it.advance(); // consume ':'

    let mut name = String::new();
    while let Some((c, rest)) = it.next() {
        if c.is_ascii_lowercase() {
            name.push(c);
            it = rest;
        }
        else {
            break;
        }
    }

    let kind = match name.as_str() {
        "digit" => ClassKind::Digit,
        "space" => ClassKind::Space,
        "blank" => ClassKind::Blank,
        "ascii" => ClassKind::Ascii,
        "alpha" => ClassKind::Alpha,
        "alnum" => ClassKind::Alnum,
        _ => return Err(ParseError::UnknownClassName{ at, name }),
    };

    match it.next() {
        Some((':', rest)) => match rest.next() {
            Some((']', rest)) => Ok((ClassItem::Class(kind), rest)),
            Some((c, _)) => Err(ParseError::Unexpected{ at: rest.offset, found: c, expected: "']'" }),
            None => Err(ParseError::UnexpectedEnd{ at: rest.offset, expected: "']'" }),
        },
        Some((c, _)) => Err(ParseError::Unexpected{ at: it.offset, found: c, expected: "':'" }),
        None => Err(ParseError::UnexpectedEnd{ at: it.offset, expected: "':'" }),
    }
}

fn parse_escape(it: Cursor<'_>) -> ParseResult<'_, Escape> {
    let at = it.offset;
    match it.next() {
        Some(('d', rest)) => Ok((Escape::Class(ClassKind::Digit), rest)),
        Some(('D', rest)) => Ok((Escape::Class(ClassKind::NotDigit), rest)),
        Some(('s', rest)) => Ok((Escape::Class(ClassKind::Space), rest)),
        Some(('S', rest)) => Ok((Escape::Class(ClassKind::NotSpace), rest)),
        Some(('h', rest)) => Ok((Escape::Class(ClassKind::Blank), rest)),
        Some(('H', rest)) => Ok((Escape::Class(ClassKind::NotBlank), rest)),

        Some((c, rest)) => {
            if SPECIAL_CHARS.contains(c) || c == '-' || c == '^' {
                Ok((Escape::Symbol(c), rest))
            }
            else {
                Err(ParseError::UnknownEscape{ at, found: c })
            }
        },

        None => Err(ParseError::UnexpectedEnd{ at, expected: "an escape" }),
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
