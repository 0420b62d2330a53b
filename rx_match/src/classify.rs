/**
 * The named symbol classes and the classification interface behind them.
 */

/// The named predicate classes the grammar knows about, together with their
/// complements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassKind {
    Digit,
    NotDigit,
    Space,
    NotSpace,
    Blank,
    NotBlank,
    Alpha,
    NotAlpha,
    Alnum,
    NotAlnum,
    Ascii,
    NotAscii,
}

/**
 * Fixed code-point tables backing every class. These are the definitive
 * definitions: classification never consults a locale.
 */

const DIGIT: &[(char, char)] = &[('0', '9')];
const SPACE: &[(char, char)] = &[('\t', '\r'), (' ', ' ')];
const BLANK: &[(char, char)] = &[('\t', '\t'), (' ', ' ')];
const ALPHA: &[(char, char)] = &[('A', 'Z'), ('a', 'z')];
const ALNUM: &[(char, char)] = &[('0', '9'), ('A', 'Z'), ('a', 'z')];
const ASCII: &[(char, char)] = &[('\u{0}', '\u{7f}')];

const NOT_DIGIT: &[(char, char)] = &[('\u{0}', '/'), (':', '\u{10FFFF}')];
const NOT_SPACE: &[(char, char)] = &[('\u{0}', '\u{8}'), ('\u{e}', '\u{1f}'), ('!', '\u{10FFFF}')];
const NOT_BLANK: &[(char, char)] = &[('\u{0}', '\u{8}'), ('\n', '\u{1f}'), ('!', '\u{10FFFF}')];
const NOT_ALPHA: &[(char, char)] = &[('\u{0}', '@'), ('[', '`'), ('{', '\u{10FFFF}')];
const NOT_ALNUM: &[(char, char)] = &[('\u{0}', '/'), (':', '@'), ('[', '`'), ('{', '\u{10FFFF}')];
const NOT_ASCII: &[(char, char)] = &[('\u{80}', '\u{10FFFF}')];

impl ClassKind {
    /// The enumerated character ranges of the class, used when a class has
    /// to be flattened into plain literal/range terms (negated bracket
    /// expressions).
    pub fn ranges(self) -> &'static [(char, char)] {
        match self {
            ClassKind::Digit => DIGIT,
            ClassKind::NotDigit => NOT_DIGIT,
            ClassKind::Space => SPACE,
            ClassKind::NotSpace => NOT_SPACE,
            ClassKind::Blank => BLANK,
            ClassKind::NotBlank => NOT_BLANK,
            ClassKind::Alpha => ALPHA,
            ClassKind::NotAlpha => NOT_ALPHA,
            ClassKind::Alnum => ALNUM,
            ClassKind::NotAlnum => NOT_ALNUM,
            ClassKind::Ascii => ASCII,
            ClassKind::NotAscii => NOT_ASCII,
        }
    }

    pub fn complement(self) -> ClassKind {
        match self {
            ClassKind::Digit => ClassKind::NotDigit,
            ClassKind::NotDigit => ClassKind::Digit,
            ClassKind::Space => ClassKind::NotSpace,
            ClassKind::NotSpace => ClassKind::Space,
            ClassKind::Blank => ClassKind::NotBlank,
            ClassKind::NotBlank => ClassKind::Blank,
            ClassKind::Alpha => ClassKind::NotAlpha,
            ClassKind::NotAlpha => ClassKind::Alpha,
            ClassKind::Alnum => ClassKind::NotAlnum,
            ClassKind::NotAlnum => ClassKind::Alnum,
            ClassKind::Ascii => ClassKind::NotAscii,
            ClassKind::NotAscii => ClassKind::Ascii,
        }
    }

    pub fn matches<A>(self, sym: &A) -> bool where A : Classify {
        match self {
            ClassKind::Digit => sym.is_digit(),
            ClassKind::NotDigit => !sym.is_digit(),
            ClassKind::Space => sym.is_space(),
            ClassKind::NotSpace => !sym.is_space(),
            ClassKind::Blank => sym.is_blank(),
            ClassKind::NotBlank => !sym.is_blank(),
            ClassKind::Alpha => sym.is_alpha(),
            ClassKind::NotAlpha => !sym.is_alpha(),
            ClassKind::Alnum => sym.is_alnum(),
            ClassKind::NotAlnum => !sym.is_alnum(),
            ClassKind::Ascii => sym.is_ascii(),
            ClassKind::NotAscii => !sym.is_ascii(),
        }
    }
}

/**
 * Classification of a symbol type, so the match algebra stays generic over
 * the symbol. Implementations must be pure functions of the symbol value.
 */

pub trait Classify {
    fn is_digit(&self) -> bool;
    fn is_space(&self) -> bool;
    fn is_blank(&self) -> bool;
    fn is_alpha(&self) -> bool;
    fn is_alnum(&self) -> bool;
    fn is_ascii(&self) -> bool;
}

fn in_table(c: char, table: &[(char, char)]) -> bool {
    table.iter().any(|(lo, hi)| *lo <= c && c <= *hi)
}

impl Classify for char {
    fn is_digit(&self) -> bool {
        in_table(*self, DIGIT)
    }

    fn is_space(&self) -> bool {
        in_table(*self, SPACE)
    }

    fn is_blank(&self) -> bool {
        in_table(*self, BLANK)
    }

    fn is_alpha(&self) -> bool {
        in_table(*self, ALPHA)
    }

    fn is_alnum(&self) -> bool {
        in_table(*self, ALNUM)
    }

    fn is_ascii(&self) -> bool {
        in_table(*self, ASCII)
    }
}

impl Classify for u8 {
    fn is_digit(&self) -> bool {
        Classify::is_digit(&(*self as char))
    }

    fn is_space(&self) -> bool {
        Classify::is_space(&(*self as char))
    }

    fn is_blank(&self) -> bool {
        Classify::is_blank(&(*self as char))
    }

    fn is_alpha(&self) -> bool {
        Classify::is_alpha(&(*self as char))
    }

    fn is_alnum(&self) -> bool {
        Classify::is_alnum(&(*self as char))
    }

    fn is_ascii(&self) -> bool {
        (*self as u32) < 0x80
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod classify_tests {
    use super::*;

    fn accepted_by(kind: ClassKind, chars: &str) -> bool {
        chars.chars().all(|c| kind.matches(&c))
    }

    fn rejected_by(kind: ClassKind, chars: &str) -> bool {
        chars.chars().all(|c| !kind.matches(&c))
    }

    #[test]
    fn digits() {
        assert!(accepted_by(ClassKind::Digit, "0123456789"));
        assert!(rejected_by(ClassKind::Digit, "a/: "));
    }

    #[test]
    fn whitespace() {
        assert!(accepted_by(ClassKind::Space, " \t\n\r\u{b}\u{c}"));
        assert!(rejected_by(ClassKind::Space, "a0!"));
    }

    #[test]
    fn horizontal_whitespace() {
        assert!(accepted_by(ClassKind::Blank, " \t"));
        assert!(rejected_by(ClassKind::Blank, "\n\ra"));
    }

    #[test]
    fn alphabetic() {
        assert!(accepted_by(ClassKind::Alpha, "azAZ"));
        assert!(rejected_by(ClassKind::Alpha, "09@[`{"));
    }

    #[test]
    fn alphanumeric() {
        assert!(accepted_by(ClassKind::Alnum, "azAZ09"));
        assert!(rejected_by(ClassKind::Alnum, "/:@[`{"));
    }

    #[test]
    fn ascii() {
        assert!(accepted_by(ClassKind::Ascii, "a0\u{7f}\u{0}"));
        assert!(rejected_by(ClassKind::Ascii, "\u{80}é"));
    }

    #[test]
    fn complements_disagree_everywhere() {
        let kinds = [
            ClassKind::Digit,
            ClassKind::Space,
            ClassKind::Blank,
            ClassKind::Alpha,
            ClassKind::Alnum,
            ClassKind::Ascii,
        ];
        for kind in &kinds {
            for c in "a Z0\t\n!\u{80}".chars() {
                assert_ne!(kind.matches(&c), kind.complement().matches(&c));
            }
        }
    }

    #[test]
    fn tables_agree_with_predicates() {
        // Every class must accept exactly the code points its table spans
        let kinds = [
            ClassKind::Digit,
            ClassKind::Space,
            ClassKind::Blank,
            ClassKind::Alpha,
            ClassKind::Alnum,
            ClassKind::Ascii,
        ];
        for kind in &kinds {
            for c in "\u{0}\t\n azZ09/:@[`{\u{7f}\u{80}".chars() {
                let tabled = kind.ranges().iter().any(|(lo, hi)| *lo <= c && c <= *hi);
                assert_eq!(tabled, kind.matches(&c));
            }
        }
    }

    #[test]
    fn bytes_classify_like_their_chars() {
        assert!(ClassKind::Digit.matches(&b'7'));
        assert!(ClassKind::Blank.matches(&b'\t'));
        assert!(!ClassKind::Alpha.matches(&b'['));
    }
}
