//! Character classes.
//!
//! The DFA never looks at characters directly. Every input character is
//! first reduced to a [`CharClass`]; characters that behave identically in
//! every rule share a class, which keeps transition rows at
//! [`CharClass::COUNT`] entries instead of one per code point.
//!
//! ASCII goes through a const lookup table. Everything above ASCII is
//! resolved by a handful of range rules: Latin-1 supplement letters are
//! identifier characters, LS and PS are line breaks, the rest is
//! [`CharClass::Other`].
//!
//! One class is dynamic: inside an alternative-quote body the active closing
//! delimiter is reported as [`CharClass::QuoteCloser`] regardless of what
//! the character would normally be.

/// Equivalence class of an input character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CharClass {
    /// Control characters and anything above Latin-1 without its own rule.
    Other = 0,
    /// `'`
    Quote,
    /// `"`
    DoubleQuote,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// Single-character operators and brackets: `!%&(),;<>?@[]^{|}~`
    Operator,
    /// `\` and `` ` ``. Not operators in the dialect, but valid
    /// alternative-quote delimiters.
    Punct,
    /// `0`
    Zero,
    /// `1`-`9`
    Digit,
    /// `q` / `Q`
    LetterQ,
    /// `b` / `B`
    LetterB,
    /// `x` / `X`
    LetterX,
    /// `e` / `E`
    LetterE,
    /// `d`, `f` and uppercase forms (real-number suffixes).
    LetterDF,
    /// `a`, `c` and uppercase forms (hex digits with no other role).
    HexLetter,
    /// `n` / `N`
    LetterN,
    /// `u` / `U`
    LetterU,
    /// `l` / `L`
    LetterL,
    /// `i` / `I`
    LetterI,
    /// `s` / `S`
    LetterS,
    /// `o` / `O`
    LetterO,
    /// `t` / `T`
    LetterT,
    /// Remaining identifier characters: other letters, `_`, `#`, `$`,
    /// and U+0080..=U+00FF.
    IdentOther,
    /// `\n` and `\r`
    LineFeed,
    /// Space, tab and form feed.
    Blank,
    /// Vertical tab, LS (U+2028) and PS (U+2029).
    LineBreakOther,
    /// The closing delimiter of the active alternative-quote literal.
    QuoteCloser,
}

impl CharClass {
    /// Number of classes; the width of one transition row.
    pub const COUNT: usize = 32;

    /// Every class, in discriminant order.
    pub const ALL: [CharClass; Self::COUNT] = [
        Self::Other,
        Self::Quote,
        Self::DoubleQuote,
        Self::Slash,
        Self::Star,
        Self::Plus,
        Self::Minus,
        Self::Dot,
        Self::Colon,
        Self::Equals,
        Self::Operator,
        Self::Punct,
        Self::Zero,
        Self::Digit,
        Self::LetterQ,
        Self::LetterB,
        Self::LetterX,
        Self::LetterE,
        Self::LetterDF,
        Self::HexLetter,
        Self::LetterN,
        Self::LetterU,
        Self::LetterL,
        Self::LetterI,
        Self::LetterS,
        Self::LetterO,
        Self::LetterT,
        Self::IdentOther,
        Self::LineFeed,
        Self::Blank,
        Self::LineBreakOther,
        Self::QuoteCloser,
    ];

    /// Column of this class in a transition row.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Letters and the other identifier-start characters.
    pub const fn starts_identifier(self) -> bool {
        matches!(
            self,
            Self::LetterQ
                | Self::LetterB
                | Self::LetterX
                | Self::LetterE
                | Self::LetterDF
                | Self::HexLetter
                | Self::LetterN
                | Self::LetterU
                | Self::LetterL
                | Self::LetterI
                | Self::LetterS
                | Self::LetterO
                | Self::LetterT
                | Self::IdentOther
        )
    }

    /// Identifier-start characters plus digits.
    pub const fn continues_identifier(self) -> bool {
        self.starts_identifier() || matches!(self, Self::Zero | Self::Digit)
    }

    /// Characters allowed to open an alternative-quote literal (`q'[...]'`).
    pub const fn is_quote_delimiter(self) -> bool {
        matches!(
            self,
            Self::Slash
                | Self::Star
                | Self::Plus
                | Self::Minus
                | Self::Dot
                | Self::Colon
                | Self::Equals
                | Self::Operator
                | Self::Punct
        )
    }
}

/// Class of every ASCII character, indexed by code point.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop index stays below 128"
)]
static ASCII_CLASSES: [CharClass; 128] = {
    let mut table = [CharClass::Other; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = ascii_class(i as u8);
        i += 1;
    }
    table
};

const fn ascii_class(byte: u8) -> CharClass {
    match byte.to_ascii_lowercase() {
        b'\'' => CharClass::Quote,
        b'"' => CharClass::DoubleQuote,
        b'/' => CharClass::Slash,
        b'*' => CharClass::Star,
        b'+' => CharClass::Plus,
        b'-' => CharClass::Minus,
        b'.' => CharClass::Dot,
        b':' => CharClass::Colon,
        b'=' => CharClass::Equals,
        b'!' | b'%' | b'&' | b'(' | b')' | b',' | b';' | b'<' | b'>' | b'?' | b'@' | b'['
        | b']' | b'^' | b'{' | b'|' | b'}' | b'~' => CharClass::Operator,
        b'\\' | b'`' => CharClass::Punct,
        b'0' => CharClass::Zero,
        b'1'..=b'9' => CharClass::Digit,
        b'q' => CharClass::LetterQ,
        b'b' => CharClass::LetterB,
        b'x' => CharClass::LetterX,
        b'e' => CharClass::LetterE,
        b'd' | b'f' => CharClass::LetterDF,
        b'a' | b'c' => CharClass::HexLetter,
        b'n' => CharClass::LetterN,
        b'u' => CharClass::LetterU,
        b'l' => CharClass::LetterL,
        b'i' => CharClass::LetterI,
        b's' => CharClass::LetterS,
        b'o' => CharClass::LetterO,
        b't' => CharClass::LetterT,
        b'g'..=b'z' | b'_' | b'#' | b'$' => CharClass::IdentOther,
        b'\n' | b'\r' => CharClass::LineFeed,
        b' ' | b'\t' | 0x0C => CharClass::Blank,
        0x0B => CharClass::LineBreakOther,
        _ => CharClass::Other,
    }
}

/// Classify `ch`.
///
/// `closer` is the closing delimiter of the alternative-quote literal being
/// scanned, if any; a character equal to it classifies as
/// [`CharClass::QuoteCloser`].
#[inline]
pub fn classify(ch: char, closer: Option<char>) -> CharClass {
    if closer == Some(ch) {
        return CharClass::QuoteCloser;
    }
    match u32::from(ch) {
        code @ 0..=0x7F => ASCII_CLASSES[code as usize],
        0x80..=0xFF => CharClass::IdentOther,
        0x2028 | 0x2029 => CharClass::LineBreakOther,
        _ => CharClass::Other,
    }
}

/// Whether `ch` may open an alternative-quote literal.
pub fn is_quote_delimiter(ch: char) -> bool {
    classify(ch, None).is_quote_delimiter()
}

/// Closing delimiter for an alternative-quote literal opened with `open`.
///
/// Bracket pairs close with their counterpart; every other delimiter closes
/// with itself. Returns `None` if `open` is not a delimiter at all.
pub fn closer_for(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        '<' => Some('>'),
        other if is_quote_delimiter(other) => Some(other),
        _ => None,
    }
}
