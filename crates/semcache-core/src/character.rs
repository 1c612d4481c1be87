// Character classification and case folding

// ---------------------------------------------------------------------------
// Character type classification
// ---------------------------------------------------------------------------

/// Character type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    Letter,
    Digit,
    Whitespace,
    /// Anything else: punctuation, symbols, control characters.
    Symbol,
}

/// Returns the character type for a given character.
///
/// Letters follow the Unicode `Alphabetic` property. Digits are decimal
/// digits only (general category `Nd`), so `é` is a letter, `٣` is a digit,
/// and `²` or `½` are symbols.
pub fn get_char_type(c: char) -> CharType {
    if c.is_alphabetic() {
        CharType::Letter
    } else if is_decimal_digit(c) {
        CharType::Digit
    } else if c.is_whitespace() {
        CharType::Whitespace
    } else {
        CharType::Symbol
    }
}

/// Code points of the digit zero of every decimal digit run (`Nd`).
///
/// Each script's digits 0-9 are encoded contiguously from these points.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Check whether a character is a decimal digit in any script.
///
/// Superscripts, fractions, circled numbers and other `Numeric` characters
/// that are not decimal digits return `false`.
pub fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    let cp = c as u32;
    c.is_numeric()
        && DECIMAL_ZEROS
            .iter()
            .any(|&zero| cp >= zero && cp - zero < 10)
}

/// Check whether a character continues a word for whole-word boundary tests.
///
/// Any Unicode letter or decimal digit glues onto an adjacent keyword.
/// Whitespace, punctuation and symbols (`!`, `,`, `+`, `#`, `²`, ...) are
/// boundaries.
pub fn is_word_char(c: char) -> bool {
    matches!(get_char_type(c), CharType::Letter | CharType::Digit)
}

/// Check whether a character belongs to a similarity token (`[a-zA-Z0-9]`).
///
/// Token runs are ASCII-only, so a non-ASCII letter splits a word in two.
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

// ---------------------------------------------------------------------------
// Simple case conversion
//
// The standard library's to_lowercase produces an iterator because some
// characters lower-case to several characters. Keyword matching works on
// character offsets, so only the first character is kept and the folded text
// has exactly as many characters as the input.
// ---------------------------------------------------------------------------

/// Convert a character to its simple lowercase equivalent.
///
/// For characters with multi-character lowercase expansions, returns only
/// the first character.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Lower-case `text` one character at a time.
///
/// The result always has the same number of characters as `text`, so an
/// index into the folded slice is also a character offset into the input.
pub fn fold_case(text: &str) -> Vec<char> {
    text.chars().map(simple_lower).collect()
}

/// Lower-case `text` into a `String` using [`simple_lower`].
pub fn fold_case_string(text: &str) -> String {
    text.chars().map(simple_lower).collect()
}
