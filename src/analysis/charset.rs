// character class detection and effective alphabet size

use serde::Serialize;

/// pool size for ascii lowercase letters
pub const LOWER_POOL: u32 = 26;
/// pool size for ascii uppercase letters
pub const UPPER_POOL: u32 = 26;
/// pool size for ascii digits
pub const DIGIT_POOL: u32 = 10;
/// pool size for ascii punctuation (32) plus space
pub const SYMBOL_POOL: u32 = 33;
/// conservative pool size for anything outside printable ascii
pub const OTHER_POOL: u32 = 26;

/// which character classes a password uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CharsetProfile {
    pub has_lower: bool,
    pub has_upper: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub has_other: bool,
    /// sum of the pool sizes of every class present (0 for empty input)
    pub alphabet_size: u32,
}

impl CharsetProfile {
    /// number of the four standard classes (lower/upper/digit/symbol) present
    pub fn standard_class_count(&self) -> usize {
        self.has_lower as usize
            + self.has_upper as usize
            + self.has_digit as usize
            + self.has_symbol as usize
    }

    /// log2 of the alphabet size, 0 for an empty profile
    pub fn bits_per_char(&self) -> f64 {
        if self.alphabet_size == 0 {
            0.0
        } else {
            f64::from(self.alphabet_size).log2()
        }
    }
}

/// true for the characters counted in the symbol pool
pub fn is_symbol(c: char) -> bool {
    c.is_ascii_punctuation() || c == ' '
}

/// classify a password (as code points) into its character classes
pub fn classify(chars: &[char]) -> CharsetProfile {
    let mut profile = CharsetProfile::default();

    for &c in chars {
        if c.is_ascii_lowercase() {
            profile.has_lower = true;
        } else if c.is_ascii_uppercase() {
            profile.has_upper = true;
        } else if c.is_ascii_digit() {
            profile.has_digit = true;
        } else if is_symbol(c) {
            profile.has_symbol = true;
        } else {
            profile.has_other = true;
        }
    }

    let pools = [
        (profile.has_lower, LOWER_POOL),
        (profile.has_upper, UPPER_POOL),
        (profile.has_digit, DIGIT_POOL),
        (profile.has_symbol, SYMBOL_POOL),
        (profile.has_other, OTHER_POOL),
    ];
    profile.alphabet_size = pools
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, size)| size)
        .sum();

    profile
}
