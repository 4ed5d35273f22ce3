// random password generator
//
// every character is an independent uniform draw from the union of the
// selected class alphabets, using the operating system's csprng.

use rand::rngs::OsRng;
use rand::Rng;

use crate::error::{Error, Result};

pub const DEFAULT_LENGTH: usize = 14;

pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &[u8] = b"0123456789";
/// the 32 printable ascii punctuation characters
pub const SYMBOLS: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lower,
        CharClass::Upper,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    pub fn alphabet(self) -> &'static [u8] {
        match self {
            CharClass::Lower => LOWERCASE,
            CharClass::Upper => UPPERCASE,
            CharClass::Digit => DIGITS,
            CharClass::Symbol => SYMBOLS,
        }
    }

    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.alphabet().contains(&(c as u8))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub lower: bool,
    pub upper: bool,
    pub digits: bool,
    pub symbols: bool,
    /// resample until every selected class appears at least once
    pub require_every_class: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            lower: true,
            upper: true,
            digits: true,
            symbols: true,
            require_every_class: false,
        }
    }
}

impl GeneratorOptions {
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// selected classes in canonical order
    pub fn classes(&self) -> Vec<CharClass> {
        let flags = [self.lower, self.upper, self.digits, self.symbols];
        CharClass::ALL
            .iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(class, _)| *class)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.length < 1 {
            return Err(Error::invalid("length must be at least 1"));
        }
        let classes = self.classes();
        if classes.is_empty() {
            return Err(Error::invalid("at least one character class must be selected"));
        }
        if self.require_every_class && self.length < classes.len() {
            return Err(Error::invalid(format!(
                "length {} is too short to include all {} selected classes",
                self.length,
                classes.len()
            )));
        }
        Ok(())
    }
}

/// generate a password with the given options
pub fn generate(options: &GeneratorOptions) -> Result<String> {
    options.validate()?;
    let classes = options.classes();
    let alphabet: Vec<u8> = classes
        .iter()
        .flat_map(|c| c.alphabet().iter().copied())
        .collect();

    let mut rng = OsRng;
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        let password: String = (0..options.length)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
            .collect();

        // rejection keeps the result uniform over the accepted set
        if !options.require_every_class
            || classes
                .iter()
                .all(|class| password.chars().any(|c| class.contains(c)))
        {
            tracing::debug!(
                length = options.length,
                classes = classes.len(),
                attempts,
                "generated password"
            );
            return Ok(password);
        }
    }
}
