//! Short code generation.
//!
//! Codes are drawn uniformly and independently per character from a fixed
//! alphabet. Randomness does not need to be cryptographic; uniqueness is
//! guaranteed by the store, not by the generator.

use rand::Rng;
use thiserror::Error;

/// Lowercase, uppercase and digits: 62 symbols.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated short code.
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Longest code the `shortened_url.short_code` column (`VARCHAR(10)`) can hold.
pub const MAX_CODE_LENGTH: usize = 10;

/// Rejected generator configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,

    #[error("alphabet must contain only ASCII alphanumeric symbols")]
    NonAlphanumericAlphabet,

    #[error("alphabet repeats symbol '{0}'")]
    DuplicateSymbol(char),

    #[error("code length must be greater than 0")]
    ZeroLength,

    #[error("code length must be at most {MAX_CODE_LENGTH}, got {0}")]
    LengthTooLong(usize),
}

/// Generates random fixed-length short codes.
#[derive(Debug, Clone)]
pub struct ShortCodeGenerator {
    alphabet: Box<[u8]>,
    length: usize,
}

impl ShortCodeGenerator {
    /// Builds a generator over a custom alphabet.
    ///
    /// A narrow alphabet shrinks the code space, which is how tests force
    /// collisions and saturation.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the alphabet is empty, repeats a symbol or
    /// contains anything other than ASCII letters and digits, or if `length`
    /// is outside `1..=MAX_CODE_LENGTH`.
    pub fn with_alphabet(alphabet: &str, length: usize) -> Result<Self, GeneratorError> {
        if alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }

        if !alphabet.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GeneratorError::NonAlphanumericAlphabet);
        }

        let mut seen = [false; 128];
        for byte in alphabet.bytes() {
            if std::mem::replace(&mut seen[byte as usize], true) {
                return Err(GeneratorError::DuplicateSymbol(byte as char));
            }
        }

        if length == 0 {
            return Err(GeneratorError::ZeroLength);
        }

        if length > MAX_CODE_LENGTH {
            return Err(GeneratorError::LengthTooLong(length));
        }

        Ok(Self {
            alphabet: alphabet.as_bytes().into(),
            length,
        })
    }

    /// Generates one candidate code.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let code = ShortCodeGenerator::default().generate();
    /// assert_eq!(code.len(), 10);
    /// ```
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())] as char)
            .collect()
    }

    /// Number of distinct codes this generator can produce, saturating at `u128::MAX`.
    pub fn code_space(&self) -> u128 {
        (self.alphabet.len() as u128).saturating_pow(self.length as u32)
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for ShortCodeGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.as_bytes().into(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}
