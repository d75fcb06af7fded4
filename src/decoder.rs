//! UTF-64 decoder

use crate::alphabet::{self, Class, Lead, Width, MAX_SCALAR};
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;

/// Error type for UTF-64 decoding
///
/// Positions count symbols (chars) from the start of the input. For
/// truncated or out-of-range units the position is where the unit starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended inside a multi-symbol unit
    UnexpectedEnd { position: usize },
    /// Symbol is not valid where it appears
    InvalidSymbol { symbol: char, position: usize },
    /// Extended header digit announces no width class (>= 0x38)
    InvalidPrefix { header: u8, position: usize },
    /// Assembled value is above 0x10FFFF
    ScalarOutOfRange { value: u32, position: usize },
    /// Assembled value is a UTF-16 surrogate
    Surrogate { value: u32, position: usize },
    /// Unit is valid but not the form the encoder produces
    NonCanonical { position: usize },
}

impl DecodeError {
    /// Symbol position the error refers to
    pub fn position(&self) -> usize {
        match *self {
            DecodeError::UnexpectedEnd { position }
            | DecodeError::InvalidSymbol { position, .. }
            | DecodeError::InvalidPrefix { position, .. }
            | DecodeError::ScalarOutOfRange { position, .. }
            | DecodeError::Surrogate { position, .. }
            | DecodeError::NonCanonical { position } => position,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnexpectedEnd { position } => {
                write!(f, "Unexpected end of input in unit starting at {}", position)
            }
            DecodeError::InvalidSymbol { symbol, position } => {
                write!(f, "Invalid UTF-64 character {:?} at {}", symbol, position)
            }
            DecodeError::InvalidPrefix { header, position } => {
                write!(f, "Invalid extended prefix 0x{:02x} at {}", header, position)
            }
            DecodeError::ScalarOutOfRange { value, position } => {
                write!(f, "Code point 0x{:X} at {} is out of the Unicode range", value, position)
            }
            DecodeError::Surrogate { value, position } => {
                write!(f, "Code point 0x{:X} at {} is a surrogate", value, position)
            }
            DecodeError::NonCanonical { position } => {
                write!(f, "Non-canonical unit at {}", position)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Configuration for decoding
#[derive(Debug, Clone, Default)]
pub struct DecodeConfig {
    /// Reject units the encoder would never emit (aliases, needless
    /// escapes, over-wide extended units)
    pub canonical_only: bool,
}

impl DecodeConfig {
    /// Configuration that only accepts canonical encodings
    pub fn strict() -> Self {
        Self { canonical_only: true }
    }
}

/// Decode UTF-64 with the default configuration
///
/// ```rust
/// assert_eq!(utf64::decode("YHelloCWworldG").unwrap(), "Hello, world!");
/// assert!(utf64::decode("Z").is_err());
/// ```
pub fn decode(input: &str) -> std::result::Result<String, DecodeError> {
    Decoder::new().decode(input)
}

/// Decodes UTF-64 text
pub struct Decoder {
    /// Verbosity level for non-canonical unit warnings
    verbose: u8,
    config: DecodeConfig,
}

impl Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self {
            verbose: 0,
            config: DecodeConfig::default(),
        }
    }

    /// Set verbosity level: 0 is silent, 1 and above warn on non-canonical units
    pub fn with_verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Set decoding configuration
    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode a UTF-64 string
    ///
    /// Stops at the first invalid unit; no partial text is returned.
    pub fn decode(&self, input: &str) -> std::result::Result<String, DecodeError> {
        let mut output = String::with_capacity(input.len());
        let mut symbols = input.chars().enumerate();

        while let Some((position, symbol)) = symbols.next() {
            let lead = Lead::of(symbol).ok_or(DecodeError::InvalidSymbol { symbol, position })?;

            let (scalar, class) = match lead {
                Lead::Direct(scalar) => (scalar, Class::Direct(digit_of(symbol, position)?)),
                Lead::LowAscii => {
                    let n = next_digit(&mut symbols, position)?;
                    (char::from(n), Class::LowAscii)
                }
                Lead::HighAscii => {
                    let n = next_digit(&mut symbols, position)?;
                    (char::from(64 + n), Class::HighAscii)
                }
                Lead::Extended => {
                    let (scalar, width) = extended(&mut symbols, position)?;
                    (scalar, Class::Extended(width))
                }
            };

            if class != Class::of(scalar) {
                self.non_canonical(position, scalar)?;
            }
            output.push(scalar);
        }

        Ok(output)
    }

    /// Decode everything readable from `reader`
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<String> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .context("UTF-64 input is not valid UTF-8")?;
        self.decode(&input).map_err(|e| anyhow!("Failed to decode UTF-64: {}", e))
    }

    /// Decode the contents of a file
    pub fn decode_file(&self, path: &Path) -> Result<String> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        self.decode(&input)
            .map_err(|e| anyhow!("Failed to decode '{}': {}", path.display(), e))
    }

    fn non_canonical(&self, position: usize, scalar: char) -> std::result::Result<(), DecodeError> {
        if self.config.canonical_only {
            return Err(DecodeError::NonCanonical { position });
        }
        if self.verbose > 0 {
            eprintln!(
                "Warning: unit at {} decodes to {:?} but is not its canonical encoding {:?}",
                position,
                scalar,
                crate::encode(scalar.encode_utf8(&mut [0; 4]))
            );
        }
        Ok(())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn digit_of(symbol: char, position: usize) -> std::result::Result<u8, DecodeError> {
    alphabet::index_of(symbol).ok_or(DecodeError::InvalidSymbol { symbol, position })
}

/// Read the next symbol of the unit starting at `start` as a digit
fn next_digit<I>(symbols: &mut I, start: usize) -> std::result::Result<u8, DecodeError>
where
    I: Iterator<Item = (usize, char)>,
{
    let (position, symbol) = symbols
        .next()
        .ok_or(DecodeError::UnexpectedEnd { position: start })?;
    digit_of(symbol, position)
}

/// Header plus continuations of a `Z` unit
fn extended<I>(symbols: &mut I, start: usize) -> std::result::Result<(char, Width), DecodeError>
where
    I: Iterator<Item = (usize, char)>,
{
    let header = next_digit(symbols, start)?;
    let width = Width::from_header(header)
        .ok_or(DecodeError::InvalidPrefix { header, position: start })?;

    let mut value = u32::from(header & width.header_mask());
    for _ in 0..width.continuations() {
        value = (value << 6) + u32::from(next_digit(symbols, start)?);
    }

    if value > MAX_SCALAR {
        return Err(DecodeError::ScalarOutOfRange { value, position: start });
    }
    let scalar = char::from_u32(value).ok_or(DecodeError::Surrogate { value, position: start })?;
    Ok((scalar, width))
}
