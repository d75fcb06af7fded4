//! UTF-64 encoder

use crate::alphabet::{self, Class, EXTENDED_MARKER, HIGH_MARKER, LOW_MARKER, MAX_SCALAR};
use anyhow::{Context, Result};

/// Error type for encoding raw scalar values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Value is above 0x10FFFF or a surrogate code point
    InvalidScalar(u32),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::InvalidScalar(value) if *value > MAX_SCALAR => {
                write!(f, "Code point 0x{:X} is out of the Unicode range", value)
            }
            EncodeError::InvalidScalar(value) => {
                write!(f, "Code point 0x{:X} is not a Unicode scalar value", value)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Encode `text` into UTF-64
///
/// ```rust
/// assert_eq!(utf64::encode("Hello, world!"), "YHelloCWworldG");
/// ```
pub fn encode(text: &str) -> String {
    let mut output = String::with_capacity(encoded_len(text));
    for scalar in text.chars() {
        push_unit(&mut output, scalar);
    }
    output
}

/// Encode a sequence of raw code points.
///
/// Fails on the first value that is not a Unicode scalar value; nothing
/// is returned for the values before it.
pub fn encode_scalars<I>(scalars: I) -> std::result::Result<String, EncodeError>
where
    I: IntoIterator<Item = u32>,
{
    let mut output = String::new();
    for value in scalars {
        let scalar = char::from_u32(value).ok_or(EncodeError::InvalidScalar(value))?;
        push_unit(&mut output, scalar);
    }
    Ok(output)
}

/// Length in symbols of `encode(text)`
pub fn encoded_len(text: &str) -> usize {
    text.chars().map(|c| Class::of(c).unit_len()).sum()
}

fn push_unit(output: &mut String, scalar: char) {
    let n = u32::from(scalar);
    match Class::of(scalar) {
        Class::Direct(index) => output.push(alphabet::symbol_at(index)),
        Class::LowAscii => {
            output.push(LOW_MARKER);
            output.push(digit(n));
        }
        Class::HighAscii => {
            output.push(HIGH_MARKER);
            output.push(digit(n - 64));
        }
        Class::Extended(width) => {
            let continuations = width.continuations();
            output.push(EXTENDED_MARKER);
            // header_base + (n >> 6k) never exceeds 0x34
            output.push(alphabet::symbol_at(
                width.header_base() + (n >> (6 * continuations)) as u8,
            ));
            for k in (0..continuations).rev() {
                output.push(digit(n >> (6 * k)));
            }
        }
    }
}

/// Symbol for the low six bits of `value`
fn digit(value: u32) -> char {
    alphabet::symbol_at((value & 0x3F) as u8)
}

/// Encodes text into UTF-64
pub struct Encoder {
    // Currently stateless, but reserved for future options
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {}
    }

    /// Encode text to a string
    pub fn encode(&self, text: &str) -> String {
        encode(text)
    }

    /// Encode raw code points to a string
    pub fn encode_scalars<I>(&self, scalars: I) -> std::result::Result<String, EncodeError>
    where
        I: IntoIterator<Item = u32>,
    {
        encode_scalars(scalars)
    }

    /// Encode text directly to a writer
    pub fn encode_to_writer<W: std::io::Write>(&self, text: &str, mut writer: W) -> Result<()> {
        let encoded = self.encode(text);
        writer.write_all(encoded.as_bytes())?;
        Ok(())
    }

    /// Encode text to a file
    pub fn encode_to_file(&self, text: &str, path: &std::path::Path) -> Result<()> {
        let encoded = self.encode(text);
        std::fs::write(path, encoded)
            .with_context(|| format!("Failed to write: {}", path.display()))?;
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
