//! # utf64
//!
//! UTF-64 is a terse, human-readable, URL-safe encoding for Unicode text.
//!
//! Output uses only the 64 base64url-compatible symbols:
//!
//! ```text
//! _ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-
//! ```
//!
//! ## Units
//!
//! Every Unicode scalar value becomes one unit:
//!
//! | Input                                  | Unit                          |
//! |----------------------------------------|-------------------------------|
//! | `a`-`z`, `0`-`9`, `-`                  | the character itself          |
//! | `_ " ' , . ; : ! ? ( ) [ ] { } # = + * / \` newline, space | one of `_`, `A`-`W` |
//! | other code points below 64             | `X` + digit                   |
//! | other code points 64..=127             | `Y` + digit                   |
//! | code points 128 and above              | `Z` + header + 1 to 3 digits  |
//!
//! The `Z` header digit tells how many continuation digits follow, like a
//! UTF-8 lead byte without the synchronisation bits. `X`, `Y` and `Z` are
//! markers only in leading position; after a marker they are plain digits.
//!
//! ```rust
//! use utf64::Utf64;
//!
//! let encoded = "Contact info: <@handle@example.com>".encode_utf64();
//! assert_eq!(encoded, "YContactWinfoFWX7Y_handleY_exampleDcomX9");
//! assert_eq!(encoded.decode_utf64().unwrap(), "Contact info: <@handle@example.com>");
//! ```
//!
//! ## Canonical form
//!
//! The decoder accepts a few forms the encoder never produces, such as `R`
//! for `-` or a `Z` unit for an ASCII character. [`DecodeConfig::strict`]
//! rejects them, so that each text has exactly one accepted encoding.

pub mod alphabet;
pub mod encoder;
pub mod decoder;

pub use decoder::{decode, DecodeConfig, DecodeError, Decoder};
pub use encoder::{encode, encode_scalars, encoded_len, EncodeError, Encoder};

/// Conversion to and from UTF-64 for string-like values
pub trait Utf64 {
    /// Convert into UTF-64
    fn encode_utf64(&self) -> String;

    /// Convert a UTF-64 string back into the original text
    fn decode_utf64(&self) -> Result<String, DecodeError>;
}

impl<T: AsRef<str> + ?Sized> Utf64 for T {
    fn encode_utf64(&self) -> String {
        encode(self.as_ref())
    }

    fn decode_utf64(&self) -> Result<String, DecodeError> {
        decode(self.as_ref())
    }
}
