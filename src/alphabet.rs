//! Alphabet and direct-mapping tables
//!
//! All tables are built at compile time. A malformed alphabet or a
//! collision in the direct mapping fails the const evaluation, so a
//! non-bijective table can never reach a running program.

use base64::alphabet::Alphabet;

// UTF-64 format constants
pub const ALPHABET: &str = "_ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-";
pub const ALPHABET_LEN: usize = 64;

/// Punctuation and whitespace mapped onto `_` and `A`..=`W` (indices 0..=23)
pub const SPECIAL: &str = "_\"',.;:!?()[]{}#=+-*/\\\n ";

/// Characters that encode as themselves
pub const AS_IS: &str = "abcdefghijklmnopqrstuvwxyz0123456789-";

/// Leading marker for scalars below 64
pub const LOW_MARKER: char = 'X';
/// Leading marker for scalars 64..=127
pub const HIGH_MARKER: char = 'Y';
/// Leading marker for scalars 128 and above
pub const EXTENDED_MARKER: char = 'Z';

/// Largest Unicode scalar value
pub const MAX_SCALAR: u32 = 0x10FFFF;

const LOW_MARKER_INDEX: u8 = 24;
const HIGH_MARKER_INDEX: u8 = 25;
const EXTENDED_MARKER_INDEX: u8 = 26;

const NONE: u8 = 0xFF;

static BASE64_ALPHABET: Alphabet = match Alphabet::new(ALPHABET) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("UTF-64 alphabet must be 64 distinct printable ASCII symbols"),
};

static TABLES: Tables = Tables::build();

/// Lookup tables, indexed by ASCII byte or alphabet index
struct Tables {
    /// symbol byte -> alphabet index
    index: [u8; 128],
    /// direct scalar -> alphabet index
    encode: [u8; 128],
    /// alphabet index -> direct scalar
    decode: [u8; ALPHABET_LEN],
}

impl Tables {
    const fn build() -> Self {
        let symbols = ALPHABET.as_bytes();
        assert!(symbols.len() == ALPHABET_LEN, "alphabet must have 64 symbols");

        let mut index = [NONE; 128];
        let mut i = 0;
        while i < ALPHABET_LEN {
            let symbol = symbols[i] as usize;
            assert!(symbol < 128, "alphabet symbols must be ASCII");
            assert!(index[symbol] == NONE, "duplicate alphabet symbol");
            index[symbol] = i as u8;
            i += 1;
        }
        assert!(index[LOW_MARKER as usize] == LOW_MARKER_INDEX);
        assert!(index[HIGH_MARKER as usize] == HIGH_MARKER_INDEX);
        assert!(index[EXTENDED_MARKER as usize] == EXTENDED_MARKER_INDEX);

        let special = SPECIAL.as_bytes();
        let as_is = AS_IS.as_bytes();
        assert!(special.len() == LOW_MARKER_INDEX as usize, "special set must fill indices 0..=23");

        // Decode side: every symbol yields at most one scalar.
        let mut decode = [NONE; ALPHABET_LEN];
        let mut i = 0;
        while i < special.len() {
            decode[i] = special[i];
            i += 1;
        }
        let mut i = 0;
        while i < as_is.len() {
            let c = as_is[i];
            let k = index[c as usize];
            assert!(k != NONE, "as-is character missing from alphabet");
            assert!(decode[k as usize] == NONE, "symbol decodes to two scalars");
            decode[k as usize] = c;
            i += 1;
        }

        // Encode side: as-is wins over the special slot for the same scalar.
        let mut encode = [NONE; 128];
        let mut i = 0;
        while i < as_is.len() {
            let c = as_is[i] as usize;
            encode[c] = index[c];
            i += 1;
        }
        let mut i = 0;
        while i < special.len() {
            let c = special[i] as usize;
            assert!(c < 128, "special characters must be ASCII");
            if encode[c] == NONE {
                encode[c] = i as u8;
            } else {
                assert!(encode[c] == index[c], "special character listed twice");
            }
            i += 1;
        }

        let mut c = 0;
        while c < 128 {
            let k = encode[c];
            if k != NONE {
                assert!(decode[k as usize] as usize == c, "direct mapping does not round-trip");
                assert!(
                    k != LOW_MARKER_INDEX && k != HIGH_MARKER_INDEX && k != EXTENDED_MARKER_INDEX,
                    "class markers cannot be direct targets"
                );
            }
            c += 1;
        }

        Self { index, encode, decode }
    }
}

/// The UTF-64 alphabet as a validated [`base64`] alphabet.
///
/// Useful when binary payloads should share the symbol set of UTF-64 text,
/// e.g. with `base64::engine::GeneralPurpose::new(base64_alphabet(), ..)`.
pub fn base64_alphabet() -> &'static Alphabet {
    &BASE64_ALPHABET
}

/// Symbol at alphabet index `index`.
///
/// # Panics
///
/// Panics if `index >= 64`.
pub fn symbol_at(index: u8) -> char {
    char::from(ALPHABET.as_bytes()[usize::from(index)])
}

/// Alphabet index of `symbol`, if it is one of the 64 symbols
pub fn index_of(symbol: char) -> Option<u8> {
    if !symbol.is_ascii() {
        return None;
    }
    match TABLES.index[symbol as usize] {
        NONE => None,
        k => Some(k),
    }
}

/// Alphabet index that `scalar` encodes to as a single symbol
pub fn direct_class_of(scalar: char) -> Option<u8> {
    if !scalar.is_ascii() {
        return None;
    }
    match TABLES.encode[scalar as usize] {
        NONE => None,
        k => Some(k),
    }
}

/// Scalar that `symbol` decodes to in leading position.
///
/// Class markers and non-alphabet symbols yield `None`. `R` is accepted as
/// an alias of `-`, which itself encodes as `-`.
pub fn direct_scalar_of(symbol: char) -> Option<char> {
    let k = index_of(symbol)?;
    match TABLES.decode[usize::from(k)] {
        NONE => None,
        c => Some(char::from(c)),
    }
}

/// Number of continuation symbols in an extended unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Scalars up to 0x7FF: 5 header bits, 1 continuation
    One,
    /// Scalars up to 0xFFFF: 4 header bits, 2 continuations
    Two,
    /// Scalars up to 0x10FFFF: 3 header bits, 3 continuations
    Three,
}

impl Width {
    /// Smallest width class that holds `scalar`
    pub fn of(scalar: char) -> Self {
        match u32::from(scalar) {
            0..=0x7FF => Width::One,
            0x800..=0xFFFF => Width::Two,
            _ => Width::Three,
        }
    }

    /// Width class announced by a header digit, if any
    pub fn from_header(header: u8) -> Option<Self> {
        match header {
            0x00..=0x1F => Some(Width::One),
            0x20..=0x2F => Some(Width::Two),
            0x30..=0x37 => Some(Width::Three),
            _ => None,
        }
    }

    pub const fn continuations(self) -> u32 {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Three => 3,
        }
    }

    pub const fn header_base(self) -> u8 {
        match self {
            Width::One => 0x00,
            Width::Two => 0x20,
            Width::Three => 0x30,
        }
    }

    pub const fn header_mask(self) -> u8 {
        match self {
            Width::One => 0x1F,
            Width::Two => 0x0F,
            Width::Three => 0x07,
        }
    }
}

/// How a scalar is represented as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    /// Single symbol at the given alphabet index
    Direct(u8),
    /// `X` + one digit
    LowAscii,
    /// `Y` + one digit
    HighAscii,
    /// `Z` + header + continuations
    Extended(Width),
}

impl Class {
    /// Canonical class of `scalar`, i.e. the one the encoder emits
    pub fn of(scalar: char) -> Self {
        if let Some(k) = direct_class_of(scalar) {
            return Class::Direct(k);
        }
        match u32::from(scalar) {
            0x00..=0x3F => Class::LowAscii,
            0x40..=0x7F => Class::HighAscii,
            _ => Class::Extended(Width::of(scalar)),
        }
    }

    /// Number of symbols in a unit of this class
    pub fn unit_len(self) -> usize {
        match self {
            Class::Direct(_) => 1,
            Class::LowAscii | Class::HighAscii => 2,
            Class::Extended(width) => 2 + width.continuations() as usize,
        }
    }
}

/// Meaning of a symbol in leading position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lead {
    Direct(char),
    LowAscii,
    HighAscii,
    Extended,
}

impl Lead {
    /// Classify a leading symbol; `None` if it starts no unit
    pub fn of(symbol: char) -> Option<Self> {
        match symbol {
            LOW_MARKER => Some(Lead::LowAscii),
            HIGH_MARKER => Some(Lead::HighAscii),
            EXTENDED_MARKER => Some(Lead::Extended),
            _ => direct_scalar_of(symbol).map(Lead::Direct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_index_roundtrip() {
        for k in 0..ALPHABET_LEN as u8 {
            assert_eq!(index_of(symbol_at(k)), Some(k));
        }
        assert_eq!(symbol_at(0), '_');
        assert_eq!(symbol_at(24), LOW_MARKER);
        assert_eq!(symbol_at(63), '-');
    }

    #[test]
    fn test_index_of_rejects_foreign_symbols() {
        for c in ['?', '=', '+', '/', ' ', '\n', 'é', '🧐'] {
            assert_eq!(index_of(c), None, "{:?} should not be in the alphabet", c);
        }
    }

    #[test]
    fn test_as_is_characters_map_to_themselves() {
        for c in AS_IS.chars() {
            let k = direct_class_of(c).unwrap();
            assert_eq!(symbol_at(k), c);
            assert_eq!(direct_scalar_of(c), Some(c));
        }
    }

    #[test]
    fn test_special_characters_use_low_indices() {
        for c in SPECIAL.chars().filter(|&c| c != '-') {
            let k = direct_class_of(c).unwrap();
            assert!(k < 24, "{:?} mapped to index {}", c, k);
            assert_eq!(direct_scalar_of(symbol_at(k)), Some(c));
        }
        assert_eq!(direct_class_of(' '), Some(23));
        assert_eq!(direct_class_of('\n'), Some(22));
    }

    #[test]
    fn test_hyphen_alias() {
        assert_eq!(direct_class_of('-'), Some(63));
        assert_eq!(direct_scalar_of('R'), Some('-'));
        assert_eq!(direct_scalar_of('-'), Some('-'));
    }

    #[test]
    fn test_direct_mapping_is_injective() {
        let mut seen = std::collections::HashMap::new();
        for c in (0u8..128).map(char::from) {
            if let Some(k) = direct_class_of(c) {
                assert!(seen.insert(k, c).is_none(), "index {} reached twice", k);
                let s = symbol_at(k);
                assert_eq!(direct_scalar_of(s), Some(c));
            }
        }
        assert_eq!(seen.len(), 60);
    }

    #[test]
    fn test_markers_are_not_direct() {
        for m in [LOW_MARKER, HIGH_MARKER, EXTENDED_MARKER] {
            assert_eq!(direct_scalar_of(m), None);
            assert!(index_of(m).is_some());
        }
        assert_eq!(Lead::of('X'), Some(Lead::LowAscii));
        assert_eq!(Lead::of('Y'), Some(Lead::HighAscii));
        assert_eq!(Lead::of('Z'), Some(Lead::Extended));
        assert_eq!(Lead::of('W'), Some(Lead::Direct(' ')));
        assert_eq!(Lead::of('?'), None);
    }

    #[test]
    fn test_width_headers() {
        assert_eq!(Width::from_header(0x00), Some(Width::One));
        assert_eq!(Width::from_header(0x1F), Some(Width::One));
        assert_eq!(Width::from_header(0x20), Some(Width::Two));
        assert_eq!(Width::from_header(0x2F), Some(Width::Two));
        assert_eq!(Width::from_header(0x30), Some(Width::Three));
        assert_eq!(Width::from_header(0x37), Some(Width::Three));
        assert_eq!(Width::from_header(0x38), None);
        assert_eq!(Width::from_header(0x3F), None);
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(Class::of('\u{3E}'), Class::LowAscii);
        assert_eq!(Class::of('\u{3F}'), Class::Direct(8));
        assert_eq!(Class::of('\u{40}'), Class::HighAscii);
        assert_eq!(Class::of('\u{7F}'), Class::HighAscii);
        assert_eq!(Class::of('\u{80}'), Class::Extended(Width::One));
        assert_eq!(Class::of('\u{7FF}'), Class::Extended(Width::One));
        assert_eq!(Class::of('\u{800}'), Class::Extended(Width::Two));
        assert_eq!(Class::of('\u{FFFF}'), Class::Extended(Width::Two));
        assert_eq!(Class::of('\u{10000}'), Class::Extended(Width::Three));
        assert_eq!(Class::of('\u{10FFFF}'), Class::Extended(Width::Three));
        assert_eq!(Class::of('a'), Class::Direct(27));
        assert_eq!(Class::of('?').unit_len(), 1);
        assert_eq!(Class::of('%').unit_len(), 2);
        assert_eq!(Class::of('€').unit_len(), 4);
    }

    #[test]
    fn test_base64_alphabet_matches() {
        assert_eq!(base64_alphabet().as_str(), ALPHABET);
    }
}
