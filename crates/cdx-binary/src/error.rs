use thiserror::Error;

/// Result type alias for property decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Hard decoding failures.
///
/// Every variant that stems from a property payload carries the byte position
/// of that property in the source stream. These propagate up to the
/// tree-walking/domain-mapping driver; cosmetic degradations are reported as
/// [`DecodeWarning`] instead and never fail a decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A property's byte length does not match the size required by the
    /// requested semantic type. Never silently truncated or padded.
    #[error("{kind} property at offset {position} requires {expected}, got {actual} bytes")]
    SizeMismatch {
        kind: &'static str,
        expected: &'static str,
        actual: usize,
        position: usize,
    },

    /// An object id does not resolve to any registered object.
    #[error("object id {id} does not resolve to any object (offset {position})")]
    UnresolvedReference { id: u32, position: usize },

    /// An object id resolved, but the registered instance is not of the
    /// expected type.
    #[error("object id {id} is not a `{expected}` (offset {position})")]
    TypeMismatch {
        id: u32,
        expected: &'static str,
        position: usize,
    },

    /// A color index is absent from the color table. There is no safe visual
    /// default, so this is always a hard failure.
    #[error("color index {index} is not in the color table (offset {position})")]
    MissingColor { index: u32, position: usize },

    /// A date property's fields do not form a valid calendar date/time.
    #[error("invalid date fields in property at offset {position}")]
    InvalidDate { position: usize },

    /// An enumerated value has no token in its table.
    #[error("value {value} has no token in the {domain} table")]
    UnknownValue { domain: &'static str, value: i32 },

    /// A token has no value in its enumerated table.
    #[error("token `{token}` is not in the {domain} table")]
    UnknownToken { domain: &'static str, token: String },
}

/// Degradations absorbed during decoding.
///
/// The runtime recovery is the same for all charset conditions (fall back to
/// Windows-1252), but the conditions stay distinct here for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeWarning {
    /// A font index was absent from the font table; a default font was
    /// synthesized in its place.
    #[error("font index {index} is not in the font table; using the default font (offset {position})")]
    MissingFont { index: u16, position: usize },

    /// A text run's font declared the "unknown" charset (value 0).
    #[error("font {font} has an unknown charset; decoding text as Windows-1252")]
    UnknownCharset { font: u16 },

    /// A text run's charset has no mapped decoder.
    #[error("charset {charset} of font {font} is unsupported; decoding text as Windows-1252")]
    UnsupportedCharset { charset: u16, font: u16 },
}
