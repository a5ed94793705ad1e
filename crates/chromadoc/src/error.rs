//! Utility module with chromadoc's errors.

use crate::{Color, Float};

/// An erroneous color format.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorFormatError {
    /// A color format that is neither a color name nor starts with a known
    /// prefix such as `#`, `rgb(`, or `hsl(`.
    #[error("color format should be a color name, hashed hex, `rgb()`, or `hsl()`")]
    UnknownFormat,

    /// A color format with unexpected characters or an unexpected number of
    /// characters. For example, `#00` is missing a hexadecimal digit, whereas
    /// `#💩00` has the correct length but contains an unsuitable character.
    #[error("color format should contain only valid ASCII characters")]
    UnexpectedCharacters,

    /// A parenthesized color format without the opening parenthesis.
    #[error("color format should include an opening parenthesis but has none")]
    NoOpeningParenthesis,

    /// A parenthesized color format without the closing parenthesis. For
    /// example, `rgb(1, 2, 3` is missing the closing parenthesis.
    #[error("color format should include a closing parenthesis but has none")]
    NoClosingParenthesis,

    /// A color format that is missing a coordinate. For example, `rgb(0, 0)`
    /// is missing the third coordinate.
    #[error("color format should have 3 coordinates but is missing one")]
    MissingCoordinate,

    /// A color format that has a malformed hexadecimal number. For example,
    /// `#efg` has a malformed third coordinate.
    #[error("color format coordinates should be hexadecimal integers but are not")]
    MalformedHex,

    /// A color format that has a malformed number as coordinate. For example,
    /// `rgb(1, 0..1, 0)` has a malformed second coordinate.
    #[error("color format coordinates should be numbers but are not")]
    MalformedNumber,

    /// A color format with more than three coordinates plus alpha. For
    /// example, `rgb(1, 2, 3, 4, 5)` has one coordinate too many.
    #[error("color format should have 3 coordinates and an optional alpha but has more")]
    TooManyCoordinates,
}

// ====================================================================================================================

/// An error while selecting a contrasting color.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContrastError {
    /// The base color or a candidate color is not a valid color.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorFormatError),

    /// A numeric argument is out of range, e.g., a step that is not positive
    /// and hence would never make progress.
    #[error("argument `{name}` should be positive and finite but is {value}")]
    InvalidArgument { name: &'static str, value: Float },

    /// A color with an infinite or not-a-number coordinate. Such colors can
    /// only be created with constructors such as [`Color::srgb`], since
    /// parsing rejects them.
    #[error("color {0:?} should have finite coordinates but does not")]
    NonFiniteColor(Color),
}

// ====================================================================================================================

/// An error while parsing or executing a template helper command.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// A subject that does not parse as a color.
    #[error("`{text}` is not a valid color: {source}")]
    InvalidColor {
        text: String,
        source: ColorFormatError,
    },

    /// An operation that requires a color but has none.
    #[error("operation `{0}` requires a color")]
    MissingColor(&'static str),

    /// An operation invoked with the wrong number of colors.
    #[error("operation `{operation}` expects {expected} colors but got {actual}")]
    WrongArity {
        operation: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// An operation that is recognized but not implemented.
    #[error("operation `{0}` is not supported")]
    UnsupportedOperation(String),

    /// An option whose value is malformed.
    #[error("option `{key}` has invalid value `{value}`")]
    InvalidOption { key: String, value: String },

    /// A failure while selecting a contrasting color.
    #[error(transparent)]
    Contrast(#[from] ContrastError),
}
