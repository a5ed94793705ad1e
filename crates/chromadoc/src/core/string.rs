use super::{from_24bit, names};
use crate::error::ColorFormatError;
use crate::{ColorSpace, Float};

/// Parse a color in hexadecimal format, with or without leading hash. If
/// successful, this function returns the three coordinates and alpha as
/// unsigned bytes. It transparently handles single-digit coordinates and
/// defaults to an opaque alpha.
fn parse_hashed(s: &str) -> Result<[u8; 4], ColorFormatError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.is_ascii() {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    let factor = match digits.len() {
        3 | 4 => 1,
        6 | 8 => 2,
        _ => return Err(ColorFormatError::UnexpectedCharacters),
    };

    let parse_coordinate = |index: usize| -> Result<u8, ColorFormatError> {
        let t = digits
            .get(factor * index..factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        if !t.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorFormatError::MalformedHex);
        }
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    };

    let alpha = if digits.len() == 4 * factor {
        parse_coordinate(3)?
    } else {
        0xff
    };

    Ok([
        parse_coordinate(0)?,
        parse_coordinate(1)?,
        parse_coordinate(2)?,
        alpha,
    ])
}

/// Determine whether the string looks like unhashed hexadecimal.
fn is_bare_hex(s: &str) -> bool {
    matches!(s.len(), 3 | 4 | 6 | 8) && s.bytes().all(|b| b.is_ascii_hexdigit())
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse a number with optional percent sign. This function returns the
/// number and whether it was a percentage.
fn parse_number(s: Option<&str>) -> Result<(Float, bool), ColorFormatError> {
    let t = s.map(str::trim).ok_or(ColorFormatError::MissingCoordinate)?;
    if t.is_empty() {
        return Err(ColorFormatError::MissingCoordinate);
    }

    let (t, is_percent) = t
        .strip_suffix('%')
        .map_or((t, false), |number| (number, true));
    let t = t.strip_suffix("deg").unwrap_or(t);

    let n: Float = t.parse().map_err(|_| ColorFormatError::MalformedNumber)?;
    if !n.is_finite() {
        return Err(ColorFormatError::MalformedNumber);
    }

    Ok((n, is_percent))
}

/// Parse the alpha of a functional color, if any.
fn parse_alpha(s: Option<&str>) -> Result<Float, ColorFormatError> {
    match s {
        None => Ok(1.0),
        Some(_) => {
            let (n, is_percent) = parse_number(s)?;
            let alpha = if is_percent { n / 100.0 } else { n };
            Ok(alpha.clamp(0.0, 1.0))
        }
    }
}

/// Parse a color in CSS functional notation. This function recognizes the
/// `rgb()`, `rgba()`, `hsl()`, and `hsla()` functions with comma-separated
/// arguments as well as with space-separated arguments and a slash before
/// alpha. RGB channels are integers between 0 and 255 or percentages.
/// Saturation and lightness are percentages, with the percent sign optional.
fn parse_functional(s: &str) -> Result<(ColorSpace, [Float; 3], Float), ColorFormatError> {
    let (space, rest) = s
        .strip_prefix("rgba")
        .or_else(|| s.strip_prefix("rgb"))
        .map(|r| (ColorSpace::Srgb, r))
        .or_else(|| {
            s.strip_prefix("hsla")
                .or_else(|| s.strip_prefix("hsl"))
                .map(|r| (ColorSpace::Hsl, r))
        })
        .ok_or(ColorFormatError::UnknownFormat)?;

    let body = rest
        .trim_start()
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.strip_suffix(')')
                .ok_or(ColorFormatError::NoClosingParenthesis)
        })?;

    let parts: Vec<&str> = if body.contains(',') {
        body.split(',').collect()
    } else {
        body.split(|c: char| c.is_whitespace() || c == '/')
            .filter(|t| !t.is_empty())
            .collect()
    };

    let mut iter = parts.into_iter();
    let c1 = parse_number(iter.next())?;
    let c2 = parse_number(iter.next())?;
    let c3 = parse_number(iter.next())?;
    let alpha = parse_alpha(iter.next())?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    let coordinates = if space == ColorSpace::Srgb {
        let channel = |(n, is_percent): (Float, bool)| {
            if is_percent {
                n / 100.0
            } else {
                n / 255.0
            }
        };
        [channel(c1), channel(c2), channel(c3)]
    } else {
        [c1.0, c2.0 / 100.0, c3.0 / 100.0]
    };

    Ok((space, coordinates, alpha))
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse the string into a color.
///
/// This function recognizes the CSS named colors including `transparent`,
/// hexadecimal notation with three, four, six, or eight digits and an
/// optional leading hash, as well as the `rgb()`, `rgba()`, `hsl()`, and
/// `hsla()` CSS functions. Before parsing, it trims leading and trailing white
/// space and converts ASCII letters to lowercase. It returns the color space,
/// coordinates, and alpha.
pub(crate) fn parse(s: &str) -> Result<(ColorSpace, [Float; 3], Float), ColorFormatError> {
    let lowercase = s.trim().to_ascii_lowercase();
    let s = lowercase.as_str();

    if s == "transparent" {
        return Ok((ColorSpace::Srgb, [0.0; 3], 0.0));
    } else if let Some([r, g, b]) = names::from_name(s) {
        return Ok((ColorSpace::Srgb, from_24bit(r, g, b), 1.0));
    }

    if s.starts_with('#') || is_bare_hex(s) {
        let [r, g, b, a] = parse_hashed(s)?;
        Ok((ColorSpace::Srgb, from_24bit(r, g, b), Float::from(a) / 255.0))
    } else if s.starts_with("rgb") || s.starts_with("hsl") {
        parse_functional(s)
    } else {
        Err(ColorFormatError::UnknownFormat)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Format 24-bit coordinates and an 8-bit alpha as hashed hexadecimal.
///
/// The alpha is only included if the color is not fully opaque.
pub(crate) fn format_hex(rgb: [u8; 3], alpha: u8) -> String {
    let [r, g, b] = rgb;
    if alpha == 0xff {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, alpha)
    }
}

/// Format 24-bit coordinates and alpha in CSS functional notation.
///
/// Opaque colors use `rgb()`, all others `rgba()` with alpha rounded to three
/// decimals.
pub(crate) fn format_css(rgb: [u8; 3], alpha: Float) -> String {
    let [r, g, b] = rgb;
    if alpha >= 1.0 {
        format!("rgb({},{},{})", r, g, b)
    } else {
        let alpha = (alpha.max(0.0) * 1000.0).round() / 1000.0;
        format!("rgba({},{},{},{})", r, g, b, alpha)
    }
}

// ====================================================================================================================
