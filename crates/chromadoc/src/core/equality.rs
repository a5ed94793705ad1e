use super::ColorSpace;
use crate::{Bits, Float};

/// The factor for reducing the resolution of floating point numbers before
/// comparing them. It drops the least significant decimal digit.
#[cfg(feature = "f64")]
const ROUNDING_FACTOR: Float = 1e14;
#[cfg(not(feature = "f64"))]
const ROUNDING_FACTOR: Float = 1e5;

/// Test macro for asserting the equality of floating point numbers.
///
/// This macro relies on [`to_eq_bits`] to normalize the two floating point
/// numbers by zeroing out not-a-numbers, reducing resolution, and dropping the
/// sign of negative zeros and then compares the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical. Its
/// message places the numbers below each other at the beginning of subsequent
/// lines for easy comparability.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that two color coordinate slices describe the same
/// color.
///
/// Given a color space and two coordinate arrays, this macro normalizes the
/// coordinates by zeroing out not-a-numbers, scaling hues and CIELAB
/// coordinates to unit range, reducing resolution, and dropping the sign of
/// negative zeros before comparing the resulting bit strings.
///
/// # Panics
///
/// This macro panics if the normalized bit strings are not identical.
#[cfg(test)]
macro_rules! assert_same_coordinates {
    ($space:expr , $cs1:expr , $cs2:expr $(,)?) => {
        let (space, cs1, cs2) = ($space, $cs1, $cs2);
        let bits1 = $crate::core::to_eq_coordinates(space, cs1);
        let bits2 = $crate::core::to_eq_coordinates(space, cs2);
        assert_eq!(
            bits1, bits2,
            "color coordinates differ:\n{:?}\n{:?}",
            cs1, cs2
        );
    };
}

#[cfg(test)]
pub(crate) use assert_same_coordinates;

// --------------------------------------------------------------------------------------------------------------------

/// Normalize the color coordinates.
///
/// This function replaces not-a-number coordinates with zero. For semantic
/// consistency, if the hue of a polar color space is not-a-number, it also
/// replaces saturation or chroma with zero.
#[inline]
pub(crate) fn normalize(space: ColorSpace, coordinates: &[Float; 3]) -> [Float; 3] {
    let mut result = *coordinates;

    if let Some(index) = space.hue_index() {
        if result[index].is_nan() {
            result[index] = 0.0;
            result[1] = 0.0;
        }
    }

    for c in &mut result {
        if c.is_nan() {
            *c = 0.0;
        }
    }

    result
}

/// Normalize coordinates for equality testing.
#[cfg(test)]
#[must_use = "function returns new color coordinates and does not mutate original value"]
pub(crate) fn to_eq_coordinates(space: ColorSpace, coordinates: &[Float; 3]) -> [Bits; 3] {
    let mut result = normalize(space, coordinates);

    // Scale CIELAB to unit range.
    if space.is_lab() {
        result[0] /= 100.0;
        result[1] /= 100.0;
        if space == ColorSpace::Lab {
            result[2] /= 100.0;
        }
    }

    // Normalize rotation and scale to unit range.
    if let Some(index) = space.hue_index() {
        result[index] = result[index].rem_euclid(360.0) / 360.0;
    }

    result.map(to_eq_bits)
}

// --------------------------------------------------------------------------------------------------------------------

/// Helper function to normalize a floating point number before hashing or
/// equality testing.
///
/// This function zeros out not-a-number, reduces significant digits after the
/// decimal, and drops the sign of negative zero and returns the result as a bit
/// string. It is only public because the [`assert_close_enough`] test macro
/// uses it.
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    // Eliminate not-a-number.
    let mut f = if f.is_nan() { 0.0 } else { f };

    // Reduce precision.
    f = (ROUNDING_FACTOR * f).round();

    // Too much negativity!
    if f == 0.0 {
        f = 0.0;
    }

    f.to_bits()
}

// ====================================================================================================================
