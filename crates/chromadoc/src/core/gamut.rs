use super::{convert, ColorSpace};
use crate::Float;

/// Determine whether the coordinates are in gamut for the color space.
///
/// Unbounded color spaces are always in gamut. For sRGB and linear sRGB, all
/// three coordinates must be in unit range; for HSL and HSV, saturation and
/// lightness or value must be. The tolerance absorbs floating point error.
pub(crate) fn in_gamut(space: ColorSpace, coordinates: &[Float; 3]) -> bool {
    const TOLERANCE: Float = 1e-9;

    let range = -TOLERANCE..=1.0 + TOLERANCE;
    match space.hue_index() {
        _ if !space.is_bounded() => true,
        Some(_) => range.contains(&coordinates[1]) && range.contains(&coordinates[2]),
        None => coordinates.iter().all(|c| range.contains(c)),
    }
}

/// Clip the coordinates to the gamut of the color space.
///
/// This function clamps coordinates of bounded color spaces to unit range,
/// leaving the hue of HSL and HSV untouched. It returns the coordinates of
/// unbounded color spaces as is.
pub(crate) fn clip(space: ColorSpace, coordinates: &[Float; 3]) -> [Float; 3] {
    let [c1, c2, c3] = *coordinates;

    match space.hue_index() {
        _ if !space.is_bounded() => *coordinates,
        Some(_) => [c1, c2.clamp(0.0, 1.0), c3.clamp(0.0, 1.0)],
        None => [c1.clamp(0.0, 1.0), c2.clamp(0.0, 1.0), c3.clamp(0.0, 1.0)],
    }
}

/// Convert the coordinates to sRGB and clip them to its gamut.
///
/// This is the conversion applied after every color manipulation, since the
/// canonical representation of a color are its 8-bit sRGB coordinates.
#[inline]
pub(crate) fn to_clipped_srgb(space: ColorSpace, coordinates: &[Float; 3]) -> [Float; 3] {
    clip(ColorSpace::Srgb, &convert(space, ColorSpace::Srgb, coordinates))
}

#[cfg(test)]
mod test {
    use super::{clip, in_gamut, to_clipped_srgb};
    use crate::ColorSpace::*;

    #[test]
    fn test_gamut() {
        assert!(in_gamut(Srgb, &[0.0, 0.5, 1.0]), "unit range is in gamut");
        assert!(!in_gamut(Srgb, &[0.0, 0.5, 1.1]), "1.1 is out of gamut");
        assert!(in_gamut(Hsl, &[400.0, 0.5, 1.0]), "hue has no bounds");
        assert!(in_gamut(Lab, &[150.0, -300.0, 300.0]), "Lab is unbounded");

        assert_eq!(clip(Srgb, &[-0.5, 0.5, 1.5]), [0.0, 0.5, 1.0]);
        assert_eq!(clip(Hsv, &[400.0, 1.5, -0.5]), [400.0, 1.0, 0.0]);
        assert_eq!(clip(Xyz, &[2.0, 2.0, 2.0]), [2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_clipped_srgb() {
        let [r, g, b] = to_clipped_srgb(Lab, &[120.0, 0.0, 0.0]);
        assert_eq!([r, g, b], [1.0, 1.0, 1.0]);
    }
}
