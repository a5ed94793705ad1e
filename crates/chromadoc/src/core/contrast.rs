use super::conversion::rgb_to_linear_rgb;
use super::{convert, to_clipped_srgb, ColorSpace};
use crate::Float;

/// The change in CIELAB lightness or CIELCh chroma for an adjustment of one.
///
/// Brightening, darkening, saturating, and desaturating are all measured in
/// multiples of this constant. Hence brightening by 1 adds 18 to L.
pub(crate) const ADJUSTMENT_UNIT: Float = 18.0;

/// Shift the CIELAB lightness of the given color by `amount` adjustment units.
///
/// The result is in sRGB and clipped to its gamut.
pub(crate) fn shift_lightness(
    space: ColorSpace,
    coordinates: &[Float; 3],
    amount: Float,
) -> [Float; 3] {
    let [l, a, b] = convert(space, ColorSpace::Lab, coordinates);
    to_clipped_srgb(
        ColorSpace::Lab,
        &[ADJUSTMENT_UNIT.mul_add(amount, l), a, b],
    )
}

/// Shift the CIELCh chroma of the given color by `amount` adjustment units.
///
/// Chroma does not drop below zero. The result is in sRGB and clipped to its
/// gamut.
pub(crate) fn shift_chroma(space: ColorSpace, coordinates: &[Float; 3], amount: Float) -> [Float; 3] {
    let [l, c, h] = convert(space, ColorSpace::Lch, coordinates);
    to_clipped_srgb(
        ColorSpace::Lch,
        &[l, ADJUSTMENT_UNIT.mul_add(amount, c).max(0.0), h],
    )
}

// --------------------------------------------------------------------------------------------------------------------

/// The coefficients for computing the relative luminance of linear sRGB
/// coordinates, per WCAG 2.
const SRGB_LUMINANCE: [Float; 3] = [0.2126, 0.7152, 0.0722];

/// Compute the WCAG relative luminance of the given color.
///
/// The color is clipped to the sRGB gamut first. The result ranges from 0 for
/// black to 1 for white.
pub(crate) fn to_relative_luminance(space: ColorSpace, coordinates: &[Float; 3]) -> Float {
    let [r, g, b] = rgb_to_linear_rgb(&to_clipped_srgb(space, coordinates));
    let [c1, c2, c3] = SRGB_LUMINANCE;

    r.mul_add(c1, g.mul_add(c2, b * c3))
}

/// Compute the WCAG contrast ratio between two relative luminance values.
///
/// The arguments are interchangeable. The ratio ranges from 1 for identical
/// luminance to 21 for black against white.
pub(crate) fn to_contrast_ratio(luminance1: Float, luminance2: Float) -> Float {
    let (lighter, darker) = if luminance1 >= luminance2 {
        (luminance1, luminance2)
    } else {
        (luminance2, luminance1)
    };

    (lighter + 0.05) / (darker + 0.05)
}

// --------------------------------------------------------------------------------------------------------------------

/// Find the sRGB color with the target relative luminance.
///
/// This function bisects the straight line in sRGB between the given color
/// and black or white, whichever lies in the direction of the target
/// luminance. It stops once the luminance is within `1e-7` of the target or
/// after 20 rounds. A target of 0 or 1 yields black or white directly.
pub(crate) fn with_relative_luminance(
    space: ColorSpace,
    coordinates: &[Float; 3],
    target: Float,
) -> [Float; 3] {
    const TOLERANCE: Float = 1e-7;
    const MAX_ROUNDS: usize = 20;

    if target <= 0.0 {
        return [0.0; 3];
    } else if target >= 1.0 {
        return [1.0; 3];
    }

    let origin = to_clipped_srgb(space, coordinates);
    let current = to_relative_luminance(ColorSpace::Srgb, &origin);
    let (mut low, mut high) = if current > target {
        ([0.0; 3], origin)
    } else {
        (origin, [1.0; 3])
    };

    let mut mid = origin;
    for _ in 0..MAX_ROUNDS {
        mid = [
            (low[0] + high[0]) / 2.0,
            (low[1] + high[1]) / 2.0,
            (low[2] + high[2]) / 2.0,
        ];

        let luminance = to_relative_luminance(ColorSpace::Srgb, &mid);
        if (target - luminance).abs() < TOLERANCE {
            break;
        } else if luminance > target {
            high = mid;
        } else {
            low = mid;
        }
    }

    mid
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{
        shift_chroma, shift_lightness, to_contrast_ratio, to_relative_luminance,
        with_relative_luminance,
    };
    use crate::assert_close_enough;
    use crate::core::{convert, from_24bit, to_24bit};
    use crate::ColorSpace::*;

    #[test]
    fn test_luminance() {
        assert_close_enough!(to_relative_luminance(Srgb, &[0.0, 0.0, 0.0]), 0.0);
        assert_close_enough!(to_relative_luminance(Srgb, &[1.0, 1.0, 1.0]), 1.0);
        assert_close_enough!(to_relative_luminance(Srgb, &[1.0, 0.0, 0.0]), 0.2126);

        // Out-of-gamut colors are clipped first.
        assert_close_enough!(to_relative_luminance(Srgb, &[1.5, 1.5, 1.5]), 1.0);
    }

    #[test]
    fn test_contrast_ratio() {
        assert!((to_contrast_ratio(0.0, 1.0) - 21.0).abs() < 1e-9, "black on white");
        assert!((to_contrast_ratio(1.0, 0.0) - 21.0).abs() < 1e-9, "white on black");
        assert_close_enough!(to_contrast_ratio(0.3, 0.3), 1.0);
    }

    #[test]
    fn test_shift_lightness() {
        let gray = [0.5, 0.5, 0.5];
        let lighter = shift_lightness(Srgb, &gray, 1.0);
        let l1 = convert(Srgb, Lab, &gray)[0];
        let l2 = convert(Srgb, Lab, &lighter)[0];
        assert!((l2 - l1 - 18.0).abs() < 1e-9, "{} vs {}", l1, l2);

        assert_eq!(shift_lightness(Srgb, &gray, 10.0), [1.0, 1.0, 1.0]);
        assert_eq!(shift_lightness(Srgb, &gray, -10.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shift_chroma() {
        let gray = from_24bit(0x80, 0x80, 0x80);
        assert_eq!(to_24bit(Srgb, &shift_chroma(Srgb, &gray, -1.0)), [0x80, 0x80, 0x80]);

        let red = [0.8, 0.2, 0.2];
        let c1 = convert(Srgb, Lch, &red)[1];
        let c2 = convert(Srgb, Lch, &shift_chroma(Srgb, &red, -1.0))[1];
        assert!((c1 - c2 - 18.0).abs() < 1e-6, "{} vs {}", c1, c2);
    }

    #[test]
    fn test_with_luminance() {
        let target = 0.5;
        let color = with_relative_luminance(Srgb, &[0.8, 0.1, 0.1], target);
        let luminance = to_relative_luminance(Srgb, &color);
        assert!((luminance - target).abs() < 1e-3, "{}", luminance);

        assert_eq!(with_relative_luminance(Srgb, &[0.8, 0.1, 0.1], 0.0), [0.0; 3]);
        assert_eq!(with_relative_luminance(Srgb, &[0.8, 0.1, 0.1], 1.0), [1.0; 3]);
    }
}
