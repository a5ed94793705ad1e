use super::{normalize, ColorSpace};
use crate::Float;

/// Convert the given 24-bit RGB coordinates to floating point coordinates.
#[inline]
pub(crate) fn from_24bit(r: u8, g: u8, b: u8) -> [Float; 3] {
    [
        Float::from(r) / 255.0,
        Float::from(g) / 255.0,
        Float::from(b) / 255.0,
    ]
}

/// Convert a single unit-range coordinate to its 8-bit representation.
///
/// The coordinate is clamped to `0..=1` before scaling and rounding;
/// not-a-number becomes zero.
#[inline]
pub(crate) fn to_8bit(value: Float) -> u8 {
    if value.is_nan() {
        return 0;
    }

    // The clamped and rounded value always fits into a byte.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let byte = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    byte
}

/// Convert the color coordinates to 24-bit representation.
///
/// This function converts the color coordinates to 24-bit representation. It
/// assumes that the color is an RGB color in the given color space. Even if
/// the color is out of gamut, the conversion automatically clamps
/// coordinates to the range `0x00..=0xff`.
pub(crate) fn to_24bit(space: ColorSpace, coordinates: &[Float; 3]) -> [u8; 3] {
    let [r, g, b] = convert(space, ColorSpace::Srgb, coordinates);
    [to_8bit(r), to_8bit(g), to_8bit(b)]
}

// --------------------------------------------------------------------------------------------------------------------

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [ref row1, ref row2, ref row3] = *matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates from gamma-corrected sRGB to linear sRGB. This is a
/// one-hop, direct conversion.
pub(crate) fn rgb_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.04045 {
            value / 12.92
        } else {
            ((magnitude + 0.055) / 1.055).powf(2.4).copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

/// Convert coordinates from linear sRGB to gamma-corrected sRGB. This is a
/// one-hop, direct conversion.
pub(crate) fn linear_rgb_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.003_130_98 {
            value * 12.92
        } else {
            magnitude
                .powf(1.0 / 2.4)
                .mul_add(1.055, -0.055)
                .copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/srgb-linear.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.412_390_799_265_959_34, 0.357_584_339_383_878,    0.180_480_788_401_834_3  ],
    [ 0.212_639_005_871_510_27, 0.715_168_678_767_756,    0.072_192_315_360_733_71 ],
    [ 0.019_330_818_715_591_82, 0.119_194_779_794_625_98, 0.950_532_152_249_660_7  ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.240_969_941_904_522_6, -1.537_383_177_570_094,   -0.498_610_760_293_003_4  ],
    [ -0.969_243_636_280_879_6,  1.875_967_501_507_720_2,  0.041_555_057_407_175_59 ],
    [  0.055_630_079_696_993_66, -0.203_976_958_888_976_52, 1.056_971_514_242_878_6  ],
];

/// Convert coordinates for linear sRGB to XYZ. This is a one-hop, direct conversion.
fn linear_srgb_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    multiply(&LINEAR_SRGB_TO_XYZ, value)
}

/// Convert coordinates for XYZ to linear sRGB. This is a one-hop, direct
/// conversion.
fn xyz_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    multiply(&XYZ_TO_LINEAR_SRGB, value)
}

// --------------------------------------------------------------------------------------------------------------------

mod cylinder {
    use crate::Float;

    /// Compute the hue in degrees for the given RGB coordinates, with the
    /// maximum and the difference between maximum and minimum precomputed.
    fn hue(r: Float, g: Float, b: Float, max: Float, delta: Float) -> Float {
        #[allow(clippy::float_cmp)]
        let h = if r == max {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if g == max {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        h * 60.0
    }

    /// Convert coordinates for sRGB to HSL. This is a one-hop, direct
    /// conversion. Achromatic colors have a not-a-number hue.
    pub(crate) fn rgb_to_hsl(value: &[Float; 3]) -> [Float; 3] {
        let [r, g, b] = *value;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return [Float::NAN, 0.0, l];
        }

        let s = if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        [hue(r, g, b, max, delta), s, l]
    }

    /// Convert coordinates for HSL to sRGB. This is a one-hop, direct
    /// conversion, following CSS Color 4.
    pub(crate) fn hsl_to_rgb(value: &[Float; 3]) -> [Float; 3] {
        let [h, s, l] = *value;
        let h = if h.is_nan() { 0.0 } else { h.rem_euclid(360.0) };
        let a = s * l.min(1.0 - l);

        let f = |n: Float| {
            let k = (n + h / 30.0) % 12.0;
            a.mul_add(-(k - 3.0).min(9.0 - k).clamp(-1.0, 1.0), l)
        };

        [f(0.0), f(8.0), f(4.0)]
    }

    /// Convert coordinates for sRGB to HSV. This is a one-hop, direct
    /// conversion. Achromatic colors have a not-a-number hue.
    pub(crate) fn rgb_to_hsv(value: &[Float; 3]) -> [Float; 3] {
        let [r, g, b] = *value;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let s = if max == 0.0 { 0.0 } else { delta / max };

        if delta == 0.0 {
            [Float::NAN, s, max]
        } else {
            [hue(r, g, b, max, delta), s, max]
        }
    }

    /// Convert coordinates for HSV to sRGB. This is a one-hop, direct
    /// conversion.
    pub(crate) fn hsv_to_rgb(value: &[Float; 3]) -> [Float; 3] {
        let [h, s, v] = *value;
        let h = if h.is_nan() { 0.0 } else { h.rem_euclid(360.0) };

        let f = |n: Float| {
            let k = (n + h / 60.0) % 6.0;
            (v * s).mul_add(-k.min(4.0 - k).clamp(0.0, 1.0), v)
        };

        [f(5.0), f(3.0), f(1.0)]
    }
}

pub(crate) use cylinder::{hsl_to_rgb, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv};

// --------------------------------------------------------------------------------------------------------------------

mod lab {
    use crate::Float;

    /// The D65 reference white in XYZ, matching the sRGB matrices above.
    #[allow(clippy::excessive_precision)]
    pub(super) const D65: [Float; 3] = [0.950_455_927_051_671_7, 1.0, 1.089_057_750_759_878_4];

    const T0: Float = 4.0 / 29.0;
    const T1: Float = 6.0 / 29.0;
    const T2: Float = 3.0 * T1 * T1;
    const T3: Float = T1 * T1 * T1;

    /// Chroma below this threshold makes for a powerless hue.
    const EPSILON: Float = 0.0001;

    /// Convert coordinates for XYZ to CIELAB. This is a one-hop, direct
    /// conversion.
    #[allow(non_snake_case)]
    pub(crate) fn xyz_to_lab(value: &[Float; 3]) -> [Float; 3] {
        #[inline]
        fn f(t: Float) -> Float {
            if t > T3 {
                t.cbrt()
            } else {
                t / T2 + T0
            }
        }

        let x = f(value[0] / D65[0]);
        let y = f(value[1] / D65[1]);
        let z = f(value[2] / D65[2]);

        let L = y.mul_add(116.0, -16.0);
        [L, 500.0 * (x - y), 200.0 * (y - z)]
    }

    /// Convert coordinates for CIELAB to XYZ. This is a one-hop, direct
    /// conversion.
    #[allow(non_snake_case)]
    pub(crate) fn lab_to_xyz(value: &[Float; 3]) -> [Float; 3] {
        #[inline]
        fn f(t: Float) -> Float {
            if t > T1 {
                t * t * t
            } else {
                T2 * (t - T0)
            }
        }

        let [L, a, b] = *value;
        let y = (L + 16.0) / 116.0;
        let x = y + a / 500.0;
        let z = y - b / 200.0;

        [D65[0] * f(x), D65[1] * f(y), D65[2] * f(z)]
    }

    /// Convert coordinates for CIELAB to CIELCh. This is a one-hop, direct
    /// conversion.
    #[allow(non_snake_case)]
    pub(crate) fn lab_to_lch(value: &[Float; 3]) -> [Float; 3] {
        let [L, a, b] = *value;

        let C = a.hypot(b);
        if C < EPSILON {
            return [L, 0.0, Float::NAN];
        }

        let h = b.atan2(a).to_degrees();
        let h = if h.is_sign_negative() { h + 360.0 } else { h };

        [L, C, h]
    }

    /// Convert coordinates for CIELCh to CIELAB. This is a one-hop, direct
    /// conversion.
    #[allow(non_snake_case)]
    pub(crate) fn lch_to_lab(value: &[Float; 3]) -> [Float; 3] {
        let [L, C, h] = *value;

        if h.is_nan() {
            [L, 0.0, 0.0]
        } else {
            let hue_radian = h.to_radians();
            [L, C * hue_radian.cos(), C * hue_radian.sin()]
        }
    }
}

pub(crate) use lab::{lab_to_lch, lch_to_lab};
use lab::{lab_to_xyz, xyz_to_lab};

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates from a bounded color space to sRGB.
fn bounded_to_srgb(space: ColorSpace, value: &[Float; 3]) -> [Float; 3] {
    match space {
        ColorSpace::LinearSrgb => linear_rgb_to_rgb(value),
        ColorSpace::Hsl => hsl_to_rgb(value),
        ColorSpace::Hsv => hsv_to_rgb(value),
        _ => *value,
    }
}

/// Convert coordinates from sRGB to a bounded color space.
fn srgb_to_bounded(space: ColorSpace, value: &[Float; 3]) -> [Float; 3] {
    match space {
        ColorSpace::LinearSrgb => rgb_to_linear_rgb(value),
        ColorSpace::Hsl => rgb_to_hsl(value),
        ColorSpace::Hsv => rgb_to_hsv(value),
        _ => *value,
    }
}

/// Convert coordinates from any color space to XYZ.
fn to_xyz(space: ColorSpace, value: &[Float; 3]) -> [Float; 3] {
    match space {
        ColorSpace::Xyz => *value,
        ColorSpace::Lab => lab_to_xyz(value),
        ColorSpace::Lch => lab_to_xyz(&lch_to_lab(value)),
        ColorSpace::LinearSrgb => linear_srgb_to_xyz(value),
        _ => linear_srgb_to_xyz(&rgb_to_linear_rgb(&bounded_to_srgb(space, value))),
    }
}

/// Convert coordinates from XYZ to any color space.
fn from_xyz(space: ColorSpace, value: &[Float; 3]) -> [Float; 3] {
    match space {
        ColorSpace::Xyz => *value,
        ColorSpace::Lab => xyz_to_lab(value),
        ColorSpace::Lch => lab_to_lch(&xyz_to_lab(value)),
        ColorSpace::LinearSrgb => xyz_to_linear_srgb(value),
        _ => srgb_to_bounded(space, &linear_rgb_to_rgb(&xyz_to_linear_srgb(value))),
    }
}

/// Convert the coordinates from one color space to another.
///
/// This function normalizes not-a-number coordinates to zero before
/// conversion. It uses direct conversions between sRGB and its linear and
/// cylindrical forms as well as between CIELAB and CIELCh. All other
/// conversions go through XYZ.
pub(crate) fn convert(
    from_space: ColorSpace,
    to_space: ColorSpace,
    coordinates: &[Float; 3],
) -> [Float; 3] {
    // 1. Handle identity and powerless components.
    let coordinates = normalize(from_space, coordinates);
    if from_space == to_space {
        return coordinates;
    }

    // 2. Stay within the family if possible.
    if from_space.is_bounded() && to_space.is_bounded() {
        return srgb_to_bounded(to_space, &bounded_to_srgb(from_space, &coordinates));
    }

    match (from_space, to_space) {
        (ColorSpace::Lab, ColorSpace::Lch) => lab_to_lch(&coordinates),
        (ColorSpace::Lch, ColorSpace::Lab) => lch_to_lab(&coordinates),
        // 3. Go through XYZ.
        _ => from_xyz(to_space, &to_xyz(from_space, &coordinates)),
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::lab::D65;
    use super::{convert, from_24bit, to_24bit};
    use crate::core::assert_same_coordinates;
    use crate::ColorSpace::*;
    use crate::Float;

    struct Example {
        srgb: [Float; 3],
        hsl: [Float; 3],
        hsv: [Float; 3],
        lab: [Float; 3],
    }

    const EXAMPLES: [Example; 3] = [
        Example {
            srgb: [1.0, 0.0, 0.0],
            hsl: [0.0, 1.0, 0.5],
            hsv: [0.0, 1.0, 1.0],
            lab: [53.237_115_595_429_36, 80.090_113_523_103_85, 67.203_263_511_722_14],
        },
        Example {
            srgb: [0.0, 0.0, 1.0],
            hsl: [240.0, 1.0, 0.5],
            hsv: [240.0, 1.0, 1.0],
            lab: [32.300_872_903_980_18, 79.195_270_307_404_2, -107.855_465_539_742_65],
        },
        Example {
            srgb: [1.0, 1.0, 1.0],
            hsl: [Float::NAN, 0.0, 1.0],
            hsv: [Float::NAN, 0.0, 1.0],
            lab: [100.0, 0.0, 0.0],
        },
    ];

    #[test]
    fn test_cylinders() {
        for example in &EXAMPLES {
            assert_same_coordinates!(Hsl, &convert(Srgb, Hsl, &example.srgb), &example.hsl);
            assert_same_coordinates!(Hsv, &convert(Srgb, Hsv, &example.srgb), &example.hsv);
            assert_same_coordinates!(Srgb, &convert(Hsl, Srgb, &example.hsl), &example.srgb);
            assert_same_coordinates!(Srgb, &convert(Hsv, Srgb, &example.hsv), &example.srgb);
        }
    }

    #[test]
    fn test_lab() {
        for example in &EXAMPLES {
            let lab = convert(Srgb, Lab, &example.srgb);
            for (actual, expected) in lab.iter().zip(example.lab.iter()) {
                assert!(
                    (actual - expected).abs() < 1e-6,
                    "{:?} vs {:?}",
                    lab,
                    example.lab
                );
            }

            let srgb = convert(Lab, Srgb, &lab);
            for (actual, expected) in srgb.iter().zip(example.srgb.iter()) {
                assert!((actual - expected).abs() < 1e-9, "{:?}", srgb);
            }
        }
    }

    #[test]
    fn test_white_point() {
        let xyz = convert(Srgb, Xyz, &[1.0, 1.0, 1.0]);
        for (actual, expected) in xyz.iter().zip(D65.iter()) {
            assert!((actual - expected).abs() < 1e-12, "{:?}", xyz);
        }
    }

    #[test]
    fn test_lch_round_trip() {
        let lch = convert(Srgb, Lch, &[0.2, 0.6, 0.4]);
        assert!(lch[1] > 0.0, "green is chromatic");
        let srgb = convert(Lch, Srgb, &lch);
        for (actual, expected) in srgb.iter().zip([0.2, 0.6, 0.4].iter()) {
            assert!((actual - expected).abs() < 1e-9, "{:?}", srgb);
        }

        let gray = convert(Srgb, Lch, &[0.5, 0.5, 0.5]);
        assert!(gray[2].is_nan(), "gray has no hue");
    }

    #[test]
    fn test_24bit() {
        assert_eq!(to_24bit(Srgb, &from_24bit(0x12, 0xab, 0xff)), [0x12, 0xab, 0xff]);
        assert_eq!(to_24bit(Srgb, &[1.2, -0.1, Float::NAN]), [0xff, 0x00, 0x00]);
        assert_eq!(to_24bit(Hsl, &[120.0, 1.0, 0.5]), [0x00, 0xff, 0x00]);
    }
}
