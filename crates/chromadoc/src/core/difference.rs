use super::ColorSpace;
use crate::Float;

/// Compute the Euclidean distance between two sets of coordinates.
///
/// The coordinates should be in the same color space. The metric is only
/// perceptually meaningful for CIELAB.
pub(crate) fn distance(coordinates1: &[Float; 3], coordinates2: &[Float; 3]) -> Float {
    let [d1, d2, d3] = [
        coordinates1[0] - coordinates2[0],
        coordinates1[1] - coordinates2[1],
        coordinates1[2] - coordinates2[2],
    ];

    d1.mul_add(d1, d2.mul_add(d2, d3 * d3)).sqrt()
}

/// Compute the CIEDE2000 color difference between two CIELAB colors.
///
/// This function uses unit weights for lightness, chroma, and hue. It follows
/// Sharma, Wu, and Dalal's notes on the formula, including their treatment of
/// hue for achromatic colors.
#[allow(non_snake_case)]
pub(crate) fn delta_e_2000(lab1: &[Float; 3], lab2: &[Float; 3]) -> Float {
    const POW25_7: Float = 6_103_515_625.0;

    let [L1, a1, b1] = *lab1;
    let [L2, a2, b2] = *lab2;

    // Adjust a* for the chroma of both colors.
    let C_mean = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let C_mean7 = C_mean.powi(7);
    let G = 0.5 * (1.0 - (C_mean7 / (C_mean7 + POW25_7)).sqrt());
    let a1p = a1 * (1.0 + G);
    let a2p = a2 * (1.0 + G);

    let C1p = a1p.hypot(b1);
    let C2p = a2p.hypot(b2);

    let hue = |b: Float, a: Float| {
        if a == 0.0 && b == 0.0 {
            0.0
        } else {
            b.atan2(a).to_degrees().rem_euclid(360.0)
        }
    };
    let h1p = hue(b1, a1p);
    let h2p = hue(b2, a2p);
    let is_achromatic = C1p * C2p == 0.0;

    // Differences
    let ΔL = L2 - L1;
    let ΔC = C2p - C1p;
    let Δh = if is_achromatic {
        0.0
    } else if h2p - h1p > 180.0 {
        h2p - h1p - 360.0
    } else if h2p - h1p < -180.0 {
        h2p - h1p + 360.0
    } else {
        h2p - h1p
    };
    let ΔH = 2.0 * (C1p * C2p).sqrt() * (Δh / 2.0).to_radians().sin();

    // Means
    let L_mean = (L1 + L2) / 2.0;
    let C_mean = (C1p + C2p) / 2.0;
    let h_mean = if is_achromatic {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    // Weighting functions
    let T = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_mean).to_radians().cos()
        + 0.32 * h_mean.mul_add(3.0, 6.0).to_radians().cos()
        - 0.20 * h_mean.mul_add(4.0, -63.0).to_radians().cos();
    let Δθ = 30.0 * (-((h_mean - 275.0) / 25.0).powi(2)).exp();
    let C_mean7 = C_mean.powi(7);
    let R_C = 2.0 * (C_mean7 / (C_mean7 + POW25_7)).sqrt();
    let L_offset = (L_mean - 50.0).powi(2);
    let S_L = 1.0 + 0.015 * L_offset / (20.0 + L_offset).sqrt();
    let S_C = C_mean.mul_add(0.045, 1.0);
    let S_H = (0.015 * C_mean).mul_add(T, 1.0);
    let R_T = -(2.0 * Δθ).to_radians().sin() * R_C;

    let l = ΔL / S_L;
    let c = ΔC / S_C;
    let h = ΔH / S_H;
    (R_T * c).mul_add(h, l.mul_add(l, c.mul_add(c, h * h))).sqrt()
}

// --------------------------------------------------------------------------------------------------------------------

/// Determine whether the hue of the polar coordinates is powerless, i.e., is
/// not-a-number or belongs to a color without saturation or chroma.
fn is_powerless_hue(index: usize, coordinates: &[Float; 3]) -> bool {
    coordinates[index].is_nan() || coordinates[1].abs() < 1e-4
}

/// Adjust the pair of hues so that interpolation takes the shorter arc.
fn prepare_hue_interpolation(h1: Float, h2: Float) -> [Float; 2] {
    if 180.0 < h2 - h1 {
        [h1 + 360.0, h2]
    } else if h2 - h1 < -180.0 {
        [h1, h2 + 360.0]
    } else {
        [h1, h2]
    }
}

/// Interpolate between two sets of coordinates in the same color space.
///
/// This function calculates the linear interpolation for the given fraction
/// between equivalent coordinates. For polar color spaces, it takes the
/// shorter arc between hues. If one of the hues is powerless, it uses the
/// other hue throughout. If both are, the resulting hue is not-a-number.
#[must_use = "function returns new color coordinates and does not mutate original values"]
pub(crate) fn interpolate(
    space: ColorSpace,
    fraction: Float,
    coordinates1: &[Float; 3],
    coordinates2: &[Float; 3],
) -> [Float; 3] {
    let mut start = *coordinates1;
    let mut end = *coordinates2;

    if let Some(index) = space.hue_index() {
        match (
            is_powerless_hue(index, &start),
            is_powerless_hue(index, &end),
        ) {
            (true, true) => {
                start[index] = Float::NAN;
                end[index] = Float::NAN;
            }
            (true, false) => start[index] = end[index],
            (false, true) => end[index] = start[index],
            (false, false) => {
                let [h1, h2] = prepare_hue_interpolation(
                    start[index].rem_euclid(360.0),
                    end[index].rem_euclid(360.0),
                );
                start[index] = h1;
                end[index] = h2;
            }
        }
    }

    let mut result = [
        fraction.mul_add(end[0] - start[0], start[0]),
        fraction.mul_add(end[1] - start[1], start[1]),
        fraction.mul_add(end[2] - start[2], start[2]),
    ];

    if let Some(index) = space.hue_index() {
        result[index] = result[index].rem_euclid(360.0);
    }

    result
}

// --------------------------------------------------------------------------------------------------------------------

/// Average several sets of coordinates in the same color space.
///
/// Non-hue coordinates are averaged arithmetically. Hues are averaged as
/// angles, ignoring powerless hues. This function returns `None` if there are
/// no coordinates to average.
pub(crate) fn average(space: ColorSpace, colors: &[[Float; 3]]) -> Option<[Float; 3]> {
    if colors.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = colors.len() as Float;
    let mut sum = [0.0; 3];
    let (mut sin, mut cos, mut hues) = (0.0, 0.0, 0_usize);
    let hue_index = space.hue_index();

    for coordinates in colors {
        for (index, coordinate) in coordinates.iter().enumerate() {
            if Some(index) == hue_index {
                if !is_powerless_hue(index, coordinates) {
                    let radians = coordinate.to_radians();
                    sin += radians.sin();
                    cos += radians.cos();
                    hues += 1;
                }
            } else {
                sum[index] += coordinate;
            }
        }
    }

    let mut result = sum.map(|total| total / count);
    if let Some(index) = hue_index {
        result[index] = if hues == 0 {
            Float::NAN
        } else {
            Float::atan2(sin, cos).to_degrees().rem_euclid(360.0)
        };
    }

    Some(result)
}

/// Compute the root mean square of several sets of coordinates.
///
/// Applied to gamma-corrected sRGB, this approximates averaging in linear
/// light. This function returns `None` if there are no coordinates.
pub(crate) fn root_mean_square(colors: &[[Float; 3]]) -> Option<[Float; 3]> {
    if colors.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = colors.len() as Float;
    let mut sum = [0.0; 3];
    for coordinates in colors {
        for (total, coordinate) in sum.iter_mut().zip(coordinates) {
            *total += coordinate * coordinate;
        }
    }

    Some(sum.map(|total| (total / count).sqrt()))
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{average, delta_e_2000, distance, interpolate, root_mean_square};
    use crate::core::assert_same_coordinates;
    use crate::ColorSpace::*;
    use crate::Float;

    #[test]
    fn test_distance() {
        assert_eq!(distance(&[0.0, 0.0, 0.0], &[1.0, 2.0, 2.0]), 3.0);
        assert_eq!(distance(&[50.0, 10.0, 10.0], &[50.0, 10.0, 10.0]), 0.0);
    }

    #[test]
    fn test_delta_e_2000() {
        // Reference pairs from Sharma, Wu, and Dalal (2005)
        let examples: [([Float; 3], [Float; 3], Float); 3] = [
            ([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485], 2.0425),
            ([50.0, 2.5, 0.0], [73.0, 25.0, -18.0], 27.1492),
            ([2.0776, 0.0795, -1.135], [0.9033, -0.0636, -0.5514], 0.9082),
        ];

        for (lab1, lab2, expected) in examples {
            let actual = delta_e_2000(&lab1, &lab2);
            assert!((actual - expected).abs() < 1e-4, "{} vs {}", actual, expected);
            let reversed = delta_e_2000(&lab2, &lab1);
            assert!((actual - reversed).abs() < 1e-9, "{} vs {}", actual, reversed);
        }

        assert_eq!(delta_e_2000(&[50.0, 0.0, 0.0], &[50.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_interpolate() {
        let middle = interpolate(Srgb, 0.5, &[0.0, 0.0, 0.0], &[1.0, 0.5, 0.0]);
        assert_same_coordinates!(Srgb, &middle, &[0.5, 0.25, 0.0]);

        // Shorter arc across 0/360
        let middle = interpolate(Lch, 0.5, &[50.0, 40.0, 350.0], &[50.0, 40.0, 30.0]);
        assert_same_coordinates!(Lch, &middle, &[50.0, 40.0, 10.0]);

        // Powerless hue takes the other hue
        let middle = interpolate(Hsl, 0.5, &[Float::NAN, 0.0, 1.0], &[120.0, 1.0, 0.5]);
        assert_same_coordinates!(Hsl, &middle, &[120.0, 0.5, 0.75]);

        let middle = interpolate(Lch, 0.5, &[0.0, 0.0, Float::NAN], &[100.0, 0.0, 0.0]);
        assert!(middle[2].is_nan(), "two powerless hues stay powerless");
        assert_eq!(middle[0], 50.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(Srgb, &[]), None);

        let mean = average(Srgb, &[[0.0, 0.5, 1.0], [1.0, 0.5, 0.0]]);
        assert_eq!(mean, Some([0.5, 0.5, 0.5]));

        let mean = average(Hsl, &[[350.0, 1.0, 0.5], [30.0, 1.0, 0.5]]);
        assert_same_coordinates!(Hsl, &mean.unwrap_or_default(), &[10.0, 1.0, 0.5]);

        let rms = root_mean_square(&[[0.0, 1.0, 1.0], [1.0, 1.0, 0.0]]);
        let half = (0.5 as Float).sqrt();
        assert_same_coordinates!(Srgb, &rms.unwrap_or_default(), &[half, 1.0, half]);
    }
}
