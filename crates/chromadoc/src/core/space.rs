/// The enumeration of supported color spaces.
///
/// # RGB
///
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) is the color space of the web
/// and hence of all colors appearing in stylesheets and templates. Its linear
/// form serves as the hub for conversions and as the space for physically
/// plausible mixing. In-gamut coordinates for both range from 0 to 1,
/// inclusive.
///
/// # HSL and HSV
///
/// HSL and HSV are cylindrical reshapings of sRGB. Unlike the other color
/// spaces, their *first* coordinate is the hue in degrees, followed by
/// saturation and lightness or value, both in unit range. The hue of an
/// achromatic color is not-a-number.
///
/// # CIE Lab and LCh
///
/// [CIELAB](https://en.wikipedia.org/wiki/CIELAB_color_space) uses one
/// coordinate for lightness L, ranging from 0 to 100, and two coordinates a
/// and b for "colorness." It is the space in which colors are brightened and
/// darkened. LCh is its polar form with chroma C and hue h as last
/// coordinate. This crate uses the D65 standard illuminant for both, just as
/// sRGB does, so that no chromatic adaptation is necessary.
///
/// # XYZ
///
/// [XYZ](https://en.wikipedia.org/wiki/CIE_1931_color_space) with the D65
/// illuminant is the foundational color space. All conversions between sRGB
/// and Lab/LCh go through XYZ.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Srgb,
    LinearSrgb,
    Hsl,
    Hsv,
    Lab,
    Lch,
    Xyz,
}

impl ColorSpace {
    /// Determine whether this color space is polar.
    pub const fn is_polar(&self) -> bool {
        matches!(*self, Self::Hsl | Self::Hsv | Self::Lch)
    }

    /// Determine the index of the hue coordinate, if this color space has
    /// one.
    ///
    /// HSL and HSV lead with the hue, whereas LCh trails with it.
    pub const fn hue_index(&self) -> Option<usize> {
        match *self {
            Self::Hsl | Self::Hsv => Some(0),
            Self::Lch => Some(2),
            _ => None,
        }
    }

    /// Determine whether this color space is RGB.
    ///
    /// RGB color spaces are additive and have red, green, and blue coordinates.
    /// In-gamut colors have coordinates in unit range `0..=1`.
    pub const fn is_rgb(&self) -> bool {
        matches!(*self, Self::Srgb | Self::LinearSrgb)
    }

    /// Determine whether this color space is CIELAB or its polar form.
    pub const fn is_lab(&self) -> bool {
        matches!(*self, Self::Lab | Self::Lch)
    }

    /// Determine whether this color space is bounded.
    ///
    /// XYZ, Lab, and LCh are *unbounded*. The RGB color spaces and their
    /// cylindrical reshapings are *bounded*.
    pub const fn is_bounded(&self) -> bool {
        matches!(
            *self,
            Self::Srgb | Self::LinearSrgb | Self::Hsl | Self::Hsv
        )
    }

    /// Look up a color space by the mode name used in templates.
    ///
    /// Besides the obvious names, this function accepts `rgb` for sRGB,
    /// `lrgb` for linear sRGB, and `hcl` for LCh. Matching is ASCII
    /// case-insensitive.
    pub fn from_mode(mode: &str) -> Option<Self> {
        let mode = mode.trim().to_ascii_lowercase();
        let space = match mode.as_str() {
            "rgb" | "srgb" => Self::Srgb,
            "lrgb" | "linear-srgb" => Self::LinearSrgb,
            "hsl" => Self::Hsl,
            "hsv" => Self::Hsv,
            "lab" => Self::Lab,
            "lch" | "hcl" => Self::Lch,
            "xyz" | "xyz-d65" => Self::Xyz,
            _ => return None,
        };

        Some(space)
    }
}

impl core::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match *self {
            Self::Srgb => "sRGB",
            Self::LinearSrgb => "linear sRGB",
            Self::Hsl => "HSL",
            Self::Hsv => "HSV",
            Self::Lab => "CIELAB",
            Self::Lch => "CIELCh",
            Self::Xyz => "XYZ D65",
        };

        f.write_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::ColorSpace::{self, *};

    #[test]
    fn test_from_mode() {
        assert_eq!(ColorSpace::from_mode("rgb"), Some(Srgb));
        assert_eq!(ColorSpace::from_mode(" LRGB "), Some(LinearSrgb));
        assert_eq!(ColorSpace::from_mode("hcl"), Some(Lch));
        assert_eq!(ColorSpace::from_mode("cmyk"), None);
    }

    #[test]
    fn test_hue_index() {
        assert_eq!(Hsl.hue_index(), Some(0));
        assert_eq!(Lch.hue_index(), Some(2));
        assert_eq!(Lab.hue_index(), None);
        assert!(Hsv.is_polar(), "HSV has a hue");
        assert!(!Xyz.is_bounded(), "XYZ is unbounded");
    }
}
