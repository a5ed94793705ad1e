use core::str::FromStr;

use crate::core::{
    average, blend, convert, delta_e_2000, distance, format_css, format_hex, from_24bit,
    in_gamut, interpolate, parse, root_mean_square, shift_chroma, shift_lightness, to_24bit,
    to_8bit, to_clipped_srgb, to_contrast_ratio, to_name, to_relative_luminance,
    with_relative_luminance, BlendMode, ColorSpace,
};
use crate::error::ColorFormatError;
use crate::Float;

/// Create a new sRGB color from 24-bit integer coordinates.
///
/// Like [`Color::from_24bit`], this macro creates a new color from 24-bit
/// integer coordinates. However, it also is safe to use in const expressions,
/// since it converts the coordinates before invoking the const constructor.
///
/// ```
/// # use chromadoc::{rgb, Color};
/// const ORANGE: Color = rgb!(255, 165, 0);
/// assert_eq!(ORANGE.to_hex_format(), "#ffa500");
/// ```
#[macro_export]
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        $crate::Color::new(
            $crate::ColorSpace::Srgb,
            [
                $r as $crate::Float / 255.0,
                $g as $crate::Float / 255.0,
                $b as $crate::Float / 255.0,
            ],
        )
    };
}

/// A color object.
///
/// Every color object has a [color space](ColorSpace), three coordinates, and
/// an alpha between 0 (fully transparent) and 1 (fully opaque). Color objects
/// are immutable: all filters, such as [`Color::brighten`], return new colors.
///
/// # Canonical Form
///
/// Templates ultimately render colors as 8-bit sRGB with 8-bit alpha, i.e., in
/// `#rrggbbaa` notation. That representation is this type's *canonical form*.
/// Colors outside the sRGB gamut are clipped to fit.
///
/// ## Equality Testing and Hashing
///
/// Two colors are equal if they have the same canonical form, no matter how
/// they were specified. Hence an sRGB color and its equivalent in CIELAB are
/// equal, and so are colors differing only by floating point error. Hashing
/// also uses the canonical form and so agrees with equality.
///
/// ```
/// # use chromadoc::{Color, ColorSpace};
/// # use chromadoc::error::ColorFormatError;
/// let red: Color = str::parse("red")?;
/// assert_eq!(red, Color::from_24bit(255, 0, 0));
/// assert_eq!(red, red.to(ColorSpace::Lab));
/// assert_eq!(red, str::parse("rgb(100%, 0%, 0%)")?);
/// # Ok::<(), ColorFormatError>(())
/// ```
///
/// ## Coordinate Access
///
/// Rust code can access individual coordinates by indexing a color object with
/// integers `0..2`.
#[derive(Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    space: ColorSpace,
    coordinates: [Float; 3],
    alpha: Float,
}

impl Color {
    /// Pitch black.
    pub const BLACK: Self = Self::new(ColorSpace::Srgb, [0.0, 0.0, 0.0]);

    /// Bright white.
    pub const WHITE: Self = Self::new(ColorSpace::Srgb, [1.0, 1.0, 1.0]);

    /// Instantiate a new, opaque color with the given color space and
    /// coordinates.
    ///
    /// ```
    /// # use chromadoc::{Color, ColorSpace};
    /// let pink = Color::new(ColorSpace::Lch, [70.0, 60.0, 350.0]);
    /// assert_eq!(pink.as_ref(), &[70.0, 60.0, 350.0]);
    /// assert_eq!(pink.alpha(), 1.0);
    /// ```
    #[inline]
    pub const fn new(space: ColorSpace, coordinates: [Float; 3]) -> Self {
        Self {
            space,
            coordinates,
            alpha: 1.0,
        }
    }

    /// Instantiate a new sRGB color with the given red, green, and blue
    /// coordinates.
    #[inline]
    pub const fn srgb(r: Float, g: Float, b: Float) -> Self {
        Self::new(ColorSpace::Srgb, [r, g, b])
    }

    /// Instantiate a new sRGB color from its 24-bit representation.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// let blue = Color::from_24bit(0x33, 0x66, 0x99);
    /// assert_eq!(blue.to_hex_format(), "#336699");
    /// ```
    #[inline]
    pub fn from_24bit(r: u8, g: u8, b: u8) -> Self {
        Self::new(ColorSpace::Srgb, from_24bit(r, g, b))
    }

    /// Instantiate a new HSL color. The hue is in degrees, saturation and
    /// lightness are in unit range.
    #[inline]
    pub const fn hsl(h: Float, s: Float, l: Float) -> Self {
        Self::new(ColorSpace::Hsl, [h, s, l])
    }

    /// Instantiate a new HSV color. The hue is in degrees, saturation and
    /// value are in unit range.
    #[inline]
    pub const fn hsv(h: Float, s: Float, v: Float) -> Self {
        Self::new(ColorSpace::Hsv, [h, s, v])
    }

    /// Instantiate a new CIELAB color.
    #[inline]
    pub const fn lab(l: Float, a: Float, b: Float) -> Self {
        Self::new(ColorSpace::Lab, [l, a, b])
    }

    /// Instantiate a new CIELCh color.
    #[inline]
    pub const fn lch(l: Float, c: Float, h: Float) -> Self {
        Self::new(ColorSpace::Lch, [l, c, h])
    }

    /// Create a copy of this color with the given alpha.
    ///
    /// The alpha is clamped to unit range.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// let veil = Color::BLACK.with_alpha(0.5);
    /// assert_eq!(veil.to_hex_format(), "#00000080");
    /// assert_eq!(Color::WHITE.with_alpha(2.0).alpha(), 1.0);
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn with_alpha(&self, alpha: Float) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self.clone()
        }
    }

    /// Determine whether the string is a valid color.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// assert!(Color::is_color("#bada55"));
    /// assert!(Color::is_color("transparent"));
    /// assert!(!Color::is_color("bada55s"));
    /// ```
    pub fn is_color(text: &str) -> bool {
        parse(text).is_ok()
    }

    /// Determine whether this color and the other color have the same
    /// canonical form. This method is equivalent to `==`.
    #[inline]
    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Access the color space.
    #[inline]
    pub const fn space(&self) -> ColorSpace {
        self.space
    }

    /// Access the coordinates.
    #[inline]
    pub const fn coordinates(&self) -> [Float; 3] {
        self.coordinates
    }

    /// Access the alpha.
    #[inline]
    pub const fn alpha(&self) -> Float {
        self.alpha
    }

    /// Determine whether this color is in gamut for its color space.
    #[inline]
    pub fn in_gamut(&self) -> bool {
        in_gamut(self.space, &self.coordinates)
    }

    /// Determine whether this color's coordinates are all finite. A
    /// not-a-number hue stands for a missing hue and hence counts as finite.
    ///
    /// ```
    /// # use chromadoc::{Color, Float};
    /// assert!(Color::hsl(Float::NAN, 0.0, 0.5).is_finite());
    /// assert!(!Color::srgb(Float::NAN, 0.0, 0.5).is_finite());
    /// assert!(!Color::lab(Float::INFINITY, 0.0, 0.0).is_finite());
    /// ```
    pub fn is_finite(&self) -> bool {
        let hue = self.space.hue_index();
        self.coordinates
            .iter()
            .enumerate()
            .all(|(index, c)| c.is_finite() || (c.is_nan() && hue == Some(index)))
    }

    /// Convert this color to the target color space.
    ///
    /// The alpha carries over unchanged. Achromatic colors in polar color
    /// spaces have a not-a-number hue.
    ///
    /// ```
    /// # use chromadoc::{Color, ColorSpace};
    /// let gray = Color::from_24bit(0x80, 0x80, 0x80).to(ColorSpace::Hsl);
    /// assert!(gray[0].is_nan());
    /// assert_eq!(gray[1], 0.0);
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn to(&self, target: ColorSpace) -> Self {
        Self {
            space: target,
            coordinates: convert(self.space, target, &self.coordinates),
            alpha: self.alpha,
        }
    }

    /// Convert this color to sRGB clipped to its gamut.
    fn to_clipped(&self) -> [Float; 3] {
        to_clipped_srgb(self.space, &self.coordinates)
    }

    /// Wrap sRGB coordinates that result from a manipulation of this color,
    /// preserving this color's alpha.
    fn with_srgb(&self, coordinates: [Float; 3]) -> Self {
        Self {
            space: ColorSpace::Srgb,
            coordinates,
            alpha: self.alpha,
        }
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Brighten this color.
    ///
    /// This method increases the CIELAB lightness by 18 for each unit of the
    /// amount, with templates defaulting to 1. The result is clipped to the
    /// sRGB gamut.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// # use chromadoc::error::ColorFormatError;
    /// let hotpink: Color = str::parse("hotpink")?;
    /// assert_eq!(hotpink.brighten(1.0).to_hex_format(), "#ff9ce6");
    /// # Ok::<(), ColorFormatError>(())
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn brighten(&self, amount: Float) -> Self {
        self.with_srgb(shift_lightness(self.space, &self.coordinates, amount))
    }

    /// Darken this color.
    ///
    /// Darkening is the same as brightening by the negated amount. See
    /// [`Color::brighten`].
    ///
    /// ```
    /// # use chromadoc::Color;
    /// # use chromadoc::error::ColorFormatError;
    /// let hotpink: Color = str::parse("hotpink")?;
    /// assert_eq!(hotpink.darken(1.0).to_hex_format(), "#c93384");
    /// # Ok::<(), ColorFormatError>(())
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn darken(&self, amount: Float) -> Self {
        self.with_srgb(shift_lightness(self.space, &self.coordinates, -amount))
    }

    /// Saturate this color.
    ///
    /// This method increases the CIELCh chroma by 18 for each unit of the
    /// amount. The result is clipped to the sRGB gamut.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn saturate(&self, amount: Float) -> Self {
        self.with_srgb(shift_chroma(self.space, &self.coordinates, amount))
    }

    /// Desaturate this color.
    ///
    /// This method decreases the CIELCh chroma by 18 for each unit of the
    /// amount, but never below zero.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn desaturate(&self, amount: Float) -> Self {
        self.with_srgb(shift_chroma(self.space, &self.coordinates, -amount))
    }

    /// Determine the WCAG relative luminance of this color.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// assert_eq!(Color::WHITE.luminance(), 1.0);
    /// assert_eq!(Color::BLACK.luminance(), 0.0);
    /// ```
    #[inline]
    pub fn luminance(&self) -> Float {
        to_relative_luminance(self.space, &self.coordinates)
    }

    /// Create a new color with the given WCAG relative luminance.
    ///
    /// This method interpolates between this color and white or black until
    /// the luminance is within `1e-7` of the target, for at most 20 rounds.
    /// The target is clamped to unit range.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn with_luminance(&self, target: Float) -> Self {
        self.with_srgb(with_relative_luminance(
            self.space,
            &self.coordinates,
            target.clamp(0.0, 1.0),
        ))
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Determine the WCAG 2 contrast ratio between this and the other color.
    ///
    /// The contrast ratio is symmetric and ranges from 1 for colors with the
    /// same luminance to 21 for black and white. Alpha is ignored.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// let ratio = Color::BLACK.contrast(&Color::WHITE);
    /// assert!((ratio - 21.0).abs() < 1e-9);
    /// ```
    pub fn contrast(&self, other: &Self) -> Float {
        to_contrast_ratio(self.luminance(), other.luminance())
    }

    /// Determine the Euclidean distance between this and the other color in
    /// the given color space, typically [`ColorSpace::Lab`].
    pub fn distance(&self, other: &Self, space: ColorSpace) -> Float {
        distance(
            &convert(self.space, space, &self.coordinates),
            &convert(other.space, space, &other.coordinates),
        )
    }

    /// Determine the CIEDE2000 color difference between this and the other
    /// color.
    ///
    /// A difference below 1 is imperceptible, whereas a difference around 2 is
    /// perceptible on close observation.
    pub fn delta_e(&self, other: &Self) -> Float {
        delta_e_2000(
            &convert(self.space, ColorSpace::Lab, &self.coordinates),
            &convert(other.space, ColorSpace::Lab, &other.coordinates),
        )
    }

    /// Select a color with sufficient contrast to this color.
    ///
    /// This method derives a lighter and a darker version of this color in
    /// small steps until one of them has a contrast ratio of at least 4.5. It
    /// returns whichever has more contrast. See [`inverse`](crate::inverse())
    /// for the underlying algorithm and its options.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// let text = Color::from_24bit(0x33, 0x66, 0x99).inverse();
    /// assert_eq!(text.to_hex_format(), "#bce7ff");
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn inverse(&self) -> Self {
        crate::inverse::derive(self, &crate::InverseOptions::default())
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Mix this color with the other color in the given color space.
    ///
    /// The ratio determines the share of the other color, with 0 returning
    /// this color and 1 the other color. Hues take the shorter arc. Mixing in
    /// linear sRGB blends physical light. Alpha is interpolated as well.
    ///
    /// ```
    /// # use chromadoc::{Color, ColorSpace};
    /// # use chromadoc::error::ColorFormatError;
    /// let red: Color = str::parse("red")?;
    /// let blue: Color = str::parse("blue")?;
    /// assert_eq!(red.mix(&blue, 0.5, ColorSpace::Srgb).to_hex_format(), "#800080");
    /// assert_eq!(red.mix(&blue, 0.5, ColorSpace::LinearSrgb).to_hex_format(), "#bc00bc");
    /// # Ok::<(), ColorFormatError>(())
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn mix(&self, other: &Self, ratio: Float, space: ColorSpace) -> Self {
        let coordinates = interpolate(
            space,
            ratio,
            &convert(self.space, space, &self.coordinates),
            &convert(other.space, space, &other.coordinates),
        );

        Self {
            space,
            coordinates,
            alpha: ratio.mul_add(other.alpha - self.alpha, self.alpha),
        }
    }

    /// Average the colors in the given color space.
    ///
    /// Hues are averaged as angles. For linear sRGB, this method computes the
    /// root mean square of the sRGB coordinates. Alpha is averaged as well.
    /// This method returns `None` if there are no colors.
    pub fn average(colors: &[Self], space: ColorSpace) -> Option<Self> {
        if space == ColorSpace::LinearSrgb {
            let coordinates: Vec<_> = colors
                .iter()
                .map(|c| convert(c.space, ColorSpace::Srgb, &c.coordinates))
                .collect();
            let mean = root_mean_square(&coordinates)?;
            return Some(Self::new(ColorSpace::Srgb, mean).with_alpha(Self::mean_alpha(colors)));
        }

        let coordinates: Vec<_> = colors
            .iter()
            .map(|c| convert(c.space, space, &c.coordinates))
            .collect();
        let mean = average(space, &coordinates)?;
        Some(Self::new(space, mean).with_alpha(Self::mean_alpha(colors)))
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_alpha(colors: &[Self]) -> Float {
        colors.iter().map(|c| c.alpha).sum::<Float>() / colors.len().max(1) as Float
    }

    /// Blend this color as bottom layer with the top color.
    ///
    /// Blending operates on the 24-bit coordinates and produces an opaque
    /// color.
    ///
    /// ```
    /// # use chromadoc::{BlendMode, Color};
    /// let bottom = Color::from_24bit(0xff, 0x80, 0x00);
    /// let top = Color::from_24bit(0x80, 0x80, 0x80);
    /// assert_eq!(bottom.blend(&top, BlendMode::Multiply).to_hex_format(), "#804000");
    /// assert_eq!(bottom.blend(&top, BlendMode::Screen).to_hex_format(), "#ffc080");
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn blend(&self, top: &Self, mode: BlendMode) -> Self {
        Self::new(
            ColorSpace::Srgb,
            blend(mode, self.to_24bit(), top.to_24bit()),
        )
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Convert this color to 24-bit RGB representation.
    ///
    /// This method converts the color to sRGB and clips it to the gamut before
    /// converting each coordinate to a `u8`.
    #[inline]
    pub fn to_24bit(&self) -> [u8; 3] {
        to_24bit(self.space, &self.coordinates)
    }

    /// Convert this color to its canonical form, i.e., 32-bit RGBA.
    #[inline]
    pub fn to_32bit(&self) -> [u8; 4] {
        let [r, g, b] = self.to_24bit();
        [r, g, b, to_8bit(self.alpha)]
    }

    /// Convert this color to sRGB coordinates and alpha in unit range, as
    /// used by WebGL.
    pub fn to_gl(&self) -> [Float; 4] {
        let [r, g, b] = self.to_clipped();
        [r, g, b, self.alpha]
    }

    /// Format this color in familiar `#123abc` hashed hexadecimal
    /// representation.
    ///
    /// If the color is not fully opaque, the result has a fourth coordinate
    /// for alpha.
    #[inline]
    pub fn to_hex_format(&self) -> String {
        let [r, g, b, a] = self.to_32bit();
        format_hex([r, g, b], a)
    }

    /// Format this color in CSS functional notation.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// assert_eq!(Color::from_24bit(255, 165, 0).to_css_format(), "rgb(255,165,0)");
    /// assert_eq!(Color::BLACK.with_alpha(0.25).to_css_format(), "rgba(0,0,0,0.25)");
    /// ```
    #[inline]
    pub fn to_css_format(&self) -> String {
        format_css(self.to_24bit(), self.alpha)
    }

    /// Determine the name of this color.
    ///
    /// If this color is opaque and matches one of the CSS named colors, this
    /// method returns that name. Otherwise, it returns the hashed hexadecimal
    /// format.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// assert_eq!(Color::from_24bit(0x66, 0x33, 0x99).name(), "rebeccapurple");
    /// assert_eq!(Color::from_24bit(0x66, 0x33, 0x98).name(), "#663398");
    /// ```
    pub fn name(&self) -> String {
        let [r, g, b, a] = self.to_32bit();
        match to_name([r, g, b]) {
            Some(name) if a == 0xff => name.to_string(),
            _ => format_hex([r, g, b], a),
        }
    }
}

impl Default for Color {
    /// Create an instance of the default color, which is opaque black.
    #[inline]
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorFormatError;

    /// Instantiate a color from its string representation.
    ///
    /// Before parsing the string slice, this method trims any leading and
    /// trailing white space while also converting ASCII letters to lower case.
    /// That makes parsing effectively case-insensitive.
    ///
    /// This method recognizes the 148 CSS named colors as well as
    /// `transparent`. It further recognizes hexadecimal notation with 3, 4, 6,
    /// or 8 digits, with or without leading hash. Note that the short forms
    /// repeat every digit, i.e., the red coordinate in `#123` is 0x11. Finally,
    /// it recognizes the `rgb()`, `rgba()`, `hsl()`, and `hsla()` CSS
    /// functions with comma-separated or space-separated arguments.
    ///
    /// ```
    /// # use chromadoc::{Color, ColorSpace};
    /// # use chromadoc::error::ColorFormatError;
    /// use std::str::FromStr;
    ///
    /// let navy = Color::from_str("#000080")?;
    /// assert_eq!(navy, Color::from_str("navy")?);
    ///
    /// let lime: Color = str::parse("hsl(120, 100%, 50%)")?;
    /// assert_eq!(lime.space(), ColorSpace::Hsl);
    /// assert_eq!(lime.to_hex_format(), "#00ff00");
    /// # Ok::<(), ColorFormatError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (space, coordinates, alpha) = parse(s)?;
        Ok(Self {
            space,
            coordinates,
            alpha,
        })
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex_format()
    }
}

impl AsRef<[Float; 3]> for Color {
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl core::ops::Index<usize> for Color {
    type Output = Float;

    /// Access the coordinate with the given index.
    ///
    /// # Panics
    ///
    /// This method panics if `2 < index`.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl core::hash::Hash for Color {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.to_32bit().hash(state);
    }
}

impl PartialEq for Color {
    /// Determine whether this color equals the other color.
    ///
    /// Both colors are converted to their canonical 32-bit RGBA form before
    /// comparison. Consequently, colors in different color spaces may be
    /// equal.
    fn eq(&self, other: &Self) -> bool {
        self.to_32bit() == other.to_32bit()
    }
}

impl Eq for Color {}

impl core::fmt::Debug for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [c1, c2, c3] = self.coordinates;
        f.write_fmt(format_args!(
            "Color({:?}, [{}, {}, {}], {})",
            self.space, c1, c2, c3, self.alpha
        ))
    }
}

impl core::fmt::Display for Color {
    /// Format this color in hashed hexadecimal notation.
    ///
    /// ```
    /// # use chromadoc::Color;
    /// assert_eq!(format!("{}", Color::lab(100.0, 0.0, 0.0)), "#ffffff");
    /// ```
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_hex_format())
    }
}

// ====================================================================================================================
