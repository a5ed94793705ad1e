//! Selecting a color with sufficient contrast.
//!
//! Given a base color, [`inverse`] selects a color that is readable against
//! it, using the WCAG 2 contrast ratio. If the caller supplies a
//! [`ContrastPair`] of candidates, the function picks one of them. Otherwise,
//! it derives a lighter and a darker candidate from the base color by
//! repeatedly brightening and darkening it in small steps, until one of them
//! meets a contrast threshold.
//!
//!
//! # Example
//!
//! ```
//! # use chromadoc::{inverse, Color, ContrastPair, InverseOptions};
//! # use chromadoc::error::ContrastError;
//! let base = Color::from_24bit(0x33, 0x66, 0x99);
//! let options = InverseOptions::default();
//!
//! let derived = inverse(&base, None, &options)?;
//! assert_eq!(derived.map(|c| c.to_hex_format()), Some("#bce7ff".to_string()));
//!
//! let pair = ContrastPair::new(Color::WHITE, Color::BLACK);
//! let chosen = inverse(&base, Some(&pair), &options)?;
//! assert_eq!(chosen, Some(Color::WHITE));
//! # Ok::<(), ContrastError>(())
//! ```

use tracing::{debug, trace};

use crate::core::ADJUSTMENT_UNIT;
use crate::error::ContrastError;
use crate::{Color, Float};

/// A light and a dark candidate for contrasting a base color.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContrastPair {
    pub light: Color,
    pub dark: Color,
}

impl ContrastPair {
    /// Create a new pair of candidates.
    pub const fn new(light: Color, dark: Color) -> Self {
        Self { light, dark }
    }
}

// ====================================================================================================================

/// The most rounds derived from the step alone.
const MAX_DERIVED_ITERATIONS: usize = 100_000;

/// The largest change in contrast between rounds that still counts as
/// standing still.
const STALL_TOLERANCE: Float = 64.0 * Float::EPSILON;

#[derive(Clone, Debug, PartialEq)]
struct OptionData {
    step: Float,
    thresholds: [Float; 2],
    max_iterations: Option<usize>,
}

impl OptionData {
    pub const fn new() -> Self {
        Self {
            step: 0.05,
            thresholds: [7.0, 4.5],
            max_iterations: None,
        }
    }
}

/// A builder of options for selecting contrasting colors.
#[derive(Debug)]
pub struct InverseOptionsBuilder(OptionData);

impl InverseOptionsBuilder {
    /// Set the step for brightening and darkening derived candidates.
    ///
    /// Each step changes the CIELAB lightness by 18 times the step.
    pub fn step(&mut self, step: Float) -> &mut Self {
        self.0.step = step;
        self
    }

    /// Set the high and low contrast thresholds.
    pub fn thresholds(&mut self, high: Float, low: Float) -> &mut Self {
        self.0.thresholds = [high, low];
        self
    }

    /// Set the maximum number of rounds for deriving candidates.
    pub fn max_iterations(&mut self, limit: usize) -> &mut Self {
        self.0.max_iterations = Some(limit);
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> InverseOptions {
        InverseOptions(self.0.clone())
    }
}

/// The options for selecting contrasting colors.
///
/// By default, the step is 0.05 and the thresholds are 7 and 4.5, which are
/// WCAG's enhanced and minimum contrast ratios for body text. Unless set
/// explicitly, the maximum number of rounds is eight times the number of steps
/// needed to traverse the entire lightness range.
///
/// ```
/// # use chromadoc::InverseOptions;
/// let options = InverseOptions::builder()
///     .step(0.1)
///     .build();
///
/// assert_eq!(options.step(), 0.1);
/// assert_eq!(options.thresholds(), [7.0, 4.5]);
/// assert_eq!(options.max_iterations(), 448);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InverseOptions(OptionData);

impl Default for InverseOptions {
    fn default() -> Self {
        Self(OptionData::new())
    }
}

impl InverseOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> InverseOptionsBuilder {
        InverseOptionsBuilder(OptionData::new())
    }

    /// Get the step.
    pub fn step(&self) -> Float {
        self.0.step
    }

    /// Get the thresholds, from high to low.
    pub fn thresholds(&self) -> [Float; 2] {
        self.0.thresholds
    }

    /// Get the maximum number of rounds for deriving candidates.
    ///
    /// Unless set explicitly, this is eight times the number of steps needed
    /// to traverse the lightness range, but no more than 100,000.
    pub fn max_iterations(&self) -> usize {
        self.0.max_iterations.unwrap_or_else(|| {
            let steps = (100.0 / (ADJUSTMENT_UNIT * self.0.step)).ceil();

            // Float-to-int casts saturate.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let steps = steps as usize;
            steps.saturating_mul(8).min(MAX_DERIVED_ITERATIONS)
        })
    }

    /// Validate the options.
    fn validate(&self) -> Result<(), ContrastError> {
        let step = self.0.step;
        if !step.is_finite() || step <= 0.0 {
            return Err(ContrastError::InvalidArgument { name: "step", value: step });
        }

        for threshold in self.0.thresholds {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(ContrastError::InvalidArgument {
                    name: "thresholds",
                    value: threshold,
                });
            }
        }

        Ok(())
    }

    /// Find the first threshold, from high to low, that the contrast meets.
    fn met_threshold(&self, contrast: Float) -> Option<Float> {
        self.0
            .thresholds
            .iter()
            .copied()
            .find(|&threshold| contrast >= threshold)
    }
}

// ====================================================================================================================

/// Select a color with sufficient contrast to the base color.
///
/// If `pair` is `Some`, this function picks the candidate with the higher
/// contrast ratio against the base color, with ties going to the dark
/// candidate. It returns `None` only if that contrast is not a number, which
/// may happen for colors with coordinates so large that conversion overflows.
///
/// If `pair` is `None`, this function derives a light and a dark candidate by
/// repeatedly brightening and darkening the base color by the step. It stops
/// as soon as either candidate meets one of the thresholds, once the
/// candidates have turned white and black, once neither candidate changes
/// its contrast anymore, or after the maximum number of rounds. It then
/// returns the candidate with the higher contrast ratio, again with ties
/// going to the dark one. This case always returns a color.
///
/// # Errors
///
/// This function returns [`ContrastError::InvalidArgument`] if the step or a
/// threshold is not positive and finite. It returns
/// [`ContrastError::NonFiniteColor`] if the base color or a candidate has an
/// infinite or not-a-number coordinate. A missing hue is fine.
pub fn inverse(
    base: &Color,
    pair: Option<&ContrastPair>,
    options: &InverseOptions,
) -> Result<Option<Color>, ContrastError> {
    options.validate()?;
    check_finite(base)?;
    if let Some(pair) = pair {
        check_finite(&pair.light)?;
        check_finite(&pair.dark)?;
    }

    match pair {
        Some(pair) => Ok(select(base, pair, options)),
        None => Ok(Some(derive(base, options))),
    }
}

/// Select a color with sufficient contrast to the base color, all given as
/// strings.
///
/// If both the light and the dark candidate are given, this function selects
/// between them. Otherwise, it derives candidates from the base color and
/// ignores the lone candidate, if any. See [`inverse`] for details.
///
/// # Errors
///
/// This function returns [`ContrastError::InvalidColor`] if one of the
/// strings is not a valid color and [`ContrastError::InvalidArgument`] for
/// invalid options.
///
/// ```
/// # use chromadoc::{inverse_str, Color, InverseOptions};
/// # use chromadoc::error::{ColorFormatError, ContrastError};
/// let options = InverseOptions::default();
/// let chosen = inverse_str("#fff", Some("#515151"), Some("#959595"), &options)?;
/// assert_eq!(chosen, Some(Color::from_24bit(0x51, 0x51, 0x51)));
///
/// let result = inverse_str("#ggg", None, None, &options);
/// assert_eq!(result, Err(ContrastError::InvalidColor(ColorFormatError::MalformedHex)));
/// # Ok::<(), ContrastError>(())
/// ```
pub fn inverse_str(
    base: &str,
    light: Option<&str>,
    dark: Option<&str>,
    options: &InverseOptions,
) -> Result<Option<Color>, ContrastError> {
    let base: Color = base.parse()?;
    let pair = match (light, dark) {
        (Some(light), Some(dark)) => Some(ContrastPair::new(light.parse()?, dark.parse()?)),
        _ => None,
    };

    inverse(&base, pair.as_ref(), options)
}

fn check_finite(color: &Color) -> Result<(), ContrastError> {
    if color.is_finite() {
        Ok(())
    } else {
        Err(ContrastError::NonFiniteColor(color.clone()))
    }
}

/// Select between the given candidates.
fn select(base: &Color, pair: &ContrastPair, options: &InverseOptions) -> Option<Color> {
    let light_contrast = base.contrast(&pair.light);
    let dark_contrast = base.contrast(&pair.dark);
    debug!(%base, light_contrast, dark_contrast, "comparing given candidates");

    let (candidate, contrast) = if light_contrast > dark_contrast {
        (&pair.light, light_contrast)
    } else {
        (&pair.dark, dark_contrast)
    };

    if let Some(threshold) = options.met_threshold(contrast) {
        debug!(%candidate, contrast, threshold, "candidate meets threshold");
        return Some(candidate.clone());
    }

    // A not-a-number contrast never improves on zero.
    if contrast >= 0.0 {
        debug!(%candidate, contrast, "no candidate meets a threshold, using best");
        Some(candidate.clone())
    } else {
        debug!(%base, "candidates are not comparable");
        None
    }
}

/// Derive candidates from the base color. The options must be valid.
pub(crate) fn derive(base: &Color, options: &InverseOptions) -> Color {
    let step = options.step();
    let limit = options.max_iterations();

    let mut light = base.clone();
    let mut dark = base.clone();
    let mut iteration = 0_usize;
    // Not-a-number never compares as stalled, so the first round always counts.
    let mut previous = (Float::NAN, Float::NAN);

    let (light_contrast, dark_contrast) = loop {
        light = light.brighten(step);
        dark = dark.darken(step);
        iteration += 1;

        let light_contrast = base.contrast(&light);
        let dark_contrast = base.contrast(&dark);
        trace!(
            iteration,
            %light,
            %dark,
            light_contrast,
            dark_contrast,
            "stepped candidates"
        );

        if light.to_24bit() == [0xff; 3] && dark.to_24bit() == [0; 3] {
            debug!(%base, iteration, "candidates reached white and black");
            break (light_contrast, dark_contrast);
        } else if let Some(threshold) = options.met_threshold(light_contrast.max(dark_contrast)) {
            debug!(%base, iteration, threshold, "candidate meets threshold");
            break (light_contrast, dark_contrast);
        } else if (light_contrast - previous.0).abs() <= STALL_TOLERANCE
            && (dark_contrast - previous.1).abs() <= STALL_TOLERANCE
        {
            debug!(%base, iteration, "candidates stopped changing");
            break (light_contrast, dark_contrast);
        } else if iteration >= limit {
            debug!(%base, iteration, "giving up on candidates");
            break (light_contrast, dark_contrast);
        }

        previous = (light_contrast, dark_contrast);
    };

    if light_contrast > dark_contrast {
        light
    } else {
        dark
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{inverse, inverse_str, ContrastPair, InverseOptions};
    use crate::error::{ColorFormatError, ContrastError};
    use crate::{Color, Float};
    use proptest::prelude::*;

    fn gray(level: u8) -> Color {
        Color::from_24bit(level, level, level)
    }

    #[test]
    fn test_options() {
        let options = InverseOptions::default();
        assert_eq!(options.step(), 0.05);
        assert_eq!(options.thresholds(), [7.0, 4.5]);
        assert_eq!(options.max_iterations(), 896);

        let options = InverseOptions::builder()
            .step(0.5)
            .thresholds(3.0, 2.0)
            .max_iterations(5)
            .build();
        assert_eq!(options.step(), 0.5);
        assert_eq!(options.thresholds(), [3.0, 2.0]);
        assert_eq!(options.max_iterations(), 5);
    }

    #[test]
    fn test_invalid_options() {
        let base = gray(0x80);
        let pair = ContrastPair::new(Color::WHITE, Color::BLACK);

        for step in [0.0, -0.05] {
            let options = InverseOptions::builder().step(step).build();
            let expected = Err(ContrastError::InvalidArgument { name: "step", value: step });
            assert_eq!(inverse(&base, None, &options), expected);
            assert_eq!(inverse(&base, Some(&pair), &options), expected);
        }

        let options = InverseOptions::builder().step(Float::NAN).build();
        assert!(
            matches!(
                inverse(&base, None, &options),
                Err(ContrastError::InvalidArgument { name: "step", .. })
            ),
            "not-a-number is not a valid step"
        );

        let options = InverseOptions::builder().thresholds(7.0, 0.0).build();
        assert_eq!(
            inverse(&base, None, &options),
            Err(ContrastError::InvalidArgument { name: "thresholds", value: 0.0 })
        );
    }

    #[test]
    fn test_given_candidates() -> Result<(), ContrastError> {
        let options = InverseOptions::default();
        let base = Color::WHITE;

        // Contrast of about 8 versus 3
        let pair = ContrastPair::new(gray(0x51), gray(0x95));
        assert_eq!(inverse(&base, Some(&pair), &options)?, Some(gray(0x51)));

        // Contrast of about 5 versus 2
        let pair = ContrastPair::new(gray(0x6f), gray(0xb7));
        assert_eq!(inverse(&base, Some(&pair), &options)?, Some(gray(0x6f)));

        // The dark candidate wins if it has more contrast
        let pair = ContrastPair::new(gray(0xb7), gray(0x6f));
        assert_eq!(inverse(&base, Some(&pair), &options)?, Some(gray(0x6f)));

        // Ties go to the dark candidate
        let pair = ContrastPair::new(gray(0x6f), gray(0x6f).with_alpha(0.5));
        assert_eq!(
            inverse(&base, Some(&pair), &options)?,
            Some(gray(0x6f).with_alpha(0.5))
        );
        Ok(())
    }

    #[test]
    fn test_given_candidates_below_threshold() -> Result<(), ContrastError> {
        // Gray 50% against 40% and 60%: neither meets a threshold, so the
        // candidate with more contrast wins.
        let base = Color::hsl(0.0, 0.0, 0.5);
        let pair = ContrastPair::new(Color::hsl(0.0, 0.0, 0.4), Color::hsl(0.0, 0.0, 0.6));
        assert!(base.contrast(&pair.light) < 4.5, "light is below threshold");
        assert!(base.contrast(&pair.dark) < 4.5, "dark is below threshold");

        let options = InverseOptions::default();
        assert_eq!(inverse(&base, Some(&pair), &options)?, Some(gray(0x66)));
        Ok(())
    }

    #[test]
    fn test_non_finite_colors() {
        let options = InverseOptions::default();
        let pair = ContrastPair::new(Color::WHITE, Color::BLACK);

        for base in [
            Color::srgb(Float::NAN, 0.0, 0.0),
            Color::lab(Float::INFINITY, 0.0, 0.0),
        ] {
            for given in [None, Some(&pair)] {
                assert!(
                    matches!(
                        inverse(&base, given, &options),
                        Err(ContrastError::NonFiniteColor(_))
                    ),
                    "{:?} is not a valid base",
                    base
                );
            }
        }

        let pair = ContrastPair::new(Color::WHITE, Color::srgb(0.0, Float::NEG_INFINITY, 0.0));
        assert!(
            matches!(
                inverse(&Color::BLACK, Some(&pair), &options),
                Err(ContrastError::NonFiniteColor(_))
            ),
            "candidates must be finite, too"
        );
    }

    #[test]
    fn test_missing_hue() -> Result<(), ContrastError> {
        let base = Color::hsl(Float::NAN, 0.0, 0.0);
        assert_eq!(inverse(&base, None, &InverseOptions::default())?, Some(gray(0x76)));
        Ok(())
    }

    #[test]
    fn test_incomparable_candidates() -> Result<(), ContrastError> {
        // Finite, but too large to convert without overflow
        let base = Color::lab(1e300, 0.0, 0.0);
        assert!(base.luminance().is_nan(), "luminance should be not-a-number");

        let pair = ContrastPair::new(Color::WHITE, Color::BLACK);
        assert_eq!(inverse(&base, Some(&pair), &InverseOptions::default())?, None);
        Ok(())
    }

    #[test]
    fn test_derived_candidates() -> Result<(), ContrastError> {
        let options = InverseOptions::default();

        let light = inverse(&Color::BLACK, None, &options)?;
        assert_eq!(light, Some(gray(0x76)));
        let dark = inverse(&Color::WHITE, None, &options)?;
        assert_eq!(dark, Some(gray(0x76)));

        // A step that covers the entire lightness range reaches the extremes.
        let options = InverseOptions::builder().step(6.0).build();
        assert_eq!(inverse(&Color::BLACK, None, &options)?, Some(Color::WHITE));
        assert_eq!(inverse(&Color::WHITE, None, &options)?, Some(Color::BLACK));

        assert_eq!(
            Color::from_24bit(0x33, 0x66, 0x99).inverse(),
            Color::from_24bit(0xbc, 0xe7, 0xff)
        );
        Ok(())
    }

    #[test]
    fn test_iteration_cap() -> Result<(), ContrastError> {
        let base = gray(0x80);
        let options = InverseOptions::builder().max_iterations(3).build();
        let result = inverse(&base, None, &options)?;
        let Some(result) = result else {
            panic!("derived candidates always produce a color")
        };
        assert!(result.contrast(&base) < 4.5, "{}", result.contrast(&base));
        assert_ne!(result, base);
        Ok(())
    }

    #[test]
    fn test_vanishing_step() -> Result<(), ContrastError> {
        let options = InverseOptions::builder().step(1e-20).build();
        assert_eq!(options.max_iterations(), 100_000);

        let base = gray(0x80);
        let result = inverse(&base, None, &options)?;
        let Some(result) = result else {
            panic!("derived candidates always produce a color")
        };
        assert!(result.contrast(&base) < 1.001, "{}", result.contrast(&base));
        Ok(())
    }

    #[test]
    fn test_inverse_str() -> Result<(), ContrastError> {
        let options = InverseOptions::default();
        assert_eq!(
            inverse_str("black", None, None, &options)?,
            Some(gray(0x76))
        );

        // A lone candidate is ignored.
        assert_eq!(
            inverse_str("black", Some("white"), None, &options)?,
            Some(gray(0x76))
        );

        assert_eq!(
            inverse_str("white", Some("nocolor"), Some("black"), &options),
            Err(ContrastError::InvalidColor(ColorFormatError::UnknownFormat))
        );
        Ok(())
    }

    #[test]
    fn test_idempotence() -> Result<(), ContrastError> {
        let options = InverseOptions::default();
        let base = Color::from_24bit(0xff, 0x69, 0xb4);
        let first = inverse(&base, None, &options)?;
        let second = inverse(&base, None, &options)?;
        assert_eq!(first, second);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_derived_candidate_has_contrast(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let base = Color::from_24bit(r, g, b);
            let result = base.inverse();
            let contrast = result.contrast(&base);
            prop_assert!(contrast >= 4.5, "{} on {} has contrast {}", result, base, contrast);
        }

        #[test]
        fn prop_given_candidate_is_better(r in any::<u8>(), l in any::<u8>(), d in any::<u8>()) {
            let base = gray(r);
            let pair = ContrastPair::new(gray(l), gray(d));
            let result = inverse(&base, Some(&pair), &InverseOptions::default());
            let expected = if base.contrast(&pair.light) > base.contrast(&pair.dark) {
                pair.light.clone()
            } else {
                pair.dark.clone()
            };
            prop_assert_eq!(result, Ok(Some(expected)));
        }
    }
}
