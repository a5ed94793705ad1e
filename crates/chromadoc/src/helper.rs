//! The template helper for colors.
//!
//! Templates invoke the helper with a handful of strings: a color, an
//! operation, and options, in flexible order. For example, `#336699 inverse
//! hex` computes a contrasting color and returns its hexadecimal format,
//! whereas `[white, black] contrast` computes the contrast ratio between two
//! colors. This module parses such arguments into a [`Command`] and executes
//! the command to produce a [`HelperValue`].
//!
//!
//! # Example
//!
//! ```
//! # use chromadoc::helper::{chroma, Command};
//! # use chromadoc::error::CommandError;
//! let command = Command::parse(&["hotpink", "brighten", "hex"]);
//! assert_eq!(command.operation(), None);
//!
//! let value = command.execute()?;
//! assert_eq!(value.to_string(), "hex: #ff9ce6");
//!
//! let value = chroma(&["inverse", "#336699"]);
//! assert_eq!(value.to_string(), "#bce7ff");
//! # Ok::<(), CommandError>(())
//! ```
//!
//! # Arguments
//!
//! [`Command::parse`] normalizes the arguments as follows:
//!
//!   * If the first argument names an operation, it trades places with the
//!     second argument.
//!   * If the second argument contains `=` or does not name an operation, it
//!     becomes the first option.
//!   * If the first argument names an operation, a filter, or a getter, it
//!     becomes the first option and the command has no subject.
//!   * A first argument in brackets, e.g., `[#fff, 'red']`, is a list of
//!     colors.
//!
//! Options have the form `key=value` or just `key`. Filters (`alpha`,
//! `darken`, `brighten`, `saturate`, `desaturate`, `luminance`) modify a
//! color result in the order given, with bare filters using an amount of 1.
//! Getters (`hex`, `name`, `css`, `rgb`, `rgba`, `hsl`, `hsv`, `hsi`, `lab`,
//! `lch`, `hcl`, `gl`) turn a color result into a map from getter names to values.
//! The `inverse` operation accepts `step`, `mix` accepts `ratio` and `mode`,
//! `average` and `distance` accept `mode`, and `blend` accepts `mode` as well.
//! All other options are ignored.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::CommandError;
use crate::inverse::{inverse, ContrastPair, InverseOptions};
use crate::{BlendMode, Color, ColorSpace, Float};

/// An operation on one or more colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Mix,
    Scale,
    Bezier,
    Average,
    Blend,
    Random,
    Contrast,
    Distance,
    DeltaE,
    Limits,
    Temperature,
    Cubehelix,
    Inverse,
    IsEqual,
    IsColor,
}

impl Operation {
    /// Look up an operation by its template name. Matching is case-sensitive,
    /// as it is for templates.
    pub fn from_name(name: &str) -> Option<Self> {
        use Operation::*;

        let operation = match name {
            "mix" => Mix,
            "scale" => Scale,
            "bezier" => Bezier,
            "average" => Average,
            "blend" => Blend,
            "random" => Random,
            "contrast" => Contrast,
            "distance" => Distance,
            "deltaE" => DeltaE,
            "limits" => Limits,
            "temperature" | "temparature" => Temperature,
            "cubehelix" => Cubehelix,
            "inverse" => Inverse,
            "isEqual" => IsEqual,
            "isColor" => IsColor,
            _ => return None,
        };

        Some(operation)
    }

    /// Get the template name.
    pub const fn name(&self) -> &'static str {
        use Operation::*;

        match *self {
            Mix => "mix",
            Scale => "scale",
            Bezier => "bezier",
            Average => "average",
            Blend => "blend",
            Random => "random",
            Contrast => "contrast",
            Distance => "distance",
            DeltaE => "deltaE",
            Limits => "limits",
            Temperature => "temperature",
            Cubehelix => "cubehelix",
            Inverse => "inverse",
            IsEqual => "isEqual",
            IsColor => "isColor",
        }
    }

    /// Determine whether this crate implements the operation.
    pub const fn is_supported(&self) -> bool {
        !matches!(
            *self,
            Self::Scale
                | Self::Bezier
                | Self::Random
                | Self::Limits
                | Self::Temperature
                | Self::Cubehelix
        )
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A filter, which modifies a color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Filter {
    Alpha,
    Darken,
    Brighten,
    Saturate,
    Desaturate,
    Luminance,
}

impl Filter {
    fn from_name(name: &str) -> Option<Self> {
        let filter = match name {
            "alpha" => Self::Alpha,
            "darken" => Self::Darken,
            "brighten" => Self::Brighten,
            "saturate" => Self::Saturate,
            "desaturate" => Self::Desaturate,
            "luminance" => Self::Luminance,
            _ => return None,
        };

        Some(filter)
    }

    fn apply(self, color: &Color, amount: Float) -> Color {
        match self {
            Self::Alpha => color.with_alpha(amount),
            Self::Darken => color.darken(amount),
            Self::Brighten => color.brighten(amount),
            Self::Saturate => color.saturate(amount),
            Self::Desaturate => color.desaturate(amount),
            Self::Luminance => color.with_luminance(amount),
        }
    }
}

/// A getter, which extracts a representation of a color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Getter {
    Hex,
    Name,
    Css,
    Rgb,
    Rgba,
    Hsl,
    Hsv,
    Hsi,
    Lab,
    Lch,
    Hcl,
    Gl,
}

impl Getter {
    fn from_name(name: &str) -> Option<Self> {
        let getter = match name {
            "hex" => Self::Hex,
            "name" => Self::Name,
            "css" => Self::Css,
            "rgb" => Self::Rgb,
            "rgba" => Self::Rgba,
            "hsl" => Self::Hsl,
            "hsv" => Self::Hsv,
            "hsi" => Self::Hsi,
            "lab" => Self::Lab,
            "lch" => Self::Lch,
            "hcl" => Self::Hcl,
            "gl" => Self::Gl,
            _ => return None,
        };

        Some(getter)
    }

    fn get(self, color: &Color) -> HelperValue {
        let coordinates = |space| color.to(space).coordinates().to_vec();
        let bytes = || color.to_24bit().map(Float::from).to_vec();

        match self {
            Self::Hex => HelperValue::Text(color.to_hex_format()),
            Self::Name => HelperValue::Text(color.name()),
            Self::Css => HelperValue::Text(color.to_css_format()),
            Self::Rgb => HelperValue::Numbers(bytes()),
            Self::Rgba => {
                let mut values = bytes();
                values.push(color.alpha());
                HelperValue::Numbers(values)
            }
            Self::Hsl => HelperValue::Numbers(coordinates(ColorSpace::Hsl)),
            Self::Hsv => HelperValue::Numbers(coordinates(ColorSpace::Hsv)),
            Self::Hsi => {
                let [r, g, b, _] = color.to_gl();
                HelperValue::Numbers(to_hsi([r, g, b]).to_vec())
            }
            Self::Lab => HelperValue::Numbers(coordinates(ColorSpace::Lab)),
            Self::Lch => HelperValue::Numbers(coordinates(ColorSpace::Lch)),
            Self::Hcl => {
                let mut values = coordinates(ColorSpace::Lch);
                values.reverse();
                HelperValue::Numbers(values)
            }
            Self::Gl => HelperValue::Numbers(color.to_gl().to_vec()),
        }
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The subject of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subject {
    /// No color at all.
    None,
    /// A single color.
    Single(String),
    /// A list of colors.
    List(Vec<String>),
}

/// An option of a command, with or without value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOption {
    pub key: String,
    pub value: Option<String>,
}

impl CommandOption {
    /// Parse an option in `key=value` or `key` form.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.split_once('=') {
            Some((key, value)) => Self {
                key: key.trim().to_string(),
                value: Some(value.trim().to_string()),
            },
            None => Self {
                key: text.to_string(),
                value: None,
            },
        }
    }
}

/// The result of executing a command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum HelperValue {
    /// No result, which templates render as nothing.
    Nothing,
    Bool(bool),
    Number(Float),
    Text(String),
    Numbers(Vec<Float>),
    Color(Color),
    /// The results of getters, keyed by getter name.
    Map(BTreeMap<String, HelperValue>),
}

impl core::fmt::Display for HelperValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::Nothing => Ok(()),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(ref text) => f.write_str(text),
            Self::Numbers(ref values) => {
                for (index, value) in values.iter().enumerate() {
                    if 0 < index {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
            Self::Color(ref color) => write!(f, "{}", color),
            Self::Map(ref entries) => {
                for (index, (key, value)) in entries.iter().enumerate() {
                    if 0 < index {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                Ok(())
            }
        }
    }
}

// ====================================================================================================================

/// A parsed helper command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    operation: Option<Operation>,
    subject: Subject,
    options: Vec<CommandOption>,
}

/// Determine whether the argument names an operation, a filter, or a getter.
fn is_keyword(argument: &str) -> bool {
    Operation::from_name(argument).is_some()
        || Filter::from_name(argument).is_some()
        || Getter::from_name(argument).is_some()
}

/// Parse a list literal such as `[#fff, 'red']`.
fn parse_list(argument: &str) -> Option<Vec<String>> {
    let body = argument.trim().strip_prefix('[')?.strip_suffix(']')?;
    if body.contains(['[', ']']) {
        return None;
    }

    Some(
        body.split(',')
            .map(|item| item.trim().replace(['\'', '"'], ""))
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

impl Command {
    /// Create a new command.
    pub fn new(
        operation: Option<Operation>,
        subject: Subject,
        options: Vec<CommandOption>,
    ) -> Self {
        Self {
            operation,
            subject,
            options,
        }
    }

    /// Parse the helper arguments into a command.
    ///
    /// See the [module documentation](crate::helper) for how this method
    /// normalizes arguments. It never fails; problems surface when executing
    /// the command.
    pub fn parse(args: &[&str]) -> Self {
        let mut color = args.first().copied();
        let mut method = args.get(1).copied();
        let mut options: Vec<&str> = args.iter().skip(2).copied().collect();

        if color.is_some_and(|c| Operation::from_name(c).is_some()) {
            core::mem::swap(&mut color, &mut method);
        } else if let Some(m) = method {
            if m.contains('=') || Operation::from_name(m).is_none() {
                options.insert(0, m);
                method = None;
            }
        }

        let subject = match color {
            Some(c) if is_keyword(c) => {
                options.insert(0, c);
                Subject::None
            }
            Some(c) => parse_list(c).map_or_else(|| Subject::Single(c.to_string()), Subject::List),
            None => Subject::None,
        };

        Self {
            operation: method.and_then(Operation::from_name),
            subject,
            options: options
                .into_iter()
                .filter(|o| !o.trim().is_empty())
                .map(CommandOption::parse)
                .collect(),
        }
    }

    /// Get the operation.
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Get the subject.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Get the options.
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Look up the value of the option with the given key.
    fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|o| o.key == key)
            .and_then(|o| o.value.as_deref())
    }

    /// Parse the numeric option with the given key.
    fn number_option(&self, key: &str) -> Result<Option<Float>, CommandError> {
        self.option(key)
            .map(|value| parse_number(key, value))
            .transpose()
    }

    /// Parse the color space option `mode`.
    fn mode_option(&self, default: ColorSpace) -> Result<ColorSpace, CommandError> {
        match self.option("mode") {
            None => Ok(default),
            Some(value) => ColorSpace::from_mode(value).ok_or_else(|| invalid_option("mode", value)),
        }
    }

    /// Parse the subject into colors.
    fn colors(&self, operation: Operation) -> Result<Vec<Color>, CommandError> {
        match self.subject {
            Subject::None => Err(CommandError::MissingColor(operation.name())),
            Subject::Single(ref text) => Ok(vec![parse_color(text)?]),
            Subject::List(ref items) => items.iter().map(|text| parse_color(text)).collect(),
        }
    }

    /// Parse the subject into exactly two colors.
    fn two_colors(&self, operation: Operation) -> Result<(Color, Color), CommandError> {
        let colors = self.colors(operation)?;
        match <[Color; 2]>::try_from(colors) {
            Ok([c1, c2]) => Ok((c1, c2)),
            Err(colors) => Err(CommandError::WrongArity {
                operation: operation.name(),
                expected: "2",
                actual: colors.len(),
            }),
        }
    }

    /// Execute this command.
    ///
    /// # Errors
    ///
    /// This method returns an error if the subject is not a color or list of
    /// colors, if an operation is unsupported or has the wrong number of
    /// colors, or if an option has a malformed value.
    pub fn execute(&self) -> Result<HelperValue, CommandError> {
        if self.operation == Some(Operation::IsColor) {
            let is_color = match self.subject {
                Subject::None => false,
                Subject::Single(ref text) => Color::is_color(text),
                Subject::List(ref items) => {
                    !items.is_empty() && items.iter().all(|text| Color::is_color(text))
                }
            };
            return Ok(HelperValue::Bool(is_color));
        }

        let result = match self.operation {
            None => match self.subject {
                Subject::None => return Ok(HelperValue::Nothing),
                Subject::Single(ref text) => HelperValue::Color(parse_color(text)?),
                Subject::List(ref items) => match *items.as_slice() {
                    [ref text] => HelperValue::Color(parse_color(text)?),
                    _ => {
                        return Err(CommandError::WrongArity {
                            operation: "chroma",
                            expected: "1",
                            actual: items.len(),
                        })
                    }
                },
            },
            Some(operation) => self.run(operation)?,
        };

        self.post_process(result)
    }

    /// Run the operation.
    fn run(&self, operation: Operation) -> Result<HelperValue, CommandError> {
        use Operation::*;

        if !operation.is_supported() {
            return Err(CommandError::UnsupportedOperation(operation.name().to_string()));
        }

        debug!(%operation, subject = ?self.subject, "running helper operation");
        let value = match operation {
            Inverse => {
                let colors = self.colors(operation)?;
                let mut builder = InverseOptions::builder();
                if let Some(step) = self.number_option("step")? {
                    builder.step(step);
                }
                let options = builder.build();

                let result = match *colors.as_slice() {
                    [ref base] | [ref base, _] => inverse(base, None, &options)?,
                    [ref base, ref light, ref dark] => {
                        let pair = ContrastPair::new(light.clone(), dark.clone());
                        inverse(base, Some(&pair), &options)?
                    }
                    _ => {
                        return Err(CommandError::WrongArity {
                            operation: operation.name(),
                            expected: "1 to 3",
                            actual: colors.len(),
                        })
                    }
                };

                result.map_or(HelperValue::Nothing, HelperValue::Color)
            }
            IsEqual => {
                let (c1, c2) = self.two_colors(operation)?;
                HelperValue::Bool(c1.is_equal(&c2))
            }
            Contrast => {
                let (c1, c2) = self.two_colors(operation)?;
                HelperValue::Number(c1.contrast(&c2))
            }
            Distance => {
                let (c1, c2) = self.two_colors(operation)?;
                let space = self.mode_option(ColorSpace::Lab)?;
                HelperValue::Number(c1.distance(&c2, space))
            }
            DeltaE => {
                let (c1, c2) = self.two_colors(operation)?;
                HelperValue::Number(c1.delta_e(&c2))
            }
            Mix => {
                let (c1, c2) = self.two_colors(operation)?;
                let ratio = self.number_option("ratio")?.unwrap_or(0.5);
                let space = self.mode_option(ColorSpace::LinearSrgb)?;
                HelperValue::Color(c1.mix(&c2, ratio, space))
            }
            Average => {
                let colors = self.colors(operation)?;
                let space = self.mode_option(ColorSpace::LinearSrgb)?;
                let mean = Color::average(&colors, space).ok_or(CommandError::WrongArity {
                    operation: operation.name(),
                    expected: "at least 1",
                    actual: 0,
                })?;
                HelperValue::Color(mean)
            }
            Blend => {
                let (bottom, top) = self.two_colors(operation)?;
                let mode = match self.option("mode") {
                    None => BlendMode::default(),
                    Some(value) => {
                        BlendMode::from_name(value).ok_or_else(|| invalid_option("mode", value))?
                    }
                };
                HelperValue::Color(bottom.blend(&top, mode))
            }
            Scale | Bezier | Random | Limits | Temperature | Cubehelix | IsColor => {
                return Err(CommandError::UnsupportedOperation(operation.name().to_string()))
            }
        };

        Ok(value)
    }

    /// Apply filters and getters to a color result.
    fn post_process(&self, value: HelperValue) -> Result<HelperValue, CommandError> {
        let mut color = match value {
            HelperValue::Color(color) => color,
            other => return Ok(other),
        };

        for option in &self.options {
            if let Some(filter) = Filter::from_name(&option.key) {
                let amount = match option.value.as_deref() {
                    None | Some("") => 1.0,
                    Some(value) => parse_number(&option.key, value)?,
                };
                color = filter.apply(&color, amount);
            }
        }

        let gotten: BTreeMap<String, HelperValue> = self
            .options
            .iter()
            .filter_map(|o| Getter::from_name(&o.key).map(|g| (o.key.clone(), g.get(&color))))
            .collect();

        if gotten.is_empty() {
            Ok(HelperValue::Color(color))
        } else {
            Ok(HelperValue::Map(gotten))
        }
    }
}

/// Convert clipped sRGB coordinates to hue, saturation, and intensity. The
/// hue of an achromatic color is not-a-number.
fn to_hsi(rgb: [Float; 3]) -> [Float; 3] {
    let [r, g, b] = rgb;
    let intensity = (r + g + b) / 3.0;
    let min = r.min(g).min(b);
    if r.max(g).max(b) == min {
        return [Float::NAN, 0.0, intensity];
    }

    let saturation = 1.0 - min / intensity;

    let numerator = ((r - g) + (r - b)) / 2.0;
    let denominator = (r - g).mul_add(r - g, (r - b) * (g - b)).sqrt();
    let mut hue = (numerator / denominator).clamp(-1.0, 1.0).acos().to_degrees();
    if b > g {
        hue = 360.0 - hue;
    }

    [hue, saturation, intensity]
}

fn parse_color(text: &str) -> Result<Color, CommandError> {
    text.parse().map_err(|source| CommandError::InvalidColor {
        text: text.to_string(),
        source,
    })
}

fn parse_number(key: &str, value: &str) -> Result<Float, CommandError> {
    value
        .trim()
        .parse::<Float>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid_option(key, value))
}

fn invalid_option(key: &str, value: &str) -> CommandError {
    CommandError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Run the helper on the template arguments.
///
/// This function parses and executes the command. Since templates have no
/// use for errors, it logs them as warnings and returns
/// [`HelperValue::Nothing`] instead.
pub fn chroma(args: &[&str]) -> HelperValue {
    match Command::parse(args).execute() {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, ?args, "color helper failed");
            HelperValue::Nothing
        }
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{chroma, Command, CommandOption, HelperValue, Operation, Subject};
    use crate::error::{ColorFormatError, CommandError};
    use crate::{Color, Float};

    fn entry(value: HelperValue, key: &str) -> HelperValue {
        match value {
            HelperValue::Map(mut entries) => entries.remove(key).unwrap_or(HelperValue::Nothing),
            other => other,
        }
    }

    fn option(key: &str, value: Option<&str>) -> CommandOption {
        CommandOption {
            key: key.to_string(),
            value: value.map(str::to_string),
        }
    }

    fn hex(color: &str) -> HelperValue {
        HelperValue::Map([("hex".to_string(), HelperValue::Text(color.to_string()))].into())
    }

    #[test]
    fn test_parse() {
        let command = Command::parse(&["#fff", "inverse"]);
        assert_eq!(command.operation(), Some(Operation::Inverse));
        assert_eq!(command.subject(), &Subject::Single("#fff".to_string()));
        assert!(command.options().is_empty(), "no options");

        assert_eq!(Command::parse(&["inverse", "#fff"]), command);

        let command = Command::parse(&["#fff", "darken=2", "hex"]);
        assert_eq!(command.operation(), None);
        assert_eq!(
            command.options(),
            &[option("darken", Some("2")), option("hex", None)]
        );

        let command = Command::parse(&["hex", "inverse"]);
        assert_eq!(command.operation(), Some(Operation::Inverse));
        assert_eq!(command.subject(), &Subject::None);
        assert_eq!(command.options(), &[option("hex", None)]);

        let command = Command::parse(&["[#fff, 'red', \"blue\"]", "mix", "ratio = 0.25"]);
        assert_eq!(
            command.subject(),
            &Subject::List(vec!["#fff".to_string(), "red".to_string(), "blue".to_string()])
        );
        assert_eq!(command.options(), &[option("ratio", Some("0.25"))]);

        assert_eq!(
            Command::parse(&[]),
            Command::new(None, Subject::None, Vec::new())
        );
    }

    #[test]
    fn test_colors() -> Result<(), CommandError> {
        assert_eq!(Command::parse(&[]).execute()?, HelperValue::Nothing);
        assert_eq!(
            Command::parse(&["navy"]).execute()?,
            HelperValue::Color(Color::from_24bit(0, 0, 0x80))
        );
        assert_eq!(
            Command::parse(&["hotpink", "brighten", "hex"]).execute()?,
            hex("#ff9ce6")
        );
        assert_eq!(
            Command::parse(&["hotpink", "darken=1", "alpha=0.5", "hex"]).execute()?,
            hex("#c9338480")
        );

        let value = Command::parse(&["#ff0000", "hex", "rgba", "name"]).execute()?;
        let HelperValue::Map(entries) = value else {
            panic!("getters should produce a map")
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.get("name"), Some(&HelperValue::Text("red".to_string())));
        assert_eq!(
            entries.get("rgba"),
            Some(&HelperValue::Numbers(vec![255.0, 0.0, 0.0, 1.0]))
        );
        Ok(())
    }

    #[test]
    fn test_operations() -> Result<(), CommandError> {
        assert_eq!(
            Command::parse(&["#000", "inverse"]).execute()?,
            HelperValue::Color(Color::from_24bit(0x76, 0x76, 0x76))
        );
        assert_eq!(
            Command::parse(&["#000", "inverse", "step=6"]).execute()?,
            HelperValue::Color(Color::WHITE)
        );
        assert_eq!(
            Command::parse(&["[#fff, #515151, #959595]", "inverse", "hex"]).execute()?,
            hex("#515151")
        );

        assert_eq!(
            Command::parse(&["[red, #f00]", "isEqual"]).execute()?,
            HelperValue::Bool(true)
        );
        assert_eq!(
            Command::parse(&["[red, blue]", "isEqual"]).execute()?,
            HelperValue::Bool(false)
        );
        assert_eq!(
            Command::parse(&["#bada55", "isColor"]).execute()?,
            HelperValue::Bool(true)
        );
        assert_eq!(
            Command::parse(&["bada55s", "isColor"]).execute()?,
            HelperValue::Bool(false)
        );

        let HelperValue::Number(ratio) = Command::parse(&["[white, black]", "contrast"]).execute()?
        else {
            panic!("contrast should produce a number")
        };
        assert!((ratio - 21.0).abs() < 1e-9, "{}", ratio);

        let HelperValue::Number(distance) =
            Command::parse(&["[white, black]", "distance", "mode=lab"]).execute()?
        else {
            panic!("distance should produce a number")
        };
        assert!((distance - 100.0).abs() < 1e-3, "{}", distance);

        assert_eq!(
            Command::parse(&["[red, blue]", "mix", "ratio=0", "mode=rgb", "hex"]).execute()?,
            hex("#ff0000")
        );
        assert_eq!(
            Command::parse(&["mix", "[red, blue]", "hex"]).execute()?,
            hex("#bc00bc")
        );
        assert_eq!(
            Command::parse(&["[red, blue]", "average", "mode=rgb", "hex"]).execute()?,
            hex("#800080")
        );
        assert_eq!(
            Command::parse(&["[#ff8000, #808080]", "blend", "mode=screen", "hex"]).execute()?,
            hex("#ffc080")
        );
        Ok(())
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Command::parse(&["nocolor", "hex"]).execute(),
            Err(CommandError::InvalidColor {
                text: "nocolor".to_string(),
                source: ColorFormatError::UnknownFormat
            })
        );
        assert_eq!(
            Command::parse(&["red", "scale"]).execute(),
            Err(CommandError::UnsupportedOperation("scale".to_string()))
        );
        assert_eq!(
            Command::parse(&["inverse"]).execute(),
            Err(CommandError::MissingColor("inverse"))
        );
        assert_eq!(
            Command::parse(&["[red]", "contrast"]).execute(),
            Err(CommandError::WrongArity {
                operation: "contrast",
                expected: "2",
                actual: 1
            })
        );
        assert_eq!(
            Command::parse(&["[red, blue]", "mix", "ratio=half"]).execute(),
            Err(CommandError::InvalidOption {
                key: "ratio".to_string(),
                value: "half".to_string()
            })
        );
        assert_eq!(
            Command::parse(&["[red, blue]", "blend", "mode=normal"]).execute(),
            Err(CommandError::InvalidOption {
                key: "mode".to_string(),
                value: "normal".to_string()
            })
        );
        assert!(
            matches!(
                Command::parse(&["red", "inverse", "step=0"]).execute(),
                Err(CommandError::Contrast(_))
            ),
            "zero step is invalid"
        );

        assert_eq!(chroma(&["nocolor"]), HelperValue::Nothing);
        assert_eq!(chroma(&["red", "scale"]), HelperValue::Nothing);
    }

    #[test]
    fn test_hsi() {
        let close = |actual: &[Float], expected: [Float; 3]| {
            actual.len() == 3 && actual.iter().zip(expected).all(|(a, e)| (a - e).abs() < 1e-9)
        };

        for (color, expected) in [
            ("red", [0.0, 1.0, 1.0 / 3.0]),
            ("blue", [240.0, 1.0, 1.0 / 3.0]),
            ("yellow", [60.0, 1.0, 2.0 / 3.0]),
        ] {
            let HelperValue::Numbers(values) = entry(chroma(&[color, "hsi"]), "hsi") else {
                panic!("hsi should produce numbers")
            };
            assert!(close(&values, expected), "{}: {:?}", color, values);
        }

        let HelperValue::Numbers(values) = entry(chroma(&["gray", "hsi"]), "hsi") else {
            panic!("hsi should produce numbers")
        };
        assert_eq!(values.len(), 3);
        assert!(values[0].is_nan(), "gray has no hue");
        assert_eq!(values[1], 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(HelperValue::Nothing.to_string(), "");
        assert_eq!(HelperValue::Bool(true).to_string(), "true");
        assert_eq!(HelperValue::Numbers(vec![1.0, 0.5]).to_string(), "1,0.5");
        assert_eq!(chroma(&["#336699", "inverse"]).to_string(), "#bce7ff");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&HelperValue::Nothing)?, "null");
        assert_eq!(serde_json::to_string(&hex("#ffffff"))?, r##"{"hex":"#ffffff"}"##);
        assert_eq!(
            serde_json::to_string(&chroma(&["[white, black]", "isEqual"]))?,
            "false"
        );
        assert_eq!(
            serde_json::to_string(&chroma(&["rebeccapurple"]))?,
            "\"#663399\""
        );
        Ok(())
    }
}
