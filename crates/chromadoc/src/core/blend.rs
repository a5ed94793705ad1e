use crate::Float;

/// A mode for blending two colors.
///
/// Blending combines the 8-bit sRGB channels of a bottom and a top color, one
/// channel at a time. The modes are the separable blend modes familiar from
/// image editors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Multiply channels, which always darkens.
    #[default]
    Multiply,
    /// Pick the darker channel.
    Darken,
    /// Pick the lighter channel.
    Lighten,
    /// Multiply inverted channels, which always lightens.
    Screen,
    /// Multiply or screen, depending on the top channel.
    Overlay,
    /// Darken the bottom channel to reflect the top channel.
    Burn,
    /// Brighten the bottom channel to reflect the top channel.
    Dodge,
}

impl BlendMode {
    /// Look up a blend mode by name. Matching is ASCII case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let mode = match name.trim().to_ascii_lowercase().as_str() {
            "multiply" => Self::Multiply,
            "darken" => Self::Darken,
            "lighten" => Self::Lighten,
            "screen" => Self::Screen,
            "overlay" => Self::Overlay,
            "burn" => Self::Burn,
            "dodge" => Self::Dodge,
            _ => return None,
        };

        Some(mode)
    }

    /// Blend a single pair of channels, each ranging from 0 to 255.
    fn apply(self, bottom: Float, top: Float) -> Float {
        match self {
            Self::Multiply => bottom * top / 255.0,
            Self::Darken => bottom.min(top),
            Self::Lighten => bottom.max(top),
            Self::Screen => 255.0 * (1.0 - (1.0 - bottom / 255.0) * (1.0 - top / 255.0)),
            Self::Overlay => {
                if top < 128.0 {
                    2.0 * bottom * top / 255.0
                } else {
                    255.0 * (1.0 - 2.0 * (1.0 - bottom / 255.0) * (1.0 - top / 255.0))
                }
            }
            Self::Burn => {
                if bottom == 0.0 {
                    0.0
                } else {
                    255.0 * (1.0 - (1.0 - top / 255.0) / (bottom / 255.0))
                }
            }
            Self::Dodge => {
                if bottom == 255.0 {
                    255.0
                } else {
                    255.0 * (top / 255.0) / (1.0 - bottom / 255.0)
                }
            }
        }
        .clamp(0.0, 255.0)
    }
}

impl core::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match *self {
            Self::Multiply => "multiply",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Burn => "burn",
            Self::Dodge => "dodge",
        };

        f.write_str(s)
    }
}

/// Blend the 24-bit bottom and top colors with the given mode.
///
/// The result is in sRGB with unit range coordinates.
pub(crate) fn blend(mode: BlendMode, bottom: [u8; 3], top: [u8; 3]) -> [Float; 3] {
    let channel =
        |index: usize| mode.apply(Float::from(bottom[index]), Float::from(top[index])) / 255.0;

    [channel(0), channel(1), channel(2)]
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{blend, BlendMode};
    use crate::core::to_24bit;
    use crate::ColorSpace::Srgb;

    #[test]
    fn test_from_name() {
        assert_eq!(BlendMode::from_name("Overlay"), Some(BlendMode::Overlay));
        assert_eq!(BlendMode::from_name("burn"), Some(BlendMode::Burn));
        assert_eq!(BlendMode::from_name("normal"), None);
        assert_eq!(format!("{}", BlendMode::Screen), "screen");
    }

    #[test]
    fn test_blend() {
        let bottom = [0xff, 0x80, 0x00];
        let top = [0x80, 0x80, 0x80];

        for (mode, expected) in [
            (BlendMode::Multiply, [128, 64, 0]),
            (BlendMode::Darken, [128, 128, 0]),
            (BlendMode::Lighten, [255, 128, 128]),
            (BlendMode::Screen, [255, 192, 128]),
            (BlendMode::Overlay, [255, 128, 1]),
            (BlendMode::Burn, [128, 2, 0]),
            (BlendMode::Dodge, [255, 255, 128]),
        ] {
            let actual = to_24bit(Srgb, &blend(mode, bottom, top));
            assert_eq!(actual, expected, "blend mode {}", mode);
        }
    }
}
