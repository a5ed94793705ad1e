mod blend;
mod contrast;
mod conversion;
mod difference;
mod equality;
mod gamut;
mod names;
mod space;
mod string;

// blend
pub use blend::BlendMode;
pub(crate) use blend::blend;

// contrast
pub(crate) use contrast::{
    shift_chroma, shift_lightness, to_contrast_ratio, to_relative_luminance,
    with_relative_luminance, ADJUSTMENT_UNIT,
};

// conversion
pub(crate) use conversion::{convert, from_24bit, to_24bit, to_8bit};

// difference
pub(crate) use difference::{average, delta_e_2000, distance, interpolate, root_mean_square};

// equality
pub use equality::to_eq_bits;
pub(crate) use equality::normalize;
#[cfg(test)]
pub(crate) use equality::{assert_same_coordinates, to_eq_coordinates};

// gamut
pub(crate) use gamut::{in_gamut, to_clipped_srgb};

// names
pub(crate) use names::to_name;

// space
pub use space::ColorSpace;

// string
pub(crate) use string::{format_css, format_hex, parse};
