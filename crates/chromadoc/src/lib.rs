//! # chromadoc
//!
//! Chromadoc provides the color helpers of a documentation theme: a small
//! color model, the operations templates need for styling, and a routine for
//! finding a readable contrast color.
//!
//!
//! ## 1. Overview
//!
//! Chromadoc's main abstractions are:
//!
//!   * [`Color`] combines a [`ColorSpace`] with three [`Float`] coordinates
//!     and an alpha value. Colors parse from hashed hexadecimal, CSS
//!     functional notation, and CSS named colors. Two colors are equal if
//!     they have the same 32-bit RGBA representation, no matter how they were
//!     specified. Methods brighten, darken, saturate, mix, average, and blend
//!     colors and compute their luminance, contrast, and difference.
//!   * The [`inverse`](mod@inverse) module selects a color with sufficient
//!     contrast against a base color. The [`inverse()`] function either picks
//!     one of a given [`ContrastPair`] of candidates or derives its own
//!     candidates by brightening and darkening the base color until one of
//!     them meets the [`InverseOptions`]' contrast thresholds.
//!   * The [`helper`] module parses the loosely structured string arguments
//!     of the template helper into a typed [`Command`](helper::Command) and
//!     executes the command to produce a [`HelperValue`](helper::HelperValue).
//!
//!
//! ## 2. Finding Contrast
//!
//! ```
//! # use chromadoc::{Color, ContrastPair, InverseOptions};
//! # use chromadoc::error::ContrastError;
//! let base: Color = "#336699".parse()?;
//!
//! // Derive a contrasting color from the base color.
//! assert_eq!(base.inverse().to_hex_format(), "#bce7ff");
//!
//! // Pick the better of two candidates.
//! let pair = ContrastPair::new(Color::WHITE, Color::BLACK);
//! let chosen = chromadoc::inverse(&base, Some(&pair), &InverseOptions::default())?;
//! assert_eq!(chosen, Some(Color::WHITE));
//! # Ok::<(), ContrastError>(())
//! ```
//!
//! Both forms are also available to templates:
//!
//! ```
//! # use chromadoc::helper::chroma;
//! assert_eq!(chroma(&["#336699", "inverse"]).to_string(), "#bce7ff");
//! assert_eq!(chroma(&["[#336699, white, black]", "inverse", "hex"]).to_string(), "hex: #ffffff");
//! ```
//!
//!
//! ## 3. Optional Features
//!
//! Chromadoc supports two feature flags:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     and `u64` as [`Bits`] instead of `f32` as [`Float`] and `u32` as
//!     [`Bits`]. This feature is enabled by default.
//!   - **`serde`** controls serialization of [`Color`] as its hashed
//!     hexadecimal format and of [`HelperValue`](helper::HelperValue) as the
//!     equivalent JSON value. This feature is enabled by default.
//!
//!
//! ## 4. Logging
//!
//! Chromadoc logs with [tracing](https://docs.rs/tracing). The contrast
//! search emits a `trace` event per iteration and `debug` events for its
//! decisions. The template helper reports failed commands as `warn` events,
//! since templates have no other use for errors.
//!
//!

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod core;
pub mod error;
pub mod helper;
pub mod inverse;
mod object;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use core::{BlendMode, ColorSpace};
pub use inverse::{inverse, inverse_str, ContrastPair, InverseOptions, InverseOptionsBuilder};
pub use object::Color;
