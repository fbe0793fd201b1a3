//! APCA (Accessible Perceptual Contrast Algorithm) implementation.
//!
//! Calculates perceptual contrast between foreground and background colors
//! following the APCA-W3 formulation. The Lc value is signed by polarity:
//! positive for dark text on a light background, negative for the reverse.

use palette::Srgb;

use crate::color::Color;

/// APCA luminance coefficients for sRGB D65
const COEF_R: f64 = 0.2126729;
const COEF_G: f64 = 0.7151522;
const COEF_B: f64 = 0.0721750;

/// Display transfer exponent for screen luminance
const GAMMA: f64 = 2.4;

/// Threshold for low-luminance soft clamp
const LOW_Y_THRESHOLD: f64 = 0.022;
const LOW_Y_EXPONENT: f64 = 1.414;

/// Luminance differences below this are treated as no contrast at all
const DELTA_Y_MIN: f64 = 0.0005;

/// APCA contrast calculation constants
const SCALE: f64 = 1.14;
const OFFSET: f64 = 0.027;
const LOW_CLIP: f64 = 0.1;

/// Exponents for light background (dark text on light bg)
const EXP_BG_LIGHT: f64 = 0.56;
const EXP_FG_LIGHT: f64 = 0.57;

/// Exponents for dark background (light text on dark bg)
const EXP_BG_DARK: f64 = 0.65;
const EXP_FG_DARK: f64 = 0.62;

/// Upper bound of the practical Lc scale; contrast targets clamp to this.
pub const MAX_LC: f64 = 108.0;

/// Simple 2.4-gamma transfer for one 8-bit channel.
#[inline]
fn channel_to_linear(channel: u8) -> f64 {
    (f64::from(channel) / 255.0).powf(GAMMA)
}

/// Convert an sRGB color to APCA screen luminance (Y).
pub fn srgb_to_luminance(color: Srgb<u8>) -> f64 {
    let y = COEF_R * channel_to_linear(color.red)
        + COEF_G * channel_to_linear(color.green)
        + COEF_B * channel_to_linear(color.blue);

    // Low-luminance soft clamp
    if y < LOW_Y_THRESHOLD {
        y + (LOW_Y_THRESHOLD - y).powf(LOW_Y_EXPONENT)
    } else {
        y
    }
}

/// Calculate APCA contrast (Lc) between foreground and background colors.
///
/// Returns the Lc value:
/// - Positive values indicate dark text on light background
/// - Negative values indicate light text on dark background
/// - Typical range: -108 to +106
///
/// Raw contrast below the low clip is reported as 0, so |Lc| never lands in
/// the open interval (0, 7.3).
///
/// # Example
///
/// ```
/// use palette::Srgb;
/// use apcatune::apca::apca_contrast;
///
/// let black = Srgb::new(0u8, 0, 0);
/// let white = Srgb::new(255u8, 255, 255);
///
/// // Black text on white background
/// let lc = apca_contrast(black, white);
/// assert!(lc > 100.0);
///
/// // White text on black background
/// let lc = apca_contrast(white, black);
/// assert!(lc < -100.0);
/// ```
pub fn apca_contrast(fg: Srgb<u8>, bg: Srgb<u8>) -> f64 {
    let y_fg = srgb_to_luminance(fg);
    let y_bg = srgb_to_luminance(bg);

    if (y_bg - y_fg).abs() < DELTA_Y_MIN {
        return 0.0;
    }

    let c = if y_bg > y_fg {
        // Light background, dark text (positive contrast)
        SCALE * (y_bg.powf(EXP_BG_LIGHT) - y_fg.powf(EXP_FG_LIGHT))
    } else {
        // Dark background, light text (negative contrast)
        SCALE * (y_bg.powf(EXP_BG_DARK) - y_fg.powf(EXP_FG_DARK))
    };

    // Apply low clip and offset
    if c.abs() < LOW_CLIP {
        0.0
    } else if c > 0.0 {
        (c - OFFSET) * 100.0
    } else {
        (c + OFFSET) * 100.0
    }
}

/// Signed Lc between two engine colors.
///
/// Alpha is ignored; translucent fills composite against the document before
/// they reach the contrast measurement.
pub fn contrast_between(fg: &Color, bg: &Color) -> f64 {
    apca_contrast(fg.to_srgb_u8(), bg.to_srgb_u8())
}
