//! Color values with co-maintained OKLCH and display-hex representations.
//!
//! A [`Color`] always carries both forms and only constructors write them,
//! so the perceptual triple and the `#rrggbb` string cannot drift apart.

use csscolorparser::Color as CssColor;
use palette::{IntoColor, Oklch, Srgb};

use crate::envelope::fit_chroma;

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input is not `#` followed by 3, 6, or 8 hex digits
    InvalidFormat(String),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(input) => {
                write!(
                    f,
                    "invalid color format {:?} (expected #RGB, #RRGGBB, or #RRGGBBAA)",
                    input
                )
            }
        }
    }
}

impl std::error::Error for ColorError {}

/// A single visual color in OKLCH with its derived display hex.
///
/// Fields are private on purpose: every constructor derives the hex and the
/// perceptual triple from the same source, which keeps the two
/// representations in agreement within rounding tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    hex: String,
    rgb: [u8; 3],
    lightness: f32,
    chroma: f32,
    hue: f32,
    alpha: f32,
}

impl Color {
    /// Parse a hex color string (`#RGB`, `#RRGGBB`, or `#RRGGBBAA`).
    ///
    /// The stored hex is normalized to lowercase `#rrggbb`; an 8-digit input's
    /// alpha lands in [`Color::alpha`].
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        if !is_hex_shape(trimmed) {
            return Err(ColorError::InvalidFormat(input.to_string()));
        }

        let css_color: CssColor = trimmed
            .parse()
            .map_err(|_| ColorError::InvalidFormat(input.to_string()))?;
        let [r, g, b, a] = css_color.to_rgba8();

        Ok(Self::from_srgb_u8(
            Srgb::new(r, g, b),
            f32::from(a) / 255.0,
        ))
    }

    /// Build a color from an OKLCH triple.
    ///
    /// Lightness is clamped to [0, 1], hue normalized to [0, 360), and chroma
    /// reduced to the largest in-gamut value at that lightness/hue before the
    /// hex is derived. Out-of-range or non-finite alpha coerces to 1.
    pub fn from_oklch(lightness: f32, chroma: f32, hue: f32, alpha: f32) -> Self {
        let lightness = if lightness.is_finite() {
            lightness.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let hue = if hue.is_finite() {
            hue.rem_euclid(360.0)
        } else {
            0.0
        };
        let chroma = fit_chroma(lightness, chroma.max(0.0), hue);

        let oklch = Oklch::new(lightness, chroma, hue);
        let linear: palette::LinSrgb<f32> = oklch.into_color();
        let rgb = srgb_to_u8(Srgb::from_linear(linear));

        Self {
            hex: format_hex(rgb),
            rgb: [rgb.red, rgb.green, rgb.blue],
            lightness,
            chroma,
            hue,
            alpha: coerce_alpha(alpha),
        }
    }

    /// Pure white, the safe substitute for unreadable backgrounds.
    pub fn white() -> Self {
        Self {
            hex: "#ffffff".to_string(),
            rgb: [255, 255, 255],
            lightness: 1.0,
            chroma: 0.0,
            hue: 0.0,
            alpha: 1.0,
        }
    }

    fn from_srgb_u8(rgb: Srgb<u8>, alpha: f32) -> Self {
        let srgb = Srgb::new(
            f32::from(rgb.red) / 255.0,
            f32::from(rgb.green) / 255.0,
            f32::from(rgb.blue) / 255.0,
        );
        let oklch: Oklch<f32> = srgb.into_linear().into_color();

        Self {
            hex: format_hex(rgb),
            rgb: [rgb.red, rgb.green, rgb.blue],
            lightness: oklch.l,
            chroma: oklch.chroma,
            hue: oklch.hue.into_positive_degrees(),
            alpha: coerce_alpha(alpha),
        }
    }

    /// Same color with a different alpha; the hex/OKLCH pair is untouched.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = coerce_alpha(alpha);
        self
    }

    /// Normalized display hex, always lowercase `#rrggbb`.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// OKLCH lightness (0.0-1.0).
    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    /// OKLCH chroma.
    pub fn chroma(&self) -> f32 {
        self.chroma
    }

    /// OKLCH hue in degrees [0, 360).
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Alpha in [0, 1].
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// 8-bit sRGB form, decoded from the stored display representation.
    pub fn to_srgb_u8(&self) -> Srgb<u8> {
        Srgb::new(self.rgb[0], self.rgb[1], self.rgb[2])
    }

    /// CSS-style OKLCH string for panel display, e.g. `oklch(62.3% 0.1 180)`.
    ///
    /// Alpha is appended as `/ a` only when it is below 1.
    pub fn css_oklch(&self) -> String {
        if self.alpha < 1.0 {
            format!(
                "oklch({:.1}% {:.3} {:.1} / {:.2})",
                self.lightness * 100.0,
                self.chroma,
                self.hue,
                self.alpha
            )
        } else {
            format!(
                "oklch({:.1}% {:.3} {:.1})",
                self.lightness * 100.0,
                self.chroma,
                self.hue
            )
        }
    }
}

/// Syntactic check: `#` followed by exactly 3, 6, or 8 hex digits.
fn is_hex_shape(input: &str) -> bool {
    let Some(digits) = input.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Convert sRGB f32 to u8 with clamping.
pub(crate) fn srgb_to_u8(color: Srgb<f32>) -> Srgb<u8> {
    Srgb::new(
        (color.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn format_hex(rgb: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Out-of-range alpha is a permissive fallback to opaque, not an error.
fn coerce_alpha(alpha: f32) -> f32 {
    if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
        alpha
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_six_digit_hex() {
        let color = Color::from_hex("#1A6B8E").expect("valid hex");
        assert_eq!(color.hex(), "#1a6b8e");
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn parses_short_and_alpha_forms() {
        let short = Color::from_hex("#fff").expect("valid hex");
        assert_eq!(short.hex(), "#ffffff");

        let with_alpha = Color::from_hex("#10203080").expect("valid hex");
        assert_eq!(with_alpha.hex(), "#102030");
        assert_relative_eq!(with_alpha.alpha(), 128.0 / 255.0, epsilon = 0.01);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["ffffff", "#ggg", "#12345", "", "#", "oklch(0.5 0.1 20)"] {
            assert!(
                Color::from_hex(input).is_err(),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn oklch_construction_stays_in_gamut() {
        // Absurd chroma request gets fitted rather than clipped per-channel
        let color = Color::from_oklch(0.6, 3.0, 30.0, 1.0);
        assert!(color.chroma() < 0.5);
        assert_eq!(color.hex().len(), 7);
    }

    #[test]
    fn alpha_coercion() {
        assert_eq!(Color::from_oklch(0.5, 0.1, 0.0, 5.0).alpha(), 1.0);
        assert_eq!(Color::from_oklch(0.5, 0.1, 0.0, -1.0).alpha(), 1.0);
        assert_eq!(Color::from_oklch(0.5, 0.1, 0.0, f32::NAN).alpha(), 1.0);
        assert_eq!(Color::from_oklch(0.5, 0.1, 0.0, 0.25).alpha(), 0.25);
    }

    #[test]
    fn hue_wraps_and_lightness_clamps() {
        let color = Color::from_oklch(1.7, 0.05, 370.0, 1.0);
        assert_relative_eq!(color.hue(), 10.0, epsilon = 0.001);
        assert_eq!(color.lightness(), 1.0);
    }

    #[test]
    fn white_matches_parsed_white() {
        let parsed = Color::from_hex("#ffffff").expect("valid hex");
        assert_eq!(Color::white().hex(), parsed.hex());
        assert!(Color::white().lightness() > 0.999);
    }

    #[test]
    fn css_oklch_formatting() {
        let opaque = Color::from_oklch(0.623, 0.1, 180.0, 1.0);
        assert_eq!(opaque.css_oklch(), "oklch(62.3% 0.100 180.0)");

        let translucent = opaque.clone().with_alpha(0.5);
        assert!(translucent.css_oklch().ends_with("/ 0.50)"));
    }
}
