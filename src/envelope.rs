//! Chroma envelope estimation for OKLCH colors.
//!
//! Two layers: a cheap closed-form ceiling used to scale the chroma slider,
//! and an exact in-gamut boundary search used when a concrete color must be
//! displayable.

use palette::{IntoColor, Oklch, Srgb};

/// Envelope peak location on the lightness axis.
const PEAK_LIGHTNESS: f32 = 0.55;

/// Envelope value at the peak.
const PEAK_CHROMA: f32 = 0.4;

/// Slope of the envelope away from the peak.
const FALLOFF: f32 = 0.6;

/// Envelope floor inside the working lightness band.
const FLOOR_CHROMA: f32 = 0.05;

/// Value returned near the lightness extremes.
const EDGE_CHROMA: f32 = 0.1;

/// Working lightness band; outside it the envelope pins to [`EDGE_CHROMA`].
const LOW_LIGHTNESS: f32 = 0.1;
const HIGH_LIGHTNESS: f32 = 0.95;

/// Conservative ceiling when lightness is not a finite number.
const FALLBACK_CHROMA: f32 = 0.37;

/// Slack allowed on sRGB channels when testing gamut membership.
const GAMUT_EPS: f32 = 1e-4;

/// Resolution of the in-gamut chroma boundary search.
const CHROMA_EPS: f32 = 1e-4;

/// Estimate the maximum useful chroma at a given OKLCH lightness.
///
/// Total over all inputs: out-of-range lightness clamps to the nearest
/// endpoint, and a non-finite lightness yields a conservative fallback.
/// The curve is a bell peaking near mid-lightness and shrinking toward both
/// extremes; it approximates the sRGB envelope rather than tracing it.
pub fn max_chroma(lightness: f32) -> f32 {
    if !lightness.is_finite() {
        return FALLBACK_CHROMA;
    }

    let l = lightness.clamp(0.0, 1.0);
    if l < LOW_LIGHTNESS || l > HIGH_LIGHTNESS {
        return EDGE_CHROMA;
    }

    (PEAK_CHROMA - FALLOFF * (l - PEAK_LIGHTNESS).abs()).clamp(FLOOR_CHROMA, PEAK_CHROMA)
}

/// Whether an OKLCH triple converts into displayable sRGB.
pub fn in_gamut(lightness: f32, chroma: f32, hue: f32) -> bool {
    let oklch = Oklch::new(lightness, chroma, hue);
    let linear: palette::LinSrgb<f32> = oklch.into_color();
    let srgb = Srgb::from_linear(linear);

    let lo = -GAMUT_EPS;
    let hi = 1.0 + GAMUT_EPS;
    (lo..=hi).contains(&srgb.red)
        && (lo..=hi).contains(&srgb.green)
        && (lo..=hi).contains(&srgb.blue)
}

/// Largest in-gamut chroma at `(lightness, hue)` not exceeding `chroma`.
///
/// Binary search along the chroma axis; lightness and hue are preserved.
pub fn fit_chroma(lightness: f32, chroma: f32, hue: f32) -> f32 {
    let chroma = chroma.max(0.0);
    if in_gamut(lightness, chroma, hue) {
        return chroma;
    }

    let mut lo = 0.0f32;
    let mut hi = chroma;
    while hi - lo > CHROMA_EPS {
        let mid = (lo + hi) / 2.0;
        if in_gamut(lightness, mid, hue) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
