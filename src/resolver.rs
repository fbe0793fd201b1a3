//! Contrast-target resolution: a background and a desired Lc magnitude
//! become an immutable spec the solver consumes.

use serde::{Deserialize, Serialize};

use crate::apca::MAX_LC;
use crate::color::{Color, ColorError};

/// Default contrast target when the requested magnitude is not a finite number.
const DEFAULT_TARGET_LC: f64 = 60.0;

/// Contrast model a spec is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastModel {
    #[default]
    Apca,
}

/// Which side of the background the lightness search works on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDirection {
    /// Pick the side with more headroom: light backgrounds search darker,
    /// dark backgrounds search lighter.
    #[default]
    Auto,
    Lighter,
    Darker,
}

/// Immutable description of a desired contrast relationship.
///
/// Resolving twice with identical inputs yields equal specs.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastSpec {
    background: Color,
    target_lc: f64,
    direction: SearchDirection,
    model: ContrastModel,
}

impl ContrastSpec {
    /// Build a spec from an already-validated background color.
    ///
    /// The magnitude is taken as an absolute value and clamped onto the
    /// practical Lc scale (see [`clamp_target`]).
    pub fn new(
        background: Color,
        target_magnitude: f64,
        model: ContrastModel,
        direction: SearchDirection,
    ) -> Self {
        Self {
            background,
            target_lc: clamp_target(target_magnitude),
            direction,
            model,
        }
    }

    pub fn background(&self) -> &Color {
        &self.background
    }

    /// Target magnitude, non-negative and at most [`MAX_LC`].
    pub fn target_lc(&self) -> f64 {
        self.target_lc
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn model(&self) -> ContrastModel {
        self.model
    }
}

/// Resolve a background hex color and target magnitude into a [`ContrastSpec`].
///
/// Fails with the format error on a malformed background so the caller can
/// substitute a safe default (white) instead of propagating.
pub fn resolve(
    background_hex: &str,
    target_magnitude: f64,
    model: ContrastModel,
    direction: SearchDirection,
) -> Result<ContrastSpec, ColorError> {
    let background = Color::from_hex(background_hex)?;
    Ok(ContrastSpec::new(
        background,
        target_magnitude,
        model,
        direction,
    ))
}

/// Clamp a requested contrast magnitude onto [0, [`MAX_LC`]].
///
/// A non-finite request falls back to the default target of 60.
pub fn clamp_target(magnitude: f64) -> f64 {
    if !magnitude.is_finite() {
        return DEFAULT_TARGET_LC;
    }
    magnitude.abs().clamp(0.0, MAX_LC)
}
