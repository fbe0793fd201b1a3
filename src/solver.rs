//! Foreground color solver: Brent's method over OKLCH lightness for a
//! target APCA contrast.

use argmin::core::{CostFunction, Error, Executor};
use argmin::solver::brent::BrentOpt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::apca::apca_contrast;
use crate::color::Color;
use crate::resolver::{ContrastSpec, SearchDirection};

/// Acceptable |achieved - target| before the target counts as unreachable.
const DEFAULT_TOLERANCE: f64 = 0.5;

/// Iteration cap for Brent's method.
const DEFAULT_MAX_ITERS: u64 = 50;

/// Brackets narrower than this are a point, not a search range.
const MIN_BRACKET_WIDTH: f64 = 1e-3;

/// Tuning knobs for the lightness search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// Acceptable solve error in Lc units.
    pub tolerance: f64,
    /// Iteration cap for Brent's method.
    pub max_iters: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

/// Error type for solve operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Requested chroma is negative or not a number
    InvalidChroma(f32),
    /// Requested hue is not a finite number
    InvalidHue(f32),
    /// No lightness in [0, 1] reaches the target at this hue
    UnsolvableContrast { target_lc: f64, closest_lc: f64 },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChroma(chroma) => write!(f, "invalid chroma {}", chroma),
            Self::InvalidHue(hue) => write!(f, "invalid hue {}", hue),
            Self::UnsolvableContrast {
                target_lc,
                closest_lc,
            } => write!(
                f,
                "target Lc {:.1} unreachable at this hue, closest {:.1}",
                target_lc, closest_lc
            ),
        }
    }
}

impl std::error::Error for SolveError {}

/// Result of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solved {
    /// The foreground color satisfying the spec
    pub color: Color,
    /// Signed contrast it actually achieves against the spec's background
    pub lc: f64,
}

/// Cost function for the lightness search.
///
/// Minimizes `|apca(candidate(L), bg) - target|`. Each candidate's chroma is
/// fitted into gamut at its lightness, so the color being measured is exactly
/// the color a caller gets back.
#[derive(Clone, Copy)]
struct ContrastCost {
    bg: palette::Srgb<u8>,
    target_lc: f64,
    hue: f32,
    chroma: f32,
}

impl ContrastCost {
    /// Candidate foreground at a given lightness.
    fn color_at(&self, lightness: f64, alpha: f32) -> Color {
        Color::from_oklch(lightness as f32, self.chroma, self.hue, alpha)
    }

    fn contrast_at(&self, lightness: f64) -> f64 {
        let candidate = self.color_at(lightness, 1.0);
        apca_contrast(candidate.to_srgb_u8(), self.bg).abs()
    }
}

impl CostFunction for ContrastCost {
    type Param = f64;
    type Output = f64;

    fn cost(&self, lightness: &Self::Param) -> Result<Self::Output, Error> {
        Ok((self.contrast_at(*lightness) - self.target_lc).abs())
    }
}

/// Solve with default [`SolverOptions`].
pub fn solve(
    spec: ContrastSpec,
    chroma: f32,
    hue: f32,
    alpha: f32,
) -> Result<Solved, SolveError> {
    solve_with(spec, chroma, hue, alpha, SolverOptions::default())
}

/// Solve for a foreground color satisfying `spec` at the given hue and chroma.
///
/// Lightness is searched with Brent's method inside a bracket on the spec's
/// side of the background; the requested chroma quietly degrades to the gamut
/// boundary wherever it does not fit. Identical inputs always produce
/// bit-identical output.
///
/// # Example
///
/// ```
/// use apcatune::resolver::{ContrastModel, SearchDirection, resolve};
/// use apcatune::solver::solve;
///
/// let spec = resolve("#1a1a2e", 60.0, ContrastModel::Apca, SearchDirection::Auto).unwrap();
/// let solved = solve(spec, 0.12, 25.0, 1.0).unwrap();
///
/// // A dark background needs a light foreground
/// assert!(solved.color.lightness() > 0.5);
/// ```
pub fn solve_with(
    spec: ContrastSpec,
    chroma: f32,
    hue: f32,
    alpha: f32,
    options: SolverOptions,
) -> Result<Solved, SolveError> {
    if !chroma.is_finite() || chroma < 0.0 {
        return Err(SolveError::InvalidChroma(chroma));
    }
    if !hue.is_finite() {
        return Err(SolveError::InvalidHue(hue));
    }
    let hue = hue.rem_euclid(360.0);

    let (low, high) = search_bracket(spec.background().lightness(), spec.direction());
    let cost = ContrastCost {
        bg: spec.background().to_srgb_u8(),
        target_lc: spec.target_lc(),
        hue,
        chroma,
    };

    // Degenerate bracket: the only candidate is the point itself
    if high - low < MIN_BRACKET_WIDTH {
        return finish(cost, (low + high) / 2.0, alpha, options.tolerance);
    }

    let solver = BrentOpt::new(low, high);
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(options.max_iters))
        .run();

    match result {
        Ok(res) => {
            let lightness = res.state.best_param.unwrap_or((low + high) / 2.0);
            finish(cost, lightness, alpha, options.tolerance)
        }
        Err(err) => {
            warn!(%err, "lightness optimization failed, evaluating bracket midpoint");
            finish(cost, (low + high) / 2.0, alpha, options.tolerance)
        }
    }
}

/// Pick the lightness bracket for the requested search direction.
fn search_bracket(bg_lightness: f32, direction: SearchDirection) -> (f64, f64) {
    let bg_l = f64::from(bg_lightness.clamp(0.0, 1.0));
    match direction {
        SearchDirection::Darker => (0.0, bg_l),
        SearchDirection::Lighter => (bg_l, 1.0),
        SearchDirection::Auto => {
            if bg_l < 0.5 {
                (bg_l, 1.0)
            } else {
                (0.0, bg_l)
            }
        }
    }
}

/// Rebuild the candidate at the final lightness and check it against the
/// tolerance. The same construction path as the cost function keeps the
/// returned color identical to the one that was measured.
fn finish(
    cost: ContrastCost,
    lightness: f64,
    alpha: f32,
    tolerance: f64,
) -> Result<Solved, SolveError> {
    let color = cost.color_at(lightness, alpha);
    let lc = apca_contrast(color.to_srgb_u8(), cost.bg);
    let miss = (lc.abs() - cost.target_lc).abs();

    if miss > tolerance {
        debug!(
            target = cost.target_lc,
            closest = lc.abs(),
            hue = cost.hue,
            "contrast target unreachable"
        );
        return Err(SolveError::UnsolvableContrast {
            target_lc: cost.target_lc,
            closest_lc: lc.abs(),
        });
    }

    Ok(Solved { color, lc })
}
