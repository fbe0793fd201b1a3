//! Slider-driven adjustment sessions for a selected element.
//!
//! A session reduces panel events into solve/clamp/emit steps: slider moves
//! produce preview payloads, an explicit apply produces a commit payload,
//! and solve failures quietly retain the last valid color.

use tracing::{debug, warn};

use crate::color::Color;
use crate::envelope::max_chroma;
use crate::messages::{ColorPayload, UpdateNodeColorPayload};
use crate::resolver::{ContrastModel, ContrastSpec, SearchDirection, clamp_target};
use crate::solver::{Solved, solve};

/// Chroma used for the throwaway solve that locates the new lightness band
/// after a hue or contrast-target change.
const PROBE_CHROMA: f32 = 0.2;

/// Chroma ceiling to fall back on when the probe solve fails.
const FALLBACK_CEILING: f32 = 0.37;

/// Neutral stand-ins when the selection's foreground cannot be read.
const FALLBACK_HUE: f32 = 0.0;
const FALLBACK_CHROMA: f32 = 0.1;
const FALLBACK_LIGHTNESS: f32 = 0.5;

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created but not yet activated; nothing has been emitted.
    Uninitialized,
    /// Initial ceiling computed; waiting for interaction.
    Ready,
    /// At least one slider has moved since the last commit.
    Adjusting,
    /// The last emission was a commit; sliders reopen `Adjusting`.
    Committed,
}

/// Slider and action events the session reduces.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    HueChanged(f32),
    ChromaChanged(f32),
    TargetContrastChanged(f64),
    PreserveOriginalToggled(bool),
    Apply,
}

/// Inputs captured from the active selection when a session begins.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub node_id: String,
    pub background: Color,
    pub foreground: Color,
    /// Signed APCA measured between the pair at selection time.
    pub measured_lc: f64,
    pub is_blended: bool,
}

/// Per-selected-element adjustment state.
///
/// Created when an element with a resolvable solid fill becomes the active
/// selection and discarded when the selection changes; never persisted.
#[derive(Debug)]
pub struct AdjustmentSession {
    node_id: String,
    background: Color,
    current: Color,
    hue: f32,
    chroma: f32,
    target_lc: f64,
    /// Sign of the originally measured contrast.
    polarity: f64,
    ceiling: f32,
    preserve_original: bool,
    is_blended: bool,
    phase: SessionPhase,
}

impl AdjustmentSession {
    pub fn new(params: SessionParams) -> Self {
        let polarity = if params.measured_lc < 0.0 { -1.0 } else { 1.0 };

        Self {
            node_id: params.node_id,
            hue: params.foreground.hue(),
            chroma: params.foreground.chroma(),
            target_lc: clamp_target(params.measured_lc),
            polarity,
            // Real ceiling arrives in activate(); until then nothing solves.
            ceiling: max_chroma(params.foreground.lightness()),
            current: params.foreground,
            background: params.background,
            preserve_original: false,
            is_blended: params.is_blended,
            phase: SessionPhase::Uninitialized,
        }
    }

    /// Build a session from raw selection data, substituting safe defaults
    /// for anything unreadable.
    pub fn from_selection(
        node_id: &str,
        background_hex: &str,
        foreground_hex: &str,
        measured_lc: f64,
        is_blended: bool,
    ) -> Self {
        let background = Color::from_hex(background_hex).unwrap_or_else(|err| {
            warn!(%err, "background unreadable, substituting white");
            Color::white()
        });
        let foreground = Color::from_hex(foreground_hex).unwrap_or_else(|err| {
            warn!(%err, "foreground unreadable, using neutral defaults");
            Color::from_oklch(FALLBACK_LIGHTNESS, FALLBACK_CHROMA, FALLBACK_HUE, 1.0)
        });

        Self::new(SessionParams {
            node_id: node_id.to_string(),
            background,
            foreground,
            measured_lc,
            is_blended,
        })
    }

    /// First ceiling computation. Emits nothing: the quiet initial compute is
    /// a property of this transition, not a flag callers must remember.
    pub fn activate(&mut self) {
        if self.phase != SessionPhase::Uninitialized {
            return;
        }
        self.set_ceiling(max_chroma(self.current.lightness()));
        self.phase = SessionPhase::Ready;
    }

    /// Reduce one panel event, returning the payload to forward when the
    /// event produced an emission.
    pub fn update(&mut self, event: SessionEvent) -> Option<UpdateNodeColorPayload> {
        if self.phase == SessionPhase::Uninitialized {
            self.activate();
        }

        match event {
            SessionEvent::HueChanged(hue) => {
                if !hue.is_finite() {
                    warn!(hue, "ignoring non-finite hue");
                    return None;
                }
                self.hue = hue.rem_euclid(360.0);
                self.refresh_ceiling();
                self.solve_preview()
            }
            SessionEvent::ChromaChanged(chroma) => {
                if !chroma.is_finite() {
                    warn!(chroma, "ignoring non-finite chroma");
                    return None;
                }
                self.chroma = chroma.clamp(0.0, self.ceiling);
                self.solve_preview()
            }
            SessionEvent::TargetContrastChanged(target) => {
                self.target_lc = clamp_target(target);
                self.refresh_ceiling();
                self.solve_preview()
            }
            SessionEvent::PreserveOriginalToggled(flag) => {
                self.preserve_original = flag;
                None
            }
            SessionEvent::Apply => {
                self.phase = SessionPhase::Committed;
                Some(self.payload(false))
            }
        }
    }

    /// Ceiling and chroma move together, so a solve never runs with a chroma
    /// above its own ceiling.
    fn set_ceiling(&mut self, ceiling: f32) {
        self.ceiling = ceiling;
        if self.chroma > ceiling {
            self.chroma = ceiling;
        }
    }

    /// Relocate the chroma ceiling after a lightness-affecting change by
    /// probing where the new lightness will land.
    fn refresh_ceiling(&mut self) {
        let probed = match solve(self.spec(), PROBE_CHROMA, self.hue, 1.0) {
            Ok(solved) => max_chroma(solved.color.lightness()),
            Err(err) => {
                debug!(%err, "probe solve failed, keeping a conservative ceiling");
                FALLBACK_CEILING
            }
        };
        self.set_ceiling(probed);
    }

    fn solve_preview(&mut self) -> Option<UpdateNodeColorPayload> {
        self.phase = SessionPhase::Adjusting;

        match solve(self.spec(), self.chroma, self.hue, self.current.alpha()) {
            Ok(Solved { color, lc }) => {
                self.set_ceiling(max_chroma(color.lightness()));
                debug!(hex = color.hex(), lc, "preview solve succeeded");
                self.current = color;
                Some(self.payload(true))
            }
            Err(err) => {
                warn!(%err, "solve failed, keeping previous color");
                None
            }
        }
    }

    fn spec(&self) -> ContrastSpec {
        ContrastSpec::new(
            self.background.clone(),
            self.target_lc,
            ContrastModel::Apca,
            SearchDirection::Auto,
        )
    }

    fn payload(&self, is_preview: bool) -> UpdateNodeColorPayload {
        UpdateNodeColorPayload {
            node_id: self.node_id.clone(),
            color: ColorPayload::from(&self.current),
            is_preview,
            is_blended: self.is_blended,
            add_new_fill: !is_preview && self.preserve_original,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn chroma(&self) -> f32 {
        self.chroma
    }

    /// Current chroma envelope ceiling; `chroma() <= chroma_ceiling()` holds
    /// between all events.
    pub fn chroma_ceiling(&self) -> f32 {
        self.ceiling
    }

    /// Target contrast magnitude, non-negative.
    pub fn target_lc(&self) -> f64 {
        self.target_lc
    }

    /// Target with the originally measured polarity, for panel display.
    pub fn signed_target(&self) -> f64 {
        self.target_lc * self.polarity
    }

    pub fn preserve_original(&self) -> bool {
        self.preserve_original
    }

    /// Last valid solved color (the selection's foreground until a slider
    /// produces a solution).
    pub fn current_color(&self) -> &Color {
        &self.current
    }
}
