//! Inbound command handling: an `UpdateNodeColor` payload becomes a single
//! all-or-nothing fill write against the document service.

use tracing::{debug, warn};

#[cfg(debug_assertions)]
use tracing::instrument;

use crate::color::{Color, ColorError};
use crate::document::DocumentService;
use crate::fills::{self, FillError, FillMutation};
use crate::messages::{PluginMessage, UpdateNodeColorPayload};

/// Error type for engine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateError {
    /// The element id no longer resolves to anything
    ElementNotResolvable(String),
    /// Stack-level failure from the fill policy
    Fill(FillError),
    /// The payload's color failed validation
    InvalidColor(ColorError),
}

impl std::fmt::Display for UpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElementNotResolvable(id) => write!(f, "element {} is not resolvable", id),
            Self::Fill(err) => write!(f, "{}", err),
            Self::InvalidColor(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UpdateError {}

impl From<FillError> for UpdateError {
    fn from(err: FillError) -> Self {
        Self::Fill(err)
    }
}

impl From<ColorError> for UpdateError {
    fn from(err: ColorError) -> Self {
        Self::InvalidColor(err)
    }
}

/// Outcome summary handed back for the caller's notice channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub mutation: FillMutation,
    pub is_preview: bool,
}

/// Handle one inbound transport message.
pub fn dispatch<D: DocumentService>(
    doc: &mut D,
    message: PluginMessage,
) -> Result<Applied, UpdateError> {
    match message {
        PluginMessage::UpdateNodeColor(payload) => apply_node_color(doc, &payload),
    }
}

/// Validate, decide, and write a color update.
///
/// The new stack is built in full before the single `write_fills`, so a
/// failure at any step leaves the document untouched.
#[cfg_attr(
    debug_assertions,
    instrument(skip(doc, payload), fields(node_id = %payload.node_id))
)]
pub fn apply_node_color<D: DocumentService>(
    doc: &mut D,
    payload: &UpdateNodeColorPayload,
) -> Result<Applied, UpdateError> {
    let color = payload_color(payload)?;

    let handle = doc
        .resolve_element(&payload.node_id)
        .ok_or_else(|| UpdateError::ElementNotResolvable(payload.node_id.clone()))?;

    let mut stack = doc.read_fills(&handle);

    // Blended-ness comes from the stack itself; the wire flag is advisory
    let blended = stack.iter().filter(|entry| entry.visible).count() > 1;
    if blended != payload.is_blended {
        debug!(
            derived = blended,
            advisory = payload.is_blended,
            "blended flag mismatch, trusting the stack"
        );
    }

    let mutation = fills::decide(&stack, &color, payload.is_preview, payload.add_new_fill)?;
    fills::apply(&mut stack, &mutation, &color).map_err(|err| {
        warn!(%err, "decided mutation failed to apply");
        UpdateError::from(err)
    })?;
    doc.write_fills(&handle, stack);

    match &mutation {
        FillMutation::Update { index } => {
            debug!(index, preview = payload.is_preview, "updated solid fill color");
        }
        FillMutation::Append { .. } => {
            debug!("appended adjusted fill on top");
        }
    }

    Ok(Applied {
        mutation,
        is_preview: payload.is_preview,
    })
}

/// Rebuild the payload color from its hex form, carrying the wire alpha.
fn payload_color(payload: &UpdateNodeColorPayload) -> Result<Color, UpdateError> {
    let color = Color::from_hex(&payload.color.hex)?;
    Ok(match payload.color.oklch.alpha {
        Some(alpha) => color.with_alpha(alpha),
        None => color,
    })
}
