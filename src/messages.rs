//! Typed transport messages between the panel and the document side.
//!
//! Wire shape is adjacently tagged JSON, `{ "type": ..., "payload": ... }`,
//! with camelCase payload keys.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Messages carried over the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum PluginMessage {
    UpdateNodeColor(UpdateNodeColorPayload),
}

/// Payload of the color-update command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeColorPayload {
    pub node_id: String,
    pub color: ColorPayload,
    pub is_preview: bool,
    /// Advisory: whether the sender believed the target has a blended
    /// (multi-fill) stack. The engine derives its own answer from the stack.
    #[serde(default)]
    pub is_blended: bool,
    /// Commit-time request to preserve the original fills by appending.
    #[serde(default)]
    pub add_new_fill: bool,
}

/// Wire projection of a [`Color`]: display hex plus OKLCH components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPayload {
    pub hex: String,
    pub oklch: OklchPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OklchPayload {
    pub l: f32,
    pub c: f32,
    pub h: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
    #[serde(default = "oklch_mode")]
    pub mode: String,
}

fn oklch_mode() -> String {
    "oklch".to_string()
}

impl From<&Color> for ColorPayload {
    fn from(color: &Color) -> Self {
        Self {
            hex: color.hex().to_string(),
            oklch: OklchPayload {
                l: color.lightness(),
                c: color.chroma(),
                h: color.hue(),
                alpha: Some(color.alpha()),
                mode: oklch_mode(),
            },
        }
    }
}
