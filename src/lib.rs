//! Perceptual contrast adjustment engine.
//!
//! Solves OKLCH foreground colors against APCA contrast targets for a
//! design-tool plugin: the host measures a selected foreground/background
//! pair, the panel drives hue/chroma/target-contrast sliders through an
//! [`session::AdjustmentSession`], and the resulting preview/commit payloads
//! flow through [`engine::dispatch`] into a narrow [`document::DocumentService`]
//! seam instead of a live scene graph.

pub mod apca;
pub mod color;
pub mod document;
pub mod engine;
pub mod envelope;
pub mod fills;
pub mod logging;
pub mod messages;
pub mod resolver;
pub mod session;
pub mod solver;
