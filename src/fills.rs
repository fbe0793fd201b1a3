//! Paint-stack inspection and the update/append policy.
//!
//! The engine never touches non-solid paints: gradients and images are
//! skipped when selecting the subject fill and left untouched by mutations.

use float_cmp::approx_eq;

use crate::color::Color;

/// Error type for fill-stack operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillError {
    /// The stack holds no visible solid entry to adjust
    NoSolidFill,
    /// A mutation referenced an index outside the stack
    InvalidFillIndex { index: usize, len: usize },
    /// A mutation targeted a non-solid entry
    NotSolid { index: usize },
}

impl std::fmt::Display for FillError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSolidFill => write!(f, "no visible solid fill in the paint stack"),
            Self::InvalidFillIndex { index, len } => {
                write!(f, "fill index {} out of bounds for stack of {}", index, len)
            }
            Self::NotSolid { index } => {
                write!(f, "fill at index {} is not a solid paint", index)
            }
        }
    }
}

impl std::error::Error for FillError {}

/// Paint kind of one stack entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FillKind {
    Solid(Color),
    Gradient,
    Image,
}

/// One layer of an element's paint stack. Index 0 is bottom-most; the last
/// index renders on top.
#[derive(Debug, Clone, PartialEq)]
pub struct FillEntry {
    pub kind: FillKind,
    pub visible: bool,
    pub opacity: f32,
}

impl FillEntry {
    /// Visible, full-opacity solid entry, the shape the engine itself writes.
    pub fn solid(color: Color) -> Self {
        Self {
            kind: FillKind::Solid(color),
            visible: true,
            opacity: 1.0,
        }
    }

    pub fn gradient() -> Self {
        Self {
            kind: FillKind::Gradient,
            visible: true,
            opacity: 1.0,
        }
    }

    pub fn image() -> Self {
        Self {
            kind: FillKind::Image,
            visible: true,
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn is_visible_solid(&self) -> bool {
        self.visible && matches!(self.kind, FillKind::Solid(_))
    }

    /// Whether this entry looks like one the engine appended on an earlier
    /// commit: a visible solid at full opacity.
    fn is_engine_authored(&self) -> bool {
        self.is_visible_solid() && approx_eq!(f32, self.opacity, 1.0, ulps = 2)
    }
}

/// A described mutation against a paint stack.
#[derive(Debug, Clone, PartialEq)]
pub enum FillMutation {
    /// Overwrite the color of one existing solid entry
    Update { index: usize },
    /// Push a new topmost solid entry
    Append { entry: FillEntry },
}

/// The topmost visible solid entry: the subject of contrast for blended and
/// multi-fill stacks.
pub fn topmost_visible_solid(fills: &[FillEntry]) -> Option<(usize, &Color)> {
    fills
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, entry)| match &entry.kind {
            FillKind::Solid(color) if entry.visible => Some((index, color)),
            _ => None,
        })
}

/// Decide how a new color lands on a paint stack.
///
/// Previews and plain commits update the topmost visible solid in place.
/// A commit with `preserve_original` appends a new top entry instead, unless
/// the top already looks engine-authored, in which case it is updated so
/// repeated commits do not stack duplicates.
pub fn decide(
    fills: &[FillEntry],
    new_color: &Color,
    is_preview: bool,
    preserve_original: bool,
) -> Result<FillMutation, FillError> {
    let (subject, _) = topmost_visible_solid(fills).ok_or(FillError::NoSolidFill)?;

    if fills.len() == 1 || !preserve_original || is_preview {
        return Ok(FillMutation::Update { index: subject });
    }

    let top = fills.len() - 1;
    if fills[top].is_engine_authored() {
        Ok(FillMutation::Update { index: top })
    } else {
        Ok(FillMutation::Append {
            entry: FillEntry::solid(new_color.clone()),
        })
    }
}

/// Apply a decided mutation to an owned stack.
///
/// An update replaces only the color of the targeted solid entry; every
/// other field and entry is left as-is. Out-of-bounds or non-solid targets
/// are rejected without touching the stack.
pub fn apply(
    fills: &mut Vec<FillEntry>,
    mutation: &FillMutation,
    new_color: &Color,
) -> Result<(), FillError> {
    match mutation {
        FillMutation::Update { index } => {
            let len = fills.len();
            let entry = fills
                .get_mut(*index)
                .ok_or(FillError::InvalidFillIndex { index: *index, len })?;
            match &mut entry.kind {
                FillKind::Solid(color) => {
                    *color = new_color.clone();
                    Ok(())
                }
                _ => Err(FillError::NotSolid { index: *index }),
            }
        }
        FillMutation::Append { entry } => {
            fills.push(entry.clone());
            Ok(())
        }
    }
}
