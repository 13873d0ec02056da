//! The `EditableSurface` capability contract
//!
//! A surface exposes uniform read/write/cursor operations over one bound
//! host node. Variants are selected once at focus time by the registry and
//! never re-sniffed per operation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SurfaceResult;
use crate::node::NodeDescriptor;

/// Capability tag of a bound surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    PlainInput,
    Multiline,
    ContentEditable,
    EmbeddedEditor,
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceKind::PlainInput => write!(f, "plain-input"),
            SurfaceKind::Multiline => write!(f, "multiline"),
            SurfaceKind::ContentEditable => write!(f, "content-editable"),
            SurfaceKind::EmbeddedEditor => write!(f, "embedded-editor"),
        }
    }
}

/// Uniform read/write/cursor operations over one focused text surface
///
/// Offsets are character offsets into the normalized text content.
/// `write_text` must leave the cursor at `new_cursor` and must surface a
/// synthetic content-changed notification on the host node so downstream
/// observers see the update consistently.
pub trait EditableSurface: Send {
    fn kind(&self) -> SurfaceKind;

    /// Descriptor of the bound host node (labelling metadata for context)
    fn descriptor(&self) -> &NodeDescriptor;

    fn read_text(&self) -> SurfaceResult<String>;

    fn read_cursor(&self) -> SurfaceResult<usize>;

    fn write_text(&mut self, new_text: &str, new_cursor: usize) -> SurfaceResult<()>;
}

/// Read text, degrading any failure to empty content
///
/// A hostile or unusual page must never crash the tracker: read failures
/// are logged and treated as "no content".
pub fn read_text_or_empty(surface: &dyn EditableSurface) -> String {
    match surface.read_text() {
        Ok(text) => text,
        Err(err) => {
            warn!(kind = %surface.kind(), error = %err, "surface read failed, treating as empty");
            String::new()
        }
    }
}

/// Read the cursor offset, degrading any failure to 0
pub fn read_cursor_or_zero(surface: &dyn EditableSurface) -> usize {
    match surface.read_cursor() {
        Ok(offset) => offset,
        Err(err) => {
            warn!(kind = %surface.kind(), error = %err, "cursor read failed, treating as 0");
            0
        }
    }
}
