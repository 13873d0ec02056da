//! Form-field surfaces: single-line inputs and textareas
//!
//! Both kinds store a flat value and expose the native selection start as
//! the cursor offset.

use crate::error::SurfaceResult;
use crate::events::EditSource;
use crate::node::{HostNode, NodeContent, NodeDescriptor};
use crate::surface::{EditableSurface, SurfaceKind};

/// Surface over a single-line form field (`<input type="text">` and kin)
///
/// Offset is the native selection start. Writes normalize newlines to
/// spaces, as the host element cannot hold line breaks.
pub struct PlainInputSurface {
    node: HostNode,
}

impl PlainInputSurface {
    pub fn bind(node: HostNode) -> Self {
        Self { node }
    }
}

impl EditableSurface for PlainInputSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::PlainInput
    }

    fn descriptor(&self) -> &NodeDescriptor {
        self.node.descriptor()
    }

    fn read_text(&self) -> SurfaceResult<String> {
        self.node.with_content(|content| match content {
            NodeContent::Value { text, .. } => Ok(text.clone()),
            _ => Ok(String::new()),
        })
    }

    fn read_cursor(&self) -> SurfaceResult<usize> {
        self.node.with_content(|content| match content {
            NodeContent::Value {
                text,
                selection_start,
            } => Ok((*selection_start).min(text.chars().count())),
            _ => Ok(0),
        })
    }

    fn write_text(&mut self, new_text: &str, new_cursor: usize) -> SurfaceResult<()> {
        let normalized: String = new_text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        self.node
            .with_content_mut(EditSource::Synthetic, |content| {
                if let NodeContent::Value {
                    text,
                    selection_start,
                } = content
                {
                    *text = normalized.clone();
                    *selection_start = new_cursor.min(normalized.chars().count());
                }
                Ok(())
            })
    }
}

/// Surface over a `<textarea>`: same value/selection model, newlines kept
pub struct MultilineSurface {
    node: HostNode,
}

impl MultilineSurface {
    pub fn bind(node: HostNode) -> Self {
        Self { node }
    }
}

impl EditableSurface for MultilineSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Multiline
    }

    fn descriptor(&self) -> &NodeDescriptor {
        self.node.descriptor()
    }

    fn read_text(&self) -> SurfaceResult<String> {
        self.node.with_content(|content| match content {
            NodeContent::Value { text, .. } => Ok(text.clone()),
            _ => Ok(String::new()),
        })
    }

    fn read_cursor(&self) -> SurfaceResult<usize> {
        self.node.with_content(|content| match content {
            NodeContent::Value {
                text,
                selection_start,
            } => Ok((*selection_start).min(text.chars().count())),
            _ => Ok(0),
        })
    }

    fn write_text(&mut self, new_text: &str, new_cursor: usize) -> SurfaceResult<()> {
        let owned = new_text.to_string();
        self.node
            .with_content_mut(EditSource::Synthetic, |content| {
                if let NodeContent::Value {
                    text,
                    selection_start,
                } = content
                {
                    *text = owned.clone();
                    *selection_start = new_cursor.min(owned.chars().count());
                }
                Ok(())
            })
    }
}
