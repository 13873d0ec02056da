//! Embedded code-editor widget surface
//!
//! The widget exposes its own model and cursor API in line/column terms;
//! flat offsets only exist through the widget's conversions.

use crate::error::SurfaceResult;
use crate::events::EditSource;
use crate::node::{HostNode, NodeContent, NodeDescriptor, WidgetBuffer};
use crate::surface::{EditableSurface, SurfaceKind};

pub struct EmbeddedEditorSurface {
    node: HostNode,
}

impl EmbeddedEditorSurface {
    pub fn bind(node: HostNode) -> Self {
        Self { node }
    }
}

impl EditableSurface for EmbeddedEditorSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::EmbeddedEditor
    }

    fn descriptor(&self) -> &NodeDescriptor {
        self.node.descriptor()
    }

    fn read_text(&self) -> SurfaceResult<String> {
        self.node.with_content(|content| match content {
            NodeContent::Widget(buffer) => Ok(buffer.text()),
            _ => Ok(String::new()),
        })
    }

    fn read_cursor(&self) -> SurfaceResult<usize> {
        self.node.with_content(|content| match content {
            NodeContent::Widget(buffer) => Ok(buffer.offset_at(buffer.cursor)),
            _ => Ok(0),
        })
    }

    fn write_text(&mut self, new_text: &str, new_cursor: usize) -> SurfaceResult<()> {
        let owned = new_text.to_string();
        self.node
            .with_content_mut(EditSource::Synthetic, |content| {
                if let NodeContent::Widget(buffer) = content {
                    *buffer = WidgetBuffer::from_text(&owned);
                    buffer.cursor = buffer.position_at(new_cursor);
                }
                Ok(())
            })
    }
}
