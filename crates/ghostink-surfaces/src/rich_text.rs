//! Content-editable surface
//!
//! The region's text lives in a sequence of text spans (text nodes). The
//! global cursor offset is the cumulative length of the spans before the
//! selection plus the span-relative offset. Writing collapses the content
//! to a single span (as a `textContent` assignment does) and re-creates
//! the selection at the target offset by a cumulative-length walk.

use crate::error::{SurfaceError, SurfaceResult};
use crate::events::EditSource;
use crate::node::{HostNode, NodeContent, NodeDescriptor, SpanSelection};
use crate::surface::{EditableSurface, SurfaceKind};

pub struct RichTextSurface {
    node: HostNode,
}

impl RichTextSurface {
    pub fn bind(node: HostNode) -> Self {
        Self { node }
    }
}

/// Locate the span containing `offset` by walking cumulative lengths
///
/// Returns the span index and the offset within it. An offset exactly at
/// the end of the content selects the end of the last span.
fn locate_span(spans: &[String], offset: usize) -> SurfaceResult<SpanSelection> {
    let mut walked = 0;
    for (idx, span) in spans.iter().enumerate() {
        let len = span.chars().count();
        if walked + len >= offset {
            return Ok(SpanSelection {
                span: idx,
                offset: offset - walked,
            });
        }
        walked += len;
    }
    if spans.is_empty() {
        return Err(SurfaceError::OffsetOutOfBounds { offset, len: 0 });
    }
    Ok(SpanSelection {
        span: spans.len() - 1,
        offset: spans.last().map(|s| s.chars().count()).unwrap_or(0),
    })
}

impl EditableSurface for RichTextSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::ContentEditable
    }

    fn descriptor(&self) -> &NodeDescriptor {
        self.node.descriptor()
    }

    fn read_text(&self) -> SurfaceResult<String> {
        self.node.with_content(|content| match content {
            NodeContent::Spans { spans, .. } => Ok(spans.concat()),
            _ => Ok(String::new()),
        })
    }

    fn read_cursor(&self) -> SurfaceResult<usize> {
        self.node.with_content(|content| match content {
            NodeContent::Spans { spans, selection } => {
                let before: usize = spans
                    .iter()
                    .take(selection.span)
                    .map(|s| s.chars().count())
                    .sum();
                Ok(before + selection.offset)
            }
            _ => Ok(0),
        })
    }

    fn write_text(&mut self, new_text: &str, new_cursor: usize) -> SurfaceResult<()> {
        let owned = new_text.to_string();
        let cursor = new_cursor.min(owned.chars().count());
        self.node
            .with_content_mut(EditSource::Synthetic, |content| {
                if let NodeContent::Spans { spans, selection } = content {
                    *spans = vec![owned.clone()];
                    *selection = locate_span(spans, cursor)?;
                }
                Ok(())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EditKind;

    fn spans_node(spans: Vec<&str>, selection: SpanSelection) -> HostNode {
        HostNode::new(
            NodeDescriptor {
                tag: "div".to_string(),
                content_editable: true,
                ..NodeDescriptor::default()
            },
            NodeContent::Spans {
                spans: spans.into_iter().map(str::to_string).collect(),
                selection,
            },
        )
    }

    #[test]
    fn test_cursor_spans_cumulative_walk() {
        let node = spans_node(
            vec!["Dear ", "team", ", hello"],
            SpanSelection { span: 1, offset: 2 },
        );
        let surface = RichTextSurface::bind(node);
        assert_eq!(surface.read_text().unwrap(), "Dear team, hello");
        // "Dear " is 5 chars, +2 inside "team"
        assert_eq!(surface.read_cursor().unwrap(), 7);
    }

    #[test]
    fn test_write_collapses_spans_and_relocates_cursor() {
        let node = spans_node(vec!["a", "b"], SpanSelection::default());
        let mut surface = RichTextSurface::bind(node.clone());
        surface.write_text("hello there", 5).unwrap();
        assert_eq!(surface.read_text().unwrap(), "hello there");
        assert_eq!(surface.read_cursor().unwrap(), 5);
        node.with_content(|c| {
            if let NodeContent::Spans { spans, .. } = c {
                assert_eq!(spans.len(), 1);
            }
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_locate_span_at_exact_boundary() {
        let spans = vec!["abc".to_string(), "def".to_string()];
        // Offset 3 sits at the end of the first span, not the start of the second
        let sel = locate_span(&spans, 3).unwrap();
        assert_eq!(sel, SpanSelection { span: 0, offset: 3 });
    }

    #[test]
    fn test_write_then_user_edit_round_trip() {
        let node = spans_node(vec![""], SpanSelection::default());
        let mut surface = RichTextSurface::bind(node.clone());
        surface.write_text("hi", 2).unwrap();
        node.apply_user_edit(EditKind::Insert(" there".to_string()))
            .unwrap();
        assert_eq!(surface.read_text().unwrap(), "hi there");
        assert_eq!(surface.read_cursor().unwrap(), 8);
    }
}
