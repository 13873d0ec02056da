//! Host-page element model
//!
//! `HostNode` stands in for the page element a surface is bound to: a
//! descriptor (tag, input type, classes, contenteditable flag, labelling
//! metadata) plus shared mutable content. The content variant mirrors how
//! each element kind actually stores text and cursor state: flat value with
//! a selection start, a list of text spans with a span-relative selection,
//! or an embedded widget buffer with its own line/column cursor.
//!
//! Writes from a surface bump the node's change sequence and record a
//! synthetic content-changed notice, so host-page observers (and tests)
//! can see programmatic updates exactly like native input events.

use std::sync::{Arc, RwLock};

use crate::error::{SurfaceError, SurfaceResult};
use crate::events::{EditEvent, EditKind, EditSource};

/// Static description of the host element, captured at bind time
#[derive(Debug, Clone, Default)]
pub struct NodeDescriptor {
    pub tag: String,
    pub input_type: Option<String>,
    pub classes: Vec<String>,
    pub content_editable: bool,
    pub label: String,
    pub placeholder: String,
    pub name: String,
}

impl NodeDescriptor {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Span-relative selection inside a content-editable region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanSelection {
    /// Index of the text span holding the cursor
    pub span: usize,
    /// Character offset within that span
    pub offset: usize,
}

/// Line/column cursor used by embedded editor widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetPosition {
    pub line: usize,
    pub column: usize,
}

/// Buffer model of an embedded code-editor widget
///
/// The widget owns its own text model and cursor API; offsets only exist
/// through the conversions below.
#[derive(Debug, Clone, Default)]
pub struct WidgetBuffer {
    pub lines: Vec<String>,
    pub cursor: WidgetPosition,
}

impl WidgetBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            cursor: WidgetPosition::default(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Convert a line/column position to a flat character offset
    pub fn offset_at(&self, pos: WidgetPosition) -> usize {
        let mut offset = 0;
        for (idx, line) in self.lines.iter().enumerate() {
            if idx == pos.line {
                return offset + pos.column.min(line.chars().count());
            }
            // +1 for the newline separating lines
            offset += line.chars().count() + 1;
        }
        offset.saturating_sub(1)
    }

    /// Convert a flat character offset to a line/column position
    pub fn position_at(&self, offset: usize) -> WidgetPosition {
        let mut remaining = offset;
        for (idx, line) in self.lines.iter().enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                return WidgetPosition {
                    line: idx,
                    column: remaining,
                };
            }
            remaining -= len + 1;
        }
        WidgetPosition {
            line: self.lines.len().saturating_sub(1),
            column: self.lines.last().map(|l| l.chars().count()).unwrap_or(0),
        }
    }
}

/// Content storage for each element kind
#[derive(Debug, Clone)]
pub enum NodeContent {
    /// `<input>` / `<textarea>`: flat value plus native selection start
    Value { text: String, selection_start: usize },
    /// Content-editable region: text spans plus a span-relative selection
    Spans {
        spans: Vec<String>,
        selection: SpanSelection,
    },
    /// Embedded editor widget with its own model/cursor API
    Widget(WidgetBuffer),
}

/// A content-changed notice observable by host-page scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub seq: u64,
    pub source: EditSource,
}

#[derive(Debug)]
struct NodeState {
    content: NodeContent,
    change_seq: u64,
    notices: Vec<ChangeNotice>,
    detached: bool,
}

/// A reference to one page element eligible to receive suggestions
#[derive(Debug, Clone)]
pub struct HostNode {
    descriptor: NodeDescriptor,
    state: Arc<RwLock<NodeState>>,
}

impl HostNode {
    pub fn new(descriptor: NodeDescriptor, content: NodeContent) -> Self {
        Self {
            descriptor,
            state: Arc::new(RwLock::new(NodeState {
                content,
                change_seq: 0,
                notices: Vec::new(),
                detached: false,
            })),
        }
    }

    /// A single-line `<input>` of the given type
    pub fn text_input(input_type: &str) -> Self {
        Self::new(
            NodeDescriptor {
                tag: "input".to_string(),
                input_type: Some(input_type.to_string()),
                ..NodeDescriptor::default()
            },
            NodeContent::Value {
                text: String::new(),
                selection_start: 0,
            },
        )
    }

    /// A `<textarea>`
    pub fn textarea() -> Self {
        Self::new(
            NodeDescriptor {
                tag: "textarea".to_string(),
                ..NodeDescriptor::default()
            },
            NodeContent::Value {
                text: String::new(),
                selection_start: 0,
            },
        )
    }

    /// A contenteditable region
    pub fn content_editable() -> Self {
        Self::new(
            NodeDescriptor {
                tag: "div".to_string(),
                content_editable: true,
                ..NodeDescriptor::default()
            },
            NodeContent::Spans {
                spans: vec![String::new()],
                selection: SpanSelection::default(),
            },
        )
    }

    /// A rich-text editor root carrying a recognized editor class
    pub fn rich_editor(class: &str) -> Self {
        Self::new(
            NodeDescriptor {
                tag: "div".to_string(),
                classes: vec![class.to_string()],
                content_editable: true,
                ..NodeDescriptor::default()
            },
            NodeContent::Spans {
                spans: vec![String::new()],
                selection: SpanSelection::default(),
            },
        )
    }

    /// An embedded code-editor widget root (CodeMirror, Monaco, Ace)
    pub fn embedded_editor(class: &str) -> Self {
        Self::new(
            NodeDescriptor {
                tag: "div".to_string(),
                classes: vec![class.to_string()],
                ..NodeDescriptor::default()
            },
            NodeContent::Widget(WidgetBuffer::from_text("")),
        )
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.descriptor.label = label.to_string();
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.descriptor.placeholder = placeholder.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.descriptor.name = name.to_string();
        self
    }

    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    /// Detach the node, making all further surface operations fail
    pub fn detach(&self) {
        if let Ok(mut state) = self.state.write() {
            state.detached = true;
        }
    }

    pub fn is_detached(&self) -> bool {
        self.state.read().map(|s| s.detached).unwrap_or(true)
    }

    /// Run a closure over the content, enforcing the detached check
    pub(crate) fn with_content<T>(
        &self,
        f: impl FnOnce(&NodeContent) -> SurfaceResult<T>,
    ) -> SurfaceResult<T> {
        let state = self
            .state
            .read()
            .map_err(|e| SurfaceError::ReadFailed(e.to_string()))?;
        if state.detached {
            return Err(SurfaceError::Detached);
        }
        f(&state.content)
    }

    /// Mutate the content, bumping the change sequence and recording a notice
    pub(crate) fn with_content_mut<T>(
        &self,
        source: EditSource,
        f: impl FnOnce(&mut NodeContent) -> SurfaceResult<T>,
    ) -> SurfaceResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|e| SurfaceError::WriteFailed(e.to_string()))?;
        if state.detached {
            return Err(SurfaceError::Detached);
        }
        let out = f(&mut state.content)?;
        state.change_seq += 1;
        let seq = state.change_seq;
        state.notices.push(ChangeNotice { seq, source });
        Ok(out)
    }

    /// Normalized text content, independent of the content variant
    pub fn text_snapshot(&self) -> String {
        self.with_content(|content| {
            Ok(match content {
                NodeContent::Value { text, .. } => text.clone(),
                NodeContent::Spans { spans, .. } => spans.concat(),
                NodeContent::Widget(buffer) => buffer.text(),
            })
        })
        .unwrap_or_default()
    }

    /// Current change sequence number
    pub fn change_seq(&self) -> u64 {
        self.state.read().map(|s| s.change_seq).unwrap_or(0)
    }

    /// Drain pending content-changed notices
    pub fn take_notices(&self) -> Vec<ChangeNotice> {
        self.state
            .write()
            .map(|mut s| std::mem::take(&mut s.notices))
            .unwrap_or_default()
    }

    /// Apply a user edit at the current cursor, as the host element would
    ///
    /// This is the host-page side of the contract: tests and the demo binary
    /// use it to simulate typing. Returns the normalized event a content
    /// script would observe.
    pub fn apply_user_edit(&self, kind: EditKind) -> SurfaceResult<EditEvent> {
        self.with_content_mut(EditSource::User, |content| {
            match (&kind, content) {
                (EditKind::Insert(data), NodeContent::Value {
                    text,
                    selection_start,
                }) => {
                    let at = byte_offset(text, *selection_start);
                    text.insert_str(at, data);
                    *selection_start += data.chars().count();
                }
                (EditKind::DeleteBackward, NodeContent::Value {
                    text,
                    selection_start,
                }) => {
                    if *selection_start > 0 {
                        *selection_start -= 1;
                        let at = byte_offset(text, *selection_start);
                        text.remove(at);
                    }
                }
                (EditKind::Insert(data), NodeContent::Spans { spans, selection }) => {
                    let span = spans
                        .get_mut(selection.span)
                        .ok_or(SurfaceError::WriteFailed("span gone".to_string()))?;
                    let at = byte_offset(span, selection.offset);
                    span.insert_str(at, data);
                    selection.offset += data.chars().count();
                }
                (EditKind::DeleteBackward, NodeContent::Spans { spans, selection }) => {
                    let span = spans
                        .get_mut(selection.span)
                        .ok_or(SurfaceError::WriteFailed("span gone".to_string()))?;
                    if selection.offset > 0 {
                        selection.offset -= 1;
                        let at = byte_offset(span, selection.offset);
                        span.remove(at);
                    }
                }
                (EditKind::Insert(data), NodeContent::Widget(buffer)) => {
                    let offset = buffer.offset_at(buffer.cursor);
                    let mut text = buffer.text();
                    let at = byte_offset(&text, offset);
                    text.insert_str(at, data);
                    let new_offset = offset + data.chars().count();
                    *buffer = WidgetBuffer::from_text(&text);
                    buffer.cursor = buffer.position_at(new_offset);
                }
                (EditKind::DeleteBackward, NodeContent::Widget(buffer)) => {
                    let offset = buffer.offset_at(buffer.cursor);
                    if offset > 0 {
                        let mut text = buffer.text();
                        let at = byte_offset(&text, offset - 1);
                        text.remove(at);
                        *buffer = WidgetBuffer::from_text(&text);
                        buffer.cursor = buffer.position_at(offset - 1);
                    }
                }
                (EditKind::Replace, _) => {
                    return Err(SurfaceError::WriteFailed(
                        "replace edits go through the surface".to_string(),
                    ));
                }
            }
            Ok(())
        })?;
        Ok(EditEvent::user(kind))
    }
}

/// Translate a character offset into a byte offset, clamped to the end
pub(crate) fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
