//! GhostInk surface adapters
//!
//! A capability-set abstraction over the heterogeneous text-input surfaces
//! a page can expose: plain single-line inputs, multi-line areas, rich
//! content-editable regions, and embedded code-editor widgets with their
//! own model/cursor APIs.
//!
//! Every variant implements [`EditableSurface`] — uniform `read_text` /
//! `read_cursor` / `write_text` operations over character offsets — and is
//! selected exactly once at focus time by the [`SurfaceRegistry`]. Any DOM
//! access failure degrades to empty content / cursor 0 rather than
//! propagating; a hostile page must never crash the tracker.

pub mod embedded;
pub mod error;
pub mod events;
pub mod node;
pub mod plain;
pub mod registry;
pub mod rich_text;
pub mod surface;

pub use embedded::EmbeddedEditorSurface;
pub use error::{SurfaceError, SurfaceResult};
pub use events::{EditEvent, EditKind, EditSource, PageSignal, SurfaceEvent};
pub use node::{
    ChangeNotice, HostNode, NodeContent, NodeDescriptor, SpanSelection, WidgetBuffer,
    WidgetPosition,
};
pub use plain::{MultilineSurface, PlainInputSurface};
pub use registry::{
    ContentEditableFactory, EmbeddedEditorFactory, MultilineFactory, PlainInputFactory,
    SurfaceFactory, SurfaceRegistry,
};
pub use rich_text::RichTextSurface;
pub use surface::{read_cursor_or_zero, read_text_or_empty, EditableSurface, SurfaceKind};
