//! Surface factory registry
//!
//! Variant selection happens exactly once, at focus time. Each factory
//! inspects the node descriptor; the first supporting factory binds.

use tracing::debug;

use crate::embedded::EmbeddedEditorSurface;
use crate::node::{HostNode, NodeDescriptor};
use crate::plain::{MultilineSurface, PlainInputSurface};
use crate::rich_text::RichTextSurface;
use crate::surface::EditableSurface;

/// Input types eligible for suggestions
const PLAIN_INPUT_TYPES: &[&str] = &["text", "search", "url", "email", "tel"];

/// Root classes of editors with their own model/cursor API
const EMBEDDED_EDITOR_CLASSES: &[&str] = &["CodeMirror", "monaco-editor", "ace_editor"];

/// Root classes of contenteditable-based rich text editors
const RICH_EDITOR_CLASSES: &[&str] = &[
    "ql-editor",
    "ProseMirror",
    "tox-edit-area",
    "cke_editable",
    "froala-editor",
];

/// A bindable surface variant
pub trait SurfaceFactory: Send + Sync {
    /// Whether this factory can bind the described node
    fn supports(&self, descriptor: &NodeDescriptor) -> bool;

    /// Bind the node, taking the exclusive surface reference
    fn bind(&self, node: HostNode) -> Box<dyn EditableSurface>;
}

pub struct PlainInputFactory;

impl SurfaceFactory for PlainInputFactory {
    fn supports(&self, descriptor: &NodeDescriptor) -> bool {
        descriptor.tag == "input"
            && descriptor
                .input_type
                .as_deref()
                .map(|t| PLAIN_INPUT_TYPES.contains(&t.to_lowercase().as_str()))
                .unwrap_or(false)
    }

    fn bind(&self, node: HostNode) -> Box<dyn EditableSurface> {
        Box::new(PlainInputSurface::bind(node))
    }
}

pub struct MultilineFactory;

impl SurfaceFactory for MultilineFactory {
    fn supports(&self, descriptor: &NodeDescriptor) -> bool {
        descriptor.tag == "textarea"
    }

    fn bind(&self, node: HostNode) -> Box<dyn EditableSurface> {
        Box::new(MultilineSurface::bind(node))
    }
}

pub struct EmbeddedEditorFactory;

impl SurfaceFactory for EmbeddedEditorFactory {
    fn supports(&self, descriptor: &NodeDescriptor) -> bool {
        EMBEDDED_EDITOR_CLASSES
            .iter()
            .any(|class| descriptor.has_class(class))
    }

    fn bind(&self, node: HostNode) -> Box<dyn EditableSurface> {
        Box::new(EmbeddedEditorSurface::bind(node))
    }
}

pub struct ContentEditableFactory;

impl SurfaceFactory for ContentEditableFactory {
    fn supports(&self, descriptor: &NodeDescriptor) -> bool {
        descriptor.content_editable
            || RICH_EDITOR_CLASSES
                .iter()
                .any(|class| descriptor.has_class(class))
    }

    fn bind(&self, node: HostNode) -> Box<dyn EditableSurface> {
        Box::new(RichTextSurface::bind(node))
    }
}

/// Registry of surface variants, consulted once per focus-in
pub struct SurfaceRegistry {
    factories: Vec<Box<dyn SurfaceFactory>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registry with all builtin variants registered
    ///
    /// Embedded editors are checked before contenteditable because their
    /// DOM roots are often also contenteditable.
    pub fn with_builtin_factories() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PlainInputFactory));
        registry.register(Box::new(MultilineFactory));
        registry.register(Box::new(EmbeddedEditorFactory));
        registry.register(Box::new(ContentEditableFactory));
        registry
    }

    pub fn register(&mut self, factory: Box<dyn SurfaceFactory>) {
        self.factories.push(factory);
    }

    /// Whether any registered variant can bind the node
    pub fn is_supported(&self, node: &HostNode) -> bool {
        !node.is_detached()
            && self
                .factories
                .iter()
                .any(|f| f.supports(node.descriptor()))
    }

    /// Bind the node to the first supporting variant
    pub fn bind(&self, node: &HostNode) -> Option<Box<dyn EditableSurface>> {
        if node.is_detached() {
            return None;
        }
        for factory in &self.factories {
            if factory.supports(node.descriptor()) {
                let surface = factory.bind(node.clone());
                debug!(kind = %surface.kind(), "surface bound");
                return Some(surface);
            }
        }
        None
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::with_builtin_factories()
    }
}
