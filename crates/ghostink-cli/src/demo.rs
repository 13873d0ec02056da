//! Scripted demo session
//!
//! Replays keystrokes against an in-memory host node through a real
//! `TrackerSession`, with a canned completion source standing in for the
//! background collaborator. Deadlines are evaluated at their armed
//! instant, so the replay is deterministic.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use ghostink_config::Settings;
use ghostink_core::{
    CompletionPort, CompletionRequest, CompletionResponse, OverlayPort, PageContext,
    SessionCommand, SuggestionView, TrackerResult, TrackerSession,
};
use ghostink_core::ClearReason;
use ghostink_overlay::{DisplayMode, OverlayModel, SuggestionOverlay};
use ghostink_source::{sanitize_response, BackgroundChannel, BackgroundService, ChannelCompletionSource};
use ghostink_surfaces::{
    EditKind, HostNode, SurfaceEvent, SurfaceRegistry,
};

/// Overlay handle shared between the session and the demo printer
#[derive(Clone)]
pub struct SharedOverlay(Arc<Mutex<SuggestionOverlay>>);

impl SharedOverlay {
    pub fn new(mode: DisplayMode) -> Self {
        Self(Arc::new(Mutex::new(SuggestionOverlay::new(mode))))
    }

    pub fn model(&self) -> OverlayModel {
        self.0
            .lock()
            .map(|overlay| overlay.model().clone())
            .unwrap_or(OverlayModel::Hidden)
    }
}

impl OverlayPort for SharedOverlay {
    fn show_loading(&mut self) {
        if let Ok(mut overlay) = self.0.lock() {
            overlay.show_loading();
        }
    }

    fn show_suggestion(&mut self, view: SuggestionView) {
        if let Ok(mut overlay) = self.0.lock() {
            overlay.show_suggestion(view);
        }
    }

    fn show_notice(&mut self, message: &str, transient: bool) {
        if let Ok(mut overlay) = self.0.lock() {
            overlay.show_notice(message, transient);
        }
    }

    fn clear(&mut self, reason: ClearReason) {
        if let Ok(mut overlay) = self.0.lock() {
            OverlayPort::clear(&mut *overlay, reason);
        }
    }

    fn set_ghost_mode(&mut self, use_ghost_text: bool) {
        if let Ok(mut overlay) = self.0.lock() {
            OverlayPort::set_ghost_mode(&mut *overlay, use_ghost_text);
        }
    }

    fn is_ghost_visible(&self) -> bool {
        self.0
            .lock()
            .map(|overlay| overlay.is_ghost_visible())
            .unwrap_or(false)
    }
}

/// Canned provider used in place of the real model call
struct CannedProvider;

#[async_trait]
impl CompletionPort for CannedProvider {
    async fn complete(&self, request: CompletionRequest) -> TrackerResult<CompletionResponse> {
        info!(buffer = %request.buffer_text, "canned provider answering");
        let response = CompletionResponse {
            completion: "writing to you about the latest release".to_string(),
            last_word: "am".to_string(),
            alternatives: vec![
                "reaching out today".to_string(),
                "working on it".to_string(),
            ],
            confidence: 0.9,
        };
        Ok(sanitize_response(response).map_err(ghostink_core::TrackerError::from)?)
    }
}

fn type_text(node: &HostNode, session: &mut TrackerSession, text: &str) {
    for c in text.chars() {
        let event = node
            .apply_user_edit(EditKind::Insert(c.to_string()))
            .expect("demo node accepts edits");
        session.handle_event(
            &SurfaceEvent::Edited(event),
            std::time::Instant::now(),
        );
    }
}

/// Evaluate the armed deadline (if any) and run the round-trip inline
async fn settle_request(session: &mut TrackerSession, source: &Arc<dyn CompletionPort>) {
    let Some(deadline) = session.deadline() else {
        return;
    };
    if let Some(outbound) = session.fire_due(deadline) {
        let result = source.complete(outbound.request).await;
        session.handle_response(outbound.generation, result);
    }
}

fn print_state(label: &str, node: &HostNode, overlay: &SharedOverlay) {
    println!("--- {label}");
    println!("    buffer:  {:?}", node.text_snapshot());
    println!("    overlay: {:?}", overlay.model());
}

/// Run the scripted replay
pub async fn run(use_ghost_text: bool) -> anyhow::Result<()> {
    let settings = Settings {
        use_ghost_text,
        ..Settings::default()
    };

    let node = HostNode::textarea()
        .with_label("Reply")
        .with_placeholder("Write your reply");
    let registry = SurfaceRegistry::with_builtin_factories();
    let surface = registry
        .bind(&node)
        .ok_or_else(|| anyhow::anyhow!("demo node not bindable"))?;

    let overlay = SharedOverlay::new(if use_ghost_text {
        DisplayMode::GhostText
    } else {
        DisplayMode::Tooltip
    });

    // Background collaborator wired the same way the real extension is:
    // channel client on our side, service + provider on the other.
    let (channel, inbound) = BackgroundChannel::pair();
    tokio::spawn(BackgroundService::new(inbound, Arc::new(CannedProvider)).run());
    let source: Arc<dyn CompletionPort> = Arc::new(ChannelCompletionSource::new(channel));

    let page_context = PageContext {
        title: "Release announcement".to_string(),
        headings: "What's new".to_string(),
        ..PageContext::default()
    };

    let mut session = TrackerSession::new(
        surface,
        page_context,
        settings,
        Box::new(overlay.clone()),
        Arc::clone(&source),
    );

    println!("ghostink demo ({} mode)", if use_ghost_text { "ghost text" } else { "tooltip" });

    type_text(&node, &mut session, "I am writ");
    settle_request(&mut session, &source).await;
    print_state("after debounce settles", &node, &overlay);

    // Keep typing the suggested word: the tracker consumes, no new request
    type_text(&node, &mut session, "ing");
    print_state("after typing \"ing\" (consuming)", &node, &overlay);

    // Accept what remains
    session.handle_command(SessionCommand::AcceptPrimary);
    print_state("after Tab (accept)", &node, &overlay);

    Ok(())
}
