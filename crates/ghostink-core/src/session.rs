//! Tracker session
//!
//! One `TrackerSession` exists per focused surface, created on focus-in
//! and dropped on focus-out. It owns the surface binding, the tracker,
//! the request window and the ports — there is no ambient module state.
//! Events are processed in arrival order on one task; the only
//! asynchronous waits are the debounce timer and the completion
//! round-trip, and both resolve back into `Idle` or `Held`.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use ghostink_config::Settings;
use ghostink_surfaces::{
    read_cursor_or_zero, read_text_or_empty, EditableSurface, EditEvent, EditSource, PageSignal,
    SurfaceEvent,
};

use crate::coordinator::{DebounceCoordinator, FireDecision};
use crate::error::TrackerResult;
use crate::ports::{ClearReason, CompletionPort, OverlayPort, SuggestionView};
use crate::tracker::{EditVerdict, OfferVerdict, SuggestionTracker};
use crate::types::{AcceptCandidate, CompletionRequest, CompletionResponse, PageContext};
use crate::words::char_prefix;
use crate::splice::splice_displayed;

/// Commands the overlay renderer sends back from user gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    AcceptPrimary,
    AcceptAlternative(usize),
    Dismiss,
    /// Discard the current suggestion and force a fresh request
    Regenerate,
    /// Live switch between ghost text and tooltip display
    ToggleMode,
}

/// A completion request ready to go out, stamped with its generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub generation: u64,
    pub request: CompletionRequest,
}

/// Inputs the session driver multiplexes
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    Surface(SurfaceEvent),
    Command(SessionCommand),
}

/// The per-focus suggestion session
pub struct TrackerSession {
    surface: Box<dyn EditableSurface>,
    page_context: PageContext,
    settings: Settings,
    tracker: SuggestionTracker,
    coordinator: DebounceCoordinator,
    overlay: Box<dyn OverlayPort>,
    source: Arc<dyn CompletionPort>,
}

impl TrackerSession {
    pub fn new(
        surface: Box<dyn EditableSurface>,
        mut page_context: PageContext,
        settings: Settings,
        overlay: Box<dyn OverlayPort>,
        source: Arc<dyn CompletionPort>,
    ) -> Self {
        let descriptor = surface.descriptor();
        page_context.input_label = descriptor.label.clone();
        page_context.input_placeholder = descriptor.placeholder.clone();
        page_context.input_name = descriptor.name.clone();
        page_context.input_type = descriptor
            .input_type
            .clone()
            .unwrap_or_else(|| "text".to_string());

        let coordinator = DebounceCoordinator::new(&settings);
        let mut overlay = overlay;
        overlay.set_ghost_mode(settings.use_ghost_text);

        Self {
            surface,
            page_context,
            settings,
            tracker: SuggestionTracker::new(),
            coordinator,
            overlay,
            source,
        }
    }

    pub fn tracker(&self) -> &SuggestionTracker {
        &self.tracker
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The armed debounce deadline for the driver's timer
    pub fn deadline(&self) -> Option<Instant> {
        self.coordinator.deadline()
    }

    /// Process one surface event in arrival order
    pub fn handle_event(&mut self, event: &SurfaceEvent, now: Instant) {
        match event {
            SurfaceEvent::Edited(edit) => self.handle_edit(edit, now),
            SurfaceEvent::FocusLost => self.handle_focus_lost(),
            SurfaceEvent::Signal(signal) => self.handle_signal(*signal),
        }
    }

    fn handle_edit(&mut self, event: &EditEvent, now: Instant) {
        if !self.settings.is_enabled {
            return;
        }
        // Programmatic writes re-enter as synthetic events; acting on them
        // would loop our own splices back into the request window.
        if event.source == EditSource::Synthetic {
            return;
        }

        let buffer = read_text_or_empty(self.surface.as_ref());
        let cursor = read_cursor_or_zero(self.surface.as_ref());
        let before_cursor = char_prefix(&buffer, cursor);

        // A single space over visible ghost text is absorbed entirely: the
        // user is walking through the suggestion word by word.
        if event.is_single_space_insert() && self.overlay.is_ghost_visible() {
            debug!("absorbing space over ghost text");
            return;
        }

        match self.tracker.on_edit(event, before_cursor) {
            EditVerdict::Consuming { remaining, .. } => {
                // Still inside the suggestion: re-render, no new request.
                self.overlay.show_suggestion(SuggestionView {
                    remaining,
                    alternatives: self.tracker.displayed_alternatives().to_vec(),
                });
            }
            EditVerdict::Exhausted => {
                // Retyped verbatim: clear and stay quiet until new typing.
                self.overlay.clear(ClearReason::Exhausted);
                self.coordinator.clear_typed();
            }
            EditVerdict::Invalidated => {
                self.overlay.clear(ClearReason::Invalidated);
                self.coordinator.note_edit(now);
            }
            EditVerdict::NotTracking => {
                self.coordinator.note_edit(now);
            }
        }
    }

    fn handle_focus_lost(&mut self) {
        self.coordinator.cancel();
        self.tracker.dismiss();
        self.overlay.clear(ClearReason::FocusLost);
    }

    fn handle_signal(&mut self, signal: PageSignal) {
        let buffer = read_text_or_empty(self.surface.as_ref());
        let cursor = read_cursor_or_zero(self.surface.as_ref());
        if self.tracker.keeps_through_reset(char_prefix(&buffer, cursor)) {
            debug!(?signal, "keeping suggestion through reset signal");
            return;
        }
        self.overlay.clear(ClearReason::PageSignal);
        self.tracker.dismiss();
        self.coordinator.clear_typed();
        self.coordinator.cancel();
    }

    /// Evaluate the debounce window; returns a request when one is due
    pub fn fire_due(&mut self, now: Instant) -> Option<OutboundRequest> {
        match self.coordinator.fire_due(now) {
            FireDecision::Fire { generation } => {
                let buffer = read_text_or_empty(self.surface.as_ref());
                if buffer.trim().is_empty() {
                    self.coordinator.complete_response(generation);
                    return None;
                }
                let cursor = read_cursor_or_zero(self.surface.as_ref());
                self.overlay.show_loading();
                Some(OutboundRequest {
                    generation,
                    request: CompletionRequest {
                        buffer_text: buffer,
                        cursor_offset: cursor,
                        page_context: self.page_context.clone(),
                    },
                })
            }
            FireDecision::Drop | FireDecision::Wait => None,
        }
    }

    /// Apply a completion response, discarding stale generations silently
    pub fn handle_response(
        &mut self,
        generation: u64,
        result: TrackerResult<CompletionResponse>,
    ) {
        if !self.coordinator.is_response_current(generation) {
            debug!(generation, "discarding stale completion response");
            return;
        }
        self.coordinator.complete_response(generation);

        match result {
            Ok(response) => {
                let buffer = read_text_or_empty(self.surface.as_ref());
                let cursor = read_cursor_or_zero(self.surface.as_ref());
                match self.tracker.offer(response, &buffer, cursor) {
                    OfferVerdict::Displayed {
                        remaining,
                        alternatives,
                    } => {
                        self.overlay.show_suggestion(SuggestionView {
                            remaining,
                            alternatives,
                        });
                    }
                    OfferVerdict::RejectedRedundant | OfferVerdict::RejectedEmpty => {
                        self.overlay.clear(ClearReason::Dismissed);
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "completion request failed");
                self.overlay.show_notice(&err.to_string(), err.is_transient());
            }
        }
    }

    /// Interpret a renderer command; may produce an immediate request
    pub fn handle_command(&mut self, command: SessionCommand) -> Option<OutboundRequest> {
        match command {
            SessionCommand::AcceptPrimary => {
                self.accept(AcceptCandidate::Primary);
                None
            }
            SessionCommand::AcceptAlternative(index) => {
                self.accept(AcceptCandidate::Alternative(index));
                None
            }
            SessionCommand::Dismiss => {
                self.tracker.dismiss();
                self.overlay.clear(ClearReason::Dismissed);
                self.coordinator.clear_typed();
                self.coordinator.cancel();
                None
            }
            SessionCommand::Regenerate => {
                self.tracker.dismiss();
                self.overlay.clear(ClearReason::Dismissed);
                Some(self.force_request())
            }
            SessionCommand::ToggleMode => {
                self.settings.use_ghost_text = !self.settings.use_ghost_text;
                self.overlay.set_ghost_mode(self.settings.use_ghost_text);
                self.overlay.clear(ClearReason::Dismissed);
                self.tracker.dismiss();
                Some(self.force_request())
            }
        }
    }

    fn accept(&mut self, candidate: AcceptCandidate) {
        let Some(displayed) = self.tracker.accept(candidate) else {
            return;
        };
        let buffer = read_text_or_empty(self.surface.as_ref());
        let cursor = read_cursor_or_zero(self.surface.as_ref());
        let splice = splice_displayed(&buffer, cursor, &displayed);
        if let Err(err) = self
            .surface
            .write_text(&splice.new_text, splice.new_cursor)
        {
            warn!(error = %err, "write failed while committing suggestion");
        }
        self.overlay.clear(ClearReason::Accepted);
        self.coordinator.clear_typed();
        self.coordinator.cancel();
    }

    fn force_request(&mut self) -> OutboundRequest {
        let generation = self.coordinator.force_fire();
        let buffer = read_text_or_empty(self.surface.as_ref());
        let cursor = read_cursor_or_zero(self.surface.as_ref());
        self.overlay.show_loading();
        OutboundRequest {
            generation,
            request: CompletionRequest {
                buffer_text: buffer,
                cursor_offset: cursor,
                page_context: self.page_context.clone(),
            },
        }
    }

    /// Drive the session until focus is lost or the input stream closes
    ///
    /// Requests run on spawned tasks so a fresh edit is never blocked on an
    /// in-flight round-trip; responses re-enter through an internal channel
    /// and are dropped if their generation went stale meanwhile.
    pub async fn drive(&mut self, mut inputs: mpsc::UnboundedReceiver<SessionInput>) {
        let (response_tx, mut response_rx) =
            mpsc::unbounded_channel::<(u64, TrackerResult<CompletionResponse>)>();

        loop {
            let deadline = self.deadline();
            tokio::select! {
                input = inputs.recv() => {
                    match input {
                        Some(SessionInput::Surface(event)) => {
                            let lost = matches!(event, SurfaceEvent::FocusLost);
                            self.handle_event(&event, Instant::now());
                            if lost {
                                break;
                            }
                        }
                        Some(SessionInput::Command(command)) => {
                            if let Some(outbound) = self.handle_command(command) {
                                self.dispatch(outbound, response_tx.clone());
                            }
                        }
                        None => break,
                    }
                }
                Some((generation, result)) = response_rx.recv() => {
                    self.handle_response(generation, result);
                }
                _ = sleep_until_deadline(deadline) => {
                    if let Some(outbound) = self.fire_due(Instant::now()) {
                        self.dispatch(outbound, response_tx.clone());
                    }
                }
            }
        }
    }

    fn dispatch(
        &self,
        outbound: OutboundRequest,
        response_tx: mpsc::UnboundedSender<(u64, TrackerResult<CompletionResponse>)>,
    ) {
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source.complete(outbound.request).await;
            // The session may be gone; a closed channel is fine.
            let _ = response_tx.send((outbound.generation, result));
        });
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
