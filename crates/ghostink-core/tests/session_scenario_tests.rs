//! Session-level scenarios
//!
//! Drives a real `TrackerSession` over an in-memory host node, checking
//! the end-to-end contracts: consumption without re-requests, stale
//! response discard on focus change, acceptance splices, exhaustion, and
//! invalidation on backspace.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;

use ghostink_config::Settings;
use ghostink_core::{
    ClearReason, CompletionPort, CompletionRequest, CompletionResponse, OverlayPort, PageContext,
    SessionCommand, SuggestionView, TrackerResult, TrackerSession,
};
use ghostink_surfaces::{EditKind, HostNode, SurfaceEvent, SurfaceRegistry};

#[derive(Default)]
struct OverlayState {
    current: Option<SuggestionView>,
    ghost_mode: bool,
    loading: bool,
    notices: Vec<(String, bool)>,
    cleared: Vec<ClearReason>,
}

#[derive(Clone, Default)]
struct RecordingOverlay(Arc<Mutex<OverlayState>>);

impl RecordingOverlay {
    fn current(&self) -> Option<SuggestionView> {
        self.0.lock().unwrap().current.clone()
    }

    fn cleared(&self) -> Vec<ClearReason> {
        self.0.lock().unwrap().cleared.clone()
    }

    fn notices(&self) -> Vec<(String, bool)> {
        self.0.lock().unwrap().notices.clone()
    }
}

impl OverlayPort for RecordingOverlay {
    fn show_loading(&mut self) {
        let mut state = self.0.lock().unwrap();
        state.loading = true;
    }

    fn show_suggestion(&mut self, view: SuggestionView) {
        let mut state = self.0.lock().unwrap();
        state.loading = false;
        state.current = Some(view);
    }

    fn show_notice(&mut self, message: &str, transient: bool) {
        let mut state = self.0.lock().unwrap();
        state.loading = false;
        state.current = None;
        state.notices.push((message.to_string(), transient));
    }

    fn clear(&mut self, reason: ClearReason) {
        let mut state = self.0.lock().unwrap();
        state.loading = false;
        state.current = None;
        state.cleared.push(reason);
    }

    fn set_ghost_mode(&mut self, use_ghost_text: bool) {
        self.0.lock().unwrap().ghost_mode = use_ghost_text;
    }

    fn is_ghost_visible(&self) -> bool {
        let state = self.0.lock().unwrap();
        state.ghost_mode && state.current.is_some()
    }
}

/// Port that must never be reached in these tests
struct NullSource;

#[async_trait]
impl CompletionPort for NullSource {
    async fn complete(&self, _request: CompletionRequest) -> TrackerResult<CompletionResponse> {
        panic!("tests feed responses through handle_response directly");
    }
}

fn response(completion: &str, last_word: &str, alternatives: &[&str]) -> CompletionResponse {
    CompletionResponse {
        completion: completion.to_string(),
        last_word: last_word.to_string(),
        alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
        confidence: 0.9,
    }
}

fn session_over(node: &HostNode, settings: Settings) -> (TrackerSession, RecordingOverlay) {
    let registry = SurfaceRegistry::with_builtin_factories();
    let surface = registry.bind(node).expect("test node bindable");
    let overlay = RecordingOverlay::default();
    let session = TrackerSession::new(
        surface,
        PageContext::default(),
        settings,
        Box::new(overlay.clone()),
        Arc::new(NullSource),
    );
    (session, overlay)
}

fn type_text(node: &HostNode, session: &mut TrackerSession, text: &str) {
    for c in text.chars() {
        let event = node
            .apply_user_edit(EditKind::Insert(c.to_string()))
            .unwrap();
        session.handle_event(&SurfaceEvent::Edited(event), Instant::now());
    }
}

fn backspace(node: &HostNode, session: &mut TrackerSession) {
    let event = node.apply_user_edit(EditKind::DeleteBackward).unwrap();
    session.handle_event(&SurfaceEvent::Edited(event), Instant::now());
}

/// Arm, fire and answer one request cycle
fn settle_with(session: &mut TrackerSession, response: CompletionResponse) -> bool {
    let Some(deadline) = session.deadline() else {
        return false;
    };
    let Some(outbound) = session.fire_due(deadline) else {
        return false;
    };
    session.handle_response(outbound.generation, Ok(response));
    true
}

#[test]
fn test_consuming_updates_without_new_request() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "I am writ");
    assert!(settle_with(&mut session, response("writing to you", "am", &[])));
    assert_eq!(
        overlay.current().unwrap().remaining,
        "ing to you"
    );

    // Typing out the rest of the word re-renders from the tracker alone
    type_text(&node, &mut session, "ing");
    assert_eq!(overlay.current().unwrap().remaining, " to you");
    // No deadline re-armed: the edits were absorbed by consumption
    assert!(session.deadline().is_none());
}

#[test]
fn test_accept_primary_splices_and_clears() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "I am writ");
    settle_with(&mut session, response("writing to you", "am", &[]));
    type_text(&node, &mut session, "ing");

    session.handle_command(SessionCommand::AcceptPrimary);
    assert_eq!(node.text_snapshot(), "I am writing to you");
    assert!(overlay.current().is_none());
    assert!(overlay.cleared().contains(&ClearReason::Accepted));
}

#[test]
fn test_accept_is_mode_independent() {
    // Ghost text mode
    let ghost_node = HostNode::textarea();
    let (mut ghost_session, _) = session_over(&ghost_node, Settings::default());
    type_text(&ghost_node, &mut ghost_session, "Dear team");
    settle_with(&mut ghost_session, response("how are you", "team", &[]));
    ghost_session.handle_command(SessionCommand::AcceptPrimary);

    // Tooltip mode
    let tooltip_node = HostNode::textarea();
    let (mut tooltip_session, _) = session_over(
        &tooltip_node,
        Settings {
            use_ghost_text: false,
            ..Settings::default()
        },
    );
    type_text(&tooltip_node, &mut tooltip_session, "Dear team");
    settle_with(&mut tooltip_session, response("how are you", "team", &[]));
    tooltip_session.handle_command(SessionCommand::AcceptPrimary);

    assert_eq!(ghost_node.text_snapshot(), tooltip_node.text_snapshot());
    assert_eq!(ghost_node.text_snapshot(), "Dear team how are you");
}

#[test]
fn test_alternative_commit_by_digit() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(
        &node,
        Settings {
            use_ghost_text: false,
            ..Settings::default()
        },
    );

    // Empty buffer: a forced request still yields a display
    let outbound = session
        .handle_command(SessionCommand::Regenerate)
        .expect("regenerate forces a request");
    session.handle_response(
        outbound.generation,
        Ok(response(
            "Thank you for",
            "",
            &["Best regards", "Looking forward"],
        )),
    );
    let view = overlay.current().expect("suggestion displayed");
    assert_eq!(view.remaining, "Thank you for");
    assert_eq!(
        view.alternatives,
        vec!["Best regards".to_string(), "Looking forward".to_string()]
    );

    session.handle_command(SessionCommand::AcceptAlternative(1));
    assert_eq!(node.text_snapshot(), "Looking forward");
    assert!(overlay.current().is_none());
}

#[test]
fn test_stale_response_after_focus_loss_is_dropped() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "Dear team");
    let deadline = session.deadline().unwrap();
    let outbound = session.fire_due(deadline).unwrap();

    // Focus moves away while the request is in flight
    session.handle_event(&SurfaceEvent::FocusLost, Instant::now());
    session.handle_response(outbound.generation, Ok(response("how are you", "team", &[])));

    assert!(overlay.current().is_none());
    assert_eq!(node.text_snapshot(), "Dear team");
    assert!(overlay.cleared().contains(&ClearReason::FocusLost));
}

#[test]
fn test_superseded_generation_is_dropped() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "Dear team");
    let first = session.fire_due(session.deadline().unwrap()).unwrap();

    // More typing arms a newer request before the first answers
    type_text(&node, &mut session, " hello");
    let second = session.fire_due(session.deadline().unwrap()).unwrap();

    session.handle_response(first.generation, Ok(response("late answer", "", &[])));
    assert!(overlay.current().is_none());

    session.handle_response(second.generation, Ok(response("there friend", "hello", &[])));
    assert!(overlay.current().is_some());
}

#[test]
fn test_backspace_invalidates_and_removes_overlay() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "writing ");
    settle_with(&mut session, response("to you soon", "writing", &[]));
    assert!(overlay.current().is_some());

    backspace(&node, &mut session);
    assert!(overlay.current().is_none());
    assert!(overlay.cleared().contains(&ClearReason::Invalidated));
}

#[test]
fn test_exhaustion_issues_no_new_request() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "see you ");
    settle_with(&mut session, response("soon", "you", &[]));
    assert!(overlay.current().is_some());

    // Retype the whole suggestion
    type_text(&node, &mut session, "soon");
    assert!(overlay.current().is_none());
    assert!(overlay.cleared().contains(&ClearReason::Exhausted));

    // Any armed deadline refuses to fire until new typing happens
    if let Some(deadline) = session.deadline() {
        assert!(session.fire_due(deadline).is_none());
    }

    // Fresh typing qualifies again
    type_text(&node, &mut session, " maybe");
    let deadline = session.deadline().expect("new edit re-arms");
    assert!(session.fire_due(deadline).is_some());
}

#[test]
fn test_redundant_suggestion_never_displayed() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "thank you very much");
    settle_with(&mut session, response("thank you", "", &[]));
    assert!(overlay.current().is_none());
}

#[test]
fn test_model_error_shows_persistent_notice() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "Dear team");
    let outbound = session.fire_due(session.deadline().unwrap()).unwrap();
    session.handle_response(
        outbound.generation,
        Err(ghostink_core::TrackerError::Model(
            "API key not configured".to_string(),
        )),
    );

    let notices = overlay.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].0.contains("API key"));
    // Model errors are not transient: dismiss only, no automatic retry
    assert!(!notices[0].1);
}

#[test]
fn test_dismiss_clears_without_committing() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(&node, Settings::default());

    type_text(&node, &mut session, "Dear team");
    settle_with(&mut session, response("how are you", "team", &[]));
    session.handle_command(SessionCommand::Dismiss);

    assert_eq!(node.text_snapshot(), "Dear team");
    assert!(overlay.cleared().contains(&ClearReason::Dismissed));
    // Dismissing clears the typing flag: the next window refuses to fire
    if let Some(deadline) = session.deadline() {
        assert!(session.fire_due(deadline).is_none());
    }
}

#[test]
fn test_disabled_sessions_ignore_edits() {
    let node = HostNode::textarea();
    let (mut session, overlay) = session_over(
        &node,
        Settings {
            is_enabled: false,
            ..Settings::default()
        },
    );

    type_text(&node, &mut session, "Dear team");
    assert!(session.deadline().is_none());
    assert!(overlay.current().is_none());
}
