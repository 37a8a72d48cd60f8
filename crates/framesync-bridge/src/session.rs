use serde_json::Value;
use tracing::{debug, warn};

use framesync_proto::{Action, Envelope, ProtocolError};

use crate::capability::EditorCapability;
use crate::errors::BridgeError;
use crate::outbound::{MessageSink, NativeChannel, NATIVE_HANDLER};
use crate::schedule::{DeferredTask, TaskScheduler, STYLE_REBUILD_DELAY};

/// Presentation state of the embedded canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Edit,
    Preview,
}

/// One bridge session, owning all mutable bridge state for one editor window.
pub struct BridgeSession<E: EditorCapability> {
    editor: E,
    sink: Box<dyn MessageSink>,
    native: Option<Box<dyn NativeChannel>>,
    scheduler: Box<dyn TaskScheduler>,
    mode: EditorMode,
    /// True when every edit has been handed out through `get-data`, meaning
    /// the window can be closed without losing work. Starts true.
    saved: bool,
}

impl<E: EditorCapability> BridgeSession<E> {
    pub fn new(editor: E, sink: Box<dyn MessageSink>, scheduler: Box<dyn TaskScheduler>) -> Self {
        Self {
            editor,
            sink,
            native: None,
            scheduler,
            mode: EditorMode::Edit,
            saved: true,
        }
    }

    /// Attach the side channel used by native-app shells.
    pub fn with_native_channel(mut self, channel: Box<dyn NativeChannel>) -> Self {
        self.native = Some(channel);
        self
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Whether closing or navigating away must go through the platform's
    /// confirm-leave prompt. Armed by document mutations, disarmed once a
    /// `get-data` request has been serviced.
    pub fn should_confirm_leave(&self) -> bool {
        !self.saved
    }

    /// Entry point for raw platform message events. Noise that does not pass
    /// the envelope filter is dropped here without further logging.
    pub fn handle_event(&mut self, raw: &Value) {
        if let Some(envelope) = Envelope::from_event(raw) {
            self.handle_envelope(envelope);
        }
    }

    /// Dispatch one decoded message. Handlers never propagate errors to the
    /// sender; failures are logged and the message is discarded.
    pub fn handle_envelope(&mut self, envelope: Envelope) {
        if !self.editor.is_ready() {
            debug!(action = %envelope.action, "editor not initialized, dropping message");
            return;
        }

        match envelope.action {
            // `temporaryPreview` is intentionally identical to `preview`.
            Action::Preview | Action::TemporaryPreview => self.enter_preview(),
            Action::Edit => self.enter_edit(),
            Action::GetData => {
                if let Err(err) = self.reply_with_snapshot(envelope.key) {
                    warn!(%err, "get-data reply failed");
                }
            }
            Action::SetData | Action::Load => {
                if let Err(err) = self.apply_content(&envelope) {
                    warn!(action = %envelope.action, %err, "load skipped, document unchanged");
                }
            }
            other => debug!(action = %other, "ignoring unhandled action"),
        }
    }

    /// Run a task previously handed to the scheduler, once its delay elapsed.
    pub fn run_deferred(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::RebuildUtilityStyles => self.editor.rebuild_utility_styles(),
        }
    }

    /// Called by the host wiring for every structural or style change the
    /// editor reports. Arms the navigation guard and signals the host,
    /// unconditionally and with no acknowledgment expected.
    pub fn notify_document_change(&mut self) {
        self.saved = false;
        self.sink.post(&Envelope::track_change());
    }

    fn enter_preview(&mut self) {
        self.mode = EditorMode::Preview;
        self.editor.set_selectable(false);
        self.editor.set_panels_visible(false);
        debug!("entered preview mode");
    }

    fn enter_edit(&mut self) {
        self.mode = EditorMode::Edit;
        self.editor.set_selectable(true);
        self.editor.set_panels_visible(true);
        debug!("entered edit mode");
    }

    fn reply_with_snapshot(&mut self, key: Option<Value>) -> Result<(), BridgeError> {
        // Handing the data out is what makes the window safe to close.
        self.saved = true;

        let snapshot = self.editor.snapshot();
        let content = framesync_codec::compress_value(&serde_json::to_value(&snapshot)?);
        let reply = Envelope::data_reply(key, content);

        self.sink.post(&reply);
        if let Some(native) = &mut self.native {
            native.deliver(NATIVE_HANDLER, &reply);
        }
        Ok(())
    }

    fn apply_content(&mut self, envelope: &Envelope) -> Result<(), BridgeError> {
        let content = envelope.content().ok_or(ProtocolError::MissingContent)?;

        let decoded = framesync_codec::safe_decompress(content);
        let project_data = decoded
            .as_object()
            .and_then(|object| object.get("projectData"))
            .cloned()
            .ok_or(ProtocolError::MissingProjectData)?;

        self.editor.set_document(project_data);
        self.scheduler
            .schedule(STYLE_REBUILD_DELAY, DeferredTask::RebuildUtilityStyles);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use serde_json::json;

    use framesync_proto::ProjectSnapshot;

    // -- Mocks --

    #[derive(Default)]
    struct EditorState {
        ready: bool,
        project_data: Value,
        selectable: bool,
        panels_visible: bool,
        style_rebuilds: usize,
    }

    #[derive(Clone)]
    struct MockEditor(Rc<RefCell<EditorState>>);

    impl MockEditor {
        fn ready() -> Self {
            MockEditor(Rc::new(RefCell::new(EditorState {
                ready: true,
                project_data: json!({"pages": []}),
                selectable: true,
                panels_visible: true,
                style_rebuilds: 0,
            })))
        }

        fn uninitialized() -> Self {
            MockEditor(Rc::new(RefCell::new(EditorState::default())))
        }
    }

    impl EditorCapability for MockEditor {
        fn is_ready(&self) -> bool {
            self.0.borrow().ready
        }

        fn snapshot(&self) -> ProjectSnapshot {
            let state = self.0.borrow();
            ProjectSnapshot::new(state.project_data.clone(), "<div></div>", ".x{}")
        }

        fn set_document(&mut self, project_data: Value) {
            self.0.borrow_mut().project_data = project_data;
        }

        fn set_selectable(&mut self, selectable: bool) {
            self.0.borrow_mut().selectable = selectable;
        }

        fn set_panels_visible(&mut self, visible: bool) {
            self.0.borrow_mut().panels_visible = visible;
        }

        fn rebuild_utility_styles(&mut self) {
            self.0.borrow_mut().style_rebuilds += 1;
        }
    }

    #[derive(Clone, Default)]
    struct MockSink(Rc<RefCell<Vec<Envelope>>>);

    impl MessageSink for MockSink {
        fn post(&mut self, envelope: &Envelope) {
            self.0.borrow_mut().push(envelope.clone());
        }
    }

    #[derive(Clone, Default)]
    struct MockNative(Rc<RefCell<Vec<(String, Envelope)>>>);

    impl NativeChannel for MockNative {
        fn deliver(&mut self, handler: &str, envelope: &Envelope) {
            self.0
                .borrow_mut()
                .push((handler.to_string(), envelope.clone()));
        }
    }

    #[derive(Clone, Default)]
    struct MockScheduler(Rc<RefCell<Vec<(Duration, DeferredTask)>>>);

    impl TaskScheduler for MockScheduler {
        fn schedule(&mut self, delay: Duration, task: DeferredTask) {
            self.0.borrow_mut().push((delay, task));
        }
    }

    struct Fixture {
        session: BridgeSession<MockEditor>,
        editor: MockEditor,
        sink: MockSink,
        scheduler: MockScheduler,
    }

    fn fixture() -> Fixture {
        let editor = MockEditor::ready();
        let sink = MockSink::default();
        let scheduler = MockScheduler::default();
        let session = BridgeSession::new(
            editor.clone(),
            Box::new(sink.clone()),
            Box::new(scheduler.clone()),
        );
        Fixture {
            session,
            editor,
            sink,
            scheduler,
        }
    }

    // -- Mode switching --

    #[test]
    fn preview_disables_selection_and_hides_panels() {
        let mut f = fixture();
        f.session.handle_event(&json!({"action": "preview"}));

        assert_eq!(f.session.mode(), EditorMode::Preview);
        assert!(!f.editor.0.borrow().selectable);
        assert!(!f.editor.0.borrow().panels_visible);
    }

    #[test]
    fn temporary_preview_behaves_like_preview() {
        let mut f = fixture();
        f.session.handle_event(&json!({"action": "temporaryPreview"}));

        assert_eq!(f.session.mode(), EditorMode::Preview);
        assert!(!f.editor.0.borrow().selectable);
    }

    #[test]
    fn edit_restores_selection_and_panels() {
        let mut f = fixture();
        f.session.handle_event(&json!({"action": "preview"}));
        f.session.handle_event(&json!({"action": "edit"}));

        assert_eq!(f.session.mode(), EditorMode::Edit);
        assert!(f.editor.0.borrow().selectable);
        assert!(f.editor.0.borrow().panels_visible);
    }

    #[test]
    fn mode_messages_produce_no_reply() {
        let mut f = fixture();
        f.session.handle_event(&json!({"action": "preview"}));
        f.session.handle_event(&json!({"action": "edit"}));
        assert!(f.sink.0.borrow().is_empty());
    }

    // -- get-data --

    #[test]
    fn get_data_replies_once_with_compressed_snapshot() {
        let mut f = fixture();
        f.session
            .handle_event(&json!({"action": "get-data", "key": "k1"}));

        let posts = f.sink.0.borrow();
        assert_eq!(posts.len(), 1);
        let reply = &posts[0];
        assert_eq!(reply.action, Action::GetData);
        assert_eq!(reply.key, Some(json!("k1")));

        let decoded = framesync_codec::safe_decompress(reply.content().unwrap());
        let object = decoded.as_object().unwrap();
        assert!(object.get("projectData").is_some());
        assert!(object.get("html").is_some());
        assert!(object.get("css").is_some());
    }

    #[test]
    fn get_data_delivers_on_native_channel_too() {
        let editor = MockEditor::ready();
        let sink = MockSink::default();
        let native = MockNative::default();
        let mut session = BridgeSession::new(
            editor,
            Box::new(sink.clone()),
            Box::new(MockScheduler::default()),
        )
        .with_native_channel(Box::new(native.clone()));

        session.handle_event(&json!({"action": "get-data", "key": 3}));

        assert_eq!(sink.0.borrow().len(), 1);
        let deliveries = native.0.borrow();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].0, NATIVE_HANDLER);
        assert_eq!(deliveries[0].1.key, Some(json!(3)));
    }

    // -- set-data / load --

    #[test]
    fn set_data_replaces_document_from_compressed_content() {
        let mut f = fixture();
        let content = framesync_codec::compress_value(&json!({
            "projectData": {"pages": [{"id": "p9"}]}
        }));
        f.session
            .handle_event(&json!({"action": "set-data", "value": {"content": content}}));

        assert_eq!(
            f.editor.0.borrow().project_data,
            json!({"pages": [{"id": "p9"}]})
        );
    }

    #[test]
    fn set_data_accepts_legacy_uncompressed_json() {
        let mut f = fixture();
        let content = json!({"projectData": {"pages": ["legacy"]}}).to_string();
        f.session
            .handle_event(&json!({"action": "load", "value": {"content": content}}));

        assert_eq!(f.editor.0.borrow().project_data, json!({"pages": ["legacy"]}));
    }

    #[test]
    fn set_data_schedules_style_rebuild_at_fixed_delay() {
        let mut f = fixture();
        let content = framesync_codec::compress_value(&json!({"projectData": {}}));
        f.session
            .handle_event(&json!({"action": "set-data", "value": {"content": content}}));

        let scheduled = f.scheduler.0.borrow();
        assert_eq!(
            *scheduled,
            vec![(Duration::from_millis(500), DeferredTask::RebuildUtilityStyles)]
        );
    }

    #[test]
    fn run_deferred_rebuilds_styles() {
        let mut f = fixture();
        f.session.run_deferred(DeferredTask::RebuildUtilityStyles);
        assert_eq!(f.editor.0.borrow().style_rebuilds, 1);
    }

    #[test]
    fn set_data_without_content_leaves_document_intact() {
        let mut f = fixture();
        let before = f.editor.0.borrow().project_data.clone();
        f.session.handle_event(&json!({"action": "set-data"}));
        f.session
            .handle_event(&json!({"action": "set-data", "value": {}}));

        assert_eq!(f.editor.0.borrow().project_data, before);
        assert!(f.scheduler.0.borrow().is_empty());
    }

    #[test]
    fn set_data_without_project_data_is_a_noop() {
        let mut f = fixture();
        let before = f.editor.0.borrow().project_data.clone();
        let content = framesync_codec::compress_value(&json!({"html": "<p/>"}));
        f.session
            .handle_event(&json!({"action": "set-data", "value": {"content": content}}));

        assert_eq!(f.editor.0.borrow().project_data, before);
    }

    #[test]
    fn set_data_round_trips_through_get_data() {
        let mut f = fixture();
        let project = json!({"pages": [{"id": "roundtrip"}], "assets": []});
        let content = framesync_codec::compress_value(&json!({"projectData": project}));
        f.session
            .handle_event(&json!({"action": "set-data", "value": {"content": content}}));
        f.session
            .handle_event(&json!({"action": "get-data", "key": "after"}));

        let posts = f.sink.0.borrow();
        let decoded = framesync_codec::safe_decompress(posts[0].content().unwrap());
        assert_eq!(decoded.as_object().unwrap()["projectData"], project);
    }

    // -- Noise and guards --

    #[test]
    fn bare_string_changes_nothing_and_replies_nothing() {
        let mut f = fixture();
        f.session.handle_event(&json!("not json"));

        assert!(f.sink.0.borrow().is_empty());
        assert_eq!(f.session.mode(), EditorMode::Edit);
        assert!(f.editor.0.borrow().selectable);
    }

    #[test]
    fn reserved_and_unknown_actions_are_ignored() {
        let mut f = fixture();
        for action in ["track-change", "save", "free-draft", "hand-shake", "bogus"] {
            f.session.handle_event(&json!({ "action": action }));
        }
        assert!(f.sink.0.borrow().is_empty());
    }

    #[test]
    fn uninitialized_editor_drops_everything() {
        let editor = MockEditor::uninitialized();
        let sink = MockSink::default();
        let mut session = BridgeSession::new(
            editor.clone(),
            Box::new(sink.clone()),
            Box::new(MockScheduler::default()),
        );

        session.handle_event(&json!({"action": "get-data", "key": "k"}));
        session.handle_event(&json!({"action": "preview"}));

        assert!(sink.0.borrow().is_empty());
        assert!(!editor.0.borrow().selectable);
    }

    // -- Navigation guard and track-change --

    #[test]
    fn fresh_session_does_not_guard_navigation() {
        let f = fixture();
        assert!(!f.session.should_confirm_leave());
    }

    #[test]
    fn document_change_arms_the_guard_and_signals_the_host() {
        let mut f = fixture();
        f.session.notify_document_change();

        assert!(f.session.should_confirm_leave());
        let posts = f.sink.0.borrow();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].action, Action::TrackChange);
    }

    #[test]
    fn get_data_disarms_the_guard() {
        let mut f = fixture();
        f.session.notify_document_change();
        assert!(f.session.should_confirm_leave());

        f.session.handle_event(&json!({"action": "get-data"}));
        assert!(!f.session.should_confirm_leave());
    }

    #[test]
    fn every_change_signals_even_when_already_dirty() {
        let mut f = fixture();
        f.session.notify_document_change();
        f.session.notify_document_change();
        f.session.notify_document_change();

        assert_eq!(f.sink.0.borrow().len(), 3);
    }
}
