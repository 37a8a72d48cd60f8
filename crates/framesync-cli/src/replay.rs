//! Transcript replay against a stub editor.
//!
//! Each transcript line is one raw message event (JSON), fed through a real
//! `BridgeSession` exactly as the editor window would receive it. Lines
//! starting with `#` are comments; the directive line `!change` simulates a
//! local document mutation (the editor reporting a component/style change).
//! Scheduled work runs immediately after the event that queued it — the
//! debounce only matters inside a live window.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{info, warn};

use framesync_bridge::{
    BridgeSession, DeferredTask, EditorCapability, MessageSink, TaskScheduler,
};
use framesync_proto::{Envelope, ProjectSnapshot};

/// Minimal in-memory editor: holds a document tree, fakes the rendered
/// HTML/CSS, counts style rebuilds.
struct StubEditor {
    project_data: Value,
    rebuilds: usize,
}

impl StubEditor {
    fn new() -> Self {
        Self {
            project_data: json!({ "pages": [] }),
            rebuilds: 0,
        }
    }
}

impl EditorCapability for StubEditor {
    fn is_ready(&self) -> bool {
        true
    }

    fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot::new(
            self.project_data.clone(),
            "<div id=\"stub\"></div>",
            "#stub{}",
        )
    }

    fn set_document(&mut self, project_data: Value) {
        self.project_data = project_data;
    }

    fn set_selectable(&mut self, _selectable: bool) {}

    fn set_panels_visible(&mut self, _visible: bool) {}

    fn rebuild_utility_styles(&mut self) {
        self.rebuilds += 1;
    }
}

/// Prints every outbound envelope as one JSON line.
struct StdoutSink;

impl MessageSink for StdoutSink {
    fn post(&mut self, envelope: &Envelope) {
        match serde_json::to_string(envelope) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!(%err, "could not serialize outbound envelope"),
        }
    }
}

/// Queues deferred tasks so the replay loop can run them right away.
#[derive(Clone, Default)]
struct QueueScheduler(Rc<RefCell<Vec<DeferredTask>>>);

impl TaskScheduler for QueueScheduler {
    fn schedule(&mut self, _delay: Duration, task: DeferredTask) {
        self.0.borrow_mut().push(task);
    }
}

pub fn run(transcript: &str) {
    let queue = QueueScheduler::default();
    let mut session = BridgeSession::new(
        StubEditor::new(),
        Box::new(StdoutSink),
        Box::new(queue.clone()),
    );

    for (number, line) in transcript.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "!change" {
            session.notify_document_change();
        } else {
            match serde_json::from_str::<Value>(line) {
                Ok(raw) => session.handle_event(&raw),
                Err(_) => {
                    // A transcript line that is not JSON is replayed as the
                    // bare-string event it would be on the wire.
                    session.handle_event(&Value::String(line.to_string()));
                }
            }
        }

        let due: Vec<DeferredTask> = queue.0.borrow_mut().drain(..).collect();
        for task in due {
            session.run_deferred(task);
        }
        info!(
            line = number + 1,
            confirm_leave = session.should_confirm_leave(),
            "replayed"
        );
    }

    info!(
        rebuilds = session.editor().rebuilds,
        confirm_leave = session.should_confirm_leave(),
        "replay finished"
    );
}
