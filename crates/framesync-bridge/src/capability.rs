use serde_json::Value;

use framesync_proto::ProjectSnapshot;

/// The bridge's entire view of the embedded editor.
///
/// The concrete editor library is a replaceable collaborator; the session
/// drives it only through this trait, which keeps the bridge testable with a
/// mock and keeps editor upgrades out of the protocol code.
pub trait EditorCapability {
    /// Whether the editor has finished initializing. Every message handler
    /// consults this first and drops the message when false.
    fn is_ready(&self) -> bool;

    /// Current document tree plus the flattened HTML/CSS rendered from it.
    fn snapshot(&self) -> ProjectSnapshot;

    /// Replace the current document tree.
    fn set_document(&mut self, project_data: Value);

    /// Toggle selection and hover on every canvas element.
    fn set_selectable(&mut self, selectable: bool);

    /// Show or hide the UI panels. Hiding keeps the panel flagged `views`
    /// visible; showing restores all of them.
    fn set_panels_visible(&mut self, visible: bool);

    /// Rebuild the derived utility-class stylesheet. Idempotent; safe to run
    /// again if it fires before a load has visually settled.
    fn rebuild_utility_styles(&mut self);
}
