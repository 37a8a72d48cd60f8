//! The editor-side half of the cross-frame sync protocol.
//!
//! A [`BridgeSession`] is constructed at editor-window startup and torn down
//! with the window. It owns every piece of mutable bridge state:
//! - the embedded editor, seen only through [`EditorCapability`]
//! - the reply path to the host window ([`MessageSink`]) and an optional
//!   side channel for non-browser shells ([`NativeChannel`])
//! - the current presentation mode and the unsaved-changes flag backing the
//!   navigation guard
//!
//! Inbound messages are decoded once at the boundary and dispatched by
//! action; every handler is a local failure boundary that logs and discards
//! on error. No message is ever NACKed and a failed load leaves the prior
//! document intact.

pub mod capability;
pub mod errors;
pub mod outbound;
pub mod schedule;
pub mod session;

pub use capability::EditorCapability;
pub use errors::BridgeError;
pub use outbound::{MessageSink, NativeChannel, NATIVE_HANDLER};
pub use schedule::{DeferredTask, TaskScheduler, STYLE_REBUILD_DELAY};
pub use session::{BridgeSession, EditorMode};
