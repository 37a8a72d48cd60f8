//! Wire protocol for the cross-frame editor sync bridge.
//!
//! Messages flow in both directions between a host window and the editor
//! window it embeds:
//! - **Host -> editor**: mode switches (`preview` / `edit`) and project data
//!   transfer (`get-data`, `set-data`, `load`).
//! - **Editor -> host**: `get-data` replies and unsolicited `track-change`
//!   signals whenever the document model mutates.
//!
//! Nothing crosses the boundary by reference — every payload is serialized.

pub mod action;
pub mod errors;
pub mod message;
pub mod snapshot;

pub use action::Action;
pub use errors::ProtocolError;
pub use message::{Envelope, Payload};
pub use snapshot::ProjectSnapshot;

pub type Result<T> = std::result::Result<T, ProtocolError>;
