//! # sw-approvals
//!
//! Approval record store for the spec workflow: human-in-the-loop
//! approval gates over agent-generated documents.
//!
//! An [`ApprovalRecord`] represents one pending or resolved review
//! decision, persisted as a JSON file under the project's
//! `.spec-workflow/approvals/` directory. The on-disk form is the only
//! synchronization point between the agent-driving process and the
//! human-facing dashboard, so the store never caches across calls and
//! every update is a read-modify-write against disk.
//!
//! ## Key components
//!
//! - [`ApprovalRecord`] — the record and its status state machine
//!   (Pending → Approved | Rejected | NeedsRevision, all terminal)
//! - [`ApprovalStore`] — JSON-file-per-record persistence with a
//!   lifecycle-scoped start/stop handle
//! - [`codec`] — the persisted-form encode/decode with corruption
//!   reporting

pub mod codec;
pub mod error;
pub mod record;
pub mod store;

pub use error::ApprovalError;
pub use record::{
    ApprovalCategory, ApprovalRecord, ApprovalStatus, ApprovalType, Comment, CommentKind,
};
pub use store::{ApprovalStore, WORKFLOW_DIR};
