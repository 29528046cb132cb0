//! # sw-handlers
//!
//! Request handlers for the spec workflow approval actions.
//!
//! Three actions over the [`sw_approvals`] store — `request`, `status`,
//! and `delete` — each validating its parameters, acquiring a scoped
//! store handle for exactly one logical operation, and returning a
//! structured [`ToolResponse`] with status-dependent guidance strings.
//! No handler ever surfaces a raw error to its caller.
//!
//! ## Key components
//!
//! - [`approvals`] — the three handlers and the [`ApprovalAction`]
//!   dispatch entry point
//! - [`guidance`] — pure mapping from record state to next-step strings
//! - [`ToolContext`] — ambient project path and dashboard URL fallback
//! - [`ToolResponse`] — the structured `{success, message, data, …}`
//!   result

pub mod approvals;
pub mod context;
pub mod error;
pub mod guidance;
pub mod paths;
pub mod response;

pub use approvals::{
    handle, handle_delete, handle_request, handle_status, ApprovalAction, LookupParams,
    RequestParams,
};
pub use context::ToolContext;
pub use error::HandlerError;
pub use response::{ProjectContext, ToolResponse};
