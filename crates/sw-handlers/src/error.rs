// error.rs — Error types for the request handler layer.
//
// Handler errors never escape to callers as errors: every handler
// converts them into a `ToolResponse` with `success: false` before
// returning. The enum exists so the conversion happens in one place
// and the failure taxonomy stays visible.

use thiserror::Error;

use sw_approvals::ApprovalError;

/// Errors that can occur while handling an approval action.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Required parameters are missing. Surfaced before any storage
    /// access; the message enumerates the missing fields.
    #[error("Missing required fields for {action} action: {}", .missing.join(", "))]
    Validation {
        action: &'static str,
        missing: Vec<&'static str>,
    },

    /// No project path was supplied and no ambient value is configured.
    #[error("Project path is required. Provide the projectPath parameter.")]
    MissingProjectPath,

    /// The project path could not be validated/resolved.
    #[error("{0}")]
    PathResolution(String),

    /// The supplied approval id is not a valid identifier.
    #[error("Invalid approval ID '{0}'")]
    InvalidId(String),

    /// An approval store operation failed.
    #[error("{0}")]
    Approval(#[from] ApprovalError),
}
