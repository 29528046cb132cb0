// response.rs — Structured handler responses.
//
// Every action returns a ToolResponse — success or failure, never a raw
// error. The JSON form uses camelCase to match the dashboard's wire
// format.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The resolved project surroundings echoed back on create/delete so a
/// human knows where to look next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    /// Validated project root.
    pub project_path: PathBuf,

    /// The project's `.spec-workflow` directory.
    pub workflow_root: PathBuf,

    /// Dashboard URL for human follow-up, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
}

/// Structured result of one approval action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// Whether the action succeeded.
    pub success: bool,

    /// Human-readable outcome summary.
    pub message: String,

    /// Contextual payload, present on success (and on blocking failures
    /// that carry state the caller needs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Ordered imperative guidance for what the caller may do next.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Vec<String>>,

    /// Resolved project surroundings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_context: Option<ProjectContext>,
}

impl ToolResponse {
    /// Build a success response.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            next_steps: None,
            project_context: None,
        }
    }

    /// Build a failure response.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            next_steps: None,
            project_context: None,
        }
    }

    /// Attach a data payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach guidance strings.
    pub fn with_next_steps(mut self, next_steps: Vec<String>) -> Self {
        self.next_steps = Some(next_steps);
        self
    }

    /// Attach the resolved project context.
    pub fn with_project_context(mut self, context: ProjectContext) -> Self {
        self.project_context = Some(context);
        self
    }
}
