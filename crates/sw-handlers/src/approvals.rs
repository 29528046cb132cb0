// approvals.rs — The three approval actions: request, status, delete.
//
// Each handler validates its parameters before touching storage,
// acquires a store handle for exactly one logical operation (released on
// every path), and returns a structured ToolResponse — no error escapes
// as an error. The approved-only delete rule is enforced here, not in
// the store, so human-operated tooling can bypass it on direct human
// authority.

use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use sw_approvals::{
    ApprovalCategory, ApprovalError, ApprovalRecord, ApprovalStatus, ApprovalStore, ApprovalType,
};

use crate::context::ToolContext;
use crate::error::HandlerError;
use crate::guidance;
use crate::paths::validate_project_path;
use crate::response::{ProjectContext, ToolResponse};

/// Parameters for the `request` action. All fields are required; they
/// are optional here so validation can enumerate what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    /// Absolute path to the project root.
    pub project_path: Option<String>,
    /// Brief title describing what needs approval.
    pub title: Option<String>,
    /// Path to the file under review, relative to the project root.
    pub file_path: Option<String>,
    /// "document" or "action".
    #[serde(rename = "type")]
    pub kind: Option<ApprovalType>,
    /// "spec" or "steering".
    pub category: Option<ApprovalCategory>,
    /// Name of the spec, or the steering namespace.
    pub category_name: Option<String>,
}

/// Parameters for the `status` and `delete` actions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupParams {
    /// Project root; falls back to the ambient context value if omitted.
    pub project_path: Option<String>,
    /// The ID of the approval request.
    pub approval_id: Option<String>,
}

/// The single external entry point: one of three actions.
#[derive(Debug, Clone)]
pub enum ApprovalAction {
    Request(RequestParams),
    Status(LookupParams),
    Delete(LookupParams),
}

/// Dispatch an action to its handler.
pub fn handle(action: &ApprovalAction, context: &ToolContext) -> ToolResponse {
    match action {
        ApprovalAction::Request(params) => handle_request(params, context),
        ApprovalAction::Status(params) => handle_status(params, context),
        ApprovalAction::Delete(params) => handle_delete(params, context),
    }
}

/// Create a new approval request.
pub fn handle_request(params: &RequestParams, context: &ToolContext) -> ToolResponse {
    tracing::debug!(title = ?params.title, "handling approval request action");
    match request_inner(params, context) {
        Ok(response) => response,
        Err(e @ HandlerError::Validation { .. }) => ToolResponse::fail(e.to_string()),
        Err(e) => ToolResponse::fail(format!("Failed to create approval request: {}", e)),
    }
}

/// Check the current status of an approval request.
pub fn handle_status(params: &LookupParams, context: &ToolContext) -> ToolResponse {
    tracing::debug!(approval_id = ?params.approval_id, "handling approval status action");
    match status_inner(params, context) {
        Ok(response) => response,
        Err(e @ HandlerError::Validation { .. }) => ToolResponse::fail(e.to_string()),
        Err(e) => ToolResponse::fail(format!("Failed to check approval status: {}", e)),
    }
}

/// Delete a completed (approved) approval request.
pub fn handle_delete(params: &LookupParams, context: &ToolContext) -> ToolResponse {
    tracing::debug!(approval_id = ?params.approval_id, "handling approval delete action");
    match delete_inner(params, context) {
        Ok(response) => response,
        Err(e @ HandlerError::Validation { .. }) => ToolResponse::fail(e.to_string()),
        Err(e) => ToolResponse::fail(format!("Failed to delete approval: {}", e)),
    }
}

fn request_inner(
    params: &RequestParams,
    context: &ToolContext,
) -> Result<ToolResponse, HandlerError> {
    let mut missing = Vec::new();
    if params.project_path.is_none() {
        missing.push("projectPath");
    }
    if params.title.is_none() {
        missing.push("title");
    }
    if params.file_path.is_none() {
        missing.push("filePath");
    }
    if params.kind.is_none() {
        missing.push("type");
    }
    if params.category.is_none() {
        missing.push("category");
    }
    if params.category_name.is_none() {
        missing.push("categoryName");
    }
    if !missing.is_empty() {
        return Err(HandlerError::Validation {
            action: "request",
            missing,
        });
    }

    // Validation above guarantees presence.
    let title = params.title.as_deref().unwrap_or_default();
    let file_path = params.file_path.as_deref().unwrap_or_default();
    let category_name = params.category_name.as_deref().unwrap_or_default();
    let kind = params.kind.unwrap_or(ApprovalType::Document);
    let category = params.category.unwrap_or(ApprovalCategory::Spec);

    let project_path =
        validate_project_path(Path::new(params.project_path.as_deref().unwrap_or_default()))?;

    let id = with_store(&project_path, |store| {
        store.create(title, file_path, category, category_name, kind)
    })?;

    let message = match &context.dashboard_url {
        Some(url) => format!(
            "Approval request created successfully. Review in dashboard: {}",
            url
        ),
        None => "Approval request created successfully. Review in the dashboard.".to_string(),
    };

    Ok(ToolResponse::ok(message)
        .with_data(serde_json::json!({
            "approvalId": id.to_string(),
            "title": title,
            "filePath": file_path,
            "type": kind.to_string(),
            "status": ApprovalStatus::Pending.to_string(),
            "dashboardUrl": context.dashboard_url,
        }))
        .with_next_steps(guidance::creation_next_steps(
            id,
            context.dashboard_url.as_deref(),
        ))
        .with_project_context(project_context(&project_path, context)))
}

fn status_inner(
    params: &LookupParams,
    context: &ToolContext,
) -> Result<ToolResponse, HandlerError> {
    let id = require_approval_id(params, "status")?;
    let project_path = resolve_and_validate(params, context)?;

    let Some(record) = lookup(&project_path, id)? else {
        return Ok(ToolResponse::fail(format!(
            "Approval request not found: {}",
            id
        )));
    };

    let is_completed = matches!(
        record.status,
        ApprovalStatus::Approved | ApprovalStatus::Rejected
    );
    let can_proceed = record.status == ApprovalStatus::Approved;
    let must_wait = !can_proceed;

    let message = match (record.status, &record.response) {
        (ApprovalStatus::Pending, _) => {
            "BLOCKED: Status is pending. Verbal approval is NOT accepted. Use the dashboard."
                .to_string()
        }
        (ApprovalStatus::Rejected, Some(response)) => {
            format!("Approval status: rejected. Reason: {}", response)
        }
        (status, _) => format!("Approval status: {}", status),
    };

    let next_steps = guidance::status_next_steps(&record, context.dashboard_url.as_deref());

    Ok(ToolResponse {
        success: true,
        message,
        data: Some(serde_json::json!({
            "approvalId": id.to_string(),
            "title": record.title,
            "type": record.kind.to_string(),
            "status": record.status.to_string(),
            "createdAt": record.created_at,
            "respondedAt": record.responded_at,
            "response": record.response,
            "annotations": record.annotations,
            "comments": record.comments,
            "isCompleted": is_completed,
            "canProceed": can_proceed,
            "mustWait": must_wait,
            "blockNext": !can_proceed,
            "dashboardUrl": context.dashboard_url,
        })),
        next_steps: Some(next_steps),
        project_context: Some(project_context(&project_path, context)),
    })
}

/// What one delete attempt found, evaluated inside a single store span.
enum DeleteOutcome {
    NotFound,
    Blocked(ApprovalRecord),
    Deleted(ApprovalRecord),
    /// The record was approved but vanished before removal.
    Vanished,
}

fn delete_inner(
    params: &LookupParams,
    context: &ToolContext,
) -> Result<ToolResponse, HandlerError> {
    let id = require_approval_id(params, "delete")?;
    let project_path = resolve_and_validate(params, context)?;

    let outcome = with_store(&project_path, |store| {
        let record = match store.get(id) {
            Ok(Some(record)) => record,
            Ok(None) | Err(ApprovalError::CorruptRecord { .. }) => {
                return Ok(DeleteOutcome::NotFound)
            }
            Err(e) => return Err(e),
        };
        if record.status != ApprovalStatus::Approved {
            return Ok(DeleteOutcome::Blocked(record));
        }
        if store.delete(id)? {
            Ok(DeleteOutcome::Deleted(record))
        } else {
            Ok(DeleteOutcome::Vanished)
        }
    })?;

    let response = match outcome {
        DeleteOutcome::NotFound => ToolResponse::fail(format!(
            "Approval request \"{}\" not found",
            id
        ))
        .with_next_steps(vec![
            "Verify the approval ID".to_string(),
            "Check with the status action".to_string(),
        ]),
        DeleteOutcome::Blocked(record) => ToolResponse::fail(format!(
            "BLOCKED: Cannot delete - status is \"{}\". Only approved requests may be removed.",
            record.status
        ))
        .with_data(serde_json::json!({
            "approvalId": id.to_string(),
            "currentStatus": record.status.to_string(),
            "title": record.title,
            "blockProgress": true,
            "canProceed": false,
        }))
        .with_next_steps(vec![
            "STOP - Do not proceed to the next phase".to_string(),
            "Wait for approval in the dashboard".to_string(),
            "Poll with the status action".to_string(),
        ]),
        DeleteOutcome::Deleted(record) => ToolResponse::ok(format!(
            "Approval request \"{}\" deleted successfully",
            id
        ))
        .with_data(serde_json::json!({
            "deletedApprovalId": id.to_string(),
            "title": record.title,
            "category": record.category.to_string(),
            "categoryName": record.category_name,
        }))
        .with_next_steps(vec![
            "Cleanup complete".to_string(),
            "Continue to the next phase".to_string(),
        ])
        .with_project_context(project_context(&project_path, context)),
        DeleteOutcome::Vanished => ToolResponse::fail(format!(
            "Failed to delete approval request \"{}\"",
            id
        ))
        .with_next_steps(vec![
            "Verify the approval still exists with the status action".to_string(),
            "Retry the delete action".to_string(),
        ]),
    };
    Ok(response)
}

/// Run one logical operation inside a scoped store handle. The handle is
/// released on every path, including errors.
fn with_store<T>(
    project_root: &Path,
    op: impl FnOnce(&ApprovalStore) -> Result<T, ApprovalError>,
) -> Result<T, HandlerError> {
    let mut store = ApprovalStore::new(project_root);
    store.start()?;
    let result = op(&store);
    store.stop();
    Ok(result?)
}

/// Fetch a record, folding corruption into "not found" so one damaged
/// file reads as an absent record rather than an internal failure.
fn lookup(project_root: &Path, id: Uuid) -> Result<Option<ApprovalRecord>, HandlerError> {
    match with_store(project_root, |store| store.get(id)) {
        Ok(found) => Ok(found),
        Err(HandlerError::Approval(ApprovalError::CorruptRecord { .. })) => Ok(None),
        Err(e) => Err(e),
    }
}

fn require_approval_id(params: &LookupParams, action: &'static str) -> Result<Uuid, HandlerError> {
    let raw = params.approval_id.as_deref().ok_or(HandlerError::Validation {
        action,
        missing: vec!["approvalId"],
    })?;
    Uuid::parse_str(raw).map_err(|_| HandlerError::InvalidId(raw.to_string()))
}

fn resolve_and_validate(
    params: &LookupParams,
    context: &ToolContext,
) -> Result<std::path::PathBuf, HandlerError> {
    let resolved = context.resolve_project_path(params.project_path.as_deref())?;
    validate_project_path(&resolved)
}

fn project_context(project_path: &Path, context: &ToolContext) -> ProjectContext {
    ProjectContext {
        project_path: project_path.to_path_buf(),
        workflow_root: project_path.join(sw_approvals::WORKFLOW_DIR),
        dashboard_url: context.dashboard_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request_params(project: &Path) -> RequestParams {
        RequestParams {
            project_path: Some(project.to_string_lossy().into_owned()),
            title: Some("Review spec".to_string()),
            file_path: Some("specs/foo/design.md".to_string()),
            kind: Some(ApprovalType::Document),
            category: Some(ApprovalCategory::Spec),
            category_name: Some("foo".to_string()),
        }
    }

    fn created_id(response: &ToolResponse) -> Uuid {
        response.data.as_ref().unwrap()["approvalId"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn request_creates_pending_record() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_dashboard_url("http://localhost:5173");

        let response = handle_request(&request_params(dir.path()), &ctx);
        assert!(response.success, "{}", response.message);

        let data = response.data.as_ref().unwrap();
        assert_eq!(data["status"], "pending");
        assert_eq!(data["title"], "Review spec");
        let pc = response.project_context.as_ref().unwrap();
        assert!(pc.workflow_root.ends_with(".spec-workflow"));

        // Record is on disk and visible to an independent handle.
        let id = created_id(&response);
        let mut store = ApprovalStore::new(dir.path());
        store.start().unwrap();
        assert!(store.get(id).unwrap().is_some());
    }

    #[test]
    fn request_with_missing_fields_enumerates_them() {
        let dir = tempdir().unwrap();
        let params = RequestParams {
            project_path: Some(dir.path().to_string_lossy().into_owned()),
            title: Some("Review spec".to_string()),
            ..Default::default()
        };
        let response = handle_request(&params, &ToolContext::new());
        assert!(!response.success);
        assert!(
            response
                .message
                .contains("filePath, type, category, categoryName"),
            "{}",
            response.message
        );
        assert!(!response.message.contains("projectPath"));
        assert!(!response.message.contains("title,"));
    }

    #[test]
    fn request_with_invalid_project_path_fails_cleanly() {
        let dir = tempdir().unwrap();
        let mut params = request_params(dir.path());
        params.project_path = Some(
            dir.path()
                .join("no-such-dir")
                .to_string_lossy()
                .into_owned(),
        );
        let response = handle_request(&params, &ToolContext::new());
        assert!(!response.success);
        assert!(response.message.contains("Failed to create approval request"));
    }

    #[test]
    fn status_requires_approval_id() {
        let response = handle_status(&LookupParams::default(), &ToolContext::new());
        assert!(!response.success);
        assert!(response.message.contains("approvalId"));
    }

    #[test]
    fn status_rejects_malformed_approval_id() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());
        let response = handle_status(
            &LookupParams {
                project_path: None,
                approval_id: Some("not-a-uuid".to_string()),
            },
            &ctx,
        );
        assert!(!response.success);
        assert!(response.message.contains("Invalid approval ID"));
    }

    #[test]
    fn status_uses_ambient_project_path() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());
        let created = handle_request(&request_params(dir.path()), &ctx);
        let id = created_id(&created);

        let response = handle_status(
            &LookupParams {
                project_path: None,
                approval_id: Some(id.to_string()),
            },
            &ctx,
        );
        assert!(response.success);
        let data = response.data.as_ref().unwrap();
        assert_eq!(data["status"], "pending");
        assert_eq!(data["canProceed"], false);
        assert_eq!(data["mustWait"], true);
        assert!(response.message.starts_with("BLOCKED"));
    }

    #[test]
    fn status_without_any_project_path_fails() {
        let response = handle_status(
            &LookupParams {
                project_path: None,
                approval_id: Some(Uuid::new_v4().to_string()),
            },
            &ToolContext::new(),
        );
        assert!(!response.success);
        assert!(response.message.contains("Project path is required"));
    }

    #[test]
    fn status_of_unknown_record_is_not_found() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());
        let response = handle_status(
            &LookupParams {
                project_path: None,
                approval_id: Some(Uuid::new_v4().to_string()),
            },
            &ctx,
        );
        assert!(!response.success);
        assert!(response.message.contains("not found"));
    }

    #[test]
    fn status_folds_corruption_into_not_found() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());

        let id = Uuid::new_v4();
        let approvals = dir.path().join(".spec-workflow").join("approvals");
        std::fs::create_dir_all(&approvals).unwrap();
        std::fs::write(approvals.join(format!("{}.json", id)), "{ nope").unwrap();

        let response = handle_status(
            &LookupParams {
                project_path: None,
                approval_id: Some(id.to_string()),
            },
            &ctx,
        );
        assert!(!response.success);
        assert!(response.message.contains("not found"));
    }

    #[test]
    fn delete_is_blocked_until_approved() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());
        let created = handle_request(&request_params(dir.path()), &ctx);
        let id = created_id(&created);
        let lookup = LookupParams {
            project_path: None,
            approval_id: Some(id.to_string()),
        };

        let blocked = handle_delete(&lookup, &ctx);
        assert!(!blocked.success);
        assert!(blocked.message.contains("pending"), "{}", blocked.message);
        let data = blocked.data.as_ref().unwrap();
        assert_eq!(data["currentStatus"], "pending");
        assert_eq!(data["blockProgress"], true);

        // Record must be intact after the blocked attempt.
        let mut store = ApprovalStore::new(dir.path());
        store.start().unwrap();
        assert!(store.get(id).unwrap().is_some());
    }

    #[test]
    fn delete_succeeds_after_approval() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());
        let created = handle_request(&request_params(dir.path()), &ctx);
        let id = created_id(&created);

        // The reviewer approves through an independent store handle.
        let mut store = ApprovalStore::new(dir.path());
        store.start().unwrap();
        store
            .respond(id, ApprovalStatus::Approved, None, None, Vec::new())
            .unwrap();

        let lookup = LookupParams {
            project_path: None,
            approval_id: Some(id.to_string()),
        };
        let deleted = handle_delete(&lookup, &ctx);
        assert!(deleted.success, "{}", deleted.message);
        assert_eq!(
            deleted.data.as_ref().unwrap()["deletedApprovalId"],
            id.to_string()
        );

        let gone = handle_status(&lookup, &ctx);
        assert!(!gone.success);
        assert!(gone.message.contains("not found"));
    }

    #[test]
    fn delete_of_unknown_record_fails_with_guidance() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());
        let response = handle_delete(
            &LookupParams {
                project_path: None,
                approval_id: Some(Uuid::new_v4().to_string()),
            },
            &ctx,
        );
        assert!(!response.success);
        assert!(response.message.contains("not found"));
        assert!(response.next_steps.is_some());
    }

    #[test]
    fn dispatch_routes_all_three_actions() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new().with_project_path(dir.path());

        let created = handle(
            &ApprovalAction::Request(request_params(dir.path())),
            &ctx,
        );
        assert!(created.success);
        let id = created_id(&created);
        let lookup = LookupParams {
            project_path: None,
            approval_id: Some(id.to_string()),
        };

        let status = handle(&ApprovalAction::Status(lookup.clone()), &ctx);
        assert!(status.success);

        let delete = handle(&ApprovalAction::Delete(lookup), &ctx);
        assert!(!delete.success); // still pending — blocked
    }
}
