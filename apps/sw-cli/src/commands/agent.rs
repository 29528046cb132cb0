// agent.rs — Agent-path actions: request, status, delete.
//
// These go through the handler layer so the CLI observes exactly the
// policy an automated caller would: field validation, the approved-only
// delete gate, and the status-dependent guidance strings. The
// ToolResponse is printed as JSON; a failed action exits non-zero.

use std::path::Path;

use sw_handlers::{
    handle_delete, handle_request, handle_status, LookupParams, RequestParams, ToolContext,
    ToolResponse,
};

pub fn request(
    project_root: &Path,
    dashboard_url: Option<&str>,
    title: &str,
    file_path: &str,
    kind: &str,
    category: &str,
    category_name: &str,
) -> anyhow::Result<()> {
    // Enum fields are parsed up front so a typo fails with a clear
    // message instead of a missing-field validation response.
    let kind = kind
        .parse::<sw_approvals::ApprovalType>()
        .map_err(anyhow::Error::msg)?;
    let category = category
        .parse::<sw_approvals::ApprovalCategory>()
        .map_err(anyhow::Error::msg)?;

    let params = RequestParams {
        project_path: Some(project_root.to_string_lossy().into_owned()),
        title: Some(title.to_string()),
        file_path: Some(file_path.to_string()),
        kind: Some(kind),
        category: Some(category),
        category_name: Some(category_name.to_string()),
    };
    emit(handle_request(&params, &context(project_root, dashboard_url)))
}

pub fn status(project_root: &Path, dashboard_url: Option<&str>, id: &str) -> anyhow::Result<()> {
    let params = LookupParams {
        project_path: None,
        approval_id: Some(id.to_string()),
    };
    emit(handle_status(&params, &context(project_root, dashboard_url)))
}

pub fn delete(project_root: &Path, dashboard_url: Option<&str>, id: &str) -> anyhow::Result<()> {
    let params = LookupParams {
        project_path: None,
        approval_id: Some(id.to_string()),
    };
    emit(handle_delete(&params, &context(project_root, dashboard_url)))
}

fn context(project_root: &Path, dashboard_url: Option<&str>) -> ToolContext {
    let mut ctx = ToolContext::new().with_project_path(project_root);
    if let Some(url) = dashboard_url {
        ctx = ctx.with_dashboard_url(url);
    }
    ctx
}

fn emit(response: ToolResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}
