// review.rs — Reviewer-path commands: list, respond, remove.
//
// These act on the store directly, on human authority. `remove` in
// particular bypasses the approved-only gate the agent path enforces;
// it exists so a human can reset a stuck or abandoned request.

use std::path::Path;

use anyhow::{anyhow, Context};
use uuid::Uuid;

use sw_approvals::{ApprovalStatus, ApprovalStore, Comment};

pub fn list(project_root: &Path) -> anyhow::Result<()> {
    let mut store = started(project_root)?;
    let records = store.list()?;
    store.stop();
    if records.is_empty() {
        println!("No approval requests.");
        return Ok(());
    }

    println!(
        "{:<38} {:<16} {:<10} {:<20} TITLE",
        "ID", "STATUS", "CATEGORY", "CREATED"
    );
    for record in records {
        println!(
            "{:<38} {:<16} {:<10} {:<20} {}",
            record.id,
            record.status.to_string(),
            record.category.to_string(),
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.title,
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn respond(
    project_root: &Path,
    id: &str,
    status: &str,
    response: Option<&str>,
    annotations: Option<&str>,
    comments: &[String],
    selections: &[String],
) -> anyhow::Result<()> {
    let id = parse_id(id)?;
    let status = status
        .parse::<ApprovalStatus>()
        .map_err(anyhow::Error::msg)?;

    let mut all_comments: Vec<Comment> = Vec::new();
    for selection in selections {
        let (excerpt, comment) = selection.split_once("::").ok_or_else(|| {
            anyhow!("selection must be \"EXCERPT::COMMENT\", got: {}", selection)
        })?;
        all_comments.push(Comment::selection(excerpt, comment));
    }
    all_comments.extend(comments.iter().map(|c| Comment::general(c.clone())));

    let mut store = started(project_root)?;
    let result = store.respond(
        id,
        status,
        response.map(str::to_string),
        annotations.map(str::to_string),
        all_comments,
    );
    store.stop();
    let record = result?;

    println!(
        "Recorded {} for \"{}\" ({})",
        record.status, record.title, record.id
    );
    Ok(())
}

pub fn remove(project_root: &Path, id: &str) -> anyhow::Result<()> {
    let id = parse_id(id)?;
    let mut store = started(project_root)?;
    let removed = store.delete(id);
    store.stop();
    if removed? {
        println!("Removed approval request {}", id);
    } else {
        println!("No approval request with id {}", id);
    }
    Ok(())
}

fn started(project_root: &Path) -> anyhow::Result<ApprovalStore> {
    let mut store = ApprovalStore::new(project_root);
    store.start().with_context(|| {
        format!(
            "opening approval store in {}",
            store.project_root().display()
        )
    })?;
    Ok(store)
}

fn parse_id(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("invalid approval id: {}", raw))
}
