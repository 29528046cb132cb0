// guidance.rs — Status-dependent guidance strings.
//
// A pure mapping from a record's current state to the ordered,
// imperative instructions returned alongside every status check. The
// branching is exhaustive over ApprovalStatus so a new status cannot
// ship without deciding its guidance.
//
// Needs-revision guidance enumerates reviewer comments with 1-based
// indices; selection comments lead with a 50-character excerpt of the
// anchored text.

use uuid::Uuid;

use sw_approvals::{ApprovalRecord, ApprovalStatus, Comment, CommentKind};

/// How many characters of a selection comment's anchored text to show.
const EXCERPT_LEN: usize = 50;

/// Guidance returned right after a request is created.
pub fn creation_next_steps(id: Uuid, dashboard_url: Option<&str>) -> Vec<String> {
    let mut steps = vec![
        "BLOCKING - Dashboard approval required before continuing".to_string(),
        "VERBAL APPROVAL NOT ACCEPTED - Do not proceed on verbal confirmation".to_string(),
    ];
    if let Some(url) = dashboard_url {
        steps.push(format!("Review in dashboard: {}", url));
    }
    steps.push(format!(
        "Poll with the status action using approvalId \"{}\"",
        id
    ));
    steps
}

/// Guidance for a status check, derived from the record's current state.
pub fn status_next_steps(record: &ApprovalRecord, dashboard_url: Option<&str>) -> Vec<String> {
    match record.status {
        ApprovalStatus::Pending => {
            let mut steps = vec![
                "BLOCKED - Do not proceed".to_string(),
                "VERBAL APPROVAL NOT ACCEPTED - Approval happens in the dashboard only"
                    .to_string(),
            ];
            if let Some(url) = dashboard_url {
                steps.push(format!("Review in dashboard: {}", url));
            }
            steps.push("Continue polling with the status action".to_string());
            steps
        }
        ApprovalStatus::Approved => {
            let mut steps = vec![
                "APPROVED - Can proceed".to_string(),
                "Run the delete action for this approval before continuing".to_string(),
            ];
            if let Some(response) = &record.response {
                steps.push(format!("Response: {}", response));
            }
            steps
        }
        ApprovalStatus::Rejected => {
            let mut steps = vec![
                "BLOCKED - REJECTED".to_string(),
                "Do not proceed".to_string(),
                "Review the feedback and revise".to_string(),
            ];
            if let Some(response) = &record.response {
                steps.push(format!("Reason: {}", response));
            }
            if let Some(annotations) = &record.annotations {
                steps.push(format!("Notes: {}", annotations));
            }
            steps
        }
        ApprovalStatus::NeedsRevision => {
            let mut steps = vec![
                "BLOCKED - Do not proceed".to_string(),
                "Update the document with the feedback below".to_string(),
                "Create a NEW approval request for the revised document".to_string(),
            ];
            if let Some(response) = &record.response {
                steps.push(format!("Feedback: {}", response));
            }
            if let Some(annotations) = &record.annotations {
                steps.push(format!("Notes: {}", annotations));
            }
            if !record.comments.is_empty() {
                steps.push(format!(
                    "{} comments for targeted fixes:",
                    record.comments.len()
                ));
                for (index, comment) in record.comments.iter().enumerate() {
                    steps.push(render_comment(index + 1, comment));
                }
            }
            steps
        }
    }
}

fn render_comment(index: usize, comment: &Comment) -> String {
    match (comment.kind, &comment.selected_text) {
        (CommentKind::Selection, Some(selected)) => {
            format!(
                "  Comment {} on \"{}...\": {}",
                index,
                excerpt(selected),
                comment.comment
            )
        }
        // A selection comment without its anchor degrades to general.
        _ => format!("  Comment {} (general): {}", index, comment.comment),
    }
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_approvals::{ApprovalCategory, ApprovalType};

    fn record_with_status(status: ApprovalStatus) -> ApprovalRecord {
        let mut rec = ApprovalRecord::new(
            "Review design",
            "specs/foo/design.md",
            ApprovalCategory::Spec,
            "foo",
            ApprovalType::Document,
        );
        if status != ApprovalStatus::Pending {
            rec.respond(status, None, None, Vec::new()).unwrap();
        }
        rec
    }

    #[test]
    fn pending_guidance_blocks_and_polls() {
        let rec = record_with_status(ApprovalStatus::Pending);
        let steps = status_next_steps(&rec, Some("http://localhost:5173"));
        assert!(steps[0].starts_with("BLOCKED"));
        assert!(steps.iter().any(|s| s.contains("VERBAL APPROVAL NOT ACCEPTED")));
        assert!(steps.iter().any(|s| s.contains("http://localhost:5173")));
        assert!(steps.iter().any(|s| s.contains("polling")));
    }

    #[test]
    fn pending_guidance_without_dashboard_skips_url_line() {
        let rec = record_with_status(ApprovalStatus::Pending);
        let steps = status_next_steps(&rec, None);
        assert!(!steps.iter().any(|s| s.contains("dashboard:")));
    }

    #[test]
    fn approved_guidance_requires_cleanup_delete() {
        let mut rec = record_with_status(ApprovalStatus::Pending);
        rec.respond(
            ApprovalStatus::Approved,
            Some("ship it".to_string()),
            None,
            Vec::new(),
        )
        .unwrap();
        let steps = status_next_steps(&rec, None);
        assert_eq!(steps[0], "APPROVED - Can proceed");
        assert!(steps.iter().any(|s| s.contains("delete action")));
        assert!(steps.iter().any(|s| s == "Response: ship it"));
    }

    #[test]
    fn rejected_guidance_surfaces_reason_and_notes() {
        let mut rec = record_with_status(ApprovalStatus::Pending);
        rec.respond(
            ApprovalStatus::Rejected,
            Some("missing edge cases".to_string()),
            Some("see section 4".to_string()),
            Vec::new(),
        )
        .unwrap();
        let steps = status_next_steps(&rec, None);
        assert!(steps.iter().any(|s| s == "Reason: missing edge cases"));
        assert!(steps.iter().any(|s| s == "Notes: see section 4"));
    }

    #[test]
    fn selection_comment_shows_fifty_char_excerpt() {
        let selected: String = "x".repeat(80);
        let mut rec = record_with_status(ApprovalStatus::Pending);
        rec.respond(
            ApprovalStatus::NeedsRevision,
            None,
            None,
            vec![Comment::selection(selected.clone(), "tighten this paragraph")],
        )
        .unwrap();

        let steps = status_next_steps(&rec, None);
        let expected = format!(
            "  Comment 1 on \"{}...\": tighten this paragraph",
            &selected[..50]
        );
        assert!(steps.contains(&expected), "missing {:?} in {:?}", expected, steps);
    }

    #[test]
    fn general_comment_never_shows_excerpt() {
        let mut rec = record_with_status(ApprovalStatus::Pending);
        rec.respond(
            ApprovalStatus::NeedsRevision,
            None,
            None,
            vec![Comment::general("add a migration note")],
        )
        .unwrap();

        let steps = status_next_steps(&rec, None);
        assert!(steps
            .iter()
            .any(|s| s == "  Comment 1 (general): add a migration note"));
        assert!(!steps.iter().any(|s| s.contains("on \"")));
    }

    #[test]
    fn comments_are_enumerated_one_based_in_order() {
        let mut rec = record_with_status(ApprovalStatus::Pending);
        rec.respond(
            ApprovalStatus::NeedsRevision,
            None,
            None,
            vec![
                Comment::general("first"),
                Comment::general("second"),
                Comment::general("third"),
            ],
        )
        .unwrap();

        let steps = status_next_steps(&rec, None);
        assert!(steps.iter().any(|s| s.contains("3 comments")));
        let idx1 = steps.iter().position(|s| s.contains("Comment 1")).unwrap();
        let idx2 = steps.iter().position(|s| s.contains("Comment 2")).unwrap();
        let idx3 = steps.iter().position(|s| s.contains("Comment 3")).unwrap();
        assert!(idx1 < idx2 && idx2 < idx3);
    }

    #[test]
    fn creation_guidance_names_the_approval_id() {
        let id = Uuid::new_v4();
        let steps = creation_next_steps(id, Some("http://localhost:5173"));
        assert!(steps[0].starts_with("BLOCKING"));
        assert!(steps.iter().any(|s| s.contains(&id.to_string())));
        assert!(steps.iter().any(|s| s.contains("http://localhost:5173")));
    }
}
