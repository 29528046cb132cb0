// record.rs — ApprovalRecord: one unit of pending human review.
//
// An approval record ties a generated artifact (by file path, never by
// content) to a human review decision. The status lifecycle is strictly
// forward:
//
//   Pending → Approved | Rejected | NeedsRevision
//
// All three response states are terminal: a record never re-enters
// Pending, and terminal states never convert into each other. A record
// that needs another round of review is abandoned and replaced by a new
// record.
//
// The serde representation matches the dashboard's on-disk JSON format
// (camelCase fields, kebab-case status values), which is the sole
// synchronization point between the agent process and the dashboard.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApprovalError;

/// Lifecycle status of an approval record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalStatus {
    /// Awaiting a human decision. The only state a record is created in.
    Pending,

    /// Reviewer approved — the caller may proceed.
    Approved,

    /// Reviewer rejected — the caller must revise and must not proceed.
    Rejected,

    /// Reviewer requested changes — the caller must address the feedback
    /// and open a new approval request for the revised artifact.
    NeedsRevision,
}

impl ApprovalStatus {
    /// Check whether transitioning from this status to `next` is valid.
    ///
    /// Only Pending has outgoing edges; every response status is terminal.
    pub fn can_transition_to(&self, next: ApprovalStatus) -> bool {
        !self.is_terminal() && next.is_terminal()
    }

    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
            ApprovalStatus::NeedsRevision => write!(f, "needs-revision"),
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            "needs-revision" => Ok(ApprovalStatus::NeedsRevision),
            other => Err(format!("unknown approval status: {}", other)),
        }
    }
}

/// Classification of the reviewed artifact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalCategory {
    /// A specification document (scoped by the spec's name).
    Spec,
    /// A steering document (scoped by the steering namespace).
    Steering,
}

impl fmt::Display for ApprovalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalCategory::Spec => write!(f, "spec"),
            ApprovalCategory::Steering => write!(f, "steering"),
        }
    }
}

impl FromStr for ApprovalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" => Ok(ApprovalCategory::Spec),
            "steering" => Ok(ApprovalCategory::Steering),
            other => Err(format!("unknown approval category: {}", other)),
        }
    }
}

/// Whether review approves document content or a proposed action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalType {
    Document,
    Action,
}

impl fmt::Display for ApprovalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalType::Document => write!(f, "document"),
            ApprovalType::Action => write!(f, "action"),
        }
    }
}

impl FromStr for ApprovalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(ApprovalType::Document),
            "action" => Ok(ApprovalType::Action),
            other => Err(format!("unknown approval type: {}", other)),
        }
    }
}

/// What a reviewer comment is anchored to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    /// Anchored to an excerpt of the reviewed document.
    Selection,
    /// Applies to the document as a whole.
    General,
}

/// One reviewer annotation on a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Selection (anchored to text) or general.
    #[serde(rename = "type")]
    pub kind: CommentKind,

    /// Free-text comment body.
    pub comment: String,

    /// The excerpted text this comment is anchored to.
    /// Present only for selection comments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
}

impl Comment {
    /// Create a selection comment anchored to an excerpt.
    pub fn selection(selected_text: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Selection,
            comment: comment.into(),
            selected_text: Some(selected_text.into()),
        }
    }

    /// Create a general comment with no anchor.
    pub fn general(comment: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::General,
            comment: comment.into(),
            selected_text: None,
        }
    }
}

/// An approval record — one pending or resolved human review decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    /// Unique identifier, generated at creation, immutable.
    pub id: Uuid,

    /// Short human-readable label (e.g., "Review design for feature X").
    pub title: String,

    /// Path to the artifact under review, relative to the project root.
    /// The store never reads the artifact itself.
    pub file_path: String,

    /// Classification of the reviewed artifact.
    pub category: ApprovalCategory,

    /// Name scoping the record within its category (a spec name, or the
    /// literal steering namespace).
    pub category_name: String,

    /// Document content approval vs. proposed action approval.
    #[serde(rename = "type")]
    pub kind: ApprovalType,

    /// Current lifecycle status.
    pub status: ApprovalStatus,

    /// Free-text reviewer message, set when the record is responded to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// Free-text reviewer notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<String>,

    /// Reviewer comments in review order. Append-only.
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// When the record was created. Immutable.
    pub created_at: DateTime<Utc>,

    /// Set the moment status leaves Pending; None exactly while Pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl ApprovalRecord {
    /// Create a new record in the Pending state.
    pub fn new(
        title: impl Into<String>,
        file_path: impl Into<String>,
        category: ApprovalCategory,
        category_name: impl Into<String>,
        kind: ApprovalType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            file_path: file_path.into(),
            category,
            category_name: category_name.into(),
            kind,
            status: ApprovalStatus::Pending,
            response: None,
            annotations: None,
            comments: Vec::new(),
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    /// Apply a reviewer decision to this record.
    ///
    /// Sets the status, stamps `responded_at`, records the reviewer's
    /// message and notes, and appends any comments. Returns an error if
    /// the status transition is not allowed by the state machine.
    pub fn respond(
        &mut self,
        status: ApprovalStatus,
        response: Option<String>,
        annotations: Option<String>,
        comments: Vec<Comment>,
    ) -> Result<(), ApprovalError> {
        if !self.status.can_transition_to(status) {
            return Err(ApprovalError::InvalidTransition {
                id: self.id,
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        self.status = status;
        self.response = response;
        self.annotations = annotations;
        self.comments.extend(comments);
        self.responded_at = Some(Utc::now());
        Ok(())
    }
}
