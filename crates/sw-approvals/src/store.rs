// store.rs — ApprovalStore: file-backed repository for approval records.
//
// Each record is stored as a JSON file: `<project>/.spec-workflow/approvals/<id>.json`.
// The directory is shared by independent processes (the agent-driving
// process and the human-facing dashboard/CLI), so the filesystem is the
// single source of truth: nothing is cached across calls, every update
// is a read-modify-write against the persisted form, and enumeration
// tolerates records that another process deletes or corrupts mid-scan.
//
// The store handle is lifecycle-scoped: `start()` establishes the
// directory structure for one logical operation and `stop()` releases
// it. Both are idempotent, so no file handles are held across the
// unpredictable gaps between polling calls.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::codec;
use crate::error::ApprovalError;
use crate::record::{
    ApprovalCategory, ApprovalRecord, ApprovalStatus, ApprovalType, Comment,
};

/// Name of the per-project workflow directory.
pub const WORKFLOW_DIR: &str = ".spec-workflow";

const APPROVALS_SUBDIR: &str = "approvals";

/// File-backed store for approval records, bound to one project root.
///
/// The store holds no open resources between operations; it is a path
/// pair plus the lifecycle contract. It is not safe for concurrent use
/// from within one process — callers serialize their own operations —
/// but any number of processes may hold independent stores over the
/// same directory.
pub struct ApprovalStore {
    project_root: PathBuf,
    approvals_dir: PathBuf,
}

impl ApprovalStore {
    /// Create a store handle for the given project root.
    ///
    /// No filesystem access happens here; call [`start`](Self::start)
    /// before the first operation.
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let project_root = project_root.as_ref().to_path_buf();
        let approvals_dir = project_root.join(WORKFLOW_DIR).join(APPROVALS_SUBDIR);
        Self {
            project_root,
            approvals_dir,
        }
    }

    /// Establish readiness to operate: create the workflow directory
    /// tree if absent.
    ///
    /// `create_dir_all` is create-if-absent, so two processes racing on
    /// first use both succeed. Safe to call repeatedly.
    pub fn start(&mut self) -> Result<(), ApprovalError> {
        fs::create_dir_all(&self.approvals_dir).map_err(|source| ApprovalError::Io {
            path: self.approvals_dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %self.approvals_dir.display(), "approval store started");
        Ok(())
    }

    /// Release the handle. Idempotent; valid without a prior `start`.
    ///
    /// The file-backed store holds nothing open between operations, so
    /// this only marks the end of the operation span.
    pub fn stop(&mut self) {
        tracing::trace!(dir = %self.approvals_dir.display(), "approval store stopped");
    }

    /// The project root this store is bound to.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The `.spec-workflow` directory for this project.
    pub fn workflow_root(&self) -> PathBuf {
        self.project_root.join(WORKFLOW_DIR)
    }

    /// Create a new record in the Pending state and persist it.
    /// Returns the allocated id.
    pub fn create(
        &self,
        title: &str,
        file_path: &str,
        category: ApprovalCategory,
        category_name: &str,
        kind: ApprovalType,
    ) -> Result<Uuid, ApprovalError> {
        let record = ApprovalRecord::new(title, file_path, category, category_name, kind);
        self.write_record(&record)?;
        tracing::debug!(id = %record.id, title, "approval record created");
        Ok(record.id)
    }

    /// Look up a record by id.
    ///
    /// Returns `Ok(None)` when the record is absent. A record that
    /// exists but cannot be decoded is an error
    /// ([`ApprovalError::CorruptRecord`]) so callers can distinguish
    /// corruption from absence; request handlers fold it into a
    /// "not found" response.
    pub fn get(&self, id: Uuid) -> Result<Option<ApprovalRecord>, ApprovalError> {
        let path = self.record_path(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            // Absent, or deleted by another process since we last looked.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ApprovalError::Io { path, source }),
        };
        Ok(Some(codec::decode(&json, &path)?))
    }

    /// Apply a reviewer decision to a record: read-modify-write against
    /// the persisted form, never a cached snapshot.
    ///
    /// Enforces the status state machine and stamps `respondedAt`.
    /// Returns the updated record.
    pub fn respond(
        &self,
        id: Uuid,
        status: ApprovalStatus,
        response: Option<String>,
        annotations: Option<String>,
        comments: Vec<Comment>,
    ) -> Result<ApprovalRecord, ApprovalError> {
        let mut record = self.get(id)?.ok_or(ApprovalError::NotFound(id))?;
        record.respond(status, response, annotations, comments)?;
        self.write_record(&record)?;
        tracing::debug!(id = %id, status = %record.status, "approval record responded");
        Ok(record)
    }

    /// Remove a record if present. Returns whether a removal occurred.
    ///
    /// Deletion here is unconditional; the "only approved records may be
    /// deleted" policy belongs to the request handler layer, so the
    /// dashboard's human-operated reset tooling can bypass it.
    pub fn delete(&self, id: Uuid) -> Result<bool, ApprovalError> {
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(id = %id, "approval record deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ApprovalError::Io { path, source }),
        }
    }

    /// List all records in the store, newest first.
    ///
    /// Enumeration is not a consistent snapshot: records another process
    /// deletes mid-scan are skipped, and corrupt records are skipped
    /// with a warning rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<ApprovalRecord>, ApprovalError> {
        let mut records = Vec::new();
        if !self.approvals_dir.exists() {
            return Ok(records);
        }

        let entries = fs::read_dir(&self.approvals_dir).map_err(|source| ApprovalError::Io {
            path: self.approvals_dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| ApprovalError::Io {
                path: self.approvals_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) => {
                    // Deleted between read_dir and read, or unreadable.
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable approval record");
                    continue;
                }
            };
            match codec::decode(&json, &path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping corrupt approval record");
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Persist a record via write-to-temp-then-rename, so a reader in
    /// another process never observes a half-written file.
    fn write_record(&self, record: &ApprovalRecord) -> Result<(), ApprovalError> {
        let path = self.record_path(record.id);
        let json = codec::encode(record)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| ApprovalError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| ApprovalError::Io { path, source })
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.approvals_dir.join(format!("{}.json", id))
    }
}
