// context.rs — Ambient context supplied to request handlers.
//
// The `status` and `delete` actions may omit `projectPath`, falling back
// to a value the hosting process configured up front. The fallback is
// explicit: explicit parameter, else ambient value, else a structured
// failure — no hidden global lookups inside the store.

use std::path::PathBuf;

use crate::error::HandlerError;

/// Context owned by the hosting process and passed to every handler.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Ambient project root, used when an action omits `projectPath`.
    pub project_path: Option<PathBuf>,

    /// Dashboard URL for human follow-up, if a dashboard is running.
    pub dashboard_url: Option<String>,
}

impl ToolContext {
    /// Create an empty context (no ambient project, no dashboard).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient project path.
    pub fn with_project_path(mut self, project_path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(project_path.into());
        self
    }

    /// Set the dashboard URL.
    pub fn with_dashboard_url(mut self, dashboard_url: impl Into<String>) -> Self {
        self.dashboard_url = Some(dashboard_url.into());
        self
    }

    /// Resolve the project path for one action: the explicit parameter
    /// wins, then the ambient value, otherwise the action fails.
    pub fn resolve_project_path(&self, explicit: Option<&str>) -> Result<PathBuf, HandlerError> {
        if let Some(path) = explicit {
            return Ok(PathBuf::from(path));
        }
        self.project_path
            .clone()
            .ok_or(HandlerError::MissingProjectPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins_over_ambient() {
        let ctx = ToolContext::new().with_project_path("/ambient/project");
        let resolved = ctx.resolve_project_path(Some("/explicit/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/explicit/project"));
    }

    #[test]
    fn ambient_path_used_when_explicit_absent() {
        let ctx = ToolContext::new().with_project_path("/ambient/project");
        let resolved = ctx.resolve_project_path(None).unwrap();
        assert_eq!(resolved, PathBuf::from("/ambient/project"));
    }

    #[test]
    fn neither_path_is_a_failure() {
        let ctx = ToolContext::new();
        let result = ctx.resolve_project_path(None);
        assert!(matches!(result, Err(HandlerError::MissingProjectPath)));
    }
}
