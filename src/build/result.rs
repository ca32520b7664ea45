//! Build result types.
//!
//! Contains types for representing the outcome of build operations.

use super::Phase;
use std::time::Duration;

/// Status of a single build phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Phase succeeded
    Success,
    /// Phase not executed (dry run, or disabled)
    Skipped,
    /// Phase failed with error
    Failed(String),
}

impl BuildStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success | BuildStatus::Skipped)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, BuildStatus::Failed(_))
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Skipped => write!(f, "skipped"),
            BuildStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of running a single phase.
#[derive(Debug, Clone)]
pub struct PhaseResult {
    pub phase: Phase,
    pub status: BuildStatus,
    pub duration: Duration,
    /// Short human-readable note, e.g. "removed 2 directories"
    pub detail: Option<String>,
}

impl PhaseResult {
    /// Create a successful result.
    pub fn success(phase: Phase, duration: Duration) -> Self {
        Self { phase, status: BuildStatus::Success, duration, detail: None }
    }

    /// Create a skipped result.
    pub fn skipped(phase: Phase) -> Self {
        Self { phase, status: BuildStatus::Skipped, duration: Duration::ZERO, detail: None }
    }

    /// Create a failed result.
    pub fn failed(phase: Phase, error: String, duration: Duration) -> Self {
        Self { phase, status: BuildStatus::Failed(error), duration, detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Result of a complete build run.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// Results for each executed phase, in execution order
    pub phases: Vec<PhaseResult>,
    /// Total build duration
    pub total_duration: Duration,
}

impl BuildResult {
    /// Create a new empty build result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phase result.
    pub fn add_result(&mut self, result: PhaseResult) {
        self.phases.push(result);
    }

    /// Phases in the order they ran.
    pub fn executed(&self) -> Vec<Phase> {
        self.phases.iter().map(|r| r.phase).collect()
    }

    /// Get the number of successful phases.
    pub fn success_count(&self) -> usize {
        self.phases.iter().filter(|r| matches!(r.status, BuildStatus::Success)).count()
    }

    /// Get the number of skipped phases.
    pub fn skipped_count(&self) -> usize {
        self.phases.iter().filter(|r| matches!(r.status, BuildStatus::Skipped)).count()
    }

    /// Get the number of failed phases.
    pub fn failed_count(&self) -> usize {
        self.phases.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Check if the overall build succeeded (no failures).
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        let success = self.success_count();
        if success > 0 {
            parts.push(format!("{} completed", success));
        }

        let skipped = self.skipped_count();
        if skipped > 0 {
            parts.push(format!("{} skipped", skipped));
        }

        let failed = self.failed_count();
        if failed > 0 {
            parts.push(format!("{} failed", failed));
        }

        let status = if self.is_success() { "Build succeeded" } else { "Build failed" };

        if parts.is_empty() {
            format!("{}: no phases in {:?}", status, self.total_duration)
        } else {
            format!("{}: {} in {:?}", status, parts.join(", "), self.total_duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_status_success() {
        assert!(BuildStatus::Success.is_success());
        assert!(BuildStatus::Skipped.is_success());
        assert!(!BuildStatus::Failed("error".to_string()).is_success());
    }

    #[test]
    fn test_build_status_display() {
        assert_eq!(BuildStatus::Success.to_string(), "success");
        assert_eq!(BuildStatus::Failed("exit 1".to_string()).to_string(), "failed: exit 1");
    }

    #[test]
    fn test_build_result_counts() {
        let mut result = BuildResult::new();
        result.add_result(PhaseResult::success(Phase::Clean, Duration::from_millis(3)));
        result.add_result(PhaseResult::skipped(Phase::Install));
        result.add_result(PhaseResult::failed(
            Phase::Styles,
            "tailwind missing".to_string(),
            Duration::ZERO,
        ));

        assert_eq!(result.success_count(), 1);
        assert_eq!(result.skipped_count(), 1);
        assert_eq!(result.failed_count(), 1);
        assert!(!result.is_success());
        assert_eq!(result.executed(), vec![Phase::Clean, Phase::Install, Phase::Styles]);
    }

    #[test]
    fn test_build_result_summary() {
        let mut result = BuildResult::new();
        result.add_result(PhaseResult::success(Phase::Clean, Duration::ZERO));
        result.add_result(PhaseResult::success(Phase::Generate, Duration::ZERO));

        let summary = result.summary();
        assert!(summary.starts_with("Build succeeded: 2 completed"));

        let empty = BuildResult::new();
        assert!(empty.summary().contains("no phases"));
    }

    #[test]
    fn test_phase_result_detail() {
        let result = PhaseResult::success(Phase::Clean, Duration::ZERO).with_detail("removed 1");
        assert_eq!(result.detail.as_deref(), Some("removed 1"));
        assert!(result.is_success());
    }
}
