//! Maintenance assignment advisory: deterministic candidate ranking plus a
//! guarded `approved -> assigned` commit step.
//!
//! Ranking is pure and side-effect free so hosts can display suggestions
//! without committing anything; the commit path is the only place a state
//! transition happens, and it produces exactly one event for the host's
//! persistence and notification machinery.

pub mod committer;
pub mod domain;
pub mod ranking;
pub mod repository;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use committer::{AssignmentEvent, CommitError, CommitOutcome};
pub use domain::{
    Assignment, AssignmentOptions, Candidate, CandidateId, CandidateType, MaintenanceRequest,
    PerformanceSnapshot, Priority, RequestId, RequestStatus, Suggestion,
};
pub use ranking::SuggestionRanker;
pub use repository::{
    AssignmentEventPublisher, CandidateDirectory, DirectoryError, PublishError, RepositoryError,
    RequestRecord, RequestRepository, RequestStatusView,
};
pub use roster::RosterImportError;
pub use router::assignment_router;
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoringConfig, ScoringEngine, ScoringFactor};
pub use service::{AssignmentServiceError, MaintenanceAssignmentService};
