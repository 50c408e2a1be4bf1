use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Assignment, AssignmentOptions, Candidate, CandidateId, MaintenanceRequest, Priority, RequestId,
    RequestStatus,
};
use super::ranking::SuggestionRanker;

/// Validation failures raised while committing an assignment. All are local,
/// deterministic outcomes; nothing here is transient or retriable and no
/// partial mutation ever needs rolling back.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("request must be {} to accept an assignment, found {}", .required.label(), .actual.label())]
    InvalidState {
        required: RequestStatus,
        actual: RequestStatus,
    },
    #[error("candidate '{0}' is not in the supplied pool")]
    UnknownCandidate(CandidateId),
    #[error("scheduled date {scheduled} is before {today}")]
    InvalidSchedule {
        scheduled: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },
    #[error("'{0}' is not a valid priority")]
    InvalidPriority(String),
    #[error("no eligible candidate is available for auto-assignment")]
    NoEligibleCandidate,
}

/// The single state-transition event produced by a successful commit, handed
/// to the host for persistence and assignee notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentEvent {
    pub request_id: RequestId,
    pub from: RequestStatus,
    pub to: RequestStatus,
    pub assignee_id: CandidateId,
    pub assigned_at: DateTime<Utc>,
}

/// Everything a successful commit yields: the assignment record, the status
/// the request transitions to, and the one event the host must act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub assignment: Assignment,
    pub new_status: RequestStatus,
    pub event: AssignmentEvent,
}

/// Validate and build the assignment for an explicitly chosen candidate.
///
/// Pure: the clock arrives as a value and no collaborator is touched. The
/// caller is responsible for serializing concurrent commits against the same
/// request; the repository update is the compare-and-swap point.
pub fn commit(
    request: &MaintenanceRequest,
    candidates: &[Candidate],
    chosen_id: &CandidateId,
    options: AssignmentOptions,
    now: DateTime<Utc>,
) -> Result<CommitOutcome, CommitError> {
    if request.status != RequestStatus::Approved {
        return Err(CommitError::InvalidState {
            required: RequestStatus::Approved,
            actual: request.status,
        });
    }

    let chosen = candidates
        .iter()
        .find(|candidate| &candidate.id == chosen_id)
        .ok_or_else(|| CommitError::UnknownCandidate(chosen_id.clone()))?;

    let today = now.date_naive();
    if let Some(scheduled) = options.scheduled_date {
        if scheduled < today {
            return Err(CommitError::InvalidSchedule { scheduled, today });
        }
    }

    let priority_override = match options.priority_override {
        Some(raw) => Some(parse_priority(&raw)?),
        None => None,
    };

    let assignment = Assignment {
        request_id: request.id.clone(),
        assignee_id: chosen.id.clone(),
        assignee_type: chosen.candidate_type,
        note: options.note,
        scheduled_date: options.scheduled_date,
        priority_override,
        assigned_at: now,
    };

    let event = AssignmentEvent {
        request_id: request.id.clone(),
        from: request.status,
        to: RequestStatus::Assigned,
        assignee_id: assignment.assignee_id.clone(),
        assigned_at: now,
    };

    Ok(CommitOutcome {
        assignment,
        new_status: RequestStatus::Assigned,
        event,
    })
}

/// Rank the pool and commit the top suggestion in one step.
pub fn auto_commit(
    request: &MaintenanceRequest,
    candidates: &[Candidate],
    ranker: &SuggestionRanker,
    options: AssignmentOptions,
    now: DateTime<Utc>,
) -> Result<CommitOutcome, CommitError> {
    let top = ranker
        .top(request, candidates)
        .ok_or(CommitError::NoEligibleCandidate)?;

    commit(request, candidates, &top.candidate_id, options, now)
}

fn parse_priority(raw: &str) -> Result<Priority, CommitError> {
    Priority::parse_label(raw).ok_or_else(|| CommitError::InvalidPriority(raw.to_string()))
}
