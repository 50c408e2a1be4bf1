use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for maintenance requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for assignable candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Urgency tier attached to a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    Urgent,
    Emergency,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::Urgent => "urgent",
            Priority::Emergency => "emergency",
        }
    }

    /// Parse a wire/CLI label into a priority, `None` for anything unknown.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "urgent" => Some(Priority::Urgent),
            "emergency" => Some(Priority::Emergency),
            _ => None,
        }
    }
}

/// Lifecycle status tracked across the maintenance workflow. This core only
/// drives the `Approved -> Assigned` edge; the rest belongs to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Draft,
    PendingApproval,
    Approved,
    Assigned,
    InProgress,
    Resolved,
    Closed,
    Rejected,
}

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RequestStatus::Draft => "draft",
            RequestStatus::PendingApproval => "pending_approval",
            RequestStatus::Approved => "approved",
            RequestStatus::Assigned => "assigned",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Resolved => "resolved",
            RequestStatus::Closed => "closed",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// Snapshot of a maintenance request as supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: RequestId,
    pub category: String,
    pub priority: Priority,
    pub status: RequestStatus,
    pub property_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub location_tags: BTreeSet<String>,
    pub reported_on: NaiveDate,
}

/// Kind of assignee under consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateType {
    Caretaker,
    Artisan,
    LandlordSelf,
}

impl CandidateType {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateType::Caretaker => "caretaker",
            CandidateType::Artisan => "artisan",
            CandidateType::LandlordSelf => "landlord_self",
        }
    }
}

/// Historical performance block, present for artisans with a track record.
/// Missing metrics are skipped during scoring rather than treated as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_rate_pct: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time_rate_pct: Option<u8>,
    #[serde(default)]
    pub total_completed: u32,
}

/// An assignee eligible for a maintenance request. Candidates are supplied
/// fresh per ranking call; the advisor never mutates or stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub candidate_type: CandidateType,
    #[serde(default)]
    pub current_assignment_count: u32,
    pub is_available: bool,
    #[serde(default)]
    pub category_expertise: BTreeSet<String>,
    #[serde(default)]
    pub location_tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceSnapshot>,
}

/// A scored, ranked recommendation of one candidate for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub candidate_id: CandidateId,
    pub candidate_type: CandidateType,
    pub name: String,
    pub score: u8,
    pub reasons: Vec<String>,
    pub current_assignment_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceSnapshot>,
}

/// Caller-supplied extras accompanying a commit. `priority_override` arrives
/// as a raw label so the committer owns its validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_override: Option<String>,
}

/// The committed record linking a request to its chosen assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub request_id: RequestId,
    pub assignee_id: CandidateId,
    pub assignee_type: CandidateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_override: Option<Priority>,
    pub assigned_at: DateTime<Utc>,
}
