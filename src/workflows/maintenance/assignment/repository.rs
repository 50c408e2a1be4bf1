use serde::{Deserialize, Serialize};

use super::committer::AssignmentEvent;
use super::domain::{Assignment, Candidate, MaintenanceRequest, RequestId};

/// Stored view of a request plus its single active assignment. Committing a
/// new assignment replaces the stored one wholesale; any audit trail of prior
/// assignments belongs to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    pub request: MaintenanceRequest,
    pub assignment: Option<Assignment>,
}

impl RequestRecord {
    pub fn status_view(&self) -> RequestStatusView {
        RequestStatusView {
            request_id: self.request.id.clone(),
            status: self.request.status.label(),
            assignee_id: self
                .assignment
                .as_ref()
                .map(|assignment| assignment.assignee_id.clone()),
            assignee_type: self
                .assignment
                .as_ref()
                .map(|assignment| assignment.assignee_type.label()),
        }
    }
}

/// Storage seam for maintenance requests so the service can be exercised in
/// isolation. `update` is the host's compare-and-swap point for serializing
/// concurrent commits against the same request.
pub trait RequestRepository: Send + Sync {
    fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, RepositoryError>;
    fn update(&self, record: RequestRecord) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// The host's candidate pool. The advisor never fetches on its own; eligible
/// candidates for a property and category come through this seam.
pub trait CandidateDirectory: Send + Sync {
    fn list_eligible(
        &self,
        property_id: &str,
        category: &str,
    ) -> Result<Vec<Candidate>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("candidate directory unavailable: {0}")]
    Unavailable(String),
}

/// Outbound seam for the single state-transition event a commit produces.
/// Persistence of the new status and assignee notification happen behind it.
pub trait AssignmentEventPublisher: Send + Sync {
    fn publish(&self, event: AssignmentEvent) -> Result<(), PublishError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized status payload exposed through the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct RequestStatusView {
    pub request_id: RequestId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<super::domain::CandidateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_type: Option<&'static str>,
}
