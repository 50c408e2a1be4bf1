use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::committer::{self, CommitError, CommitOutcome};
use super::domain::{AssignmentOptions, CandidateId, RequestId, Suggestion};
use super::ranking::SuggestionRanker;
use super::repository::{
    AssignmentEventPublisher, CandidateDirectory, DirectoryError, PublishError, RepositoryError,
    RequestRecord, RequestRepository,
};
use super::scoring::ScoringConfig;

/// Service composing the ranker, the pure committer, and the host seams.
///
/// Ranking never touches storage; a commit performs exactly one repository
/// update and publishes exactly one transition event.
pub struct MaintenanceAssignmentService<R, C, P> {
    repository: Arc<R>,
    directory: Arc<C>,
    events: Arc<P>,
    ranker: Arc<SuggestionRanker>,
}

impl<R, C, P> MaintenanceAssignmentService<R, C, P>
where
    R: RequestRepository + 'static,
    C: CandidateDirectory + 'static,
    P: AssignmentEventPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<C>,
        events: Arc<P>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            repository,
            directory,
            events,
            ranker: Arc::new(SuggestionRanker::new(config)),
        }
    }

    pub fn ranker(&self) -> &SuggestionRanker {
        &self.ranker
    }

    /// Ranked suggestions for a stored request. Read-only; safe to call
    /// repeatedly and from concurrent handlers.
    pub fn suggestions(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<Suggestion>, AssignmentServiceError> {
        let record = self.fetch_record(request_id)?;
        let candidates = self
            .directory
            .list_eligible(&record.request.property_id, &record.request.category)?;

        Ok(self.ranker.rank(&record.request, &candidates))
    }

    /// Commit a manually chosen candidate.
    pub fn assign(
        &self,
        request_id: &RequestId,
        candidate_id: &CandidateId,
        options: AssignmentOptions,
    ) -> Result<RequestRecord, AssignmentServiceError> {
        let record = self.fetch_record(request_id)?;
        let candidates = self
            .directory
            .list_eligible(&record.request.property_id, &record.request.category)?;

        let outcome = committer::commit(
            &record.request,
            &candidates,
            candidate_id,
            options,
            Utc::now(),
        )?;

        self.apply(record, outcome)
    }

    /// Rank and commit the top suggestion in one step.
    pub fn auto_assign(
        &self,
        request_id: &RequestId,
        options: AssignmentOptions,
    ) -> Result<RequestRecord, AssignmentServiceError> {
        let record = self.fetch_record(request_id)?;
        let candidates = self
            .directory
            .list_eligible(&record.request.property_id, &record.request.category)?;

        let outcome = committer::auto_commit(
            &record.request,
            &candidates,
            &self.ranker,
            options,
            Utc::now(),
        )?;

        self.apply(record, outcome)
    }

    /// Fetch a request and its current assignment for API responses.
    pub fn get(&self, request_id: &RequestId) -> Result<RequestRecord, AssignmentServiceError> {
        self.fetch_record(request_id)
    }

    fn fetch_record(&self, request_id: &RequestId) -> Result<RequestRecord, AssignmentServiceError> {
        let record = self
            .repository
            .fetch(request_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn apply(
        &self,
        mut record: RequestRecord,
        outcome: CommitOutcome,
    ) -> Result<RequestRecord, AssignmentServiceError> {
        record.request.status = outcome.new_status;
        record.assignment = Some(outcome.assignment);

        self.repository.update(record.clone())?;
        self.events.publish(outcome.event.clone())?;

        info!(
            request_id = %outcome.event.request_id,
            assignee_id = %outcome.event.assignee_id,
            "maintenance request assigned"
        );

        Ok(record)
    }
}

/// Error raised by the assignment service.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentServiceError {
    #[error(transparent)]
    Commit(#[from] CommitError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
