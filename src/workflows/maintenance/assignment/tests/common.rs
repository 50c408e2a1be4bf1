use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::maintenance::assignment::committer::AssignmentEvent;
use crate::workflows::maintenance::assignment::domain::{
    Candidate, CandidateId, CandidateType, MaintenanceRequest, PerformanceSnapshot, Priority,
    RequestId, RequestStatus,
};
use crate::workflows::maintenance::assignment::repository::{
    AssignmentEventPublisher, CandidateDirectory, DirectoryError, PublishError, RepositoryError,
    RequestRecord, RequestRepository,
};
use crate::workflows::maintenance::assignment::scoring::{ScoringConfig, ScoringEngine};
use crate::workflows::maintenance::assignment::{
    assignment_router, MaintenanceAssignmentService, SuggestionRanker,
};

pub(super) fn plumbing_request() -> MaintenanceRequest {
    request_with_status(RequestStatus::Approved)
}

pub(super) fn request_with_status(status: RequestStatus) -> MaintenanceRequest {
    MaintenanceRequest {
        id: RequestId("req-1001".to_string()),
        category: "plumbing".to_string(),
        priority: Priority::Urgent,
        status,
        property_id: "prop-7".to_string(),
        unit_id: Some("B-12".to_string()),
        location_tags: tags(&["riverside"]),
        reported_on: NaiveDate::from_ymd_opt(2026, 8, 20).expect("valid date"),
    }
}

pub(super) fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn caretaker(id: &str, open: u32, available: bool) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: format!("Caretaker {id}"),
        candidate_type: CandidateType::Caretaker,
        current_assignment_count: open,
        is_available: available,
        category_expertise: BTreeSet::new(),
        location_tags: BTreeSet::new(),
        performance: None,
    }
}

pub(super) fn artisan(id: &str, open: u32, rating: Option<f32>) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: format!("Artisan {id}"),
        candidate_type: CandidateType::Artisan,
        current_assignment_count: open,
        is_available: true,
        category_expertise: tags(&["plumbing"]),
        location_tags: BTreeSet::new(),
        performance: Some(PerformanceSnapshot {
            average_rating: rating,
            completion_rate_pct: Some(92),
            on_time_rate_pct: Some(88),
            total_completed: 120,
        }),
    }
}

pub(super) fn landlord_self(id: &str) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: "Landlord".to_string(),
        candidate_type: CandidateType::LandlordSelf,
        current_assignment_count: 7,
        is_available: true,
        category_expertise: tags(&["plumbing"]),
        location_tags: tags(&["riverside"]),
        performance: None,
    }
}

pub(super) fn default_pool() -> Vec<Candidate> {
    vec![
        caretaker("c1", 1, true),
        caretaker("c2", 4, true),
        caretaker("c4", 0, false),
        landlord_self("c3"),
    ]
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default())
}

pub(super) fn ranker() -> SuggestionRanker {
    SuggestionRanker::default()
}

pub(super) fn build_service() -> (
    MaintenanceAssignmentService<MemoryRepository, MemoryDirectory, MemoryEvents>,
    Arc<MemoryRepository>,
    Arc<MemoryEvents>,
) {
    build_service_with(plumbing_request(), default_pool())
}

pub(super) fn build_service_with(
    request: MaintenanceRequest,
    pool: Vec<Candidate>,
) -> (
    MaintenanceAssignmentService<MemoryRepository, MemoryDirectory, MemoryEvents>,
    Arc<MemoryRepository>,
    Arc<MemoryEvents>,
) {
    let repository = Arc::new(MemoryRepository::default());
    repository
        .seed(RequestRecord {
            request,
            assignment: None,
        })
        .expect("seed request");

    let directory = Arc::new(MemoryDirectory { pool });
    let events = Arc::new(MemoryEvents::default());
    let service = MaintenanceAssignmentService::new(
        repository.clone(),
        directory,
        events.clone(),
        ScoringConfig::default(),
    );
    (service, repository, events)
}

pub(super) fn service_router(
    service: MaintenanceAssignmentService<MemoryRepository, MemoryDirectory, MemoryEvents>,
) -> axum::Router {
    assignment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RequestId, RequestRecord>>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, record: RequestRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.request.id.clone(), record);
        Ok(())
    }

    pub(super) fn stored(&self, id: &RequestId) -> Option<RequestRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl RequestRepository for MemoryRepository {
    fn fetch(&self, id: &RequestId) -> Result<Option<RequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, record: RequestRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.request.id.clone(), record);
        Ok(())
    }
}

pub(super) struct MemoryDirectory {
    pub(super) pool: Vec<Candidate>,
}

impl CandidateDirectory for MemoryDirectory {
    fn list_eligible(
        &self,
        _property_id: &str,
        _category: &str,
    ) -> Result<Vec<Candidate>, DirectoryError> {
        Ok(self.pool.clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<AssignmentEvent>>>,
}

impl MemoryEvents {
    pub(super) fn published(&self) -> Vec<AssignmentEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl AssignmentEventPublisher for MemoryEvents {
    fn publish(&self, event: AssignmentEvent) -> Result<(), PublishError> {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl RequestRepository for UnavailableRepository {
    fn fetch(&self, _id: &RequestId) -> Result<Option<RequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: RequestRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingEvents;

impl AssignmentEventPublisher for FailingEvents {
    fn publish(&self, _event: AssignmentEvent) -> Result<(), PublishError> {
        Err(PublishError::Transport("broker offline".to_string()))
    }
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
