mod config;
mod rules;

pub use config::ScoringConfig;

use super::domain::{Candidate, CandidateId, MaintenanceRequest};
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the configured weight table to one
/// (request, candidate) pair. No I/O, no hidden state between calls.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, request: &MaintenanceRequest, candidate: &Candidate) -> ScoreBreakdown {
        let (components, raw_total) = rules::score_candidate(request, candidate, &self.config);
        let score = raw_total.clamp(0, 100) as u8;

        ScoreBreakdown {
            candidate_id: candidate.id.clone(),
            score,
            components,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Named factor behind a score adjustment, kept for transparent audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFactor {
    Workload,
    Availability,
    CategoryExpertise,
    Proximity,
    SelfAssignment,
    Performance,
}

/// Discrete contribution to a candidate's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoringFactor,
    pub points: i16,
    pub reason: String,
}

/// Full scoring output for one candidate: the clamped score plus the ordered
/// component trail its display reasons are derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub candidate_id: CandidateId,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn reasons(&self) -> Vec<String> {
        self.components
            .iter()
            .map(|component| component.reason.clone())
            .collect()
    }
}
