use super::domain::{Candidate, MaintenanceRequest, Suggestion};
use super::scoring::{ScoringConfig, ScoringEngine};

/// Produces the ranked suggestion list for a request over a candidate pool.
///
/// Pure and idempotent: identical inputs always yield the identical list, and
/// the sort is a total order (score descending, then open workload ascending,
/// then candidate id ascending) so ties never reorder between calls.
pub struct SuggestionRanker {
    engine: ScoringEngine,
}

impl SuggestionRanker {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            engine: ScoringEngine::new(config),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Rank all available candidates for the request. Unavailable candidates
    /// are excluded outright rather than scored low; an empty pool yields an
    /// empty list, never an error.
    pub fn rank(&self, request: &MaintenanceRequest, candidates: &[Candidate]) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = candidates
            .iter()
            .filter(|candidate| candidate.is_available)
            .map(|candidate| {
                let breakdown = self.engine.score(request, candidate);
                Suggestion {
                    candidate_id: candidate.id.clone(),
                    candidate_type: candidate.candidate_type,
                    name: candidate.name.clone(),
                    score: breakdown.score,
                    reasons: breakdown.reasons(),
                    current_assignment_count: candidate.current_assignment_count,
                    performance: candidate.performance.clone(),
                }
            })
            .collect();

        suggestions.sort_by(|left, right| {
            right
                .score
                .cmp(&left.score)
                .then_with(|| {
                    left.current_assignment_count
                        .cmp(&right.current_assignment_count)
                })
                .then_with(|| left.candidate_id.cmp(&right.candidate_id))
        });

        suggestions
    }

    /// The top-ranked suggestion, if any candidate is available.
    pub fn top(
        &self,
        request: &MaintenanceRequest,
        candidates: &[Candidate],
    ) -> Option<Suggestion> {
        self.rank(request, candidates).into_iter().next()
    }
}

impl Default for SuggestionRanker {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
