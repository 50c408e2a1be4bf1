use serde::{Deserialize, Serialize};

/// Weight table for the suggestion score. The numbers mirror the dispatch
/// team's current heuristics and are expected to be retuned; nothing in the
/// rules depends on their exact values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score: i16,
    pub low_workload_ceiling: u32,
    pub low_workload_bonus: i16,
    pub moderate_workload_ceiling: u32,
    pub moderate_workload_bonus: i16,
    pub availability_bonus: i16,
    pub expertise_bonus: i16,
    pub proximity_bonus: i16,
    pub self_assignment_score: i16,
    pub rating_multiplier: f32,
    pub performance_bonus_cap: i16,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            low_workload_ceiling: 3,
            low_workload_bonus: 20,
            moderate_workload_ceiling: 5,
            moderate_workload_bonus: 10,
            availability_bonus: 10,
            expertise_bonus: 15,
            proximity_bonus: 10,
            self_assignment_score: 30,
            rating_multiplier: 4.0,
            performance_bonus_cap: 20,
        }
    }
}
