use super::super::domain::{Candidate, CandidateType, MaintenanceRequest};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoringFactor};

/// Apply the ordered adjustment rules for one (request, candidate) pair.
///
/// Each rule contributes at most one `ScoreComponent`; the returned total is
/// the raw sum before clamping. Self-assignment short-circuits every other
/// rule with a fixed score.
pub(crate) fn score_candidate(
    request: &MaintenanceRequest,
    candidate: &Candidate,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, i16) {
    if candidate.candidate_type == CandidateType::LandlordSelf {
        let component = ScoreComponent {
            factor: ScoringFactor::SelfAssignment,
            points: config.self_assignment_score,
            reason: "Self-assignment".to_string(),
        };
        return (vec![component], config.self_assignment_score);
    }

    let mut components = Vec::new();
    let mut total = config.base_score;

    if candidate.current_assignment_count < config.low_workload_ceiling {
        components.push(ScoreComponent {
            factor: ScoringFactor::Workload,
            points: config.low_workload_bonus,
            reason: "Low workload".to_string(),
        });
        total += config.low_workload_bonus;
    } else if candidate.current_assignment_count < config.moderate_workload_ceiling {
        components.push(ScoreComponent {
            factor: ScoringFactor::Workload,
            points: config.moderate_workload_bonus,
            reason: "Moderate workload".to_string(),
        });
        total += config.moderate_workload_bonus;
    }
    // A heavy workload earns no component at all; the penalty is the omission.

    if candidate.is_available {
        components.push(ScoreComponent {
            factor: ScoringFactor::Availability,
            points: config.availability_bonus,
            reason: "Available".to_string(),
        });
        total += config.availability_bonus;
    }

    if candidate.category_expertise.contains(&request.category) {
        components.push(ScoreComponent {
            factor: ScoringFactor::CategoryExpertise,
            points: config.expertise_bonus,
            reason: "Category expertise match".to_string(),
        });
        total += config.expertise_bonus;
    }

    if candidate
        .location_tags
        .intersection(&request.location_tags)
        .next()
        .is_some()
    {
        components.push(ScoreComponent {
            factor: ScoringFactor::Proximity,
            points: config.proximity_bonus,
            reason: "Located near property".to_string(),
        });
        total += config.proximity_bonus;
    }

    if candidate.candidate_type == CandidateType::Artisan {
        if let Some(performance) = &candidate.performance {
            if let Some(rating) = performance.average_rating {
                if rating.is_finite() && rating >= 0.0 {
                    let bonus = ((rating * config.rating_multiplier) as i16)
                        .min(config.performance_bonus_cap);
                    components.push(ScoreComponent {
                        factor: ScoringFactor::Performance,
                        points: bonus,
                        reason: format!("Rating: {rating:.1}"),
                    });
                    total += bonus;
                }
            }
            if let Some(completion) = performance.completion_rate_pct {
                components.push(ScoreComponent {
                    factor: ScoringFactor::Performance,
                    points: 0,
                    reason: format!("{completion}% completion"),
                });
            }
            if let Some(on_time) = performance.on_time_rate_pct {
                components.push(ScoreComponent {
                    factor: ScoringFactor::Performance,
                    points: 0,
                    reason: format!("{on_time}% on-time"),
                });
            }
        }
    }

    (components, total)
}
