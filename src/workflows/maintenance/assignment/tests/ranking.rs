use super::common::*;
use crate::workflows::maintenance::assignment::domain::CandidateId;

#[test]
fn ranks_caretakers_by_score() {
    let suggestions = ranker().rank(&plumbing_request(), &default_pool());

    // c1 (80), c2 (70), landlord self (30); c4 is unavailable.
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].candidate_id, CandidateId("c1".to_string()));
    assert_eq!(suggestions[0].score, 80);
    assert_eq!(suggestions[1].candidate_id, CandidateId("c2".to_string()));
    assert_eq!(suggestions[1].score, 70);
    assert_eq!(suggestions[2].candidate_id, CandidateId("c3".to_string()));
    assert_eq!(suggestions[2].score, 30);
}

#[test]
fn unavailable_candidates_never_appear() {
    let suggestions = ranker().rank(&plumbing_request(), &default_pool());

    assert!(suggestions
        .iter()
        .all(|suggestion| suggestion.candidate_id != CandidateId("c4".to_string())));
}

#[test]
fn empty_pool_yields_empty_list() {
    let suggestions = ranker().rank(&plumbing_request(), &[]);
    assert!(suggestions.is_empty());
}

#[test]
fn all_unavailable_pool_yields_empty_list() {
    let pool = vec![caretaker("c1", 0, false), caretaker("c2", 2, false)];
    let suggestions = ranker().rank(&plumbing_request(), &pool);
    assert!(suggestions.is_empty());
}

#[test]
fn equal_scores_break_ties_by_workload_then_id() {
    // Both score 80 (low workload + available); workloads 2 vs 1.
    let pool = vec![caretaker("z-heavier", 2, true), caretaker("a-lighter", 1, true)];
    let suggestions = ranker().rank(&plumbing_request(), &pool);

    assert_eq!(suggestions[0].candidate_id, CandidateId("a-lighter".to_string()));
    assert_eq!(suggestions[1].candidate_id, CandidateId("z-heavier".to_string()));

    // Same score and workload: lexicographic id decides.
    let pool = vec![caretaker("beta", 1, true), caretaker("alpha", 1, true)];
    let suggestions = ranker().rank(&plumbing_request(), &pool);

    assert_eq!(suggestions[0].candidate_id, CandidateId("alpha".to_string()));
    assert_eq!(suggestions[1].candidate_id, CandidateId("beta".to_string()));
}

#[test]
fn ranking_is_deterministic() {
    let request = plumbing_request();
    let pool = default_pool();
    let ranker = ranker();

    let first = ranker.rank(&request, &pool);
    let second = ranker.rank(&request, &pool);

    assert_eq!(first, second);
}

#[test]
fn output_is_monotone_in_the_total_order() {
    let request = plumbing_request();
    let mut pool = default_pool();
    pool.push(artisan("a1", 4, Some(4.5)));
    pool.push(artisan("a2", 4, None));

    let suggestions = ranker().rank(&request, &pool);

    for pair in suggestions.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        assert!(left.score >= right.score);
        if left.score == right.score {
            assert!(left.current_assignment_count <= right.current_assignment_count);
            if left.current_assignment_count == right.current_assignment_count {
                assert!(left.candidate_id < right.candidate_id);
            }
        }
    }
}

#[test]
fn top_returns_the_first_suggestion() {
    let request = plumbing_request();
    let pool = default_pool();
    let ranker = ranker();

    let top = ranker.top(&request, &pool).expect("pool is non-empty");
    assert_eq!(top.candidate_id, CandidateId("c1".to_string()));

    assert!(ranker.top(&request, &[]).is_none());
}

#[test]
fn suggestions_echo_workload_and_performance_for_display() {
    let request = plumbing_request();
    let pool = vec![artisan("a1", 4, Some(4.5))];

    let suggestions = ranker().rank(&request, &pool);

    assert_eq!(suggestions[0].current_assignment_count, 4);
    let performance = suggestions[0]
        .performance
        .as_ref()
        .expect("performance echoed");
    assert_eq!(performance.completion_rate_pct, Some(92));
}
