//! Fairness/diversity reranking with anti-repeat penalties.
//!
//! Works on pre-sorted (score desc, id asc) candidate lists: adjust
//! scores, re-sort, then admit greedily under per-attribute caps.
//! Quota-constrained top-k selection: O(n log n) for the sort plus a
//! linear greedy pass.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::Utc;

use crate::models::{RecGraph, ScoredPerson, ScoredPost};
use crate::state::ImpressionStore;

pub const MAX_SAME_PRIMARY_CULTURE: usize = 6;
pub const MAX_SAME_PRIMARY_LANGUAGE: usize = 8;
pub const MAX_POSTS_SAME_AUTHOR: usize = 3;

pub const NEW_USER_WINDOW_DAYS: i64 = 14;
pub const NEW_USER_BOOST: f64 = 0.03;

/// Window and penalties for anti-repeat: a candidate inside the viewer's
/// last-50 impressions takes the stronger penalty; one merely shown
/// within the last week takes the weaker. Never both.
pub const RECENT_IMPRESSION_WINDOW: usize = 50;
pub const RECENT_IMPRESSION_PENALTY: f64 = 0.05;
pub const SHOWN_DAYS_WINDOW: i64 = 7;
pub const SHOWN_DAYS_PENALTY: f64 = 0.02;

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

pub fn rerank_people(
    viewer_id: &str,
    scored: Vec<ScoredPerson>,
    impressions: &ImpressionStore,
    limit: usize,
    graph: &RecGraph,
) -> Vec<ScoredPerson> {
    let now = Utc::now();
    let mut adjusted: Vec<ScoredPerson> = Vec::with_capacity(scored.len());

    for sc in scored {
        let Some(candidate) = graph.users.get(&sc.id) else {
            continue;
        };

        let mut score = sc.score;

        let days_since_created =
            (now - candidate.created_at).num_seconds() as f64 / SECONDS_PER_DAY;
        if days_since_created <= NEW_USER_WINDOW_DAYS as f64 {
            score += NEW_USER_BOOST;
        }

        if impressions.is_recently_shown(viewer_id, &sc.id, RECENT_IMPRESSION_WINDOW) {
            score -= RECENT_IMPRESSION_PENALTY;
        } else if impressions.was_shown_within_days(viewer_id, &sc.id, SHOWN_DAYS_WINDOW) {
            score -= SHOWN_DAYS_PENALTY;
        }

        adjusted.push(ScoredPerson {
            id: sc.id,
            score,
            primary_culture: candidate.cultural_backgrounds.first().cloned(),
            primary_language: candidate.languages.first().cloned(),
        });
    }

    adjusted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut result: Vec<ScoredPerson> = Vec::with_capacity(limit.min(adjusted.len()));
    let mut culture_counts: HashMap<String, usize> = HashMap::new();
    let mut language_counts: HashMap<String, usize> = HashMap::new();

    for sc in adjusted {
        if result.len() >= limit {
            break;
        }

        // Cap violators are skipped outright, not deferred.
        if let Some(culture) = &sc.primary_culture {
            if culture_counts.get(culture).copied().unwrap_or(0) >= MAX_SAME_PRIMARY_CULTURE {
                continue;
            }
        }
        if let Some(language) = &sc.primary_language {
            if language_counts.get(language).copied().unwrap_or(0) >= MAX_SAME_PRIMARY_LANGUAGE {
                continue;
            }
        }

        if let Some(culture) = &sc.primary_culture {
            *culture_counts.entry(culture.clone()).or_default() += 1;
        }
        if let Some(language) = &sc.primary_language {
            *language_counts.entry(language.clone()).or_default() += 1;
        }
        result.push(sc);
    }

    result
}

pub fn rerank_posts(
    viewer_id: &str,
    scored: Vec<ScoredPost>,
    impressions: &ImpressionStore,
    limit: usize,
) -> Vec<ScoredPost> {
    let mut adjusted: Vec<ScoredPost> = Vec::with_capacity(scored.len());

    for sc in scored {
        let mut score = sc.score;

        if impressions.is_recently_shown(viewer_id, &sc.id, RECENT_IMPRESSION_WINDOW) {
            score -= RECENT_IMPRESSION_PENALTY;
        } else if impressions.was_shown_within_days(viewer_id, &sc.id, SHOWN_DAYS_WINDOW) {
            score -= SHOWN_DAYS_PENALTY;
        }

        adjusted.push(ScoredPost { score, ..sc });
    }

    adjusted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut result: Vec<ScoredPost> = Vec::with_capacity(limit.min(adjusted.len()));
    let mut author_counts: HashMap<String, usize> = HashMap::new();

    for sc in adjusted {
        if result.len() >= limit {
            break;
        }

        let count = author_counts.entry(sc.author_id.clone()).or_default();
        if *count >= MAX_POSTS_SAME_AUTHOR {
            continue;
        }
        *count += 1;
        result.push(sc);
    }

    result
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::models::UserProfile;

    use super::*;

    fn graph_user(id: &str, cultures: &[&str], languages: &[&str], created_days_ago: i64) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            display_name: id.to_string(),
            age: 23,
            verified_student: true,
            age_verified: true,
            current_city: "Toronto".to_string(),
            destination_city: None,
            cultural_backgrounds: cultures.iter().map(|s| s.to_string()).collect(),
            languages: languages.iter().map(|s| s.to_string()).collect(),
            goals: vec![],
            bio: String::new(),
            created_at: Utc::now() - Duration::days(created_days_ago),
            last_active_at: Utc::now(),
            prefer_near_age: false,
            verified_only: false,
        }
    }

    fn scored_person(id: &str, score: f64) -> ScoredPerson {
        ScoredPerson {
            id: id.to_string(),
            score,
            primary_culture: None,
            primary_language: None,
        }
    }

    #[test]
    fn culture_cap_limits_to_six() {
        let mut graph = RecGraph::default();
        let mut scored = Vec::new();
        for i in 0..10 {
            let id = format!("candidate_{}", i);
            graph
                .users
                .insert(id.clone(), graph_user(&id, &["Indian"], &["English"], 60));
            scored.push(scored_person(&id, 1.0 - i as f64 * 0.01));
        }

        let store = ImpressionStore::new();
        let reranked = rerank_people("viewer", scored, &store, 20, &graph);

        let indian_count = reranked
            .iter()
            .filter(|sc| sc.primary_culture.as_deref() == Some("Indian"))
            .count();
        assert!(indian_count <= MAX_SAME_PRIMARY_CULTURE);
    }

    #[test]
    fn language_cap_limits_to_eight() {
        let mut graph = RecGraph::default();
        let mut scored = Vec::new();
        for i in 0..12 {
            let id = format!("candidate_{}", i);
            let culture = format!("Culture_{}", i);
            graph
                .users
                .insert(id.clone(), graph_user(&id, &[culture.as_str()], &["Hindi"], 60));
            scored.push(scored_person(&id, 1.0 - i as f64 * 0.01));
        }

        let store = ImpressionStore::new();
        let reranked = rerank_people("viewer", scored, &store, 20, &graph);

        let hindi_count = reranked
            .iter()
            .filter(|sc| sc.primary_language.as_deref() == Some("Hindi"))
            .count();
        assert_eq!(hindi_count, MAX_SAME_PRIMARY_LANGUAGE);
    }

    #[test]
    fn recently_shown_candidate_drops_below_fresh_one() {
        let mut graph = RecGraph::default();
        graph
            .users
            .insert("seen".to_string(), graph_user("seen", &["A"], &["En"], 60));
        graph
            .users
            .insert("fresh".to_string(), graph_user("fresh", &["B"], &["Fr"], 60));

        let store = ImpressionStore::new();
        store.record_impression("viewer", "seen");

        let scored = vec![scored_person("seen", 0.90), scored_person("fresh", 0.88)];
        let reranked = rerank_people("viewer", scored, &store, 2, &graph);

        // 0.90 - 0.05 = 0.85 < 0.88
        assert_eq!(reranked[0].id, "fresh");
        assert_eq!(reranked[1].id, "seen");
    }

    #[test]
    fn new_user_boost_lifts_close_scores_only() {
        let mut graph = RecGraph::default();
        graph
            .users
            .insert("old".to_string(), graph_user("old", &["A"], &["En"], 100));
        graph
            .users
            .insert("new".to_string(), graph_user("new", &["B"], &["Fr"], 5));

        let store = ImpressionStore::new();

        // 0.48 + 0.03 > 0.50: the boost flips a narrow gap
        let scored = vec![scored_person("old", 0.50), scored_person("new", 0.48)];
        let reranked = rerank_people("viewer", scored, &store, 2, &graph);
        assert_eq!(reranked[0].id, "new");

        // 0.44 + 0.03 < 0.50: a gap wider than the boost is preserved
        let scored = vec![scored_person("old", 0.50), scored_person("new", 0.44)];
        let reranked = rerank_people("viewer", scored, &store, 2, &graph);
        assert_eq!(reranked[0].id, "old");
    }

    #[test]
    fn dangling_candidate_is_skipped() {
        let graph = RecGraph::default();
        let store = ImpressionStore::new();
        let scored = vec![scored_person("ghost", 0.9)];
        let reranked = rerank_people("viewer", scored, &store, 5, &graph);
        assert!(reranked.is_empty());
    }

    #[test]
    fn limit_truncates_people() {
        let mut graph = RecGraph::default();
        let mut scored = Vec::new();
        for i in 0..10 {
            let id = format!("c{}", i);
            let culture = format!("Cul{}", i);
            let lang = format!("Lang{}", i);
            graph
                .users
                .insert(id.clone(), graph_user(&id, &[culture.as_str()], &[lang.as_str()], 60));
            scored.push(scored_person(&id, 1.0 - i as f64 * 0.01));
        }

        let store = ImpressionStore::new();
        let reranked = rerank_people("viewer", scored, &store, 4, &graph);
        assert_eq!(reranked.len(), 4);
    }

    fn scored_post(id: &str, score: f64, author: &str) -> ScoredPost {
        ScoredPost {
            id: id.to_string(),
            score,
            author_id: author.to_string(),
        }
    }

    #[test]
    fn author_cap_limits_to_three() {
        let store = ImpressionStore::new();
        let mut scored = Vec::new();
        for i in 0..6 {
            scored.push(scored_post(&format!("p{}", i), 1.0 - i as f64 * 0.01, "prolific"));
        }
        scored.push(scored_post("p_other", 0.5, "someone_else"));

        let reranked = rerank_posts("viewer", scored, &store, 10);

        let prolific_count = reranked.iter().filter(|sc| sc.author_id == "prolific").count();
        assert_eq!(prolific_count, MAX_POSTS_SAME_AUTHOR);
        assert!(reranked.iter().any(|sc| sc.id == "p_other"));
    }

    #[test]
    fn post_penalty_reorders_recently_shown() {
        let store = ImpressionStore::new();
        store.record_impression("viewer", "p_seen");

        let scored = vec![
            scored_post("p_seen", 0.60, "a1"),
            scored_post("p_fresh", 0.58, "a2"),
        ];
        let reranked = rerank_posts("viewer", scored, &store, 2);
        assert_eq!(reranked[0].id, "p_fresh");
    }

    #[test]
    fn ties_break_by_id_ascending() {
        let store = ImpressionStore::new();
        let scored = vec![
            scored_post("p_b", 0.5, "a1"),
            scored_post("p_a", 0.5, "a2"),
        ];
        let reranked = rerank_posts("viewer", scored, &store, 2);
        assert_eq!(reranked[0].id, "p_a");
        assert_eq!(reranked[1].id, "p_b");
    }
}
