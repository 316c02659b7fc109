//! Deterministic compatibility scoring.
//!
//! One canonical weight set; scores are a pure function of
//! (viewer, candidate, shared graph state) at call time. The verified
//! bonus is additive headroom on top of the weighted terms, so the
//! maximum attainable person score is 1.05.

use std::collections::{HashMap, HashSet};

use crate::models::{Post, UserProfile};
use crate::services::similarity_service::{
    culture_score, jaccard, language_score, location_score, mutual_friends_score,
    post_location_match, recency_score, RECENCY_WINDOW_DAYS,
};

pub const PERSON_LOCATION_WEIGHT: f64 = 0.30;
pub const PERSON_GOALS_WEIGHT: f64 = 0.25;
pub const PERSON_CULTURE_WEIGHT: f64 = 0.20;
pub const PERSON_LANGUAGE_WEIGHT: f64 = 0.15;
pub const PERSON_MUTUAL_FRIENDS_WEIGHT: f64 = 0.05;
pub const PERSON_RECENCY_WEIGHT: f64 = 0.05;
pub const VERIFIED_STUDENT_BONUS: f64 = 0.05;

pub const POST_FRIEND_AUTHOR_WEIGHT: f64 = 0.35;
pub const POST_FRIEND_LIKES_WEIGHT: f64 = 0.20;
pub const POST_LOCATION_WEIGHT: f64 = 0.20;
pub const POST_GOALS_WEIGHT: f64 = 0.15;
pub const POST_RECENCY_WEIGHT: f64 = 0.10;

pub fn score_person(
    viewer: &UserProfile,
    candidate: &UserProfile,
    friends_graph: &HashMap<String, HashSet<String>>,
) -> f64 {
    let loc = location_score(
        &viewer.current_city,
        viewer.destination_city.as_deref(),
        &candidate.current_city,
        candidate.destination_city.as_deref(),
    );

    let goals = jaccard(&viewer.goals, &candidate.goals);
    let culture = culture_score(&viewer.cultural_backgrounds, &candidate.cultural_backgrounds);
    let lang = language_score(&viewer.languages, &candidate.languages);
    let mutual = mutual_friends_score(&viewer.id, &candidate.id, friends_graph);
    let recent = recency_score(candidate.last_active_at, RECENCY_WINDOW_DAYS);

    let verified_bonus = if candidate.verified_student {
        VERIFIED_STUDENT_BONUS
    } else {
        0.0
    };

    PERSON_LOCATION_WEIGHT * loc
        + PERSON_GOALS_WEIGHT * goals
        + PERSON_CULTURE_WEIGHT * culture
        + PERSON_LANGUAGE_WEIGHT * lang
        + PERSON_MUTUAL_FRIENDS_WEIGHT * mutual
        + PERSON_RECENCY_WEIGHT * recent
        + verified_bonus
}

pub fn score_post(
    viewer: &UserProfile,
    post: &Post,
    author: &UserProfile,
    viewer_friends: &HashSet<String>,
    likers: &HashSet<String>,
) -> f64 {
    let friend_author = if viewer_friends.contains(&post.author_id) {
        1.0
    } else {
        0.0
    };

    let friends_who_liked = likers.intersection(viewer_friends).count();
    let liked_norm = friends_who_liked.min(5) as f64 / 5.0;

    let loc_match = post_location_match(
        &post.coarse_location,
        &viewer.current_city,
        viewer.destination_city.as_deref(),
    );

    let goals_match = jaccard(&viewer.goals, &post.tags);
    let recent = recency_score(post.created_at, RECENCY_WINDOW_DAYS);

    let verified_bonus = if author.verified_student {
        VERIFIED_STUDENT_BONUS
    } else {
        0.0
    };

    POST_FRIEND_AUTHOR_WEIGHT * friend_author
        + POST_FRIEND_LIKES_WEIGHT * liked_norm
        + POST_LOCATION_WEIGHT * loc_match
        + POST_GOALS_WEIGHT * goals_match
        + POST_RECENCY_WEIGHT * recent
        + verified_bonus
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn profile(id: &str, city: &str, dest: Option<&str>) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            display_name: id.to_string(),
            age: 23,
            verified_student: false,
            age_verified: true,
            current_city: city.to_string(),
            destination_city: dest.map(str::to_string),
            cultural_backgrounds: vec![],
            languages: vec![],
            goals: vec![],
            bio: String::new(),
            created_at: Utc::now() - Duration::days(60),
            last_active_at: Utc::now() - Duration::days(30),
            prefer_near_age: false,
            verified_only: false,
        }
    }

    #[test]
    fn person_score_full_alignment_reaches_headroom_max() {
        let mut viewer = profile("v", "Toronto", None);
        viewer.goals = vec!["Friends".to_string()];
        viewer.cultural_backgrounds = vec!["Indian".to_string()];
        viewer.languages = vec!["English".to_string()];

        let mut candidate = profile("c", "Toronto", None);
        candidate.goals = viewer.goals.clone();
        candidate.cultural_backgrounds = viewer.cultural_backgrounds.clone();
        candidate.languages = viewer.languages.clone();
        candidate.verified_student = true;
        candidate.last_active_at = Utc::now();

        let mut friends: HashMap<String, HashSet<String>> = HashMap::new();
        let shared: HashSet<String> = (0..5).map(|i| format!("f{}", i)).collect();
        friends.insert("v".to_string(), shared.clone());
        friends.insert("c".to_string(), shared);

        let score = score_person(&viewer, &candidate, &friends);
        assert!((score - 1.05).abs() < 1e-9);
    }

    #[test]
    fn person_score_zero_when_nothing_aligns() {
        let viewer = profile("v", "Toronto", None);
        let mut candidate = profile("c", "Vancouver", None);
        candidate.last_active_at = Utc::now() - Duration::days(30);

        let friends = HashMap::new();
        assert_eq!(score_person(&viewer, &candidate, &friends), 0.0);
    }

    #[test]
    fn person_score_weighs_location_highest() {
        let viewer = profile("v", "Toronto", Some("Montreal"));
        let same_city = profile("a", "Toronto", None);
        let mut shared_goal = profile("b", "Winnipeg", None);
        shared_goal.goals = vec!["Friends".to_string()];

        let mut viewer_with_goal = viewer.clone();
        viewer_with_goal.goals = vec!["Friends".to_string()];

        let friends = HashMap::new();
        let loc_score = score_person(&viewer, &same_city, &friends);
        let goal_score = score_person(&viewer_with_goal, &shared_goal, &friends);

        assert!(loc_score > goal_score);
    }

    #[test]
    fn post_score_friend_author_dominates() {
        let viewer = profile("v", "Toronto", None);
        let author = profile("a", "Calgary", None);
        let post = Post {
            id: "p".to_string(),
            author_id: "a".to_string(),
            text: String::new(),
            created_at: Utc::now() - Duration::days(30),
            start_date: None,
            end_date: None,
            coarse_location: "Calgary".to_string(),
            tags: vec![],
        };

        let mut viewer_friends = HashSet::new();
        let likers = HashSet::new();
        let stranger_score = score_post(&viewer, &post, &author, &viewer_friends, &likers);

        viewer_friends.insert("a".to_string());
        let friend_score = score_post(&viewer, &post, &author, &viewer_friends, &likers);

        assert!((friend_score - stranger_score - POST_FRIEND_AUTHOR_WEIGHT).abs() < 1e-9);
    }

    #[test]
    fn post_score_friend_likes_saturate_at_five() {
        let viewer = profile("v", "Toronto", None);
        let author = profile("a", "Calgary", None);
        let post = Post {
            id: "p".to_string(),
            author_id: "a".to_string(),
            text: String::new(),
            created_at: Utc::now() - Duration::days(30),
            start_date: None,
            end_date: None,
            coarse_location: "Calgary".to_string(),
            tags: vec![],
        };

        let viewer_friends: HashSet<String> = (0..8).map(|i| format!("f{}", i)).collect();
        let five_likers: HashSet<String> = (0..5).map(|i| format!("f{}", i)).collect();
        let eight_likers: HashSet<String> = (0..8).map(|i| format!("f{}", i)).collect();

        let five = score_post(&viewer, &post, &author, &viewer_friends, &five_likers);
        let eight = score_post(&viewer, &post, &author, &viewer_friends, &eight_likers);

        assert_eq!(five, eight);
    }
}
