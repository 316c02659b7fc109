//! Recommendation orchestration: snapshot load, generate, filter, score,
//! sort, rerank, assemble.
//!
//! Both entry points return `Ok(None)` for an unknown viewer so the API
//! boundary can decide whether that is a 404; the pipeline stages
//! themselves treat an unknown viewer as "no candidates". Dangling
//! references (a post whose author was deleted, a candidate missing from
//! the directory) are skipped during assembly rather than failing the
//! batch.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use sqlx::SqlitePool;

use crate::database::{post_repo, user_repo};
use crate::models::{
    DateRange, PersonRecommendation, Post, PostCorpus, PostRecommendation, PostsRow, RecGraph,
    ScoredPerson, ScoredPost, UserProfile, UsersRow,
};
use crate::services::{candidate_service, rerank_service, scoring_service};
use crate::state::ImpressionStore;

/// Combined result tags: up to 2 goals + 2 languages + 2 cultural
/// backgrounds, in that order, truncated to 6.
const TAGS_PER_ATTRIBUTE: usize = 2;
const MAX_RESULT_TAGS: usize = 6;

pub async fn recommend_people(
    pool: &SqlitePool,
    impressions: &ImpressionStore,
    viewer_id: &str,
    limit: usize,
    debug: bool,
    record_impressions: bool,
) -> sqlx::Result<Option<Vec<PersonRecommendation>>> {
    let graph = load_rec_graph(pool).await?;

    let Some(viewer) = graph.users.get(viewer_id) else {
        return Ok(None);
    };

    // 1. generate candidates, 2. hard filters
    let candidate_ids = candidate_service::generate_people_candidates(viewer_id, &graph);
    let filtered_ids = candidate_service::apply_people_hard_filters(viewer_id, &candidate_ids, &graph);

    // 3. score
    let mut scored: Vec<ScoredPerson> = filtered_ids
        .iter()
        .filter_map(|cid| {
            graph.users.get(cid).map(|candidate| ScoredPerson {
                id: cid.clone(),
                score: scoring_service::score_person(viewer, candidate, &graph.friends),
                primary_culture: None,
                primary_language: None,
            })
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    // 4. rerank for diversity and anti-repeat
    let reranked = rerank_service::rerank_people(viewer_id, scored, impressions, limit, &graph);

    // 5. build response
    let viewer_friends = graph.friends_of(viewer_id);
    let mut results = Vec::with_capacity(reranked.len());

    for sc in &reranked {
        let Some(candidate) = graph.users.get(&sc.id) else {
            continue;
        };

        let candidate_friends = graph.friends_of(&sc.id);
        let mutual_friends_count = viewer_friends.intersection(&candidate_friends).count();

        results.push(PersonRecommendation {
            id: candidate.id.clone(),
            display_name: candidate.display_name.clone(),
            bio: candidate.bio.clone(),
            verified_student: candidate.verified_student,
            age_verified: candidate.age_verified,
            tags: build_result_tags(candidate),
            mutual_friends_count,
            location_hidden: true,
            debug_score: debug.then_some(sc.score),
        });

        if record_impressions {
            impressions.record_impression(viewer_id, &sc.id);
        }
    }

    Ok(Some(results))
}

pub async fn recommend_posts(
    pool: &SqlitePool,
    impressions: &ImpressionStore,
    viewer_id: &str,
    limit: usize,
    debug: bool,
    record_impressions: bool,
) -> sqlx::Result<Option<Vec<PostRecommendation>>> {
    let graph = load_rec_graph(pool).await?;

    let Some(viewer) = graph.users.get(viewer_id) else {
        return Ok(None);
    };

    let corpus = load_post_corpus(pool).await?;
    let viewer_friends = graph.friends_of(viewer_id);

    // 1. generate candidates
    let candidate_ids = candidate_service::generate_post_candidates(viewer_id, &graph, &corpus);

    // 2. score
    let mut scored: Vec<ScoredPost> = Vec::with_capacity(candidate_ids.len());
    for pid in &candidate_ids {
        let Some(post) = corpus.posts.get(pid) else {
            continue;
        };
        let Some(author) = graph.users.get(&post.author_id) else {
            continue;
        };

        let likers = corpus.likers_of(pid);
        scored.push(ScoredPost {
            id: pid.clone(),
            score: scoring_service::score_post(viewer, post, author, &viewer_friends, &likers),
            author_id: post.author_id.clone(),
        });
    }
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    // 3. rerank
    let reranked = rerank_service::rerank_posts(viewer_id, scored, impressions, limit);

    // 4. build response
    let mut results = Vec::with_capacity(reranked.len());

    for sc in &reranked {
        let Some(post) = corpus.posts.get(&sc.id) else {
            continue;
        };
        let Some(author) = graph.users.get(&post.author_id) else {
            continue;
        };

        let liked_by_friends_count = corpus
            .likers_of(&sc.id)
            .intersection(&viewer_friends)
            .count();

        let date_range = if post.start_date.is_some() || post.end_date.is_some() {
            Some(DateRange {
                start_date: post.start_date,
                end_date: post.end_date,
            })
        } else {
            None
        };

        results.push(PostRecommendation {
            id: post.id.clone(),
            author_id: post.author_id.clone(),
            author_name: author.display_name.clone(),
            author_verified_student: author.verified_student,
            text: post.text.clone(),
            coarse_location: post.coarse_location.clone(),
            date_range,
            liked_by_friends_count,
            debug_score: debug.then_some(sc.score),
        });

        if record_impressions {
            impressions.record_impression(viewer_id, &sc.id);
        }
    }

    Ok(Some(results))
}

fn build_result_tags(candidate: &UserProfile) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(MAX_RESULT_TAGS);
    tags.extend(candidate.goals.iter().take(TAGS_PER_ATTRIBUTE).cloned());
    tags.extend(candidate.languages.iter().take(TAGS_PER_ATTRIBUTE).cloned());
    tags.extend(
        candidate
            .cultural_backgrounds
            .iter()
            .take(TAGS_PER_ATTRIBUTE)
            .cloned(),
    );
    tags.truncate(MAX_RESULT_TAGS);
    tags
}

async fn load_rec_graph(pool: &SqlitePool) -> sqlx::Result<RecGraph> {
    let user_rows = user_repo::load_directory(pool).await?;
    let friend_rows = user_repo::load_friend_edges(pool).await?;
    let block_rows = user_repo::load_block_edges(pool).await?;

    let mut users: HashMap<String, UserProfile> = HashMap::with_capacity(user_rows.len());
    for row in user_rows {
        let profile = row_to_profile(row);
        users.insert(profile.id.clone(), profile);
    }

    let mut friends: HashMap<String, HashSet<String>> = HashMap::new();
    for edge in friend_rows {
        friends.entry(edge.user_id).or_default().insert(edge.friend_id);
    }

    let mut blocks: HashMap<String, HashSet<String>> = HashMap::new();
    for edge in block_rows {
        blocks.entry(edge.user_id).or_default().insert(edge.blocked_id);
    }

    Ok(RecGraph {
        users,
        friends,
        blocks,
    })
}

async fn load_post_corpus(pool: &SqlitePool) -> sqlx::Result<PostCorpus> {
    let post_rows = post_repo::load_posts(pool).await?;
    let like_rows = post_repo::load_likes(pool).await?;

    let mut posts: HashMap<String, Post> = HashMap::with_capacity(post_rows.len());
    for row in post_rows {
        let post = row_to_post(row);
        posts.insert(post.id.clone(), post);
    }

    let mut likes: HashMap<String, HashSet<String>> = HashMap::new();
    for row in like_rows {
        likes.entry(row.post_id).or_default().insert(row.user_id);
    }

    Ok(PostCorpus { posts, likes })
}

fn row_to_profile(row: UsersRow) -> UserProfile {
    UserProfile {
        id: row.user_id,
        display_name: row.display_name.unwrap_or_default(),
        age: row.age.unwrap_or(0),
        verified_student: row.verified_student.unwrap_or(0) == 1,
        age_verified: row.age_verified.unwrap_or(0) == 1,
        current_city: row.current_city.unwrap_or_default(),
        destination_city: row.destination_city.filter(|c| !c.trim().is_empty()),
        cultural_backgrounds: parse_string_list(row.cultural_backgrounds.as_deref()),
        languages: parse_string_list(row.languages.as_deref()),
        goals: parse_string_list(row.goals.as_deref()),
        bio: row.bio.unwrap_or_default(),
        created_at: row.created_at.unwrap_or(chrono::DateTime::UNIX_EPOCH),
        last_active_at: row.last_active_at.unwrap_or(chrono::DateTime::UNIX_EPOCH),
        prefer_near_age: row.prefer_near_age.unwrap_or(0) == 1,
        verified_only: row.verified_only.unwrap_or(0) == 1,
    }
}

fn row_to_post(row: PostsRow) -> Post {
    Post {
        id: row.post_id,
        author_id: row.author_id,
        text: row.content.unwrap_or_default(),
        created_at: row.created_at.unwrap_or(chrono::DateTime::UNIX_EPOCH),
        start_date: row.start_date,
        end_date: row.end_date,
        coarse_location: row.coarse_location.unwrap_or_default(),
        tags: parse_string_list(row.tags.as_deref()),
    }
}

/// List columns are JSON text; malformed values degrade to empty lists.
fn parse_string_list(raw: Option<&str>) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw.unwrap_or("[]")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_string_list_handles_malformed_input() {
        assert_eq!(parse_string_list(Some(r#"["a","b"]"#)), vec!["a", "b"]);
        assert!(parse_string_list(Some("not json")).is_empty());
        assert!(parse_string_list(None).is_empty());
    }

    #[test]
    fn result_tags_ordered_and_truncated() {
        let candidate = UserProfile {
            id: "c".to_string(),
            display_name: "C".to_string(),
            age: 23,
            verified_student: true,
            age_verified: true,
            current_city: "Toronto".to_string(),
            destination_city: None,
            cultural_backgrounds: vec!["Indian".to_string(), "South Asian".to_string(), "X".to_string()],
            languages: vec!["English".to_string(), "Hindi".to_string(), "Punjabi".to_string()],
            goals: vec!["Friends".to_string(), "Food buddies".to_string(), "Events".to_string()],
            bio: String::new(),
            created_at: chrono::DateTime::UNIX_EPOCH,
            last_active_at: chrono::DateTime::UNIX_EPOCH,
            prefer_near_age: false,
            verified_only: false,
        };

        let tags = build_result_tags(&candidate);
        assert_eq!(
            tags,
            vec!["Friends", "Food buddies", "English", "Hindi", "Indian", "South Asian"]
        );
    }

    #[test]
    fn result_tags_short_attributes() {
        let candidate = UserProfile {
            id: "c".to_string(),
            display_name: "C".to_string(),
            age: 23,
            verified_student: true,
            age_verified: true,
            current_city: "Toronto".to_string(),
            destination_city: None,
            cultural_backgrounds: vec![],
            languages: vec!["English".to_string()],
            goals: vec!["Friends".to_string()],
            bio: String::new(),
            created_at: chrono::DateTime::UNIX_EPOCH,
            last_active_at: chrono::DateTime::UNIX_EPOCH,
            prefer_near_age: false,
            verified_only: false,
        };

        assert_eq!(build_result_tags(&candidate), vec!["Friends", "English"]);
    }
}
