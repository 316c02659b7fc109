//! Candidate generation and hard filters.
//!
//! Generation yields unordered sets; determinism is enforced downstream
//! at scoring/sort time. The exclusion set (self, current friends,
//! blocked, blocked-by) is applied uniformly to every people source.

use std::collections::HashSet;

use crate::models::{PostCorpus, RecGraph};

pub const NEAR_AGE_MAX_DIFF: i64 = 5;

/// People candidates for a viewer: friends-of-friends, city/destination
/// cross-matches, and any goal/language/culture overlap. Unknown viewers
/// produce an empty set.
pub fn generate_people_candidates(viewer_id: &str, graph: &RecGraph) -> HashSet<String> {
    let Some(viewer) = graph.users.get(viewer_id) else {
        return HashSet::new();
    };

    let viewer_friends = graph.friends_of(viewer_id);

    let mut excluded: HashSet<String> = HashSet::new();
    excluded.insert(viewer_id.to_string());
    excluded.extend(viewer_friends.iter().cloned());
    excluded.extend(graph.blocks_of(viewer_id));
    excluded.extend(graph.blocked_by(viewer_id));

    let mut candidates: HashSet<String> = HashSet::new();

    // 1. friends of friends
    for friend_id in &viewer_friends {
        for fof_id in graph.friends_of(friend_id) {
            if !excluded.contains(&fof_id) {
                candidates.insert(fof_id);
            }
        }
    }

    // 2. same city, or a city/destination cross-match
    for (uid, u) in &graph.users {
        if excluded.contains(uid) {
            continue;
        }

        let same_city = u.current_city == viewer.current_city;
        let viewer_heading_there =
            viewer.destination_city.as_deref() == Some(u.current_city.as_str());
        let candidate_heading_here =
            u.destination_city.as_deref() == Some(viewer.current_city.as_str());
        let same_destination = viewer.destination_city.is_some()
            && viewer.destination_city == u.destination_city;

        if same_city || viewer_heading_there || candidate_heading_here || same_destination {
            candidates.insert(uid.clone());
        }
    }

    // 3. shared goals, languages, or cultural backgrounds
    let viewer_goals: HashSet<&str> = viewer.goals.iter().map(String::as_str).collect();
    let viewer_langs: HashSet<&str> = viewer.languages.iter().map(String::as_str).collect();
    let viewer_cultures: HashSet<&str> =
        viewer.cultural_backgrounds.iter().map(String::as_str).collect();

    for (uid, u) in &graph.users {
        if excluded.contains(uid) {
            continue;
        }

        let shares_any = u.goals.iter().any(|g| viewer_goals.contains(g.as_str()))
            || u.languages.iter().any(|l| viewer_langs.contains(l.as_str()))
            || u.cultural_backgrounds
                .iter()
                .any(|c| viewer_cultures.contains(c.as_str()));

        if shares_any {
            candidates.insert(uid.clone());
        }
    }

    candidates
}

/// Hard filters, people only, applied after generation and before
/// scoring. Candidates missing from the directory are dropped here too.
pub fn apply_people_hard_filters(
    viewer_id: &str,
    candidate_ids: &HashSet<String>,
    graph: &RecGraph,
) -> Vec<String> {
    let Some(viewer) = graph.users.get(viewer_id) else {
        return Vec::new();
    };

    let mut filtered = Vec::with_capacity(candidate_ids.len());

    for cid in candidate_ids {
        let Some(candidate) = graph.users.get(cid) else {
            continue;
        };

        if viewer.prefer_near_age && (viewer.age - candidate.age).abs() > NEAR_AGE_MAX_DIFF {
            continue;
        }

        if viewer.verified_only && !(candidate.verified_student && candidate.age_verified) {
            continue;
        }

        filtered.push(cid.clone());
    }

    filtered
}

/// Post candidates for a viewer: posts by friends, posts liked by at
/// least one friend, and posts by friends-of-friends whose coarse
/// location mentions the viewer's current or destination city. Posts by
/// blocked or blocking authors never qualify.
pub fn generate_post_candidates(
    viewer_id: &str,
    graph: &RecGraph,
    corpus: &PostCorpus,
) -> HashSet<String> {
    let Some(viewer) = graph.users.get(viewer_id) else {
        return HashSet::new();
    };

    let viewer_friends = graph.friends_of(viewer_id);

    let mut excluded_authors: HashSet<String> = graph.blocks_of(viewer_id);
    excluded_authors.extend(graph.blocked_by(viewer_id));

    let mut candidates: HashSet<String> = HashSet::new();

    // 1. posts by friends
    for (post_id, post) in &corpus.posts {
        if viewer_friends.contains(&post.author_id) && !excluded_authors.contains(&post.author_id)
        {
            candidates.insert(post_id.clone());
        }
    }

    // 2. posts liked by friends
    for (post_id, likers) in &corpus.likes {
        let Some(post) = corpus.posts.get(post_id) else {
            continue;
        };
        if excluded_authors.contains(&post.author_id) {
            continue;
        }

        if likers.iter().any(|liker| viewer_friends.contains(liker)) {
            candidates.insert(post_id.clone());
        }
    }

    // 3. posts by friends-of-friends mentioning the viewer's cities
    let mut fof: HashSet<String> = HashSet::new();
    for friend_id in &viewer_friends {
        for fof_id in graph.friends_of(friend_id) {
            if fof_id != viewer_id && !viewer_friends.contains(&fof_id) {
                fof.insert(fof_id);
            }
        }
    }

    let viewer_city_lower = viewer.current_city.to_lowercase();
    let viewer_dest_lower = viewer.destination_city.as_deref().map(str::to_lowercase);

    for (post_id, post) in &corpus.posts {
        if excluded_authors.contains(&post.author_id) || !fof.contains(&post.author_id) {
            continue;
        }

        let post_loc_lower = post.coarse_location.to_lowercase();
        let matches_city = !viewer_city_lower.is_empty()
            && post_loc_lower.contains(&viewer_city_lower);
        let matches_dest = viewer_dest_lower
            .as_deref()
            .is_some_and(|dest| !dest.is_empty() && post_loc_lower.contains(dest));

        if matches_city || matches_dest {
            candidates.insert(post_id.clone());
        }
    }

    candidates
}
