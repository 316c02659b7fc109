//! Similarity primitives for the recommendation scorer.
//!
//! All functions here are pure and deterministic apart from
//! `recency_score`, which reads the wall clock at call time so results
//! degrade continuously across calls. Ratio scores return 0.0 on empty
//! denominators instead of erroring.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

/// Languages that get a boost when shared, without penalizing extra
/// languages on either side.
pub const HIGH_SIGNAL_LANGS: &[&str] = &["Persian"];

pub const HIGH_SIGNAL_LANG_BOOST: f64 = 0.25;

pub const RECENCY_WINDOW_DAYS: i64 = 14;

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

fn as_set(values: &[String]) -> HashSet<&str> {
    values.iter().map(String::as_str).collect()
}

/// |A ∩ B| / |A ∪ B| over the inputs treated as sets. 0.0 when both are
/// empty.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let set_a = as_set(a);
    let set_b = as_set(b);

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// |A ∩ B| / min(|A|, |B|). Preferred over jaccard for languages: a user
/// who speaks 5 languages matching 2 with another user still scores 1.0.
/// 0.0 if either set is empty.
pub fn overlap_coefficient(a: &[String], b: &[String]) -> f64 {
    let set_a = as_set(a);
    let set_b = as_set(b);

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let min_size = set_a.len().min(set_b.len());

    intersection as f64 / min_size as f64
}

/// Overlap coefficient plus a boost when the shared languages include a
/// high-signal one, capped at 1.0.
pub fn language_score(a_langs: &[String], b_langs: &[String]) -> f64 {
    let base_score = overlap_coefficient(a_langs, b_langs);

    let set_a = as_set(a_langs);
    let set_b = as_set(b_langs);
    let shared_high_signal = set_a
        .intersection(&set_b)
        .any(|lang| HIGH_SIGNAL_LANGS.contains(lang));

    if shared_high_signal {
        (base_score + HIGH_SIGNAL_LANG_BOOST).min(1.0)
    } else {
        base_score
    }
}

/// 1.0 for the same current city, 0.8 for any destination cross-match
/// (same destination, user going where candidate is, candidate coming
/// where user is), else 0.0. City strings are pre-normalized upstream, so
/// equality is exact and case-sensitive.
pub fn location_score(
    user_current_city: &str,
    user_destination_city: Option<&str>,
    candidate_current_city: &str,
    candidate_destination_city: Option<&str>,
) -> f64 {
    if user_current_city == candidate_current_city {
        return 1.0;
    }

    if let (Some(user_dest), Some(cand_dest)) = (user_destination_city, candidate_destination_city)
    {
        if user_dest == cand_dest {
            return 0.8;
        }
    }

    if user_destination_city == Some(candidate_current_city) {
        return 0.8;
    }

    if candidate_destination_city == Some(user_current_city) {
        return 0.8;
    }

    0.0
}

/// min(|mutual|, 5) / 5, saturating so the benefit caps at 5 mutual
/// friends.
pub fn mutual_friends_score(
    user_id: &str,
    candidate_id: &str,
    friends_graph: &HashMap<String, HashSet<String>>,
) -> f64 {
    let mutual_count = match (friends_graph.get(user_id), friends_graph.get(candidate_id)) {
        (Some(user_friends), Some(candidate_friends)) => {
            user_friends.intersection(candidate_friends).count()
        }
        _ => 0,
    };

    mutual_count.min(5) as f64 / 5.0
}

/// 1.0 within 1 day of now, linear decay to 0.0 at `window_days`.
pub fn recency_score(timestamp: DateTime<Utc>, window_days: i64) -> f64 {
    let days_ago = (Utc::now() - timestamp).num_seconds() as f64 / SECONDS_PER_DAY;

    if days_ago <= 1.0 {
        return 1.0;
    }
    if days_ago >= window_days as f64 {
        return 0.0;
    }

    1.0 - (days_ago - 1.0) / (window_days as f64 - 1.0)
}

/// Binary: 1.0 if the cultural backgrounds intersect at all, else 0.0.
/// Deliberately coarse; no partial credit.
pub fn culture_score(a_cultures: &[String], b_cultures: &[String]) -> f64 {
    let set_a = as_set(a_cultures);
    let set_b = as_set(b_cultures);

    if set_a.intersection(&set_b).next().is_some() {
        1.0
    } else {
        0.0
    }
}

/// 1.0 when the user's current or destination city appears in the post's
/// coarse location text (case-insensitive substring). Otherwise a flat
/// 0.5: coarse-location text matching is inherently uncertain, so a
/// non-match never zeroes the post out entirely.
pub fn post_location_match(
    post_location: &str,
    user_current_city: &str,
    user_destination_city: Option<&str>,
) -> f64 {
    let post_loc_lower = post_location.to_lowercase();

    if !user_current_city.is_empty()
        && post_loc_lower.contains(&user_current_city.to_lowercase())
    {
        return 1.0;
    }

    if let Some(dest) = user_destination_city {
        if !dest.is_empty() && post_loc_lower.contains(&dest.to_lowercase()) {
            return 1.0;
        }
    }

    0.5
}
