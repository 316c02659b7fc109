//! Demo fixture seeding.
//!
//! A small, diverse population of students across Toronto, Vancouver and
//! Montreal with overlapping languages, cultures and goals, enough to
//! exercise every candidate source (friends-of-friends, city cross-match,
//! attribute overlap, friend posts, friend likes) and both diversity caps.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

pub const SQL_INSERT_USER: &str = r#"
INSERT OR REPLACE INTO users (
    user_id, display_name, age, verified_student, age_verified,
    current_city, destination_city, cultural_backgrounds, languages, goals,
    bio, created_at, last_active_at, prefer_near_age, verified_only
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
"#;

pub const SQL_INSERT_FRIEND_EDGE: &str = r#"
INSERT OR REPLACE INTO friends (user_id, friend_id) VALUES (?1, ?2)
"#;

pub const SQL_INSERT_BLOCK_EDGE: &str = r#"
INSERT OR REPLACE INTO blocks (user_id, blocked_id) VALUES (?1, ?2)
"#;

pub const SQL_INSERT_POST: &str = r#"
INSERT OR REPLACE INTO posts (
    post_id, author_id, content, created_at, start_date, end_date,
    coarse_location, tags
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SQL_INSERT_LIKE: &str = r#"
INSERT OR REPLACE INTO likes (post_id, user_id) VALUES (?1, ?2)
"#;

struct DemoUser {
    id: &'static str,
    display_name: &'static str,
    age: i64,
    current_city: &'static str,
    destination_city: Option<&'static str>,
    cultural_backgrounds: &'static [&'static str],
    languages: &'static [&'static str],
    goals: &'static [&'static str],
    bio: &'static str,
    created_days_ago: i64,
    active_hours_ago: i64,
    prefer_near_age: bool,
}

struct DemoPost {
    id: &'static str,
    author_id: &'static str,
    content: &'static str,
    created_hours_ago: i64,
    event_in_days: Option<(i64, i64)>,
    coarse_location: &'static str,
    tags: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        id: "user_1",
        display_name: "Priya Sharma",
        age: 22,
        current_city: "Toronto",
        destination_city: Some("Montreal"),
        cultural_backgrounds: &["Indian", "South Asian"],
        languages: &["English", "Hindi", "Punjabi"],
        goals: &["Friends", "Food buddies", "Exploring the city"],
        bio: "Looking to explore Toronto and make friends who love good food!",
        created_days_ago: 30,
        active_hours_ago: 2,
        prefer_near_age: true,
    },
    DemoUser {
        id: "user_2",
        display_name: "Marcus Chen",
        age: 23,
        current_city: "Vancouver",
        destination_city: Some("Toronto"),
        cultural_backgrounds: &["Taiwanese", "East Asian"],
        languages: &["English", "Mandarin"],
        goals: &["Study pals", "Food buddies", "Friends"],
        bio: "CS student from Taiwan. Down for study sessions and late-night bubble tea runs!",
        created_days_ago: 60,
        active_hours_ago: 5,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_3",
        display_name: "Fatima Al-Rashid",
        age: 24,
        current_city: "Montreal",
        destination_city: None,
        cultural_backgrounds: &["Arab", "Middle Eastern"],
        languages: &["English", "Arabic", "French", "Persian"],
        goals: &["Friends", "Exploring the city", "Events"],
        bio: "New to Montreal! Love coffee shops, art galleries, and deep conversations.",
        created_days_ago: 45,
        active_hours_ago: 1,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_4",
        display_name: "Diego Santos",
        age: 25,
        current_city: "Toronto",
        destination_city: None,
        cultural_backgrounds: &["Brazilian", "Latin American"],
        languages: &["Portuguese", "English", "Spanish"],
        goals: &["Gym", "Friends", "Exploring the city"],
        bio: "Brazilian exchange student looking for gym buddies and weekend adventures!",
        created_days_ago: 20,
        active_hours_ago: 24,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_5",
        display_name: "Amara Okonkwo",
        age: 26,
        current_city: "Toronto",
        destination_city: Some("Vancouver"),
        cultural_backgrounds: &["Nigerian", "West African"],
        languages: &["English", "Igbo", "Yoruba"],
        goals: &["Friends", "Food buddies", "Events"],
        bio: "Nigerian grad student. Always up for trying new restaurants and cultural events.",
        created_days_ago: 90,
        active_hours_ago: 12,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_6",
        display_name: "Yuki Tanaka",
        age: 21,
        current_city: "Vancouver",
        destination_city: None,
        cultural_backgrounds: &["Japanese", "East Asian"],
        languages: &["Japanese", "English"],
        goals: &["Friends", "Food buddies", "Exploring the city"],
        bio: "Japanese exchange student. Lets grab ramen and explore hidden spots!",
        created_days_ago: 10,
        active_hours_ago: 3,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_7",
        display_name: "Alex Kim",
        age: 24,
        current_city: "Toronto",
        destination_city: None,
        cultural_backgrounds: &["Korean", "East Asian"],
        languages: &["English", "Korean"],
        goals: &["Roommates", "Friends", "Study pals"],
        bio: "Korean-Canadian looking for roommates and people to share apartment hunting tips.",
        created_days_ago: 100,
        active_hours_ago: 48,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_8",
        display_name: "Sofia Martinez",
        age: 22,
        current_city: "Montreal",
        destination_city: Some("Toronto"),
        cultural_backgrounds: &["Mexican", "Latin American"],
        languages: &["Spanish", "English", "French"],
        goals: &["Friends", "Events", "Exploring the city"],
        bio: "Mexican student passionate about dance, music, and making new connections!",
        created_days_ago: 50,
        active_hours_ago: 6,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_9",
        display_name: "Hassan Javed",
        age: 27,
        current_city: "Toronto",
        destination_city: Some("Montreal"),
        cultural_backgrounds: &["Pakistani", "South Asian"],
        languages: &["English", "Urdu", "Punjabi", "Persian"],
        goals: &["Study pals", "Friends", "Events"],
        bio: "Pakistani engineer. Coffee addict looking for study groups and cricket fans.",
        created_days_ago: 80,
        active_hours_ago: 8,
        prefer_near_age: true,
    },
    DemoUser {
        id: "user_10",
        display_name: "Linh Nguyen",
        age: 23,
        current_city: "Toronto",
        destination_city: None,
        cultural_backgrounds: &["Vietnamese", "Southeast Asian"],
        languages: &["Vietnamese", "English"],
        goals: &["Friends", "Food buddies", "Exploring the city"],
        bio: "Vietnamese student new to Canada. Would love to find cooking partners!",
        created_days_ago: 5,
        active_hours_ago: 1,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_11",
        display_name: "Ibrahim Diallo",
        age: 25,
        current_city: "Montreal",
        destination_city: None,
        cultural_backgrounds: &["Senegalese", "West African"],
        languages: &["French", "English", "Wolof"],
        goals: &["Friends", "Gym", "Study pals"],
        bio: "Senegalese student passionate about tech and basketball. Lets connect!",
        created_days_ago: 70,
        active_hours_ago: 24,
        prefer_near_age: false,
    },
    DemoUser {
        id: "user_12",
        display_name: "Zara Patel",
        age: 24,
        current_city: "Vancouver",
        destination_city: Some("Toronto"),
        cultural_backgrounds: &["Indian", "British", "South Asian"],
        languages: &["English", "Gujarati", "Hindi", "Persian"],
        goals: &["Friends", "Food buddies", "Study pals"],
        bio: "British-Indian grad student. Chai enthusiast seeking fellow bookworms and cafe hoppers.",
        created_days_ago: 40,
        active_hours_ago: 4,
        prefer_near_age: false,
    },
];

// Undirected pairs; both directions are inserted below.
const DEMO_FRIEND_PAIRS: &[(&str, &str)] = &[
    ("user_1", "user_4"),
    ("user_1", "user_5"),
    ("user_1", "user_9"),
    ("user_2", "user_6"),
    ("user_2", "user_12"),
    ("user_3", "user_8"),
    ("user_3", "user_11"),
    ("user_4", "user_7"),
    ("user_4", "user_10"),
    ("user_5", "user_10"),
    ("user_6", "user_12"),
    ("user_7", "user_10"),
    ("user_8", "user_11"),
];

// Directional: blocker, blocked.
const DEMO_BLOCKS: &[(&str, &str)] = &[("user_2", "user_9"), ("user_7", "user_11")];

const DEMO_POSTS: &[DemoPost] = &[
    DemoPost {
        id: "post_1",
        author_id: "user_1",
        content: "Hey! Ill be in Montreal for two weeks next month. Looking for friends to explore the city, message me!",
        created_hours_ago: 2,
        event_in_days: Some((15, 25)),
        coarse_location: "Downtown Montreal",
        tags: &["Friends", "Exploring the city"],
    },
    DemoPost {
        id: "post_2",
        author_id: "user_3",
        content: "Anyone want to check out the new art exhibit at the museum this weekend? Would love some company!",
        created_hours_ago: 5,
        event_in_days: None,
        coarse_location: "Montreal arts district",
        tags: &["Events", "Friends"],
    },
    DemoPost {
        id: "post_3",
        author_id: "user_4",
        content: "Looking for a gym buddy in the downtown area. I usually go in the mornings around 7am. Lets motivate each other!",
        created_hours_ago: 24,
        event_in_days: None,
        coarse_location: "Downtown Toronto",
        tags: &["Gym", "Friends"],
    },
    DemoPost {
        id: "post_4",
        author_id: "user_8",
        content: "Organizing a salsa night next Friday! If you love dancing or want to learn, come join us. All levels welcome!",
        created_hours_ago: 24,
        event_in_days: Some((7, 7)),
        coarse_location: "Montreal downtown",
        tags: &["Events", "Friends"],
    },
    DemoPost {
        id: "post_5",
        author_id: "user_6",
        content: "Found the best ramen spot near campus! Anyone want to grab lunch tomorrow? DM me!",
        created_hours_ago: 48,
        event_in_days: None,
        coarse_location: "Near UBC campus",
        tags: &["Food buddies", "Friends"],
    },
    DemoPost {
        id: "post_6",
        author_id: "user_2",
        content: "Study group forming for CPSC 320. Looking for 2-3 more people. We meet Tuesdays and Thursdays at the library.",
        created_hours_ago: 48,
        event_in_days: None,
        coarse_location: "UBC Library area",
        tags: &["Study pals"],
    },
    DemoPost {
        id: "post_7",
        author_id: "user_7",
        content: "Apartment hunting in North York. Anyone else looking for a place? Maybe we can be roommates!",
        created_hours_ago: 72,
        event_in_days: None,
        coarse_location: "North York area",
        tags: &["Roommates"],
    },
    DemoPost {
        id: "post_8",
        author_id: "user_9",
        content: "Cricket match this Sunday at the park! We need 2 more players. All skill levels welcome, just come have fun!",
        created_hours_ago: 72,
        event_in_days: Some((2, 2)),
        coarse_location: "Toronto East",
        tags: &["Events", "Friends"],
    },
];

const DEMO_LIKES: &[(&str, &[&str])] = &[
    ("post_1", &["user_4", "user_5", "user_9"]),
    ("post_2", &["user_8", "user_11", "user_1"]),
    ("post_3", &["user_1", "user_7", "user_10"]),
    ("post_4", &["user_3", "user_11", "user_1", "user_5"]),
    ("post_5", &["user_2", "user_12"]),
    ("post_6", &["user_6", "user_12", "user_7"]),
    ("post_7", &["user_4", "user_10", "user_1"]),
    ("post_8", &["user_1", "user_4", "user_5"]),
];

fn json_list(values: &[&str]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

pub async fn seed_demo_data(pool: &SqlitePool) -> sqlx::Result<()> {
    let now = Utc::now();

    for u in DEMO_USERS {
        sqlx::query(SQL_INSERT_USER)
            .bind(u.id)
            .bind(u.display_name)
            .bind(u.age)
            .bind(1_i64)
            .bind(1_i64)
            .bind(u.current_city)
            .bind(u.destination_city)
            .bind(json_list(u.cultural_backgrounds))
            .bind(json_list(u.languages))
            .bind(json_list(u.goals))
            .bind(u.bio)
            .bind(now - Duration::days(u.created_days_ago))
            .bind(now - Duration::hours(u.active_hours_ago))
            .bind(u.prefer_near_age as i64)
            .bind(0_i64)
            .execute(pool)
            .await?;
    }

    for &(a, b) in DEMO_FRIEND_PAIRS {
        sqlx::query(SQL_INSERT_FRIEND_EDGE)
            .bind(a)
            .bind(b)
            .execute(pool)
            .await?;
        sqlx::query(SQL_INSERT_FRIEND_EDGE)
            .bind(b)
            .bind(a)
            .execute(pool)
            .await?;
    }

    for &(blocker, blocked) in DEMO_BLOCKS {
        sqlx::query(SQL_INSERT_BLOCK_EDGE)
            .bind(blocker)
            .bind(blocked)
            .execute(pool)
            .await?;
    }

    let today = now.date_naive();
    for p in DEMO_POSTS {
        let (start_date, end_date) = match p.event_in_days {
            Some((start, end)) => (
                Some(today + Duration::days(start)),
                Some(today + Duration::days(end)),
            ),
            None => (None, None),
        };
        sqlx::query(SQL_INSERT_POST)
            .bind(p.id)
            .bind(p.author_id)
            .bind(p.content)
            .bind(now - Duration::hours(p.created_hours_ago))
            .bind(start_date)
            .bind(end_date)
            .bind(p.coarse_location)
            .bind(json_list(p.tags))
            .execute(pool)
            .await?;
    }

    for &(post_id, likers) in DEMO_LIKES {
        for &liker in likers {
            sqlx::query(SQL_INSERT_LIKE)
                .bind(post_id)
                .bind(liker)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}
