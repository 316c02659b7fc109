use std::collections::{HashMap, HashSet};

use crate::models::{Post, UserProfile};

/// One consistent view of the directory and its relationship graphs,
/// loaded once per recommendation request. Friendships are stored
/// symmetrically (both directions present, no self-loops); blocks are
/// directional.
#[derive(Debug, Default)]
pub struct RecGraph {
    pub users: HashMap<String, UserProfile>,
    pub friends: HashMap<String, HashSet<String>>,
    pub blocks: HashMap<String, HashSet<String>>,
}

impl RecGraph {
    pub fn friends_of(&self, user_id: &str) -> HashSet<String> {
        self.friends.get(user_id).cloned().unwrap_or_default()
    }

    pub fn blocks_of(&self, user_id: &str) -> HashSet<String> {
        self.blocks.get(user_id).cloned().unwrap_or_default()
    }

    /// Inverse block lookup: everyone whose block list contains `user_id`.
    pub fn blocked_by(&self, user_id: &str) -> HashSet<String> {
        self.blocks
            .iter()
            .filter(|(_, blocked)| blocked.contains(user_id))
            .map(|(uid, _)| uid.clone())
            .collect()
    }
}

/// Post snapshot for one request: posts by id plus who liked what.
#[derive(Debug, Default)]
pub struct PostCorpus {
    pub posts: HashMap<String, Post>,
    pub likes: HashMap<String, HashSet<String>>,
}

impl PostCorpus {
    pub fn likers_of(&self, post_id: &str) -> HashSet<String> {
        self.likes.get(post_id).cloned().unwrap_or_default()
    }
}
