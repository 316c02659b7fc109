pub mod friends;
pub mod graph;
pub mod posts;
pub mod recommendations;
pub mod users;

pub use friends::{BlockEdgeRow, FriendEdgeRow};
pub use graph::{PostCorpus, RecGraph};
pub use posts::{LikeRow, Post, PostsRow};
pub use recommendations::{
    DateRange, PersonRecommendation, PostRecommendation, ScoredPerson, ScoredPost,
};
pub use users::{UserProfile, UsersRow};
