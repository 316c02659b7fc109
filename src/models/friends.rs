#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FriendEdgeRow {
    pub user_id: String,
    pub friend_id: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlockEdgeRow {
    pub user_id: String,
    pub blocked_id: String,
}
