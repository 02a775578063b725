use async_graphql::{SimpleObject, ID};
use serde::{Deserialize, Serialize};

/// A user as reported by the follow service. Serves both as the wire shape
/// decoded from upstream responses and as the GraphQL `User` type.
#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ID,
    pub username: String,
    pub display_name: Option<String>,
}

/// One page of users as the upstream pagination endpoints return it.
/// `items.len() <= limit` is expected but not enforced here; the upstream
/// owns the pagination bounds.
#[derive(Clone, Debug, Deserialize)]
pub struct UserPage {
    pub total: i32,
    #[serde(default)]
    pub items: Vec<User>,
}

/// Identifier of a follow edge created upstream. Decoded for completeness;
/// the mutation surface reports only a success flag.
#[derive(Clone, Debug, Deserialize)]
pub struct FollowCreated {
    pub id: String,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct FollowersPage {
    pub total: i32,
    pub items: Vec<User>,
    /// The requested limit, echoed back rather than re-read from upstream.
    pub limit: i32,
    /// The requested offset, echoed back rather than re-read from upstream.
    pub offset: i32,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct FollowingPage {
    pub total: i32,
    pub items: Vec<User>,
    pub limit: i32,
    pub offset: i32,
}

/// Follower/following counts come from two independent upstream calls and
/// are only best-effort consistent with each other.
#[derive(SimpleObject, Clone, Debug)]
pub struct FollowCount {
    pub followers_count: i32,
    pub following_count: i32,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct IsFollowingResult {
    pub is_following: bool,
}
