use reqwest::{header, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::UpstreamError;
use crate::models::{FollowCreated, User, UserPage};

/// Uniform response wrapper the follow service puts around every reply.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountData {
    #[serde(default)]
    count: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IsFollowingData {
    #[serde(default)]
    is_following: bool,
}

/// HTTP client for the follow service, the single upstream behind this
/// gateway. One method per logical operation, each a single request against
/// the configured base URL. No retries and no timeouts: a hang upstream
/// hangs the caller.
#[derive(Clone, Debug)]
pub struct FollowServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl FollowServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Sends one request and decodes the envelope. Returns the `data` field
    /// as-is; callers decide what an absent payload means for their
    /// operation.
    #[instrument(name = "follow_service.request", skip(self, body))]
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let envelope: Envelope<T> = response.json().await?;

        if !status.is_success() || !envelope.success {
            return Err(UpstreamError::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("upstream returned HTTP {status}")),
                code: envelope.code,
            });
        }
        Ok(envelope.data)
    }

    #[instrument(skip(self))]
    pub async fn follow_user(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<FollowCreated, UpstreamError> {
        self.request(
            Method::POST,
            "/follows",
            Some(json!({ "followerId": follower_id, "followeeId": followee_id })),
        )
        .await?
        .ok_or(UpstreamError::EmptyEnvelope)
    }

    #[instrument(skip(self))]
    pub async fn unfollow_user(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), UpstreamError> {
        self.request::<serde_json::Value>(
            Method::DELETE,
            "/follows",
            Some(json!({ "followerId": follower_id, "followeeId": followee_id })),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_followers(
        &self,
        user_id: &str,
        limit: i32,
        offset: i32,
    ) -> Result<UserPage, UpstreamError> {
        let path = format!("/users/{user_id}/followers?limit={limit}&offset={offset}");
        self.request(Method::GET, &path, None)
            .await?
            .ok_or(UpstreamError::EmptyEnvelope)
    }

    #[instrument(skip(self))]
    pub async fn get_following(
        &self,
        user_id: &str,
        limit: i32,
        offset: i32,
    ) -> Result<UserPage, UpstreamError> {
        let path = format!("/users/{user_id}/following?limit={limit}&offset={offset}");
        self.request(Method::GET, &path, None)
            .await?
            .ok_or(UpstreamError::EmptyEnvelope)
    }

    /// An absent `data` field decodes as an empty list, not an error.
    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<Vec<User>, UpstreamError> {
        let data: Option<Vec<User>> = self.request(Method::GET, "/users", None).await?;
        Ok(data.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn get_follower_count(&self, user_id: &str) -> Result<i32, UpstreamError> {
        let path = format!("/users/{user_id}/followers/count");
        let data: Option<CountData> = self.request(Method::GET, &path, None).await?;
        Ok(data.map(|d| d.count).unwrap_or(0))
    }

    #[instrument(skip(self))]
    pub async fn get_following_count(&self, user_id: &str) -> Result<i32, UpstreamError> {
        let path = format!("/users/{user_id}/following/count");
        let data: Option<CountData> = self.request(Method::GET, &path, None).await?;
        Ok(data.map(|d| d.count).unwrap_or(0))
    }

    #[instrument(skip(self))]
    pub async fn is_following(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<bool, UpstreamError> {
        let path = format!("/follows/check?followerId={follower_id}&followeeId={followee_id}");
        let data: Option<IsFollowingData> = self.request(Method::GET, &path, None).await?;
        Ok(data.map(|d| d.is_following).unwrap_or(false))
    }
}
