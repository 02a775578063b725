use crate::client::FollowServiceClient;
use crate::errors::AppError;
use crate::models::{FollowCount, FollowersPage, FollowingPage, IsFollowingResult, User};
use async_graphql::{Context, EmptySubscription, FieldResult, Object, ResultExt, Schema, ID};
use futures_util::try_join;
use tracing::instrument;

/// Raw Authorization header forwarded from the incoming HTTP request into
/// the execution context. Passed through uninterpreted; this gateway
/// performs no verification.
#[derive(Clone, Debug, Default)]
pub struct Authorization(pub Option<String>);

// Define the Query root object
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    #[instrument(skip(self))]
    async fn health(&self) -> String {
        "ok".to_string()
    }

    #[instrument(name = "query.users", skip_all)]
    async fn users<'ctx>(&self, ctx: &Context<'ctx>) -> FieldResult<Vec<User>> {
        let client = ctx.data::<FollowServiceClient>()?;
        Ok(client.get_users().await.map_err(AppError::from).extend()?)
    }

    #[instrument(name = "query.followers", skip_all, fields(user_id = %user_id.as_str()))]
    async fn followers<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        user_id: ID,
        #[graphql(default = 20)] limit: i32,
        #[graphql(default = 0)] offset: i32,
    ) -> FieldResult<FollowersPage> {
        let client = ctx.data::<FollowServiceClient>()?;
        let page = client
            .get_followers(user_id.as_str(), limit, offset)
            .await
            .map_err(AppError::from).extend()?;
        Ok(FollowersPage {
            total: page.total,
            items: page.items,
            limit,
            offset,
        })
    }

    #[instrument(name = "query.following", skip_all, fields(user_id = %user_id.as_str()))]
    async fn following<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        user_id: ID,
        #[graphql(default = 20)] limit: i32,
        #[graphql(default = 0)] offset: i32,
    ) -> FieldResult<FollowingPage> {
        let client = ctx.data::<FollowServiceClient>()?;
        let page = client
            .get_following(user_id.as_str(), limit, offset)
            .await
            .map_err(AppError::from).extend()?;
        Ok(FollowingPage {
            total: page.total,
            items: page.items,
            limit,
            offset,
        })
    }

    /// Both counts are fetched concurrently; if either call fails the whole
    /// field fails, never a partial result.
    #[instrument(name = "query.follow_counts", skip_all, fields(user_id = %user_id.as_str()))]
    async fn follow_counts<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        user_id: ID,
    ) -> FieldResult<FollowCount> {
        let client = ctx.data::<FollowServiceClient>()?;
        let (followers_count, following_count) = try_join!(
            client.get_follower_count(user_id.as_str()),
            client.get_following_count(user_id.as_str()),
        )
        .map_err(AppError::from).extend()?;
        Ok(FollowCount {
            followers_count,
            following_count,
        })
    }

    #[instrument(name = "query.is_following", skip_all, fields(follower_id = %follower_id.as_str(), followee_id = %followee_id.as_str()))]
    async fn is_following<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        follower_id: ID,
        followee_id: ID,
    ) -> FieldResult<IsFollowingResult> {
        let client = ctx.data::<FollowServiceClient>()?;
        let is_following = client
            .is_following(follower_id.as_str(), followee_id.as_str())
            .await
            .map_err(AppError::from).extend()?;
        Ok(IsFollowingResult { is_following })
    }
}

// Define the Mutation root object
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    #[instrument(name = "mutation.follow", skip_all, fields(follower_id = %follower_id.as_str(), followee_id = %followee_id.as_str()))]
    async fn follow<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        follower_id: ID,
        followee_id: ID,
    ) -> FieldResult<bool> {
        let client = ctx.data::<FollowServiceClient>()?;
        // The created follow's id stays internal; callers only see success.
        client
            .follow_user(follower_id.as_str(), followee_id.as_str())
            .await
            .map_err(AppError::from).extend()?;
        Ok(true)
    }

    #[instrument(name = "mutation.unfollow", skip_all, fields(follower_id = %follower_id.as_str(), followee_id = %followee_id.as_str()))]
    async fn unfollow<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        follower_id: ID,
        followee_id: ID,
    ) -> FieldResult<bool> {
        let client = ctx.data::<FollowServiceClient>()?;
        client
            .unfollow_user(follower_id.as_str(), followee_id.as_str())
            .await
            .map_err(AppError::from).extend()?;
        Ok(true)
    }
}

// Schema type
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;
