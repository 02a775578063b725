use follow_graphql_gateway::client::FollowServiceClient;
use follow_graphql_gateway::errors::UpstreamError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn follow_user_returns_the_created_follow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/follows"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "followerId": "user1", "followeeId": "user2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": "follow-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let created = client.follow_user("user1", "user2").await.unwrap();
    assert_eq!(created.id, "follow-1");
}

#[tokio::test]
async fn follow_user_surfaces_the_upstream_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/follows"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Cannot follow yourself",
            "code": "SELF_FOLLOW"
        })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let err = client.follow_user("user1", "user1").await.unwrap_err();
    assert!(err.to_string().contains("Cannot follow yourself"), "got: {err}");
    match err {
        UpstreamError::Rejected { code, .. } => assert_eq!(code.as_deref(), Some("SELF_FOLLOW")),
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn unfollow_user_succeeds_on_an_ok_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/follows"))
        .and(body_json(json!({ "followerId": "user1", "followeeId": "user2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    client.unfollow_user("user1", "user2").await.unwrap();
}

#[tokio::test]
async fn get_followers_decodes_a_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/user3/followers"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "total": 2,
                "items": [
                    { "id": "user1", "username": "alice", "displayName": "Alice" },
                    { "id": "user2", "username": "bob", "displayName": null }
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let page = client.get_followers("user3", 20, 0).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].username, "alice");
    assert_eq!(page.items[1].display_name, None);
}

#[tokio::test]
async fn get_following_hits_the_following_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/user3/following"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "total": 0, "items": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let page = client.get_following("user3", 5, 10).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn get_users_returns_empty_when_data_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let users = client.get_users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn get_users_decodes_the_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": "user1", "username": "alice", "displayName": "Alice" }
            ]
        })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let users = client.get_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id.as_str(), "user1");
}

#[tokio::test]
async fn follower_count_defaults_to_zero_when_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/user1/followers/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    assert_eq!(client.get_follower_count("user1").await.unwrap(), 0);
}

#[tokio::test]
async fn following_count_decodes_the_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/user1/following/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "count": 7 }
        })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    assert_eq!(client.get_following_count("user1").await.unwrap(), 7);
}

#[tokio::test]
async fn is_following_decodes_true() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/follows/check"))
        .and(query_param("followerId", "user1"))
        .and(query_param("followeeId", "user2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "isFollowing": true }
        })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    assert!(client.is_following("user1", "user2").await.unwrap());
}

#[tokio::test]
async fn is_following_defaults_to_false_when_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/follows/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    assert!(!client.is_following("user1", "user2").await.unwrap());
}

#[tokio::test]
async fn transport_failures_use_a_fixed_message() {
    // Bind a server just to obtain a dead address, then shut it down.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = FollowServiceClient::new(uri);
    let err = client.get_users().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to communicate with Follow Service");
}

#[tokio::test]
async fn malformed_bodies_are_transport_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let err = client.get_users().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to communicate with Follow Service");
}

#[tokio::test]
async fn rejections_without_a_message_name_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let client = FollowServiceClient::new(server.uri());
    let err = client.get_users().await.unwrap_err();
    assert!(err.to_string().contains("503"), "got: {err}");
}
