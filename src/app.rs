use actix_web::http::header;
use actix_web::{guard, web, HttpRequest, HttpResponse};
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{extensions, EmptySubscription, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use serde_json::json;

use crate::client::FollowServiceClient;
use crate::schema::{AppSchema, Authorization, MutationRoot, QueryRoot};

pub fn build_schema(client: FollowServiceClient) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(client)
        .extension(extensions::Tracing)
        .extension(extensions::Analyzer)
        .finish()
}

/// Liveness probe; independent of the GraphQL machinery.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn gql_playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

async fn gql_request(
    schema: web::Data<AppSchema>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    // Forwarded into the execution context uninterpreted; resolvers may
    // read it but nothing in this gateway verifies it.
    let authorization = http_req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    schema
        .execute(req.into_inner().data(Authorization(authorization)))
        .await
        .into()
}

/// Route table shared by the server binary and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").guard(guard::Get()).to(health))
        .service(web::resource("/").guard(guard::Get()).to(gql_playground))
        .service(web::resource("/graphql").guard(guard::Post()).to(gql_request));
}
