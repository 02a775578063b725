use actix_web::{middleware::Logger as ActixLogger, web, App, HttpServer};

use follow_graphql_gateway::app;
use follow_graphql_gateway::client::FollowServiceClient;
use follow_graphql_gateway::config::CONFIG;
use follow_graphql_gateway::errors::AppError;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_tracer() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CONFIG.log_level.clone()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE) // Log when spans close
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracer();

    let app_config = CONFIG.clone();
    tracing::info!("Starting follow gateway with config: {:?}", app_config);

    let client = FollowServiceClient::new(app_config.follow_service_url.clone());
    let schema = app::build_schema(client);

    let server_addr = app_config.address();
    tracing::info!("Playground: http://{}/", server_addr);
    tracing::info!("GraphQL endpoint: http://{}/graphql", server_addr);
    tracing::info!("Health endpoint: http://{}/health", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(ActixLogger::default())
            .app_data(web::Data::new(schema.clone()))
            .configure(app::configure)
    })
    .bind(server_addr)?
    // Termination stops the server without draining in-flight requests.
    .shutdown_timeout(0)
    .run()
    .await
    .map_err(AppError::Io)
}
