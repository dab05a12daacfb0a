use tracing_subscriber::EnvFilter;

use docseb_lambda::config::ServiceConfig;
use docseb_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env()?;
    tracing::info!(
        session_hours = config.session_duration.as_hours(),
        cors_restricted = config.allowed_origin.is_some(),
        "starting docseb service"
    );

    let app = docseb_lambda::router(AppState::new(config));
    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
