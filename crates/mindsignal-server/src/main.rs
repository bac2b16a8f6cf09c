use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mindsignal_embed::sentence::SentenceEmbedder;
use mindsignal_forum::client::RedditClient;
use mindsignal_forum::selection::SelectionPolicy;
use mindsignal_nlp::pipeline::SuicideClassifier;
use mindsignal_server::config::ServerConfig;
use mindsignal_server::state::AppState;
use mindsignal_server::{build_router, render};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::load()?;
    tracing::info!(config = ?config.info(), "configuration loaded");

    let classifier = SuicideClassifier::load(&config.model_dir)
        .map_err(|e| eyre::eyre!("failed to load classifier from {}: {e}", config.model_dir.display()))?;
    let embedder = SentenceEmbedder::load(&config.embedding_model_dir).map_err(|e| {
        eyre::eyre!(
            "failed to load embedding model from {}: {e}",
            config.embedding_model_dir.display()
        )
    })?;
    let forum = RedditClient::new(config.credentials.clone(), config.forum_timeout);

    let state = AppState {
        forum: Arc::new(forum),
        classifier: Arc::new(classifier),
        embedder: Arc::new(embedder),
        templates: Arc::new(render::build_templates()?),
        selection: SelectionPolicy {
            hot_limit: config.hot_limit,
        },
        user_post_limit: config.user_post_limit,
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
