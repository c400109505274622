//! Service entry point: load the dataset, declare the schema, serve.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use microblog::config::ServerConfig;
use microblog::schema::Schema;
use microblog::server::{AppState, serve};
use microblog::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // The store and schema are fixed for the process lifetime; everything
    // downstream only reads through them.
    let store = Store::seeded();
    let schema = Schema::build();

    tracing::info!(
        users = store.user_count(),
        posts = store.post_count(),
        comments = store.comment_count(),
        "Dataset loaded"
    );
    tracing::info!(
        "Graph query endpoint available at http://{}/graphql",
        config.bind_addr
    );

    serve(AppState::new(store, schema), config.bind_addr).await
}
