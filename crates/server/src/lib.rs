mod http;
mod security;

pub use http::build_router;
pub use security::AuthToken;

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use wearmatch_catalog::{CatalogStore, ColorExtractor, StaticPaletteExtractor};
use wearmatch_scoring::ScoreWeights;

#[derive(Parser, Debug)]
#[command(
    name = "wearmatch-server",
    version,
    about = "WearMatch matching and checkout API"
)]
pub struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:8787
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub bind: String,

    /// Allow binding to non-loopback addresses (requires an auth token)
    #[arg(long)]
    pub public: bool,

    /// Require Authorization: Bearer <token> on checkout (env: WEARMATCH_AUTH_TOKEN)
    #[arg(long)]
    pub auth_token: Option<String>,

    /// Directory holding products.json (orders.json is written next to it)
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Override how many matches /ai-match returns
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Optional score weights JSON file
    #[arg(long)]
    pub weights: Option<PathBuf>,
}

/// Everything a request handler needs, constructed once at startup and
/// shared behind an `Arc`.
pub struct AppState {
    pub store: CatalogStore,
    pub extractor: Arc<dyn ColorExtractor>,
    pub weights: ScoreWeights,
    pub auth_token: Option<AuthToken>,
}

pub async fn serve(args: ServeArgs) -> Result<()> {
    security::ensure_bind_allowed(&args.bind, args.public).await?;

    let auth_token_raw = args
        .auth_token
        .clone()
        .or_else(|| std::env::var(security::AUTH_TOKEN_ENV).ok());
    let auth_token = security::AuthToken::parse(auth_token_raw.as_deref())?;
    if args.public && auth_token.is_none() {
        anyhow::bail!(
            "--public requires an auth token: set --auth-token or export WEARMATCH_AUTH_TOKEN"
        );
    }

    let mut weights = match &args.weights {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read weights file {path:?}"))?;
            ScoreWeights::from_json(&bytes)?
        }
        None => ScoreWeights::default(),
    };
    if let Some(top_n) = args.top_n {
        weights = weights.with_top_n(top_n);
        weights.validate()?;
    }

    let store = CatalogStore::load(&args.data_dir)
        .await
        .with_context(|| format!("Failed to load catalog from {:?}", args.data_dir))?;

    let state = Arc::new(AppState {
        store,
        extractor: Arc::new(StaticPaletteExtractor),
        weights,
        auth_token,
    });
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    let local_addr = listener.local_addr()?;
    log::info!(
        "Serving WearMatch API at http://{local_addr} ({} products)",
        state.store.len()
    );
    if state.auth_token.is_some() {
        log::info!("Checkout auth enabled: send 'Authorization: Bearer <token>'");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
