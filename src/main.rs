use schedule_board::{
    load_documents, load_store, resolve_data_dir, resolve_state_path, router, sheets, AppState,
    Board, SheetsConfig,
};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir();
    let state_path = resolve_state_path();
    if let Some(parent) = state_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // All three documents or nothing; a failed load aborts before any serving.
    let docs = match load_documents(&data_dir).await {
        Ok(docs) => docs,
        Err(err) => {
            error!("initialization failed: {err}");
            return Err(err.into());
        }
    };

    let store = load_store(&state_path).await;
    let config = SheetsConfig::from_env();
    let http = reqwest::Client::new();
    let (roster, source) = sheets::resolve_roster(&http, &config, &store, &docs.roster).await;
    info!(
        "schedule loaded: {} rooms, {} time slots, {} sessions, {} members ({source:?})",
        docs.layout.rooms.len(),
        docs.layout.time_slots.len(),
        docs.catalog.sessions.len(),
        roster.members.len(),
    );

    let state = AppState::new(
        docs,
        state_path,
        config,
        http,
        Board {
            roster,
            source,
            store,
        },
    );
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
