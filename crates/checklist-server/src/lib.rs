pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use checklist_core::record_db::RecordDb;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(db: Arc<RecordDb>, token: Option<String>) -> Router {
    let app_state = state::AppState::new(db);
    let auth = auth::AuthConfig { token };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let checklists = Router::new()
        .route(
            "/api/checklists/{user_id}",
            get(routes::checklists::get_checklist).put(routes::checklists::put_checklist),
        )
        .route_layer(middleware::from_fn_with_state(auth, auth::auth_middleware));

    Router::new()
        .route("/api/health", get(routes::health::health))
        .merge(checklists)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Open the record database and serve the API on `0.0.0.0:{port}`.
pub async fn serve(db_path: PathBuf, port: u16, token: Option<String>) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(db_path, listener, token).await
}

/// Serve on a pre-bound listener.
///
/// Unlike `serve`, the caller can read the actual port before starting
/// (useful when binding port 0 in tests).
pub async fn serve_on(
    db_path: PathBuf,
    listener: tokio::net::TcpListener,
    token: Option<String>,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let display_path = db_path.display().to_string();
    let (db, records) = tokio::task::spawn_blocking(move || {
        let db = RecordDb::open(&db_path)?;
        let records = db.identities()?.len();
        Ok::<_, checklist_core::ChecklistError>((db, records))
    })
    .await??;
    let app = build_router(Arc::new(db), token.clone());

    tracing::info!(db = %display_path, records, "checklist server listening on http://localhost:{actual_port}");
    if token.is_some() {
        tracing::info!("bearer token required for /api/checklists");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
