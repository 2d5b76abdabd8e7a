use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::date_utils::SessionDate;
use crate::error::AppResult;
use crate::error_pages::{error_page_middleware, fallback_handler};
use crate::handlers;
use crate::services::seed;
use crate::state::AppState;
use crate::xsrf::{xsrf_middleware, XsrfToken};

/// Build the application state and Axum router from a [`Config`].
///
/// Loads the seed document, opens the dashboard session dated today, and
/// assembles the full middleware stack. Returns the shared state and a
/// ready-to-serve router.
pub fn build_app(config: Config) -> AppResult<(AppState, Router)> {
    let products = seed::load(config.seed_path.as_deref())?;
    let dashboard = Dashboard::new(products, SessionDate::today());
    Ok(build_app_with(config, dashboard))
}

/// Assemble the router around an already opened dashboard.
pub fn build_app_with(config: Config, dashboard: Dashboard) -> (AppState, Router) {
    let xsrf_token = XsrfToken::generate();
    tracing::info!("Generated XSRF token for session");

    let static_path = config.static_path.clone();
    let state = AppState::new(config, dashboard, xsrf_token.clone());

    let app = Router::new()
        .merge(handlers::routes())
        .fallback(fallback_handler)
        .nest_service("/static", ServeDir::new(static_path))
        .layer(middleware::from_fn(move |req, next| {
            let token = xsrf_token.clone();
            xsrf_middleware(token, req, next)
        }))
        .layer(middleware::from_fn(error_page_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (state, app)
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0 for
/// OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(app: Router, host: &str, port: u16) -> AppResult<(u16, JoinHandle<()>)> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_port, handle))
}
