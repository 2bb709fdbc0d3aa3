//! HTTP server exposing the game service under `/tictactoe`.

mod response;
mod routes;
mod validation;

pub use response::{ApiError, ApiResult, Envelope};
pub use validation::{Coordinates, CreateGameRequest, MoveRequest, MovesQuery, NewGame};

use crate::config::ServerConfig;
use crate::service::GameService;
use axum::Router;
use axum::extract::Request;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use axum::routing::{get, post, put};
use std::sync::Arc;
use tokio::signal;
use tower::Layer;
use tower::util::{MapRequest, MapRequestLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    service: Arc<GameService>,
}

impl AppState {
    /// Wraps a service for sharing across request tasks.
    pub fn new(service: GameService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// The game service.
    pub fn service(&self) -> &GameService {
        &self.service
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GameService::in_memory())
    }
}

/// Router wrapped so paths are normalized before route matching.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Builds the `/tictactoe` routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tictactoe", get(routes::list_games).post(routes::create_game))
        .route("/tictactoe/{game_id}", get(routes::game_summary))
        .route("/tictactoe/{game_id}/quit", put(routes::quit_game))
        .route("/tictactoe/{game_id}/moves", get(routes::list_moves))
        .route(
            "/tictactoe/{game_id}/moves/{move_number}",
            get(routes::get_move),
        )
        .route("/tictactoe/{game_id}/{player_id}", post(routes::post_move))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Builds the full application: routes plus caseless, slash-tolerant path
/// matching.
///
/// Route matching happens inside the router, so the path rewrite has to wrap
/// the router rather than be added as a router layer.
pub fn app(state: AppState) -> App {
    MapRequestLayer::new(lowercase_path as fn(Request) -> Request).layer(router(state))
}

/// Lower-cases the request path and drops a trailing slash. The query string
/// is kept as sent.
fn lowercase_path(mut req: Request) -> Request {
    let path = req.uri().path();
    let mut lowered = path.to_lowercase();
    while lowered.len() > 1 && lowered.ends_with('/') {
        lowered.pop();
    }
    if lowered == path {
        return req;
    }

    let path_and_query = match req.uri().query() {
        Some(query) => format!("{lowered}?{query}"),
        None => lowered,
    };

    let mut parts = req.uri().clone().into_parts();
    match path_and_query.parse::<PathAndQuery>() {
        Ok(pq) => {
            parts.path_and_query = Some(pq);
            match Uri::from_parts(parts) {
                Ok(uri) => *req.uri_mut() = uri,
                Err(e) => debug!(error = %e, "Kept original URI"),
            }
        }
        Err(e) => debug!(error = %e, "Kept original URI"),
    }
    req
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Fails when the address cannot be bound or the server stops abnormally.
#[instrument(skip(state), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(address = %listener.local_addr()?, "Tic-tac-toe server ready");

    axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown successfully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_lowercase_path_keeps_query() {
        let req = Request::builder()
            .uri("/TicTacToe/ABC/Moves?start=0&until=ONE")
            .body(Body::empty())
            .unwrap();
        let req = lowercase_path(req);
        assert_eq!(req.uri().path(), "/tictactoe/abc/moves");
        assert_eq!(req.uri().query(), Some("start=0&until=ONE"));
    }

    #[test]
    fn test_lowercase_path_drops_trailing_slash() {
        let req = Request::builder()
            .uri("/TicTacToe/?start=1")
            .body(Body::empty())
            .unwrap();
        let req = lowercase_path(req);
        assert_eq!(req.uri().path(), "/tictactoe");
        assert_eq!(req.uri().query(), Some("start=1"));

        let root = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(lowercase_path(root).uri().path(), "/");
    }

    #[test]
    fn test_lowercase_path_untouched_when_lower() {
        let req = Request::builder()
            .uri("/tictactoe")
            .body(Body::empty())
            .unwrap();
        assert_eq!(lowercase_path(req).uri().path(), "/tictactoe");
    }
}
