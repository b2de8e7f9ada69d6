//! HTTP transport over a [`CorridorEngine`].
//!
//! | Route | Method | |
//! |---|---|---|
//! | `/` | GET | the front-end page, `index.html` in the static directory |
//! | `/get_all_points` | GET | every stored sample |
//! | `/compute` | POST | detailed classification against one segment |
//! | `/compute_multiple` | POST | counts against a chain of segments |
//! | `/api/push_data` | POST | ingests one sample |

pub mod envelope;
#[doc(hidden)]
pub mod error;
pub mod routes;
pub mod wire;

#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use error::ServerError;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{serve, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer, MaxAge};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::engine::CorridorEngine;

/// Shared state handed to every route.
#[derive(Debug)]
pub struct AppState {
    pub engine: CorridorEngine,
    /// Corridor half-width for requests which do not supply one.
    pub corridor_width: f64,
}

impl AppState {
    pub fn new(engine: CorridorEngine, corridor_width: f64) -> Self {
        AppState {
            engine,
            corridor_width,
        }
    }
}

fn cors(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .allow_origin(allow_origin)
        .max_age(MaxAge::exact(Duration::new(3600, 0)))
}

/// Builds the application router.
pub fn router(state: Arc<AppState>, config: &Config) -> Router {
    let index = ServeFile::new(config.static_dir.join("index.html"));

    Router::new()
        .route_service("/", index)
        .route("/get_all_points", get(routes::get_all_points))
        .route("/compute", post(routes::compute))
        .route("/compute_multiple", post(routes::compute_multiple))
        .route("/api/push_data", post(routes::push_data))
        .layer(cors(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the engine on the configured address until the process exits.
pub async fn run(engine: CorridorEngine, config: &Config) -> crate::Result<()> {
    let state = Arc::new(AppState::new(engine, config.corridor_width));

    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    tracing::info!(message = "Starting server.", addr = ?listener.local_addr()?);

    serve(listener, router(state, config)).await?;

    tracing::info!(message = "Terminating server.");
    Ok(())
}
