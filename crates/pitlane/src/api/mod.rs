//! HTTP API for pitlane.
//!
//! Every route is a read-only `GET`. Handlers share no state beyond the
//! configuration in [`AppState`]: each request opens its own read-only
//! connection on the blocking pool, runs its queries and drops it.

mod handlers;
mod params;
mod resources;
mod response;
mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{Config, PaginationConfig};
use crate::error::{Error, Result};
use crate::storage::Storage;

pub use response::Paginated;
pub use views::{CarPartDetailView, CarPartView, PartView, PersonView};

/// Configuration shared by all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    database_path: Arc<PathBuf>,
    pagination: PaginationConfig,
}

impl AppState {
    /// State serving the database at `database_path`.
    #[must_use]
    pub fn new(database_path: impl Into<PathBuf>, pagination: PaginationConfig) -> Self {
        Self {
            database_path: Arc::new(database_path.into()),
            pagination,
        }
    }

    /// State built from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.database_path(), config.pagination)
    }

    /// Run `f` against a fresh read-only connection on the blocking pool.
    async fn with_storage<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Storage) -> Result<T> + Send + 'static,
    {
        let path = Arc::clone(&self.database_path);
        tokio::task::spawn_blocking(move || {
            let storage = Storage::open_read_only(path.as_path())?;
            f(&storage)
        })
        .await
        .map_err(|e| Error::internal(format!("storage task failed: {e}")))?
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/teams", get(handlers::list_teams))
        .route("/teams/:id", get(handlers::get_team))
        .route("/people", get(handlers::list_people))
        .route("/people/:id", get(handlers::get_person))
        .route("/garages", get(handlers::list_garages))
        .route("/garages/:id", get(handlers::get_garage))
        .route("/garage-bays", get(handlers::list_garage_bays))
        .route("/garage-bays/:id", get(handlers::get_garage_bay))
        .route("/cars", get(handlers::list_cars))
        .route("/cars/:id", get(handlers::get_car))
        .route("/parts", get(handlers::list_parts))
        .route("/parts/lifecycle-warnings", get(handlers::lifecycle_warnings))
        .route("/parts/:id", get(handlers::get_part))
        .route("/car-parts", get(handlers::list_car_parts))
        .route("/car-parts/active", get(handlers::active_car_parts))
        .route("/car-parts/by-car/:car_id", get(handlers::car_parts_by_car))
        .route("/car-parts/:id", get(handlers::get_car_part))
        .route("/sessions", get(handlers::list_sessions))
        .route("/sessions/:id", get(handlers::get_session))
        .route("/car-sessions", get(handlers::list_car_sessions))
        .route("/car-sessions/:id", get(handlers::get_car_session))
        .route("/telemetry-sessions", get(handlers::list_telemetry_sessions))
        .route("/telemetry-sessions/:id", get(handlers::get_telemetry_session))
        .route("/work-orders", get(handlers::list_work_orders))
        .route("/work-orders/:id", get(handlers::get_work_order))
        .route("/work-assignments", get(handlers::list_work_assignments))
        .route("/work-assignments/:id", get(handlers::get_work_assignment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until the process is interrupted.
///
/// `bind` overrides the configured listen address.
///
/// # Errors
///
/// Returns an error if the address is invalid, the database is missing, or
/// the listener fails.
pub async fn serve(config: &Config, bind: Option<SocketAddr>) -> Result<()> {
    let addr = match bind {
        Some(addr) => addr,
        None => config.bind_address()?,
    };

    // The database must exist before the listener starts.
    let database_path = config.database_path();
    drop(Storage::open_read_only(&database_path)?);

    let app = router(AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "Serving {} on http://{}",
        database_path.display(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests;
