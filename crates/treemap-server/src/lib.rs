pub mod accounts;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    routing::get,
    Json, Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use treemap_data::{GroupBy, TreeNode, DEFAULT_ENDPOINT_PATH};

pub use accounts::Account;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct AppState {
    accounts: Arc<Vec<Account>>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Without a seed weights differ on every request.
    #[must_use]
    pub fn new(accounts: Vec<Account>, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            accounts: Arc::new(accounts),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    fn tree(&self, group_by: GroupBy) -> Vec<TreeNode> {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        accounts::group(&self.accounts, group_by, &mut *rng)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    filter: Option<String>,
}

/// How long a request may take before it is answered with `408`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route(DEFAULT_ENDPOINT_PATH, get(tree_by_query).post(tree_by_body))
        .with_state(state);
    with_layers(routes, REQUEST_TIMEOUT)
}

/// CORS, request timeout and tracing shared by every route.
pub fn with_layers(routes: Router, timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    routes
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[allow(clippy::missing_errors_doc)]
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<(), Error> {
    tracing::info!(addr = ?listener.local_addr().ok(), accounts = state.accounts.len(), "serving");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn tree_by_query(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<TreeNode>>, (StatusCode, String)> {
    respond(&state, params.filter.as_deref())
}

async fn tree_by_body(
    State(state): State<AppState>,
    Json(params): Json<FilterParams>,
) -> Result<Json<Vec<TreeNode>>, (StatusCode, String)> {
    respond(&state, params.filter.as_deref())
}

// A missing filter groups by currency.
fn respond(
    state: &AppState,
    filter: Option<&str>,
) -> Result<Json<Vec<TreeNode>>, (StatusCode, String)> {
    let group_by = match filter {
        None => GroupBy::Currency,
        Some(filter) => filter.parse::<GroupBy>().map_err(|_| {
            tracing::warn!(filter, "unrecognized filter");
            (
                StatusCode::BAD_REQUEST,
                format!("unrecognized filter: {filter}"),
            )
        })?,
    };
    let nodes = state.tree(group_by);
    tracing::debug!(%group_by, groups = nodes.len(), "tree data");
    Ok(Json(nodes))
}
